use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum TplintError {
	#[error(transparent)]
	#[diagnostic(code(tplint::io_error))]
	Io(#[from] std::io::Error),

	#[error("unexpected character \"{character}\" at line {line}")]
	#[diagnostic(
		code(tplint::unexpected_character),
		help("this character cannot start any token inside an expression or statement")
	)]
	UnexpectedCharacter { character: char, line: usize },

	#[error("unclosed '{bracket}' at line {line}")]
	#[diagnostic(
		code(tplint::unclosed_bracket),
		help("add the matching closing bracket before the end of the tag")
	)]
	UnclosedBracket { bracket: char, line: usize },

	#[error("unclosed comment at line {line}")]
	#[diagnostic(code(tplint::unclosed_comment), help("close the comment with `#}}`"))]
	UnclosedComment { line: usize },

	#[error("unclosed verbatim block at line {line}")]
	#[diagnostic(
		code(tplint::unclosed_verbatim),
		help("add `{{% endverbatim %}}` to close this block")
	)]
	UnclosedVerbatim { line: usize },

	#[error("the template is invalid")]
	#[diagnostic(
		code(tplint::invalid_template),
		help("a tag or string was opened but the file ended before it was closed")
	)]
	InvalidTemplate,

	#[error("invalid violation identifier: `{0}`")]
	#[diagnostic(
		code(tplint::invalid_violation_id),
		help("identifiers look like `RuleName.MessageId:line:column`")
	)]
	InvalidViolationId(String),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(tplint::config_parse),
		help("check that the config is valid TOML with [fix] and/or [syntax] sections")
	)]
	ConfigParse(String),

	#[error("fixes for `{file}` produced a template that cannot be tokenized: {reason}")]
	#[diagnostic(
		code(tplint::fixer_output_invalid),
		help("the file was left untouched; report the offending rule")
	)]
	FixerOutputInvalid { file: String, reason: String },
}

impl TplintError {
	/// Returns true for errors raised while tokenizing a template.
	pub fn is_lex_error(&self) -> bool {
		matches!(
			self,
			Self::UnexpectedCharacter { .. }
				| Self::UnclosedBracket { .. }
				| Self::UnclosedComment { .. }
				| Self::UnclosedVerbatim { .. }
				| Self::InvalidTemplate
		)
	}

	/// The template line an error points at, when it has one.
	pub fn line(&self) -> Option<usize> {
		match self {
			Self::UnexpectedCharacter { line, .. }
			| Self::UnclosedBracket { line, .. }
			| Self::UnclosedComment { line }
			| Self::UnclosedVerbatim { line } => Some(*line),
			_ => None,
		}
	}
}

pub type TplintResult<T> = Result<T, TplintError>;
