use std::sync::Arc;

use logos::Logos;
use tracing::debug;
use tracing::instrument;

use crate::Environment;
use crate::Point;
use crate::TplintError;
use crate::TplintResult;
use crate::directives::DEFAULT_DIRECTIVE_PREFIX;
use crate::directives::parse_directive;
use crate::tokens::Token;
use crate::tokens::TokenKind;
use crate::tokens::Tokens;
use crate::tokens::TokensBuilder;

/// Atoms of literal text: template data, comment bodies and inline comments.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum TextAtom {
	#[regex(r" +")]
	Whitespace,
	#[regex(r"\t+")]
	Tab,
	#[regex(r"\r\n|\n|\r")]
	Eol,
	#[regex(r"[^ \t\r\n]+")]
	Text,
}

/// Atoms inside `{{ … }}`, `{% … %}` and string interpolations. Operators are
/// not listed here: they come from the [`Environment`] at runtime.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum ExprAtom {
	#[regex(r" +")]
	Whitespace,
	#[regex(r"\t+")]
	Tab,
	#[regex(r"\r\n|\n|\r")]
	Eol,
	#[token("#")]
	Hash,
	#[token("=>")]
	Arrow,
	#[token("...")]
	Spread,
	#[regex(r"[a-zA-Z_\u{80}-\u{10FFFF}][a-zA-Z0-9_\u{80}-\u{10FFFF}]*")]
	Name,
	#[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
	Number,
	#[regex(r"'([^'\\]|\\[\s\S])*'")]
	SingleQuotedString,
	#[token("\"")]
	DoubleQuote,
	#[regex(r"[()\[\]{}:.,|?]")]
	Punctuation,
}

/// Context states of the walker, innermost last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexerContext {
	/// Template text outside of any tag.
	Data,
	/// Inside `{{ … }}`.
	Var,
	/// Inside `{% … %}`.
	Block,
	/// Inside `{# … #}`. `end` is the byte offset of the closing delimiter.
	Comment { end: usize },
	/// After `#` inside an expression, up to `end`.
	InlineComment { end: usize },
	/// Inside a double quoted string which contains interpolations.
	DqString,
	/// Inside `#{ … }`.
	Interpolation,
	/// Body of a verbatim block, up to `end`.
	Verbatim { end: usize },
}

/// What a text atom becomes in each literal context.
#[derive(Debug, Clone, Copy)]
enum TextMode {
	Data,
	Comment,
	InlineComment,
}

impl TextMode {
	fn kind(self, atom: TextAtom) -> TokenKind {
		match (self, atom) {
			(Self::Data, TextAtom::Text) => TokenKind::Text,
			(Self::Data, TextAtom::Whitespace) => TokenKind::Whitespace,
			(Self::Data, TextAtom::Tab) => TokenKind::Tab,
			(Self::Data | Self::InlineComment, TextAtom::Eol) => TokenKind::Eol,
			(Self::Comment, TextAtom::Text) => TokenKind::CommentText,
			(Self::Comment, TextAtom::Whitespace) => TokenKind::CommentWhitespace,
			(Self::Comment, TextAtom::Tab) => TokenKind::CommentTab,
			(Self::Comment, TextAtom::Eol) => TokenKind::CommentEol,
			(Self::InlineComment, TextAtom::Text) => TokenKind::InlineCommentText,
			(Self::InlineComment, TextAtom::Whitespace) => TokenKind::InlineCommentWhitespace,
			(Self::InlineComment, TextAtom::Tab) => TokenKind::InlineCommentTab,
		}
	}
}

/// An open grouping inside an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Opener {
	Paren,
	/// Arguments of a function, filter, test or method call.
	CallParen,
	/// Parameters of a macro declaration.
	MacroParen,
	Bracket,
	Brace,
	/// A `?` still waiting for its `:`.
	Ternary,
	Interpolation,
}

impl Opener {
	fn opening(self) -> char {
		match self {
			Self::Paren | Self::CallParen | Self::MacroParen => '(',
			Self::Bracket => '[',
			Self::Brace | Self::Interpolation => '{',
			Self::Ternary => '?',
		}
	}

	fn closing(self) -> char {
		match self {
			Self::Paren | Self::CallParen | Self::MacroParen => ')',
			Self::Bracket => ']',
			Self::Brace | Self::Interpolation => '}',
			Self::Ternary => ':',
		}
	}
}

/// Block names whose body is raw text.
const VERBATIM_BLOCKS: [&str; 2] = ["verbatim", "raw"];

/// Converts template source into a lossless [`Tokens`] stream.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
	environment: Environment,
	directive_prefix: Option<String>,
}

impl Tokenizer {
	pub fn new(environment: Environment) -> Self {
		Self {
			environment,
			directive_prefix: None,
		}
	}

	/// Change the keyword recognized by suppression comments (`tplint` by
	/// default).
	#[must_use]
	pub fn with_directive_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.directive_prefix = Some(prefix.into());
		self
	}

	/// Tokenize `source`. Fails without partial output when the template
	/// cannot be lexed.
	#[instrument(level = "debug", skip_all, fields(filename = filename))]
	pub fn tokenize(&self, source: &str, filename: &str) -> TplintResult<Tokens> {
		let prefix = self
			.directive_prefix
			.as_deref()
			.unwrap_or(DEFAULT_DIRECTIVE_PREFIX);
		let tokens = TokenWalker::new(source, filename, &self.environment, prefix).process()?;

		debug!(
			tokens = tokens.len(),
			ignored = tokens.ignored_violations().len(),
			"tokenized template"
		);

		Ok(tokens)
	}
}

/// Tokenize `source` with the given operator registry.
pub fn tokenize(source: &str, filename: &str, environment: &Environment) -> TplintResult<Tokens> {
	TokenWalker::new(source, filename, environment, DEFAULT_DIRECTIVE_PREFIX).process()
}

/// Walks the source with context-dependent rules, producing tokens.
struct TokenWalker<'a> {
	source: &'a str,
	filename: Arc<str>,
	environment: &'a Environment,
	directive_prefix: &'a str,
	/// Current byte offset into `source`.
	cursor: usize,
	/// Position of `cursor`.
	position: Point,
	tokens: TokensBuilder,
	stack: Vec<LexerContext>,
	brackets: Vec<(Opener, usize)>,
	/// Byte offsets of every `{{`, `{%` and `{#` in the source.
	tag_starts: Vec<usize>,
	/// Index into `tag_starts` of the first start not yet behind `cursor`.
	next_tag: usize,
	/// Name of the statement block currently being lexed.
	block_name: Option<String>,
}

impl<'a> TokenWalker<'a> {
	fn new(
		source: &'a str,
		filename: &str,
		environment: &'a Environment,
		directive_prefix: &'a str,
	) -> Self {
		Self {
			source,
			filename: Arc::from(filename),
			environment,
			directive_prefix,
			cursor: 0,
			position: Point::default(),
			tokens: TokensBuilder::new(),
			stack: vec![LexerContext::Data],
			brackets: Vec::new(),
			tag_starts: find_tag_starts(source),
			next_tag: 0,
			block_name: None,
		}
	}

	fn process(mut self) -> TplintResult<Tokens> {
		while self.cursor < self.source.len() {
			match self.context() {
				LexerContext::Data => self.lex_data()?,
				LexerContext::Var => self.lex_tag_body("}}", TokenKind::VarEnd)?,
				LexerContext::Block => self.lex_tag_body("%}", TokenKind::BlockEnd)?,
				LexerContext::Comment { end } => self.lex_comment(end),
				LexerContext::InlineComment { end } => self.lex_inline_comment(end),
				LexerContext::DqString => self.lex_dq_string()?,
				LexerContext::Interpolation => self.lex_interpolation()?,
				LexerContext::Verbatim { end } => self.lex_verbatim(end),
			}
		}

		self.finish()
	}

	fn context(&self) -> LexerContext {
		self.stack.last().copied().unwrap_or(LexerContext::Data)
	}

	fn finish(mut self) -> TplintResult<Tokens> {
		if self.stack.len() > 1 {
			let unclosed = self
				.brackets
				.iter()
				.rev()
				.find(|(opener, _)| !matches!(opener, Opener::Ternary | Opener::Interpolation));

			return Err(match unclosed {
				Some((opener, line)) => {
					TplintError::UnclosedBracket {
						bracket: opener.opening(),
						line: *line,
					}
				}
				None => TplintError::InvalidTemplate,
			});
		}

		self.push_token(TokenKind::Eof, 0);
		Ok(self.tokens.build())
	}

	/// Emit the `length` bytes at the cursor as a token and move past them.
	fn push_token(&mut self, kind: TokenKind, length: usize) {
		let value = &self.source[self.cursor..self.cursor + length];
		self.tokens.push(Token::new(
			kind,
			self.position.line,
			self.position.column,
			Arc::clone(&self.filename),
			value,
		));
		self.position.advance_str(value);
		self.cursor += length;
	}

	/// Emit one whitespace, tab, line ending or text token, never reading past
	/// `limit`.
	fn lex_text_atom(&mut self, limit: usize, mode: TextMode) {
		let slice = &self.source[self.cursor..limit];
		let mut lexer = TextAtom::lexer(slice);
		let (atom, length) = match lexer.next() {
			Some(Ok(atom)) => (atom, lexer.span().end),
			_ => (TextAtom::Text, slice.chars().next().map_or(1, char::len_utf8)),
		};

		self.push_token(mode.kind(atom), length);
	}

	fn next_tag_start(&mut self) -> Option<usize> {
		while self
			.tag_starts
			.get(self.next_tag)
			.is_some_and(|start| *start < self.cursor)
		{
			self.next_tag += 1;
		}

		self.tag_starts.get(self.next_tag).copied()
	}

	fn lex_data(&mut self) -> TplintResult<()> {
		let next_tag = self.next_tag_start();

		if next_tag == Some(self.cursor) {
			return self.lex_tag_start();
		}

		let limit = next_tag.unwrap_or(self.source.len());
		self.lex_text_atom(limit, TextMode::Data);
		Ok(())
	}

	fn lex_tag_start(&mut self) -> TplintResult<()> {
		let source = self.source;
		let rest = source[self.cursor..].as_bytes();
		let length = if matches!(rest.get(2), Some(b'-' | b'~')) {
			3
		} else {
			2
		};

		match rest[1] {
			b'{' => {
				self.push_token(TokenKind::VarStart, length);
				self.stack.push(LexerContext::Var);
			}
			b'%' => {
				self.block_name = None;
				self.push_token(TokenKind::BlockStart, length);
				self.stack.push(LexerContext::Block);
			}
			_ => {
				let content_start = self.cursor + length;
				let end = find_closing(source, content_start, "#}").ok_or(
					TplintError::UnclosedComment {
						line: self.position.line,
					},
				)?;

				self.collect_directives(&source[content_start..end]);
				self.push_token(TokenKind::CommentStart, length);
				self.stack.push(LexerContext::Comment { end });
			}
		}

		Ok(())
	}

	fn collect_directives(&mut self, body: &str) {
		for id in parse_directive(body, self.position.line, self.directive_prefix) {
			self.tokens.ignore_violation(id);
		}
	}

	fn lex_comment(&mut self, end: usize) {
		if self.cursor == end {
			let length = closing_length(self.source, end, "#}");
			self.push_token(TokenKind::CommentEnd, length);
			self.stack.pop();
		} else {
			self.lex_text_atom(end, TextMode::Comment);
		}
	}

	fn lex_inline_comment(&mut self, end: usize) {
		if self.cursor == end {
			self.stack.pop();
		} else {
			self.lex_text_atom(end, TextMode::InlineComment);
		}
	}

	fn lex_verbatim(&mut self, end: usize) {
		if self.cursor == end {
			self.stack.pop();
		} else {
			self.lex_text_atom(end, TextMode::Data);
		}
	}

	/// Lex inside `{{ … }}` or `{% … %}`, closing the tag once every grouping
	/// except pending ternaries is closed.
	fn lex_tag_body(&mut self, closing: &str, end_kind: TokenKind) -> TplintResult<()> {
		let only_ternaries = self
			.brackets
			.iter()
			.all(|(opener, _)| *opener == Opener::Ternary);

		if only_ternaries {
			if let Some(length) = closing_at(self.source, self.cursor, closing) {
				self.brackets.clear();
				self.push_token(end_kind, length);
				self.stack.pop();

				if end_kind == TokenKind::BlockEnd {
					self.enter_verbatim()?;
				}

				return Ok(());
			}
		}

		self.lex_expression()
	}

	fn enter_verbatim(&mut self) -> TplintResult<()> {
		let Some(name) = self.block_name.take() else {
			return Ok(());
		};

		if !VERBATIM_BLOCKS.contains(&name.as_str()) {
			return Ok(());
		}

		let end = self
			.find_verbatim_end(&name)
			.ok_or(TplintError::UnclosedVerbatim {
				line: self.position.line,
			})?;
		self.stack.push(LexerContext::Verbatim { end });

		Ok(())
	}

	fn find_verbatim_end(&self, name: &str) -> Option<usize> {
		let closing = format!("end{name}");

		self.tag_starts
			.iter()
			.copied()
			.filter(|start| *start >= self.cursor)
			.find(|start| {
				let Some(rest) = self.source[*start..].strip_prefix("{%") else {
					return false;
				};
				let rest = rest.strip_prefix(['-', '~']).unwrap_or(rest).trim_start();

				rest.strip_prefix(closing.as_str()).is_some_and(|after| {
					!after.starts_with(|ch: char| ch.is_alphanumeric() || ch == '_')
				})
			})
	}

	fn lex_expression(&mut self) -> TplintResult<()> {
		let source = self.source;
		let rest = &source[self.cursor..];
		let mut lexer = ExprAtom::lexer(rest);
		let atom = lexer.next().and_then(Result::ok);
		let length = lexer.span().end;

		match atom {
			Some(ExprAtom::Whitespace) => {
				self.push_token(TokenKind::Whitespace, length);
				return Ok(());
			}
			Some(ExprAtom::Tab) => {
				self.push_token(TokenKind::Tab, length);
				return Ok(());
			}
			Some(ExprAtom::Eol) => {
				self.push_token(TokenKind::Eol, length);
				return Ok(());
			}
			Some(ExprAtom::Hash) => return self.lex_inline_comment_start(),
			Some(ExprAtom::Arrow) => {
				self.push_token(TokenKind::Arrow, length);
				return Ok(());
			}
			Some(ExprAtom::Spread) => {
				self.push_token(TokenKind::Spread, length);
				return Ok(());
			}
			_ => {}
		}

		if self.is_named_argument_separator() {
			self.push_token(TokenKind::NamedArgumentSeparator, 1);
			return Ok(());
		}

		if let Some(operator) = self.environment.match_operator(source, self.cursor) {
			self.push_token(TokenKind::Operator, operator.len());
			return Ok(());
		}

		match atom {
			Some(ExprAtom::Name) => {
				self.lex_name(length);
				Ok(())
			}
			Some(ExprAtom::Number) => {
				self.push_token(TokenKind::Number, length);
				Ok(())
			}
			Some(ExprAtom::SingleQuotedString) => {
				self.push_token(TokenKind::String, length);
				Ok(())
			}
			Some(ExprAtom::Punctuation) => self.lex_punctuation(),
			Some(ExprAtom::DoubleQuote) => self.lex_double_quoted_string(),
			_ => {
				Err(TplintError::UnexpectedCharacter {
					character: rest.chars().next().unwrap_or_default(),
					line: self.position.line,
				})
			}
		}
	}

	fn lex_inline_comment_start(&mut self) -> TplintResult<()> {
		let source = self.source;
		let content_start = self.cursor + 1;
		let closing = if self.stack.contains(&LexerContext::Block)
			&& !self.stack.contains(&LexerContext::Var)
		{
			"%}"
		} else {
			"}}"
		};
		let eol = source[content_start..]
			.find(['\r', '\n'])
			.map(|offset| content_start + offset);
		let end = match (eol, find_closing(source, content_start, closing)) {
			(Some(eol), Some(closing)) => eol.min(closing),
			(Some(end), None) | (None, Some(end)) => end,
			(None, None) => {
				return Err(TplintError::UnclosedComment {
					line: self.position.line,
				});
			}
		};

		self.collect_directives(&source[content_start..end]);
		self.push_token(TokenKind::InlineCommentStart, 1);
		self.stack.push(LexerContext::InlineComment { end });

		Ok(())
	}

	/// `=` or `:` directly after `name` at an argument position of a call.
	fn is_named_argument_separator(&self) -> bool {
		let rest = &self.source[self.cursor..];
		let separator = rest.starts_with(':')
			|| (rest.starts_with('=') && !rest.starts_with("==") && !rest.starts_with("=>"));

		if !separator || !matches!(self.brackets.last(), Some((Opener::CallParen, _))) {
			return false;
		}

		let Some(last) = self.tokens.last_significant() else {
			return false;
		};

		last.kind == TokenKind::Name
			&& self
				.tokens
				.second_last_significant()
				.is_some_and(|token| is_punctuation(token, &["(", ","]))
	}

	fn lex_name(&mut self, length: usize) {
		let kind = self.classify_name(length);

		if kind == TokenKind::BlockName {
			self.block_name = Some(self.source[self.cursor..self.cursor + length].to_string());
		}

		self.push_token(kind, length);
	}

	fn classify_name(&self, length: usize) -> TokenKind {
		let name = &self.source[self.cursor..self.cursor + length];
		let next = self.source[self.cursor + length..].chars().next();
		let last = self.tokens.last_significant();
		let top = self.brackets.last().map(|(opener, _)| *opener);

		if let Some(last) = last {
			match last.kind {
				TokenKind::BlockStart => return TokenKind::BlockName,
				TokenKind::BlockName if last.value == "macro" => return TokenKind::MacroName,
				TokenKind::BlockName if matches!(last.value.as_str(), "apply" | "filter") => {
					return TokenKind::FilterName;
				}
				TokenKind::Punctuation if last.value == "|" => return TokenKind::FilterName,
				TokenKind::Operator if is_test_operator(&last.value) => return TokenKind::TestName,
				TokenKind::TestName if self.environment.continues_test(&last.value, name) => {
					return TokenKind::TestName;
				}
				_ => {}
			}
		}

		let at_list_start = last.is_some_and(|token| is_punctuation(token, &["(", ",", "{"]));

		match top {
			Some(Opener::MacroParen) if at_list_start => return TokenKind::MacroVarName,
			Some(Opener::Brace) if at_list_start => return TokenKind::HashKeyName,
			_ => {}
		}

		let is_method = last.is_some_and(|token| is_punctuation(token, &["."]));

		if next == Some('(') && !is_method {
			return TokenKind::FunctionName;
		}

		TokenKind::Name
	}

	fn lex_punctuation(&mut self) -> TplintResult<()> {
		let character = self.source[self.cursor..]
			.chars()
			.next()
			.unwrap_or_default();
		let line = self.position.line;

		match character {
			'(' => {
				let opener = match self.tokens.last() {
					Some(token) if token.kind == TokenKind::MacroName => Opener::MacroParen,
					Some(token)
						if matches!(
							token.kind,
							TokenKind::FunctionName | TokenKind::FilterName | TokenKind::TestName
						) =>
					{
						Opener::CallParen
					}
					Some(token) if token.kind == TokenKind::Name && self.follows_dot() => {
						Opener::CallParen
					}
					_ => Opener::Paren,
				};
				self.brackets.push((opener, line));
			}
			'[' => self.brackets.push((Opener::Bracket, line)),
			'{' => self.brackets.push((Opener::Brace, line)),
			'?' => self.brackets.push((Opener::Ternary, line)),
			')' | ']' | '}' => self.close_bracket(character)?,
			':' => {
				if matches!(self.brackets.last(), Some((Opener::Ternary, _))) {
					self.brackets.pop();
				}
			}
			',' => self.drop_ternaries(),
			_ => {}
		}

		self.push_token(TokenKind::Punctuation, 1);
		Ok(())
	}

	/// Whether the last significant token, a name, comes right after `.`.
	fn follows_dot(&self) -> bool {
		self.tokens
			.second_last_significant()
			.is_some_and(|token| is_punctuation(token, &["."]))
	}

	fn drop_ternaries(&mut self) {
		while matches!(self.brackets.last(), Some((Opener::Ternary, _))) {
			self.brackets.pop();
		}
	}

	fn close_bracket(&mut self, character: char) -> TplintResult<()> {
		self.drop_ternaries();

		let Some((opener, line)) = self.brackets.pop() else {
			return Err(TplintError::UnexpectedCharacter {
				character,
				line: self.position.line,
			});
		};

		if opener.closing() != character || opener == Opener::Interpolation {
			return Err(TplintError::UnclosedBracket {
				bracket: opener.opening(),
				line,
			});
		}

		Ok(())
	}

	fn lex_double_quoted_string(&mut self) -> TplintResult<()> {
		match scan_double_quoted(self.source, self.cursor + 1) {
			StringEnd::Quote(end) => {
				self.push_token(TokenKind::String, end + 1 - self.cursor);
				Ok(())
			}
			StringEnd::Interpolation(_) => {
				self.push_token(TokenKind::DqStringStart, 1);
				self.stack.push(LexerContext::DqString);
				Ok(())
			}
			StringEnd::Eof => Err(TplintError::InvalidTemplate),
		}
	}

	fn lex_dq_string(&mut self) -> TplintResult<()> {
		let rest = &self.source[self.cursor..];

		if rest.starts_with("#{") {
			self.brackets
				.push((Opener::Interpolation, self.position.line));
			self.push_token(TokenKind::InterpolationStart, 2);
			self.stack.push(LexerContext::Interpolation);
			return Ok(());
		}

		if rest.starts_with('"') {
			self.push_token(TokenKind::DqStringEnd, 1);
			self.stack.pop();
			return Ok(());
		}

		match scan_double_quoted(self.source, self.cursor) {
			StringEnd::Quote(end) | StringEnd::Interpolation(end) => {
				self.push_token(TokenKind::String, end - self.cursor);
				Ok(())
			}
			StringEnd::Eof => Err(TplintError::InvalidTemplate),
		}
	}

	fn lex_interpolation(&mut self) -> TplintResult<()> {
		let closes = self.source[self.cursor..].starts_with('}')
			&& self
				.brackets
				.iter()
				.rev()
				.find(|(opener, _)| *opener != Opener::Ternary)
				.is_some_and(|(opener, _)| *opener == Opener::Interpolation);

		if !closes {
			return self.lex_expression();
		}

		self.drop_ternaries();
		self.brackets.pop();
		self.push_token(TokenKind::InterpolationEnd, 1);
		self.stack.pop();

		Ok(())
	}
}

/// Where the literal part of a double quoted string stops.
enum StringEnd {
	/// Offset of the closing `"`.
	Quote(usize),
	/// Offset of a `#{`.
	Interpolation(usize),
	Eof,
}

fn scan_double_quoted(source: &str, from: usize) -> StringEnd {
	let bytes = source.as_bytes();
	let mut index = from;

	while index < bytes.len() {
		match bytes[index] {
			b'\\' => index += 2,
			b'"' => return StringEnd::Quote(index),
			b'#' if bytes.get(index + 1) == Some(&b'{') => return StringEnd::Interpolation(index),
			_ => index += 1,
		}
	}

	StringEnd::Eof
}

fn find_tag_starts(source: &str) -> Vec<usize> {
	source
		.as_bytes()
		.windows(2)
		.enumerate()
		.filter(|(_, window)| window[0] == b'{' && matches!(window[1], b'{' | b'%' | b'#'))
		.map(|(index, _)| index)
		.collect()
}

/// Byte length of the closing delimiter at `offset`, including an optional
/// whitespace control modifier (`-` or `~`).
fn closing_at(source: &str, offset: usize, closing: &str) -> Option<usize> {
	let rest = &source[offset..];

	if rest.starts_with(closing) {
		return Some(closing.len());
	}

	rest.strip_prefix(['-', '~'])
		.filter(|rest| rest.starts_with(closing))
		.map(|_| closing.len() + 1)
}

fn closing_length(source: &str, offset: usize, closing: &str) -> usize {
	closing_at(source, offset, closing).unwrap_or(closing.len())
}

/// Offset of the first closing delimiter at or after `from`, pointing at the
/// modifier when there is one.
fn find_closing(source: &str, from: usize, closing: &str) -> Option<usize> {
	let found = from + source[from..].find(closing)?;
	let modifier = found > from && matches!(source.as_bytes()[found - 1], b'-' | b'~');

	Some(if modifier { found - 1 } else { found })
}

fn is_punctuation(token: &Token, values: &[&str]) -> bool {
	token.kind == TokenKind::Punctuation && values.contains(&token.value.as_str())
}

fn is_test_operator(value: &str) -> bool {
	let mut words = value.split_whitespace();
	matches!(
		(words.next(), words.next(), words.next()),
		(Some("is"), None, None) | (Some("is"), Some("not"), None)
	)
}
