use crate::Patch;
use crate::Rule;
use crate::RuleContext;
use crate::tokens::TokenKind;
use crate::tokens::Tokens;

/// Exactly one space after `{{`/`{%` and before `}}`/`%}`, unless the tag is
/// empty or the delimiter is followed or preceded by a line break.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimiterSpacingRule;

impl Rule for DelimiterSpacingRule {
	fn name(&self) -> &str {
		"DelimiterSpacing"
	}

	fn fixable(&self) -> bool {
		true
	}

	fn visit(&self, index: usize, tokens: &Tokens, context: &mut RuleContext<'_>) {
		let Some(token) = tokens.get(index) else {
			return;
		};

		match token.kind {
			TokenKind::VarStart | TokenKind::BlockStart => {
				check_after(index, tokens, context);
			}
			TokenKind::VarEnd | TokenKind::BlockEnd => {
				check_before(index, tokens, context);
			}
			_ => {}
		}
	}
}

fn is_closing(kind: TokenKind) -> bool {
	matches!(kind, TokenKind::VarEnd | TokenKind::BlockEnd)
}

fn is_opening(kind: TokenKind) -> bool {
	matches!(kind, TokenKind::VarStart | TokenKind::BlockStart)
}

fn check_after(index: usize, tokens: &Tokens, context: &mut RuleContext<'_>) {
	let Some(delimiter) = tokens.get(index) else {
		return;
	};

	let start = index + 1;
	let end = tokens[start.min(tokens.len())..]
		.iter()
		.position(|token| !token.kind.is_spacing())
		.map_or(tokens.len(), |offset| start + offset);
	let Some(next) = tokens.get(end) else {
		return;
	};

	if is_closing(next.kind) || next.kind.is_eol() {
		return;
	}

	let blank = blank_text(tokens, start..end);

	if blank == " " {
		return;
	}

	context.add_fixable_error_with_id(
		"After",
		format!(
			"Expecting 1 whitespace after \"{}\"; found {}.",
			delimiter.value,
			blank.chars().count()
		),
		delimiter,
		Patch::replace_range(start..end, " "),
	);
}

fn check_before(index: usize, tokens: &Tokens, context: &mut RuleContext<'_>) {
	let Some(delimiter) = tokens.get(index) else {
		return;
	};

	let start = tokens[..index]
		.iter()
		.rposition(|token| !token.kind.is_spacing())
		.map_or(0, |at| at + 1);
	let Some(previous) = start.checked_sub(1).and_then(|at| tokens.get(at)) else {
		return;
	};

	if is_opening(previous.kind) || previous.kind.is_eol() {
		return;
	}

	let blank = blank_text(tokens, start..index);

	if blank == " " {
		return;
	}

	context.add_fixable_error_with_id(
		"Before",
		format!(
			"Expecting 1 whitespace before \"{}\"; found {}.",
			delimiter.value,
			blank.chars().count()
		),
		delimiter,
		Patch::replace_range(start..index, " "),
	);
}

fn blank_text(tokens: &Tokens, range: std::ops::Range<usize>) -> String {
	tokens[range]
		.iter()
		.map(|token| token.value.as_str())
		.collect()
}
