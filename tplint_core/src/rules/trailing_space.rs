use crate::Patch;
use crate::Rule;
use crate::RuleContext;
use crate::tokens::TokenKind;
use crate::tokens::Tokens;

/// Lines, including comment lines, do not end with spaces or tabs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingSpaceRule;

impl Rule for TrailingSpaceRule {
	fn name(&self) -> &str {
		"TrailingSpace"
	}

	fn fixable(&self) -> bool {
		true
	}

	fn visit(&self, index: usize, tokens: &Tokens, context: &mut RuleContext<'_>) {
		let Some(token) = tokens.get(index) else {
			return;
		};

		// Only the first token of a run of blank space reports.
		if !token.kind.is_spacing()
			|| index
				.checked_sub(1)
				.and_then(|previous| tokens.get(previous))
				.is_some_and(|previous| previous.kind.is_spacing())
		{
			return;
		}

		let end = tokens[index..]
			.iter()
			.position(|token| !token.kind.is_spacing())
			.map_or(tokens.len(), |offset| index + offset);
		let ends_line = tokens
			.get(end)
			.is_some_and(|next| next.kind.is_eol() || next.kind == TokenKind::Eof);

		if ends_line {
			context.add_fixable_error(
				"A line should not end with blank space(s).",
				token,
				Patch::replace_range(index..end, ""),
			);
		}
	}
}
