use crate::Patch;
use crate::Rule;
use crate::RuleContext;
use crate::tokens::TokenKind;
use crate::tokens::Tokens;

/// Named arguments use `:` rather than `=`: `foo(bar: 1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamedArgumentSeparatorRule;

impl Rule for NamedArgumentSeparatorRule {
	fn name(&self) -> &str {
		"NamedArgumentSeparator"
	}

	fn fixable(&self) -> bool {
		true
	}

	fn visit(&self, index: usize, tokens: &Tokens, context: &mut RuleContext<'_>) {
		let Some(token) = tokens.get(index) else {
			return;
		};

		if !token.is_value(TokenKind::NamedArgumentSeparator, "=") {
			return;
		}

		context.add_fixable_error(
			"Named arguments should be declared with the separator \":\".",
			token,
			Patch::replace(index, ":"),
		);
	}
}
