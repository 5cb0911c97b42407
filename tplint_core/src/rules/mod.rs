//! Rules shipped with tplint.

pub use delimiter_spacing::*;
pub use named_argument_separator::*;
pub use trailing_space::*;

use crate::RuleSet;

mod delimiter_spacing;
mod named_argument_separator;
mod trailing_space;

/// Every standard rule, in registration order.
pub fn standard_rules() -> RuleSet {
	RuleSet::new()
		.with_rule(NamedArgumentSeparatorRule)
		.with_rule(DelimiterSpacingRule)
		.with_rule(TrailingSpaceRule)
}
