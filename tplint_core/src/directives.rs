//! Suppression directives embedded in template comments.
//!
//! ```text
//! {# tplint-disable #}                          every rule, whole file
//! {# tplint-disable TrailingSpace #}            one rule, whole file
//! {# tplint-disable-line Foo.Bar, Baz #}        two rules on this line
//! {# tplint-disable-next-line #}                every rule on the next line
//! {{ foo }} {# tplint-disable-line #}
//! {{ foo # tplint-disable-line }}
//! ```

use crate::ViolationId;

/// Keyword used when the configuration does not override it.
pub const DEFAULT_DIRECTIVE_PREFIX: &str = "tplint";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
	File,
	Line,
	NextLine,
}

/// Extract the violation identifiers silenced by a comment `body` written on
/// `line`. Returns an empty list when the body is not a directive, or when one
/// of its rule arguments is malformed.
pub fn parse_directive(body: &str, line: usize, prefix: &str) -> Vec<ViolationId> {
	let Some((scope, arguments)) = split_directive(body.trim(), prefix) else {
		return Vec::new();
	};

	let line = match scope {
		Scope::File => None,
		Scope::Line => Some(line),
		Scope::NextLine => Some(line + 1),
	};

	let arguments: Vec<&str> = arguments
		.split(',')
		.map(str::trim)
		.filter(|argument| !argument.is_empty())
		.collect();

	if arguments.is_empty() {
		return vec![ViolationId::new(None, None, line, None)];
	}

	arguments
		.into_iter()
		.map(|argument| ViolationId::parse_with_line(argument, line))
		.collect::<Result<Vec<_>, _>>()
		.unwrap_or_default()
}

fn split_directive<'a>(body: &'a str, prefix: &str) -> Option<(Scope, &'a str)> {
	let keyword_length = prefix.len() + "-disable".len();
	let keyword = body.get(..keyword_length)?;

	if !keyword.eq_ignore_ascii_case(&format!("{prefix}-disable")) {
		return None;
	}

	let rest = &body[keyword_length..];
	let (scope, rest) = if let Some(rest) = strip_prefix_ignore_case(rest, "-next-line") {
		(Scope::NextLine, rest)
	} else if let Some(rest) = strip_prefix_ignore_case(rest, "-line") {
		(Scope::Line, rest)
	} else {
		(Scope::File, rest)
	};

	if !(rest.is_empty() || rest.starts_with(char::is_whitespace)) {
		return None;
	}

	Some((scope, rest))
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
	let head = value.get(..prefix.len())?;
	head.eq_ignore_ascii_case(prefix)
		.then(|| &value[prefix.len()..])
}
