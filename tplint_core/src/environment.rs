use std::collections::BTreeSet;

/// Operators understood by every template, mirroring the core language.
pub const CORE_OPERATORS: [&str; 34] = [
	"not", "or", "and", "xor", "b-or", "b-xor", "b-and", "==", "!=", "<=>", "<", ">", "<=", ">=",
	"not in", "in", "matches", "starts with", "ends with", "has some", "has every", "..", "+", "-",
	"~", "*", "/", "//", "%", "**", "is", "is not", "??", "=",
];

/// Tests whose name is made of several words, e.g. `foo is same as(bar)`.
pub const CORE_MULTI_WORD_TESTS: [&str; 2] = ["same as", "divisible by"];

/// The table of operator lexemes and multi-word test names the lexer
/// consults. Extensions contribute entries through [`Environment::with_operators`]
/// and [`Environment::with_tests`]; matching is longest-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
	/// Sorted by descending character length, then lexically.
	operators: Vec<String>,
	tests: BTreeSet<String>,
}

impl Default for Environment {
	fn default() -> Self {
		Self::empty()
			.with_operators(CORE_OPERATORS)
			.with_tests(CORE_MULTI_WORD_TESTS)
	}
}

impl Environment {
	/// A registry without any operator. Mostly useful in tests.
	pub fn empty() -> Self {
		Self {
			operators: Vec::new(),
			tests: BTreeSet::new(),
		}
	}

	#[must_use]
	pub fn with_operators<I, S>(mut self, operators: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		for operator in operators {
			let operator = normalize_words(&operator.into());
			if !operator.is_empty() && !self.operators.contains(&operator) {
				self.operators.push(operator);
			}
		}

		self.operators.sort_by(|a, b| {
			b.chars()
				.count()
				.cmp(&a.chars().count())
				.then_with(|| a.cmp(b))
		});
		self
	}

	#[must_use]
	pub fn with_tests<I, S>(mut self, tests: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.tests.extend(
			tests
				.into_iter()
				.map(|test| normalize_words(&test.into()))
				.filter(|test| !test.is_empty()),
		);
		self
	}

	pub fn operators(&self) -> impl Iterator<Item = &str> {
		self.operators.iter().map(String::as_str)
	}

	/// True when `previous` followed by `name` continues a registered
	/// multi-word test, e.g. `same` + `as`.
	pub fn continues_test(&self, previous: &str, name: &str) -> bool {
		let candidate = format!("{previous} {name}");
		self.tests.iter().any(|test| {
			test == &candidate
				|| test
					.strip_prefix(candidate.as_str())
					.is_some_and(|rest| rest.starts_with(' '))
		})
	}

	/// Match the longest registered operator at byte `offset` of `source`.
	/// Returns the matched text, which keeps the original spacing of
	/// multi-word operators.
	pub fn match_operator<'a>(&self, source: &'a str, offset: usize) -> Option<&'a str> {
		let rest = source.get(offset..)?;
		let before = source[..offset].chars().next_back();

		self.operators.iter().find_map(|operator| {
			let first = operator.chars().next()?;
			let last = operator.chars().next_back()?;

			if first.is_ascii_alphabetic() && matches!(before, Some('.' | '|')) {
				return None;
			}

			let length = match_words(rest, operator)?;

			if last.is_ascii_alphabetic() {
				let next = rest[length..].chars().next()?;
				if !(next.is_whitespace() || matches!(next, '(' | ')' | '[' | '{')) {
					return None;
				}
			}

			Some(&rest[..length])
		})
	}
}

/// Byte length of the prefix of `text` matching `operator`, where each single
/// space of `operator` stands for a run of spaces and tabs.
fn match_words(text: &str, operator: &str) -> Option<usize> {
	let mut length = 0;

	for (index, word) in operator.split(' ').enumerate() {
		if index > 0 {
			let gap = text[length..]
				.bytes()
				.take_while(|byte| matches!(byte, b' ' | b'\t'))
				.count();

			if gap == 0 {
				return None;
			}

			length += gap;
		}

		if !text[length..].starts_with(word) {
			return None;
		}

		length += word.len();
	}

	Some(length)
}

fn normalize_words(value: &str) -> String {
	value.split_whitespace().collect::<Vec<_>>().join(" ")
}
