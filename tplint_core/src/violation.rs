use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;

use crate::Patch;
use crate::TplintError;

/// Severity of a [`Violation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
	Warning,
	Error,
	/// The file could not be processed at all.
	Fatal,
}

impl Level {
	/// The message id used when a rule does not provide one.
	pub fn default_message_id(self) -> &'static str {
		match self {
			Self::Warning => "Warning",
			Self::Error => "Error",
			Self::Fatal => "Fatal",
		}
	}
}

impl Display for Level {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Warning => write!(f, "warning"),
			Self::Error => write!(f, "error"),
			Self::Fatal => write!(f, "fatal"),
		}
	}
}

/// Identifies a violation, or describes which violations a suppression
/// directive silences. Absent parts act as wildcards when matching.
///
/// The textual form is `Rule.MessageId:line:column`, e.g. `TrailingSpace.Error:3:7`,
/// `Foo.Bar:3` or `:6`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ViolationId {
	pub rule_name: Option<String>,
	pub message_id: Option<String>,
	pub line: Option<usize>,
	pub column: Option<usize>,
}

impl ViolationId {
	pub fn new(
		rule_name: Option<&str>,
		message_id: Option<&str>,
		line: Option<usize>,
		column: Option<usize>,
	) -> Self {
		Self {
			rule_name: rule_name.filter(|name| !name.is_empty()).map(String::from),
			message_id: message_id.filter(|id| !id.is_empty()).map(String::from),
			line,
			column,
		}
	}

	/// Parse the textual form. `line` overrides any line given in `value`.
	pub fn parse_with_line(value: &str, line: Option<usize>) -> Result<Self, TplintError> {
		let invalid = || TplintError::InvalidViolationId(value.to_string());
		let mut parts = value.trim().split(':');
		let name = parts.next().unwrap_or_default();
		let parsed_line = parse_number(parts.next()).map_err(|()| invalid())?;
		let column = parse_number(parts.next()).map_err(|()| invalid())?;

		if parts.next().is_some() {
			return Err(invalid());
		}

		let (rule_name, message_id) = match name.split_once('.') {
			Some((rule, id)) => (Some(rule), Some(id)),
			None => (Some(name), None),
		};

		Ok(Self::new(rule_name, message_id, line.or(parsed_line), column))
	}

	/// Whether `other`, the identifier of a reported violation, is covered by
	/// this identifier. Names compare case-insensitively.
	pub fn matches(&self, other: &ViolationId) -> bool {
		fn same_name(expected: Option<&String>, actual: Option<&String>) -> bool {
			match (expected, actual) {
				(None, _) => true,
				(Some(expected), Some(actual)) => expected.eq_ignore_ascii_case(actual),
				(Some(_), None) => false,
			}
		}

		same_name(self.rule_name.as_ref(), other.rule_name.as_ref())
			&& same_name(self.message_id.as_ref(), other.message_id.as_ref())
			&& (self.line.is_none() || self.line == other.line)
			&& (self.column.is_none() || self.column == other.column)
	}
}

fn parse_number(part: Option<&str>) -> Result<Option<usize>, ()> {
	match part.map(str::trim) {
		None | Some("") => Ok(None),
		Some(number) => number.parse().map(Some).map_err(|_| ()),
	}
}

impl FromStr for ViolationId {
	type Err = TplintError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		Self::parse_with_line(value, None)
	}
}

impl Display for ViolationId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if let Some(rule_name) = &self.rule_name {
			write!(f, "{rule_name}")?;
		}
		if let Some(message_id) = &self.message_id {
			write!(f, ".{message_id}")?;
		}
		if let Some(line) = self.line {
			write!(f, ":{line}")?;
		}
		if let Some(column) = self.column {
			write!(f, ":{column}")?;
		}

		Ok(())
	}
}

/// A finding reported by a rule for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
	pub rule_name: String,
	pub message_id: String,
	pub message: String,
	pub level: Level,
	pub filename: String,
	/// `None` for file-scoped violations.
	pub line: Option<usize>,
	pub column: Option<usize>,
	pub fixable: bool,
	/// The change which makes this violation go away, for fixable rules.
	#[serde(skip)]
	pub patch: Option<Patch>,
}

impl Violation {
	pub fn id(&self) -> ViolationId {
		ViolationId::new(
			Some(&self.rule_name),
			Some(&self.message_id),
			self.line,
			self.column,
		)
	}

	pub fn is_error(&self) -> bool {
		matches!(self.level, Level::Error | Level::Fatal)
	}

	/// Whether any of `directives` silences this violation.
	pub fn is_suppressed_by(&self, directives: &[ViolationId]) -> bool {
		if directives.is_empty() {
			return false;
		}

		let id = self.id();
		directives.iter().any(|directive| directive.matches(&id))
	}
}

impl Display for Violation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} [{}] {}: {}", self.filename, self.level, self.id(), self.message)
	}
}
