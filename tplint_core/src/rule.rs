use crate::Level;
use crate::Patch;
use crate::Violation;
use crate::tokens::Token;
use crate::tokens::Tokens;

/// A check run over the token stream of one file.
///
/// Rules only append violations to the [`RuleContext`] they are handed. They
/// never observe each other's findings and never mutate the stream, so one
/// rule set can be shared across threads.
pub trait Rule: Send + Sync {
	/// Unique name, used in violation identifiers and suppression directives.
	fn name(&self) -> &str;

	/// Whether this rule attaches patches to its violations.
	fn fixable(&self) -> bool {
		false
	}

	/// Inspect the token at `index`. The whole stream is visible.
	fn visit(&self, index: usize, tokens: &Tokens, context: &mut RuleContext<'_>);

	/// Called once per file. Visits every token in ascending order.
	fn lint_file(&self, tokens: &Tokens, context: &mut RuleContext<'_>) {
		for index in 0..tokens.len() {
			self.visit(index, tokens, context);
		}
	}
}

/// Accumulates the violations a single rule reports for a single file.
#[derive(Debug)]
pub struct RuleContext<'a> {
	rule_name: &'a str,
	violations: Vec<Violation>,
}

impl<'a> RuleContext<'a> {
	pub fn new(rule_name: &'a str) -> Self {
		Self {
			rule_name,
			violations: Vec::new(),
		}
	}

	pub fn into_violations(self) -> Vec<Violation> {
		self.violations
	}

	pub fn add_warning(&mut self, message: impl Into<String>, token: &Token) {
		self.add(Level::Warning, None, message.into(), token, Position::Token, None);
	}

	pub fn add_error(&mut self, message: impl Into<String>, token: &Token) {
		self.add(Level::Error, None, message.into(), token, Position::Token, None);
	}

	/// A warning about the file as a whole; `token` only provides the file.
	pub fn add_file_warning(&mut self, message: impl Into<String>, token: &Token) {
		self.add(Level::Warning, None, message.into(), token, Position::File, None);
	}

	/// An error about the file as a whole; `token` only provides the file.
	pub fn add_file_error(&mut self, message: impl Into<String>, token: &Token) {
		self.add(Level::Error, None, message.into(), token, Position::File, None);
	}

	pub fn add_fixable_warning(&mut self, message: impl Into<String>, token: &Token, patch: Patch) {
		self.add(Level::Warning, None, message.into(), token, Position::Token, Some(patch));
	}

	pub fn add_fixable_error(&mut self, message: impl Into<String>, token: &Token, patch: Patch) {
		self.add(Level::Error, None, message.into(), token, Position::Token, Some(patch));
	}

	pub fn add_warning_with_id(
		&mut self,
		message_id: &str,
		message: impl Into<String>,
		token: &Token,
	) {
		self.add(Level::Warning, Some(message_id), message.into(), token, Position::Token, None);
	}

	pub fn add_error_with_id(&mut self, message_id: &str, message: impl Into<String>, token: &Token) {
		self.add(Level::Error, Some(message_id), message.into(), token, Position::Token, None);
	}

	pub fn add_file_warning_with_id(
		&mut self,
		message_id: &str,
		message: impl Into<String>,
		token: &Token,
	) {
		self.add(Level::Warning, Some(message_id), message.into(), token, Position::File, None);
	}

	pub fn add_file_error_with_id(
		&mut self,
		message_id: &str,
		message: impl Into<String>,
		token: &Token,
	) {
		self.add(Level::Error, Some(message_id), message.into(), token, Position::File, None);
	}

	pub fn add_fixable_warning_with_id(
		&mut self,
		message_id: &str,
		message: impl Into<String>,
		token: &Token,
		patch: Patch,
	) {
		self.add(
			Level::Warning,
			Some(message_id),
			message.into(),
			token,
			Position::Token,
			Some(patch),
		);
	}

	pub fn add_fixable_error_with_id(
		&mut self,
		message_id: &str,
		message: impl Into<String>,
		token: &Token,
		patch: Patch,
	) {
		self.add(
			Level::Error,
			Some(message_id),
			message.into(),
			token,
			Position::Token,
			Some(patch),
		);
	}

	fn add(
		&mut self,
		level: Level,
		message_id: Option<&str>,
		message: String,
		token: &Token,
		position: Position,
		patch: Option<Patch>,
	) {
		let (line, column) = match position {
			Position::File => (None, None),
			Position::Token => (Some(token.line), Some(token.column)),
		};

		self.violations.push(Violation {
			rule_name: self.rule_name.to_string(),
			message_id: message_id
				.unwrap_or_else(|| level.default_message_id())
				.to_string(),
			message,
			level,
			filename: token.filename.to_string(),
			line,
			column,
			fixable: patch.is_some(),
			patch,
		});
	}
}

#[derive(Debug, Clone, Copy)]
enum Position {
	File,
	Token,
}

/// An ordered registry of rules. Registration order decides the order of
/// reported violations at the same position, and which patch wins when two
/// rules try to fix the same tokens.
#[derive(Default)]
pub struct RuleSet {
	rules: Vec<Box<dyn Rule>>,
}

impl std::fmt::Debug for RuleSet {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list()
			.entries(self.rules.iter().map(|rule| rule.name()))
			.finish()
	}
}

impl RuleSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register `rule`. Returns `false`, leaving the set unchanged, when a
	/// rule with the same name is already registered.
	pub fn add_rule(&mut self, rule: impl Rule + 'static) -> bool {
		if self.contains(rule.name()) {
			return false;
		}

		self.rules.push(Box::new(rule));
		true
	}

	#[must_use]
	pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
		self.add_rule(rule);
		self
	}

	/// Returns `true` when a rule was removed.
	pub fn remove_rule(&mut self, name: &str) -> bool {
		let before = self.rules.len();
		self.rules.retain(|rule| rule.name() != name);
		self.rules.len() != before
	}

	pub fn contains(&self, name: &str) -> bool {
		self.rules.iter().any(|rule| rule.name() == name)
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
		self.rules.iter().map(|rule| &**rule)
	}

	pub fn names(&self) -> Vec<&str> {
		self.rules.iter().map(|rule| rule.name()).collect()
	}

	/// Run every rule over `tokens`, each with its own accumulator. The result
	/// lists violations rule by rule, in registration order.
	pub fn lint(&self, tokens: &Tokens) -> Vec<Violation> {
		lint_rules(self.rules(), tokens)
	}

	/// Like [`RuleSet::lint`], restricted to fixable rules.
	pub fn lint_fixable(&self, tokens: &Tokens) -> Vec<Violation> {
		lint_rules(self.rules().filter(|rule| rule.fixable()), tokens)
	}
}

fn lint_rules<'r>(rules: impl Iterator<Item = &'r dyn Rule>, tokens: &Tokens) -> Vec<Violation> {
	rules
		.flat_map(|rule| {
			let mut context = RuleContext::new(rule.name());
			rule.lint_file(tokens, &mut context);
			context.into_violations()
		})
		.collect()
}
