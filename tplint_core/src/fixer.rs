use std::ops::Range;

use similar::TextDiff;
use tracing::debug;
use tracing::instrument;
use tracing::trace;
use tracing::warn;

use crate::RuleSet;
use crate::Tokenizer;
use crate::TplintError;
use crate::TplintResult;
use crate::tokens::Tokens;

/// Upper bound on fix passes when the configuration does not set one.
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// A textual change expressed over token indices of the stream it was
/// computed from: the tokens in `start..end` are replaced by `replacement`.
/// An empty range is an insertion before token `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
	start: usize,
	end: usize,
	replacement: String,
}

impl Patch {
	/// Replace the value of the token at `index`.
	pub fn replace(index: usize, value: impl Into<String>) -> Self {
		Self::replace_range(index..index + 1, value)
	}

	/// Replace every token in `range` with a single `value`.
	pub fn replace_range(range: Range<usize>, value: impl Into<String>) -> Self {
		Self {
			start: range.start,
			end: range.end.max(range.start),
			replacement: value.into(),
		}
	}

	pub fn delete(index: usize) -> Self {
		Self::replace(index, "")
	}

	pub fn insert_before(index: usize, value: impl Into<String>) -> Self {
		Self::replace_range(index..index, value)
	}

	pub fn insert_after(index: usize, value: impl Into<String>) -> Self {
		Self::replace_range(index + 1..index + 1, value)
	}

	pub fn range(&self) -> Range<usize> {
		self.start..self.end
	}

	pub fn replacement(&self) -> &str {
		&self.replacement
	}

	pub fn is_insertion(&self) -> bool {
		self.start == self.end
	}

	/// Two patches conflict when they claim a common token, when an insertion
	/// lands strictly inside the other's range, or when both insert at the
	/// same point. Touching ranges do not conflict.
	pub fn conflicts_with(&self, other: &Patch) -> bool {
		match (self.is_insertion(), other.is_insertion()) {
			(true, true) => self.start == other.start,
			(true, false) => other.start < self.start && self.start < other.end,
			(false, true) => self.start < other.start && other.start < self.end,
			(false, false) => self.start < other.end && other.start < self.end,
		}
	}
}

/// Outcome of [`Fixer::fix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixResult {
	pub text: String,
	/// `false` when the iteration bound was reached while rules still had
	/// fixes to offer. `text` is then the best effort so far.
	pub converged: bool,
	/// Number of patch passes applied.
	pub iterations: usize,
}

impl FixResult {
	pub fn is_changed(&self, original: &str) -> bool {
		self.text != original
	}

	/// A unified diff from `original` to the fixed text.
	pub fn unified_diff(&self, original: &str, filename: &str) -> String {
		TextDiff::from_lines(original, self.text.as_str())
			.unified_diff()
			.context_radius(3)
			.header(filename, filename)
			.to_string()
	}
}

/// Repeatedly applies the patches of fixable rules until none remain.
#[derive(Debug, Clone, Copy)]
pub struct Fixer<'a> {
	tokenizer: &'a Tokenizer,
	rules: &'a RuleSet,
	max_iterations: usize,
}

impl<'a> Fixer<'a> {
	pub fn new(tokenizer: &'a Tokenizer, rules: &'a RuleSet) -> Self {
		Self {
			tokenizer,
			rules,
			max_iterations: DEFAULT_MAX_ITERATIONS,
		}
	}

	#[must_use]
	pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
		self.max_iterations = max_iterations;
		self
	}

	/// Fix `source`. Lex errors in `source` itself are returned as is; a pass
	/// whose output cannot be tokenized fails with
	/// [`TplintError::FixerOutputInvalid`].
	#[instrument(level = "debug", skip_all, fields(filename = filename))]
	pub fn fix(&self, source: &str, filename: &str) -> TplintResult<FixResult> {
		let mut text = source.to_string();
		let mut tokens = self.tokenizer.tokenize(&text, filename)?;
		let mut iterations = 0;

		loop {
			let patches = self.collect_patches(&tokens);

			if patches.is_empty() {
				debug!(iterations, "fixes converged");
				return Ok(FixResult {
					text,
					converged: true,
					iterations,
				});
			}

			if iterations == self.max_iterations {
				warn!(
					iterations,
					pending = patches.len(),
					"fixes did not converge"
				);
				return Ok(FixResult {
					text,
					converged: false,
					iterations,
				});
			}

			let patched = apply_patches(&tokens, &patches);

			if patched == text {
				debug!(iterations, "patches left the text unchanged");
				return Ok(FixResult {
					text,
					converged: true,
					iterations,
				});
			}

			tokens = self.tokenizer.tokenize(&patched, filename).map_err(|error| {
				TplintError::FixerOutputInvalid {
					file: filename.to_string(),
					reason: error.to_string(),
				}
			})?;
			text = patched;
			iterations += 1;

			trace!(iterations, patches = patches.len(), "applied patch pass");
		}
	}

	/// Patches of unsuppressed fixable violations, first come first served:
	/// a patch conflicting with an already accepted one waits for the next
	/// pass.
	fn collect_patches(&self, tokens: &Tokens) -> Vec<Patch> {
		let mut accepted: Vec<Patch> = Vec::new();

		for violation in self.rules.lint_fixable(tokens) {
			if violation.is_suppressed_by(tokens.ignored_violations()) {
				continue;
			}

			let Some(patch) = violation.patch else {
				continue;
			};

			if patch.end > tokens.len() {
				continue;
			}

			if accepted.iter().any(|other| other.conflicts_with(&patch)) {
				trace!(rule = %violation.rule_name, "deferred conflicting patch");
				continue;
			}

			accepted.push(patch);
		}

		accepted
	}
}

/// Fix `source` with `rules`, giving up after `max_iterations` patch passes.
pub fn fix(
	source: &str,
	filename: &str,
	rules: &RuleSet,
	tokenizer: &Tokenizer,
	max_iterations: usize,
) -> TplintResult<FixResult> {
	Fixer::new(tokenizer, rules)
		.with_max_iterations(max_iterations)
		.fix(source, filename)
}

/// Apply non-conflicting `patches` to the source of `tokens`, last to first so
/// that earlier byte offsets stay valid.
fn apply_patches(tokens: &Tokens, patches: &[Patch]) -> String {
	let mut offsets = Vec::with_capacity(tokens.len() + 1);
	let mut offset = 0;
	offsets.push(offset);
	for token in tokens.iter() {
		offset += token.value.len();
		offsets.push(offset);
	}

	let mut ordered: Vec<&Patch> = patches.iter().collect();
	ordered.sort_by(|a, b| (b.start, b.end).cmp(&(a.start, a.end)));

	let mut text = tokens.to_source();
	for patch in ordered {
		text.replace_range(offsets[patch.start]..offsets[patch.end], &patch.replacement);
	}

	text
}
