use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use rayon::prelude::*;
use tracing::debug;
use tracing::instrument;
use tracing::warn;

use crate::DEFAULT_MAX_ITERATIONS;
use crate::FixResult;
use crate::Fixer;
use crate::Level;
use crate::Report;
use crate::RuleSet;
use crate::Tokenizer;
use crate::TplintConfig;
use crate::TplintError;
use crate::TplintResult;
use crate::Violation;

/// Rule name of violations raised by the linter itself rather than a rule.
pub const TOKENIZER_RULE_NAME: &str = "Tokenizer";
/// Rule name of violations raised while fixing.
pub const FIXER_RULE_NAME: &str = "Fixer";

/// One template to lint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
	pub name: String,
	pub source: String,
}

impl SourceFile {
	pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			source: source.into(),
		}
	}

	pub fn read(path: &Path) -> TplintResult<Self> {
		let source = std::fs::read_to_string(path)?;
		Ok(Self::new(path.display().to_string(), source))
	}
}

/// Result of [`Linter::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintRun {
	pub report: Report,
	/// Fixed text of every file the fixer changed, by file name.
	pub fixed: BTreeMap<String, String>,
}

/// Lints, and optionally fixes, templates with a shared rule set.
#[derive(Debug, Clone)]
pub struct Linter {
	tokenizer: Tokenizer,
	max_iterations: usize,
}

impl Default for Linter {
	fn default() -> Self {
		Self::new(Tokenizer::default())
	}
}

impl Linter {
	pub fn new(tokenizer: Tokenizer) -> Self {
		Self {
			tokenizer,
			max_iterations: DEFAULT_MAX_ITERATIONS,
		}
	}

	pub fn from_config(config: &TplintConfig) -> Self {
		Self::new(config.tokenizer()).with_max_iterations(config.fix.max_iterations)
	}

	#[must_use]
	pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
		self.max_iterations = max_iterations;
		self
	}

	pub fn tokenizer(&self) -> &Tokenizer {
		&self.tokenizer
	}

	pub fn fixer<'a>(&'a self, rules: &'a RuleSet) -> Fixer<'a> {
		Fixer::new(&self.tokenizer, rules).with_max_iterations(self.max_iterations)
	}

	/// Lint a single template. A template which cannot be tokenized yields a
	/// single fatal violation.
	#[instrument(level = "debug", skip_all, fields(filename = filename))]
	pub fn lint_source(&self, source: &str, filename: &str, rules: &RuleSet) -> Report {
		let mut report = Report::new([filename]);

		let tokens = match self.tokenizer.tokenize(source, filename) {
			Ok(tokens) => tokens,
			Err(error) => {
				warn!(%error, "unable to tokenize template");
				report.add_violation(fatal_violation(filename, &error));
				return report;
			}
		};

		report.add_directives(filename, tokens.ignored_violations());
		report.add_violations(filename, rules.lint(&tokens));

		debug!(
			warnings = report.total_warnings(),
			errors = report.total_errors(),
			"linted template"
		);

		report
	}

	/// Fix then lint a single template. Returns the report of the fixed text
	/// and that text when it differs from `source`.
	#[instrument(level = "debug", skip_all, fields(filename = filename))]
	pub fn fix_source(
		&self,
		source: &str,
		filename: &str,
		rules: &RuleSet,
	) -> (Report, Option<String>) {
		let result = match self.fixer(rules).fix(source, filename) {
			Ok(result) => result,
			Err(error) if error.is_lex_error() => {
				return (self.lint_source(source, filename, rules), None);
			}
			Err(error) => {
				warn!(%error, "discarding fixes");
				let mut report = self.lint_source(source, filename, rules);
				report.add_violation(file_violation(
					filename,
					Level::Warning,
					"InvalidOutput",
					error.to_string(),
				));
				return (report, None);
			}
		};

		let mut report = self.lint_source(&result.text, filename, rules);

		if !result.converged {
			report.add_violation(not_converged_violation(filename, &result));
		}

		let fixed = result.is_changed(source).then_some(result.text);
		(report, fixed)
	}

	/// Process `files` in parallel and merge their reports. A file which cannot
	/// be processed never affects the others.
	pub fn run(&self, files: &[SourceFile], rules: &RuleSet, fix: bool) -> LintRun {
		let outcomes: Vec<(String, Report, Option<String>)> = files
			.par_iter()
			.map(|file| {
				let (report, fixed) = if fix {
					self.fix_source(&file.source, &file.name, rules)
				} else {
					(self.lint_source(&file.source, &file.name, rules), None)
				};

				(file.name.clone(), report, fixed)
			})
			.collect();

		let mut run = LintRun::default();
		for (name, report, fixed) in outcomes {
			run.report.merge(report);
			if let Some(fixed) = fixed {
				run.fixed.insert(name, fixed);
			}
		}

		debug!(
			files = files.len(),
			fixed = run.fixed.len(),
			warnings = run.report.total_warnings(),
			errors = run.report.total_errors(),
			"lint run finished"
		);

		run
	}

	/// Read and process `paths`. Unreadable files are reported as fatal.
	pub fn run_paths(&self, paths: &[PathBuf], rules: &RuleSet, fix: bool) -> LintRun {
		let mut files = Vec::with_capacity(paths.len());
		let mut unreadable = Report::default();

		for path in paths {
			match SourceFile::read(path) {
				Ok(file) => files.push(file),
				Err(error) => {
					let name = path.display().to_string();
					warn!(file = %name, %error, "unable to read template");
					unreadable.add_violation(fatal_violation(&name, &error));
				}
			}
		}

		let mut run = self.run(&files, rules, fix);
		run.report.merge(unreadable);
		run
	}
}

fn fatal_violation(filename: &str, error: &TplintError) -> Violation {
	let message = if error.is_lex_error() {
		format!("unable to tokenize file: {error}")
	} else {
		format!("unable to read file: {error}")
	};
	let mut violation = file_violation(
		filename,
		Level::Fatal,
		Level::Fatal.default_message_id(),
		message,
	);
	violation.rule_name = TOKENIZER_RULE_NAME.to_string();
	violation.line = error.line();
	violation
}

fn not_converged_violation(filename: &str, result: &FixResult) -> Violation {
	file_violation(
		filename,
		Level::Warning,
		"NotConverged",
		format!(
			"fixes did not converge after {} iterations; some violations remain",
			result.iterations
		),
	)
}

fn file_violation(
	filename: &str,
	level: Level,
	message_id: &str,
	message: impl Into<String>,
) -> Violation {
	Violation {
		rule_name: FIXER_RULE_NAME.to_string(),
		message_id: message_id.to_string(),
		message: message.into(),
		level,
		filename: filename.to_string(),
		line: None,
		column: None,
		fixable: false,
		patch: None,
	}
}
