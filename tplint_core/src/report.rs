use std::collections::BTreeMap;

use serde::Serialize;

use crate::Level;
use crate::Violation;
use crate::ViolationId;

/// Violations of one file, kept sorted by position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
struct FileReport {
	violations: Vec<Violation>,
	#[serde(skip)]
	directives: Vec<ViolationId>,
}

impl FileReport {
	/// Register `directives` and drop the violations they suppress.
	fn extend_directives(&mut self, directives: &[ViolationId]) {
		if directives.is_empty() {
			return;
		}

		self.directives.extend_from_slice(directives);
		self.violations
			.retain(|violation| !violation.is_suppressed_by(directives));
	}

	/// Insert unless suppressed. Returns `false` when a directive matches.
	fn add(&mut self, violation: Violation) -> bool {
		if violation.is_suppressed_by(&self.directives) {
			return false;
		}

		self.insert(violation);
		true
	}

	/// Insert after every violation at the same or an earlier position, which
	/// keeps equal positions in insertion order. File-scoped violations come
	/// first.
	fn insert(&mut self, violation: Violation) {
		let key = (violation.line, violation.column);
		let at = self
			.violations
			.partition_point(|existing| (existing.line, existing.column) <= key);
		self.violations.insert(at, violation);
	}
}

/// Violations of a lint run, grouped per file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
	files: BTreeMap<String, FileReport>,
}

impl Report {
	/// A report expecting the given files, which are listed even when they end
	/// up without violations.
	pub fn new<I, S>(files: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut report = Self::default();
		for file in files {
			report.add_file(file);
		}

		report
	}

	pub fn add_file(&mut self, file: impl Into<String>) {
		self.files.entry(file.into()).or_default();
	}

	/// Register the suppression directives of `file`. Matching violations
	/// are dropped, whether they were added before or after.
	pub fn add_directives(&mut self, file: &str, directives: &[ViolationId]) {
		self.files
			.entry(file.to_string())
			.or_default()
			.extend_directives(directives);
	}

	/// Add `violation` to the report of its file. Returns `false` when a
	/// directive of that file suppresses it.
	pub fn add_violation(&mut self, violation: Violation) -> bool {
		self.files
			.entry(violation.filename.clone())
			.or_default()
			.add(violation)
	}

	/// Add `violations` to the report of `file`, whatever file the violations
	/// name.
	pub fn add_violations(&mut self, file: &str, violations: impl IntoIterator<Item = Violation>) {
		self.add_file(file);

		for mut violation in violations {
			file.clone_into(&mut violation.filename);
			self.add_violation(violation);
		}
	}

	pub fn files(&self) -> impl Iterator<Item = &str> {
		self.files.keys().map(String::as_str)
	}

	/// Violations of `file` sorted by line then column. Unknown files have
	/// none.
	pub fn file_violations(&self, file: &str) -> &[Violation] {
		self.files
			.get(file)
			.map(|report| report.violations.as_slice())
			.unwrap_or_default()
	}

	pub fn violations(&self) -> impl Iterator<Item = &Violation> {
		self.files.values().flat_map(|report| report.violations.iter())
	}

	pub fn total_warnings(&self) -> usize {
		self.violations()
			.filter(|violation| violation.level == Level::Warning)
			.count()
	}

	/// Errors and fatal violations.
	pub fn total_errors(&self) -> usize {
		self.violations()
			.filter(|violation| violation.is_error())
			.count()
	}

	pub fn has_errors(&self) -> bool {
		self.violations().any(Violation::is_error)
	}

	pub fn is_empty(&self) -> bool {
		self.violations().next().is_none()
	}

	/// Union with `other`. Results for a file present in both are combined,
	/// and the directives of either side apply to the violations of both.
	pub fn merge(&mut self, other: Report) {
		for (file, other_report) in other.files {
			let report = self.files.entry(file).or_default();
			report.extend_directives(&other_report.directives);

			for violation in other_report.violations {
				report.add(violation);
			}
		}
	}
}
