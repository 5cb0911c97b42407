use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::DEFAULT_DIRECTIVE_PREFIX;
use crate::DEFAULT_MAX_ITERATIONS;
use crate::Environment;
use crate::Tokenizer;
use crate::TplintError;
use crate::TplintResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["tplint.toml", ".tplint.toml", ".config/tplint.toml"];

/// Configuration loaded from `tplint.toml`.
///
/// ```toml
/// [fix]
/// max_iterations = 5
///
/// [syntax]
/// operators = ["n0t", "+sum"]
/// tests = ["instance of"]
/// directive_prefix = "twig-cs-fixer"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TplintConfig {
	pub fix: FixConfig,
	pub syntax: SyntaxConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixConfig {
	/// Patch passes attempted before giving up on convergence.
	pub max_iterations: usize,
}

impl Default for FixConfig {
	fn default() -> Self {
		Self {
			max_iterations: DEFAULT_MAX_ITERATIONS,
		}
	}
}

/// Extensions to the template syntax understood by the lexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxConfig {
	/// Operator lexemes added to the core set.
	pub operators: Vec<String>,
	/// Multi-word test names added to the core set.
	pub tests: Vec<String>,
	/// Keyword of suppression comments, as in `{# tplint-disable-line #}`.
	pub directive_prefix: String,
}

impl Default for SyntaxConfig {
	fn default() -> Self {
		Self {
			operators: Vec::new(),
			tests: Vec::new(),
			directive_prefix: DEFAULT_DIRECTIVE_PREFIX.to_string(),
		}
	}
}

impl TplintConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if the file does not exist.
	pub fn load(root: &Path) -> TplintResult<Option<TplintConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		Self::load_file(&config_path).map(Some)
	}

	pub fn load_file(path: &Path) -> TplintResult<TplintConfig> {
		let content = std::fs::read_to_string(path)?;
		Self::from_toml_str(&content)
	}

	pub fn from_toml_str(content: &str) -> TplintResult<TplintConfig> {
		toml::from_str(content).map_err(|e| TplintError::ConfigParse(e.to_string()))
	}

	/// The core operator registry extended with the configured syntax.
	pub fn environment(&self) -> Environment {
		Environment::default()
			.with_operators(self.syntax.operators.iter().map(String::as_str))
			.with_tests(self.syntax.tests.iter().map(String::as_str))
	}

	pub fn tokenizer(&self) -> Tokenizer {
		Tokenizer::new(self.environment()).with_directive_prefix(&self.syntax.directive_prefix)
	}
}
