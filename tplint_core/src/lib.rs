//! `tplint_core` is the engine behind tplint, a linter and fixer for Twig-style
//! templates. It lexes templates into a lossless token stream, runs rules over
//! that stream, collects violations into a suppression-aware report, and
//! rewrites templates by applying the patches fixable rules attach to their
//! violations.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Template source
//!   → Tokenizer (lossless token stream + suppression directives)
//!   → RuleSet (each rule visits every token, appending violations)
//!   → Report (drops suppressed violations, sorts by position)
//!   → Fixer (applies patches, re-lexes, repeats until nothing changes)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from `tplint.toml`: fix iteration bound, extra operators and the suppression keyword.
//! - [`rules`]: The standard rules: `NamedArgumentSeparator`, `DelimiterSpacing` and `TrailingSpace`.
//! - [`tokens`]: Token kinds, tokens and the read-only token stream.
//!
//! ## Suppression
//!
//! Comments starting with `tplint-disable` silence violations:
//!
//! ```text
//! {# tplint-disable TrailingSpace #}
//! {{ foo(bar=1) }} {# tplint-disable-line NamedArgumentSeparator #}
//! {# tplint-disable-next-line #}
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use tplint_core::Linter;
//! use tplint_core::rules::standard_rules;
//!
//! let linter = Linter::default();
//! let rules = standard_rules();
//!
//! let report = linter.lint_source("{{ foo(bar=1) }}\n", "index.html.twig", &rules);
//! assert_eq!(report.total_errors(), 1);
//!
//! let (_, fixed) = linter.fix_source("{{ foo(bar=1) }}\n", "index.html.twig", &rules);
//! assert_eq!(fixed.as_deref(), Some("{{ foo(bar:1) }}\n"));
//! ```

pub use config::*;
pub use directives::*;
pub use environment::*;
pub use error::*;
pub use fixer::*;
pub use lexer::*;
pub use linter::*;
pub use position::*;
pub use report::*;
pub use rule::*;
pub use violation::*;

pub mod config;
mod directives;
mod environment;
#[allow(unused_assignments)]
mod error;
mod fixer;
mod lexer;
mod linter;
mod position;
mod report;
mod rule;
pub mod rules;
pub mod tokens;
mod violation;

#[cfg(test)]
mod __fixtures;
