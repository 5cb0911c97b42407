use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use derive_more::Deref;
use serde::Serialize;

use crate::ViolationId;

/// Classification of a lexical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
	/// Literal template text outside of any tag.
	Text,
	/// `\n`, `\r\n` or `\r` outside of comments.
	Eol,
	/// Always the last token, with an empty value.
	Eof,
	/// A run of spaces.
	Whitespace,
	/// A run of tabs.
	Tab,
	/// `{{`, `{{-` or `{{~`
	VarStart,
	/// `}}`, `-}}` or `~}}`
	VarEnd,
	/// `{%`, `{%-` or `{%~`
	BlockStart,
	/// `%}`, `-%}` or `~%}`
	BlockEnd,
	/// The tag name of a statement block, e.g. `if`.
	BlockName,
	/// `{#`, `{#-` or `{#~`
	CommentStart,
	/// `#}`, `-#}` or `~#}`
	CommentEnd,
	CommentText,
	CommentWhitespace,
	CommentTab,
	CommentEol,
	/// `#` inside an expression or statement.
	InlineCommentStart,
	InlineCommentText,
	InlineCommentWhitespace,
	InlineCommentTab,
	Name,
	Number,
	/// A complete quoted string, or a literal part of an interpolated one.
	String,
	Operator,
	/// One of `( ) [ ] { } : . , | ?`
	Punctuation,
	/// The opening `"` of a string containing `#{`.
	DqStringStart,
	DqStringEnd,
	/// `#{`
	InterpolationStart,
	/// The `}` closing an interpolation.
	InterpolationEnd,
	FilterName,
	FunctionName,
	TestName,
	MacroName,
	MacroVarName,
	HashKeyName,
	/// `=` or `:` between a named argument and its value.
	NamedArgumentSeparator,
	/// `...`
	Spread,
	/// `=>`
	Arrow,
}

impl TokenKind {
	/// Spacing tokens, including comment and inline comment variants, but not
	/// line endings.
	pub fn is_spacing(self) -> bool {
		matches!(
			self,
			Self::Whitespace
				| Self::Tab
				| Self::CommentWhitespace
				| Self::CommentTab
				| Self::InlineCommentWhitespace
				| Self::InlineCommentTab
		)
	}

	pub fn is_eol(self) -> bool {
		matches!(self, Self::Eol | Self::CommentEol)
	}
}

impl Display for TokenKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{self:?}")
	}
}

/// An immutable lexical unit with its 1-indexed position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
	pub kind: TokenKind,
	pub line: usize,
	pub column: usize,
	pub filename: Arc<str>,
	pub value: String,
}

impl Token {
	pub fn new(
		kind: TokenKind,
		line: usize,
		column: usize,
		filename: impl Into<Arc<str>>,
		value: impl Into<String>,
	) -> Self {
		Self {
			kind,
			line,
			column,
			filename: filename.into(),
			value: value.into(),
		}
	}

	/// True when the token has the given kind and exact value.
	pub fn is_value(&self, kind: TokenKind, value: &str) -> bool {
		self.kind == kind && self.value == value
	}
}

impl Display for Token {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.value)
	}
}

/// Collects tokens while a stream is being produced. Call
/// [`TokensBuilder::build`] to obtain the read-only [`Tokens`].
#[derive(Debug, Default)]
pub struct TokensBuilder {
	tokens: Vec<Token>,
	ignored_violations: Vec<ViolationId>,
}

impl TokensBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, token: Token) -> &mut Self {
		self.tokens.push(token);
		self
	}

	#[must_use]
	pub fn with_token(mut self, token: Token) -> Self {
		self.tokens.push(token);
		self
	}

	pub fn ignore_violation(&mut self, id: ViolationId) -> &mut Self {
		self.ignored_violations.push(id);
		self
	}

	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	pub fn last(&self) -> Option<&Token> {
		self.tokens.last()
	}

	/// The most recent token which is neither spacing, a line ending nor part
	/// of an inline comment.
	pub fn last_significant(&self) -> Option<&Token> {
		self.significant_before(self.tokens.len())
	}

	/// The significant token preceding the one returned by
	/// [`TokensBuilder::last_significant`].
	pub fn second_last_significant(&self) -> Option<&Token> {
		let index = self.tokens.iter().rposition(is_significant)?;
		self.significant_before(index)
	}

	fn significant_before(&self, end: usize) -> Option<&Token> {
		self.tokens[..end].iter().rev().find(|token| is_significant(token))
	}

	/// Freeze the collected tokens.
	pub fn build(self) -> Tokens {
		let mut positions: HashMap<TokenKind, Vec<usize>> = HashMap::new();
		for (index, token) in self.tokens.iter().enumerate() {
			positions.entry(token.kind).or_default().push(index);
		}

		Tokens {
			tokens: self.tokens,
			ignored_violations: self.ignored_violations,
			positions,
		}
	}
}

fn is_significant(token: &Token) -> bool {
	!(token.kind.is_spacing()
		|| token.kind == TokenKind::Eol
		|| matches!(
			token.kind,
			TokenKind::InlineCommentStart | TokenKind::InlineCommentText
		))
}

/// A finished, read-only token stream together with the suppression
/// directives found while lexing it.
#[derive(Debug, Clone, Deref)]
pub struct Tokens {
	#[deref]
	tokens: Vec<Token>,
	ignored_violations: Vec<ViolationId>,
	/// Indices of every token, grouped by kind and sorted ascending.
	positions: HashMap<TokenKind, Vec<usize>>,
}

impl PartialEq for Tokens {
	fn eq(&self, other: &Self) -> bool {
		self.tokens == other.tokens && self.ignored_violations == other.ignored_violations
	}
}

impl Eq for Tokens {}

impl Tokens {
	pub fn get(&self, index: usize) -> Option<&Token> {
		self.tokens.get(index)
	}

	/// Always true: a `Tokens` value can only come out of a finished
	/// [`TokensBuilder`], and exposes no mutation.
	pub fn is_read_only(&self) -> bool {
		true
	}

	pub fn ignored_violations(&self) -> &[ViolationId] {
		&self.ignored_violations
	}

	pub fn to_vec(&self) -> Vec<Token> {
		self.tokens.clone()
	}

	/// Concatenation of every token value. For a lexed template this is the
	/// original source.
	pub fn to_source(&self) -> String {
		self.tokens.iter().map(|token| token.value.as_str()).collect()
	}

	/// First index `>= from` holding a token of `kind`.
	pub fn find_next(&self, kind: TokenKind, from: usize) -> Option<usize> {
		let positions = self.positions.get(&kind)?;
		let start = positions.partition_point(|&index| index < from);
		positions.get(start).copied()
	}

	/// Last index `<= from` holding a token of `kind`. `from` past the end of
	/// the stream searches from the last token.
	pub fn find_previous(&self, kind: TokenKind, from: usize) -> Option<usize> {
		let positions = self.positions.get(&kind)?;
		let end = positions.partition_point(|&index| index <= from);
		end.checked_sub(1).map(|at| positions[at])
	}

	/// First index `>= from` whose kind is in `kinds`.
	pub fn find_next_of(&self, kinds: &[TokenKind], from: usize) -> Option<usize> {
		kinds
			.iter()
			.filter_map(|kind| self.find_next(*kind, from))
			.min()
	}

	/// Last index `<= from` whose kind is in `kinds`.
	pub fn find_previous_of(&self, kinds: &[TokenKind], from: usize) -> Option<usize> {
		kinds
			.iter()
			.filter_map(|kind| self.find_previous(*kind, from))
			.max()
	}

	/// First index `>= from` whose kind is not in `kinds`, e.g. the next
	/// non-whitespace token.
	pub fn find_next_not(&self, kinds: &[TokenKind], from: usize) -> Option<usize> {
		self.tokens
			.get(from..)?
			.iter()
			.position(|token| !kinds.contains(&token.kind))
			.map(|offset| from + offset)
	}

	/// Last index `<= from` whose kind is not in `kinds`.
	pub fn find_previous_not(&self, kinds: &[TokenKind], from: usize) -> Option<usize> {
		if self.tokens.is_empty() {
			return None;
		}

		let end = from.min(self.tokens.len() - 1);
		self.tokens[..=end]
			.iter()
			.rposition(|token| !kinds.contains(&token.kind))
	}
}
