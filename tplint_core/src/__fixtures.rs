use std::fmt::Write;

use crate::Environment;
use crate::Level;
use crate::Patch;
use crate::Rule;
use crate::RuleContext;
use crate::TplintResult;
use crate::Violation;
use crate::tokenize;
use crate::tokens::TokenKind;
use crate::tokens::Tokens;

pub(crate) const FILENAME: &str = "template.html.twig";

/// One directive per line, each silencing a different set of violations.
pub(crate) const IGNORED_VIOLATIONS_TEMPLATE: &str = "{# tplint-disable Foo.Bar #}
{# TPLINT-DISABLE Foo.BarInsensitive #}
{# tplint-disable-line Foo.Bar #}
{# tplint-disable-next-line Foo.Bar #}
{{ foo }} {# tplint-disable-line Bar.Foo #}
{{ foo }} {# tplint-disable-line #}
{# tplint-disabled Foo.Bar #}
{{ foo # tplint-disable-next-line }}
{# tplint-disable Foo:bar #}
";

/// Templates covering every lexer context, used for whole-stream properties.
pub(crate) const VALID_TEMPLATES: [&str; 14] = [
	"",
	"<div>test</div>\n",
	"{#\r\n\n#}\r\n\n",
	"line\rline\r\nline\n",
	"{{ foo }}\n{# comment #}\n{% block foo %}{% endblock %}\n",
	"{{ 1+2-3*4/5 }}\n{{ (foo in ['a', 'b']) }}\n",
	"{{ foo|map(x => \"#{x.a} #{x.b}\")|join(', ') }}\n",
	"{% if foo is same as(bar) %}{% endif %}\n",
	"{%- macro input(name, value = '', type = 'text') -%}\n\t{{~ value ~}}\n{%~ endmacro ~%}\n",
	"{% verbatim %}{{ not lexed {% endverbatim %}\n",
	"{{ foo # an inline comment\n}}\n{{ \"a\nmultiline\" ~ 'string' }}\n",
	"é {{ ü ? 'yes' }} {{ {a: 1, 'b': 2, c: d ? 1 : 2} }}",
	"{{ 'a\\\nb' ~ 'c\\\r\nd' }}\n",
	"{{ \"#{ \"#{ a ~ \"#{b}\" }\" }\" }}\n",
];

pub(crate) fn tokenize_default(source: &str) -> TplintResult<Tokens> {
	tokenize(source, FILENAME, &Environment::default())
}

pub(crate) fn kinds(tokens: &Tokens) -> Vec<TokenKind> {
	tokens.iter().map(|token| token.kind).collect()
}

/// One line per token: kind, position and quoted value.
pub(crate) fn token_dump(tokens: &Tokens) -> String {
	let mut dump = String::new();
	for token in tokens.iter() {
		let _ = writeln!(
			dump,
			"{} {}:{} {:?}",
			token.kind, token.line, token.column, token.value
		);
	}

	dump
}

/// An error of `rule_name` at column 1 of `line` in [`FILENAME`].
pub(crate) fn error_at(rule_name: &str, line: usize) -> Violation {
	Violation {
		rule_name: rule_name.to_string(),
		message_id: "Error".to_string(),
		message: "message".to_string(),
		level: Level::Error,
		filename: FILENAME.to_string(),
		line: Some(line),
		column: Some(1),
		fixable: false,
		patch: None,
	}
}

/// A rule defined by a closure.
pub(crate) struct FnRule {
	name: &'static str,
	visit: Box<dyn Fn(usize, &Tokens, &mut RuleContext<'_>) + Send + Sync>,
}

impl FnRule {
	pub(crate) fn new(
		name: &'static str,
		visit: impl Fn(usize, &Tokens, &mut RuleContext<'_>) + Send + Sync + 'static,
	) -> Self {
		Self {
			name,
			visit: Box::new(visit),
		}
	}
}

impl Rule for FnRule {
	fn name(&self) -> &str {
		self.name
	}

	fn visit(&self, index: usize, tokens: &Tokens, context: &mut RuleContext<'_>) {
		(self.visit)(index, tokens, context);
	}
}

/// Reports an error on every `fake` text token.
pub(crate) struct FakeRule;

impl Rule for FakeRule {
	fn name(&self) -> &str {
		"Fake"
	}

	fn visit(&self, index: usize, tokens: &Tokens, context: &mut RuleContext<'_>) {
		if let Some(token) = tokens.get(index) {
			if token.is_value(TokenKind::Text, "fake") {
				context.add_error("Fake error", token);
			}
		}
	}
}

/// Fixable rule renaming every `from` name to `to`.
pub(crate) struct RenameRule {
	pub name: &'static str,
	pub from: &'static str,
	pub to: &'static str,
}

impl Rule for RenameRule {
	fn name(&self) -> &str {
		self.name
	}

	fn fixable(&self) -> bool {
		true
	}

	fn visit(&self, index: usize, tokens: &Tokens, context: &mut RuleContext<'_>) {
		let Some(token) = tokens.get(index) else {
			return;
		};

		if token.is_value(TokenKind::Name, self.from) {
			context.add_fixable_warning(
				format!("`{}` should be `{}`", self.from, self.to),
				token,
				Patch::replace(index, self.to),
			);
		}
	}
}
