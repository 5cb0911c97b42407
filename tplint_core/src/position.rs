use serde::Deserialize;
use serde::Serialize;

/// A location in a template. `line` and `column` are 1-indexed and `column`
/// counts characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
	pub line: usize,
	pub column: usize,
}

impl Default for Point {
	fn default() -> Self {
		Self::new(1, 1)
	}
}

impl Point {
	pub const fn new(line: usize, column: usize) -> Self {
		Self { line, column }
	}

	/// Move this point past `text`. `\r\n`, `\n` and a lone `\r` each count
	/// as exactly one line break.
	pub fn advance_str(&mut self, text: &str) {
		let mut chars = text.chars().peekable();

		while let Some(ch) = chars.next() {
			match ch {
				'\r' => {
					if chars.peek() == Some(&'\n') {
						chars.next();
					}
					self.new_line();
				}
				'\n' => self.new_line(),
				_ => self.column += 1,
			}
		}
	}

	fn new_line(&mut self) {
		self.line += 1;
		self.column = 1;
	}
}
