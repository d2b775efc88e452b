//! Hand-rolled byte-cursor tokenizer.
//!
//! A direct translation of `original_source/source/lex.c`'s `lex`/
//! `lex_next`, kept as a cursor-passing function rather than regex-driven
//! matching: the grammar is a sequence of "is this character class"
//! branches with no backtracking, which a hand-written scanner expresses
//! more directly (and faster) than a regex engine would. `Lexer` is
//! stateless and restartable (callers hold the cursor, not the lexer),
//! so the parser can bound a scan to a sub-range of the buffer (a captured
//! `macro`/`for`/tag-value block) just by passing a tighter `end`, the same
//! way the original's `Source.data.end` bounds `lex`.

use strum_macros::EnumIter;

/// The kind of token just scanned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter)]
pub enum TokenKind {
	/// Ran out of input mid-token (unterminated string/char/comment).
	ErrorEnd,
	/// A byte that starts no valid token.
	Error,
	/// Normal, well-formed end of input.
	End,

	Whitespace,
	Comment,
	String,
	Char,
	Number,
	Identifier,
	/// `\ol`
	Escape,
	/// `\\`
	Paste,

	Bang,
	Amp,
	ParenL,
	ParenR,
	Star,
	Comma,
	Dot,
	Slash,
	Semicolon,
	Lt,
	Equals,
	Gt,
	Backslash,
	BraceL,
	Pipe,
	BraceR,
}

impl TokenKind {
	/// True for the tokens [`Lexer::next_significant`] filters out.
	#[must_use]
	fn is_insignificant(self) -> bool {
		matches!(self, TokenKind::Whitespace | TokenKind::Comment)
	}
}

/// One scanned token: its kind and the exact source slice it covers.
#[derive(Clone, Copy, Debug)]
pub struct Token<'a> {
	pub kind: TokenKind,
	pub text: &'a str,
	pub start: usize,
	pub end: usize,
}

fn is_space(c: char) -> bool {
	matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_alpha(c: char) -> bool {
	c.is_ascii_alphabetic() || c == '_'
}

fn is_alphanum(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_'
}

/// Scans one source buffer, one token at a time, without mutating any
/// shared state itself: the cursor (and, for a bounded sub-scan, the end
/// of the region) lives in the caller.
pub struct Lexer<'a> {
	source: &'a str,
}

impl<'a> Lexer<'a> {
	#[must_use]
	pub fn new(source: &'a str) -> Self {
		Self { source }
	}

	/// The full buffer this lexer scans; `next`/`next_significant` may be
	/// bounded to a prefix of it via their `end` parameter.
	#[must_use]
	pub fn source(&self) -> &'a str {
		self.source
	}

	fn char_at(&self, at: usize, end: usize) -> Option<char> {
		if at >= end {
			return None;
		}
		self.source[at..end].chars().next()
	}

	/// Scans exactly one token (including whitespace and comments)
	/// starting at byte offset `start`, never reading past `end`.
	#[must_use]
	pub fn next(&self, start: usize, end: usize) -> Token<'a> {
		let Some(first) = self.char_at(start, end) else {
			return self.token(TokenKind::End, start, start);
		};

		if is_space(first) {
			let mut cursor = start + first.len_utf8();
			while let Some(c) = self.char_at(cursor, end) {
				if !is_space(c) {
					break;
				}
				cursor += c.len_utf8();
			}
			return self.token(TokenKind::Whitespace, start, cursor);
		}

		if first == '/' {
			let after_slash = start + 1;
			let Some(second) = self.char_at(after_slash, end) else {
				return self.token(TokenKind::Slash, start, after_slash);
			};
			if second == '/' {
				let mut cursor = after_slash;
				loop {
					cursor += 1;
					match self.char_at(cursor, end) {
						None => return self.token(TokenKind::Comment, start, cursor),
						Some('\n') => return self.token(TokenKind::Comment, start, cursor + 1),
						Some(_) => {}
					}
				}
			} else if second == '*' {
				let mut cursor = after_slash;
				loop {
					loop {
						cursor += 1;
						match self.char_at(cursor, end) {
							None => return self.token(TokenKind::ErrorEnd, start, end),
							Some('*') => break,
							Some(_) => {}
						}
					}
					loop {
						cursor += 1;
						match self.char_at(cursor, end) {
							None => return self.token(TokenKind::ErrorEnd, start, end),
							Some('*') => continue,
							Some(_) => break,
						}
					}
					if self.char_at(cursor, end) == Some('/') {
						break;
					}
				}
				return self.token(TokenKind::Comment, start, cursor + 1);
			}
			return self.token(TokenKind::Slash, start, after_slash);
		}

		if first == '"' || first == '\'' {
			let quote = first;
			let kind = if quote == '"' { TokenKind::String } else { TokenKind::Char };
			let mut cursor = start + 1;
			loop {
				match self.char_at(cursor, end) {
					None => return self.token(TokenKind::ErrorEnd, start, end),
					Some('\\') => {
						cursor += 1;
						match self.char_at(cursor, end) {
							None => return self.token(TokenKind::ErrorEnd, start, end),
							Some(c) => cursor += c.len_utf8(),
						}
					}
					Some(c) if c == quote => {
						cursor += 1;
						return self.token(kind, start, cursor);
					}
					Some(c) => cursor += c.len_utf8(),
				}
			}
		}

		if first.is_ascii_digit() {
			let mut cursor = start + 1;
			while let Some(c) = self.char_at(cursor, end) {
				if !is_alphanum(c) {
					break;
				}
				cursor += c.len_utf8();
			}
			return self.token(TokenKind::Number, start, cursor);
		}

		if is_alpha(first) {
			let mut cursor = start + first.len_utf8();
			while let Some(c) = self.char_at(cursor, end) {
				if !is_alphanum(c) {
					break;
				}
				cursor += c.len_utf8();
			}
			return self.token(TokenKind::Identifier, start, cursor);
		}

		if first == '\\' {
			let after_backslash = start + 1;
			let Some(second) = self.char_at(after_backslash, end) else {
				return self.token(TokenKind::Backslash, start, after_backslash);
			};
			if second == '\\' {
				return self.token(TokenKind::Paste, start, after_backslash + 1);
			}
			if second == 'o' {
				let after_o = after_backslash + 1;
				if self.char_at(after_o, end) == Some('l') {
					return self.token(TokenKind::Escape, start, after_o + 1);
				}
				return self.token(TokenKind::Backslash, start, after_backslash);
			}
			return self.token(TokenKind::Backslash, start, after_backslash);
		}

		let kind = match first {
			'!' => TokenKind::Bang,
			'&' => TokenKind::Amp,
			'(' => TokenKind::ParenL,
			')' => TokenKind::ParenR,
			'*' => TokenKind::Star,
			',' => TokenKind::Comma,
			'.' => TokenKind::Dot,
			';' => TokenKind::Semicolon,
			'<' => TokenKind::Lt,
			'=' => TokenKind::Equals,
			'>' => TokenKind::Gt,
			'{' => TokenKind::BraceL,
			'|' => TokenKind::Pipe,
			'}' => TokenKind::BraceR,
			_ => {
				return self.token(TokenKind::Error, start, start + first.len_utf8());
			}
		};
		self.token(kind, start, start + first.len_utf8())
	}

	/// Scans the next significant token starting at or after byte offset
	/// `start`, skipping whitespace and comments, never reading past `end`.
	#[must_use]
	pub fn next_significant(&self, mut start: usize, end: usize) -> Token<'a> {
		loop {
			let token = self.next(start, end);
			if !token.kind.is_insignificant() {
				return token;
			}
			start = token.end;
		}
	}

	fn token(&self, kind: TokenKind, start: usize, end: usize) -> Token<'a> {
		Token { kind, text: &self.source[start..end], start, end }
	}
}

#[cfg(test)]
mod tests {
	use strum::IntoEnumIterator as _;

	use super::*;

	#[test]
	fn only_whitespace_and_comment_are_insignificant() {
		let insignificant: Vec<TokenKind> = TokenKind::iter().filter(|kind| kind.is_insignificant()).collect();
		assert_eq!(insignificant, vec![TokenKind::Whitespace, TokenKind::Comment]);
	}

	fn kinds(source: &str) -> Vec<TokenKind> {
		let lexer = Lexer::new(source);
		let end = source.len();
		let mut cursor = 0;
		let mut out = Vec::new();
		loop {
			let token = lexer.next_significant(cursor, end);
			if token.kind == TokenKind::End {
				break;
			}
			out.push(token.kind);
			cursor = token.end;
		}
		out
	}

	#[test]
	fn skips_whitespace_and_line_comments() {
		assert_eq!(kinds("  foo // bar\n  baz"), vec![TokenKind::Identifier, TokenKind::Identifier]);
	}

	#[test]
	fn skips_block_comments() {
		assert_eq!(kinds("a /* b\nc */ d"), vec![TokenKind::Identifier, TokenKind::Identifier]);
	}

	#[test]
	fn recognizes_escape_vs_bare_backslash() {
		assert_eq!(kinds(r"\ol"), vec![TokenKind::Escape]);
		assert_eq!(kinds(r"\o"), vec![TokenKind::Backslash, TokenKind::Identifier]);
		assert_eq!(kinds(r"\\"), vec![TokenKind::Paste]);
	}

	#[test]
	fn identifiers_allow_digits_after_first_char() {
		assert_eq!(kinds("_foo1 2bar"), vec![TokenKind::Identifier, TokenKind::Number]);
	}

	#[test]
	fn unterminated_string_is_error_end() {
		let lexer = Lexer::new("\"abc");
		assert_eq!(lexer.next(0, 4).kind, TokenKind::ErrorEnd);
	}

	#[test]
	fn string_handles_escaped_quote() {
		let lexer = Lexer::new(r#""a\"b" rest"#);
		let token = lexer.next_significant(0, lexer.source().len());
		assert_eq!(token.kind, TokenKind::String);
		assert_eq!(token.text, r#""a\"b""#);
	}

	#[test]
	fn bounded_scan_treats_the_bound_as_end_of_input() {
		let lexer = Lexer::new("foo bar");
		let token = lexer.next_significant(0, 3);
		assert_eq!(token.kind, TokenKind::Identifier);
		assert_eq!(token.text, "foo");
		let next = lexer.next_significant(token.end, 3);
		assert_eq!(next.kind, TokenKind::End);
	}

	#[test]
	fn punctuation_tokens() {
		assert_eq!(
			kinds("!&()*,./;<=>{|}"),
			vec![
				TokenKind::Bang,
				TokenKind::Amp,
				TokenKind::ParenL,
				TokenKind::ParenR,
				TokenKind::Star,
				TokenKind::Comma,
				TokenKind::Dot,
				TokenKind::Slash,
				TokenKind::Semicolon,
				TokenKind::Lt,
				TokenKind::Equals,
				TokenKind::Gt,
				TokenKind::BraceL,
				TokenKind::Pipe,
				TokenKind::BraceR,
			]
		);
	}
}
