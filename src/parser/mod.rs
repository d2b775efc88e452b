//! Recursive-descent parser.
//!
//! Grounded in `original_source/source/parse.c`. The original threads an
//! `OutRoutine` continuation through every parse function so a single
//! function can emit into whatever list its caller is building; here each
//! parse function just returns the `Value` (or list of values) it built,
//! which is the direct Rust equivalent and lets callers push the result
//! wherever they like without a callback.
//!
//! `Source`'s `cursor` field becomes an explicit `&mut usize` parameter:
//! parse functions advance it in place and expect to be called with it
//! already pointing at the first unconsumed byte, exactly like the
//! original's convention of leaving `in->cursor` one-past the last token
//! consumed.
//!
//! `Source` also carries a `data.end` bound distinct from the cursor, so a
//! nested block (an outline tag's value, or a `macro`/`for` body) can be
//! scanned without losing the outer buffer's coordinate system. `Parser`
//! mirrors that with an `end` field: every lexer call is bounded by it, and
//! [`Parser::bounded`] builds a child parser over the same buffer with a
//! tighter bound instead of constructing a new `Lexer` over an extracted
//! substring, which would reset offsets to zero and break `Location`
//! accuracy for anything nested.

pub mod control;
pub mod filter;
pub mod include;
pub mod macro_def;
pub mod outline;

use std::rc::Rc;

use anyhow::Result;

use crate::arena::Arena;
use crate::ast::variable::{Lookup, Variable};
use crate::error::{source_error, Location};
use crate::lexer::{Lexer, TokenKind};
use crate::list::{List, ListBuilder};
use crate::scope::Scope;
use crate::value::Value;

/// The six directive names bound as keywords in the root scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyword {
	Macro,
	Outline,
	Union,
	Map,
	For,
	Include,
}

/// The six directive names, mapped to their keywords with a constant
/// perfect-hash table instead of a sequence of `scope.add` calls.
static KEYWORDS: phf::Map<&'static str, Keyword> = phf::phf_map! {
	"macro" => Keyword::Macro,
	"outline" => Keyword::Outline,
	"union" => Keyword::Union,
	"map" => Keyword::Map,
	"for" => Keyword::For,
	"include" => Keyword::Include,
};

/// Builds the root scope every top-level parse starts from: the six
/// keyword bindings and nothing else, matching
/// `original_source/source/options.c`'s keyword-scope installation in
/// `main`.
#[must_use]
pub fn root_scope<'a>(arena: &'a Arena) -> Scope<'a> {
	let scope = Scope::new(None);
	for (name, keyword) in &KEYWORDS {
		scope.add(arena, *name, Value::Keyword(*keyword));
	}
	scope
}

/// Parses one source buffer, handing out arena-backed `Value`s.
///
/// `end` bounds every scan to a prefix of `lexer.source()`; a top-level
/// parser built with [`Parser::new`] sets it to the full buffer length, and
/// [`Parser::bounded`] narrows it for a nested block without touching the
/// buffer or the cursor's coordinate system.
pub struct Parser<'a> {
	pub(crate) arena: &'a Arena,
	pub(crate) file: Rc<str>,
	pub(crate) lexer: Lexer<'a>,
	pub(crate) end: usize,
}

impl<'a> Parser<'a> {
	#[must_use]
	pub fn new(arena: &'a Arena, file: Rc<str>, source: &'a str) -> Self {
		let end = source.len();
		Self { arena, file, lexer: Lexer::new(source), end }
	}

	/// A parser over the same buffer and file, bounded to `end` instead of
	/// the full source length. Used to re-parse a captured block (a tag
	/// value, or a `macro`/`for` body) without losing absolute byte offsets.
	#[must_use]
	pub(crate) fn bounded(&self, end: usize) -> Parser<'a> {
		Parser { arena: self.arena, file: Rc::clone(&self.file), lexer: Lexer::new(self.lexer.source()), end }
	}

	pub(crate) fn location(&self, offset: usize) -> Location {
		Location::scan(&self.file, self.lexer.source(), offset)
	}

	pub(crate) fn error<T>(&self, offset: usize, message: impl std::fmt::Display) -> Result<T> {
		Err(source_error(&self.location(offset), message))
	}

	/// Scans a balanced `{ ... }` block starting at `*cursor`, returning the
	/// byte range strictly between the braces and advancing `*cursor` past
	/// the closing brace. Returns `None` if the next significant token is
	/// not `{`, or the block runs off the end of the bounded region before
	/// it balances.
	pub(crate) fn lex_block(&self, cursor: &mut usize) -> Option<(usize, usize)> {
		let open = self.lexer.next_significant(*cursor, self.end);
		if open.kind != TokenKind::BraceL {
			return None;
		}
		let inner_start = open.end;
		let mut depth = 1usize;
		let mut pos = inner_start;
		loop {
			let token = self.lexer.next(pos, self.end);
			match token.kind {
				TokenKind::End | TokenKind::ErrorEnd => return None,
				TokenKind::BraceL => depth += 1,
				TokenKind::BraceR => {
					depth -= 1;
					if depth == 0 {
						*cursor = token.end;
						return Some((inner_start, token.start));
					}
				}
				_ => {}
			}
			pos = token.end;
		}
	}

	/// Parses a single outline2c expression: a keyword invocation, a bound
	/// variable, or (when `allow_assign` is set) a `name = value`
	/// assignment into `scope`.
	///
	/// Returns `None` for an assignment, which produces no value for the
	/// caller to emit, matching the original's `parse_value`, which skips
	/// calling its output routine on the assignment path.
	pub fn parse_value(&self, cursor: &mut usize, scope: &'a Scope<'a>, allow_assign: bool) -> Result<Option<Value<'a>>> {
		let name_token = self.lexer.next_significant(*cursor, self.end);
		if name_token.kind != TokenKind::Identifier {
			return self.error(name_token.start, "Expecting a keyword or variable name here.");
		}
		let name = name_token.text;
		*cursor = name_token.end;

		if allow_assign {
			let eq_token = self.lexer.next_significant(*cursor, self.end);
			if eq_token.kind == TokenKind::Equals {
				let mut value_cursor = eq_token.end;
				let value = self
					.parse_value(&mut value_cursor, scope, false)?
					.ok_or_else(|| source_error(&self.location(eq_token.end), "Wrong type - this must be a value."))?;
				*cursor = value_cursor;
				scope.add(self.arena, name, value);
				return Ok(None);
			}
		}

		let Some(bound) = scope.get(name) else {
			return self.error(name_token.start, "Unknown variable or keyword.");
		};
		match bound {
			Value::Keyword(keyword) => self.parse_keyword(keyword, cursor, scope),
			other => Ok(Some(other)),
		}
	}

	fn parse_keyword(&self, keyword: Keyword, cursor: &mut usize, scope: &'a Scope<'a>) -> Result<Option<Value<'a>>> {
		match keyword {
			Keyword::Macro => self.parse_macro(cursor, scope).map(Some),
			Keyword::Outline => self.parse_outline(cursor, scope).map(|outline| Some(Value::Outline(self.arena.alloc(outline)))),
			Keyword::Union => self.parse_union(cursor, scope).map(|outline| Some(Value::Outline(self.arena.alloc(outline)))),
			Keyword::Map => self.parse_map(cursor, scope).map(Some),
			Keyword::For => self.parse_for(cursor, scope).map(Some),
			Keyword::Include => {
				self.parse_include(cursor, scope)?;
				Ok(None)
			}
		}
	}

	/// Parses a run of host-language code, stopping at the bounded end of
	/// input. Handles token-pasting (`\\`), `\ol` escapes, macro
	/// invocations, and bound-variable substitution (with an optional
	/// `!tag` lookup modifier) inline, matching
	/// `original_source/source/parse.c`'s `parse_code` state machine.
	pub fn parse_code(&self, cursor: &mut usize, scope: &'a Scope<'a>) -> Result<List<'a, Value<'a>>> {
		let mut builder = ListBuilder::new();
		let mut start_c = *cursor;
		let mut pos = *cursor;

		loop {
			let token = self.lexer.next(pos, self.end);
			match token.kind {
				TokenKind::End => {
					self.flush_code_text(&mut builder, start_c, pos);
					*cursor = pos;
					return Ok(builder.finish());
				}
				TokenKind::ErrorEnd => return self.error(token.start, "Unexpected end of input."),
				TokenKind::Error => return self.error(token.start, "Unrecognized character."),
				TokenKind::Paste => {
					self.flush_code_text(&mut builder, start_c, token.start);
					pos = token.end;
					start_c = pos;
				}
				TokenKind::Escape => {
					self.flush_code_text(&mut builder, start_c, token.start);
					let mut value_cursor = token.end;
					if let Some(value) = self.parse_value(&mut value_cursor, scope, true)? {
						builder.push(self.arena, value);
					}
					pos = value_cursor;
					start_c = pos;
				}
				TokenKind::Identifier => {
					if let Some(bound) = scope.get(token.text) {
						match bound {
							Value::Macro(macro_def) => {
								self.flush_code_text(&mut builder, start_c, token.start);
								let mut call_cursor = token.end;
								let call = self.parse_macro_call(&mut call_cursor, scope, macro_def)?;
								builder.push(self.arena, call);
								pos = call_cursor;
								start_c = pos;
								continue;
							}
							Value::Variable(variable) => {
								self.flush_code_text(&mut builder, start_c, token.start);
								pos = token.end;

								let bang = self.lexer.next(pos, self.end);
								if bang.kind == TokenKind::Bang {
									let lookup_name = self.lexer.next(bang.end, self.end);
									if lookup_name.kind == TokenKind::Identifier {
										let lookup = self.arena.alloc(Lookup { item: Value::Variable(variable), name: lookup_name.text });
										builder.push(self.arena, Value::Lookup(lookup));
										pos = lookup_name.end;
										start_c = pos;
										continue;
									}
								}
								builder.push(self.arena, Value::Variable(variable));
								start_c = pos;
								continue;
							}
							_ => {}
						}
					}
					pos = token.end;
				}
				_ => pos = token.end,
			}
		}
	}

	fn flush_code_text(&self, builder: &mut ListBuilder<'a, Value<'a>>, start: usize, end: usize) {
		if start == end {
			return;
		}
		let code_text = self.arena.alloc(crate::ast::control::CodeText { code: &self.lexer.source()[start..end] });
		builder.push(self.arena, Value::CodeText(code_text));
	}

	/// Declares a new, initially unbound variable named `name` in `scope`.
	pub(crate) fn declare_variable(&self, scope: &'a Scope<'a>, name: &'a str) -> &'a Variable<'a> {
		let variable = self.arena.alloc(Variable::unbound(name));
		scope.add(self.arena, name, Value::Variable(variable));
		variable
	}
}
