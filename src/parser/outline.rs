//! Outlines: `outline { ... }` and `union { ... }`.
//!
//! Grounded in `original_source/source/parse.c`'s `parse_outline_item`,
//! `parse_outline`, and `parse_union`.

use anyhow::Result;

use crate::ast::outline::{Outline, OutlineItem, OutlineTag};
use crate::lexer::TokenKind;
use crate::list::ListBuilder;
use crate::scope::Scope;

use super::Parser;

impl<'a> Parser<'a> {
	/// Parses one `name name(value) { children }` item, including its tags
	/// and optional nested outline.
	pub(crate) fn parse_outline_item(&self, cursor: &mut usize, scope: &'a Scope<'a>) -> Result<&'a OutlineItem<'a>> {
		let mut tags = ListBuilder::new();
		let mut pending: Option<&'a str> = None;

		let mut token = self.lexer.next_significant(*cursor, self.end);
		while token.kind == TokenKind::Identifier {
			if let Some(bare_name) = pending.take() {
				tags.push(self.arena, &*self.arena.alloc(OutlineTag { name: bare_name, value: crate::list::List::empty() }));
			}
			pending = Some(token.text);
			*cursor = token.end;

			token = self.lexer.next_significant(*cursor, self.end);
			if token.kind == TokenKind::Equals {
				let inner = self.arena.alloc(Scope::new(Some(scope)));
				let block_start = token.end;
				*cursor = block_start;
				let Some((inner_start, inner_end)) = self.lex_block(cursor) else {
					return self.error(block_start, "A tag's value must be a code block.");
				};
				let block_parser = self.bounded(inner_end);
				let mut block_cursor = inner_start;
				let code = block_parser.parse_code(&mut block_cursor, inner)?;

				let name = pending.take().expect("just set above, before peeking for `=`");
				tags.push(self.arena, &*self.arena.alloc(OutlineTag { name, value: code }));

				token = self.lexer.next_significant(*cursor, self.end);
			}
		}

		let Some(name) = pending else {
			return self.error(token.start, "An outline item must have a name.");
		};

		let children = if token.kind == TokenKind::BraceL {
			*cursor = token.start;
			self.parse_outline(cursor, scope)?
		} else if token.kind == TokenKind::Semicolon {
			*cursor = token.end;
			Outline::empty()
		} else {
			return self.error(token.start, "An outline can only end with a semicolon or an opening brace.");
		};

		Ok(self.arena.alloc(OutlineItem { tags: tags.finish(), name, children }))
	}

	/// Parses a `{ item; item; ... }` outline.
	pub fn parse_outline(&self, cursor: &mut usize, scope: &'a Scope<'a>) -> Result<Outline<'a>> {
		let open = self.lexer.next_significant(*cursor, self.end);
		if open.kind != TokenKind::BraceL {
			return self.error(open.start, "An outline must start with an opening {.");
		}
		*cursor = open.end;

		let mut items = ListBuilder::new();
		loop {
			let token = self.lexer.next_significant(*cursor, self.end);
			if token.kind == TokenKind::BraceR {
				*cursor = token.end;
				break;
			}
			let item = self.parse_outline_item(cursor, scope)?;
			items.push(self.arena, item);
		}

		Ok(Outline { items: items.finish() })
	}

	/// Parses a `{ outline [with filter], outline, ... }` union of one or
	/// more outlines, each optionally filtered before being merged in.
	pub fn parse_union(&self, cursor: &mut usize, scope: &'a Scope<'a>) -> Result<Outline<'a>> {
		let open = self.lexer.next_significant(*cursor, self.end);
		if open.kind != TokenKind::BraceL {
			return self.error(open.start, "Expecting an opening {.");
		}
		*cursor = open.end;

		let mut items = ListBuilder::new();
		loop {
			let outline_start = *cursor;
			let Some(value) = self.parse_value(cursor, scope, false)? else {
				return self.error(outline_start, "Wrong type - the union statement expects an outline.");
			};
			if !value.is_outline_like() {
				return self.error(outline_start, "Wrong type - the union statement expects an outline.");
			}

			let mut token = self.lexer.next_significant(*cursor, self.end);
			let filter = if token.kind == TokenKind::Identifier && token.text == "with" {
				*cursor = token.end;
				let filter_value = self.parse_filter(cursor)?;
				token = self.lexer.next_significant(*cursor, self.end);
				Some(filter_value)
			} else {
				None
			};

			for item in outline_items(value) {
				let accept = filter.as_ref().map_or(true, |f| f.test_filter(item));
				if accept {
					items.push(self.arena, item);
				}
			}

			if token.kind == TokenKind::Comma {
				*cursor = token.end;
				continue;
			} else if token.kind == TokenKind::BraceR {
				*cursor = token.end;
				break;
			}
			return self.error(token.start, "The list of outlines must end with a closing }.");
		}

		Ok(Outline { items: items.finish() })
	}
}

/// Yields the outline items behind a `Value` known to be outline-like
/// (either a single item or a whole outline), mirroring
/// `original_source/source/ast.c`'s `get_items`.
pub(crate) fn outline_items<'a>(value: crate::value::Value<'a>) -> Box<dyn Iterator<Item = &'a OutlineItem<'a>> + 'a> {
	match value {
		crate::value::Value::OutlineItem(item) => Box::new(std::iter::once(item)),
		crate::value::Value::Outline(outline) => Box::new(outline.items.iter().copied()),
		_ => unreachable!("outline_items called on a non-outline value"),
	}
}
