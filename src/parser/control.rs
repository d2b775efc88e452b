//! `map` and `for` control constructs.
//!
//! Grounded in `original_source/source/parse.c`'s `parse_map_line`,
//! `parse_map`, and `parse_for`.

use anyhow::Result;

use crate::ast::control::{For, Map, MapLine};
use crate::lexer::TokenKind;
use crate::list::ListBuilder;
use crate::scope::Scope;
use crate::value::{CodeSpan, Value};

use super::Parser;

impl<'a> Parser<'a> {
	/// Parses one `filter => { code }` line inside a `map` statement.
	fn parse_map_line(&self, cursor: &mut usize, scope: &'a Scope<'a>) -> Result<&'a MapLine<'a>> {
		let inner = self.arena.alloc(Scope::new(Some(scope)));

		let filter = self.parse_filter(cursor)?;

		let block_start = *cursor;
		let Some((inner_start, inner_end)) = self.lex_block(cursor) else {
			return self.error(block_start, "A line within a \"map\" statement must end with a code block.");
		};
		let block_parser = self.bounded(inner_end);
		let mut block_cursor = inner_start;
		let code = block_parser.parse_code(&mut block_cursor, inner)?;

		Ok(self.arena.alloc(MapLine { filter, code }))
	}

	/// Parses a `map item { line; line; ... }` statement. `item` is
	/// whatever value the target expression resolves to (typically a
	/// `for` loop's variable), resolved to the item it's currently bound to
	/// when the map is generated.
	pub fn parse_map(&self, cursor: &mut usize, scope: &'a Scope<'a>) -> Result<Value<'a>> {
		let item_start = *cursor;
		let Some(item) = self.parse_value(cursor, scope, false)? else {
			return self.error(item_start, "Wrong type - expecting an outline item as a map parameter.");
		};

		let open = self.lexer.next_significant(*cursor, self.end);
		if open.kind != TokenKind::BraceL {
			return self.error(open.start, "An opening { must come after the name of a map.");
		}
		*cursor = open.end;

		let mut lines = ListBuilder::new();
		loop {
			let token = self.lexer.next_significant(*cursor, self.end);
			if token.kind == TokenKind::BraceR {
				*cursor = token.end;
				break;
			}
			let line = self.parse_map_line(cursor, scope)?;
			lines.push(self.arena, line);
		}

		Ok(Value::Map(self.arena.alloc(Map { item, lines: lines.finish() })))
	}

	/// Parses a `for item in outline [with filter] [reverse] [list] { body }`
	/// statement. The body is captured as raw text and re-parsed once per
	/// iteration at generation time, against a scope with `item` bound to
	/// that iteration's outline item.
	pub fn parse_for(&self, cursor: &mut usize, scope: &'a Scope<'a>) -> Result<Value<'a>> {
		let name_token = self.lexer.next_significant(*cursor, self.end);
		if name_token.kind != TokenKind::Identifier {
			return self.error(name_token.start, "Expecting a new symbol name here.");
		}
		*cursor = name_token.end;

		let in_token = self.lexer.next_significant(*cursor, self.end);
		if in_token.kind != TokenKind::Identifier || in_token.text != "in" {
			return self.error(in_token.start, "Expecting the \"in\" keyword here.");
		}
		*cursor = in_token.end;

		let outline_start = *cursor;
		let Some(outline) = self.parse_value(cursor, scope, false)? else {
			return self.error(outline_start, "Wrong type - the for statement expects an outline.");
		};
		if !outline.is_outline_like() && !matches!(outline, Value::Variable(_)) {
			return self.error(outline_start, "Wrong type - the for statement expects an outline.");
		}

		let mut filter = None;
		let mut reverse = false;
		let mut list = false;
		loop {
			let token = self.lexer.next_significant(*cursor, self.end);
			if token.kind != TokenKind::Identifier {
				break;
			}
			match token.text {
				"with" => {
					*cursor = token.end;
					filter = Some(self.parse_filter(cursor)?);
				}
				"reverse" => {
					*cursor = token.end;
					reverse = true;
				}
				"list" => {
					*cursor = token.end;
					list = true;
				}
				_ => return self.error(token.start, "Invalid \"for\" statement modifier."),
			}
		}

		let inner_scope = self.arena.alloc(Scope::new(Some(scope)));
		let item = self.declare_variable(inner_scope, name_token.text);

		let body_start = *cursor;
		let Some((inner_start, inner_end)) = self.lex_block(cursor) else {
			return self.error(body_start, "A \"for\" statement must end with a code block.");
		};
		let location = self.arena.alloc(self.location(inner_start));

		Ok(Value::For(self.arena.alloc(For {
			item,
			outline,
			filter: filter.unwrap_or(Value::FilterAny),
			reverse,
			list,
			scope: inner_scope,
			code: CodeSpan { text: &self.lexer.source()[inner_start..inner_end], location },
		})))
	}
}
