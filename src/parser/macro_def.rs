//! `macro` definitions and invocations.
//!
//! Grounded in `original_source/source/parse.c`'s `parse_macro` and
//! `parse_macro_call`.

use anyhow::Result;

use crate::ast::macro_def::{Macro, MacroCall};
use crate::lexer::TokenKind;
use crate::list::ListBuilder;
use crate::scope::Scope;
use crate::value::{CodeSpan, Value};

use super::Parser;

impl<'a> Parser<'a> {
	/// Parses `(inputs) { body }` following the `macro` keyword.
	pub fn parse_macro(&self, cursor: &mut usize, scope: &'a Scope<'a>) -> Result<Value<'a>> {
		let open = self.lexer.next_significant(*cursor, self.end);
		if open.kind != TokenKind::ParenL {
			return self.error(open.start, "A macro definition must begin with an argument list.");
		}
		*cursor = open.end;

		let inner_scope = self.arena.alloc(Scope::new(Some(scope)));
		let mut inputs = ListBuilder::new();
		let mut first = true;
		loop {
			let token = self.lexer.next_significant(*cursor, self.end);
			if token.kind == TokenKind::ParenR && first {
				*cursor = token.end;
				break;
			}
			if token.kind != TokenKind::Identifier {
				return self.error(token.start, "Expecting a keyword or variable name here.");
			}
			*cursor = token.end;
			let variable = self.declare_variable(inner_scope, token.text);
			inputs.push(self.arena, variable);
			first = false;

			let sep = self.lexer.next_significant(*cursor, self.end);
			*cursor = sep.end;
			if sep.kind == TokenKind::Comma {
				continue;
			} else if sep.kind == TokenKind::ParenR {
				break;
			}
			return self.error(sep.start, "Expecting a closing ) or another argument.");
		}

		let body_start = *cursor;
		let Some((inner_start, inner_end)) = self.lex_block(cursor) else {
			return self.error(body_start, "A macro definition must end with a code block.");
		};
		let location = self.arena.alloc(self.location(inner_start));

		Ok(Value::Macro(self.arena.alloc(Macro {
			inputs: inputs.finish(),
			scope: inner_scope,
			code: CodeSpan { text: &self.lexer.source()[inner_start..inner_end], location },
		})))
	}

	/// Parses the `(inputs)` actual-argument list of a call to `macro_def`.
	pub(crate) fn parse_macro_call(&self, cursor: &mut usize, scope: &'a Scope<'a>, macro_def: &'a Macro<'a>) -> Result<Value<'a>> {
		let open = self.lexer.next_significant(*cursor, self.end);
		if open.kind != TokenKind::ParenL {
			return self.error(open.start, "A macro invocation must have an argument list.");
		}
		*cursor = open.end;

		let mut inputs = ListBuilder::new();
		let mut first = true;
		let mut end = open.end;
		loop {
			let peek = self.lexer.next_significant(*cursor, self.end);
			if peek.kind == TokenKind::ParenR && first {
				*cursor = peek.end;
				end = peek.end;
				break;
			}
			if peek.kind != TokenKind::Identifier {
				return self.error(peek.start, "Expecting a keyword or variable name here.");
			}
			let Some(value) = self.parse_value(cursor, scope, false)? else {
				return self.error(peek.start, "Wrong type - this must be a value.");
			};
			inputs.push(self.arena, value);
			first = false;

			let sep = self.lexer.next_significant(*cursor, self.end);
			*cursor = sep.end;
			end = sep.end;
			if sep.kind == TokenKind::Comma {
				continue;
			} else if sep.kind == TokenKind::ParenR {
				break;
			}
			return self.error(sep.start, "Expecting a closing ) or another argument.");
		}

		let inputs = inputs.finish();
		if inputs.len() != macro_def.inputs.len() {
			return self.error(end, "Wrong number of arguments.");
		}

		Ok(Value::MacroCall(self.arena.alloc(MacroCall { macro_def, inputs })))
	}
}
