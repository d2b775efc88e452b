//! The `include` directive.
//!
//! Grounded in `original_source/source/parse.c`'s `parse_include`. Despite
//! parsing the included file's code, the original never forwards that
//! parsed output anywhere: the local `ListBuilder` it builds is discarded
//! once `parse_code` returns. `include` exists only for its side effect:
//! running the included file's top-level directives (`macro`, `outline`,
//! `union`, `map`, `for` definitions and assignments) against `scope`, so
//! they become available to the including file. Kept that way here rather
//! than "fixed" to actually splice the included text in, since nothing in
//! the observed behavior suggests the discard was accidental. Bindings
//! are the whole point of including a file of definitions.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use anyhow::Result;

use crate::error::WithLocation;
use crate::lexer::TokenKind;
use crate::scope::Scope;

use super::Parser;

impl<'a> Parser<'a> {
	pub(crate) fn parse_include(&self, cursor: &mut usize, scope: &'a Scope<'a>) -> Result<()> {
		let name_token = self.lexer.next_significant(*cursor, self.end);
		if name_token.kind != TokenKind::String {
			return self.error(name_token.start, "An include statement expects a quoted filename.");
		}
		*cursor = name_token.end;
		let quoted = &name_token.text[1..name_token.text.len() - 1];

		let base = Path::new(self.file.as_ref()).parent().unwrap_or_else(|| Path::new(""));
		let included_path = base.join(quoted);

		let semicolon = self.lexer.next_significant(*cursor, self.end);
		if semicolon.kind != TokenKind::Semicolon {
			return self.error(semicolon.start, "An include statement must end with a semicolon.");
		}
		*cursor = semicolon.end;

		let source = fs::read_to_string(&included_path).with_location(&self.location(name_token.start))?;
		let source: &'a str = self.arena.alloc_str(&source);
		let file: Rc<str> = Rc::from(included_path.to_string_lossy().as_ref());

		let included = Parser::new(self.arena, file, source);
		let mut included_cursor = 0;
		included.parse_code(&mut included_cursor, scope)?;

		Ok(())
	}
}
