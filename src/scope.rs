//! Lexical scope: a chain of frames, each a linked list of name/value
//! bindings, searched from the innermost frame outward.
//!
//! Grounded directly in `original_source/source/scope.c`'s `Scope`/`Symbol`:
//! a frame is a singly linked list of symbols with a pointer to its outer
//! frame, `scope_add` pushes a new symbol onto the front of the current
//! frame's list (so a later binding of the same name shadows an earlier
//! one within that frame), and `scope_get` walks outward frame by frame
//! until it finds a match or runs out of frames.

use std::cell::Cell;

use crate::arena::Arena;
use crate::value::{StringView, Value};

struct Symbol<'a> {
	name: StringView<'a>,
	value: Value<'a>,
	next: Cell<Option<&'a Symbol<'a>>>,
}

/// One level of the symbol table, with an optional link to the scope it is
/// nested inside.
pub struct Scope<'a> {
	outer: Option<&'a Scope<'a>>,
	first: Cell<Option<&'a Symbol<'a>>>,
}

impl<'a> Scope<'a> {
	/// Creates a new, empty frame nested inside `outer` (or a root frame if
	/// `outer` is `None`).
	#[must_use]
	pub fn new(outer: Option<&'a Scope<'a>>) -> Self {
		Self { outer, first: Cell::new(None) }
	}

	/// Binds `name` to `value` in this frame. A later call with the same
	/// name shadows the earlier one for lookups in this frame, without
	/// disturbing bindings in outer frames.
	pub fn add(&self, arena: &'a Arena, name: StringView<'a>, value: Value<'a>) {
		let symbol = arena.alloc(Symbol { name, value, next: Cell::new(self.first.get()) });
		self.first.set(Some(symbol));
	}

	/// Looks up `name`, searching this frame and then each outer frame in
	/// turn. Returns the innermost binding found.
	#[must_use]
	pub fn get(&self, name: &str) -> Option<Value<'a>> {
		let mut scope = self;
		loop {
			let mut symbol = scope.first.get();
			while let Some(sym) = symbol {
				if sym.name == name {
					return Some(sym.value);
				}
				symbol = sym.next.get();
			}
			scope = scope.outer?;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parser::Keyword;

	#[test]
	fn inner_binding_shadows_outer() {
		let arena = Arena::new();
		let outer = Scope::new(None);
		outer.add(&arena, "x", Value::Keyword(Keyword::Map));
		let inner = Scope::new(Some(&outer));
		inner.add(&arena, "x", Value::Keyword(Keyword::For));
		assert!(matches!(inner.get("x"), Some(Value::Keyword(Keyword::For))));
		assert!(matches!(outer.get("x"), Some(Value::Keyword(Keyword::Map))));
	}

	#[test]
	fn later_binding_in_same_frame_shadows_earlier() {
		let arena = Arena::new();
		let scope = Scope::new(None);
		scope.add(&arena, "x", Value::Keyword(Keyword::Map));
		scope.add(&arena, "x", Value::Keyword(Keyword::For));
		assert!(matches!(scope.get("x"), Some(Value::Keyword(Keyword::For))));
	}

	#[test]
	fn missing_name_returns_none() {
		let scope = Scope::new(None);
		assert!(scope.get("nope").is_none());
	}
}
