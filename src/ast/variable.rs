//! Variables and lookups.
//!
//! The original's `AstLookup` (`original_source/source/ast.c`) always
//! points at an `AstOutlineItem`, but `generate.c`'s `generate_lookup`
//! treats the thing being looked into as a `Dynamic`, so it also accepts
//! whatever a `for` loop's bound name resolves to at generation time. A
//! bound loop/macro-input name is itself a `Variable` carrying whatever
//! `Value` it was last bound to, so `Lookup.item` here is the general
//! `Value`, not just an outline item.

use std::cell::Cell;

use crate::value::{StringView, Value};

/// A name bound in scope, whose value is filled in (and can change) once
/// per binding site: once when a `for` loop enters a new iteration, or
/// once when a `macro` is called with its actual inputs.
///
/// The original stores bindings directly as `Dynamic` values in the
/// `Scope`'s linked list and mutates them in place across loop iterations.
/// Here the arena only ever hands out shared references, so the mutable
/// slot is made explicit with a `Cell`.
pub struct Variable<'a> {
	pub name: StringView<'a>,
	pub bound: Cell<Option<Value<'a>>>,
}

impl<'a> Variable<'a> {
	/// A variable with no value bound yet.
	#[must_use]
	pub fn unbound(name: StringView<'a>) -> Self {
		Self { name, bound: Cell::new(None) }
	}

	/// The value currently bound to this variable, if any.
	#[must_use]
	pub fn get(&self) -> Option<Value<'a>> {
		self.bound.get()
	}

	/// Rebinds this variable, used when a `for` loop advances to its next
	/// iteration.
	pub fn set(&self, value: Value<'a>) {
		self.bound.set(Some(value));
	}
}

/// A `name.tag` lookup: read the value of `tag` off of whatever `name`
/// resolved to.
pub struct Lookup<'a> {
	pub item: Value<'a>,
	pub name: StringView<'a>,
}
