//! Outlines: the nested bullet-list data outline2c programs describe and
//! iterate over.
//!
//! Shapes follow `original_source/source/ast.c`'s `AstOutlineTag`,
//! `AstOutlineItem`, and `AstOutline`.

use crate::list::List;
use crate::value::{StringView, Value};

/// A single `name` or `name = { value }` tag attached to an outline item.
pub struct OutlineTag<'a> {
	pub name: StringView<'a>,
	/// The tag's value block, if it had one. Holds the parsed host-language
	/// code as a flat list of `CodeText`/`Lookup`/... nodes, same as a
	/// `map` line's body.
	pub value: List<'a, Value<'a>>,
}

impl<'a> OutlineTag<'a> {
	/// True for a bare tag such as `priority` with no parenthesized value.
	#[must_use]
	pub fn is_bare(&self) -> bool {
		self.value.is_empty()
	}
}

/// One item in an outline: a name, the tags attached to it, and its own
/// nested outline of children (empty if the item has no children).
pub struct OutlineItem<'a> {
	pub tags: List<'a, &'a OutlineTag<'a>>,
	pub name: StringView<'a>,
	pub children: Outline<'a>,
}

impl<'a> OutlineItem<'a> {
	/// Finds the tag named `name` attached to this item, if any.
	#[must_use]
	pub fn tag(&self, name: &str) -> Option<&'a OutlineTag<'a>> {
		self.tags.iter().copied().find(|tag| tag.name == name)
	}
}

/// An ordered sequence of outline items, in source order.
#[derive(Clone, Copy)]
pub struct Outline<'a> {
	pub items: List<'a, &'a OutlineItem<'a>>,
}

impl<'a> Outline<'a> {
	/// The empty outline.
	#[must_use]
	pub fn empty() -> Self {
		Self { items: List::empty() }
	}
}
