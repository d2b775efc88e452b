//! The tagged value that every AST node is passed around as.
//!
//! `original_source/source/ast.c` represents a node as a `Dynamic` (a type
//! tag plus a `void*`) and dispatches behavior through `can_test_filter`,
//! `can_get_items`, and `can_generate` predicate functions that each check
//! the tag by hand. A Rust enum makes the tag and the payload one value and
//! lets every consumer dispatch with `match` instead of re-deriving which
//! variants are filters, outlines, or generatable nodes. The compiler
//! checks exhaustiveness for us instead of the predicates drifting out of
//! sync with the variant list.

use crate::ast::control::{CodeText, For, Map, MapLine};
use crate::ast::filter::{FilterAnd, FilterNot, FilterOr, FilterTag};
use crate::ast::macro_def::{Macro, MacroCall};
use crate::ast::outline::{Outline, OutlineItem, OutlineTag};
use crate::ast::variable::{Lookup, Variable};
use crate::error::Location;
use crate::parser::Keyword;

/// A non-owning view into a source buffer.
///
/// The original passes around `(begin, end)` pointer pairs (`String` in
/// `original_source/source/lex.h`); a Rust `&str` slice already carries
/// both its start and its length, so it plays the same role without a
/// bespoke type.
pub type StringView<'a> = &'a str;

/// Raw, not-yet-parsed source text captured for a `macro` or `for` body,
/// together with where it started in the original file.
///
/// `macro` and `for` bodies are re-parsed once per invocation against the
/// scope captured at the point they were called (see
/// `original_source/source/generate.c`'s `generate_macro_call` and
/// `generate_for`), so the parser only records the span here and leaves
/// parsing it to the generator.
#[derive(Clone, Copy)]
pub struct CodeSpan<'a> {
	pub text: &'a str,
	pub location: &'a Location,
}

/// Every kind of node that can appear in the parsed program.
#[derive(Clone, Copy)]
pub enum Value<'a> {
	OutlineTag(&'a OutlineTag<'a>),
	OutlineItem(&'a OutlineItem<'a>),
	Outline(&'a Outline<'a>),
	Lookup(&'a Lookup<'a>),
	Variable(&'a Variable<'a>),
	Macro(&'a Macro<'a>),
	MacroCall(&'a MacroCall<'a>),
	FilterTag(&'a FilterTag<'a>),
	FilterAny,
	FilterNot(&'a FilterNot<'a>),
	FilterAnd(&'a FilterAnd<'a>),
	FilterOr(&'a FilterOr<'a>),
	Map(&'a Map<'a>),
	MapLine(&'a MapLine<'a>),
	For(&'a For<'a>),
	CodeText(&'a CodeText<'a>),
	/// A built-in directive name (`macro`, `outline`, `union`, `map`,
	/// `for`, `include`) bound in the root scope, analogous to
	/// `original_source/source/ast.c`'s `Keyword`.
	Keyword(Keyword),
}

impl<'a> Value<'a> {
	/// True for the variants `original_source`'s `can_test_filter` accepts:
	/// nodes that can be evaluated against an outline item.
	#[must_use]
	pub fn is_filter(&self) -> bool {
		matches!(
			self,
			Value::FilterTag(_) | Value::FilterAny | Value::FilterNot(_) | Value::FilterAnd(_) | Value::FilterOr(_)
		)
	}

	/// True for the variants `original_source`'s `can_get_items` accepts:
	/// nodes that behave like an outline (a sequence of outline items).
	#[must_use]
	pub fn is_outline_like(&self) -> bool {
		matches!(self, Value::OutlineItem(_) | Value::Outline(_))
	}

	/// Tests whether `item` satisfies this filter expression.
	///
	/// Only meaningful when [`Value::is_filter`] is true for `self`; the
	/// parser only ever builds a filter out of the five filter variants, so
	/// every other variant reaching here would be an internal bug rather
	/// than a condition a user's program can trigger.
	#[must_use]
	pub fn test_filter(&self, item: &OutlineItem<'a>) -> bool {
		match self {
			Value::FilterTag(tag) => item.tag(tag.tag).is_some(),
			Value::FilterAny => true,
			Value::FilterNot(not) => !not.test.test_filter(item),
			Value::FilterAnd(and) => and.test_a.test_filter(item) && and.test_b.test_filter(item),
			Value::FilterOr(or) => or.test_a.test_filter(item) || or.test_b.test_filter(item),
			_ => unreachable!("test_filter called on a non-filter value"),
		}
	}

	/// A short, human-readable name for this variant, used by the debug
	/// dump and by error messages that need to say what kind of thing was
	/// found in the wrong place.
	#[must_use]
	pub fn kind_name(&self) -> &'static str {
		match self {
			Value::OutlineTag(_) => "outline tag",
			Value::OutlineItem(_) => "outline item",
			Value::Outline(_) => "outline",
			Value::Lookup(_) => "lookup",
			Value::Variable(_) => "variable",
			Value::Macro(_) => "macro",
			Value::MacroCall(_) => "macro call",
			Value::FilterTag(_) | Value::FilterAny | Value::FilterNot(_) | Value::FilterAnd(_) | Value::FilterOr(_) => {
				"filter"
			}
			Value::Map(_) => "map",
			Value::MapLine(_) => "map line",
			Value::For(_) => "for",
			Value::CodeText(_) => "code",
			Value::Keyword(_) => "keyword",
		}
	}
}
