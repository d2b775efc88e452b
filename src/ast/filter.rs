//! Filter expressions: the `!`/`&`/`|` boolean tests run against an outline
//! item's tags.
//!
//! Node shapes follow `original_source/source/ast.c`'s `AstFilterTag`,
//! `AstFilterNot`, `AstFilterAnd`, `AstFilterOr`; `AstFilterAny` has no
//! payload in the original and is represented directly as
//! `Value::FilterAny` rather than as a zero-field struct here.

use crate::value::{StringView, Value};

/// Accepts an outline item if it carries a tag named `tag`.
pub struct FilterTag<'a> {
	pub tag: StringView<'a>,
}

/// Accepts an outline item if `test` rejects it.
pub struct FilterNot<'a> {
	pub test: Value<'a>,
}

/// Accepts an outline item if both `test_a` and `test_b` accept it.
pub struct FilterAnd<'a> {
	pub test_a: Value<'a>,
	pub test_b: Value<'a>,
}

/// Accepts an outline item if either `test_a` or `test_b` accepts it.
pub struct FilterOr<'a> {
	pub test_a: Value<'a>,
	pub test_b: Value<'a>,
}
