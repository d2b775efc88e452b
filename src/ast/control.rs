//! Control constructs: `map`, `for`, and plain host-language text runs.
//!
//! Shapes follow `original_source/source/ast.c`'s `AstMap`, `AstMapLine`,
//! `AstFor`, and `AstCodeText`.

use crate::ast::variable::Variable;
use crate::list::List;
use crate::scope::Scope;
use crate::value::{CodeSpan, StringView, Value};

/// A literal run of host-language text, copied to the output unchanged.
pub struct CodeText<'a> {
	pub code: StringView<'a>,
}

/// One `filter => { code }` arm of a `map` statement.
pub struct MapLine<'a> {
	pub filter: Value<'a>,
	pub code: List<'a, Value<'a>>,
}

/// A `map item { lines }` statement: generates the body of the first line
/// whose filter accepts `item`.
pub struct Map<'a> {
	pub item: Value<'a>,
	pub lines: List<'a, &'a MapLine<'a>>,
}

/// A `for item in outline { body }` statement.
pub struct For<'a> {
	pub item: &'a Variable<'a>,
	pub outline: Value<'a>,
	pub filter: Value<'a>,
	pub reverse: bool,
	pub list: bool,
	pub scope: &'a Scope<'a>,
	pub code: CodeSpan<'a>,
}
