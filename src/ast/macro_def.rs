//! Macro definitions and invocations.
//!
//! Shapes follow `original_source/source/ast.c`'s `AstMacro`/`AstMacroCall`.
//! A macro's body is kept as an unparsed [`CodeSpan`], re-parsed once per
//! call against `scope` (a frame nested under the definition scope, holding
//! one [`Variable`] per input), matching
//! `original_source/source/generate.c`'s `generate_macro_call`, which binds
//! each input variable's value before re-generating the body. Unlike the
//! original's `self->inputs` (a list of bare input-name text), `inputs`
//! here holds the input `Variable`s directly, so a call can bind them
//! without a second scope lookup.

use crate::ast::variable::Variable;
use crate::list::List;
use crate::scope::Scope;
use crate::value::{CodeSpan, Value};

/// A `macro name(inputs) { body }` definition.
pub struct Macro<'a> {
	pub inputs: List<'a, &'a Variable<'a>>,
	pub scope: &'a Scope<'a>,
	pub code: CodeSpan<'a>,
}

/// A call to a previously defined macro with its actual inputs.
pub struct MacroCall<'a> {
	pub macro_def: &'a Macro<'a>,
	pub inputs: List<'a, Value<'a>>,
}
