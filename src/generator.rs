//! Code generation: walks a parsed program and writes host-language output.
//!
//! Grounded in `original_source/source/generate.c`. The original dispatches
//! on an `AstCodeNode`'s type tag with an `if`/`else if` chain ending in
//! `assert(0)`; here that's a `match` over [`Value`], which the compiler
//! checks for exhaustiveness.
//!
//! `macro` and `for` bodies are captured as raw, unparsed [`CodeSpan`]s (see
//! `value.rs`), so generating one means parsing it now, once per `for`
//! iteration or once per macro call, against the scope captured when it was
//! defined, after binding that scope's `Variable`s to this call's or this
//! iteration's values. This mirrors `generate_for`/`generate_macro_call`
//! mutating `p->item->value` between iterations/calls and re-running
//! generation against the same body.

use std::io::Write;
use std::rc::Rc;

use anyhow::{bail, Result};

use crate::arena::Arena;
use crate::ast::control::{For, Map};
use crate::ast::macro_def::MacroCall;
use crate::ast::outline::{Outline, OutlineItem};
use crate::ast::variable::{Lookup, Variable};
use crate::builtin;
use crate::list::List;
use crate::parser::Parser;
use crate::scope::Scope;
use crate::value::{CodeSpan, Value};

/// Walks parsed `Value` trees, writing the host-language text they denote.
pub struct Generator<'a> {
	arena: &'a Arena,
}

impl<'a> Generator<'a> {
	#[must_use]
	pub fn new(arena: &'a Arena) -> Self {
		Self { arena }
	}

	/// Generates a full run of code: a sequence of text, lookups, variable
	/// references, macro calls, and control constructs, in order.
	pub fn generate_code<W: Write>(&self, out: &mut W, code: List<'a, Value<'a>>) -> Result<()> {
		for node in code {
			self.generate_code_node(out, *node)?;
		}
		Ok(())
	}

	fn generate_code_node<W: Write>(&self, out: &mut W, node: Value<'a>) -> Result<()> {
		match node {
			Value::CodeText(text) => {
				out.write_all(text.code.as_bytes())?;
				Ok(())
			}
			Value::Map(map) => self.generate_map(out, map),
			Value::For(for_) => self.generate_for(out, for_),
			Value::MacroCall(call) => self.generate_macro_call(out, call),
			Value::Variable(variable) => self.generate_variable(out, variable),
			Value::Lookup(lookup) => self.generate_lookup(out, lookup),
			other => bail!("cannot generate a {} directly", other.kind_name()),
		}
	}

	/// Generates the body of the first line in `map` whose filter accepts
	/// the item `map.item` is (possibly indirectly, through a bound
	/// `Variable`) resolved to.
	fn generate_map<W: Write>(&self, out: &mut W, map: &'a Map<'a>) -> Result<()> {
		let item = resolve_item(map.item)?;
		for line in map.lines {
			if line.filter.test_filter(item) {
				return self.generate_code(out, line.code);
			}
		}
		bail!("could not match item \"{}\" against map", item.name)
	}

	/// Generates one run of `for`'s body per matching item in its outline,
	/// rebinding `for.item` before each run.
	fn generate_for<W: Write>(&self, out: &mut W, for_: &'a For<'a>) -> Result<()> {
		let outline = resolve_outline(for_.outline)?;
		let items: Vec<&'a OutlineItem<'a>> = outline.items.iter().copied().collect();

		let mut need_comma = false;
		let mut run = |item: &'a OutlineItem<'a>| -> Result<()> {
			if !for_.filter.test_filter(item) {
				return Ok(());
			}
			for_.item.set(Value::OutlineItem(item));
			if for_.list && need_comma {
				out.write_all(b",")?;
			}
			self.generate_span(out, &for_.code, for_.scope)?;
			need_comma = true;
			Ok(())
		};

		if for_.reverse {
			for item in items.into_iter().rev() {
				run(item)?;
			}
		} else {
			for item in items {
				run(item)?;
			}
		}
		Ok(())
	}

	/// Binds each of `call.macro_def`'s input variables to the
	/// corresponding actual argument, then generates the macro's body.
	fn generate_macro_call<W: Write>(&self, out: &mut W, call: &'a MacroCall<'a>) -> Result<()> {
		for (input, argument) in call.macro_def.inputs.iter().zip(call.inputs.iter()) {
			self.bind_macro_input(*input, *argument);
		}
		self.generate_span(out, &call.macro_def.code, call.macro_def.scope)
	}

	/// Binds one macro input variable to the value an actual argument
	/// resolved to at the call site: a bound variable forwards whatever
	/// it's currently bound to, and a bare outline is wrapped in a
	/// synthetic item (named after the input) so the body can `for`-loop
	/// over it.
	fn bind_macro_input(&self, input: &'a Variable<'a>, argument: Value<'a>) {
		match argument {
			Value::Variable(passed) => {
				if let Some(bound) = passed.get() {
					input.set(bound);
				}
			}
			Value::Outline(outline) => {
				let item = self.arena.alloc(OutlineItem { tags: List::empty(), name: input.name, children: *outline });
				input.set(Value::OutlineItem(item));
			}
			other => input.set(other),
		}
	}

	fn generate_variable<W: Write>(&self, out: &mut W, variable: &'a Variable<'a>) -> Result<()> {
		let item = resolve_item(Value::Variable(variable))?;
		out.write_all(item.name.as_bytes())?;
		Ok(())
	}

	/// Generates a `name!tag` lookup: the first non-empty tag named `tag`
	/// on the item `name` resolves to, or (failing that) one of the
	/// built-in transforms applied to the item's own name.
	fn generate_lookup<W: Write>(&self, out: &mut W, lookup: &'a Lookup<'a>) -> Result<()> {
		let item = resolve_item(lookup.item)?;

		for tag in item.tags {
			if tag.name == lookup.name && !tag.is_bare() {
				return self.generate_code(out, tag.value);
			}
		}

		if let Some(replaced) = builtin::apply(lookup.name, item.name) {
			out.write_all(replaced.as_bytes())?;
			return Ok(());
		}

		bail!("could not find a transform named {}", lookup.name)
	}

	/// Re-parses a captured `macro`/`for` body against `scope` and
	/// generates the result. Called once per invocation, after the
	/// relevant `Variable`s in `scope` have been (re)bound.
	fn generate_span<W: Write>(&self, out: &mut W, span: &CodeSpan<'a>, scope: &'a Scope<'a>) -> Result<()> {
		let file = Rc::clone(&span.location.file);
		let parser = Parser::new(self.arena, file, span.text);
		let mut cursor = 0;
		let code = parser.parse_code(&mut cursor, scope)?;
		self.generate_code(out, code)
	}
}

/// Resolves a value that should denote a single outline item: either the
/// item itself, or a `Variable` (chasing through any number of indirect
/// bindings) bound to one.
fn resolve_item<'a>(value: Value<'a>) -> Result<&'a OutlineItem<'a>> {
	match value {
		Value::OutlineItem(item) => Ok(item),
		Value::Variable(variable) => {
			let bound = variable
				.get()
				.ok_or_else(|| anyhow::anyhow!("variable \"{}\" has no value bound", variable.name))?;
			resolve_item(bound)
		}
		other => bail!("expected an outline item, found a {}", other.kind_name()),
	}
}

/// Resolves a value that should denote a sequence of outline items for a
/// `for` loop to walk: an outline directly, or a `Variable`/item whose
/// children are that outline.
fn resolve_outline<'a>(value: Value<'a>) -> Result<Outline<'a>> {
	match value {
		Value::Outline(outline) => Ok(*outline),
		Value::OutlineItem(item) => Ok(item.children),
		Value::Variable(variable) => {
			let bound = variable
				.get()
				.ok_or_else(|| anyhow::anyhow!("variable \"{}\" has no value bound", variable.name))?;
			resolve_outline(bound)
		}
		other => bail!("expected an outline, found a {}", other.kind_name()),
	}
}
