//! AST pretty-printer for `-d`/`--debug`.
//!
//! Supplemented from `original_source/source/debug.c`/`dump.c`, which walk
//! the parsed tree and print each node indented under its parent before
//! generation runs. Used only when `-d` is passed; has no effect on
//! generation itself.

use std::io::{self, Write};

use colored::Colorize as _;

use crate::ast::outline::{Outline, OutlineItem};
use crate::list::List;
use crate::value::Value;

/// Prints `code`, one node per line, with children indented two spaces
/// under their parent.
pub fn dump<W: Write>(out: &mut W, code: List<'_, Value<'_>>) -> io::Result<()> {
	for node in code {
		dump_value(out, *node, 0)?;
	}
	Ok(())
}

fn indent<W: Write>(out: &mut W, depth: usize) -> io::Result<()> {
	write!(out, "{}", "  ".repeat(depth))
}

fn dump_value<W: Write>(out: &mut W, value: Value<'_>, depth: usize) -> io::Result<()> {
	indent(out, depth)?;
	match value {
		Value::CodeText(text) => writeln!(out, "{} {:?}", "code".cyan(), text.code),
		Value::Variable(variable) => writeln!(out, "{} {}", "variable".yellow(), variable.name),
		Value::Lookup(lookup) => writeln!(out, "{} !{}", "lookup".yellow(), lookup.name),
		Value::MacroCall(call) => {
			writeln!(out, "{}", "macro call".magenta())?;
			for argument in call.inputs {
				dump_value(out, *argument, depth + 1)?;
			}
			Ok(())
		}
		Value::Map(map) => {
			writeln!(out, "{}", "map".green())?;
			for line in map.lines {
				indent(out, depth + 1)?;
				writeln!(out, "{}", "line".green())?;
				for node in line.code {
					dump_value(out, *node, depth + 2)?;
				}
			}
			Ok(())
		}
		Value::For(for_) => {
			writeln!(out, "{} {}", "for".blue(), for_.item.name)?;
			indent(out, depth + 1)?;
			writeln!(out, "{}", "(body deferred, re-parsed once per iteration)".dimmed())
		}
		Value::Outline(outline) => dump_outline(out, *outline, depth),
		Value::OutlineItem(item) => dump_item(out, item, depth),
		other => writeln!(out, "{}", other.kind_name()),
	}
}

fn dump_outline<W: Write>(out: &mut W, outline: Outline<'_>, depth: usize) -> io::Result<()> {
	writeln!(out, "{}", "outline".bright_blue())?;
	for item in outline.items {
		dump_item(out, item, depth + 1)?;
	}
	Ok(())
}

fn dump_item<W: Write>(out: &mut W, item: &OutlineItem<'_>, depth: usize) -> io::Result<()> {
	indent(out, depth)?;
	write!(out, "{} {}", "item".bright_blue(), item.name)?;
	if item.tags.is_empty() {
		writeln!(out)?;
	} else {
		let names: Vec<&str> = item.tags.iter().map(|tag| tag.name).collect();
		writeln!(out, " ({})", names.join(", "))?;
	}
	for child in item.children.items {
		dump_item(out, child, depth + 1)?;
	}
	Ok(())
}
