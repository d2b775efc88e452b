//! Source locations and error reporting.
//!
//! The original tracks a `Cursor`'s line/column as it scans
//! (`original_source/source/lex.c`). Here the lexer hands back byte offsets
//! into the source buffer, and [`Location::scan`] turns an offset into a
//! 1-based line/column pair on demand, which keeps the lexer itself free of
//! bookkeeping and lets deferred-reparse sites (`macro`/`for` bodies) carry
//! a `Location` alongside the raw text they captured.

use std::fmt;
use std::rc::Rc;

/// A 1-based line/column position within a named source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
	pub file: Rc<str>,
	pub line: usize,
	pub column: usize,
}

impl Location {
	/// Scans `source` up to `offset`, counting newlines, to produce the
	/// line/column of that byte offset.
	#[must_use]
	pub fn scan(file: &Rc<str>, source: &str, offset: usize) -> Self {
		let mut line = 1;
		let mut column = 1;
		for ch in source[..offset.min(source.len())].chars() {
			if ch == '\n' {
				line += 1;
				column = 1;
			} else {
				column += 1;
			}
		}
		Self { file: Rc::clone(file), line, column }
	}
}

impl fmt::Display for Location {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}:{}", self.file, self.line, self.column)
	}
}

/// Builds an `anyhow::Error` carrying a `path:line:col: error: message`
/// formatted message, the shape the driver prints verbatim.
#[must_use]
pub fn source_error(location: &Location, message: impl fmt::Display) -> anyhow::Error {
	anyhow::anyhow!("{location}: error: {message}")
}

/// Attaches a [`Location`] to an error that does not already carry source
/// position information, such as an I/O failure bubbling up from opening an
/// included file.
pub trait WithLocation<T> {
	/// Wraps the error (if any) as `path:line:col: error: <original error>`.
	fn with_location(self, location: &Location) -> anyhow::Result<T>;
}

impl<T, E> WithLocation<T> for Result<T, E>
where
	E: fmt::Display,
{
	fn with_location(self, location: &Location) -> anyhow::Result<T> {
		self.map_err(|err| source_error(location, err))
	}
}

/// Formats an error that has no associated source location, such as a
/// failure to open the top-level input file.
#[must_use]
pub fn path_error(path: &str, message: impl fmt::Display) -> anyhow::Error {
	anyhow::anyhow!("{path}: error: {message}")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn scans_line_and_column() {
		let file: Rc<str> = Rc::from("in.ol");
		let source = "abc\ndef\nghi";
		let loc = Location::scan(&file, source, 5);
		assert_eq!(loc.line, 2);
		assert_eq!(loc.column, 2);
	}

	#[test]
	fn formats_as_path_line_col() {
		let file: Rc<str> = Rc::from("in.ol");
		let loc = Location { file, line: 3, column: 7 };
		assert_eq!(loc.to_string(), "in.ol:3:7");
	}
}
