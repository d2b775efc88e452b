//! Top-level pipeline orchestration: read the input file, run the parser
//! and generator, write the output file.
//!
//! Grounded in `original_source/source/main.c`/`options.c`'s `main`: open
//! the input, install the keyword scope, parse, generate, write, and free
//! everything unconditionally on the way out. The arena's `Drop` impl gives
//! us that last part structurally instead of the original's `goto error`
//! that still runs `pool_free`.

use std::fs;
use std::rc::Rc;

use anyhow::Result;

use crate::arena::Arena;
use crate::cli::Args;
use crate::error::path_error;
use crate::generator::Generator;
use crate::parser::{root_scope, Parser};

/// Side-channel carrying whether `-d` was passed, threaded through the
/// pipeline instead of routing debug output through a global logger.
pub struct Diagnostics {
	pub debug: bool,
}

impl Diagnostics {
	#[must_use]
	pub fn from_args(args: &Args) -> Self {
		Self { debug: args.debug }
	}
}

/// Runs one invocation end to end: reads `args.input`, expands it, and
/// writes the result to the resolved output path.
pub fn run(args: &Args) -> Result<()> {
	let diagnostics = Diagnostics::from_args(args);
	let output_path = args.output_path()?;
	let input_display = args.input.to_string_lossy().into_owned();

	let source = fs::read_to_string(&args.input).map_err(|err| path_error(&input_display, err))?;

	let arena = Arena::new();
	let file: Rc<str> = Rc::from(input_display.as_str());
	let source: &str = arena.alloc_str(&source);

	let scope = root_scope(&arena);
	let parser = Parser::new(&arena, Rc::clone(&file), source);
	let mut cursor = 0;
	let program = parser.parse_code(&mut cursor, &scope)?;

	if diagnostics.debug {
		crate::debug::dump(&mut std::io::stderr(), program).map_err(|err| path_error(&input_display, err))?;
	}

	let mut output = Vec::new();
	let generator = Generator::new(&arena);
	generator.generate_code(&mut output, program)?;

	fs::write(&output_path, output).map_err(|err| path_error(&output_path.to_string_lossy(), err))?;
	Ok(())
}

/// Runs the pipeline over in-memory source text instead of a filesystem
/// path, returning the generated output. Exists for integration tests that
/// exercise the whole pipeline without touching disk; `run` above is what
/// the binary actually calls.
pub fn run_str(file_name: &str, source: &str) -> Result<String> {
	let arena = Arena::new();
	let file: Rc<str> = Rc::from(file_name);
	let source: &str = arena.alloc_str(source);

	let scope = root_scope(&arena);
	let parser = Parser::new(&arena, Rc::clone(&file), source);
	let mut cursor = 0;
	let program = parser.parse_code(&mut cursor, &scope)?;

	let mut output = Vec::new();
	let generator = Generator::new(&arena);
	generator.generate_code(&mut output, program)?;

	Ok(String::from_utf8_lossy(&output).into_owned())
}
