//! Command-line argument parsing.
//!
//! outline2c only ever does one thing end to end, so this is a flat
//! `#[derive(clap::Parser)]` struct rather than the subcommand dispatch a
//! multi-command CLI would reach for.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

/// `outline2c [-d|--debug] [-o <output>] <input>`
#[derive(Parser)]
#[command(name = "outline2c", about = "Expands outline2c directives embedded in a host-language source file.")]
pub struct Args {
	/// The input file to preprocess.
	pub input: PathBuf,

	/// Where to write the expanded output. Defaults to `input` with its
	/// trailing `.ol` extension stripped.
	#[arg(short = 'o', long = "output")]
	pub output: Option<PathBuf>,

	/// Pretty-print the parsed AST to stderr before generating output.
	#[arg(short = 'd', long = "debug")]
	pub debug: bool,
}

impl Args {
	/// Resolves the path to write output to: the explicit `-o`/`-oFOO`
	/// value if one was given, otherwise `input` with its `.ol` suffix
	/// stripped. Fails if neither applies.
	pub fn output_path(&self) -> Result<PathBuf> {
		if let Some(output) = &self.output {
			return Ok(output.clone());
		}
		let Some(stripped) = self.input.to_string_lossy().strip_suffix(".ol").map(String::from) else {
			bail!("an output path is required with -o unless the input file name ends in \".ol\"");
		};
		Ok(PathBuf::from(stripped))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn strips_ol_suffix_when_no_output_given() {
		let args = Args { input: PathBuf::from("widgets.ol"), output: None, debug: false };
		assert_eq!(args.output_path().unwrap(), PathBuf::from("widgets"));
	}

	#[test]
	fn explicit_output_wins_over_suffix_stripping() {
		let args = Args { input: PathBuf::from("widgets.ol"), output: Some(PathBuf::from("out.c")), debug: false };
		assert_eq!(args.output_path().unwrap(), PathBuf::from("out.c"));
	}

	#[test]
	fn missing_ol_suffix_without_output_is_an_error() {
		let args = Args { input: PathBuf::from("widgets.txt"), output: None, debug: false };
		assert!(args.output_path().is_err());
	}
}
