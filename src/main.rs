//! outline2c: expands outline2c directives embedded in a host-language
//! source file.

use std::process::ExitCode;

use clap::Parser as _;
use colored::Colorize as _;
use outline2c::cli::Args;
use outline2c::driver;

fn main() -> ExitCode {
	let args = Args::parse();
	match driver::run(&args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(error) => {
			print_error(&error);
			ExitCode::FAILURE
		}
	}
}

/// Prints an error to stderr, bolding and reddening the `error:` label,
/// without disturbing the `path:line:col: error: message` text itself
/// (tests that assert on that text run against the plain `Display` output,
/// never through this function).
fn print_error(error: &anyhow::Error) {
	let rendered = error.to_string();
	match rendered.find("error:") {
		Some(at) => {
			let (prefix, rest) = rendered.split_at(at);
			let message = &rest["error:".len()..];
			eprintln!("{prefix}{}{message}", "error:".bold().red());
		}
		None => eprintln!("{} {rendered}", "error:".bold().red()),
	}
}
