//! outline2c: a source-to-source preprocessor that expands outline2c
//! directives embedded in host-language source files.
//!
//! Ten-stage pipeline: read the input file, lex it, parse it into a tree of
//! [`value::Value`] nodes backed by an arena-owned [`scope::Scope`] chain,
//! generate host-language output by walking that tree, and write the
//! result. See [`driver::run`] for the entry point the binary calls, and
//! [`driver::run_str`] for the in-memory variant integration tests drive.

pub mod arena;
pub mod ast;
pub mod builtin;
pub mod cli;
pub mod debug;
pub mod driver;
pub mod error;
pub mod generator;
pub mod lexer;
pub mod list;
pub mod parser;
pub mod scope;
pub mod value;
