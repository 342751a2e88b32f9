//! Command handlers for the `pact` CLI.
//!
//! Each submodule implements one command. Shared utilities like
//! `read_file` live here in the module root.

use pact_value::{parse_number, Value};

mod check;
mod debug;
mod list;
mod run;

pub use check::check_file;
pub use debug::{lex_file, parse_file};
pub use list::list_file;
pub use run::{run_file, RunOptions};

/// Read a source file, exiting with a message if it cannot be read.
pub(super) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// A command-line argument as a call argument: numbers stay numbers,
/// anything else is a string.
pub fn parse_value(arg: &str) -> Value {
    match parse_number(arg) {
        Some(number) => number.into_value(),
        None => Value::string(arg),
    }
}
