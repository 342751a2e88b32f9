//! The `check` command: compile a file without running it.

use pact_ir::OwnerInfo;

use super::read_file;
use crate::Vm;

/// Compile `path` into `scope` and report the result.
pub fn check_file(path: &str, scope: u32) {
    let content = read_file(path);
    let vm = Vm::new();
    match vm.compile(&content, OwnerInfo::new(scope)) {
        Ok(count) => println!("{path}: ok, {count} declarations"),
        Err(err) => {
            eprintln!("{path}: {}", err.to_diagnostic());
            std::process::exit(1);
        }
    }
}
