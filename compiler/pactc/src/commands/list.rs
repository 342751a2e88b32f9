//! The `list` command: declared names without compiling.

use super::read_file;
use crate::Vm;

pub fn list_file(path: &str) {
    let content = read_file(path);
    for name in Vm::contracts_list(&content) {
        println!("{name}");
    }
}
