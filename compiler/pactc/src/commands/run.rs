//! The `run` command: compile a file and call one of its declarations.

use pact_ir::{OwnerInfo, ScopeId};
use pact_value::{Value, ValueMap};

use super::{parse_value, read_file};
use crate::{CallError, Vm, VmConfig};

#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Scope to compile into and call in; the configured default if unset.
    pub scope: Option<u32>,
    /// Host variables as `name=value`.
    pub vars: Vec<(String, String)>,
}

/// Compile `path` and call `entry` with `args`, printing each result.
///
/// Script signals print as their JSON payload; runtime errors print as
/// diagnostics. Both exit with status 1.
pub fn run_file(path: &str, entry: &str, args: &[String], options: &RunOptions) {
    let content = read_file(path);
    let mut config = VmConfig::from_env();
    if let Some(scope) = options.scope {
        config = config.with_default_scope(ScopeId(scope));
    }
    let vm = Vm::with_config(config);

    let owner = OwnerInfo::new(config.default_scope.raw());
    if let Err(err) = vm.compile(&content, owner) {
        eprintln!("{path}: {}", err.to_diagnostic());
        std::process::exit(1);
    }

    let mut env: ValueMap = options
        .vars
        .iter()
        .map(|(name, value)| (name.clone(), parse_value(value)))
        .collect();
    let args: Vec<Value> = args.iter().map(|arg| parse_value(arg)).collect();
    match vm.call(entry, args, &mut env) {
        Ok(values) => {
            for value in values {
                println!("{value}");
            }
        }
        Err(CallError::Script(signal)) => {
            println!("{signal}");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("{}", err.to_diagnostic());
            std::process::exit(1);
        }
    }
}
