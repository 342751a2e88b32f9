//! Pactc - the Pact contract engine as one embeddable unit.
//!
//! [`Vm`] ties the phases together: `compile` lexes, parses and binds a
//! compile unit into the shared registry, and `call` runs a registered
//! function or contract against a host environment. The `pact` binary in
//! this crate is a thin command-line driver over the same API.
//!
//! ```text
//! source ──tokenize──▶ tokens ──parse──▶ Module ──bind──▶ Registry
//!                                                            │
//!            host env + args ──▶ Vm::call ──▶ Interpreter ◀──┘
//! ```

pub mod commands;
mod config;
pub mod host;
mod vm;

use std::sync::Once;

pub use config::VmConfig;
pub use vm::{CompileError, Vm};

pub use pact_bind::{ExtensionTable, NativeFn};
pub use pact_eval::{CallError, ScriptError, ScriptErrorKind};
pub use pact_ir::{OwnerInfo, ParamType, ScopeId};
pub use pact_value::{RuntimeError, RuntimeErrorKind, Value, ValueMap};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Nothing is installed unless `RUST_LOG` is
/// set, e.g. `RUST_LOG=pact_eval=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
