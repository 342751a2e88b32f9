//! Pact Eval - interpreter for bound contracts and functions.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Interpreter`: one top-level call over a [`pact_bind::Snapshot`] of the registry
//! - `Environment`: locals of the running body, a scope stack of typed bindings
//! - `Frames`: `$` variables and the `$parent` chain of active contract calls
//! - `evaluate_binary`: binary operators dispatched on the operand pair
//!
//! A call ends with values, a [`ScriptError`] raised by an `error`,
//! `warning` or `info` statement, or a [`pact_value::RuntimeError`].

mod environment;
mod errors;
mod frames;
pub mod interpreter;
mod operators;

pub use environment::Environment;
pub use errors::{CallError, EvalResult, ScriptError, ScriptErrorKind};
pub use interpreter::{Interpreter, Values, DEFAULT_MAX_DEPTH};
pub use operators::{evaluate_binary, evaluate_unary};
