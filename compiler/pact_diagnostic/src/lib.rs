//! Diagnostics for the Pact toolchain.
//!
//! Every error produced by the lexer, parser, binder and VM carries an
//! [`ErrorCode`]. Front ends (the `pact` CLI, embedders) turn errors into a
//! [`Diagnostic`] for uniform rendering.

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
