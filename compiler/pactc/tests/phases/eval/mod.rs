//! Execution of compiled sources.

mod contracts;
mod functions;
