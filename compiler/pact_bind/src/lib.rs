//! Binding for Pact compile units.
//!
//! The binder walks a parsed [`pact_ir::Module`] and lowers it into the
//! executable tree of [`ir`]: every call site is resolved to a
//! [`CallTarget`], argument counts and statically known argument types are
//! checked against the callee's signature, and chained `.Name(..)` segments
//! are split into declared tail sections and pipeline calls.
//!
//! Bound declarations live in the shared [`Registry`], keyed by scope and
//! name. A compile unit is registered all-or-nothing: if any declaration
//! fails to bind, the registry is left untouched, and a call sees either
//! none or all of a unit's declarations.

mod binder;
mod error;
mod extension;
pub mod ir;
mod registry;

pub use binder::bind_module;
pub use error::{BindError, BindErrorKind};
pub use extension::{ExtensionTable, NativeFn};
pub use ir::{CallTarget, Contract, Func, Intrinsic, Object};
pub use registry::{split_scope, Registry, RegistryView, Snapshot};

#[cfg(test)]
mod tests;
