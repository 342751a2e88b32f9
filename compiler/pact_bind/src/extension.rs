//! Host-provided native functions.

use std::fmt;
use std::sync::Arc;

use pact_ir::ParamType;
use pact_value::{RuntimeResult, Value};
use rustc_hash::FxHashMap;

type Handler = dyn Fn(&[Value]) -> RuntimeResult<Value> + Send + Sync;

/// A native function: its signature and the Rust closure implementing it.
///
/// Fixed parameters are checked and converted before the handler runs; a
/// variadic native receives any extra arguments unconverted.
pub struct NativeFn {
    pub name: String,
    pub params: Vec<ParamType>,
    pub variadic: bool,
    pub result: Option<ParamType>,
    handler: Box<Handler>,
}

impl NativeFn {
    pub fn new<F>(name: impl Into<String>, params: impl Into<Vec<ParamType>>, handler: F) -> Self
    where
        F: Fn(&[Value]) -> RuntimeResult<Value> + Send + Sync + 'static,
    {
        NativeFn {
            name: name.into(),
            params: params.into(),
            variadic: false,
            result: None,
            handler: Box::new(handler),
        }
    }

    /// Accept any number of arguments after the fixed parameters.
    #[must_use]
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    #[must_use]
    pub fn returns(mut self, ty: ParamType) -> Self {
        self.result = Some(ty);
        self
    }

    pub fn accepts_count(&self, count: usize) -> bool {
        if self.variadic {
            count >= self.params.len()
        } else {
            count == self.params.len()
        }
    }

    /// Run the handler. Arguments must already be converted.
    #[inline]
    pub fn call(&self, args: &[Value]) -> RuntimeResult<Value> {
        (self.handler)(args)
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFn")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("variadic", &self.variadic)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

/// Name to native function mapping, consulted when a call matches no
/// user declaration.
///
/// Filled by the embedder before any compile and read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct ExtensionTable {
    functions: FxHashMap<String, Arc<NativeFn>>,
}

impl ExtensionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a function, replacing any previous one with the same name.
    pub fn insert(&mut self, native: NativeFn) {
        self.functions.insert(native.name.clone(), Arc::new(native));
    }

    pub fn get(&self, name: &str) -> Option<&Arc<NativeFn>> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Extend<NativeFn> for ExtensionTable {
    fn extend<I: IntoIterator<Item = NativeFn>>(&mut self, iter: I) {
        for native in iter {
            self.insert(native);
        }
    }
}
