//! Local variables of one function body or contract section.
//!
//! Uses a scope stack: each block pushes a scope and pops it on exit. Every
//! binding remembers its declared type, and assignment converts values to
//! that type.

use pact_ir::ParamType;
use pact_value::{RuntimeError, RuntimeErrorKind, RuntimeResult, Value};
use rustc_hash::FxHashMap;

#[derive(Clone, Debug)]
struct Binding {
    value: Value,
    ty: ParamType,
}

#[derive(Clone, Debug)]
pub struct Environment {
    /// Innermost scope last.
    scopes: Vec<FxHashMap<String, Binding>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            scopes: vec![FxHashMap::default()],
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    #[inline]
    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Pop the innermost scope. The outermost scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Define `name` in the innermost scope, shadowing outer bindings.
    pub fn define(&mut self, name: &str, value: Value, ty: ParamType) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), Binding { value, ty });
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.binding(name).map(|binding| &binding.value)
    }

    /// Mutable access for writes through an index path. The caller is
    /// responsible for keeping the declared type.
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.binding_mut(name).map(|binding| &mut binding.value)
    }

    pub fn declared_type(&self, name: &str) -> Option<ParamType> {
        self.binding(name).map(|binding| binding.ty)
    }

    /// Assign to the nearest binding of `name`, converting to its type.
    pub fn assign(&mut self, name: &str, value: Value) -> RuntimeResult<()> {
        let binding = self.binding_mut(name).ok_or_else(|| {
            RuntimeError::new(RuntimeErrorKind::UnknownIdentifier {
                name: name.to_string(),
            })
        })?;
        binding.value = value.convert_to(binding.ty)?;
        Ok(())
    }

    fn binding(&self, name: &str) -> Option<&Binding> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    fn binding_mut(&mut self, name: &str) -> Option<&mut Binding> {
        self.scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.get_mut(name))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
