//! Process-wide registry of bound declarations.
//!
//! Declarations are keyed by `(scope, name)`; contracts and top-level
//! functions share one namespace per scope. The registry publishes
//! immutable [`Snapshot`]s: a call takes one at entry and resolves every
//! callee against it, so it runs entirely on the declarations that were
//! registered when it started. A compile holds an upgradable read for the
//! whole binding pass (other compiles wait, calls continue), builds the
//! next snapshot copy-on-write and takes the write lock only to swap it in.

use std::sync::Arc;

use pact_ir::ScopeId;
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use rustc_hash::FxHashMap;

use crate::ir::{Contract, Func, Object};

type ScopeTable = FxHashMap<String, Object>;
type Scopes = FxHashMap<ScopeId, Arc<ScopeTable>>;

#[derive(Debug, Default)]
pub struct Registry {
    current: RwLock<Snapshot>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The declarations registered right now.
    pub fn snapshot(&self) -> Snapshot {
        self.current.read().clone()
    }

    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<Object> {
        self.snapshot().lookup(scope, name)
    }

    /// A top-level function, or a contract's nested function.
    pub fn func(&self, scope: ScopeId, contract: Option<&str>, name: &str) -> Option<Arc<Func>> {
        self.snapshot().func(scope, contract, name)
    }

    pub fn contract(&self, scope: ScopeId, name: &str) -> Option<Arc<Contract>> {
        self.snapshot().contract(scope, name)
    }

    /// Names registered in `scope`, sorted.
    pub fn names(&self, scope: ScopeId) -> Vec<String> {
        self.snapshot().names(scope)
    }

    /// Bind a compile unit against the current contents and publish its
    /// declarations into `scope`, replacing same-named ones.
    ///
    /// Nothing is published when `build` fails. Returns the number of
    /// declarations published.
    pub fn update<E>(
        &self,
        scope: ScopeId,
        build: impl FnOnce(RegistryView<'_>) -> Result<Vec<Object>, E>,
    ) -> Result<usize, E> {
        let guard = self.current.upgradable_read();
        let objects = build(RegistryView {
            scopes: &guard.scopes,
        })?;
        let count = objects.len();

        let mut scopes = Scopes::clone(&guard.scopes);
        let table = Arc::make_mut(scopes.entry(scope).or_default());
        for object in objects {
            table.insert(object.name().to_string(), object);
        }
        let mut guard = RwLockUpgradableReadGuard::upgrade(guard);
        *guard = Snapshot {
            scopes: Arc::new(scopes),
        };
        tracing::debug!(%scope, count, "registered declarations");
        Ok(count)
    }
}

/// Every scope's declarations at one moment. Cheap to clone; never changes.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    scopes: Arc<Scopes>,
}

impl Snapshot {
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<Object> {
        self.scopes.get(&scope)?.get(name).cloned()
    }

    /// A top-level function, or a contract's nested function.
    pub fn func(&self, scope: ScopeId, contract: Option<&str>, name: &str) -> Option<Arc<Func>> {
        let table = self.scopes.get(&scope)?;
        match (contract, table.get(contract.unwrap_or(name))?) {
            (None, Object::Func(func)) => Some(Arc::clone(func)),
            (Some(_), Object::Contract(c)) => c.func(name).cloned(),
            _ => None,
        }
    }

    pub fn contract(&self, scope: ScopeId, name: &str) -> Option<Arc<Contract>> {
        match self.lookup(scope, name)? {
            Object::Contract(contract) => Some(contract),
            Object::Func(_) => None,
        }
    }

    /// Names registered in `scope`, sorted.
    pub fn names(&self, scope: ScopeId) -> Vec<String> {
        let mut names: Vec<String> = self
            .scopes
            .get(&scope)
            .map(|table| table.keys().cloned().collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }
}

/// Read access to the registry while a compile unit is being bound.
#[derive(Copy, Clone)]
pub struct RegistryView<'a> {
    scopes: &'a Scopes,
}

impl<'a> RegistryView<'a> {
    pub fn lookup(self, scope: ScopeId, name: &str) -> Option<&'a Object> {
        self.scopes.get(&scope)?.get(name)
    }
}

/// Split a `@<scope>` prefix off a name: `@22sets` is `(Some(22), "sets")`.
///
/// Names without a well-formed prefix come back unchanged.
pub fn split_scope(name: &str) -> (Option<ScopeId>, &str) {
    let Some(rest) = name.strip_prefix('@') else {
        return (None, name);
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || digits == rest.len() {
        return (None, name);
    }
    match rest[..digits].parse::<u32>() {
        Ok(scope) => (Some(ScopeId(scope)), &rest[digits..]),
        Err(_) => (None, name),
    }
}
