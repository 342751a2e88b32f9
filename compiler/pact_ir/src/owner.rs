//! Registration owner of a compile unit.

use std::fmt;

/// Identifier of a state/ecosystem namespace.
///
/// Contracts and functions are registered per scope, so two scopes may
/// define the same name independently.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct ScopeId(pub u32);

impl ScopeId {
    /// Scope used when a call names no scope and the environment carries none.
    pub const DEFAULT: ScopeId = ScopeId(1);

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Owner of a compile unit: where its declarations are registered and
/// whether its contracts may be invoked.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct OwnerInfo {
    pub scope: ScopeId,
    pub table_id: u64,
    pub active: bool,
}

impl OwnerInfo {
    /// Active owner in `scope` with table id 0.
    pub const fn new(scope: u32) -> Self {
        OwnerInfo {
            scope: ScopeId(scope),
            table_id: 0,
            active: true,
        }
    }

    #[must_use]
    pub const fn with_table(mut self, table_id: u64) -> Self {
        self.table_id = table_id;
        self
    }

    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

impl Default for OwnerInfo {
    fn default() -> Self {
        OwnerInfo::new(ScopeId::DEFAULT.0)
    }
}
