//! VM configuration.

use pact_eval::DEFAULT_MAX_DEPTH;
use pact_ir::ScopeId;

/// Environment variable overriding [`VmConfig::max_call_depth`].
pub const MAX_CALL_DEPTH_VAR: &str = "PACT_MAX_CALL_DEPTH";
/// Environment variable overriding [`VmConfig::default_scope`].
pub const DEFAULT_SCOPE_VAR: &str = "PACT_DEFAULT_SCOPE";

/// Settings of a [`crate::Vm`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VmConfig {
    /// Nesting limit for function and contract calls within one `call`.
    pub max_call_depth: usize,
    /// Scope of a call whose name has no `@N` prefix and whose environment
    /// has no `rt_state`.
    pub default_scope: ScopeId,
}

impl Default for VmConfig {
    fn default() -> Self {
        VmConfig {
            max_call_depth: DEFAULT_MAX_DEPTH,
            default_scope: ScopeId::DEFAULT,
        }
    }
}

impl VmConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    #[must_use]
    pub fn with_default_scope(mut self, scope: ScopeId) -> Self {
        self.default_scope = scope;
        self
    }

    /// Defaults overridden by `PACT_MAX_CALL_DEPTH` and `PACT_DEFAULT_SCOPE`.
    ///
    /// Unparsable values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = VmConfig::default();
        if let Some(depth) = parse_var(&var, MAX_CALL_DEPTH_VAR) {
            config.max_call_depth = depth;
        }
        if let Some(scope) = parse_var(&var, DEFAULT_SCOPE_VAR) {
            config.default_scope = ScopeId(scope);
        }
        config
    }
}

fn parse_var<T: std::str::FromStr>(var: impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = var(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring invalid configuration value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn vars(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_string())
        }
    }

    #[test]
    fn test_defaults() {
        let config = VmConfig::default();
        assert_eq!(config.max_call_depth, 1000);
        assert_eq!(config.default_scope, ScopeId(1));
    }

    #[test]
    fn test_builders() {
        let config = VmConfig::new()
            .with_max_call_depth(16)
            .with_default_scope(ScopeId(22));
        assert_eq!(config.max_call_depth, 16);
        assert_eq!(config.default_scope, ScopeId(22));
    }

    #[test]
    fn test_from_vars() {
        let config = VmConfig::from_vars(vars(&[
            ("PACT_MAX_CALL_DEPTH", "64"),
            ("PACT_DEFAULT_SCOPE", " 7 "),
        ]));
        assert_eq!(
            config,
            VmConfig {
                max_call_depth: 64,
                default_scope: ScopeId(7),
            }
        );
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = VmConfig::from_vars(vars(&[
            ("PACT_MAX_CALL_DEPTH", "deep"),
            ("PACT_DEFAULT_SCOPE", "-1"),
        ]));
        assert_eq!(config, VmConfig::default());
    }
}
