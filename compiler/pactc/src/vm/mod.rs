//! The VM facade: compile units in, calls out.

use std::panic::{self, AssertUnwindSafe};

use pact_bind::{
    bind_module, split_scope, BindError, ExtensionTable, NativeFn, Object, Registry, Snapshot,
};
use pact_diagnostic::{Diagnostic, ErrorCode};
use pact_eval::{CallError, Interpreter};
use pact_ir::{OwnerInfo, Position, ScopeId};
use pact_lexer::LexError;
use pact_parse::ParseError;
use pact_value::{RuntimeError, RuntimeErrorKind, Value, ValueMap};

use crate::host::standard_extensions;
use crate::VmConfig;

/// Environment key naming the scope of a call.
const STATE_KEY: &str = "rt_state";

/// Why a compile unit was rejected. The registry is unchanged.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Bind(#[from] BindError),
}

impl CompileError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CompileError::Lex(err) => err.code(),
            CompileError::Parse(err) => err.code,
            CompileError::Bind(err) => err.code(),
        }
    }

    pub fn position(&self) -> Position {
        match self {
            CompileError::Lex(err) => err.span.position(),
            CompileError::Parse(err) => err.span.position(),
            CompileError::Bind(err) => err.position(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let message = match self {
            CompileError::Lex(err) => err.kind.to_string(),
            CompileError::Parse(err) => err.message.clone(),
            CompileError::Bind(err) => err.kind.to_string(),
        };
        Diagnostic::error(self.code(), message).at(self.position())
    }
}

/// A contract engine: the registry of compiled declarations and the host
/// functions they may call.
///
/// Populate the extension table with [`Vm::extend`] before sharing the VM.
/// Afterwards `compile` and `call` take `&self` and may run from many
/// threads at once.
#[derive(Debug)]
pub struct Vm {
    registry: Registry,
    extensions: ExtensionTable,
    config: VmConfig,
}

impl Default for Vm {
    fn default() -> Self {
        Vm::new()
    }
}

impl Vm {
    /// VM with the standard host functions and default configuration.
    pub fn new() -> Self {
        Vm::with_config(VmConfig::default())
    }

    pub fn with_config(config: VmConfig) -> Self {
        Vm {
            registry: Registry::new(),
            extensions: standard_extensions(),
            config,
        }
    }

    /// VM with no host functions at all.
    pub fn bare(config: VmConfig) -> Self {
        Vm {
            registry: Registry::new(),
            extensions: ExtensionTable::new(),
            config,
        }
    }

    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    pub fn extensions(&self) -> &ExtensionTable {
        &self.extensions
    }

    /// Register a host function, replacing one of the same name.
    pub fn extend(&mut self, native: NativeFn) {
        self.extensions.insert(native);
    }

    /// Compile `source` and register its declarations under `owner`,
    /// replacing same-named ones in that scope.
    ///
    /// Returns the number of declarations registered.
    #[tracing::instrument(level = "debug", skip_all, fields(scope = %owner.scope, len = source.len()))]
    pub fn compile(&self, source: &str, owner: OwnerInfo) -> Result<usize, CompileError> {
        let tokens = pact_lexer::tokenize(source)?;
        let module = pact_parse::parse(&tokens)?;
        let count = self.registry.update(owner.scope, |view| {
            bind_module(&module, owner, view, &self.extensions)
        })?;
        Ok(count)
    }

    /// Call a function or contract by name.
    ///
    /// `name` is `func`, `Contract`, or `Contract.func`, optionally prefixed
    /// by `@N` to pick the scope. Without a prefix the scope is taken from
    /// `env["rt_state"]`, then from the configured default.
    ///
    /// The whole call runs against the declarations registered when it
    /// starts; a compile finishing meanwhile is seen by later calls only.
    ///
    /// On success `env` holds the host variables as the call left them. On
    /// failure it is unchanged. A panic inside a host function is reported
    /// as a runtime error.
    #[tracing::instrument(level = "debug", skip_all, fields(name = %name))]
    pub fn call(
        &self,
        name: &str,
        args: Vec<Value>,
        env: &mut ValueMap,
    ) -> Result<Vec<Value>, CallError> {
        let (scope, name) = split_scope(name);
        let scope = scope
            .or_else(|| env_scope(env))
            .unwrap_or(self.config.default_scope);
        let snapshot = self.registry.snapshot();
        let object = resolve(&snapshot, scope, name).ok_or_else(|| {
            RuntimeError::new(RuntimeErrorKind::UnknownIdentifier {
                name: name.to_string(),
            })
        })?;

        let host_env = env.clone();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut interpreter = Interpreter::new(snapshot, scope, host_env)
                .with_max_depth(self.config.max_call_depth);
            let result = interpreter.call_object(&object, args);
            (result, interpreter.into_env())
        }));
        match outcome {
            Ok((Ok(values), host_env)) => {
                *env = host_env;
                Ok(values)
            }
            Ok((Err(err), _)) => Err(err),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::warn!(%scope, name, %message, "host panic during call");
                Err(RuntimeError::new(RuntimeErrorKind::HostPanic { message }).into())
            }
        }
    }

    /// Names declared in `scope`, sorted.
    pub fn names(&self, scope: ScopeId) -> Vec<String> {
        self.registry.names(scope)
    }

    /// Names of the top-level declarations of `source`, recovered without
    /// compiling it. Never fails; malformed input yields what it can.
    pub fn contracts_list(source: &str) -> Vec<String> {
        pact_parse::contracts_list(source)
    }
}

fn resolve(snapshot: &Snapshot, scope: ScopeId, name: &str) -> Option<Object> {
    match name.split_once('.') {
        Some((contract, func)) => snapshot.func(scope, Some(contract), func).map(Object::Func),
        None => snapshot.lookup(scope, name),
    }
}

fn env_scope(env: &ValueMap) -> Option<ScopeId> {
    let raw = env.get(STATE_KEY)?.to_int().ok()?;
    u32::try_from(raw).ok().map(ScopeId)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
