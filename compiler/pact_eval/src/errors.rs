//! Failures of a call.
//!
//! A call ends in one of two ways besides returning: a script statement
//! raised a signal (`error`, `warning`, `info`), or execution hit a
//! [`RuntimeError`]. Signals are expected outcomes that callers branch on;
//! runtime errors are faults.

use std::fmt;

use pact_diagnostic::{Diagnostic, ErrorCode, Severity};
use pact_ir::SignalKind;
use pact_value::{RuntimeError, MAX_ERROR_LEN};
use serde::{Deserialize, Serialize};

/// Result of evaluating anything that may raise a signal.
pub type EvalResult<T> = Result<T, CallError>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptErrorKind {
    Error,
    Warning,
    Info,
}

impl From<SignalKind> for ScriptErrorKind {
    fn from(kind: SignalKind) -> Self {
        match kind {
            SignalKind::Error => ScriptErrorKind::Error,
            SignalKind::Warning => ScriptErrorKind::Warning,
            SignalKind::Info => ScriptErrorKind::Info,
        }
    }
}

/// A signal raised by a script statement.
///
/// Serializes as the payload handed to callers:
/// `{"type":"error","error":"<message>"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptError {
    #[serde(rename = "type")]
    pub kind: ScriptErrorKind,
    #[serde(rename = "error")]
    pub message: String,
}

impl ScriptError {
    pub fn new(kind: impl Into<ScriptErrorKind>, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if let Some((cut, _)) = message.char_indices().nth(MAX_ERROR_LEN) {
            message.truncate(cut);
        }
        ScriptError {
            kind: kind.into(),
            message,
        }
    }

    /// The JSON payload, `type` first.
    pub fn to_json(&self) -> String {
        self.to_string()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let severity = match self.kind {
            ScriptErrorKind::Error => Severity::Error,
            ScriptErrorKind::Warning => Severity::Warning,
            ScriptErrorKind::Info => Severity::Info,
        };
        Diagnostic::script(severity, self.message.clone())
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl std::error::Error for ScriptError {}

/// Why a call did not return values.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CallError {
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl CallError {
    /// Error code of a runtime fault; signals have none.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            CallError::Script(_) => None,
            CallError::Runtime(err) => Some(err.code()),
        }
    }

    pub fn as_script(&self) -> Option<&ScriptError> {
        match self {
            CallError::Script(err) => Some(err),
            CallError::Runtime(_) => None,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CallError::Script(err) => err.to_diagnostic(),
            CallError::Runtime(err) => {
                let diag = Diagnostic::error(err.code(), err.message());
                match err.position() {
                    Some(position) => diag.at(position),
                    None => diag,
                }
            }
        }
    }
}
