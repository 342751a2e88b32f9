//! Renderable diagnostic.

use std::fmt;

use pact_ir::Position;

use crate::ErrorCode;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// An error converted for display: code, message and optional position.
///
/// Renders as `error[E2001]: unknown identifier MyFunc [Ln:3 Col:10]`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: Option<ErrorCode>,
    pub message: String,
    pub position: Option<Position>,
}

impl Diagnostic {
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            code: Some(code),
            message: message.into(),
            position: None,
        }
    }

    /// Diagnostic raised by a script statement rather than the toolchain.
    pub fn script(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            code: None,
            message: message.into(),
            position: None,
        }
    }

    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        // line 0 marks synthesized spans
        if position.line > 0 {
            self.position = Some(position);
        }
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.severity.as_str())?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(position) = self.position {
            write!(f, " {position}")?;
        }
        Ok(())
    }
}
