//! Runtime errors.
//!
//! A [`RuntimeError`] is an unexpected failure during execution: operand
//! type confusion, division by zero, a bad index, an arity mismatch only
//! visible at call time. Script-raised `error`/`warning` signals are not
//! runtime errors and live in the evaluator.
//!
//! Factory functions (e.g. [`division_by_zero`]) are the usual way to build
//! one; they fill in both the structured kind and the rendered message.

use pact_diagnostic::ErrorCode;
use pact_ir::{BinaryOp, Position, Span};

/// Messages longer than this many characters are truncated before they
/// leave the VM.
pub const MAX_ERROR_LEN: usize = 255;

/// Result of a fallible runtime operation.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Structured runtime error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeErrorKind {
    // Arithmetic
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: String },

    // Operands and values
    #[error("operator `{op}` cannot be applied to {left} and {right}")]
    InvalidOperands {
        op: BinaryOp,
        left: &'static str,
        right: &'static str,
    },
    #[error("cannot convert {value} to {target}")]
    Conversion { value: String, target: &'static str },
    #[error("invalid index {index} for {target}")]
    InvalidIndex { index: String, target: &'static str },

    // Calls
    #[error("unknown identifier {name}")]
    UnknownIdentifier { name: String },
    #[error("wrong count of parameters")]
    WrongParamCount,
    #[error("parameter {position} has wrong type")]
    WrongParamType { position: usize },
    #[error("function {name} must have {expected} parameters")]
    HostArity { name: String, expected: usize },
    #[error("maximum call depth exceeded (limit: {limit})")]
    DepthExceeded { limit: usize },
    #[error("contract {name} is not active")]
    InactiveContract { name: String },
    #[error("contract {contract} requires data field {field}")]
    MissingData { contract: String, field: String },
    #[error("{name}: {message}")]
    HostFailed { name: String, message: String },
    #[error("runtime panic: {message}")]
    HostPanic { message: String },
    #[error("assignment mismatch: {targets} variables but {values} values")]
    AssignmentCount { targets: usize, values: usize },
}

impl RuntimeErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            RuntimeErrorKind::DivisionByZero => ErrorCode::E6001,
            RuntimeErrorKind::ModuloByZero => ErrorCode::E6002,
            RuntimeErrorKind::IntegerOverflow { .. } => ErrorCode::E6003,
            RuntimeErrorKind::InvalidOperands { .. } => ErrorCode::E6004,
            RuntimeErrorKind::Conversion { .. } => ErrorCode::E6005,
            RuntimeErrorKind::InvalidIndex { .. } => ErrorCode::E6006,
            RuntimeErrorKind::UnknownIdentifier { .. } => ErrorCode::E6007,
            RuntimeErrorKind::WrongParamCount => ErrorCode::E6008,
            RuntimeErrorKind::WrongParamType { .. } => ErrorCode::E6009,
            RuntimeErrorKind::HostArity { .. } => ErrorCode::E6010,
            RuntimeErrorKind::DepthExceeded { .. } => ErrorCode::E6011,
            RuntimeErrorKind::InactiveContract { .. } => ErrorCode::E6012,
            RuntimeErrorKind::MissingData { .. } => ErrorCode::E6013,
            RuntimeErrorKind::HostFailed { .. } => ErrorCode::E6014,
            RuntimeErrorKind::HostPanic { .. } => ErrorCode::E6015,
            RuntimeErrorKind::AssignmentCount { .. } => ErrorCode::E6016,
        }
    }
}

/// Runtime error: kind, bounded message and the location of the failing
/// expression when known.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    message: String,
    pub span: Option<Span>,
}

impl RuntimeError {
    #[cold]
    pub fn new(kind: RuntimeErrorKind) -> Self {
        let message = truncate(kind.to_string());
        RuntimeError {
            kind,
            message,
            span: None,
        }
    }

    /// The rendered message, at most [`MAX_ERROR_LEN`] characters.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// Attach a location unless one is already recorded.
    ///
    /// Errors surface through nested expressions; the innermost span wins.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() && span.line > 0 {
            self.span = Some(span);
        }
        self
    }

    pub fn position(&self) -> Option<Position> {
        self.span.map(|span| span.position())
    }
}

impl From<RuntimeErrorKind> for RuntimeError {
    fn from(kind: RuntimeErrorKind) -> Self {
        RuntimeError::new(kind)
    }
}

fn truncate(message: String) -> String {
    if message.chars().count() <= MAX_ERROR_LEN {
        return message;
    }
    message.chars().take(MAX_ERROR_LEN).collect()
}

// Factory functions

#[cold]
pub fn division_by_zero() -> RuntimeError {
    RuntimeError::new(RuntimeErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> RuntimeError {
    RuntimeError::new(RuntimeErrorKind::ModuloByZero)
}

#[cold]
pub fn integer_overflow(operation: &str) -> RuntimeError {
    RuntimeError::new(RuntimeErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

#[cold]
pub fn invalid_operands(op: BinaryOp, left: &'static str, right: &'static str) -> RuntimeError {
    RuntimeError::new(RuntimeErrorKind::InvalidOperands { op, left, right })
}

/// `value` is a short description of the source: a quoted string or a
/// type name.
#[cold]
pub fn conversion_error(value: impl Into<String>, target: &'static str) -> RuntimeError {
    RuntimeError::new(RuntimeErrorKind::Conversion {
        value: value.into(),
        target,
    })
}

#[cold]
pub fn invalid_index(index: &impl std::fmt::Display, target: &'static str) -> RuntimeError {
    RuntimeError::new(RuntimeErrorKind::InvalidIndex {
        index: index.to_string(),
        target,
    })
}
