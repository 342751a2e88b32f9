//! Binding errors.

use pact_diagnostic::ErrorCode;
use pact_ir::{Position, Span};

/// A binding error and the location of the offending node.
///
/// Renders as the bare message (`unknown identifier MyFunc`); the position
/// is available through [`BindError::position`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{kind}")]
pub struct BindError {
    pub kind: BindErrorKind,
    pub span: Span,
}

impl BindError {
    #[cold]
    pub fn new(kind: BindErrorKind, span: Span) -> Self {
        BindError { kind, span }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn position(&self) -> Position {
        self.span.position()
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum BindErrorKind {
    #[error("unknown identifier {name}")]
    UnknownIdentifier { name: String },
    #[error("function {name} must have {expected} parameters")]
    HostArity { name: String, expected: usize },
    #[error("wrong count of parameters")]
    WrongParamCount,
    #[error("parameter {position} has wrong type")]
    WrongParamType { position: usize },
    #[error("{name} is already declared")]
    Duplicate { name: String },
    #[error("`{keyword}` outside of a loop")]
    OutsideLoop { keyword: &'static str },
    #[error("tail {name} is used more than once")]
    TailReused { name: String },
    #[error("`...` is only allowed on a call argument")]
    MisplacedSpread,
    #[error("assignment mismatch: {targets} variables but {values} values")]
    AssignmentCount { targets: usize, values: usize },
}

impl BindErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            BindErrorKind::UnknownIdentifier { .. } => ErrorCode::E2001,
            BindErrorKind::HostArity { .. } => ErrorCode::E2002,
            BindErrorKind::WrongParamCount => ErrorCode::E2003,
            BindErrorKind::WrongParamType { .. } => ErrorCode::E2004,
            BindErrorKind::Duplicate { .. } => ErrorCode::E2005,
            BindErrorKind::OutsideLoop { .. } => ErrorCode::E2006,
            BindErrorKind::TailReused { .. } => ErrorCode::E2007,
            BindErrorKind::MisplacedSpread => ErrorCode::E2008,
            BindErrorKind::AssignmentCount { .. } => ErrorCode::E2009,
        }
    }
}
