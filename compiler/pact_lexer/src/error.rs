//! Lexer errors.

use pact_diagnostic::ErrorCode;
use pact_ir::Span;

/// A lexer error: what went wrong and where.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{kind} {}", .span.position())]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    #[cold]
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { kind, span }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("invalid character {0:?}")]
    InvalidCharacter(char),
    #[error("integer literal {literal:?}: value out of range {literal}")]
    IntOutOfRange { literal: String },
    #[error("scope {literal:?}: value out of range {literal}")]
    ScopeOutOfRange { literal: String },
    #[error("invalid float literal {literal:?}")]
    InvalidFloat { literal: String },
    #[error("invalid escape sequence {sequence:?}")]
    InvalidEscape { sequence: String },
}

impl LexErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            LexErrorKind::UnterminatedString => ErrorCode::E0001,
            LexErrorKind::InvalidCharacter(_) => ErrorCode::E0002,
            LexErrorKind::IntOutOfRange { .. }
            | LexErrorKind::ScopeOutOfRange { .. }
            | LexErrorKind::InvalidFloat { .. } => ErrorCode::E0003,
            LexErrorKind::UnterminatedComment => ErrorCode::E0004,
            LexErrorKind::InvalidEscape { .. } => ErrorCode::E0005,
        }
    }
}
