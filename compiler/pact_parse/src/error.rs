//! Parse error type.

use pact_diagnostic::ErrorCode;
use pact_ir::Span;

/// A syntax error: code, message and the location of the offending token.
///
/// Renders as `<message> [Ln:L Col:C]`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{message} {}", .span.position())]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
}

impl ParseError {
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
        }
    }
}
