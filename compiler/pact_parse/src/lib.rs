//! Recursive descent parser for Pact.
//!
//! Consumes the token stream produced by `pact_lexer` and builds a
//! [`Module`]. Line structure comes from `TokenFlags::NEWLINE_BEFORE`: a
//! `var` declaration, a bare `return`, a call's `(` and an index `[` never
//! reach across a line break, and neither does a binary operator that
//! starts a line.

mod contracts;
mod cursor;
mod error;
mod grammar;

pub use contracts::contracts_list;
pub use cursor::Cursor;
pub use error::ParseError;

use pact_diagnostic::ErrorCode;
use pact_ir::{Module, Span, Token};

/// Parse a complete token stream into a module.
///
/// Stops at the first syntax error.
pub fn parse(tokens: &[Token]) -> Result<Module, ParseError> {
    Parser::new(tokens).parse_module()
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
        }
    }

    /// Parse top-level declarations until `Eof`.
    pub fn parse_module(mut self) -> Result<Module, ParseError> {
        self.parse_items()
    }

    /// Error for a token that cannot start or continue the current construct.
    #[cold]
    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::new(
            ErrorCode::E1001,
            format!(
                "expected {expected}, found {}",
                self.cursor.current_kind().display_name()
            ),
            self.cursor.current_span(),
        )
    }

    /// Error for a delimiter still open at end of input.
    #[cold]
    fn unclosed(&self, open: Span, what: &str) -> ParseError {
        ParseError::new(ErrorCode::E1003, format!("unterminated {what}"), open)
    }
}

#[cfg(test)]
mod tests;
