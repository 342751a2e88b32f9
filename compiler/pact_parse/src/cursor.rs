//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead, and consumption methods.

use std::mem::discriminant;

use pact_diagnostic::ErrorCode;
use pact_ir::{ParamType, Span, Token, TokenFlags, TokenKind};

use crate::ParseError;

/// Returned when reading past the end of a stream that lacks its own `Eof`.
static EOF: Token = Token {
    kind: TokenKind::Eof,
    span: Span::DUMMY,
    flags: TokenFlags::EMPTY,
};

/// Cursor over a lexed token slice.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Cursor { tokens, pos: 0 }
    }

    /// Get the current token. Past the end this is always `Eof`.
    #[inline]
    pub fn current(&self) -> &'a Token {
        self.tokens.get(self.pos).unwrap_or(&EOF)
    }

    #[inline]
    pub fn current_kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Get the previous token's span.
    #[inline]
    pub fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.span,
            None => Span::DUMMY,
        }
    }

    /// Peek at the next token's kind (one-token lookahead).
    #[inline]
    pub fn peek_kind(&self) -> &'a TokenKind {
        self.tokens.get(self.pos + 1).map_or(&EOF.kind, |t| &t.kind)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Whether a line break separates the current token from the previous one.
    #[inline]
    pub fn at_line_start(&self) -> bool {
        self.current().flags.has_newline_before()
    }

    /// Check if the current token has the same kind as `kind`, ignoring payloads.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        discriminant(self.current_kind()) == discriminant(kind)
    }

    /// Type named by the current token, if it is a type keyword.
    pub fn type_keyword(&self) -> Option<ParamType> {
        let ty = match self.current_kind() {
            TokenKind::IntType => ParamType::Int,
            TokenKind::FloatType => ParamType::Float,
            TokenKind::BoolType => ParamType::Bool,
            TokenKind::StringType => ParamType::String,
            TokenKind::MoneyType => ParamType::Money,
            TokenKind::BytesType => ParamType::Bytes,
            TokenKind::ArrayType => ParamType::Array,
            TokenKind::MapType => ParamType::Map,
            TokenKind::FileType => ParamType::File,
            _ => return None,
        };
        Some(ty)
    }

    /// Advance to the next token, returning the consumed one.
    /// Never moves past `Eof`.
    #[inline]
    pub fn advance(&mut self) -> &'a Token {
        let current = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        current
    }

    /// Consume the current token if it matches `kind`.
    #[inline]
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expect the current token to be of the given kind, advance and return
    /// its span.
    #[inline]
    pub fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(self.make_expect_error(kind))
        }
    }

    #[cold]
    #[inline(never)]
    fn make_expect_error(&self, kind: &TokenKind) -> ParseError {
        ParseError::new(
            ErrorCode::E1001,
            format!(
                "expected {}, found {}",
                kind.display_name(),
                self.current_kind().display_name()
            ),
            self.current_span(),
        )
    }

    /// Expect and consume an identifier.
    /// Also accepts soft keywords (`data`, `action`, ...) as identifiers.
    pub fn expect_ident(&mut self) -> Result<(String, Span), ParseError> {
        let token = self.current();
        let name = match &token.kind {
            TokenKind::Ident(name) => name.clone(),
            kind => match kind.soft_keyword_name() {
                Some(name) => name.to_string(),
                None => return Err(self.make_expect_ident_error()),
            },
        };
        self.advance();
        Ok((name, token.span))
    }

    #[cold]
    #[inline(never)]
    fn make_expect_ident_error(&self) -> ParseError {
        ParseError::new(
            ErrorCode::E1004,
            format!(
                "expected identifier, found {}",
                self.current_kind().display_name()
            ),
            self.current_span(),
        )
    }
}
