//! Lexer for the Pact contract language.
//!
//! Built on `logos`. Raw tokens are cooked into [`pact_ir::Token`]s: literal
//! values are parsed, escapes processed, and line breaks and comments folded
//! into the [`TokenFlags`] of the next token. The final token is always
//! `TokenKind::Eof`.

mod error;
mod escape;
mod raw_token;

use logos::Logos;
use pact_ir::{LineIndex, Span, Token, TokenFlags, TokenKind};

pub use error::{LexError, LexErrorKind};

use escape::cook_string;
use raw_token::RawToken;

/// Tokenize a whole source, stopping at the first error.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).collect()
}

/// Tokenize a source, skipping over anything that fails to lex.
///
/// Used for best-effort introspection of sources that may not compile.
pub fn tokenize_lossy(source: &str) -> Vec<Token> {
    Lexer::new(source).filter_map(Result::ok).collect()
}

/// Streaming lexer yielding cooked tokens.
pub struct Lexer<'src> {
    raw: logos::Lexer<'src, RawToken>,
    index: LineIndex<'src>,
    source_len: usize,
    /// Trivia seen since the last emitted token.
    pending: TokenFlags,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            raw: RawToken::lexer(source),
            index: LineIndex::new(source),
            source_len: source.len(),
            pending: TokenFlags::EMPTY,
            finished: false,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(raw) = self.raw.next() else {
                if self.finished {
                    return None;
                }
                self.finished = true;
                let span = self.index.span(self.source_len..self.source_len);
                let flags = std::mem::take(&mut self.pending);
                return Some(Ok(Token::new(TokenKind::Eof, span, flags)));
            };
            let slice = self.raw.slice();
            match raw {
                Ok(RawToken::Newline) => self.pending.set(TokenFlags::NEWLINE_BEFORE),
                Ok(RawToken::LineComment) => self.pending.set(TokenFlags::TRIVIA_BEFORE),
                Ok(RawToken::BlockComment) => {
                    self.pending.set(TokenFlags::TRIVIA_BEFORE);
                    if slice.contains('\n') {
                        self.pending.set(TokenFlags::NEWLINE_BEFORE);
                    }
                }
                Ok(raw) => {
                    let span = self.index.span(self.raw.span());
                    let flags = std::mem::take(&mut self.pending);
                    return Some(cook(raw, slice, span).map(|kind| Token::new(kind, span, flags)));
                }
                Err(()) => {
                    let span = self.index.span(self.raw.span());
                    self.pending.set(TokenFlags::TRIVIA_BEFORE);
                    return Some(Err(LexError::new(classify_error(slice), span)));
                }
            }
        }
    }
}

/// Turn a raw token into its final kind, parsing literal payloads.
fn cook(raw: RawToken, slice: &str, span: Span) -> Result<TokenKind, LexError> {
    let kind = match raw {
        RawToken::Int => match slice.parse::<i64>() {
            Ok(value) => TokenKind::Int(value),
            Err(_) => {
                return Err(LexError::new(
                    LexErrorKind::IntOutOfRange {
                        literal: slice.to_string(),
                    },
                    span,
                ))
            }
        },
        RawToken::Float => match slice.parse::<f64>() {
            Ok(value) => TokenKind::Float(value),
            Err(_) => {
                return Err(LexError::new(
                    LexErrorKind::InvalidFloat {
                        literal: slice.to_string(),
                    },
                    span,
                ))
            }
        },
        RawToken::Str => {
            let body = &slice[1..slice.len() - 1];
            match cook_string(body) {
                Ok(text) => TokenKind::Str(text),
                Err(offset) => {
                    let sequence = body[offset..].chars().take(2).collect();
                    return Err(LexError::new(LexErrorKind::InvalidEscape { sequence }, span));
                }
            }
        }
        RawToken::RawStr => TokenKind::Str(slice[1..slice.len() - 1].to_string()),
        RawToken::Ident => TokenKind::Ident(slice.to_string()),
        RawToken::ExtVar => TokenKind::ExtVar(slice[1..].to_string()),
        RawToken::Qualified => {
            let digits = slice[1..]
                .find(|c: char| !c.is_ascii_digit())
                .map_or(slice.len(), |i| i + 1);
            let Ok(scope) = slice[1..digits].parse::<u32>() else {
                return Err(LexError::new(
                    LexErrorKind::ScopeOutOfRange {
                        literal: slice[1..digits].to_string(),
                    },
                    span,
                ));
            };
            TokenKind::Qualified(scope, slice[digits..].to_string())
        }
        RawToken::Contract => TokenKind::Contract,
        RawToken::Data => TokenKind::Data,
        RawToken::Settings => TokenKind::Settings,
        RawToken::Conditions => TokenKind::Conditions,
        RawToken::Action => TokenKind::Action,
        RawToken::Func => TokenKind::Func,
        RawToken::If => TokenKind::If,
        RawToken::Elif => TokenKind::Elif,
        RawToken::Else => TokenKind::Else,
        RawToken::While => TokenKind::While,
        RawToken::Var => TokenKind::Var,
        RawToken::Return => TokenKind::Return,
        RawToken::Error => TokenKind::Error,
        RawToken::Warning => TokenKind::Warning,
        RawToken::Info => TokenKind::Info,
        RawToken::Break => TokenKind::Break,
        RawToken::Continue => TokenKind::Continue,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Nil => TokenKind::Nil,
        RawToken::Optional => TokenKind::Optional,
        RawToken::IntType => TokenKind::IntType,
        RawToken::FloatType => TokenKind::FloatType,
        RawToken::BoolType => TokenKind::BoolType,
        RawToken::StringType => TokenKind::StringType,
        RawToken::MoneyType => TokenKind::MoneyType,
        RawToken::BytesType => TokenKind::BytesType,
        RawToken::ArrayType => TokenKind::ArrayType,
        RawToken::MapType => TokenKind::MapType,
        RawToken::FileType => TokenKind::FileType,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::Assign => TokenKind::Assign,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::AndAnd => TokenKind::AndAnd,
        RawToken::OrOr => TokenKind::OrOr,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Ellipsis => TokenKind::Ellipsis,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Colon => TokenKind::Colon,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Newline | RawToken::LineComment | RawToken::BlockComment => {
            unreachable!("trivia is folded into token flags")
        }
    };
    Ok(kind)
}

/// Callbacks consume the rest of the input on a missing terminator, so the
/// failing slice tells which literal was left open.
fn classify_error(slice: &str) -> LexErrorKind {
    if slice.starts_with("/*") {
        LexErrorKind::UnterminatedComment
    } else if slice.starts_with('"') || slice.starts_with('`') {
        LexErrorKind::UnterminatedString
    } else {
        LexErrorKind::InvalidCharacter(slice.chars().next().unwrap_or('\0'))
    }
}
