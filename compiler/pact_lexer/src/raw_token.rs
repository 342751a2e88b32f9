//! Raw token definitions for the logos-based lexer.
//!
//! `RawToken` is the logos-derived tokenizer output before literal values
//! are parsed and trivia is folded into `TokenFlags`.

use logos::{Lexer, Logos};

/// Raw token from logos (before cooking).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\f]+")] // Skip horizontal whitespace
pub(crate) enum RawToken {
    #[token("\n")]
    Newline,
    #[regex(r"//[^\n]*")]
    LineComment,
    #[token("/*", block_comment)]
    BlockComment,

    // Keywords
    #[token("contract")]
    Contract,
    #[token("data")]
    Data,
    #[token("settings")]
    Settings,
    #[token("conditions")]
    Conditions,
    #[token("action")]
    Action,
    #[token("func")]
    Func,
    #[token("if")]
    If,
    #[token("elif")]
    Elif,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("var")]
    Var,
    #[token("return")]
    Return,
    #[token("error")]
    Error,
    #[token("warning")]
    Warning,
    #[token("info")]
    Info,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("nil")]
    Nil,
    #[token("optional")]
    Optional,

    // Type keywords
    #[token("int")]
    IntType,
    #[token("float")]
    FloatType,
    #[token("bool")]
    BoolType,
    #[token("string")]
    StringType,
    #[token("money")]
    MoneyType,
    #[token("bytes")]
    BytesType,
    #[token("array")]
    ArrayType,
    #[token("map")]
    MapType,
    #[token("file")]
    FileType,

    // Literals
    #[regex(r"[0-9]+")]
    Int,
    #[regex(r"[0-9]+\.[0-9]+")]
    #[regex(r"\.[0-9]+")]
    Float,
    #[token("\"", quoted_string)]
    Str,
    #[token("`", raw_string)]
    RawStr,
    #[regex(r"[\p{L}_][\p{L}\p{N}_]*")]
    Ident,
    #[regex(r"\$[\p{L}_][\p{L}\p{N}_]*")]
    ExtVar,
    #[regex(r"@[0-9]+[\p{L}_][\p{L}\p{N}_]*")]
    Qualified,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("==")]
    EqEq,
    #[token("=")]
    Assign,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("!")]
    Bang,

    // Punctuation
    #[token("...")]
    Ellipsis,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
}

/// Consume a block comment body up to and including `*/`.
///
/// On a missing terminator the rest of the input is consumed and the token
/// is rejected, so the error slice starts with `/*`.
fn block_comment(lex: &mut Lexer<'_, RawToken>) -> bool {
    let rest = lex.remainder();
    match rest.find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(rest.len());
            false
        }
    }
}

/// Consume a double-quoted string body, honoring backslash escapes.
/// Line breaks inside the literal are allowed.
fn quoted_string(lex: &mut Lexer<'_, RawToken>) -> bool {
    let rest = lex.remainder();
    let mut escaped = false;
    for (i, ch) in rest.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => {
                lex.bump(i + 1);
                return true;
            }
            _ => {}
        }
    }
    lex.bump(rest.len());
    false
}

/// Consume a backtick string body; no escapes are recognized.
fn raw_string(lex: &mut Lexer<'_, RawToken>) -> bool {
    let rest = lex.remainder();
    match rest.find('`') {
        Some(end) => {
            lex.bump(end + 1);
            true
        }
        None => {
            lex.bump(rest.len());
            false
        }
    }
}
