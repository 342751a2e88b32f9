//! Tokens produced by the lexer.
//!
//! Line breaks and comments are not tokens. They are recorded as
//! [`TokenFlags`] on the token that follows them, which is all the parser
//! needs to decide where a statement or a `var` declaration ends.

use std::fmt;

use crate::Span;

/// A lexical token with its kind, span and preceding-trivia flags.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub flags: TokenFlags,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span, flags: TokenFlags) -> Self {
        Token { kind, span, flags }
    }
}

/// Token kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Literals
    Int(i64),
    Float(f64),
    /// String literal with escapes already processed.
    Str(String),
    Ident(String),
    /// `$name` state/environment variable.
    ExtVar(String),
    /// `@<scope>name` reference into another scope.
    Qualified(u32, String),

    // Keywords
    Contract,
    Data,
    Settings,
    Conditions,
    Action,
    Func,
    If,
    Elif,
    Else,
    While,
    Var,
    Return,
    Error,
    Warning,
    Info,
    Break,
    Continue,
    True,
    False,
    Nil,
    Optional,

    // Type keywords
    IntType,
    FloatType,
    BoolType,
    StringType,
    MoneyType,
    BytesType,
    ArrayType,
    MapType,
    FileType,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Assign,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    AndAnd,
    OrOr,
    Bang,

    // Punctuation
    Dot,
    Ellipsis,
    Comma,
    Colon,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,

    Eof,
}

impl TokenKind {
    /// Keywords that may also be used as plain names (data fields,
    /// variables, map keys) outside the position that gives them meaning.
    pub fn soft_keyword_name(&self) -> Option<&'static str> {
        match self {
            TokenKind::Data => Some("data"),
            TokenKind::Settings => Some("settings"),
            TokenKind::Conditions => Some("conditions"),
            TokenKind::Action => Some("action"),
            TokenKind::Optional => Some("optional"),
            _ => None,
        }
    }

    /// Short description for "expected X, found Y" messages.
    pub fn display_name(&self) -> String {
        match self {
            TokenKind::Int(n) => format!("integer `{n}`"),
            TokenKind::Float(f) => format!("float `{f}`"),
            TokenKind::Str(_) => "string literal".to_string(),
            TokenKind::Ident(name) => format!("identifier `{name}`"),
            TokenKind::ExtVar(name) => format!("`${name}`"),
            TokenKind::Qualified(scope, name) => format!("`@{scope}{name}`"),
            TokenKind::Eof => "end of file".to_string(),
            other => format!("`{other}`"),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Int(n) => return write!(f, "{n}"),
            TokenKind::Float(n) => return write!(f, "{n}"),
            TokenKind::Str(s) => return write!(f, "{s:?}"),
            TokenKind::Ident(name) => return f.write_str(name),
            TokenKind::ExtVar(name) => return write!(f, "${name}"),
            TokenKind::Qualified(scope, name) => return write!(f, "@{scope}{name}"),
            TokenKind::Contract => "contract",
            TokenKind::Data => "data",
            TokenKind::Settings => "settings",
            TokenKind::Conditions => "conditions",
            TokenKind::Action => "action",
            TokenKind::Func => "func",
            TokenKind::If => "if",
            TokenKind::Elif => "elif",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Var => "var",
            TokenKind::Return => "return",
            TokenKind::Error => "error",
            TokenKind::Warning => "warning",
            TokenKind::Info => "info",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Nil => "nil",
            TokenKind::Optional => "optional",
            TokenKind::IntType => "int",
            TokenKind::FloatType => "float",
            TokenKind::BoolType => "bool",
            TokenKind::StringType => "string",
            TokenKind::MoneyType => "money",
            TokenKind::BytesType => "bytes",
            TokenKind::ArrayType => "array",
            TokenKind::MapType => "map",
            TokenKind::FileType => "file",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Assign => "=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Bang => "!",
            TokenKind::Dot => ".",
            TokenKind::Ellipsis => "...",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Eof => "<eof>",
        };
        f.write_str(text)
    }
}

/// Per-token trivia flags.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct TokenFlags(u8);

impl TokenFlags {
    /// A newline preceded this token.
    pub const NEWLINE_BEFORE: u8 = 1 << 0;
    /// A comment preceded this token.
    pub const TRIVIA_BEFORE: u8 = 1 << 1;

    /// Empty flags (no bits set).
    pub const EMPTY: Self = TokenFlags(0);

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        TokenFlags(bits)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    #[inline]
    pub fn set(&mut self, flag: u8) {
        self.0 |= flag;
    }

    /// Check if a newline preceded this token.
    #[inline]
    pub const fn has_newline_before(self) -> bool {
        self.contains(Self::NEWLINE_BEFORE)
    }

    /// Check if a comment preceded this token.
    #[inline]
    pub const fn has_trivia_before(self) -> bool {
        self.contains(Self::TRIVIA_BEFORE)
    }
}
