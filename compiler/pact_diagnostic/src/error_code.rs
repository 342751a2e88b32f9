//! Error codes for all toolchain diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating the phase.

use std::fmt;

/// Error codes for all toolchain diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E2xxx: Binding errors
/// - E6xxx: Runtime errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Integer literal out of range
    E0003,
    /// Unterminated block comment
    E0004,
    /// Invalid escape sequence
    E0005,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Expected identifier
    E1004,
    /// Expected type
    E1005,
    /// Variadic parameter not in last position
    E1006,
    /// Invalid assignment target
    E1007,
    /// Setting value is not a literal
    E1008,

    // Binding Errors (E2xxx)
    /// Unknown identifier
    E2001,
    /// Host function called with the wrong number of arguments
    E2002,
    /// Wrong count of parameters
    E2003,
    /// Parameter has wrong type
    E2004,
    /// Duplicate declaration in one compile unit
    E2005,
    /// `break`/`continue` outside a loop
    E2006,
    /// Tail section used twice in one call
    E2007,
    /// Spread outside an argument list
    E2008,
    /// Assignment count mismatch
    E2009,

    // Runtime Errors (E6xxx)
    /// Division by zero
    E6001,
    /// Modulo by zero
    E6002,
    /// Integer overflow
    E6003,
    /// Operator applied to incompatible operands
    E6004,
    /// Value conversion failed
    E6005,
    /// Invalid index or indexed value
    E6006,
    /// Unknown function or contract at call time
    E6007,
    /// Wrong count of parameters at call time
    E6008,
    /// Parameter has wrong type at call time
    E6009,
    /// Host function arity mismatch at call time
    E6010,
    /// Maximum call depth exceeded
    E6011,
    /// Contract is not active
    E6012,
    /// Required contract data missing
    E6013,
    /// Host function failed
    E6014,
    /// Host function panicked
    E6015,
    /// Assignment count mismatch at run time
    E6016,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    ///
    /// When adding a new variant: add it to the enum, `as_str()`, and here.
    pub const ALL: &[ErrorCode] = &[
        // Lexer
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        // Parser
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E1008,
        // Binding
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        ErrorCode::E2009,
        // Runtime
        ErrorCode::E6001,
        ErrorCode::E6002,
        ErrorCode::E6003,
        ErrorCode::E6004,
        ErrorCode::E6005,
        ErrorCode::E6006,
        ErrorCode::E6007,
        ErrorCode::E6008,
        ErrorCode::E6009,
        ErrorCode::E6010,
        ErrorCode::E6011,
        ErrorCode::E6012,
        ErrorCode::E6013,
        ErrorCode::E6014,
        ErrorCode::E6015,
        ErrorCode::E6016,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
            ErrorCode::E6009 => "E6009",
            ErrorCode::E6010 => "E6010",
            ErrorCode::E6011 => "E6011",
            ErrorCode::E6012 => "E6012",
            ErrorCode::E6013 => "E6013",
            ErrorCode::E6014 => "E6014",
            ErrorCode::E6015 => "E6015",
            ErrorCode::E6016 => "E6016",
        }
    }

    /// Check if this is a lexer error (E0xxx range).
    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    /// Check if this is a parser error (E1xxx range).
    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Check if this is a binding error (E2xxx range).
    pub fn is_bind_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    /// Check if this is a runtime error (E6xxx range).
    pub fn is_runtime_error(&self) -> bool {
        self.as_str().starts_with("E6")
    }

    /// Whether the error is reported by `compile` rather than `call`.
    pub fn is_compile_error(&self) -> bool {
        !self.is_runtime_error()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
