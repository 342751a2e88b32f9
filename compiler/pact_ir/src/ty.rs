//! Declared parameter and variable types.

use std::fmt;

/// Type written in a declaration (`a int`, `var m map`, data fields,
/// function results).
///
/// `Any` never appears in source; host functions use it for parameters that
/// accept every value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParamType {
    Int,
    Float,
    Bool,
    String,
    Money,
    Bytes,
    Array,
    Map,
    File,
    Any,
}

impl ParamType {
    pub const fn name(self) -> &'static str {
        match self {
            ParamType::Int => "int",
            ParamType::Float => "float",
            ParamType::Bool => "bool",
            ParamType::String => "string",
            ParamType::Money => "money",
            ParamType::Bytes => "bytes",
            ParamType::Array => "array",
            ParamType::Map => "map",
            ParamType::File => "file",
            ParamType::Any => "any",
        }
    }

    #[inline]
    pub const fn is_numeric(self) -> bool {
        matches!(self, ParamType::Int | ParamType::Float | ParamType::Money)
    }

    /// Whether an argument statically known to be `arg` may be passed to a
    /// parameter of this type.
    ///
    /// Numeric types convert into each other. `file` parameters take maps,
    /// `bytes` take strings.
    pub fn accepts(self, arg: ParamType) -> bool {
        if self == arg || self == ParamType::Any || arg == ParamType::Any {
            return true;
        }
        match self {
            ParamType::Int | ParamType::Float | ParamType::Money => arg.is_numeric(),
            ParamType::Bytes => arg == ParamType::String,
            ParamType::File => arg == ParamType::Map,
            _ => false,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
