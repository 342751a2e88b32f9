//! The `Value` type.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use pact_ir::ParamType;
use rust_decimal::Decimal;

use crate::number::{decimal_from_str, parse_number, Number, NumberPair};

/// String-keyed map value. Ordered so that printing and serialization are
/// deterministic.
pub type ValueMap = BTreeMap<String, Value>;

/// Runtime value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Exact decimal.
    Money(Decimal),
    Str(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Map(ValueMap),
}

impl Value {
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Zero value of a declared type: what a fresh `var` holds.
    pub fn zero(ty: ParamType) -> Self {
        match ty {
            ParamType::Int => Value::Int(0),
            ParamType::Float => Value::Float(0.0),
            ParamType::Bool => Value::Bool(false),
            ParamType::String => Value::Str(String::new()),
            ParamType::Money => Value::Money(Decimal::ZERO),
            ParamType::Bytes => Value::Bytes(Vec::new()),
            ParamType::Array => Value::Array(Vec::new()),
            ParamType::Map | ParamType::File => Value::Map(ValueMap::new()),
            ParamType::Any => Value::Nil,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Money(_) => "money",
            Value::Str(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }

    /// Declared type this value naturally has. `nil` fits anything.
    pub fn param_type(&self) -> ParamType {
        match self {
            Value::Nil => ParamType::Any,
            Value::Bool(_) => ParamType::Bool,
            Value::Int(_) => ParamType::Int,
            Value::Float(_) => ParamType::Float,
            Value::Money(_) => ParamType::Money,
            Value::Str(_) => ParamType::String,
            Value::Bytes(_) => ParamType::Bytes,
            Value::Array(_) => ParamType::Array,
            Value::Map(_) => ParamType::Map,
        }
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Condition value: zero numbers, empty strings and containers, `nil`
    /// and `false` are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Money(m) => !m.is_zero(),
            Value::Str(s) => !s.is_empty(),
            Value::Bytes(b) => !b.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Map(map) => !map.is_empty(),
        }
    }

    /// `nil` or an empty string, byte string or container.
    fn is_blank(&self) -> bool {
        match self {
            Value::Nil => true,
            Value::Str(s) => s.is_empty(),
            Value::Bytes(b) => b.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Map(map) => map.is_empty(),
            _ => false,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// This value as a numeric operand.
    ///
    /// Numeric strings parse, `nil` counts as `0`. Anything else is `None`.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Int(n) => Some(Number::Int(*n)),
            Value::Float(f) => Some(Number::Float(*f)),
            Value::Money(m) => Some(Number::Money(*m)),
            Value::Nil => Some(Number::Int(0)),
            Value::Str(s) => parse_number(s),
            _ => None,
        }
    }

    /// This value as an operand beside `other`.
    ///
    /// Same as [`Value::as_number`], except that a string next to money is
    /// read as an exact decimal rather than through `int`/`float`.
    pub fn as_number_beside(&self, other: &Value) -> Option<Number> {
        match (self, other) {
            (Value::Str(s), Value::Money(_)) => decimal_from_str(s).map(Number::Money),
            _ => self.as_number(),
        }
    }

    /// Whether this value is an actual number rather than something that
    /// can be read as one.
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_) | Value::Money(_))
    }

    /// Language equality (`==`).
    ///
    /// Numbers compare by value across `int`, `float` and `money`; a numeric
    /// string equals the number it spells. `nil` equals `nil` and every
    /// empty string or container, but not zero. Arrays and maps compare
    /// element-wise.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, v) | (v, Value::Nil) => v.is_blank(),
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Bytes(a), Value::Str(b)) | (Value::Str(b), Value::Bytes(a)) => {
                a.as_slice() == b.as_bytes()
            }
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.equals(y))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .all(|(key, x)| b.get(key).is_some_and(|y| x.equals(y)))
            }
            (left, right) if left.is_number() || right.is_number() => {
                match (left.as_number_beside(right), right.as_number_beside(left)) {
                    (Some(a), Some(b)) => NumberPair::promote_exact(a, b)
                        .and_then(NumberPair::compare)
                        .is_some_and(Ordering::is_eq),
                    _ => false,
                }
            }
            _ => false,
        }
    }

    /// Ordering for `<`, `<=`, `>`, `>=`: strings lexicographically,
    /// everything else numerically. `None` when the operands do not order.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        if let (Value::Str(a), Value::Str(b)) = (self, other) {
            return Some(a.cmp(b));
        }
        let pair = NumberPair::promote_exact(
            self.as_number_beside(other)?,
            other.as_number_beside(self)?,
        )?;
        pair.compare()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("<nil>"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Money(m) => write!(f, "{}", m.normalize()),
            Value::Str(s) => f.write_str(s),
            Value::Bytes(bytes) => {
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Decimal> for Value {
    fn from(m: Decimal) -> Self {
        Value::Money(m)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<ValueMap> for Value {
    fn from(map: ValueMap) -> Self {
        Value::Map(map)
    }
}
