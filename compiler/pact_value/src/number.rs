//! Numeric operands.
//!
//! Arithmetic and ordering work on a [`NumberPair`]: both operands promoted
//! to the wider of their representations. `money` wins over `float`, which
//! wins over `int`.
//!
//! Money counts whole units once a float is involved: a float entering
//! money arithmetic or a money conversion is floored (`5.6` becomes `5`).
//! Comparisons instead read the float through its shortest decimal
//! rendering, so `1.2 == 1.2` holds whichever side is money.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::Value;

/// A value viewed as a number.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
    Money(Decimal),
}

impl Number {
    pub fn to_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
            Number::Money(m) => m.to_f64().unwrap_or(f64::NAN),
        }
    }

    /// Exact decimal form. `None` for non-finite or out-of-range floats.
    pub fn to_decimal(self) -> Option<Decimal> {
        match self {
            Number::Int(n) => Some(Decimal::from(n)),
            Number::Float(f) => decimal_from_f64(f),
            Number::Money(m) => Some(m),
        }
    }

    /// Money operand form: like [`Number::to_decimal`] but floats floor.
    pub fn to_money(self) -> Option<Decimal> {
        match self {
            Number::Float(f) => money_from_f64(f),
            other => other.to_decimal(),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Number::Int(n) => Value::Int(n),
            Number::Float(f) => Value::Float(f),
            Number::Money(m) => Value::Money(m),
        }
    }
}

/// Two operands in a common representation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NumberPair {
    Int(i64, i64),
    Float(f64, f64),
    Money(Decimal, Decimal),
}

impl NumberPair {
    /// Promote both operands for arithmetic. `None` when a float cannot
    /// become money.
    pub fn promote(left: Number, right: Number) -> Option<Self> {
        Self::promote_with(left, right, Number::to_money)
    }

    /// Promote both operands for comparison, keeping floats exact.
    pub fn promote_exact(left: Number, right: Number) -> Option<Self> {
        Self::promote_with(left, right, Number::to_decimal)
    }

    fn promote_with(
        left: Number,
        right: Number,
        money: fn(Number) -> Option<Decimal>,
    ) -> Option<Self> {
        let pair = match (left, right) {
            (Number::Int(a), Number::Int(b)) => NumberPair::Int(a, b),
            (Number::Money(_), _) | (_, Number::Money(_)) => {
                NumberPair::Money(money(left)?, money(right)?)
            }
            _ => NumberPair::Float(left.to_f64(), right.to_f64()),
        };
        Some(pair)
    }

    pub fn compare(self) -> Option<Ordering> {
        match self {
            NumberPair::Int(a, b) => Some(a.cmp(&b)),
            NumberPair::Float(a, b) => a.partial_cmp(&b),
            NumberPair::Money(a, b) => Some(a.cmp(&b)),
        }
    }
}

/// Parse numeric text: an integer when it fits in 64 bits, otherwise a
/// finite float. Surrounding whitespace is ignored.
pub fn parse_number(text: &str) -> Option<Number> {
    let text = text.trim();
    if let Ok(n) = text.parse::<i64>() {
        return Some(Number::Int(n));
    }
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(Number::Float(f)),
        _ => None,
    }
}

fn decimal_from_f64(f: f64) -> Option<Decimal> {
    if !f.is_finite() {
        return None;
    }
    Decimal::from_str(&f.to_string()).ok()
}

pub(crate) fn money_from_f64(f: f64) -> Option<Decimal> {
    decimal_from_f64(f).map(|d| d.floor())
}

/// Money from text, accepting plain and scientific notation.
pub(crate) fn decimal_from_str(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
