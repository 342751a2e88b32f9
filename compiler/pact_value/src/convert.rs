//! Conversions to declared types.
//!
//! Two strengths:
//! - [`Value::convert_to`] is used when a typed local is assigned. It is
//!   lenient: numbers convert into each other, numeric strings parse,
//!   `nil` becomes the zero value.
//! - [`Value::coerce_param`] is used for call arguments. A value must
//!   already have a type the parameter accepts; only the numeric types,
//!   `nil`, strings-as-bytes and maps-as-files are converted.

use pact_ir::ParamType;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::errors::{conversion_error, RuntimeError, RuntimeErrorKind, RuntimeResult};
use crate::number::{decimal_from_str, money_from_f64, parse_number, Number};
use crate::Value;

impl Value {
    /// Convert for assignment to a local declared as `ty`.
    pub fn convert_to(self, ty: ParamType) -> RuntimeResult<Value> {
        if self.is_nil() {
            return Ok(Value::zero(ty));
        }
        match ty {
            ParamType::Any => Ok(self),
            ParamType::Int => self.to_int().map(Value::Int),
            ParamType::Float => self.to_float().map(Value::Float),
            ParamType::Money => self.to_money().map(Value::Money),
            ParamType::Bool => Ok(Value::Bool(self.is_truthy())),
            ParamType::String => match self {
                Value::Str(s) => Ok(Value::Str(s)),
                Value::Bytes(bytes) => {
                    Ok(Value::Str(String::from_utf8_lossy(&bytes).into_owned()))
                }
                other @ (Value::Array(_) | Value::Map(_)) => {
                    Err(conversion_error(other.type_name(), "string"))
                }
                other => Ok(Value::Str(other.to_string())),
            },
            ParamType::Bytes => match self {
                Value::Bytes(bytes) => Ok(Value::Bytes(bytes)),
                Value::Str(s) => Ok(Value::Bytes(s.into_bytes())),
                other => Err(conversion_error(other.type_name(), "bytes")),
            },
            ParamType::Array => match self {
                Value::Array(items) => Ok(Value::Array(items)),
                other => Err(conversion_error(other.type_name(), "array")),
            },
            ParamType::Map | ParamType::File => match self {
                Value::Map(map) => Ok(Value::Map(map)),
                other => Err(conversion_error(other.type_name(), ty.name())),
            },
        }
    }

    /// Convert a call argument for the parameter at 1-based `position`.
    pub fn coerce_param(self, ty: ParamType, position: usize) -> RuntimeResult<Value> {
        if !ty.accepts(self.param_type()) {
            return Err(RuntimeError::new(RuntimeErrorKind::WrongParamType { position }));
        }
        self.convert_to(ty)
    }

    /// Integer view: floats and money truncate toward zero, numeric
    /// strings parse, booleans are `0`/`1`.
    pub fn to_int(&self) -> RuntimeResult<i64> {
        match self {
            Value::Nil => Ok(0),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Int(n) => Ok(*n),
            Value::Float(f) => float_to_int(*f),
            Value::Money(m) => m
                .trunc()
                .to_i64()
                .ok_or_else(|| conversion_error(m.to_string(), "int")),
            Value::Str(s) => match parse_number(s) {
                Some(Number::Int(n)) => Ok(n),
                Some(Number::Float(f)) => float_to_int(f),
                _ => Err(conversion_error(format!("{s:?}"), "int")),
            },
            other => Err(conversion_error(other.type_name(), "int")),
        }
    }

    pub fn to_float(&self) -> RuntimeResult<f64> {
        match self {
            Value::Str(s) => parse_number(s)
                .map(Number::to_f64)
                .ok_or_else(|| conversion_error(format!("{s:?}"), "float")),
            other => other
                .as_number()
                .map(Number::to_f64)
                .ok_or_else(|| conversion_error(other.type_name(), "float")),
        }
    }

    /// Money view. Strings are read exactly, in plain or scientific
    /// notation; floats floor to whole units.
    pub fn to_money(&self) -> RuntimeResult<Decimal> {
        match self {
            Value::Nil => Ok(Decimal::ZERO),
            Value::Int(n) => Ok(Decimal::from(*n)),
            Value::Float(f) => {
                money_from_f64(*f).ok_or_else(|| conversion_error(f.to_string(), "money"))
            }
            Value::Money(m) => Ok(*m),
            Value::Str(s) => {
                decimal_from_str(s).ok_or_else(|| conversion_error(format!("{s:?}"), "money"))
            }
            other => Err(conversion_error(other.type_name(), "money")),
        }
    }

    /// Array position for an index operand. Negative or fractional
    /// positions are `None`.
    pub fn to_position(&self) -> Option<usize> {
        match self.as_number()? {
            Number::Int(n) => usize::try_from(n).ok(),
            Number::Float(f) if f.fract() == 0.0 && f >= 0.0 => float_to_int(f)
                .ok()
                .and_then(|n| usize::try_from(n).ok()),
            Number::Money(m) if m.fract().is_zero() => {
                m.to_u64().and_then(|n| usize::try_from(n).ok())
            }
            _ => None,
        }
    }

    /// Map key for an index operand: strings as-is, anything else rendered.
    pub fn to_key(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

fn float_to_int(f: f64) -> RuntimeResult<i64> {
    // 2^63: the first float past i64::MAX
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let truncated = f.trunc();
    if !(truncated.is_finite() && (-LIMIT..LIMIT).contains(&truncated)) {
        return Err(conversion_error(f.to_string(), "int"));
    }
    #[expect(clippy::cast_possible_truncation, reason = "range checked above")]
    let n = truncated as i64;
    Ok(n)
}
