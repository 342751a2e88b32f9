//! Binary and unary operator implementations.
//!
//! Direct dispatch on the operator and the operand pair. The value set is
//! closed, so every combination is decided by one `match` instead of a
//! table of handlers. `&&` and `||` normally never get here because the
//! interpreter short-circuits them.

use std::cmp::Ordering;

use pact_ir::{BinaryOp, UnaryOp};
use pact_value::{
    conversion_error, division_by_zero, integer_overflow, invalid_operands, modulo_by_zero,
    Decimal, Number, NumberPair, RuntimeResult, Value,
};

#[inline]
fn is_ordering(op: BinaryOp) -> bool {
    matches!(
        op,
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq
    )
}

fn ordering_holds(op: BinaryOp, ordering: Option<Ordering>) -> bool {
    let Some(ordering) = ordering else {
        return false;
    };
    match op {
        BinaryOp::Lt => ordering.is_lt(),
        BinaryOp::LtEq => ordering.is_le(),
        BinaryOp::Gt => ordering.is_gt(),
        BinaryOp::GtEq => ordering.is_ge(),
        _ => false,
    }
}

/// Evaluate a binary operation.
///
/// - `==`/`!=` use language equality for every pair
/// - `+` with a string on the left appends the right operand as text
/// - two strings order lexicographically
/// - `+` on two arrays concatenates them
/// - anything else with a number on either side is numeric
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> RuntimeResult<Value> {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(left.equals(&right))),
        BinaryOp::NotEq => Ok(Value::Bool(!left.equals(&right))),
        BinaryOp::And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
        BinaryOp::Add
        | BinaryOp::Sub
        | BinaryOp::Mul
        | BinaryOp::Div
        | BinaryOp::Mod
        | BinaryOp::Lt
        | BinaryOp::LtEq
        | BinaryOp::Gt
        | BinaryOp::GtEq => match (left, right) {
            (left @ Value::Str(_), right) | (left @ Value::Nil, right @ Value::Str(_))
                if op == BinaryOp::Add =>
            {
                concat(left, right)
            }
            (Value::Str(a), Value::Str(b)) if is_ordering(op) => {
                Ok(Value::Bool(ordering_holds(op, Some(a.cmp(&b)))))
            }
            (Value::Array(mut items), Value::Array(more)) if op == BinaryOp::Add => {
                items.extend(more);
                Ok(Value::Array(items))
            }
            (left, right)
                if left.is_number() || right.is_number() || (left.is_nil() && right.is_nil()) =>
            {
                eval_numeric(&left, &right, op)
            }
            (left, right) => Err(invalid_operands(op, left.type_name(), right.type_name())),
        },
    }
}

fn concat(left: Value, right: Value) -> RuntimeResult<Value> {
    let mut text = match left {
        Value::Str(s) => s,
        _ => String::new(),
    };
    match right {
        Value::Str(s) => text.push_str(&s),
        Value::Nil => {}
        other @ (Value::Array(_) | Value::Map(_)) => {
            return Err(invalid_operands(BinaryOp::Add, "string", other.type_name()));
        }
        other => text.push_str(&other.to_string()),
    }
    Ok(Value::Str(text))
}

/// A numeric operand. `nil` is zero; a string must spell a number, and
/// next to money it is read as an exact decimal.
fn operand(value: &Value, op: BinaryOp, other: &Value) -> RuntimeResult<Number> {
    match value {
        Value::Str(s) => value
            .as_number_beside(other)
            .ok_or_else(|| conversion_error(format!("{s:?}"), "number")),
        _ => value
            .as_number()
            .ok_or_else(|| invalid_operands(op, value.type_name(), other.type_name())),
    }
}

fn eval_numeric(left: &Value, right: &Value, op: BinaryOp) -> RuntimeResult<Value> {
    let a = operand(left, op, right)?;
    let b = operand(right, op, left)?;
    if is_ordering(op) {
        let ordering = NumberPair::promote_exact(a, b).and_then(NumberPair::compare);
        return Ok(Value::Bool(ordering_holds(op, ordering)));
    }
    let pair = NumberPair::promote(a, b)
        .ok_or_else(|| conversion_error(format!("{left} {op} {right}"), "money"))?;
    match pair {
        NumberPair::Int(a, b) => int_arith(a, b, op),
        NumberPair::Float(a, b) => float_arith(a, b, op),
        NumberPair::Money(a, b) => money_arith(a, b, op),
    }
}

fn int_arith(a: i64, b: i64, op: BinaryOp) -> RuntimeResult<Value> {
    let result = match op {
        BinaryOp::Add => a.checked_add(b),
        BinaryOp::Sub => a.checked_sub(b),
        BinaryOp::Mul => a.checked_mul(b),
        BinaryOp::Div if b == 0 => return Err(division_by_zero()),
        BinaryOp::Div => a.checked_div(b),
        BinaryOp::Mod if b == 0 => return Err(modulo_by_zero()),
        BinaryOp::Mod => a.checked_rem(b),
        _ => return Err(invalid_operands(op, "int", "int")),
    };
    result
        .map(Value::Int)
        .ok_or_else(|| integer_overflow(op.as_symbol()))
}

fn float_arith(a: f64, b: f64, op: BinaryOp) -> RuntimeResult<Value> {
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div if b == 0.0 => return Err(division_by_zero()),
        BinaryOp::Div => a / b,
        BinaryOp::Mod if b == 0.0 => return Err(modulo_by_zero()),
        BinaryOp::Mod => a % b,
        _ => return Err(invalid_operands(op, "float", "float")),
    };
    Ok(Value::Float(result))
}

/// Money division floors to whole units.
fn money_arith(a: Decimal, b: Decimal, op: BinaryOp) -> RuntimeResult<Value> {
    let result = match op {
        BinaryOp::Add => a.checked_add(b),
        BinaryOp::Sub => a.checked_sub(b),
        BinaryOp::Mul => a.checked_mul(b),
        BinaryOp::Div if b.is_zero() => return Err(division_by_zero()),
        BinaryOp::Div => a.checked_div(b).map(|q| q.floor()),
        BinaryOp::Mod if b.is_zero() => return Err(modulo_by_zero()),
        BinaryOp::Mod => a.checked_rem(b),
        _ => return Err(invalid_operands(op, "money", "money")),
    };
    result
        .map(Value::Money)
        .ok_or_else(|| integer_overflow(op.as_symbol()))
}

/// Evaluate a unary operation.
pub fn evaluate_unary(value: Value, op: UnaryOp) -> RuntimeResult<Value> {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
        UnaryOp::Neg => match value.as_number() {
            Some(Number::Int(n)) => n
                .checked_neg()
                .map(Value::Int)
                .ok_or_else(|| integer_overflow("negation")),
            Some(Number::Float(f)) => Ok(Value::Float(-f)),
            Some(Number::Money(m)) => Ok(Value::Money(-m)),
            None => Err(conversion_error(value.type_name(), "number")),
        },
    }
}
