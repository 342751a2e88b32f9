//! Standard host functions.
//!
//! The table every [`crate::Vm::new`] starts with. Embedders add their own
//! functions with [`crate::Vm::extend`]; a function of the same name
//! replaces the standard one.

mod format;

use pact_bind::{ExtensionTable, NativeFn};
use pact_ir::ParamType;
use pact_value::{RuntimeResult, Value};

pub use format::sprintf;

/// `Sprintf`, `Println`, conversions and string helpers.
pub fn standard_extensions() -> ExtensionTable {
    let mut table = ExtensionTable::new();
    table.extend([
        NativeFn::new("Sprintf", [ParamType::String], |args| {
            let Some((format, rest)) = args.split_first() else {
                return Ok(Value::Str(String::new()));
            };
            Ok(Value::Str(sprintf(&format.to_key(), rest)?))
        })
        .variadic()
        .returns(ParamType::String),
        NativeFn::new("Println", Vec::new(), |args| {
            let line = args
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            tracing::info!(target: "pact::script", "{line}");
            Ok(Value::Nil)
        })
        .variadic(),
        NativeFn::new("str", [ParamType::Any], to_string).returns(ParamType::String),
        NativeFn::new("Str", [ParamType::Any], to_string).returns(ParamType::String),
        NativeFn::new("Int", [ParamType::Any], |args| Ok(Value::Int(args[0].to_int()?)))
            .returns(ParamType::Int),
        NativeFn::new("Float", [ParamType::Any], |args| {
            Ok(Value::Float(args[0].to_float()?))
        })
        .returns(ParamType::Float),
        NativeFn::new("Money", [ParamType::Any], |args| {
            Ok(Value::Money(args[0].to_money()?))
        })
        .returns(ParamType::Money),
        NativeFn::new("Len", [ParamType::Any], |args| Ok(count(len(&args[0]))))
            .returns(ParamType::Int),
        NativeFn::new("lenArray", [ParamType::Array], |args| {
            Ok(count(len(&args[0])))
        })
        .returns(ParamType::Int),
        NativeFn::new("Size", [ParamType::String], |args| {
            Ok(count(args[0].to_key().len()))
        })
        .returns(ParamType::Int),
        NativeFn::new(
            "Replace",
            [
                ParamType::String,
                ParamType::String,
                ParamType::String,
                ParamType::Int,
            ],
            |args| {
                let text = args[0].to_key();
                let (from, to) = (args[1].to_key(), args[2].to_key());
                let replaced = match usize::try_from(args[3].to_int()?) {
                    Ok(limit) => text.replacen(&from, &to, limit),
                    Err(_) => text.replace(&from, &to),
                };
                Ok(Value::Str(replaced))
            },
        )
        .returns(ParamType::String),
        NativeFn::new("Contains", [ParamType::String, ParamType::String], |args| {
            Ok(Value::Bool(args[0].to_key().contains(&args[1].to_key())))
        })
        .returns(ParamType::Bool),
        NativeFn::new("HasPrefix", [ParamType::String, ParamType::String], |args| {
            Ok(Value::Bool(args[0].to_key().starts_with(&args[1].to_key())))
        })
        .returns(ParamType::Bool),
        NativeFn::new("Join", [ParamType::Array, ParamType::String], |args| {
            let Value::Array(items) = &args[0] else {
                return Ok(Value::Str(String::new()));
            };
            let items: Vec<String> = items.iter().map(Value::to_key).collect();
            Ok(Value::Str(items.join(&args[1].to_key())))
        })
        .returns(ParamType::String),
        NativeFn::new("Split", [ParamType::String, ParamType::String], |args| {
            let text = args[0].to_key();
            if text.is_empty() {
                return Ok(Value::Array(Vec::new()));
            }
            let parts = text
                .split(args[1].to_key().as_str())
                .map(Value::string)
                .collect();
            Ok(Value::Array(parts))
        })
        .returns(ParamType::Array),
    ]);
    table
}

fn to_string(args: &[Value]) -> RuntimeResult<Value> {
    Ok(Value::Str(args[0].to_string()))
}

/// Element count of a container, character count of a string.
fn len(value: &Value) -> usize {
    match value {
        Value::Str(s) => s.chars().count(),
        Value::Bytes(bytes) => bytes.len(),
        Value::Array(items) => items.len(),
        Value::Map(map) => map.len(),
        _ => 0,
    }
}

fn count(n: usize) -> Value {
    Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
}
