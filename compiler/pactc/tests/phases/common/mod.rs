//! Shared test utilities for phase tests.
//!
//! The host environment mirrors what an embedding ledger passes to a call:
//! the scope in `rt_state`, a scratch `data` array and a few globals.

use pactc::{NativeFn, OwnerInfo, ParamType, Value, ValueMap, Vm};

/// Scope every source is compiled into unless a test picks another.
pub const SCOPE: u32 = 22;

/// A VM with the standard host functions plus `GetMap` and `GetArray`.
pub fn vm() -> Vm {
    let mut vm = Vm::new();
    vm.extend(
        NativeFn::new("GetMap", Vec::new(), |_| Ok(Value::Map(get_map())))
            .returns(ParamType::Map),
    );
    vm.extend(
        NativeFn::new("GetArray", Vec::new(), |_| {
            Ok(Value::Array(vec![
                Value::Map(get_map()),
                Value::string("The second string"),
                Value::Int(2000),
            ]))
        })
        .returns(ParamType::Array),
    );
    vm
}

fn get_map() -> ValueMap {
    let mut map = ValueMap::new();
    map.insert("par0".to_string(), Value::string("Parameter 0"));
    map.insert("par1".to_string(), Value::string("Parameter 1"));
    map
}

/// Host variables of a call in `scope`.
pub fn host_env(scope: u32) -> ValueMap {
    let mut glob = ValueMap::new();
    glob.insert("test".to_string(), Value::string("String value"));
    glob.insert("number".to_string(), Value::Int(1001));

    let mut env = ValueMap::new();
    env.insert("rt_state".to_string(), Value::Int(i64::from(scope)));
    env.insert("data".to_string(), Value::Array(Vec::new()));
    env.insert("test1".to_string(), Value::Int(101));
    env.insert("test2".to_string(), Value::string("test 2"));
    env.insert("glob".to_string(), Value::Map(glob));
    env
}

/// Compile `source` into [`SCOPE`] and call `name` without arguments.
///
/// Returns the first result rendered as text, or the rendered error of
/// whichever phase failed.
pub fn outcome(source: &str, name: &str) -> String {
    let vm = vm();
    if let Err(err) = vm.compile(source, OwnerInfo::new(SCOPE).with_table(1)) {
        return err.to_string();
    }
    match vm.call(name, Vec::new(), &mut host_env(SCOPE)) {
        Ok(values) => values.first().map(ToString::to_string).unwrap_or_default(),
        Err(err) => err.to_string(),
    }
}
