#![allow(clippy::unwrap_used, clippy::expect_used)]

use pact_diagnostic::ErrorCode;
use pact_ir::{OwnerInfo, ParamType, ScopeId};
use pact_value::Value;
use pretty_assertions::assert_eq;

use crate::ir::{Call, CallTarget, ExprKind, StmtKind};
use crate::{bind_module, split_scope, BindError, ExtensionTable, NativeFn, Registry};

fn extensions() -> ExtensionTable {
    let mut table = ExtensionTable::new();
    table.insert(
        NativeFn::new("Sprintf", [ParamType::String], |args| {
            Ok(Value::string(args[0].to_string()))
        })
        .variadic()
        .returns(ParamType::String),
    );
    table.insert(
        NativeFn::new(
            "Replace",
            [
                ParamType::String,
                ParamType::String,
                ParamType::String,
                ParamType::Int,
            ],
            |args| Ok(args[0].clone()),
        )
        .returns(ParamType::String),
    );
    table.insert(
        NativeFn::new("lenArray", [ParamType::Array], |_| Ok(Value::Int(0)))
            .returns(ParamType::Int),
    );
    table
}

fn compile_in(registry: &Registry, scope: u32, source: &str) -> Result<usize, BindError> {
    let tokens = pact_lexer::tokenize(source).expect("test source should lex");
    let module = pact_parse::parse(&tokens).expect("test source should parse");
    let owner = OwnerInfo::new(scope);
    let table = extensions();
    registry.update(owner.scope, |view| bind_module(&module, owner, view, &table))
}

fn compile(source: &str) -> Result<Registry, BindError> {
    let registry = Registry::new();
    compile_in(&registry, 1, source)?;
    Ok(registry)
}

fn compile_err(source: &str) -> BindError {
    match compile(source) {
        Ok(_) => panic!("expected a bind error"),
        Err(err) => err,
    }
}

/// The call returned by the first statement of function `name`.
fn returned_call(registry: &Registry, name: &str) -> Call {
    let func = registry.func(ScopeId(1), None, name).expect("function");
    match &func.body.stmts[0].kind {
        StmtKind::Return(values) => match &values[0].kind {
            ExprKind::Call(call) => (**call).clone(),
            other => panic!("expected call, found {other:?}"),
        },
        other => panic!("expected return, found {other:?}"),
    }
}

fn target_name(call: &Call) -> String {
    match &call.target {
        CallTarget::Func { name, .. } | CallTarget::Contract { name, .. } => name.clone(),
        CallTarget::Native(native) => native.name.clone(),
        CallTarget::Intrinsic(intrinsic) => intrinsic.name().to_string(),
    }
}

// === Registration ===

#[test]
fn registers_functions_and_contracts() {
    let registry = compile(
        "contract c {\n func init string { return helper() }\n}\nfunc helper() string { return \"x\" }",
    )
    .unwrap();
    assert_eq!(registry.names(ScopeId(1)), vec!["c", "helper"]);
    assert!(registry.contract(ScopeId(1), "c").is_some());
    assert!(registry.func(ScopeId(1), Some("c"), "init").is_some());
    assert!(registry.func(ScopeId(1), None, "c").is_none());
}

#[test]
fn failed_compile_leaves_registry_untouched() {
    let registry = compile("func a() int { return 1 }").unwrap();
    let err = compile_in(
        &registry,
        1,
        "func a(x int) int { return x }\nfunc b { MyFunc() }",
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "unknown identifier MyFunc");
    assert_eq!(registry.names(ScopeId(1)), vec!["a"]);
    assert!(registry.func(ScopeId(1), None, "a").unwrap().params.is_empty());
}

#[test]
fn redefinition_replaces() {
    let registry = compile("func a() int { return 1 }").unwrap();
    compile_in(&registry, 1, "func a(x int) int { return x }").unwrap();
    assert_eq!(registry.func(ScopeId(1), None, "a").unwrap().params.len(), 1);
}

#[test]
fn snapshots_do_not_change() {
    let registry = compile("func a() int { return 1 }\nfunc b() int { return 1 }").unwrap();
    let before = registry.snapshot();
    compile_in(&registry, 1, "func a(x int) int { return x }\nfunc c() int { return 3 }").unwrap();
    compile_in(&registry, 2, "func d() int { return 4 }").unwrap();

    assert_eq!(before.names(ScopeId(1)), vec!["a", "b"]);
    assert!(before.func(ScopeId(1), None, "a").unwrap().params.is_empty());
    assert!(before.lookup(ScopeId(2), "d").is_none());

    let after = registry.snapshot();
    assert_eq!(after.names(ScopeId(1)), vec!["a", "b", "c"]);
    assert_eq!(after.func(ScopeId(1), None, "a").unwrap().params.len(), 1);
    assert!(after.lookup(ScopeId(2), "d").is_some());
}

#[test]
fn scopes_are_isolated() {
    let registry = Registry::new();
    compile_in(&registry, 1, "func a() int { return 1 }").unwrap();
    compile_in(&registry, 2, "func a(x int, y int) int { return x }").unwrap();
    assert_eq!(registry.func(ScopeId(1), None, "a").unwrap().params.len(), 0);
    assert_eq!(registry.func(ScopeId(2), None, "a").unwrap().params.len(), 2);
}

#[test]
fn calls_resolve_against_earlier_units_and_other_scopes() {
    let registry = Registry::new();
    compile_in(&registry, 2, "func helper() int { return 1 }").unwrap();
    compile_in(&registry, 1, "func main() int { return @2helper() }").unwrap();
    let call = returned_call(&registry, "main");
    assert!(matches!(
        call.target,
        CallTarget::Func { scope: ScopeId(2), .. }
    ));

    let err = compile_in(&registry, 1, "func other() int { return @3helper() }").unwrap_err();
    assert_eq!(err.to_string(), "unknown identifier @3helper");
}

#[test]
fn duplicate_declarations() {
    let err = compile_err("func a {}\ncontract a {}");
    assert_eq!(err.code(), ErrorCode::E2005);
    let err = compile_err("func a {\n var x int\n var x string\n}");
    assert_eq!(err.code(), ErrorCode::E2005);
}

// === Signature checks ===

#[test]
fn unknown_identifier() {
    let err = compile_err("contract seterr {\n func getset string {\n var i int\n i = MyFunc(\"qqq\", 10)\n }\n}");
    assert_eq!(err.to_string(), "unknown identifier MyFunc");
    assert_eq!(err.code(), ErrorCode::E2001);
    assert_eq!(err.position().line, 4);

    let err = compile_err("func f { x = 1 }");
    assert_eq!(err.to_string(), "unknown identifier x");
}

#[test]
fn native_arity() {
    let err = compile_err("func exttest() string {\n return Replace(\"text\", \"t\")\n}");
    assert_eq!(err.to_string(), "function Replace must have 4 parameters");
    assert_eq!(err.code(), ErrorCode::E2002);

    let err = compile_err("func f() { Settings(\"x\") }");
    assert_eq!(err.to_string(), "function Settings must have 2 parameters");
}

#[test]
fn user_arity_and_types() {
    let decl = "func mytest(first string, second int) string { return first }\n";
    let err = compile_err(&format!("{decl}func test() {{ return mytest(\"one\", \"two\") }}"));
    assert_eq!(err.to_string(), "parameter 2 has wrong type");
    assert_eq!(err.code(), ErrorCode::E2004);

    let err = compile_err(&format!("{decl}func test() string {{ return mytest(\"one\") }}"));
    assert_eq!(err.to_string(), "wrong count of parameters");
    assert_eq!(err.code(), ErrorCode::E2003);

    // numbers convert into each other; untyped values are checked at run time
    compile(&format!(
        "{decl}func test() string {{ var m map\n return mytest(m[\"a\"], 1.5) }}"
    ))
    .unwrap();
}

#[test]
fn variadic_accepts_any_count() {
    compile(
        "func sum(out string, values ...) string { return out }\n\
         func t() string { return sum(\"a\") + sum(\"b\", 1, 2, \"c\") }",
    )
    .unwrap();
    let err = compile_err(
        "func sum(out string, values ...) string { return out }\nfunc t() string { return sum() }",
    );
    assert_eq!(err.code(), ErrorCode::E2003);
}

#[test]
fn spread_defers_count_checks() {
    compile(
        "func t() string {\n var a array\n return Sprintf(\"%s %d\", a...)\n}\n\
         func u(x int, y int) int { return x }\n\
         func v() int {\n var a array\n return u(a...)\n}",
    )
    .unwrap();
}

// === Chained calls ===

#[test]
fn declared_tails_in_any_order() {
    let registry = compile(
        "func DBFind(table string).Columns(columns string).Where(format string, tail ...) string {\n\
         return table\n}\n\
         func names() string {\n return DBFind(\"t\").Where(\"id=?\", 1, 2).Columns(\"c\")\n}",
    )
    .unwrap();
    let call = returned_call(&registry, "names");
    assert_eq!(target_name(&call), "DBFind");
    assert_eq!(call.args.len(), 1);
    assert_eq!(call.tails[0].as_ref().map(Vec::len), Some(1));
    assert_eq!(call.tails[1].as_ref().map(Vec::len), Some(3));
}

#[test]
fn omitted_tails_stay_empty() {
    let registry = compile(
        "func DBFind(table string).Columns(columns string).Limit(limit int) string { return table }\n\
         func names() string { return DBFind(\"t\").Limit(10) }",
    )
    .unwrap();
    let call = returned_call(&registry, "names");
    assert!(call.tails[0].is_none());
    assert!(call.tails[1].is_some());
}

#[test]
fn undeclared_segment_pipes_the_receiver() {
    let registry = compile(
        "func Row(list array) map { var m map\n return m }\n\
         func GetData().WhereId(id int) array { var a array\n return a }\n\
         func result() map { return GetData().WhereId(123).Row() }",
    )
    .unwrap();
    let call = returned_call(&registry, "result");
    assert_eq!(target_name(&call), "Row");
    assert_eq!(call.args.len(), 1);
    let ExprKind::Call(inner) = &call.args[0].expr.kind else {
        panic!("receiver should be the GetData call");
    };
    assert_eq!(target_name(inner), "GetData");
    assert!(inner.tails[0].is_some());
}

#[test]
fn pipeline_checks_receiver_type() {
    let err = compile_err(
        "func Row(list array) map { var m map\n return m }\nfunc r() map { return \"x\".Row() }",
    );
    assert_eq!(err.to_string(), "parameter 1 has wrong type");
}

#[test]
fn tail_used_twice() {
    let err = compile_err(
        "func F().A(x int) int { return x }\nfunc g() int { return F().A(1).A(2) }",
    );
    assert_eq!(err.code(), ErrorCode::E2007);
}

#[test]
fn tail_argument_checks() {
    let err = compile_err(
        "func F().A(x int) int { return x }\nfunc g() int { return F().A(\"s\") }",
    );
    assert_eq!(err.to_string(), "parameter 1 has wrong type");
}

// === Statements ===

#[test]
fn loop_control_outside_loop() {
    let err = compile_err("func f { break }");
    assert_eq!(err.code(), ErrorCode::E2006);
    compile("func f {\n while true {\n if 1 { break }\n continue\n }\n}").unwrap();
}

#[test]
fn assignment_counts() {
    let err = compile_err("func f {\n var a, b int\n a, b = 1\n}");
    assert_eq!(err.code(), ErrorCode::E2009);
    compile("func two() int { return 1, 2 }\nfunc f {\n var a, b int\n a, b = two()\n}").unwrap();
}

#[test]
fn block_locals_are_scoped() {
    let err = compile_err("func f {\n if true {\n var x int\n }\n x = 1\n}");
    assert_eq!(err.to_string(), "unknown identifier x");
}

#[test]
fn contract_settings_are_folded() {
    let registry = compile(
        "contract sets {\n settings {\n val = 1.56\n rate = 100000000000\n name = \"Name parameter\"\n }\n action { $result = Settings(\"@1sets\", \"name\") }\n}",
    )
    .unwrap();
    let contract = registry.contract(ScopeId(1), "sets").unwrap();
    assert_eq!(contract.settings["val"], Value::Float(1.56));
    assert_eq!(contract.settings["rate"], Value::Int(100_000_000_000));
    assert_eq!(contract.settings["name"], Value::string("Name parameter"));
    assert!(contract.action.is_some());
}

#[test]
fn nested_functions_resolve_first() {
    let registry = compile(
        "func cond() string { return \"top\" }\n\
         contract vars {\n func cond() string { return \"vars\" }\n func use() string { return cond() }\n}",
    )
    .unwrap();
    let contract = registry.contract(ScopeId(1), "vars").unwrap();
    let func = contract.func("use").unwrap();
    let StmtKind::Return(values) = &func.body.stmts[0].kind else {
        panic!("expected return");
    };
    let ExprKind::Call(call) = &values[0].kind else {
        panic!("expected call");
    };
    assert!(matches!(
        &call.target,
        CallTarget::Func { contract: Some(c), .. } if c == "vars"
    ));
    assert_eq!(func.qualified_name(), "vars.use");
}

// === Names ===

#[test]
fn scope_prefixes() {
    assert_eq!(split_scope("@22sets"), (Some(ScopeId(22)), "sets"));
    assert_eq!(split_scope("sets"), (None, "sets"));
    assert_eq!(split_scope("@22"), (None, "@22"));
    assert_eq!(split_scope("@x"), (None, "@x"));
}
