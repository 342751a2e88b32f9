//! Binding outcomes: resolution, signature checks, scopes, redeployment.

use pactc::{OwnerInfo, ScopeId, Value, ValueMap};
use pretty_assertions::assert_eq;

use crate::common::{outcome, vm};

#[test]
fn unknown_identifier() {
    let source = r#"contract seterr {
            func getset string {
                var i int
                i = MyFunc("qqq", 10)
                return "OK"
            }
        }"#;
    assert_eq!(outcome(source, "seterr.getset"), "unknown identifier MyFunc");
}

#[test]
fn host_function_arity() {
    let source = r#"func exttest() string {
            return Replace("text", "t")
        }"#;
    assert_eq!(
        outcome(source, "exttest"),
        "function Replace must have 4 parameters"
    );
}

#[test]
fn user_function_signature() {
    let wrong_type = r#"func mytest(first string, second int) string {
            return Sprintf("%s %d", first, second)
        }
        func test() {
            return mytest("one", "two")
        }"#;
    assert_eq!(outcome(wrong_type, "test"), "parameter 2 has wrong type");

    let wrong_count = r#"func mytest(first string, second int) string {
            return Sprintf("%s %d", first, second)
        }
        func test() string {
            return mytest("one")
        }"#;
    assert_eq!(outcome(wrong_count, "test"), "wrong count of parameters");
}

#[test]
fn scopes_are_isolated() {
    let vm = vm();
    vm.compile(r#"func name string { return "first" }"#, OwnerInfo::new(1))
        .unwrap();
    vm.compile(r#"func name string { return "second" }"#, OwnerInfo::new(2))
        .unwrap();

    let mut env = ValueMap::new();
    assert_eq!(
        vm.call("@1name", Vec::new(), &mut env).unwrap(),
        vec![Value::string("first")]
    );
    assert_eq!(
        vm.call("@2name", Vec::new(), &mut env).unwrap(),
        vec![Value::string("second")]
    );
}

#[test]
fn redeploy_replaces_and_existing_callers_see_it() {
    let vm = vm();
    let owner = OwnerInfo::new(5);
    vm.compile(
        "func rate int { return 1 }\nfunc price(n int) int { return n * rate() }",
        owner,
    )
    .unwrap();
    vm.compile("func rate int { return 3 }", owner).unwrap();

    assert_eq!(
        vm.call("@5price", vec![Value::Int(7)], &mut ValueMap::new())
            .unwrap(),
        vec![Value::Int(21)]
    );
    assert_eq!(vm.names(ScopeId(5)), vec!["price", "rate"]);
}

#[test]
fn cross_scope_calls() {
    let vm = vm();
    vm.compile(
        r#"func empty(s string, n int) string { return Sprintf("%s:%d", s, n) }"#,
        OwnerInfo::new(26),
    )
    .unwrap();
    vm.compile(
        r#"func caller string { return @26empty("a", 10) }"#,
        OwnerInfo::new(1),
    )
    .unwrap();
    assert_eq!(
        vm.call("@1caller", Vec::new(), &mut ValueMap::new()).unwrap(),
        vec![Value::string("a:10")]
    );
}
