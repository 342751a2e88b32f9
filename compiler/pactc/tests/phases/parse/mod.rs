//! Lexer and parser outcomes seen through the VM.

use pactc::{CompileError, OwnerInfo, Vm};
use pretty_assertions::assert_eq;

use crate::common::{outcome, vm, SCOPE};

#[test]
fn multi_line_expressions() {
    let source = r#"func line_test string {
        return "Start " +
        Sprintf( "My String %s %d %d",
                "Param 1", 24,
            345 + 789)
    }"#;
    assert_eq!(outcome(source, "line_test"), "Start My String Param 1 24 1134");
}

#[test]
fn comments_and_negative_literals() {
    let source = r#"func one() int {
            return 9
        }
        func signfunc string {
            var myarr array
            myarr[0] = 0
            myarr[1] = 1
            var i, k, j int
            k = one()-2
            j = /*comment*/-3
            i = lenArray(myarr) - 1
            return Sprintf("%s %d %d %d %d %d", "ok", lenArray(myarr)-1, i, k, j, -4)
        }"#;
    assert_eq!(outcome(source, "signfunc"), "ok 1 1 7 -3 -4");
}

#[test]
fn integer_literal_out_of_range() {
    let source = "func long() int {\n    return  99999999999999999999\n}\nfunc result() string {\n    return Sprintf(\"ok=%d\", long())\n}";
    let err = vm().compile(source, OwnerInfo::new(SCOPE)).unwrap_err();
    assert!(matches!(err, CompileError::Lex(_)));
    assert_eq!(
        err.to_string(),
        "integer literal \"99999999999999999999\": value out of range 99999999999999999999 [Ln:2 Col:13]"
    );
}

#[test]
fn syntax_error_has_position() {
    let err = vm()
        .compile("func f {\n  var x int\n  x = )\n}", OwnerInfo::new(SCOPE))
        .unwrap_err();
    assert!(matches!(err, CompileError::Parse(_)));
    assert_eq!(err.position().line, 3);
}

#[test]
fn contracts_list_recovers_names() {
    let source = r#"contract NewContract {
        conditions {
            while i < Len(list) {
                warning Sprintf("Contract or function %s exists", list[i] )
        }
        action {
        }
        func price() int {
            return  SysParamInt("contract_price")
        }
    }func MyFunc {}"#;
    // The unbalanced body swallows what follows it.
    assert_eq!(Vm::contracts_list(source), vec!["NewContract".to_string()]);

    let names = Vm::contracts_list("contract A {} func b {} contract C { func d {} }");
    assert_eq!(names, vec!["A", "b", "C"]);
}
