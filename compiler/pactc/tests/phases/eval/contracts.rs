//! Contracts: sections, data, nested calls, settings, intrinsics.

use pactc::{CallError, OwnerInfo, ScriptErrorKind, Value};
use pretty_assertions::assert_eq;

use crate::common::{host_env, outcome, vm, SCOPE};

#[test]
fn settings_and_call_contract() {
    let source = r#"contract sets {
            settings {
                val = 1.56
                rate = 100000000000
                name="Name parameter"
            }
            action {
                $result = Settings("@22sets","name")
            }
        }
        func result() string {
            var par map
            return CallContract("@22sets", par) + "=" + sets()
        }"#;
    assert_eq!(outcome(source, "result"), "Name parameter=Name parameter");
}

#[test]
fn contracts_calling_contracts() {
    let source = r#"contract my {
            data {
                Par1 int
                Par2 string
            }
            func conditions {
                var q int
                Println("Front", $Par1, $parent)
            }
            func action {
                Println("Main", $Par2, $ext)
            }
        }
        contract mytest {
            func init string {
                empty()
                my("Par1,Par2,ext", 123, "Parameter 2", "extended" )
                empty("toempty", 10)
                Println( "mytest", $parent)
                return "OK"
            }
        }
        contract empty {
            conditions {Println("EmptyCond")
                }
            action {
                Println("Empty", $parent)
                if 1 {
                    my("Par1,Par2,ext", 123, "Parameter 2", "extended" )
                }
            }
        }"#;
    assert_eq!(outcome(source, "mytest.init"), "OK");
}

#[test]
fn data_section_with_optional_fields() {
    let source = r#"contract my {
            data {
                PublicKey  bytes
                FirstName  string
                MiddleName string "optional"
                LastName   string
            }
            func init string {
                return "OK"
            }
        }"#;
    assert_eq!(outcome(source, "my.init"), "OK");
}

#[test]
fn contract_function_calls_top_level_function() {
    let source = r#"func my_test string {
            return Sprintf("Called my_test %s %d", "Ooops", 777)
        }

        contract my {
            func initf string {
                return Sprintf("%d %s %s %s", 65123 + (1001-500)*11, my_test(), "Test message", Sprintf("> %s %d <","OK", 999 ))
            }
        }"#;
    assert_eq!(
        outcome(source, "my.initf"),
        "70634 Called my_test Ooops 777 Test message > OK 999 <"
    );
}

#[test]
fn contract_functions_with_bodies_on_one_line() {
    let source = r#"contract vars {
            func cond() string {return "vars"}
            func actions() { var test int}
        }"#;
    assert_eq!(outcome(source, "vars.cond"), "vars");
}

#[test]
fn conditions_error_skips_action() {
    let vm = vm();
    vm.compile(
        r#"contract Transfer {
            data {
                Amount money
            }
            conditions {
                if $Amount <= 0 {
                    error "amount must be positive"
                }
            }
            action {
                $parent.applied = $Amount
                $result = "applied"
            }
        }"#,
        OwnerInfo::new(SCOPE),
    )
    .unwrap();

    let mut env = host_env(SCOPE);
    let err = vm
        .call("Transfer", vec![Value::Int(0)], &mut env)
        .unwrap_err();
    let CallError::Script(signal) = &err else {
        panic!("expected a script error, got {err:?}");
    };
    assert_eq!(signal.kind, ScriptErrorKind::Error);
    assert_eq!(
        err.to_string(),
        r#"{"type":"error","error":"amount must be positive"}"#
    );
    assert_eq!(env.get("applied"), None);

    let values = vm
        .call("Transfer", vec![Value::string("12.50")], &mut env)
        .unwrap();
    assert_eq!(values, vec![Value::string("applied")]);
    assert_eq!(env.get("applied").map(ToString::to_string).as_deref(), Some("12.5"));
}

#[test]
fn warning_reaches_the_caller() {
    let source = r#"contract Limit {
            conditions {
                warning "limit reached"
            }
        }
        func check string {
            Limit()
            return "unreachable"
        }"#;
    assert_eq!(
        outcome(source, "check"),
        r#"{"type":"warning","error":"limit reached"}"#
    );
}

#[test]
fn inactive_contracts_cannot_be_invoked() {
    let vm = vm();
    vm.compile(
        "contract Dormant {\n action {\n $result = 1\n }\n}",
        OwnerInfo::new(SCOPE).with_active(false),
    )
    .unwrap();
    let err = vm
        .call("Dormant", Vec::new(), &mut host_env(SCOPE))
        .unwrap_err();
    assert_eq!(err.to_string(), "contract Dormant is not active");
}
