//! Functions: control flow, locals, tails, coercions, host calls.

use pretty_assertions::assert_eq;

use crate::common::outcome;

#[test]
fn arrays_and_maps_from_host() {
    let source = r#"func proc(par string) string {
            return par + "proc"
        }
        func forarray string {
            var my map
            var ret array
            var myret array

            ret = GetArray()
            myret[1] = "Another "
            my = ret[0]
            my["par3"] = 3456
            ret[2] = "Test"
            return Sprintf("result=%s+%s+%d+%s", ret[1], my["par0"], my["par3"], myret[1] + ret[2])
        }"#;
    assert_eq!(
        outcome(source, "forarray"),
        "result=The second string+Parameter 0+3456+Another Test"
    );
}

#[test]
fn maps_and_host_globals() {
    let source = r#"func proc(par string) string {
            return par + "proc"
        }
        func formap string {
            var my map
            var ret map

            ret = GetMap()
            // Println(ret)
            my["par1"] = "my value" + proc(" space ")
            my["par2"] = 203 * (100-86)
            return Sprintf("result=%s+%d+%s+%s+%d", ret["par1"], my["par2"] + 32, my["par1"], proc($glob["test"] ), $glob["number"] )
        }"#;
    assert_eq!(
        outcome(source, "formap"),
        "result=Parameter 1+2874+my value space proc+String valueproc+1001"
    );
}

#[test]
fn loop_with_break_and_continue() {
    let source = r#"func nop {
            return
        }

        func loop string {
            var i int
            while true {//i < 10 {
                i=i+1
                if i==5 {
                    continue
                }
                if i == 121 {
                    i = i+ 4
                    break
                }
            }
            nop()
            return Sprintf("val=%d", i)
        }"#;
    assert_eq!(outcome(source, "loop"), "val=125");
}

#[test]
fn error_statement_payload() {
    let source = r#"func err_test string {
            if 1001.02 {
                error "Error message err_test"
            }
            return "OK"
        }"#;
    assert_eq!(
        outcome(source, "err_test"),
        r#"{"type":"error","error":"Error message err_test"}"#
    );
}

#[test]
fn multiple_declarations_and_assignment() {
    let source = r#"func temp3 string {
            var i1 i2 int, s1 string, s2 string
            i2, i1 = 348, 7
            if i1 > 5 {
                var i5 int, s3 string
                i5 = 26788
                s1 = "s1 string"
                i2 = (i1+2)*i5+i2
                s2 = Sprintf("temp 3 function %s %d", Sprintf("%s + %d", s1, i2), -1 )
            }
            return s2
        }"#;
    assert_eq!(
        outcome(source, "temp3"),
        "temp 3 function s1 string + 241440 -1"
    );
}

#[test]
fn nested_conditions_and_params() {
    let source = r#"func params2(myval int, mystr string ) string {
            if 101>myval {
                if myval == 90 {
                } else {
                    return Sprintf("myval=%d + %s", myval, mystr )
                }
            }
            return "OOPs"
        }
        func temp2 string {
            if true {
                return params2(51, "Params 2 test")
            }
        }"#;
    assert_eq!(outcome(source, "temp2"), "myval=51 + Params 2 test");
}

#[test]
fn host_variables_in_expressions() {
    let source = r#"func params(myval int, mystr string ) string {
            return Sprintf("Params function %d %s", 33 + myval + $test1, mystr + " end" )
        }
        func temp string {
            return "Prefix " + params(20, "Test string " + $test2)
        }"#;
    assert_eq!(
        outcome(source, "temp"),
        "Prefix Params function 154 Test string test 2 end"
    );
}

#[test]
fn variadic_tails() {
    let source = r#"func mytail(name string, tail ...) string {
            if lenArray(tail) == 0 {
                return name
            }
            if lenArray(tail) == 1 {
                return Sprintf("%s=%v ", name, tail[0])
            }
            return Sprintf("%s=%v+%v ", name, tail[1], tail[0])
        }
        func emptytail(tail ...) string {
            return Sprintf("%d ", lenArray(tail))
        }
        func sum(out string, values ...) string {
            var i, res int
            while i < lenArray(values) {
               res = res + values[i]
               i = i+1
            }
            return Sprintf(out, res)
        }
        func calltail() string {
            var out string
            out = emptytail() + emptytail(10) + emptytail("name1", "name2")
            out = out + mytail("OK") + mytail("1=", 11) + mytail("2=", "name", 11)
            return out + sum("Sum: %d", 10, 20, 30, 40)
        }"#;
    assert_eq!(
        outcome(source, "calltail"),
        "0 1 2 OK1==11 2==11+name Sum: 100"
    );
}

#[test]
fn declared_tail_sections() {
    let source = r#"func DBFind( table string).Columns(columns string)
        . Where(format string, tail ...). Limit(limit int).
        Offset(offset int) string  {
            Println("DBFind", table, tail)
            return Sprintf("%s %s %s %d %d=", table, columns, format, limit, offset)
        }
        func names() string {
            var out, cols string
            cols = "name,value"
            out = DBFind( "mytable") + DBFind( "keys"
                ).Columns(cols)+ DBFind( "keys"
                    ).Offset(199).Columns("qq"+"my")
            out = out + DBFind( "table").Columns("name").Where("id=?",
                100).Limit(10) + DBFind( "table").Where("request")
            return out
        }"#;
    assert_eq!(
        outcome(source, "names"),
        "mytable   0 0=keys name,value  0 0=keys qqmy  0 199=table name id=? 10 0=table  request 0 0="
    );
}

#[test]
fn empty_map_is_false() {
    let source = r#"func ifMap string {
            var m map
            if m {
                return "empty"
            }

            m["test"]=1
            if m {
                return "not empty"
            }

            return error "error"
        }"#;
    assert_eq!(outcome(source, "ifMap"), "not empty");
}

#[test]
fn pipeline_segments_and_empty_results() {
    let source = r#"func One(list array, name string) string {
            if list {
                var row map
                row = list[0]
                return row[name]
            }
            return nil
        }
        func Row(list array) map {
            var ret map
            if list {
                ret = list[0]
            }
            return ret
        }
        func GetData().WhereId(id int) array {
            var par array
            var item map
            item["id"] = str(id)
            item["name"] = "Test value " + str(id)
            par[0] = item
            return par
        }
        func GetEmpty().WhereId(id int) array {
            var par array
            return par
        }
        func result() string {
            var m map
            var s string
            m = GetData().WhereId(123).Row()
            s = GetEmpty().WhereId(1).One("name")
            if s != nil {
                return "problem"
            }
            return m["id"] + "=" + GetData().WhereId(100).One("name")
        }"#;
    assert_eq!(outcome(source, "result"), "123=Test value 100");
}

#[test]
fn host_array_extends_on_write() {
    let source = r#"func mapbug() string {
            $data[10] = "extend ok"
            return $data[10]
        }"#;
    assert_eq!(outcome(source, "mapbug"), "extend ok");
}

#[test]
fn spread_into_host_function() {
    let source = r#"func result() string {
            var myarr array
            myarr[0] = "string"
            myarr[1] = 7
            myarr[2] = "9th item"
            return Sprintf("RESULT=%s %d %v", myarr...)
        }"#;
    assert_eq!(outcome(source, "result"), "RESULT=string 7 9th item");
}

#[test]
fn spread_through_tails() {
    let source = r#"func find().Where(pattern string, params ...) string {
            return Sprintf(pattern, params ...)
        }
        func row().Where(pattern string, params ...) string {
            return find().Where(pattern, params ...)
        }
        func result() string {
            return row().Where("%d %d", 10, 20)
        }"#;
    assert_eq!(outcome(source, "result"), "10 20");
}

#[test]
fn numeric_strings_and_floats() {
    let source = r#"func result string {
            var arr array
            var mymap map
            arr[100000] = 0
            var i int
            while i < 100 {
                mymap[str(i)] = 10
                i = i + 1
            }
            i = i + "2"
            i = (i - "10")/"2"*"3"
            return Sprintf("%T %[1]v", .21 + i)
        }"#;
    assert_eq!(outcome(source, "result"), "float 138.21");
}

#[test]
fn money_counts_whole_units() {
    let source = r#"func money_test string {
            var my2, m1 money
            my2 = 100
            m1 = 1.2
            return Sprintf( "Account %v %v %v", my2/Money(3),  my2 - Money(5.6), m1*Money(5) + Money(my2))
        }"#;
    assert_eq!(outcome(source, "money_test"), "Account 33 95 105");
}

#[test]
fn money_reads_numeric_strings_exactly() {
    let source = r#"func exact string {
            return Sprintf("%v|%v", Money(0) + "12345678901234567890.5", Money(0) + Money("12345678901234567890.5"))
        }"#;
    assert_eq!(
        outcome(source, "exact"),
        "12345678901234567890.5|12345678901234567890.5"
    );
}

#[test]
fn if_elif_chains() {
    let source = r#"func result() string {
            var i, result int

            if true {
                if false {
                    result = 99
                } else {
                    result = 5
                }
            }
            if i == 1 {
                result = 20
            } elif i> 0 {
                result = 30
            }
            elif i == 0
            {
                result = result + 50
                if true {
                    i=10
                }
            } elif i==10 {
                Println("3")
                result = 0
                i=33
            } elif false {
                Println("4")
                result = 1
            }
            else
            {
                Println("5")
                result = 2
            }
            if i == 4 {
                result = result
            } elif i == 20 {
                result = 22
            } else {
                result = result + 23
                i = 11
            }
            if i == 11 {
                result = result + 7
            } else {
                result = 0
            }
            if result == 85 {
                if false {
                    result = 1
                } elif 0 {
                    result = 5
                } elif 1 {
                    result = result + 10
                }
            }
            if result == 10 {
                result = 11
            } elif result == 95 {
                result = result + 1
                if false {
                    result = 0
                } elif true {
                    result = result + 4
                }
            }
            return Sprintf("%d", result)
        }"#;
    assert_eq!(outcome(source, "result"), "100");
}

#[test]
fn division_by_zero_is_a_runtime_error() {
    let source = r#"func ratio(a int, b int) int {
            return a / b
        }
        func run string {
            return Sprintf("%d", ratio(1, 0))
        }"#;
    assert_eq!(outcome(source, "run"), "division by zero");
}
