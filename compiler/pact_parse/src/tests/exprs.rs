use pact_diagnostic::ErrorCode;
use pact_ir::{BinaryOp, ExprKind, UnaryOp};
use pretty_assertions::assert_eq;

use super::{body_of, expr_of, kind_of, parse_source};

/// Compact rendering of an expression tree for structural assertions.
fn sexp(kind: &ExprKind) -> String {
    match kind {
        ExprKind::Nil => "nil".to_string(),
        ExprKind::Bool(b) => b.to_string(),
        ExprKind::Int(n) => n.to_string(),
        ExprKind::Float(f) => format!("{f:?}"),
        ExprKind::Str(s) => format!("{s:?}"),
        ExprKind::Ident(name) => name.clone(),
        ExprKind::ExtVar(name) => format!("${name}"),
        ExprKind::ParentVar(name) => format!("$parent.{name}"),
        ExprKind::Unary { op, operand } => format!("({}{})", op.as_symbol(), sexp(&operand.kind)),
        ExprKind::Binary { op, left, right } => {
            format!("({} {} {})", sexp(&left.kind), op, sexp(&right.kind))
        }
        ExprKind::Index { target, index } => {
            format!("{}[{}]", sexp(&target.kind), sexp(&index.kind))
        }
        ExprKind::Field { target, name } => format!("{}.{name}", sexp(&target.kind)),
        ExprKind::Call { scope, name, args } => {
            let scope = scope.map(|s| format!("@{s}")).unwrap_or_default();
            format!("{scope}{name}({})", list(args.iter().map(|a| &a.kind)))
        }
        ExprKind::TailCall {
            receiver,
            name,
            args,
        } => format!(
            "{}.{name}({})",
            sexp(&receiver.kind),
            list(args.iter().map(|a| &a.kind))
        ),
        ExprKind::Spread(inner) => format!("{}...", sexp(&inner.kind)),
        ExprKind::Array(items) => format!("[{}]", list(items.iter().map(|a| &a.kind))),
        ExprKind::Map(entries) => {
            let entries: Vec<_> = entries
                .iter()
                .map(|e| format!("{}: {}", sexp(&e.key.kind), sexp(&e.value.kind)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

fn list<'a>(kinds: impl Iterator<Item = &'a ExprKind>) -> String {
    kinds.map(sexp).collect::<Vec<_>>().join(", ")
}

fn render(source: &str) -> String {
    sexp(&kind_of(source))
}

#[test]
fn precedence() {
    assert_eq!(render("1 + 2 * 3"), "(1 + (2 * 3))");
    assert_eq!(render("(1 + 2) * 3"), "((1 + 2) * 3)");
    assert_eq!(render("a || b && c == d"), "(a || (b && (c == d)))");
    assert_eq!(render("a < b == c >= d"), "((a < b) == (c >= d))");
    assert_eq!(render("10 - 4 - 3"), "((10 - 4) - 3)");
    assert_eq!(render("a % 2 / 3"), "((a % 2) / 3)");
}

#[test]
fn unary_and_negative_literals() {
    assert_eq!(kind_of("-5"), ExprKind::Int(-5));
    assert_eq!(kind_of("-1.5"), ExprKind::Float(-1.5));
    assert_eq!(render("!ok && -x > 0"), "((!ok) && ((-x) > 0))");
    let ExprKind::Unary { op, .. } = kind_of("--x") else {
        panic!("expected unary");
    };
    assert_eq!(op, UnaryOp::Neg);
}

#[test]
fn calls_and_qualified_calls() {
    assert_eq!(render("Sprintf(\"%d\", a, b)"), "Sprintf(\"%d\", a, b)");
    assert_eq!(render("@22sets(\"x\")"), "@22sets(\"x\")");
    assert_eq!(render("nop()"), "nop()");
}

#[test]
fn qualified_name_requires_call() {
    let err = parse_source("func t {\n return @1name\n}").unwrap_err();
    assert_eq!(err.code, ErrorCode::E1001);
}

#[test]
fn tail_chain() {
    assert_eq!(
        render("DBFind(\"mytable\").Columns(\"name,value\").Where(\"id=?\", 10).Limit(5)"),
        "DBFind(\"mytable\").Columns(\"name,value\").Where(\"id=?\", 10).Limit(5)"
    );
    let ExprKind::TailCall { name, receiver, .. } = kind_of("find().Row()") else {
        panic!("expected tail call");
    };
    assert_eq!(name, "Row");
    assert!(matches!(receiver.kind, ExprKind::Call { .. }));
}

#[test]
fn tail_chain_continues_across_lines() {
    assert_eq!(
        render("find(\"t\")\n  .Where(\"a\")\n  .One(\"name\")"),
        "find(\"t\").Where(\"a\").One(\"name\")"
    );
}

#[test]
fn spread_argument() {
    assert_eq!(render("Sprintf(\"%s %s\", myarr...)"), "Sprintf(\"%s %s\", myarr...)");
}

#[test]
fn ext_parent_and_fields() {
    assert_eq!(render("$parent"), "$parent");
    assert_eq!(render("$parent.total"), "$parent.total");
    assert_eq!(render("$glob.test"), "$glob.test");
    assert_eq!(render("$data[10]"), "$data[10]");
    assert_eq!(render("m[\"a\"][0]"), "m[\"a\"][0]");
}

#[test]
fn array_and_map_literals() {
    assert_eq!(render("[1, \"two\", [3]]"), "[1, \"two\", [3]]");
    assert_eq!(render("[]"), "[]");
    assert_eq!(
        render("{name: \"x\", \"id\": 1, nested: {a: []}}"),
        "{\"name\": \"x\", \"id\": 1, \"nested\": {\"a\": []}}"
    );
}

#[test]
fn soft_keywords_as_names() {
    assert_eq!(render("data + action"), "(data + action)");
}

#[test]
fn call_paren_does_not_cross_line() {
    let block = body_of("x = a\n(b)");
    assert_eq!(block.stmts.len(), 2);
}

#[test]
fn operator_at_line_start_ends_expression() {
    let block = body_of("x = 1\n-2");
    assert_eq!(block.stmts.len(), 2);
}

#[test]
fn operator_at_line_end_continues() {
    let ExprKind::Binary { op, .. } = kind_of("1 +\n 2") else {
        panic!("expected binary");
    };
    assert_eq!(op, BinaryOp::Add);
}

#[test]
fn expression_spans_carry_position() {
    let expr = expr_of("a + b");
    assert_eq!(expr.span.line, 2);
    assert_eq!(expr.span.col, 8);
}

#[test]
fn missing_operand() {
    let err = parse_source("func t {\n return 1 +\n}").unwrap_err();
    assert_eq!(err.code, ErrorCode::E1002);
    assert_eq!(err.to_string(), "expected expression, found `}` [Ln:3 Col:1]");
}
