//! Parser tests, grouped by syntactic category.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod exprs;

use pact_ir::{Block, Expr, ExprKind, FuncDecl, Item, Module, Stmt, StmtKind};

use crate::{parse, ParseError};

pub(super) fn parse_source(source: &str) -> Result<Module, ParseError> {
    let tokens = pact_lexer::tokenize(source).expect("test source should lex");
    parse(&tokens)
}

pub(super) fn parse_ok(source: &str) -> Module {
    match parse_source(source) {
        Ok(module) => module,
        Err(err) => panic!("parse failed: {err}"),
    }
}

/// First function of a module.
pub(super) fn first_func(module: &Module) -> &FuncDecl {
    match &module.items[0] {
        Item::Func(func) => func,
        Item::Contract(c) => panic!("expected func, found contract {}", c.name),
    }
}

/// Body of the single function in `func t { <body> }`.
pub(super) fn body_of(body: &str) -> Block {
    let module = parse_ok(&format!("func t {{\n{body}\n}}"));
    first_func(&module).body.clone()
}

/// The expression of `return <expr>`.
pub(super) fn expr_of(source: &str) -> Expr {
    let block = body_of(&format!("return {source}"));
    match block.stmts.into_iter().next() {
        Some(Stmt {
            kind: StmtKind::Return(mut exprs),
            ..
        }) => exprs.remove(0),
        other => panic!("expected return, found {other:?}"),
    }
}

pub(super) fn kind_of(source: &str) -> ExprKind {
    expr_of(source).kind
}
