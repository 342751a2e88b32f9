//! Pact IR - shared syntax types
//!
//! This crate contains the data structures every phase of the Pact toolchain
//! agrees on:
//! - Spans and line/column positions for diagnostics
//! - Tokens and `TokenFlags` produced by the lexer
//! - The parsed syntax tree (contracts, functions, statements, expressions)
//! - Declared parameter types and the owner/scope key for registration
//!
//! The tree is built once by the parser and consumed by the binder, which
//! lowers it into the executable form owned by the registry.

pub mod ast;
mod owner;
mod span;
mod token;
mod ty;

pub use ast::{
    BinaryOp, Block, ContractDecl, DataField, Expr, ExprKind, FuncDecl, Item, MapEntry, Module,
    Param, Place, PlaceRoot, Setting, SignalKind, Stmt, StmtKind, TailDecl, UnaryOp, VarDecl,
};
pub use owner::{OwnerInfo, ScopeId};
pub use span::{LineIndex, Position, Span};
pub use token::{Token, TokenFlags, TokenKind};
pub use ty::ParamType;
