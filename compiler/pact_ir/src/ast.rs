//! Parsed syntax tree.
//!
//! A compile unit is a [`Module`]: a sequence of top-level contracts and
//! functions. Nodes own their children directly; the tree lives only until
//! the binder has lowered it.

use std::fmt;

use crate::{ParamType, Span};

/// A parsed compile unit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Module {
    pub items: Vec<Item>,
}

/// Top-level declaration.
#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    Contract(ContractDecl),
    Func(FuncDecl),
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Item::Contract(c) => &c.name,
            Item::Func(f) => &f.name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Item::Contract(c) => c.span,
            Item::Func(f) => f.span,
        }
    }
}

/// `contract Name { data {..} settings {..} conditions {..} action {..} func .. }`
#[derive(Clone, Debug, PartialEq)]
pub struct ContractDecl {
    pub name: String,
    pub data: Vec<DataField>,
    pub settings: Vec<Setting>,
    pub conditions: Option<Block>,
    pub action: Option<Block>,
    pub funcs: Vec<FuncDecl>,
    pub span: Span,
}

/// Field of a contract `data` section.
#[derive(Clone, Debug, PartialEq)]
pub struct DataField {
    pub name: String,
    pub ty: ParamType,
    pub optional: bool,
    pub span: Span,
}

/// `name = literal` inside a `settings` section.
#[derive(Clone, Debug, PartialEq)]
pub struct Setting {
    pub name: String,
    pub value: Expr,
    pub span: Span,
}

/// `func name(params).Tail(params) result { body }`
#[derive(Clone, Debug, PartialEq)]
pub struct FuncDecl {
    pub name: String,
    pub params: Vec<Param>,
    /// Declared tail sections, in declaration order.
    pub tails: Vec<TailDecl>,
    pub result: Option<ParamType>,
    pub body: Block,
    pub span: Span,
}

/// `.Name(params)` section of a function declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct TailDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub span: Span,
}

/// A declared parameter. A variadic parameter (`name ...`) has type
/// `array` and is always last in its list.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: ParamType,
    pub variadic: bool,
    pub span: Span,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `var a b int, s string`
    Var(Vec<VarDecl>),
    /// `a, b[0] = x, y`
    Assign {
        targets: Vec<Place>,
        values: Vec<Expr>,
    },
    /// `if c {..} elif c {..} else {..}`
    If {
        branches: Vec<(Expr, Block)>,
        else_block: Option<Block>,
    },
    While {
        cond: Expr,
        body: Block,
    },
    Return(Vec<Expr>),
    /// `error expr`, `warning expr`, `info expr`
    Signal {
        kind: SignalKind,
        message: Expr,
    },
    Break,
    Continue,
    Expr(Expr),
}

#[derive(Clone, Debug, PartialEq)]
pub struct VarDecl {
    pub name: String,
    pub ty: ParamType,
    pub span: Span,
}

/// Assignable location: a variable followed by zero or more index keys.
#[derive(Clone, Debug, PartialEq)]
pub struct Place {
    pub root: PlaceRoot,
    pub path: Vec<Expr>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaceRoot {
    Local(String),
    /// `$name`
    Ext(String),
    /// `$parent.name`
    Parent(String),
}

/// Kind of script-raised signal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Error,
    Warning,
    Info,
}

impl SignalKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            SignalKind::Error => "error",
            SignalKind::Warning => "warning",
            SignalKind::Info => "info",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<Expr>),
    Map(Vec<MapEntry>),
    Ident(String),
    /// `$name`
    ExtVar(String),
    /// `$parent.name`
    ParentVar(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Index {
        target: Box<Expr>,
        index: Box<Expr>,
    },
    /// `expr.name` without an argument list.
    Field {
        target: Box<Expr>,
        name: String,
    },
    /// `name(args)` or `@<scope>name(args)`.
    Call {
        scope: Option<u32>,
        name: String,
        args: Vec<Expr>,
    },
    /// `receiver.Name(args)`: either a declared tail section of the call
    /// at the head of the chain, or a pipeline call taking the receiver as
    /// its first argument. The binder decides which.
    TailCall {
        receiver: Box<Expr>,
        name: String,
        args: Vec<Expr>,
    },
    /// `expr...` in an argument list.
    Spread(Box<Expr>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapEntry {
    pub key: Expr,
    pub value: Expr,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

impl BinaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    #[inline]
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Lt
                | BinaryOp::LtEq
                | BinaryOp::Gt
                | BinaryOp::GtEq
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}
