//! Bound, executable tree.
//!
//! Mirrors the parsed tree with names resolved: literals are folded into
//! values, identifiers are known locals, and every call carries its target.
//! Declarations are shared through `Arc` so an interpreter can keep running
//! a function while a later compile replaces it in the registry.

use std::fmt;
use std::sync::Arc;

use pact_ir::{
    BinaryOp, DataField, OwnerInfo, Param, ParamType, PlaceRoot, ScopeId, SignalKind, Span,
    TailDecl, UnaryOp,
};
use pact_value::{Value, ValueMap};
use rustc_hash::FxHashMap;

use crate::NativeFn;

/// A registered declaration.
#[derive(Clone, Debug)]
pub enum Object {
    Func(Arc<Func>),
    Contract(Arc<Contract>),
}

impl Object {
    pub fn name(&self) -> &str {
        match self {
            Object::Func(func) => &func.name,
            Object::Contract(contract) => &contract.name,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Func {
    pub name: String,
    pub scope: ScopeId,
    /// Enclosing contract of a nested function.
    pub contract: Option<String>,
    pub params: Vec<Param>,
    pub tails: Vec<TailDecl>,
    pub result: Option<ParamType>,
    pub body: Block,
    pub span: Span,
}

impl Func {
    /// `contract.name` for nested functions, `name` otherwise.
    pub fn qualified_name(&self) -> String {
        match &self.contract {
            Some(contract) => format!("{contract}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Contract {
    pub name: String,
    pub owner: OwnerInfo,
    pub data: Vec<DataField>,
    pub settings: ValueMap,
    pub conditions: Option<Block>,
    pub action: Option<Block>,
    pub funcs: FxHashMap<String, Arc<Func>>,
    pub span: Span,
}

impl Contract {
    #[inline]
    pub fn scope(&self) -> ScopeId {
        self.owner.scope
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.owner.active
    }

    pub fn func(&self, name: &str) -> Option<&Arc<Func>> {
        self.funcs.get(name)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

#[derive(Clone, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub enum StmtKind {
    /// Declare locals at their zero values.
    Var(Vec<(String, ParamType)>),
    Assign {
        targets: Vec<Place>,
        values: Vec<Expr>,
    },
    If {
        branches: Vec<(Expr, Block)>,
        else_block: Option<Block>,
    },
    While {
        cond: Expr,
        body: Block,
    },
    Return(Vec<Expr>),
    Signal {
        kind: SignalKind,
        message: Expr,
    },
    Break,
    Continue,
    Expr(Expr),
}

#[derive(Clone, Debug)]
pub struct Place {
    pub root: PlaceRoot,
    pub path: Vec<Expr>,
    pub span: Span,
}

#[derive(Clone, Debug)]
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

#[derive(Clone, Debug)]
pub enum ExprKind {
    Const(Value),
    Array(Vec<Expr>),
    Map(Vec<(Expr, Expr)>),
    Local(String),
    /// `$name`
    Ext(String),
    /// `$parent.name`
    Parent(String),
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
    Field {
        target: Box<Expr>,
        name: String,
    },
    Call(Box<Call>),
}

#[derive(Clone, Debug)]
pub struct Call {
    pub target: CallTarget,
    pub args: Vec<Arg>,
    /// Arguments of each declared tail section, by declaration order.
    /// `None` for a section the call site omits.
    pub tails: Vec<Option<Vec<Arg>>>,
}

#[derive(Clone, Debug)]
pub struct Arg {
    pub expr: Expr,
    /// `expr...`: the array's elements are passed as separate arguments.
    pub spread: bool,
}

/// What a call site invokes.
///
/// User declarations are named rather than held, so a redefinition is
/// picked up by callers compiled earlier.
#[derive(Clone, Debug)]
pub enum CallTarget {
    Func {
        scope: ScopeId,
        contract: Option<String>,
        name: String,
    },
    Contract {
        scope: ScopeId,
        name: String,
    },
    Native(Arc<NativeFn>),
    Intrinsic(Intrinsic),
}

/// Functions implemented by the VM itself because they need the registry.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Intrinsic {
    /// `CallContract(name, params)`
    CallContract,
    /// `Settings(contract, key)`
    Settings,
}

impl Intrinsic {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "CallContract" => Some(Intrinsic::CallContract),
            "Settings" => Some(Intrinsic::Settings),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Intrinsic::CallContract => "CallContract",
            Intrinsic::Settings => "Settings",
        }
    }

    pub const fn arity(self) -> usize {
        2
    }
}

impl fmt::Display for Intrinsic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
