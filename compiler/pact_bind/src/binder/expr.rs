//! Expression binding and static types.
//!
//! Every bound expression carries the type it is statically known to have,
//! `ParamType::Any` when that depends on run-time values. The types only
//! feed argument checks; execution is dynamically typed.

use pact_ir::{self as ast, BinaryOp, ParamType, UnaryOp};
use pact_value::Value;

use super::{unknown, Binder};
use crate::ir::{Expr, ExprKind};
use crate::{BindError, BindErrorKind};

pub(super) type Typed = (Expr, ParamType);

impl Binder<'_> {
    pub(super) fn bind_value(&mut self, expr: &ast::Expr) -> Result<Expr, BindError> {
        self.bind_typed(expr).map(|(expr, _)| expr)
    }

    pub(super) fn bind_typed(&mut self, expr: &ast::Expr) -> Result<Typed, BindError> {
        pact_stack::ensure_sufficient_stack(|| self.bind_typed_inner(expr))
    }

    fn bind_typed_inner(&mut self, expr: &ast::Expr) -> Result<Typed, BindError> {
        let span = expr.span;
        let (kind, ty) = match &expr.kind {
            ast::ExprKind::Nil => (ExprKind::Const(Value::Nil), ParamType::Any),
            ast::ExprKind::Bool(b) => (ExprKind::Const(Value::Bool(*b)), ParamType::Bool),
            ast::ExprKind::Int(n) => (ExprKind::Const(Value::Int(*n)), ParamType::Int),
            ast::ExprKind::Float(f) => (ExprKind::Const(Value::Float(*f)), ParamType::Float),
            ast::ExprKind::Str(s) => (
                ExprKind::Const(Value::string(s.as_str())),
                ParamType::String,
            ),
            ast::ExprKind::Array(items) => {
                let items = items
                    .iter()
                    .map(|item| self.bind_value(item))
                    .collect::<Result<_, _>>()?;
                (ExprKind::Array(items), ParamType::Array)
            }
            ast::ExprKind::Map(entries) => {
                let entries = entries
                    .iter()
                    .map(|entry| Ok((self.bind_value(&entry.key)?, self.bind_value(&entry.value)?)))
                    .collect::<Result<_, BindError>>()?;
                (ExprKind::Map(entries), ParamType::Map)
            }
            ast::ExprKind::Ident(name) => {
                let ty = self.local_type(name).ok_or_else(|| unknown(name, span))?;
                (ExprKind::Local(name.clone()), ty)
            }
            ast::ExprKind::ExtVar(name) => (ExprKind::Ext(name.clone()), ParamType::Any),
            ast::ExprKind::ParentVar(name) => (ExprKind::Parent(name.clone()), ParamType::Any),
            ast::ExprKind::Unary { op, operand } => {
                let (operand, operand_ty) = self.bind_typed(operand)?;
                let ty = match op {
                    UnaryOp::Not => ParamType::Bool,
                    UnaryOp::Neg if operand_ty.is_numeric() => operand_ty,
                    UnaryOp::Neg => ParamType::Any,
                };
                (
                    ExprKind::Unary {
                        op: *op,
                        operand: Box::new(operand),
                    },
                    ty,
                )
            }
            ast::ExprKind::Binary { op, left, right } => {
                let (left, left_ty) = self.bind_typed(left)?;
                let (right, right_ty) = self.bind_typed(right)?;
                (
                    ExprKind::Binary {
                        op: *op,
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    binary_type(*op, left_ty, right_ty),
                )
            }
            ast::ExprKind::Index { target, index } => (
                ExprKind::Index {
                    target: Box::new(self.bind_value(target)?),
                    index: Box::new(self.bind_value(index)?),
                },
                ParamType::Any,
            ),
            ast::ExprKind::Field { target, name } => (
                ExprKind::Field {
                    target: Box::new(self.bind_value(target)?),
                    name: name.clone(),
                },
                ParamType::Any,
            ),
            ast::ExprKind::Call { .. } | ast::ExprKind::TailCall { .. } => {
                return self.bind_call_chain(expr);
            }
            ast::ExprKind::Spread(_) => {
                return Err(BindError::new(BindErrorKind::MisplacedSpread, span));
            }
        };
        Ok((Expr::new(kind, span), ty))
    }
}

/// Static result type of a binary operation.
fn binary_type(op: BinaryOp, left: ParamType, right: ParamType) -> ParamType {
    if op.is_comparison() || matches!(op, BinaryOp::And | BinaryOp::Or) {
        return ParamType::Bool;
    }
    if op == BinaryOp::Add && left == ParamType::String {
        return ParamType::String;
    }
    match (left, right) {
        (ParamType::Money, other) | (other, ParamType::Money) if other.is_numeric() => {
            ParamType::Money
        }
        (ParamType::Float, other) | (other, ParamType::Float) if other.is_numeric() => {
            ParamType::Float
        }
        (ParamType::Int, ParamType::Int) => ParamType::Int,
        _ => ParamType::Any,
    }
}
