//! Expressions and assignment targets.

use pact_bind::ir::{Expr, ExprKind, Place};
use pact_ir::{BinaryOp, PlaceRoot, Span};
use pact_value::{RuntimeError, RuntimeErrorKind, Value, ValueMap};
use smallvec::{smallvec, SmallVec};

use super::{Interpreter, Values};
use crate::errors::{CallError, EvalResult};
use crate::operators::{evaluate_binary, evaluate_unary};

/// Attach `span` to a runtime error raised while evaluating there.
fn at(span: Span) -> impl FnOnce(RuntimeError) -> CallError {
    move |err| CallError::Runtime(err.with_span(span))
}

/// One step of an index/field read chain, innermost first.
enum Access<'e> {
    Index(Value, Span),
    Field(&'e str, Span),
}

#[cold]
fn unknown_local(name: &str) -> RuntimeError {
    RuntimeError::new(RuntimeErrorKind::UnknownIdentifier {
        name: name.to_string(),
    })
}

impl Interpreter {
    /// Evaluate to a single value. A call yields its first result, or
    /// `nil` when it returns none.
    pub(super) fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        pact_stack::ensure_sufficient_stack(|| self.eval_inner(expr))
    }

    /// Evaluate keeping every result of a call.
    pub(super) fn eval_multi(&mut self, expr: &Expr) -> EvalResult<Values> {
        match &expr.kind {
            ExprKind::Call(call) => self.eval_call(call, expr.span),
            _ => Ok(smallvec![self.eval(expr)?]),
        }
    }

    fn eval_inner(&mut self, expr: &Expr) -> EvalResult<Value> {
        let span = expr.span;
        match &expr.kind {
            ExprKind::Const(value) => Ok(value.clone()),
            ExprKind::Array(items) => items
                .iter()
                .map(|item| self.eval(item))
                .collect::<EvalResult<Vec<_>>>()
                .map(Value::Array),
            ExprKind::Map(entries) => {
                let mut map = ValueMap::new();
                for (key, value) in entries {
                    let key = self.eval(key)?.to_key();
                    let value = self.eval(value)?;
                    map.insert(key, value);
                }
                Ok(Value::Map(map))
            }
            ExprKind::Local(name) => self
                .env
                .lookup(name)
                .cloned()
                .ok_or_else(|| at(span)(unknown_local(name))),
            ExprKind::Ext(name) => Ok(self.frames.get(name)),
            ExprKind::Parent(name) => Ok(self.frames.get_parent(name)),
            ExprKind::Unary { op, operand } => {
                let value = self.eval(operand)?;
                evaluate_unary(value, *op).map_err(at(span))
            }
            ExprKind::Binary {
                op: op @ (BinaryOp::And | BinaryOp::Or),
                left,
                right,
            } => {
                let left = self.eval(left)?.is_truthy();
                let result = match op {
                    BinaryOp::And if !left => false,
                    BinaryOp::Or if left => true,
                    _ => self.eval(right)?.is_truthy(),
                };
                Ok(Value::Bool(result))
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                evaluate_binary(left, right, *op).map_err(at(span))
            }
            ExprKind::Index { .. } | ExprKind::Field { .. } => self.eval_access(expr),
            ExprKind::Call(call) => Ok(self
                .eval_call(call, span)?
                .into_iter()
                .next()
                .unwrap_or_default()),
        }
    }

    /// Read an index/field chain such as `a[i].name[j]`.
    ///
    /// A chain rooted at a variable is walked by reference, so only the
    /// element finally read is copied.
    fn eval_access(&mut self, expr: &Expr) -> EvalResult<Value> {
        let mut chain: SmallVec<[&Expr; 4]> = SmallVec::new();
        let mut root = expr;
        while let ExprKind::Index { target, .. } | ExprKind::Field { target, .. } = &root.kind {
            chain.push(root);
            root = &**target;
        }

        let by_ref = matches!(&root.kind, ExprKind::Local(_) | ExprKind::Parent(_))
            || matches!(&root.kind, ExprKind::Ext(name) if name != "parent");
        let owned = if by_ref { None } else { Some(self.eval(root)?) };

        let mut steps: SmallVec<[Access<'_>; 4]> = SmallVec::new();
        for link in chain.iter().rev() {
            match &link.kind {
                ExprKind::Index { index, .. } => {
                    steps.push(Access::Index(self.eval(index)?, link.span));
                }
                ExprKind::Field { name, .. } => steps.push(Access::Field(name, link.span)),
                _ => {}
            }
        }

        let mut current = match (&owned, &root.kind) {
            (Some(value), _) => Some(value),
            (None, ExprKind::Local(name)) => Some(
                self.env
                    .lookup(name)
                    .ok_or_else(|| at(root.span)(unknown_local(name)))?,
            ),
            (None, ExprKind::Ext(name)) => self.frames.lookup(name),
            (None, ExprKind::Parent(name)) => self.frames.lookup_parent(name),
            (None, _) => None,
        };
        for step in &steps {
            let Some(value) = current else {
                break;
            };
            current = match step {
                Access::Index(key, span) => value.index_ref(key).map_err(at(*span))?,
                Access::Field(name, span) => value.field_ref(name).map_err(at(*span))?,
            };
        }
        Ok(current.cloned().unwrap_or_default())
    }

    /// Store `value` into an assignment target.
    ///
    /// A plain local is converted to its declared type. Writes through an
    /// index path extend arrays and create missing containers on the way.
    pub(super) fn assign(&mut self, place: &Place, value: Value) -> EvalResult<()> {
        let path = place
            .path
            .iter()
            .map(|key| self.eval(key))
            .collect::<EvalResult<Vec<_>>>()?;
        let slot = match &place.root {
            PlaceRoot::Local(name) if path.is_empty() => {
                return self.env.assign(name, value).map_err(at(place.span));
            }
            PlaceRoot::Local(name) => self
                .env
                .lookup_mut(name)
                .ok_or_else(|| at(place.span)(unknown_local(name)))?,
            PlaceRoot::Ext(name) => self.frames.slot(name),
            PlaceRoot::Parent(name) => self.frames.parent_slot(name),
        };
        if path.is_empty() {
            *slot = value;
            return Ok(());
        }
        slot.assign_path(&path, value).map_err(at(place.span))
    }
}
