//! Call resolution and chained `.Name(..)` segments.
//!
//! A chain `f(a).A(x).B(y)` is bound left to right. A segment naming a
//! declared tail section of the call at hand fills that section; any other
//! segment becomes a call of `Name` with the value built so far as its
//! first argument, and binding continues against that call's own tails.

use std::sync::Arc;

use pact_ir::{self as ast, Item, Param, ParamType, ScopeId, Span, TailDecl};

use super::expr::Typed;
use super::{unknown, Binder};
use crate::ir::{Arg, Call, CallTarget, Expr, ExprKind, Intrinsic, Object};
use crate::{BindError, BindErrorKind, NativeFn};

/// Whether an expression produces a call's values directly.
pub(super) fn is_call(expr: &ast::Expr) -> bool {
    matches!(
        expr.kind,
        ast::ExprKind::Call { .. } | ast::ExprKind::TailCall { .. }
    )
}

/// A resolved callee and the signature to check its arguments against.
enum Callee<'a> {
    User {
        target: CallTarget,
        params: &'a [Param],
        tails: &'a [TailDecl],
        result: Option<ParamType>,
    },
    Contract(CallTarget),
    Native(Arc<NativeFn>),
    Intrinsic(Intrinsic),
}

/// A call whose declared tail sections may still be filled.
struct PendingCall<'a> {
    call: Call,
    tails: &'a [TailDecl],
    result: ParamType,
    span: Span,
}

enum Chain<'a> {
    Call(PendingCall<'a>),
    Value(Typed),
}

impl Chain<'_> {
    fn finish(self) -> Typed {
        match self {
            Chain::Call(pending) => (
                Expr::new(ExprKind::Call(Box::new(pending.call)), pending.span),
                pending.result,
            ),
            Chain::Value(typed) => typed,
        }
    }
}

impl<'a> Binder<'a> {
    pub(super) fn bind_call_chain(&mut self, expr: &ast::Expr) -> Result<Typed, BindError> {
        let mut segments = Vec::new();
        let mut base = expr;
        while let ast::ExprKind::TailCall {
            receiver,
            name,
            args,
        } = &base.kind
        {
            segments.push((name.as_str(), args.as_slice(), base.span));
            base = receiver;
        }

        let mut chain = match &base.kind {
            ast::ExprKind::Call { scope, name, args } => {
                let callee = self.resolve(*scope, name, base.span)?;
                Chain::Call(self.start_call(callee, None, args, base.span)?)
            }
            _ => Chain::Value(self.bind_typed(base)?),
        };
        // segments were collected outermost first
        for (name, args, span) in segments.into_iter().rev() {
            chain = self.apply_segment(chain, name, args, span)?;
        }
        Ok(chain.finish())
    }

    fn apply_segment(
        &mut self,
        chain: Chain<'a>,
        name: &str,
        args: &[ast::Expr],
        span: Span,
    ) -> Result<Chain<'a>, BindError> {
        let chain = match chain {
            Chain::Call(mut pending) => {
                match pending.tails.iter().position(|tail| tail.name == name) {
                    Some(pos) => {
                        if pending.call.tails[pos].is_some() {
                            return Err(BindError::new(
                                BindErrorKind::TailReused {
                                    name: name.to_string(),
                                },
                                span,
                            ));
                        }
                        let (args, types) = self.bind_args(args)?;
                        check_params(&pending.tails[pos].params, &args, &types)
                            .map_err(|kind| BindError::new(kind, span))?;
                        pending.call.tails[pos] = Some(args);
                        pending.span = span;
                        return Ok(Chain::Call(pending));
                    }
                    None => Chain::Call(pending),
                }
            }
            value @ Chain::Value(_) => value,
        };
        let receiver = chain.finish();
        let callee = self.resolve(None, name, span)?;
        Ok(Chain::Call(self.start_call(
            callee,
            Some(receiver),
            args,
            span,
        )?))
    }

    /// Bind the arguments of a call, the receiver of a pipeline segment
    /// first, and check them against the callee's signature.
    fn start_call(
        &mut self,
        callee: Callee<'a>,
        receiver: Option<Typed>,
        args: &[ast::Expr],
        span: Span,
    ) -> Result<PendingCall<'a>, BindError> {
        let (mut args, mut types) = self.bind_args(args)?;
        if let Some((expr, ty)) = receiver {
            args.insert(0, Arg {
                expr,
                spread: false,
            });
            types.insert(0, ty);
        }

        let no_tails: &'a [TailDecl] = &[];
        let (target, tails, result) = match callee {
            Callee::User {
                target,
                params,
                tails,
                result,
            } => {
                check_params(params, &args, &types).map_err(|kind| BindError::new(kind, span))?;
                (target, tails, result.unwrap_or(ParamType::Any))
            }
            Callee::Contract(target) => (target, no_tails, ParamType::Any),
            Callee::Native(native) => {
                check_native(&native, &args, &types).map_err(|kind| BindError::new(kind, span))?;
                let result = native.result.unwrap_or(ParamType::Any);
                (CallTarget::Native(native), no_tails, result)
            }
            Callee::Intrinsic(intrinsic) => {
                if !has_spread(&args) && args.len() != intrinsic.arity() {
                    return Err(BindError::new(
                        BindErrorKind::HostArity {
                            name: intrinsic.name().to_string(),
                            expected: intrinsic.arity(),
                        },
                        span,
                    ));
                }
                (CallTarget::Intrinsic(intrinsic), no_tails, ParamType::Any)
            }
        };
        Ok(PendingCall {
            call: Call {
                target,
                args,
                tails: vec![None; tails.len()],
            },
            tails,
            result,
            span,
        })
    }

    fn bind_args(&mut self, args: &[ast::Expr]) -> Result<(Vec<Arg>, Vec<ParamType>), BindError> {
        let mut bound = Vec::with_capacity(args.len());
        let mut types = Vec::with_capacity(args.len());
        for arg in args {
            let (expr, ty, spread) = match &arg.kind {
                ast::ExprKind::Spread(inner) => {
                    let (expr, _) = self.bind_typed(inner)?;
                    (expr, ParamType::Any, true)
                }
                _ => {
                    let (expr, ty) = self.bind_typed(arg)?;
                    (expr, ty, false)
                }
            };
            bound.push(Arg { expr, spread });
            types.push(ty);
        }
        Ok((bound, types))
    }

    /// Find what `name` refers to from the current position.
    ///
    /// Unqualified names are looked up in the enclosing contract's nested
    /// functions, the unit, the registry, the VM intrinsics and finally the
    /// extension table. `@N` names look only at scope `N`.
    fn resolve(&self, scope: Option<u32>, name: &str, span: Span) -> Result<Callee<'a>, BindError> {
        let owner = self.owner.scope;
        let callee = match scope.map(ScopeId) {
            Some(scope) if scope != owner => self.registry_callee(scope, name),
            Some(_) => self
                .unit_callee(name)
                .or_else(|| self.registry_callee(owner, name)),
            None => self
                .contract_callee(name)
                .or_else(|| self.unit_callee(name))
                .or_else(|| self.registry_callee(owner, name))
                .or_else(|| Intrinsic::from_name(name).map(Callee::Intrinsic))
                .or_else(|| self.extensions.get(name).cloned().map(Callee::Native)),
        };
        callee.ok_or_else(|| match scope {
            Some(scope) => unknown(&format!("@{scope}{name}"), span),
            None => unknown(name, span),
        })
    }

    fn contract_callee(&self, name: &str) -> Option<Callee<'a>> {
        let contract = self.contract?;
        let func = contract.funcs.iter().find(|func| func.name == name)?;
        Some(Callee::User {
            target: CallTarget::Func {
                scope: self.owner.scope,
                contract: Some(contract.name.clone()),
                name: name.to_string(),
            },
            params: &func.params,
            tails: &func.tails,
            result: func.result,
        })
    }

    fn unit_callee(&self, name: &str) -> Option<Callee<'a>> {
        let scope = self.owner.scope;
        let callee = match *self.unit.get(name)? {
            Item::Func(func) => Callee::User {
                target: CallTarget::Func {
                    scope,
                    contract: None,
                    name: name.to_string(),
                },
                params: &func.params,
                tails: &func.tails,
                result: func.result,
            },
            Item::Contract(_) => Callee::Contract(CallTarget::Contract {
                scope,
                name: name.to_string(),
            }),
        };
        Some(callee)
    }

    fn registry_callee(&self, scope: ScopeId, name: &str) -> Option<Callee<'a>> {
        let callee = match self.registry.lookup(scope, name)? {
            Object::Func(func) => Callee::User {
                target: CallTarget::Func {
                    scope,
                    contract: None,
                    name: name.to_string(),
                },
                params: &func.params,
                tails: &func.tails,
                result: func.result,
            },
            Object::Contract(_) => Callee::Contract(CallTarget::Contract {
                scope,
                name: name.to_string(),
            }),
        };
        Some(callee)
    }
}

fn has_spread(args: &[Arg]) -> bool {
    args.iter().any(|arg| arg.spread)
}

/// Check arguments against a user parameter list.
///
/// A trailing variadic parameter takes any number of arguments. Once a
/// spread argument appears the count and the positions after it are only
/// known at run time.
fn check_params(params: &[Param], args: &[Arg], types: &[ParamType]) -> Result<(), BindErrorKind> {
    let fixed = params.iter().take_while(|param| !param.variadic).count();
    let variadic = fixed < params.len();
    let count_ok = if variadic {
        args.len() >= fixed
    } else {
        args.len() == fixed
    };
    if !count_ok && !has_spread(args) {
        return Err(BindErrorKind::WrongParamCount);
    }
    check_types(params[..fixed].iter().map(|param| param.ty), args, types)
}

fn check_native(native: &NativeFn, args: &[Arg], types: &[ParamType]) -> Result<(), BindErrorKind> {
    if !has_spread(args) && !native.accepts_count(args.len()) {
        return Err(BindErrorKind::HostArity {
            name: native.name.clone(),
            expected: native.params.len(),
        });
    }
    check_types(native.params.iter().copied(), args, types)
}

fn check_types(
    params: impl Iterator<Item = ParamType>,
    args: &[Arg],
    types: &[ParamType],
) -> Result<(), BindErrorKind> {
    for (position, ((param, arg), ty)) in params.zip(args).zip(types).enumerate() {
        if arg.spread {
            break;
        }
        if !param.accepts(*ty) {
            return Err(BindErrorKind::WrongParamType {
                position: position + 1,
            });
        }
    }
    Ok(())
}
