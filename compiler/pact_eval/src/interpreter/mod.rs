//! Tree-walking interpreter for bound declarations.
//!
//! # Architecture
//!
//! - `mod.rs` - interpreter state, entry points, statements
//! - `expr.rs` - expressions and assignment targets
//! - `call.rs` - functions, natives, contracts and VM intrinsics
//!
//! An interpreter serves one top-level call. Locals live in an
//! [`Environment`] that is replaced on every function or contract section
//! entry; `$` variables live in a frame stack shared by the whole call.
//! User functions and contracts are looked up by name in the [`Snapshot`]
//! the call started with: a declaration replaced by a later compile is
//! picked up by callers compiled before it, but only by calls started after
//! that compile.

mod call;
mod expr;

use pact_bind::ir::{Block, Stmt, StmtKind};
use pact_bind::{Contract, Func, Object, Snapshot};
use pact_ir::ScopeId;
use pact_value::{RuntimeError, RuntimeErrorKind, Value, ValueMap};
use smallvec::SmallVec;

use crate::errors::{EvalResult, ScriptError};
use crate::frames::Frames;
use crate::Environment;

/// Values produced by a call. Most calls return one.
pub type Values = SmallVec<[Value; 1]>;

/// Nesting limit for function and contract calls when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// How a statement finished.
#[derive(Debug)]
enum Flow {
    Normal,
    Break,
    Continue,
    Return(Values),
}

pub struct Interpreter {
    registry: Snapshot,
    frames: Frames,
    /// Locals of the body being executed.
    env: Environment,
    /// Scope of the declaration being executed; `@N` names and intrinsics
    /// resolve relative to it.
    scope: ScopeId,
    depth: usize,
    max_depth: usize,
}

impl Interpreter {
    /// Interpreter for a call made in `scope` with host variables `env`,
    /// resolving callees in `registry`.
    pub fn new(registry: Snapshot, scope: ScopeId, env: ValueMap) -> Self {
        Interpreter {
            registry,
            frames: Frames::new(env),
            env: Environment::new(),
            scope,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The host variables, including every `$` write made by the call.
    pub fn into_env(self) -> ValueMap {
        self.frames.into_env()
    }

    /// Call a registered function or contract.
    ///
    /// A contract's nested function runs inside a frame of its contract, as
    /// it would when called from the contract's own sections.
    pub fn call_object(&mut self, object: &Object, args: Vec<Value>) -> EvalResult<Vec<Value>> {
        match object {
            Object::Func(func) => match &func.contract {
                Some(name) => {
                    let contract = self.registry.contract(func.scope, name).ok_or_else(|| {
                        RuntimeError::new(RuntimeErrorKind::UnknownIdentifier {
                            name: func.qualified_name(),
                        })
                    })?;
                    self.call_nested(&contract, func, args)
                }
                None => self.call_func(func, args),
            },
            Object::Contract(contract) => self.call_contract(contract, args),
        }
    }

    /// Call a top-level function.
    pub fn call_func(&mut self, func: &Func, args: Vec<Value>) -> EvalResult<Vec<Value>> {
        let tails = vec![None; func.tails.len()];
        self.invoke(func, args.into(), tails)
            .map(SmallVec::into_vec)
    }

    /// Call `func` of `contract` from outside the contract.
    pub fn call_nested(
        &mut self,
        contract: &Contract,
        func: &Func,
        args: Vec<Value>,
    ) -> EvalResult<Vec<Value>> {
        self.frames.push(&contract.name, Default::default());
        let result = self.call_func(func, args);
        self.frames.pop();
        result
    }

    /// Invoke a contract with call arguments as a script would.
    pub fn call_contract(&mut self, contract: &Contract, args: Vec<Value>) -> EvalResult<Vec<Value>> {
        self.invoke_contract(contract, args.into())
            .map(|result| vec![result])
    }

    fn exec_block(&mut self, block: &Block) -> EvalResult<Flow> {
        self.env.push_scope();
        let flow = self.exec_stmts(&block.stmts);
        self.env.pop_scope();
        flow
    }

    fn exec_stmts(&mut self, stmts: &[Stmt]) -> EvalResult<Flow> {
        for stmt in stmts {
            match self.exec_stmt(stmt)? {
                Flow::Normal => {}
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> EvalResult<Flow> {
        match &stmt.kind {
            StmtKind::Var(vars) => {
                for (name, ty) in vars {
                    self.env.define(name, Value::zero(*ty), *ty);
                }
            }
            StmtKind::Assign { targets, values } => {
                let values = if targets.len() == values.len() {
                    values
                        .iter()
                        .map(|value| self.eval(value))
                        .collect::<EvalResult<Values>>()?
                } else {
                    // a single call distributing its results
                    let values = match values.first() {
                        Some(value) => self.eval_multi(value)?,
                        None => Values::new(),
                    };
                    if values.len() != targets.len() {
                        let err = RuntimeError::new(RuntimeErrorKind::AssignmentCount {
                            targets: targets.len(),
                            values: values.len(),
                        });
                        return Err(err.with_span(stmt.span).into());
                    }
                    values
                };
                for (target, value) in targets.iter().zip(values) {
                    self.assign(target, value)?;
                }
            }
            StmtKind::If {
                branches,
                else_block,
            } => {
                for (cond, block) in branches {
                    if self.eval(cond)?.is_truthy() {
                        return self.exec_block(block);
                    }
                }
                if let Some(block) = else_block {
                    return self.exec_block(block);
                }
            }
            StmtKind::While { cond, body } => {
                while self.eval(cond)?.is_truthy() {
                    match self.exec_block(body)? {
                        Flow::Break => break,
                        Flow::Normal | Flow::Continue => {}
                        flow @ Flow::Return(_) => return Ok(flow),
                    }
                }
            }
            StmtKind::Return(exprs) => {
                let values = match exprs.as_slice() {
                    [single] => self.eval_multi(single)?,
                    _ => exprs
                        .iter()
                        .map(|expr| self.eval(expr))
                        .collect::<EvalResult<Values>>()?,
                };
                return Ok(Flow::Return(values));
            }
            StmtKind::Signal { kind, message } => {
                let message = self.eval(message)?;
                tracing::debug!(kind = kind.as_str(), %message, "script signal");
                return Err(ScriptError::new(*kind, message.to_string()).into());
            }
            StmtKind::Break => return Ok(Flow::Break),
            StmtKind::Continue => return Ok(Flow::Continue),
            StmtKind::Expr(expr) => {
                self.eval_multi(expr)?;
            }
        }
        Ok(Flow::Normal)
    }

    /// Count a nested call against the depth limit.
    fn enter(&mut self) -> Result<(), RuntimeError> {
        if self.depth >= self.max_depth {
            return Err(RuntimeError::new(RuntimeErrorKind::DepthExceeded {
                limit: self.max_depth,
            }));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
