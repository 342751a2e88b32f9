//! Lowering of a parsed module into the bound tree.
//!
//! Binding runs in two passes over a compile unit. The first collects the
//! unit's own declarations so calls may refer to functions declared later
//! in the same source; the second binds bodies. Locals are tracked per
//! block with their declared types, which are used for argument checks.

mod calls;
mod expr;

use std::sync::Arc;

use pact_ir::{self as ast, ContractDecl, FuncDecl, Item, Module, OwnerInfo, ParamType, Span};
use pact_value::{Value, ValueMap};
use rustc_hash::FxHashMap;

use crate::ir::{Block, Contract, Func, Object, Place, Stmt, StmtKind};
use crate::{BindError, BindErrorKind, ExtensionTable, RegistryView};

/// Bind every declaration of `module` for registration under `owner`.
pub fn bind_module(
    module: &Module,
    owner: OwnerInfo,
    registry: RegistryView<'_>,
    extensions: &ExtensionTable,
) -> Result<Vec<Object>, BindError> {
    let mut unit = FxHashMap::default();
    for item in &module.items {
        if unit.insert(item.name(), item).is_some() {
            return Err(duplicate(item.name(), item.span()));
        }
    }
    let mut binder = Binder {
        owner,
        registry,
        extensions,
        unit,
        contract: None,
        locals: Vec::new(),
        loop_depth: 0,
    };
    module
        .items
        .iter()
        .map(|item| match item {
            Item::Func(decl) => binder.bind_func(decl).map(|f| Object::Func(Arc::new(f))),
            Item::Contract(decl) => binder
                .bind_contract(decl)
                .map(|c| Object::Contract(Arc::new(c))),
        })
        .collect()
}

pub(crate) struct Binder<'a> {
    owner: OwnerInfo,
    registry: RegistryView<'a>,
    extensions: &'a ExtensionTable,
    /// Declarations of the unit being bound, by name.
    unit: FxHashMap<&'a str, &'a Item>,
    /// Contract whose sections or nested functions are being bound.
    contract: Option<&'a ContractDecl>,
    locals: Vec<FxHashMap<String, ParamType>>,
    loop_depth: u32,
}

impl<'a> Binder<'a> {
    fn bind_contract(&mut self, decl: &'a ContractDecl) -> Result<Contract, BindError> {
        tracing::trace!(contract = %decl.name, "binding contract");
        self.contract = Some(decl);
        let result = self.bind_contract_parts(decl);
        self.contract = None;
        result
    }

    fn bind_contract_parts(&mut self, decl: &'a ContractDecl) -> Result<Contract, BindError> {
        let mut settings = ValueMap::new();
        for setting in &decl.settings {
            settings.insert(setting.name.clone(), literal_value(&setting.value.kind));
        }

        let mut funcs = FxHashMap::default();
        for func in &decl.funcs {
            let bound = self.bind_func(func)?;
            if funcs.insert(func.name.clone(), Arc::new(bound)).is_some() {
                return Err(duplicate(&func.name, func.span));
            }
        }

        let conditions = decl
            .conditions
            .as_ref()
            .map(|block| self.bind_body(&[], block))
            .transpose()?;
        let action = decl
            .action
            .as_ref()
            .map(|block| self.bind_body(&[], block))
            .transpose()?;

        Ok(Contract {
            name: decl.name.clone(),
            owner: self.owner,
            data: decl.data.clone(),
            settings,
            conditions,
            action,
            funcs,
            span: decl.span,
        })
    }

    fn bind_func(&mut self, decl: &'a FuncDecl) -> Result<Func, BindError> {
        let params: Vec<&ast::Param> = decl
            .params
            .iter()
            .chain(decl.tails.iter().flat_map(|tail| &tail.params))
            .collect();
        let body = self.bind_body(&params, &decl.body)?;
        Ok(Func {
            name: decl.name.clone(),
            scope: self.owner.scope,
            contract: self.contract.map(|c| c.name.clone()),
            params: decl.params.clone(),
            tails: decl.tails.clone(),
            result: decl.result,
            body,
            span: decl.span,
        })
    }

    /// Bind a function body or contract section in a fresh local frame.
    fn bind_body(&mut self, params: &[&ast::Param], block: &ast::Block) -> Result<Block, BindError> {
        let mut frame = FxHashMap::default();
        for param in params {
            let ty = if param.variadic {
                ParamType::Array
            } else {
                param.ty
            };
            if frame.insert(param.name.clone(), ty).is_some() {
                return Err(duplicate(&param.name, param.span));
            }
        }
        let saved = std::mem::replace(&mut self.locals, vec![frame]);
        let saved_depth = std::mem::take(&mut self.loop_depth);
        let result = self.bind_stmts(&block.stmts);
        self.locals = saved;
        self.loop_depth = saved_depth;
        result
    }

    /// Bind a nested block in its own local scope.
    fn bind_block(&mut self, block: &ast::Block) -> Result<Block, BindError> {
        self.locals.push(FxHashMap::default());
        let result = self.bind_stmts(&block.stmts);
        self.locals.pop();
        result
    }

    fn bind_stmts(&mut self, stmts: &[ast::Stmt]) -> Result<Block, BindError> {
        let stmts = stmts
            .iter()
            .map(|stmt| self.bind_stmt(stmt))
            .collect::<Result<_, _>>()?;
        Ok(Block { stmts })
    }

    fn bind_stmt(&mut self, stmt: &ast::Stmt) -> Result<Stmt, BindError> {
        let kind = match &stmt.kind {
            ast::StmtKind::Var(decls) => {
                let mut vars = Vec::with_capacity(decls.len());
                for decl in decls {
                    self.declare_local(&decl.name, decl.ty, decl.span)?;
                    vars.push((decl.name.clone(), decl.ty));
                }
                StmtKind::Var(vars)
            }
            ast::StmtKind::Assign { targets, values } => {
                let single_call = values.len() == 1 && calls::is_call(&values[0]);
                if targets.len() != values.len() && !single_call {
                    return Err(BindError::new(
                        BindErrorKind::AssignmentCount {
                            targets: targets.len(),
                            values: values.len(),
                        },
                        stmt.span,
                    ));
                }
                let values = values
                    .iter()
                    .map(|value| self.bind_value(value))
                    .collect::<Result<_, _>>()?;
                let targets = targets
                    .iter()
                    .map(|target| self.bind_place(target))
                    .collect::<Result<_, _>>()?;
                StmtKind::Assign { targets, values }
            }
            ast::StmtKind::If {
                branches,
                else_block,
            } => {
                let branches = branches
                    .iter()
                    .map(|(cond, block)| Ok((self.bind_value(cond)?, self.bind_block(block)?)))
                    .collect::<Result<_, BindError>>()?;
                let else_block = else_block
                    .as_ref()
                    .map(|block| self.bind_block(block))
                    .transpose()?;
                StmtKind::If {
                    branches,
                    else_block,
                }
            }
            ast::StmtKind::While { cond, body } => {
                let cond = self.bind_value(cond)?;
                self.loop_depth += 1;
                let body = self.bind_block(body);
                self.loop_depth -= 1;
                StmtKind::While { cond, body: body? }
            }
            ast::StmtKind::Return(values) => StmtKind::Return(
                values
                    .iter()
                    .map(|value| self.bind_value(value))
                    .collect::<Result<_, _>>()?,
            ),
            ast::StmtKind::Signal { kind, message } => StmtKind::Signal {
                kind: *kind,
                message: self.bind_value(message)?,
            },
            ast::StmtKind::Break => self.loop_control(StmtKind::Break, "break", stmt.span)?,
            ast::StmtKind::Continue => {
                self.loop_control(StmtKind::Continue, "continue", stmt.span)?
            }
            ast::StmtKind::Expr(expr) => StmtKind::Expr(self.bind_value(expr)?),
        };
        Ok(Stmt {
            kind,
            span: stmt.span,
        })
    }

    fn loop_control(
        &self,
        kind: StmtKind,
        keyword: &'static str,
        span: Span,
    ) -> Result<StmtKind, BindError> {
        if self.loop_depth == 0 {
            return Err(BindError::new(BindErrorKind::OutsideLoop { keyword }, span));
        }
        Ok(kind)
    }

    fn bind_place(&mut self, place: &ast::Place) -> Result<Place, BindError> {
        if let ast::PlaceRoot::Local(name) = &place.root {
            if self.local_type(name).is_none() {
                return Err(unknown(name, place.span));
            }
        }
        let path = place
            .path
            .iter()
            .map(|key| self.bind_value(key))
            .collect::<Result<_, _>>()?;
        Ok(Place {
            root: place.root.clone(),
            path,
            span: place.span,
        })
    }

    fn declare_local(&mut self, name: &str, ty: ParamType, span: Span) -> Result<(), BindError> {
        let Some(scope) = self.locals.last_mut() else {
            return Err(unknown(name, span));
        };
        if scope.insert(name.to_string(), ty).is_some() {
            return Err(duplicate(name, span));
        }
        Ok(())
    }

    fn local_type(&self, name: &str) -> Option<ParamType> {
        self.locals
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
    }
}

/// Value of a literal setting. Settings are checked to be literals when
/// parsed.
fn literal_value(kind: &ast::ExprKind) -> Value {
    match kind {
        ast::ExprKind::Bool(b) => Value::Bool(*b),
        ast::ExprKind::Int(n) => Value::Int(*n),
        ast::ExprKind::Float(f) => Value::Float(*f),
        ast::ExprKind::Str(s) => Value::string(s.as_str()),
        _ => Value::Nil,
    }
}

#[cold]
fn unknown(name: &str, span: Span) -> BindError {
    BindError::new(
        BindErrorKind::UnknownIdentifier {
            name: name.to_string(),
        },
        span,
    )
}

#[cold]
fn duplicate(name: &str, span: Span) -> BindError {
    BindError::new(
        BindErrorKind::Duplicate {
            name: name.to_string(),
        },
        span,
    )
}
