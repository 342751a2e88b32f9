//! Calls: user functions, natives, contracts and VM intrinsics.

use pact_bind::ir::{Arg, Call, CallTarget, Intrinsic};
use pact_bind::{split_scope, Contract, Func, NativeFn};
use pact_ir::{DataField, Param, ParamType, Span};
use pact_value::{conversion_error, RuntimeError, RuntimeErrorKind, RuntimeResult, Value};
use rustc_hash::FxHashMap;
use smallvec::smallvec;

use super::{Flow, Interpreter, Values};
use crate::errors::{CallError, EvalResult};
use crate::Environment;

#[cold]
fn unknown(name: impl Into<String>) -> RuntimeError {
    RuntimeError::new(RuntimeErrorKind::UnknownIdentifier { name: name.into() })
}

impl Interpreter {
    pub(super) fn eval_call(&mut self, call: &Call, span: Span) -> EvalResult<Values> {
        self.dispatch(call).map_err(|err| match err {
            CallError::Runtime(err) => CallError::Runtime(err.with_span(span)),
            signal @ CallError::Script(_) => signal,
        })
    }

    fn dispatch(&mut self, call: &Call) -> EvalResult<Values> {
        let args = self.eval_args(&call.args)?;
        match &call.target {
            CallTarget::Func {
                scope,
                contract,
                name,
            } => {
                let func = self
                    .registry
                    .func(*scope, contract.as_deref(), name)
                    .ok_or_else(|| unknown(name.as_str()))?;
                let tails = call
                    .tails
                    .iter()
                    .map(|tail| tail.as_deref().map(|args| self.eval_args(args)).transpose())
                    .collect::<EvalResult<Vec<_>>>()?;
                tracing::trace!(func = %func.qualified_name(), %scope, "call");
                self.invoke(&func, args, tails)
            }
            CallTarget::Contract { scope, name } => {
                let contract = self
                    .registry
                    .contract(*scope, name)
                    .ok_or_else(|| unknown(name.as_str()))?;
                Ok(smallvec![self.invoke_contract(&contract, args)?])
            }
            CallTarget::Native(native) => {
                tracing::trace!(native = %native.name, "call");
                Ok(smallvec![call_native(native, args)?])
            }
            CallTarget::Intrinsic(intrinsic) => Ok(smallvec![self.call_intrinsic(*intrinsic, args)?]),
        }
    }

    /// Evaluate call arguments, expanding `arr...` into its elements.
    fn eval_args(&mut self, args: &[Arg]) -> EvalResult<Values> {
        let mut values = Values::with_capacity(args.len());
        for arg in args {
            match self.eval(&arg.expr)? {
                Value::Array(items) if arg.spread => values.extend(items),
                Value::Nil if arg.spread => {}
                value => values.push(value),
            }
        }
        Ok(values)
    }

    /// Run a user function with its own locals.
    ///
    /// `tails` holds the arguments of each declared tail section; an
    /// omitted section binds its parameters to zero values.
    pub(super) fn invoke(
        &mut self,
        func: &Func,
        args: Values,
        tails: Vec<Option<Values>>,
    ) -> EvalResult<Values> {
        let mut env = Environment::new();
        bind_params(&mut env, &func.params, args)?;
        for (decl, args) in func.tails.iter().zip(tails) {
            match args {
                Some(args) => bind_params(&mut env, &decl.params, args)?,
                None => {
                    for param in &decl.params {
                        let ty = local_type(param);
                        env.define(&param.name, Value::zero(ty), ty);
                    }
                }
            }
        }

        self.enter()?;
        let saved_env = std::mem::replace(&mut self.env, env);
        let saved_scope = std::mem::replace(&mut self.scope, func.scope);
        let flow = pact_stack::ensure_sufficient_stack(|| self.exec_stmts(&func.body.stmts));
        self.env = saved_env;
        self.scope = saved_scope;
        self.leave();

        let mut values = match flow? {
            Flow::Return(values) => values,
            Flow::Normal | Flow::Break | Flow::Continue => Values::new(),
        };
        if let (Some(ty), Some(first)) = (func.result, values.first_mut()) {
            *first = std::mem::take(first).convert_to(ty)?;
        }
        Ok(values)
    }

    /// Run a contract's `conditions` and then its `action`, in a new frame
    /// whose parent is the caller's. Returns the contract's `$result`.
    ///
    /// A signal raised by `conditions` skips `action`.
    pub(super) fn invoke_contract(&mut self, contract: &Contract, args: Values) -> EvalResult<Value> {
        if !contract.is_active() {
            return Err(RuntimeError::new(RuntimeErrorKind::InactiveContract {
                name: contract.name.clone(),
            })
            .into());
        }
        let vars = data_vars(contract, args)?;
        tracing::debug!(contract = %contract.name, scope = %contract.scope(), "invoking contract");

        self.enter()?;
        self.frames.push(&contract.name, vars);
        let saved_env = std::mem::take(&mut self.env);
        let saved_scope = std::mem::replace(&mut self.scope, contract.scope());
        let result = self.run_sections(contract);
        self.env = saved_env;
        self.scope = saved_scope;
        let value = self.frames.pop();
        self.leave();
        result.map(|()| value)
    }

    fn run_sections(&mut self, contract: &Contract) -> EvalResult<()> {
        for section in [&contract.conditions, &contract.action].into_iter().flatten() {
            self.env = Environment::new();
            pact_stack::ensure_sufficient_stack(|| self.exec_stmts(&section.stmts))?;
        }
        Ok(())
    }

    fn call_intrinsic(&mut self, intrinsic: Intrinsic, args: Values) -> EvalResult<Value> {
        if args.len() != intrinsic.arity() {
            return Err(RuntimeError::new(RuntimeErrorKind::HostArity {
                name: intrinsic.name().to_string(),
                expected: intrinsic.arity(),
            })
            .into());
        }
        let mut args = args.into_iter();
        let target = args.next().unwrap_or_default().to_key();
        let second = args.next().unwrap_or_default();

        let (scope, name) = split_scope(&target);
        let contract = self
            .registry
            .contract(scope.unwrap_or(self.scope), name)
            .ok_or_else(|| unknown(target.as_str()))?;
        match intrinsic {
            Intrinsic::CallContract => {
                let params = match second {
                    Value::Nil => Values::new(),
                    params @ Value::Map(_) => smallvec![params],
                    other => return Err(conversion_error(other.type_name(), "map").into()),
                };
                self.invoke_contract(&contract, params)
            }
            Intrinsic::Settings => Ok(contract
                .settings
                .get(&second.to_key())
                .cloned()
                .unwrap_or_default()),
        }
    }
}

/// Declared type of a parameter as a local.
fn local_type(param: &Param) -> ParamType {
    if param.variadic {
        ParamType::Array
    } else {
        param.ty
    }
}

/// Define parameters as locals. A trailing variadic parameter collects
/// the remaining arguments into an array.
fn bind_params(env: &mut Environment, params: &[Param], args: Values) -> RuntimeResult<()> {
    let fixed = params.iter().take_while(|param| !param.variadic).count();
    let rest = params.get(fixed);
    if args.len() < fixed || (rest.is_none() && args.len() > fixed) {
        return Err(RuntimeError::new(RuntimeErrorKind::WrongParamCount));
    }
    let mut args = args.into_iter();
    for (position, (param, arg)) in params[..fixed].iter().zip(args.by_ref()).enumerate() {
        let value = arg.coerce_param(param.ty, position + 1)?;
        env.define(&param.name, value, param.ty);
    }
    if let Some(param) = rest {
        env.define(&param.name, Value::Array(args.collect()), ParamType::Array);
    }
    Ok(())
}

/// Check and convert the arguments of a native, then run it.
fn call_native(native: &NativeFn, args: Values) -> RuntimeResult<Value> {
    if !native.accepts_count(args.len()) {
        return Err(RuntimeError::new(RuntimeErrorKind::HostArity {
            name: native.name.clone(),
            expected: native.params.len(),
        }));
    }
    let args = args
        .into_iter()
        .enumerate()
        .map(|(i, arg)| match native.params.get(i) {
            Some(ty) => arg.coerce_param(*ty, i + 1),
            None => Ok(arg),
        })
        .collect::<RuntimeResult<Values>>()?;
    native.call(&args)
}

/// Contract variables from call arguments.
///
/// Arguments are either nothing, a single map of names to values, a
/// comma-separated names string followed by one value per name, or
/// values in data field order. Data fields are converted to their declared
/// types; names that are not data fields become plain variables.
fn data_vars(contract: &Contract, args: Values) -> RuntimeResult<FxHashMap<String, Value>> {
    let mut vars = named_args(&contract.data, args)?;
    for field in &contract.data {
        let value = match vars.remove(&field.name) {
            Some(value) => value.convert_to(field.ty)?,
            None if field.optional => Value::zero(field.ty),
            None => {
                return Err(RuntimeError::new(RuntimeErrorKind::MissingData {
                    contract: contract.name.clone(),
                    field: field.name.clone(),
                }));
            }
        };
        vars.insert(field.name.clone(), value);
    }
    Ok(vars)
}

fn named_args(data: &[DataField], args: Values) -> RuntimeResult<FxHashMap<String, Value>> {
    let mut args = args.into_iter();
    let vars = match args.next() {
        None => FxHashMap::default(),
        Some(Value::Map(map)) if args.len() == 0 => map.into_iter().collect(),
        Some(Value::Str(names)) if names.split(',').count() == args.len() => names
            .split(',')
            .map(|name| name.trim().to_string())
            .zip(args)
            .collect(),
        Some(first) => {
            if args.len() + 1 > data.len() {
                return Err(RuntimeError::new(RuntimeErrorKind::WrongParamCount));
            }
            data.iter()
                .map(|field| field.name.clone())
                .zip(std::iter::once(first).chain(args))
                .collect()
        }
    };
    Ok(vars)
}
