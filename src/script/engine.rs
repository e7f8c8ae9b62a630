//! Scriptlet engine
//!
//! The engine owns the global environment, the named instance
//! environments, and the registry of host commands. `eval` runs injected
//! text synchronously on the calling thread against a chosen scope and
//! returns the final value plus anything the text printed. Errors are
//! returned, never swallowed, and leave the engine fully usable.

use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::LogLevel;
use crate::script::lexer;
use crate::script::parser::{self, AssignOp, AssignTarget, BinaryOp, Expr, Stmt, UnaryOp};
use crate::script::value::{new_table, Kwargs, Table, Value};
use crate::sink::SinkHandle;

/// The binding environment injected text is evaluated against.
///
/// Selected when a console is bound and immutable for that console
/// thereafter. A mismatch between the scope and the entered text fails at
/// evaluation time, not before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalScope {
    /// The engine's global environment; `self` is not resolvable
    Module,
    /// A named instance environment, reachable through `self`
    Instance(String),
}

/// Callback signature for host commands
pub type HostFn = Box<dyn Fn(&mut EvalContext, Vec<Value>, Kwargs) -> Result<Value>>;

/// A host command registered by the embedding application.
///
/// The name and doc string are identity metadata: wrappers produced by
/// [`HostCommand::wrap_logging`] preserve both so introspection (the
/// console's `bindings` listing, the debug window) reports the original
/// function.
pub struct HostCommand {
    name: String,
    doc: String,
    func: HostFn,
}

impl HostCommand {
    pub fn new(
        name: impl Into<String>,
        doc: impl Into<String>,
        func: impl Fn(&mut EvalContext, Vec<Value>, Kwargs) -> Result<Value> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            doc: doc.into(),
            func: Box::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    /// Invoke the command with already-evaluated arguments
    pub fn invoke(&self, ctx: &mut EvalContext, args: Vec<Value>, kwargs: Kwargs) -> Result<Value> {
        (self.func)(ctx, args, kwargs)
    }

    /// Wrap a command so every call mirrors its arguments and return
    /// value into `sink` as info records.
    ///
    /// The wrapper has the identical calling contract — arbitrary
    /// positional and keyword arguments pass through unmodified — and the
    /// same name and doc string as the wrapped command. No error handling
    /// is added: a failing call propagates unchanged and emits no
    /// completion record.
    pub fn wrap_logging(inner: Rc<HostCommand>, sink: SinkHandle) -> Rc<HostCommand> {
        let name = inner.name.clone();
        let doc = inner.doc.clone();
        let trace_name = name.clone();
        let func = move |ctx: &mut EvalContext, args: Vec<Value>, kwargs: Kwargs| {
            sink.borrow_mut().emit(
                LogLevel::Info,
                format!("{}({})", trace_name, render_call(&args, &kwargs)),
            );
            let result = inner.invoke(ctx, args, kwargs)?;
            sink.borrow_mut().emit(
                LogLevel::Info,
                format!("{} returned {}", trace_name, result.quoted()),
            );
            Ok(result)
        };
        Rc::new(HostCommand {
            name,
            doc,
            func: Box::new(func),
        })
    }
}

impl std::fmt::Debug for HostCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostCommand")
            .field("name", &self.name)
            .field("doc", &self.doc)
            .finish_non_exhaustive()
    }
}

/// Render a call's arguments the way the user would have written them
pub fn render_call(args: &[Value], kwargs: &Kwargs) -> String {
    let mut parts: Vec<String> = args.iter().map(|v| v.quoted()).collect();
    parts.extend(kwargs.iter().map(|(k, v)| format!("{}={}", k, v.quoted())));
    parts.join(", ")
}

/// Per-evaluation context handed to host commands.
///
/// Carries the output lines the evaluation produced (`print` appends
/// here); the console moves them into the transcript afterwards.
#[derive(Debug, Default)]
pub struct EvalContext {
    pub output: Vec<String>,
}

impl EvalContext {
    pub fn print_line(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }
}

/// Result of a successful evaluation
#[derive(Debug)]
pub struct Evaluation {
    /// Value of the last expression statement (`Nil` for empty input or a
    /// trailing assignment)
    pub value: Value,
    /// Lines printed during evaluation, in order
    pub output: Vec<String>,
    /// Wall-clock time the evaluation took
    pub duration: Duration,
}

/// Running statistics shown by the debug window
#[derive(Debug, Clone, Default)]
pub struct EngineStats {
    /// Total evaluation attempts
    pub evaluations: u64,
    /// Attempts that returned an error
    pub errors: u64,
    /// Duration of the most recent attempt
    pub last_duration: Option<Duration>,
}

/// The scriptlet engine
pub struct Engine {
    globals: Table,
    instances: BTreeMap<String, Table>,
    registry: BTreeMap<String, Rc<HostCommand>>,
    stats: EngineStats,
}

impl Engine {
    /// Create an engine with an empty global environment and no commands
    pub fn new() -> Self {
        Self {
            globals: new_table(),
            instances: BTreeMap::new(),
            registry: BTreeMap::new(),
            stats: EngineStats::default(),
        }
    }

    /// Register a host command as a top-level name
    pub fn register(&mut self, command: HostCommand) {
        let command = Rc::new(command);
        self.globals.borrow_mut().insert(
            command.name().to_string(),
            Value::Command(Rc::clone(&command)),
        );
        self.registry.insert(command.name().to_string(), command);
    }

    /// Shorthand for registering a closure as a top-level command
    pub fn register_fn(
        &mut self,
        name: impl Into<String>,
        doc: impl Into<String>,
        func: impl Fn(&mut EvalContext, Vec<Value>, Kwargs) -> Result<Value> + 'static,
    ) {
        self.register(HostCommand::new(name, doc, func));
    }

    /// Register a host command inside a named group table (`log.info`).
    ///
    /// The group table is created on demand; an existing non-table
    /// binding of the same name is replaced.
    pub fn register_grouped(&mut self, group: &str, command: HostCommand) {
        let command = Rc::new(command);
        let qualified = format!("{}.{}", group, command.name());

        let table = match self.globals.borrow().get(group) {
            Some(Value::Table(t)) => Some(t.clone()),
            _ => None,
        };
        let table = match table {
            Some(t) => t,
            None => {
                let t = new_table();
                self.globals
                    .borrow_mut()
                    .insert(group.to_string(), Value::Table(t.clone()));
                t
            }
        };
        table.borrow_mut().insert(
            command.name().to_string(),
            Value::Command(Rc::clone(&command)),
        );
        self.registry.insert(qualified, command);
    }

    /// Registered commands under their qualified names, for introspection
    pub fn commands(&self) -> impl Iterator<Item = (&str, &Rc<HostCommand>)> {
        self.registry.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Bind a value in the global environment
    pub fn set_global(&mut self, name: impl Into<String>, value: Value) {
        self.globals.borrow_mut().insert(name.into(), value);
    }

    /// Read a value from the global environment
    pub fn get_global(&self, name: &str) -> Option<Value> {
        self.globals.borrow().get(name).cloned()
    }

    /// The global environment table
    pub fn globals(&self) -> Table {
        self.globals.clone()
    }

    /// Create (or return the existing) named instance environment
    pub fn make_instance(&mut self, name: impl Into<String>) -> Table {
        self.instances
            .entry(name.into())
            .or_insert_with(new_table)
            .clone()
    }

    /// Look up a named instance environment
    pub fn instance(&self, name: &str) -> Option<Table> {
        self.instances.get(name).cloned()
    }

    /// All instance environments, for the debug window
    pub fn instances(&self) -> &BTreeMap<String, Table> {
        &self.instances
    }

    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// Evaluate source text in the given scope, synchronously, on the
    /// calling thread.
    ///
    /// Any text is accepted, including the empty string (which yields
    /// `Nil`). Every failure — scan, parse, runtime — returns `Err` and
    /// leaves the engine and every environment usable; a subsequent call
    /// proceeds normally.
    pub fn eval(&mut self, source: &str, scope: &EvalScope) -> Result<Evaluation> {
        let started = Instant::now();
        let result = self.eval_inner(source, scope);
        let duration = started.elapsed();

        self.stats.evaluations += 1;
        self.stats.last_duration = Some(duration);

        match result {
            Ok((value, output)) => {
                debug!(?scope, ?duration, "evaluation finished");
                Ok(Evaluation {
                    value,
                    output,
                    duration,
                })
            }
            Err(err) => {
                self.stats.errors += 1;
                debug!(?scope, %err, "evaluation failed");
                Err(err)
            }
        }
    }

    fn eval_inner(&mut self, source: &str, scope: &EvalScope) -> Result<(Value, Vec<String>)> {
        let tokens = lexer::scan(source)?;
        let program = parser::parse(tokens)?;

        let self_table = match scope {
            EvalScope::Module => None,
            EvalScope::Instance(name) => Some(self.instances.get(name).cloned().ok_or_else(
                || Error::ScopeNotFound {
                    name: name.clone(),
                },
            )?),
        };

        let mut evaluator = Evaluator {
            globals: self.globals.clone(),
            self_table,
            ctx: EvalContext::default(),
        };
        let value = evaluator.run(&program)?;
        Ok((value, evaluator.ctx.output))
    }

    /// JSON snapshot of the engine's live state, for the debug window
    pub fn snapshot(&self) -> serde_json::Value {
        let instances: serde_json::Map<String, serde_json::Value> = self
            .instances
            .iter()
            .map(|(name, table)| (name.clone(), Value::Table(table.clone()).to_json()))
            .collect();
        let commands: serde_json::Map<String, serde_json::Value> = self
            .registry
            .iter()
            .map(|(name, cmd)| {
                (
                    name.clone(),
                    serde_json::Value::String(cmd.doc().to_string()),
                )
            })
            .collect();
        serde_json::json!({
            "globals": Value::Table(self.globals.clone()).to_json(),
            "instances": instances,
            "commands": commands,
            "stats": {
                "evaluations": self.stats.evaluations,
                "errors": self.stats.errors,
                "last_duration_us": self.stats.last_duration.map(|d| d.as_micros() as u64),
            },
        })
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Tree-walking evaluator for one evaluation
struct Evaluator {
    globals: Table,
    self_table: Option<Table>,
    ctx: EvalContext,
}

impl Evaluator {
    fn run(&mut self, program: &[Stmt]) -> Result<Value> {
        let mut last = Value::Nil;
        for stmt in program {
            last = match stmt {
                Stmt::Expr(expr) => self.eval_expr(expr)?,
                Stmt::Assign { target, op, value } => {
                    let value = self.eval_expr(value)?;
                    self.assign(target, *op, value)?;
                    Value::Nil
                }
            };
        }
        Ok(last)
    }

    fn assign(&mut self, target: &AssignTarget, op: AssignOp, value: Value) -> Result<()> {
        match target {
            AssignTarget::Name(name) => {
                if name == "self" {
                    return Err(Error::EvalFailed {
                        reason: "cannot assign to 'self'".to_string(),
                    });
                }
                let new = match assign_binop(op) {
                    None => value,
                    Some(binop) => {
                        let old = self.resolve_name(name)?;
                        apply_binary(binop, old, value)?
                    }
                };
                self.globals.borrow_mut().insert(name.clone(), new);
            }
            AssignTarget::Attr { base, name } => {
                let base = self.eval_expr(base)?;
                let Value::Table(table) = base else {
                    return Err(Error::NotATable {
                        type_name: base.type_name(),
                    });
                };
                let new = match assign_binop(op) {
                    None => value,
                    Some(binop) => {
                        let old = table.borrow().get(name).cloned().ok_or_else(|| {
                            Error::EvalFailed {
                                reason: format!("table has no attribute '{}'", name),
                            }
                        })?;
                        apply_binary(binop, old, value)?
                    }
                };
                table.borrow_mut().insert(name.clone(), new);
            }
        }
        Ok(())
    }

    fn eval_expr(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Nil => Ok(Value::Nil),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Num(n) => Ok(Value::Num(*n)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),
            Expr::Name(name) => self.resolve_name(name),
            Expr::Attr { base, name } => {
                let base = self.eval_expr(base)?;
                let Value::Table(table) = &base else {
                    return Err(Error::NotATable {
                        type_name: base.type_name(),
                    });
                };
                table
                    .borrow()
                    .get(name)
                    .cloned()
                    .ok_or_else(|| Error::EvalFailed {
                        reason: format!("table has no attribute '{}'", name),
                    })
            }
            Expr::Call {
                callee,
                args,
                kwargs,
            } => {
                let callee = self.eval_expr(callee)?;
                let Value::Command(command) = callee else {
                    return Err(Error::NotCallable {
                        type_name: callee.type_name(),
                    });
                };
                let mut arg_values = Vec::with_capacity(args.len());
                for arg in args {
                    arg_values.push(self.eval_expr(arg)?);
                }
                let mut kwarg_values = Kwargs::new();
                for (key, expr) in kwargs {
                    kwarg_values.insert(key.clone(), self.eval_expr(expr)?);
                }
                command.invoke(&mut self.ctx, arg_values, kwarg_values)
            }
            Expr::Unary { op, operand } => {
                let operand = self.eval_expr(operand)?;
                match op {
                    UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
                    UnaryOp::Neg => match operand {
                        Value::Num(n) => Ok(Value::Num(-n)),
                        other => Err(Error::EvalFailed {
                            reason: format!("cannot negate {}", other.type_name()),
                        }),
                    },
                }
            }
            Expr::Binary { op, left, right } => match op {
                // Short-circuit forms return the deciding operand
                BinaryOp::And => {
                    let left = self.eval_expr(left)?;
                    if left.is_truthy() {
                        self.eval_expr(right)
                    } else {
                        Ok(left)
                    }
                }
                BinaryOp::Or => {
                    let left = self.eval_expr(left)?;
                    if left.is_truthy() {
                        Ok(left)
                    } else {
                        self.eval_expr(right)
                    }
                }
                other => {
                    let left = self.eval_expr(left)?;
                    let right = self.eval_expr(right)?;
                    apply_binary(*other, left, right)
                }
            },
        }
    }

    fn resolve_name(&self, name: &str) -> Result<Value> {
        if name == "self" {
            return self
                .self_table
                .clone()
                .map(Value::Table)
                .ok_or_else(|| Error::UnknownName {
                    name: name.to_string(),
                });
        }
        self.globals
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownName {
                name: name.to_string(),
            })
    }
}

fn assign_binop(op: AssignOp) -> Option<BinaryOp> {
    match op {
        AssignOp::Set => None,
        AssignOp::Add => Some(BinaryOp::Add),
        AssignOp::Sub => Some(BinaryOp::Sub),
        AssignOp::Mul => Some(BinaryOp::Mul),
        AssignOp::Div => Some(BinaryOp::Div),
    }
}

fn apply_binary(op: BinaryOp, left: Value, right: Value) -> Result<Value> {
    use BinaryOp::*;
    match op {
        Add => match (&left, &right) {
            (Value::Num(a), Value::Num(b)) => Ok(Value::Num(a + b)),
            // String on either side concatenates
            (Value::Str(_), _) | (_, Value::Str(_)) => {
                Ok(Value::Str(format!("{}{}", left.render(), right.render())))
            }
            _ => Err(type_error("+", &left, &right)),
        },
        Sub | Mul | Div | Rem => match (&left, &right) {
            (Value::Num(a), Value::Num(b)) => Ok(Value::Num(match op {
                Sub => a - b,
                Mul => a * b,
                Div => a / b,
                Rem => a % b,
                _ => unreachable!(),
            })),
            _ => Err(type_error(op_symbol(op), &left, &right)),
        },
        Eq => Ok(Value::Bool(left == right)),
        Ne => Ok(Value::Bool(left != right)),
        Lt | Le | Gt | Ge => {
            let ordering = match (&left, &right) {
                (Value::Num(a), Value::Num(b)) => a.partial_cmp(b),
                (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
                _ => return Err(type_error(op_symbol(op), &left, &right)),
            };
            let Some(ordering) = ordering else {
                // NaN comparisons are false, matching the float semantics
                return Ok(Value::Bool(false));
            };
            Ok(Value::Bool(match op {
                Lt => ordering.is_lt(),
                Le => ordering.is_le(),
                Gt => ordering.is_gt(),
                Ge => ordering.is_ge(),
                _ => unreachable!(),
            }))
        }
        And | Or => unreachable!("short-circuit ops are handled in eval_expr"),
    }
}

fn op_symbol(op: BinaryOp) -> &'static str {
    use BinaryOp::*;
    match op {
        Add => "+",
        Sub => "-",
        Mul => "*",
        Div => "/",
        Rem => "%",
        Eq => "==",
        Ne => "!=",
        Lt => "<",
        Le => "<=",
        Gt => ">",
        Ge => ">=",
        And => "and",
        Or => "or",
    }
}

fn type_error(op: &str, left: &Value, right: &Value) -> Error {
    Error::EvalFailed {
        reason: format!(
            "cannot apply '{}' to {} and {}",
            op,
            left.type_name(),
            right.type_name()
        ),
    }
}

/// Argument helpers for host command implementations
pub mod args {
    use super::*;

    /// Require exactly `n` positional arguments
    pub fn require(command: &str, args: &[Value], n: usize) -> Result<()> {
        if args.len() == n {
            Ok(())
        } else {
            Err(Error::ArityMismatch {
                command: command.to_string(),
                expected: n.to_string(),
                got: args.len(),
            })
        }
    }

    /// Require at least `n` positional arguments
    pub fn require_at_least(command: &str, args: &[Value], n: usize) -> Result<()> {
        if args.len() >= n {
            Ok(())
        } else {
            Err(Error::ArityMismatch {
                command: command.to_string(),
                expected: format!("at least {}", n),
                got: args.len(),
            })
        }
    }

    /// Reject all keyword arguments
    pub fn no_kwargs(command: &str, kwargs: &Kwargs) -> Result<()> {
        only_kwargs(command, kwargs, &[])
    }

    /// Reject keyword arguments outside the allowed set
    pub fn only_kwargs(command: &str, kwargs: &Kwargs, allowed: &[&str]) -> Result<()> {
        for key in kwargs.keys() {
            if !allowed.contains(&key.as_str()) {
                return Err(Error::KeywordMismatch {
                    command: command.to_string(),
                    keyword: key.clone(),
                });
            }
        }
        Ok(())
    }

    /// Coerce a value to a number
    pub fn as_num(command: &str, value: &Value) -> Result<f64> {
        match value {
            Value::Num(n) => Ok(*n),
            other => Err(Error::EvalFailed {
                reason: format!("'{}' expects a number, got {}", command, other.type_name()),
            }),
        }
    }
}
