//! Script values
//!
//! Everything injected text can touch is a `Value`. Tables back the
//! instance scopes (`self`) and command groups (`log`); commands are the
//! registered host callbacks.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::script::engine::HostCommand;

/// A mutable string-keyed table of values, shared by reference.
///
/// Instance scopes are tables; the console mutates them in place and the
/// host application reads them back on the same thread.
pub type Table = Rc<RefCell<BTreeMap<String, Value>>>;

/// Keyword arguments of a call, in source order of first occurrence.
pub type Kwargs = BTreeMap<String, Value>;

/// Maximum depth rendered for nested tables before eliding
const MAX_RENDER_DEPTH: usize = 3;

/// A runtime value of the scriptlet language
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Num(f64),
    Str(String),
    Table(Table),
    Command(Rc<HostCommand>),
}

/// A fresh, empty table handle
pub fn new_table() -> Table {
    Rc::new(RefCell::new(BTreeMap::new()))
}

impl Value {
    /// Create an empty table value
    pub fn table() -> Self {
        Value::Table(new_table())
    }

    /// Human-readable type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Num(_) => "number",
            Value::Str(_) => "string",
            Value::Table(_) => "table",
            Value::Command(_) => "command",
        }
    }

    /// Truthiness: `nil` and `false` are falsy, everything else is truthy
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// Render the value for display in the transcript or a log record
    pub fn render(&self) -> String {
        self.render_depth(0)
    }

    fn render_depth(&self, depth: usize) -> String {
        match self {
            Value::Nil => "nil".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Num(n) => render_num(*n),
            Value::Str(s) => s.clone(),
            Value::Table(t) => {
                if depth >= MAX_RENDER_DEPTH {
                    return "{…}".to_string();
                }
                let inner = t
                    .borrow()
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v.quoted_depth(depth + 1)))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{{}}}", inner)
            }
            Value::Command(c) => format!("<command {}>", c.name()),
        }
    }

    /// Like `render`, but strings keep their quotes. Used inside table
    /// listings and argument traces where `"1"` and `1` must differ.
    pub fn quoted(&self) -> String {
        self.quoted_depth(0)
    }

    fn quoted_depth(&self, depth: usize) -> String {
        match self {
            Value::Str(s) => format!("\"{}\"", s),
            other => other.render_depth(depth),
        }
    }

    /// Convert to a JSON value for the debug window's snapshot.
    ///
    /// Non-finite numbers and commands have no JSON form and are rendered
    /// as strings; tables are elided past the render depth limit.
    pub fn to_json(&self) -> serde_json::Value {
        self.to_json_depth(0)
    }

    fn to_json_depth(&self, depth: usize) -> serde_json::Value {
        match self {
            Value::Nil => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Num(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(render_num(*n))),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Table(t) => {
                if depth >= MAX_RENDER_DEPTH {
                    return serde_json::Value::String("{…}".to_string());
                }
                let map = t
                    .borrow()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json_depth(depth + 1)))
                    .collect();
                serde_json::Value::Object(map)
            }
            Value::Command(c) => serde_json::Value::String(format!("<command {}>", c.name())),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Num(a), Value::Num(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            // Reference identity for the shared kinds
            (Value::Table(a), Value::Table(b)) => Rc::ptr_eq(a, b),
            (Value::Command(a), Value::Command(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

/// Integer-valued floats render without a fractional part
fn render_num(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}
