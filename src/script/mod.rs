//! The embedded scriptlet evaluator
//!
//! Glassbox replaces the host language's "execute this string as code"
//! primitive with a small evaluator implemented in-crate: a hand-rolled
//! lexer, a recursive-descent parser, and a tree-walking evaluator. The
//! only surface reachable from injected text is (a) variables in the
//! bound scope and (b) host commands the embedding application has
//! registered. Evaluation is synchronous and runs on the calling thread;
//! a long-running scriptlet blocks the UI by design.
//!
//! The language is deliberately small:
//!
//! ```text
//! greeting = "hello " + name
//! self.count += 1; self.count
//! log.warning("count is now " + self.count)
//! set_label(greeting, color="green")
//! ```

pub mod engine;
pub mod lexer;
pub mod parser;
pub mod value;

pub use engine::{args, Engine, EngineStats, EvalContext, EvalScope, Evaluation, HostCommand};
pub use value::{new_table, Kwargs, Table, Value};
