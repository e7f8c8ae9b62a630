//! Call-tracing wrappers for Rust functions
//!
//! The script-side counterpart — wrapping a registered host command with
//! identical name, doc, and calling contract — lives at
//! [`crate::script::HostCommand::wrap_logging`]. The wrappers here cover
//! plain Rust functions used by the embedding application.
//!
//! Rust has no varargs or keyword arguments, so a wrapped function takes
//! one argument position; pass a tuple to trace several at once.

use std::fmt;

use crate::error::Result;
use crate::models::LogLevel;
use crate::sink::SinkHandle;

/// Wrap a function so each call records its argument before invocation
/// and its return value after, passing both through unmodified.
///
/// ```
/// use glassbox::sink::{wrap, LogSink};
///
/// let sink = LogSink::shared("session");
/// let add = wrap::logged(sink.clone(), "add", |(a, b): (i32, i32)| a + b);
/// assert_eq!(add((2, 3)), 5);
/// assert_eq!(sink.borrow().len(), 2);
/// ```
pub fn logged<A, R, F>(sink: SinkHandle, name: &'static str, f: F) -> impl Fn(A) -> R
where
    A: fmt::Debug,
    R: fmt::Debug,
    F: Fn(A) -> R,
{
    move |args: A| {
        sink.borrow_mut()
            .emit(LogLevel::Info, format!("{}({:?})", name, args));
        let result = f(args);
        sink.borrow_mut()
            .emit(LogLevel::Info, format!("{} returned {:?}", name, result));
        result
    }
}

/// Like [`logged`], for fallible functions: an `Err` propagates unchanged
/// and no completion record is emitted.
pub fn logged_fallible<A, R, F>(
    sink: SinkHandle,
    name: &'static str,
    f: F,
) -> impl Fn(A) -> Result<R>
where
    A: fmt::Debug,
    R: fmt::Debug,
    F: Fn(A) -> Result<R>,
{
    move |args: A| {
        sink.borrow_mut()
            .emit(LogLevel::Info, format!("{}({:?})", name, args));
        let result = f(args)?;
        sink.borrow_mut()
            .emit(LogLevel::Info, format!("{} returned {:?}", name, result));
        Ok(result)
    }
}
