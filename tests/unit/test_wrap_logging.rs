//! Unit tests for call-tracing wrappers
//!
//! Covers both wrapper surfaces: `sink::wrap::logged` for plain Rust
//! functions and `HostCommand::wrap_logging` for registered commands.

use std::rc::Rc;

use glassbox::error::{Error, Result};
use glassbox::models::LogLevel;
use glassbox::script::{args, Engine, EvalScope, HostCommand, Value};
use glassbox::sink::{wrap, LogSink};

#[test]
fn test_logged_forwards_arguments_and_return_value() {
    let sink = LogSink::shared("session");
    let concat = wrap::logged(sink.clone(), "concat", |(a, b): (String, i32)| {
        format!("{}{}", a, b)
    });

    let out = concat(("v".to_string(), 7));
    assert_eq!(out, "v7");

    let sink = sink.borrow();
    assert_eq!(sink.len(), 2);
    assert_eq!(sink.records()[0].level, LogLevel::Info);
    assert!(sink.records()[0].message.starts_with("concat("));
    assert!(sink.records()[1].message.contains("returned"));
}

#[test]
fn test_logged_grows_sink_by_at_least_one_per_call() {
    let sink = LogSink::shared("session");
    let id = wrap::logged(sink.clone(), "id", |n: u8| n);

    for i in 0..5 {
        let before = sink.borrow().len();
        assert_eq!(id(i), i);
        assert!(sink.borrow().len() > before);
    }
}

#[test]
fn test_logged_fallible_propagates_error_without_completion() {
    let sink = LogSink::shared("session");
    let parse = wrap::logged_fallible(sink.clone(), "parse", |s: &str| -> Result<i64> {
        s.parse()
            .map_err(|_| Error::Other(format!("not a number: {}", s)))
    });

    assert_eq!(parse("42").unwrap(), 42);
    assert_eq!(sink.borrow().len(), 2);

    let err = parse("nope").unwrap_err();
    assert!(matches!(err, Error::Other(_)));
    // One argument record for the failed call, no completion record
    assert_eq!(sink.borrow().len(), 3);
    assert_eq!(sink.borrow().records()[2].message, "parse(\"nope\")");
}

#[test]
fn test_wrap_logging_preserves_name_and_doc() {
    let sink = LogSink::shared("session");
    let inner = Rc::new(HostCommand::new(
        "resize",
        "Resize the viewport",
        |_, call_args, _| {
            args::require("resize", &call_args, 2)?;
            Ok(Value::Nil)
        },
    ));

    let wrapped = HostCommand::wrap_logging(inner, sink);
    assert_eq!(wrapped.name(), "resize");
    assert_eq!(wrapped.doc(), "Resize the viewport");
}

#[test]
fn test_wrap_logging_passes_kwargs_through() {
    let sink = LogSink::shared("session");
    let mut engine = Engine::new();

    let inner = Rc::new(HostCommand::new(
        "style",
        "Style a widget",
        |_, call_args, kwargs| {
            args::require("style", &call_args, 1)?;
            args::only_kwargs("style", &kwargs, &["color", "size"])?;
            let color = kwargs
                .get("color")
                .map(|v| v.render())
                .unwrap_or_else(|| "default".to_string());
            Ok(Value::Str(format!("{}:{}", call_args[0].render(), color)))
        },
    ));
    let wrapped = HostCommand::wrap_logging(inner, sink.clone());
    engine
        .globals()
        .borrow_mut()
        .insert("style".to_string(), Value::Command(wrapped));

    let result = engine
        .eval(r#"style("title", color="blue")"#, &EvalScope::Module)
        .unwrap();
    assert_eq!(result.value, Value::Str("title:blue".to_string()));

    // The argument trace renders keywords the way the user wrote them
    let sink = sink.borrow();
    assert_eq!(sink.records()[0].message, r#"style("title", color="blue")"#);
    assert_eq!(sink.records()[1].message, r#"style returned "title:blue""#);
}

#[test]
fn test_wrap_logging_failure_emits_no_completion_record() {
    let sink = LogSink::shared("session");
    let mut engine = Engine::new();

    let inner = Rc::new(HostCommand::new("brittle", "Always fails", |_, _, _| {
        Err(Error::EvalFailed {
            reason: "snapped".to_string(),
        })
    }));
    let wrapped = HostCommand::wrap_logging(inner, sink.clone());
    engine
        .globals()
        .borrow_mut()
        .insert("brittle".to_string(), Value::Command(wrapped));

    let err = engine.eval("brittle(1, 2)", &EvalScope::Module).unwrap_err();
    assert!(matches!(err, Error::EvalFailed { reason } if reason == "snapped"));

    let sink = sink.borrow();
    assert_eq!(sink.len(), 1);
    assert_eq!(sink.records()[0].message, "brittle(1, 2)");
}
