//! Unit tests for scriptlet evaluation
//!
//! These tests exercise the engine through the public API: scopes,
//! assignment, operators, host-command calls, and failure behavior.

use glassbox::error::Error;
use glassbox::script::{args, Engine, EvalScope, HostCommand, Value};

fn engine_with_print() -> Engine {
    let mut engine = Engine::new();
    engine.register_fn("print", "Print values", |ctx, call_args, _| {
        ctx.print_line(
            call_args
                .iter()
                .map(|v| v.render())
                .collect::<Vec<_>>()
                .join(" "),
        );
        Ok(Value::Nil)
    });
    engine
}

#[test]
fn test_last_expression_is_the_result() {
    let mut engine = Engine::new();
    let result = engine
        .eval("x = 10\ny = x * 2\nx + y", &EvalScope::Module)
        .unwrap();
    assert_eq!(result.value, Value::Num(30.0));
}

#[test]
fn test_trailing_assignment_yields_nil() {
    let mut engine = Engine::new();
    let result = engine.eval("x = 1", &EvalScope::Module).unwrap();
    assert_eq!(result.value, Value::Nil);
    assert_eq!(engine.get_global("x"), Some(Value::Num(1.0)));
}

#[test]
fn test_any_text_is_accepted_including_empty() {
    let mut engine = Engine::new();
    assert_eq!(engine.eval("", &EvalScope::Module).unwrap().value, Value::Nil);
    assert_eq!(
        engine.eval("   \n\n  ", &EvalScope::Module).unwrap().value,
        Value::Nil
    );
}

#[test]
fn test_string_concatenation_and_arithmetic() {
    let mut engine = Engine::new();
    let result = engine
        .eval(r#""total: " + (2 + 3) * 4"#, &EvalScope::Module)
        .unwrap();
    assert_eq!(result.value, Value::Str("total: 20".to_string()));

    let result = engine.eval("7 % 4", &EvalScope::Module).unwrap();
    assert_eq!(result.value, Value::Num(3.0));
}

#[test]
fn test_compound_assignment_on_globals() {
    let mut engine = Engine::new();
    engine
        .eval("n = 10\nn -= 3\nn *= 2\nn /= 7", &EvalScope::Module)
        .unwrap();
    assert_eq!(engine.get_global("n"), Some(Value::Num(2.0)));
}

#[test]
fn test_logic_and_comparisons() {
    let mut engine = Engine::new();
    let result = engine
        .eval("1 < 2 and not (3 == 4)", &EvalScope::Module)
        .unwrap();
    assert_eq!(result.value, Value::Bool(true));
}

#[test]
fn test_unknown_name_is_an_error_not_a_crash() {
    let mut engine = Engine::new();
    let err = engine.eval("missing + 1", &EvalScope::Module).unwrap_err();
    assert!(matches!(err, Error::UnknownName { name } if name == "missing"));
}

#[test]
fn test_syntax_error_reports_line() {
    let mut engine = Engine::new();
    let err = engine.eval("x = 1\ny = (2", &EvalScope::Module).unwrap_err();
    assert!(matches!(err, Error::ParseFailed { line: 2, .. }));
}

#[test]
fn test_failures_leave_engine_reusable() {
    let mut engine = engine_with_print();

    assert!(engine.eval("1 +", &EvalScope::Module).is_err());
    assert!(engine.eval("\"open", &EvalScope::Module).is_err());
    assert!(engine.eval("ghost()", &EvalScope::Module).is_err());

    // Environments and the registry are untouched by the failures
    let result = engine
        .eval("print(\"still here\")\n2 + 2", &EvalScope::Module)
        .unwrap();
    assert_eq!(result.value, Value::Num(4.0));
    assert_eq!(result.output, vec!["still here".to_string()]);

    assert_eq!(engine.stats().evaluations, 4);
    assert_eq!(engine.stats().errors, 3);
}

#[test]
fn test_host_command_arity_and_keyword_checks() {
    let mut engine = Engine::new();
    engine.register_fn("pad", "Pad a string", |_ctx, call_args, kwargs| {
        args::require("pad", &call_args, 1)?;
        args::only_kwargs("pad", &kwargs, &["width"])?;
        let width = match kwargs.get("width") {
            Some(v) => args::as_num("pad", v)? as usize,
            None => 8,
        };
        Ok(Value::Str(format!("{:width$}", call_args[0].render())))
    });

    let result = engine
        .eval(r#"pad("ok", width=4)"#, &EvalScope::Module)
        .unwrap();
    assert_eq!(result.value, Value::Str("ok  ".to_string()));

    let err = engine.eval("pad()", &EvalScope::Module).unwrap_err();
    assert!(matches!(err, Error::ArityMismatch { got: 0, .. }));

    let err = engine
        .eval(r#"pad("x", fill="-")"#, &EvalScope::Module)
        .unwrap_err();
    assert!(matches!(err, Error::KeywordMismatch { keyword, .. } if keyword == "fill"));
}

#[test]
fn test_calling_a_non_command_fails() {
    let mut engine = Engine::new();
    engine.set_global("n", Value::Num(1.0));
    let err = engine.eval("n(2)", &EvalScope::Module).unwrap_err();
    assert!(matches!(err, Error::NotCallable { type_name: "number" }));
}

#[test]
fn test_instance_scope_isolation() {
    let mut engine = Engine::new();
    engine
        .make_instance("a")
        .borrow_mut()
        .insert("x".to_string(), Value::Num(1.0));
    engine
        .make_instance("b")
        .borrow_mut()
        .insert("x".to_string(), Value::Num(2.0));

    let in_a = engine
        .eval("self.x", &EvalScope::Instance("a".to_string()))
        .unwrap();
    let in_b = engine
        .eval("self.x", &EvalScope::Instance("b".to_string()))
        .unwrap();
    assert_eq!(in_a.value, Value::Num(1.0));
    assert_eq!(in_b.value, Value::Num(2.0));
}

#[test]
fn test_globals_visible_from_instance_scope() {
    let mut engine = Engine::new();
    engine.set_global("shared", Value::Num(5.0));
    engine.make_instance("obj");

    let result = engine
        .eval("shared * 2", &EvalScope::Instance("obj".to_string()))
        .unwrap();
    assert_eq!(result.value, Value::Num(10.0));
}

#[test]
fn test_missing_instance_scope_is_reported() {
    let mut engine = Engine::new();
    let err = engine
        .eval("1 + 1", &EvalScope::Instance("ghost".to_string()))
        .unwrap_err();
    assert!(matches!(err, Error::ScopeNotFound { name } if name == "ghost"));
}

#[test]
fn test_comments_and_semicolons() {
    let mut engine = Engine::new();
    let result = engine
        .eval("a = 1; b = 2  # both on one line\na + b", &EvalScope::Module)
        .unwrap();
    assert_eq!(result.value, Value::Num(3.0));
}

#[test]
fn test_wrapped_command_registration_helper() {
    // register() and register_fn() produce identical surfaces
    let mut engine = Engine::new();
    engine.register(HostCommand::new("one", "Returns 1", |_, call_args, _| {
        args::require("one", &call_args, 0)?;
        Ok(Value::Num(1.0))
    }));
    engine.register_fn("two", "Returns 2", |_, call_args, _| {
        args::require("two", &call_args, 0)?;
        Ok(Value::Num(2.0))
    });

    let result = engine.eval("one() + two()", &EvalScope::Module).unwrap();
    assert_eq!(result.value, Value::Num(3.0));
    assert_eq!(engine.commands().count(), 2);
}
