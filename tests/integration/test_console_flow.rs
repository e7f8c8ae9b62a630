//! Integration tests for the console evaluation loop
//!
//! These tests drive the console's trigger path directly (the same path
//! Ctrl+Enter takes) and check the contract: the buffer is read verbatim
//! and kept, evaluation effects match direct engine calls, and an error
//! never takes the loop down.

use glassbox::config::Config;
use glassbox::devkit::DevKit;
use glassbox::models::EntryKind;
use glassbox::script::{Engine, EvalScope, Value};
use glassbox::ui::ConsolePanel;

fn kit() -> DevKit {
    DevKit::new(&Config::default())
}

#[test]
fn test_trigger_matches_direct_evaluation() {
    // The same side-effect-free text, evaluated through the console and
    // directly, must produce the same observable result.
    let mut direct = Engine::new();
    let direct_value = direct
        .eval("a = 6\na * 7", &EvalScope::Module)
        .unwrap()
        .value;

    let mut kit = kit();
    let mut console = ConsolePanel::new(EvalScope::Module);
    console.set_buffer("a = 6\na * 7");
    console.submit(kit.engine_mut());

    let last = console.transcript().last().unwrap();
    assert_eq!(last.kind, EntryKind::Result);
    assert_eq!(last.text, direct_value.quoted());
    assert_eq!(kit.engine().get_global("a"), Some(Value::Num(6.0)));
}

#[test]
fn test_buffer_survives_trigger_unchanged() {
    let mut kit = kit();
    let mut console = ConsolePanel::new(EvalScope::Module);

    let text = "  x = 1  \n  x\n";
    console.set_buffer(text);
    console.submit(kit.engine_mut());
    assert_eq!(console.buffer(), text);

    // Re-triggering the untouched buffer evaluates it again
    console.submit(kit.engine_mut());
    let results: Vec<_> = console
        .transcript()
        .iter()
        .filter(|e| e.kind == EntryKind::Result)
        .collect();
    assert_eq!(results.len(), 2);
}

#[test]
fn test_error_keeps_the_loop_alive() {
    let mut kit = kit();
    let mut console = ConsolePanel::new(EvalScope::Module);

    for bad in ["1 +", "\"open", "ghost()", "self.x"] {
        console.set_buffer(bad);
        console.submit(kit.engine_mut());
        assert_eq!(console.transcript().last().unwrap().kind, EntryKind::Error);
    }

    console.set_buffer("3 * 3");
    console.submit(kit.engine_mut());
    assert_eq!(console.transcript().last().unwrap().text, "9");
}

#[test]
fn test_builtin_log_commands_reach_the_sink() {
    let mut kit = kit();
    let sink = kit.sink();
    let mut console = ConsolePanel::new(EvalScope::Module);

    console.set_buffer(r#"log.info("first")
log.error("second")"#);
    console.submit(kit.engine_mut());

    let sink = sink.borrow();
    assert_eq!(sink.len(), 2);
    assert_eq!(sink.records()[0].message, "first");
    assert_eq!(sink.records()[1].message, "second");
}

#[test]
fn test_print_output_precedes_result_in_transcript() {
    let mut kit = kit();
    let mut console = ConsolePanel::new(EvalScope::Module);

    console.set_buffer("print(\"working\")\n40 + 2");
    console.submit(kit.engine_mut());

    let kinds: Vec<EntryKind> = console.transcript().iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![EntryKind::Input, EntryKind::Output, EntryKind::Result]
    );
    assert_eq!(console.transcript()[1].text, "working");
    assert_eq!(console.transcript()[2].text, "42");
}

#[test]
fn test_trace_builtin_mirrors_calls() {
    let mut kit = kit();
    let sink = kit.sink();
    let mut console = ConsolePanel::new(EvalScope::Module);

    console.set_buffer("loud = trace(print)");
    console.submit(kit.engine_mut());
    console.set_buffer(r#"loud("ping")"#);
    console.submit(kit.engine_mut());

    let sink = sink.borrow();
    assert_eq!(sink.len(), 2);
    assert_eq!(sink.records()[0].message, r#"print("ping")"#);
    assert_eq!(sink.records()[1].message, "print returned nil");
}

#[test]
fn test_help_and_bindings_never_reach_the_engine() {
    let mut kit = kit();
    let mut console = ConsolePanel::new(EvalScope::Module);

    console.set_buffer("help");
    console.submit(kit.engine_mut());
    console.set_buffer("bindings");
    console.submit(kit.engine_mut());

    // Builtins are widget conveniences, not evaluations
    assert_eq!(kit.engine().stats().evaluations, 0);
    assert!(console
        .transcript()
        .iter()
        .any(|e| e.kind == EntryKind::Notice));
}
