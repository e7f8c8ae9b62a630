//! Integration tests for evaluation scope binding
//!
//! A console is bound to one scope for its lifetime; switching means
//! constructing a console against a different scope. These tests check
//! that the binding changes which names `self` resolves without touching
//! sink behavior, and pin the counter example end to end.

use glassbox::config::Config;
use glassbox::devkit::DevKit;
use glassbox::models::EntryKind;
use glassbox::script::{EvalScope, Value};
use glassbox::ui::ConsolePanel;

#[test]
fn test_module_scope_cannot_see_self() {
    let mut kit = DevKit::new(&Config::default());
    kit.engine_mut()
        .make_instance("obj")
        .borrow_mut()
        .insert("count".to_string(), Value::Num(0.0));

    let mut console = ConsolePanel::new(EvalScope::Module);
    console.set_buffer("self.count");
    console.submit(kit.engine_mut());

    let last = console.transcript().last().unwrap();
    assert_eq!(last.kind, EntryKind::Error);
    assert!(last.text.contains("'self'"));
}

#[test]
fn test_instance_scope_resolves_self() {
    let mut kit = DevKit::new(&Config::default());
    kit.engine_mut()
        .make_instance("obj")
        .borrow_mut()
        .insert("count".to_string(), Value::Num(41.0));

    let mut console = ConsolePanel::new(EvalScope::Instance("obj".to_string()));
    console.set_buffer("self.count + 1");
    console.submit(kit.engine_mut());

    assert_eq!(console.transcript().last().unwrap().text, "42");
}

#[test]
fn test_counter_example_increments_twice() {
    // Instance with count = 0; `self.count += 1; self.count` evaluated
    // twice leaves count == 2, each result reflecting the increment.
    let mut kit = DevKit::new(&Config::default());
    kit.engine_mut()
        .make_instance("obj")
        .borrow_mut()
        .insert("count".to_string(), Value::Num(0.0));

    let mut console = ConsolePanel::new(EvalScope::Instance("obj".to_string()));
    console.set_buffer("self.count += 1; self.count");

    console.submit(kit.engine_mut());
    console.submit(kit.engine_mut());

    let results: Vec<String> = console
        .transcript()
        .iter()
        .filter(|e| e.kind == EntryKind::Result)
        .map(|e| e.text.clone())
        .collect();
    assert_eq!(results, vec!["1".to_string(), "2".to_string()]);

    let stored = kit
        .engine()
        .instance("obj")
        .unwrap()
        .borrow()
        .get("count")
        .cloned();
    assert_eq!(stored, Some(Value::Num(2.0)));
}

#[test]
fn test_sink_behavior_is_scope_independent() {
    let mut kit = DevKit::new(&Config::default());
    let sink = kit.sink();
    kit.engine_mut().make_instance("obj");

    let mut module_console = ConsolePanel::new(EvalScope::Module);
    let mut instance_console = ConsolePanel::new(EvalScope::Instance("obj".to_string()));

    module_console.set_buffer(r#"log.info("from module")"#);
    module_console.submit(kit.engine_mut());
    instance_console.set_buffer(r#"log.info("from instance")"#);
    instance_console.submit(kit.engine_mut());

    // Same sink, same ordering, regardless of the console's binding
    let sink = sink.borrow();
    assert_eq!(sink.len(), 2);
    assert_eq!(sink.records()[0].message, "from module");
    assert_eq!(sink.records()[1].message, "from instance");
}

#[test]
fn test_kit_console_scope_comes_from_config() {
    let mut config = Config::default();
    config.console.scope = "session".to_string();
    let kit = DevKit::new(&config);

    assert_eq!(
        kit.console().scope(),
        &EvalScope::Instance("session".to_string())
    );
    // The kit created the instance environment it bound to
    assert!(kit.engine().instance("session").is_some());
}

#[test]
fn test_two_consoles_share_one_engine() {
    let mut kit = DevKit::new(&Config::default());
    kit.engine_mut().make_instance("obj");

    let mut writer = ConsolePanel::new(EvalScope::Module);
    let mut reader = ConsolePanel::new(EvalScope::Instance("obj".to_string()));

    writer.set_buffer("shared = 99");
    writer.submit(kit.engine_mut());

    // Globals written from one console are visible from the other
    reader.set_buffer("shared");
    reader.submit(kit.engine_mut());
    assert_eq!(reader.transcript().last().unwrap().text, "99");
}
