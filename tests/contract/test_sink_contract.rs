//! Contract tests for the session log sink
//!
//! The sink contract: named, append-only, ordered, unfiltered, unbounded.
//! Every emit appends exactly one record at the tail; nothing reorders,
//! drops, deduplicates, or filters by level.

use glassbox::models::LogLevel;
use glassbox::sink::LogSink;

#[test]
fn test_emit_appends_exactly_one_record_at_the_tail() {
    let mut sink = LogSink::new("session");

    sink.emit(LogLevel::Warning, "x");
    assert_eq!(sink.len(), 1);

    let last = sink.records().last().unwrap();
    assert_eq!(last.level, LogLevel::Warning);
    assert_eq!(last.message, "x");
}

#[test]
fn test_n_emits_yield_n_records_in_call_order() {
    let mut sink = LogSink::new("session");
    for i in 0..250 {
        sink.emit(LogLevel::Info, format!("record {}", i));
    }

    assert_eq!(sink.len(), 250);
    for (i, record) in sink.records().iter().enumerate() {
        assert_eq!(record.message, format!("record {}", i));
    }
}

#[test]
fn test_no_level_is_filtered() {
    let mut sink = LogSink::new("session");
    sink.info("a");
    sink.debug("b");
    sink.warning("c");
    sink.error("d");

    // All four levels are present, in emission order
    let levels: Vec<LogLevel> = sink.records().iter().map(|r| r.level).collect();
    assert_eq!(
        levels,
        vec![
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Warning,
            LogLevel::Error,
        ]
    );
}

#[test]
fn test_duplicate_messages_are_kept() {
    let mut sink = LogSink::new("session");
    sink.info("same");
    sink.info("same");
    sink.info("same");
    assert_eq!(sink.len(), 3);
}

#[test]
fn test_records_are_never_mutated_by_later_emits() {
    let mut sink = LogSink::new("session");
    sink.error("first");
    let snapshot = (sink.records()[0].level, sink.records()[0].message.clone());

    for i in 0..50 {
        sink.debug(format!("noise {}", i));
    }

    assert_eq!(sink.records()[0].level, snapshot.0);
    assert_eq!(sink.records()[0].message, snapshot.1);
}

#[test]
fn test_timestamps_are_monotonic_in_record_order() {
    let mut sink = LogSink::new("session");
    for i in 0..20 {
        sink.info(format!("{}", i));
    }

    let records = sink.records();
    for pair in records.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
}

#[test]
fn test_clear_is_explicit_and_total() {
    let mut sink = LogSink::new("session");
    sink.info("before");
    sink.warning("also before");

    sink.clear();
    assert!(sink.is_empty());

    // The sink stays usable after a clear
    sink.error("after");
    assert_eq!(sink.len(), 1);
    assert_eq!(sink.records()[0].message, "after");
}

#[test]
fn test_name_is_stable() {
    let mut sink = LogSink::new("session");
    assert_eq!(sink.name(), "session");
    sink.info("x");
    sink.clear();
    assert_eq!(sink.name(), "session");
}

#[test]
fn test_shared_handles_append_to_one_sequence() {
    let sink = LogSink::shared("session");
    let a = sink.clone();
    let b = sink.clone();

    a.borrow_mut().info("one");
    b.borrow_mut().info("two");
    a.borrow_mut().info("three");

    let sink = sink.borrow();
    let messages: Vec<&str> = sink.records().iter().map(|r| r.message.as_str()).collect();
    assert_eq!(messages, vec!["one", "two", "three"]);
}
