//! Property-based tests for sink ordering

use glassbox::models::LogLevel;
use glassbox::sink::{wrap, LogSink};
use proptest::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Info),
        Just(LogLevel::Debug),
        Just(LogLevel::Warning),
        Just(LogLevel::Error),
    ]
}

proptest! {
    #[test]
    fn test_sink_accepts_any_message(message in "\\PC{0,500}") {
        let mut sink = LogSink::new("session");
        sink.emit(LogLevel::Info, message.clone());
        // Stored verbatim, no trimming or escaping
        prop_assert_eq!(sink.records()[0].message.as_str(), message.as_str());
    }

    #[test]
    fn test_emits_preserve_count_and_order(
        entries in prop::collection::vec((any_level(), "[a-zA-Z0-9 ]{0,40}"), 0..100)
    ) {
        let mut sink = LogSink::new("session");
        for (level, message) in &entries {
            sink.emit(*level, message.clone());
        }

        prop_assert_eq!(sink.len(), entries.len());
        for (record, (level, message)) in sink.records().iter().zip(&entries) {
            prop_assert_eq!(record.level, *level);
            prop_assert_eq!(record.message.as_str(), message.as_str());
        }
    }

    #[test]
    fn test_interleaved_clears_keep_suffix_order(
        before in prop::collection::vec("[a-z]{1,10}", 0..20),
        after in prop::collection::vec("[a-z]{1,10}", 0..20),
    ) {
        let mut sink = LogSink::new("session");
        for message in &before {
            sink.info(message.clone());
        }
        sink.clear();
        for message in &after {
            sink.info(message.clone());
        }

        // Only the post-clear records remain, in call order
        prop_assert_eq!(sink.len(), after.len());
        for (record, message) in sink.records().iter().zip(&after) {
            prop_assert_eq!(record.message.as_str(), message.as_str());
        }
    }

    #[test]
    fn test_wrapped_calls_always_grow_the_sink(inputs in prop::collection::vec(any::<i32>(), 1..30)) {
        let sink = LogSink::shared("session");
        let negate = wrap::logged(sink.clone(), "negate", |n: i32| n.wrapping_neg());

        for (i, n) in inputs.iter().enumerate() {
            prop_assert_eq!(negate(*n), n.wrapping_neg());
            // Two records per call: arguments and return value
            prop_assert_eq!(sink.borrow().len(), (i + 1) * 2);
        }
    }
}
