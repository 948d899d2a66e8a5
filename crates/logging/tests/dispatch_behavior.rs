//! Integration tests for the dispatch operations.
//!
//! These verify the invalid-severity guard, the at-most-once sink
//! invocation, the verbatim plain-string path, and the pass-through of
//! correlation ids and errors.

use std::cell::Cell;

use stagelog::{CorrelationId, Severity, SeverityNotWritable, Sink, SinkExt, StagedMessage};
use stagelog_core::Record;
use stagelog_sink::MemorySink;

/// Sink stub that counts enablement checks and writes.
struct ProbeSink {
    enabled: bool,
    checks: Cell<usize>,
    writes: Cell<usize>,
}

impl ProbeSink {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            checks: Cell::new(0),
            writes: Cell::new(0),
        }
    }
}

impl Sink for ProbeSink {
    fn is_enabled(&self, _severity: Severity) -> bool {
        self.checks.set(self.checks.get() + 1);
        self.enabled
    }

    fn write(&self, _record: &Record<'_>) {
        self.writes.set(self.writes.get() + 1);
    }
}

// ============================================================================
// Sentinel Rejection
// ============================================================================

/// Verifies plain dispatch rejects the sentinel before touching the sink.
#[test]
fn plain_dispatch_rejects_the_sentinel() {
    let sink = ProbeSink::new(true);
    let result = sink.log(Severity::None, "never");
    assert_eq!(result, Err(SeverityNotWritable(Severity::None)));
    assert_eq!(sink.checks.get(), 0);
    assert_eq!(sink.writes.get(), 0);
}

/// Verifies every plain overload applies the same guard.
#[test]
fn all_plain_overloads_reject_the_sentinel() {
    let sink = ProbeSink::new(true);
    let error = std::io::Error::other("cause");

    assert!(sink.log(Severity::None, "m").is_err());
    assert!(sink.log_with_id(Severity::None, CorrelationId::new(1), "m").is_err());
    assert!(sink.log_with_error(Severity::None, &error, "m").is_err());
    assert!(
        sink.log_with_id_and_error(Severity::None, CorrelationId::new(1), &error, "m")
            .is_err()
    );
    assert_eq!(sink.writes.get(), 0);
}

/// Verifies staged dispatch rejects a sentinel builder without writing.
#[test]
fn staged_dispatch_rejects_the_sentinel() {
    let sink = ProbeSink::new(true);
    let message = StagedMessage::new(&sink, Severity::None);
    let result = sink.log_staged(message);
    assert_eq!(result, Err(SeverityNotWritable(Severity::None)));
    assert_eq!(sink.writes.get(), 0);
}

// ============================================================================
// Plain-String Path
// ============================================================================

/// Verifies an enabled plain message reaches the sink exactly once,
/// verbatim and without an argument list.
#[test]
fn enabled_plain_messages_write_once_verbatim() {
    let sink = MemorySink::new();
    sink.log(Severity::Info, "braces {stay} literal").unwrap();

    let entries = sink.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity(), Severity::Info);
    assert_eq!(entries[0].template(), "braces {stay} literal");
    assert!(entries[0].arguments().is_none());
}

/// Verifies a disabled plain message never reaches the sink.
#[test]
fn disabled_plain_messages_are_suppressed() {
    let sink = ProbeSink::new(false);
    sink.log(Severity::Debug, "quiet").unwrap();
    assert_eq!(sink.checks.get(), 1);
    assert_eq!(sink.writes.get(), 0);
}

// ============================================================================
// Staged Path
// ============================================================================

/// Verifies staged dispatch performs no second enablement check.
#[test]
fn staged_dispatch_does_not_recheck_enablement() {
    let sink = ProbeSink::new(true);
    let mut message = StagedMessage::warning(&sink);
    message.append_literal("once");
    assert_eq!(sink.checks.get(), 1);

    sink.log_staged(message).unwrap();
    assert_eq!(sink.checks.get(), 1);
    assert_eq!(sink.writes.get(), 1);
}

/// Verifies a disabled staged message dispatches to nothing, successfully.
#[test]
fn disabled_staged_messages_dispatch_to_nothing() {
    let sink = ProbeSink::new(false);
    let mut message = StagedMessage::warning(&sink);
    message.append_literal("never rendered");

    sink.log_staged(message).unwrap();
    assert_eq!(sink.writes.get(), 0);
}

// ============================================================================
// Context Pass-Through
// ============================================================================

/// Verifies the correlation id and error arrive at the sink unmodified.
#[test]
fn correlation_and_error_pass_through_unmodified() {
    let sink = MemorySink::new();
    let error = std::io::Error::other("connection reset");

    let mut message = StagedMessage::error(&sink);
    message.append_literal("sync failed for ");
    message.append_value("alpha", "peer");
    sink.log_staged_with_id_and_error(message, CorrelationId::named(7, "sync"), &error)
        .unwrap();

    let entries = sink.entries();
    assert_eq!(entries.len(), 1);
    let correlation = entries[0].correlation().expect("correlation recorded");
    assert_eq!(correlation.id(), 7);
    assert_eq!(correlation.name(), Some("sync"));
    assert_eq!(entries[0].error(), Some("connection reset"));
    assert_eq!(entries[0].template(), "sync failed for {peer}");
}

/// Verifies the plain path forwards context the same way.
#[test]
fn plain_path_forwards_context_too() {
    let sink = MemorySink::new();
    let error = std::io::Error::other("denied");

    sink.log_with_id_and_error(
        Severity::Warning,
        CorrelationId::new(12),
        &error,
        "access check failed",
    )
    .unwrap();

    let entries = sink.entries();
    assert_eq!(entries[0].correlation().map(CorrelationId::id), Some(12));
    assert_eq!(entries[0].error(), Some("denied"));
}

/// Verifies each dispatch operation writes at most once.
#[test]
fn every_operation_writes_at_most_once() {
    let sink = ProbeSink::new(true);
    let error = std::io::Error::other("cause");

    sink.log(Severity::Info, "a").unwrap();
    sink.log_with_id(Severity::Info, CorrelationId::new(1), "b").unwrap();
    sink.log_with_error(Severity::Info, &error, "c").unwrap();
    sink.log_with_id_and_error(Severity::Info, CorrelationId::new(2), &error, "d")
        .unwrap();
    assert_eq!(sink.writes.get(), 4);

    let message = StagedMessage::info(&sink);
    sink.log_staged(message).unwrap();
    let message = StagedMessage::info(&sink);
    sink.log_staged_with_id(message, CorrelationId::new(3)).unwrap();
    let message = StagedMessage::info(&sink);
    sink.log_staged_with_error(message, &error).unwrap();
    let message = StagedMessage::info(&sink);
    sink.log_staged_with_id_and_error(message, CorrelationId::new(4), &error)
        .unwrap();
    assert_eq!(sink.writes.get(), 8);
}
