//! Integration tests for the staged message builder lifecycle.
//!
//! These cover the enablement gate decided at creation time, the no-op
//! behaviour of appends on disabled builders, and the destructive
//! single-use finalize handoff.

use std::cell::Cell;

use stagelog::{Severity, Sink, StagedMessage};
use stagelog_core::Record;

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
// Enablement Decision
// ============================================================================

/// Verifies the sink is queried exactly once per builder, at creation.
#[test]
fn enablement_is_decided_once_at_creation() {
    let sink = ProbeSink::new(true);
    let mut message = StagedMessage::warning(&sink);
    assert_eq!(sink.checks.get(), 1);

    message.append_literal("a");
    message.append_value(1, "one");
    message.append_literal("b");
    message.append_value(2, "two");
    let _parts = message.finalize();

    assert_eq!(sink.checks.get(), 1);
}

/// Verifies a disabled builder is still constructible and appendable.
#[test]
fn disabled_builders_accept_the_same_append_sequence() {
    let sink = ProbeSink::new(false);
    let mut message = StagedMessage::error(&sink);
    assert!(!message.is_enabled());

    message.append_literal("user ");
    message.append_value(42, "id");
    message.append_literal(" not found");
    // No panic, no accumulation; the call pattern is identical either way.
    let (template, arguments) = message.finalize();
    assert!(template.is_empty());
    assert!(arguments.is_empty());
}

/// Verifies builders at the filter sentinel never consult the sink.
#[test]
fn sentinel_builders_skip_the_sink_query() {
    let sink = ProbeSink::new(true);
    let message = StagedMessage::new(&sink, Severity::None);
    assert!(!message.is_enabled());
    assert_eq!(sink.checks.get(), 0);
}

// ============================================================================
// Disabled-Path Suppression
// ============================================================================

/// Verifies no append mutates a disabled builder, across all append kinds.
#[test]
fn disabled_appends_touch_nothing() {
    let sink = ProbeSink::new(false);
    let mut message = StagedMessage::debug(&sink);

    message.append_literal("literal");
    message.append_value("text", "text");
    message.append_argument(3.5, 10, Some("e"), "ratio");
    message.append_display(String::from("displayable"), "payload");

    let (template, arguments) = message.finalize();
    assert_eq!(template.as_str(), "");
    assert_eq!(template.placeholder_count(), 0);
    assert!(arguments.is_empty());
    assert_eq!(sink.writes.get(), 0);
}

// ============================================================================
// Template / Argument Parity
// ============================================================================

/// Verifies the placeholder count always matches the argument count at
/// hand-off, including when literals contain braces.
#[test]
fn placeholder_count_matches_argument_count() {
    let sink = ProbeSink::new(true);
    let mut message = StagedMessage::info(&sink);
    message.append_literal("shape {curly} ");
    message.append_value(1, "first");
    message.append_value(2, "second");
    message.append_literal(" done");

    let (template, arguments) = message.finalize();
    assert_eq!(template.placeholder_count(), arguments.len());
    assert_eq!(template.as_str(), "shape {{curly}} {first}{second} done");
}

/// Verifies non-identifier expression text falls back to positional
/// placeholders while the capture keeps the original text.
#[test]
fn positional_fallback_preserves_expression_text() {
    let sink = ProbeSink::new(true);
    let mut message = StagedMessage::info(&sink);
    message.append_value(10, "a + b");

    let (template, arguments) = message.finalize();
    assert_eq!(template.as_str(), "{0}");
    assert_eq!(arguments[0].name(), "a + b");
}

// ============================================================================
// Finalize Semantics
// ============================================================================

/// Verifies a second finalize yields empty results, not the previous data.
#[test]
fn double_finalize_yields_empty_results() {
    let sink = ProbeSink::new(true);
    let mut message = StagedMessage::critical(&sink);
    message.append_literal("shutting down: ");
    message.append_value("disk full", "reason");

    let (first_template, first_arguments) = message.finalize();
    assert_eq!(first_template.as_str(), "shutting down: {reason}");
    assert_eq!(first_arguments.len(), 1);

    let (second_template, second_arguments) = message.finalize();
    assert_eq!(second_template.as_str(), "");
    assert!(second_arguments.is_empty());
}

/// Verifies a finalized builder ignores later appends entirely.
#[test]
fn finalize_disables_the_builder() {
    let sink = ProbeSink::new(true);
    let mut message = StagedMessage::warning(&sink);
    message.append_literal("kept");
    let _parts = message.finalize();

    assert!(!message.is_enabled());
    message.append_value(5, "late");
    let (template, arguments) = message.finalize();
    assert!(template.is_empty());
    assert!(arguments.is_empty());
}
