//! In-memory recording sink.

use std::fmt::Write as _;
use std::sync::{Mutex, PoisonError};

use stagelog_core::{ArgumentCapture, CorrelationId, Record, Severity, Sink};

/// Sink that records every accepted entry in memory.
///
/// Useful for tests and for embedders that post-process entries
/// themselves. Each write snapshots the record into an owned [`LogEntry`];
/// captured argument values are rendered to text at write time, so entries
/// outlive the borrowed record without cloning trait objects.
///
/// # Examples
///
/// ```
/// use stagelog::{log_warning, Severity};
/// use stagelog_sink::MemorySink;
///
/// let sink = MemorySink::with_threshold(Severity::Warning);
/// let user_id = 42;
/// log_warning!(sink, "user " {user_id} " not found");
///
/// let entries = sink.entries();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].severity(), Severity::Warning);
/// assert_eq!(entries[0].template(), "user {user_id} not found");
/// ```
#[derive(Debug)]
pub struct MemorySink {
    threshold: Severity,
    entries: Mutex<Vec<LogEntry>>,
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySink {
    /// Creates a sink that accepts every writable severity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_threshold(Severity::Trace)
    }

    /// Creates a sink that only accepts entries at or above `threshold`.
    #[must_use]
    pub fn with_threshold(threshold: Severity) -> Self {
        Self {
            threshold,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Returns a copy of the recorded entries.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    /// Removes and returns the recorded entries.
    pub fn drain(&self) -> Vec<LogEntry> {
        std::mem::take(&mut *self.lock())
    }

    /// Returns the number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Reports whether no entries have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Sink for MemorySink {
    fn is_enabled(&self, severity: Severity) -> bool {
        severity.is_writable() && severity.is_at_least(self.threshold)
    }

    fn write(&self, record: &Record<'_>) {
        let entry = LogEntry::snapshot(record);
        self.lock().push(entry);
    }
}

/// Owned snapshot of one written record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogEntry {
    severity: Severity,
    correlation: Option<CorrelationId>,
    error: Option<String>,
    template: String,
    arguments: Option<Vec<RenderedArgument>>,
}

impl LogEntry {
    fn snapshot(record: &Record<'_>) -> Self {
        Self {
            severity: record.severity(),
            correlation: record.correlation().cloned(),
            error: record.error().map(|error| {
                let mut text = error.to_string();
                let mut source = error.source();
                while let Some(cause) = source {
                    let _ = write!(text, ": {cause}");
                    source = cause.source();
                }
                text
            }),
            template: record.template().to_string(),
            arguments: record
                .arguments()
                .map(|arguments| arguments.iter().map(RenderedArgument::snapshot).collect()),
        }
    }

    /// Returns the severity the entry was written at.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the correlation id, if one was attached.
    #[must_use]
    pub const fn correlation(&self) -> Option<&CorrelationId> {
        self.correlation.as_ref()
    }

    /// Returns the rendered error chain, if an error was attached.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the template text.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the captured arguments, or `None` for a plain-string entry.
    #[must_use]
    pub fn arguments(&self) -> Option<&[RenderedArgument]> {
        self.arguments.as_deref()
    }

    /// Looks up a captured argument by its expression text.
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&RenderedArgument> {
        self.arguments
            .as_deref()?
            .iter()
            .find(|argument| argument.name() == name)
    }
}

/// One captured argument, rendered to text at write time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderedArgument {
    name: String,
    value: String,
    is_null: bool,
    alignment: i32,
    format: Option<String>,
}

impl RenderedArgument {
    fn snapshot(capture: &ArgumentCapture) -> Self {
        Self {
            name: capture.name().to_string(),
            value: capture.value().to_string(),
            is_null: capture.value().is_null(),
            alignment: capture.alignment(),
            format: capture.format().map(ToString::to_string),
        }
    }

    /// Returns the source-expression text.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value rendered through its `Display` form.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Reports whether the captured value was the explicit null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.is_null
    }

    /// Returns the field alignment.
    #[must_use]
    pub const fn alignment(&self) -> i32 {
        self.alignment
    }

    /// Returns the format specifier, if any.
    #[must_use]
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }
}
