//! The sink collaborator contract.

use std::error::Error;
use std::sync::Arc;

use crate::capture::ArgumentCapture;
use crate::correlation::CorrelationId;
use crate::severity::Severity;
use crate::template::{Segments, segments};

/// Backend that filters entries by severity and renders or stores them.
///
/// The dispatch layer queries [`is_enabled`](Self::is_enabled) exactly once
/// per log call and, when the answer is yes, invokes
/// [`write`](Self::write) exactly once with the finished record. `write` is
/// never handed a [`Severity::None`] record.
///
/// Implementations must be safe to call from multiple threads when shared;
/// the provided sinks guard their mutable state internally. Failures inside
/// `write` are the sink's own responsibility and are not surfaced through
/// the dispatch layer.
pub trait Sink {
    /// Reports whether entries at `severity` are currently accepted.
    fn is_enabled(&self, severity: Severity) -> bool;

    /// Consumes one finished record.
    fn write(&self, record: &Record<'_>);
}

impl<S: Sink + ?Sized> Sink for &S {
    fn is_enabled(&self, severity: Severity) -> bool {
        (**self).is_enabled(severity)
    }

    fn write(&self, record: &Record<'_>) {
        (**self).write(record);
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn is_enabled(&self, severity: Severity) -> bool {
        (**self).is_enabled(severity)
    }

    fn write(&self, record: &Record<'_>) {
        (**self).write(record);
    }
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn is_enabled(&self, severity: Severity) -> bool {
        (**self).is_enabled(severity)
    }

    fn write(&self, record: &Record<'_>) {
        (**self).write(record);
    }
}

/// One finished log entry, borrowed for the duration of a single
/// [`Sink::write`] call.
///
/// A record produced by the plain-string dispatch path carries no argument
/// list at all ([`arguments`](Self::arguments) is `None`) and its template
/// is the caller's message verbatim; sinks must render it literally. A
/// record produced from a staged builder carries the argument list (possibly
/// empty) and a template whose placeholder count matches the list's length.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    severity: Severity,
    correlation: Option<&'a CorrelationId>,
    error: Option<&'a (dyn Error + 'static)>,
    template: &'a str,
    arguments: Option<&'a [ArgumentCapture]>,
}

impl<'a> Record<'a> {
    /// Creates a record with no correlation id, error or argument list.
    #[must_use]
    pub const fn new(severity: Severity, template: &'a str) -> Self {
        Self {
            severity,
            correlation: None,
            error: None,
            template,
            arguments: None,
        }
    }

    /// Attaches the argument list captured alongside the template.
    #[must_use]
    pub fn with_arguments(mut self, arguments: &'a [ArgumentCapture]) -> Self {
        self.arguments = Some(arguments);
        self
    }

    /// Attaches a correlation id.
    #[must_use]
    pub fn with_correlation(mut self, correlation: &'a CorrelationId) -> Self {
        self.correlation = Some(correlation);
        self
    }

    /// Attaches an associated error.
    #[must_use]
    pub fn with_error(mut self, error: &'a (dyn Error + 'static)) -> Self {
        self.error = Some(error);
        self
    }

    /// Returns the severity of the entry. Never [`Severity::None`] when the
    /// record reaches a sink through the dispatch layer.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the correlation id, if one was supplied.
    #[must_use]
    pub const fn correlation(&self) -> Option<&'a CorrelationId> {
        self.correlation
    }

    /// Returns the associated error, if one was supplied.
    #[must_use]
    pub const fn error(&self) -> Option<&'a (dyn Error + 'static)> {
        self.error
    }

    /// Returns the template text.
    #[must_use]
    pub const fn template(&self) -> &'a str {
        self.template
    }

    /// Returns the captured arguments, or `None` for a plain-string record.
    #[must_use]
    pub const fn arguments(&self) -> Option<&'a [ArgumentCapture]> {
        self.arguments
    }

    /// Parses the template into segments for rendering.
    #[must_use]
    pub fn segments(&self) -> Segments<'a> {
        segments(self.template)
    }
}
