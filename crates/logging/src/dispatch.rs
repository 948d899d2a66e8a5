//! The dispatch API.
//!
//! [`SinkExt`] is blanket-implemented for every [`Sink`] and is the only
//! path through which records reach a sink. Each operation invokes the sink
//! at most once; none retries, batches, or buffers across calls.
//!
//! The plain-string operations take the severity explicitly and perform the
//! enablement check themselves. The staged operations consume a
//! [`StagedMessage`], whose enablement was already decided at its creation,
//! and perform no second check; they read the severity the builder was
//! fixed to. Both families reject the [`Severity::None`] sentinel before
//! doing any other work.

use std::error::Error;

use stagelog_core::{CorrelationId, Record, Severity, SeverityNotWritable, Sink};

use crate::staged::StagedMessage;

fn dispatch_plain<S: Sink + ?Sized>(
    sink: &S,
    severity: Severity,
    correlation: Option<&CorrelationId>,
    error: Option<&(dyn Error + 'static)>,
    message: &str,
) -> Result<(), SeverityNotWritable> {
    if !severity.is_writable() {
        return Err(SeverityNotWritable(severity));
    }
    if sink.is_enabled(severity) {
        let mut record = Record::new(severity, message);
        if let Some(correlation) = correlation {
            record = record.with_correlation(correlation);
        }
        if let Some(error) = error {
            record = record.with_error(error);
        }
        sink.write(&record);
    }
    Ok(())
}

fn dispatch_staged<S: Sink + ?Sized>(
    sink: &S,
    mut staged: StagedMessage,
    correlation: Option<&CorrelationId>,
    error: Option<&(dyn Error + 'static)>,
) -> Result<(), SeverityNotWritable> {
    let severity = staged.severity();
    if !severity.is_writable() {
        return Err(SeverityNotWritable(severity));
    }
    if !staged.is_enabled() {
        return Ok(());
    }
    let (template, arguments) = staged.finalize();
    let mut record = Record::new(severity, template.as_str()).with_arguments(&arguments);
    if let Some(correlation) = correlation {
        record = record.with_correlation(correlation);
    }
    if let Some(error) = error {
        record = record.with_error(error);
    }
    sink.write(&record);
    Ok(())
}

/// Dispatch operations available on every [`Sink`].
///
/// # Examples
///
/// ```
/// use stagelog::{Severity, SinkExt, StagedMessage};
/// use stagelog_sink::MemorySink;
///
/// let sink = MemorySink::new();
/// sink.log(Severity::Info, "ready")?;
///
/// let mut message = StagedMessage::warning(&sink);
/// message.append_literal("slow responses: ");
/// message.append_value(17, "count");
/// sink.log_staged(message)?;
///
/// assert_eq!(sink.len(), 2);
/// # Ok::<(), stagelog::SeverityNotWritable>(())
/// ```
pub trait SinkExt: Sink {
    /// Writes a plain message at `severity`.
    fn log(&self, severity: Severity, message: &str) -> Result<(), SeverityNotWritable> {
        dispatch_plain(self, severity, None, None, message)
    }

    /// Writes a plain message with a correlation id.
    fn log_with_id(
        &self,
        severity: Severity,
        correlation: CorrelationId,
        message: &str,
    ) -> Result<(), SeverityNotWritable> {
        dispatch_plain(self, severity, Some(&correlation), None, message)
    }

    /// Writes a plain message with an associated error.
    fn log_with_error(
        &self,
        severity: Severity,
        error: &(dyn Error + 'static),
        message: &str,
    ) -> Result<(), SeverityNotWritable> {
        dispatch_plain(self, severity, None, Some(error), message)
    }

    /// Writes a plain message with both a correlation id and an error.
    fn log_with_id_and_error(
        &self,
        severity: Severity,
        correlation: CorrelationId,
        error: &(dyn Error + 'static),
        message: &str,
    ) -> Result<(), SeverityNotWritable> {
        dispatch_plain(self, severity, Some(&correlation), Some(error), message)
    }

    /// Consumes a staged message and writes it if its builder was enabled.
    fn log_staged(&self, staged: StagedMessage) -> Result<(), SeverityNotWritable> {
        dispatch_staged(self, staged, None, None)
    }

    /// Consumes a staged message, attaching a correlation id.
    fn log_staged_with_id(
        &self,
        staged: StagedMessage,
        correlation: CorrelationId,
    ) -> Result<(), SeverityNotWritable> {
        dispatch_staged(self, staged, Some(&correlation), None)
    }

    /// Consumes a staged message, attaching an associated error.
    fn log_staged_with_error(
        &self,
        staged: StagedMessage,
        error: &(dyn Error + 'static),
    ) -> Result<(), SeverityNotWritable> {
        dispatch_staged(self, staged, None, Some(error))
    }

    /// Consumes a staged message, attaching both a correlation id and an
    /// error.
    fn log_staged_with_id_and_error(
        &self,
        staged: StagedMessage,
        correlation: CorrelationId,
        error: &(dyn Error + 'static),
    ) -> Result<(), SeverityNotWritable> {
        dispatch_staged(self, staged, Some(&correlation), Some(error))
    }
}

impl<S: Sink + ?Sized> SinkExt for S {}
