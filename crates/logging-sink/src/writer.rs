//! Streaming sink over any [`io::Write`] target.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use stagelog_core::{Record, Severity, Sink};

use crate::line_mode::LineMode;
use crate::render::{self, RenderOptions};

/// Sink that renders each record into an [`io::Write`] target.
///
/// The sink owns the writer together with a reusable scratch buffer, so
/// repeated writes avoid re-allocating render storage. Entries below the
/// configured threshold are reported as disabled, which lets the dispatch
/// layer suppress their construction entirely; a [`Severity::None`]
/// threshold silences the sink altogether. Rendering follows the
/// [`RenderOptions`] policy and the [`LineMode`] newline policy.
///
/// The writer and scratch state sit behind a mutex so a shared sink can be
/// written from several threads; each entry is rendered and written while
/// the lock is held, keeping lines intact. I/O failures are retained
/// internally and exposed through [`take_last_error`](Self::take_last_error)
/// rather than surfaced through the dispatch layer.
///
/// # Examples
///
/// Collect entries into a byte buffer with newline terminators:
///
/// ```
/// use stagelog::{Severity, SinkExt};
/// use stagelog_sink::WriterSink;
///
/// let sink = WriterSink::new(Vec::new());
/// sink.log(Severity::Warning, "some files vanished")?;
/// sink.log(Severity::Error, "partial transfer")?;
///
/// let output = String::from_utf8(sink.into_inner()).unwrap();
/// assert_eq!(output, "warning: some files vanished\nerror: partial transfer\n");
/// # Ok::<(), stagelog::SeverityNotWritable>(())
/// ```
///
/// Render a final entry without a trailing newline:
///
/// ```
/// use stagelog::{Severity, SinkExt};
/// use stagelog_sink::{LineMode, WriterSink};
///
/// let sink = WriterSink::with_line_mode(Vec::new(), LineMode::WithoutNewline);
/// sink.log(Severity::Info, "ready")?;
/// assert_eq!(sink.into_inner(), b"info: ready".to_vec());
/// # Ok::<(), stagelog::SeverityNotWritable>(())
/// ```
#[derive(Debug)]
pub struct WriterSink<W> {
    threshold: Severity,
    line_mode: LineMode,
    options: RenderOptions,
    state: Mutex<WriterState<W>>,
}

#[derive(Debug)]
struct WriterState<W> {
    writer: W,
    scratch: String,
    last_error: Option<io::Error>,
}

impl<W> WriterSink<W> {
    /// Creates a sink that accepts every writable severity and appends a
    /// newline after each entry.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_parts(
            writer,
            Severity::Trace,
            LineMode::WithNewline,
            RenderOptions::new(),
        )
    }

    /// Creates a sink with the provided [`LineMode`].
    #[must_use]
    pub fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self::with_parts(writer, Severity::Trace, line_mode, RenderOptions::new())
    }

    /// Creates a sink that only accepts entries at or above `threshold`.
    #[must_use]
    pub fn with_threshold(writer: W, threshold: Severity) -> Self {
        Self::with_parts(writer, threshold, LineMode::WithNewline, RenderOptions::new())
    }

    /// Creates a sink from all of its parts.
    #[must_use]
    pub fn with_parts(
        writer: W,
        threshold: Severity,
        line_mode: LineMode,
        options: RenderOptions,
    ) -> Self {
        Self {
            threshold,
            line_mode,
            options,
            state: Mutex::new(WriterState {
                writer,
                scratch: String::new(),
                last_error: None,
            }),
        }
    }

    /// Returns the severity threshold.
    #[must_use]
    pub const fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Updates the severity threshold for subsequent entries.
    pub fn set_threshold(&mut self, threshold: Severity) {
        self.threshold = threshold;
    }

    /// Returns the current [`LineMode`].
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Updates the [`LineMode`] used for subsequent entries.
    pub fn set_line_mode(&mut self, line_mode: LineMode) {
        self.line_mode = line_mode;
    }

    /// Returns the render options.
    #[must_use]
    pub const fn options(&self) -> RenderOptions {
        self.options
    }

    /// Updates the render options used for subsequent entries.
    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    /// Mutably borrows the underlying writer.
    #[must_use]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self
            .state
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .writer
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .writer
    }

    /// Takes the most recent write error, if any occurred.
    ///
    /// The dispatch layer never observes sink I/O failures; callers that
    /// care can poll for them here.
    #[must_use]
    pub fn take_last_error(&self) -> Option<io::Error> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last_error
            .take()
    }
}

impl<W: Default> Default for WriterSink<W> {
    fn default() -> Self {
        Self::new(W::default())
    }
}

impl<W: Write> WriterSink<W> {
    /// Flushes the underlying writer.
    pub fn flush(&self) -> io::Result<()> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .writer
            .flush()
    }
}

impl<W: Write> Sink for WriterSink<W> {
    fn is_enabled(&self, severity: Severity) -> bool {
        severity.is_writable() && severity.is_at_least(self.threshold)
    }

    fn write(&self, record: &Record<'_>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let state = &mut *state;
        state.scratch.clear();
        render::render_record(&mut state.scratch, record, &self.options);
        if self.line_mode.append_newline() {
            state.scratch.push('\n');
        }
        if let Err(error) = state.writer.write_all(state.scratch.as_bytes()) {
            state.last_error = Some(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_gates_enablement() {
        let sink = WriterSink::with_threshold(Vec::new(), Severity::Warning);
        assert!(!sink.is_enabled(Severity::Info));
        assert!(sink.is_enabled(Severity::Warning));
        assert!(sink.is_enabled(Severity::Critical));
        assert!(!sink.is_enabled(Severity::None));
    }

    #[test]
    fn none_threshold_silences_the_sink() {
        let sink = WriterSink::with_threshold(Vec::new(), Severity::None);
        for severity in [Severity::Trace, Severity::Warning, Severity::Critical] {
            assert!(!sink.is_enabled(severity));
        }
    }

    #[test]
    fn writes_render_prefix_and_newline() {
        let sink = WriterSink::new(Vec::new());
        sink.write(&Record::new(Severity::Warning, "vanished"));
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output, "warning: vanished\n");
    }

    #[test]
    fn scratch_reuse_keeps_entries_separate() {
        let sink = WriterSink::new(Vec::new());
        sink.write(&Record::new(Severity::Info, "first entry is long"));
        sink.write(&Record::new(Severity::Info, "second"));
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output, "info: first entry is long\ninfo: second\n");
    }

    #[test]
    fn io_failures_are_retained_not_propagated() {
        struct FailingWriter;

        impl Write for FailingWriter {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let sink = WriterSink::new(FailingWriter);
        sink.write(&Record::new(Severity::Error, "lost"));
        let error = sink.take_last_error().expect("write error retained");
        assert_eq!(error.to_string(), "closed");
        assert!(sink.take_last_error().is_none());
    }

    #[test]
    fn get_mut_reaches_the_writer() {
        let mut sink = WriterSink::new(Vec::new());
        sink.get_mut().extend_from_slice(b"seed:");
        sink.write(&Record::new(Severity::Info, "x"));
        let output = sink.into_inner();
        assert!(output.starts_with(b"seed:"));
    }
}
