//! The staged message builder.

use std::borrow::Cow;
use std::fmt;
use std::mem;

use stagelog_core::{ArgumentCapture, Severity, Sink, Template, Value};

/// Rough template-text cost of one placeholder, used when sizing the buffer
/// from the caller's argument-count estimate.
const PLACEHOLDER_LENGTH_HINT: usize = 11;

/// Transient, single-use accumulator for one log message.
///
/// The builder decides at creation time, with a single sink query, whether
/// the message will be written at all. When the severity is inactive every
/// append is a check-and-return no-op: no text is copied, no value is
/// converted or boxed, and the internal buffers stay empty. The decision is
/// never re-evaluated mid-build, so a concurrent sink reconfiguration can
/// make it stale for the remainder of the message; that is by contract the
/// caller's trade for paying the enablement check exactly once.
///
/// A builder is owned exclusively by the log call that created it and is
/// consumed by the dispatch step. [`finalize`](Self::finalize) is a
/// destructive handoff: the first call returns the accumulated template and
/// arguments, every later call returns empty results.
///
/// # Examples
///
/// ```
/// use stagelog::{SinkExt, StagedMessage};
/// use stagelog_sink::MemorySink;
///
/// let sink = MemorySink::new();
/// let mut message = StagedMessage::warning(&sink);
/// message.append_literal("user ");
/// message.append_value(42, "id");
/// message.append_literal(" not found");
/// sink.log_staged(message)?;
///
/// let entries = sink.entries();
/// assert_eq!(entries[0].template(), "user {id} not found");
/// # Ok::<(), stagelog::SeverityNotWritable>(())
/// ```
#[derive(Debug)]
pub struct StagedMessage {
    enabled: bool,
    severity: Severity,
    template: Template,
    arguments: Vec<ArgumentCapture>,
}

impl StagedMessage {
    /// Creates a builder for `severity`, querying `sink` once for whether
    /// that severity is active.
    ///
    /// A disabled builder is still returned, so call sites can run the same
    /// append sequence unconditionally. A [`Severity::None`] builder is
    /// always disabled and the sink is not consulted for it.
    #[must_use]
    pub fn new<S: Sink + ?Sized>(sink: &S, severity: Severity) -> Self {
        Self::with_estimates(sink, severity, 0, 0)
    }

    /// Creates a builder with capacity reserved from the caller's estimates
    /// of the total literal length and the argument count.
    ///
    /// The estimates only affect allocation, never content; they are ignored
    /// entirely when the builder comes out disabled.
    #[must_use]
    pub fn with_estimates<S: Sink + ?Sized>(
        sink: &S,
        severity: Severity,
        literal_length: usize,
        argument_count: usize,
    ) -> Self {
        let enabled = severity.is_writable() && sink.is_enabled(severity);
        if enabled {
            Self {
                enabled,
                severity,
                template: Template::with_capacity(
                    literal_length + argument_count * PLACEHOLDER_LENGTH_HINT,
                ),
                arguments: Vec::with_capacity(argument_count),
            }
        } else {
            Self {
                enabled: false,
                severity,
                template: Template::new(),
                arguments: Vec::new(),
            }
        }
    }

    /// Creates a builder fixed at [`Severity::Trace`].
    #[must_use]
    pub fn trace<S: Sink + ?Sized>(sink: &S) -> Self {
        Self::new(sink, Severity::Trace)
    }

    /// Creates a builder fixed at [`Severity::Debug`].
    #[must_use]
    pub fn debug<S: Sink + ?Sized>(sink: &S) -> Self {
        Self::new(sink, Severity::Debug)
    }

    /// Creates a builder fixed at [`Severity::Info`].
    #[must_use]
    pub fn info<S: Sink + ?Sized>(sink: &S) -> Self {
        Self::new(sink, Severity::Info)
    }

    /// Creates a builder fixed at [`Severity::Warning`].
    #[must_use]
    pub fn warning<S: Sink + ?Sized>(sink: &S) -> Self {
        Self::new(sink, Severity::Warning)
    }

    /// Creates a builder fixed at [`Severity::Error`].
    #[must_use]
    pub fn error<S: Sink + ?Sized>(sink: &S) -> Self {
        Self::new(sink, Severity::Error)
    }

    /// Creates a builder fixed at [`Severity::Critical`].
    #[must_use]
    pub fn critical<S: Sink + ?Sized>(sink: &S) -> Self {
        Self::new(sink, Severity::Critical)
    }

    /// Reports whether appends accumulate. `false` once the builder was
    /// created disabled or has been finalized.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the severity fixed at creation.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Appends literal text.
    pub fn append_literal(&mut self, text: &str) {
        if !self.enabled {
            return;
        }
        self.template.push_literal(text);
    }

    /// Appends a computed value with explicit display metadata.
    ///
    /// `name` is the source-expression text for the value, supplied by the
    /// call site; the macros pass `stringify!` output and manual callers may
    /// pass an empty string to fall back to positional placeholders. The
    /// conversion into a [`Value`] runs only when the builder is enabled, so
    /// the disabled path never allocates for it.
    pub fn append_argument<T: Into<Value>>(
        &mut self,
        value: T,
        alignment: i32,
        format: Option<&'static str>,
        name: impl Into<Cow<'static, str>>,
    ) {
        if !self.enabled {
            return;
        }
        let name = name.into();
        self.template
            .push_placeholder(&name, self.arguments.len(), alignment, format);
        let mut capture = ArgumentCapture::new(value, name).with_alignment(alignment);
        if let Some(format) = format {
            capture = capture.with_format(format);
        }
        self.arguments.push(capture);
    }

    /// Appends a computed value with default alignment and no format.
    pub fn append_value<T: Into<Value>>(&mut self, value: T, name: impl Into<Cow<'static, str>>) {
        self.append_argument(value, 0, None, name);
    }

    /// Appends any displayable value, boxing it.
    ///
    /// The box is only allocated when the builder is enabled.
    pub fn append_display<T>(&mut self, value: T, name: impl Into<Cow<'static, str>>)
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        if !self.enabled {
            return;
        }
        self.append_argument(Value::display(value), 0, None, name);
    }

    /// Hands off the accumulated template and argument list, resetting the
    /// builder.
    ///
    /// This is a destructive, single-use extraction: the builder is left
    /// disabled with empty buffers, so a second call returns an empty
    /// template and no arguments instead of duplicating the entry. Calling
    /// it on a disabled builder likewise yields empty results; neither case
    /// is an error.
    #[must_use = "the extracted template and arguments are the message"]
    pub fn finalize(&mut self) -> (Template, Vec<ArgumentCapture>) {
        self.enabled = false;
        let template = mem::take(&mut self.template);
        let arguments = mem::take(&mut self.arguments);
        debug_assert_eq!(template.placeholder_count(), arguments.len());
        (template, arguments)
    }
}
