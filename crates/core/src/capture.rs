use std::borrow::Cow;

use crate::value::Value;

/// A captured argument together with its display metadata.
///
/// Pairs a [`Value`] with the source-expression text that produced it, an
/// optional field alignment and an optional format specifier. The expression
/// text is supplied by the call site (the macros pass `stringify!` output);
/// when it is empty or not identifier-like, templates fall back to the
/// argument's positional index instead.
///
/// No validation is performed on the value itself. How alignment and format
/// are interpreted is the consuming sink's responsibility.
///
/// # Examples
///
/// ```
/// use stagelog_core::ArgumentCapture;
///
/// let capture = ArgumentCapture::new(42, "user_id")
///     .with_alignment(8)
///     .with_format("x");
///
/// assert_eq!(capture.name(), "user_id");
/// assert_eq!(capture.alignment(), 8);
/// assert_eq!(capture.format(), Some("x"));
/// ```
#[derive(Debug)]
pub struct ArgumentCapture {
    value: Value,
    name: Cow<'static, str>,
    alignment: i32,
    format: Option<Cow<'static, str>>,
}

impl ArgumentCapture {
    /// Captures a value with the given source-expression text.
    #[must_use]
    pub fn new(value: impl Into<Value>, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            value: value.into(),
            name: name.into(),
            alignment: 0,
            format: None,
        }
    }

    /// Sets the field alignment. Positive values right-justify, negative
    /// values left-justify, zero (the default) renders the value as-is.
    #[must_use]
    pub fn with_alignment(mut self, alignment: i32) -> Self {
        self.alignment = alignment;
        self
    }

    /// Attaches a format specifier for sinks that interpret one.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<Cow<'static, str>>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Returns the captured value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the source-expression text, possibly empty.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
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
