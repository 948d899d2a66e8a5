//! Record rendering shared by the provided sinks.
//!
//! Rendering is deliberately a sink concern: the dispatch layer hands over
//! a template and captured arguments, and each backend decides how they
//! become text. The helpers here implement the common flat-text rendering:
//! placeholders are replaced positionally, alignment pads the rendered
//! value (positive right-justifies, negative left-justifies), and textual
//! values can optionally be quoted and clipped through the
//! [`text`](stagelog_core::text) utilities. Format specifiers are carried
//! as metadata for structured backends and are not interpreted here.

use std::fmt::Write as _;

use stagelog_core::text::{self, Ellipsis};
use stagelog_core::{ArgumentCapture, Record, TemplateSegment, Value};

/// Policy for rendering captured values into flat text.
///
/// By default values are interpolated as-is. Enabling
/// [`quote_text`](Self::quote_text) renders string and character values as
/// quoted, escaped literals, which keeps log lines parseable when the
/// captured text came from the outside world;
/// [`clip_text`](Self::clip_text) additionally bounds their length.
///
/// # Examples
///
/// ```
/// use stagelog_sink::RenderOptions;
///
/// let options = RenderOptions::new().clip_text(16, 8);
/// assert!(options.quotes_text());
/// assert_eq!(options.clip(), Some((16, 8)));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RenderOptions {
    quote_text: bool,
    clip: Option<(usize, usize)>,
    ellipsis: Ellipsis,
}

impl RenderOptions {
    /// Creates the default policy: plain interpolation, no quoting.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders string and character values as quoted, escaped literals.
    #[must_use]
    pub const fn quote_text(mut self, quote: bool) -> Self {
        self.quote_text = quote;
        self
    }

    /// Clips quoted text to `head` leading and `tail` trailing characters.
    ///
    /// Implies [`quote_text`](Self::quote_text), since clipping is only
    /// meaningful on the quoted rendering.
    #[must_use]
    pub const fn clip_text(mut self, head: usize, tail: usize) -> Self {
        self.quote_text = true;
        self.clip = Some((head, tail));
        self
    }

    /// Selects the ellipsis style used when clipping.
    #[must_use]
    pub const fn ellipsis(mut self, ellipsis: Ellipsis) -> Self {
        self.ellipsis = ellipsis;
        self
    }

    /// Reports whether textual values are quoted.
    #[must_use]
    pub const fn quotes_text(&self) -> bool {
        self.quote_text
    }

    /// Returns the clip bounds, if clipping is enabled.
    #[must_use]
    pub const fn clip(&self) -> Option<(usize, usize)> {
        self.clip
    }
}

/// Renders the message body of a record.
///
/// A record without an argument list is verbatim text and is appended
/// untouched; a record with one has its placeholders replaced positionally.
/// A placeholder without a matching argument is written back literally,
/// which keeps malformed input visible instead of silently vanishing.
pub fn render_message(out: &mut String, record: &Record<'_>, options: &RenderOptions) {
    let Some(arguments) = record.arguments() else {
        out.push_str(record.template());
        return;
    };
    for segment in record.segments() {
        match segment {
            TemplateSegment::Literal(literal) => out.push_str(&literal),
            TemplateSegment::Placeholder { name, index } => match arguments.get(index) {
                Some(capture) => render_argument(out, capture, options),
                None => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            },
        }
    }
}

/// Renders the correlation-id and error suffixes of a record.
pub fn render_suffix(out: &mut String, record: &Record<'_>) {
    if let Some(correlation) = record.correlation() {
        match correlation.name() {
            Some(name) => {
                let _ = write!(out, " [event {}: {name}]", correlation.id());
            }
            None => {
                let _ = write!(out, " [event {}]", correlation.id());
            }
        }
    }
    if let Some(error) = record.error() {
        let _ = write!(out, ": {error}");
        let mut source = error.source();
        while let Some(cause) = source {
            let _ = write!(out, ": {cause}");
            source = cause.source();
        }
    }
}

/// Renders a full log line: severity prefix, message body, suffixes.
pub fn render_record(out: &mut String, record: &Record<'_>, options: &RenderOptions) {
    out.push_str(record.severity().prefix());
    render_message(out, record, options);
    render_suffix(out, record);
}

fn render_argument(out: &mut String, capture: &ArgumentCapture, options: &RenderOptions) {
    let alignment = capture.alignment();
    if alignment == 0 && !needs_quoting(capture.value(), options) {
        let _ = write!(out, "{}", capture.value());
        return;
    }

    let rendered = argument_text(capture.value(), options);
    let width = alignment.unsigned_abs() as usize;
    if alignment > 0 {
        let _ = write!(out, "{rendered:>width$}");
    } else if alignment < 0 {
        let _ = write!(out, "{rendered:<width$}");
    } else {
        out.push_str(&rendered);
    }
}

fn needs_quoting(value: &Value, options: &RenderOptions) -> bool {
    options.quote_text && matches!(value, Value::Str(_) | Value::Char(_))
}

fn argument_text(value: &Value, options: &RenderOptions) -> String {
    if needs_quoting(value, options) {
        let raw = value.to_string();
        let mut quoted = String::with_capacity(raw.len() + 2);
        match options.clip {
            Some((head, tail)) => {
                text::push_clipped_quoted(&mut quoted, &raw, head, tail, options.ellipsis);
            }
            None => text::push_quoted(&mut quoted, &raw),
        }
        quoted
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagelog_core::{CorrelationId, Severity};

    fn message(record: &Record<'_>, options: &RenderOptions) -> String {
        let mut out = String::new();
        render_message(&mut out, record, options);
        out
    }

    #[test]
    fn plain_records_render_verbatim() {
        let record = Record::new(Severity::Info, "100% {literal}");
        assert_eq!(message(&record, &RenderOptions::new()), "100% {literal}");
    }

    #[test]
    fn placeholders_are_replaced_positionally() {
        let arguments = [
            ArgumentCapture::new(42, "id"),
            ArgumentCapture::new("alice", "user"),
        ];
        let record = Record::new(Severity::Info, "{id} is {user}").with_arguments(&arguments);
        assert_eq!(message(&record, &RenderOptions::new()), "42 is alice");
    }

    #[test]
    fn alignment_pads_in_the_requested_direction() {
        let arguments = [
            ArgumentCapture::new(7, "right").with_alignment(4),
            ArgumentCapture::new(7, "left").with_alignment(-4),
        ];
        let record =
            Record::new(Severity::Info, "[{right,4}][{left,-4}]").with_arguments(&arguments);
        assert_eq!(message(&record, &RenderOptions::new()), "[   7][7   ]");
    }

    #[test]
    fn quoting_applies_to_text_values_only() {
        let arguments = [
            ArgumentCapture::new("a \"b\"", "text"),
            ArgumentCapture::new(3, "number"),
        ];
        let record = Record::new(Severity::Info, "{text} {number}").with_arguments(&arguments);
        let options = RenderOptions::new().quote_text(true);
        assert_eq!(message(&record, &options), "\"a \\\"b\\\"\" 3");
    }

    #[test]
    fn clipping_bounds_quoted_text() {
        let arguments = [ArgumentCapture::new("abcdefghijklmnop", "text")];
        let record = Record::new(Severity::Info, "{text}").with_arguments(&arguments);
        let options = RenderOptions::new().clip_text(3, 2);
        assert_eq!(message(&record, &options), "\"abc...op\"");
    }

    #[test]
    fn dangling_placeholders_stay_visible() {
        let arguments: [ArgumentCapture; 0] = [];
        let record = Record::new(Severity::Info, "{orphan}").with_arguments(&arguments);
        assert_eq!(message(&record, &RenderOptions::new()), "{orphan}");
    }

    #[test]
    fn suffixes_append_correlation_then_error() {
        let correlation = CorrelationId::named(7, "handshake");
        let error = std::io::Error::other("connection reset");
        let record = Record::new(Severity::Error, "sync failed")
            .with_correlation(&correlation)
            .with_error(&error);

        let mut out = String::new();
        render_record(&mut out, &record, &RenderOptions::new());
        assert_eq!(
            out,
            "error: sync failed [event 7: handshake]: connection reset"
        );
    }
}
