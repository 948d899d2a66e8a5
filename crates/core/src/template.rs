//! Message templates.
//!
//! A [`Template`] is literal text interleaved with positional placeholders
//! in message-template syntax: `{name}`, `{name,alignment}`, `{name:format}`
//! or `{name,alignment:format}`. Literal braces are escaped by doubling.
//! Placeholders reference arguments by position; the label is carried so
//! sinks that support named fields can use it, while sinks that do not can
//! ignore it and rely on the index alone.

use std::borrow::Cow;
use std::fmt::{self, Write as _};
use std::iter::FusedIterator;

/// Accumulated template text plus its placeholder count.
///
/// The invariant maintained by the staged builder is that the placeholder
/// count equals the length of the argument list at hand-off time; every
/// [`push_placeholder`](Self::push_placeholder) call adds exactly one
/// placeholder and every [`push_literal`](Self::push_literal) call adds
/// none, regardless of the braces the literal contains.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Template {
    text: String,
    placeholders: usize,
}

impl Template {
    /// Creates an empty template.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty template with pre-reserved text capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            placeholders: 0,
        }
    }

    /// Wraps verbatim text as a template with no placeholders.
    ///
    /// Used by the plain-string dispatch path, where the message is handed
    /// to the sink untouched. The text is *not* escaped: sinks render raw
    /// messages literally because such records carry no argument list.
    #[must_use]
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            placeholders: 0,
        }
    }

    /// Appends literal text, escaping braces so they never read as
    /// placeholders.
    pub fn push_literal(&mut self, text: &str) {
        if !text.contains(['{', '}']) {
            self.text.push_str(text);
            return;
        }
        for ch in text.chars() {
            match ch {
                '{' => self.text.push_str("{{"),
                '}' => self.text.push_str("}}"),
                _ => self.text.push(ch),
            }
        }
    }

    /// Appends a placeholder referencing the argument at `index`.
    ///
    /// The label is used when it is identifier-like; otherwise the
    /// positional index is written instead (reduced-fidelity mode for call
    /// sites that cannot supply a usable expression text). Alignment and
    /// format are rendered into the placeholder when present. Braces inside
    /// the format specifier are dropped so the placeholder always stays
    /// well-formed.
    pub fn push_placeholder(
        &mut self,
        name: &str,
        index: usize,
        alignment: i32,
        format: Option<&str>,
    ) {
        self.text.push('{');
        if is_identifier_like(name) {
            self.text.push_str(name);
        } else {
            let _ = write!(self.text, "{index}");
        }
        if alignment != 0 {
            let _ = write!(self.text, ",{alignment}");
        }
        if let Some(format) = format {
            self.text.push(':');
            self.text
                .extend(format.chars().filter(|ch| !matches!(ch, '{' | '}')));
        }
        self.text.push('}');
        self.placeholders += 1;
    }

    /// Returns the template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the number of placeholders appended so far.
    #[must_use]
    pub const fn placeholder_count(&self) -> usize {
        self.placeholders
    }

    /// Returns the length of the template text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Reports whether the template text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Parses the template text into literal and placeholder segments.
    #[must_use]
    pub fn segments(&self) -> Segments<'_> {
        segments(&self.text)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// One parsed piece of a template.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TemplateSegment<'a> {
    /// A run of literal text with escape sequences resolved.
    Literal(Cow<'a, str>),
    /// A positional placeholder.
    Placeholder {
        /// The label as written in the template (before any `,` or `:`).
        name: &'a str,
        /// Position of the referenced argument.
        index: usize,
    },
}

/// Parses template text into [`TemplateSegment`]s.
///
/// Parsing is lenient: a stray closing brace and an unterminated opening
/// brace are both treated as literal text rather than an error, mirroring
/// the tolerance of common template renderers.
///
/// # Examples
///
/// ```
/// use stagelog_core::{segments, TemplateSegment};
///
/// let parsed: Vec<_> = segments("user {id} not found").collect();
/// assert_eq!(parsed.len(), 3);
/// assert_eq!(
///     parsed[1],
///     TemplateSegment::Placeholder { name: "id", index: 0 },
/// );
/// ```
#[must_use]
pub fn segments(text: &str) -> Segments<'_> {
    Segments {
        rest: text,
        index: 0,
    }
}

/// Iterator over the segments of a template. See [`segments`].
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    rest: &'a str,
    index: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = TemplateSegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        // A placeholder (or an unterminated brace) at the front.
        if let Some(stripped) = self.rest.strip_prefix('{') {
            if !stripped.starts_with('{') {
                let Some(end) = stripped.find('}') else {
                    let rest = self.rest;
                    self.rest = "";
                    return Some(TemplateSegment::Literal(Cow::Borrowed(rest)));
                };
                let inner = &stripped[..end];
                self.rest = &stripped[end + 1..];
                let name_end = inner.find([',', ':']).unwrap_or(inner.len());
                let index = self.index;
                self.index += 1;
                return Some(TemplateSegment::Placeholder {
                    name: &inner[..name_end],
                    index,
                });
            }
        }

        // Literal run up to the next placeholder, collapsing doubled braces.
        // The run stays borrowed unless an escape sequence forces a copy.
        let bytes = self.rest.as_bytes();
        let mut owned: Option<String> = None;
        let mut chunk_start = 0;
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'{' if bytes.get(i + 1) == Some(&b'{') => {
                    let out = owned.get_or_insert_with(String::new);
                    out.push_str(&self.rest[chunk_start..=i]);
                    i += 2;
                    chunk_start = i;
                }
                b'{' => break,
                b'}' if bytes.get(i + 1) == Some(&b'}') => {
                    let out = owned.get_or_insert_with(String::new);
                    out.push_str(&self.rest[chunk_start..=i]);
                    i += 2;
                    chunk_start = i;
                }
                _ => i += 1,
            }
        }

        let literal = match owned {
            Some(mut out) => {
                out.push_str(&self.rest[chunk_start..i]);
                Cow::Owned(out)
            }
            None => Cow::Borrowed(&self.rest[..i]),
        };
        self.rest = &self.rest[i..];
        Some(TemplateSegment::Literal(literal))
    }
}

impl FusedIterator for Segments<'_> {}

fn is_identifier_like(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        }
        _ => false,
    }
}
