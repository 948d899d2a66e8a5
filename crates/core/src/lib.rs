#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `stagelog_core` holds the primitives shared by the stagelog workspace:
//! the ordered [`Severity`] model, the [`Value`]/[`ArgumentCapture`] pair
//! used to hold computed log arguments alongside their display metadata,
//! the [`Template`] accumulator and its segment parser, the
//! [`Sink`]/[`Record`] collaborator contract, and the [`text`] helpers
//! sinks use when quoting captured strings.
//!
//! # Design
//!
//! The crate deliberately contains no I/O and no builder logic. The staged
//! message builder and the dispatch API live in the `stagelog` crate; the
//! provided backends live in `stagelog-sink`. Everything here is a plain
//! value type so the enabled/disabled decision made higher up stays the
//! only branch that matters for cost.
//!
//! # Invariants
//!
//! - [`Severity::None`] is a filter threshold only; it sorts above every
//!   writable level and every write path rejects it.
//! - A [`Template`] built through [`Template::push_literal`] and
//!   [`Template::push_placeholder`] has exactly one placeholder per
//!   appended argument, no matter what braces the literals contained.
//! - A [`Record`] without an argument list is verbatim text; a record with
//!   one is a parseable template.
//!
//! # Examples
//!
//! ```
//! use stagelog_core::{segments, Severity, Template, TemplateSegment};
//!
//! assert!(Severity::Error.is_at_least(Severity::Warning));
//!
//! let mut template = Template::new();
//! template.push_literal("user ");
//! template.push_placeholder("id", 0, 0, None);
//! template.push_literal(" not found");
//! assert_eq!(template.as_str(), "user {id} not found");
//!
//! let placeholders = segments(template.as_str())
//!     .filter(|segment| matches!(segment, TemplateSegment::Placeholder { .. }))
//!     .count();
//! assert_eq!(placeholders, template.placeholder_count());
//! ```
//!
//! # See also
//!
//! - `stagelog` for the staged builder and the dispatch extension trait.
//! - `stagelog-sink` for writer, memory, syslog and tracing backends.

mod capture;
mod correlation;
mod error;
mod severity;
mod sink;
mod template;
pub mod text;
mod value;

pub use capture::ArgumentCapture;
pub use correlation::CorrelationId;
pub use error::SeverityNotWritable;
pub use severity::{ParseSeverityError, Severity};
pub use sink::{Record, Sink};
pub use template::{Segments, Template, TemplateSegment, segments};
pub use value::Value;
