#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `stagelog` is a log-message construction front-end: call sites write an
//! entry out of literal fragments and computed values, and no formatting
//! work or allocation happens when the target severity is not active for
//! the sink. The enablement question is asked exactly once per message,
//! when its [`StagedMessage`] is created; afterwards every append is either
//! a real accumulation or a cheap check-and-return no-op.
//!
//! # Design
//!
//! A log call stages its message in three steps: create a builder against a
//! [`Sink`] (one enablement query), run the append sequence (gated per
//! append, so literals and values can interleave freely), and hand the
//! builder to one of the [`SinkExt`] dispatch operations, which finalizes
//! it and invokes the sink at most once. Plain strings skip the builder:
//! the dispatch operation checks enablement itself and passes the message
//! through verbatim. The [`log_message!`] macro and its per-severity
//! wrappers spell the whole sequence from one expression and skip operand
//! evaluation entirely for suppressed entries.
//!
//! # Invariants
//!
//! - Enablement is decided once per message and never re-evaluated
//!   mid-build.
//! - A disabled builder accumulates nothing, no matter how many appends
//!   run against it.
//! - At hand-off the template's placeholder count equals the argument list
//!   length.
//! - Finalizing twice yields an empty template and no arguments the second
//!   time.
//! - Every dispatch operation rejects [`Severity::None`] and invokes the
//!   sink at most once.
//!
//! # Errors
//!
//! The only error surfaced by this crate is [`SeverityNotWritable`],
//! returned when a dispatch operation is handed the `None` filter
//! sentinel. Failures inside a sink's own write path stay the sink's
//! responsibility.
//!
//! # Examples
//!
//! ```
//! use stagelog::{log_warning, Severity, SinkExt};
//! use stagelog_sink::MemorySink;
//!
//! let sink = MemorySink::with_threshold(Severity::Warning);
//!
//! // Suppressed: below the threshold, so nothing is formatted or stored.
//! let expensive = || -> u32 { unreachable!("not evaluated while debug is disabled") };
//! stagelog::log_debug!(sink, "state " {expensive()});
//!
//! let user_id = 42;
//! log_warning!(sink, "user " {user_id} " not found");
//!
//! let entries = sink.entries();
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].template(), "user {user_id} not found");
//! # let _ = sink.log(Severity::Warning, "plain is fine too");
//! ```
//!
//! # See also
//!
//! - `stagelog_core` for the severity, value, template and sink types,
//!   re-exported here.
//! - `stagelog-sink` for ready-made writer, memory, syslog and tracing
//!   backends.

mod dispatch;
mod macros;
mod staged;

pub use dispatch::SinkExt;
pub use staged::StagedMessage;

pub use stagelog_core::{
    ArgumentCapture, CorrelationId, ParseSeverityError, Record, Segments, Severity,
    SeverityNotWritable, Sink, Template, TemplateSegment, Value, segments, text,
};
