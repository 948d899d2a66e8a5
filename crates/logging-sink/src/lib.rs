#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `stagelog_sink` provides ready-made backends for the stagelog logging
//! front-end: [`WriterSink`] streams rendered entries into any
//! [`io::Write`](std::io::Write) target, [`MemorySink`] records them for
//! tests and embedders, [`syslog::SyslogSink`] routes them to syslog(3) on
//! Unix, and `TracingSink` (behind the `tracing` feature) forwards them
//! into the `tracing` ecosystem.
//!
//! # Design
//!
//! Rendering templates to final text is deliberately a sink concern, so
//! the shared flat-text renderer lives here rather than in the core:
//! [`RenderOptions`] controls how captured values are interpolated,
//! including the quoted-and-clipped mode for untrusted text, and
//! [`LineMode`] controls line termination. Every provided sink filters by a
//! severity threshold in [`is_enabled`](stagelog_core::Sink::is_enabled),
//! which is what makes the front-end's disabled path free: a suppressed
//! entry is never rendered here because it is never built there.
//!
//! # Errors
//!
//! Sinks own their failure handling. [`WriterSink`] retains the most
//! recent I/O error for the caller to poll via
//! [`take_last_error`](WriterSink::take_last_error); the other backends
//! have no fallible surface worth reporting.
//!
//! # Examples
//!
//! ```
//! use stagelog::{log_error, Severity};
//! use stagelog_sink::{RenderOptions, WriterSink};
//!
//! let sink = WriterSink::with_parts(
//!     Vec::new(),
//!     Severity::Info,
//!     stagelog_sink::LineMode::WithNewline,
//!     RenderOptions::new().quote_text(true),
//! );
//!
//! let path = "/tmp/missing file";
//! log_error!(sink, "cannot open " {path});
//!
//! let output = String::from_utf8(sink.into_inner()).unwrap();
//! assert_eq!(output, "error: cannot open \"/tmp/missing file\"\n");
//! ```
//!
//! # See also
//!
//! - `stagelog` for the staged builder, dispatch operations and macros.
//! - `stagelog_core` for the [`Sink`](stagelog_core::Sink) contract these
//!   backends implement.

mod line_mode;
mod memory;
mod render;
#[cfg(unix)]
#[allow(unsafe_code)]
pub mod syslog;
#[cfg(feature = "tracing")]
mod tracing_bridge;
mod writer;

pub use line_mode::LineMode;
pub use memory::{LogEntry, MemorySink, RenderedArgument};
pub use render::{RenderOptions, render_message, render_record, render_suffix};
#[cfg(feature = "tracing")]
pub use tracing_bridge::TracingSink;
pub use writer::WriterSink;
