use thiserror::Error;

use crate::severity::Severity;

/// Error returned when a write is attempted at a non-writable severity.
///
/// The only non-writable severity is the [`Severity::None`] filter sentinel;
/// dispatch operations reject it before touching the sink, so a record is
/// never written at it. The guard against an absent sink that the error
/// taxonomy also lists is subsumed by the type system here: sink references
/// cannot be null in Rust.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("severity `{0}` is a filter threshold and cannot be written")]
pub struct SeverityNotWritable(pub Severity);
