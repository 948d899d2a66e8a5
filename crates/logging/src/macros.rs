//! Macro front-end for staged messages.
//!
//! The macros spell a full append sequence at the call site: string
//! literals become literal appends, `{expr}` parts become argument captures
//! labelled with `stringify!` output, and the whole sequence is skipped,
//! operand evaluation included, when the builder comes out disabled. The
//! literal-length and argument-count estimates handed to the builder are
//! computed at expansion time.

/// Builds and dispatches one staged message.
///
/// Message parts follow the sink and severity without separators: a string
/// literal is appended verbatim, `{expr}` captures a value, `{expr; align}`
/// adds a field alignment, and `{expr; align; "fmt"}` adds a format
/// specifier as well. Optional `id:` and `error:` arguments ahead of the
/// message attach a correlation id and an associated error.
///
/// Evaluates to the dispatch result; the per-severity wrappers discard it
/// because their fixed severities cannot be rejected.
///
/// # Examples
///
/// ```
/// use stagelog::{log_message, Severity};
/// use stagelog_sink::MemorySink;
///
/// let sink = MemorySink::new();
/// let user_id = 42;
/// log_message!(sink, Severity::Warning, "user " {user_id} " not found")?;
///
/// let entries = sink.entries();
/// assert_eq!(entries[0].template(), "user {user_id} not found");
/// # Ok::<(), stagelog::SeverityNotWritable>(())
/// ```
#[macro_export]
macro_rules! log_message {
    // ---- internal: append munchers ------------------------------------
    (@append $message:ident) => {};
    (@append $message:ident $literal:literal $($rest:tt)*) => {
        $message.append_literal($literal);
        $crate::log_message!(@append $message $($rest)*);
    };
    (@append $message:ident { $value:expr ; $alignment:expr ; $format:literal } $($rest:tt)*) => {
        $message.append_argument(
            $value,
            $alignment,
            ::core::option::Option::Some($format),
            ::core::stringify!($value),
        );
        $crate::log_message!(@append $message $($rest)*);
    };
    (@append $message:ident { $value:expr ; $alignment:expr } $($rest:tt)*) => {
        $message.append_argument(
            $value,
            $alignment,
            ::core::option::Option::None,
            ::core::stringify!($value),
        );
        $crate::log_message!(@append $message $($rest)*);
    };
    (@append $message:ident { $value:expr } $($rest:tt)*) => {
        $message.append_value($value, ::core::stringify!($value));
        $crate::log_message!(@append $message $($rest)*);
    };

    // ---- internal: expansion-time estimates ---------------------------
    (@literal_length) => { 0_usize };
    (@literal_length $literal:literal $($rest:tt)*) => {
        $literal.len() + $crate::log_message!(@literal_length $($rest)*)
    };
    (@literal_length { $($part:tt)* } $($rest:tt)*) => {
        $crate::log_message!(@literal_length $($rest)*)
    };
    (@argument_count) => { 0_usize };
    (@argument_count $literal:literal $($rest:tt)*) => {
        $crate::log_message!(@argument_count $($rest)*)
    };
    (@argument_count { $($part:tt)* } $($rest:tt)*) => {
        1 + $crate::log_message!(@argument_count $($rest)*)
    };

    // ---- public arms ---------------------------------------------------
    ($sink:expr, $severity:expr, id: $id:expr, error: $error:expr, $($message:tt)+) => {{
        let sink = &$sink;
        let severity = $severity;
        let mut message = $crate::StagedMessage::with_estimates(
            sink,
            severity,
            $crate::log_message!(@literal_length $($message)+),
            $crate::log_message!(@argument_count $($message)+),
        );
        if message.is_enabled() {
            $crate::log_message!(@append message $($message)+);
        }
        $crate::SinkExt::log_staged_with_id_and_error(sink, message, $id, $error)
    }};
    ($sink:expr, $severity:expr, id: $id:expr, $($message:tt)+) => {{
        let sink = &$sink;
        let severity = $severity;
        let mut message = $crate::StagedMessage::with_estimates(
            sink,
            severity,
            $crate::log_message!(@literal_length $($message)+),
            $crate::log_message!(@argument_count $($message)+),
        );
        if message.is_enabled() {
            $crate::log_message!(@append message $($message)+);
        }
        $crate::SinkExt::log_staged_with_id(sink, message, $id)
    }};
    ($sink:expr, $severity:expr, error: $error:expr, $($message:tt)+) => {{
        let sink = &$sink;
        let severity = $severity;
        let mut message = $crate::StagedMessage::with_estimates(
            sink,
            severity,
            $crate::log_message!(@literal_length $($message)+),
            $crate::log_message!(@argument_count $($message)+),
        );
        if message.is_enabled() {
            $crate::log_message!(@append message $($message)+);
        }
        $crate::SinkExt::log_staged_with_error(sink, message, $error)
    }};
    ($sink:expr, $severity:expr, $($message:tt)+) => {{
        let sink = &$sink;
        let severity = $severity;
        let mut message = $crate::StagedMessage::with_estimates(
            sink,
            severity,
            $crate::log_message!(@literal_length $($message)+),
            $crate::log_message!(@argument_count $($message)+),
        );
        if message.is_enabled() {
            $crate::log_message!(@append message $($message)+);
        }
        $crate::SinkExt::log_staged(sink, message)
    }};
}

/// Builds and dispatches one staged trace message.
///
/// Same message grammar as [`log_message!`]; the severity is fixed, so the
/// dispatch result carries no information and is discarded.
#[macro_export]
macro_rules! log_trace {
    ($sink:expr, $($rest:tt)+) => {{
        // Trace is always writable, so dispatch cannot fail.
        let _ = $crate::log_message!($sink, $crate::Severity::Trace, $($rest)+);
    }};
}

/// Builds and dispatches one staged debug message.
///
/// Same message grammar as [`log_message!`].
///
/// # Examples
///
/// ```
/// use stagelog::log_debug;
/// use stagelog_sink::MemorySink;
///
/// let sink = MemorySink::new();
/// let elapsed_ms = 12;
/// log_debug!(sink, "handshake took " {elapsed_ms} "ms");
/// assert_eq!(sink.entries()[0].template(), "handshake took {elapsed_ms}ms");
/// ```
#[macro_export]
macro_rules! log_debug {
    ($sink:expr, $($rest:tt)+) => {{
        let _ = $crate::log_message!($sink, $crate::Severity::Debug, $($rest)+);
    }};
}

/// Builds and dispatches one staged info message.
///
/// Same message grammar as [`log_message!`].
#[macro_export]
macro_rules! log_info {
    ($sink:expr, $($rest:tt)+) => {{
        let _ = $crate::log_message!($sink, $crate::Severity::Info, $($rest)+);
    }};
}

/// Builds and dispatches one staged warning message.
///
/// Same message grammar as [`log_message!`].
#[macro_export]
macro_rules! log_warning {
    ($sink:expr, $($rest:tt)+) => {{
        let _ = $crate::log_message!($sink, $crate::Severity::Warning, $($rest)+);
    }};
}

/// Builds and dispatches one staged error message.
///
/// Same message grammar as [`log_message!`].
#[macro_export]
macro_rules! log_error {
    ($sink:expr, $($rest:tt)+) => {{
        let _ = $crate::log_message!($sink, $crate::Severity::Error, $($rest)+);
    }};
}

/// Builds and dispatches one staged critical message.
///
/// Same message grammar as [`log_message!`].
#[macro_export]
macro_rules! log_critical {
    ($sink:expr, $($rest:tt)+) => {{
        let _ = $crate::log_message!($sink, $crate::Severity::Critical, $($rest)+);
    }};
}
