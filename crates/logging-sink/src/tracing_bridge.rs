//! Bridge sink into the `tracing` ecosystem.
//!
//! [`TracingSink`] lets code written against the staged front-end feed an
//! application that already routes diagnostics through `tracing`
//! subscribers. Enablement consults the subscribers' current max-level
//! filter, so suppressed levels keep their zero-cost path; accepted entries
//! are rendered flat and emitted as events under the `stagelog` target.

use tracing::Level;
use tracing::level_filters::LevelFilter;

use stagelog_core::{Record, Severity, Sink};

use crate::render::{self, RenderOptions};

/// Sink that forwards entries as `tracing` events.
///
/// # Examples
///
/// ```
/// use stagelog_sink::TracingSink;
/// use stagelog::{Severity, SinkExt};
///
/// let sink = TracingSink::new();
/// // With no subscriber installed every level reports disabled, so this
/// // suppresses the entry instead of formatting it.
/// sink.log(Severity::Info, "forwarded when a subscriber listens")?;
/// # Ok::<(), stagelog::SeverityNotWritable>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct TracingSink {
    options: RenderOptions,
}

impl TracingSink {
    /// Target attached to every forwarded event.
    pub const TARGET: &'static str = "stagelog";

    /// Creates a bridge sink with default render options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bridge sink with the given render options.
    #[must_use]
    pub const fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Returns the `tracing` level an entry at `severity` is emitted at.
    ///
    /// `Critical` has no `tracing` counterpart and shares `ERROR`, as does
    /// the unwritable sentinel, which enablement rejects before the mapping
    /// matters.
    #[must_use]
    pub const fn tracing_level(severity: Severity) -> Level {
        match severity {
            Severity::Trace => Level::TRACE,
            Severity::Debug => Level::DEBUG,
            Severity::Info => Level::INFO,
            Severity::Warning => Level::WARN,
            Severity::Error | Severity::Critical | Severity::None => Level::ERROR,
        }
    }
}

impl Sink for TracingSink {
    fn is_enabled(&self, severity: Severity) -> bool {
        severity.is_writable() && LevelFilter::current() >= Self::tracing_level(severity)
    }

    fn write(&self, record: &Record<'_>) {
        let mut message = String::new();
        render::render_message(&mut message, record, &self.options);
        render::render_suffix(&mut message, record);

        // The target must be nameable from a static initializer, so the
        // macro calls spell it out instead of going through `Self::TARGET`.
        match Self::tracing_level(record.severity()) {
            Level::TRACE => tracing::event!(target: "stagelog", Level::TRACE, "{}", message),
            Level::DEBUG => tracing::event!(target: "stagelog", Level::DEBUG, "{}", message),
            Level::INFO => tracing::event!(target: "stagelog", Level::INFO, "{}", message),
            Level::WARN => tracing::event!(target: "stagelog", Level::WARN, "{}", message),
            Level::ERROR => tracing::event!(target: "stagelog", Level::ERROR, "{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities_map_onto_tracing_levels() {
        assert_eq!(TracingSink::tracing_level(Severity::Trace), Level::TRACE);
        assert_eq!(TracingSink::tracing_level(Severity::Debug), Level::DEBUG);
        assert_eq!(TracingSink::tracing_level(Severity::Info), Level::INFO);
        assert_eq!(TracingSink::tracing_level(Severity::Warning), Level::WARN);
        assert_eq!(TracingSink::tracing_level(Severity::Error), Level::ERROR);
        assert_eq!(TracingSink::tracing_level(Severity::Critical), Level::ERROR);
    }

    #[test]
    fn the_sentinel_is_never_enabled() {
        let sink = TracingSink::new();
        assert!(!sink.is_enabled(Severity::None));
    }
}
