use std::fmt;
use std::str::FromStr;

/// Severity of a log entry, ordered from most verbose to most grave.
///
/// [`Severity::None`] is a filter threshold only. It sorts above
/// [`Severity::Critical`] so that a sink configured with a `None` threshold
/// accepts nothing, and every write operation rejects it before doing any
/// other work.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// Fine-grained diagnostics, usually interesting only while debugging
    /// the component that emits them.
    Trace,
    /// Diagnostics useful during development.
    Debug,
    /// Normal operational messages.
    Info,
    /// Something unexpected that does not stop the current operation.
    Warning,
    /// A failure of the current operation.
    Error,
    /// A failure that leaves the application unable to continue.
    Critical,
    /// Sentinel used to suppress output; never valid for writing.
    None,
}

impl Severity {
    /// Returns the lowercase label used when rendering the severity.
    ///
    /// # Examples
    ///
    /// ```
    /// use stagelog_core::Severity;
    ///
    /// assert_eq!(Severity::Warning.as_str(), "warning");
    /// assert_eq!(Severity::None.as_str(), "none");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
            Self::None => "none",
        }
    }

    /// Returns the canonical prefix rendered at the start of an entry.
    ///
    /// Centralising the prefix keeps the provided sinks from assembling the
    /// label and separator themselves, so all backends agree on the exact
    /// spelling.
    ///
    /// # Examples
    ///
    /// ```
    /// use stagelog_core::Severity;
    ///
    /// assert_eq!(Severity::Error.prefix(), "error: ");
    /// ```
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Trace => "trace: ",
            Self::Debug => "debug: ",
            Self::Info => "info: ",
            Self::Warning => "warning: ",
            Self::Error => "error: ",
            Self::Critical => "critical: ",
            Self::None => "none: ",
        }
    }

    /// Reports whether this severity is at or above the given threshold.
    ///
    /// # Examples
    ///
    /// ```
    /// use stagelog_core::Severity;
    ///
    /// assert!(Severity::Error.is_at_least(Severity::Warning));
    /// assert!(!Severity::Debug.is_at_least(Severity::Info));
    /// // `None` sorts above everything, so it suppresses all levels.
    /// assert!(!Severity::Critical.is_at_least(Severity::None));
    /// ```
    #[must_use]
    pub const fn is_at_least(self, threshold: Self) -> bool {
        self as u8 >= threshold as u8
    }

    /// Reports whether entries may be written at this severity.
    ///
    /// Only the [`Severity::None`] sentinel is unwritable.
    ///
    /// # Examples
    ///
    /// ```
    /// use stagelog_core::Severity;
    ///
    /// assert!(Severity::Trace.is_writable());
    /// assert!(!Severity::None.is_writable());
    /// ```
    #[must_use]
    pub const fn is_writable(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`Severity`] from a string fails.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSeverityError {
    _private: (),
}

impl fmt::Display for ParseSeverityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unrecognised log severity")
    }
}

impl std::error::Error for ParseSeverityError {}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "critical" => Ok(Self::Critical),
            "none" => Ok(Self::None),
            _ => Err(ParseSeverityError { _private: () }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WRITABLE: [Severity; 6] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    #[test]
    fn ordering_is_strictly_increasing() {
        let all = [
            Severity::Trace,
            Severity::Debug,
            Severity::Info,
            Severity::Warning,
            Severity::Error,
            Severity::Critical,
            Severity::None,
        ];
        for window in all.windows(2) {
            assert!(window[0] < window[1], "{:?} should sort below {:?}", window[0], window[1]);
        }
    }

    #[test]
    fn is_at_least_follows_ordering() {
        assert!(Severity::Warning.is_at_least(Severity::Warning));
        assert!(Severity::Critical.is_at_least(Severity::Trace));
        assert!(!Severity::Trace.is_at_least(Severity::Debug));
    }

    #[test]
    fn none_threshold_suppresses_every_writable_level() {
        for severity in WRITABLE {
            assert!(!severity.is_at_least(Severity::None));
        }
    }

    #[test]
    fn only_none_is_unwritable() {
        for severity in WRITABLE {
            assert!(severity.is_writable());
        }
        assert!(!Severity::None.is_writable());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(Severity::Info.to_string(), "info");
        assert_eq!(Severity::Critical.to_string(), "critical");
    }

    #[test]
    fn parses_every_label_round_trip() {
        for severity in WRITABLE {
            assert_eq!(severity.as_str().parse::<Severity>(), Ok(severity));
        }
        assert_eq!("none".parse::<Severity>(), Ok(Severity::None));
    }

    #[test]
    fn rejects_unknown_labels() {
        assert!("warn".parse::<Severity>().is_err());
        assert!("".parse::<Severity>().is_err());
        assert!("Information".parse::<Severity>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        let decoded: Severity = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, Severity::Warning);
    }
}
