//! Syslog backend for daemonised processes.
//!
//! Uses libc `openlog`/`syslog`/`closelog` directly rather than pulling in
//! a dedicated syslog crate, keeping the dependency graph minimal. The
//! connection is opened once through [`SyslogConfig::open`], which returns
//! an RAII guard; while the guard is alive, a [`SyslogSink`] routes entries
//! to syslog(3) with the severity mapped onto the matching priority.

use std::ffi::CString;
use std::fmt;
use std::sync::OnceLock;

use stagelog_core::{Record, Severity, Sink};

use crate::render::{self, RenderOptions};

/// Syslog facility codes matching the POSIX syslog(3) constants.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum SyslogFacility {
    /// User-level messages (`LOG_USER`), the default for foreground tools.
    User = libc::LOG_USER,
    /// System daemons (`LOG_DAEMON`).
    Daemon = libc::LOG_DAEMON,
    /// Security/authorization messages (`LOG_AUTH`).
    Auth = libc::LOG_AUTH,
    /// Reserved for local use (`LOG_LOCAL0`).
    Local0 = libc::LOG_LOCAL0,
    /// Reserved for local use (`LOG_LOCAL1`).
    Local1 = libc::LOG_LOCAL1,
    /// Reserved for local use (`LOG_LOCAL2`).
    Local2 = libc::LOG_LOCAL2,
    /// Reserved for local use (`LOG_LOCAL3`).
    Local3 = libc::LOG_LOCAL3,
    /// Reserved for local use (`LOG_LOCAL4`).
    Local4 = libc::LOG_LOCAL4,
    /// Reserved for local use (`LOG_LOCAL5`).
    Local5 = libc::LOG_LOCAL5,
    /// Reserved for local use (`LOG_LOCAL6`).
    Local6 = libc::LOG_LOCAL6,
    /// Reserved for local use (`LOG_LOCAL7`).
    Local7 = libc::LOG_LOCAL7,
}

const FACILITY_NAMES: &[(&str, SyslogFacility)] = &[
    ("user", SyslogFacility::User),
    ("daemon", SyslogFacility::Daemon),
    ("auth", SyslogFacility::Auth),
    ("local0", SyslogFacility::Local0),
    ("local1", SyslogFacility::Local1),
    ("local2", SyslogFacility::Local2),
    ("local3", SyslogFacility::Local3),
    ("local4", SyslogFacility::Local4),
    ("local5", SyslogFacility::Local5),
    ("local6", SyslogFacility::Local6),
    ("local7", SyslogFacility::Local7),
];

impl SyslogFacility {
    /// Parses a facility name. Names are case-insensitive; unrecognised
    /// names yield `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[cfg(unix)]
    /// # {
    /// use stagelog_sink::syslog::SyslogFacility;
    ///
    /// assert_eq!(SyslogFacility::from_name("DAEMON"), Some(SyslogFacility::Daemon));
    /// assert_eq!(SyslogFacility::from_name("kernel"), None);
    /// # }
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lowered = name.to_ascii_lowercase();
        FACILITY_NAMES
            .iter()
            .find(|(candidate, _)| *candidate == lowered)
            .map(|(_, facility)| *facility)
    }

    /// Returns the facility name as accepted by [`from_name`](Self::from_name).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        FACILITY_NAMES
            .iter()
            .find(|(_, facility)| *facility == self)
            .map_or("user", |(name, _)| name)
    }
}

impl Default for SyslogFacility {
    fn default() -> Self {
        Self::User
    }
}

impl fmt::Display for SyslogFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default syslog tag (ident) for processes that do not configure one.
pub const DEFAULT_SYSLOG_TAG: &str = "stagelog";

/// Facility and tag parameters for the process's syslog connection.
///
/// Constructing a config does not open the connection; call
/// [`open`](Self::open) to begin routing messages.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyslogConfig {
    facility: SyslogFacility,
    tag: String,
}

impl SyslogConfig {
    /// Creates a configuration with the given facility and tag.
    #[must_use]
    pub fn new(facility: SyslogFacility, tag: impl Into<String>) -> Self {
        Self {
            facility,
            tag: tag.into(),
        }
    }

    /// Returns the configured facility.
    #[must_use]
    pub const fn facility(&self) -> SyslogFacility {
        self.facility
    }

    /// Returns the configured tag (ident string).
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Opens the process's syslog connection.
    ///
    /// Returns a guard that closes the connection when dropped. Only one
    /// connection should be active per process, and it should be opened
    /// before worker threads start: `openlog` is not safe against a
    /// concurrent `openlog`/`closelog`.
    pub fn open(&self) -> SyslogGuard {
        // syslog(3) stores the ident pointer internally, so it must stay
        // valid for the process lifetime. A static OnceLock provides that;
        // the first opened tag wins.
        static IDENT: OnceLock<CString> = OnceLock::new();
        let ident = IDENT.get_or_init(|| {
            CString::new(self.tag.as_str()).unwrap_or_else(|_| {
                CString::new(DEFAULT_SYSLOG_TAG).expect("default tag contains no NUL bytes")
            })
        });

        // SAFETY: the ident pointer is valid for the process lifetime
        // because it is stored in a static `OnceLock<CString>`, and callers
        // open the connection before spawning workers per the documented
        // contract.
        unsafe {
            libc::openlog(ident.as_ptr(), libc::LOG_PID, self.facility as libc::c_int);
        }

        SyslogGuard { _private: () }
    }
}

impl Default for SyslogConfig {
    fn default() -> Self {
        Self::new(SyslogFacility::default(), DEFAULT_SYSLOG_TAG)
    }
}

/// RAII guard that closes the syslog connection when dropped.
#[derive(Debug)]
pub struct SyslogGuard {
    _private: (),
}

impl Drop for SyslogGuard {
    fn drop(&mut self) {
        // SAFETY: closelog has no preconditions beyond openlog having been
        // called, which is guaranteed by the guard's construction.
        unsafe {
            libc::closelog();
        }
    }
}

/// Sink that forwards rendered entries to syslog(3).
///
/// The severity maps onto the syslog priority: trace and debug entries go
/// out at `LOG_DEBUG`, info at `LOG_INFO`, warning at `LOG_WARNING`, error
/// at `LOG_ERR` and critical at `LOG_CRIT`. The severity label prefix is
/// omitted from the rendered text since the priority already carries it.
///
/// The caller is responsible for keeping a [`SyslogGuard`] alive while the
/// sink is in use.
#[derive(Clone, Debug)]
pub struct SyslogSink {
    threshold: Severity,
    options: RenderOptions,
}

impl Default for SyslogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl SyslogSink {
    /// Creates a sink that accepts every writable severity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_threshold(Severity::Trace)
    }

    /// Creates a sink that only accepts entries at or above `threshold`.
    #[must_use]
    pub fn with_threshold(threshold: Severity) -> Self {
        Self {
            threshold,
            options: RenderOptions::new(),
        }
    }

    /// Replaces the render options.
    #[must_use]
    pub const fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the syslog priority an entry at `severity` is sent with.
    #[must_use]
    pub const fn priority(severity: Severity) -> libc::c_int {
        match severity {
            Severity::Trace | Severity::Debug => libc::LOG_DEBUG,
            Severity::Info => libc::LOG_INFO,
            Severity::Warning => libc::LOG_WARNING,
            Severity::Error | Severity::None => libc::LOG_ERR,
            Severity::Critical => libc::LOG_CRIT,
        }
    }
}

impl Sink for SyslogSink {
    fn is_enabled(&self, severity: Severity) -> bool {
        severity.is_writable() && severity.is_at_least(self.threshold)
    }

    fn write(&self, record: &Record<'_>) {
        let mut message = String::new();
        render::render_message(&mut message, record, &self.options);
        render::render_suffix(&mut message, record);

        // Entries with interior NUL bytes cannot cross the C boundary.
        let Ok(c_message) = CString::new(message) else {
            return;
        };
        // A fixed "%s" format string avoids format-string injection via
        // user-controlled message text.
        const FORMAT: &[u8] = b"%s\0";

        // SAFETY: syslog is safe to call from multiple threads once openlog
        // has completed; the format string and message are valid C strings.
        unsafe {
            libc::syslog(
                Self::priority(record.severity()),
                FORMAT.as_ptr().cast::<libc::c_char>(),
                c_message.as_ptr(),
            );
        }
    }
}
