use std::borrow::Cow;
use std::fmt;

/// Identifier correlating a log entry with the event that produced it.
///
/// Pairs a numeric id with an optional symbolic name. Every dispatch
/// operation treats the correlation id as optional; entries carry one only
/// when the call site supplies it.
///
/// # Examples
///
/// ```
/// use stagelog_core::CorrelationId;
///
/// let plain = CorrelationId::new(7);
/// assert_eq!(plain.to_string(), "7");
///
/// let named = CorrelationId::named(7, "session-start");
/// assert_eq!(named.to_string(), "session-start");
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CorrelationId {
    id: i32,
    name: Option<Cow<'static, str>>,
}

impl CorrelationId {
    /// Creates a correlation id without a symbolic name.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self { id, name: None }
    }

    /// Creates a correlation id with a symbolic name.
    #[must_use]
    pub fn named(id: i32, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }

    /// Returns the numeric id.
    #[must_use]
    pub const fn id(&self) -> i32 {
        self.id
    }

    /// Returns the symbolic name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => f.write_str(name),
            None => fmt::Display::fmt(&self.id, f),
        }
    }
}

impl From<i32> for CorrelationId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}
