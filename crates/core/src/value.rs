//! Captured argument values.
//!
//! A [`Value`] stores a log argument without committing to a rendering.
//! Primitive types are stored inline so capturing them costs no allocation;
//! arbitrary displayable types fall back to a boxed trait object via
//! [`Value::display`]. Conversion into a `Value` is expected to happen only
//! on the enabled logging path, so a suppressed entry never constructs one.

use std::borrow::Cow;
use std::fmt;

/// A captured argument value.
///
/// A missing value is represented explicitly as [`Value::Null`] rather than
/// by omission, so it still occupies a template slot. This falls out of the
/// [`From<Option<T>>`] conversion.
pub enum Value {
    /// An explicitly absent value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A single character.
    Char(char),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    Uint(u64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    Str(Cow<'static, str>),
    /// Any other displayable value, boxed.
    Other(Box<dyn fmt::Display + Send + Sync>),
}

impl Value {
    /// Boxes an arbitrary displayable value.
    ///
    /// This is the escape hatch for types without a dedicated variant. The
    /// box is only ever allocated on the enabled path because a disabled
    /// builder returns before converting its arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use stagelog_core::Value;
    ///
    /// let value = Value::display(std::net::Ipv4Addr::LOCALHOST);
    /// assert_eq!(value.to_string(), "127.0.0.1");
    /// ```
    #[must_use]
    pub fn display<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        Self::Other(Box::new(value))
    }

    /// Reports whether this value is the explicit [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => fmt::Display::fmt(value, f),
            Self::Char(value) => fmt::Display::fmt(value, f),
            Self::Int(value) => fmt::Display::fmt(value, f),
            Self::Uint(value) => fmt::Display::fmt(value, f),
            Self::Float(value) => fmt::Display::fmt(value, f),
            Self::Str(value) => f.write_str(value),
            Self::Other(value) => fmt::Display::fmt(value, f),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Self::Char(value) => f.debug_tuple("Char").field(value).finish(),
            Self::Int(value) => f.debug_tuple("Int").field(value).finish(),
            Self::Uint(value) => f.debug_tuple("Uint").field(value).finish(),
            Self::Float(value) => f.debug_tuple("Float").field(value).finish(),
            Self::Str(value) => f.debug_tuple("Str").field(value).finish(),
            Self::Other(value) => f
                .debug_tuple("Other")
                .field(&format_args!("{value}"))
                .finish(),
        }
    }
}

macro_rules! value_from_signed {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )+
    };
}

macro_rules! value_from_unsigned {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Uint(u64::from(value))
                }
            }
        )+
    };
}

value_from_signed!(i8, i16, i32, i64);
value_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::Uint(value as u64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<&'static str> for Value {
    fn from(value: &'static str) -> Self {
        Self::Str(Cow::Borrowed(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(Cow::Owned(value))
    }
}

impl From<Cow<'static, str>> for Value {
    fn from(value: Cow<'static, str>) -> Self {
        Self::Str(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_convert_to_inline_variants() {
        assert!(matches!(Value::from(42_i32), Value::Int(42)));
        assert!(matches!(Value::from(42_u16), Value::Uint(42)));
        assert!(matches!(Value::from(true), Value::Bool(true)));
        assert!(matches!(Value::from('x'), Value::Char('x')));
        assert!(matches!(Value::from(1.5_f64), Value::Float(_)));
    }

    #[test]
    fn strings_convert_without_reallocation_surprises() {
        assert!(matches!(Value::from("static"), Value::Str(Cow::Borrowed("static"))));
        let owned = Value::from(String::from("owned"));
        assert_eq!(owned.to_string(), "owned");
    }

    #[test]
    fn option_none_maps_to_null() {
        let value = Value::from(None::<i32>);
        assert!(value.is_null());
        assert_eq!(value.to_string(), "null");

        let value = Value::from(Some(7_u8));
        assert!(!value.is_null());
        assert_eq!(value.to_string(), "7");
    }

    #[test]
    fn display_renders_each_variant() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(-3_i8).to_string(), "-3");
        assert_eq!(Value::from("text").to_string(), "text");
        assert_eq!(Value::display(std::time::Duration::from_secs(1).as_secs()).to_string(), "1");
    }

    #[test]
    fn debug_renders_boxed_values_through_display() {
        let value = Value::display("boxed");
        let debug = format!("{value:?}");
        assert!(debug.contains("Other"));
        assert!(debug.contains("boxed"));
    }
}
