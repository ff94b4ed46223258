//! Decoded column values

use core::fmt;

/// A column value decoded from a record body
///
/// Integers of every on-disk width are widened to `i64`. The constant
/// encodings (serial types 8 and 9) decode to `Integer(0)` and `Integer(1)`;
/// the column's [`SerialType`](crate::SerialType) still tells them apart.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    /// IEEE-754 double, stored big-endian on disk
    Float(f64),
    /// Strict UTF-8
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        if let Self::Integer(value) = *self {
            Some(value)
        } else {
            None
        }
    }

    /// The value as a double; integers are widened, possibly losing precision
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match *self {
            Self::Float(value) => Some(value),
            Self::Integer(value) => Some(value as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let Self::Text(text) = self {
            Some(text.as_str())
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let Self::Blob(bytes) = self {
            Some(bytes.as_slice())
        } else {
            None
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
            Self::Blob(bytes) => write!(f, "BLOB({} bytes)", bytes.len()),
        }
    }
}
