//! Record serial types

/// The on-disk type of a record column, resolved from its serial type code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialType {
    /// Code 0
    Null,
    /// Codes 1-6: big-endian two's-complement integer of 1, 2, 3, 4, 6 or 8 bytes
    Integer { width: u8 },
    /// Code 7: big-endian IEEE-754 double
    Float,
    /// Code 8: the integer 0, no body bytes
    ConstZero,
    /// Code 9: the integer 1, no body bytes
    ConstOne,
    /// Codes 10 and 11, reserved for internal use by `SQLite`
    Reserved(u64),
    /// Even codes >= 12
    Blob { length: u64 },
    /// Odd codes >= 13
    Text { length: u64 },
}

impl SerialType {
    /// Resolve a serial type code
    #[must_use]
    pub const fn from_code(code: u64) -> Self {
        match code {
            0 => Self::Null,
            1 => Self::Integer { width: 1 },
            2 => Self::Integer { width: 2 },
            3 => Self::Integer { width: 3 },
            4 => Self::Integer { width: 4 },
            5 => Self::Integer { width: 6 },
            6 => Self::Integer { width: 8 },
            7 => Self::Float,
            8 => Self::ConstZero,
            9 => Self::ConstOne,
            10 | 11 => Self::Reserved(code),
            _ if code % 2 == 0 => Self::Blob {
                length: (code - 12) / 2,
            },
            _ => Self::Text {
                length: (code - 13) / 2,
            },
        }
    }

    /// The serial type code this type is written as
    ///
    /// `None` for an integer width other than 1, 2, 3, 4, 6 or 8, and for a
    /// blob or text length whose code would not fit in a `u64`.
    #[must_use]
    pub fn code(&self) -> Option<u64> {
        let code = match *self {
            Self::Null => 0,
            Self::Integer { width } => match width {
                1..=4 => u64::from(width),
                6 => 5,
                8 => 6,
                _ => return None,
            },
            Self::Float => 7,
            Self::ConstZero => 8,
            Self::ConstOne => 9,
            Self::Reserved(code) => code,
            Self::Blob { length } => length.checked_mul(2)?.checked_add(12)?,
            Self::Text { length } => length.checked_mul(2)?.checked_add(13)?,
        };
        Some(code)
    }

    /// Number of body bytes a value of this type occupies
    ///
    /// Returns `None` for reserved types, which have no defined layout.
    #[must_use]
    pub const fn content_size(&self) -> Option<u64> {
        match *self {
            Self::Null | Self::ConstZero | Self::ConstOne => Some(0),
            Self::Integer { width } => Some(width as u64),
            Self::Float => Some(8),
            Self::Blob { length } | Self::Text { length } => Some(length),
            Self::Reserved(_) => None,
        }
    }

    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        matches!(self, Self::Reserved(_))
    }
}

impl From<u64> for SerialType {
    fn from(code: u64) -> Self {
        Self::from_code(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_table() {
        assert_eq!(SerialType::from_code(0), SerialType::Null);
        assert_eq!(SerialType::from_code(1), SerialType::Integer { width: 1 });
        assert_eq!(SerialType::from_code(2), SerialType::Integer { width: 2 });
        assert_eq!(SerialType::from_code(3), SerialType::Integer { width: 3 });
        assert_eq!(SerialType::from_code(4), SerialType::Integer { width: 4 });
        assert_eq!(SerialType::from_code(5), SerialType::Integer { width: 6 });
        assert_eq!(SerialType::from_code(6), SerialType::Integer { width: 8 });
        assert_eq!(SerialType::from_code(7), SerialType::Float);
        assert_eq!(SerialType::from_code(8), SerialType::ConstZero);
        assert_eq!(SerialType::from_code(9), SerialType::ConstOne);
        assert_eq!(SerialType::from_code(10), SerialType::Reserved(10));
        assert_eq!(SerialType::from_code(11), SerialType::Reserved(11));
    }

    #[test]
    fn test_blob_and_text_parity() {
        assert_eq!(SerialType::from_code(12), SerialType::Blob { length: 0 });
        assert_eq!(SerialType::from_code(13), SerialType::Text { length: 0 });
        assert_eq!(SerialType::from_code(14), SerialType::Blob { length: 1 });
        assert_eq!(SerialType::from_code(15), SerialType::Text { length: 1 });
        // "CREATE TABLE t(x)" is 17 bytes
        assert_eq!(SerialType::from_code(47), SerialType::Text { length: 17 });
    }

    #[test]
    fn test_content_size() {
        assert_eq!(SerialType::from_code(0).content_size(), Some(0));
        assert_eq!(SerialType::from_code(5).content_size(), Some(6));
        assert_eq!(SerialType::from_code(7).content_size(), Some(8));
        assert_eq!(SerialType::from_code(9).content_size(), Some(0));
        assert_eq!(SerialType::from_code(10).content_size(), None);
        assert_eq!(SerialType::from_code(23).content_size(), Some(5));
    }

    #[test]
    fn test_code_inverts_from_code() {
        for code in 0..200 {
            assert_eq!(SerialType::from_code(code).code(), Some(code));
        }
        assert_eq!(SerialType::from_code(u64::MAX).code(), Some(u64::MAX));
        assert_eq!(SerialType::from_code(u64::MAX - 1).code(), Some(u64::MAX - 1));
    }

    #[test]
    fn test_code_of_unencodable_types() {
        for width in [0, 5, 7, 9] {
            assert_eq!(SerialType::Integer { width }.code(), None);
        }
        assert_eq!(SerialType::Blob { length: u64::MAX / 2 }.code(), None);
        assert_eq!(SerialType::Text { length: u64::MAX }.code(), None);
        assert_eq!(
            SerialType::Text { length: (u64::MAX - 13) / 2 }.code(),
            Some(u64::MAX)
        );
    }

    #[test]
    fn test_is_reserved() {
        assert!(SerialType::from_code(10).is_reserved());
        assert!(SerialType::from_code(11).is_reserved());
        assert!(!SerialType::from_code(12).is_reserved());
    }
}
