//! Error types for the `SQLite` page decoder

use thiserror::Error;

/// Result type alias for operations that can fail with our Error type
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while decoding `SQLite` pages
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The source holds fewer than the 100 bytes of the file header
    #[error("File header too short: {available} bytes available, 100 required")]
    ShortFileHeader { available: usize },

    #[error("Not a SQLite database (bad header magic)")]
    NotADatabase,

    #[error("Invalid page number: {0}")]
    InvalidPage(u32),

    #[error("Invalid page type: {0:#04x}")]
    InvalidPageType(u8),

    #[error("Truncated page header at offset {offset}: need {needed} bytes, {available} available")]
    TruncatedHeader {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Truncated cell pointer table: need {needed} bytes, page holds {available}")]
    TruncatedPointerTable { needed: usize, available: usize },

    /// A read of `len` bytes at `offset` would run past `limit`
    #[error("Read of {len} bytes at offset {offset} exceeds limit {limit}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        limit: usize,
    },

    #[error("Varint too long: {len} bytes")]
    VarintTooLong { len: usize },

    #[error("Unexpected end of input: varint not terminated within {available} bytes")]
    UnexpectedEndOfInput { available: usize },

    #[error("Invalid serial type: {0}")]
    InvalidSerialType(u64),

    #[error("Truncated record header: header size {header_size}, serial types consumed {consumed}")]
    TruncatedRecordHeader { header_size: u64, consumed: u64 },

    #[error("Payload of {payload_size} bytes spills to overflow pages (max local {max_local})")]
    PayloadOverflow { payload_size: u64, max_local: usize },

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] core::str::Utf8Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let short = Error::ShortFileHeader { available: 42 };
        let page_type = Error::InvalidPageType(0x07);
        let page = Error::InvalidPage(0);
        let bounds = Error::OutOfBounds {
            offset: 4090,
            len: 17,
            limit: 4096,
        };

        assert_eq!(
            short.to_string(),
            "File header too short: 42 bytes available, 100 required"
        );
        assert_eq!(page_type.to_string(), "Invalid page type: 0x07");
        assert_eq!(page.to_string(), "Invalid page number: 0");
        assert_eq!(
            bounds.to_string(),
            "Read of 17 bytes at offset 4090 exceeds limit 4096"
        );
        assert_eq!(
            Error::InvalidSerialType(10).to_string(),
            "Invalid serial type: 10"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();

        assert!(matches!(error, Error::Io(_)));
    }

    #[test]
    fn test_utf8_error_conversion() {
        let bytes = vec![0xc3, 0x28];
        let error: Error = core::str::from_utf8(&bytes).unwrap_err().into();

        assert!(matches!(error, Error::Utf8(_)));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::TruncatedRecordHeader {
            header_size: 7,
            consumed: 8,
        };
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("TruncatedRecordHeader"));
        assert!(debug_str.contains("header_size: 7"));
    }
}
