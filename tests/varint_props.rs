//! Property tests for the byte-level decoders

use proptest::prelude::*;
use sqlite_page_reader::{
    Record, SerialType, decode_page, decode_varint, decode_varint32, encode_varint,
};

proptest! {
    #[test]
    fn prop_varint_round_trip(value in any::<u64>()) {
        let encoded = encode_varint(value);
        prop_assert!(!encoded.is_empty() && encoded.len() <= 9);
        prop_assert_eq!(decode_varint(&encoded).unwrap(), (value, encoded.len()));
    }

    #[test]
    fn prop_varint_ignores_trailing_bytes(value in any::<u64>(), tail in prop::collection::vec(any::<u8>(), 0..16)) {
        let mut encoded = encode_varint(value);
        let len = encoded.len();
        encoded.extend(tail);
        prop_assert_eq!(decode_varint(&encoded).unwrap(), (value, len));
    }

    #[test]
    fn prop_varint32_agrees_with_varint(value in any::<u32>()) {
        let encoded = encode_varint(u64::from(value));
        prop_assert_eq!(decode_varint32(&encoded).unwrap(), (value, encoded.len()));
    }

    #[test]
    fn prop_serial_type_code_round_trip(code in any::<u64>()) {
        let serial_type = SerialType::from_code(code);
        prop_assert_eq!(serial_type.code(), Some(code));
        prop_assert_eq!(serial_type.is_reserved(), code == 10 || code == 11);
    }

    #[test]
    fn prop_decode_page_never_panics(data in prop::collection::vec(any::<u8>(), 0..512), offset in prop_oneof![Just(0usize), Just(100usize)]) {
        let _ = decode_page(&data, 2, offset);
    }

    #[test]
    fn prop_record_decode_never_panics(payload in prop::collection::vec(any::<u8>(), 0..128)) {
        if let Ok(record) = Record::decode(&payload) {
            prop_assert!(record.header_size as usize <= payload.len());
        }
    }
}
