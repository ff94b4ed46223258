//! `SQLite` variable-length integer codec
//!
//! A varint is 1 to 9 bytes long. The first eight bytes each carry seven bits,
//! most significant group first, with the high bit set while more bytes follow.
//! The ninth byte, when present, carries a full eight bits.

use crate::{Error, Result};

/// Maximum encoded length of a varint
pub const MAX_VARINT_LEN: usize = 9;

/// Maximum encoded length accepted by [`decode_varint32`]
pub const MAX_VARINT32_LEN: usize = 5;

/// Decode a varint from the start of `data`
///
/// Returns the value and the number of bytes consumed, always in `1..=9`.
///
/// # Errors
///
/// Returns [`Error::UnexpectedEndOfInput`] if `data` ends before the varint does.
pub fn decode_varint(data: &[u8]) -> Result<(u64, usize)> {
    let mut value = 0u64;

    for (i, &byte) in data.iter().take(MAX_VARINT_LEN).enumerate() {
        if i == MAX_VARINT_LEN - 1 {
            value = (value << 8) | u64::from(byte);
            return Ok((value, MAX_VARINT_LEN));
        }

        value = (value << 7) | u64::from(byte & 0x7f);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }

    Err(Error::UnexpectedEndOfInput {
        available: data.len(),
    })
}

/// Decode a varint that must fit a 32-bit field
///
/// Record header sizes and serial type codes are read this way.
///
/// # Errors
///
/// Returns [`Error::VarintTooLong`] if the varint occupies more than five bytes
/// or its value exceeds `u32::MAX`, and propagates errors from [`decode_varint`].
pub fn decode_varint32(data: &[u8]) -> Result<(u32, usize)> {
    let (value, len) = decode_varint(data)?;
    if len > MAX_VARINT32_LEN {
        return Err(Error::VarintTooLong { len });
    }
    let value = u32::try_from(value).map_err(|_| Error::VarintTooLong { len })?;
    Ok((value, len))
}

/// Encode `value` as a varint
#[must_use]
pub fn encode_varint(value: u64) -> Vec<u8> {
    if value >> 56 != 0 {
        let mut buf = vec![0u8; MAX_VARINT_LEN];
        buf[8] = value as u8;
        let mut rest = value >> 8;
        for byte in buf[..8].iter_mut().rev() {
            *byte = (rest as u8 & 0x7f) | 0x80;
            rest >>= 7;
        }
        return buf;
    }

    let mut buf = Vec::with_capacity(varint_len(value));
    let mut rest = value;
    loop {
        buf.push((rest as u8 & 0x7f) | 0x80);
        rest >>= 7;
        if rest == 0 {
            break;
        }
    }
    // The least significant group is emitted last and terminates the varint
    buf[0] &= 0x7f;
    buf.reverse();
    buf
}

/// Number of bytes [`encode_varint`] produces for `value`
#[must_use]
pub const fn varint_len(value: u64) -> usize {
    if value >> 56 != 0 {
        return MAX_VARINT_LEN;
    }
    let mut len = 1;
    let mut rest = value >> 7;
    while rest != 0 {
        len += 1;
        rest >>= 7;
    }
    len
}
