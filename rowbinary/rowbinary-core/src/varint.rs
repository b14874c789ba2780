//! Unsigned LEB128 integers and length-prefixed byte strings.
//!
//! Each byte carries 7 data bits, least significant group first; a set high
//! bit means another byte follows.

use bytes::BufMut;

use crate::{cursor::WireCursor, error::DecodeError};

/// Maximum bytes for a 64-bit varint (ceil(64/7) = 10).
pub const MAX_VARINT_BYTES: usize = 10;

/// Read one varint at the cursor.
pub fn read_varint(cursor: &mut WireCursor<'_>) -> Result<u64, DecodeError> {
    let start = cursor.position();
    let rest = cursor.rest();
    let mut result: u64 = 0;
    let mut shift = 0u32;

    for (i, &byte) in rest.iter().enumerate() {
        if i >= MAX_VARINT_BYTES {
            return Err(DecodeError::VarintOverflow { offset: start });
        }

        let bits = u64::from(byte & 0x7F);
        if shift == 63 && bits > 1 {
            return Err(DecodeError::VarintOverflow { offset: start });
        }
        result |= bits << shift;

        if byte & 0x80 == 0 {
            cursor.advance(i + 1);
            return Ok(result);
        }
        shift += 7;
    }

    Err(cursor.truncated(rest.len() + 1))
}

/// Read a varint length `n` followed by `n` raw bytes.
///
/// The length is checked against the remaining buffer before anything is
/// consumed past the prefix, so oversized prefixes never allocate.
pub fn read_length_prefixed_bytes<'a>(
    cursor: &mut WireCursor<'a>,
) -> Result<&'a [u8], DecodeError> {
    let len = read_varint(cursor)?;
    let len = usize::try_from(len).map_err(|_| cursor.truncated(usize::MAX))?;
    cursor.read_bytes(len)
}

/// Append the varint encoding of `value`.
pub fn write_varint(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.put_u8(byte);
            return;
        }
        out.put_u8(byte | 0x80);
    }
}

/// Append a varint length followed by the raw bytes.
pub fn write_length_prefixed_bytes(bytes: &[u8], out: &mut Vec<u8>) {
    write_varint(bytes.len() as u64, out);
    out.put_slice(bytes);
}

/// Number of bytes [`write_varint`] appends for `value`.
pub const fn varint_len(value: u64) -> usize {
    if value == 0 {
        return 1;
    }
    let bits = 64 - value.leading_zeros() as usize;
    bits.div_ceil(7)
}
