//! Unsigned little-endian base-128 integers, the length prefix of every
//! variable-size record.

use emmi_common::{IndexError, IndexResult};

use crate::PeekReader;

const LOW_BITS: u8 = 0x7f;
const CONTINUATION_BIT: u8 = 0x80;

/// Append `value` to `buf`, 7 bits per byte, continuation bit set on every
/// byte except the last.
pub fn write_u64(buf: &mut Vec<u8>, mut value: u64) {
    loop {
        let mut byte = value as u8 & LOW_BITS;
        value >>= 7;
        if value != 0 {
            byte |= CONTINUATION_BIT;
        }
        buf.push(byte);
        if value == 0 {
            return;
        }
    }
}

/// Decode a u64; `MalformedVarint` if the input ends before a byte with a
/// clear continuation bit, or if the value would not fit in 64 bits.
pub fn read_u64(input: &mut PeekReader) -> IndexResult<u64> {
    let mut result = 0u64;
    let mut shift = 0u32;
    loop {
        let byte = input.read_u8().map_err(|_| IndexError::MalformedVarint)?;
        let low = u64::from(byte & LOW_BITS);
        if shift > 63 || (shift == 63 && low > 1) {
            return Err(IndexError::MalformedVarint);
        }
        result |= low << shift;
        if byte & CONTINUATION_BIT == 0 {
            return Ok(result);
        }
        shift += 7;
    }
}

/// Number of bytes `write_u64` emits for `value`.
pub fn encoded_len(value: u64) -> usize {
    if value == 0 {
        return 1;
    }
    (64 - value.leading_zeros() as usize).div_ceil(7)
}
