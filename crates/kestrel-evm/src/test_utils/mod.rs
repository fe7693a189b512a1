//! Test utilities: an in-memory host and bytecode-building helpers.

mod host;

pub use host::*;

use alloy_primitives::U256;

use crate::opcode;

/// Emits the smallest `PUSHn` encoding of `value`.
pub fn push_value(code: &mut Vec<u8>, value: U256) {
    let bytes = value.to_be_bytes::<32>();
    let significant = 32 - value.leading_zeros() / 8;
    let n = significant.max(1);
    code.push(opcode::PUSH0 + n as u8);
    code.extend_from_slice(&bytes[32 - n..]);
}

/// Emits `PUSH32` with the full big-endian encoding of `value`.
pub fn push_word(code: &mut Vec<u8>, value: U256) {
    code.push(opcode::PUSH32);
    code.extend_from_slice(&value.to_be_bytes::<32>());
}
