//! Per-frame linear memory with word-granular expansion costing.

use crate::{constants::WORD_SIZE, gas};
use alloy_primitives::U256;

/// Byte-addressed frame memory.
///
/// The buffer only ever grows, in 32-byte words, and its length is the `memory_size`
/// observed by `MSIZE`. Reads must stay within the grown region; callers charge the
/// expansion cost via [`Memory::expansion_cost`] and then [`Memory::grow`] before
/// touching a new range.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Creates an empty memory.
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Current size in bytes, always a multiple of 32.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if nothing has been touched yet.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Gas needed to grow the buffer so that `end` bytes are addressable.
    ///
    /// Zero when the region is already covered. The caller charges this before
    /// [`Memory::grow`]; the pair keeps the word count and the charge in lockstep.
    pub fn expansion_cost(&self, end: usize) -> u64 {
        let new_words = (end as u64).div_ceil(WORD_SIZE as u64);
        let current_words = self.data.len() as u64 / WORD_SIZE as u64;
        if new_words <= current_words {
            return 0;
        }
        gas::memory_gas(new_words) - gas::memory_gas(current_words)
    }

    /// Grows the buffer so that `end` bytes are addressable, zero-filling the new tail.
    pub fn grow(&mut self, end: usize) {
        let new_len = end.div_ceil(WORD_SIZE) * WORD_SIZE;
        if new_len > self.data.len() {
            self.data.resize(new_len, 0);
        }
    }

    /// A view of `len` bytes starting at `offset`. The region must be grown.
    pub fn slice(&self, offset: usize, len: usize) -> &[u8] {
        &self.data[offset..offset + len]
    }

    /// Writes `src` at `offset`. The region must be grown.
    pub fn set(&mut self, offset: usize, src: &[u8]) {
        self.data[offset..offset + src.len()].copy_from_slice(src);
    }

    /// Writes a single byte. The region must be grown.
    pub fn set_byte(&mut self, offset: usize, byte: u8) {
        self.data[offset] = byte;
    }

    /// Reads a big-endian word at `offset`. The region must be grown.
    pub fn word(&self, offset: usize) -> U256 {
        U256::from_be_slice(self.slice(offset, WORD_SIZE))
    }

    /// Writes a big-endian word at `offset`. The region must be grown.
    pub fn set_word(&mut self, offset: usize, value: U256) {
        self.set(offset, &value.to_be_bytes::<WORD_SIZE>());
    }

    /// Copies `len` bytes of `src` starting at `src_offset` into memory at
    /// `mem_offset`, zero-filling whatever lies past the end of `src`.
    ///
    /// This is the copy-semantics shared by `CALLDATACOPY`, `CODECOPY` and
    /// `EXTCODECOPY`. The destination region must be grown.
    pub fn set_data(&mut self, mem_offset: usize, src_offset: usize, len: usize, src: &[u8]) {
        let dst = &mut self.data[mem_offset..mem_offset + len];
        let copied = if src_offset < src.len() {
            let available = src.len() - src_offset;
            let n = len.min(available);
            dst[..n].copy_from_slice(&src[src_offset..src_offset + n]);
            n
        } else {
            0
        };
        dst[copied..].fill(0);
    }

    /// Copies `len` bytes from `src_offset` to `dst_offset` within memory, handling
    /// overlap. Both regions must be grown.
    pub fn copy_within(&mut self, dst_offset: usize, src_offset: usize, len: usize) {
        self.data.copy_within(src_offset..src_offset + len, dst_offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grow_rounds_to_words() {
        let mut memory = Memory::new();
        memory.grow(1);
        assert_eq!(memory.len(), 32);
        memory.grow(33);
        assert_eq!(memory.len(), 64);
        // Growing to a covered range is a no-op.
        memory.grow(10);
        assert_eq!(memory.len(), 64);
    }

    #[test]
    fn expansion_cost_is_charged_once() {
        let mut memory = Memory::new();
        // One word: 3 * 1 + 1 / 512 = 3.
        assert_eq!(memory.expansion_cost(32), 3);
        memory.grow(32);
        assert_eq!(memory.expansion_cost(32), 0);
        // Second word costs the delta only.
        assert_eq!(memory.expansion_cost(64), 3);
    }

    #[test]
    fn expansion_cost_has_quadratic_term() {
        let memory = Memory::new();
        // 32 KiB = 1024 words: 3 * 1024 + 1024^2 / 512 = 5120.
        assert_eq!(memory.expansion_cost(32 * 1024), 5120);
    }

    #[test]
    fn word_round_trip() {
        let mut memory = Memory::new();
        memory.grow(64);
        let value = U256::from(0xdead_beefu64);
        memory.set_word(32, value);
        assert_eq!(memory.word(32), value);
        assert_eq!(memory.word(0), U256::ZERO);
    }

    #[test]
    fn set_data_zero_fills_past_source() {
        let mut memory = Memory::new();
        memory.grow(32);
        memory.set(0, &[0xff; 32]);
        memory.set_data(0, 2, 8, &[1, 2, 3, 4]);
        assert_eq!(memory.slice(0, 8), &[3, 4, 0, 0, 0, 0, 0, 0]);
        // Source offset entirely past the end zero-fills the whole region.
        memory.set_data(8, 10, 4, &[1, 2]);
        assert_eq!(memory.slice(8, 4), &[0, 0, 0, 0]);
    }
}
