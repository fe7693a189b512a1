//! The gas meter and the dynamic parts of the gas schedule.
//!
//! Static per-opcode costs live in [`constants`](crate::constants); everything whose
//! price depends on operands, state or the active fork is computed here.

use crate::{constants::*, SpecId};
use alloy_primitives::U256;

/// Gas meter of a single frame.
///
/// Within a handler the meter only ever decreases; gas returned by a completed
/// sub-call is handed back through [`Gas::credit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gas {
    limit: u64,
    remaining: u64,
}

impl Gas {
    /// Creates a meter holding `limit` gas.
    pub const fn new(limit: u64) -> Self {
        Self { limit, remaining: limit }
    }

    /// The initial budget.
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Gas still available.
    pub const fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Gas consumed so far.
    pub const fn spent(&self) -> u64 {
        self.limit - self.remaining
    }

    /// Deducts `cost`, returning `false` if the budget is exhausted. On failure the
    /// meter is left untouched; the frame then halts and consumes everything.
    #[must_use]
    pub fn consume(&mut self, cost: u64) -> bool {
        match self.remaining.checked_sub(cost) {
            Some(left) => {
                self.remaining = left;
                true
            }
            None => false,
        }
    }

    /// Returns gas handed back by a completed sub-call.
    pub fn credit(&mut self, returned: u64) {
        self.remaining += returned;
    }

    /// Consumes everything, used when the frame halts exceptionally.
    pub fn consume_all(&mut self) {
        self.remaining = 0;
    }
}

/// Total memory cost for a buffer of `words` 32-byte words.
///
/// Callers only ever see the delta between two word counts; offsets are bounded to
/// `u32`, so the square cannot overflow.
pub const fn memory_gas(words: u64) -> u64 {
    GAS_MEMORY_WORD * words + words * words / MEMORY_QUAD_DIVISOR
}

/// `EXP` cost: a static part plus a per-byte charge on the exponent's width.
pub fn exp_cost(spec: SpecId, exponent: U256) -> u64 {
    let byte_size = (exponent.bit_len() as u64).div_ceil(8);
    // EIP-160 quintupled the per-byte price.
    let per_byte = if spec.is_enabled(SpecId::SPURIOUS_DRAGON) {
        GAS_EXP_BYTE
    } else {
        GAS_EXP_BYTE_FRONTIER
    };
    GAS_EXP + per_byte * byte_size
}

/// `KECCAK256` cost for `len` input bytes, excluding memory expansion.
pub const fn keccak256_cost(len: u64) -> u64 {
    GAS_KECCAK256 + GAS_KECCAK256_WORD * len.div_ceil(WORD_SIZE as u64)
}

/// Per-word charge of the copy family for `len` copied bytes.
pub const fn copy_cost(len: u64) -> u64 {
    GAS_COPY_WORD * len.div_ceil(WORD_SIZE as u64)
}

/// `LOGn` cost for `topics` topics and `len` data bytes, excluding memory expansion.
pub const fn log_cost(topics: u64, len: u64) -> u64 {
    GAS_LOG + GAS_LOG_TOPIC * topics + GAS_LOG_DATA * len
}

/// Up-front per-word metering of init code (EIP-3860, Shanghai).
pub const fn initcode_cost(len: u64) -> u64 {
    GAS_INIT_CODE_WORD * len.div_ceil(WORD_SIZE as u64)
}

/// `CREATE2` hashing charge for `len` bytes of init code.
pub const fn create2_hash_cost(len: u64) -> u64 {
    GAS_KECCAK256_WORD * len.div_ceil(WORD_SIZE as u64)
}

/// `SLOAD` cost under the given fork.
pub fn sload_cost(spec: SpecId, is_cold: bool) -> u64 {
    if spec.is_enabled(SpecId::BERLIN) {
        if is_cold {
            GAS_COLD_SLOAD
        } else {
            GAS_WARM_ACCESS
        }
    } else if spec.is_enabled(SpecId::ISTANBUL) {
        GAS_SLOAD_ISTANBUL
    } else if spec.is_enabled(SpecId::TANGERINE) {
        GAS_SLOAD_TANGERINE
    } else {
        GAS_SLOAD_FRONTIER
    }
}

/// `BALANCE` cost under the given fork.
pub fn balance_cost(spec: SpecId, is_cold: bool) -> u64 {
    if spec.is_enabled(SpecId::BERLIN) {
        account_access_cost(is_cold)
    } else if spec.is_enabled(SpecId::ISTANBUL) {
        GAS_BALANCE_ISTANBUL
    } else if spec.is_enabled(SpecId::TANGERINE) {
        GAS_BALANCE_TANGERINE
    } else {
        GAS_BALANCE_FRONTIER
    }
}

/// `EXTCODESIZE`/`EXTCODECOPY` account cost under the given fork.
pub fn ext_code_cost(spec: SpecId, is_cold: bool) -> u64 {
    if spec.is_enabled(SpecId::BERLIN) {
        account_access_cost(is_cold)
    } else if spec.is_enabled(SpecId::TANGERINE) {
        GAS_EXT_CODE_TANGERINE
    } else {
        GAS_EXT_CODE_FRONTIER
    }
}

/// `EXTCODEHASH` cost under the given fork.
pub fn ext_code_hash_cost(spec: SpecId, is_cold: bool) -> u64 {
    if spec.is_enabled(SpecId::BERLIN) {
        account_access_cost(is_cold)
    } else if spec.is_enabled(SpecId::ISTANBUL) {
        GAS_EXT_CODE_HASH_ISTANBUL
    } else {
        GAS_EXT_CODE_HASH_CONSTANTINOPLE
    }
}

/// EIP-2929 account touch cost, Berlin onward.
pub const fn account_access_cost(is_cold: bool) -> u64 {
    if is_cold {
        GAS_COLD_ACCOUNT_ACCESS
    } else {
        GAS_WARM_ACCESS
    }
}

/// `SSTORE` cost over the (original, current, new) triplet.
///
/// Istanbul onward this is the EIP-2200 net-metering schedule; Berlin folds the cold
/// surcharge in per EIP-2929 (so a cold reset totals `GAS_SSTORE_RESET`). Before
/// Istanbul only the written slot's zeroness matters.
pub fn sstore_cost(spec: SpecId, original: U256, current: U256, new: U256, is_cold: bool) -> u64 {
    if spec.is_before(SpecId::ISTANBUL) {
        return if current.is_zero() && !new.is_zero() { GAS_SSTORE_SET } else { GAS_SSTORE_RESET };
    }

    let noop_cost =
        if spec.is_enabled(SpecId::BERLIN) { GAS_WARM_ACCESS } else { GAS_SLOAD_ISTANBUL };
    let mut cost = if current != new && original == current {
        if original.is_zero() {
            GAS_SSTORE_SET
        } else if spec.is_enabled(SpecId::BERLIN) {
            GAS_SSTORE_RESET - GAS_COLD_SLOAD
        } else {
            GAS_SSTORE_RESET
        }
    } else {
        noop_cost
    };
    if spec.is_enabled(SpecId::BERLIN) && is_cold {
        cost += GAS_COLD_SLOAD;
    }
    cost
}

/// `SSTORE` refund delta over the (original, current, new) triplet.
///
/// The three EIP-2200 cases are independent and may combine; the result can be
/// negative when an earlier clear is reversed.
pub fn sstore_refund(spec: SpecId, original: U256, current: U256, new: U256) -> i64 {
    if spec.is_before(SpecId::ISTANBUL) {
        return if !current.is_zero() && new.is_zero() { REFUND_SSTORE_CLEAR } else { 0 };
    }
    if current == new {
        return 0;
    }

    let clear_refund = if spec.is_enabled(SpecId::LONDON) {
        REFUND_SSTORE_CLEAR_LONDON
    } else {
        REFUND_SSTORE_CLEAR
    };
    let mut refund = 0i64;
    if !original.is_zero() && !current.is_zero() && new.is_zero() {
        refund += clear_refund;
    }
    if !original.is_zero() && current.is_zero() {
        refund -= clear_refund;
    }
    if original == new {
        refund += if original.is_zero() {
            (GAS_SSTORE_SET - GAS_WARM_ACCESS) as i64
        } else if spec.is_enabled(SpecId::LONDON) {
            (GAS_SSTORE_RESET - GAS_COLD_SLOAD - GAS_WARM_ACCESS) as i64
        } else {
            (GAS_SSTORE_RESET - GAS_WARM_ACCESS) as i64
        };
    }
    refund
}

/// Flat cost of a sub-call before memory expansion.
///
/// Covers the account touch (step 1/2 of the schedule), the value-transfer surcharge
/// and the new-account surcharge; the caller decides whether the latter two apply.
pub fn call_cost(spec: SpecId, is_cold: bool, transfers_value: bool, new_account: bool) -> u64 {
    let mut cost = if spec.is_enabled(SpecId::BERLIN) {
        account_access_cost(is_cold)
    } else if spec.is_enabled(SpecId::TANGERINE) {
        GAS_CALL_TANGERINE
    } else {
        GAS_CALL_FRONTIER
    };
    if transfers_value {
        cost += GAS_CALL_VALUE;
    }
    if new_account {
        cost += GAS_NEW_ACCOUNT;
    }
    cost
}

/// `SELFDESTRUCT` cost. Free before Tangerine Whistle.
pub fn selfdestruct_cost(spec: SpecId, is_cold: bool, new_account: bool) -> u64 {
    let mut cost = if spec.is_enabled(SpecId::TANGERINE) { GAS_SELF_DESTRUCT } else { 0 };
    if new_account {
        cost += GAS_NEW_ACCOUNT;
    }
    if spec.is_enabled(SpecId::BERLIN) && is_cold {
        cost += GAS_COLD_ACCOUNT_ACCESS;
    }
    cost
}

/// The most gas a frame may forward to a sub-call, retaining 1/64th from Tangerine
/// Whistle (EIP-150).
pub fn max_call_gas(spec: SpecId, remaining: u64) -> u64 {
    if spec.is_enabled(SpecId::TANGERINE) {
        remaining - remaining / 64
    } else {
        remaining
    }
}
