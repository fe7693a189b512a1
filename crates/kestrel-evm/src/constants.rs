//! Named gas constants and structural limits of the interpreter.
//!
//! Every gas amount a handler charges is named here; handlers never carry bare
//! numbers beyond the word-size constants.

use alloy_primitives::{b256, B256};

/// Maximum depth of the operand stack.
pub const STACK_LIMIT: usize = 1024;
/// Maximum nesting depth of message calls and creates.
pub const CALL_DEPTH_LIMIT: usize = 1024;
/// Size of an EVM word in bytes.
pub const WORD_SIZE: usize = 32;
/// Maximum deployed code size (EIP-170, Spurious Dragon).
pub const MAX_CODE_SIZE: usize = 24_576;
/// Maximum init code size (EIP-3860, Shanghai).
pub const MAX_INITCODE_SIZE: usize = 49_152;
/// Number of trailing blocks whose hashes `BLOCKHASH` can observe.
pub const BLOCK_HASH_HISTORY: u64 = 256;
/// Keccak-256 hash of the empty byte string.
pub const KECCAK_EMPTY: B256 =
    b256!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470");

/// Gas for the cheapest environment reads (`ADDRESS`, `COINBASE`, `POP`, ...).
pub const GAS_BASE: u64 = 2;
/// Gas for the "very low" tier (`ADD`, `LT`, `PUSH`, `DUP`, `SWAP`, `MLOAD`, ...).
pub const GAS_VERY_LOW: u64 = 3;
/// Gas for the "low" tier (`MUL`, `DIV`, `SDIV`, `MOD`, `SMOD`, `SIGNEXTEND`).
pub const GAS_LOW: u64 = 5;
/// Gas for the "mid" tier (`ADDMOD`, `MULMOD`, `JUMP`).
pub const GAS_MID: u64 = 8;
/// Gas for the "high" tier (`JUMPI`).
pub const GAS_HIGH: u64 = 10;
/// Gas for marking a `JUMPDEST`.
pub const GAS_JUMPDEST: u64 = 1;

/// Static gas for `EXP`.
pub const GAS_EXP: u64 = 10;
/// Per-exponent-byte gas for `EXP` since Spurious Dragon (EIP-160).
pub const GAS_EXP_BYTE: u64 = 50;
/// Per-exponent-byte gas for `EXP` before Spurious Dragon.
pub const GAS_EXP_BYTE_FRONTIER: u64 = 10;

/// Static gas for `KECCAK256`.
pub const GAS_KECCAK256: u64 = 30;
/// Per-word gas for `KECCAK256` input, also metering `CREATE2` hashing.
pub const GAS_KECCAK256_WORD: u64 = 6;
/// Per-word gas for the copy family (`CALLDATACOPY`, `CODECOPY`, `MCOPY`, ...).
pub const GAS_COPY_WORD: u64 = 3;
/// Linear coefficient of the memory expansion cost.
pub const GAS_MEMORY_WORD: u64 = 3;
/// Divisor of the quadratic term of the memory expansion cost.
pub const MEMORY_QUAD_DIVISOR: u64 = 512;

/// Gas for `BLOCKHASH`.
pub const GAS_BLOCK_HASH: u64 = 20;
/// Gas for `BLOBHASH` (Cancun).
pub const GAS_BLOBHASH_OPCODE: u64 = 3;
/// Gas for `SELFBALANCE` (Istanbul).
pub const GAS_SELF_BALANCE: u64 = 5;

/// `BALANCE` gas before Tangerine Whistle.
pub const GAS_BALANCE_FRONTIER: u64 = 20;
/// `BALANCE` gas from Tangerine Whistle (EIP-150).
pub const GAS_BALANCE_TANGERINE: u64 = 400;
/// `BALANCE` gas from Istanbul (EIP-1884).
pub const GAS_BALANCE_ISTANBUL: u64 = 700;
/// `EXTCODESIZE`/`EXTCODECOPY` account gas before Tangerine Whistle.
pub const GAS_EXT_CODE_FRONTIER: u64 = 20;
/// `EXTCODESIZE`/`EXTCODECOPY` account gas from Tangerine Whistle.
pub const GAS_EXT_CODE_TANGERINE: u64 = 700;
/// `EXTCODEHASH` gas at Constantinople (EIP-1052).
pub const GAS_EXT_CODE_HASH_CONSTANTINOPLE: u64 = 400;
/// `EXTCODEHASH` gas from Istanbul (EIP-1884).
pub const GAS_EXT_CODE_HASH_ISTANBUL: u64 = 700;

/// `SLOAD` gas before Tangerine Whistle.
pub const GAS_SLOAD_FRONTIER: u64 = 50;
/// `SLOAD` gas from Tangerine Whistle (EIP-150).
pub const GAS_SLOAD_TANGERINE: u64 = 200;
/// `SLOAD` gas from Istanbul (EIP-1884).
pub const GAS_SLOAD_ISTANBUL: u64 = 800;

/// Surcharge for touching a cold storage slot (EIP-2929, Berlin).
pub const GAS_COLD_SLOAD: u64 = 2_100;
/// Surcharge for touching a cold account (EIP-2929, Berlin).
pub const GAS_COLD_ACCOUNT_ACCESS: u64 = 2_600;
/// Gas for reading warm state (EIP-2929, Berlin).
pub const GAS_WARM_ACCESS: u64 = 100;

/// `SSTORE` gas for writing a non-zero value into a zero slot.
pub const GAS_SSTORE_SET: u64 = 20_000;
/// `SSTORE` gas for updating a non-zero slot (before the EIP-2929 cold-cost fold).
pub const GAS_SSTORE_RESET: u64 = 5_000;
/// Refund for clearing a non-zero slot, up to and including Berlin.
pub const REFUND_SSTORE_CLEAR: i64 = 15_000;
/// Refund for clearing a non-zero slot from London (EIP-3529).
pub const REFUND_SSTORE_CLEAR_LONDON: i64 = 4_800;
/// Refund for `SELFDESTRUCT` before London (removed by EIP-3529).
pub const REFUND_SELFDESTRUCT: i64 = 24_000;

/// Static gas for `LOGn`.
pub const GAS_LOG: u64 = 375;
/// Per-topic gas for `LOGn`.
pub const GAS_LOG_TOPIC: u64 = 375;
/// Per-data-byte gas for `LOGn`.
pub const GAS_LOG_DATA: u64 = 8;

/// Base gas for `CREATE` and `CREATE2`.
pub const GAS_CREATE: u64 = 32_000;
/// Per-byte gas the creation frame pays to deposit the returned code.
pub const GAS_CODE_DEPOSIT: u64 = 200;
/// Per-init-code-word gas charged up front since Shanghai (EIP-3860).
pub const GAS_INIT_CODE_WORD: u64 = 2;

/// Base gas for the call family before Tangerine Whistle.
pub const GAS_CALL_FRONTIER: u64 = 40;
/// Base gas for the call family from Tangerine Whistle (EIP-150).
pub const GAS_CALL_TANGERINE: u64 = 700;
/// Surcharge for a call transferring a non-zero value.
pub const GAS_CALL_VALUE: u64 = 9_000;
/// Surcharge for creating a previously non-existing account.
pub const GAS_NEW_ACCOUNT: u64 = 25_000;
/// Gas granted to a value-carrying child call on top of the forwarded gas.
pub const GAS_CALL_STIPEND: u64 = 2_300;

/// Base gas for `SELFDESTRUCT` from Tangerine Whistle (free before).
pub const GAS_SELF_DESTRUCT: u64 = 5_000;
