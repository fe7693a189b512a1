//! Block- and transaction-level context the interpreter reads from the host.

use alloy_primitives::{Address, B256, U256};

/// Block header fields observable by environment opcodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockEnv {
    /// Block height.
    pub number: u64,
    /// Block timestamp in seconds.
    pub timestamp: u64,
    /// Beneficiary of the block reward, read by `COINBASE`.
    pub coinbase: Address,
    /// Block gas limit.
    pub gas_limit: u64,
    /// Chain id, read by `CHAINID` from Istanbul.
    pub chain_id: u64,
    /// Base fee per gas, read by `BASEFEE` from London.
    pub basefee: U256,
    /// Proof-of-work difficulty, read by `DIFFICULTY` before the Merge.
    pub difficulty: U256,
    /// Randomness beacon output, read through the same opcode byte as `DIFFICULTY`
    /// from the Merge.
    pub prevrandao: B256,
    /// Blob base fee per gas, read by `BLOBBASEFEE` from Cancun.
    pub blob_basefee: U256,
}

/// Transaction fields observable by environment opcodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TxEnv {
    /// Transaction sender, read by `ORIGIN`.
    pub origin: Address,
    /// Effective gas price, read by `GASPRICE`.
    pub gas_price: U256,
    /// Versioned hashes of the transaction's blobs, indexed by `BLOBHASH` (Cancun).
    pub blob_hashes: Vec<B256>,
}
