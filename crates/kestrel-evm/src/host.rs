//! The environment interface the interpreter runs against.
//!
//! Everything that outlives a single frame — world state, access lists, the refund
//! counter, the log buffer and the recursive call/create entry points — sits behind
//! [`Host`]. The interpreter drives all gas metering itself; the host only reports
//! state and first-touch status.

use crate::{BlockEnv, SpecId, TxEnv};
use alloy_primitives::{Address, Bytes, Log, B256, U256};
use auto_impl::auto_impl;

/// Warm/cold status of an access-list touch (EIP-2929).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessStatus {
    /// First touch within this transaction.
    Cold,
    /// Already touched within this transaction.
    Warm,
}

impl AccessStatus {
    /// Returns `true` for [`Self::Cold`].
    pub const fn is_cold(self) -> bool {
        matches!(self, Self::Cold)
    }
}

/// The kind of a message call, mirroring the four call opcodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallKind {
    /// `CALL`: new context at the target, value transferred.
    Call,
    /// `CALLCODE`: target's code in the caller's context, value transferred to self.
    CallCode,
    /// `DELEGATECALL`: target's code with the caller's context, sender and value.
    DelegateCall,
    /// `STATICCALL`: like `CALL` without value, child forced static.
    StaticCall,
}

/// How a call's value field is to be interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallValue {
    /// Value is moved from caller to target.
    Transfer(U256),
    /// Value is only visible through `CALLVALUE`, nothing moves (`DELEGATECALL`).
    Apparent(U256),
}

impl CallValue {
    /// The visible amount, transferred or not.
    pub const fn get(self) -> U256 {
        match self {
            Self::Transfer(value) | Self::Apparent(value) => value,
        }
    }
}

/// Inputs of a sub-call dispatched to [`Host::call`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallInputs {
    /// Which call opcode produced this.
    pub kind: CallKind,
    /// Gas forwarded to the child, stipend included.
    pub gas_limit: u64,
    /// `msg.sender` inside the child.
    pub caller: Address,
    /// Address whose state and balance the child runs against.
    pub target: Address,
    /// Account whose bytecode runs; differs from `target` for `CALLCODE` and
    /// `DELEGATECALL`.
    pub code_address: Address,
    /// Call value, transferred or apparent.
    pub value: CallValue,
    /// Calldata.
    pub input: Bytes,
    /// Whether the child must not mutate state.
    pub is_static: bool,
    /// Depth of the child frame.
    pub depth: usize,
}

/// Outcome of a sub-call, as converted by the host.
///
/// Errors inside the child never propagate; an exceptional halt surfaces as
/// `success == false` with zero `gas_left` and empty output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallOutcome {
    /// `true` when the child completed without revert or halt.
    pub success: bool,
    /// Unused gas to credit back to the caller.
    pub gas_left: u64,
    /// Return or revert data.
    pub output: Bytes,
}

/// Which create opcode produced a [`CreateInputs`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreateScheme {
    /// `CREATE`: address derived from creator and nonce.
    Create,
    /// `CREATE2`: address derived from creator, salt and init code hash.
    Create2 {
        /// The salt popped by the opcode.
        salt: U256,
    },
}

/// Inputs of a contract creation dispatched to [`Host::create`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateInputs {
    /// `CREATE` or `CREATE2`.
    pub scheme: CreateScheme,
    /// Gas forwarded to the init frame.
    pub gas_limit: u64,
    /// The creating contract.
    pub caller: Address,
    /// Endowment moved to the new account.
    pub value: U256,
    /// Init code executed to produce the deployed code.
    pub init_code: Bytes,
    /// Depth of the init frame.
    pub depth: usize,
}

/// Outcome of a contract creation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateOutcome {
    /// `true` when the new contract was deployed.
    pub success: bool,
    /// Unused gas to credit back to the creator.
    pub gas_left: u64,
    /// Empty on success, revert data on failure.
    pub output: Bytes,
    /// The deployed address when `success`.
    pub address: Option<Address>,
}

/// Host environment of the interpreter.
///
/// Storage accessors are plain reads and writes: they do not touch the access lists.
/// Warm/cold metering is driven explicitly through [`Host::access_account`] and
/// [`Host::access_storage_slot`], which mark the touched entry warm and report its
/// prior status.
#[auto_impl(&mut, Box)]
pub trait Host {
    /// The active hardfork.
    fn spec_id(&self) -> SpecId;

    /// Block context.
    fn block_env(&self) -> &BlockEnv;

    /// Transaction context.
    fn tx_env(&self) -> &TxEnv;

    /// Hash of block `number` from the historical window. Only queried for blocks
    /// within [`BLOCK_HASH_HISTORY`](crate::constants::BLOCK_HASH_HISTORY) of the
    /// current one; the range check happens in the opcode.
    fn block_hash(&mut self, number: u64) -> B256;

    /// Balance of `address`.
    fn balance(&mut self, address: Address) -> U256;

    /// Nonce of `address`.
    fn nonce(&mut self, address: Address) -> u64;

    /// Code of `address`, empty for non-existing accounts.
    fn code(&mut self, address: Address) -> Bytes;

    /// Code hash of `address`: zero for accounts that do not exist, the hash of the
    /// empty string for existing accounts without code.
    fn code_hash(&mut self, address: Address) -> B256;

    /// Whether `address` is a precompile under `spec`.
    fn is_precompile(&self, address: Address, spec: SpecId) -> bool;

    /// Current value of the storage slot.
    fn sload(&mut self, address: Address, key: U256) -> U256;

    /// Writes the storage slot.
    fn sstore(&mut self, address: Address, key: U256, value: U256);

    /// Value the slot held at the start of the transaction.
    fn original_storage(&mut self, address: Address, key: U256) -> U256;

    /// Transient storage read (EIP-1153); always warm, cleared per transaction.
    fn tload(&mut self, address: Address, key: U256) -> U256;

    /// Transient storage write (EIP-1153).
    fn tstore(&mut self, address: Address, key: U256, value: U256);

    /// Marks `address` warm and reports whether this was its first touch.
    fn access_account(&mut self, address: Address) -> AccessStatus;

    /// Marks the storage slot warm and reports whether this was its first touch.
    fn access_storage_slot(&mut self, address: Address, key: U256) -> AccessStatus;

    /// Adjusts the transaction refund counter; `delta` may be negative.
    fn add_refund(&mut self, delta: i64);

    /// Current value of the refund counter.
    fn refund(&self) -> i64;

    /// Appends a log entry to the transaction's log buffer.
    fn log(&mut self, log: Log);

    /// Transfers the whole balance of `address` to `beneficiary` and, subject to
    /// EIP-6780 from Cancun, flags `address` for destruction. Returns `true` if the
    /// contract was already flagged earlier in the transaction.
    fn selfdestruct(&mut self, address: Address, beneficiary: Address) -> bool;

    /// Runs a message call in a nested frame and reports its outcome. The host owns
    /// snapshotting: state, logs and refunds of a reverted child are rolled back
    /// before this returns.
    fn call(&mut self, inputs: CallInputs) -> CallOutcome;

    /// Runs a contract creation in a nested frame and reports its outcome.
    fn create(&mut self, inputs: CreateInputs) -> CreateOutcome;
}
