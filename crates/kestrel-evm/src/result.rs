//! Frame execution results and the typed halt taxonomy.

use alloy_primitives::Bytes;
use serde::{Deserialize, Serialize};

/// Reasons a frame halts exceptionally.
///
/// Every variant consumes all gas remaining in the frame. `Revert` is not a halt: it
/// preserves gas and is reported through [`ExecutionResult::Revert`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum HaltReason {
    /// The frame ran out of gas.
    #[error("out of gas")]
    OutOfGas,
    /// An operation popped more items than the stack holds.
    #[error("stack underflow")]
    StackUnderflow,
    /// A push would grow the stack beyond its 1024-item limit.
    #[error("stack overflow")]
    StackOverflow,
    /// An undefined byte, a fork-gated opcode under an older fork, or the designated
    /// `INVALID` opcode.
    #[error("invalid opcode")]
    InvalidOpcode,
    /// A state-mutating operation ran inside a static call.
    #[error("write inside a static call")]
    StaticCallViolation,
    /// `JUMP`/`JUMPI` targeted a byte that is not a `JUMPDEST`.
    #[error("invalid jump destination")]
    InvalidJump,
    /// An offset or length does not fit the addressable range.
    #[error("offset or length out of bounds")]
    OutOfBounds,
    /// Deployed code exceeds the code size limit.
    #[error("max code size exceeded")]
    MaxCodeSizeExceeded,
    /// Init code exceeds the EIP-3860 limit.
    #[error("max init code size exceeded")]
    MaxInitCodeSizeExceeded,
}

/// How a frame finished successfully.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuccessReason {
    /// `STOP`, or execution ran past the end of code.
    Stop,
    /// `RETURN` with an output buffer.
    Return,
    /// `SELFDESTRUCT` halted the frame.
    SelfDestruct,
}

/// The outcome of running a [`Frame`](crate::Frame) to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecutionResult {
    /// The frame completed normally; unspent gas is preserved.
    Success {
        /// What terminated the frame.
        reason: SuccessReason,
        /// Gas consumed by the frame.
        gas_used: u64,
        /// Gas left for the caller to reclaim.
        gas_left: u64,
        /// Output set by `RETURN`, empty otherwise.
        output: Bytes,
    },
    /// The frame reverted; unspent gas is preserved, state changes are the host's to
    /// roll back.
    Revert {
        /// Gas consumed up to the revert.
        gas_used: u64,
        /// Gas left for the caller to reclaim.
        gas_left: u64,
        /// Revert data.
        output: Bytes,
    },
    /// The frame halted exceptionally; all gas is consumed.
    Halt {
        /// Why the frame halted.
        reason: HaltReason,
        /// Gas consumed, equal to the frame's gas limit.
        gas_used: u64,
    },
}

impl ExecutionResult {
    /// Returns `true` for [`Self::Success`].
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Gas left in the frame, zero for halts.
    pub const fn gas_left(&self) -> u64 {
        match self {
            Self::Success { gas_left, .. } | Self::Revert { gas_left, .. } => *gas_left,
            Self::Halt { .. } => 0,
        }
    }

    /// Gas the frame consumed.
    pub const fn gas_used(&self) -> u64 {
        match self {
            Self::Success { gas_used, .. } |
            Self::Revert { gas_used, .. } |
            Self::Halt { gas_used, .. } => *gas_used,
        }
    }

    /// The frame's output buffer, empty unless set by `RETURN` or `REVERT`.
    pub fn output(&self) -> &Bytes {
        static EMPTY: Bytes = Bytes::new();
        match self {
            Self::Success { output, .. } | Self::Revert { output, .. } => output,
            Self::Halt { .. } => &EMPTY,
        }
    }
}

/// Control-flow signal returned by instruction handlers.
///
/// `Ok(())` means "keep dispatching"; every variant here ends the frame. Helpers that
/// can only fail exceptionally return `Result<_, HaltReason>` and convert via `?`.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum Interrupt {
    /// `STOP` terminated the frame.
    Stop,
    /// `RETURN` terminated the frame with an output buffer.
    Return(Bytes),
    /// `REVERT` terminated the frame with revert data.
    Revert(Bytes),
    /// `SELFDESTRUCT` terminated the frame.
    SelfDestruct,
    /// The frame halted exceptionally.
    #[from]
    Halt(HaltReason),
}
