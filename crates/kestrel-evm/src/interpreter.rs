//! The per-call execution frame and its dispatch loop.

use crate::{
    gas::Gas,
    instructions::instruction_table,
    opcode, ExecutionResult, HaltReason, Host, Interrupt, Memory, SpecId, Stack, SuccessReason,
};
use alloy_primitives::{Address, Bytes, U256};

/// Everything needed to bind a [`Frame`] to one message call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameInputs {
    /// Address whose storage and balance the frame runs against.
    pub address: Address,
    /// `msg.sender`.
    pub caller: Address,
    /// `msg.value`, apparent for `DELEGATECALL` frames.
    pub value: U256,
    /// Whether state mutation is forbidden.
    pub is_static: bool,
    /// Nesting depth, zero for the transaction's outermost frame.
    pub depth: usize,
    /// The code to execute.
    pub bytecode: Bytes,
    /// Calldata.
    pub input: Bytes,
    /// Gas budget.
    pub gas_limit: u64,
}

/// A single call frame: bytecode, program counter, operand stack, memory and gas.
///
/// The frame owns all per-call state exclusively; everything shared across calls is
/// reached through the [`Host`] passed to [`Frame::run`]. Sub-calls re-enter the
/// host, which builds a nested frame against the same environment.
#[derive(Clone, Debug)]
pub struct Frame {
    pub(crate) address: Address,
    pub(crate) caller: Address,
    pub(crate) value: U256,
    pub(crate) is_static: bool,
    pub(crate) depth: usize,
    pub(crate) bytecode: Bytes,
    pub(crate) input: Bytes,
    pub(crate) spec: SpecId,
    pub(crate) pc: usize,
    pub(crate) stack: Stack,
    pub(crate) memory: Memory,
    pub(crate) gas: Gas,
    /// Output of the most recent completed sub-call.
    pub(crate) return_data: Bytes,
    jumpdests: Box<[bool]>,
}

impl Frame {
    /// Creates a frame for one message call under the given fork.
    pub fn new(inputs: FrameInputs, spec: SpecId) -> Self {
        let jumpdests = analyze_jumpdests(&inputs.bytecode);
        Self {
            address: inputs.address,
            caller: inputs.caller,
            value: inputs.value,
            is_static: inputs.is_static,
            depth: inputs.depth,
            bytecode: inputs.bytecode,
            input: inputs.input,
            spec,
            pc: 0,
            stack: Stack::new(),
            memory: Memory::new(),
            gas: Gas::new(inputs.gas_limit),
            return_data: Bytes::new(),
            jumpdests,
        }
    }

    /// Runs the frame to a terminal condition.
    ///
    /// Fetches the byte at the program counter, dispatches it through the opcode
    /// table and repeats until a handler terminates the frame. Running past the end
    /// of code is a successful `STOP`.
    pub fn run<H: Host + ?Sized>(&mut self, host: &mut H) -> ExecutionResult {
        let table = instruction_table::<H>();
        loop {
            let Some(&byte) = self.bytecode.get(self.pc) else {
                return self.success(SuccessReason::Stop, Bytes::new());
            };
            match table[byte as usize](self, host) {
                Ok(()) => {}
                Err(Interrupt::Stop) => return self.success(SuccessReason::Stop, Bytes::new()),
                Err(Interrupt::SelfDestruct) => {
                    return self.success(SuccessReason::SelfDestruct, Bytes::new())
                }
                Err(Interrupt::Return(output)) => {
                    return self.success(SuccessReason::Return, output)
                }
                Err(Interrupt::Revert(output)) => {
                    return ExecutionResult::Revert {
                        gas_used: self.gas.spent(),
                        gas_left: self.gas.remaining(),
                        output,
                    }
                }
                Err(Interrupt::Halt(reason)) => {
                    self.gas.consume_all();
                    return ExecutionResult::Halt { reason, gas_used: self.gas.limit() };
                }
            }
        }
    }

    fn success(&self, reason: SuccessReason, output: Bytes) -> ExecutionResult {
        ExecutionResult::Success {
            reason,
            gas_used: self.gas.spent(),
            gas_left: self.gas.remaining(),
            output,
        }
    }

    /// The frame's contract address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The frame's gas meter.
    pub fn gas(&self) -> &Gas {
        &self.gas
    }

    /// The operand stack.
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// The frame memory.
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Output of the most recent completed sub-call.
    pub fn return_data(&self) -> &Bytes {
        &self.return_data
    }

    /// Deducts `cost` from the meter.
    pub(crate) fn consume_gas(&mut self, cost: u64) -> Result<(), HaltReason> {
        if self.gas.consume(cost) {
            Ok(())
        } else {
            Err(HaltReason::OutOfGas)
        }
    }

    /// Fails with `InvalidOpcode` if the active fork predates `fork`. Charged
    /// nothing: availability is checked before any gas is consumed.
    pub(crate) fn check_fork(&self, fork: SpecId) -> Result<(), HaltReason> {
        if self.spec.is_enabled(fork) {
            Ok(())
        } else {
            Err(HaltReason::InvalidOpcode)
        }
    }

    /// Fails with `StaticCallViolation` inside a static call.
    pub(crate) fn require_non_static(&self) -> Result<(), HaltReason> {
        if self.is_static {
            Err(HaltReason::StaticCallViolation)
        } else {
            Ok(())
        }
    }

    /// Advances the program counter by `n` bytes.
    pub(crate) fn advance(&mut self, n: usize) {
        self.pc += n;
    }

    /// Charges expansion for `[offset, offset + len)` and grows memory. A no-op for
    /// zero-length regions.
    pub(crate) fn expand_memory(&mut self, offset: usize, len: usize) -> Result<(), HaltReason> {
        if len == 0 {
            return Ok(());
        }
        let end = offset + len;
        let cost = self.memory.expansion_cost(end);
        self.consume_gas(cost)?;
        self.memory.grow(end);
        Ok(())
    }

    /// Whether `dest` is a `JUMPDEST` outside any push immediate.
    pub(crate) fn is_valid_jump(&self, dest: usize) -> bool {
        self.jumpdests.get(dest).copied().unwrap_or(false)
    }
}

/// Converts a word to a buffer offset or length, bounding it to the addressable
/// range. Offsets are validated even for zero-length regions.
pub(crate) fn as_usize_or_oob(value: U256) -> Result<usize, HaltReason> {
    if value > U256::from(u32::MAX) {
        return Err(HaltReason::OutOfBounds);
    }
    Ok(value.to::<usize>())
}

/// Converts a word to a `usize`, clamping anything oversized. Used where a large
/// operand means "past the end" rather than an error.
pub(crate) fn as_usize_saturated(value: U256) -> usize {
    value.try_into().unwrap_or(usize::MAX)
}

/// Marks every `JUMPDEST` byte that is not the immediate of a `PUSH`.
fn analyze_jumpdests(code: &[u8]) -> Box<[bool]> {
    let mut table = vec![false; code.len()];
    let mut i = 0;
    while i < code.len() {
        let byte = code[i];
        if byte == opcode::JUMPDEST {
            table[i] = true;
        }
        if (opcode::PUSH1..=opcode::PUSH32).contains(&byte) {
            i += usize::from(byte - opcode::PUSH1) + 2;
        } else {
            i += 1;
        }
    }
    table.into_boxed_slice()
}
