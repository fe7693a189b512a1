//! Control flow: jumps, program-counter reads and the terminal opcodes.

use crate::{
    constants::{GAS_BASE, GAS_HIGH, GAS_JUMPDEST, GAS_MID},
    interpreter::{as_usize_or_oob, as_usize_saturated, Frame},
    HaltReason, Host, Interrupt,
};
use alloy_primitives::{Bytes, U256};

pub(crate) fn stop<H: Host + ?Sized>(_frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    Err(Interrupt::Stop)
}

pub(crate) fn jump<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [dest] = frame.stack.popn()?;
    frame.consume_gas(GAS_MID)?;
    jump_to(frame, dest)
}

pub(crate) fn jumpi<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [dest, condition] = frame.stack.popn()?;
    frame.consume_gas(GAS_HIGH)?;
    if condition.is_zero() {
        frame.advance(1);
        Ok(())
    } else {
        jump_to(frame, dest)
    }
}

fn jump_to(frame: &mut Frame, dest: U256) -> Result<(), Interrupt> {
    let dest = as_usize_saturated(dest);
    if !frame.is_valid_jump(dest) {
        return Err(HaltReason::InvalidJump.into());
    }
    frame.pc = dest;
    Ok(())
}

pub(crate) fn pc<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    frame.consume_gas(GAS_BASE)?;
    frame.stack.push(U256::from(frame.pc))?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn jumpdest<H: Host + ?Sized>(
    frame: &mut Frame,
    _host: &mut H,
) -> Result<(), Interrupt> {
    frame.consume_gas(GAS_JUMPDEST)?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn ret<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let output = exit_output(frame)?;
    Err(Interrupt::Return(output))
}

pub(crate) fn revert<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    frame.check_fork(crate::SpecId::BYZANTIUM)?;
    let output = exit_output(frame)?;
    Err(Interrupt::Revert(output))
}

/// Shared tail of `RETURN`/`REVERT`: charge expansion and snapshot the region.
fn exit_output(frame: &mut Frame) -> Result<Bytes, Interrupt> {
    let [offset, len] = frame.stack.popn()?;
    let len = as_usize_or_oob(len)?;
    let offset = as_usize_or_oob(offset)?;
    if len == 0 {
        return Ok(Bytes::new());
    }
    frame.expand_memory(offset, len)?;
    Ok(Bytes::copy_from_slice(frame.memory.slice(offset, len)))
}

pub(crate) fn invalid<H: Host + ?Sized>(
    _frame: &mut Frame,
    _host: &mut H,
) -> Result<(), Interrupt> {
    Err(HaltReason::InvalidOpcode.into())
}

/// Fallback for undefined opcode bytes.
pub(crate) fn unknown<H: Host + ?Sized>(
    _frame: &mut Frame,
    _host: &mut H,
) -> Result<(), Interrupt> {
    Err(HaltReason::InvalidOpcode.into())
}
