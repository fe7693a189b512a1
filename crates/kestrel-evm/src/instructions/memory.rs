//! Memory reads, writes and the Cancun `MCOPY`.

use crate::{
    constants::{GAS_BASE, GAS_VERY_LOW},
    gas,
    interpreter::{as_usize_or_oob, Frame},
    Host, Interrupt, SpecId,
};
use alloy_primitives::U256;

pub(crate) fn mload<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [offset] = frame.stack.popn()?;
    let offset = as_usize_or_oob(offset)?;
    frame.consume_gas(GAS_VERY_LOW)?;
    frame.expand_memory(offset, 32)?;
    let value = frame.memory.word(offset);
    frame.stack.push(value)?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn mstore<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [offset, value] = frame.stack.popn()?;
    let offset = as_usize_or_oob(offset)?;
    frame.consume_gas(GAS_VERY_LOW)?;
    frame.expand_memory(offset, 32)?;
    frame.memory.set_word(offset, value);
    frame.advance(1);
    Ok(())
}

/// Stores the low byte of the value; expands memory by a single byte's worth.
pub(crate) fn mstore8<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [offset, value] = frame.stack.popn()?;
    let offset = as_usize_or_oob(offset)?;
    frame.consume_gas(GAS_VERY_LOW)?;
    frame.expand_memory(offset, 1)?;
    frame.memory.set_byte(offset, value.byte(0));
    frame.advance(1);
    Ok(())
}

pub(crate) fn msize<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    frame.consume_gas(GAS_BASE)?;
    frame.stack.push(U256::from(frame.memory.len()))?;
    frame.advance(1);
    Ok(())
}

/// `MCOPY` (EIP-5656, Cancun): overlap-safe copy within frame memory.
pub(crate) fn mcopy<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    frame.check_fork(SpecId::CANCUN)?;
    let [dst, src, len] = frame.stack.popn()?;
    let len = as_usize_or_oob(len)?;
    let dst = as_usize_or_oob(dst)?;
    let src = as_usize_or_oob(src)?;
    frame.consume_gas(GAS_VERY_LOW + gas::copy_cost(len as u64))?;
    if len == 0 {
        frame.advance(1);
        return Ok(());
    }
    frame.expand_memory(dst.max(src), len)?;
    frame.memory.copy_within(dst, src, len);
    frame.advance(1);
    Ok(())
}
