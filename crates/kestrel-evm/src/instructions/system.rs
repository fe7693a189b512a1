//! Frame-introspection opcodes: identity, calldata, code, return data, hashing.

use crate::{
    constants::{GAS_BASE, GAS_VERY_LOW, KECCAK_EMPTY, WORD_SIZE},
    gas,
    interpreter::{as_usize_or_oob, as_usize_saturated, Frame},
    HaltReason, Host, Interrupt, SpecId,
};
use alloy_primitives::{keccak256, U256};

pub(crate) fn address<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    frame.consume_gas(GAS_BASE)?;
    frame.stack.push(frame.address.into_word().into())?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn caller<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    frame.consume_gas(GAS_BASE)?;
    frame.stack.push(frame.caller.into_word().into())?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn callvalue<H: Host + ?Sized>(
    frame: &mut Frame,
    _host: &mut H,
) -> Result<(), Interrupt> {
    frame.consume_gas(GAS_BASE)?;
    frame.stack.push(frame.value)?;
    frame.advance(1);
    Ok(())
}

/// Reads a calldata word; bytes past the end of input read as zero.
pub(crate) fn calldataload<H: Host + ?Sized>(
    frame: &mut Frame,
    _host: &mut H,
) -> Result<(), Interrupt> {
    let [offset] = frame.stack.popn()?;
    frame.consume_gas(GAS_VERY_LOW)?;
    let offset = as_usize_saturated(offset);
    let mut word = [0u8; WORD_SIZE];
    if offset < frame.input.len() {
        let n = WORD_SIZE.min(frame.input.len() - offset);
        word[..n].copy_from_slice(&frame.input[offset..offset + n]);
    }
    frame.stack.push(U256::from_be_bytes(word))?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn calldatasize<H: Host + ?Sized>(
    frame: &mut Frame,
    _host: &mut H,
) -> Result<(), Interrupt> {
    frame.consume_gas(GAS_BASE)?;
    frame.stack.push(U256::from(frame.input.len()))?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn calldatacopy<H: Host + ?Sized>(
    frame: &mut Frame,
    _host: &mut H,
) -> Result<(), Interrupt> {
    let [mem_offset, data_offset, len] = frame.stack.popn()?;
    let len = as_usize_or_oob(len)?;
    let mem_offset = as_usize_or_oob(mem_offset)?;
    frame.consume_gas(GAS_VERY_LOW + gas::copy_cost(len as u64))?;
    if len == 0 {
        frame.advance(1);
        return Ok(());
    }
    let data_offset = as_usize_saturated(data_offset);
    frame.expand_memory(mem_offset, len)?;
    frame.memory.set_data(mem_offset, data_offset, len, &frame.input);
    frame.advance(1);
    Ok(())
}

pub(crate) fn codesize<H: Host + ?Sized>(
    frame: &mut Frame,
    _host: &mut H,
) -> Result<(), Interrupt> {
    frame.consume_gas(GAS_BASE)?;
    frame.stack.push(U256::from(frame.bytecode.len()))?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn codecopy<H: Host + ?Sized>(
    frame: &mut Frame,
    _host: &mut H,
) -> Result<(), Interrupt> {
    let [mem_offset, code_offset, len] = frame.stack.popn()?;
    let len = as_usize_or_oob(len)?;
    let mem_offset = as_usize_or_oob(mem_offset)?;
    frame.consume_gas(GAS_VERY_LOW + gas::copy_cost(len as u64))?;
    if len == 0 {
        frame.advance(1);
        return Ok(());
    }
    let code_offset = as_usize_saturated(code_offset);
    frame.expand_memory(mem_offset, len)?;
    frame.memory.set_data(mem_offset, code_offset, len, &frame.bytecode);
    frame.advance(1);
    Ok(())
}

/// `RETURNDATASIZE` (EIP-211, Byzantium).
pub(crate) fn returndatasize<H: Host + ?Sized>(
    frame: &mut Frame,
    _host: &mut H,
) -> Result<(), Interrupt> {
    frame.check_fork(SpecId::BYZANTIUM)?;
    frame.consume_gas(GAS_BASE)?;
    frame.stack.push(U256::from(frame.return_data.len()))?;
    frame.advance(1);
    Ok(())
}

/// `RETURNDATACOPY` (EIP-211, Byzantium). Unlike the other copies, reading past the
/// end of the return buffer is a hard failure.
pub(crate) fn returndatacopy<H: Host + ?Sized>(
    frame: &mut Frame,
    _host: &mut H,
) -> Result<(), Interrupt> {
    frame.check_fork(SpecId::BYZANTIUM)?;
    let [mem_offset, data_offset, len] = frame.stack.popn()?;
    let len = as_usize_or_oob(len)?;
    let mem_offset = as_usize_or_oob(mem_offset)?;
    frame.consume_gas(GAS_VERY_LOW + gas::copy_cost(len as u64))?;
    let data_offset = as_usize_or_oob(data_offset)?;
    let data_end = data_offset.checked_add(len).ok_or(HaltReason::OutOfBounds)?;
    if data_end > frame.return_data.len() {
        return Err(HaltReason::OutOfBounds.into());
    }
    if len != 0 {
        frame.expand_memory(mem_offset, len)?;
        frame.memory.set(mem_offset, &frame.return_data[data_offset..data_end]);
    }
    frame.advance(1);
    Ok(())
}

/// `KECCAK256`: hashes a memory region; the empty region hashes to the well-known
/// constant without touching memory.
pub(crate) fn keccak256_op<H: Host + ?Sized>(
    frame: &mut Frame,
    _host: &mut H,
) -> Result<(), Interrupt> {
    let [offset, len] = frame.stack.popn()?;
    let len = as_usize_or_oob(len)?;
    let offset = as_usize_or_oob(offset)?;
    frame.consume_gas(gas::keccak256_cost(len as u64))?;
    let hash = if len == 0 {
        KECCAK_EMPTY
    } else {
        frame.expand_memory(offset, len)?;
        keccak256(frame.memory.slice(offset, len))
    };
    frame.stack.push(hash.into())?;
    frame.advance(1);
    Ok(())
}

/// Pushes the gas remaining after this opcode's own charge.
pub(crate) fn gas<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    frame.consume_gas(GAS_BASE)?;
    frame.stack.push(U256::from(frame.gas.remaining()))?;
    frame.advance(1);
    Ok(())
}
