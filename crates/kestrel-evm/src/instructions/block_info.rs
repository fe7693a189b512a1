//! Block environment reads. Each pushes one word from the host's block context.

use crate::{constants::GAS_BASE, interpreter::Frame, Host, Interrupt, SpecId};
use alloy_primitives::U256;

pub(crate) fn coinbase<H: Host + ?Sized>(frame: &mut Frame, host: &mut H) -> Result<(), Interrupt> {
    frame.consume_gas(GAS_BASE)?;
    frame.stack.push(host.block_env().coinbase.into_word().into())?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn timestamp<H: Host + ?Sized>(
    frame: &mut Frame,
    host: &mut H,
) -> Result<(), Interrupt> {
    frame.consume_gas(GAS_BASE)?;
    frame.stack.push(U256::from(host.block_env().timestamp))?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn block_number<H: Host + ?Sized>(
    frame: &mut Frame,
    host: &mut H,
) -> Result<(), Interrupt> {
    frame.consume_gas(GAS_BASE)?;
    frame.stack.push(U256::from(host.block_env().number))?;
    frame.advance(1);
    Ok(())
}

/// Opcode byte 0x44: proof-of-work difficulty before the Merge, the randomness
/// beacon output after it.
pub(crate) fn difficulty<H: Host + ?Sized>(
    frame: &mut Frame,
    host: &mut H,
) -> Result<(), Interrupt> {
    frame.consume_gas(GAS_BASE)?;
    let value = if frame.spec.is_enabled(SpecId::MERGE) {
        host.block_env().prevrandao.into()
    } else {
        host.block_env().difficulty
    };
    frame.stack.push(value)?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn gaslimit<H: Host + ?Sized>(frame: &mut Frame, host: &mut H) -> Result<(), Interrupt> {
    frame.consume_gas(GAS_BASE)?;
    frame.stack.push(U256::from(host.block_env().gas_limit))?;
    frame.advance(1);
    Ok(())
}

/// `CHAINID` (EIP-1344, Istanbul).
pub(crate) fn chainid<H: Host + ?Sized>(frame: &mut Frame, host: &mut H) -> Result<(), Interrupt> {
    frame.check_fork(SpecId::ISTANBUL)?;
    frame.consume_gas(GAS_BASE)?;
    frame.stack.push(U256::from(host.block_env().chain_id))?;
    frame.advance(1);
    Ok(())
}

/// `BASEFEE` (EIP-3198, London).
pub(crate) fn basefee<H: Host + ?Sized>(frame: &mut Frame, host: &mut H) -> Result<(), Interrupt> {
    frame.check_fork(SpecId::LONDON)?;
    frame.consume_gas(GAS_BASE)?;
    frame.stack.push(host.block_env().basefee)?;
    frame.advance(1);
    Ok(())
}

/// `BLOBBASEFEE` (EIP-7516, Cancun).
pub(crate) fn blob_basefee<H: Host + ?Sized>(
    frame: &mut Frame,
    host: &mut H,
) -> Result<(), Interrupt> {
    frame.check_fork(SpecId::CANCUN)?;
    frame.consume_gas(GAS_BASE)?;
    frame.stack.push(host.block_env().blob_basefee)?;
    frame.advance(1);
    Ok(())
}
