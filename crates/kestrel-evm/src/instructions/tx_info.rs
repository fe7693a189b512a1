//! Transaction environment reads.

use crate::{
    constants::{GAS_BASE, GAS_BLOBHASH_OPCODE},
    interpreter::{as_usize_saturated, Frame},
    Host, Interrupt, SpecId,
};
use alloy_primitives::U256;

pub(crate) fn origin<H: Host + ?Sized>(frame: &mut Frame, host: &mut H) -> Result<(), Interrupt> {
    frame.consume_gas(GAS_BASE)?;
    frame.stack.push(host.tx_env().origin.into_word().into())?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn gasprice<H: Host + ?Sized>(frame: &mut Frame, host: &mut H) -> Result<(), Interrupt> {
    frame.consume_gas(GAS_BASE)?;
    frame.stack.push(host.tx_env().gas_price)?;
    frame.advance(1);
    Ok(())
}

/// `BLOBHASH` (EIP-4844, Cancun): the versioned hash at the popped index, or zero
/// when the index is out of range.
pub(crate) fn blob_hash<H: Host + ?Sized>(
    frame: &mut Frame,
    host: &mut H,
) -> Result<(), Interrupt> {
    frame.check_fork(SpecId::CANCUN)?;
    let [index] = frame.stack.popn()?;
    frame.consume_gas(GAS_BLOBHASH_OPCODE)?;
    let index = as_usize_saturated(index);
    let hash = host.tx_env().blob_hashes.get(index).copied();
    frame.stack.push(hash.map_or(U256::ZERO, Into::into))?;
    frame.advance(1);
    Ok(())
}
