//! Opcodes that reach through the frame into the host: account introspection,
//! persistent and transient storage, logs and `SELFDESTRUCT`.

use crate::{
    constants::{
        BLOCK_HASH_HISTORY, GAS_BLOCK_HASH, GAS_CALL_STIPEND, GAS_SELF_BALANCE, GAS_WARM_ACCESS,
        REFUND_SELFDESTRUCT,
    },
    gas,
    instructions::into_address,
    interpreter::{as_usize_or_oob, as_usize_saturated, Frame},
    HaltReason, Host, Interrupt, SpecId,
};
use alloy_primitives::{Bytes, Log, LogData, B256, U256};

pub(crate) fn balance<H: Host + ?Sized>(frame: &mut Frame, host: &mut H) -> Result<(), Interrupt> {
    let [address] = frame.stack.popn()?;
    let address = into_address(address);
    let cost = if frame.spec.is_enabled(SpecId::BERLIN) {
        gas::balance_cost(frame.spec, host.access_account(address).is_cold())
    } else {
        gas::balance_cost(frame.spec, false)
    };
    frame.consume_gas(cost)?;
    frame.stack.push(host.balance(address))?;
    frame.advance(1);
    Ok(())
}

/// `SELFBALANCE` (EIP-1884, Istanbul): the frame's own balance without an account
/// touch.
pub(crate) fn selfbalance<H: Host + ?Sized>(
    frame: &mut Frame,
    host: &mut H,
) -> Result<(), Interrupt> {
    frame.check_fork(SpecId::ISTANBUL)?;
    frame.consume_gas(GAS_SELF_BALANCE)?;
    frame.stack.push(host.balance(frame.address))?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn extcodesize<H: Host + ?Sized>(
    frame: &mut Frame,
    host: &mut H,
) -> Result<(), Interrupt> {
    let [address] = frame.stack.popn()?;
    let address = into_address(address);
    let cost = if frame.spec.is_enabled(SpecId::BERLIN) {
        gas::ext_code_cost(frame.spec, host.access_account(address).is_cold())
    } else {
        gas::ext_code_cost(frame.spec, false)
    };
    frame.consume_gas(cost)?;
    frame.stack.push(U256::from(host.code(address).len()))?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn extcodecopy<H: Host + ?Sized>(
    frame: &mut Frame,
    host: &mut H,
) -> Result<(), Interrupt> {
    let [address, mem_offset, code_offset, len] = frame.stack.popn()?;
    let address = into_address(address);
    let len = as_usize_or_oob(len)?;
    let mem_offset = as_usize_or_oob(mem_offset)?;
    let account_cost = if frame.spec.is_enabled(SpecId::BERLIN) {
        gas::ext_code_cost(frame.spec, host.access_account(address).is_cold())
    } else {
        gas::ext_code_cost(frame.spec, false)
    };
    frame.consume_gas(account_cost + gas::copy_cost(len as u64))?;
    if len != 0 {
        let code_offset = as_usize_saturated(code_offset);
        frame.expand_memory(mem_offset, len)?;
        let code = host.code(address);
        frame.memory.set_data(mem_offset, code_offset, len, &code);
    }
    frame.advance(1);
    Ok(())
}

/// `EXTCODEHASH` (EIP-1052, Constantinople). Zero for accounts that do not exist.
pub(crate) fn extcodehash<H: Host + ?Sized>(
    frame: &mut Frame,
    host: &mut H,
) -> Result<(), Interrupt> {
    frame.check_fork(SpecId::CONSTANTINOPLE)?;
    let [address] = frame.stack.popn()?;
    let address = into_address(address);
    let cost = if frame.spec.is_enabled(SpecId::BERLIN) {
        gas::ext_code_hash_cost(frame.spec, host.access_account(address).is_cold())
    } else {
        gas::ext_code_hash_cost(frame.spec, false)
    };
    frame.consume_gas(cost)?;
    frame.stack.push(host.code_hash(address).into())?;
    frame.advance(1);
    Ok(())
}

/// `BLOCKHASH`: hash of one of the 256 most recent blocks, zero outside that window.
pub(crate) fn blockhash<H: Host + ?Sized>(
    frame: &mut Frame,
    host: &mut H,
) -> Result<(), Interrupt> {
    let [requested] = frame.stack.popn()?;
    frame.consume_gas(GAS_BLOCK_HASH)?;
    let current = U256::from(host.block_env().number);
    let hash = if requested >= current || requested + U256::from(BLOCK_HASH_HISTORY) < current {
        U256::ZERO
    } else {
        host.block_hash(requested.to::<u64>()).into()
    };
    frame.stack.push(hash)?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn sload<H: Host + ?Sized>(frame: &mut Frame, host: &mut H) -> Result<(), Interrupt> {
    let [key] = frame.stack.popn()?;
    let cost = if frame.spec.is_enabled(SpecId::BERLIN) {
        gas::sload_cost(frame.spec, host.access_storage_slot(frame.address, key).is_cold())
    } else {
        gas::sload_cost(frame.spec, false)
    };
    frame.consume_gas(cost)?;
    frame.stack.push(host.sload(frame.address, key))?;
    frame.advance(1);
    Ok(())
}

/// `SSTORE` with EIP-2200 net metering from Istanbul and the EIP-2929/3529 pricing
/// on top.
///
/// The static-context check deliberately happens after gas is charged; reordering it
/// changes the remaining-gas trace of failing writes.
pub(crate) fn sstore<H: Host + ?Sized>(frame: &mut Frame, host: &mut H) -> Result<(), Interrupt> {
    let [key, new] = frame.stack.popn()?;

    // EIP-2200 sentry: leave at least a stipend's worth of gas untouched.
    if frame.spec.is_enabled(SpecId::ISTANBUL) && frame.gas.remaining() <= GAS_CALL_STIPEND {
        return Err(HaltReason::OutOfGas.into());
    }

    let is_cold = if frame.spec.is_enabled(SpecId::BERLIN) {
        host.access_storage_slot(frame.address, key).is_cold()
    } else {
        false
    };
    let current = host.sload(frame.address, key);
    let original = host.original_storage(frame.address, key);

    frame.consume_gas(gas::sstore_cost(frame.spec, original, current, new, is_cold))?;
    frame.require_non_static()?;

    host.sstore(frame.address, key, new);
    let refund = gas::sstore_refund(frame.spec, original, current, new);
    if refund != 0 {
        host.add_refund(refund);
    }
    frame.advance(1);
    Ok(())
}

/// `TLOAD` (EIP-1153, Cancun): transient slots are always warm.
pub(crate) fn tload<H: Host + ?Sized>(frame: &mut Frame, host: &mut H) -> Result<(), Interrupt> {
    frame.check_fork(SpecId::CANCUN)?;
    let [key] = frame.stack.popn()?;
    frame.consume_gas(GAS_WARM_ACCESS)?;
    frame.stack.push(host.tload(frame.address, key))?;
    frame.advance(1);
    Ok(())
}

/// `TSTORE` (EIP-1153, Cancun). Like `SSTORE`, gas is charged before the static
/// check.
pub(crate) fn tstore<H: Host + ?Sized>(frame: &mut Frame, host: &mut H) -> Result<(), Interrupt> {
    frame.check_fork(SpecId::CANCUN)?;
    let [key, value] = frame.stack.popn()?;
    frame.consume_gas(GAS_WARM_ACCESS)?;
    frame.require_non_static()?;
    host.tstore(frame.address, key, value);
    frame.advance(1);
    Ok(())
}

/// `LOGn`: appends an entry with `N` topics to the host's log buffer.
pub(crate) fn log<const N: usize, H: Host + ?Sized>(
    frame: &mut Frame,
    host: &mut H,
) -> Result<(), Interrupt> {
    frame.require_non_static()?;
    let [offset, len] = frame.stack.popn()?;
    let len = as_usize_or_oob(len)?;
    let offset = as_usize_or_oob(offset)?;
    frame.consume_gas(gas::log_cost(N as u64, len as u64))?;
    let data = if len == 0 {
        Bytes::new()
    } else {
        frame.expand_memory(offset, len)?;
        Bytes::copy_from_slice(frame.memory.slice(offset, len))
    };
    let topics = frame.stack.popn::<N>()?.map(B256::from).to_vec();
    host.log(Log { address: frame.address, data: LogData::new_unchecked(topics, data) });
    frame.advance(1);
    Ok(())
}

/// `SELFDESTRUCT`: sends the whole balance to the beneficiary and halts the frame.
/// From Cancun (EIP-6780) the account itself is only destroyed when it was created
/// in the same transaction; the host applies that rule.
pub(crate) fn selfdestruct<H: Host + ?Sized>(
    frame: &mut Frame,
    host: &mut H,
) -> Result<(), Interrupt> {
    frame.require_non_static()?;
    let [beneficiary] = frame.stack.popn()?;
    let beneficiary = into_address(beneficiary);

    let is_cold = if frame.spec.is_enabled(SpecId::BERLIN) {
        host.access_account(beneficiary).is_cold()
    } else {
        false
    };
    let balance = host.balance(frame.address);
    let beneficiary_dead = host.balance(beneficiary).is_zero() &&
        host.nonce(beneficiary) == 0 &&
        host.code(beneficiary).is_empty();
    // The new-account surcharge needs a transfer to matter only from Spurious Dragon.
    let new_account = frame.spec.is_enabled(SpecId::TANGERINE) &&
        beneficiary_dead &&
        (frame.spec.is_before(SpecId::SPURIOUS_DRAGON) || !balance.is_zero());
    frame.consume_gas(gas::selfdestruct_cost(frame.spec, is_cold, new_account))?;

    let previously_destroyed = host.selfdestruct(frame.address, beneficiary);
    // EIP-3529 removed the refund.
    if frame.spec.is_before(SpecId::LONDON) && !previously_destroyed {
        host.add_refund(REFUND_SELFDESTRUCT);
    }
    Err(Interrupt::SelfDestruct)
}
