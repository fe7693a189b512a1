//! The call and create family: gas forwarding, memory plumbing and sub-frame
//! dispatch through the host.

use crate::{
    constants::{CALL_DEPTH_LIMIT, GAS_CALL_STIPEND, GAS_CREATE, MAX_INITCODE_SIZE},
    gas,
    instructions::into_address,
    interpreter::{as_usize_or_oob, Frame},
    CallInputs, CallKind, CallValue, CreateInputs, CreateScheme, HaltReason, Host, Interrupt,
    SpecId,
};
use alloy_primitives::{Address, Bytes, U256};

/// A validated (offset, length) pair. Offsets are bounds checked even when the
/// length is zero.
#[derive(Clone, Copy)]
struct MemRegion {
    offset: usize,
    len: usize,
}

impl MemRegion {
    fn new(offset: U256, len: U256) -> Result<Self, HaltReason> {
        let len = as_usize_or_oob(len)?;
        let offset = as_usize_or_oob(offset)?;
        Ok(Self { offset, len })
    }

    fn end(&self) -> usize {
        if self.len == 0 {
            0
        } else {
            self.offset + self.len
        }
    }
}

pub(crate) fn call<H: Host + ?Sized>(frame: &mut Frame, host: &mut H) -> Result<(), Interrupt> {
    run_call(frame, host, CallKind::Call)
}

pub(crate) fn call_code<H: Host + ?Sized>(
    frame: &mut Frame,
    host: &mut H,
) -> Result<(), Interrupt> {
    run_call(frame, host, CallKind::CallCode)
}

/// `DELEGATECALL` (EIP-7, Homestead).
pub(crate) fn delegate_call<H: Host + ?Sized>(
    frame: &mut Frame,
    host: &mut H,
) -> Result<(), Interrupt> {
    frame.check_fork(SpecId::HOMESTEAD)?;
    run_call(frame, host, CallKind::DelegateCall)
}

/// `STATICCALL` (EIP-214, Byzantium).
pub(crate) fn static_call<H: Host + ?Sized>(
    frame: &mut Frame,
    host: &mut H,
) -> Result<(), Interrupt> {
    frame.check_fork(SpecId::BYZANTIUM)?;
    run_call(frame, host, CallKind::StaticCall)
}

/// Shared body of the four call opcodes.
///
/// Gas is assembled in schedule order: account touch, base/value/new-account
/// surcharges and memory expansion are charged together, then the forwarded amount
/// is capped by the EIP-150 1/64th retention and debited. The 2300 stipend rides on
/// top of the forwarded gas without being debited from the caller.
fn run_call<H: Host + ?Sized>(
    frame: &mut Frame,
    host: &mut H,
    kind: CallKind,
) -> Result<(), Interrupt> {
    let [gas_word, to] = frame.stack.popn()?;
    let to = into_address(to);
    let value = if matches!(kind, CallKind::Call | CallKind::CallCode) {
        let [value] = frame.stack.popn()?;
        value
    } else {
        U256::ZERO
    };
    let [in_offset, in_len, out_offset, out_len] = frame.stack.popn()?;

    if kind == CallKind::Call && !value.is_zero() {
        frame.require_non_static()?;
    }

    let input = MemRegion::new(in_offset, in_len)?;
    let output = MemRegion::new(out_offset, out_len)?;
    let transfers_value =
        matches!(kind, CallKind::Call | CallKind::CallCode) && !value.is_zero();

    let is_cold = if frame.spec.is_enabled(SpecId::BERLIN) {
        host.access_account(to).is_cold()
    } else {
        false
    };
    let new_account = kind == CallKind::Call &&
        transfers_value &&
        !host.is_precompile(to, frame.spec) &&
        account_dead(host, to);

    let max_end = input.end().max(output.end());
    let expansion = frame.memory.expansion_cost(max_end);
    let flat = gas::call_cost(frame.spec, is_cold, transfers_value, new_account);
    frame.consume_gas(flat + expansion)?;
    frame.memory.grow(max_end);

    let requested = u64::try_from(gas_word).unwrap_or(u64::MAX);
    let forwarded = gas::max_call_gas(frame.spec, frame.gas.remaining()).min(requested);
    frame.consume_gas(forwarded)?;
    let stipend = if transfers_value { GAS_CALL_STIPEND } else { 0 };
    let child_gas = forwarded + stipend;

    // Depth and balance failures are not halts: the would-be child gas (stipend
    // included) comes back and the opcode reports failure.
    if frame.depth + 1 > CALL_DEPTH_LIMIT ||
        (transfers_value && host.balance(frame.address) < value)
    {
        frame.gas.credit(child_gas);
        frame.return_data = Bytes::new();
        frame.stack.push(U256::ZERO)?;
        frame.advance(1);
        return Ok(());
    }

    let (target, caller, call_value, is_static) = match kind {
        CallKind::Call => (to, frame.address, CallValue::Transfer(value), frame.is_static),
        CallKind::CallCode => {
            (frame.address, frame.address, CallValue::Transfer(value), frame.is_static)
        }
        CallKind::DelegateCall => {
            (frame.address, frame.caller, CallValue::Apparent(frame.value), frame.is_static)
        }
        CallKind::StaticCall => (to, frame.address, CallValue::Transfer(U256::ZERO), true),
    };
    let call_input = if input.len == 0 {
        Bytes::new()
    } else {
        Bytes::copy_from_slice(frame.memory.slice(input.offset, input.len))
    };

    let outcome = host.call(CallInputs {
        kind,
        gas_limit: child_gas,
        caller,
        target,
        code_address: to,
        value: call_value,
        input: call_input,
        is_static,
        depth: frame.depth + 1,
    });

    frame.gas.credit(outcome.gas_left);
    let copy_len = output.len.min(outcome.output.len());
    if copy_len != 0 {
        frame.memory.set(output.offset, &outcome.output[..copy_len]);
    }
    frame.return_data = outcome.output;
    frame.stack.push(U256::from(outcome.success))?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn create<const IS_CREATE2: bool, H: Host + ?Sized>(
    frame: &mut Frame,
    host: &mut H,
) -> Result<(), Interrupt> {
    if IS_CREATE2 {
        frame.check_fork(SpecId::CONSTANTINOPLE)?;
    }
    frame.require_non_static()?;

    let [value, code_offset, len] = frame.stack.popn()?;
    let init = MemRegion::new(code_offset, len)?;
    let salt = if IS_CREATE2 {
        let [salt] = frame.stack.popn()?;
        Some(salt)
    } else {
        None
    };

    let mut cost = GAS_CREATE;
    if frame.spec.is_enabled(SpecId::SHANGHAI) {
        // EIP-3860: bound and meter init code up front.
        if init.len > MAX_INITCODE_SIZE {
            return Err(HaltReason::MaxInitCodeSizeExceeded.into());
        }
        cost += gas::initcode_cost(init.len as u64);
    }
    if IS_CREATE2 {
        cost += gas::create2_hash_cost(init.len as u64);
    }
    cost += frame.memory.expansion_cost(init.end());
    frame.consume_gas(cost)?;
    frame.memory.grow(init.end());

    let forwarded = gas::max_call_gas(frame.spec, frame.gas.remaining());
    frame.consume_gas(forwarded)?;

    if frame.depth + 1 > CALL_DEPTH_LIMIT || host.balance(frame.address) < value {
        frame.gas.credit(forwarded);
        frame.return_data = Bytes::new();
        frame.stack.push(U256::ZERO)?;
        frame.advance(1);
        return Ok(());
    }

    let init_code = if init.len == 0 {
        Bytes::new()
    } else {
        Bytes::copy_from_slice(frame.memory.slice(init.offset, init.len))
    };
    let scheme = salt.map_or(CreateScheme::Create, |salt| CreateScheme::Create2 { salt });

    let outcome = host.create(CreateInputs {
        scheme,
        gas_limit: forwarded,
        caller: frame.address,
        value,
        init_code,
        depth: frame.depth + 1,
    });

    frame.gas.credit(outcome.gas_left);
    let pushed = if outcome.success {
        outcome.address.map_or(U256::ZERO, |address| address.into_word().into())
    } else {
        U256::ZERO
    };
    // Empty on success, the revert payload otherwise.
    frame.return_data = outcome.output;
    frame.stack.push(pushed)?;
    frame.advance(1);
    Ok(())
}

/// An account with no balance, no nonce and no code.
fn account_dead<H: Host + ?Sized>(host: &mut H, address: Address) -> bool {
    host.balance(address).is_zero() && host.nonce(address) == 0 && host.code(address).is_empty()
}
