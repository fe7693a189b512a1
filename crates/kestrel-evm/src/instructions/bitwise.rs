//! Comparison, boolean and shift operations.

use crate::{
    constants::GAS_VERY_LOW,
    interpreter::{as_usize_saturated, Frame},
    Host, Interrupt, SpecId,
};
use alloy_primitives::{I256, U256};

pub(crate) fn lt<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [a, b] = frame.stack.popn()?;
    frame.consume_gas(GAS_VERY_LOW)?;
    frame.stack.push(U256::from(a < b))?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn gt<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [a, b] = frame.stack.popn()?;
    frame.consume_gas(GAS_VERY_LOW)?;
    frame.stack.push(U256::from(a > b))?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn slt<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [a, b] = frame.stack.popn()?;
    frame.consume_gas(GAS_VERY_LOW)?;
    frame.stack.push(U256::from(I256::from_raw(a) < I256::from_raw(b)))?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn sgt<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [a, b] = frame.stack.popn()?;
    frame.consume_gas(GAS_VERY_LOW)?;
    frame.stack.push(U256::from(I256::from_raw(a) > I256::from_raw(b)))?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn eq<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [a, b] = frame.stack.popn()?;
    frame.consume_gas(GAS_VERY_LOW)?;
    frame.stack.push(U256::from(a == b))?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn iszero<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [value] = frame.stack.popn()?;
    frame.consume_gas(GAS_VERY_LOW)?;
    frame.stack.push(U256::from(value.is_zero()))?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn bitand<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [a, b] = frame.stack.popn()?;
    frame.consume_gas(GAS_VERY_LOW)?;
    frame.stack.push(a & b)?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn bitor<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [a, b] = frame.stack.popn()?;
    frame.consume_gas(GAS_VERY_LOW)?;
    frame.stack.push(a | b)?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn bitxor<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [a, b] = frame.stack.popn()?;
    frame.consume_gas(GAS_VERY_LOW)?;
    frame.stack.push(a ^ b)?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn not<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [value] = frame.stack.popn()?;
    frame.consume_gas(GAS_VERY_LOW)?;
    frame.stack.push(!value)?;
    frame.advance(1);
    Ok(())
}

/// Extracts byte `i` of the value, counting from the most significant end; `i >= 32`
/// yields zero.
pub(crate) fn byte<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [index, value] = frame.stack.popn()?;
    frame.consume_gas(GAS_VERY_LOW)?;
    let result = if index < U256::from(32) {
        (value >> (8 * (31 - index.to::<usize>()))) & U256::from(0xff)
    } else {
        U256::ZERO
    };
    frame.stack.push(result)?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn shl<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    frame.check_fork(SpecId::CONSTANTINOPLE)?;
    let [shift, value] = frame.stack.popn()?;
    frame.consume_gas(GAS_VERY_LOW)?;
    let shift = as_usize_saturated(shift);
    let result = if shift < 256 { value << shift } else { U256::ZERO };
    frame.stack.push(result)?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn shr<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    frame.check_fork(SpecId::CONSTANTINOPLE)?;
    let [shift, value] = frame.stack.popn()?;
    frame.consume_gas(GAS_VERY_LOW)?;
    let shift = as_usize_saturated(shift);
    let result = if shift < 256 { value >> shift } else { U256::ZERO };
    frame.stack.push(result)?;
    frame.advance(1);
    Ok(())
}

/// Arithmetic right shift; oversized shifts saturate to the sign.
pub(crate) fn sar<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    frame.check_fork(SpecId::CONSTANTINOPLE)?;
    let [shift, value] = frame.stack.popn()?;
    frame.consume_gas(GAS_VERY_LOW)?;
    let shift = as_usize_saturated(shift);
    let result = if shift < 256 {
        value.arithmetic_shr(shift)
    } else if value.bit(255) {
        U256::MAX
    } else {
        U256::ZERO
    };
    frame.stack.push(result)?;
    frame.advance(1);
    Ok(())
}
