//! Arithmetic over 256-bit words. Everything wraps; division and modulo by zero
//! yield zero.

use crate::{
    constants::{GAS_LOW, GAS_MID, GAS_VERY_LOW},
    gas,
    interpreter::Frame,
    Host, Interrupt,
};
use alloy_primitives::{I256, U256};

pub(crate) fn add<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [a, b] = frame.stack.popn()?;
    frame.consume_gas(GAS_VERY_LOW)?;
    frame.stack.push(a.wrapping_add(b))?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn mul<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [a, b] = frame.stack.popn()?;
    frame.consume_gas(GAS_LOW)?;
    frame.stack.push(a.wrapping_mul(b))?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn sub<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [a, b] = frame.stack.popn()?;
    frame.consume_gas(GAS_VERY_LOW)?;
    frame.stack.push(a.wrapping_sub(b))?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn div<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [a, b] = frame.stack.popn()?;
    frame.consume_gas(GAS_LOW)?;
    let quotient = if b.is_zero() { U256::ZERO } else { a / b };
    frame.stack.push(quotient)?;
    frame.advance(1);
    Ok(())
}

/// Signed division truncating toward zero. `MIN / -1` wraps back to `MIN`.
pub(crate) fn sdiv<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [a, b] = frame.stack.popn()?;
    frame.consume_gas(GAS_LOW)?;
    let quotient = if b.is_zero() {
        U256::ZERO
    } else {
        I256::from_raw(a).wrapping_div(I256::from_raw(b)).into_raw()
    };
    frame.stack.push(quotient)?;
    frame.advance(1);
    Ok(())
}

pub(crate) fn rem<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [a, b] = frame.stack.popn()?;
    frame.consume_gas(GAS_LOW)?;
    let remainder = if b.is_zero() { U256::ZERO } else { a % b };
    frame.stack.push(remainder)?;
    frame.advance(1);
    Ok(())
}

/// Signed remainder; the result takes the sign of the dividend.
pub(crate) fn smod<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [a, b] = frame.stack.popn()?;
    frame.consume_gas(GAS_LOW)?;
    let remainder = if b.is_zero() {
        U256::ZERO
    } else {
        I256::from_raw(a).wrapping_rem(I256::from_raw(b)).into_raw()
    };
    frame.stack.push(remainder)?;
    frame.advance(1);
    Ok(())
}

/// `(a + b) % n` without intermediate overflow; zero modulus yields zero.
pub(crate) fn addmod<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [a, b, n] = frame.stack.popn()?;
    frame.consume_gas(GAS_MID)?;
    frame.stack.push(a.add_mod(b, n))?;
    frame.advance(1);
    Ok(())
}

/// `(a * b) % n` without intermediate overflow; zero modulus yields zero.
pub(crate) fn mulmod<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [a, b, n] = frame.stack.popn()?;
    frame.consume_gas(GAS_MID)?;
    frame.stack.push(a.mul_mod(b, n))?;
    frame.advance(1);
    Ok(())
}

/// Wrapping exponentiation; the dynamic cost scales with the exponent's byte width.
pub(crate) fn exp<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [base, exponent] = frame.stack.popn()?;
    frame.consume_gas(gas::exp_cost(frame.spec, exponent))?;
    frame.stack.push(base.pow(exponent))?;
    frame.advance(1);
    Ok(())
}

/// Extends the sign of the value's byte `ext` into all higher bytes; `ext >= 31` is
/// the identity.
pub(crate) fn signextend<H: Host + ?Sized>(
    frame: &mut Frame,
    _host: &mut H,
) -> Result<(), Interrupt> {
    let [ext, x] = frame.stack.popn()?;
    frame.consume_gas(GAS_LOW)?;
    let result = if ext < U256::from(31) {
        let bit_index = 8 * ext.to::<usize>() + 7;
        let mask = (U256::from(1) << bit_index) - U256::from(1);
        if x.bit(bit_index) {
            x | !mask
        } else {
            x & mask
        }
    } else {
        x
    };
    frame.stack.push(result)?;
    frame.advance(1);
    Ok(())
}
