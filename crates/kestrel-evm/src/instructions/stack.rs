//! Stack manipulation: `POP`, the `PUSH` family, `DUP` and `SWAP`.

use crate::{
    constants::{GAS_BASE, GAS_VERY_LOW},
    interpreter::Frame,
    Host, Interrupt, SpecId,
};
use alloy_primitives::U256;

pub(crate) fn pop<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    let [_] = frame.stack.popn()?;
    frame.consume_gas(GAS_BASE)?;
    frame.advance(1);
    Ok(())
}

/// `PUSH0` (EIP-3855, Shanghai).
pub(crate) fn push0<H: Host + ?Sized>(frame: &mut Frame, _host: &mut H) -> Result<(), Interrupt> {
    frame.check_fork(SpecId::SHANGHAI)?;
    frame.consume_gas(GAS_BASE)?;
    frame.stack.push(U256::ZERO)?;
    frame.advance(1);
    Ok(())
}

/// `PUSHn`: reads `N` immediate bytes big-endian, zero-filling any that lie past the
/// end of code, and advances the program counter over them.
pub(crate) fn push<const N: usize, H: Host + ?Sized>(
    frame: &mut Frame,
    _host: &mut H,
) -> Result<(), Interrupt> {
    frame.consume_gas(GAS_VERY_LOW)?;
    let start = frame.pc + 1;
    let end = (start + N).min(frame.bytecode.len());
    let available = end.saturating_sub(start);
    let mut value = U256::from_be_slice(&frame.bytecode[start..end]);
    if available < N {
        value <<= 8 * (N - available);
    }
    frame.stack.push(value)?;
    frame.advance(1 + N);
    Ok(())
}

/// `DUPn`: pushes a copy of the `N`-th item from the top.
pub(crate) fn dup<const N: usize, H: Host + ?Sized>(
    frame: &mut Frame,
    _host: &mut H,
) -> Result<(), Interrupt> {
    frame.stack.dup(N)?;
    frame.consume_gas(GAS_VERY_LOW)?;
    frame.advance(1);
    Ok(())
}

/// `SWAPn`: exchanges the top with the item `N` positions below it.
pub(crate) fn swap<const N: usize, H: Host + ?Sized>(
    frame: &mut Frame,
    _host: &mut H,
) -> Result<(), Interrupt> {
    frame.stack.swap(N)?;
    frame.consume_gas(GAS_VERY_LOW)?;
    frame.advance(1);
    Ok(())
}
