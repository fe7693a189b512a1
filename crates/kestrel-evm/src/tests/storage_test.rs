use crate::{
    opcode::{POP, PUSH1, SLOAD, SSTORE, STOP, TLOAD, TSTORE},
    test_utils::MockHost,
    AccessStatus, ExecutionResult, Frame, FrameInputs, HaltReason, Host, SpecId,
};
use alloy_primitives::{address, Address, U256};

const GAS_LIMIT: u64 = 1_000_000;
const CONTRACT: Address = address!("0000000000000000000000000000000000100001");

fn run_at(host: &mut MockHost, code: Vec<u8>, is_static: bool) -> (Frame, ExecutionResult) {
    let spec = host.spec;
    let mut frame = Frame::new(
        FrameInputs {
            address: CONTRACT,
            bytecode: code.into(),
            gas_limit: GAS_LIMIT,
            is_static,
            ..Default::default()
        },
        spec,
    );
    let result = frame.run(host);
    (frame, result)
}

#[test]
fn sload_cold_then_warm() {
    let mut host = MockHost::new(SpecId::CANCUN);
    host.set_storage(CONTRACT, U256::from(1), U256::from(42));
    let code = vec![PUSH1, 1, SLOAD, POP, PUSH1, 1, SLOAD];
    let (frame, result) = run_at(&mut host, code, false);
    assert_eq!(frame.stack().peek(0), Ok(U256::from(42)));
    // Cold first touch, warm second: 3 + 2100 + 2 + 3 + 100.
    assert_eq!(result.gas_used(), 3 + 2100 + 2 + 3 + 100);
}

#[test]
fn sload_cost_before_access_lists() {
    let mut host = MockHost::new(SpecId::ISTANBUL);
    let code = vec![PUSH1, 1, SLOAD];
    let (_, result) = run_at(&mut host, code, false);
    assert_eq!(result.gas_used(), 3 + 800);

    let mut host = MockHost::new(SpecId::PETERSBURG);
    let code = vec![PUSH1, 1, SLOAD];
    let (_, result) = run_at(&mut host, code, false);
    assert_eq!(result.gas_used(), 3 + 200);

    let mut host = MockHost::new(SpecId::HOMESTEAD);
    let code = vec![PUSH1, 1, SLOAD];
    let (_, result) = run_at(&mut host, code, false);
    assert_eq!(result.gas_used(), 3 + 50);
}

/// The clear-refund scenario: a cold clear refunds the London schedule, and a
/// follow-up rewrite of the original value reverses the clear while paying back the
/// reset difference. The refund cases combine; they are not an if-else chain.
#[test]
fn sstore_clear_and_reverse_refunds() {
    let mut host = MockHost::new(SpecId::LONDON);
    host.set_storage(CONTRACT, U256::from(1), U256::from(5));

    // SSTORE(key 1, 0): cold reset, refund +4800.
    let code = vec![PUSH1, 0, PUSH1, 1, SSTORE, STOP];
    let (_, result) = run_at(&mut host, code, false);
    assert!(result.is_success());
    // 3 + 3 + (2900 warm reset + 2100 cold).
    assert_eq!(result.gas_used(), 3 + 3 + 5000);
    assert_eq!(host.refund(), 4800);

    // Same transaction: SSTORE(key 1, 5) restores the original. Case 2 takes the
    // clear refund back, case 3 pays the reset-minus-warm difference.
    let code = vec![PUSH1, 5, PUSH1, 1, SSTORE, STOP];
    let (_, result) = run_at(&mut host, code, false);
    // Slot is warm now and the write is dirty: warm-read price.
    assert_eq!(result.gas_used(), 3 + 3 + 100);
    assert_eq!(host.refund(), 4800 - 4800 + 2800);
}

#[test]
fn sstore_fresh_write_and_clear_pre_london() {
    let mut host = MockHost::new(SpecId::BERLIN);
    // Zero to non-zero on a cold slot.
    let code = vec![PUSH1, 7, PUSH1, 1, SSTORE, STOP];
    let (_, result) = run_at(&mut host, code, false);
    assert_eq!(result.gas_used(), 3 + 3 + 20_000 + 2100);
    assert_eq!(host.refund(), 0);
    assert_eq!(host.sload(CONTRACT, U256::from(1)), U256::from(7));

    // Clearing the slot again within the same transaction restores the original
    // zero, which refunds the set price minus the warm read.
    let code = vec![PUSH1, 0, PUSH1, 1, SSTORE, STOP];
    let (_, result) = run_at(&mut host, code, false);
    assert_eq!(result.gas_used(), 3 + 3 + 100);
    assert_eq!(host.refund(), 20_000 - 100);
}

#[test]
fn sstore_legacy_schedule() {
    let mut host = MockHost::new(SpecId::HOMESTEAD);
    let code = vec![PUSH1, 7, PUSH1, 1, SSTORE, STOP];
    let (_, result) = run_at(&mut host, code, false);
    assert_eq!(result.gas_used(), 3 + 3 + 20_000);

    let mut host = MockHost::new(SpecId::HOMESTEAD);
    host.set_storage(CONTRACT, U256::from(1), U256::from(5));
    let code = vec![PUSH1, 0, PUSH1, 1, SSTORE, STOP];
    let (_, result) = run_at(&mut host, code, false);
    assert_eq!(result.gas_used(), 3 + 3 + 5_000);
    assert_eq!(host.refund(), 15_000);
}

#[test]
fn sstore_sentry_requires_more_than_a_stipend() {
    let mut host = MockHost::new(SpecId::CANCUN);
    let code = vec![PUSH1, 7, PUSH1, 1, SSTORE];
    let spec = host.spec;
    let mut frame = Frame::new(
        FrameInputs {
            address: CONTRACT,
            bytecode: code.into(),
            // After the two pushes exactly 2300 remains, which the sentry rejects.
            gas_limit: 6 + 2300,
            ..Default::default()
        },
        spec,
    );
    let result = frame.run(&mut host);
    assert_eq!(result, ExecutionResult::Halt { reason: HaltReason::OutOfGas, gas_used: 2306 });
    assert_eq!(host.sload(CONTRACT, U256::from(1)), U256::ZERO);
}

/// SSTORE charges gas (and therefore warms the slot) before the static check fires.
#[test]
fn sstore_in_static_context_charges_before_failing() {
    let mut host = MockHost::new(SpecId::CANCUN);
    let code = vec![PUSH1, 7, PUSH1, 1, SSTORE];
    let (_, result) = run_at(&mut host, code, true);
    assert_eq!(
        result,
        ExecutionResult::Halt { reason: HaltReason::StaticCallViolation, gas_used: GAS_LIMIT }
    );
    // The slot was touched on the way to the failure.
    assert_eq!(host.access_storage_slot(CONTRACT, U256::from(1)), AccessStatus::Warm);
    // But nothing was written.
    assert_eq!(host.sload(CONTRACT, U256::from(1)), U256::ZERO);
}

#[test]
fn transient_storage_round_trip() {
    let mut host = MockHost::new(SpecId::CANCUN);
    let code = vec![PUSH1, 9, PUSH1, 1, TSTORE, PUSH1, 1, TLOAD];
    let (frame, result) = run_at(&mut host, code, false);
    assert_eq!(frame.stack().peek(0), Ok(U256::from(9)));
    // Both transient ops cost a flat 100; no cold surcharge ever.
    assert_eq!(result.gas_used(), 3 + 3 + 100 + 3 + 100);
    // Persistent storage is untouched.
    assert_eq!(host.sload(CONTRACT, U256::from(1)), U256::ZERO);
}

#[test]
fn transient_ops_are_gated_at_cancun() {
    let mut host = MockHost::new(SpecId::SHANGHAI);
    let code = vec![PUSH1, 1, TLOAD];
    let (_, result) = run_at(&mut host, code, false);
    assert_eq!(
        result,
        ExecutionResult::Halt { reason: HaltReason::InvalidOpcode, gas_used: GAS_LIMIT }
    );
}

#[test]
fn tstore_in_static_context_fails_after_gas() {
    let mut host = MockHost::new(SpecId::CANCUN);
    let code = vec![PUSH1, 9, PUSH1, 1, TSTORE];
    let (_, result) = run_at(&mut host, code, true);
    assert_eq!(
        result,
        ExecutionResult::Halt { reason: HaltReason::StaticCallViolation, gas_used: GAS_LIMIT }
    );
    assert_eq!(host.tload(CONTRACT, U256::from(1)), U256::ZERO);
}
