use crate::{
    opcode::{
        CALL, CALLCODE, CALLER, CALLVALUE, DELEGATECALL, GAS, LOG0, MSTORE, PUSH1, PUSH20, PUSH32,
        RETURN, RETURNDATACOPY, RETURNDATASIZE, REVERT, SSTORE, STATICCALL, STOP,
    },
    test_utils::{push_word, MockHost},
    ExecutionResult, Frame, FrameInputs, HaltReason, Host, SpecId,
};
use alloy_primitives::{address, Address, FixedBytes, U256};

const GAS_LIMIT: u64 = 1_000_000;
const CALLER_ADDR: Address = address!("0000000000000000000000000000000000100000");
const PARENT: Address = address!("0000000000000000000000000000000000100001");
const CHILD: Address = address!("0000000000000000000000000000000000100002");

/// Pushes the six (or seven) call operands for a full-gas call to `CHILD`.
fn push_call_operands(code: &mut Vec<u8>, value: Option<U256>) {
    code.extend([PUSH1, 32, PUSH1, 0]); // out region
    code.extend([PUSH1, 0, PUSH1, 0]); // in region
    if let Some(value) = value {
        push_word(code, value);
    }
    code.push(PUSH20);
    code.extend(CHILD.as_slice());
    push_word(code, U256::from(u64::MAX)); // requested gas
}

fn run_parent(host: &mut MockHost, code: Vec<u8>) -> (Frame, ExecutionResult) {
    let spec = host.spec;
    let mut frame = Frame::new(
        FrameInputs {
            address: PARENT,
            caller: CALLER_ADDR,
            bytecode: code.into(),
            gas_limit: GAS_LIMIT,
            ..Default::default()
        },
        spec,
    );
    let result = frame.run(host);
    (frame, result)
}

/// The child reports the gas it saw at entry: GAS; MSTORE(0); RETURN(0, 32).
fn gas_reporting_child() -> Vec<u8> {
    vec![GAS, PUSH1, 0, MSTORE, PUSH1, 32, PUSH1, 0, RETURN]
}

#[test]
fn call_forwards_all_but_a_64th() {
    let mut host = MockHost::new(SpecId::CANCUN);
    host.set_code(CHILD, gas_reporting_child());

    let mut code = Vec::new();
    push_call_operands(&mut code, Some(U256::ZERO));
    code.push(CALL);
    let (frame, result) = run_parent(&mut host, code);
    assert!(result.is_success());
    assert_eq!(frame.stack().peek(0), Ok(U256::from(1)), "child succeeded");

    // Operand pushes: 4 PUSH1 + 2 PUSH32 + PUSH20 = 21. Flat call cost: cold
    // account access 2600 plus one word of output-region expansion.
    let before_forward = GAS_LIMIT - 21 - 2600 - 3;
    let expected_forward = before_forward - before_forward / 64;
    let reported = frame.memory().word(0);
    // The child's GAS opcode itself costs 2.
    assert_eq!(reported, U256::from(expected_forward - 2));

    // Child consumed: GAS 2, PUSH 3, MSTORE 3+3, PUSH 3, PUSH 3, RETURN 0.
    assert_eq!(result.gas_used(), 21 + 2600 + 3 + 17);
}

#[test]
fn pre_tangerine_calls_forward_exactly_the_request() {
    let mut host = MockHost::new(SpecId::HOMESTEAD);
    host.set_code(CHILD, gas_reporting_child());

    let mut code = Vec::new();
    code.extend([PUSH1, 32, PUSH1, 0, PUSH1, 0, PUSH1, 0, PUSH1, 0]);
    code.push(PUSH20);
    code.extend(CHILD.as_slice());
    push_word(&mut code, U256::from(50_000));
    code.push(CALL);
    let (frame, result) = run_parent(&mut host, code);
    assert!(result.is_success());
    assert_eq!(frame.memory().word(0), U256::from(50_000 - 2));
    // 5 pushes + PUSH20 + PUSH32, base call 40, one word expansion, child used 17.
    assert_eq!(result.gas_used(), 21 + 40 + 3 + 17);
}

#[test]
fn call_with_value_adds_surcharge_and_stipend() {
    let mut host = MockHost::new(SpecId::CANCUN);
    host.set_balance(PARENT, U256::from(1000));
    host.set_code(CHILD, gas_reporting_child());

    let mut code = Vec::new();
    code.extend([PUSH1, 32, PUSH1, 0]);
    code.extend([PUSH1, 0, PUSH1, 0]);
    push_word(&mut code, U256::from(10)); // value
    code.push(PUSH20);
    code.extend(CHILD.as_slice());
    code.extend([PUSH1, 0]); // request zero: the child lives on the stipend
    code.push(CALL);
    let (frame, result) = run_parent(&mut host, code);
    assert!(result.is_success());
    assert_eq!(frame.stack().peek(0), Ok(U256::from(1)));
    // Forwarded zero, so the child saw exactly the stipend.
    assert_eq!(frame.memory().word(0), U256::from(2300 - 2));
    assert_eq!(host.balance(CHILD), U256::from(10));
    // Pushes 4x3 + PUSH32 + PUSH20 + PUSH1 = 21; flat 2600 + 9000 + 3 expansion.
    // The child spent 17 of its never-debited 2300 stipend; the unused remainder
    // flows back, so the parent nets a 2283 credit.
    assert_eq!(result.gas_used(), 21 + 2600 + 9000 + 3 - (2300 - 17));
}

#[test]
fn call_to_dead_account_with_value_pays_new_account_surcharge() {
    let mut host = MockHost::new(SpecId::CANCUN);
    host.set_balance(PARENT, U256::from(1000));

    let mut code = Vec::new();
    code.extend([PUSH1, 0, PUSH1, 0, PUSH1, 0, PUSH1, 0]);
    push_word(&mut code, U256::from(1)); // value to an empty account
    code.push(PUSH20);
    code.extend(CHILD.as_slice());
    code.extend([PUSH1, 0]);
    code.push(CALL);
    let (_, result) = run_parent(&mut host, code);
    // 4 pushes + PUSH32 + PUSH20 + PUSH1 = 21; 2600 cold + 9000 value + 25000 new
    // account; the empty child stops immediately and its whole untouched stipend
    // comes back as a credit.
    assert_eq!(result.gas_used(), 21 + 2600 + 9000 + 25_000 - 2300);
    assert_eq!(host.balance(CHILD), U256::from(1));
}

#[test]
fn call_without_value_skips_new_account_surcharge() {
    let mut host = MockHost::new(SpecId::CANCUN);
    let mut code = Vec::new();
    push_call_operands(&mut code, Some(U256::ZERO));
    code.push(CALL);
    let (_, result) = run_parent(&mut host, code);
    assert_eq!(result.gas_used(), 21 + 2600 + 3);
}

#[test]
fn valueless_call_to_dead_account_is_surcharge_free_on_old_forks() {
    // The surcharge needs a value transfer on every fork; CHILD has no balance,
    // nonce or code here, and still only the base call cost applies.
    let mut host = MockHost::new(SpecId::HOMESTEAD);
    let mut code = Vec::new();
    code.extend([PUSH1, 0, PUSH1, 0, PUSH1, 0, PUSH1, 0, PUSH1, 0]);
    code.push(PUSH20);
    code.extend(CHILD.as_slice());
    push_word(&mut code, U256::from(50_000));
    code.push(CALL);
    let (frame, result) = run_parent(&mut host, code);
    assert!(result.is_success());
    assert_eq!(frame.stack().peek(0), Ok(U256::from(1)));
    // 5 pushes + PUSH20 + PUSH32 = 21, base call 40; the empty child returns the
    // whole forwarded request.
    assert_eq!(result.gas_used(), 21 + 40);
}

#[test]
fn warm_call_costs_a_warm_access() {
    let mut host = MockHost::new(SpecId::CANCUN);
    let mut code = Vec::new();
    push_call_operands(&mut code, Some(U256::ZERO));
    code.push(CALL);
    code.push(crate::opcode::POP);
    push_call_operands(&mut code, Some(U256::ZERO));
    code.push(CALL);
    let (_, result) = run_parent(&mut host, code);
    assert_eq!(result.gas_used(), 21 + 2600 + 3 + 2 + 21 + 100);
}

#[test]
fn insufficient_balance_pushes_zero_and_keeps_gas() {
    let mut host = MockHost::new(SpecId::CANCUN);
    host.set_code(CHILD, vec![STOP]);

    let mut code = Vec::new();
    push_call_operands(&mut code, Some(U256::from(5))); // parent has no balance
    code.push(CALL);
    let (frame, result) = run_parent(&mut host, code);
    assert!(result.is_success());
    assert_eq!(frame.stack().peek(0), Ok(U256::ZERO));
    assert!(frame.return_data().is_empty());
    // Only the flat costs stick; the forwarded gas and the stipend come back.
    // Note the stipend was never debited, so the failed call nets a small credit.
    assert_eq!(result.gas_used(), 21 + 2600 + 9000 + 3 - 2300);
}

#[test]
fn depth_limit_pushes_zero() {
    let mut host = MockHost::new(SpecId::CANCUN);
    host.set_code(CHILD, vec![STOP]);
    let mut code = Vec::new();
    push_call_operands(&mut code, Some(U256::ZERO));
    code.push(CALL);
    let spec = host.spec;
    let mut frame = Frame::new(
        FrameInputs {
            address: PARENT,
            bytecode: code.into(),
            gas_limit: GAS_LIMIT,
            depth: 1024,
            ..Default::default()
        },
        spec,
    );
    let result = frame.run(&mut host);
    assert!(result.is_success());
    assert_eq!(frame.stack().peek(0), Ok(U256::ZERO));
}

#[test]
fn reverting_child_returns_data_and_unused_gas() {
    let mut host = MockHost::new(SpecId::CANCUN);
    // Child stores a marker, then reverts returning one byte of it.
    let child = vec![
        PUSH1, 1, PUSH1, 9, SSTORE, // a write that must be rolled back
        PUSH1, 0xee, PUSH1, 0, crate::opcode::MSTORE8, PUSH1, 1, PUSH1, 0, REVERT,
    ];
    host.set_code(CHILD, child);

    let mut code = Vec::new();
    push_call_operands(&mut code, Some(U256::ZERO));
    code.extend([CALL, RETURNDATASIZE]);
    let (frame, result) = run_parent(&mut host, code);
    assert!(result.is_success());
    assert_eq!(frame.stack().peek(0), Ok(U256::from(1)), "revert data size");
    assert_eq!(frame.stack().peek(1), Ok(U256::ZERO), "success flag");
    // The child's storage write was rolled back by the host.
    assert_eq!(host.sload(CHILD, U256::from(9)), U256::ZERO);
    // Output landed in the requested output region.
    assert_eq!(frame.memory().slice(0, 1), &[0xee]);
}

#[test]
fn returndatacopy_reads_child_output() {
    let mut host = MockHost::new(SpecId::CANCUN);
    let child = vec![
        PUSH32, 0x11, 0x22, 0x33, 0x44, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, PUSH1, 0, MSTORE, PUSH1, 32, PUSH1, 0, RETURN,
    ];
    host.set_code(CHILD, child);

    let mut code = Vec::new();
    push_call_operands(&mut code, Some(U256::ZERO));
    code.push(CALL);
    // Copy 2 bytes of return data from offset 1 to memory 64.
    code.extend([PUSH1, 2, PUSH1, 1, PUSH1, 64, RETURNDATACOPY]);
    let (frame, result) = run_parent(&mut host, code);
    assert!(result.is_success());
    assert_eq!(frame.memory().slice(64, 2), &[0x22, 0x33]);

    // Reading past the end of return data is a hard halt.
    let mut code = Vec::new();
    push_call_operands(&mut code, Some(U256::ZERO));
    code.push(CALL);
    code.extend([PUSH1, 2, PUSH1, 31, PUSH1, 64, RETURNDATACOPY]);
    let (_, result) = run_parent(&mut host, code);
    assert_eq!(
        result,
        ExecutionResult::Halt { reason: HaltReason::OutOfBounds, gas_used: GAS_LIMIT }
    );
}

#[test]
fn staticcall_forces_the_child_static() {
    let mut host = MockHost::new(SpecId::CANCUN);
    // The child attempts LOG0 and dies with a static violation, eating its gas.
    host.set_code(CHILD, vec![PUSH1, 0, PUSH1, 0, LOG0]);

    let mut code = Vec::new();
    code.extend([PUSH1, 0, PUSH1, 0, PUSH1, 0, PUSH1, 0]);
    code.push(PUSH20);
    code.extend(CHILD.as_slice());
    push_word(&mut code, U256::from(60_000));
    code.extend([STATICCALL, STOP]);
    let (frame, result) = run_parent(&mut host, code);
    assert!(result.is_success());
    assert_eq!(frame.stack().peek(0), Ok(U256::ZERO), "child failed");
    assert!(host.logs().is_empty(), "no log escaped the static frame");
    // Parent paid pushes + cold access, and the whole 60000 forwarded gas burned.
    assert_eq!(result.gas_used(), 12 + 3 + 3 + 2600 + 60_000);
}

#[test]
fn staticcall_is_gated_at_byzantium() {
    let mut host = MockHost::new(SpecId::SPURIOUS_DRAGON);
    let code = vec![PUSH1, 0, PUSH1, 0, PUSH1, 0, PUSH1, 0, PUSH1, 0, PUSH1, 0, STATICCALL];
    let (_, result) = run_parent(&mut host, code);
    assert_eq!(
        result,
        ExecutionResult::Halt { reason: HaltReason::InvalidOpcode, gas_used: GAS_LIMIT }
    );
}

#[test]
fn call_with_value_inside_static_frame_violates() {
    let mut host = MockHost::new(SpecId::CANCUN);
    let mut code = Vec::new();
    push_call_operands(&mut code, Some(U256::from(1)));
    code.push(CALL);
    let spec = host.spec;
    let mut frame = Frame::new(
        FrameInputs {
            address: PARENT,
            bytecode: code.into(),
            gas_limit: GAS_LIMIT,
            is_static: true,
            ..Default::default()
        },
        spec,
    );
    let result = frame.run(&mut host);
    assert_eq!(
        result,
        ExecutionResult::Halt { reason: HaltReason::StaticCallViolation, gas_used: GAS_LIMIT }
    );
}

#[test]
fn delegatecall_keeps_context_and_apparent_value() {
    let mut host = MockHost::new(SpecId::CANCUN);
    // The library writes CALLER to slot 1 and CALLVALUE to slot 2 of *its caller's*
    // storage.
    let library = vec![CALLER, PUSH1, 1, SSTORE, CALLVALUE, PUSH1, 2, SSTORE, STOP];
    host.set_code(CHILD, library);

    let mut code = Vec::new();
    code.extend([PUSH1, 0, PUSH1, 0, PUSH1, 0, PUSH1, 0]);
    code.push(PUSH20);
    code.extend(CHILD.as_slice());
    push_word(&mut code, U256::from(200_000));
    code.push(DELEGATECALL);
    let spec = host.spec;
    let mut frame = Frame::new(
        FrameInputs {
            address: PARENT,
            caller: CALLER_ADDR,
            value: U256::from(77),
            bytecode: code.into(),
            gas_limit: GAS_LIMIT,
            ..Default::default()
        },
        spec,
    );
    let result = frame.run(&mut host);
    assert!(result.is_success());
    assert_eq!(frame.stack().peek(0), Ok(U256::from(1)));
    // Writes landed in PARENT's storage, observed caller is PARENT's caller and the
    // apparent value is PARENT's value.
    assert_eq!(
        host.sload(PARENT, U256::from(1)),
        <U256 as From<FixedBytes<32>>>::from(CALLER_ADDR.into_word())
    );
    assert_eq!(host.sload(PARENT, U256::from(2)), U256::from(77));
    assert_eq!(host.sload(CHILD, U256::from(1)), U256::ZERO);
}

#[test]
fn delegatecall_is_gated_at_homestead() {
    let mut host = MockHost::new(SpecId::FRONTIER);
    let code = vec![PUSH1, 0, PUSH1, 0, PUSH1, 0, PUSH1, 0, PUSH1, 0, PUSH1, 0, DELEGATECALL];
    let (_, result) = run_parent(&mut host, code);
    assert_eq!(
        result,
        ExecutionResult::Halt { reason: HaltReason::InvalidOpcode, gas_used: GAS_LIMIT }
    );
}

#[test]
fn callcode_runs_foreign_code_in_own_context() {
    let mut host = MockHost::new(SpecId::CANCUN);
    host.set_balance(PARENT, U256::from(50));
    // The callee writes 1 to its slot 3; under CALLCODE "its" storage is PARENT's.
    host.set_code(CHILD, vec![PUSH1, 1, PUSH1, 3, SSTORE, STOP]);

    let mut code = Vec::new();
    code.extend([PUSH1, 0, PUSH1, 0, PUSH1, 0, PUSH1, 0]);
    push_word(&mut code, U256::from(5)); // value transferred to self
    code.push(PUSH20);
    code.extend(CHILD.as_slice());
    push_word(&mut code, U256::from(200_000));
    code.push(CALLCODE);
    let (frame, result) = run_parent(&mut host, code);
    assert!(result.is_success());
    assert_eq!(frame.stack().peek(0), Ok(U256::from(1)));
    assert_eq!(host.sload(PARENT, U256::from(3)), U256::from(1));
    assert_eq!(host.sload(CHILD, U256::from(3)), U256::ZERO);
    // The self-transfer leaves the balance alone.
    assert_eq!(host.balance(PARENT), U256::from(50));
}

#[test]
fn child_gas_cap_property() {
    // Whatever the request, the child never gets more than 63/64 of what remains.
    let mut host = MockHost::new(SpecId::CANCUN);
    host.set_code(CHILD, gas_reporting_child());
    let mut code = Vec::new();
    push_call_operands(&mut code, Some(U256::ZERO));
    code.push(CALL);
    let (frame, _) = run_parent(&mut host, code);
    let reported = frame.memory().word(0).to::<u64>() + 2;
    let remaining_at_call = GAS_LIMIT - 21 - 2600 - 3;
    assert!(reported <= remaining_at_call - remaining_at_call / 64);
}
