//! Opcode handlers and the 256-entry dispatch table.

use crate::{interpreter::Frame, opcode, Host, Interrupt};
use alloy_primitives::{Address, B256, U256};

pub(crate) mod arithmetic;
pub(crate) mod bitwise;
pub(crate) mod block_info;
pub(crate) mod contract;
pub(crate) mod control;
pub(crate) mod host;
pub(crate) mod memory;
pub(crate) mod stack;
pub(crate) mod system;
pub(crate) mod tx_info;

/// An opcode handler. Handlers own the full contract of one opcode: availability and
/// stack checks, gas accounting, state mutation and the program-counter advance.
pub type Instruction<H> = fn(&mut Frame, &mut H) -> Result<(), Interrupt>;

/// Truncates a word to its low 20 bytes, big-endian.
pub(crate) fn into_address(word: U256) -> Address {
    Address::from_word(B256::from(word))
}

/// Builds the dispatch table. Bytes without a handler fall through to
/// [`control::unknown`]; fork gating happens inside the individual handlers so a
/// single table serves every spec.
pub const fn instruction_table<H: Host + ?Sized>() -> [Instruction<H>; 256] {
    let mut table = [control::unknown as Instruction<H>; 256];

    table[opcode::STOP as usize] = control::stop;
    table[opcode::ADD as usize] = arithmetic::add;
    table[opcode::MUL as usize] = arithmetic::mul;
    table[opcode::SUB as usize] = arithmetic::sub;
    table[opcode::DIV as usize] = arithmetic::div;
    table[opcode::SDIV as usize] = arithmetic::sdiv;
    table[opcode::MOD as usize] = arithmetic::rem;
    table[opcode::SMOD as usize] = arithmetic::smod;
    table[opcode::ADDMOD as usize] = arithmetic::addmod;
    table[opcode::MULMOD as usize] = arithmetic::mulmod;
    table[opcode::EXP as usize] = arithmetic::exp;
    table[opcode::SIGNEXTEND as usize] = arithmetic::signextend;

    table[opcode::LT as usize] = bitwise::lt;
    table[opcode::GT as usize] = bitwise::gt;
    table[opcode::SLT as usize] = bitwise::slt;
    table[opcode::SGT as usize] = bitwise::sgt;
    table[opcode::EQ as usize] = bitwise::eq;
    table[opcode::ISZERO as usize] = bitwise::iszero;
    table[opcode::AND as usize] = bitwise::bitand;
    table[opcode::OR as usize] = bitwise::bitor;
    table[opcode::XOR as usize] = bitwise::bitxor;
    table[opcode::NOT as usize] = bitwise::not;
    table[opcode::BYTE as usize] = bitwise::byte;
    table[opcode::SHL as usize] = bitwise::shl;
    table[opcode::SHR as usize] = bitwise::shr;
    table[opcode::SAR as usize] = bitwise::sar;

    table[opcode::KECCAK256 as usize] = system::keccak256_op;

    table[opcode::ADDRESS as usize] = system::address;
    table[opcode::BALANCE as usize] = host::balance;
    table[opcode::ORIGIN as usize] = tx_info::origin;
    table[opcode::CALLER as usize] = system::caller;
    table[opcode::CALLVALUE as usize] = system::callvalue;
    table[opcode::CALLDATALOAD as usize] = system::calldataload;
    table[opcode::CALLDATASIZE as usize] = system::calldatasize;
    table[opcode::CALLDATACOPY as usize] = system::calldatacopy;
    table[opcode::CODESIZE as usize] = system::codesize;
    table[opcode::CODECOPY as usize] = system::codecopy;
    table[opcode::GASPRICE as usize] = tx_info::gasprice;
    table[opcode::EXTCODESIZE as usize] = host::extcodesize;
    table[opcode::EXTCODECOPY as usize] = host::extcodecopy;
    table[opcode::RETURNDATASIZE as usize] = system::returndatasize;
    table[opcode::RETURNDATACOPY as usize] = system::returndatacopy;
    table[opcode::EXTCODEHASH as usize] = host::extcodehash;

    table[opcode::BLOCKHASH as usize] = host::blockhash;
    table[opcode::COINBASE as usize] = block_info::coinbase;
    table[opcode::TIMESTAMP as usize] = block_info::timestamp;
    table[opcode::NUMBER as usize] = block_info::block_number;
    table[opcode::DIFFICULTY as usize] = block_info::difficulty;
    table[opcode::GASLIMIT as usize] = block_info::gaslimit;
    table[opcode::CHAINID as usize] = block_info::chainid;
    table[opcode::SELFBALANCE as usize] = host::selfbalance;
    table[opcode::BASEFEE as usize] = block_info::basefee;
    table[opcode::BLOBHASH as usize] = tx_info::blob_hash;
    table[opcode::BLOBBASEFEE as usize] = block_info::blob_basefee;

    table[opcode::POP as usize] = stack::pop;
    table[opcode::MLOAD as usize] = memory::mload;
    table[opcode::MSTORE as usize] = memory::mstore;
    table[opcode::MSTORE8 as usize] = memory::mstore8;
    table[opcode::SLOAD as usize] = host::sload;
    table[opcode::SSTORE as usize] = host::sstore;
    table[opcode::JUMP as usize] = control::jump;
    table[opcode::JUMPI as usize] = control::jumpi;
    table[opcode::PC as usize] = control::pc;
    table[opcode::MSIZE as usize] = memory::msize;
    table[opcode::GAS as usize] = system::gas;
    table[opcode::JUMPDEST as usize] = control::jumpdest;
    table[opcode::TLOAD as usize] = host::tload;
    table[opcode::TSTORE as usize] = host::tstore;
    table[opcode::MCOPY as usize] = memory::mcopy;

    table[opcode::PUSH0 as usize] = stack::push0;
    table[opcode::PUSH1 as usize] = stack::push::<1, H>;
    table[opcode::PUSH2 as usize] = stack::push::<2, H>;
    table[opcode::PUSH3 as usize] = stack::push::<3, H>;
    table[opcode::PUSH4 as usize] = stack::push::<4, H>;
    table[opcode::PUSH5 as usize] = stack::push::<5, H>;
    table[opcode::PUSH6 as usize] = stack::push::<6, H>;
    table[opcode::PUSH7 as usize] = stack::push::<7, H>;
    table[opcode::PUSH8 as usize] = stack::push::<8, H>;
    table[opcode::PUSH9 as usize] = stack::push::<9, H>;
    table[opcode::PUSH10 as usize] = stack::push::<10, H>;
    table[opcode::PUSH11 as usize] = stack::push::<11, H>;
    table[opcode::PUSH12 as usize] = stack::push::<12, H>;
    table[opcode::PUSH13 as usize] = stack::push::<13, H>;
    table[opcode::PUSH14 as usize] = stack::push::<14, H>;
    table[opcode::PUSH15 as usize] = stack::push::<15, H>;
    table[opcode::PUSH16 as usize] = stack::push::<16, H>;
    table[opcode::PUSH17 as usize] = stack::push::<17, H>;
    table[opcode::PUSH18 as usize] = stack::push::<18, H>;
    table[opcode::PUSH19 as usize] = stack::push::<19, H>;
    table[opcode::PUSH20 as usize] = stack::push::<20, H>;
    table[opcode::PUSH21 as usize] = stack::push::<21, H>;
    table[opcode::PUSH22 as usize] = stack::push::<22, H>;
    table[opcode::PUSH23 as usize] = stack::push::<23, H>;
    table[opcode::PUSH24 as usize] = stack::push::<24, H>;
    table[opcode::PUSH25 as usize] = stack::push::<25, H>;
    table[opcode::PUSH26 as usize] = stack::push::<26, H>;
    table[opcode::PUSH27 as usize] = stack::push::<27, H>;
    table[opcode::PUSH28 as usize] = stack::push::<28, H>;
    table[opcode::PUSH29 as usize] = stack::push::<29, H>;
    table[opcode::PUSH30 as usize] = stack::push::<30, H>;
    table[opcode::PUSH31 as usize] = stack::push::<31, H>;
    table[opcode::PUSH32 as usize] = stack::push::<32, H>;

    table[opcode::DUP1 as usize] = stack::dup::<1, H>;
    table[opcode::DUP2 as usize] = stack::dup::<2, H>;
    table[opcode::DUP3 as usize] = stack::dup::<3, H>;
    table[opcode::DUP4 as usize] = stack::dup::<4, H>;
    table[opcode::DUP5 as usize] = stack::dup::<5, H>;
    table[opcode::DUP6 as usize] = stack::dup::<6, H>;
    table[opcode::DUP7 as usize] = stack::dup::<7, H>;
    table[opcode::DUP8 as usize] = stack::dup::<8, H>;
    table[opcode::DUP9 as usize] = stack::dup::<9, H>;
    table[opcode::DUP10 as usize] = stack::dup::<10, H>;
    table[opcode::DUP11 as usize] = stack::dup::<11, H>;
    table[opcode::DUP12 as usize] = stack::dup::<12, H>;
    table[opcode::DUP13 as usize] = stack::dup::<13, H>;
    table[opcode::DUP14 as usize] = stack::dup::<14, H>;
    table[opcode::DUP15 as usize] = stack::dup::<15, H>;
    table[opcode::DUP16 as usize] = stack::dup::<16, H>;

    table[opcode::SWAP1 as usize] = stack::swap::<1, H>;
    table[opcode::SWAP2 as usize] = stack::swap::<2, H>;
    table[opcode::SWAP3 as usize] = stack::swap::<3, H>;
    table[opcode::SWAP4 as usize] = stack::swap::<4, H>;
    table[opcode::SWAP5 as usize] = stack::swap::<5, H>;
    table[opcode::SWAP6 as usize] = stack::swap::<6, H>;
    table[opcode::SWAP7 as usize] = stack::swap::<7, H>;
    table[opcode::SWAP8 as usize] = stack::swap::<8, H>;
    table[opcode::SWAP9 as usize] = stack::swap::<9, H>;
    table[opcode::SWAP10 as usize] = stack::swap::<10, H>;
    table[opcode::SWAP11 as usize] = stack::swap::<11, H>;
    table[opcode::SWAP12 as usize] = stack::swap::<12, H>;
    table[opcode::SWAP13 as usize] = stack::swap::<13, H>;
    table[opcode::SWAP14 as usize] = stack::swap::<14, H>;
    table[opcode::SWAP15 as usize] = stack::swap::<15, H>;
    table[opcode::SWAP16 as usize] = stack::swap::<16, H>;

    table[opcode::LOG0 as usize] = host::log::<0, H>;
    table[opcode::LOG1 as usize] = host::log::<1, H>;
    table[opcode::LOG2 as usize] = host::log::<2, H>;
    table[opcode::LOG3 as usize] = host::log::<3, H>;
    table[opcode::LOG4 as usize] = host::log::<4, H>;

    table[opcode::CREATE as usize] = contract::create::<false, H>;
    table[opcode::CALL as usize] = contract::call;
    table[opcode::CALLCODE as usize] = contract::call_code;
    table[opcode::RETURN as usize] = control::ret;
    table[opcode::DELEGATECALL as usize] = contract::delegate_call;
    table[opcode::CREATE2 as usize] = contract::create::<true, H>;
    table[opcode::STATICCALL as usize] = contract::static_call;
    table[opcode::REVERT as usize] = control::revert;
    table[opcode::INVALID as usize] = control::invalid;
    table[opcode::SELFDESTRUCT as usize] = host::selfdestruct;

    table
}
