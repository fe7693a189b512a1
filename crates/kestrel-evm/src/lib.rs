//! A hardfork-aware EVM bytecode interpreter.
//!
//! The crate implements the execution core of the EVM: a per-call [`Frame`] drives a
//! 256-entry dispatch table over an operand stack, linear memory and a gas meter,
//! while everything shared across calls — world state, access lists, logs, the
//! refund counter and the recursive call/create entry points — lives behind the
//! [`Host`] trait. Opcode availability and gas schedules are gated per [`SpecId`]
//! from Frontier through Cancun.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod constants;
pub mod opcode;

mod context;
pub use context::*;

mod gas;
pub use gas::Gas;

mod host;
pub use host::*;

pub mod instructions;
pub use instructions::Instruction;

mod interpreter;
pub use interpreter::{Frame, FrameInputs};

mod memory;
pub use memory::Memory;

mod result;
pub use result::*;

mod spec;
pub use spec::*;

mod stack;
pub use stack::Stack;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

#[cfg(test)]
mod tests;
