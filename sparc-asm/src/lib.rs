#![warn(missing_docs)]
//! Atomic types of the SPARC-V8 simulator: instruction word decoding,
//! opcode representation, integer condition encodings and trap reasons.

mod cond;
mod instruction;
mod opcode;
mod trap;

pub mod op;

pub use cond::{Cond, Icc};
pub use instruction::Instruction;
pub use opcode::OpcodeRepr;
pub use trap::TrapReason;

/// Architected word of the 32-bit integer unit.
pub type Word = u32;

/// Index of a register in the visible window, `0..32`.
pub type RegisterId = usize;

/// Sign-extended 13-bit immediate of format-3 instructions.
pub type Immediate13 = i32;

/// Zero-extended 22-bit immediate of `SETHI` and `UNIMP`.
pub type Immediate22 = u32;
