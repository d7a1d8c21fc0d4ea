//! # Perch-32 Specification
//!
//! Instruction set definition for the Perch-32, a small predicated
//! register machine.
//!
//! ## Key Features
//! - 32-bit instruction words (bit 31 reserved, always 0)
//! - 16 registers; r0 hardwired to zero, r15 is the program counter
//! - Every instruction predicated on a 4-bit condition mask (M/Z/P/V)
//! - Uniform three-register format with a 10-bit signed offset
//! - Word-addressed flat memory; a word is an instruction or data
//!   depending only on context

pub mod bitfield;
pub mod cond;
pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;
pub mod register;

pub use bitfield::BitField;
pub use cond::CondFlag;
pub use error::SpecError;
pub use instruction::{decode, Instruction};
pub use opcode::OpCode;
pub use program::Program;
pub use register::Reg;

/// Number of registers
pub const NUM_REGISTERS: usize = 16;

/// Register index holding the program counter
pub const PC_INDEX: u8 = 15;

/// Machine word (instruction or data)
pub type Word = u32;

/// Word address
pub type Address = u32;
