//! Operation codes for the Perch-32.
//!
//! The opcode field is 5 bits, but only the codes below are assigned.
//! Code 4 is unassigned and decodes as an invalid instruction.

use crate::error::SpecError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Instruction opcode
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpCode {
    // ========== CPU control and memory ==========
    /// HALT: stop the machine
    Halt = 0,
    /// LOAD: target = memory[src1 + src2 + offset]
    Load = 1,
    /// STORE: memory[src1 + src2 + offset] = target
    Store = 2,

    // ========== ALU operations ==========
    /// ADD: target = src1 + (src2 + offset)
    Add = 3,
    /// SUB: target = src1 - (src2 + offset)
    Sub = 5,
    /// MUL: target = src1 * (src2 + offset)
    Mul = 6,
    /// DIV: target = src1 / (src2 + offset), rounding toward -infinity
    Div = 7,
}

impl OpCode {
    /// All assigned opcodes
    pub const ALL: [OpCode; 7] = [
        OpCode::Halt,
        OpCode::Load,
        OpCode::Store,
        OpCode::Add,
        OpCode::Sub,
        OpCode::Mul,
        OpCode::Div,
    ];

    /// Numeric code as stored in the instruction word
    #[inline]
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Look up an opcode by its numeric code
    pub const fn from_code(code: u32) -> Option<OpCode> {
        match code {
            0 => Some(OpCode::Halt),
            1 => Some(OpCode::Load),
            2 => Some(OpCode::Store),
            3 => Some(OpCode::Add),
            5 => Some(OpCode::Sub),
            6 => Some(OpCode::Mul),
            7 => Some(OpCode::Div),
            _ => None,
        }
    }

    /// Assembly mnemonic
    pub const fn name(self) -> &'static str {
        match self {
            OpCode::Halt => "HALT",
            OpCode::Load => "LOAD",
            OpCode::Store => "STORE",
            OpCode::Add => "ADD",
            OpCode::Sub => "SUB",
            OpCode::Mul => "MUL",
            OpCode::Div => "DIV",
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OpCode {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HALT" => Ok(OpCode::Halt),
            "LOAD" => Ok(OpCode::Load),
            "STORE" => Ok(OpCode::Store),
            "ADD" => Ok(OpCode::Add),
            "SUB" => Ok(OpCode::Sub),
            "MUL" => Ok(OpCode::Mul),
            "DIV" => Ok(OpCode::Div),
            _ => Err(SpecError::UnknownMnemonic(s.to_string())),
        }
    }
}
