//! Instruction format for the Perch-32.
//!
//! Instruction words are unsigned 32-bit integers with the following
//! fields, from high-order to low-order bits. All fields are unsigned
//! except `offset`, which is a signed value in -2^9 .. 2^9 - 1.
//!
//! ```text
//! [reserved:1][op:5][cond:4][target:4][src1:4][src2:4][offset:10]
//!  bit 31      26-30 22-25   18-21     14-17   10-13   0-9
//! ```
//!
//! In memory an instruction is just a word; before execution it is
//! decoded into an [`Instruction`] so its fields can be interpreted.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bitfield::BitField;
use crate::cond::CondFlag;
use crate::error::SpecError;
use crate::opcode::OpCode;
use crate::register::Reg;
use crate::Word;

/// Reserved bit: must encode as zero, silently dropped on decode
const RESERVED_FIELD: BitField = BitField::new(31, 31);
const OP_FIELD: BitField = BitField::new(26, 30);
const COND_FIELD: BitField = BitField::new(22, 25);
const TARGET_FIELD: BitField = BitField::new(18, 21);
const SRC1_FIELD: BitField = BitField::new(14, 17);
const SRC2_FIELD: BitField = BitField::new(10, 13);
const OFFSET_FIELD: BitField = BitField::new(0, 9);

/// Offset field width in bits (10-bit signed displacement)
pub const OFFSET_BITS: u32 = 10;

/// A decoded Perch-32 instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub op: OpCode,
    pub cond: CondFlag,
    pub target: Reg,
    pub src1: Reg,
    pub src2: Reg,
    /// Signed displacement added to src2 during operand formation
    pub offset: i32,
}

impl Instruction {
    pub fn new(
        op: OpCode,
        cond: CondFlag,
        target: Reg,
        src1: Reg,
        src2: Reg,
        offset: i32,
    ) -> Self {
        Self {
            op,
            cond,
            target,
            src1,
            src2,
            offset,
        }
    }

    /// Pack this instruction into a memory word.
    ///
    /// Each field is inserted independently through its bit field, so an
    /// out-of-range offset wraps to the low ten bits rather than being
    /// rejected. The reserved bit encodes as zero.
    pub fn encode(&self) -> Word {
        let mut word = 0;
        word = OP_FIELD.insert(self.op.code() as i32, word);
        word = COND_FIELD.insert(self.cond.value() as i32, word);
        word = TARGET_FIELD.insert(self.target.index() as i32, word);
        word = SRC1_FIELD.insert(self.src1.index() as i32, word);
        word = SRC2_FIELD.insert(self.src2.index() as i32, word);
        word = OFFSET_FIELD.insert(self.offset, word);
        word
    }
}

/// Decode a memory word into an [`Instruction`].
///
/// A nonzero reserved bit is dropped silently. The only failure is an
/// opcode value with no assigned operation.
pub fn decode(word: Word) -> Result<Instruction, SpecError> {
    let _ = RESERVED_FIELD.extract(word);
    let op_value = OP_FIELD.extract(word);
    let op = OpCode::from_code(op_value).ok_or(SpecError::InvalidOpcode(op_value))?;
    let cond = CondFlag::from_value(COND_FIELD.extract(word));
    // Register fields are 4 bits wide, so the index is always in range
    let target = Reg::new(TARGET_FIELD.extract(word) as u8)
        .ok_or(SpecError::InvalidRegister(TARGET_FIELD.extract(word) as u8))?;
    let src1 = Reg::new(SRC1_FIELD.extract(word) as u8)
        .ok_or(SpecError::InvalidRegister(SRC1_FIELD.extract(word) as u8))?;
    let src2 = Reg::new(SRC2_FIELD.extract(word) as u8)
        .ok_or(SpecError::InvalidRegister(SRC2_FIELD.extract(word) as u8))?;
    let offset = OFFSET_FIELD.extract_signed(word);

    Ok(Instruction {
        op,
        cond,
        target,
        src1,
        src2,
        offset,
    })
}

impl fmt::Display for Instruction {
    /// Canonical assembly rendering, re-parseable by the assembler:
    /// `OPCODE[/PRED]   rT,rS1,rS2[OFFSET]`. The predicate is omitted
    /// exactly when it is ALWAYS. Spacing is part of the round-trip
    /// contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pred = if self.cond == CondFlag::ALWAYS {
            String::new()
        } else {
            format!("/{}", self.cond)
        };
        write!(
            f,
            "{}{}   {},{},{}[{}]",
            self.op, pred, self.target, self.src1, self.src2, self.offset
        )
    }
}
