//! Register file.
//!
//! Slot 0 is a distinct variant chosen at construction: it reads zero
//! and silently ignores writes. Slot 15 doubles as the program counter.

use perch_spec::{Reg, Word, NUM_REGISTERS, PC_INDEX};

/// One register cell
#[derive(Debug, Clone, Copy)]
enum Register {
    /// Hardwired zero: reads 0, ignores writes
    Zero,
    /// Ordinary mutable cell
    Cell(Word),
}

impl Register {
    #[inline]
    fn get(self) -> Word {
        match self {
            Register::Zero => 0,
            Register::Cell(value) => value,
        }
    }

    #[inline]
    fn put(&mut self, value: Word) {
        if let Register::Cell(slot) = self {
            *slot = value;
        }
    }
}

/// The 16-slot register file
#[derive(Debug, Clone)]
pub struct RegisterFile {
    regs: [Register; NUM_REGISTERS],
}

impl RegisterFile {
    pub fn new() -> Self {
        let mut regs = [Register::Cell(0); NUM_REGISTERS];
        regs[0] = Register::Zero;
        Self { regs }
    }

    #[inline]
    pub fn get(&self, reg: Reg) -> Word {
        self.regs[reg.index()].get()
    }

    /// Write a register. Writes to r0 are no-ops.
    #[inline]
    pub fn put(&mut self, reg: Reg, value: Word) {
        self.regs[reg.index()].put(value);
    }

    /// The program counter (alias of r15)
    #[inline]
    pub fn pc(&self) -> Word {
        self.regs[PC_INDEX as usize].get()
    }

    #[inline]
    pub fn set_pc(&mut self, value: Word) {
        self.regs[PC_INDEX as usize].put(value);
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
