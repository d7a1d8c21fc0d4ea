//! Register names for the Perch-32.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::NUM_REGISTERS;

/// Register number (r0-r15)
///
/// r0 always reads zero and ignores writes; r15 holds the program
/// counter. Those behaviors live in the runtime's register file; here a
/// `Reg` is only a validated index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reg(u8);

impl Reg {
    /// r0 - hardwired zero
    pub const ZERO: Reg = Reg(0);
    /// r15 - program counter
    pub const PC: Reg = Reg(15);

    /// Validated constructor; `None` for indices above 15.
    #[inline]
    pub const fn new(index: u8) -> Option<Reg> {
        if (index as usize) < NUM_REGISTERS {
            Some(Reg(index))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }


    /// Parse a register name: `r0`..`r15`, or the aliases `zero` (r0)
    /// and `pc` (r15).
    pub fn from_name(name: &str) -> Option<Reg> {
        match name {
            "zero" => return Some(Reg::ZERO),
            "pc" => return Some(Reg::PC),
            _ => {}
        }
        let digits = name.strip_prefix('r')?;
        // Reject forms like "r01" so register names stay canonical
        if digits.len() > 1 && digits.starts_with('0') {
            return None;
        }
        let index: u8 = digits.parse().ok()?;
        Reg::new(index)
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}
