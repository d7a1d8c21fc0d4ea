//! Condition flags and predication masks.
//!
//! The condition mask in an instruction and the CPU's condition code
//! register share the same 4-bit format, so predication is a bitwise
//! AND: an instruction executes iff the intersection is nonempty.

use crate::error::SpecError;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

bitflags! {
    /// Condition flag set  M/Z/P/V
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CondFlag: u8 {
        /// Minus (negative result)
        const M = 1;
        /// Zero result
        const Z = 2;
        /// Positive result
        const P = 4;
        /// Overflow (arithmetic fault, e.g. divide by zero)
        const V = 8;
    }
}

impl CondFlag {
    /// Predicate that never fires
    pub const NEVER: CondFlag = CondFlag::empty();
    /// Predicate that always fires
    pub const ALWAYS: CondFlag = CondFlag::all();

    /// Single-letter flags in display order
    const LETTERS: [(CondFlag, char); 4] = [
        (CondFlag::M, 'M'),
        (CondFlag::Z, 'Z'),
        (CondFlag::P, 'P'),
        (CondFlag::V, 'V'),
    ];

    /// Flag bits as stored in the instruction word
    #[inline]
    pub const fn value(self) -> u32 {
        self.bits() as u32
    }

    /// Reconstruct from the 4-bit instruction field. Every 4-bit value
    /// is a valid combination.
    #[inline]
    pub const fn from_value(value: u32) -> CondFlag {
        CondFlag::from_bits_truncate(value as u8)
    }
}

impl fmt::Display for CondFlag {
    /// Exact named combinations render by name; anything else renders
    /// as its letters concatenated in M, Z, P, V order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == CondFlag::ALWAYS {
            return f.write_str("ALWAYS");
        }
        if *self == CondFlag::NEVER {
            return f.write_str("NEVER");
        }
        for (flag, letter) in CondFlag::LETTERS {
            if self.contains(flag) {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for CondFlag {
    type Err = SpecError;

    /// Parse a predicate mnemonic: an exact named value, or any
    /// combination of the letters M, Z, P, V.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALWAYS" => return Ok(CondFlag::ALWAYS),
            "NEVER" => return Ok(CondFlag::NEVER),
            _ => {}
        }
        let mut composite = CondFlag::NEVER;
        for c in s.chars() {
            let flag = CondFlag::LETTERS
                .iter()
                .find(|(_, letter)| *letter == c)
                .map(|(flag, _)| *flag)
                .ok_or_else(|| SpecError::UnknownMnemonic(s.to_string()))?;
            composite |= flag;
        }
        Ok(composite)
    }
}
