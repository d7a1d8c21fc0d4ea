//! Arithmetic logic unit.
//!
//! The ALU applies one function selected by opcode and reports a
//! condition flag derived from the numeric result. It holds no state
//! and never touches registers or memory; for LOAD and STORE it merely
//! performs the address calculation.

use perch_spec::{CondFlag, OpCode};

/// Execute one ALU operation.
///
/// Any arithmetic fault (division by zero, 32-bit overflow) is confined
/// here and reported as `(0, V)` rather than propagated. Otherwise the
/// flag reflects the result: zero -> Z, negative -> M, positive -> P,
/// uniformly for every opcode including address computations.
pub fn exec(op: OpCode, in1: i32, in2: i32) -> (i32, CondFlag) {
    let result = match op {
        OpCode::Add | OpCode::Load | OpCode::Store => in1.checked_add(in2),
        OpCode::Sub => in1.checked_sub(in2),
        OpCode::Mul => in1.checked_mul(in2),
        OpCode::Div => floor_div(in1, in2),
        OpCode::Halt => Some(0),
    };
    match result {
        None => (0, CondFlag::V),
        Some(0) => (0, CondFlag::Z),
        Some(v) if v < 0 => (v, CondFlag::M),
        Some(v) => (v, CondFlag::P),
    }
}

/// Integer division rounding toward negative infinity.
///
/// `div_euclid` rounds differently for negative divisors, so the
/// quotient is corrected by hand when the remainder and divisor
/// disagree in sign.
fn floor_div(a: i32, b: i32) -> Option<i32> {
    if b == 0 {
        return None;
    }
    let q = a.checked_div(b)?;
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) {
        Some(q - 1)
    } else {
        Some(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() {
        assert_eq!(exec(OpCode::Add, 5, 3), (8, CondFlag::P));
        assert_eq!(exec(OpCode::Add, -5, 3), (-2, CondFlag::M));
        assert_eq!(exec(OpCode::Add, -10, 10), (0, CondFlag::Z));
    }

    #[test]
    fn test_sub() {
        assert_eq!(exec(OpCode::Sub, 5, 3), (2, CondFlag::P));
        assert_eq!(exec(OpCode::Sub, 3, 5), (-2, CondFlag::M));
        assert_eq!(exec(OpCode::Sub, 3, 3), (0, CondFlag::Z));
    }

    #[test]
    fn test_mul() {
        assert_eq!(exec(OpCode::Mul, 3, 5), (15, CondFlag::P));
        assert_eq!(exec(OpCode::Mul, -3, 5), (-15, CondFlag::M));
        assert_eq!(exec(OpCode::Mul, 0, 22), (0, CondFlag::Z));
    }

    #[test]
    fn test_div_rounds_toward_negative_infinity() {
        assert_eq!(exec(OpCode::Div, 5, 3), (1, CondFlag::P));
        assert_eq!(exec(OpCode::Div, 12, -3), (-4, CondFlag::M));
        assert_eq!(exec(OpCode::Div, 3, 4), (0, CondFlag::Z));
        assert_eq!(exec(OpCode::Div, -7, 2), (-4, CondFlag::M));
        assert_eq!(exec(OpCode::Div, -7, -2), (3, CondFlag::P));
    }

    #[test]
    fn test_div_by_zero_is_overflow() {
        assert_eq!(exec(OpCode::Div, 12, 0), (0, CondFlag::V));
    }

    #[test]
    fn test_overflow_is_confined() {
        assert_eq!(exec(OpCode::Add, i32::MAX, 1), (0, CondFlag::V));
        assert_eq!(exec(OpCode::Mul, i32::MAX, 2), (0, CondFlag::V));
        assert_eq!(exec(OpCode::Div, i32::MIN, -1), (0, CondFlag::V));
    }

    #[test]
    fn test_memory_ops_compute_addresses() {
        assert_eq!(exec(OpCode::Load, 12, 13), (25, CondFlag::P));
        assert_eq!(exec(OpCode::Store, 27, 13), (40, CondFlag::P));
    }

    #[test]
    fn test_halt_is_constant_zero() {
        assert_eq!(exec(OpCode::Halt, 99, 98), (0, CondFlag::Z));
    }
}
