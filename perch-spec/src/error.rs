//! Error types for the Perch-32 specification crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("Invalid opcode value: {0:#04x}")]
    InvalidOpcode(u32),

    #[error("Invalid register index: {0} (valid range: 0-15)")]
    InvalidRegister(u8),

    #[error("Unknown mnemonic: {0}")]
    UnknownMnemonic(String),

    #[error("Bad object line {line}: {text:?}")]
    BadObjectLine { line: usize, text: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = SpecError::InvalidOpcode(4);
        assert_eq!(err.to_string(), "Invalid opcode value: 0x04");

        let err = SpecError::InvalidRegister(16);
        assert_eq!(
            err.to_string(),
            "Invalid register index: 16 (valid range: 0-15)"
        );
    }
}
