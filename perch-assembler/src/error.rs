//! Assembler errors and per-line diagnostics

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssemblerError {
    #[error("Syntax error at line {line}: {text}")]
    Syntax { line: usize, text: String },

    #[error("Undefined label at line {line}: {label}")]
    UndefinedLabel { line: usize, label: String },

    #[error("Unknown opcode: {0}")]
    UnknownOpcode(String),

    #[error("Unknown predicate: {0}")]
    UnknownPredicate(String),

    #[error("Invalid register: {0}")]
    InvalidRegister(String),

    #[error("Too many errors: {count} (limit {limit})")]
    TooManyErrors { count: usize, limit: usize },
}

pub type Result<T> = std::result::Result<T, AssemblerError>;

/// One reported per-line error. A phase collects these and keeps
/// going; only crossing the error limit aborts the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based source line number
    pub line: usize,
    /// The offending line, verbatim
    pub text: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ({})", self.line, self.message, self.text)
    }
}
