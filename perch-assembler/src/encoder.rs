//! Phase 2 — instruction encoding
//!
//! Takes fully-resolved source (phase 1 output) and emits object words.
//! MEMOP and JUMP lines are not accepted here; they should already have
//! been lowered.

use perch_spec::{CondFlag, Instruction, Word};

use crate::error::{AssemblerError, Diagnostic, Result};
use crate::parser::{parse_line, FullInstr, LineKind};

#[derive(Debug, Clone)]
pub struct Phase2Config {
    /// Run aborts once the diagnostic count exceeds this
    pub error_limit: usize,
}

impl Default for Phase2Config {
    fn default() -> Self {
        Self { error_limit: 15 }
    }
}

#[derive(Debug)]
pub struct Phase2Output {
    /// Object words in address order
    pub words: Vec<Word>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Encode a fully-resolved instruction; predicate defaults to ALWAYS
/// and offset to 0
pub fn encode_full(full: &FullInstr) -> Word {
    Instruction::new(
        full.op,
        full.pred.unwrap_or(CondFlag::ALWAYS),
        full.target,
        full.src1,
        full.src2,
        full.offset.unwrap_or(0),
    )
    .encode()
}

/// Encode resolved source into object words.
pub fn encode(source: &str, config: &Phase2Config) -> Result<Phase2Output> {
    let mut words = Vec::new();
    let mut diagnostics = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line_num = idx + 1;
        let kind = match parse_line(raw, line_num) {
            Ok(line) => line.kind,
            Err(error) => {
                report(&mut diagnostics, line_num, raw, error, config)?;
                continue;
            }
        };
        match kind {
            LineKind::Comment => {}
            LineKind::Full(full) => words.push(encode_full(&full)),
            LineKind::Data(value) => words.push(value.unwrap_or(0)),
            LineKind::MemOp(_) | LineKind::Jump(_) => {
                // Unresolved label reference reaching this phase
                let error = AssemblerError::Syntax {
                    line: line_num,
                    text: raw.trim().to_string(),
                };
                report(&mut diagnostics, line_num, raw, error, config)?;
            }
        }
    }

    Ok(Phase2Output { words, diagnostics })
}

fn report(
    diagnostics: &mut Vec<Diagnostic>,
    line: usize,
    text: &str,
    error: AssemblerError,
    config: &Phase2Config,
) -> Result<()> {
    tracing::warn!(line, %error, "phase 2");
    diagnostics.push(Diagnostic {
        line,
        text: text.trim().to_string(),
        message: error.to_string(),
    });
    if diagnostics.len() > config.error_limit {
        return Err(AssemblerError::TooManyErrors {
            count: diagnostics.len(),
            limit: config.error_limit,
        });
    }
    Ok(())
}
