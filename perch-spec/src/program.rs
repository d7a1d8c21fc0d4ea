//! Object program container and the textual object format.
//!
//! An object file is one decimal integer per line, in address order; the
//! loader places word `i` at address `i`. A word is an instruction or a
//! data value depending only on how the CPU reaches it.

use crate::error::SpecError;
use crate::Word;
use serde::{Deserialize, Serialize};

/// An assembled program: a flat word stream starting at address 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub words: Vec<Word>,
}

impl Program {
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Render the object text: one decimal word per line.
    pub fn to_object_text(&self) -> String {
        let mut out = String::new();
        for word in &self.words {
            out.push_str(&word.to_string());
            out.push('\n');
        }
        out
    }

    /// Parse object text. Blank lines are ignored; anything that is not
    /// an integer is an error. Negative renderings are accepted and
    /// truncated to 32 bits.
    pub fn from_object_text(text: &str) -> Result<Self, SpecError> {
        let mut words = Vec::new();
        for (lnum, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let value: i64 = line.parse().map_err(|_| SpecError::BadObjectLine {
                line: lnum + 1,
                text: line.to_string(),
            })?;
            words.push(value as Word);
        }
        Ok(Self { words })
    }
}
