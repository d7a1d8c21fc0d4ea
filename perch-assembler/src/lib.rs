//! # Perch-32 Assembler
//!
//! Two-phase assembler for Perch-32 assembly language.
//!
//! Phase 1 resolves labels: every `MEMOP target,label` and
//! `JUMP label` line is rewritten into a fully-resolved pc-relative
//! instruction. Phase 2 encodes the resolved text into object words.
//! The phases communicate only through the textual intermediate form,
//! so either can be run on its own.
//!
//! ## Example
//!
//! ```rust
//! use perch_assembler::assemble;
//!
//! let source = r#"
//!     ADD r1,r0,r0[5]
//!     HALT r0,r0,r0
//! "#;
//!
//! let program = assemble(source).unwrap();
//! assert_eq!(program.len(), 2);
//! ```

pub mod assembler;
pub mod encoder;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod resolver;

pub use assembler::assemble;
pub use encoder::{encode, Phase2Config, Phase2Output};
pub use error::{AssemblerError, Diagnostic, Result};
pub use parser::{parse_line, LineKind, SourceLine};
pub use resolver::{resolve, Phase1Config, Phase1Output};
