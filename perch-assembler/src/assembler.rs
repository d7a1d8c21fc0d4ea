//! Main assembler pipeline

use perch_spec::Program;

use crate::encoder::{encode, Phase2Config};
use crate::error::Result;
use crate::resolver::{resolve, Phase1Config};

/// Assemble source through both phases with default configurations.
///
/// Per-line errors are tolerated up to each phase's limit: diagnostics
/// are logged and the producible part of the program is still emitted.
/// Only crossing an error limit fails the whole run.
pub fn assemble(source: &str) -> Result<Program> {
    let phase1 = resolve(source, &Phase1Config::default())?;
    for diagnostic in &phase1.diagnostics {
        tracing::warn!(%diagnostic, "phase 1 diagnostic");
    }

    let resolved = phase1.lines.join("\n");
    let phase2 = encode(&resolved, &Phase2Config::default())?;
    for diagnostic in &phase2.diagnostics {
        tracing::warn!(%diagnostic, "phase 2 diagnostic");
    }

    Ok(Program::new(phase2.words))
}
