//! Phase 1 — label resolution
//!
//! Pass A walks the source assigning one address per non-comment line
//! and records label definitions. Pass B rewrites MEMOP and JUMP lines
//! into fully-resolved form, leaving everything else untouched; the two
//! phases communicate only through this textual intermediate form.

use std::collections::HashMap;

use perch_spec::{Address, CondFlag};

use crate::error::{AssemblerError, Diagnostic, Result};
use crate::parser::{parse_line, JumpInstr, LineKind, MemOpInstr, SourceLine};

#[derive(Debug, Clone)]
pub struct Phase1Config {
    /// Run aborts once the diagnostic count exceeds this
    pub error_limit: usize,
}

impl Default for Phase1Config {
    fn default() -> Self {
        Self { error_limit: 10 }
    }
}

#[derive(Debug)]
pub struct Phase1Output {
    /// Lowered source, one entry per surviving input line
    pub lines: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolve labels and lower MEMOP/JUMP lines.
pub fn resolve(source: &str, config: &Phase1Config) -> Result<Phase1Output> {
    let labels = build_table(source);
    transform(source, &labels, config)
}

/// Pass A: label -> address. Later duplicate definitions silently
/// shadow earlier ones. Unparseable lines are skipped here and
/// reported by pass B.
fn build_table(source: &str) -> HashMap<String, Address> {
    let mut labels = HashMap::new();
    let mut address: Address = 0;
    for (idx, raw) in source.lines().enumerate() {
        let Ok(line) = parse_line(raw, idx + 1) else {
            continue;
        };
        if let Some(name) = &line.label {
            labels.insert(name.clone(), address);
        }
        if line.consumes_address() {
            address += 1;
        }
    }
    labels
}

/// Pass B: FULL/DATA/COMMENT pass through verbatim; MEMOP/JUMP are
/// rewritten against the label table.
fn transform(
    source: &str,
    labels: &HashMap<String, Address>,
    config: &Phase1Config,
) -> Result<Phase1Output> {
    let mut lines = Vec::new();
    let mut diagnostics = Vec::new();
    let mut address: Address = 0;

    for (idx, raw) in source.lines().enumerate() {
        let line_num = idx + 1;
        let line = match parse_line(raw, line_num) {
            Ok(line) => line,
            Err(error) => {
                report(&mut diagnostics, line_num, raw, error, config)?;
                continue;
            }
        };
        match &line.kind {
            LineKind::Comment => lines.push(raw.to_string()),
            LineKind::Full(_) | LineKind::Data(_) => {
                lines.push(raw.to_string());
                address += 1;
            }
            LineKind::MemOp(memop) => match labels.get(&memop.label) {
                Some(&target) => {
                    lines.push(lower_memop(&line, memop, target, address));
                    address += 1;
                }
                None => {
                    let error = AssemblerError::UndefinedLabel {
                        line: line_num,
                        label: memop.label.clone(),
                    };
                    report(&mut diagnostics, line_num, raw, error, config)?;
                    // Pass A counted this line, so it still occupies
                    // its address: later displacements must stay in
                    // the label table's frame
                    address += 1;
                }
            },
            LineKind::Jump(jump) => match labels.get(&jump.label) {
                Some(&target) => {
                    lines.push(lower_jump(&line, jump, target, address));
                    address += 1;
                }
                None => {
                    let error = AssemblerError::UndefinedLabel {
                        line: line_num,
                        label: jump.label.clone(),
                    };
                    report(&mut diagnostics, line_num, raw, error, config)?;
                    address += 1;
                }
            },
        }
    }

    Ok(Phase1Output { lines, diagnostics })
}

fn report(
    diagnostics: &mut Vec<Diagnostic>,
    line: usize,
    text: &str,
    error: AssemblerError,
    config: &Phase1Config,
) -> Result<()> {
    tracing::warn!(line, %error, "phase 1");
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

/// Displacement is relative to the referencing instruction's own
/// address; the CPU's operand read sees pc still at that address.
fn displacement(target: Address, current: Address) -> i64 {
    target as i64 - current as i64
}

fn label_part(line: &SourceLine) -> String {
    match &line.label {
        Some(name) => format!("{name}: "),
        None => String::new(),
    }
}

fn pred_part(pred: Option<CondFlag>) -> String {
    match pred {
        Some(pred) => format!("/{pred}"),
        None => String::new(),
    }
}

fn comment_part(line: &SourceLine) -> String {
    match &line.comment {
        Some(text) => format!("  {text}"),
        None => String::new(),
    }
}

/// `opcode[/pred] target,label` -> `opcode[/pred] target,r0,r15[disp]`
/// with the label reference preserved as a trailing comment
fn lower_memop(line: &SourceLine, memop: &MemOpInstr, target: Address, current: Address) -> String {
    format!(
        "{}{}{} {},r0,r15[{}] #{}{}",
        label_part(line),
        memop.op,
        pred_part(memop.pred),
        memop.target,
        displacement(target, current),
        memop.label,
        comment_part(line),
    )
}

/// `JUMP[/pred] label` -> `ADD[/pred] r15,r0,r15[disp]` — jump realized
/// as a pc-relative add
fn lower_jump(line: &SourceLine, jump: &JumpInstr, target: Address, current: Address) -> String {
    format!(
        "{}ADD{} r15,r0,r15[{}] #{}{}",
        label_part(line),
        pred_part(jump.pred),
        displacement(target, current),
        jump.label,
        comment_part(line),
    )
}
