//! Assembly line grammar
//!
//! Each line is classified into exactly one kind by an ordered matcher
//! list (FULL, DATA, COMMENT, MEMOP, JUMP), first match wins. A line
//! that matches no pattern is a syntax error. A line that matches a
//! pattern structurally but names an unknown opcode, predicate, or
//! register fails with the specific mnemonic error instead.

use perch_spec::{CondFlag, OpCode, Reg, Word};

use crate::error::{AssemblerError, Result};
use crate::lexer::{tokenize, Token};

/// Fully-resolved instruction line
#[derive(Debug, Clone, PartialEq)]
pub struct FullInstr {
    pub op: OpCode,
    /// Absent predicate defaults to ALWAYS at encode time
    pub pred: Option<CondFlag>,
    pub target: Reg,
    pub src1: Reg,
    pub src2: Reg,
    /// Absent offset defaults to 0 at encode time
    pub offset: Option<i32>,
}

/// Memory instruction with a label standing in for src2/offset
#[derive(Debug, Clone, PartialEq)]
pub struct MemOpInstr {
    pub op: OpCode,
    pub pred: Option<CondFlag>,
    pub target: Reg,
    pub label: String,
}

/// Register-free `JUMP[/pred] label`
#[derive(Debug, Clone, PartialEq)]
pub struct JumpInstr {
    pub pred: Option<CondFlag>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    /// Blank, label-only, or comment-only line; consumes no address
    Comment,
    Full(FullInstr),
    /// `DATA [value]`, value defaults to 0
    Data(Option<Word>),
    MemOp(MemOpInstr),
    Jump(JumpInstr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceLine {
    pub label: Option<String>,
    /// Trailing comment text, `#`/`;` included
    pub comment: Option<String>,
    pub kind: LineKind,
}

impl SourceLine {
    /// Whether this line occupies an address in the assembled program
    pub fn consumes_address(&self) -> bool {
        !matches!(self.kind, LineKind::Comment)
    }
}

/// Parse one source line. `line_num` is 1-based, for diagnostics.
pub fn parse_line(line: &str, line_num: usize) -> Result<SourceLine> {
    let syntax_error = || AssemblerError::Syntax {
        line: line_num,
        text: line.trim().to_string(),
    };

    let mut tokens = tokenize(line).ok_or_else(syntax_error)?;

    // The comment token eats to end of line, so it can only be last
    let comment = match tokens.last() {
        Some(Token::Comment(text)) => {
            let text = text.clone();
            tokens.pop();
            Some(text)
        }
        _ => None,
    };

    let label = match tokens.as_slice() {
        [Token::Ident(name), Token::Colon, ..] => {
            let name = name.clone();
            tokens.drain(..2);
            Some(name)
        }
        _ => None,
    };

    // Ordered; first structural match wins
    let matchers: &[fn(&[Token]) -> Option<Result<LineKind>>] =
        &[try_full, try_data, try_comment, try_memop, try_jump];

    for matcher in matchers {
        if let Some(result) = matcher(&tokens) {
            return result.map(|kind| SourceLine {
                label,
                comment,
                kind,
            });
        }
    }
    Err(syntax_error())
}

/// Split a leading `mnemonic[/predicate]` from the token stream
fn split_mnemonic(tokens: &[Token]) -> Option<(&str, Option<&str>, &[Token])> {
    match tokens {
        [Token::Ident(name), Token::Slash, Token::Ident(pred), rest @ ..] => {
            Some((name, Some(pred), rest))
        }
        [Token::Ident(name), rest @ ..] => Some((name, None, rest)),
        _ => None,
    }
}

/// Structural register check; range and spelling are resolved later so
/// that r99 reports as a bad register, not a syntax error
fn is_register_shaped(name: &str) -> bool {
    if name == "zero" || name == "pc" {
        return true;
    }
    match name.strip_prefix('r') {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

fn resolve_opcode(name: &str) -> Result<OpCode> {
    name.parse()
        .map_err(|_| AssemblerError::UnknownOpcode(name.to_string()))
}

fn resolve_predicate(name: Option<&str>) -> Result<Option<CondFlag>> {
    match name {
        Some(text) => text
            .parse()
            .map(Some)
            .map_err(|_| AssemblerError::UnknownPredicate(text.to_string())),
        None => Ok(None),
    }
}

fn resolve_register(name: &str) -> Result<Reg> {
    Reg::from_name(name).ok_or_else(|| AssemblerError::InvalidRegister(name.to_string()))
}

/// `opcode[/pred] reg,reg,reg[ [offset] ]`
fn try_full(tokens: &[Token]) -> Option<Result<LineKind>> {
    let (op, pred, rest) = split_mnemonic(tokens)?;
    let (target, src1, src2, tail) = match rest {
        [Token::Ident(a), Token::Comma, Token::Ident(b), Token::Comma, Token::Ident(c), tail @ ..] => {
            (a, b, c, tail)
        }
        _ => return None,
    };
    if !is_register_shaped(target) || !is_register_shaped(src1) || !is_register_shaped(src2) {
        return None;
    }
    let offset = match tail {
        [] => None,
        [Token::LBracket, Token::Number(n), Token::RBracket] => Some(*n as i32),
        _ => return None,
    };

    Some((|| {
        Ok(LineKind::Full(FullInstr {
            op: resolve_opcode(op)?,
            pred: resolve_predicate(pred)?,
            target: resolve_register(target)?,
            src1: resolve_register(src1)?,
            src2: resolve_register(src2)?,
            offset,
        }))
    })())
}

/// `DATA [value]`, decimal or 0x-hex; wider literals truncate to a word
fn try_data(tokens: &[Token]) -> Option<Result<LineKind>> {
    match tokens {
        [Token::Ident(kw)] if kw == "DATA" => Some(Ok(LineKind::Data(None))),
        [Token::Ident(kw), Token::Number(n)] if kw == "DATA" => {
            Some(Ok(LineKind::Data(Some(*n as Word))))
        }
        [Token::Ident(kw), Token::Hex(h)] if kw == "DATA" => {
            Some(Ok(LineKind::Data(Some(*h as Word))))
        }
        _ => None,
    }
}

fn try_comment(tokens: &[Token]) -> Option<Result<LineKind>> {
    if tokens.is_empty() {
        Some(Ok(LineKind::Comment))
    } else {
        None
    }
}

/// `opcode[/pred] target,label` — the label may be any identifier;
/// lines with a register in that position already matched FULL
fn try_memop(tokens: &[Token]) -> Option<Result<LineKind>> {
    let (op, pred, rest) = split_mnemonic(tokens)?;
    let (target, label) = match rest {
        [Token::Ident(target), Token::Comma, Token::Ident(label)] => (target, label),
        _ => return None,
    };
    if !is_register_shaped(target) {
        return None;
    }

    let label = label.clone();
    Some((|| {
        Ok(LineKind::MemOp(MemOpInstr {
            op: resolve_opcode(op)?,
            pred: resolve_predicate(pred)?,
            target: resolve_register(target)?,
            label,
        }))
    })())
}

/// `JUMP[/pred] label`
fn try_jump(tokens: &[Token]) -> Option<Result<LineKind>> {
    let (keyword, pred, rest) = split_mnemonic(tokens)?;
    if keyword != "JUMP" {
        return None;
    }
    let label = match rest {
        [Token::Ident(label)] => label.clone(),
        _ => return None,
    };

    Some((|| {
        Ok(LineKind::Jump(JumpInstr {
            pred: resolve_predicate(pred)?,
            label,
        }))
    })())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_instruction() {
        let line = parse_line("ADD r1,r0,r15[4]", 1).unwrap();
        assert_eq!(line.label, None);
        assert_eq!(
            line.kind,
            LineKind::Full(FullInstr {
                op: OpCode::Add,
                pred: None,
                target: Reg::new(1).unwrap(),
                src1: Reg::ZERO,
                src2: Reg::PC,
                offset: Some(4),
            })
        );
    }

    #[test]
    fn test_parse_full_with_predicate_and_label() {
        let line = parse_line("loop: SUB/MZ r2,r2,r0", 3).unwrap();
        assert_eq!(line.label.as_deref(), Some("loop"));
        match line.kind {
            LineKind::Full(full) => {
                assert_eq!(full.op, OpCode::Sub);
                assert_eq!(full.pred, Some(CondFlag::M | CondFlag::Z));
                assert_eq!(full.offset, None);
            }
            other => panic!("expected FULL, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_register_aliases() {
        let line = parse_line("ADD pc,zero,r15[-1]", 1).unwrap();
        match line.kind {
            LineKind::Full(full) => {
                assert_eq!(full.target, Reg::PC);
                assert_eq!(full.src1, Reg::ZERO);
                assert_eq!(full.offset, Some(-1));
            }
            other => panic!("expected FULL, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_data() {
        let line = parse_line("x: DATA 0", 5).unwrap();
        assert_eq!(line.label.as_deref(), Some("x"));
        assert_eq!(line.kind, LineKind::Data(Some(0)));

        let line = parse_line("DATA 0x2A", 6).unwrap();
        assert_eq!(line.kind, LineKind::Data(Some(42)));

        let line = parse_line("DATA -1", 7).unwrap();
        assert_eq!(line.kind, LineKind::Data(Some(u32::MAX)));

        let line = parse_line("DATA", 8).unwrap();
        assert_eq!(line.kind, LineKind::Data(None));
    }

    #[test]
    fn test_parse_comment_lines() {
        assert_eq!(parse_line("", 1).unwrap().kind, LineKind::Comment);
        assert_eq!(parse_line("   ", 2).unwrap().kind, LineKind::Comment);

        let line = parse_line("here:", 3).unwrap();
        assert_eq!(line.label.as_deref(), Some("here"));
        assert_eq!(line.kind, LineKind::Comment);

        let line = parse_line("# full-line comment", 4).unwrap();
        assert_eq!(line.comment.as_deref(), Some("# full-line comment"));
        assert_eq!(line.kind, LineKind::Comment);
    }

    #[test]
    fn test_parse_memop() {
        let line = parse_line("again: STORE r1,x  # save", 1).unwrap();
        assert_eq!(line.label.as_deref(), Some("again"));
        assert_eq!(line.comment.as_deref(), Some("# save"));
        assert_eq!(
            line.kind,
            LineKind::MemOp(MemOpInstr {
                op: OpCode::Store,
                pred: None,
                target: Reg::new(1).unwrap(),
                label: "x".to_string(),
            })
        );
    }

    #[test]
    fn test_register_shaped_second_operand_is_a_label_reference() {
        // First-match-wins: not FULL (only two operands), so the
        // register-looking name lands in MEMOP's label slot
        let line = parse_line("LOAD r1,r2", 1).unwrap();
        match line.kind {
            LineKind::MemOp(memop) => assert_eq!(memop.label, "r2"),
            other => panic!("expected MEMOP, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_jump() {
        let line = parse_line("JUMP/P again", 1).unwrap();
        assert_eq!(
            line.kind,
            LineKind::Jump(JumpInstr {
                pred: Some(CondFlag::P),
                label: "again".to_string(),
            })
        );

        let line = parse_line("JUMP done", 2).unwrap();
        match line.kind {
            LineKind::Jump(jump) => {
                assert_eq!(jump.pred, None);
                assert_eq!(jump.label, "done");
            }
            other => panic!("expected JUMP, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_opcode_is_not_a_syntax_error() {
        let err = parse_line("FROB r1,r2,r3", 9).unwrap_err();
        assert_eq!(err, AssemblerError::UnknownOpcode("FROB".to_string()));
    }

    #[test]
    fn test_lowercase_mnemonic_rejected() {
        let err = parse_line("add r1,r2,r3", 1).unwrap_err();
        assert_eq!(err, AssemblerError::UnknownOpcode("add".to_string()));
    }

    #[test]
    fn test_out_of_range_register() {
        let err = parse_line("ADD r1,r2,r99", 2).unwrap_err();
        assert_eq!(err, AssemblerError::InvalidRegister("r99".to_string()));
    }

    #[test]
    fn test_unknown_predicate() {
        let err = parse_line("ADD/Q r1,r2,r3", 2).unwrap_err();
        assert_eq!(err, AssemblerError::UnknownPredicate("Q".to_string()));
    }

    #[test]
    fn test_no_pattern_match_is_syntax_error() {
        let err = parse_line("ADD r1,r2,", 4).unwrap_err();
        assert_eq!(
            err,
            AssemblerError::Syntax {
                line: 4,
                text: "ADD r1,r2,".to_string(),
            }
        );
    }
}
