//! # Lexer for Perch-32 Assembly Language
//!
//! Source is line-oriented, so the lexer runs over one line at a time;
//! there is no newline token.

use logos::Logos;

/// Tokens for one line of Perch-32 assembly
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t]+")] // Skip whitespace
pub enum Token {
    /// Identifier (mnemonics, predicates, register names, labels)
    #[regex(r"[A-Za-z][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    /// Decimal number, optionally signed
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse().ok())]
    Number(i64),

    /// Hexadecimal number
    #[regex(r"0x[0-9a-fA-F]+", |lex| u64::from_str_radix(&lex.slice()[2..], 16).ok())]
    Hex(u64),

    /// Predicate separator
    #[token("/")]
    Slash,

    #[token(",")]
    Comma,

    /// Label definition marker
    #[token(":")]
    Colon,

    /// Offset brackets
    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    /// Comment to end of line, text preserved for pass-through
    #[regex(r"[#;][^\n]*", |lex| lex.slice().to_string())]
    Comment(String),
}

/// Tokenize one source line. `None` on any unlexable character.
pub fn tokenize(line: &str) -> Option<Vec<Token>> {
    Token::lexer(line).collect::<Result<Vec<_>, _>>().ok()
}
