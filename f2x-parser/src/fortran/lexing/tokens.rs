//! Token definitions for physical-line scanning
//!
//! The scanner only needs to know where string literals are, so that comment markers and
//! statement separators inside quotes are left alone. Everything else is opaque text.
//! Fortran escapes a quote inside a literal by doubling it (`'it''s'`); a literal left open at
//! the end of the line runs to the end of the line.
use logos::Logos;
use std::ops::Range;

#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    #[regex(r"'([^'\n]|'')*'?")]
    SingleQuoted,

    #[regex(r#""([^"\n]|"")*"?"#)]
    DoubleQuoted,

    /// Inline comment marker
    #[token("!")]
    Bang,

    /// Continuation marker
    #[token("&")]
    Ampersand,

    /// Statement separator
    #[token(";")]
    Semicolon,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[regex(r#"[^'"!&; \t\n]+"#)]
    Text,
}

impl Token {
    pub fn is_string(&self) -> bool {
        matches!(self, Token::SingleQuoted | Token::DoubleQuoted)
    }
}

/// Tokenize one line. Bytes logos cannot place are reported as `Text`.
pub fn tokenize(line: &str) -> Vec<(Token, Range<usize>)> {
    Token::lexer(line)
        .spanned()
        .map(|(result, span)| (result.unwrap_or(Token::Text), span))
        .collect()
}

/// Byte offset of the first `!` outside a string literal.
pub fn comment_start(line: &str) -> Option<usize> {
    tokenize(line)
        .into_iter()
        .find(|(token, _)| *token == Token::Bang)
        .map(|(_, span)| span.start)
}

/// Byte offsets of every `;` outside a string literal.
pub fn separator_positions(line: &str) -> Vec<usize> {
    tokenize(line)
        .into_iter()
        .filter(|(token, _)| *token == Token::Semicolon)
        .map(|(_, span)| span.start)
        .collect()
}
