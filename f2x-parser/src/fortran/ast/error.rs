//! Error types for tree construction
//!
//!     Every parse-time error is fatal: the run stops at the first one and no partial tree is
//!     returned. Line numbers are 1-based physical line numbers of the offending statement.

use super::kind::NodeKind;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A continuation line with nothing before it to continue
    Continuation { line: usize },
    /// No classifier rule matched the statement
    Unclassifiable { line: usize, text: String },
    /// A closing statement that does not match the innermost open block
    BlockMismatch {
        expected: NodeKind,
        found: NodeKind,
        line: usize,
        text: String,
    },
    /// `else`, `case` or `elsewhere` the innermost open block cannot take
    MisplacedBranch {
        found: NodeKind,
        line: usize,
        text: String,
    },
    /// End of input with blocks still open
    UnterminatedBlock { kind: NodeKind, line: usize },
}

impl ParseError {
    /// Physical line the error points at.
    pub fn line(&self) -> usize {
        match self {
            ParseError::Continuation { line }
            | ParseError::Unclassifiable { line, .. }
            | ParseError::BlockMismatch { line, .. }
            | ParseError::MisplacedBranch { line, .. }
            | ParseError::UnterminatedBlock { line, .. } => *line,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Continuation { line } => {
                write!(f, "line {}: no preceding line to continue", line)
            }
            ParseError::Unclassifiable { line, text } => {
                write!(f, "line {}: unclassifiable statement \"{}\"", line, text)
            }
            ParseError::BlockMismatch {
                expected,
                found,
                line,
                text,
            } => write!(
                f,
                "line {}: \"{}\" closes a {} block, but the innermost open block is a {}",
                line, text, expected, found
            ),
            ParseError::MisplacedBranch { found, line, text } => write!(
                f,
                "line {}: \"{}\" cannot appear here, the innermost open block is a {}",
                line, text, found
            ),
            ParseError::UnterminatedBlock { kind, line } => {
                write!(f, "unterminated {} block opened at line {}", kind, line)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parser results with boxed errors (keeps the Ok path small)
pub type ParseResult<T> = Result<T, Box<ParseError>>;

/// Format source context around an error line
///
/// Shows 2 lines before the error, the error line with a >> marker, and 2 lines after.
/// `line` is 1-based, as carried by [`ParseError`].
pub fn format_source_context(source: &str, line: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_line = line.saturating_sub(1);

    let start_line = error_line.saturating_sub(2);
    let end_line = (error_line + 3).min(lines.len());

    let mut context = String::new();

    for line_num in start_line..end_line {
        let marker = if line_num == error_line { ">>" } else { "  " };
        context.push_str(&format!(
            "{} {:3} | {}\n",
            marker,
            line_num + 1,
            lines[line_num]
        ));
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_source_context() {
        let source = "line 1\nline 2\nline 3\nerror line\nline 5\nline 6\nline 7";

        let context = format_source_context(source, 4);

        assert!(context.contains("line 2"));
        assert!(context.contains(">>   4 | error line"));
        assert!(context.contains("line 6"));
        assert!(!context.contains("line 7"));
        assert!(!context.contains("line 1\n"));
    }

    #[test]
    fn test_mismatch_message_names_both_kinds() {
        let err = ParseError::BlockMismatch {
            expected: NodeKind::Loop,
            found: NodeKind::Conditional,
            line: 7,
            text: "end do".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("loop"));
        assert!(message.contains("conditional"));
        assert!(message.contains("end do"));
        assert_eq!(err.line(), 7);
    }
}
