//! Logical line assembly
//!
//!     Folds physical lines into logical statements. A logical line keeps the physical line
//!     range it was built from, the space-joined code of its fragments and every comment that
//!     was attached to it along the way.
//!
//! Comment Attachment
//!
//!     Inline comments belong to the fragment they were written on. Pure comment lines are
//!     appended to the logical line being built or last emitted; comment lines that appear
//!     before any statement are held back and prepended to the first logical line.
//!
//! Continuation Fusion
//!
//!     A fragment starting with `&` joins the previous logical line, and so does any fragment
//!     following a line that ended with `&`. Blank and comment lines in between do not break
//!     the chain. A chain of N continued fragments yields exactly one logical line.
use super::physical::{classify_physical, Fragment, PhysicalLine};
use crate::fortran::ast::{ParseError, ParseResult};
use crate::fortran::diagnostics::Diagnostics;
use serde::{Deserialize, Serialize};
use std::mem;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalLine {
    pub start_line: usize,
    pub end_line: usize,
    pub text: String,
    pub comments: Vec<String>,
}

impl LogicalLine {
    pub fn new(line: usize, text: impl Into<String>) -> Self {
        Self {
            start_line: line,
            end_line: line,
            text: text.into().trim().to_string(),
            comments: Vec::new(),
        }
    }

    pub fn with_comments(mut self, comments: Vec<String>) -> Self {
        self.comments = comments;
        self
    }

    fn absorb(&mut self, line: usize, fragment: Fragment) {
        if !fragment.code.is_empty() {
            if self.text.is_empty() {
                self.text = fragment.code;
            } else {
                self.text.push(' ');
                self.text.push_str(&fragment.code);
            }
        }
        self.comments.extend(fragment.comment);
        self.end_line = line;
    }
}

/// Builds logical lines out of raw source text.
pub struct LineAssembler {
    fixed_form_comments: bool,
    diagnostics: Diagnostics,
}

impl LineAssembler {
    pub fn new(diagnostics: Diagnostics) -> Self {
        Self {
            fixed_form_comments: true,
            diagnostics,
        }
    }

    pub fn with_fixed_form_comments(mut self, enabled: bool) -> Self {
        self.fixed_form_comments = enabled;
        self
    }

    pub fn assemble(&self, source: &str) -> ParseResult<Vec<LogicalLine>> {
        let _span = self.diagnostics.enter();
        let mut lines: Vec<LogicalLine> = Vec::new();
        let mut leading_comments: Vec<String> = Vec::new();
        let mut continues = false;

        for (index, raw) in source.lines().enumerate() {
            let number = index + 1;
            match classify_physical(raw, self.fixed_form_comments) {
                PhysicalLine::Blank => {}
                PhysicalLine::Comment(text) => match lines.last_mut() {
                    Some(last) => last.comments.push(text),
                    None => leading_comments.push(text),
                },
                PhysicalLine::Fragment(fragment) => {
                    let continues_next = fragment.continues_next;
                    if fragment.continues_previous || continues {
                        let Some(last) = lines.last_mut() else {
                            return Err(Box::new(ParseError::Continuation { line: number }));
                        };
                        debug!(line = number, into = last.start_line, "fusing continuation");
                        last.absorb(number, fragment);
                    } else {
                        let mut comments = mem::take(&mut leading_comments);
                        comments.extend(fragment.comment);
                        lines.push(LogicalLine::new(number, fragment.code).with_comments(comments));
                    }
                    continues = continues_next;
                }
            }
        }

        if continues {
            warn!("last line ends with a continuation marker");
        }
        if !leading_comments.is_empty() {
            debug!(
                count = leading_comments.len(),
                "source has comments but no statements"
            );
        }
        debug!(logical_lines = lines.len(), "assembled");
        Ok(lines)
    }
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new(Diagnostics::default())
    }
}
