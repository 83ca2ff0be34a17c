//! Assembly stages
//!
//! Physical lines to logical lines, then one logical line per `;`-separated statement.

use crate::fortran::diagnostics::Diagnostics;
use crate::fortran::lexing::{split_statements, LineAssembler, LogicalLine};
use crate::fortran::transforms::{Runnable, TransformError};

/// Assembly stage
///
/// # Input
/// - `String` - source text
///
/// # Output
/// - `Vec<LogicalLine>` - continuation-fused statements with their comments
pub struct Assemble {
    assembler: LineAssembler,
}

impl Assemble {
    pub fn new(fixed_form_comments: bool, diagnostics: Diagnostics) -> Self {
        Self {
            assembler: LineAssembler::new(diagnostics)
                .with_fixed_form_comments(fixed_form_comments),
        }
    }
}

impl Default for Assemble {
    fn default() -> Self {
        Self::new(true, Diagnostics::default())
    }
}

impl Runnable<String, Vec<LogicalLine>> for Assemble {
    fn run(&self, input: String) -> Result<Vec<LogicalLine>, TransformError> {
        Ok(self.assembler.assemble(&input)?)
    }
}

/// Splits logical lines on top-level `;`.
pub struct SplitStatements;

impl Runnable<Vec<LogicalLine>, Vec<LogicalLine>> for SplitStatements {
    fn run(&self, input: Vec<LogicalLine>) -> Result<Vec<LogicalLine>, TransformError> {
        Ok(split_statements(input))
    }
}
