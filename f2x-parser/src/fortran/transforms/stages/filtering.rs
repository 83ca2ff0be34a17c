//! Conditional-compilation stage

use crate::fortran::diagnostics::Diagnostics;
use crate::fortran::lexing::{ConditionalFilter, LogicalLine};
use crate::fortran::transforms::{Runnable, TransformError};

/// Drops lines in the dead branch of an always-true `#if`. Never fails.
///
/// The filter is stateful, so every run starts from a fresh one.
#[derive(Default)]
pub struct FilterConditionals {
    diagnostics: Diagnostics,
}

impl FilterConditionals {
    pub fn new(diagnostics: Diagnostics) -> Self {
        Self { diagnostics }
    }
}

impl Runnable<Vec<LogicalLine>, Vec<LogicalLine>> for FilterConditionals {
    fn run(&self, input: Vec<LogicalLine>) -> Result<Vec<LogicalLine>, TransformError> {
        Ok(ConditionalFilter::new(self.diagnostics.clone()).filter(input))
    }
}
