//! Tree building stage
//!
//! Classifies each logical line and folds it into the block stack. Produces the root node.

use crate::fortran::ast::Node;
use crate::fortran::diagnostics::Diagnostics;
use crate::fortran::lexing::LogicalLine;
use crate::fortran::parsing::{parse_lines, Classifier};
use crate::fortran::transforms::{Runnable, TransformError};

pub struct BuildTree {
    classifier: Classifier,
    diagnostics: Diagnostics,
}

impl BuildTree {
    pub fn new(classifier: Classifier, diagnostics: Diagnostics) -> Self {
        Self {
            classifier,
            diagnostics,
        }
    }
}

impl Default for BuildTree {
    fn default() -> Self {
        Self::new(Classifier::default(), Diagnostics::default())
    }
}

impl Runnable<Vec<LogicalLine>, Node> for BuildTree {
    fn run(&self, input: Vec<LogicalLine>) -> Result<Node, TransformError> {
        Ok(parse_lines(
            &input,
            &self.classifier,
            self.diagnostics.clone(),
        )?)
    }
}
