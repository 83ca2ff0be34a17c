//! Pruning stage

use crate::fortran::ast::Node;
use crate::fortran::transforms::prune::PrunePlan;
use crate::fortran::transforms::{Runnable, TransformError};

/// Applies a [`PrunePlan`] to the tree.
pub struct Prune {
    plan: PrunePlan,
}

impl Prune {
    pub fn new(plan: PrunePlan) -> Self {
        Self { plan }
    }
}

impl Runnable<Node, Node> for Prune {
    fn run(&self, mut input: Node) -> Result<Node, TransformError> {
        self.plan.apply(&mut input);
        Ok(input)
    }
}
