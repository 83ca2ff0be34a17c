//! Tree rewriting
//!
//!     [`Node::prune`] removes every subtree whose root matches a predicate. The walk is
//!     depth-first and pre-order: a node is tested before its children, and the children of a
//!     removed node are never tested. Removal happens in whichever child sequence holds the
//!     node (primary, else, elsewhere or a case arm); the remaining siblings keep their order.
//!     The node `prune` is called on is never removed.
//!
//!     [`PrunePlan`] bundles the standard passes. They run in a fixed order:
//!
//!         1. drop `use` statements
//!         2. drop assignments whose tag matches one of the configured patterns
//!         3. drop loops without any children
//!
//!     Each pass is a single pre-order walk, so a loop that only becomes empty because pass 3
//!     removed its inner loop stays in the tree.

use crate::fortran::ast::{Node, NodeKind};
use regex::Regex;
use tracing::debug;

impl Node {
    /// Remove every descendant subtree whose root matches `predicate`.
    ///
    /// Returns the number of subtrees removed (matching nodes, not their descendants).
    pub fn prune<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Node) -> bool,
    {
        self.prune_with(&mut predicate)
    }

    fn prune_with(&mut self, predicate: &mut dyn FnMut(&Node) -> bool) -> usize {
        let mut removed = 0;
        for sequence in self.branches_mut() {
            let mut kept = Vec::with_capacity(sequence.len());
            for mut child in sequence.drain(..) {
                if predicate(&child) {
                    removed += 1;
                    continue;
                }
                removed += child.prune_with(predicate);
                kept.push(child);
            }
            *sequence = kept;
        }
        removed
    }
}

/// The standard pruning passes.
#[derive(Debug, Clone, Default)]
pub struct PrunePlan {
    pub drop_using: bool,
    pub drop_assignments: Vec<Regex>,
    pub drop_empty_loops: bool,
}

/// How many subtrees each pass removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneReport {
    pub using: usize,
    pub assignments: usize,
    pub empty_loops: usize,
}

impl PruneReport {
    pub fn total(&self) -> usize {
        self.using + self.assignments + self.empty_loops
    }
}

impl PrunePlan {
    /// Build a plan, compiling assignment patterns case-insensitively.
    pub fn new(
        drop_using: bool,
        assignment_patterns: &[String],
        drop_empty_loops: bool,
    ) -> Result<Self, regex::Error> {
        let drop_assignments = assignment_patterns
            .iter()
            .map(|pattern| Regex::new(&format!("(?i){}", pattern)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            drop_using,
            drop_assignments,
            drop_empty_loops,
        })
    }

    pub fn is_empty(&self) -> bool {
        !self.drop_using && self.drop_assignments.is_empty() && !self.drop_empty_loops
    }

    pub fn apply(&self, root: &mut Node) -> PruneReport {
        let mut report = PruneReport::default();
        if self.drop_using {
            report.using = root.prune(|node| node.kind == NodeKind::Using);
        }
        if !self.drop_assignments.is_empty() {
            report.assignments = root.prune(|node| {
                node.kind == NodeKind::Assignment
                    && node.tag.as_deref().is_some_and(|tag| {
                        self.drop_assignments.iter().any(|regex| regex.is_match(tag))
                    })
            });
        }
        if self.drop_empty_loops {
            report.empty_loops =
                root.prune(|node| node.kind.is_loop() && node.is_structurally_empty());
        }
        debug!(
            using = report.using,
            assignments = report.assignments,
            empty_loops = report.empty_loops,
            "pruned"
        );
        report
    }
}
