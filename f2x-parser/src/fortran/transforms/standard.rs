//! Standard transform definitions
//!
//! Pre-built pipelines are static references using `once_cell::sync::Lazy`; they use default
//! settings (fixed-form comments on, no intercepts, no pruning). [`build_pipeline`] assembles
//! the same chain from [`ParseOptions`] for callers that need configuration.

use crate::fortran::ast::Node;
use crate::fortran::diagnostics::Diagnostics;
use crate::fortran::lexing::LogicalLine;
use crate::fortran::parsing::{Classifier, DiscardPattern};
use crate::fortran::transforms::prune::PrunePlan;
use crate::fortran::transforms::stages::{
    Assemble, BuildTree, FilterConditionals, Prune, SplitStatements,
};
use crate::fortran::transforms::{Transform, TransformError};
use once_cell::sync::Lazy;

/// Type alias for the line-level transform
pub type LinesTransform = Transform<String, Vec<LogicalLine>>;

/// Type alias for the full front end transform
pub type TreeTransform = Transform<String, Node>;

/// String to logical lines: assembly, statement splitting and conditional filtering.
///
/// # Example
///
/// ```rust
/// use f2x_parser::fortran::transforms::standard::STRING_TO_LINES;
///
/// let lines = STRING_TO_LINES.run("x = 1 +&\n&    2\n".to_string()).unwrap();
/// assert_eq!(lines[0].text, "x = 1 + 2");
/// ```
pub static STRING_TO_LINES: Lazy<LinesTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then(Assemble::default())
        .then(SplitStatements)
        .then(FilterConditionals::default())
});

/// String to tree: the full front end with default settings.
///
/// # Example
///
/// ```rust
/// use f2x_parser::fortran::transforms::standard::STRING_TO_TREE;
///
/// let root = STRING_TO_TREE.run("call init\n".to_string()).unwrap();
/// assert_eq!(root.children.len(), 1);
/// ```
pub static STRING_TO_TREE: Lazy<TreeTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then_transform(&STRING_TO_LINES)
        .then(BuildTree::default())
});

/// Settings for a configured front end run.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub fixed_form_comments: bool,
    /// Regexes; matching logical lines are discarded before classification.
    pub discard: Vec<String>,
    pub drop_using: bool,
    /// Regexes matched against assignment tags.
    pub drop_assignments: Vec<String>,
    pub drop_empty_loops: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            fixed_form_comments: true,
            discard: Vec::new(),
            drop_using: false,
            drop_assignments: Vec::new(),
            drop_empty_loops: false,
        }
    }
}

/// Build the front end pipeline for `options`. Invalid patterns are reported as stage
/// failures.
pub fn build_pipeline(
    options: &ParseOptions,
    diagnostics: Diagnostics,
) -> Result<TreeTransform, TransformError> {
    let mut classifier = Classifier::new(diagnostics.clone());
    for pattern in &options.discard {
        let rule = DiscardPattern::new(pattern).map_err(|e| TransformError::StageFailed {
            stage: "classifier".to_string(),
            message: format!("invalid discard pattern '{}': {}", pattern, e),
        })?;
        classifier = classifier.with_intercept(rule);
    }

    let plan = PrunePlan::new(
        options.drop_using,
        &options.drop_assignments,
        options.drop_empty_loops,
    )
    .map_err(|e| TransformError::StageFailed {
        stage: "prune".to_string(),
        message: format!("invalid assignment pattern: {}", e),
    })?;

    let transform = Transform::from_fn(Ok)
        .then(Assemble::new(options.fixed_form_comments, diagnostics.clone()))
        .then(SplitStatements)
        .then(FilterConditionals::new(diagnostics.clone()))
        .then(BuildTree::new(classifier, diagnostics));
    Ok(if plan.is_empty() {
        transform
    } else {
        transform.then(Prune::new(plan))
    })
}
