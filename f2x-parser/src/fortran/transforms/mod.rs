//! Transform pipeline infrastructure
//!
//! The front end is a chain of typed stages. Each stage implements [`Runnable<I, O>`]; a
//! [`Transform<I, O>`] wraps a chain of them and can be extended with `.then()` as long as
//! the next stage consumes what the chain produces:
//!
//! ```rust,ignore
//! let pipeline = Transform::from_fn(Ok)
//!     .then(Assemble::default())          // String -> Vec<LogicalLine>
//!     .then(SplitStatements)              // Vec<LogicalLine> -> Vec<LogicalLine>
//!     .then(FilterConditionals::default())
//!     .then(BuildTree::default());        // Vec<LogicalLine> -> Node
//! ```
//!
//! The compiler checks stage compatibility; a mismatched chain does not build.
//!
//! Module Organization
//!
//! - [`stages`]: the individual stages
//! - [`standard`]: pre-built pipelines (`once_cell` statics) and the configurable builder
//! - [`prune`]: subtree removal, also available as a stage
//!
//! Errors
//!
//! Stages report [`TransformError`]. Parse errors travel unchanged inside it so callers can
//! still render source context for them.

pub mod prune;
pub mod stages;
pub mod standard;

use crate::fortran::ast::ParseError;
use std::fmt;

/// Error that can occur during transformation
#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Stage failed with specific error
    StageFailed { stage: String, message: String },
    /// The source could not be parsed
    Parse(Box<ParseError>),
}

impl TransformError {
    /// The parse error behind this failure, if any.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            TransformError::Parse(err) => Some(err),
            TransformError::StageFailed { .. } => None,
        }
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::StageFailed { stage, message } => {
                write!(f, "Stage '{}' failed: {}", stage, message)
            }
            TransformError::Parse(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for TransformError {}

impl From<Box<ParseError>> for TransformError {
    fn from(err: Box<ParseError>) -> Self {
        TransformError::Parse(err)
    }
}

/// Trait for anything that can transform an input to an output
pub trait Runnable<I, O> {
    fn run(&self, input: I) -> Result<O, TransformError>;
}

/// A composable transformation pipeline from `I` to `O`
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O, TransformError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, TransformError> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Append a stage, producing a transform from `I` to the stage's output.
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    /// Append a pre-built (static) transform.
    pub fn then_transform<O2>(self, next: &'static Transform<O, O2>) -> Transform<I, O2>
    where
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                next.run(intermediate)
            }),
        }
    }

    /// Execute this transform on the given input
    pub fn run(&self, input: I) -> Result<O, TransformError> {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O, TransformError> {
        Transform::run(self, input)
    }
}
