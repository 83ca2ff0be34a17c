//! Early-intercept rules
//!
//! Intercepts run before the rule table and may drop a logical line entirely. They are how
//! callers silence statements the tree should never see (vendor directives, debug prints)
//! without touching the table itself.

use crate::fortran::lexing::LogicalLine;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interception {
    /// Let the rule table classify the line.
    Pass,
    /// Drop the line; no node is produced.
    Discard,
}

pub trait Intercept: Send + Sync {
    fn name(&self) -> &str;
    fn intercept(&self, line: &LogicalLine) -> Interception;
}

/// Discards every line whose text matches a regex.
#[derive(Debug, Clone)]
pub struct DiscardPattern {
    regex: Regex,
}

impl DiscardPattern {
    /// Compile `pattern` case-insensitively.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(&format!("(?i){}", pattern))?,
        })
    }
}

impl Intercept for DiscardPattern {
    fn name(&self) -> &str {
        self.regex.as_str()
    }

    fn intercept(&self, line: &LogicalLine) -> Interception {
        if self.regex.is_match(&line.text) {
            Interception::Discard
        } else {
            Interception::Pass
        }
    }
}

/// An intercept backed by a closure.
pub struct FnIntercept<F> {
    name: String,
    func: F,
}

impl<F> FnIntercept<F>
where
    F: Fn(&LogicalLine) -> Interception + Send + Sync,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Intercept for FnIntercept<F>
where
    F: Fn(&LogicalLine) -> Interception + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn intercept(&self, line: &LogicalLine) -> Interception {
        (self.func)(line)
    }
}
