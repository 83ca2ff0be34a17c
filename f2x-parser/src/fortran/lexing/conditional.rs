//! Conditional-compilation filter
//!
//!     Only the static "always true" form is understood: `#if 1`, `#if (1)` and `#if true`.
//!     The filter walks logical lines with a three-state charge:
//!
//!         discharged --#if 1--> charged --#else--> ablaze --#endif--> discharged
//!
//!     Lines are dropped while ablaze (they sit in the `#else` branch of a condition that is
//!     always taken). The tracked `#if`, `#else` and `#endif` lines are kept and reach the
//!     classifier as preprocessor-directive statements.
//!
//!     Inside a charged or ablaze region, further `#if`/`#ifdef`/`#ifndef` open a nested level
//!     that is counted so its `#endif` does not reset the outer state. Nested directives follow
//!     the region they sit in: kept while charged, dropped while ablaze. Any other conditional
//!     (`#ifdef FOO`, `#if 0`...) seen while discharged is passed through untouched.
//!
//!     Filtering never fails.
use super::logical_lines::LogicalLine;
use crate::fortran::diagnostics::Diagnostics;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static ALWAYS_TRUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^#\s*if\s*(?:1|\(\s*1\s*\)|true)\s*$").unwrap());
static OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^#\s*if(?:n?def)?\b").unwrap());
static ELSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^#\s*(?:else|elif)\b").unwrap());
static ENDIF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^#\s*endif\b").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charge {
    Discharged,
    Charged,
    Ablaze,
}

pub struct ConditionalFilter {
    state: Charge,
    /// Open conditionals nested inside the tracked one.
    nested: usize,
    diagnostics: Diagnostics,
}

impl ConditionalFilter {
    pub fn new(diagnostics: Diagnostics) -> Self {
        Self {
            state: Charge::Discharged,
            nested: 0,
            diagnostics,
        }
    }

    pub fn state(&self) -> Charge {
        self.state
    }

    /// Advance the state with one line and report whether the line is kept.
    pub fn admit(&mut self, line: &LogicalLine) -> bool {
        let text = line.text.as_str();
        if !text.starts_with('#') {
            return self.state != Charge::Ablaze;
        }

        let live = self.state != Charge::Ablaze;
        match self.state {
            Charge::Discharged => {
                if ALWAYS_TRUE.is_match(text) {
                    self.transition(Charge::Charged, line);
                }
            }
            Charge::Charged | Charge::Ablaze if OPEN.is_match(text) => {
                self.nested += 1;
                return live;
            }
            Charge::Charged | Charge::Ablaze if self.nested > 0 => {
                if ENDIF.is_match(text) {
                    self.nested -= 1;
                }
                return live;
            }
            Charge::Charged => {
                if ELSE.is_match(text) {
                    self.transition(Charge::Ablaze, line);
                } else if ENDIF.is_match(text) {
                    self.transition(Charge::Discharged, line);
                }
            }
            Charge::Ablaze => {
                if ENDIF.is_match(text) {
                    self.transition(Charge::Discharged, line);
                }
            }
        }
        true
    }

    /// Drop every line that sits in the dead branch of an always-true conditional.
    pub fn filter(mut self, lines: Vec<LogicalLine>) -> Vec<LogicalLine> {
        let diagnostics = self.diagnostics.clone();
        let _span = diagnostics.enter();
        let before = lines.len();
        let kept: Vec<LogicalLine> = lines.into_iter().filter(|line| self.admit(line)).collect();
        if kept.len() != before {
            debug!(dropped = before - kept.len(), "conditional filter");
        }
        kept
    }

    fn transition(&mut self, to: Charge, line: &LogicalLine) {
        debug!(line = line.start_line, from = ?self.state, to = ?to, "conditional state");
        self.state = to;
    }
}

impl Default for ConditionalFilter {
    fn default() -> Self {
        Self::new(Diagnostics::default())
    }
}
