//! Statement classifier
//!
//!     Turns one logical line into a [`Classified`] statement: what the automaton should do
//!     with it, plus the tag and statement label to put on the node. Classification is pure;
//!     the only state is the list of intercepts, fixed at construction.
//!
//!     Per line:
//!
//!         1. Intercepts run in registration order; the first `Discard` wins.
//!         2. A leading 1-5 digit statement label is split off.
//!         3. A construct name (`outer: do ...`) is set aside for matching.
//!         4. The rule table decides; no match is an unclassifiable-statement error.

use super::intercept::{Intercept, Interception};
use super::patterns::{max_nesting, PAREN_DEPTH};
use super::rules::{first_match, Emit};
use crate::fortran::ast::{NodeKind, ParseError, ParseResult};
use crate::fortran::diagnostics::Diagnostics;
use crate::fortran::lexing::LogicalLine;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{trace, warn};

static STATEMENT_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<label>\d{1,5})(?:\s+(?P<rest>.*))?$").unwrap());
static CONSTRUCT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z_]\w*\s*:\s*(?P<rest>(?:do|if|select|where)\b.*)$").unwrap()
});

/// What the block automaton does with a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Dropped by an intercept
    Skip,
    Simple(NodeKind),
    Open(NodeKind),
    OpenArchaic {
        loop_label: u32,
    },
    /// `if (...) then` when `trailing` is `None`, a one-line `if` otherwise
    Conditional {
        trailing: Option<String>,
    },
    /// `where (...)` block when `trailing` is `None`, a one-line `where` otherwise
    Where {
        trailing: Option<String>,
    },
    ElseIf,
    Else,
    ElseWhere,
    Case {
        condition: String,
    },
    Close(NodeKind),
    CloseUnit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub action: Action,
    /// Name of the rule that matched (`"skip"` for intercepted lines)
    pub rule: &'static str,
    /// The logical line as written, statement label included
    pub text: String,
    pub tag: Option<String>,
    pub label: Option<u32>,
}

pub struct Classifier {
    intercepts: Vec<Box<dyn Intercept>>,
    diagnostics: Diagnostics,
}

impl Classifier {
    pub fn new(diagnostics: Diagnostics) -> Self {
        Self {
            intercepts: Vec::new(),
            diagnostics,
        }
    }

    pub fn with_intercept(mut self, intercept: impl Intercept + 'static) -> Self {
        self.intercepts.push(Box::new(intercept));
        self
    }

    pub fn with_intercepts(mut self, intercepts: Vec<Box<dyn Intercept>>) -> Self {
        self.intercepts.extend(intercepts);
        self
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Classify a logical line, running intercepts first.
    pub fn classify(&self, line: &LogicalLine) -> ParseResult<Classified> {
        let _span = self.diagnostics.enter();
        for intercept in &self.intercepts {
            if intercept.intercept(line) == Interception::Discard {
                trace!(line = line.start_line, intercept = intercept.name(), "discarded");
                return Ok(Classified {
                    action: Action::Skip,
                    rule: "skip",
                    text: line.text.clone(),
                    tag: None,
                    label: None,
                });
            }
        }

        let (label, text) = split_label(&line.text);
        let mut classified = self.classify_statement(text, line.start_line)?;
        classified.label = label;
        classified.text = line.text.trim().to_string();
        Ok(classified)
    }

    /// Classify statement text through the rule table alone. Used for inline trailing
    /// clauses as well as whole lines.
    pub fn classify_statement(&self, text: &str, line: usize) -> ParseResult<Classified> {
        let text = text.trim();
        let nesting = max_nesting(text);
        if nesting > PAREN_DEPTH {
            warn!(
                line,
                nesting,
                limit = PAREN_DEPTH,
                "parentheses nested beyond the matcher's depth"
            );
        }

        let matched = match CONSTRUCT_NAME.captures(text) {
            Some(caps) => caps.name("rest").map_or(text, |m| m.as_str()),
            None => text,
        };
        let unclassifiable = || {
            Box::new(ParseError::Unclassifiable {
                line,
                text: text.to_string(),
            })
        };

        let (rule, caps) = first_match(matched).ok_or_else(unclassifiable)?;
        let capture = |name: &str| caps.name(name).map(|m| m.as_str().trim().to_string());
        let trailing = || capture("rest").filter(|rest| !rest.is_empty());

        let action = match rule.emit {
            Emit::Simple(kind) => Action::Simple(kind),
            Emit::Open(kind) => Action::Open(kind),
            Emit::Close(kind) => Action::Close(kind),
            Emit::CloseUnit => Action::CloseUnit,
            Emit::OpenArchaic => {
                let loop_label = capture("label")
                    .and_then(|label| label.parse().ok())
                    .ok_or_else(unclassifiable)?;
                Action::OpenArchaic { loop_label }
            }
            Emit::Conditional => match trailing() {
                Some(rest) if rest.eq_ignore_ascii_case("then") => {
                    Action::Conditional { trailing: None }
                }
                Some(rest) => Action::Conditional {
                    trailing: Some(rest),
                },
                None => return Err(unclassifiable()),
            },
            Emit::Where => Action::Where {
                trailing: trailing(),
            },
            Emit::ElseIf => Action::ElseIf,
            Emit::Else => Action::Else,
            Emit::ElseWhere => Action::ElseWhere,
            Emit::Case => Action::Case {
                condition: capture("cond").unwrap_or_default(),
            },
        };

        trace!(line, rule = rule.name, "classified");
        Ok(Classified {
            action,
            rule: rule.name,
            text: text.to_string(),
            tag: capture("tag").filter(|tag| !tag.is_empty()),
            label: None,
        })
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(Diagnostics::default())
    }
}

/// Split a leading statement label off `text`.
pub fn split_label(text: &str) -> (Option<u32>, &str) {
    match STATEMENT_LABEL.captures(text) {
        Some(caps) => {
            let label = caps["label"].parse().ok();
            let rest = caps.name("rest").map_or("", |m| m.as_str());
            (label, rest)
        }
        None => (None, text),
    }
}
