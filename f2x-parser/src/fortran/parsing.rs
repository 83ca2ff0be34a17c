//! Statement classification and tree construction
//!
//!     Parsing starts once the source has been reduced to logical lines (see
//!     [lexing](crate::fortran::lexing)). Each logical line goes through two steps:
//!
//!         1. Classification: the [classifier] runs intercepts, splits off the statement
//!            label and matches the ordered [rules] table. The result says what the line is
//!            (opener, closer, branch entry, simple statement) and carries its tag.
//!         2. Folding: the [automaton] applies the classified statement to its stack of open
//!            blocks.
//!
//!     After the last line the automaton checks that every block was closed and hands the
//!     root over. The first error stops the run; there is no partial tree.
//!
//! Ambiguity
//!
//!     The source dialect has no single grammar. Keywords are not reserved, whitespace is
//!     mostly insignificant and several statements look alike (`type point` opens a derived
//!     type, `type(point) :: p` declares a variable). The rule table settles these by order:
//!     the more specific form is always tried first. Parenthesized conditions are matched by
//!     a pattern unrolled to a fixed depth (see [patterns]).

pub mod automaton;
pub mod classifier;
pub mod intercept;
pub mod patterns;
pub mod rules;

pub use automaton::BlockStack;
pub use classifier::{split_label, Action, Classified, Classifier};
pub use intercept::{DiscardPattern, FnIntercept, Intercept, Interception};
pub use patterns::{max_nesting, nested_parens, PAREN, PAREN_DEPTH};
pub use rules::{first_match, Emit, Rule, RULES};

use crate::fortran::ast::{Node, ParseResult};
use crate::fortran::diagnostics::Diagnostics;
use crate::fortran::lexing::LogicalLine;

/// Fold logical lines into a tree.
pub fn parse_lines(
    lines: &[LogicalLine],
    classifier: &Classifier,
    diagnostics: Diagnostics,
) -> ParseResult<Node> {
    let mut stack = BlockStack::new(diagnostics);
    for line in lines {
        stack.feed(line, classifier)?;
    }
    stack.finish()
}
