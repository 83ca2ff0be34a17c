//! Testing utilities for tree assertions
//!
//!     Statement text in this dialect is easy to get slightly wrong: a missing `then`, a
//!     label in the wrong column or a stray `&` silently changes what the front end builds.
//!     Tests therefore follow two rules:
//!
//!         1. Whole programs come from the vetted files under `samples/` (see [samples]).
//!            Short inline snippets are fine for single statements.
//!         2. Trees are checked with [assert_tree](fn@assert_tree), not by walking fields.
//!
//! Fluent assertions
//!
//!     ```rust,ignore
//!     use crate::fortran::testing::{assert_tree, parse_sample};
//!
//!     let root = parse_sample("subroutine.f90");
//!     assert_tree(&root).child_count(1).child(0, |sub| {
//!         sub.kind(NodeKind::Subroutine)
//!             .tag("foo")
//!             .child(1, |stmt| {
//!                 stmt.kind(NodeKind::Assignment).tag("x").text("x = 1");
//!             });
//!     });
//!     ```
//!
//!     Every failure message carries the path to the node (`root:children[0]:else[1]`), so a
//!     failing assertion deep in a tree still points at the right statement.

mod assertions;
pub mod samples;

pub use assertions::{assert_tree, CaseAssertion, NodeAssertion};
pub use samples::{load_sample, parse_sample, sample_path};
