//! Tree definitions for the f2x front end
//!
//!     The tree is made of a single [`Node`] type tagged with a [`NodeKind`]. Statements are
//!     not decomposed: a node keeps the statement text verbatim ("cargo") plus an optional
//!     symbolic tag (declared name, call target, assignment left-hand side...) extracted while
//!     classifying it. Block kinds (program units, conditionals, loops, selections) own their
//!     children; conditionals, selections, archaic labeled loops and `where` loops carry extra
//!     variant state in a [`Payload`].
//!
//! Views
//!
//!     Downstream tooling consumes the tree through a few generic views:
//!
//!         - path lookup by (kind, tag) steps, see [lookup](lookup)
//!         - a flattened vertex/edge graph for visualization, see [graph](graph)
//!         - a serializable snapshot, see [snapshot](snapshot)
//!
//!     Text renderings built on these live in [formats](crate::fortran::formats).
//!
//! Ownership
//!
//!     While parsing, the block stack automaton owns every node under construction; once
//!     parsing completes the root is handed to the caller. Afterwards only tree rewriting
//!     (pruning) changes structure, and it only removes whole subtrees.

pub mod error;
pub mod graph;
pub mod kind;
pub mod lookup;
pub mod node;
pub mod origin;
pub mod snapshot;

pub use error::{format_source_context, ParseError, ParseResult};
pub use graph::{Edge, Graph, Relation, Vertex};
pub use kind::{NodeKind, UnknownKind};
pub use lookup::{parse_path, PathStep};
pub use node::{Branch, BranchRefusal, Case, Node, Payload, Terminator};
pub use origin::Origin;
pub use snapshot::{snapshot_from_node, CaseSnapshot, NodeSnapshot};
