//! Output formats for trees
//!
//! Every format renders a subtree (usually the root, or the node found by a lookup path):
//! - dump: one line per node, the default
//! - treeviz: icon tree with connectors
//! - dot: Graphviz digraph of the graph view
//! - json / yaml: the serializable snapshot

pub mod dot;
pub mod dump;
pub mod registry;
pub mod serialized;
pub mod treeviz;

pub use dot::{to_dot, DotFormatter};
pub use dump::{dump, DumpFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use serialized::{JsonFormatter, YamlFormatter};
pub use treeviz::{to_treeviz_str, to_treeviz_str_with_params, TreevizFormatter};
