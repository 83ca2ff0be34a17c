//! Graphviz rendering of the graph view
//!
//! Vertices are labelled `kind` plus the node's display label; edges into else, elsewhere
//! and case branches carry the branch as their label.

use super::registry::{FormatError, Formatter};
use crate::fortran::ast::{Graph, Node, Relation};

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

pub fn to_dot(node: &Node) -> String {
    let graph = Graph::from_node(node);
    let mut out = String::from("digraph f2x {\n    node [shape=box, fontname=\"monospace\"];\n");
    for vertex in &graph.vertices {
        let label = if vertex.label.is_empty() {
            vertex.kind.clone()
        } else {
            format!("{}\\n{}", vertex.kind, escape(&vertex.label))
        };
        out.push_str(&format!("    n{} [label=\"{}\"];\n", vertex.id, label));
    }
    for edge in &graph.edges {
        let label = match &edge.relation {
            Relation::Child => None,
            Relation::Else => Some("else".to_string()),
            Relation::Elsewhere => Some("elsewhere".to_string()),
            Relation::Case(condition) => Some(format!("case {}", escape(condition))),
        };
        match label {
            Some(label) => out.push_str(&format!(
                "    n{} -> n{} [label=\"{}\"];\n",
                edge.from, edge.to, label
            )),
            None => out.push_str(&format!("    n{} -> n{};\n", edge.from, edge.to)),
        }
    }
    out.push_str("}\n");
    out
}

pub struct DotFormatter;

impl Formatter for DotFormatter {
    fn name(&self) -> &str {
        "dot"
    }

    fn serialize(&self, node: &Node) -> Result<String, FormatError> {
        Ok(to_dot(node))
    }

    fn description(&self) -> &str {
        "Graphviz digraph with labelled branch edges"
    }
}
