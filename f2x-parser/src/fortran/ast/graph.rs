//! Flattened graph view of a tree
//!
//! Every node becomes a vertex with a numeric id (pre-order) and a label; every
//! parent/child relation becomes an edge. Children held in a conditional's else branch, a
//! where loop's elsewhere branch or a selection's case arms get edges labelled with that
//! relation, in addition to the plain child edges of the base node.

use super::node::{Branch, Node};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vertex {
    pub id: usize,
    pub kind: String,
    pub label: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Relation {
    Child,
    Else,
    Elsewhere,
    Case(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub relation: Relation,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Graph {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn from_node(node: &Node) -> Self {
        let mut graph = Graph::default();
        graph.add_subtree(node);
        graph
    }

    fn add_subtree(&mut self, node: &Node) -> usize {
        let id = self.vertices.len();
        self.vertices.push(Vertex {
            id,
            kind: node.kind.to_string(),
            label: node.display_label().to_string(),
            line: node.origin.physical_line,
        });

        for (branch, children) in node.branches() {
            let relation = match branch {
                Branch::Primary => Relation::Child,
                Branch::Else => Relation::Else,
                Branch::Elsewhere => Relation::Elsewhere,
                Branch::Case(condition) => Relation::Case(condition.to_string()),
            };
            for child in children {
                let child_id = self.add_subtree(child);
                self.edges.push(Edge {
                    from: id,
                    to: child_id,
                    relation: relation.clone(),
                });
            }
        }
        id
    }
}
