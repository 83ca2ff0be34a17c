//! Tree snapshot - a normalized, serializable representation of a subtree
//!
//! Serializers (json, yaml) consume the output of [`snapshot_from_node`] rather than walking
//! the tree themselves. Branch children (else, elsewhere, case arms) are kept in their own
//! fields so the snapshot stays faithful to the node variants.

use super::node::{Branch, Node};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub kind: String,
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthetic: Option<u32>,
    pub depth: usize,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loop_label: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub comments: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<NodeSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub else_children: Option<Vec<NodeSnapshot>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elsewhere: Option<Vec<NodeSnapshot>>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub cases: Vec<CaseSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSnapshot {
    pub condition: String,
    pub statements: Vec<NodeSnapshot>,
}

fn snapshot_all(nodes: &[Node]) -> Vec<NodeSnapshot> {
    nodes.iter().map(snapshot_from_node).collect()
}

/// Build a snapshot of `node` and all its descendants.
pub fn snapshot_from_node(node: &Node) -> NodeSnapshot {
    let mut snapshot = NodeSnapshot {
        kind: node.kind.to_string(),
        line: node.origin.physical_line,
        synthetic: node.origin.synthetic_ordinal,
        depth: node.depth,
        text: node.raw_text.clone(),
        tag: node.tag.clone(),
        label: node.label,
        loop_label: node.loop_label(),
        comments: node.comments.clone(),
        children: Vec::new(),
        else_children: None,
        elsewhere: None,
        cases: Vec::new(),
    };

    for (branch, nodes) in node.branches() {
        match branch {
            Branch::Primary => snapshot.children = snapshot_all(nodes),
            Branch::Else => snapshot.else_children = Some(snapshot_all(nodes)),
            Branch::Elsewhere => snapshot.elsewhere = Some(snapshot_all(nodes)),
            Branch::Case(condition) => snapshot.cases.push(CaseSnapshot {
                condition: condition.to_string(),
                statements: snapshot_all(nodes),
            }),
        }
    }
    snapshot
}
