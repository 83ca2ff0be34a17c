//! Treeviz formatter for trees
//!
//! Treeviz is a compact visual representation of a tree: one line per node, an icon per kind
//! and box-drawing connectors showing nesting. Labels are the node's tag when it has one and
//! its statement text otherwise, truncated to 30 characters.
//!
//! Else, elsewhere and case branches appear as pseudo entries (`↳ else`, `↳ case (1)`) whose
//! children are the branch's statements.
//!
//! Example:
//!
//!   ⧉ root
//!   └─ § step
//!     ├─ ∷ x
//!     ├─ ↻ i
//!     │ └─ ≔ x
//!     └─ ↩ return
//!
//! Passing `show-linum=true` prefixes each node line with its physical line number.
//!
//! Icons
//!     Units: root ⧉, module ▣, program ▶, function ƒ, subroutine §, interface ⊶,
//!            derived-type ⊞
//!     Blocks: conditional ⑂, selection ☰, loop ↻, archaic-labeled-loop ↺, where-loop ⋔
//!     Statements: declaration ∷, using ⇲, implicit ∅, contains ⊃, call →, assignment ≔,
//!                 stop ■, return ↩, cycle ⟲, exit ⇥, continue ·, goto ↪, format ¶,
//!                 read ⇐, write ⇒, print ⎙, allocate ⊕, deallocate ⊖, file-control ⎘,
//!                 empty ○, preprocessor-directive #
//!     Branch entries: ↳

use super::registry::{FormatError, Formatter};
use crate::fortran::ast::{Branch, Node, NodeKind};
use std::collections::HashMap;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

/// Get the icon for a node kind
fn get_icon(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Root => "⧉",
        NodeKind::Module => "▣",
        NodeKind::Program => "▶",
        NodeKind::Function => "ƒ",
        NodeKind::Subroutine => "§",
        NodeKind::Interface => "⊶",
        NodeKind::DerivedType => "⊞",
        NodeKind::Conditional => "⑂",
        NodeKind::Selection => "☰",
        NodeKind::Loop => "↻",
        NodeKind::ArchaicLabeledLoop => "↺",
        NodeKind::WhereLoop => "⋔",
        NodeKind::Declaration => "∷",
        NodeKind::Using => "⇲",
        NodeKind::Implicit => "∅",
        NodeKind::Contains => "⊃",
        NodeKind::Call => "→",
        NodeKind::Assignment => "≔",
        NodeKind::Stop => "■",
        NodeKind::Return => "↩",
        NodeKind::Cycle => "⟲",
        NodeKind::Exit => "⇥",
        NodeKind::Continue => "·",
        NodeKind::Goto => "↪",
        NodeKind::Format => "¶",
        NodeKind::Read => "⇐",
        NodeKind::Write => "⇒",
        NodeKind::Print => "⎙",
        NodeKind::Allocate => "⊕",
        NodeKind::Deallocate => "⊖",
        NodeKind::FileControl => "⎘",
        NodeKind::Empty => "○",
        NodeKind::PreprocessorDirective => "#",
    }
}

fn label(node: &Node) -> String {
    let text = match node.kind {
        NodeKind::Root => "root",
        _ => node.display_label(),
    };
    truncate(text, 30)
}

/// A line in the rendered tree: either a node or a branch pseudo entry.
enum Entry<'a> {
    Node(&'a Node),
    Branch(String, &'a [Node]),
}

fn entries(node: &Node) -> Vec<Entry<'_>> {
    let mut entries = Vec::new();
    for (branch, children) in node.branches() {
        match branch {
            Branch::Primary => entries.extend(children.iter().map(Entry::Node)),
            Branch::Else => entries.push(Entry::Branch("else".to_string(), children)),
            Branch::Elsewhere => entries.push(Entry::Branch("elsewhere".to_string(), children)),
            Branch::Case(condition) => {
                entries.push(Entry::Branch(format!("case {}", condition), children))
            }
        }
    }
    entries
}

fn format_entry(
    entry: &Entry<'_>,
    prefix: &str,
    is_last: bool,
    show_linum: bool,
    output: &mut String,
) {
    let connector = if is_last { "└─" } else { "├─" };
    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });

    let children: Vec<Entry<'_>> = match entry {
        Entry::Node(node) => {
            let linum_prefix = if show_linum {
                format!("{:02} ", node.origin.physical_line)
            } else {
                String::new()
            };
            output.push_str(&format!(
                "{}{}{} {} {}\n",
                linum_prefix,
                prefix,
                connector,
                get_icon(node.kind),
                label(node)
            ));
            entries(node)
        }
        Entry::Branch(name, nodes) => {
            let linum_prefix = if show_linum { "   " } else { "" };
            output.push_str(&format!(
                "{}{}{} ↳ {}\n",
                linum_prefix,
                prefix,
                connector,
                truncate(name, 30)
            ));
            nodes.iter().map(Entry::Node).collect()
        }
    };

    let count = children.len();
    for (i, child) in children.iter().enumerate() {
        format_entry(child, &child_prefix, i + 1 == count, show_linum, output);
    }
}

pub fn to_treeviz_str(node: &Node) -> String {
    to_treeviz_str_with_params(node, &HashMap::new())
}

pub fn to_treeviz_str_with_params(node: &Node, params: &HashMap<String, String>) -> String {
    let show_linum = params
        .get("show-linum")
        .map(|v| v != "false")
        .unwrap_or(false);

    let mut output = format!("{} {}\n", get_icon(node.kind), label(node));
    let children = entries(node);
    let count = children.len();
    for (i, child) in children.iter().enumerate() {
        format_entry(child, "", i + 1 == count, show_linum, &mut output);
    }
    output
}

/// Formatter implementation for treeviz format
pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, node: &Node) -> Result<String, FormatError> {
        Ok(to_treeviz_str(node))
    }

    fn description(&self) -> &str {
        "Visual tree representation with connectors and Unicode icons"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fortran::transforms::standard::STRING_TO_TREE;

    #[test]
    fn test_treeviz_connectors_and_branches() {
        let root = STRING_TO_TREE
            .run("if (a) then\ncall one\nelse\ncall two\nend if\nstop\n".to_string())
            .unwrap();
        insta::assert_snapshot!(to_treeviz_str(&root), @r"
⧉ root
├─ ⑂ if (a) then
│ ├─ → one
│ └─ ↳ else
│   └─ → two
└─ ■ stop
");
    }

    #[test]
    fn test_truncation_and_line_numbers() {
        let root = STRING_TO_TREE
            .run("\nprint *, 'a very long message that does not fit'\n".to_string())
            .unwrap();
        let mut params = HashMap::new();
        params.insert("show-linum".to_string(), "true".to_string());
        let out = to_treeviz_str_with_params(&root, &params);
        assert!(out.contains("02 └─ ⎙ print *, 'a very long message ..."));
    }
}
