//! Text dump
//!
//!     One line per node, indented two spaces per depth level:
//!
//!         kind (depth) [tag] #label: raw text
//!
//!     The tag, statement label and text parts are left out when absent. Else, elsewhere
//!     and case branches are introduced by a `-- else` / `-- elsewhere` / `-- case (...)` line
//!     at the depth of their children. Variants add a suffix to the base line: an archaic loop
//!     shows its terminal label (`=> 10`), a conditional continuing an `else if` chain shows
//!     `(chained)`.

use super::registry::{FormatError, Formatter};
use crate::fortran::ast::{Branch, Node, Payload};

pub fn dump(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn header(node: &Node) -> String {
    let mut line = format!("{} ({})", node.kind, node.depth);
    if let Some(tag) = &node.tag {
        line.push_str(&format!(" [{}]", tag));
    }
    if let Some(label) = node.label {
        line.push_str(&format!(" #{}", label));
    }
    if !node.raw_text.is_empty() {
        line.push_str(": ");
        line.push_str(&node.raw_text);
    }
    match &node.payload {
        Payload::ArchaicLoop { loop_label } => line.push_str(&format!(" => {}", loop_label)),
        Payload::Conditional { chained: true, .. } => line.push_str(" (chained)"),
        Payload::Conditional { .. }
        | Payload::Selection { .. }
        | Payload::Masked { .. }
        | Payload::Plain => {}
    }
    line
}

fn write_node(node: &Node, out: &mut String) {
    out.push_str(&"  ".repeat(node.depth));
    out.push_str(&header(node));
    out.push('\n');

    let section_indent = "  ".repeat(node.depth + 1);
    for (branch, children) in node.branches() {
        let section = match branch {
            Branch::Primary => None,
            Branch::Else => Some("else".to_string()),
            Branch::Elsewhere => Some("elsewhere".to_string()),
            Branch::Case(condition) => Some(format!("case {}", condition)),
        };
        if let Some(section) = section {
            out.push_str(&format!("{}-- {}\n", section_indent, section));
        }
        for child in children {
            write_node(child, out);
        }
    }
}

/// Formatter implementation for the text dump
pub struct DumpFormatter;

impl Formatter for DumpFormatter {
    fn name(&self) -> &str {
        "dump"
    }

    fn serialize(&self, node: &Node) -> Result<String, FormatError> {
        Ok(dump(node))
    }

    fn description(&self) -> &str {
        "One line per node: kind (depth) [tag]: text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fortran::transforms::standard::STRING_TO_TREE;

    fn parse(source: &str) -> Node {
        STRING_TO_TREE.run(source.to_string()).unwrap()
    }

    #[test]
    fn test_dump_subroutine() {
        let root = parse("subroutine foo(x)\ninteger x\nx = 1\nend subroutine foo\n");
        insta::assert_snapshot!(dump(&root), @r"
root (0)
  subroutine (1) [foo]: subroutine foo(x)
    declaration (2) [x]: integer x
    assignment (2) [x]: x = 1
");
    }

    #[test]
    fn test_dump_branches_and_variants() {
        let source = "if (a) then\ncall one\nelse\ncall two\nend if\ndo 10 i = 1, 3\n10 continue\n";
        let root = parse(source);
        insta::assert_snapshot!(dump(&root), @r"
root (0)
  conditional (1): if (a) then
    call (2) [one]: call one
    -- else
    call (2) [two]: call two
  archaic-labeled-loop (1) [i]: do 10 i = 1, 3 => 10
");
    }

    #[test]
    fn test_dump_case_sections() {
        let source = "select case (n)\ncase (1)\nx = 1\ncase default\nx = 0\nend select\n";
        let out = dump(&parse(source));
        assert!(out.contains("    -- case (1)\n    assignment (2) [x]: x = 1\n"));
        assert!(out.contains("    -- case default\n"));
    }
}
