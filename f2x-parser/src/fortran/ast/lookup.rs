//! Path lookup
//!
//!     A path is a sequence of (kind, tag) steps. Lookup starts at a node and, for each step,
//!     descends into the first child (searching primary children, then else/elsewhere, then
//!     case arms) whose kind matches and whose tag matches case-insensitively. A step without
//!     a tag matches any tag.
//!
//!     The textual form used on the command line is `kind[:tag]/kind[:tag]/...`, for example
//!     `module:physics/subroutine:step/loop`.

use super::kind::{NodeKind, UnknownKind};
use super::node::Node;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    pub kind: NodeKind,
    pub tag: Option<String>,
}

impl PathStep {
    pub fn new(kind: NodeKind, tag: Option<&str>) -> Self {
        Self {
            kind,
            tag: tag.map(str::to_string),
        }
    }

    pub fn matches(&self, node: &Node) -> bool {
        if node.kind != self.kind {
            return false;
        }
        match (&self.tag, &node.tag) {
            (None, _) => true,
            (Some(wanted), Some(actual)) => wanted.eq_ignore_ascii_case(actual),
            (Some(_), None) => false,
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{}:{}", self.kind, tag),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl FromStr for PathStep {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((kind, tag)) if !tag.trim().is_empty() => {
                Ok(PathStep::new(kind.parse()?, Some(tag.trim())))
            }
            Some((kind, _)) => Ok(PathStep::new(kind.parse()?, None)),
            None => Ok(PathStep::new(s.parse()?, None)),
        }
    }
}

/// Parse `kind[:tag]/kind[:tag]/...` into steps. Empty segments are ignored.
pub fn parse_path(path: &str) -> Result<Vec<PathStep>, UnknownKind> {
    path.split('/')
        .filter(|segment| !segment.trim().is_empty())
        .map(str::parse)
        .collect()
}

impl Node {
    /// Follow `path` from this node. An empty path yields the node itself.
    pub fn find_path(&self, path: &[PathStep]) -> Option<&Node> {
        let Some((step, rest)) = path.split_first() else {
            return Some(self);
        };
        self.branches()
            .into_iter()
            .flat_map(|(_, nodes)| nodes.iter())
            .find(|child| step.matches(child))
            .and_then(|child| child.find_path(rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fortran::ast::Origin;

    fn tagged(kind: NodeKind, line: usize, tag: &str) -> Node {
        Node::new(kind, Origin::new(line), tag).with_tag(Some(tag.to_string()))
    }

    fn sample_tree() -> Node {
        let mut module = tagged(NodeKind::Module, 1, "physics");
        let mut first = tagged(NodeKind::Subroutine, 2, "init");
        first.children.push(tagged(NodeKind::Assignment, 3, "x"));
        let mut second = tagged(NodeKind::Subroutine, 5, "step");
        second.children.push(tagged(NodeKind::Call, 6, "advance"));
        module.children.push(first);
        module.children.push(second);
        let mut root = Node::root();
        root.children.push(module);
        root
    }

    #[test]
    fn test_find_path_descends_first_match_per_level() {
        let root = sample_tree();
        let path = parse_path("module:physics/subroutine:STEP/call").unwrap();
        let found = root.find_path(&path).expect("call node");
        assert_eq!(found.tag.as_deref(), Some("advance"));
    }

    #[test]
    fn test_untagged_step_takes_first_of_kind() {
        let root = sample_tree();
        let path = parse_path("module/subroutine").unwrap();
        assert_eq!(root.find_path(&path).unwrap().tag.as_deref(), Some("init"));
    }

    #[test]
    fn test_first_match_does_not_backtrack() {
        // The first untagged subroutine is `init`, which has no call child.
        let root = sample_tree();
        let path = parse_path("module/subroutine/call").unwrap();
        assert!(root.find_path(&path).is_none());
    }

    #[test]
    fn test_empty_path_is_the_start_node() {
        let root = sample_tree();
        assert_eq!(root.find_path(&[]).unwrap().kind, NodeKind::Root);
    }

    #[test]
    fn test_parse_path_rejects_unknown_kind() {
        assert!(parse_path("module/widget").is_err());
    }
}
