//! Node assertions

use crate::fortran::ast::{Case, Node, NodeKind};

/// Create an assertion builder for a tree (or any subtree)
pub fn assert_tree(node: &Node) -> NodeAssertion<'_> {
    NodeAssertion {
        node,
        context: node.kind.to_string(),
    }
}

fn summarize(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(|n| format!("{}({})", n.kind, n.display_label()))
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct NodeAssertion<'a> {
    pub(crate) node: &'a Node,
    pub(crate) context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn kind(self, expected: NodeKind) -> Self {
        assert_eq!(
            self.node.kind, expected,
            "{}: Expected kind {}, found {}",
            self.context, expected, self.node.kind
        );
        self
    }

    pub fn tag(self, expected: &str) -> Self {
        assert_eq!(
            self.node.tag.as_deref(),
            Some(expected),
            "{}: Expected tag '{}', found {:?}",
            self.context,
            expected,
            self.node.tag
        );
        self
    }

    pub fn no_tag(self) -> Self {
        assert!(
            self.node.tag.is_none(),
            "{}: Expected no tag, found {:?}",
            self.context,
            self.node.tag
        );
        self
    }

    pub fn text(self, expected: &str) -> Self {
        assert_eq!(
            self.node.raw_text, expected,
            "{}: Expected text '{}', found '{}'",
            self.context, expected, self.node.raw_text
        );
        self
    }

    pub fn text_contains(self, substring: &str) -> Self {
        assert!(
            self.node.raw_text.contains(substring),
            "{}: Expected text to contain '{}', found '{}'",
            self.context,
            substring,
            self.node.raw_text
        );
        self
    }

    pub fn line(self, expected: usize) -> Self {
        assert_eq!(
            self.node.origin.physical_line, expected,
            "{}: Expected physical line {}, found {}",
            self.context, expected, self.node.origin.physical_line
        );
        self
    }

    pub fn synthetic(self, expected: u32) -> Self {
        assert_eq!(
            self.node.origin.synthetic_ordinal,
            Some(expected),
            "{}: Expected synthetic ordinal {}, found origin {}",
            self.context,
            expected,
            self.node.origin
        );
        self
    }

    pub fn depth(self, expected: usize) -> Self {
        assert_eq!(
            self.node.depth, expected,
            "{}: Expected depth {}, found {}",
            self.context, expected, self.node.depth
        );
        self
    }

    /// Statement label (`10 continue`).
    pub fn label(self, expected: u32) -> Self {
        assert_eq!(
            self.node.label,
            Some(expected),
            "{}: Expected statement label {}, found {:?}",
            self.context,
            expected,
            self.node.label
        );
        self
    }

    /// Terminating label of an archaic loop.
    pub fn loop_label(self, expected: u32) -> Self {
        assert_eq!(
            self.node.loop_label(),
            Some(expected),
            "{}: Expected loop label {}, found {:?}",
            self.context,
            expected,
            self.node.loop_label()
        );
        self
    }

    pub fn chained(self, expected: bool) -> Self {
        assert_eq!(
            self.node.is_chained(),
            expected,
            "{}: Expected chained = {}",
            self.context,
            expected
        );
        self
    }

    pub fn comments(self, expected: &[&str]) -> Self {
        assert_eq!(
            self.node.comments, expected,
            "{}: Comments differ",
            self.context
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.node.children.len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} children, found {} children: [{}]",
            self.context,
            expected,
            actual,
            summarize(&self.node.children)
        );
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let context = format!("{}:children[{}]", self.context, index);
        assertion(nth(&self.node.children, index, context));
        self
    }

    /// Assert the else branch exists and holds `expected` statements.
    pub fn else_count(self, expected: usize) -> Self {
        let branch = self.else_branch();
        assert_eq!(
            branch.len(),
            expected,
            "{}: Expected {} else statements, found [{}]",
            self.context,
            expected,
            summarize(branch)
        );
        self
    }

    pub fn no_else(self) -> Self {
        assert!(
            self.node.else_children().is_none(),
            "{}: Expected no else branch",
            self.context
        );
        self
    }

    pub fn else_child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let context = format!("{}:else[{}]", self.context, index);
        assertion(nth(self.else_branch(), index, context));
        self
    }

    pub fn elsewhere_child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let node = self.node;
        let branch = node
            .elsewhere()
            .unwrap_or_else(|| panic!("{}: Expected an elsewhere branch", self.context));
        let context = format!("{}:elsewhere[{}]", self.context, index);
        assertion(nth(branch, index, context));
        self
    }

    pub fn case_count(self, expected: usize) -> Self {
        let conditions: Vec<_> = self.node.cases().iter().map(|c| c.condition.as_str()).collect();
        assert_eq!(
            conditions.len(),
            expected,
            "{}: Expected {} cases, found {:?}",
            self.context,
            expected,
            conditions
        );
        self
    }

    pub fn case<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(CaseAssertion<'a>),
    {
        let node = self.node;
        let cases = node.cases();
        assert!(
            index < cases.len(),
            "{}: Case index {} out of bounds ({} cases)",
            self.context,
            index,
            cases.len()
        );
        assertion(CaseAssertion {
            case: &cases[index],
            context: format!("{}:case[{}]", self.context, index),
        });
        self
    }

    fn else_branch(&self) -> &'a [Node] {
        let node = self.node;
        node.else_children()
            .unwrap_or_else(|| panic!("{}: Expected an else branch", self.context))
    }
}

fn nth(nodes: &[Node], index: usize, context: String) -> NodeAssertion<'_> {
    assert!(
        index < nodes.len(),
        "{}: Index out of bounds ({} statements: [{}])",
        context,
        nodes.len(),
        summarize(nodes)
    );
    NodeAssertion {
        node: &nodes[index],
        context,
    }
}

pub struct CaseAssertion<'a> {
    case: &'a Case,
    context: String,
}

impl<'a> CaseAssertion<'a> {
    pub fn condition(self, expected: &str) -> Self {
        assert_eq!(
            self.case.condition, expected,
            "{}: Expected case condition '{}', found '{}'",
            self.context, expected, self.case.condition
        );
        self
    }

    pub fn statement_count(self, expected: usize) -> Self {
        assert_eq!(
            self.case.statements.len(),
            expected,
            "{}: Expected {} statements, found [{}]",
            self.context,
            expected,
            summarize(&self.case.statements)
        );
        self
    }

    pub fn statement<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let context = format!("{}:statements[{}]", self.context, index);
        assertion(nth(&self.case.statements, index, context));
        self
    }
}
