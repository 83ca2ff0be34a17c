//! Tree nodes
//!
//!     There is a single node struct. Fields common to every kind live on [`Node`]; the
//!     state only some block kinds need lives in [`Payload`]:
//!
//!         - Conditional: the optional else branch, and whether the node continues an
//!           `else if` chain.
//!         - Selection: the ordered `case` list and the cursor of the case currently being
//!           filled while the block is open.
//!         - Archaic labeled loop: the numeric label of its terminal statement.
//!         - Where loop: the optional `elsewhere` branch.
//!
//!     Child sequences are ordered in execution order. While a block is open, statements go
//!     to its *active* sequence (see [`Node::active_children_mut`]), which moves from the
//!     primary children to the else branch or to the latest case as branch statements
//!     arrive.

use super::kind::NodeKind;
use super::origin::Origin;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub origin: Origin,
    pub depth: usize,
    pub raw_text: String,
    pub tag: Option<String>,
    /// Numeric statement label written in front of the statement, if any.
    pub label: Option<u32>,
    pub comments: Vec<String>,
    pub children: Vec<Node>,
    pub payload: Payload,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Plain,
    Conditional {
        else_children: Option<Vec<Node>>,
        chained: bool,
    },
    Selection {
        cases: Vec<Case>,
        cursor: Option<usize>,
    },
    ArchaicLoop {
        loop_label: u32,
    },
    Masked {
        elsewhere: Option<Vec<Node>>,
    },
}

/// One `case (...)` arm of a selection block.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub condition: String,
    pub statements: Vec<Node>,
}

/// Which of a node's child sequences a run of children belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch<'a> {
    Primary,
    Else,
    Elsewhere,
    Case(&'a str),
}

/// Statement forms that can end an open block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    /// `end if`, `end do`, `end subroutine`... naming the kind they close.
    Keyword(NodeKind),
    /// A bare `end`, which closes any program unit.
    BareEnd,
    /// A labeled terminal statement of an archaic `do` loop.
    Label(u32),
}

/// Why a branch statement could not be taken by the open block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchRefusal {
    /// The block kind has no such branch (e.g. `else` inside a loop).
    WrongKind,
    /// The branch was already entered (a second `else`).
    AlreadyEntered,
}

impl Node {
    pub fn root() -> Self {
        Self::new(NodeKind::Root, Origin::new(0), String::new())
    }

    /// Create a node with the payload its kind requires.
    ///
    /// Archaic loops need their label and are built with [`Node::archaic_loop`].
    pub fn new(kind: NodeKind, origin: Origin, raw_text: impl Into<String>) -> Self {
        let payload = match kind {
            NodeKind::Conditional => Payload::Conditional {
                else_children: None,
                chained: false,
            },
            NodeKind::Selection => Payload::Selection {
                cases: Vec::new(),
                cursor: None,
            },
            NodeKind::WhereLoop => Payload::Masked { elsewhere: None },
            _ => Payload::Plain,
        };
        Self {
            kind,
            origin,
            depth: 0,
            raw_text: raw_text.into(),
            tag: None,
            label: None,
            comments: Vec::new(),
            children: Vec::new(),
            payload,
        }
    }

    pub fn archaic_loop(origin: Origin, raw_text: impl Into<String>, loop_label: u32) -> Self {
        Self::new(NodeKind::ArchaicLabeledLoop, origin, raw_text)
            .with_payload(Payload::ArchaicLoop { loop_label })
    }

    pub fn at_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_label(mut self, label: Option<u32>) -> Self {
        self.label = label;
        self
    }

    pub fn with_comments(mut self, comments: Vec<String>) -> Self {
        self.comments = comments;
        self
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// Mark a conditional as the continuation of an `else if` chain.
    pub fn chained(mut self) -> Self {
        if let Payload::Conditional { chained, .. } = &mut self.payload {
            *chained = true;
        }
        self
    }

    pub fn is_chained(&self) -> bool {
        matches!(self.payload, Payload::Conditional { chained: true, .. })
    }

    pub fn loop_label(&self) -> Option<u32> {
        match self.payload {
            Payload::ArchaicLoop { loop_label } => Some(loop_label),
            _ => None,
        }
    }

    pub fn else_children(&self) -> Option<&[Node]> {
        match &self.payload {
            Payload::Conditional {
                else_children: Some(children),
                ..
            } => Some(children),
            _ => None,
        }
    }

    pub fn elsewhere(&self) -> Option<&[Node]> {
        match &self.payload {
            Payload::Masked {
                elsewhere: Some(children),
            } => Some(children),
            _ => None,
        }
    }

    pub fn cases(&self) -> &[Case] {
        match &self.payload {
            Payload::Selection { cases, .. } => cases,
            _ => &[],
        }
    }

    /// Display label: the tag when there is one, the statement text otherwise.
    pub fn display_label(&self) -> &str {
        self.tag.as_deref().unwrap_or(&self.raw_text)
    }

    /// Every child sequence in export order: primary children first, then the variant's
    /// branches.
    pub fn branches(&self) -> Vec<(Branch<'_>, &[Node])> {
        let mut branches = vec![(Branch::Primary, self.children.as_slice())];
        match &self.payload {
            Payload::Conditional {
                else_children: Some(children),
                ..
            } => branches.push((Branch::Else, children.as_slice())),
            Payload::Masked {
                elsewhere: Some(children),
            } => branches.push((Branch::Elsewhere, children.as_slice())),
            Payload::Selection { cases, .. } => {
                for case in cases {
                    branches.push((Branch::Case(&case.condition), case.statements.as_slice()));
                }
            }
            Payload::Conditional { .. }
            | Payload::Masked { .. }
            | Payload::ArchaicLoop { .. }
            | Payload::Plain => {}
        }
        branches
    }

    /// Mutable access to every child sequence, in the same order as [`Node::branches`].
    pub fn branches_mut(&mut self) -> Vec<&mut Vec<Node>> {
        let mut branches = vec![&mut self.children];
        match &mut self.payload {
            Payload::Conditional {
                else_children: Some(children),
                ..
            }
            | Payload::Masked {
                elsewhere: Some(children),
            } => branches.push(children),
            Payload::Selection { cases, .. } => {
                branches.extend(cases.iter_mut().map(|case| &mut case.statements));
            }
            Payload::Conditional { .. }
            | Payload::Masked { .. }
            | Payload::ArchaicLoop { .. }
            | Payload::Plain => {}
        }
        branches
    }

    /// The sequence new statements are appended to while this block is open.
    pub fn active_children_mut(&mut self) -> &mut Vec<Node> {
        match &mut self.payload {
            Payload::Conditional {
                else_children: Some(children),
                ..
            }
            | Payload::Masked {
                elsewhere: Some(children),
            } => children,
            Payload::Selection {
                cases,
                cursor: Some(index),
            } => &mut cases[*index].statements,
            Payload::Conditional { .. }
            | Payload::Masked { .. }
            | Payload::Selection { .. }
            | Payload::ArchaicLoop { .. }
            | Payload::Plain => &mut self.children,
        }
    }

    pub fn append(&mut self, child: Node) {
        self.active_children_mut().push(child);
    }

    /// Switch a conditional to its else branch.
    pub fn enter_else(&mut self) -> Result<(), BranchRefusal> {
        match &mut self.payload {
            Payload::Conditional {
                else_children: Some(_),
                ..
            } => Err(BranchRefusal::AlreadyEntered),
            Payload::Conditional { else_children, .. } => {
                *else_children = Some(Vec::new());
                Ok(())
            }
            _ => Err(BranchRefusal::WrongKind),
        }
    }

    /// Switch a where loop to its elsewhere branch.
    pub fn enter_elsewhere(&mut self) -> Result<(), BranchRefusal> {
        match &mut self.payload {
            Payload::Masked { elsewhere: Some(_) } => Err(BranchRefusal::AlreadyEntered),
            Payload::Masked { elsewhere } => {
                *elsewhere = Some(Vec::new());
                Ok(())
            }
            _ => Err(BranchRefusal::WrongKind),
        }
    }

    /// Open a new case arm on a selection and point the cursor at it.
    pub fn enter_case(&mut self, condition: impl Into<String>) -> Result<(), BranchRefusal> {
        match &mut self.payload {
            Payload::Selection { cases, cursor } => {
                cases.push(Case {
                    condition: condition.into(),
                    statements: Vec::new(),
                });
                *cursor = Some(cases.len() - 1);
                Ok(())
            }
            _ => Err(BranchRefusal::WrongKind),
        }
    }

    /// Whether `terminator` legitimately closes this block.
    pub fn is_terminated_by(&self, terminator: Terminator) -> bool {
        match &self.payload {
            Payload::ArchaicLoop { loop_label } => {
                matches!(terminator, Terminator::Label(label) if label == *loop_label)
            }
            Payload::Conditional { .. }
            | Payload::Selection { .. }
            | Payload::Masked { .. }
            | Payload::Plain => match terminator {
                Terminator::Keyword(kind) => kind == self.kind,
                Terminator::BareEnd => self.kind.is_program_unit(),
                Terminator::Label(_) => false,
            },
        }
    }

    /// Whether every child sequence is empty.
    pub fn is_structurally_empty(&self) -> bool {
        self.branches().iter().all(|(_, nodes)| nodes.is_empty())
    }

    /// Pre-order traversal over this node and all descendants.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        visit(self);
        for (_, nodes) in self.branches() {
            for node in nodes {
                node.walk(visit);
            }
        }
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_| count += 1);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stmt(kind: NodeKind, line: usize, text: &str) -> Node {
        Node::new(kind, Origin::new(line), text).at_depth(2)
    }

    #[test]
    fn test_conditional_routes_statements_to_else_branch() {
        let mut cond = Node::new(NodeKind::Conditional, Origin::new(1), "if (x) then");
        cond.append(stmt(NodeKind::Assignment, 2, "a = 1"));
        cond.enter_else().unwrap();
        cond.append(stmt(NodeKind::Assignment, 4, "a = 2"));

        assert_eq!(cond.children.len(), 1);
        assert_eq!(cond.else_children().unwrap().len(), 1);
        assert_eq!(cond.enter_else(), Err(BranchRefusal::AlreadyEntered));
    }

    #[test]
    fn test_selection_cursor_follows_latest_case() {
        let mut select = Node::new(NodeKind::Selection, Origin::new(1), "select case (n)");
        select.enter_case("(1)").unwrap();
        select.append(stmt(NodeKind::Call, 3, "call one"));
        select.enter_case("default").unwrap();
        select.append(stmt(NodeKind::Call, 5, "call other"));
        select.append(stmt(NodeKind::Call, 6, "call again"));

        let cases = select.cases();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].statements.len(), 1);
        assert_eq!(cases[1].condition, "default");
        assert_eq!(cases[1].statements.len(), 2);
        assert!(select.children.is_empty());
    }

    #[test]
    fn test_else_refused_outside_conditional() {
        let mut loop_node = Node::new(NodeKind::Loop, Origin::new(1), "do i = 1, n");
        assert_eq!(loop_node.enter_else(), Err(BranchRefusal::WrongKind));
        assert_eq!(loop_node.enter_case("(1)"), Err(BranchRefusal::WrongKind));
    }

    #[test]
    fn test_archaic_loop_terminates_only_on_its_label() {
        let node = Node::archaic_loop(Origin::new(1), "do 10 i = 1, 10", 10);
        assert!(node.is_terminated_by(Terminator::Label(10)));
        assert!(!node.is_terminated_by(Terminator::Label(20)));
        assert!(!node.is_terminated_by(Terminator::Keyword(NodeKind::Loop)));
        assert!(!node.is_terminated_by(Terminator::Keyword(NodeKind::ArchaicLabeledLoop)));
    }

    #[test]
    fn test_bare_end_closes_program_units_only() {
        let sub = Node::new(NodeKind::Subroutine, Origin::new(1), "subroutine s");
        let cond = Node::new(NodeKind::Conditional, Origin::new(1), "if (x) then");
        assert!(sub.is_terminated_by(Terminator::BareEnd));
        assert!(!cond.is_terminated_by(Terminator::BareEnd));
        assert!(cond.is_terminated_by(Terminator::Keyword(NodeKind::Conditional)));
    }

    #[test]
    fn test_walk_visits_branches_in_export_order() {
        let mut cond = Node::new(NodeKind::Conditional, Origin::new(1), "if (x) then");
        cond.append(stmt(NodeKind::Assignment, 2, "a = 1"));
        cond.enter_else().unwrap();
        cond.append(stmt(NodeKind::Assignment, 4, "a = 2"));

        let mut lines = Vec::new();
        cond.walk(&mut |node| lines.push(node.origin.physical_line));
        assert_eq!(lines, vec![1, 2, 4]);
        assert_eq!(cond.node_count(), 3);
    }
}
