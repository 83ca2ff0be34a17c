//! Block stack automaton
//!
//!     Folds classified statements, in physical order, into a tree. The automaton owns the
//!     root plus a stack of open blocks; the innermost open block is the "top".
//!
//!         - opener: a new node one level deeper than the top is pushed
//!         - simple statement: appended to the top's active child sequence
//!         - branch (`else`, `case`, `elsewhere`): the top switches its active sequence
//!         - closer: validated against the top, which is popped and attached to its parent
//!
//!     A node is attached to its parent when it is popped. Since nothing else can be appended
//!     to the parent while the node is open, sibling order is the same as if it had been
//!     appended when pushed.
//!
//! Archaic Loops
//!
//!     `do 10 i = 1, n` is closed by the statement labeled 10. A labeled `continue` or `end do`
//!     closes the loop without becoming a child; any other labeled statement is appended first
//!     and then closes the loop. Several loops may share a terminal label, in which case all of them
//!     close. A labeled statement whose label does not match the top loop is an ordinary
//!     statement and the loop stays open.
//!
//! Inline Clauses
//!
//!     `if (cond) stmt` and `where (mask) stmt` open their block, feed the trailing statement
//!     into it with a synthetic origin, and close it right away.

use super::classifier::{Action, Classified, Classifier};
use crate::fortran::ast::{
    BranchRefusal, Node, NodeKind, Origin, ParseError, ParseResult, Terminator,
};
use crate::fortran::diagnostics::Diagnostics;
use crate::fortran::lexing::LogicalLine;
use tracing::debug;

pub struct BlockStack {
    root: Node,
    open: Vec<Node>,
    diagnostics: Diagnostics,
}

impl BlockStack {
    pub fn new(diagnostics: Diagnostics) -> Self {
        Self {
            root: Node::root(),
            open: Vec::new(),
            diagnostics,
        }
    }

    /// Number of blocks currently open, the root excluded.
    pub fn open_blocks(&self) -> usize {
        self.open.len()
    }

    /// The innermost open block (the root when nothing is open).
    pub fn top(&self) -> &Node {
        self.open.last().unwrap_or(&self.root)
    }

    fn top_mut(&mut self) -> &mut Node {
        match self.open.last_mut() {
            Some(node) => node,
            None => &mut self.root,
        }
    }

    /// Classify `line` and apply it.
    pub fn feed(&mut self, line: &LogicalLine, classifier: &Classifier) -> ParseResult<()> {
        let statement = classifier.classify(line)?;
        let diagnostics = self.diagnostics.clone();
        let _span = diagnostics.enter();
        self.apply(
            statement,
            Origin::new(line.start_line),
            line.comments.clone(),
            classifier,
        )
    }

    /// Apply an already classified statement.
    pub fn apply(
        &mut self,
        statement: Classified,
        origin: Origin,
        comments: Vec<String>,
        classifier: &Classifier,
    ) -> ParseResult<()> {
        match statement.action.clone() {
            Action::Skip => Ok(()),
            Action::Simple(kind) => {
                self.simple(kind, statement, origin, comments);
                Ok(())
            }
            Action::Open(kind) => {
                let node = self.node(kind, statement, origin, comments);
                self.push(node);
                Ok(())
            }
            Action::OpenArchaic { loop_label } => {
                let node = Node::archaic_loop(origin, statement.text, loop_label)
                    .at_depth(self.child_depth())
                    .with_tag(statement.tag)
                    .with_label(statement.label)
                    .with_comments(comments);
                self.push(node);
                Ok(())
            }
            Action::Conditional { trailing } => self.open_with_trailing(
                NodeKind::Conditional,
                trailing,
                statement,
                origin,
                comments,
                classifier,
            ),
            Action::Where { trailing } => self.open_with_trailing(
                NodeKind::WhereLoop,
                trailing,
                statement,
                origin,
                comments,
                classifier,
            ),
            Action::ElseIf => self.else_if(statement, origin, comments),
            Action::Else => {
                self.enter_branch(NodeKind::Conditional, statement, origin, comments, |top| {
                    top.enter_else()
                })
            }
            Action::ElseWhere => {
                self.enter_branch(NodeKind::WhereLoop, statement, origin, comments, |top| {
                    top.enter_elsewhere()
                })
            }
            Action::Case { condition } => {
                self.enter_branch(NodeKind::Selection, statement, origin, comments, |top| {
                    top.enter_case(condition)
                })
            }
            Action::Close(NodeKind::Loop)
                if statement.label.is_some_and(|label| self.top_closes_on(label)) =>
            {
                // `10 end do` ends `do 10 ...` the way `10 continue` does
                if let Some(label) = statement.label {
                    self.close_labeled(label, comments);
                }
                Ok(())
            }
            Action::Close(kind) => {
                self.close(Terminator::Keyword(kind), kind, &statement.text, origin, comments)
            }
            Action::CloseUnit => {
                let expected = self.innermost_unit();
                self.close(Terminator::BareEnd, expected, &statement.text, origin, comments)
            }
        }
    }

    /// Hand over the finished tree. Fails if any block is still open.
    pub fn finish(self) -> ParseResult<Node> {
        if let Some(top) = self.open.last() {
            return Err(Box::new(ParseError::UnterminatedBlock {
                kind: top.kind,
                line: top.origin.physical_line,
            }));
        }
        Ok(self.root)
    }

    fn child_depth(&self) -> usize {
        self.top().depth + 1
    }

    fn node(
        &self,
        kind: NodeKind,
        statement: Classified,
        origin: Origin,
        comments: Vec<String>,
    ) -> Node {
        Node::new(kind, origin, statement.text)
            .at_depth(self.child_depth())
            .with_tag(statement.tag)
            .with_label(statement.label)
            .with_comments(comments)
    }

    fn push(&mut self, node: Node) {
        debug!(kind = %node.kind, line = %node.origin, depth = node.depth, "open");
        self.open.push(node);
    }

    /// Pop the top and attach it to its parent.
    fn pop(&mut self, comments: Vec<String>) {
        if let Some(mut node) = self.open.pop() {
            debug!(kind = %node.kind, line = %node.origin, "close");
            node.comments.extend(comments);
            self.top_mut().append(node);
        }
    }

    fn top_closes_on(&self, label: u32) -> bool {
        self.open
            .last()
            .is_some_and(|top| top.is_terminated_by(Terminator::Label(label)))
    }

    /// Close every open archaic loop on top of the stack that ends at `label`.
    fn close_labeled(&mut self, label: u32, comments: Vec<String>) {
        let mut comments = Some(comments);
        while self.top_closes_on(label) {
            self.pop(comments.take().unwrap_or_default());
        }
    }

    fn simple(
        &mut self,
        kind: NodeKind,
        statement: Classified,
        origin: Origin,
        comments: Vec<String>,
    ) {
        let label = statement.label;
        if let Some(label) = label.filter(|label| self.top_closes_on(*label)) {
            if kind == NodeKind::Continue {
                self.close_labeled(label, comments);
                return;
            }
        }

        let node = self.node(kind, statement, origin, comments);
        self.top_mut().append(node);
        if let Some(label) = label {
            self.close_labeled(label, Vec::new());
        }
    }

    fn open_with_trailing(
        &mut self,
        kind: NodeKind,
        trailing: Option<String>,
        statement: Classified,
        origin: Origin,
        comments: Vec<String>,
        classifier: &Classifier,
    ) -> ParseResult<()> {
        let text = statement.text.clone();
        let label = statement.label;
        let node = self.node(kind, statement, origin, comments);
        self.push(node);

        let Some(trailing) = trailing else {
            return Ok(());
        };
        let inner = classifier.classify_statement(&trailing, origin.physical_line)?;
        self.apply(inner, origin.synthetic(1), Vec::new(), classifier)?;
        self.close(Terminator::Keyword(kind), kind, &text, origin, Vec::new())?;
        // `10 if (x) y = 1` may end an archaic loop
        if let Some(label) = label {
            self.close_labeled(label, Vec::new());
        }
        Ok(())
    }

    fn else_if(
        &mut self,
        statement: Classified,
        origin: Origin,
        comments: Vec<String>,
    ) -> ParseResult<()> {
        let top = self.top();
        if top.kind != NodeKind::Conditional {
            return Err(mismatch(NodeKind::Conditional, top.kind, &statement.text, origin));
        }
        if top.else_children().is_some() {
            return Err(misplaced(top.kind, &statement.text, origin));
        }
        self.pop(Vec::new());
        let node = self
            .node(NodeKind::Conditional, statement, origin, comments)
            .chained();
        self.push(node);
        Ok(())
    }

    fn enter_branch(
        &mut self,
        expected: NodeKind,
        statement: Classified,
        origin: Origin,
        comments: Vec<String>,
        enter: impl FnOnce(&mut Node) -> Result<(), BranchRefusal>,
    ) -> ParseResult<()> {
        let top = self.top_mut();
        let found = top.kind;
        match enter(&mut *top) {
            Ok(()) => {
                top.comments.extend(comments);
                Ok(())
            }
            Err(BranchRefusal::WrongKind) => {
                Err(mismatch(expected, found, &statement.text, origin))
            }
            Err(BranchRefusal::AlreadyEntered) => {
                Err(misplaced(found, &statement.text, origin))
            }
        }
    }

    fn close(
        &mut self,
        terminator: Terminator,
        expected: NodeKind,
        text: &str,
        origin: Origin,
        comments: Vec<String>,
    ) -> ParseResult<()> {
        let top = self.top();
        if self.open.is_empty() || !top.is_terminated_by(terminator) {
            return Err(mismatch(expected, top.kind, text, origin));
        }
        self.pop(comments);
        Ok(())
    }

    /// Kind of the innermost open program unit, used to word bare `end` mismatches.
    fn innermost_unit(&self) -> NodeKind {
        self.open
            .iter()
            .rev()
            .map(|node| node.kind)
            .find(|kind| kind.is_program_unit())
            .unwrap_or(NodeKind::Program)
    }
}

impl Default for BlockStack {
    fn default() -> Self {
        Self::new(Diagnostics::default())
    }
}

fn mismatch(expected: NodeKind, found: NodeKind, text: &str, origin: Origin) -> Box<ParseError> {
    Box::new(ParseError::BlockMismatch {
        expected,
        found,
        line: origin.physical_line,
        text: text.to_string(),
    })
}

fn misplaced(found: NodeKind, text: &str, origin: Origin) -> Box<ParseError> {
    Box::new(ParseError::MisplacedBranch {
        found,
        line: origin.physical_line,
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(lines: &[&str]) -> ParseResult<Node> {
        let classifier = Classifier::default();
        let mut stack = BlockStack::default();
        for (index, text) in lines.iter().enumerate() {
            stack.feed(&LogicalLine::new(index + 1, *text), &classifier)?;
        }
        stack.finish()
    }

    #[test]
    fn test_nested_blocks_get_depths() {
        let root = build(&["program p", "do i = 1, n", "x = i", "end do", "end program p"])
            .unwrap();
        let program = &root.children[0];
        assert_eq!(program.depth, 1);
        assert_eq!(program.children[0].kind, NodeKind::Loop);
        assert_eq!(program.children[0].children[0].depth, 3);
    }

    #[test]
    fn test_else_if_chain_closed_by_one_end_if() {
        let root = build(&[
            "if (a) then",
            "x = 1",
            "else if (b) then",
            "x = 2",
            "else",
            "x = 3",
            "end if",
        ])
        .unwrap();
        assert_eq!(root.children.len(), 2);
        assert!(!root.children[0].is_chained());
        assert!(root.children[1].is_chained());
        assert_eq!(root.children[1].else_children().unwrap().len(), 1);
    }

    #[test]
    fn test_inline_if_is_closed_immediately() {
        let root = build(&["if (x > 0) call foo(x)", "y = 1"]).unwrap();
        assert_eq!(root.children.len(), 2);
        let inner = &root.children[0].children[0];
        assert_eq!(inner.kind, NodeKind::Call);
        assert_eq!(inner.origin, Origin::new(1).synthetic(1));
        assert_eq!(inner.tag.as_deref(), Some("foo"));
    }

    #[test]
    fn test_shared_terminal_label_closes_all_loops() {
        let root = build(&["do 10 i = 1, n", "do 10 j = 1, m", "a(i, j) = 0", "10 continue"])
            .unwrap();
        let outer = &root.children[0];
        assert_eq!(outer.loop_label(), Some(10));
        assert_eq!(outer.children[0].loop_label(), Some(10));
        assert_eq!(outer.children[0].children.len(), 1);
    }

    #[test]
    fn test_labeled_terminal_statement_is_kept() {
        let root = build(&["do 20 i = 1, n", "20 s = s + i"]).unwrap();
        let body = &root.children[0].children;
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].label, Some(20));
    }

    #[test]
    fn test_labeled_end_do_closes_archaic_loop() {
        let root = build(&["do 10 i = 1, n", "x = i", "10 end do", "y = 1"]).unwrap();
        assert_eq!(root.children.len(), 2);
        let archaic = &root.children[0];
        assert_eq!(archaic.loop_label(), Some(10));
        assert_eq!(archaic.children.len(), 1);
        assert_eq!(archaic.children[0].kind, NodeKind::Assignment);
    }

    #[test]
    fn test_labeled_end_do_still_closes_block_loop() {
        let root = build(&["do i = 1, n", "x = i", "10 end do"]).unwrap();
        assert_eq!(root.children[0].kind, NodeKind::Loop);
        assert_eq!(root.children[0].label, Some(10));
    }

    #[test]
    fn test_wrong_label_leaves_archaic_loop_open() {
        let classifier = Classifier::default();
        let mut stack = BlockStack::default();
        for (index, text) in ["do 10 i = 1, n", "y = i", "20 continue"].iter().enumerate() {
            stack
                .feed(&LogicalLine::new(index + 1, *text), &classifier)
                .unwrap();
        }
        assert_eq!(stack.open_blocks(), 1);
        let last = stack.top().children.last().unwrap();
        assert_eq!(last.kind, NodeKind::Continue);
        assert_eq!(last.label, Some(20));
        assert_eq!(last.raw_text, "20 continue");

        stack
            .feed(&LogicalLine::new(4, "10 continue"), &classifier)
            .unwrap();
        assert_eq!(stack.open_blocks(), 0);
        let root = stack.finish().unwrap();
        assert_eq!(root.children[0].children.len(), 2);
    }

    #[test]
    fn test_closer_mismatch() {
        let err = build(&["do i = 1, n", "end if"]).unwrap_err();
        assert_eq!(
            *err,
            ParseError::BlockMismatch {
                expected: NodeKind::Conditional,
                found: NodeKind::Loop,
                line: 2,
                text: "end if".into()
            }
        );
    }

    #[test]
    fn test_closer_at_top_level() {
        let err = build(&["end do"]).unwrap_err();
        assert!(matches!(
            *err,
            ParseError::BlockMismatch {
                found: NodeKind::Root,
                ..
            }
        ));
    }

    #[test]
    fn test_second_else_is_misplaced() {
        let err = build(&["if (a) then", "else", "else", "end if"]).unwrap_err();
        assert!(matches!(*err, ParseError::MisplacedBranch { line: 3, .. }));
    }

    #[test]
    fn test_case_outside_selection() {
        let err = build(&["do", "case (1)", "end do"]).unwrap_err();
        assert!(matches!(
            *err,
            ParseError::BlockMismatch {
                expected: NodeKind::Selection,
                found: NodeKind::Loop,
                ..
            }
        ));
    }

    #[test]
    fn test_closer_comments_attach_to_closed_node() {
        let classifier = Classifier::default();
        let mut stack = BlockStack::default();
        stack
            .feed(&LogicalLine::new(1, "subroutine s"), &classifier)
            .unwrap();
        stack
            .feed(
                &LogicalLine::new(2, "end subroutine s").with_comments(vec!["done".into()]),
                &classifier,
            )
            .unwrap();
        let root = stack.finish().unwrap();
        assert_eq!(root.children[0].comments, vec!["done"]);
    }

    #[test]
    fn test_unterminated_block_names_innermost() {
        let err = build(&["module m", "subroutine s", "x = 1"]).unwrap_err();
        assert_eq!(
            *err,
            ParseError::UnterminatedBlock {
                kind: NodeKind::Subroutine,
                line: 2
            }
        );
    }
}
