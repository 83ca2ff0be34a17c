//! Node kinds
//!
//!     The closed set of node tags. Block kinds own children and are closed by a matching
//!     `end` statement (or, for archaic loops, by a labeled terminal statement); every other
//!     kind is a leaf carrying its statement text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Root,
    Module,
    Program,
    Function,
    Subroutine,
    Interface,
    DerivedType,
    Conditional,
    Selection,
    Loop,
    ArchaicLabeledLoop,
    WhereLoop,
    Declaration,
    Using,
    Implicit,
    Contains,
    Call,
    Assignment,
    Stop,
    Return,
    Cycle,
    Exit,
    Continue,
    Goto,
    Format,
    Read,
    Write,
    Print,
    Allocate,
    Deallocate,
    FileControl,
    Empty,
    PreprocessorDirective,
}

impl NodeKind {
    pub const ALL: [NodeKind; 33] = [
        NodeKind::Root,
        NodeKind::Module,
        NodeKind::Program,
        NodeKind::Function,
        NodeKind::Subroutine,
        NodeKind::Interface,
        NodeKind::DerivedType,
        NodeKind::Conditional,
        NodeKind::Selection,
        NodeKind::Loop,
        NodeKind::ArchaicLabeledLoop,
        NodeKind::WhereLoop,
        NodeKind::Declaration,
        NodeKind::Using,
        NodeKind::Implicit,
        NodeKind::Contains,
        NodeKind::Call,
        NodeKind::Assignment,
        NodeKind::Stop,
        NodeKind::Return,
        NodeKind::Cycle,
        NodeKind::Exit,
        NodeKind::Continue,
        NodeKind::Goto,
        NodeKind::Format,
        NodeKind::Read,
        NodeKind::Write,
        NodeKind::Print,
        NodeKind::Allocate,
        NodeKind::Deallocate,
        NodeKind::FileControl,
        NodeKind::Empty,
        NodeKind::PreprocessorDirective,
    ];

    /// Kebab-case name, as used in dumps and lookup paths.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Module => "module",
            NodeKind::Program => "program",
            NodeKind::Function => "function",
            NodeKind::Subroutine => "subroutine",
            NodeKind::Interface => "interface",
            NodeKind::DerivedType => "derived-type",
            NodeKind::Conditional => "conditional",
            NodeKind::Selection => "selection",
            NodeKind::Loop => "loop",
            NodeKind::ArchaicLabeledLoop => "archaic-labeled-loop",
            NodeKind::WhereLoop => "where-loop",
            NodeKind::Declaration => "declaration",
            NodeKind::Using => "using",
            NodeKind::Implicit => "implicit",
            NodeKind::Contains => "contains",
            NodeKind::Call => "call",
            NodeKind::Assignment => "assignment",
            NodeKind::Stop => "stop",
            NodeKind::Return => "return",
            NodeKind::Cycle => "cycle",
            NodeKind::Exit => "exit",
            NodeKind::Continue => "continue",
            NodeKind::Goto => "goto",
            NodeKind::Format => "format",
            NodeKind::Read => "read",
            NodeKind::Write => "write",
            NodeKind::Print => "print",
            NodeKind::Allocate => "allocate",
            NodeKind::Deallocate => "deallocate",
            NodeKind::FileControl => "file-control",
            NodeKind::Empty => "empty",
            NodeKind::PreprocessorDirective => "preprocessor-directive",
        }
    }

    /// Kinds that push a scope on the block stack.
    pub fn is_block(self) -> bool {
        matches!(
            self,
            NodeKind::Root
                | NodeKind::Module
                | NodeKind::Program
                | NodeKind::Function
                | NodeKind::Subroutine
                | NodeKind::Interface
                | NodeKind::DerivedType
                | NodeKind::Conditional
                | NodeKind::Selection
                | NodeKind::Loop
                | NodeKind::ArchaicLabeledLoop
                | NodeKind::WhereLoop
        )
    }

    /// Kinds a bare `end` statement may close.
    pub fn is_program_unit(self) -> bool {
        matches!(
            self,
            NodeKind::Module | NodeKind::Program | NodeKind::Function | NodeKind::Subroutine
        )
    }

    pub fn is_loop(self) -> bool {
        matches!(
            self,
            NodeKind::Loop | NodeKind::ArchaicLabeledLoop | NodeKind::WhereLoop
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown node kind '{}'", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for NodeKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        NodeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}
