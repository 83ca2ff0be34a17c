//! Statement rule table
//!
//!     Every logical statement is matched against [`RULES`] in declaration order; the first
//!     matching rule decides what the statement is. All patterns are case-insensitive and
//!     anchored at both ends. The order is part of the grammar:
//!
//!         1. empty statements and the preprocessor conditional family
//!         2. block closers, then block openers and branch entries
//!         3. declaration section: `implicit`, `use`, then one rule per type/attribute keyword
//!         4. simple control statements
//!         5. I/O and miscellaneous statements
//!         6. assignment, the catch-all
//!
//!     More specific rules always come before the general forms they would otherwise be
//!     swallowed by (`end if` before bare `end`, `else if` before `else`, the archaic labeled
//!     `do` before the counted `do`).
//!
//! Captures
//!
//!     Rules communicate with the classifier through named capture groups:
//!
//!         - `tag`: the node's symbolic tag (declared name, call target, loop variable...)
//!         - `label`: the terminal label of an archaic `do`
//!         - `cond`: a case selector
//!         - `rest`: text trailing a condition or mask (`then`, or an inline statement)
//!
//!     Parenthesized parts use the bounded pattern from [patterns](super::patterns).

use super::patterns::PAREN;
use crate::fortran::ast::NodeKind;
use once_cell::sync::Lazy;
use regex::Regex;

/// What a matching rule makes of its statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    Simple(NodeKind),
    Open(NodeKind),
    /// `do <label> ...`, closed by the statement carrying that label
    OpenArchaic,
    /// `if (...)` followed by `then` or an inline statement
    Conditional,
    /// `where (...)` with or without an inline assignment
    Where,
    ElseIf,
    Else,
    ElseWhere,
    Case,
    Close(NodeKind),
    /// Bare `end`
    CloseUnit,
}

#[derive(Debug)]
pub struct Rule {
    pub name: &'static str,
    pub regex: Regex,
    pub emit: Emit,
}

/// Type keywords that start an entity declaration (`real, dimension(n) :: a`).
const TYPE_KEYWORDS: &[(&str, &str)] = &[
    ("declaration:integer", r"integer"),
    ("declaration:real", r"real"),
    ("declaration:double-precision", r"double\s*precision"),
    ("declaration:double-complex", r"double\s*complex"),
    ("declaration:complex", r"complex"),
    ("declaration:logical", r"logical"),
    ("declaration:character", r"character"),
    ("declaration:byte", r"byte"),
    ("declaration:type", r"type\s*{paren}"),
    ("declaration:class", r"class\s*{paren}"),
];

/// Attribute and specification statements (`dimension a(n)`, `save`, `common /blk/ x`).
const ATTRIBUTE_KEYWORDS: &[(&str, &str)] = &[
    ("declaration:dimension", r"dimension"),
    ("declaration:parameter", r"parameter"),
    ("declaration:external", r"external"),
    ("declaration:intrinsic", r"intrinsic"),
    ("declaration:save", r"save"),
    ("declaration:data", r"data"),
    ("declaration:common", r"common"),
    ("declaration:equivalence", r"equivalence"),
    ("declaration:namelist", r"namelist"),
    ("declaration:allocatable", r"allocatable"),
    ("declaration:pointer", r"pointer"),
    ("declaration:target", r"target"),
    ("declaration:optional", r"optional"),
    ("declaration:intent", r"intent"),
    ("declaration:public", r"public"),
    ("declaration:private", r"private"),
    ("declaration:protected", r"protected"),
    ("declaration:sequence", r"sequence"),
    ("declaration:procedure", r"(?:module\s+)?procedure"),
];

fn rule(name: &'static str, pattern: &str, emit: Emit) -> Rule {
    let source = format!("(?i)^(?:{})$", pattern.replace("{paren}", PAREN.as_str()));
    Rule {
        name,
        regex: Regex::new(&source).unwrap(),
        emit,
    }
}

fn closer(name: &'static str, keyword: &str, kind: NodeKind) -> Rule {
    rule(
        name,
        &format!(r"end\s*{}(?:\s+.*)?", keyword),
        Emit::Close(kind),
    )
}

fn build_rules() -> Vec<Rule> {
    use Emit::*;
    let unit_prefix = r"(?:(?:recursive|pure|impure|elemental|module)\s+)*";
    let type_prefix = r"(?:(?:integer|real|double\s*precision|complex|logical|character)(?:\s*\*\s*\d+|\s*{paren})?\s+|type\s*{paren}\s+)?";

    let mut rules = vec![
        // 1. empty and preprocessor
        rule("empty", r"", Simple(NodeKind::Empty)),
        rule(
            "preprocessor",
            r"#\s*(?:ifdef|ifndef|if|elif|else|endif)\b.*",
            Simple(NodeKind::PreprocessorDirective),
        ),
        // 2. closers
        closer("end-if", "if", NodeKind::Conditional),
        closer("end-do", "do", NodeKind::Loop),
        closer("end-select", "select", NodeKind::Selection),
        closer("end-where", "where", NodeKind::WhereLoop),
        closer("end-module", "module", NodeKind::Module),
        closer("end-program", "program", NodeKind::Program),
        closer("end-function", "function", NodeKind::Function),
        closer("end-subroutine", "subroutine", NodeKind::Subroutine),
        closer("end-interface", "interface", NodeKind::Interface),
        closer("end-type", "type", NodeKind::DerivedType),
        rule("end", r"end", CloseUnit),
        // 2. unit openers
        rule("module", r"module\s+(?P<tag>\w+)", Open(NodeKind::Module)),
        rule("program", r"program\s+(?P<tag>\w+)", Open(NodeKind::Program)),
        rule(
            "function",
            &format!(
                r"{}{}{}function\s+(?P<tag>\w+)\s*(?:\(.*)?",
                unit_prefix, type_prefix, unit_prefix
            ),
            Open(NodeKind::Function),
        ),
        rule(
            "subroutine",
            &format!(r"{}subroutine\s+(?P<tag>\w+)\s*(?:\(.*)?", unit_prefix),
            Open(NodeKind::Subroutine),
        ),
        rule(
            "interface",
            r"(?:abstract\s+)?interface(?:\s+(?P<tag>.+))?",
            Open(NodeKind::Interface),
        ),
        rule(
            "derived-type",
            r"type(?:\s*,[^:]*::|\s*::|\s+)\s*(?P<tag>\w+)",
            Open(NodeKind::DerivedType),
        ),
        // 2. selection and branches
        rule(
            "select-case",
            r"select\s*case\s*{paren}",
            Open(NodeKind::Selection),
        ),
        rule("case", r"case\s*(?P<cond>{paren}|default)", Case),
        rule("else-if", r"else\s*if\s*{paren}\s*(?P<rest>.*)", ElseIf),
        rule("elsewhere", r"else\s*where(?:\s*{paren})?(?:\s+\w+)?", ElseWhere),
        rule("else", r"else(?:\s+\w+)?", Else),
        rule("if", r"if\s*{paren}\s*(?P<rest>.*)", Conditional),
        // 2. loops
        rule(
            "archaic-do",
            r"do\s*(?P<label>\d+)(?:\s*,?\s*(?P<tag>\w+)\s*=.*|\s*,?\s*while\s*{paren})?",
            OpenArchaic,
        ),
        rule(
            "do-concurrent",
            r"do\s+concurrent\s*{paren}.*",
            Open(NodeKind::Loop),
        ),
        rule("do-while", r"do\s*,?\s*while\s*{paren}", Open(NodeKind::Loop)),
        rule(
            "do-counted",
            r"do\s*,?\s+(?P<tag>\w+)\s*=.+",
            Open(NodeKind::Loop),
        ),
        rule("do", r"do", Open(NodeKind::Loop)),
        rule("where", r"where\s*{paren}\s*(?P<rest>.*)", Where),
        // 3. declaration section
        rule("implicit", r"implicit\b.*", Simple(NodeKind::Implicit)),
        rule(
            "use",
            r"use\b\s*(?:,\s*(?:non_)?intrinsic\s*)?(?:::)?\s*(?P<tag>\w+).*",
            Simple(NodeKind::Using),
        ),
    ];

    for (name, keyword) in TYPE_KEYWORDS {
        rules.push(rule(
            name,
            &format!(
                r"{}(?:\s*\*\s*(?:\d+|\(\s*\*\s*\)))?(?:\s*{{paren}})?(?:\s*,\s*\w+(?:\s*{{paren}})?)*(?:\s*::\s*|\s+)(?P<tag>\w+).*",
                keyword
            ),
            Simple(NodeKind::Declaration),
        ));
    }
    for (name, keyword) in ATTRIBUTE_KEYWORDS {
        rules.push(rule(
            name,
            &format!(
                r"{}(?:\s*{{paren}})?(?:\s*,\s*\w+(?:\s*{{paren}})?)*(?:(?:\s*::\s*|\s+)(?:/\s*\w*\s*/\s*)?(?P<tag>\w+).*)?",
                keyword
            ),
            Simple(NodeKind::Declaration),
        ));
    }

    rules.extend([
        // 4. simple control
        rule("call", r"call\s+(?P<tag>\w+(?:\s*%\s*\w+)*).*", Simple(NodeKind::Call)),
        rule("stop", r"(?:error\s*)?stop\b.*", Simple(NodeKind::Stop)),
        rule("return", r"return\b.*", Simple(NodeKind::Return)),
        rule("cycle", r"cycle(?:\s+(?P<tag>\w+))?", Simple(NodeKind::Cycle)),
        rule("exit", r"exit(?:\s+(?P<tag>\w+))?", Simple(NodeKind::Exit)),
        rule("continue", r"continue", Simple(NodeKind::Continue)),
        rule(
            "goto",
            r"go\s*to\b\s*(?P<tag>\d+)?.*",
            Simple(NodeKind::Goto),
        ),
        // 5. I/O and misc
        rule("format", r"format\s*\(.*\)", Simple(NodeKind::Format)),
        rule("read", r#"read\s*[(*\d'"].*"#, Simple(NodeKind::Read)),
        rule("write", r"write\s*\(.*", Simple(NodeKind::Write)),
        rule("print", r#"print\s*[*\d'"].*"#, Simple(NodeKind::Print)),
        rule(
            "allocate",
            r"allocate\s*\(\s*(?P<tag>\w+).*",
            Simple(NodeKind::Allocate),
        ),
        rule(
            "deallocate",
            r"deallocate\s*\(\s*(?P<tag>\w+).*",
            Simple(NodeKind::Deallocate),
        ),
        rule("contains", r"contains", Simple(NodeKind::Contains)),
        rule(
            "file-control",
            r"(?P<tag>open|close|inquire|rewind|backspace|endfile|flush)\s*[(\d].*",
            Simple(NodeKind::FileControl),
        ),
        // 6. assignment (value or pointer)
        rule(
            "assignment",
            r"(?P<tag>\w+(?:\s*{paren})?(?:\s*%\s*\w+(?:\s*{paren})?)*)\s*=>?\s*[^=].*",
            Simple(NodeKind::Assignment),
        ),
    ]);
    rules
}

/// The ordered rule table, compiled once.
pub static RULES: Lazy<Vec<Rule>> = Lazy::new(build_rules);

/// First rule matching `statement`, with its captures.
pub fn first_match(statement: &str) -> Option<(&'static Rule, regex::Captures<'_>)> {
    RULES
        .iter()
        .find_map(|rule| rule.regex.captures(statement).map(|caps| (rule, caps)))
}
