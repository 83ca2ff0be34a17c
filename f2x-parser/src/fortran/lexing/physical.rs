//! Physical line classification
//!
//! Determines what a single physical line contributes before continuation fusion:
//! nothing (blank), a comment only, or a code fragment with its inline comment and
//! continuation markers.
use super::tokens::comment_start;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhysicalLine {
    Blank,
    /// A pure comment line; the payload has its marker removed.
    Comment(String),
    Fragment(Fragment),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Code with continuation markers removed, trimmed.
    pub code: String,
    pub comment: Option<String>,
    /// Starts with `&`: continues the previous logical line.
    pub continues_previous: bool,
    /// Ends with `&`: the next fragment continues this one.
    pub continues_next: bool,
}

/// Classify one physical line.
///
/// `fixed_form_comments` enables the column-1 comment markers (`*`, and `c`/`C` followed by
/// whitespace) of fixed-form sources.
pub fn classify_physical(line: &str, fixed_form_comments: bool) -> PhysicalLine {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return PhysicalLine::Blank;
    }
    if let Some(rest) = trimmed.strip_prefix('!') {
        return PhysicalLine::Comment(rest.trim().to_string());
    }
    if fixed_form_comments {
        if let Some(payload) = fixed_form_comment(line) {
            return PhysicalLine::Comment(payload);
        }
    }

    let (code, comment) = match comment_start(line) {
        Some(start) => (&line[..start], Some(line[start + 1..].trim().to_string())),
        None => (line, None),
    };

    let mut code = code.trim();
    let continues_previous = code.starts_with('&');
    if continues_previous {
        code = code[1..].trim_start();
    }
    let continues_next = code.ends_with('&');
    if continues_next {
        code = code[..code.len() - 1].trim_end();
    }

    PhysicalLine::Fragment(Fragment {
        code: code.to_string(),
        comment,
        continues_previous,
        continues_next,
    })
}

fn fixed_form_comment(line: &str) -> Option<String> {
    let mut chars = line.chars();
    let first = chars.next()?;
    let rest = chars.as_str();
    match first {
        '*' => Some(rest.trim().to_string()),
        'c' | 'C' => {
            let starts_with_space = rest.is_empty() || rest.starts_with([' ', '\t']);
            // `c = 1` assigns to a variable named c
            let is_assignment = rest.trim_start().starts_with('=');
            (starts_with_space && !is_assignment).then(|| rest.trim().to_string())
        }
        _ => None,
    }
}
