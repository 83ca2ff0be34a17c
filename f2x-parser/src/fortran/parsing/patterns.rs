//! Bounded parenthesis patterns
//!
//!     Regular expressions cannot match arbitrarily nested parentheses, so conditions, masks,
//!     kind selectors and subscripts are matched with a pattern unrolled to a fixed depth:
//!
//!         depth 1:  \([^()]*\)
//!         depth n:  \((?:[^()]|<depth n-1>)*\)
//!
//!     [`PAREN`] is unrolled [`PAREN_DEPTH`] times. Deeper expressions simply fail to match as a
//!     whole; [`max_nesting`] lets callers notice and log that case.

use once_cell::sync::Lazy;

/// How many nesting levels the unrolled pattern accepts.
pub const PAREN_DEPTH: usize = 4;

/// Balanced parentheses, up to [`PAREN_DEPTH`] levels deep. No capture groups.
pub static PAREN: Lazy<String> = Lazy::new(|| nested_parens(PAREN_DEPTH));

/// Build the unrolled pattern for `depth` levels (`depth` of 0 is treated as 1).
pub fn nested_parens(depth: usize) -> String {
    let mut pattern = String::from(r"\([^()]*\)");
    for _ in 1..depth {
        pattern = format!(r"\((?:[^()]|{})*\)", pattern);
    }
    pattern
}

/// Deepest parenthesis nesting in `text`, ignoring string literals.
pub fn max_nesting(text: &str) -> usize {
    let mut depth: usize = 0;
    let mut deepest = 0;
    let mut quote: Option<char> = None;
    for c in text.chars() {
        match (quote, c) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '(') => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            (None, ')') => depth = depth.saturating_sub(1),
            (None, _) => {}
        }
    }
    deepest
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn anchored(depth: usize) -> Regex {
        Regex::new(&format!("^{}$", nested_parens(depth))).unwrap()
    }

    #[test]
    fn test_single_level() {
        assert_eq!(nested_parens(1), r"\([^()]*\)");
        assert!(anchored(1).is_match("(a + b)"));
        assert!(!anchored(1).is_match("(f(a))"));
    }

    #[test]
    fn test_unrolled_depth_is_the_limit() {
        let paren = anchored(PAREN_DEPTH);
        assert!(paren.is_match("(a(b(c(d))))"));
        assert!(!paren.is_match("(a(b(c(d(e)))))"));
    }

    #[test]
    fn test_max_nesting_skips_strings() {
        assert_eq!(max_nesting("x"), 0);
        assert_eq!(max_nesting("if (a(i) > b(j(k))) then"), 3);
        assert_eq!(max_nesting("print *, '((((('"), 0);
    }
}
