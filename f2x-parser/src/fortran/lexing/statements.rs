//! Statement separation
//!
//! A logical line may hold several statements separated by `;`. Each becomes its own logical
//! line with the same physical range; comments stay with the first statement. Separators inside
//! string literals are ignored and empty statements (`x = 1;;` or a trailing `;`) are dropped.
use super::logical_lines::LogicalLine;
use super::tokens::separator_positions;

/// Split every logical line on its top-level `;` separators.
pub fn split_statements(lines: Vec<LogicalLine>) -> Vec<LogicalLine> {
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        let positions = separator_positions(&line.text);
        if positions.is_empty() {
            out.push(line);
            continue;
        }

        let mut comments = Some(line.comments);
        let mut start = 0;
        let bounds = positions.into_iter().chain(std::iter::once(line.text.len()));
        for end in bounds {
            let part = line.text[start..end].trim();
            start = end + 1;
            if part.is_empty() {
                continue;
            }
            out.push(LogicalLine {
                start_line: line.start_line,
                end_line: line.end_line,
                text: part.to_string(),
                comments: comments.take().unwrap_or_default(),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_without_separator_is_untouched() {
        let line = LogicalLine::new(3, "x = 1").with_comments(vec!["note".into()]);
        assert_eq!(split_statements(vec![line.clone()]), vec![line]);
    }

    #[test]
    fn test_split_keeps_provenance_and_first_comments() {
        let line = LogicalLine::new(7, "a = 1; b = 2 ;c = 3").with_comments(vec!["abc".into()]);
        let parts = split_statements(vec![line]);
        let texts: Vec<_> = parts.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["a = 1", "b = 2", "c = 3"]);
        assert!(parts.iter().all(|p| p.start_line == 7 && p.end_line == 7));
        assert_eq!(parts[0].comments, vec!["abc"]);
        assert!(parts[1].comments.is_empty());
    }

    #[test]
    fn test_empty_parts_and_quoted_separators() {
        let line = LogicalLine::new(1, "print *, 'a;b';; ");
        let parts = split_statements(vec![line]);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].text, "print *, 'a;b'");
    }
}
