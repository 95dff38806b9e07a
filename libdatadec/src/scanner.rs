//! Phase 1: Scanner
//!
//! The scanner turns one physical line into a scan line. It performs:
//! - Comment removal (everything from the first `#`, quotes or not)
//! - Blank line filtering
//! - Indentation counting (spaces only)
//! - List marker extraction (the "- " prefix)

/// A single line after the scanning phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanLine {
    /// Content after indent and leader.
    pub line: String,
    /// Number of leading spaces.
    pub indent: usize,
    /// "- " for list items, "" otherwise.
    pub leader: &'static str,
    /// One-based line number for diagnostics.
    pub line_num: usize,
}

impl ScanLine {
    /// Returns `true` for `- item` lines.
    pub fn is_list_item(&self) -> bool {
        !self.leader.is_empty()
    }
}

/// Scan one physical line. Returns `None` for blank and comment-only lines.
pub fn scan_line(raw: &str, line_num: usize) -> Option<ScanLine> {
    let uncommented = strip_comment(raw).trim_end();
    if uncommented.trim().is_empty() {
        return None;
    }

    let indent = count_indent(uncommented);

    // Tabs and other whitespace are not indentation, but they are not
    // content either.
    let rest = uncommented.trim_start();

    let (leader, content) = extract_leader(rest);

    Some(ScanLine {
        line: content.to_string(),
        indent,
        leader,
        line_num,
    })
}

/// Split a whole document into physical lines, accepting `\n` or `\r\n`.
pub fn split_lines(source: &str) -> impl Iterator<Item = &str> {
    source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Count the number of leading spaces in a line.
fn count_indent(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ').count()
}

/// Separate the list marker from line content.
/// Returns (leader, content) where leader is "- " for list items.
fn extract_leader(rest: &str) -> (&'static str, &str) {
    match rest.strip_prefix("- ") {
        Some(content) => ("- ", content),
        None => ("", rest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_indent() {
        assert_eq!(count_indent(""), 0);
        assert_eq!(count_indent("hello"), 0);
        assert_eq!(count_indent("  hello"), 2);
        assert_eq!(count_indent("    hello"), 4);
        assert_eq!(count_indent("\thello"), 0);
    }

    #[test]
    fn test_scan_simple() {
        let sl = scan_line("key: value", 1).unwrap();
        assert_eq!(sl.line, "key: value");
        assert_eq!(sl.indent, 0);
        assert!(!sl.is_list_item());
    }

    #[test]
    fn test_scan_list() {
        let sl = scan_line("  - item", 3).unwrap();
        assert_eq!(sl.line, "item");
        assert_eq!(sl.indent, 2);
        assert_eq!(sl.leader, "- ");
        assert_eq!(sl.line_num, 3);
    }

    #[test]
    fn test_bare_dash_is_not_a_list_item() {
        // Trailing whitespace is trimmed before the leader is checked.
        let sl = scan_line("- ", 1).unwrap();
        assert_eq!(sl.line, "-");
        assert!(!sl.is_list_item());

        let sl = scan_line("-5", 1).unwrap();
        assert!(!sl.is_list_item());
    }

    #[test]
    fn test_scan_comment() {
        assert_eq!(scan_line("# comment", 1), None);
        assert_eq!(scan_line("    # indented comment", 1), None);
        let sl = scan_line("name: x # trailing", 1).unwrap();
        assert_eq!(sl.line, "name: x");
    }

    #[test]
    fn test_hash_inside_quotes_still_comments() {
        let sl = scan_line("color: \"#fff\"", 1).unwrap();
        assert_eq!(sl.line, "color: \"");
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(scan_line("", 1), None);
        assert_eq!(scan_line("    ", 1), None);
        assert_eq!(scan_line("\t", 1), None);
    }

    #[test]
    fn test_tab_is_not_indent() {
        let sl = scan_line("\tkey: value", 1).unwrap();
        assert_eq!(sl.indent, 0);
        assert_eq!(sl.line, "key: value");

        let sl = scan_line("  \tkey: value", 1).unwrap();
        assert_eq!(sl.indent, 2);
        assert_eq!(sl.line, "key: value");
    }

    #[test]
    fn test_split_lines() {
        let lines: Vec<&str> = split_lines("a: 1\r\nb: 2\n").collect();
        assert_eq!(lines, vec!["a: 1", "b: 2", ""]);
    }
}
