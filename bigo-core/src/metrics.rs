//! Line-level metrics
//!
//! Formatting-only heuristics: comment and blank line counts depend on the
//! language's comment syntax, nothing else.

use crate::language::Language;
use regex::Regex;
use std::sync::OnceLock;

/// Raw line counts for one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCounts {
    pub lines_of_code: usize,
    pub comment_lines: usize,
    /// Only computed for text-pass languages
    pub blank_lines: Option<usize>,
}

fn line_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"//[^\n]*").unwrap())
}

fn block_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)/\*.*?\*/").unwrap())
}

/// Count lines for the given language
pub fn count_lines(language: Language, source: &str) -> LineCounts {
    match language {
        Language::Python => LineCounts {
            lines_of_code: source.lines().count(),
            comment_lines: source
                .lines()
                .filter(|line| line.trim_start().starts_with('#'))
                .count(),
            blank_lines: None,
        },
        Language::C | Language::Cpp | Language::Java => {
            let comment_lines = line_comment_re().find_iter(source).count()
                + block_comment_re().find_iter(source).count();
            LineCounts {
                lines_of_code: source.lines().count(),
                comment_lines,
                blank_lines: Some(source.lines().filter(|line| line.trim().is_empty()).count()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_hash_comments() {
        let source = "# header\nx = 1\n  # indented\n\ny = 2\n";
        let counts = count_lines(Language::Python, source);
        assert_eq!(counts.lines_of_code, 5);
        assert_eq!(counts.comment_lines, 2);
        assert_eq!(counts.blank_lines, None);
    }

    #[test]
    fn c_family_comments_and_blanks() {
        let source = "// one\nint x; // trailing\n\n/* block\n   spans */\nint y;\n";
        let counts = count_lines(Language::C, source);
        assert_eq!(counts.lines_of_code, 6);
        // two line comments plus one block comment
        assert_eq!(counts.comment_lines, 3);
        assert_eq!(counts.blank_lines, Some(1));
    }

    #[test]
    fn empty_source() {
        let counts = count_lines(Language::Java, "");
        assert_eq!(counts.lines_of_code, 0);
        assert_eq!(counts.comment_lines, 0);
        assert_eq!(counts.blank_lines, Some(0));
    }
}
