//! Fragment assembly: joining, blank-line normalization, escaping.

use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_LINE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("blank-line pattern is valid"));

/// Join rendered fragments into the final output string.
///
/// Fragments are joined with `delimiter`, the result is trimmed, runs of
/// three or more newlines collapse to exactly two, and underscores are
/// escaped so text from the source document cannot trigger accidental
/// emphasis. Escaping runs once, globally, after joining.
pub fn assemble(fragments: &[String], delimiter: &str) -> String {
    let joined = fragments.join(delimiter);
    let trimmed = joined.trim();
    let collapsed = BLANK_LINE_RUNS.replace_all(trimmed, "\n\n");
    escape_underscores(&collapsed)
}

/// Escape underscores that are not already escaped.
///
/// The exported Markdown carries no emphasis styling of its own, so every
/// underscore comes from document text and must be escaped. The scan tracks
/// whether the previous character was an unescaped backslash, which makes
/// the operation idempotent: escaping an already-escaped string changes
/// nothing.
pub fn escape_underscores(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut after_backslash = false;
    for c in text.chars() {
        if c == '_' && !after_backslash {
            escaped.push('\\');
        }
        escaped.push(c);
        after_backslash = c == '\\' && !after_backslash;
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_underscores() {
        assert_eq!(escape_underscores("a_b_c"), "a\\_b\\_c");
        assert_eq!(escape_underscores("no underscores"), "no underscores");
    }

    #[test]
    fn test_escape_is_idempotent() {
        let once = escape_underscores("snake_case_name");
        let twice = escape_underscores(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_escape_preserves_escaped_underscore() {
        assert_eq!(escape_underscores("a\\_b"), "a\\_b");
    }

    #[test]
    fn test_escape_after_literal_backslash_pair() {
        // the backslash pair escapes itself, so the underscore is bare
        assert_eq!(escape_underscores("a\\\\_b"), "a\\\\\\_b");
    }

    #[test]
    fn test_assemble_collapses_blank_runs() {
        let fragments = vec![
            "# Title\n".to_string(),
            "\n".to_string(),
            "\n".to_string(),
            "body".to_string(),
        ];
        let output = assemble(&fragments, "\n");
        assert_eq!(output, "# Title\n\nbody");
        assert!(!output.contains("\n\n\n"));
    }

    #[test]
    fn test_assemble_trims_edges() {
        let fragments = vec!["\n".to_string(), "text\n".to_string()];
        assert_eq!(assemble(&fragments, "\n"), "text");
    }

    #[test]
    fn test_assemble_empty() {
        assert_eq!(assemble(&[], "\n"), "");
    }
}
