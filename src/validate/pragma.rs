//! Inline exemption pragmas for documentation checks.
//!
//! Supports pragma comments like:
//! - `# noqa: EXITCODES`
//! - `# docstring-ignore: Exit Codes`
//! - `<!-- noqa: OUTPUTS -->` (markup-style files)
//! - `# noqa: D101|D102|D103` on a symbol's definition line

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Line-scoped pragma for any symbol kind.
    static ref SYMBOL_PRAGMA: Regex = Regex::new(r"#\s*noqa:\s*D10[123]").unwrap();

    /// Line-scoped pragma for missing function/method docstrings.
    static ref FUNCTION_PRAGMA: Regex = Regex::new(r"#\s*noqa:\s*D10[23]").unwrap();

    /// Line-scoped pragma for missing class docstrings.
    static ref CLASS_PRAGMA: Regex = Regex::new(r"#\s*noqa:\s*D101").unwrap();
}

/// Canonical pragma key for a section name.
///
/// Upper-cases and strips spaces, colons, and `#`, so `"Exit Codes"`,
/// `"EXITCODES"`, and `"# Exit Codes"` all resolve to `EXITCODES`.
pub fn normalize_section(section: &str) -> String {
    section
        .to_uppercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | ':' | '#'))
        .collect()
}

/// Check whether a section is exempted anywhere in the file content.
///
/// Matching is case-insensitive and never errors; no match means no
/// exemption.
pub fn is_exempted(content: &str, section: &str) -> bool {
    let normalized = regex::escape(&normalize_section(section));
    let raw = regex::escape(section);

    let patterns = [
        format!(r"(?i)#\s*noqa:\s*{}", normalized),
        format!(r"(?i)#\s*docstring-ignore:\s*{}", raw),
        format!(r"(?i)<!--\s*noqa:\s*{}\s*-->", normalized),
    ];

    patterns
        .iter()
        .any(|p| Regex::new(p).map(|re| re.is_match(content)).unwrap_or(false))
}

/// Check the exact definition line for a `D101`/`D102`/`D103` pragma.
///
/// This is the strict, line-scoped form: pragmas elsewhere in the file do
/// not exempt the symbol.
pub fn is_symbol_exempted(lines: &[&str], definition_line: usize) -> bool {
    line_matches(lines, definition_line, &SYMBOL_PRAGMA)
}

/// Line-scoped exemption for function docstring checks (`D102`/`D103`).
pub fn is_function_exempted(lines: &[&str], definition_line: usize) -> bool {
    line_matches(lines, definition_line, &FUNCTION_PRAGMA)
}

/// Line-scoped exemption for class docstring checks (`D101`).
pub fn is_class_exempted(lines: &[&str], definition_line: usize) -> bool {
    line_matches(lines, definition_line, &CLASS_PRAGMA)
}

fn line_matches(lines: &[&str], definition_line: usize, pattern: &Regex) -> bool {
    if definition_line == 0 {
        return false;
    }
    lines
        .get(definition_line - 1)
        .map(|line| pattern.is_match(line))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_spaces_colons_and_hash() {
        assert_eq!(normalize_section("Exit Codes"), "EXITCODES");
        assert_eq!(normalize_section("EXITCODES"), "EXITCODES");
        assert_eq!(normalize_section("OUTPUTS:"), "OUTPUTS");
        assert_eq!(normalize_section("# Purpose"), "PURPOSE");
    }

    #[test]
    fn test_noqa_matches_normalized_form() {
        let content = "#!/usr/bin/env bash\n# noqa: EXITCODES\necho hi\n";
        assert!(is_exempted(content, "Exit Codes"));
        assert!(is_exempted(content, "EXITCODES"));
        assert!(!is_exempted(content, "OUTPUTS:"));
    }

    #[test]
    fn test_docstring_ignore_uses_human_readable_name() {
        let content = "# docstring-ignore: Environment Variables\n";
        assert!(is_exempted(content, "Environment Variables"));
    }

    #[test]
    fn test_html_comment_form() {
        let content = "# Workflow: ci\n<!-- noqa: NOTES -->\n";
        assert!(is_exempted(content, "Notes: or Note:"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let content = "# NOQA: exitcodes\n";
        assert!(is_exempted(content, "Exit Codes"));
    }

    #[test]
    fn test_no_pragma_means_no_exemption() {
        assert!(!is_exempted("plain file content\n", "Exit Codes"));
    }

    #[test]
    fn test_symbol_pragma_only_on_definition_line() {
        let lines: Vec<&str> = vec![
            "# noqa: D103",
            "def documented():",
            "def bare():  # noqa: D103",
        ];
        // Pragma on line 1 does not exempt line 2's definition.
        assert!(!is_symbol_exempted(&lines, 2));
        assert!(is_symbol_exempted(&lines, 3));
    }

    #[test]
    fn test_function_and_class_pragmas_are_distinct() {
        let lines: Vec<&str> = vec!["class Bare:  # noqa: D101", "def bare():  # noqa: D102"];
        assert!(is_class_exempted(&lines, 1));
        assert!(!is_class_exempted(&lines, 2));
        assert!(is_function_exempted(&lines, 2));
        assert!(!is_function_exempted(&lines, 1));
    }

    #[test]
    fn test_out_of_range_line_is_not_exempted() {
        let lines: Vec<&str> = vec!["def f():  # noqa: D103"];
        assert!(!is_symbol_exempted(&lines, 0));
        assert!(!is_symbol_exempted(&lines, 5));
    }
}
