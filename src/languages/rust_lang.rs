//! Rust documentation validator.
//!
//! File-level only: module docs are the `//!` lines within the first 100
//! lines. Binary entry points (`main.rs`) additionally need an
//! `# Exit Behavior` or `# Exit Codes` section.

use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

use crate::config::ValidateConfig;
use crate::validate::{pragma, Language, ValidationError};

use super::LanguageValidator;

/// How many leading lines are searched for `//!` docs.
const HEADER_LINES: usize = 100;

lazy_static! {
    /// Required rustdoc sections, in contract order.
    static ref REQUIRED_SECTIONS: Vec<(Regex, &'static str)> = vec![
        (
            Regex::new(r"(?mi)^//!\s*#\s*Purpose").unwrap(),
            "# Purpose"
        ),
        (
            Regex::new(r"(?mi)^//!\s*#\s*Examples").unwrap(),
            "# Examples"
        ),
    ];

    /// Exit documentation, required for `main.rs` only.
    static ref EXIT_SECTION: Regex =
        Regex::new(r"(?mi)^//!\s*#\s*Exit\s+(Behavior|Codes)").unwrap();
}

pub struct RustValidator;

impl RustValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageValidator for RustValidator {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["rs"]
    }

    fn section_names(&self) -> &'static [&'static str] {
        &["# Purpose", "# Examples"]
    }

    fn validate_file_block(
        &self,
        path: &Path,
        content_text: &str,
        _config: &ValidateConfig,
    ) -> Option<ValidationError> {
        if !content_text.contains("//!") {
            return Some(ValidationError::file_level(
                path,
                vec!["module documentation (//!)"],
                "Expected module-level documentation with //!",
            ));
        }

        let module_docs: String = content_text
            .lines()
            .take(HEADER_LINES)
            .filter(|l| l.trim_start().starts_with("//!"))
            .collect::<Vec<_>>()
            .join("\n");

        let mut missing = Vec::new();
        for (pattern, name) in REQUIRED_SECTIONS.iter() {
            if pragma::is_exempted(content_text, name) {
                continue;
            }
            if !pattern.is_match(&module_docs) {
                missing.push(*name);
            }
        }

        // Entry points must document how they exit.
        let is_main = path.file_name().map(|n| n == "main.rs").unwrap_or(false);
        if is_main
            && !EXIT_SECTION.is_match(&module_docs)
            && !pragma::is_exempted(content_text, "EXITCODES")
        {
            missing.push("# Exit Behavior or # Exit Codes");
        }

        if !missing.is_empty() {
            return Some(ValidationError::file_level(
                path,
                missing,
                "Expected Rustdoc sections in module docs",
            ));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const DOCUMENTED_LIB: &str = "\
//! Widget inventory bookkeeping.
//!
//! # Purpose
//!
//! Tracks widget counts across warehouses.
//!
//! # Examples
//!
//! ```
//! let count = widgets::count();
//! ```

pub fn count() -> usize {
    0
}
";

    fn validate(file_name: &str, content: &str) -> Option<ValidationError> {
        RustValidator::new().validate_file_block(
            &PathBuf::from(file_name),
            content,
            &ValidateConfig::new(),
        )
    }

    #[test]
    fn test_complete_lib_docs_pass() {
        assert!(validate("lib.rs", DOCUMENTED_LIB).is_none());
    }

    #[test]
    fn test_no_module_docs_at_all() {
        let err = validate("lib.rs", "pub fn f() {}\n").unwrap();
        assert_eq!(err.missing_sections, vec!["module documentation (//!)"]);
    }

    #[test]
    fn test_single_missing_section() {
        let content = DOCUMENTED_LIB.replace("//! # Examples", "//! # Samples");
        let err = validate("lib.rs", &content).unwrap();
        assert_eq!(err.missing_sections, vec!["# Examples"]);
    }

    #[test]
    fn test_main_rs_requires_exit_section() {
        // Purpose and Examples both present is not enough for main.rs.
        let err = validate("main.rs", DOCUMENTED_LIB).unwrap();
        assert_eq!(err.missing_sections, vec!["# Exit Behavior or # Exit Codes"]);
    }

    #[test]
    fn test_lib_rs_does_not_require_exit_section() {
        assert!(validate("lib.rs", DOCUMENTED_LIB).is_none());
    }

    #[test]
    fn test_main_rs_with_exit_behavior_passes() {
        let content = DOCUMENTED_LIB.replace(
            "//! # Purpose",
            "//! # Exit Behavior\n//!\n//! Exits 0 on success.\n//!\n//! # Purpose",
        );
        assert!(validate("main.rs", &content).is_none());
    }

    #[test]
    fn test_exit_codes_spelling_also_accepted() {
        let content = DOCUMENTED_LIB.replace(
            "//! # Purpose",
            "//! # Exit Codes\n//!\n//! 0 on success, 1 on failure.\n//!\n//! # Purpose",
        );
        assert!(validate("main.rs", &content).is_none());
    }

    #[test]
    fn test_exitcodes_pragma_waives_main_rs_requirement() {
        let content = DOCUMENTED_LIB.to_string() + "// # noqa: EXITCODES\n";
        assert!(validate("main.rs", &content).is_none());
    }

    #[test]
    fn test_docs_after_line_100_are_not_seen() {
        let mut content = String::new();
        for _ in 0..101 {
            content.push_str("// filler\n");
        }
        content.push_str("//! # Purpose\n//! # Examples\n");
        let err = validate("lib.rs", &content).unwrap();
        assert_eq!(err.missing_sections, vec!["# Purpose", "# Examples"]);
    }

    #[test]
    fn test_pragma_exempts_purpose() {
        let content = DOCUMENTED_LIB.replace("//! # Purpose", "//! # Intent")
            + "// # noqa: PURPOSE\n";
        assert!(validate("lib.rs", &content).is_none());
    }
}
