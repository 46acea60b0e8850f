//! Lenient content checks for exit-code documentation.
//!
//! The heuristic is deliberately asymmetric: a section that mentions `0` or
//! `1` anywhere passes, and only a section with no recognizable exit code at
//! all is reported. Tightening it would reject documentation the contract
//! currently accepts.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::ValidateConfig;

lazy_static! {
    /// Exit code 0 near a success word, tolerating `exit:`/`if` filler.
    /// Accepts "0    Success", "0: Success", "Exit: 0 if success",
    /// "0 if all tests pass".
    static ref SUCCESS_CODE: Regex = Regex::new(
        r"(?ims)(?:exit[:\s]+)?0[\s:\-]+(?:if\s+)?.*?(?:success|ok|pass|complete|all.*pass)"
    )
    .unwrap();

    /// Exit code 1 near a failure word, same tolerances.
    static ref FAILURE_CODE: Regex = Regex::new(
        r"(?ims)(?:exit[:\s]+)?1[\s:\-]+(?:if\s+)?.*?(?:fail|error|invalid|any.*fail)"
    )
    .unwrap();

    /// Fallback: any of the common exit codes mentioned at all.
    static ref ANY_EXIT_CODE: Regex = Regex::new(r"\b(?:0|1|2|127)\b").unwrap();
}

/// Check that an exit-codes section documents at least codes 0 and 1.
///
/// Returns an error message when validation fails, `None` when the section
/// is acceptable or content checks are disabled.
pub fn validate_exit_codes_content(section: &str, config: &ValidateConfig) -> Option<String> {
    if config.skip_content_checks {
        return None;
    }

    let has_exit_0 = SUCCESS_CODE.is_match(section);
    let has_exit_1 = FAILURE_CODE.is_match(section);

    // Only fail when there is no exit-code documentation at all.
    if !has_exit_0 && !has_exit_1 && !ANY_EXIT_CODE.is_match(section) {
        return Some("No exit codes found (expected at least 0 and 1)".to_string());
    }

    None
}
