//! Output formatting for validation results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};

use crate::validate::ValidationError;

/// JSON report envelope.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub files_scanned: usize,
    pub passed: bool,
    pub violations: Vec<JsonViolation>,
}

/// One violation in JSON form.
#[derive(Serialize, Deserialize)]
pub struct JsonViolation {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub missing_sections: Vec<String>,
    pub message: String,
}

fn violation_to_json(v: &ValidationError) -> JsonViolation {
    JsonViolation {
        file: v.file_path.clone(),
        line: v.line_number,
        symbol: v.symbol_name.clone(),
        missing_sections: v.missing_sections.clone(),
        message: v.message.clone(),
    }
}

/// Write results in JSON format.
pub fn write_json(
    path: &str,
    files_scanned: usize,
    errors: &[ValidationError],
) -> anyhow::Result<()> {
    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        files_scanned,
        passed: errors.is_empty(),
        violations: errors.iter().map(violation_to_json).collect(),
    };

    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

/// Write results in pretty (human-readable) format.
pub fn write_pretty(path: &str, files_scanned: usize, errors: &[ValidationError]) {
    // Header
    println!();
    print!("  ");
    print!("{}", "docgate".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Scanning: ".dimmed());
    println!("{}", path);
    print!("  {}", "Files:    ".dimmed());
    println!("{}", files_scanned);
    println!();

    if errors.is_empty() {
        print!("  {}", "✓ PASS".green());
        println!("  all files conform to documentation contracts");
        println!();
        return;
    }

    print!("  {}", "✗ FAIL".red());
    println!("  {} violation(s)", errors.len());
    println!();

    for error in errors {
        write_violation(error);
    }

    println!(
        "  {}",
        "Add the missing sections or exempt them with an inline pragma.".dimmed()
    );
    println!();
}

fn write_violation(error: &ValidationError) {
    print!("    {} ", "✗".red());
    println!("{}", error.location().blue());

    if let Some(symbol) = &error.symbol_name {
        println!("      {}{}", "Symbol:  ".dimmed(), symbol);
    }
    println!(
        "      {}{}",
        "Missing: ".dimmed(),
        error.missing_sections.join(", ")
    );
    if !error.message.is_empty() {
        println!("      {}", error.message.dimmed());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_json_violation_shape() {
        let err = ValidationError::symbol(
            &PathBuf::from("a.py"),
            vec![":param"],
            "Function docstring must include :param field(s) per PEP 287 reST style",
            "def f()",
            Some(7),
        );
        let json = violation_to_json(&err);
        assert_eq!(json.file, "a.py");
        assert_eq!(json.line, Some(7));
        assert_eq!(json.symbol.as_deref(), Some("def f()"));
        assert_eq!(json.missing_sections, vec![":param"]);
    }

    #[test]
    fn test_json_report_round_trips() {
        let errors = vec![ValidationError::file_level(
            &PathBuf::from("w.yml"),
            vec!["Purpose:"],
            "Expected top-of-file comment header with # prefix",
        )];
        let report = JsonReport {
            version: "0.1.0".into(),
            path: ".".into(),
            files_scanned: 3,
            passed: false,
            violations: errors.iter().map(violation_to_json).collect(),
        };
        let json = serde_json::to_string(&report).unwrap();
        // File-level violations omit symbol and line entirely.
        assert!(!json.contains("\"symbol\""));
        assert!(!json.contains("\"line\""));
        let back: JsonReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.files_scanned, 3);
        assert!(!back.passed);
    }
}
