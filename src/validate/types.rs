//! Core types for validation results.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single documentation-contract failure.
///
/// One instance aggregates every missing section for a file-level check;
/// symbol-level checks produce one instance per offending symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Path of the file that was validated.
    pub file_path: String,
    /// Section identifiers the contract required but did not find, in the
    /// order the contract declares them.
    pub missing_sections: Vec<String>,
    /// Remediation or context message; may be empty.
    #[serde(default)]
    pub message: String,
    /// Symbol the violation refers to (e.g. `def foo()`, `sub bar`);
    /// absent for file-level violations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_name: Option<String>,
    /// 1-based line of the symbol definition, when the parser supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
}

impl ValidationError {
    /// Create a file-level violation.
    pub fn file_level<S: Into<String>>(
        path: &Path,
        missing_sections: Vec<&str>,
        message: S,
    ) -> Self {
        Self {
            file_path: path.to_string_lossy().to_string(),
            missing_sections: missing_sections.into_iter().map(String::from).collect(),
            message: message.into(),
            symbol_name: None,
            line_number: None,
        }
    }

    /// Create a symbol-level violation.
    ///
    /// `line_number` stays optional: the extractor must have tried to
    /// resolve it, but some parsers cannot report one.
    pub fn symbol<S: Into<String>, N: Into<String>>(
        path: &Path,
        missing_sections: Vec<&str>,
        message: S,
        symbol_name: N,
        line_number: Option<usize>,
    ) -> Self {
        Self {
            file_path: path.to_string_lossy().to_string(),
            missing_sections: missing_sections.into_iter().map(String::from).collect(),
            message: message.into(),
            symbol_name: Some(symbol_name.into()),
            line_number,
        }
    }

    /// `path` or `path:line` when a line is known.
    pub fn location(&self) -> String {
        match self.line_number {
            Some(line) => format!("{}:{}", self.file_path, line),
            None => self.file_path.clone(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sections = self.missing_sections.join(", ");
        match &self.symbol_name {
            Some(symbol) => write!(f, "{} [{}] missing: {}", self.location(), symbol, sections)?,
            None => write!(f, "{} missing required sections: {}", self.location(), sections)?,
        }
        if !self.message.is_empty() {
            write!(f, " ({})", self.message)?;
        }
        Ok(())
    }
}
