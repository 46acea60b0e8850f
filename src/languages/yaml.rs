//! YAML documentation validator.
//!
//! File-level only: workflow and config files must open with a comment
//! header naming the file, its purpose, triggers, dependencies, outputs,
//! and notes. Several sections accept alternative labels.

use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

use crate::config::ValidateConfig;
use crate::validate::{pragma, Language, ValidationError};

use super::LanguageValidator;

/// Workflow headers can run long; search this many leading lines.
const HEADER_LINES: usize = 50;

lazy_static! {
    /// Required header sections, in contract order.
    static ref REQUIRED_SECTIONS: Vec<(Regex, &'static str)> = vec![
        (
            Regex::new(r"(?mi)^#\s*(Workflow|File):").unwrap(),
            "Workflow: or File:"
        ),
        (Regex::new(r"(?mi)^#\s*Purpose:").unwrap(), "Purpose:"),
        (
            Regex::new(r"(?mi)^#\s*(Triggers|Usage):").unwrap(),
            "Triggers: or Usage:"
        ),
        (
            Regex::new(r"(?mi)^#\s*(Dependencies|Inputs):").unwrap(),
            "Dependencies: or Inputs:"
        ),
        (
            Regex::new(r"(?mi)^#\s*(Outputs|Side effects):").unwrap(),
            "Outputs: or Side effects:"
        ),
        (Regex::new(r"(?mi)^#\s*Notes?:").unwrap(), "Notes: or Note:"),
    ];
}

pub struct YamlValidator;

impl YamlValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YamlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageValidator for YamlValidator {
    fn language(&self) -> Language {
        Language::Yaml
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["yml", "yaml"]
    }

    fn section_names(&self) -> &'static [&'static str] {
        &[
            "Workflow: or File:",
            "Purpose:",
            "Triggers: or Usage:",
            "Dependencies: or Inputs:",
            "Outputs: or Side effects:",
            "Notes: or Note:",
        ]
    }

    fn validate_file_block(
        &self,
        path: &Path,
        content_text: &str,
        _config: &ValidateConfig,
    ) -> Option<ValidationError> {
        let header: String = content_text
            .lines()
            .take(HEADER_LINES)
            .collect::<Vec<_>>()
            .join("\n");

        let mut missing = Vec::new();
        for (pattern, name) in REQUIRED_SECTIONS.iter() {
            if pragma::is_exempted(content_text, name) {
                continue;
            }
            if !pattern.is_match(&header) {
                missing.push(*name);
            }
        }

        if !missing.is_empty() {
            return Some(ValidationError::file_level(
                path,
                missing,
                "Expected top-of-file comment header with # prefix",
            ));
        }
        None
    }
}
