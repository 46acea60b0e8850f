//! PowerShell documentation validator.
//!
//! File-level validation checks the `<# ... #>` comment-based help block for
//! the required dot-sections. Function coverage comes from the native AST
//! bridge (`Parser::ParseFile`, no script execution): a function needs
//! comment-based help, and that help needs at least `.SYNOPSIS` and
//! `.DESCRIPTION`.

use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

use crate::config::ValidateConfig;
use crate::external::{ParserFailure, ParserOutcome, PowershellAstSource, SymbolSource};
use crate::validate::{pragma, Language, ValidationError};

use super::LanguageValidator;

lazy_static! {
    /// Required help-block sections, in contract order.
    static ref REQUIRED_SECTIONS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)\.SYNOPSIS").unwrap(), ".SYNOPSIS"),
        (Regex::new(r"(?i)\.DESCRIPTION").unwrap(), ".DESCRIPTION"),
        (Regex::new(r"(?i)\.ENVIRONMENT").unwrap(), ".ENVIRONMENT"),
        (Regex::new(r"(?i)\.EXAMPLE").unwrap(), ".EXAMPLE"),
        (Regex::new(r"(?i)\.NOTES").unwrap(), ".NOTES"),
    ];

    /// The first comment-based help block.
    static ref HELP_BLOCK: Regex = Regex::new(r"(?s)<#(.+?)#>").unwrap();
}

/// Sections every function's own help must carry.
const FUNCTION_HELP_SECTIONS: &[&str] = &[".SYNOPSIS", ".DESCRIPTION"];

pub struct PowerShellValidator {
    source: Box<dyn SymbolSource>,
}

impl PowerShellValidator {
    pub fn new() -> Self {
        Self {
            source: Box::new(PowershellAstSource),
        }
    }

    /// Build a validator with a custom symbol source (tests).
    pub fn with_source(source: Box<dyn SymbolSource>) -> Self {
        Self { source }
    }
}

impl Default for PowerShellValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageValidator for PowerShellValidator {
    fn language(&self) -> Language {
        Language::PowerShell
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["ps1"]
    }

    fn section_names(&self) -> &'static [&'static str] {
        &[".SYNOPSIS", ".DESCRIPTION", ".ENVIRONMENT", ".EXAMPLE", ".NOTES"]
    }

    fn validate_file_block(
        &self,
        path: &Path,
        content_text: &str,
        _config: &ValidateConfig,
    ) -> Option<ValidationError> {
        if !content_text.contains("<#") || !content_text.contains("#>") {
            return Some(ValidationError::file_level(
                path,
                vec!["comment-based help block"],
                "Expected <# ... #> comment-based help block",
            ));
        }

        let help_block = match HELP_BLOCK.captures(content_text) {
            Some(caps) => caps.get(1).map(|m| m.as_str()).unwrap_or(""),
            None => {
                return Some(ValidationError::file_level(
                    path,
                    vec!["comment-based help block"],
                    "Could not parse <# ... #> block",
                ))
            }
        };

        let mut missing = Vec::new();
        for (pattern, name) in REQUIRED_SECTIONS.iter() {
            if pragma::is_exempted(content_text, name) {
                continue;
            }
            if !pattern.is_match(help_block) {
                missing.push(*name);
            }
        }

        if !missing.is_empty() {
            return Some(ValidationError::file_level(
                path,
                missing,
                "Expected PowerShell comment-based help",
            ));
        }
        None
    }

    fn validate_symbols(
        &self,
        path: &Path,
        content_text: &str,
        _config: &ValidateConfig,
    ) -> Vec<ValidationError> {
        match self.source.extract(path, content_text) {
            // pwsh not installed: file-level checks are all we can offer.
            ParserOutcome::Unavailable => Vec::new(),
            ParserOutcome::Failed(ParserFailure::Timeout(secs)) => {
                vec![ValidationError::file_level(
                    path,
                    vec!["PowerShell parser timeout"],
                    format!(
                        "PowerShell AST parser timed out after {} seconds (file too large or complex)",
                        secs
                    ),
                )]
            }
            ParserOutcome::Failed(ParserFailure::Malformed(detail)) => {
                vec![ValidationError::file_level(
                    path,
                    vec!["PowerShell parser error"],
                    format!("Failed to parse PowerShell AST output: {}", detail),
                )]
            }
            ParserOutcome::Failed(failure) => vec![ValidationError::file_level(
                path,
                vec!["PowerShell AST parse"],
                format!("Failed to parse PowerShell script: {}", failure),
            )],
            ParserOutcome::Available(output) => {
                let lines: Vec<&str> = content_text.lines().collect();
                let mut errors = Vec::new();

                for message in output.errors {
                    errors.push(ValidationError::file_level(
                        path,
                        vec!["PowerShell syntax"],
                        message,
                    ));
                }

                for func in output.functions {
                    if pragma::is_symbol_exempted(&lines, func.line) {
                        continue;
                    }
                    if !func.has_doc_comment {
                        errors.push(ValidationError::symbol(
                            path,
                            vec!["function help block"],
                            "Function must have comment-based help with .SYNOPSIS, .DESCRIPTION, etc.",
                            func.name.clone(),
                            Some(func.line),
                        ));
                        continue;
                    }

                    let missing: Vec<&str> = FUNCTION_HELP_SECTIONS
                        .iter()
                        .filter(|s| !func.help_sections.iter().any(|h| h == *s))
                        .copied()
                        .collect();
                    if !missing.is_empty() {
                        errors.push(ValidationError::symbol(
                            path,
                            missing,
                            "Function help missing required sections",
                            func.name.clone(),
                            Some(func.line),
                        ));
                    }
                }

                errors
            }
        }
    }
}
