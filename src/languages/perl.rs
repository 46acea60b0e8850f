//! Perl documentation validator.
//!
//! File-level validation requires a POD block with the standard `=head1`
//! sections. Subroutine coverage comes from the PPI bridge; when PPI is not
//! installed the symbol phase is skipped silently, and any other bridge
//! failure degrades to a single diagnostic violation.

use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

use crate::config::ValidateConfig;
use crate::external::{ParserFailure, ParserOutcome, PerlPpiSource, SymbolSource};
use crate::validate::{pragma, Language, ValidationError};

use super::LanguageValidator;

lazy_static! {
    /// Required POD sections, in contract order.
    static ref REQUIRED_SECTIONS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?m)^=head1\s+NAME").unwrap(), "=head1 NAME"),
        (
            Regex::new(r"(?m)^=head1\s+SYNOPSIS").unwrap(),
            "=head1 SYNOPSIS"
        ),
        (
            Regex::new(r"(?m)^=head1\s+DESCRIPTION").unwrap(),
            "=head1 DESCRIPTION"
        ),
        (
            Regex::new(r"(?m)^=head1\s+ENVIRONMENT VARIABLES").unwrap(),
            "=head1 ENVIRONMENT VARIABLES"
        ),
        (
            Regex::new(r"(?m)^=head1\s+EXIT CODES").unwrap(),
            "=head1 EXIT CODES"
        ),
        (
            Regex::new(r"(?m)^=head1\s+EXAMPLES").unwrap(),
            "=head1 EXAMPLES"
        ),
    ];
}

pub struct PerlValidator {
    source: Box<dyn SymbolSource>,
}

impl PerlValidator {
    pub fn new() -> Self {
        Self {
            source: Box::new(PerlPpiSource),
        }
    }

    /// Build a validator with a custom symbol source (tests).
    pub fn with_source(source: Box<dyn SymbolSource>) -> Self {
        Self { source }
    }
}

impl Default for PerlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageValidator for PerlValidator {
    fn language(&self) -> Language {
        Language::Perl
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["pl", "pm"]
    }

    fn section_names(&self) -> &'static [&'static str] {
        &[
            "=head1 NAME",
            "=head1 SYNOPSIS",
            "=head1 DESCRIPTION",
            "=head1 ENVIRONMENT VARIABLES",
            "=head1 EXIT CODES",
            "=head1 EXAMPLES",
        ]
    }

    fn validate_file_block(
        &self,
        path: &Path,
        content_text: &str,
        _config: &ValidateConfig,
    ) -> Option<ValidationError> {
        if !content_text.contains("=head1") || !content_text.contains("=cut") {
            return Some(ValidationError::file_level(
                path,
                vec!["POD block"],
                "Expected POD documentation with =head1 sections and =cut",
            ));
        }

        let mut missing = Vec::new();
        for (pattern, name) in REQUIRED_SECTIONS.iter() {
            if pragma::is_exempted(content_text, name) {
                continue;
            }
            if !pattern.is_match(content_text) {
                missing.push(*name);
            }
        }

        if !missing.is_empty() {
            return Some(ValidationError::file_level(
                path,
                missing,
                "Expected POD sections",
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
            // PPI not installed: file-level checks are all we can offer.
            ParserOutcome::Unavailable => Vec::new(),
            ParserOutcome::Failed(ParserFailure::Timeout(secs)) => {
                vec![ValidationError::file_level(
                    path,
                    vec!["Perl parser timeout"],
                    format!(
                        "Perl POD parser timed out after {} seconds (file too large or complex)",
                        secs
                    ),
                )]
            }
            ParserOutcome::Failed(failure) => vec![ValidationError::file_level(
                path,
                vec!["Perl PPI parse"],
                format!("Failed to parse Perl script: {}", failure),
            )],
            ParserOutcome::Available(output) => {
                let lines: Vec<&str> = content_text.lines().collect();
                let mut errors = Vec::new();

                for message in output.errors {
                    errors.push(ValidationError::file_level(
                        path,
                        vec!["Perl syntax"],
                        message,
                    ));
                }

                for sub in output.functions {
                    if pragma::is_symbol_exempted(&lines, sub.line) {
                        continue;
                    }
                    if !sub.has_doc_comment {
                        errors.push(ValidationError::symbol(
                            path,
                            vec!["subroutine POD"],
                            "Subroutine must have POD documentation with =head2 or =head3 section",
                            format!("sub {}", sub.name),
                            Some(sub.line),
                        ));
                    }
                }

                errors
            }
        }
    }
}
