//! Extension-based dispatch and the batch validation façade.

use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::config::ValidateConfig;
use crate::languages;

use super::ValidationError;

/// The closed set of languages with documentation contracts.
///
/// Adding a language is a deliberate extension point: a new variant, a new
/// validator module, and a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    Bash,
    PowerShell,
    Perl,
    Rust,
    Yaml,
}

impl Language {
    /// All supported languages, in dispatch order.
    pub fn all() -> &'static [Language] {
        &[
            Language::Python,
            Language::Bash,
            Language::PowerShell,
            Language::Perl,
            Language::Rust,
            Language::Yaml,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Bash => "bash",
            Language::PowerShell => "powershell",
            Language::Perl => "perl",
            Language::Rust => "rust",
            Language::Yaml => "yaml",
        }
    }

    /// Determine the language from a file extension (case-insensitive,
    /// without dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "py" => Some(Language::Python),
            "sh" | "bash" | "zsh" => Some(Language::Bash),
            "ps1" => Some(Language::PowerShell),
            "pl" | "pm" => Some(Language::Perl),
            "rs" => Some(Language::Rust),
            "yml" | "yaml" => Some(Language::Yaml),
            _ => None,
        }
    }

    /// Determine the language from a file path.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python" => Ok(Language::Python),
            "bash" => Ok(Language::Bash),
            "powershell" => Ok(Language::PowerShell),
            "perl" => Ok(Language::Perl),
            "rust" => Ok(Language::Rust),
            "yaml" => Ok(Language::Yaml),
            _ => Err(format!("unknown language: {}", s)),
        }
    }
}

/// Validate a single file based on its extension.
///
/// A read failure produces a single pass-through violation; an unknown
/// extension produces an empty list. This function never panics and never
/// returns an error.
pub fn validate_file(path: &Path, config: &ValidateConfig) -> Vec<ValidationError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            return vec![ValidationError::file_level(
                path,
                vec!["read error"],
                e.to_string(),
            )]
        }
    };

    match Language::from_path(path) {
        Some(language) => languages::get_validator(language).validate(path, &content, config),
        // Unknown extension: not an error, just out of scope.
        None => Vec::new(),
    }
}

/// Validate multiple files, optionally filtering by language.
///
/// Violations come back in input-file order with no deduplication. Files
/// are validated in parallel; no validator holds cross-file state.
pub fn validate_files(
    paths: &[PathBuf],
    language: Option<Language>,
    config: &ValidateConfig,
) -> Vec<ValidationError> {
    let per_file: Vec<Vec<ValidationError>> = paths
        .par_iter()
        .map(|path| {
            if let Some(filter) = language {
                if Language::from_path(path) != Some(filter) {
                    return Vec::new();
                }
            }
            validate_file(path, config)
        })
        .collect();

    per_file.into_iter().flatten().collect()
}
