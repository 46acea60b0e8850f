//! Core trait for language-specific documentation validators.

use std::path::Path;

use crate::config::ValidateConfig;
use crate::validate::{Language, ValidationError};

/// Language-specific documentation validator.
///
/// Every language implements the same two-phase contract: the file-level
/// documentation block is checked first, then individual symbols. The
/// file-level phase reports at most one aggregated violation; the symbol
/// phase reports one violation per offending symbol.
///
/// # Thread Safety
///
/// Validators hold no per-file state, so one registered instance serves
/// concurrent validation of many files.
pub trait LanguageValidator: Send + Sync {
    /// The language this validator handles.
    fn language(&self) -> Language;

    /// File extensions (without dot) this validator handles.
    fn file_extensions(&self) -> &'static [&'static str];

    /// Human-readable names of the required file-level sections.
    fn section_names(&self) -> &'static [&'static str];

    /// Validate the file-level documentation block.
    fn validate_file_block(
        &self,
        path: &Path,
        content: &str,
        config: &ValidateConfig,
    ) -> Option<ValidationError>;

    /// Validate individual symbols. Languages with file-level-only
    /// contracts keep the default.
    fn validate_symbols(
        &self,
        _path: &Path,
        _content: &str,
        _config: &ValidateConfig,
    ) -> Vec<ValidationError> {
        Vec::new()
    }

    /// Run both phases; the file-level violation (if any) always precedes
    /// symbol-level violations.
    fn validate(&self, path: &Path, content: &str, config: &ValidateConfig) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if let Some(file_error) = self.validate_file_block(path, content, config) {
            errors.push(file_error);
        }
        errors.extend(self.validate_symbols(path, content, config));
        errors
    }

    /// Check if this validator handles the given file extension.
    fn handles_extension(&self, ext: &str) -> bool {
        self.file_extensions().contains(&ext)
    }
}
