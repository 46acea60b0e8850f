//! Run-wide validation configuration.
//!
//! Built once from CLI flags and passed by reference through
//! `validate_file`/`validate_files`, so parallel validation never touches
//! shared mutable state.

/// Options that alter validation behavior for a whole run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateConfig {
    /// Skip the exit-code content heuristics (`--no-content-checks`).
    pub skip_content_checks: bool,
}

impl ValidateConfig {
    /// Create a configuration with default behavior (all checks enabled).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether exit-code content heuristics are skipped.
    pub fn skip_content_checks(mut self, skip: bool) -> Self {
        self.skip_content_checks = skip;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_runs_content_checks() {
        let config = ValidateConfig::new();
        assert!(!config.skip_content_checks);
    }

    #[test]
    fn test_builder_sets_flag() {
        let config = ValidateConfig::new().skip_content_checks(true);
        assert!(config.skip_content_checks);
    }
}
