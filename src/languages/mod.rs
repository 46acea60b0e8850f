//! Language-specific validator implementations.

mod bash;
mod perl;
mod powershell;
mod python;
mod rust_lang;
mod traits;
mod yaml;

pub use bash::BashValidator;
pub use perl::PerlValidator;
pub use powershell::PowerShellValidator;
pub use python::PythonValidator;
pub use rust_lang::RustValidator;
pub use traits::LanguageValidator;
pub use yaml::YamlValidator;

use crate::validate::Language;
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicBool, Ordering};

/// Static storage for the Python validator.
static PYTHON_VALIDATOR: OnceCell<PythonValidator> = OnceCell::new();

/// Static storage for the Bash validator.
static BASH_VALIDATOR: OnceCell<BashValidator> = OnceCell::new();

/// Static storage for the Perl validator.
static PERL_VALIDATOR: OnceCell<PerlValidator> = OnceCell::new();

/// Static storage for the PowerShell validator.
static POWERSHELL_VALIDATOR: OnceCell<PowerShellValidator> = OnceCell::new();

/// Static storage for the Rust validator.
static RUST_VALIDATOR: OnceCell<RustValidator> = OnceCell::new();

/// Static storage for the YAML validator.
static YAML_VALIDATOR: OnceCell<YamlValidator> = OnceCell::new();

/// Whether validators have been registered.
static REGISTERED: AtomicBool = AtomicBool::new(false);

/// Register all language validators.
///
/// Idempotent; call once at startup.
pub fn register_validators() {
    if REGISTERED.swap(true, Ordering::SeqCst) {
        return; // Already registered
    }

    PYTHON_VALIDATOR.get_or_init(PythonValidator::new);
    BASH_VALIDATOR.get_or_init(BashValidator::new);
    PERL_VALIDATOR.get_or_init(PerlValidator::new);
    POWERSHELL_VALIDATOR.get_or_init(PowerShellValidator::new);
    RUST_VALIDATOR.get_or_init(RustValidator::new);
    YAML_VALIDATOR.get_or_init(YamlValidator::new);
}

/// Get the validator for a language.
pub fn get_validator(language: Language) -> &'static dyn LanguageValidator {
    register_validators();

    match language {
        Language::Python => PYTHON_VALIDATOR
            .get_or_init(PythonValidator::new) as &'static dyn LanguageValidator,
        Language::Bash => BASH_VALIDATOR.get_or_init(BashValidator::new),
        Language::Perl => PERL_VALIDATOR.get_or_init(PerlValidator::new),
        Language::PowerShell => POWERSHELL_VALIDATOR.get_or_init(PowerShellValidator::new),
        Language::Rust => RUST_VALIDATOR.get_or_init(RustValidator::new),
        Language::Yaml => YAML_VALIDATOR.get_or_init(YamlValidator::new),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_has_a_validator() {
        for &language in Language::all() {
            let validator = get_validator(language);
            assert_eq!(validator.language(), language);
            assert!(!validator.file_extensions().is_empty());
            assert!(!validator.section_names().is_empty());
        }
    }

    #[test]
    fn test_extensions_do_not_overlap() {
        let mut seen = std::collections::HashSet::new();
        for &language in Language::all() {
            for ext in get_validator(language).file_extensions() {
                assert!(seen.insert(*ext), "extension {} registered twice", ext);
            }
        }
    }
}
