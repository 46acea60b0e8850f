//! Docgate - documentation contract gate.
//!
//! Docgate enforces documentation contracts across a polyglot repository:
//! every supported source file must carry the documentation sections its
//! language requires (Purpose, Environment Variables, Examples, Exit Codes,
//! parameter and return fields, and so on), unless an inline pragma exempts
//! it.
//!
//! # Architecture
//!
//! - `validate`: the violation model, pragma matcher, content heuristics,
//!   and the extension dispatcher with the batch façade
//! - `languages`: one validator per language (Python, Bash, Perl,
//!   PowerShell, Rust, YAML), each running a file-level phase and, where
//!   the contract requires it, a symbol-level phase
//! - `external`: symbol sources for languages parsed out of process
//!   (Perl/PPI, PowerShell AST) or via tree-sitter (Bash)
//! - `report`: output formatting (pretty, JSON)
//!
//! # Adding a New Language
//!
//! Add a `Language` variant, implement `LanguageValidator` in
//! `src/languages/`, and register it in `languages/mod.rs`.

pub mod cli;
pub mod config;
pub mod external;
pub mod languages;
pub mod report;
pub mod validate;

pub use config::ValidateConfig;
pub use external::{ParsedSymbol, ParserFailure, ParserOutcome, ParserOutput, SymbolSource};
pub use languages::{register_validators, LanguageValidator};
pub use validate::{validate_file, validate_files, Language, ValidationError};

/// Initialize all subsystems.
///
/// Call this once at startup.
pub fn init() {
    register_validators();
}
