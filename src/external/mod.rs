//! External symbol sources for languages without an in-process parser.
//!
//! Symbol discovery for Bash, Perl, and PowerShell is modeled as an injected
//! capability with three outcomes: the parser ran and produced results, the
//! parser is not installed, or the parser started but failed. Validators
//! decide per-language what each outcome means (fallback, silent skip, or a
//! diagnostic violation); nothing here raises past the caller.

mod bash_treesitter;
mod subprocess;

pub use bash_treesitter::BashTreeSitterSource;
pub use subprocess::{
    run_symbol_parser, PerlPpiSource, PowershellAstSource, PARSER_TIMEOUT_SECS,
};

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Why a started parser did not produce usable results.
#[derive(Error, Debug)]
pub enum ParserFailure {
    #[error("parser timed out after {0} seconds")]
    Timeout(u64),
    #[error("{0}")]
    Exit(String),
    #[error("malformed parser output: {0}")]
    Malformed(String),
}

/// Result of asking a symbol source about one file.
pub enum ParserOutcome {
    /// The parser ran and reported symbols (possibly with syntax errors).
    Available(ParserOutput),
    /// The parser or a module it needs is not installed.
    Unavailable,
    /// The parser started but failed.
    Failed(ParserFailure),
}

/// Parsed symbol report, decoded from the parser's JSON stdout.
#[derive(Debug, Default, Deserialize)]
pub struct ParserOutput {
    /// Syntax errors the parser encountered (file may still have symbols).
    #[serde(default)]
    pub errors: Vec<String>,
    /// Discovered symbols. Perl reports them under `subs`.
    #[serde(default, alias = "subs")]
    pub functions: Vec<ParsedSymbol>,
}

/// One symbol as reported by an external parser.
#[derive(Debug, Clone, Deserialize)]
pub struct ParsedSymbol {
    pub name: String,
    /// 1-based definition line.
    pub line: usize,
    /// Whether the symbol carries documentation (`has_pod` for Perl,
    /// `has_help` for PowerShell).
    #[serde(default, alias = "has_pod", alias = "has_help")]
    pub has_doc_comment: bool,
    /// Help sections present in a PowerShell function's comment-based help.
    #[serde(default)]
    pub help_sections: Vec<String>,
}

/// A source of symbol information for one file.
pub trait SymbolSource: Send + Sync {
    /// Extract symbols for the file. Must not panic or block past the
    /// parser timeout.
    fn extract(&self, path: &Path, content: &str) -> ParserOutcome;
}
