//! Bash documentation validator.
//!
//! The file header (first 100 lines) must carry the required `#`-prefixed
//! sections; the `OUTPUTS:` section content is run through the exit-code
//! heuristic. Function discovery prefers the structural source and falls
//! back to a line-based regex scan when it is unavailable or fails.

use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

use crate::config::ValidateConfig;
use crate::external::{BashTreeSitterSource, ParserOutcome, SymbolSource};
use crate::validate::{content, pragma, Language, ValidationError};

use super::LanguageValidator;

/// How many leading lines can hold the file-level header block.
const HEADER_LINES: usize = 100;

lazy_static! {
    /// Required header sections, in contract order.
    static ref REQUIRED_SECTIONS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)#\s*DESCRIPTION:").unwrap(), "DESCRIPTION:"),
        (Regex::new(r"(?i)#\s*USAGE:").unwrap(), "USAGE:"),
        (Regex::new(r"(?i)#\s*INPUTS:").unwrap(), "INPUTS:"),
        (Regex::new(r"(?i)#\s*OUTPUTS:").unwrap(), "OUTPUTS:"),
        (Regex::new(r"(?i)#\s*EXAMPLES:").unwrap(), "EXAMPLES:"),
    ];

    /// `OUTPUTS:` section body: the run of comment lines that follows it.
    static ref OUTPUTS_SECTION: Regex =
        Regex::new(r"(?i)#\s*OUTPUTS:\s*\n((?:#.*\n)+)").unwrap();

    /// Function definitions: `function name() {`, `name() {`, `function name {`.
    static ref FUNCTION_DEF: Regex = Regex::new(
        r"^\s*(?:function\s+)?([a-zA-Z_][a-zA-Z0-9_]*)\s*\(\s*\)\s*\{?|^\s*function\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*\{"
    )
    .unwrap();

    /// Line-scoped exemption for one function.
    static ref FUNCTION_NOQA: Regex = Regex::new(r"#\s*noqa:\s*FUNCTION").unwrap();
}

pub struct BashValidator {
    source: Box<dyn SymbolSource>,
}

impl BashValidator {
    pub fn new() -> Self {
        Self {
            source: Box::new(BashTreeSitterSource::new()),
        }
    }

    /// Build a validator with a custom symbol source (tests).
    pub fn with_source(source: Box<dyn SymbolSource>) -> Self {
        Self { source }
    }

    /// Regex fallback: scan every line for a definition and look upward for
    /// an adjacent comment block.
    fn validate_functions_by_regex(&self, path: &Path, content_text: &str) -> Vec<ValidationError> {
        let lines: Vec<&str> = content_text.lines().collect();
        let mut errors = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            let caps = match FUNCTION_DEF.captures(line) {
                Some(c) => c,
                None => continue,
            };
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or("");
            if name.is_empty() {
                continue;
            }
            let lineno = i + 1;

            if FUNCTION_NOQA.is_match(line) || pragma::is_symbol_exempted(&lines, lineno) {
                continue;
            }

            let comment_block = collect_comment_block(&lines, i);

            if comment_block.is_empty() {
                errors.push(ValidationError::symbol(
                    path,
                    vec!["function documentation"],
                    "Function must have comment block with description, args, returns",
                    format!("{}()", name),
                    Some(lineno),
                ));
            } else if !has_description(&comment_block) {
                errors.push(ValidationError::symbol(
                    path,
                    vec!["function description"],
                    "Function comment block must include description text",
                    format!("{}()", name),
                    Some(lineno),
                ));
            }
        }

        errors
    }
}

impl Default for BashValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageValidator for BashValidator {
    fn language(&self) -> Language {
        Language::Bash
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["sh", "bash", "zsh"]
    }

    fn section_names(&self) -> &'static [&'static str] {
        &["DESCRIPTION:", "USAGE:", "INPUTS:", "OUTPUTS:", "EXAMPLES:"]
    }

    fn validate_file_block(
        &self,
        path: &Path,
        content_text: &str,
        config: &ValidateConfig,
    ) -> Option<ValidationError> {
        let header: String = content_text
            .lines()
            .take(HEADER_LINES)
            .collect::<Vec<_>>()
            .join("\n");

        if !content_text.starts_with("#!/usr/bin/env bash") && !content_text.starts_with("#!/bin/bash")
        {
            return Some(ValidationError::file_level(
                path,
                vec!["shebang"],
                "Expected '#!/usr/bin/env bash' shebang",
            ));
        }

        let mut missing = Vec::new();
        for (pattern, name) in REQUIRED_SECTIONS.iter() {
            if pragma::is_exempted(content_text, name) {
                continue;
            }
            if !pattern.is_match(&header) {
                missing.push(*name);
            }
        }

        // Content validation for the OUTPUTS section, when present.
        // An incomplete section replaces the missing-sections report.
        if !missing.contains(&"OUTPUTS:") {
            if let Some(caps) = OUTPUTS_SECTION.captures(&header) {
                let outputs: String = caps
                    .get(1)
                    .map(|m| m.as_str())
                    .unwrap_or("")
                    .lines()
                    .filter(|l| !l.trim().is_empty())
                    .map(|l| l.trim_start_matches('#').trim())
                    .collect::<Vec<_>>()
                    .join("\n");
                if let Some(err) = content::validate_exit_codes_content(&outputs, config) {
                    if !pragma::is_exempted(content_text, "EXITCODES") {
                        return Some(ValidationError::file_level(
                            path,
                            vec!["OUTPUTS content"],
                            format!("Exit codes incomplete: {}", err),
                        ));
                    }
                }
            }
        }

        if !missing.is_empty() {
            return Some(ValidationError::file_level(
                path,
                missing,
                "Expected top-of-file comment block with # prefix",
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
            ParserOutcome::Available(output) => {
                let lines: Vec<&str> = content_text.lines().collect();
                let mut errors = Vec::new();
                for func in output.functions {
                    let def_line = lines.get(func.line.saturating_sub(1)).copied().unwrap_or("");
                    if FUNCTION_NOQA.is_match(def_line)
                        || pragma::is_symbol_exempted(&lines, func.line)
                    {
                        continue;
                    }
                    if !func.has_doc_comment {
                        errors.push(ValidationError::symbol(
                            path,
                            vec!["function documentation"],
                            "Function must have comment block with description, args, returns",
                            format!("{}()", func.name),
                            Some(func.line),
                        ));
                    }
                }
                errors
            }
            // Structural parsing absent or broken: the regex scan still
            // gives useful coverage.
            ParserOutcome::Unavailable | ParserOutcome::Failed(_) => {
                self.validate_functions_by_regex(path, content_text)
            }
        }
    }
}

/// Collect the contiguous `#` block immediately above line `def_index`.
///
/// Blank lines before the first collected comment are skipped; a blank line
/// after at least one comment terminates the block.
fn collect_comment_block<'a>(lines: &[&'a str], def_index: usize) -> Vec<&'a str> {
    let mut block = Vec::new();
    let mut j = def_index as isize - 1;

    while j >= 0 {
        let line = lines[j as usize].trim();
        if line.starts_with('#') {
            block.insert(0, lines[j as usize]);
        } else if line.is_empty() {
            if !block.is_empty() {
                break;
            }
        } else {
            break;
        }
        j -= 1;
    }

    block
}

/// A block counts as a description only if some line, stripped of `#` and
/// whitespace, is longer than 3 characters and is not a bare `Header:` line.
fn has_description(block: &[&str]) -> bool {
    block.iter().any(|line| {
        let stripped = line.trim().trim_start_matches('#').trim();
        stripped.len() > 3 && !stripped.ends_with(':')
    })
}
