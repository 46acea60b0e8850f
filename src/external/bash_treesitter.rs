//! Structural Bash symbol source backed by tree-sitter.
//!
//! When the `tree-sitter` feature is disabled the source reports
//! `Unavailable` and the Bash validator falls back to its regex scan.

use std::path::Path;

use super::{ParserOutcome, SymbolSource};

/// In-process structural parser for Bash function definitions.
pub struct BashTreeSitterSource;

impl BashTreeSitterSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BashTreeSitterSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "tree-sitter")]
impl SymbolSource for BashTreeSitterSource {
    fn extract(&self, _path: &Path, content: &str) -> ParserOutcome {
        use super::{ParsedSymbol, ParserOutput};

        let mut parser = tree_sitter::Parser::new();
        let language: tree_sitter::Language = tree_sitter_bash::LANGUAGE.into();
        if parser.set_language(&language).is_err() {
            return ParserOutcome::Unavailable;
        }

        let tree = match parser.parse(content, None) {
            Some(t) => t,
            None => return ParserOutcome::Unavailable,
        };

        let lines: Vec<&str> = content.lines().collect();
        let mut functions = Vec::new();
        collect_functions(tree.root_node(), content, &lines, &mut functions);
        functions.sort_by_key(|f| f.line);

        ParserOutcome::Available(ParserOutput {
            errors: Vec::new(),
            functions,
        })
    }
}

#[cfg(not(feature = "tree-sitter"))]
impl SymbolSource for BashTreeSitterSource {
    fn extract(&self, _path: &Path, _content: &str) -> ParserOutcome {
        ParserOutcome::Unavailable
    }
}

#[cfg(feature = "tree-sitter")]
fn collect_functions(
    node: tree_sitter::Node,
    source: &str,
    lines: &[&str],
    out: &mut Vec<super::ParsedSymbol>,
) {
    if node.kind() == "function_definition" {
        // The function name is a `word` child, not a named field.
        let name = node
            .children(&mut node.walk())
            .find(|c| c.kind() == "word")
            .and_then(|c| c.utf8_text(source.as_bytes()).ok())
            .map(|s| s.trim().to_string());

        if let Some(name) = name {
            let line = node.start_position().row + 1;
            out.push(super::ParsedSymbol {
                name,
                line,
                has_doc_comment: has_doc_comment(lines, node.start_position().row),
                help_sections: Vec::new(),
            });
        }
    }

    for child in node.children(&mut node.walk()) {
        collect_functions(child, source, lines, out);
    }
}

/// Scan upward from the definition for an adjacent comment block.
///
/// Blank lines between the block and the definition are tolerated; the
/// shebang line never counts as documentation. The window is capped at ten
/// lines so comments from a previous function are not picked up.
#[cfg(feature = "tree-sitter")]
fn has_doc_comment(lines: &[&str], definition_row: usize) -> bool {
    if definition_row == 0 {
        return false;
    }

    let mut seen_comment = false;
    let lowest = definition_row.saturating_sub(10);
    for row in (lowest..definition_row).rev() {
        let line = lines.get(row).map(|l| l.trim()).unwrap_or("");
        if line.starts_with("#!") {
            break;
        }
        if line.starts_with('#') {
            seen_comment = true;
        } else if line.is_empty() {
            if seen_comment {
                break;
            }
        } else {
            break;
        }
    }

    seen_comment
}
