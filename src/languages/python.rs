//! Python documentation validator.
//!
//! File-level validation checks the module docstring for the required reST
//! sections. Symbol-level validation walks the full AST, including nested
//! and private symbols: every function needs a docstring with `:param`
//! fields when it takes parameters and a `:returns:`/`:rtype:` field when it
//! returns a value; every class needs a docstring. A file that fails to
//! parse skips symbol validation but still gets file-level checks.

use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

use crate::config::ValidateConfig;
use crate::validate::{content, pragma, Language, ValidationError};

use super::LanguageValidator;

const TRIPLE_QUOTE: &str = "\"\"\"";

lazy_static! {
    /// Required module-docstring sections, in contract order.
    static ref REQUIRED_SECTIONS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?m)^:Purpose:\s*$").unwrap(), "Purpose"),
        (
            Regex::new(r"(?m)^:Environment Variables:\s*$").unwrap(),
            "Environment Variables"
        ),
        (Regex::new(r"(?m)^:Examples:\s*$").unwrap(), "Examples"),
        (Regex::new(r"(?m)^:Exit Codes:\s*$").unwrap(), "Exit Codes"),
    ];

    /// First triple-quoted block in the file.
    static ref MODULE_DOCSTRING: Regex =
        Regex::new("(?s)\"\"\"(.+?)\"\"\"").unwrap();

    /// Exit-codes section in reST field form.
    static ref EXIT_CODES_FIELD: Regex =
        Regex::new(r"(?ms)^:Exit Codes:\s*\n+(.+?)(?:\n:|\z)").unwrap();

    /// Exit-codes section in underline form.
    static ref EXIT_CODES_UNDERLINE: Regex =
        Regex::new(r"(?ms)^Exit Codes\s*\n-+\n(.+?)(?:\n[A-Z]|\z)").unwrap();

    /// A documented parameter, PEP 287 style.
    static ref PARAM_FIELD: Regex = Regex::new(r":param\s+\w+:").unwrap();

    /// A documented return value (`:returns:`, `:return:`, or `:rtype:`).
    static ref RETURNS_FIELD: Regex = Regex::new(r":(returns?|rtype):").unwrap();
}

/// What kind of definition a symbol is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PySymbolKind {
    Function,
    Class,
}

/// One function or class pulled out of the AST.
#[derive(Debug)]
struct PySymbol {
    kind: PySymbolKind,
    name: String,
    /// 1-based line of the `def`/`class` keyword.
    line: usize,
    docstring: Option<String>,
    /// Parameter names excluding `self`/`cls`, including `*args`,
    /// `**kwargs`, and keyword-only names.
    params: Vec<String>,
    /// Whether a value-carrying `return` exists outside nested definitions.
    has_value_return: bool,
}

pub struct PythonValidator;

impl PythonValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PythonValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageValidator for PythonValidator {
    fn language(&self) -> Language {
        Language::Python
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn section_names(&self) -> &'static [&'static str] {
        &["Purpose", "Environment Variables", "Examples", "Exit Codes"]
    }

    fn validate_file_block(
        &self,
        path: &Path,
        content_text: &str,
        config: &ValidateConfig,
    ) -> Option<ValidationError> {
        if !content_text.contains(TRIPLE_QUOTE) {
            return Some(ValidationError::file_level(
                path,
                vec![r#"module docstring (""")"#],
                r#"Expected module-level docstring with """"#,
            ));
        }

        let docstring = match MODULE_DOCSTRING.captures(content_text) {
            Some(caps) => caps.get(1).map(|m| m.as_str()).unwrap_or(""),
            None => {
                return Some(ValidationError::file_level(
                    path,
                    vec!["module docstring"],
                    "Could not parse module docstring",
                ))
            }
        };

        let mut missing = Vec::new();
        for (pattern, name) in REQUIRED_SECTIONS.iter() {
            if pragma::is_exempted(content_text, name) {
                continue;
            }
            if !pattern.is_match(docstring) {
                missing.push(*name);
            }
        }

        // Content validation for the exit-codes section, when present.
        // An incomplete section replaces the missing-sections report.
        if !missing.contains(&"Exit Codes") {
            let section = EXIT_CODES_FIELD
                .captures(docstring)
                .or_else(|| EXIT_CODES_UNDERLINE.captures(docstring));
            if let Some(caps) = section {
                let section_text = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                if let Some(err) = content::validate_exit_codes_content(section_text, config) {
                    if !pragma::is_exempted(content_text, "EXITCODES") {
                        return Some(ValidationError::file_level(
                            path,
                            vec!["Exit Codes content"],
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
                "Expected reST-style sections in module docstring",
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
        // A file with syntax errors is skipped at symbol level; fixing the
        // parse failure comes first.
        let symbols = match collect_symbols(content_text) {
            Some(s) => s,
            None => return Vec::new(),
        };

        let lines: Vec<&str> = content_text.lines().collect();
        let mut errors = Vec::new();

        for symbol in symbols {
            match symbol.kind {
                PySymbolKind::Function => {
                    if pragma::is_function_exempted(&lines, symbol.line) {
                        continue;
                    }
                    match &symbol.docstring {
                        None => errors.push(ValidationError::symbol(
                            path,
                            vec!["function docstring"],
                            "Function must have a docstring",
                            format!("def {}()", symbol.name),
                            Some(symbol.line),
                        )),
                        Some(docstring) => {
                            let mut missing = Vec::new();
                            if !symbol.params.is_empty() && !PARAM_FIELD.is_match(docstring) {
                                missing.push(":param");
                            }
                            if symbol.has_value_return && !RETURNS_FIELD.is_match(docstring) {
                                missing.push(":returns");
                            }
                            if !missing.is_empty() {
                                let fields = missing.join(", ");
                                errors.push(ValidationError::symbol(
                                    path,
                                    missing,
                                    format!(
                                        "Function docstring must include {} field(s) per PEP 287 reST style",
                                        fields
                                    ),
                                    format!("def {}()", symbol.name),
                                    Some(symbol.line),
                                ));
                            }
                        }
                    }
                }
                PySymbolKind::Class => {
                    if pragma::is_class_exempted(&lines, symbol.line) {
                        continue;
                    }
                    if symbol.docstring.is_none() {
                        errors.push(ValidationError::symbol(
                            path,
                            vec!["class docstring"],
                            "Class must have docstring describing purpose and attributes",
                            format!("class {}", symbol.name),
                            Some(symbol.line),
                        ));
                    }
                }
            }
        }

        errors
    }
}

/// Extract all function and class symbols from the AST.
///
/// Returns `None` when the file fails to parse (or AST support is compiled
/// out), in which case symbol validation is skipped.
#[cfg(feature = "tree-sitter")]
fn collect_symbols(source: &str) -> Option<Vec<PySymbol>> {
    use streaming_iterator::StreamingIterator;
    use tree_sitter::{Language as TsLanguage, Parser, Query, QueryCursor};

    const DECLARATION_QUERY: &str = r#"
(function_definition
  name: (identifier) @func_name
) @function

(class_definition
  name: (identifier) @class_name
) @class
"#;

    let language: TsLanguage = tree_sitter_python::LANGUAGE.into();
    let mut parser = Parser::new();
    parser.set_language(&language).ok()?;

    let tree = parser.parse(source, None)?;
    if tree.root_node().has_error() {
        return None;
    }

    let query = Query::new(&language, DECLARATION_QUERY).ok()?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());

    let mut symbols = Vec::new();
    while let Some(m) = matches.next() {
        let mut name = String::new();
        let mut kind = PySymbolKind::Function;
        let mut decl_node = None;

        for capture in m.captures {
            let capture_name = query.capture_names()[capture.index as usize];
            match capture_name {
                "func_name" => {
                    name = node_text(capture.node, source).to_string();
                    kind = PySymbolKind::Function;
                }
                "class_name" => {
                    name = node_text(capture.node, source).to_string();
                    kind = PySymbolKind::Class;
                }
                "function" | "class" => {
                    decl_node = Some(capture.node);
                }
                _ => {}
            }
        }

        let node = match decl_node {
            Some(n) if !name.is_empty() => n,
            _ => continue,
        };

        let body = node.child_by_field_name("body");
        let docstring = body.and_then(|b| extract_docstring(b, source));

        let (params, has_value_return) = if kind == PySymbolKind::Function {
            let params = node
                .child_by_field_name("parameters")
                .map(|p| parameter_names(p, source))
                .unwrap_or_default();
            (params, contains_value_return(node))
        } else {
            (Vec::new(), false)
        };

        symbols.push(PySymbol {
            kind,
            name,
            line: node.start_position().row + 1,
            docstring,
            params,
            has_value_return,
        });
    }

    symbols.sort_by(|a, b| (a.line, a.name.as_str()).cmp(&(b.line, b.name.as_str())));
    Some(symbols)
}

#[cfg(not(feature = "tree-sitter"))]
fn collect_symbols(_source: &str) -> Option<Vec<PySymbol>> {
    None
}

#[cfg(feature = "tree-sitter")]
fn node_text<'a>(node: tree_sitter::Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// Docstring of a body block: the first statement, when it is a string.
#[cfg(feature = "tree-sitter")]
fn extract_docstring(body: tree_sitter::Node, source: &str) -> Option<String> {
    let first = body.named_child(0)?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let expr = first.named_child(0)?;
    if expr.kind() != "string" {
        return None;
    }
    Some(node_text(expr, source).to_string())
}

/// Parameter names for a `parameters` node, excluding `self`/`cls`.
#[cfg(feature = "tree-sitter")]
fn parameter_names(parameters: tree_sitter::Node, source: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = parameters.walk();

    for child in parameters.named_children(&mut cursor) {
        let name = match child.kind() {
            "identifier" => Some(node_text(child, source).to_string()),
            "default_parameter" | "typed_default_parameter" => child
                .child_by_field_name("name")
                .map(|n| node_text(n, source).to_string()),
            // *args / **kwargs, optionally typed
            "list_splat_pattern" | "dictionary_splat_pattern" => {
                first_identifier(child, source)
            }
            "typed_parameter" => first_identifier(child, source),
            // bare `*` and `/` separators carry no name
            _ => None,
        };
        if let Some(name) = name {
            if name != "self" && name != "cls" {
                names.push(name);
            }
        }
    }

    names
}

#[cfg(feature = "tree-sitter")]
fn first_identifier(node: tree_sitter::Node, source: &str) -> Option<String> {
    if node.kind() == "identifier" {
        return Some(node_text(node, source).to_string());
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if let Some(found) = first_identifier(child, source) {
            return Some(found);
        }
    }
    None
}

/// Whether a value-carrying `return` exists under `node`, excluding nested
/// function and class bodies: a return inside an inner function must not
/// impose `:returns:` on the outer one.
#[cfg(feature = "tree-sitter")]
fn contains_value_return(node: tree_sitter::Node) -> bool {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "function_definition" | "class_definition" | "decorated_definition" => continue,
            "return_statement" => {
                if child.named_child_count() > 0 {
                    return true;
                }
            }
            _ => {}
        }
        if contains_value_return(child) {
            return true;
        }
    }
    false
}
