//! Bounded-duration subprocess bridges to external symbol parsers.
//!
//! Each bridge invokes an interpreter on an embedded helper script and
//! decodes the JSON symbol report from stdout. Invocations are hard-limited
//! to [`PARSER_TIMEOUT_SECS`]; there is no retry.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use super::{ParserFailure, ParserOutcome, SymbolSource};

/// Hard timeout for external parser invocations.
pub const PARSER_TIMEOUT_SECS: u64 = 10;

/// Embedded Perl/PPI helper script.
const PERL_HELPER: &str = include_str!("helpers/parse_perl_pod.pl");
const PERL_HELPER_NAME: &str = "parse_perl_pod.pl";

/// Embedded PowerShell AST helper script.
const POWERSHELL_HELPER: &str = include_str!("helpers/parse_powershell_ast.ps1");
const POWERSHELL_HELPER_NAME: &str = "parse_powershell_ast.ps1";

/// stderr marker meaning the PPI module is not installed.
const PPI_MISSING_MARKER: &str = "Can't locate PPI";

/// Run an external symbol parser and classify the outcome.
///
/// A spawn failure (interpreter not on PATH) is capability-absent, not a
/// parser error. A non-zero exit whose stderr contains
/// `missing_module_marker` is likewise capability-absent; any other
/// non-zero exit, a timeout, or undecodable stdout is a failure.
pub fn run_symbol_parser(
    program: &str,
    args: &[OsString],
    missing_module_marker: &str,
) -> ParserOutcome {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => return ParserOutcome::Failed(ParserFailure::Exit(e.to_string())),
    };

    runtime.block_on(async {
        let child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(c) => c,
            // Interpreter not installed: downgrade to file-level-only.
            Err(_) => return ParserOutcome::Unavailable,
        };

        let output = match tokio::time::timeout(
            Duration::from_secs(PARSER_TIMEOUT_SECS),
            child.wait_with_output(),
        )
        .await
        {
            Err(_) => return ParserOutcome::Failed(ParserFailure::Timeout(PARSER_TIMEOUT_SECS)),
            Ok(Err(e)) => return ParserOutcome::Failed(ParserFailure::Exit(e.to_string())),
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !missing_module_marker.is_empty() && stderr.contains(missing_module_marker) {
                return ParserOutcome::Unavailable;
            }
            return ParserOutcome::Failed(ParserFailure::Exit(stderr.trim().to_string()));
        }

        match serde_json::from_slice(&output.stdout) {
            Ok(parsed) => ParserOutcome::Available(parsed),
            Err(e) => ParserOutcome::Failed(ParserFailure::Malformed(e.to_string())),
        }
    })
}

/// Write an embedded helper script into a per-version temp directory.
///
/// Concurrent writers race harmlessly: the content is identical.
fn materialize_helper(name: &str, contents: &str) -> std::io::Result<PathBuf> {
    let dir = std::env::temp_dir().join(format!("docgate-helpers-{}", env!("CARGO_PKG_VERSION")));
    fs::create_dir_all(&dir)?;
    let path = dir.join(name);
    if !path.exists() {
        fs::write(&path, contents)?;
    }
    Ok(path)
}

/// Perl symbol source backed by the PPI helper script.
pub struct PerlPpiSource;

impl SymbolSource for PerlPpiSource {
    fn extract(&self, path: &Path, _content: &str) -> ParserOutcome {
        let helper = match materialize_helper(PERL_HELPER_NAME, PERL_HELPER) {
            Ok(p) => p,
            Err(e) => return ParserOutcome::Failed(ParserFailure::Exit(e.to_string())),
        };
        let args = vec![helper.into_os_string(), path.as_os_str().to_os_string()];
        run_symbol_parser("perl", &args, PPI_MISSING_MARKER)
    }
}

/// PowerShell symbol source backed by the native AST helper script.
pub struct PowershellAstSource;

impl SymbolSource for PowershellAstSource {
    fn extract(&self, path: &Path, _content: &str) -> ParserOutcome {
        let helper = match materialize_helper(POWERSHELL_HELPER_NAME, POWERSHELL_HELPER) {
            Ok(p) => p,
            Err(e) => return ParserOutcome::Failed(ParserFailure::Exit(e.to_string())),
        };
        let args = vec![
            OsString::from("-NoProfile"),
            OsString::from("-NonInteractive"),
            OsString::from("-File"),
            helper.into_os_string(),
            OsString::from("-FilePath"),
            path.as_os_str().to_os_string(),
        ];
        run_symbol_parser("pwsh", &args, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_successful_parse_decodes_json() {
        let args = vec![
            OsString::from("-c"),
            OsString::from(r#"echo '{"errors": [], "functions": [{"name": "f", "line": 3, "has_doc_comment": true}]}'"#),
        ];
        match run_symbol_parser("sh", &args, "") {
            ParserOutcome::Available(output) => {
                assert_eq!(output.functions.len(), 1);
                assert_eq!(output.functions[0].line, 3);
            }
            _ => panic!("expected Available"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_failure() {
        let args = vec![
            OsString::from("-c"),
            OsString::from("echo boom >&2; exit 3"),
        ];
        match run_symbol_parser("sh", &args, "") {
            ParserOutcome::Failed(ParserFailure::Exit(msg)) => assert!(msg.contains("boom")),
            _ => panic!("expected Failed(Exit)"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_module_marker_means_unavailable() {
        let args = vec![
            OsString::from("-c"),
            OsString::from("echo \"Can't locate PPI in @INC\" >&2; exit 2"),
        ];
        match run_symbol_parser("sh", &args, PPI_MISSING_MARKER) {
            ParserOutcome::Unavailable => {}
            _ => panic!("expected Unavailable"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_malformed_stdout_is_failure() {
        let args = vec![OsString::from("-c"), OsString::from("echo not-json")];
        match run_symbol_parser("sh", &args, "") {
            ParserOutcome::Failed(ParserFailure::Malformed(_)) => {}
            _ => panic!("expected Failed(Malformed)"),
        }
    }

    #[test]
    fn test_missing_interpreter_is_unavailable() {
        match run_symbol_parser("docgate-no-such-interpreter", &[], "") {
            ParserOutcome::Unavailable => {}
            _ => panic!("expected Unavailable"),
        }
    }

    #[test]
    fn test_helper_materializes_once() {
        let first = materialize_helper(PERL_HELPER_NAME, PERL_HELPER).unwrap();
        let second = materialize_helper(PERL_HELPER_NAME, PERL_HELPER).unwrap();
        assert_eq!(first, second);
        let written = fs::read_to_string(&first).unwrap();
        assert!(written.contains("PPI::Statement::Sub"));
    }
}
