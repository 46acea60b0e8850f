//! Integration tests for the full validation pipeline.
//!
//! These tests run the dispatcher and batch façade against the testdata
//! fixtures. Fixtures with external-parser symbol phases (Perl, PowerShell)
//! contain no symbols, so results do not depend on which interpreters are
//! installed on the test machine.

use std::path::PathBuf;

use docgate::{validate_file, validate_files, Language, ValidateConfig};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn documented(name: &str) -> PathBuf {
    testdata_path().join("documented").join(name)
}

fn violations(name: &str) -> PathBuf {
    testdata_path().join("violations").join(name)
}

fn setup() {
    docgate::init();
}

#[test]
fn test_documented_fixtures_produce_zero_violations() {
    setup();

    let files = vec![
        documented("tool.py"),
        documented("deploy.sh"),
        documented("mirror.pl"),
        documented("rotate.ps1"),
        documented("lib.rs"),
        documented("main.rs"),
        documented("workflow.yml"),
    ];

    let errors = validate_files(&files, None, &ValidateConfig::new());
    assert!(
        errors.is_empty(),
        "expected no violations, got: {:#?}",
        errors
    );
}

#[test]
fn test_python_missing_section_and_undocumented_symbol() {
    setup();

    let errors = validate_file(&violations("tool.py"), &ValidateConfig::new());
    assert_eq!(errors.len(), 2);

    // File-level violation always precedes symbol-level violations.
    assert_eq!(errors[0].missing_sections, vec!["Examples"]);
    assert!(errors[0].symbol_name.is_none());

    assert_eq!(errors[1].missing_sections, vec!["function docstring"]);
    assert_eq!(errors[1].symbol_name.as_deref(), Some("def render()"));
    assert!(errors[1].line_number.is_some());
}

#[test]
fn test_bash_missing_usage_section() {
    setup();

    let errors = validate_file(&violations("deploy.sh"), &ValidateConfig::new());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].missing_sections, vec!["USAGE:"]);
}

#[test]
fn test_bash_undocumented_function_found() {
    setup();

    let errors = validate_file(&violations("functions.sh"), &ValidateConfig::new());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].missing_sections, vec!["function documentation"]);
    assert_eq!(errors[0].symbol_name.as_deref(), Some("prune_workspaces()"));
    assert!(errors[0].line_number.is_some());
}

#[test]
fn test_perl_missing_synopsis() {
    setup();

    let errors = validate_file(&violations("mirror.pl"), &ValidateConfig::new());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].missing_sections, vec!["=head1 SYNOPSIS"]);
}

#[test]
fn test_powershell_missing_notes() {
    setup();

    let errors = validate_file(&violations("rotate.ps1"), &ValidateConfig::new());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].missing_sections, vec![".NOTES"]);
}

#[test]
fn test_main_rs_requires_exit_section_but_lib_rs_does_not() {
    setup();

    let errors = validate_file(&violations("main.rs"), &ValidateConfig::new());
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].missing_sections,
        vec!["# Exit Behavior or # Exit Codes"]
    );

    // The same contract without the exit rule passes for lib.rs.
    assert!(validate_file(&documented("lib.rs"), &ValidateConfig::new()).is_empty());
}

#[test]
fn test_yaml_bare_file_reports_all_sections() {
    setup();

    let errors = validate_file(&violations("workflow.yml"), &ValidateConfig::new());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].missing_sections.len(), 6);
    assert_eq!(errors[0].missing_sections[0], "Workflow: or File:");
}

#[test]
fn test_language_filter_restricts_batch() {
    setup();

    let files = vec![violations("tool.py"), violations("deploy.sh")];
    let errors = validate_files(&files, Some(Language::Python), &ValidateConfig::new());

    assert!(!errors.is_empty());
    assert!(errors.iter().all(|e| e.file_path.ends_with("tool.py")));
}

#[test]
fn test_batch_returns_violations_in_input_order() {
    setup();

    let files = vec![
        violations("workflow.yml"),
        violations("main.rs"),
        violations("deploy.sh"),
    ];
    let errors = validate_files(&files, None, &ValidateConfig::new());

    assert_eq!(errors.len(), 3);
    assert!(errors[0].file_path.ends_with("workflow.yml"));
    assert!(errors[1].file_path.ends_with("main.rs"));
    assert!(errors[2].file_path.ends_with("deploy.sh"));
}

#[test]
fn test_unknown_extension_is_skipped() {
    setup();

    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("README.txt");
    std::fs::write(&path, "no contract applies here").unwrap();

    assert!(validate_file(&path, &ValidateConfig::new()).is_empty());
}

#[test]
fn test_missing_file_reports_read_error() {
    setup();

    let errors = validate_file(
        &testdata_path().join("does-not-exist.py"),
        &ValidateConfig::new(),
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].missing_sections, vec!["read error"]);
}

#[test]
fn test_no_content_checks_flag_passes_sparse_exit_docs() {
    setup();

    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("sparse.sh");
    std::fs::write(
        &path,
        "#!/usr/bin/env bash\n\
         # DESCRIPTION: Prints a banner.\n\
         # USAGE: banner.sh\n\
         # INPUTS: none\n\
         # OUTPUTS:\n\
         #   see the service runbook\n\
         # EXAMPLES:\n\
         #   banner.sh\n\
         echo banner\n",
    )
    .unwrap();

    let strict = validate_file(&path, &ValidateConfig::new());
    assert_eq!(strict.len(), 1);
    assert_eq!(strict[0].missing_sections, vec!["OUTPUTS content"]);

    let relaxed = validate_file(&path, &ValidateConfig::new().skip_content_checks(true));
    assert!(relaxed.is_empty());
}
