//! Command-line interface for docgate.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ValidateConfig;
use crate::languages;
use crate::report;
use crate::validate::{self, Language};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Documentation contract gate - validate doc contracts across languages.
///
/// Docgate checks that every supported source file carries the
/// documentation sections its language contract requires, from module
/// docstrings and header comments down to per-function documentation.
#[derive(Parser)]
#[command(name = "docgate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate documentation contracts
    #[command(visible_alias = "validate")]
    Check(CheckArgs),
    /// List supported languages and their required sections
    Languages,
}

/// Arguments for the check command.
#[derive(Parser)]
pub struct CheckArgs {
    /// Path to scan for supported files (file or directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Validate specific files instead of scanning (repeatable)
    #[arg(short, long)]
    pub file: Vec<PathBuf>,

    /// Restrict validation to one language
    #[arg(short, long, default_value = "all")]
    pub language: String,

    /// Output format: pretty or json
    #[arg(short = 'F', long, default_value = "pretty")]
    pub format: String,

    /// Disable exit-code content heuristics
    #[arg(long)]
    pub no_content_checks: bool,
}

/// Collect supported files under a root directory.
fn collect_files(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            // Skip hidden directories
            if e.file_type().is_dir() && name.starts_with('.') && e.depth() > 0 {
                return false;
            }
            // Skip build output and vendored trees
            if e.file_type().is_dir()
                && (name == "vendor"
                    || name == "node_modules"
                    || name == "target"
                    || name == "__pycache__"
                    || name == "dist")
            {
                return false;
            }
            true
        })
    {
        let entry = entry?;
        if entry.file_type().is_file() && Language::from_path(entry.path()).is_some() {
            files.push(entry.path().to_path_buf());
        }
    }

    Ok(files)
}

/// Run the check command.
pub fn run_check(args: &CheckArgs) -> anyhow::Result<i32> {
    languages::register_validators();

    // Validate format
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    // Parse language filter
    let language = if args.language == "all" {
        None
    } else {
        match args.language.parse::<Language>() {
            Ok(l) => Some(l),
            Err(e) => {
                eprintln!("Error: {}", e);
                eprintln!(
                    "Supported languages: {}, all",
                    Language::all()
                        .iter()
                        .map(|l| l.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                return Ok(EXIT_ERROR);
            }
        }
    };

    // Collect files to validate
    let files = if !args.file.is_empty() {
        args.file.clone()
    } else {
        let metadata = match std::fs::metadata(&args.path) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("Error: cannot access path {:?}: {}", args.path, e);
                return Ok(EXIT_ERROR);
            }
        };
        if metadata.is_dir() {
            collect_files(&args.path)?
        } else {
            vec![args.path.clone()]
        }
    };

    if files.is_empty() {
        eprintln!("Warning: no files to validate");
        return Ok(EXIT_SUCCESS);
    }

    // Run validation
    let config = ValidateConfig::new().skip_content_checks(args.no_content_checks);
    let errors = validate::validate_files(&files, language, &config);

    // Output results
    let path_str = args.path.to_string_lossy().to_string();
    match args.format.as_str() {
        "json" => report::write_json(&path_str, files.len(), &errors)?,
        _ => report::write_pretty(&path_str, files.len(), &errors),
    }

    if errors.is_empty() {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}

/// Run the languages command.
pub fn run_languages() -> anyhow::Result<i32> {
    languages::register_validators();

    println!("Supported languages:");
    println!();

    for &language in Language::all() {
        let validator = languages::get_validator(language);
        let extensions = validator
            .file_extensions()
            .iter()
            .map(|e| format!(".{}", e))
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {:<12} {}", language.as_str(), extensions);
        println!("    required: {}", validator.section_names().join(", "));
    }

    println!();
    println!("Usage:");
    println!("  docgate check --language <name>");

    Ok(EXIT_SUCCESS)
}
