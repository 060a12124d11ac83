//! Implementation of the `varia check` command.

use std::path::PathBuf;

use miette::{IntoDiagnostic, Report};
use owo_colors::OwoColorize;
use serde::Serialize;
use varia::{lint_template, validate};

use super::read_file;
use crate::output::VariaDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Template files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat lint warnings as failures
    #[arg(long)]
    pub strict: bool,
}

/// JSON output for one checked file.
#[derive(Debug, Serialize)]
struct CheckJson {
    file: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    warnings: Vec<String>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let mut results = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let content = read_file(path, "template")?;
        let validation = validate(&content);
        let warnings = lint_template(&content);

        if !args.json {
            match &validation {
                Ok(()) if warnings.is_empty() => {
                    println!("{} {}", "ok".green(), path.display());
                }
                Ok(()) => {}
                Err(err) => {
                    let diagnostic = VariaDiagnostic::from_validation_error(path, &content, err);
                    eprintln!("{:?}", Report::new(diagnostic));
                }
            }
            for warning in &warnings {
                eprintln!("{}: {}: {warning}", "warning".yellow(), path.display());
            }
        }

        results.push(CheckJson {
            file: path.display().to_string(),
            valid: validation.is_ok(),
            error: validation.err().as_ref().map(ToString::to_string),
            warnings: warnings.iter().map(ToString::to_string).collect(),
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results).into_diagnostic()?);
    }

    let any_invalid = results.iter().any(|result| !result.valid);
    let any_warnings = results.iter().any(|result| !result.warnings.is_empty());
    if any_invalid || (args.strict && any_warnings) {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
