//! Implementation of the `varia count` command.

use miette::IntoDiagnostic;
use serde_json::json;
use varia::{count_possible_variations, validate};

use super::TemplateSource;

/// Arguments for the count command.
#[derive(Debug, clap::Args)]
pub struct CountArgs {
    #[command(flatten)]
    pub source: TemplateSource,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the count command.
pub fn run_count(args: CountArgs) -> miette::Result<i32> {
    let template = args.source.load()?;
    let variations = count_possible_variations(&template);
    let valid = validate(&template).is_ok();

    if args.json {
        let output = json!({ "variations": variations, "valid": valid });
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        println!("{variations}");
    }
    Ok(exitcode::OK)
}
