//! Implementation of the `varia spin` command.

use std::path::PathBuf;

use miette::IntoDiagnostic;
use serde::Serialize;
use tracing::warn;
use varia::{Engine, spin_variations, validate};

use super::{TemplateSource, chooser, load_pool, parse_key_val, replacements_from};

/// Arguments for the spin command.
#[derive(Debug, clap::Args)]
pub struct SpinArgs {
    #[command(flatten)]
    pub source: TemplateSource,

    /// Pool file (JSON object of lists and service maps)
    #[arg(long)]
    pub pool: Option<PathBuf>,

    /// Variables in name=value format (repeatable)
    #[arg(short = 'v', long = "var", value_parser = parse_key_val)]
    pub vars: Vec<(String, String)>,

    /// Seed for reproducible output
    #[arg(long, env = "VARIA_SEED")]
    pub seed: Option<u64>,

    /// Number of results
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Resolve spintax only and print up to COUNT distinct results
    #[arg(long, conflicts_with_all = ["pool", "vars"])]
    pub distinct: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for spin results.
#[derive(Serialize)]
pub struct SpinResult {
    pub results: Vec<String>,
}

/// Run the spin command.
pub fn run_spin(args: SpinArgs) -> miette::Result<i32> {
    let template = args.source.load()?;
    if let Err(err) = validate(&template) {
        warn!(%err, "template is not well-formed spintax");
    }

    let mut chooser = chooser(args.seed);
    let results = if args.distinct {
        spin_variations(&template, args.count, &mut chooser)
    } else {
        let engine = Engine::builder()
            .pool(load_pool(args.pool.as_deref())?)
            .build();
        let replacements = replacements_from(args.vars);
        (0..args.count)
            .map(|_| engine.process(&template, &replacements, &mut chooser))
            .collect()
    };

    if args.json {
        let output = SpinResult { results };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        for result in &results {
            println!("{result}");
        }
    }
    Ok(exitcode::OK)
}
