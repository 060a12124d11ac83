//! Implementation of the `varia generate` command.

use std::path::PathBuf;

use miette::{IntoDiagnostic, miette};
use tracing::{info, warn};
use varia::{Engine, VariableSets, validate};

use super::{TemplateSource, chooser, load_pool, read_file};
use crate::output::table::format_variations_table;

/// Arguments for the generate command.
#[derive(Debug, clap::Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: TemplateSource,

    /// Variable-set file: a JSON object of name to a value or list of values
    #[arg(long)]
    pub sets: PathBuf,

    /// Pool file (JSON object of lists and service maps)
    #[arg(long)]
    pub pool: Option<PathBuf>,

    /// Number of variations
    #[arg(short = 'n', long, default_value_t = 5)]
    pub count: usize,

    /// Seed for reproducible output
    #[arg(long, env = "VARIA_SEED")]
    pub seed: Option<u64>,

    /// Leave spintax groups unresolved
    #[arg(long)]
    pub no_spintax: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the generate command.
pub fn run_generate(args: GenerateArgs) -> miette::Result<i32> {
    let template = args.source.load()?;
    if let Err(err) = validate(&template) {
        warn!(%err, "template is not well-formed spintax");
    }

    let sets_content = read_file(&args.sets, "variable-set")?;
    let sets: VariableSets = serde_json::from_str(&sets_content)
        .map_err(|e| miette!("Invalid variable-set file {}: {e}", args.sets.display()))?;

    let engine = Engine::builder()
        .pool(load_pool(args.pool.as_deref())?)
        .spintax(!args.no_spintax)
        .build();
    let variations =
        engine.generate_variations(&template, &sets, args.count, &mut chooser(args.seed));
    info!(count = variations.len(), "generated variations");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&variations).into_diagnostic()?);
    } else {
        println!("{}", format_variations_table(&variations));
    }
    Ok(exitcode::OK)
}
