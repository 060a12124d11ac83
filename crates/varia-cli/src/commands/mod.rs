//! CLI command implementations.

mod check;
mod count;
mod generate;
mod spin;

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use miette::miette;
use varia::{NamedValuePool, RandomChooser, Replacements};

pub use check::{CheckArgs, run_check};
pub use count::{CountArgs, run_count};
pub use generate::{GenerateArgs, run_generate};
pub use spin::{SpinArgs, run_spin};

/// A template given inline or as a file.
#[derive(Debug, clap::Args)]
pub struct TemplateSource {
    /// Template text
    #[arg(required_unless_present = "file")]
    pub template: Option<String>,

    /// Read the template from a file instead
    #[arg(short, long, conflicts_with = "template")]
    pub file: Option<PathBuf>,
}

impl TemplateSource {
    /// The template text.
    pub fn load(&self) -> miette::Result<String> {
        match (&self.template, &self.file) {
            (Some(template), _) => Ok(template.clone()),
            (None, Some(path)) => read_file(path, "template"),
            (None, None) => Err(miette!("no template given")),
        }
    }
}

/// Read a file, naming `what` in the error.
pub fn read_file(path: &Path, what: &str) -> miette::Result<String> {
    read_to_string(path).map_err(|e| miette!("Cannot read {what} file {}: {e}", path.display()))
}

/// Load a pool file, or an empty pool.
pub fn load_pool(path: Option<&Path>) -> miette::Result<NamedValuePool> {
    match path {
        Some(path) => NamedValuePool::load(path).map_err(|e| miette!("{e}")),
        None => Ok(NamedValuePool::new()),
    }
}

/// A seeded chooser when `seed` is given, otherwise one seeded from entropy.
pub fn chooser(seed: Option<u64>) -> RandomChooser {
    seed.map_or_else(RandomChooser::from_entropy, RandomChooser::seeded)
}

/// Collect `name=value` pairs; later pairs win.
pub fn replacements_from(pairs: Vec<(String, String)>) -> Replacements {
    pairs.into_iter().collect()
}

/// Parse a name=value argument.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid variable format '{s}': expected name=value"))?;
    Ok((name.to_string(), value.to_string()))
}
