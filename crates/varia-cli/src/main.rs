//! varia CLI entry point.
//!
//! Command-line tools for spintax templates:
//! - `varia check` - Validate template files and lint modifiers
//! - `varia spin` - Resolve a template
//! - `varia count` - Count possible spintax variations
//! - `varia generate` - Generate variations from a variable-set file

mod commands;
mod output;

use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    CheckArgs, CountArgs, GenerateArgs, SpinArgs, run_check, run_count, run_generate, run_spin,
};
use tracing_subscriber::EnvFilter;

/// Spintax template tools.
#[derive(Debug, Parser)]
#[command(name = "varia")]
#[command(about = "Spintax template tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate template files
    Check(CheckArgs),
    /// Resolve a template with optional variables and pool
    Spin(SpinArgs),
    /// Count the spintax variations of a template
    Count(CountArgs),
    /// Generate variations from a variable-set file
    Generate(GenerateArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors checks TTY, NO_COLOR and FORCE_COLOR itself
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Log to stderr. `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    init_tracing(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Check(args) => run_check(args),
        Commands::Spin(args) => run_spin(args),
        Commands::Count(args) => run_count(args),
        Commands::Generate(args) => run_generate(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{e:?}");
            exit(exitcode::SOFTWARE);
        }
    }
}
