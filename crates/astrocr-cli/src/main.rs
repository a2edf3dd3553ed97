//! CLI application for numerology and astrology table OCR.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{check, config, run, validate, GlobalOpts};

/// Astrology/numerology OCR - Extract reference tables from scanned images
#[derive(Parser)]
#[command(name = "astrocr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Project root holding inputs/, tmp/, data/ and docs/
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every image in the input directory (default)
    Run(run::RunArgs),

    /// Check that the configured OCR engine is available
    Check,

    /// Validate the data files of the last run
    Validate,

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let opts = GlobalOpts {
        config: cli.config,
        root: cli.root,
    };

    match cli.command.unwrap_or_else(|| Commands::Run(run::RunArgs::default())) {
        Commands::Run(args) => run::run(args, &opts),
        Commands::Check => check::run(&opts),
        Commands::Validate => validate::run(&opts),
        Commands::Config(args) => config::run(args, &opts),
    }
}
