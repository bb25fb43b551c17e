//! Coursemap CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "coursemap")]
#[command(about = "Merge two curriculum dependency graphs with cross-course annotations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory that relative input and output paths are resolved against
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Config file (defaults to coursemap.toml under the root, if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the annotation directory
    #[arg(short, long)]
    annotations: Option<PathBuf>,

    /// Override the output file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge the courses and write the combined graph
    Build,
    /// Merge the courses and report, without writing anything
    Check,
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "coursemap={0},coursemap_core={0},coursemap_ingest={0}",
            log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let overrides = commands::Overrides {
        config: cli.config,
        annotations: cli.annotations,
        output: cli.output,
    };

    match cli.command {
        Commands::Build => commands::build(&cli.root, &overrides),
        Commands::Check => commands::check(&cli.root, &overrides),
        Commands::Version => {
            println!("coursemap v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
