mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sima", about = "Split plate-reader stacks and build image indexes")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show stack layout and acquisition metadata
    Info(commands::info::InfoArgs),
    /// Split multiplexed stacks into single frames and index them
    Split(commands::split::SplitArgs),
    /// Index frames that were already split
    Index(commands::index::IndexArgs),
    /// List the channel presets
    Presets(commands::presets::PresetsArgs),
    /// Print or save a default batch config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Split(args) => commands::split::run(args),
        Commands::Index(args) => commands::index::run(args),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
