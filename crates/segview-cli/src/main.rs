mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "segview", about = "Click-prompted segmentation overlay tool")]
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
    /// Map a screen click to image pixels
    Map(commands::map::MapArgs),
    /// Decode a raw mask file and extract its geometry
    Extract(commands::extract::ExtractArgs),
    /// Project image-space geometry onto a widget or viewer
    Project(commands::project::ProjectArgs),
    /// Print or save the default session config
    Config(commands::config::ConfigArgs),
    /// Replay a scripted click session against precomputed masks
    Replay(commands::replay::ReplayArgs),
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
        Commands::Map(args) => commands::map::run(args),
        Commands::Extract(args) => commands::extract::run(args),
        Commands::Project(args) => commands::project::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Replay(args) => commands::replay::run(args),
    }
}
