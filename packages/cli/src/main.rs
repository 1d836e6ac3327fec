mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{init, inspect, reorder, replay, InitArgs, InspectArgs, ReorderArgs, ReplayArgs};
use config::Config;
use tracing::Level;

/// Funnelcraft CLI - page editor and pipeline board tooling
#[derive(Parser, Debug)]
#[command(name = "funnelcraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Funnelcraft workspace
    Init(InitArgs),

    /// Validate a page tree and print its outline
    Inspect(InspectArgs),

    /// Replay an action log against a page tree
    Replay(ReplayArgs),

    /// Apply a drag to a pipeline board
    Reorder(ReorderArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = Config::load(&cwd)?;
    init_tracing(cli.verbose, &config);

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Inspect(args) => inspect(args, &cwd),
        Command::Replay(args) => replay(args, &cwd, &config).await,
        Command::Reorder(args) => reorder(args, &cwd, &config).await,
    }
}

fn init_tracing(verbose: u8, config: &Config) {
    let level = match verbose {
        0 => config.log_level.parse().unwrap_or(Level::INFO),
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
