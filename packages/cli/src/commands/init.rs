use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Data directory for saved pages and pipeline order
    #[arg(short, long, default_value = ".funnelcraft")]
    pub data_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing Funnelcraft workspace...".bright_blue().bold()
    );

    let config = Config {
        data_dir: args.data_dir.clone(),
        ..Config::default()
    };

    // Create data directory if it doesn't exist
    let pages_dir = config.get_data_dir(cwd).join("pages");
    if !pages_dir.exists() {
        fs::create_dir_all(&pages_dir)?;
        println!("  {} Created {}/pages/", "✓".green(), args.data_dir);
    }

    config.save(cwd)?;
    tracing::debug!(path = %config_path.display(), "config written");

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Workspace initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: funnelcraft replay <page.json> <actions.json> --save <page-id>");
    println!("  2. Run: funnelcraft inspect {}/pages/<page-id>.json", args.data_dir);

    Ok(())
}
