//! VideoShop CLI - terminal storefront for video lessons.
//!
//! Commands:
//! - `videoshop shop` - Browse, fill the cart and check out (default)
//! - `videoshop catalog` - Print the lesson catalog
//! - `videoshop config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CatalogArgs, ConfigArgs, ShopArgs};

/// VideoShop CLI - buy video lessons from the terminal
#[derive(Parser)]
#[command(name = "videoshop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive storefront
    Shop(ShopArgs),

    /// Print the lesson catalog
    Catalog(CatalogArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    logging::init_logging(&ctx.config.logging, cli.verbose);

    // Execute command
    let command = cli.command.unwrap_or(Commands::Shop(ShopArgs::default()));
    let result = match command {
        Commands::Shop(args) => commands::shop::run(args, &ctx).await,
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
