//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod shop;

use clap::{Args, Subcommand};

/// Arguments for the shop command.
#[derive(Args, Default)]
pub struct ShopArgs {
    /// Order endpoint (overrides `intake.endpoint`).
    #[arg(short, long)]
    pub endpoint: Option<String>,
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Only list lessons in this category.
    #[arg(short = 'C', long)]
    pub category: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the current configuration.
    Show,
    /// Write a default videoshop.toml.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
    /// Check the configuration for errors.
    Validate,
}
