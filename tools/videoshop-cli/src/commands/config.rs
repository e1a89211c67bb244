//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use tracing::Level;
use videoshop_intake::HttpOrderIntake;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, ShopConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;

    ctx.output.info("[shop]");
    ctx.output.kv("name", &config.shop.name);
    ctx.output.kv("tagline", &config.shop.tagline);
    ctx.output.kv("currency", &config.shop.currency);

    ctx.output.info("[intake]");
    ctx.output
        .kv("endpoint", config.intake.endpoint.as_deref().unwrap_or("(not set)"));
    ctx.output
        .kv("connect_timeout_ms", &config.intake.connect_timeout_ms.to_string());
    ctx.output.kv("timeout_ms", &config.intake.timeout_ms.to_string());

    ctx.output.info("[logging]");
    ctx.output.kv("level", &config.logging.level);
    ctx.output.kv("format", &format!("{:?}", config.logging.format).to_lowercase());

    if config.catalog.is_empty() {
        ctx.output.info("Catalog: built-in lessons");
    } else {
        ctx.output.info(&format!("Catalog: {} lessons", config.catalog.len()));
        for item in &config.catalog {
            ctx.output.list_item(&format!("{} {}", item.id, item.title));
        }
    }

    if !config.history.is_empty() {
        ctx.output.info(&format!("History: {} purchases", config.history.len()));
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("videoshop.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let content = generate_default_config(&ctx.config.shop.name);
    fs::write(&config_path, content)?;

    ctx.output.success(&format!("Created: {}", config_path.display()));
    ctx.output.info("Set [intake] endpoint before opening the shop.");

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(&ctx.config);

    for warning in &warnings {
        ctx.output.warn(warning);
    }
    for error in &errors {
        ctx.output.error(error);
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid");
    Ok(())
}

/// Collect configuration errors and warnings.
fn check_config(config: &ShopConfig) -> (Vec<String>, Vec<String>) {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if config.shop.name.trim().is_empty() {
        errors.push("shop.name is required".to_string());
    }

    if let Err(e) = config.currency() {
        errors.push(format!("shop.currency: {e}"));
    }

    match config.intake.endpoint.as_deref() {
        None => warnings.push("intake.endpoint is not set; checkout is unavailable".to_string()),
        Some(endpoint) => {
            if let Err(e) = HttpOrderIntake::new(endpoint, config.intake.timeouts()) {
                errors.push(format!("intake.endpoint: {e}"));
            }
        }
    }

    if config.intake.timeout_ms == 0 {
        errors.push("intake.timeout_ms must be greater than 0".to_string());
    }
    if config.intake.connect_timeout_ms == 0 {
        errors.push("intake.connect_timeout_ms must be greater than 0".to_string());
    }
    if config.intake.connect_timeout_ms > config.intake.timeout_ms {
        warnings.push("intake.connect_timeout_ms exceeds intake.timeout_ms".to_string());
    }

    if config.logging.level.parse::<Level>().is_err() {
        errors.push(format!("logging.level '{}' is not a log level", config.logging.level));
    }

    if let Err(e) = config.build_catalog() {
        errors.push(format!("{e:#}"));
    }

    if config.history.iter().any(|item| item.title.trim().is_empty()) {
        warnings.push("history contains entries without a title".to_string());
    }

    (errors, warnings)
}
