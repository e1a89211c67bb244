//! Storefront configuration file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use videoshop_commerce::catalog::{Catalog, CatalogItem};
use videoshop_commerce::profile::PurchaseHistory;
use videoshop_commerce::support::SupportInfo;
use videoshop_commerce::Currency;
use videoshop_intake::TimeoutConfig;

/// File names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["videoshop.toml", ".videoshop.toml", "videoshop.json"];

/// Contents of `videoshop.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Shop presentation settings.
    #[serde(default)]
    pub shop: ShopSection,

    /// Order-intake endpoint.
    #[serde(default)]
    pub intake: IntakeConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Catalog entries; the built-in catalog is used when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub catalog: Vec<CatalogItem>,

    /// Purchase history shown on the profile tab.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<CatalogItem>,

    /// Support tab content; defaults apply when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<SupportInfo>,
}

impl ShopConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// The catalog to sell from.
    pub fn build_catalog(&self) -> Result<Catalog> {
        if self.catalog.is_empty() {
            return Ok(Catalog::builtin());
        }
        Catalog::new(self.catalog.clone()).context("Invalid [[catalog]] entries")
    }

    pub fn build_history(&self) -> PurchaseHistory {
        PurchaseHistory::new(self.history.clone())
    }

    pub fn build_support(&self) -> SupportInfo {
        self.support.clone().unwrap_or_default()
    }

    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.shop.currency)
            .with_context(|| format!("Unsupported currency: {}", self.shop.currency))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Shop presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopSection {
    /// Name shown in the header.
    #[serde(default = "default_shop_name")]
    pub name: String,

    /// Tagline shown under the name.
    #[serde(default = "default_tagline")]
    pub tagline: String,

    /// ISO currency code for prices.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_shop_name() -> String {
    "VideoShop".to_string()
}

fn default_tagline() -> String {
    "Video lessons for creators".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for ShopSection {
    fn default() -> Self {
        Self {
            name: default_shop_name(),
            tagline: default_tagline(),
            currency: default_currency(),
        }
    }
}

/// Order-intake endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// URL orders are POSTed to.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Connection timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Total request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

fn default_timeout_ms() -> u64 {
    15_000
}

impl IntakeConfig {
    pub fn timeouts(&self) -> TimeoutConfig {
        TimeoutConfig::from_millis(self.connect_timeout_ms, self.timeout_ms)
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            connect_timeout_ms: default_connect_timeout_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// Log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Generate a default videoshop.toml config file.
pub fn generate_default_config(name: &str) -> String {
    format!(
        r#"# VideoShop storefront configuration

[shop]
name = "{name}"
tagline = "Video lessons for creators"
currency = "USD"

[intake]
# endpoint = "https://functions.example.com/send-order"
connect_timeout_ms = 5000
timeout_ms = 15000

[logging]
level = "warn"
format = "compact"

# Leave out [[catalog]] to sell the built-in lessons.
# [[catalog]]
# id = 1
# title = "Video Editing Basics"
# price = 1299
# duration = "2:30:00"
# category = "Tutorial"
# thumbnail = "https://cdn.example.com/editing-basics.jpg"

[[history]]
id = 101
title = "Composition Basics"
price = 1199
duration = "1:30:00"
category = "Tutorial"
thumbnail = "https://cdn.videoshop.example/thumbnails/composition-basics.jpg"
"#,
        name = name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: ShopConfig = toml::from_str(&generate_default_config("My Shop")).unwrap();
        assert_eq!(config.shop.name, "My Shop");
        assert_eq!(config.currency().unwrap(), Currency::USD);
        assert!(config.intake.endpoint.is_none());
        assert_eq!(config.intake.timeouts(), TimeoutConfig::default());
        assert_eq!(config.build_catalog().unwrap(), Catalog::builtin());
        assert_eq!(config.build_history().count(), 1);
        assert_eq!(config.build_history().total_spent(), 1199);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: ShopConfig = toml::from_str("").unwrap();
        assert_eq!(config.shop.name, "VideoShop");
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.build_support(), SupportInfo::default());
    }

    #[test]
    fn test_custom_catalog() {
        let config: ShopConfig = toml::from_str(
            r#"
            [[catalog]]
            id = 9
            title = "Drone Footage"
            price = 2999
            duration = "1:10:00"
            category = "Masterclass"
            thumbnail = "https://cdn.example.com/drone.jpg"
            "#,
        )
        .unwrap();
        let catalog = config.build_catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.items()[0].unit_price, 2999);
    }

    #[test]
    fn test_duplicate_catalog_ids_rejected() {
        let config: ShopConfig = toml::from_str(
            r#"
            [[catalog]]
            id = 1
            title = "A"
            price = 100
            duration = ""
            category = ""
            thumbnail = ""

            [[catalog]]
            id = 1
            title = "B"
            price = 200
            duration = ""
            category = ""
            thumbnail = ""
            "#,
        )
        .unwrap();
        assert!(config.build_catalog().is_err());
    }

    #[test]
    fn test_unknown_currency() {
        let mut config = ShopConfig::default();
        config.shop.currency = "XYZ".to_string();
        assert!(config.currency().is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("videoshop.toml");

        let mut config = ShopConfig::default();
        config.intake.endpoint = Some("https://orders.example/send".to_string());
        config.intake.timeout_ms = 2_000;
        config.save(&path).unwrap();

        let loaded = ShopConfig::load(&path).unwrap();
        assert_eq!(loaded.intake.endpoint.as_deref(), Some("https://orders.example/send"));
        assert_eq!(loaded.intake.timeout_ms, 2_000);
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("videoshop.json");
        std::fs::write(&path, r#"{"shop": {"currency": "EUR"}}"#).unwrap();

        let config = ShopConfig::load(&path).unwrap();
        assert_eq!(config.currency().unwrap(), Currency::EUR);
        assert_eq!(config.shop.name, "VideoShop");
    }
}
