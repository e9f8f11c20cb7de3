//! # Configuration
//!
//! Shopdeck configuration is managed by [`confique`], which handles layered
//! loading from environment variables, a TOML file, and compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `SHOPDECK_DATA_DIR`, `SHOPDECK_THEME`.
//! 2. **Config file**: `shopdeck.toml` in the OS config directory (via the
//!    `directories` crate), or the path passed to [`load`].
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! A missing config file is not an error.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data dir | Where the JSON lists live |
//! | `theme` | detected | `light` or `dark` |
//! | `locale` | `en` | Storefront language tag |
//! | `decimals` | `2` | Rounding for displayed metrics |
//! | `aggregate_scope` | `full` | `full` or `filtered` |

use std::path::{Path, PathBuf};

use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregateScope;
use crate::error::{Result, ShopdeckError};
use crate::locale::Locale;
use crate::theme::Theme;

pub const CONFIG_FILE: &str = "shopdeck.toml";

/// Configuration for shopdeck, stored in `shopdeck.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ShopdeckConfig {
    /// Directory holding one JSON file per entity kind.
    #[config(env = "SHOPDECK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// "light" or "dark". When absent the terminal's theme is detected.
    #[config(env = "SHOPDECK_THEME")]
    pub theme: Option<String>,

    /// Storefront language tag (e.g. "en", "es-MX").
    #[config(default = "en")]
    pub locale: String,

    /// Decimal places shown for metrics.
    #[config(default = 2)]
    pub decimals: u8,

    /// Whether stat cards reduce over the "full" list or the "filtered" rows.
    #[config(default = "full")]
    pub aggregate_scope: String,
}

impl Default for ShopdeckConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            theme: None,
            locale: "en".to_string(),
            decimals: 2,
            aggregate_scope: "full".to_string(),
        }
    }
}

impl ShopdeckConfig {
    /// The configured theme, or `None` to detect one.
    pub fn theme(&self) -> Result<Option<Theme>> {
        self.theme.as_deref().map(str::parse).transpose()
    }

    pub fn locale(&self) -> Locale {
        Locale::from_tag(&self.locale)
    }

    pub fn aggregate_scope(&self) -> Result<AggregateScope> {
        self.aggregate_scope.parse()
    }

    /// The configured data directory, or the OS default.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(project_dirs()?.data_dir().to_path_buf()),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "shopdeck", "shopdeck")
        .ok_or_else(|| ShopdeckError::Config("could not determine home directory".into()))
}

/// Default location of `shopdeck.toml`.
pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
}

/// Loads configuration from the environment, then `path`, then defaults.
pub fn load(path: &Path) -> Result<ShopdeckConfig> {
    let config = ShopdeckConfig::builder()
        .env()
        .file(path)
        .load()
        .map_err(|e| ShopdeckError::Config(e.to_string()))?;
    tracing::debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}

/// A commented sample `shopdeck.toml`.
pub fn template() -> String {
    confique::toml::template::<ShopdeckConfig>(confique::toml::FormatOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn default_config() {
        let config = ShopdeckConfig::default();
        assert_eq!(config.locale(), Locale::En);
        assert_eq!(config.decimals, 2);
        assert_eq!(config.aggregate_scope().unwrap(), AggregateScope::Full);
        assert_eq!(config.theme().unwrap(), None);
    }

    #[test]
    fn typed_accessors() {
        let config = ShopdeckConfig {
            theme: Some("dark".into()),
            locale: "es-MX".into(),
            aggregate_scope: "filtered".into(),
            data_dir: Some(PathBuf::from("/tmp/shop")),
            ..Default::default()
        };
        assert_eq!(config.theme().unwrap(), Some(Theme::Dark));
        assert_eq!(config.locale(), Locale::Es);
        assert_eq!(config.aggregate_scope().unwrap(), AggregateScope::Filtered);
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/shop"));
    }

    #[test]
    fn bad_values_are_config_errors() {
        let config = ShopdeckConfig {
            theme: Some("sepia".into()),
            aggregate_scope: "some".into(),
            ..Default::default()
        };
        assert!(matches!(config.theme(), Err(ShopdeckError::Config(_))));
        assert!(matches!(
            config.aggregate_scope(),
            Err(ShopdeckError::Config(_))
        ));
    }

    #[test]
    fn load_reads_file_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "locale = \"fr\"\ndecimals = 0\n").unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.locale(), Locale::Fr);
        assert_eq!(config.decimals, 0);
        assert_eq!(config.aggregate_scope, "full");
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.locale, "en");
        assert_eq!(config.decimals, 2);
    }

    #[test]
    fn load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "decimals = \"two\"").unwrap();
        assert!(matches!(load(&path), Err(ShopdeckError::Config(_))));
    }

    #[test]
    fn template_is_valid_toml() {
        let sample = template();
        assert!(sample.contains("aggregate_scope"));
        assert!(toml::from_str::<toml::Value>(&sample).is_ok());
    }
}
