use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::archive::{DEFAULT_MAX_PAGE, DEFAULT_ROWS, DETAILS_URL, SEARCH_URL};
use crate::category::Category;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub picker: PickerConfig,
}

/// Search endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Advanced search endpoint
    #[serde(default = "default_search_url")]
    pub search_url: String,
    /// Base address of item detail pages
    #[serde(default = "default_details_url")]
    pub details_url: String,
    /// Results requested per page
    #[serde(default = "default_rows")]
    pub rows: u32,
    /// Pages are drawn from 1..=max_page
    #[serde(default = "default_max_page")]
    pub max_page: u32,
    /// Request timeout in seconds (unset waits indefinitely)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            details_url: default_details_url(),
            rows: DEFAULT_ROWS,
            max_page: DEFAULT_MAX_PAGE,
            timeout_secs: None,
        }
    }
}

fn default_search_url() -> String {
    SEARCH_URL.to_string()
}

fn default_details_url() -> String {
    DETAILS_URL.to_string()
}

fn default_rows() -> u32 {
    DEFAULT_ROWS
}

fn default_max_page() -> u32 {
    DEFAULT_MAX_PAGE
}

/// Picker behavior settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Categories checked on startup
    #[serde(default)]
    pub default_categories: Vec<Category>,
    /// Open the detail page in the system browser when a result arrives
    #[serde(default)]
    pub open_in_browser: bool,
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("org", "archive-roulette", "Archive Roulette")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        let config_dir = dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a file, falling back to defaults if it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            tracing::info!("Loaded configuration from {:?}", path);
            Ok(config)
        } else {
            tracing::info!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.archive.search_url, "https://archive.org/advancedsearch.php");
        assert_eq!(config.archive.details_url, "https://archive.org/details");
        assert_eq!(config.archive.rows, 50);
        assert_eq!(config.archive.max_page, 100);
        assert_eq!(config.archive.timeout_secs, None);
        assert!(config.picker.default_categories.is_empty());
        assert!(!config.picker.open_in_browser);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [picker]
            default_categories = ["images", "videos"]
            "#,
        )
        .unwrap();

        assert_eq!(
            config.picker.default_categories,
            vec![Category::Images, Category::Movies]
        );
        assert_eq!(config.archive, ArchiveConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.archive.timeout_secs = Some(30);
        config.picker.default_categories = vec![Category::Audio];
        config.picker.open_in_browser = true;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_default_file_round_trips() {
        // What `config init` writes must load back unchanged
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::default().save_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[archive]"));
        assert!(!content.contains("timeout_secs"));
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }
}
