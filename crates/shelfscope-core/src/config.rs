use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Application configuration, loaded from `~/.config/shelfscope/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub ui: UiConfig,
}

/// Where season documents come from when the CLI is given no explicit
/// `--file`/`--url`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// URL template with `{year}`/`{season}` tokens, replaced lowercased to
    /// match the compiler's output layout
    /// (e.g. `https://example.com/data/{year}/{season}.json`).
    pub url_template: String,

    /// Default challenge year, e.g. "2025".
    pub year: String,

    /// Default season name, e.g. "summer".
    pub season: String,

    /// Local season file override; takes precedence over the URL template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// Initial view state for the TUI and `list` defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub default_sort: String,
    pub default_direction: String,
    pub view_mode: String,
    pub duplicates_only: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_sort: "title".to_string(),
            default_direction: "asc".to_string(),
            view_mode: "list".to_string(),
            duplicates_only: false,
        }
    }
}

impl AppConfig {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shelfscope")
            .join("config.toml")
    }

    /// Load the user config, falling back to defaults when the file is
    /// absent. A present-but-invalid file is an error.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Resolve the season URL from the template, or `None` when no template
    /// is configured.
    pub fn artifact_url(&self, year: &str, season: &str) -> Option<String> {
        if self.source.url_template.trim().is_empty() {
            return None;
        }
        Some(
            self.source
                .url_template
                .replace("{year}", &year.to_lowercase())
                .replace("{season}", &season.to_lowercase()),
        )
    }
}
