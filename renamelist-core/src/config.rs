use crate::files::parse_extensions;
use crate::names::DEFAULT_DELIMITER;
use crate::preview::PreviewOptions;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR: &str = ".renamelist";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub preview: PreviewConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Extensions a folder listing is limited to; empty means every file
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Field delimiter of the name file
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Default plan preview: "table", "summary", or "json"
    #[serde(default = "default_preview")]
    pub preview_format: String,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            extensions: Vec::new(),
            delimiter: default_delimiter(),
            preview_format: default_preview(),
            use_color: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HistoryConfig {
    /// Where the operation log lives; the per-user data dir when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    #[serde(default = "default_max_width")]
    pub max_width: u32,

    #[serde(default = "default_max_height")]
    pub max_height: u32,

    #[serde(default = "default_text_chars")]
    pub text_chars: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_width: default_max_width(),
            max_height: default_max_height(),
            text_chars: default_text_chars(),
        }
    }
}

fn default_delimiter() -> String {
    DEFAULT_DELIMITER.to_string()
}

fn default_preview() -> String {
    "table".to_string()
}

fn default_max_width() -> u32 {
    800
}

fn default_max_height() -> u32 {
    600
}

fn default_text_chars() -> usize {
    2000
}

impl Config {
    /// Load config from .renamelist/config.toml if it exists
    pub fn load() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join(CONFIG_DIR).join("config.toml");
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.delimiter()?;
        Ok(config)
    }

    /// Save config to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// The configured delimiter as a single character
    pub fn delimiter(&self) -> Result<char> {
        let mut chars = self.defaults.delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => bail!(
                "delimiter must be a single character, got {:?}",
                self.defaults.delimiter
            ),
        }
    }

    /// Configured extensions, normalized the same way as `--ext`
    pub fn extensions(&self) -> Vec<String> {
        parse_extensions(&self.defaults.extensions.join(","))
    }

    pub fn preview_options(&self) -> PreviewOptions {
        PreviewOptions {
            max_width: self.preview.max_width,
            max_height: self.preview.max_height,
            text_chars: self.preview.text_chars,
            thumbnail_out: None,
        }
    }
}
