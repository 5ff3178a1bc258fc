use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory the image picker opens in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_dir: Option<PathBuf>,

    /// List dot-files in the image picker
    pub show_hidden: bool,

    /// kitty-style color file (`color2 #ffc107`) overriding the built-in theme
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_file: Option<PathBuf>,

    /// Tracing filter used when RUST_LOG is unset
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            start_dir: None,
            show_hidden: false,
            theme_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Default config file path, `None` when the platform has no config dir
    pub fn config_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join("stylist").join("config.toml"))
    }

    /// Load config from `path` or the default location. A missing file
    /// gives defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::config_path() {
                Some(p) => p,
                None => return Ok(AppConfig::default()),
            },
        };

        if !path.exists() {
            return Ok(AppConfig::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Where the picker opens: configured dir, else cwd, else home, else `/`
    pub fn picker_start(&self) -> PathBuf {
        self.start_dir
            .clone()
            .filter(|p| p.is_dir())
            .or_else(|| std::env::current_dir().ok())
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("/"))
    }
}
