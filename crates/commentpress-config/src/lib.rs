use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Placeholder in [`Config::prefix_template`] replaced by the entry id.
pub const POST_ID_PLACEHOLDER: &str = "{post_id}";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Site-wide segmentation settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `prose`, `poetry` or `plain`; anything else formats as plain
    pub formatter: String,
    /// Identifier prefix; `{post_id}` is replaced by the entry id
    pub prefix_template: String,
    pub start_offset: usize,
    /// Emit the empty comment-icon span in each block
    pub placeholders: bool,
    /// Leave entries with no comments and closed comments unsegmented
    pub skip_uncommented_closed: bool,
    pub nesting_limit: usize,
    /// Source encoding of stored entries: `utf-8` or `iso-8859-1`
    pub encoding: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            formatter: "prose".to_string(),
            prefix_template: format!("textblock-{POST_ID_PLACEHOLDER}"),
            start_offset: 1,
            placeholders: true,
            skip_uncommented_closed: false,
            nesting_limit: 512,
            encoding: "utf-8".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/commentpress");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Identifier prefix for one entry.
    pub fn prefix_for(&self, post_id: u64) -> String {
        self.prefix_template
            .replace(POST_ID_PLACEHOLDER, &post_id.to_string())
    }

    /// Expand `~` and `$VAR` in a user-supplied path, e.g. a `--config` flag.
    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
