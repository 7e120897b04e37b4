use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::listing::DEFAULT_PAGE_SIZE,
    errors::BookkeepingError,
    utils::{app_data_dir, ensure_dir},
};

const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "json.tmp";
const MAX_PAGE_SIZE: usize = 500;

/// User preferences for listings and output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub locale: String,
    #[serde(default = "Config::default_page_size_value")]
    pub default_page_size: usize,
    #[serde(default = "Config::default_color_enabled")]
    pub color_enabled: bool,
    /// Custom root for company workspaces; defaults to the app data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_root: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_opened_company: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            default_page_size: Self::default_page_size_value(),
            color_enabled: Self::default_color_enabled(),
            data_root: None,
            last_opened_company: None,
        }
    }
}

impl Config {
    fn default_page_size_value() -> usize {
        DEFAULT_PAGE_SIZE
    }

    fn default_color_enabled() -> bool {
        true
    }

    /// Page size clamped into a usable range.
    pub fn page_size(&self) -> usize {
        self.default_page_size.clamp(1, MAX_PAGE_SIZE)
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        self.data_root.clone().unwrap_or_else(app_data_dir)
    }

    /// Applies a `key=value` style setting.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), BookkeepingError> {
        match key {
            "locale" => self.locale = value.trim().to_string(),
            "page_size" | "default_page_size" => {
                let parsed: usize = value.trim().parse().map_err(|_| {
                    BookkeepingError::ConfigError(format!("`{value}` is not a valid page size"))
                })?;
                if parsed == 0 || parsed > MAX_PAGE_SIZE {
                    return Err(BookkeepingError::ConfigError(format!(
                        "page size must be between 1 and {MAX_PAGE_SIZE}"
                    )));
                }
                self.default_page_size = parsed;
            }
            "color" | "color_enabled" => {
                self.color_enabled = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" | "1" => true,
                    "false" | "off" | "no" | "0" => false,
                    other => {
                        return Err(BookkeepingError::ConfigError(format!(
                            "`{other}` is not a boolean"
                        )))
                    }
                };
            }
            "data_root" => {
                let trimmed = value.trim();
                self.data_root = (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));
            }
            other => {
                return Err(BookkeepingError::ConfigError(format!(
                    "unknown setting `{other}`"
                )))
            }
        }
        Ok(())
    }
}

/// Loads and stores [`Config`] as JSON under the app data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, BookkeepingError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, BookkeepingError> {
        let config_root = base.join(CONFIG_DIR);
        ensure_dir(&config_root)?;
        Ok(Self {
            path: config_root.join(CONFIG_FILE),
        })
    }

    /// Returns the stored config, or defaults when none has been saved yet.
    pub fn load(&self) -> Result<Config, BookkeepingError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data)
                .map_err(|err| BookkeepingError::ConfigError(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), BookkeepingError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension(TMP_SUFFIX);
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "saved configuration");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
