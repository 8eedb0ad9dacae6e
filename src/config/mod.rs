//! Persistent user preferences for the form and its avatar preview.

use std::{
    env,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const HOME_ENV: &str = "ROSTER_FORM_HOME";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),

    #[error("unknown config key `{0}`")]
    UnknownKey(String),

    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
}

/// Stores user-configurable form preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_placeholder_image")]
    pub placeholder_image: String,
    #[serde(default = "Config::default_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "Config::default_uppercase_input")]
    pub uppercase_input: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            placeholder_image: Self::default_placeholder_image(),
            image_base_url: Self::default_image_base_url(),
            uppercase_input: Self::default_uppercase_input(),
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 3] = ["placeholder_image", "image_base_url", "uppercase_input"];

    pub fn default_placeholder_image() -> String {
        "/static/images/default-avatar.png".into()
    }

    pub fn default_image_base_url() -> String {
        "/static/images".into()
    }

    pub fn default_uppercase_input() -> bool {
        true
    }

    /// URL under which a stored image filename is served.
    pub fn stored_image_url(&self, file_name: &str) -> String {
        format!("{}/{}", self.image_base_url.trim_end_matches('/'), file_name)
    }

    /// Updates a single key from its textual form.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key.trim().to_ascii_lowercase().as_str() {
            "placeholder_image" => self.placeholder_image = value.trim().to_string(),
            "image_base_url" => self.image_base_url = value.trim().to_string(),
            "uppercase_input" => {
                self.uppercase_input = match value.trim().to_ascii_lowercase().as_str() {
                    "y" | "yes" | "true" | "on" | "1" => true,
                    "n" | "no" | "false" | "off" | "0" => false,
                    _ => {
                        return Err(ConfigError::InvalidValue {
                            key: key.to_string(),
                            value: value.to_string(),
                        })
                    }
                }
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

/// Handles persistence of [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let config_dir = base.join("config");
        fs::create_dir_all(&config_dir)?;
        Ok(Self::new(config_dir.join("config.json")))
    }

    /// Resolves the base directory from `ROSTER_FORM_HOME` or the platform
    /// config directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::with_base_dir(base_dir())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.config_path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.config_path)?;
        Ok(())
    }
}

fn base_dir() -> PathBuf {
    if let Some(home) = env::var_os(HOME_ENV) {
        return PathBuf::from(home);
    }
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("roster_form")
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
