//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Timer defaults and the duration presets offered by the CLI
//! - Gemini model names for analysis and chat
//!
//! Configuration is stored at `~/.config/focusflow/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::store::data_dir;

/// Timer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Default session length in minutes.
    #[serde(default = "default_duration_min")]
    pub duration_min: u64,
    /// Duration choices offered by `timer run` (the duration buttons).
    #[serde(default = "default_presets")]
    pub presets: Vec<u64>,
}

/// AI gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_analysis_model")]
    pub analysis_model: String,
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focusflow/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

// Default functions
fn default_duration_min() -> u64 {
    25
}
fn default_presets() -> Vec<u64> {
    vec![15, 25, 50]
}
fn default_analysis_model() -> String {
    "gemini-2.5-pro".into()
}
fn default_chat_model() -> String {
    "gemini-flash-lite-latest".into()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            duration_min: default_duration_min(),
            presets: default_presets(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            analysis_model: default_analysis_model(),
            chat_model: default_chat_model(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/focusflow"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing the default file if none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed
    /// into the existing field's type, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.into(),
            message: e.to_string(),
        })?;
        set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.into(),
            message: e.to_string(),
        })?;
        self.save()?;
        Ok(())
    }
}

fn get_json_value_by_path<'a>(
    root: &'a serde_json::Value,
    key: &str,
) -> Option<&'a serde_json::Value> {
    if key.is_empty() {
        return None;
    }

    let mut current = root;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

fn set_json_value_by_path(
    root: &mut serde_json::Value,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue {
        key: key.into(),
        message,
    };

    let mut parts = key.split('.').peekable();
    if parts.peek().is_none() {
        return Err(ConfigError::UnknownKey(key.into()));
    }

    let mut current = root;
    while let Some(part) = parts.next() {
        let is_leaf = parts.peek().is_none();
        if is_leaf {
            let obj = current
                .as_object_mut()
                .ok_or_else(|| ConfigError::UnknownKey(key.into()))?;
            let existing = obj
                .get(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.into()))?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<f64>() {
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as number")));
                    }
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        current = current
            .get_mut(part)
            .ok_or_else(|| ConfigError::UnknownKey(key.into()))?;
    }

    Err(ConfigError::UnknownKey(key.into()))
}
