//! Shell settings (get/set).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_SCREENSHOT: &str =
    "https://autoconfig.kde.org/discover/screenshot-not-available.png";

/// Settings file at `<config>/dnav/settings.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub home_label: String,
    pub home_icon: String,
    pub default_screenshot: String,
    pub featured_file_name: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            home_label: "Home".to_string(),
            home_icon: "go-home".to_string(),
            default_screenshot: DEFAULT_SCREENSHOT.to_string(),
            featured_file_name: None,
        }
    }
}

impl Settings {
    /// Load settings; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(SettingsError::ReadFailed(e)),
        };
        serde_json::from_str(&content).map_err(SettingsError::ParseFailed)
    }
}

/// Read one raw value. Missing keys read as the empty string.
pub fn get_config_value(path: &Path, key: &str) -> Result<String, SettingsError> {
    let raw = read_raw(path)?;
    Ok(raw
        .get(key)
        .map(|v| v.as_str().map(String::from).unwrap_or_else(|| v.to_string()))
        .unwrap_or_default())
}

/// All raw key/value pairs, as stored.
pub fn get_config_values(path: &Path) -> Result<serde_json::Map<String, serde_json::Value>, SettingsError> {
    match read_raw(path)? {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(SettingsError::InvalidSettings),
    }
}

/// Set a value and persist it.
/// Uses raw JSON to preserve keys this version does not know.
pub fn set_config_value(path: &Path, key: &str, value: &str) -> Result<(), SettingsError> {
    let mut settings = read_raw(path)?;

    let object = settings
        .as_object_mut()
        .ok_or(SettingsError::InvalidSettings)?;
    object.insert(key.to_string(), serde_json::Value::String(value.to_string()));

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(SettingsError::CreateDir)?;
    }
    let output = serde_json::to_string_pretty(&settings).map_err(SettingsError::SerializeFailed)?;
    std::fs::write(path, output).map_err(|e| SettingsError::WriteFailed(e, path.to_path_buf()))?;

    Ok(())
}

fn read_raw(path: &Path) -> Result<serde_json::Value, SettingsError> {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).map_err(SettingsError::ParseFailed),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(serde_json::json!({})),
        Err(e) => Err(SettingsError::ReadFailed(e)),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Settings file is not a JSON object")]
    InvalidSettings,
    #[error("Failed to read settings: {0}")]
    ReadFailed(std::io::Error),
    #[error("Failed to parse settings: {0}")]
    ParseFailed(serde_json::Error),
    #[error("Failed to create directory: {0}")]
    CreateDir(std::io::Error),
    #[error("Failed to serialize settings: {0}")]
    SerializeFailed(serde_json::Error),
    #[error("Failed to write settings {1}: {0}")]
    WriteFailed(std::io::Error, PathBuf),
}
