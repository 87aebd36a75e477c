use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CartirError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "default_data_file")]
    pub data_file: String,
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
}

fn default_data_file() -> String {
    "cartir.json".to_string()
}

fn default_export_dir() -> String {
    ".".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            export_dir: default_export_dir(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("cartir")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn read_settings(path: &Path) -> Settings {
    if path.exists() {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

fn write_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|e| CartirError::Settings(format!("{}: {e}", dir.display())))?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

pub fn load_settings() -> Settings {
    read_settings(&settings_path())
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    write_settings(&settings_path(), settings)
}

pub fn settings_file_exists() -> bool {
    settings_path().exists()
}

/// Dataset path: an explicit `--data` wins over the settings file.
pub fn resolve_data_file(explicit: Option<&str>) -> PathBuf {
    match explicit {
        Some(p) => PathBuf::from(shellexpand_path(p)),
        None => PathBuf::from(shellexpand_path(&load_settings().data_file)),
    }
}

pub fn get_export_dir() -> PathBuf {
    PathBuf::from(shellexpand_path(&load_settings().export_dir))
}

pub fn shellexpand_path(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
