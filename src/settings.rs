use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{KhataError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: String,
    #[serde(default)]
    pub user_name: String,
    /// Record parses as transactions directly instead of queueing them.
    #[serde(default)]
    pub auto_approve: bool,
    #[serde(default = "default_duplicate_window_hours")]
    pub duplicate_window_hours: i64,
    #[serde(default = "default_salary_threshold")]
    pub salary_threshold: f64,
    #[serde(default = "default_review_threshold")]
    pub review_threshold: f64,
}

fn default_duplicate_window_hours() -> i64 {
    24
}

fn default_salary_threshold() -> f64 {
    10_000.0
}

fn default_review_threshold() -> f64 {
    0.9
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().to_string_lossy().to_string(),
            user_name: String::new(),
            auto_approve: false,
            duplicate_window_hours: default_duplicate_window_hours(),
            salary_threshold: default_salary_threshold(),
            review_threshold: default_review_threshold(),
        }
    }
}

fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("KHATA_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("khata")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("khata")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| KhataError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn settings_file_exists() -> bool {
    settings_path().exists()
}

pub fn get_data_dir() -> PathBuf {
    PathBuf::from(&load_settings().data_dir)
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}
