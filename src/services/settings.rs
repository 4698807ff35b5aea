//! Application settings and window state
//!
//! Both are JSON files in the platform data directory
//! (e.g. ~/Library/Application Support/Set Builder/ on macOS).

use gpui::Global;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default backend when no settings file exists
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

fn get_app_data_dir() -> Result<PathBuf, String> {
    let data_dir =
        dirs::data_dir().ok_or_else(|| "Could not determine data directory".to_string())?;

    let app_dir = data_dir.join("Set Builder");

    if !app_dir.exists() {
        std::fs::create_dir_all(&app_dir)
            .map_err(|e| format!("Failed to create app data directory: {}", e))?;
    }

    Ok(app_dir)
}

/// Application-wide settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Base URL of the backend serving the catalog and show endpoints
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
        }
    }
}

impl Global for AppSettings {}

impl AppSettings {
    const SETTINGS_FILE: &'static str = "app_settings.json";

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let path = match get_app_data_dir() {
            Ok(dir) => dir.join(Self::SETTINGS_FILE),
            Err(e) => {
                log::debug!("Using default settings: {}", e);
                return Self::default();
            }
        };
        match Self::load_from(&path) {
            Ok(settings) => {
                log::debug!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::debug!("Using default settings: {}", e);
                Self::default()
            }
        }
    }

    fn load_from(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Err("Settings file not found".to_string());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings: {}", e))?;
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse settings: {}", e))
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), String> {
        let path = get_app_data_dir()?.join(Self::SETTINGS_FILE);
        self.save_to(&path)
    }

    fn save_to(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write settings: {}", e))
    }
}

/// Window state for position/size persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowState {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            x: 100.0,
            y: 100.0,
            width: 760.0,
            height: 640.0,
        }
    }
}

impl WindowState {
    const STATE_FILE: &'static str = "window_state.json";

    /// Load window state from disk, or return defaults if not found
    pub fn load() -> Self {
        let path = match get_app_data_dir() {
            Ok(dir) => dir.join(Self::STATE_FILE),
            Err(_) => return Self::default(),
        };
        Self::load_from(&path).unwrap_or_default()
    }

    fn load_from(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Err("State file not found".to_string());
        }
        let contents =
            std::fs::read_to_string(path).map_err(|e| format!("Failed to read state: {}", e))?;
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse state: {}", e))
    }

    /// Save window state to disk
    pub fn save(&self) -> Result<(), String> {
        let path = get_app_data_dir()?.join(Self::STATE_FILE);
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize state: {}", e))?;
        std::fs::write(&path, json).map_err(|e| format!("Failed to write state: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_settings.json");

        let settings = AppSettings {
            api_base_url: "https://shows.example.com".to_string(),
        };
        settings.save_to(&path).unwrap();

        let loaded = AppSettings::load_from(&path).unwrap();
        assert_eq!(loaded.api_base_url, "https://shows.example.com");
    }

    #[test]
    fn test_settings_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert!(AppSettings::load_from(&path).is_err());
    }

    #[test]
    fn test_settings_missing_field_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_settings.json");
        std::fs::write(&path, "{}").unwrap();

        let loaded = AppSettings::load_from(&path).unwrap();
        assert_eq!(loaded.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_window_state_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("window_state.json");

        let state = WindowState {
            x: 10.0,
            y: 20.0,
            width: 800.0,
            height: 600.0,
        };
        let json = serde_json::to_string_pretty(&state).unwrap();
        std::fs::write(&path, json).unwrap();

        let loaded = WindowState::load_from(&path).unwrap();
        assert_eq!(loaded.width, 800.0);
        assert_eq!(loaded.y, 20.0);
    }
}
