//! Settings persistence for the Jotter command line.
//!
//! Stores user preferences (notebook location, log level) in a JSON file at
//! an OS-appropriate location.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// Notebook file opened when `--notebook` is not given.
    pub notebook_path: String,
    /// Default log filter, overridden by `RUST_LOG`.
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            notebook_path: default_notebook_path().to_string_lossy().to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Returns the path to the settings JSON file.
///
/// - macOS / Linux: `~/.config/jotter/settings.json`
/// - Windows: `%APPDATA%/Jotter/settings.json`
pub fn settings_file_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("Jotter").join("settings.json")
    }
    #[cfg(not(target_os = "windows"))]
    {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("jotter").join("settings.json")
    }
}

/// Returns the default notebook file: `~/Documents/Jotter/notes.jotter`.
pub fn default_notebook_path() -> PathBuf {
    dirs::document_dir()
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Documents")
        })
        .join("Jotter")
        .join("notes.jotter")
}

/// Loads settings from the default location.
///
/// See [`load_settings_from`] for the meaning of the second element.
pub fn load_settings() -> (AppSettings, Option<String>) {
    load_settings_from(&settings_file_path())
}

/// Loads settings from `path`; returns defaults if the file is missing or corrupt.
///
/// A corrupt file also yields a diagnostic for the caller to report once
/// logging is up. A missing file is not worth reporting.
pub fn load_settings_from(path: &Path) -> (AppSettings, Option<String>) {
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(settings) => (settings, None),
            Err(e) => (
                AppSettings::default(),
                Some(format!("ignoring corrupt settings file {}: {e}", path.display())),
            ),
        },
        Err(_) => (AppSettings::default(), None),
    }
}

/// Saves settings to `path`, creating parent directories as needed.
pub fn save_settings_to(path: &Path, settings: &AppSettings) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create settings directory: {e}"))?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;
    fs::write(path, json).map_err(|e| format!("Failed to write settings: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (settings, diagnostic) = load_settings_from(&dir.path().join("nope.json"));
        assert_eq!(settings, AppSettings::default());
        assert!(diagnostic.is_none());
        assert!(settings.notebook_path.ends_with("notes.jotter"));
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        let (settings, diagnostic) = load_settings_from(&path);
        assert_eq!(settings, AppSettings::default());
        let diagnostic = diagnostic.expect("corrupt file must be reported");
        assert!(diagnostic.contains("settings.json"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("settings.json");
        let settings = AppSettings {
            notebook_path: "/tmp/work.jotter".to_string(),
            log_level: "debug".to_string(),
        };

        save_settings_to(&path, &settings).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("notebookPath"));
        assert_eq!(load_settings_from(&path), (settings, None));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"logLevel":"info"}"#).unwrap();

        let (settings, diagnostic) = load_settings_from(&path);
        assert!(diagnostic.is_none());
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.notebook_path, AppSettings::default().notebook_path);
    }
}
