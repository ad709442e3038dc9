//! Persisted sync settings.
//!
//! Settings are a flat JSON record, read once at startup and overwritten
//! in full on every save. Missing files yield defaults; unknown fields in
//! an existing file are ignored so older installs can downgrade freely.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default prefix prepended to synced inline field names.
pub const DEFAULT_PREFIX: &str = "\\_";

/// Default undo key, guarded as ctrl + key.
pub const DEFAULT_UNDO_KEY: char = 'z';

/// Runtime configuration of the sync engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Prepended to an inline field name once it has been synced, so the
    /// inline copy and the frontmatter copy are not treated as duplicate
    /// data points by downstream tooling.
    pub synced_inline_prefix: String,
    /// Ctrl + this key never schedules a sync evaluation, preventing a
    /// feedback loop where undoing a sync-induced edit retriggers sync.
    pub undo_key: char,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            synced_inline_prefix: DEFAULT_PREFIX.to_string(),
            undo_key: DEFAULT_UNDO_KEY,
        }
    }
}

/// Failure loading or storing the settings record.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write settings {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("settings file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Platform settings path: `<config dir>/fieldsync/settings.json`.
pub fn settings_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata)
                .join("fieldsync")
                .join("settings.json");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("fieldsync")
                .join("settings.json");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("fieldsync").join("settings.json");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("fieldsync")
                .join("settings.json");
        }
    }

    PathBuf::from(".fieldsync.json")
}

/// Load settings from `path`, falling back to defaults if the file does
/// not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_settings(path: &Path) -> Result<SyncSettings, SettingsError> {
    if !path.exists() {
        return Ok(SyncSettings::default());
    }
    let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the full settings record to `path`, replacing any previous
/// content and creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_settings(path: &Path, settings: &SyncSettings) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    let json =
        serde_json::to_string_pretty(settings).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    fs::write(path, format!("{json}\n")).map_err(|source| SettingsError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = SyncSettings::default();
        assert_eq!(settings.synced_inline_prefix, "\\_");
        assert_eq!(settings.undo_key, 'z');
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let loaded = load_settings(&path).unwrap();
        assert_eq!(loaded, SyncSettings::default());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = SyncSettings {
            synced_inline_prefix: "@@".to_string(),
            undo_key: 'u',
        };
        save_settings(&path, &settings).unwrap();
        let loaded = load_settings(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_save_overwrites_in_full() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        save_settings(
            &path,
            &SyncSettings {
                synced_inline_prefix: "@@".to_string(),
                undo_key: 'u',
            },
        )
        .unwrap();
        save_settings(&path, &SyncSettings::default()).unwrap();
        let loaded = load_settings(&path).unwrap();
        assert_eq!(loaded, SyncSettings::default());
    }

    #[test]
    fn test_partial_record_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"synced_inline_prefix": "%%"}"#).unwrap();
        let loaded = load_settings(&path).unwrap();
        assert_eq!(loaded.synced_inline_prefix, "%%");
        assert_eq!(loaded.undo_key, 'z');
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"undo_key": "y", "future_option": true}"#).unwrap();
        let loaded = load_settings(&path).unwrap();
        assert_eq!(loaded.undo_key, 'y');
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            load_settings(&path),
            Err(SettingsError::Parse { .. })
        ));
    }
}
