//! TOML persistence for [`Settings`].

use crate::domain::{Result, Settings, ShopdashError};
use std::path::{Path, PathBuf};

/// Reads and writes the settings file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    file_path: PathBuf,
}

impl SettingsStore {
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Loads settings, returning defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Settings> {
        let _span = tracing::debug_span!("settings_load", path = ?self.file_path).entered();

        if !self.file_path.exists() {
            tracing::debug!("settings file missing, using defaults");
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&self.file_path)?;
        toml::from_str(&contents)
            .map_err(|e| ShopdashError::Config(format!("failed to parse settings: {e}")))
    }

    /// Writes settings atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let _span = tracing::debug_span!("settings_save", path = ?self.file_path).entered();

        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(settings)
            .map_err(|e| ShopdashError::Config(format!("failed to serialize settings: {e}")))?;
        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, contents)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(?settings, "settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Accent, ThemeMode};

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.toml"));
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("cfg/settings.toml"));
        let settings = Settings::new(ThemeMode::Light, Accent::Orange, true);
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "theme_mode = \"sepia\"").unwrap();
        assert!(matches!(SettingsStore::new(path).load(), Err(ShopdashError::Config(_))));
    }
}
