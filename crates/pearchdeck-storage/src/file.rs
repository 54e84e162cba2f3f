use crate::traits::SettingsStore;
use pearchdeck_core::{AppSettings, DeckError, Result};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Settings blob kept as pretty JSON in a single file.
pub struct FileSettingsStore {
    path: PathBuf,
    // serializes writers; readers go straight to disk
    write_lock: parking_lot::Mutex<()>,
}

impl FileSettingsStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: parking_lot::Mutex::new(()),
        }
    }

    /// `<config dir>/pearchdeck/settings.json`, or the working directory when
    /// the platform has no config dir.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("pearchdeck"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(SETTINGS_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> AppSettings {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no stored settings, using defaults");
                return AppSettings::default();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "settings read failed: {}", e);
                return AppSettings::default();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "settings unreadable, using defaults: {}", e);
                AppSettings::default()
            }
        }
    }

    fn save(&self, settings: &AppSettings) -> Result<()> {
        let _guard = self.write_lock.lock();
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| DeckError::Io(e.to_string()))?;
            }
        }
        let body =
            serde_json::to_vec_pretty(settings).map_err(|e| DeckError::Settings(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, body).map_err(|e| DeckError::Io(e.to_string()))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| DeckError::Io(e.to_string()))?;
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock();
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DeckError::Io(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pearchdeck_core::ProfileDisplayMode;

    fn store_in(dir: &tempfile::TempDir) -> FileSettingsStore {
        FileSettingsStore::open(dir.path().join("nested").join(SETTINGS_FILE_NAME))
    }

    #[test]
    fn missing_file_reads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(store_in(&dir).load(), AppSettings::default());
    }

    #[test]
    fn save_creates_parent_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut s = AppSettings::default();
        s.profile_display.mode = ProfileDisplayMode::Contacts;
        s.search_results.phone_numbers = false;
        store.save(&s).unwrap();
        assert!(store.path().exists());
        assert!(!store.path().with_extension("json.tmp").exists());
        assert_eq!(FileSettingsStore::open(store.path()).load(), s);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, b"{{{").unwrap();
        assert_eq!(FileSettingsStore::open(&path).load(), AppSettings::default());
    }

    #[test]
    fn partial_file_merges_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, br#"{"searchResults":{"fullJson":true},"animationSpeed":2}"#).unwrap();
        let s = FileSettingsStore::open(&path).load();
        assert!(s.search_results.full_json);
        assert!(s.search_results.business_emails);
        assert_eq!(s.extra.get("animationSpeed"), Some(&serde_json::json!(2)));
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.clear().unwrap();
        store.save(&AppSettings::default()).unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn export_import_between_stores() {
        let dir = tempfile::tempdir().unwrap();
        let a = FileSettingsStore::open(dir.path().join("a.json"));
        let b = FileSettingsStore::open(dir.path().join("b.json"));
        let mut s = AppSettings::default();
        s.api_endpoint_groups.custom_index = false;
        a.save(&s).unwrap();
        let exported = a.export().unwrap();
        b.import(&exported).unwrap();
        assert_eq!(b.load(), s);
    }
}
