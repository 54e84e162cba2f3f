use pearchdeck_core::{AppSettings, DeckError, Result};

/// Persistence for the single settings blob.
///
/// Readers get a synchronous snapshot; callers re-read before each use
/// instead of holding on to a copy across a search.
pub trait SettingsStore: Send + Sync + 'static {
    /// Current settings, defaulted when nothing is stored.
    fn load(&self) -> AppSettings;
    fn save(&self, settings: &AppSettings) -> Result<()>;
    fn clear(&self) -> Result<()>;

    fn export(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.load()).map_err(|e| DeckError::Settings(e.to_string()))
    }

    /// Parse and persist a settings blob; missing fields take defaults.
    fn import(&self, json: &str) -> Result<AppSettings> {
        let settings: AppSettings =
            serde_json::from_str(json).map_err(|e| DeckError::Settings(e.to_string()))?;
        self.save(&settings)?;
        Ok(settings)
    }
}
