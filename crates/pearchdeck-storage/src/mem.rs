use crate::traits::SettingsStore;
use pearchdeck_core::{AppSettings, Result};
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct InMemorySettingsStore {
    inner: Arc<RwLock<Option<AppSettings>>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(settings))),
        }
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn load(&self) -> AppSettings {
        self.inner.read().clone().unwrap_or_default()
    }

    fn save(&self, settings: &AppSettings) -> Result<()> {
        *self.inner.write() = Some(settings.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.inner.write() = None;
        Ok(())
    }
}
