use crate::error::Result;
use crate::settings::Settings;
use crate::storage::SettingsStore;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// In-process store. Keeps the last saved record and counts saves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: Mutex<Option<Settings>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `settings`.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            record: Mutex::new(Some(settings)),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> Option<Settings> {
        self.record
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<Option<Settings>> {
        Ok(self.snapshot())
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        *self.record.lock().unwrap_or_else(PoisonError::into_inner) = Some(settings.clone());
        self.saves.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }
}
