use crate::error::Result;
use crate::settings::Settings;
use crate::storage::SettingsStore;
use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Settings record stored as pretty-printed JSON on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self) -> Result<Option<Settings>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let settings = serde_json::from_str(&raw)?;
        debug!("Loaded settings from {}", self.path.display());
        Ok(Some(settings))
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // Write beside the target then rename, so readers never see a torn file.
        let temp = self.temp_path();
        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(&temp, json)?;
        std::fs::rename(&temp, &self.path)?;

        debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GlossaryEntry;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("autolink.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("autolink.json"));

        let settings = Settings::default()
            .with_ignore_headers(false)
            .with_links(vec![GlossaryEntry::new("Cats", vec!["cat".into()])]);
        store.save(&settings).unwrap();

        assert_eq!(store.load().unwrap(), Some(settings));
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("autolink.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(JsonFileStore::new(path).load().is_err());
    }
}
