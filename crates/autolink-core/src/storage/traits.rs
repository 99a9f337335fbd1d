use crate::error::Result;
use crate::settings::Settings;

/// Where the settings record lives between runs
pub trait SettingsStore {
    /// Load the stored record. `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Settings>>;

    /// Persist the full record. Called right after every mutation.
    fn save(&self, settings: &Settings) -> Result<()>;
}

impl<S: SettingsStore + ?Sized> SettingsStore for Box<S> {
    fn load(&self) -> Result<Option<Settings>> {
        (**self).load()
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        (**self).save(settings)
    }
}

impl<S: SettingsStore + ?Sized> SettingsStore for std::sync::Arc<S> {
    fn load(&self) -> Result<Option<Settings>> {
        (**self).load()
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        (**self).save(settings)
    }
}
