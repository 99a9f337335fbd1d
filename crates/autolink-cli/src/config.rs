use anyhow::{Context, Result};
use autolink_core::{Autolinker, JsonFileStore, Notifier};
use std::path::Path;
use tracing::info;

/// Open the autolinker over the JSON settings record at `path`.
/// A missing file means defaults; it is created on the first mutation.
pub fn open_linker(path: &Path) -> Result<Autolinker<JsonFileStore>> {
    let linker = Autolinker::open(JsonFileStore::new(path))
        .with_context(|| format!("Failed to load settings from {}", path.display()))?;
    info!(
        "Settings: {} ({} links)",
        path.display(),
        linker.index().glossary().len()
    );
    Ok(linker)
}

/// Prints notifications to stdout.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        println!("{}", message);
    }
}
