use crate::error::{AutolinkError, Result};
use crate::glossary::{AddAliasOutcome, Glossary, GlossaryIndex, RemoveAliasOutcome};
use crate::linker::{LinkRewriter, RewriteOptions, RewriteStats};
use crate::settings::{parse_alias_list, parse_interval, Settings};
use crate::storage::SettingsStore;
use crate::types::{AliasLink, GlossaryEntry};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;

/// High-level autolinker: options, glossary index and the store they persist to.
///
/// Every mutation is written through to the store before the call returns.
/// A failed save rolls the in-memory state back, so memory never runs ahead
/// of what was persisted.
///
/// # Example
/// ```rust
/// use autolink_core::{Autolinker, MemoryStore};
///
/// let mut linker = Autolinker::open(MemoryStore::new()).unwrap();
/// linker.add_alias("Cats", "cat").unwrap();
/// assert_eq!(linker.scan_full("I have a cat."), "I have a [[Cats|cat]].");
/// ```
pub struct Autolinker<S: SettingsStore> {
    store: S,
    check_interval: u64,
    autoscan_active: bool,
    ignore_headers: bool,
    index: GlossaryIndex,
}

/// In-memory state captured before a mutation, restored if the save fails.
struct Snapshot {
    check_interval: u64,
    autoscan_active: bool,
    ignore_headers: bool,
    glossary: Glossary,
}

impl<S: SettingsStore> Autolinker<S> {
    /// Load the stored record (defaults if none) and build the index.
    pub fn open(store: S) -> Result<Self> {
        let settings = store.load()?.unwrap_or_default();
        validate_interval(settings.autoscan_check_interval)?;
        let index = GlossaryIndex::from_entries(settings.links)?;
        info!(
            "Autolinker loaded: {} links, autoscan {}",
            index.glossary().len(),
            if settings.autoscan_active_document { "on" } else { "off" }
        );

        Ok(Self {
            store,
            check_interval: settings.autoscan_check_interval,
            autoscan_active: settings.autoscan_active_document,
            ignore_headers: settings.ignore_headers,
            index,
        })
    }

    /// Re-read the store and adopt its record when it differs from the
    /// in-memory state. Picks up edits made by another process sharing the
    /// same store. Returns true when anything was adopted.
    ///
    /// A record that fails to load or validate leaves the current state as is.
    pub fn reload(&mut self) -> Result<bool> {
        let Some(stored) = self.store.load()? else {
            return Ok(false);
        };
        validate_interval(stored.autoscan_check_interval)?;
        let index = GlossaryIndex::from_entries(stored.links)?;
        let unchanged = stored.autoscan_check_interval == self.check_interval
            && stored.autoscan_active_document == self.autoscan_active
            && stored.ignore_headers == self.ignore_headers
            && index.glossary() == self.index.glossary();
        if unchanged {
            return Ok(false);
        }

        self.check_interval = stored.autoscan_check_interval;
        self.autoscan_active = stored.autoscan_active_document;
        self.ignore_headers = stored.ignore_headers;
        self.index = index;
        debug!(
            "Reloaded settings: {} links, autoscan {}",
            self.index.glossary().len(),
            if self.autoscan_active { "on" } else { "off" }
        );
        Ok(true)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Snapshot of the full record as it would be persisted.
    pub fn settings(&self) -> Settings {
        Settings {
            autoscan_check_interval: self.check_interval,
            autoscan_active_document: self.autoscan_active,
            ignore_headers: self.ignore_headers,
            links: self.index.entries().to_vec(),
        }
    }

    pub fn index(&self) -> &GlossaryIndex {
        &self.index
    }

    pub fn rewrite_options(&self) -> RewriteOptions {
        RewriteOptions::new().with_skip_headers(self.ignore_headers)
    }

    pub fn autoscan_active(&self) -> bool {
        self.autoscan_active
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval)
    }

    pub fn ordered_aliases(&self) -> Arc<[AliasLink]> {
        self.index.ordered_aliases()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            check_interval: self.check_interval,
            autoscan_active: self.autoscan_active,
            ignore_headers: self.ignore_headers,
            glossary: self.index.glossary().clone(),
        }
    }

    /// Save the current state. On failure, put `previous` back before
    /// returning the error.
    fn persist_or_rollback(&mut self, previous: Snapshot) -> Result<()> {
        if let Err(e) = self.store.save(&self.settings()) {
            warn!("Saving settings failed, rolling back: {}", e);
            self.check_interval = previous.check_interval;
            self.autoscan_active = previous.autoscan_active;
            self.ignore_headers = previous.ignore_headers;
            self.index.restore(previous.glossary);
            return Err(e);
        }
        Ok(())
    }

    // --- Scanning ---

    /// Rewrite a whole document.
    pub fn scan_full(&self, document: &str) -> String {
        self.scan_with_stats(document).0
    }

    /// Rewrite a selected fragment. Splicing it back is up to the caller.
    pub fn scan_selection(&self, selection: &str) -> String {
        self.scan_with_stats(selection).0
    }

    pub fn scan_with_stats(&self, text: &str) -> (String, RewriteStats) {
        let aliases = self.index.ordered_aliases();
        LinkRewriter::new(self.rewrite_options()).rewrite_with_stats(text, &aliases)
    }

    // --- Glossary commands ---

    pub fn add_alias(&mut self, target: &str, alias: &str) -> Result<AddAliasOutcome> {
        let previous = self.snapshot();
        let outcome = self.index.add_alias(target, alias)?;
        if outcome.changed() {
            self.persist_or_rollback(previous)?;
        }
        Ok(outcome)
    }

    /// Remove one alias. Absent pairs are a silent no-op with no save.
    pub fn remove_alias(&mut self, target: &str, alias: &str) -> Result<RemoveAliasOutcome> {
        let previous = self.snapshot();
        let outcome = self.index.remove_alias(target, alias);
        if outcome.changed() {
            self.persist_or_rollback(previous)?;
        }
        Ok(outcome)
    }

    // --- Settings surface ---

    pub fn set_autoscan_active(&mut self, active: bool) -> Result<()> {
        let previous = self.snapshot();
        self.autoscan_active = active;
        self.persist_or_rollback(previous)
    }

    pub fn set_ignore_headers(&mut self, ignore: bool) -> Result<()> {
        let previous = self.snapshot();
        self.ignore_headers = ignore;
        self.persist_or_rollback(previous)
    }

    /// Set the check interval from its text form. Malformed text changes nothing.
    pub fn set_check_interval_text(&mut self, text: &str) -> Result<()> {
        let millis = parse_interval(text)?;
        self.set_check_interval(millis)
    }

    pub fn set_check_interval(&mut self, millis: u64) -> Result<()> {
        validate_interval(millis)?;
        let previous = self.snapshot();
        self.check_interval = millis;
        self.persist_or_rollback(previous)
    }

    /// Add a glossary entry from a target and a JSON alias array.
    ///
    /// An existing target gets the aliases merged in. Returns the number of
    /// aliases actually added.
    pub fn add_entry(&mut self, target: &str, aliases_text: &str) -> Result<usize> {
        let aliases = parse_alias_list(aliases_text)?;
        if aliases.is_empty() {
            return Err(AutolinkError::MalformedAliases(
                "at least one alias is required".into(),
            ));
        }
        let previous = self.snapshot();
        let added = self.index.insert_entry(target, &aliases)?;
        if added > 0 {
            self.persist_or_rollback(previous)?;
        }
        Ok(added)
    }

    /// Entries whose target contains `filter`, ignoring case.
    pub fn search_entries(&self, filter: &str) -> Vec<&GlossaryEntry> {
        self.index.search(filter)
    }

    /// Replace an entry's aliases from a JSON alias array. An empty array
    /// removes the entry. Malformed input leaves the entry as it was.
    pub fn replace_entry_aliases(&mut self, target: &str, aliases_text: &str) -> Result<()> {
        let aliases = parse_alias_list(aliases_text)?;
        let previous = self.snapshot();
        if !self.index.replace_aliases(target, &aliases)? {
            return Err(AutolinkError::EntryNotFound(target.to_string()));
        }
        self.persist_or_rollback(previous)
    }

    pub fn remove_entry(&mut self, target: &str) -> Result<GlossaryEntry> {
        let previous = self.snapshot();
        let Some(entry) = self.index.remove_entry(target) else {
            warn!("Remove requested for unknown link '{}'", target);
            return Err(AutolinkError::EntryNotFound(target.to_string()));
        };
        self.persist_or_rollback(previous)?;
        Ok(entry)
    }
}

fn validate_interval(millis: u64) -> Result<()> {
    if millis == 0 {
        return Err(AutolinkError::Validation(
            "autoscan_check_interval must be > 0".into(),
        ));
    }
    Ok(())
}
