//! Glossary: the user-maintained mapping from link targets to aliases.
//!
//! The glossary is an ordered list of entries, unique by target. An entry
//! never survives with zero aliases. [`GlossaryIndex`] wraps it together with
//! the derived, longest-alias-first lookup list the rewriter consumes.

mod cache;
mod index;

pub use cache::{AliasCache, CacheStats};
pub use index::GlossaryIndex;

use crate::error::Result;
use crate::types::{validate_alias, validate_target, GlossaryEntry};
use log::warn;

/// Result of adding one alias to the glossary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddAliasOutcome {
    /// A new entry was created for the target.
    CreatedEntry,
    /// The alias was appended to an existing entry.
    AppendedToEntry,
    /// The target already had this alias. Nothing changed.
    AlreadyExists,
}

impl AddAliasOutcome {
    pub fn changed(self) -> bool {
        !matches!(self, Self::AlreadyExists)
    }
}

/// Result of removing one alias from the glossary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveAliasOutcome {
    /// The alias was removed; the entry still has other aliases.
    Removed,
    /// The alias was the entry's last one, so the entry was deleted.
    EntryDeleted,
    /// No such target/alias pair. Nothing changed.
    NotFound,
}

impl RemoveAliasOutcome {
    pub fn changed(self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

/// Ordered glossary entries, unique by target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Glossary {
    entries: Vec<GlossaryEntry>,
}

impl Glossary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a glossary from persisted entries.
    ///
    /// Entries sharing a target are merged and duplicate aliases are dropped.
    /// Entries with an empty target, empty aliases, and entries left without
    /// aliases are skipped so one bad record never blocks loading the rest.
    pub fn from_entries(entries: Vec<GlossaryEntry>) -> Result<Self> {
        let mut glossary = Self::new();
        for entry in entries {
            if entry.target.is_empty() {
                warn!(
                    "Skipping stored link with an empty target ({} aliases)",
                    entry.aliases.len()
                );
                continue;
            }
            for alias in entry.aliases {
                if alias.is_empty() {
                    continue;
                }
                glossary.add_alias(&entry.target, &alias)?;
            }
        }
        Ok(glossary)
    }

    pub fn entries(&self) -> &[GlossaryEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<GlossaryEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, target: &str) -> Option<&GlossaryEntry> {
        self.entries.iter().find(|e| e.target == target)
    }

    fn position(&self, target: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.target == target)
    }

    pub fn add_alias(&mut self, target: &str, alias: &str) -> Result<AddAliasOutcome> {
        validate_target(target)?;
        validate_alias(alias)?;

        match self.position(target) {
            Some(idx) => {
                let entry = &mut self.entries[idx];
                if entry.contains_alias(alias) {
                    return Ok(AddAliasOutcome::AlreadyExists);
                }
                entry.aliases.push(alias.to_string());
                Ok(AddAliasOutcome::AppendedToEntry)
            }
            None => {
                self.entries
                    .push(GlossaryEntry::new(target, vec![alias.to_string()]));
                Ok(AddAliasOutcome::CreatedEntry)
            }
        }
    }

    pub fn remove_alias(&mut self, target: &str, alias: &str) -> RemoveAliasOutcome {
        let Some(idx) = self.position(target) else {
            return RemoveAliasOutcome::NotFound;
        };
        let entry = &mut self.entries[idx];
        let Some(alias_idx) = entry.aliases.iter().position(|a| a == alias) else {
            return RemoveAliasOutcome::NotFound;
        };

        entry.aliases.remove(alias_idx);
        if entry.aliases.is_empty() {
            self.entries.remove(idx);
            RemoveAliasOutcome::EntryDeleted
        } else {
            RemoveAliasOutcome::Removed
        }
    }

    /// Merge `aliases` into the entry for `target`, creating it if needed.
    /// Returns how many aliases were actually added.
    pub fn insert_entry(&mut self, target: &str, aliases: &[String]) -> Result<usize> {
        validate_target(target)?;
        for alias in aliases {
            validate_alias(alias)?;
        }

        let mut added = 0;
        for alias in aliases {
            if self.add_alias(target, alias)?.changed() {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Replace the whole alias set of an existing entry.
    ///
    /// An empty set deletes the entry. Returns `false` when the target is unknown.
    pub fn replace_aliases(&mut self, target: &str, aliases: &[String]) -> Result<bool> {
        for alias in aliases {
            validate_alias(alias)?;
        }
        let Some(idx) = self.position(target) else {
            return Ok(false);
        };

        if aliases.is_empty() {
            self.entries.remove(idx);
            return Ok(true);
        }

        let mut deduped: Vec<String> = Vec::with_capacity(aliases.len());
        for alias in aliases {
            if !deduped.contains(alias) {
                deduped.push(alias.clone());
            }
        }
        self.entries[idx].aliases = deduped;
        Ok(true)
    }

    /// Remove an entry outright. Returns the removed entry, if any.
    pub fn remove_entry(&mut self, target: &str) -> Option<GlossaryEntry> {
        let idx = self.position(target)?;
        Some(self.entries.remove(idx))
    }

    /// Entries whose target contains `filter`, case-insensitively. An empty
    /// filter matches everything.
    pub fn search(&self, filter: &str) -> Vec<&GlossaryEntry> {
        if filter.is_empty() {
            return self.entries.iter().collect();
        }
        let needle = filter.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.target.to_lowercase().contains(&needle))
            .collect()
    }
}
