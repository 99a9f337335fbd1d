use crate::error::Result;
use crate::glossary::{AddAliasOutcome, AliasCache, CacheStats, Glossary, RemoveAliasOutcome};
use crate::types::{AliasLink, GlossaryEntry};
use log::info;
use std::sync::Arc;

/// The glossary plus its derived alias list.
///
/// Every mutation goes through this type and invalidates the cache, and every
/// reader pulls the list through [`GlossaryIndex::ordered_aliases`], so a
/// stale list is never served after a write.
#[derive(Default)]
pub struct GlossaryIndex {
    glossary: Glossary,
    cache: AliasCache,
}

impl GlossaryIndex {
    pub fn new(glossary: Glossary) -> Self {
        Self {
            glossary,
            cache: AliasCache::new(),
        }
    }

    pub fn from_entries(entries: Vec<GlossaryEntry>) -> Result<Self> {
        Ok(Self::new(Glossary::from_entries(entries)?))
    }

    pub fn glossary(&self) -> &Glossary {
        &self.glossary
    }

    pub fn entries(&self) -> &[GlossaryEntry] {
        self.glossary.entries()
    }

    /// Longest-alias-first list of (alias, target) pairs.
    pub fn ordered_aliases(&self) -> Arc<[AliasLink]> {
        self.cache.get_or_rebuild(self.glossary.entries())
    }

    pub fn is_dirty(&self) -> bool {
        self.cache.is_dirty()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn add_alias(&mut self, target: &str, alias: &str) -> Result<AddAliasOutcome> {
        let outcome = self.glossary.add_alias(target, alias)?;
        if outcome.changed() {
            info!("Added alias '{}' -> '{}' ({:?})", alias, target, outcome);
            self.cache.invalidate();
        }
        Ok(outcome)
    }

    pub fn remove_alias(&mut self, target: &str, alias: &str) -> RemoveAliasOutcome {
        let outcome = self.glossary.remove_alias(target, alias);
        if outcome.changed() {
            info!("Removed alias '{}' -> '{}' ({:?})", alias, target, outcome);
            self.cache.invalidate();
        }
        outcome
    }

    pub fn insert_entry(&mut self, target: &str, aliases: &[String]) -> Result<usize> {
        let added = self.glossary.insert_entry(target, aliases)?;
        if added > 0 {
            info!("Added {} aliases to link '{}'", added, target);
            self.cache.invalidate();
        }
        Ok(added)
    }

    pub fn replace_aliases(&mut self, target: &str, aliases: &[String]) -> Result<bool> {
        let replaced = self.glossary.replace_aliases(target, aliases)?;
        if replaced {
            info!("Replaced aliases of link '{}' ({} aliases)", target, aliases.len());
            self.cache.invalidate();
        }
        Ok(replaced)
    }

    pub fn remove_entry(&mut self, target: &str) -> Option<GlossaryEntry> {
        let removed = self.glossary.remove_entry(target);
        if removed.is_some() {
            info!("Removed link '{}' from glossary", target);
            self.cache.invalidate();
        }
        removed
    }

    /// Swap in a whole glossary, e.g. to undo a mutation that could not be saved.
    pub fn restore(&mut self, glossary: Glossary) {
        if self.glossary != glossary {
            self.glossary = glossary;
            self.cache.invalidate();
        }
    }

    pub fn search(&self, filter: &str) -> Vec<&GlossaryEntry> {
        self.glossary.search(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_descending(list: &[AliasLink]) -> bool {
        list.windows(2).all(|w| w[0].len() >= w[1].len())
    }

    #[test]
    fn test_ordered_aliases_reflect_mutations() {
        let mut index = GlossaryIndex::default();
        index.add_alias("A", "cat").unwrap();
        assert_eq!(index.ordered_aliases().len(), 1);

        index.add_alias("B", "category").unwrap();
        assert!(index.is_dirty());
        let list = index.ordered_aliases();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].alias, "category");
        assert!(is_descending(&list));

        index.remove_alias("B", "category");
        let list = index.ordered_aliases();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].alias, "cat");
    }

    #[test]
    fn test_noop_mutations_keep_cache_clean() {
        let mut index = GlossaryIndex::default();
        index.add_alias("A", "cat").unwrap();
        index.ordered_aliases();

        assert_eq!(index.add_alias("A", "cat").unwrap(), AddAliasOutcome::AlreadyExists);
        assert_eq!(index.remove_alias("A", "dog"), RemoveAliasOutcome::NotFound);
        assert!(!index.is_dirty());
    }

    #[test]
    fn test_restore_swaps_glossary_and_invalidates() {
        let mut index = GlossaryIndex::default();
        index.add_alias("A", "cat").unwrap();
        let before = index.glossary().clone();
        index.add_alias("B", "category").unwrap();
        assert_eq!(index.ordered_aliases().len(), 2);

        index.restore(before);
        assert!(index.is_dirty());
        let list = index.ordered_aliases();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].alias, "cat");
    }

    #[test]
    fn test_entry_level_mutations_invalidate() {
        let mut index = GlossaryIndex::default();
        index.insert_entry("A", &["x".into(), "yy".into()]).unwrap();
        assert_eq!(index.ordered_aliases()[0].alias, "yy");

        index.replace_aliases("A", &["zzz".into()]).unwrap();
        assert_eq!(index.ordered_aliases()[0].alias, "zzz");

        index.remove_entry("A");
        assert!(index.ordered_aliases().is_empty());
    }
}
