use crate::types::{AliasLink, GlossaryEntry};
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Flattened, longest-alias-first lookup list derived from the glossary.
///
/// Readers get an `Arc` snapshot. A rebuild constructs a fresh list and swaps
/// it in, so a rewrite holding the previous snapshot never sees a partial list.
pub struct AliasCache {
    ordered: RwLock<Arc<[AliasLink]>>,

    /// Set on any glossary write. Cleared by the next rebuild.
    dirty: AtomicBool,
}

impl AliasCache {
    /// Create an empty cache. It starts dirty so the first read builds it.
    pub fn new() -> Self {
        Self {
            ordered: RwLock::new(Arc::from(Vec::new())),
            dirty: AtomicBool::new(true),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Mark the list stale (call after any glossary mutation)
    pub fn invalidate(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    /// Return the ordered list, rebuilding it first if the glossary changed.
    pub fn get_or_rebuild(&self, entries: &[GlossaryEntry]) -> Arc<[AliasLink]> {
        if self.is_dirty() {
            self.rebuild(entries);
        }
        self.ordered
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rebuild unconditionally from `entries`.
    pub fn rebuild(&self, entries: &[GlossaryEntry]) {
        let fresh: Arc<[AliasLink]> = Arc::from(flatten(entries));
        debug!("Rebuilt alias list: {} aliases", fresh.len());

        *self.ordered.write().unwrap_or_else(PoisonError::into_inner) = fresh;
        self.dirty.store(false, Ordering::Release);
    }

    pub fn stats(&self) -> CacheStats {
        let ordered = self.ordered.read().unwrap_or_else(PoisonError::into_inner);
        CacheStats {
            dirty: self.is_dirty(),
            alias_count: ordered.len(),
            longest_alias: ordered.first().map(AliasLink::len).unwrap_or(0),
        }
    }
}

impl Default for AliasCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub dirty: bool,
    pub alias_count: usize,
    pub longest_alias: usize,
}

/// Pair every alias with its target and sort by descending alias length.
/// The sort is stable: equal lengths keep glossary order.
pub fn flatten(entries: &[GlossaryEntry]) -> Vec<AliasLink> {
    let mut links: Vec<AliasLink> = entries
        .iter()
        .flat_map(|entry| {
            entry
                .aliases
                .iter()
                .map(move |alias| AliasLink::new(alias.clone(), entry.target.clone()))
        })
        .collect();
    links.sort_by_key(|link| std::cmp::Reverse(link.len()));
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(target: &str, aliases: &[&str]) -> GlossaryEntry {
        GlossaryEntry::new(target, aliases.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_flatten_orders_longest_first() {
        let entries = vec![
            entry("A", &["cat"]),
            entry("B", &["category", "cats"]),
        ];
        let aliases: Vec<_> = flatten(&entries).into_iter().map(|l| l.alias).collect();
        assert_eq!(aliases, vec!["category", "cats", "cat"]);
    }

    #[test]
    fn test_flatten_ties_keep_glossary_order() {
        let entries = vec![entry("A", &["abc"]), entry("B", &["xyz"])];
        let links = flatten(&entries);
        assert_eq!(links[0].target, "A");
        assert_eq!(links[1].target, "B");
    }

    #[test]
    fn test_cache_starts_dirty_and_builds_on_read() {
        let cache = AliasCache::new();
        assert!(cache.is_dirty());

        let list = cache.get_or_rebuild(&[entry("A", &["x"])]);
        assert_eq!(list.len(), 1);
        assert!(!cache.is_dirty());
    }

    #[test]
    fn test_clean_cache_serves_previous_list() {
        let cache = AliasCache::new();
        cache.get_or_rebuild(&[entry("A", &["x"])]);

        // Not invalidated: the new entries are ignored.
        let list = cache.get_or_rebuild(&[entry("A", &["x"]), entry("B", &["y"])]);
        assert_eq!(list.len(), 1);

        cache.invalidate();
        let list = cache.get_or_rebuild(&[entry("A", &["x"]), entry("B", &["y"])]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_snapshot_survives_rebuild() {
        let cache = AliasCache::new();
        let before = cache.get_or_rebuild(&[entry("A", &["x"])]);

        cache.invalidate();
        let after = cache.get_or_rebuild(&[entry("B", &["longer"])]);

        assert_eq!(before[0].target, "A");
        assert_eq!(after[0].target, "B");
    }

    #[test]
    fn test_stats() {
        let cache = AliasCache::new();
        cache.get_or_rebuild(&[entry("A", &["ab", "abcd"])]);
        let stats = cache.stats();
        assert_eq!(
            stats,
            CacheStats {
                dirty: false,
                alias_count: 2,
                longest_alias: 4
            }
        );
    }
}
