//! Cache of results derived from authoritative source objects.
//!
//! Each entry remembers which source it was computed from through a
//! [`StalenessToken`]. A lookup hands in the source that is authoritative
//! *now*; the cached result is returned only if it was derived from that
//! very object. Superseded sources are never kept alive by the cache.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::StalenessToken;

/// Lookup counters for a [`DerivedCache`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    /// Entries found but derived from a superseded source.
    pub stale: usize,
}

struct Entry<S: ?Sized, D> {
    token: StalenessToken<S>,
    derived: Arc<D>,
}

/// Derived results keyed by `K`, guarded by the identity of source `S`.
pub struct DerivedCache<K, S: ?Sized, D> {
    entries: FxHashMap<K, Entry<S, D>>,
    stats: CacheStats,
}

impl<K, S, D> DerivedCache<K, S, D>
where
    K: Eq + Hash + fmt::Debug,
    S: ?Sized,
{
    pub fn new() -> Self {
        DerivedCache {
            entries: FxHashMap::default(),
            stats: CacheStats::default(),
        }
    }

    /// Store `derived` as computed from `source`, replacing any entry for
    /// `key`.
    pub fn insert(&mut self, key: K, source: &Arc<S>, derived: D) -> Arc<D> {
        let derived = Arc::new(derived);
        debug!(key = ?key, "cached derived result");
        self.entries.insert(
            key,
            Entry {
                token: StalenessToken::new(source),
                derived: Arc::clone(&derived),
            },
        );
        derived
    }

    /// Result for `key` if it was derived from `current`.
    ///
    /// Any other source is stale for this entry. The entry itself is
    /// evicted only once its own source has been reclaimed; while that
    /// source is alive a lookup with some other object leaves it in place.
    pub fn get(&mut self, key: &K, current: &Arc<S>) -> Option<Arc<D>> {
        let Some(entry) = self.entries.get(key) else {
            self.stats.misses += 1;
            return None;
        };
        if entry.token.matches(current) {
            self.stats.hits += 1;
            return Some(Arc::clone(&entry.derived));
        }
        self.stats.stale += 1;
        if !entry.token.is_live() {
            debug!(key = ?key, "evicting derived result of reclaimed source");
            self.entries.remove(key);
        }
        None
    }

    /// Cached result for `key` and `current`, computing and storing it on a
    /// miss.
    pub fn get_or_insert_with(
        &mut self,
        key: K,
        current: &Arc<S>,
        derive: impl FnOnce(&S) -> D,
    ) -> Arc<D> {
        if let Some(hit) = self.get(&key, current) {
            return hit;
        }
        let derived = derive(&**current);
        self.insert(key, current, derived)
    }

    /// Peek at a result without checking its source. Used by incremental
    /// consumers that want the previous analysis even though it is stale.
    pub fn get_any(&self, key: &K) -> Option<Arc<D>> {
        self.entries.get(key).map(|entry| Arc::clone(&entry.derived))
    }

    pub fn remove(&mut self, key: &K) -> Option<Arc<D>> {
        self.entries.remove(key).map(|entry| entry.derived)
    }

    /// Drop every entry whose source has been reclaimed. Returns how many
    /// were dropped.
    pub fn purge_reclaimed(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.token.is_live());
        let purged = before - self.entries.len();
        if purged > 0 {
            debug!(purged, "purged derived results of reclaimed sources");
        }
        purged
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl<K, S, D> Default for DerivedCache<K, S, D>
where
    K: Eq + Hash + fmt::Debug,
    S: ?Sized,
{
    fn default() -> Self {
        DerivedCache::new()
    }
}

impl<K, S: ?Sized, D> fmt::Debug for DerivedCache<K, S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedCache")
            .field("entries", &self.entries.len())
            .field("stats", &self.stats)
            .finish()
    }
}
