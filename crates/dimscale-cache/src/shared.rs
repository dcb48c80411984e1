//! Thread-safe cache handle.
//!
//! [`SharedDimensCache`] wraps a [`DimensCache`] in `Arc<Mutex<_>>` so one
//! cache can back every builder an engine hands out. Lock poisoning is
//! recovered rather than propagated: a panic inside a compute closure
//! leaves the table in a consistent state (entries are only inserted
//! after the closure returns), so the poisoned guard's data is still
//! valid.

use std::sync::{Arc, Mutex};

use crate::fingerprint::DependencyKey;
use crate::store::{CacheStats, DimensCache};

/// Cloneable, thread-safe handle to a [`DimensCache`].
#[derive(Debug, Clone)]
pub struct SharedDimensCache {
    inner: Arc<Mutex<DimensCache>>,
}

impl SharedDimensCache {
    /// Wrap a cache for shared use.
    #[must_use]
    pub fn new(cache: DimensCache) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Run `f` with the locked cache, recovering a poisoned lock.
    pub fn with<R>(&self, f: impl FnOnce(&mut DimensCache) -> R) -> R {
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }

    /// Memoize `compute` under `key`; see [`DimensCache::remember`].
    pub fn remember<F>(&self, key: &str, deps: &[DependencyKey], compute: F) -> f64
    where
        F: FnOnce() -> f64,
    {
        self.with(|cache| cache.remember(key, deps, compute))
    }

    /// Drop every entry referencing `dep`.
    pub fn invalidate_dependency(&self, dep: &DependencyKey) {
        self.with(|cache| cache.invalidate_dependency(dep));
    }

    /// Drop all entries.
    pub fn clear(&self) {
        self.with(DimensCache::clear);
    }

    /// Toggle caching on the underlying store.
    pub fn set_enabled(&self, enabled: bool) {
        self.with(|cache| cache.set_enabled(enabled));
    }

    /// Whether the underlying store currently memoizes.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.with(|cache| cache.is_enabled())
    }

    /// Current performance counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.with(|cache| cache.stats())
    }
}

impl Default for SharedDimensCache {
    fn default() -> Self {
        Self::new(DimensCache::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn clones_share_one_store() {
        let cache = SharedDimensCache::new(DimensCache::new(16));
        let other = cache.clone();

        cache.remember("k", &[], || 9.0);
        let hit = other.remember("k", &[], || -1.0);
        assert_eq!(hit, 9.0);
        assert_eq!(other.stats().hits, 1);
    }

    #[test]
    fn concurrent_remembers_do_not_lose_entries() {
        let cache = SharedDimensCache::new(DimensCache::new(256));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..32 {
                        let key = format!("t{t}-{i}");
                        cache.remember(&key, &[], || f64::from(i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.stats().total_entries, 128);
    }

    #[test]
    fn poisoned_lock_recovers() {
        let cache = SharedDimensCache::new(DimensCache::new(16));
        cache.remember("k", &[], || 3.0);

        let poisoner = cache.clone();
        let _ = thread::spawn(move || {
            poisoner.with(|_| panic!("poison"));
        })
        .join();

        // Lock still usable and the entry still hits.
        assert_eq!(cache.remember("k", &[], || -1.0), 3.0);
    }
}
