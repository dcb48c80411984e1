//! The memoization store.
//!
//! [`DimensCache`] memoizes computed dimension values under string keys,
//! revalidated against a dependency fingerprint. Entries age out through
//! scored eviction sweeps: a sweep drops the lowest-scoring fifth of the
//! table, where an entry's score is its access count divided by its age,
//! so frequently and recently used values survive.
//!
//! # Invalidation
//!
//! Three paths, from cheapest to broadest:
//! 1. Fingerprint mismatch on [`remember`](DimensCache::remember):
//!    the stale entry is replaced in place.
//! 2. [`invalidate_dependency`](DimensCache::invalidate_dependency):
//!    drops every entry whose fingerprint references the given value.
//! 3. [`clear`](DimensCache::clear): drops everything.
//!
//! # Disabled mode
//!
//! A disabled cache turns every `remember` into a pass-through that
//! invokes the compute closure without storing; the observable effect of
//! the process-wide toggle, without ambient global state.

use rustc_hash::FxHashMap;
use tracing::debug;
use web_time::{Duration, Instant};

use dimscale_core::constants::{
    CACHE_EVICT_FRACTION, CACHE_SWEEP_INTERVAL_MS, CACHE_SWEEP_OCCUPANCY, MAX_CACHE_ENTRIES,
};

use crate::fingerprint::DependencyKey;

/// One cached value plus the metadata eviction needs.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: f64,
    deps: Box<[DependencyKey]>,
    created: Instant,
    access_count: u64,
}

impl CacheEntry {
    /// Eviction score: accesses per millisecond of age. Higher survives.
    fn score(&self, now: Instant) -> f64 {
        let age_ms = now.duration_since(self.created).as_millis().max(1) as f64;
        self.access_count as f64 / age_ms
    }

    fn estimated_bytes(&self, key_len: usize) -> usize {
        key_len + self.deps.len() * std::mem::size_of::<DependencyKey>() + 48
    }
}

/// Cache performance counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    /// Entries currently stored.
    pub total_entries: usize,
    /// Lookups answered from the store.
    pub hits: u64,
    /// Lookups that had to compute.
    pub misses: u64,
    /// Hits over total lookups, 0.0 when none.
    pub hit_rate: f64,
    /// Mean wall time of compute closures across misses, in milliseconds.
    pub avg_compute_time_ms: f64,
    /// Rough memory footprint of keys, fingerprints, and entry overhead.
    pub estimated_memory_bytes: usize,
}

/// Memoization cache for computed dimension values.
#[derive(Debug)]
pub struct DimensCache {
    entries: FxHashMap<String, CacheEntry>,
    max_entries: usize,
    enabled: bool,
    hits: u64,
    misses: u64,
    total_compute_time: Duration,
    last_sweep: Instant,
}

impl DimensCache {
    /// Create a cache bounded at `max_entries`.
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: FxHashMap::default(),
            max_entries: max_entries.max(1),
            enabled: true,
            hits: 0,
            misses: 0,
            total_compute_time: Duration::ZERO,
            last_sweep: Instant::now(),
        }
    }

    /// Enable or disable the cache. Disabled, every `remember` is a
    /// pass-through and nothing new is stored.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether the cache currently stores results.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Memoize `compute` under `key`, revalidated against `deps`.
    ///
    /// A hit requires the stored fingerprint to match `deps` exactly
    /// (same length, same order, same type+hash per slot). On mismatch
    /// the entry is recomputed and replaced in place.
    pub fn remember<F>(&mut self, key: &str, deps: &[DependencyKey], compute: F) -> f64
    where
        F: FnOnce() -> f64,
    {
        if !self.enabled {
            self.misses += 1;
            return self.timed_compute(compute);
        }

        if let Some(entry) = self.entries.get_mut(key)
            && entry.deps.as_ref() == deps
        {
            self.hits += 1;
            entry.access_count = entry.access_count.saturating_add(1);
            return entry.value;
        }

        self.misses += 1;
        let value = self.timed_compute(compute);
        self.entries.insert(
            key.to_owned(),
            CacheEntry {
                value,
                deps: deps.into(),
                created: Instant::now(),
                access_count: 1,
            },
        );

        if self.entries.len() > self.max_entries {
            self.sweep(Instant::now());
        }
        value
    }

    fn timed_compute<F: FnOnce() -> f64>(&mut self, compute: F) -> f64 {
        let start = Instant::now();
        let value = compute();
        self.total_compute_time += start.elapsed();
        value
    }

    /// Drop every entry whose fingerprint references `dep`.
    pub fn invalidate_dependency(&mut self, dep: &DependencyKey) {
        self.entries.retain(|_, entry| !entry.deps.contains(dep));
    }

    /// Run the periodic sweep if due and the store is crowded.
    ///
    /// Intended to be called opportunistically from the host's event
    /// loop; evicts only when the sweep interval elapsed and occupancy
    /// exceeds the threshold.
    pub fn maybe_sweep(&mut self, now: Instant) {
        let due = now.duration_since(self.last_sweep) >= Duration::from_millis(CACHE_SWEEP_INTERVAL_MS);
        let crowded = self.entries.len() as f64 > self.max_entries as f64 * CACHE_SWEEP_OCCUPANCY;
        if due && crowded {
            self.sweep(now);
        }
    }

    /// Evict the lowest-scoring fifth of the table.
    pub fn sweep(&mut self, now: Instant) {
        if self.entries.is_empty() {
            self.last_sweep = now;
            return;
        }
        let evict = ((self.entries.len() as f64 * CACHE_EVICT_FRACTION) as usize).max(1);

        let mut scored: Vec<(f64, String)> = self
            .entries
            .iter()
            .map(|(key, entry)| (entry.score(now), key.clone()))
            .collect();
        scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        for (_, key) in scored.into_iter().take(evict) {
            self.entries.remove(&key);
        }
        self.last_sweep = now;
        debug!(evicted = evict, remaining = self.entries.len(), "cache sweep");
    }

    /// Drop all entries. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The configured entry bound.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    /// Current performance counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let total = self.hits + self.misses;
        CacheStats {
            total_entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            hit_rate: if total > 0 {
                self.hits as f64 / total as f64
            } else {
                0.0
            },
            avg_compute_time_ms: if self.misses > 0 {
                self.total_compute_time.as_secs_f64() * 1000.0 / self.misses as f64
            } else {
                0.0
            },
            estimated_memory_bytes: self
                .entries
                .iter()
                .map(|(key, entry)| entry.estimated_bytes(key.len()))
                .sum(),
        }
    }
}

impl Default for DimensCache {
    /// A cache at the process-wide default bound.
    fn default() -> Self {
        Self::new(MAX_CACHE_ENTRIES)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
