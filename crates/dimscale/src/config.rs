//! Engine configuration and the `Dimens` entry point.
//!
//! All process-wide state is explicit: a [`DimensConfig`] is built once,
//! handed to [`Dimens::new`], and injected into every builder the engine
//! produces. There are no ambient statics; two engines with different
//! configurations coexist in one process.

use serde::{Deserialize, Serialize};
use tracing::debug;
use web_time::Instant;

use dimscale_cache::{CacheStats, DependencyKey, DimensCache, SharedDimensCache};
use dimscale_core::constants::{FALLBACK_VIEWPORT, MAX_CACHE_ENTRIES, REFERENCE_VIEWPORT};
use dimscale_core::device::UiMode;
use dimscale_core::error::{DimensError, Result};
use dimscale_core::geometry::Viewport;
use dimscale_observe::ViewportObserver;

use crate::builder::DimensionBuilder;

/// Process-wide scaling configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensConfig {
    /// The design-time reference geometry every strategy scales against.
    pub reference: Viewport,
    /// Whether computed values are memoized at all. Individual builders
    /// can still opt out per instance.
    pub cache_enabled: bool,
    /// Bound on the memoization table.
    pub max_cache_entries: usize,
    /// Device class used by intersection qualifier rules.
    pub ui_mode: UiMode,
}

impl Default for DimensConfig {
    fn default() -> Self {
        Self {
            reference: REFERENCE_VIEWPORT,
            cache_enabled: true,
            max_cache_entries: MAX_CACHE_ENTRIES,
            ui_mode: UiMode::Normal,
        }
    }
}

/// The screen state a dimension is computed against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenContext {
    pub viewport: Viewport,
    pub ui_mode: UiMode,
}

impl ScreenContext {
    #[must_use]
    pub fn new(viewport: Viewport, ui_mode: UiMode) -> Self {
        Self { viewport, ui_mode }
    }

    /// Context from the observer's last settled viewport. Before the
    /// first resize this is the fallback geometry, never an error.
    #[must_use]
    pub fn from_observer(observer: &ViewportObserver, ui_mode: UiMode) -> Self {
        Self::new(observer.current(), ui_mode)
    }
}

impl Default for ScreenContext {
    fn default() -> Self {
        Self::new(FALLBACK_VIEWPORT, UiMode::Normal)
    }
}

/// The scaling engine: configuration plus the shared memoization cache.
#[derive(Debug, Clone)]
pub struct Dimens {
    config: DimensConfig,
    cache: SharedDimensCache,
}

impl Dimens {
    /// Build an engine from explicit configuration.
    #[must_use]
    pub fn new(config: DimensConfig) -> Self {
        let cache = SharedDimensCache::new(DimensCache::new(config.max_cache_entries));
        cache.set_enabled(config.cache_enabled);
        debug!(
            reference_width = config.reference.width,
            reference_height = config.reference.height,
            cache_enabled = config.cache_enabled,
            "engine created"
        );
        Self { config, cache }
    }

    /// The configuration this engine was constructed with. The live
    /// memoization toggle is [`cache_enabled`](Self::cache_enabled),
    /// which clones of one engine always agree on.
    #[must_use]
    pub fn config(&self) -> &DimensConfig {
        &self.config
    }

    /// Whether memoization is currently active, read from the shared
    /// store.
    #[must_use]
    pub fn cache_enabled(&self) -> bool {
        self.cache.is_enabled()
    }

    /// Start a dimension for `base`, in dp at the reference geometry.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when `base` is NaN or infinite.
    pub fn dim(&self, base: f64) -> Result<DimensionBuilder<'_>> {
        if !base.is_finite() {
            return Err(DimensError::InvalidInput {
                message: format!("base value must be finite, got {base}"),
            });
        }
        Ok(DimensionBuilder::new(self, base))
    }

    /// Flip memoization for every builder this engine produces. The
    /// store is shared, so the change is visible through every clone.
    pub fn set_cache_enabled(&mut self, enabled: bool) {
        self.config.cache_enabled = enabled;
        self.cache.set_enabled(enabled);
    }

    /// Drop every memoized value.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Drop memoized values that depended on `viewport`; typically called
    /// from a viewport-change subscriber.
    pub fn invalidate_viewport(&self, viewport: &Viewport) {
        self.cache.invalidate_dependency(&DependencyKey::of(viewport));
    }

    /// Run the periodic cache sweep if it is due.
    pub fn sweep_cache(&self) {
        self.cache.with(|cache| cache.maybe_sweep(Instant::now()));
    }

    /// Cache performance counters, for debug overlays.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub(crate) fn cache(&self) -> &SharedDimensCache {
        &self.cache
    }
}

impl Default for Dimens {
    fn default() -> Self {
        Self::new(DimensConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_base_is_rejected() {
        let engine = Dimens::default();
        assert!(matches!(
            engine.dim(f64::NAN),
            Err(DimensError::InvalidInput { .. })
        ));
        assert!(matches!(
            engine.dim(f64::INFINITY),
            Err(DimensError::InvalidInput { .. })
        ));
        assert!(engine.dim(16.0).is_ok());
    }

    #[test]
    fn default_config_uses_reference_geometry() {
        let config = DimensConfig::default();
        assert_eq!(config.reference, REFERENCE_VIEWPORT);
        assert!(config.cache_enabled);
        assert_eq!(config.max_cache_entries, MAX_CACHE_ENTRIES);
    }

    #[test]
    fn context_from_fresh_observer_is_the_fallback() {
        let observer = ViewportObserver::new();
        let context = ScreenContext::from_observer(&observer, UiMode::Normal);
        assert_eq!(context.viewport, FALLBACK_VIEWPORT);
    }

    #[test]
    fn cache_toggle_is_shared_across_clones() {
        let mut engine = Dimens::default();
        let clone = engine.clone();
        assert!(clone.cache_enabled());

        engine.set_cache_enabled(false);
        assert!(!engine.cache_enabled());
        assert!(!clone.cache_enabled());

        // The clone's remembered config is construction-time state.
        assert!(clone.config().cache_enabled);
    }

    #[test]
    fn two_engines_have_independent_caches() {
        let a = Dimens::default();
        let b = Dimens::default();
        a.cache().remember("k", &[], || 1.0);
        assert_eq!(a.cache_stats().total_entries, 1);
        assert_eq!(b.cache_stats().total_entries, 0);
    }
}
