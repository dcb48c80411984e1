//! Shared constants for the calculation engine.
//!
//! Reference geometry and default coefficients. The calculator takes the
//! reference viewport as a parameter; these are the defaults the facade
//! configuration starts from.

use crate::geometry::Viewport;

/// Reference design width in dp.
pub const BASE_WIDTH_DP: f64 = 300.0;

/// Reference design height in dp.
pub const BASE_HEIGHT_DP: f64 = 533.0;

/// The reference viewport built from the base dimensions.
pub const REFERENCE_VIEWPORT: Viewport = Viewport::new(BASE_WIDTH_DP, BASE_HEIGHT_DP);

/// Fallback geometry reported before the first resize event arrives.
pub const FALLBACK_VIEWPORT: Viewport = REFERENCE_VIEWPORT;

/// Reference aspect ratio (16:9).
pub const REFERENCE_AR: f64 = 1.78;

/// Default sensitivity coefficient for logarithmic and balanced scaling.
pub const DEFAULT_SENSITIVITY_K: f64 = 0.08;

/// Width at which balanced scaling switches from linear to logarithmic, in dp.
pub const DEFAULT_TRANSITION_POINT: f64 = 480.0;

/// Default exponent for power-law scaling.
pub const DEFAULT_POWER_EXPONENT: f64 = 0.75;

/// Linear increment per dp of width delta for the default strategy.
///
/// Canonical normalization of the legacy 0.10-per-30dp-step table to a
/// 1 dp step; the per-step variant and this one diverge by under 0.2% on
/// real device widths.
pub const BASE_INCREMENT_PER_DP: f64 = 0.10 / 30.0;

/// Aspect-ratio sensitivity for the default strategy.
pub const DEFAULT_AR_SENSITIVITY: f64 = 0.08 / 30.0;

/// Default lower width breakpoint for fluid scaling, in dp.
pub const FLUID_MIN_BREAKPOINT: f64 = 320.0;

/// Default upper width breakpoint for fluid scaling, in dp.
pub const FLUID_MAX_BREAKPOINT: f64 = 768.0;

/// Default autosize granularity, in dp.
pub const AUTOSIZE_GRANULARITY: f64 = 1.0;

/// Process-wide cache entry bound.
pub const MAX_CACHE_ENTRIES: usize = 1000;

/// Interval between periodic cache sweeps, in milliseconds.
pub const CACHE_SWEEP_INTERVAL_MS: u64 = 60_000;

/// Occupancy fraction above which a periodic sweep evicts.
pub const CACHE_SWEEP_OCCUPANCY: f64 = 0.8;

/// Fraction of entries removed by one eviction sweep.
pub const CACHE_EVICT_FRACTION: f64 = 0.2;

/// Default resize debounce window, in milliseconds.
pub const DEBOUNCE_MS: u64 = 100;
