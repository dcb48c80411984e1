//! Scaling strategies and their parameters.
//!
//! [`ScalingStrategy`] is a closed tagged enum: thirteen interchangeable
//! ways of mapping a base design value to the current viewport. Parameter
//! structs carry the per-strategy knobs and default to the shared
//! constants, so `ScalingStrategy::Balanced(PerceptualParams::default())`
//! is always a sensible choice.
//!
//! Strategies are plain values: cloneable, serializable, and hashable into
//! a stable fingerprint for cache keys.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

use dimscale_core::constants::{
    AUTOSIZE_GRANULARITY, DEFAULT_AR_SENSITIVITY, DEFAULT_POWER_EXPONENT, DEFAULT_SENSITIVITY_K,
    DEFAULT_TRANSITION_POINT, FLUID_MAX_BREAKPOINT, FLUID_MIN_BREAKPOINT,
};

/// Parameters for the default (legacy fixed) strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefaultParams {
    /// Whether to dampen scaling when the aspect ratio deviates from the
    /// 16:9 reference.
    pub apply_aspect_ratio: bool,
    /// Sensitivity of the aspect-ratio adjustment.
    pub ar_sensitivity: f64,
}

impl Default for DefaultParams {
    fn default() -> Self {
        Self {
            apply_aspect_ratio: true,
            ar_sensitivity: DEFAULT_AR_SENSITIVITY,
        }
    }
}

/// Parameters for the perceptual strategies (balanced, logarithmic).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerceptualParams {
    /// Sensitivity coefficient `k` of the logarithmic term.
    pub sensitivity: f64,
    /// Width in dp where balanced scaling switches from linear to
    /// logarithmic. Ignored by the pure logarithmic strategy.
    pub transition_point: f64,
}

impl Default for PerceptualParams {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY_K,
            transition_point: DEFAULT_TRANSITION_POINT,
        }
    }
}

/// Parameters for power-law scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerParams {
    /// Exponent `n` in `(W/W0)^n`.
    pub exponent: f64,
}

impl Default for PowerParams {
    fn default() -> Self {
        Self {
            exponent: DEFAULT_POWER_EXPONENT,
        }
    }
}

/// Parameters for fluid (CSS clamp) scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FluidParams {
    /// Value at or below the lower breakpoint.
    pub min_value: f64,
    /// Value at or above the upper breakpoint.
    pub max_value: f64,
    /// Lower width breakpoint in dp.
    pub min_breakpoint: f64,
    /// Upper width breakpoint in dp.
    pub max_breakpoint: f64,
}

impl FluidParams {
    /// Fluid parameters between `min_value` and `max_value` with the
    /// default 320..768 dp breakpoints.
    #[must_use]
    pub fn new(min_value: f64, max_value: f64) -> Self {
        Self {
            min_value,
            max_value,
            min_breakpoint: FLUID_MIN_BREAKPOINT,
            max_breakpoint: FLUID_MAX_BREAKPOINT,
        }
    }
}

/// Parameters for autosize scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutosizeParams {
    /// Smallest value the result may take.
    pub min_value: f64,
    /// Largest value the result may take.
    pub max_value: f64,
    /// Step between generated candidate sizes when no presets are given.
    pub granularity: f64,
    /// Explicit candidate sizes, ascending. When set, `min_value`,
    /// `max_value`, and `granularity` are ignored.
    pub presets: Option<Vec<f64>>,
}

impl AutosizeParams {
    /// Autosize between `min_value` and `max_value` at the default 1 dp
    /// granularity.
    #[must_use]
    pub fn new(min_value: f64, max_value: f64) -> Self {
        Self {
            min_value,
            max_value,
            granularity: AUTOSIZE_GRANULARITY,
            presets: None,
        }
    }

    /// Autosize over an explicit ascending preset list.
    #[must_use]
    pub fn presets(presets: Vec<f64>) -> Self {
        Self {
            min_value: 0.0,
            max_value: 0.0,
            granularity: AUTOSIZE_GRANULARITY,
            presets: Some(presets),
        }
    }

    /// The candidate sizes: the explicit presets, or the min..max range
    /// stepped by granularity. The range always includes `max_value`,
    /// even when the span is not a whole number of steps.
    #[must_use]
    pub fn candidates(&self) -> Vec<f64> {
        if let Some(presets) = &self.presets {
            return presets.clone();
        }
        let step = if self.granularity > 0.0 { self.granularity } else { AUTOSIZE_GRANULARITY };
        let span = (self.max_value - self.min_value).max(0.0);
        // Tolerance absorbs inexact float division (4.5 / 0.5 = 8.999..).
        let count = (span / step + 1e-9) as usize + 1;
        let mut candidates: Vec<f64> =
            (0..count).map(|i| self.min_value + i as f64 * step).collect();
        if let Some(&last) = candidates.last()
            && last < self.max_value
        {
            candidates.push(self.max_value);
        }
        candidates
    }
}

/// A scaling strategy: how a base design value maps to the current
/// viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalingStrategy {
    /// Near-linear legacy scaling with aspect-ratio dampening.
    Default(DefaultParams),
    /// Fully proportional: `x * (W/W0)`.
    Percentage,
    /// Linear on phones, logarithmic past the transition point.
    Balanced(PerceptualParams),
    /// Pure logarithmic (Weber-Fechner) scaling.
    Logarithmic(PerceptualParams),
    /// Power-law (Stevens) scaling.
    Power(PowerParams),
    /// CSS clamp: linear interpolation between two width breakpoints,
    /// bounded by min/max values.
    Fluid(FluidParams),
    /// Half-strength linear: splits the difference between no scaling and
    /// percentage scaling.
    Interpolated,
    /// Scale by screen diagonal ratio.
    Diagonal,
    /// Scale by half-perimeter ratio.
    Perimeter,
    /// Letterbox: `min(W/W0, H/H0)`.
    Fit,
    /// Cover: `max(W/W0, H/H0)`.
    Fill,
    /// Snap to the largest candidate size fitting the container.
    Autosize(AutosizeParams),
    /// No scaling: the base value verbatim.
    None,
}

impl Default for ScalingStrategy {
    /// The documented fallback when no strategy was chosen.
    fn default() -> Self {
        Self::Default(DefaultParams::default())
    }
}

impl ScalingStrategy {
    /// Short lowercase name of the strategy variant.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default(_) => "default",
            Self::Percentage => "percentage",
            Self::Balanced(_) => "balanced",
            Self::Logarithmic(_) => "logarithmic",
            Self::Power(_) => "power",
            Self::Fluid(_) => "fluid",
            Self::Interpolated => "interpolated",
            Self::Diagonal => "diagonal",
            Self::Perimeter => "perimeter",
            Self::Fit => "fit",
            Self::Fill => "fill",
            Self::Autosize(_) => "autosize",
            Self::None => "none",
        }
    }

    /// Stable content fingerprint: discriminant plus parameter bits.
    ///
    /// Floats are hashed by their bit patterns, so two strategies with
    /// byte-identical parameters always fingerprint equal.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        std::mem::discriminant(self).hash(&mut hasher);
        match self {
            Self::Default(p) => {
                p.apply_aspect_ratio.hash(&mut hasher);
                p.ar_sensitivity.to_bits().hash(&mut hasher);
            }
            Self::Balanced(p) | Self::Logarithmic(p) => {
                p.sensitivity.to_bits().hash(&mut hasher);
                p.transition_point.to_bits().hash(&mut hasher);
            }
            Self::Power(p) => p.exponent.to_bits().hash(&mut hasher),
            Self::Fluid(p) => {
                p.min_value.to_bits().hash(&mut hasher);
                p.max_value.to_bits().hash(&mut hasher);
                p.min_breakpoint.to_bits().hash(&mut hasher);
                p.max_breakpoint.to_bits().hash(&mut hasher);
            }
            Self::Autosize(p) => {
                p.min_value.to_bits().hash(&mut hasher);
                p.max_value.to_bits().hash(&mut hasher);
                p.granularity.to_bits().hash(&mut hasher);
                if let Some(presets) = &p.presets {
                    for v in presets {
                        v.to_bits().hash(&mut hasher);
                    }
                }
            }
            Self::Percentage
            | Self::Interpolated
            | Self::Diagonal
            | Self::Perimeter
            | Self::Fit
            | Self::Fill
            | Self::None => {}
        }
        hasher.finish()
    }
}

impl std::fmt::Display for ScalingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
