//! Pure scaling computations.
//!
//! One entry point, [`compute`], maps `(base value, strategy, current
//! viewport, reference viewport, axis, base orientation)` to a scaled
//! value. Every function here is side-effect free and total over finite
//! inputs.
//!
//! # Guards
//!
//! - A zero or negative current width/height short-circuits to `0.0`.
//! - A degenerate reference dimension returns the unscaled base value.
//! - A non-finite base value returns `0.0`.
//! - No result is ever NaN or infinite for guarded inputs.
//!
//! # Precision
//!
//! All math is IEEE-754 f64 and nothing is rounded here; callers snap to
//! their pixel grid separately.

use dimscale_core::geometry::Viewport;
use dimscale_core::orientation::{BaseOrientation, ScreenAxis, resolve_axis};

use crate::strategy::{
    AutosizeParams, DefaultParams, FluidParams, PerceptualParams, PowerParams, ScalingStrategy,
};
use dimscale_core::constants::{BASE_INCREMENT_PER_DP, REFERENCE_AR};

/// Compute the scaled value for a strategy.
///
/// `axis` selects which screen dimension single-axis strategies read
/// (lowest/highest/width/height); `base_orientation` inverts it when the
/// design orientation differs from the current one. Two-axis strategies
/// (diagonal, perimeter, fit, fill, autosize) use both dimensions and are
/// unaffected by the axis but still honor the guards.
#[must_use]
pub fn compute(
    base: f64,
    strategy: &ScalingStrategy,
    viewport: &Viewport,
    reference: &Viewport,
    axis: ScreenAxis,
    base_orientation: BaseOrientation,
) -> f64 {
    if !base.is_finite() {
        return 0.0;
    }
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return 0.0;
    }
    if !reference.is_valid() {
        return base;
    }

    let resolved = resolve_axis(axis, base_orientation, viewport.orientation());
    let w = resolved.of(viewport);
    let w0 = resolved.of(reference);

    match strategy {
        ScalingStrategy::None => base,
        ScalingStrategy::Percentage => scale_percentage(base, w, w0),
        ScalingStrategy::Default(p) => scale_default(base, w, w0, viewport, p),
        ScalingStrategy::Balanced(p) => scale_balanced(base, w, w0, p),
        ScalingStrategy::Logarithmic(p) => scale_logarithmic(base, w, w0, p),
        ScalingStrategy::Power(p) => scale_power(base, w, w0, p),
        ScalingStrategy::Fluid(p) => scale_fluid(w, p),
        ScalingStrategy::Interpolated => scale_interpolated(base, w, w0),
        ScalingStrategy::Diagonal => scale_diagonal(base, viewport, reference),
        ScalingStrategy::Perimeter => scale_perimeter(base, viewport, reference),
        ScalingStrategy::Fit => base * fit_ratio(viewport, reference),
        ScalingStrategy::Fill => base * fill_ratio(viewport, reference),
        ScalingStrategy::Autosize(p) => scale_autosize(base, viewport, reference, p),
    }
}

fn scale_percentage(base: f64, w: f64, w0: f64) -> f64 {
    if w0 <= 0.0 {
        return base;
    }
    base * (w / w0)
}

/// Legacy fixed scaling: near-linear growth with an aspect-ratio dampener.
///
/// `f(x) = x * (1 + (W - W0) * increment) * (1 + kAR * ln(AR / 1.78))`
fn scale_default(base: f64, w: f64, w0: f64, viewport: &Viewport, params: &DefaultParams) -> f64 {
    let linear = 1.0 + (w - w0) * BASE_INCREMENT_PER_DP;
    let ar_adjustment = if params.apply_aspect_ratio {
        let ar = viewport.aspect_ratio();
        if ar > 0.0 {
            1.0 + params.ar_sensitivity * (ar / REFERENCE_AR).ln()
        } else {
            1.0
        }
    } else {
        1.0
    };
    base * linear * ar_adjustment
}

/// Linear up to the transition point, logarithmic past it.
///
/// `f(x) = x * (W/W0)` below the transition; above it
/// `f(x) = x * (T/W0 + k * ln(1 + (W - T)/W0))`.
fn scale_balanced(base: f64, w: f64, w0: f64, params: &PerceptualParams) -> f64 {
    if w0 <= 0.0 {
        return base;
    }
    let t = params.transition_point;
    if w < t {
        base * (w / w0)
    } else {
        let excess = w - t;
        base * (t / w0 + params.sensitivity * (1.0 + excess / w0).ln())
    }
}

/// Pure Weber-Fechner scaling: `f(x) = x * (1 + k * ln(W/W0))`.
fn scale_logarithmic(base: f64, w: f64, w0: f64, params: &PerceptualParams) -> f64 {
    if w0 <= 0.0 || w <= 0.0 {
        return base;
    }
    base * (1.0 + params.sensitivity * (w / w0).ln())
}

/// Stevens power law: `f(x) = x * (W/W0)^n`.
fn scale_power(base: f64, w: f64, w0: f64, params: &PowerParams) -> f64 {
    if w0 <= 0.0 {
        return base;
    }
    base * (w / w0).powf(params.exponent)
}

/// CSS clamp semantics: interpolate between the two breakpoints, bounded
/// by the min/max values. The base value does not participate.
fn scale_fluid(w: f64, params: &FluidParams) -> f64 {
    let span = params.max_breakpoint - params.min_breakpoint;
    if span <= 0.0 {
        return params.min_value;
    }
    let slope = (params.max_value - params.min_value) / span;
    let intercept = params.min_value - slope * params.min_breakpoint;
    (intercept + slope * w).clamp(
        params.min_value.min(params.max_value),
        params.min_value.max(params.max_value),
    )
}

/// Half-strength linear: `f(x) = x + (x * W/W0 - x) * 0.5`.
fn scale_interpolated(base: f64, w: f64, w0: f64) -> f64 {
    if w0 <= 0.0 {
        return base;
    }
    let linear = base * (w / w0);
    base + (linear - base) * 0.5
}

fn scale_diagonal(base: f64, viewport: &Viewport, reference: &Viewport) -> f64 {
    let ref_diag = reference.diagonal();
    if ref_diag <= 0.0 {
        return base;
    }
    base * (viewport.diagonal() / ref_diag)
}

fn scale_perimeter(base: f64, viewport: &Viewport, reference: &Viewport) -> f64 {
    let ref_perimeter = reference.perimeter();
    if ref_perimeter <= 0.0 {
        return base;
    }
    base * (viewport.perimeter() / ref_perimeter)
}

/// Letterbox ratio: smallest-to-smallest and largest-to-largest, take the
/// smaller. Orientation-independent by construction.
fn fit_ratio(viewport: &Viewport, reference: &Viewport) -> f64 {
    let rw = viewport.smallest() / reference.smallest();
    let rh = viewport.largest() / reference.largest();
    rw.min(rh)
}

/// Cover ratio: the larger of the two axis ratios.
fn fill_ratio(viewport: &Viewport, reference: &Viewport) -> f64 {
    let rw = viewport.smallest() / reference.smallest();
    let rh = viewport.largest() / reference.largest();
    rw.max(rh)
}

/// Snap to the largest candidate not exceeding the letterboxed target.
///
/// The target fit metric is the base value under fit scaling; candidates
/// below it are admissible, and the largest wins. A target below every
/// candidate yields the first (smallest) candidate so the result stays in
/// the declared range. Monotone in container growth because the fit ratio
/// is.
fn scale_autosize(base: f64, viewport: &Viewport, reference: &Viewport, params: &AutosizeParams) -> f64 {
    let target = base * fit_ratio(viewport, reference);
    let candidates = params.candidates();
    let Some(&first) = candidates.first() else {
        return target;
    };
    // Candidates are ascending; binary search for the last one <= target.
    match candidates.binary_search_by(|c| c.partial_cmp(&target).unwrap_or(std::cmp::Ordering::Less)) {
        Ok(i) => candidates[i],
        Err(0) => first,
        Err(i) => candidates[i - 1],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
