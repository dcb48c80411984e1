//! Screen-qualifier override resolution.
//!
//! A builder can attach conditional base-value overrides keyed by screen
//! measurements, mirroring resource-qualifier directories: "when the
//! smallest width reaches 600 dp, use 24 instead of 16". Resolution is an
//! explicit ranked match over the rule list, not dispatch:
//!
//! 1. Intersection rules (UI mode + measurement) outrank plain
//!    measurement rules, and only apply when the context's UI mode
//!    matches.
//! 2. Among rules of equal specificity, `SmallWidth` outranks `Height`
//!    outranks `Width`.
//! 3. Within one qualifier type, the largest threshold not exceeding the
//!    current measurement wins (closest-from-below).
//!
//! Measurements respect base-orientation inversion through the shared
//! axis resolver, so a rule written against a portrait design reads the
//! swapped axis in landscape.

use serde::{Deserialize, Serialize};

use dimscale_core::device::UiMode;
use dimscale_core::error::{DimensError, Result};
use dimscale_core::geometry::Viewport;
use dimscale_core::orientation::{BaseOrientation, ScreenAxis, resolve_axis};

/// Which screen measurement a qualifier rule tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DpQualifier {
    /// Smallest of width and height, orientation-stable.
    SmallWidth,
    /// Current height.
    Height,
    /// Current width.
    Width,
}

impl DpQualifier {
    /// Match priority among same-specificity rules; higher wins.
    const fn priority(self) -> u8 {
        match self {
            DpQualifier::SmallWidth => 2,
            DpQualifier::Height => 1,
            DpQualifier::Width => 0,
        }
    }

    /// The screen axis this qualifier measures, before orientation
    /// resolution.
    const fn axis(self) -> ScreenAxis {
        match self {
            DpQualifier::SmallWidth => ScreenAxis::Lowest,
            DpQualifier::Height => ScreenAxis::Height,
            DpQualifier::Width => ScreenAxis::Width,
        }
    }

    /// Parse a qualifier name as written in resource-style config
    /// ("sw" / "h" / "w", with the long forms accepted too).
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "sw" | "smallest-width" => Ok(DpQualifier::SmallWidth),
            "h" | "height" => Ok(DpQualifier::Height),
            "w" | "width" => Ok(DpQualifier::Width),
            other => Err(DimensError::UnknownQualifier {
                name: other.to_owned(),
            }),
        }
    }
}

/// One conditional override: "when `qualifier` reaches `threshold` dp
/// (and `ui_mode` matches, if set), use `value` as the base".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualifierRule {
    /// UI-mode restriction making this an intersection rule.
    pub ui_mode: Option<UiMode>,
    pub qualifier: DpQualifier,
    /// Minimum measurement, in dp, for the rule to apply.
    pub threshold: f64,
    /// Replacement base value.
    pub value: f64,
}

/// Resolve the winning override for the current screen, if any.
#[must_use]
pub fn resolve_override(
    rules: &[QualifierRule],
    viewport: &Viewport,
    ui_mode: UiMode,
    base_orientation: BaseOrientation,
) -> Option<f64> {
    let mut best: Option<(bool, u8, f64, f64)> = None;

    for rule in rules {
        if let Some(required) = rule.ui_mode
            && required != ui_mode
        {
            continue;
        }
        let axis = resolve_axis(rule.qualifier.axis(), base_orientation, viewport.orientation());
        let measured = axis.of(viewport);
        if measured < rule.threshold {
            continue;
        }

        let rank = (
            rule.ui_mode.is_some(),
            rule.qualifier.priority(),
            rule.threshold,
        );
        let beats = match best {
            None => true,
            Some((spec, prio, threshold, _)) => rank > (spec, prio, threshold),
        };
        if beats {
            best = Some((rank.0, rank.1, rank.2, rule.value));
        }
    }

    best.map(|(_, _, _, value)| value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
