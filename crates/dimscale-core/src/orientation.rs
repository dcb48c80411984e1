//! Base-orientation aware axis resolution.
//!
//! A dimension is designed against one screen axis: the smaller dimension,
//! the larger one, or width/height literally. When the design assumed a
//! specific orientation and the device is currently in the other one, the
//! requested axis has to be swapped so the value keeps tracking the same
//! physical edge of the screen. [`resolve_axis`] is the single shared
//! helper for that inversion; the calculator and the qualifier resolver
//! both go through it.
//!
//! # Invariants
//!
//! 1. `BaseOrientation::Auto` never inverts.
//! 2. Inversion is an involution: resolving twice with mismatched
//!    orientations yields the original axis.
//! 3. When the current orientation matches the base orientation the
//!    requested axis passes through unchanged.

use serde::{Deserialize, Serialize};

use crate::geometry::{Orientation, Viewport};

/// The orientation a dimension was originally designed for.
///
/// `Auto` means the design is orientation-agnostic and axes are taken
/// as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BaseOrientation {
    /// No design orientation; never invert.
    #[default]
    Auto,
    /// Designed for portrait (width < height).
    Portrait,
    /// Designed for landscape (width > height).
    Landscape,
}

/// Which screen dimension a computation references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScreenAxis {
    /// The smaller of width and height.
    #[default]
    Lowest,
    /// The larger of width and height.
    Highest,
    /// The literal width.
    Width,
    /// The literal height.
    Height,
}

impl ScreenAxis {
    /// The axis swapped width<->height and lowest<->highest.
    #[must_use]
    pub const fn inverted(self) -> Self {
        match self {
            Self::Lowest => Self::Highest,
            Self::Highest => Self::Lowest,
            Self::Width => Self::Height,
            Self::Height => Self::Width,
        }
    }

    /// Read this axis out of a viewport snapshot.
    #[must_use]
    pub fn of(self, viewport: &Viewport) -> f64 {
        match self {
            Self::Lowest => viewport.smallest(),
            Self::Highest => viewport.largest(),
            Self::Width => viewport.width,
            Self::Height => viewport.height,
        }
    }
}

/// Resolve the effective axis for the current orientation.
///
/// If `base` is `Auto`, or the current orientation matches the design
/// orientation, the requested axis is returned unchanged. Otherwise the
/// axis is inverted.
#[must_use]
pub fn resolve_axis(requested: ScreenAxis, base: BaseOrientation, current: Orientation) -> ScreenAxis {
    let designed = match base {
        BaseOrientation::Auto => return requested,
        BaseOrientation::Portrait => Orientation::Portrait,
        BaseOrientation::Landscape => Orientation::Landscape,
    };
    if designed == current {
        requested
    } else {
        requested.inverted()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
