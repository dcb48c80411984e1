//! Viewport geometry snapshots.
//!
//! [`Viewport`] is an immutable width/height pair in density-independent
//! units. Aspect ratio and orientation are derived on demand rather than
//! stored, so a snapshot can never disagree with itself.
//!
//! # Invariants
//!
//! 1. A `Viewport` is never mutated; observers replace whole snapshots.
//! 2. Derived accessors are total: degenerate (zero-sized) viewports report
//!    an aspect ratio of `0.0` instead of dividing by zero.
//! 3. `orientation()` classifies square viewports as landscape, matching
//!    the `width >= height` convention of the platform observers.

use serde::{Deserialize, Serialize};

/// Physical orientation of a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Height strictly greater than width.
    Portrait,
    /// Width greater than or equal to height.
    Landscape,
}

impl Orientation {
    /// The other orientation.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Portrait => Self::Landscape,
            Self::Landscape => Self::Portrait,
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Portrait => write!(f, "portrait"),
            Self::Landscape => write!(f, "landscape"),
        }
    }
}

/// An immutable viewport snapshot in density-independent units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in dp.
    pub width: f64,
    /// Height in dp.
    pub height: f64,
}

impl Viewport {
    /// Create a snapshot from width and height.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Aspect ratio as largest/smallest dimension.
    ///
    /// Returns `0.0` for degenerate viewports instead of dividing by zero.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        let smallest = self.smallest();
        if smallest <= 0.0 {
            return 0.0;
        }
        self.largest() / smallest
    }

    /// Orientation of this snapshot (`width >= height` is landscape).
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        if self.width >= self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    /// The smaller of width and height.
    #[must_use]
    pub fn smallest(&self) -> f64 {
        self.width.min(self.height)
    }

    /// The larger of width and height.
    #[must_use]
    pub fn largest(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Screen diagonal, `sqrt(w^2 + h^2)`.
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }

    /// Half perimeter, `w + h`.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.width + self.height
    }

    /// Whether both dimensions are finite and strictly positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_classification() {
        assert_eq!(Viewport::new(360.0, 640.0).orientation(), Orientation::Portrait);
        assert_eq!(Viewport::new(640.0, 360.0).orientation(), Orientation::Landscape);
        // Square counts as landscape (width >= height).
        assert_eq!(Viewport::new(500.0, 500.0).orientation(), Orientation::Landscape);
    }

    #[test]
    fn opposite_round_trips() {
        assert_eq!(Orientation::Portrait.opposite().opposite(), Orientation::Portrait);
        assert_eq!(Orientation::Landscape.opposite(), Orientation::Portrait);
    }

    #[test]
    fn aspect_ratio_is_largest_over_smallest() {
        let portrait = Viewport::new(300.0, 533.0);
        let landscape = Viewport::new(533.0, 300.0);
        assert!((portrait.aspect_ratio() - 533.0 / 300.0).abs() < 1e-12);
        assert_eq!(portrait.aspect_ratio(), landscape.aspect_ratio());
    }

    #[test]
    fn degenerate_viewport_has_zero_aspect_ratio() {
        assert_eq!(Viewport::new(0.0, 640.0).aspect_ratio(), 0.0);
        assert_eq!(Viewport::new(360.0, 0.0).aspect_ratio(), 0.0);
    }

    #[test]
    fn smallest_largest_diagonal() {
        let vp = Viewport::new(300.0, 400.0);
        assert_eq!(vp.smallest(), 300.0);
        assert_eq!(vp.largest(), 400.0);
        assert!((vp.diagonal() - 500.0).abs() < 1e-9);
        assert_eq!(vp.perimeter(), 700.0);
    }

    #[test]
    fn validity() {
        assert!(Viewport::new(360.0, 640.0).is_valid());
        assert!(!Viewport::new(0.0, 640.0).is_valid());
        assert!(!Viewport::new(f64::NAN, 640.0).is_valid());
        assert!(!Viewport::new(-10.0, 640.0).is_valid());
    }

    #[test]
    fn serde_round_trip() {
        let vp = Viewport::new(375.0, 667.0);
        let json = serde_json::to_string(&vp).unwrap();
        let back: Viewport = serde_json::from_str(&json).unwrap();
        assert_eq!(vp, back);
    }
}
