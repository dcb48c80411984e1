//! Breakpoint tiers and width classification.
//!
//! Eight tiers covering phone through ultra-wide desktop, with thresholds
//! matching common device widths. [`Breakpoints`] holds the threshold
//! table; [`Breakpoints::classify_width`] maps a current width to the
//! largest tier whose threshold it reaches.
//!
//! # Invariants
//!
//! 1. `Xs` starts at zero: every finite width classifies to some tier.
//! 2. Thresholds are strictly increasing in the default table; custom
//!    tables are the caller's responsibility.
//! 3. Classification is monotone: a wider viewport never classifies to a
//!    smaller tier.

use serde::{Deserialize, Serialize};

/// A responsive breakpoint tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Breakpoint {
    /// Smallest screens (watches, small phones).
    Xs,
    /// Large phones.
    Sm,
    /// Small tablets.
    Md,
    /// Tablets / small laptops.
    Lg,
    /// Desktops.
    Xl,
    /// Large desktops.
    X2l,
    /// Full HD and up.
    X3l,
    /// Ultra-wide / 4K.
    X4l,
}

impl Breakpoint {
    /// All tiers in ascending order.
    pub const ALL: [Breakpoint; 8] = [
        Breakpoint::Xs,
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
        Breakpoint::X2l,
        Breakpoint::X3l,
        Breakpoint::X4l,
    ];
}

impl std::fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
            Self::X2l => "2xl",
            Self::X3l => "3xl",
            Self::X4l => "4xl",
        };
        write!(f, "{name}")
    }
}

/// Minimum-width thresholds for each tier above `Xs`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoints {
    /// Thresholds for Sm, Md, Lg, Xl, X2l, X3l, X4l in dp.
    pub thresholds: [f64; 7],
}

impl Breakpoints {
    /// Default thresholds: 640 / 768 / 1024 / 1280 / 1536 / 1920 / 2560.
    pub const DEFAULT: Breakpoints = Breakpoints {
        thresholds: [640.0, 768.0, 1024.0, 1280.0, 1536.0, 1920.0, 2560.0],
    };

    /// Classify a width into the largest tier whose threshold it reaches.
    #[must_use]
    pub fn classify_width(&self, width: f64) -> Breakpoint {
        let mut tier = Breakpoint::Xs;
        for (i, &threshold) in self.thresholds.iter().enumerate() {
            if width >= threshold {
                tier = Breakpoint::ALL[i + 1];
            } else {
                break;
            }
        }
        tier
    }

    /// The minimum width of a tier (`0.0` for `Xs`).
    #[must_use]
    pub fn min_width(&self, bp: Breakpoint) -> f64 {
        match Breakpoint::ALL.iter().position(|&b| b == bp) {
            Some(0) | None => 0.0,
            Some(i) => self.thresholds[i - 1],
        }
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn classify_default_table() {
        let bps = Breakpoints::DEFAULT;
        assert_eq!(bps.classify_width(0.0), Breakpoint::Xs);
        assert_eq!(bps.classify_width(639.9), Breakpoint::Xs);
        assert_eq!(bps.classify_width(640.0), Breakpoint::Sm);
        assert_eq!(bps.classify_width(768.0), Breakpoint::Md);
        assert_eq!(bps.classify_width(1024.0), Breakpoint::Lg);
        assert_eq!(bps.classify_width(1280.0), Breakpoint::Xl);
        assert_eq!(bps.classify_width(1536.0), Breakpoint::X2l);
        assert_eq!(bps.classify_width(1920.0), Breakpoint::X3l);
        assert_eq!(bps.classify_width(5000.0), Breakpoint::X4l);
    }

    #[test]
    fn min_width_inverts_classification_at_thresholds() {
        let bps = Breakpoints::DEFAULT;
        assert_eq!(bps.min_width(Breakpoint::Xs), 0.0);
        assert_eq!(bps.min_width(Breakpoint::Sm), 640.0);
        assert_eq!(bps.min_width(Breakpoint::X4l), 2560.0);
        for bp in Breakpoint::ALL {
            assert_eq!(bps.classify_width(bps.min_width(bp)), bp);
        }
    }

    #[test]
    fn tiers_are_ordered() {
        for pair in Breakpoint::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    proptest! {
        #[test]
        fn classification_is_monotone(a in 0.0f64..4000.0, b in 0.0f64..4000.0) {
            let bps = Breakpoints::DEFAULT;
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(bps.classify_width(lo) <= bps.classify_width(hi));
        }
    }
}
