//! Media-query style condition tracking.
//!
//! [`MediaQueryObserver`] keeps a set of named boolean conditions
//! ("queries") and notifies per-query subscribers when a condition
//! flips. Two kinds of query coexist:
//!
//! - Geometry queries the observer can evaluate itself from a viewport
//!   (`min-width`, `max-width`, `min-height`, `max-height`,
//!   `orientation`), re-checked on every [`apply_viewport`].
//! - Opaque platform queries (dark mode, pointer type, whatever the
//!   host exposes) driven externally through [`set_matches`].
//!
//! Query strings use the CSS condition syntax, e.g.
//! `(min-width: 768px)` or `(orientation: landscape)`.
//!
//! [`apply_viewport`]: MediaQueryObserver::apply_viewport
//! [`set_matches`]: MediaQueryObserver::set_matches

use std::panic::{AssertUnwindSafe, catch_unwind};

use rustc_hash::FxHashMap;
use tracing::error;

use dimscale_core::geometry::{Orientation, Viewport};

/// The fixed display conditions every host is expected to report.
///
/// Each maps to a canonical query string, so platform glue can drive
/// them through [`MediaQueryObserver::set_matches`] with the same
/// strings consumers subscribe with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaFeature {
    DarkColorScheme,
    ReducedMotion,
    Hover,
    FinePointer,
    CoarsePointer,
    PortraitOrientation,
    StandaloneDisplay,
}

impl MediaFeature {
    pub const ALL: [MediaFeature; 7] = [
        MediaFeature::DarkColorScheme,
        MediaFeature::ReducedMotion,
        MediaFeature::Hover,
        MediaFeature::FinePointer,
        MediaFeature::CoarsePointer,
        MediaFeature::PortraitOrientation,
        MediaFeature::StandaloneDisplay,
    ];

    /// The canonical condition string for this feature.
    #[must_use]
    pub const fn query(self) -> &'static str {
        match self {
            MediaFeature::DarkColorScheme => "(prefers-color-scheme: dark)",
            MediaFeature::ReducedMotion => "(prefers-reduced-motion: reduce)",
            MediaFeature::Hover => "(hover: hover)",
            MediaFeature::FinePointer => "(pointer: fine)",
            MediaFeature::CoarsePointer => "(pointer: coarse)",
            MediaFeature::PortraitOrientation => "(orientation: portrait)",
            MediaFeature::StandaloneDisplay => "(display-mode: standalone)",
        }
    }
}

/// Handle for removing a media-query subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryToken(u64);

type MatchCallback = Box<dyn FnMut(bool)>;

struct QuerySlot {
    matches: bool,
    subscribers: Vec<(QueryToken, MatchCallback)>,
}

/// Tracks boolean display conditions and their subscribers.
#[derive(Default)]
pub struct MediaQueryObserver {
    queries: FxHashMap<String, QuerySlot>,
    next_token: u64,
}

impl MediaQueryObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `query` currently matches. Unregistered queries do not
    /// match.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        self.queries.get(query).is_some_and(|slot| slot.matches)
    }

    /// Subscribe to `query`, receiving the current state immediately and
    /// every subsequent flip. Registers the query if new, initialized to
    /// non-matching until geometry or the platform says otherwise.
    pub fn subscribe(&mut self, query: &str, mut callback: impl FnMut(bool) + 'static) -> QueryToken {
        let token = QueryToken(self.next_token);
        self.next_token += 1;

        let slot = self
            .queries
            .entry(query.to_owned())
            .or_insert_with(|| QuerySlot {
                matches: false,
                subscribers: Vec::new(),
            });
        Self::invoke(&mut callback, slot.matches);
        slot.subscribers.push((token, Box::new(callback)));
        token
    }

    /// Remove a subscription. Unknown tokens are a no-op. A query with
    /// no remaining subscribers keeps its state for [`matches`] callers.
    ///
    /// [`matches`]: MediaQueryObserver::matches
    pub fn unsubscribe(&mut self, token: QueryToken) {
        for slot in self.queries.values_mut() {
            slot.subscribers.retain(|(t, _)| *t != token);
        }
    }

    /// Set a query's state from the platform. Notifies subscribers only
    /// when the state actually flips.
    pub fn set_matches(&mut self, query: &str, matches: bool) {
        let slot = self
            .queries
            .entry(query.to_owned())
            .or_insert_with(|| QuerySlot {
                matches: false,
                subscribers: Vec::new(),
            });
        if slot.matches == matches {
            return;
        }
        slot.matches = matches;
        for (_, callback) in &mut slot.subscribers {
            Self::invoke(callback, matches);
        }
    }

    /// Current state of every fixed feature, in [`MediaFeature::ALL`]
    /// order.
    #[must_use]
    pub fn features(&self) -> [(MediaFeature, bool); 7] {
        MediaFeature::ALL.map(|feature| (feature, self.matches(feature.query())))
    }

    /// Shorthand for `matches` on a fixed feature's canonical query.
    #[must_use]
    pub fn feature(&self, feature: MediaFeature) -> bool {
        self.matches(feature.query())
    }

    /// Re-evaluate every geometry query against `viewport`. Queries the
    /// evaluator does not understand are left to the platform.
    pub fn apply_viewport(&mut self, viewport: &Viewport) {
        let updates: Vec<(String, bool)> = self
            .queries
            .keys()
            .filter_map(|query| {
                evaluate_geometry_query(query, viewport).map(|m| (query.clone(), m))
            })
            .collect();
        for (query, matches) in updates {
            self.set_matches(&query, matches);
        }
    }

    fn invoke(callback: &mut dyn FnMut(bool), matches: bool) {
        if catch_unwind(AssertUnwindSafe(|| callback(matches))).is_err() {
            error!("media query subscriber panicked; skipping");
        }
    }
}

impl std::fmt::Debug for MediaQueryObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaQueryObserver")
            .field("queries", &self.queries.len())
            .finish()
    }
}

/// Evaluate a CSS-style geometry condition against a viewport.
///
/// Returns `None` for conditions this crate cannot decide from geometry
/// alone (color scheme, pointer, malformed input).
#[must_use]
pub fn evaluate_geometry_query(query: &str, viewport: &Viewport) -> Option<bool> {
    let inner = query.trim().strip_prefix('(')?.strip_suffix(')')?;
    let (feature, value) = inner.split_once(':')?;
    let feature = feature.trim();
    let value = value.trim();

    match feature {
        "orientation" => {
            let wanted = match value {
                "portrait" => Orientation::Portrait,
                "landscape" => Orientation::Landscape,
                _ => return None,
            };
            Some(viewport.orientation() == wanted)
        }
        "min-width" => Some(viewport.width >= parse_px(value)?),
        "max-width" => Some(viewport.width <= parse_px(value)?),
        "min-height" => Some(viewport.height >= parse_px(value)?),
        "max-height" => Some(viewport.height <= parse_px(value)?),
        _ => None,
    }
}

fn parse_px(value: &str) -> Option<f64> {
    value.strip_suffix("px").unwrap_or(value).trim().parse().ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
