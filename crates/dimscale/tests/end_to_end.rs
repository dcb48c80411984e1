//! Whole-pipeline tests: observer to builder to calculator to cache.

use proptest::prelude::*;
use web_time::{Duration, Instant};

use dimscale::prelude::*;
use dimscale::{MediaFeature, MediaQueryObserver, ViewportObserver};
use std::cell::RefCell;
use std::rc::Rc;

fn iphone_reference() -> DimensConfig {
    DimensConfig {
        reference: Viewport::new(375.0, 667.0),
        ..DimensConfig::default()
    }
}

#[test]
fn balanced_is_identity_at_reference_phone() {
    let engine = Dimens::new(iphone_reference());
    let screen = ScreenContext::new(Viewport::new(375.0, 667.0), UiMode::Normal);
    let value = engine.dim(16.0).unwrap().balanced().calculate(&screen);
    assert_eq!(value, 16.0);
}

#[test]
fn logarithmic_doubling_matches_weber_fechner() {
    let engine = Dimens::new(iphone_reference());
    let screen = ScreenContext::new(Viewport::new(750.0, 1334.0), UiMode::Normal);
    let value = engine.dim(16.0).unwrap().logarithmic().calculate(&screen);
    let expected = 16.0 * (1.0 + 0.08 * 2.0f64.ln());
    assert!((value - expected).abs() < 1e-9, "{value} != {expected}");
    assert!((value - 16.887).abs() < 1e-3);
}

#[test]
fn debounced_resize_feeds_the_engine_once() {
    let engine = Dimens::new(iphone_reference());
    let mut observer = ViewportObserver::new();
    let start = Instant::now();

    let notifications = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&notifications);
    observer.subscribe(move |change| {
        if change.previous != change.current {
            *counter.borrow_mut() += 1;
        }
    });

    // Two resizes inside one debounce window coalesce to the last.
    observer.resize(Viewport::new(500.0, 900.0), start);
    observer.resize(Viewport::new(800.0, 1280.0), start + Duration::from_millis(40));
    observer.poll(start + Duration::from_millis(40 + 100));

    assert_eq!(*notifications.borrow(), 1);
    let screen = ScreenContext::new(observer.current(), UiMode::Normal);
    assert_eq!(screen.viewport, Viewport::new(800.0, 1280.0));

    let value = engine.dim(100.0).unwrap().percentage().calculate(&screen);
    assert!((value - 100.0 * 800.0 / 375.0).abs() < 1e-9);
}

#[test]
fn viewport_invalidation_drops_dependent_entries() {
    let engine = Dimens::new(iphone_reference());
    let old = Viewport::new(375.0, 667.0);
    let screen = ScreenContext::new(old, UiMode::Normal);

    let builder = engine.dim(16.0).unwrap().balanced();
    builder.calculate(&screen);
    assert_eq!(engine.cache_stats().total_entries, 1);

    engine.invalidate_viewport(&old);
    assert_eq!(engine.cache_stats().total_entries, 0);

    // Recompute repopulates.
    builder.calculate(&screen);
    assert_eq!(engine.cache_stats().total_entries, 1);
}

#[test]
fn engine_cache_toggle_is_a_pass_through() {
    let mut engine = Dimens::new(iphone_reference());
    engine.set_cache_enabled(false);
    let screen = ScreenContext::new(Viewport::new(720.0, 1280.0), UiMode::Normal);

    let builder = engine.dim(16.0).unwrap().balanced();
    builder.calculate(&screen);
    builder.calculate(&screen);
    assert_eq!(engine.cache_stats().total_entries, 0);
    assert_eq!(engine.cache_stats().hits, 0);
}

#[test]
fn tv_layout_combines_mode_qualifier_and_clamp() {
    let engine = Dimens::new(iphone_reference());
    let tv = ScreenContext::new(Viewport::new(1920.0, 1080.0), UiMode::Television);

    let value = engine
        .dim(16.0)
        .unwrap()
        .logarithmic()
        .ui_mode_screen(UiMode::Television, DpQualifier::Width, 1280.0, 28.0)
        .max(40.0)
        .calculate(&tv);

    // Base swapped to 28 by the TV rule, then scaled logarithmically on
    // the lowest axis (1080 vs 375) and capped.
    let expected = (28.0 * (1.0 + 0.08 * (1080.0f64 / 375.0).ln())).min(40.0);
    assert!((value - expected).abs() < 1e-9);
}

#[test]
fn media_queries_track_the_settled_viewport() {
    let mut viewport_observer = ViewportObserver::new();
    let mut media = MediaQueryObserver::new();
    media.subscribe(MediaFeature::PortraitOrientation.query(), |_| {});
    media.subscribe("(min-width: 768px)", |_| {});

    let start = Instant::now();
    viewport_observer.resize(Viewport::new(1024.0, 768.0), start);
    viewport_observer.poll(start + Duration::from_millis(100));
    media.apply_viewport(&viewport_observer.current());

    assert!(!media.feature(MediaFeature::PortraitOrientation));
    assert!(media.matches("(min-width: 768px)"));
}

#[test]
fn config_round_trips_through_json() {
    let config = iphone_reference();
    let json = serde_json::to_string(&config).unwrap();
    let back: DimensConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

proptest! {
    /// Clamps hold for any screen the builder is asked about.
    #[test]
    fn clamps_bound_results_for_any_screen(w in 50.0f64..4000.0, h in 50.0f64..4000.0) {
        let engine = Dimens::new(iphone_reference());
        let screen = ScreenContext::new(Viewport::new(w, h), UiMode::Normal);
        let value = engine
            .dim(16.0)
            .unwrap()
            .percentage()
            .min(8.0)
            .max(64.0)
            .calculate(&screen);
        prop_assert!((8.0..=64.0).contains(&value));
    }

    /// Memoization never changes the answer: cached and uncached paths
    /// agree for any viewport.
    #[test]
    fn cached_and_uncached_results_agree(w in 50.0f64..4000.0, h in 50.0f64..4000.0) {
        let engine = Dimens::new(iphone_reference());
        let screen = ScreenContext::new(Viewport::new(w, h), UiMode::Normal);
        let cached = engine.dim(16.0).unwrap().balanced().calculate(&screen);
        let uncached = engine.dim(16.0).unwrap().balanced().cache(false).calculate(&screen);
        prop_assert_eq!(cached, uncached);
    }
}

#[test]
fn game_hud_letterboxes_on_wide_screens() {
    let engine = Dimens::new(iphone_reference());
    let wide = ScreenContext::new(Viewport::new(1334.0, 667.0), UiMode::Normal);

    let hud = engine
        .dim(48.0)
        .unwrap()
        .for_element(ElementType::GameUi)
        .calculate(&wide);
    // Fit uses the limiting ratio: min(1334/375, 667/667) with the
    // orientation-stable pairing (smallest/smallest, largest/largest).
    assert!((hud - 48.0 * (667.0_f64 / 375.0).min(1334.0 / 667.0)).abs() < 1e-9);
}
