//! Debounced viewport observation.
//!
//! [`ViewportObserver`] sits between the platform's resize events and the
//! scaling layer. Resize bursts are coalesced: each [`resize`] records
//! the latest geometry and arms a deadline, and the change is applied and
//! broadcast only once [`poll`] runs after the deadline with no newer
//! resize having re-armed it. Subscribers therefore see one notification
//! per settled gesture, not one per intermediate frame.
//!
//! The observer is poll-driven and owns no thread or timer; the host
//! calls [`poll`] from its event loop (or its test clock). The current
//! settled viewport is also published through a lock-free snapshot handle
//! so hot paths can read it without going through the observer.
//!
//! # Invariants
//!
//! - Latest-wins: only the most recent pending geometry is ever applied.
//! - Subscribers are notified in subscription order.
//! - A resize to the already-current geometry notifies nobody.
//! - A panicking subscriber is logged and skipped; the remaining
//!   subscribers still run.
//!
//! [`resize`]: ViewportObserver::resize
//! [`poll`]: ViewportObserver::poll

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, error};
use web_time::{Duration, Instant};

use dimscale_core::constants::{DEBOUNCE_MS, FALLBACK_VIEWPORT};
use dimscale_core::geometry::{Orientation, Viewport};

/// A settled viewport change delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportChange {
    /// Geometry before the change.
    pub previous: Viewport,
    /// Geometry after the change.
    pub current: Viewport,
    /// Whether the orientation flipped with this change.
    pub orientation_changed: bool,
}

/// Handle returned by [`ViewportObserver::subscribe`]; pass it back to
/// [`ViewportObserver::unsubscribe`] to stop receiving changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

type ChangeCallback = Box<dyn FnMut(&ViewportChange)>;

struct Pending {
    viewport: Viewport,
    deadline: Instant,
}

/// Coalescing observer over platform resize events.
pub struct ViewportObserver {
    current: Viewport,
    snapshot: Arc<ArcSwap<Viewport>>,
    pending: Option<Pending>,
    debounce: Duration,
    subscribers: Vec<(SubscriptionToken, ChangeCallback)>,
    next_token: u64,
}

impl ViewportObserver {
    /// Observer starting at the fallback viewport with the default
    /// debounce window.
    #[must_use]
    pub fn new() -> Self {
        Self::with_debounce(Duration::from_millis(DEBOUNCE_MS))
    }

    /// Observer with an explicit debounce window.
    #[must_use]
    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            current: FALLBACK_VIEWPORT,
            snapshot: Arc::new(ArcSwap::from_pointee(FALLBACK_VIEWPORT)),
            pending: None,
            debounce,
            subscribers: Vec::new(),
            next_token: 0,
        }
    }

    /// The last settled viewport.
    #[must_use]
    pub fn current(&self) -> Viewport {
        self.current
    }

    /// Lock-free handle to the settled viewport, for readers that must
    /// not borrow the observer.
    #[must_use]
    pub fn snapshot_handle(&self) -> Arc<ArcSwap<Viewport>> {
        Arc::clone(&self.snapshot)
    }

    /// Record a platform resize. The geometry is not applied until the
    /// debounce window elapses without a newer resize.
    pub fn resize(&mut self, viewport: Viewport, now: Instant) {
        self.pending = Some(Pending {
            viewport,
            deadline: now + self.debounce,
        });
    }

    /// Apply a matured pending resize, if any, and notify subscribers.
    ///
    /// Returns the change that was applied, or `None` when nothing was
    /// pending, the deadline has not passed, or the pending geometry
    /// equals the current one.
    pub fn poll(&mut self, now: Instant) -> Option<ViewportChange> {
        let matured = match &self.pending {
            Some(pending) if now >= pending.deadline => true,
            _ => false,
        };
        if !matured {
            return None;
        }
        let pending = self.pending.take()?;
        if pending.viewport == self.current {
            return None;
        }

        let change = ViewportChange {
            previous: self.current,
            current: pending.viewport,
            orientation_changed: self.current.orientation() != pending.viewport.orientation(),
        };
        self.current = pending.viewport;
        self.snapshot.store(Arc::new(pending.viewport));
        debug!(
            width = change.current.width,
            height = change.current.height,
            orientation_changed = change.orientation_changed,
            "viewport settled"
        );
        self.notify(&change);
        Some(change)
    }

    /// Register a change callback. The current settled viewport is
    /// delivered immediately as a synthetic change (previous == current)
    /// so subscribers never start from stale state.
    pub fn subscribe(&mut self, mut callback: impl FnMut(&ViewportChange) + 'static) -> SubscriptionToken {
        let token = SubscriptionToken(self.next_token);
        self.next_token += 1;

        let initial = ViewportChange {
            previous: self.current,
            current: self.current,
            orientation_changed: false,
        };
        Self::invoke(&mut callback, &initial);

        self.subscribers.push((token, Box::new(callback)));
        token
    }

    /// Remove a subscriber. Unknown or already-removed tokens are a
    /// no-op.
    pub fn unsubscribe(&mut self, token: SubscriptionToken) {
        self.subscribers.retain(|(t, _)| *t != token);
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&mut self, change: &ViewportChange) {
        for (_, callback) in &mut self.subscribers {
            Self::invoke(callback, change);
        }
    }

    fn invoke(callback: &mut dyn FnMut(&ViewportChange), change: &ViewportChange) {
        if catch_unwind(AssertUnwindSafe(|| callback(change))).is_err() {
            error!("viewport subscriber panicked; skipping");
        }
    }
}

impl Default for ViewportObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ViewportObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportObserver")
            .field("current", &self.current)
            .field("pending", &self.pending.as_ref().map(|p| p.viewport))
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn vp(w: f64, h: f64) -> Viewport {
        Viewport::new(w, h)
    }

    fn after(start: Instant, ms: u64) -> Instant {
        start + Duration::from_millis(ms)
    }

    #[test]
    fn starts_at_fallback() {
        let observer = ViewportObserver::new();
        assert_eq!(observer.current(), FALLBACK_VIEWPORT);
    }

    #[test]
    fn resize_is_not_applied_before_deadline() {
        let mut observer = ViewportObserver::new();
        let start = Instant::now();
        observer.resize(vp(800.0, 600.0), start);

        assert!(observer.poll(after(start, DEBOUNCE_MS - 1)).is_none());
        assert_eq!(observer.current(), FALLBACK_VIEWPORT);

        let change = observer.poll(after(start, DEBOUNCE_MS)).unwrap();
        assert_eq!(change.current, vp(800.0, 600.0));
        assert_eq!(observer.current(), vp(800.0, 600.0));
    }

    #[test]
    fn burst_collapses_to_latest() {
        let mut observer = ViewportObserver::new();
        let start = Instant::now();
        for i in 0u64..10 {
            observer.resize(vp(400.0 + i as f64, 600.0), after(start, i * 10));
        }
        // Deadline counts from the last resize.
        assert!(observer.poll(after(start, 90 + DEBOUNCE_MS - 1)).is_none());
        let change = observer.poll(after(start, 90 + DEBOUNCE_MS)).unwrap();
        assert_eq!(change.current, vp(409.0, 600.0));
    }

    #[test]
    fn resize_to_current_geometry_is_silent() {
        let mut observer = ViewportObserver::new();
        let start = Instant::now();
        let seen = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&seen);
        observer.subscribe(move |_| *counter.borrow_mut() += 1);
        assert_eq!(*seen.borrow(), 1); // initial snapshot only

        observer.resize(observer.current(), start);
        assert!(observer.poll(after(start, DEBOUNCE_MS)).is_none());
        assert_eq!(*seen.borrow(), 1);
    }

    #[test]
    fn subscribers_notified_in_order_with_orientation_flag() {
        let mut observer = ViewportObserver::new();
        let start = Instant::now();
        let log: Rc<RefCell<Vec<(u8, bool)>>> = Rc::new(RefCell::new(Vec::new()));

        for id in 0u8..3 {
            let log = Rc::clone(&log);
            observer.subscribe(move |change| {
                if change.previous != change.current {
                    log.borrow_mut().push((id, change.orientation_changed));
                }
            });
        }

        // Fallback is portrait; 800x600 is landscape.
        observer.resize(vp(800.0, 600.0), start);
        observer.poll(after(start, DEBOUNCE_MS));
        assert_eq!(*log.borrow(), vec![(0, true), (1, true), (2, true)]);
        assert_eq!(
            observer.current().orientation(),
            Orientation::Landscape
        );
    }

    #[test]
    fn subscribe_delivers_current_snapshot_immediately() {
        let mut observer = ViewportObserver::new();
        let start = Instant::now();
        observer.resize(vp(1024.0, 768.0), start);
        observer.poll(after(start, DEBOUNCE_MS));

        let seen = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&seen);
        observer.subscribe(move |change| *slot.borrow_mut() = Some(change.current));
        assert_eq!(*seen.borrow(), Some(vp(1024.0, 768.0)));
    }

    #[test]
    fn unsubscribe_stops_delivery_and_is_idempotent() {
        let mut observer = ViewportObserver::new();
        let start = Instant::now();
        let seen = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&seen);
        let token = observer.subscribe(move |_| *counter.borrow_mut() += 1);

        observer.unsubscribe(token);
        observer.unsubscribe(token); // second removal is a no-op
        assert_eq!(observer.subscriber_count(), 0);

        observer.resize(vp(900.0, 500.0), start);
        observer.poll(after(start, DEBOUNCE_MS));
        assert_eq!(*seen.borrow(), 1); // only the initial snapshot
    }

    #[test]
    fn panicking_subscriber_does_not_starve_the_rest() {
        let mut observer = ViewportObserver::new();
        let start = Instant::now();
        observer.subscribe(|change| {
            if change.previous != change.current {
                panic!("bad subscriber");
            }
        });
        let seen = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&seen);
        observer.subscribe(move |change| {
            if change.previous != change.current {
                *counter.borrow_mut() += 1;
            }
        });

        observer.resize(vp(640.0, 480.0), start);
        observer.poll(after(start, DEBOUNCE_MS));
        assert_eq!(*seen.borrow(), 1);
    }

    proptest! {
        /// Any resize burst settles exactly once, on the last geometry.
        #[test]
        fn burst_settles_once_on_last_geometry(
            widths in proptest::collection::vec(100.0f64..2000.0, 1..20),
        ) {
            let mut observer = ViewportObserver::new();
            let start = Instant::now();
            let settled = Rc::new(RefCell::new(0));
            let counter = Rc::clone(&settled);
            observer.subscribe(move |change| {
                if change.previous != change.current {
                    *counter.borrow_mut() += 1;
                }
            });

            let mut now = start;
            for &w in &widths {
                observer.resize(vp(w, 600.0), now);
                // Inside the debounce window; nothing settles yet.
                now += Duration::from_millis(10);
                observer.poll(now);
            }
            observer.poll(now + Duration::from_millis(DEBOUNCE_MS));

            let last = widths[widths.len() - 1];
            prop_assert_eq!(observer.current(), vp(last, 600.0));
            prop_assert_eq!(*settled.borrow(), 1);
        }
    }

    #[test]
    fn snapshot_handle_tracks_settled_viewport() {
        let mut observer = ViewportObserver::new();
        let handle = observer.snapshot_handle();
        let start = Instant::now();

        observer.resize(vp(1280.0, 720.0), start);
        assert_eq!(**handle.load(), FALLBACK_VIEWPORT); // not settled yet
        observer.poll(after(start, DEBOUNCE_MS));
        assert_eq!(**handle.load(), vp(1280.0, 720.0));
    }
}
