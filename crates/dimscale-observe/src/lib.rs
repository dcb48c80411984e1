#![forbid(unsafe_code)]

//! Viewport and media-query observation for dimscale.
//!
//! Poll-driven, timer-free primitives connecting a platform's resize and
//! display-condition events to the scaling layer: a debouncing
//! [`ViewportObserver`] that coalesces resize bursts into settled
//! changes, and a [`MediaQueryObserver`] tracking boolean display
//! conditions in CSS condition syntax.

pub mod media_query;
pub mod viewport;

pub use media_query::{MediaFeature, MediaQueryObserver, QueryToken, evaluate_geometry_query};
pub use viewport::{SubscriptionToken, ViewportChange, ViewportObserver};
