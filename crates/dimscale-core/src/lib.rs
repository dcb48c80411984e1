#![forbid(unsafe_code)]

//! Core value types for the dimscale engine.
//!
//! Everything here is a plain immutable value: viewport snapshots, the
//! orientation/axis model used by the calculator, breakpoint tables, device
//! classes, and the shared constants the rest of the workspace builds on.
//! No I/O, no platform bindings.

pub mod breakpoints;
pub mod constants;
pub mod device;
pub mod error;
pub mod geometry;
pub mod orientation;

pub use breakpoints::{Breakpoint, Breakpoints};
pub use device::UiMode;
pub use error::{DimensError, Result};
pub use geometry::{Orientation, Viewport};
pub use orientation::{BaseOrientation, ScreenAxis, resolve_axis};
