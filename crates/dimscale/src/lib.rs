#![forbid(unsafe_code)]

//! Responsive dimension scaling.
//!
//! dimscale maps base design values (lengths, font sizes) to the current
//! screen through thirteen interchangeable scaling strategies, with
//! element-type inference, resource-style screen qualifiers, memoization,
//! and debounced viewport observation.
//!
//! # Usage
//!
//! ```
//! use dimscale::prelude::*;
//!
//! let engine = Dimens::default();
//! let screen = ScreenContext::new(Viewport::new(720.0, 1280.0), UiMode::Normal);
//!
//! let padding = engine
//!     .dim(16.0)?
//!     .for_element(ElementType::Spacing)
//!     .screen(DpQualifier::SmallWidth, 600.0, 24.0)
//!     .max(32.0)
//!     .calculate(&screen);
//! assert!(padding > 16.0);
//! # Ok::<(), dimscale::DimensError>(())
//! ```

pub mod builder;
pub mod config;
pub mod qualifier;

pub use builder::DimensionBuilder;
pub use config::{Dimens, DimensConfig, ScreenContext};
pub use qualifier::{DpQualifier, QualifierRule, resolve_override};

pub use dimscale_calc::{
    AutosizeParams, DefaultParams, ElementType, FluidParams, PerceptualParams, PowerParams,
    ScalingStrategy, compute, infer_strategy,
};
pub use dimscale_cache::{CacheStats, DependencyKey, DimensCache, SharedDimensCache};
pub use dimscale_core::breakpoints::{Breakpoint, Breakpoints};
pub use dimscale_core::device::UiMode;
pub use dimscale_core::error::{DimensError, Result};
pub use dimscale_core::geometry::{Orientation, Viewport};
pub use dimscale_core::orientation::{BaseOrientation, ScreenAxis, resolve_axis};
pub use dimscale_observe::{
    MediaFeature, MediaQueryObserver, ViewportChange, ViewportObserver,
};

/// The names most consumers want in scope.
pub mod prelude {
    pub use crate::builder::DimensionBuilder;
    pub use crate::config::{Dimens, DimensConfig, ScreenContext};
    pub use crate::qualifier::DpQualifier;
    pub use dimscale_calc::{ElementType, ScalingStrategy};
    pub use dimscale_core::device::UiMode;
    pub use dimscale_core::geometry::{Orientation, Viewport};
    pub use dimscale_core::orientation::{BaseOrientation, ScreenAxis};
}
