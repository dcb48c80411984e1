#![forbid(unsafe_code)]

//! Scaling-strategy calculator for dimscale.
//!
//! Thirteen interchangeable strategies mapping a base design value plus
//! the current viewport to a rendered value, and a deterministic
//! element-type inference table for picking a sensible default. All
//! computation here is pure; caching and observation live in sibling
//! crates.

pub mod calculator;
pub mod inference;
pub mod strategy;

pub use calculator::compute;
pub use inference::{ElementType, infer_strategy};
pub use strategy::{
    AutosizeParams, DefaultParams, FluidParams, PerceptualParams, PowerParams, ScalingStrategy,
};
