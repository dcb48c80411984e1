#![forbid(unsafe_code)]

//! Dependency-fingerprinted memoization for dimscale.
//!
//! Computed dimension values are cached under string keys and
//! revalidated against a fingerprint of their inputs, so a viewport or
//! strategy change invalidates exactly the entries that depended on it.
//! Bounded capacity with scored eviction keeps the table small under
//! churn.

pub mod fingerprint;
pub mod shared;
pub mod store;

pub use fingerprint::{AsDependency, DependencyKey};
pub use shared::SharedDimensCache;
pub use store::{CacheStats, DimensCache};
