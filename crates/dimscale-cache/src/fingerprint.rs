//! Dependency fingerprints.
//!
//! A [`DependencyKey`] identifies one input a cached value was computed
//! from: the value's type name plus a content hash. Two keys are equal
//! exactly when the type matches and the content hashed equal, so a
//! changed dependency shows up as a fingerprint mismatch without keeping
//! the value itself alive.
//!
//! Floats hash by bit pattern (the same convention the layout cache uses
//! for constraint fingerprints), so `-0.0` and `0.0` are distinct and NaN
//! is stable.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use dimscale_core::geometry::Viewport;

/// One dependency of a cached computation: type name + content hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DependencyKey {
    /// The dependency value's type name.
    pub kind: &'static str,
    /// Content hash of the value.
    pub hash: u64,
}

impl DependencyKey {
    /// Fingerprint any hashable dependency value.
    #[must_use]
    pub fn of<T: AsDependency + ?Sized>(value: &T) -> Self {
        let mut hasher = FxHasher::default();
        value.dependency_hash(&mut hasher);
        Self {
            kind: value.dependency_kind(),
            hash: hasher.finish(),
        }
    }

    /// Build a key from a precomputed content hash.
    ///
    /// For values fingerprinted elsewhere (e.g. strategy fingerprints).
    #[must_use]
    pub const fn raw(kind: &'static str, hash: u64) -> Self {
        Self { kind, hash }
    }
}

/// Values that can participate in a dependency fingerprint.
pub trait AsDependency {
    /// Stable type label for the fingerprint.
    fn dependency_kind(&self) -> &'static str;
    /// Feed the value's content into the hasher.
    fn dependency_hash(&self, hasher: &mut FxHasher);
}

impl AsDependency for f64 {
    fn dependency_kind(&self) -> &'static str {
        "f64"
    }
    fn dependency_hash(&self, hasher: &mut FxHasher) {
        self.to_bits().hash(hasher);
    }
}

impl AsDependency for u64 {
    fn dependency_kind(&self) -> &'static str {
        "u64"
    }
    fn dependency_hash(&self, hasher: &mut FxHasher) {
        self.hash(hasher);
    }
}

impl AsDependency for bool {
    fn dependency_kind(&self) -> &'static str {
        "bool"
    }
    fn dependency_hash(&self, hasher: &mut FxHasher) {
        self.hash(hasher);
    }
}

impl AsDependency for str {
    fn dependency_kind(&self) -> &'static str {
        "str"
    }
    fn dependency_hash(&self, hasher: &mut FxHasher) {
        self.hash(hasher);
    }
}

impl AsDependency for Viewport {
    fn dependency_kind(&self) -> &'static str {
        "viewport"
    }
    fn dependency_hash(&self, hasher: &mut FxHasher) {
        self.width.to_bits().hash(hasher);
        self.height.to_bits().hash(hasher);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_values_fingerprint_equal() {
        assert_eq!(DependencyKey::of(&16.0f64), DependencyKey::of(&16.0f64));
        assert_eq!(DependencyKey::of("abc"), DependencyKey::of("abc"));
    }

    #[test]
    fn different_values_fingerprint_different() {
        assert_ne!(DependencyKey::of(&16.0f64), DependencyKey::of(&16.5f64));
        assert_ne!(
            DependencyKey::of(&Viewport::new(375.0, 667.0)),
            DependencyKey::of(&Viewport::new(667.0, 375.0))
        );
    }

    #[test]
    fn kind_disambiguates_same_bits() {
        // u64 1 and bool-ish content must not collide across types.
        let a = DependencyKey::of(&1u64);
        let b = DependencyKey::of(&true);
        assert_ne!(a.kind, b.kind);
    }

    #[test]
    fn negative_zero_is_distinct() {
        assert_ne!(DependencyKey::of(&0.0f64), DependencyKey::of(&-0.0f64));
    }

    #[test]
    fn raw_key_round_trips() {
        let key = DependencyKey::raw("strategy", 42);
        assert_eq!(key.kind, "strategy");
        assert_eq!(key.hash, 42);
    }
}
