//! Error taxonomy for the dimscale workspace.
//!
//! Hot-path calculation never errors; out-of-range numeric inputs are
//! clamped or guarded where they occur. Errors surface only at API edges:
//! constructing a builder from a non-finite base value, or registering an
//! unsupported qualifier.

use thiserror::Error;

/// Workspace-wide result alias.
pub type Result<T> = std::result::Result<T, DimensError>;

/// Errors surfaced by the dimscale public API.
#[derive(Debug, Error, PartialEq)]
pub enum DimensError {
    /// A base value or configuration input was not a finite number.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// A qualifier rule referenced an unsupported qualifier type.
    ///
    /// Unreachable through the typed API; kept for consumers that parse
    /// qualifier rules from configuration.
    #[error("unknown qualifier: {name}")]
    UnknownQualifier { name: String },

    /// An observer was consulted before any geometry snapshot existed.
    ///
    /// Callers normally never see this: observers substitute the fallback
    /// geometry instead of propagating it.
    #[error("no geometry snapshot available yet")]
    MissingGeometry,
}

impl DimensError {
    /// Shorthand for an [`DimensError::InvalidInput`].
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_constructor_preserves_message() {
        let err = DimensError::invalid("base value must be finite");
        assert_eq!(err.to_string(), "invalid input: base value must be finite");
    }

    #[test]
    fn display_formats() {
        let err = DimensError::UnknownQualifier {
            name: "smallest-depth".into(),
        };
        assert_eq!(err.to_string(), "unknown qualifier: smallest-depth");
        assert_eq!(DimensError::MissingGeometry.to_string(), "no geometry snapshot available yet");
    }
}
