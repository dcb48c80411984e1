//! Device classes for qualifier intersection rules.

use serde::{Deserialize, Serialize};

/// The class of device a viewport belongs to.
///
/// Mirrors the platform UI-mode taxonomy: qualifier rules can be scoped to
/// a device class, and a class-scoped rule outranks a plain one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UiMode {
    /// Phone or tablet.
    #[default]
    Normal,
    /// Television.
    Television,
    /// Car head unit.
    Car,
    /// Watch.
    Watch,
    /// Docked desk device.
    Desk,
    /// Projection or cast appliance.
    Appliance,
    /// VR headset.
    VrHeadset,
    /// Anything unclassified.
    Undefined,
}

impl std::fmt::Display for UiMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Normal => "normal",
            Self::Television => "television",
            Self::Car => "car",
            Self::Watch => "watch",
            Self::Desk => "desk",
            Self::Appliance => "appliance",
            Self::VrHeadset => "vr-headset",
            Self::Undefined => "undefined",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_normal() {
        assert_eq!(UiMode::default(), UiMode::Normal);
    }

    #[test]
    fn display_names() {
        assert_eq!(UiMode::Television.to_string(), "television");
        assert_eq!(UiMode::VrHeadset.to_string(), "vr-headset");
    }
}
