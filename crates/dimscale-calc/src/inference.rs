//! Element-type driven strategy inference.
//!
//! A deterministic table: each semantic element type has one documented
//! default strategy. The match is exhaustive over the closed enum, so a
//! new element type cannot be added without the compiler pointing here.
//! Explicit strategies always override inference; this is only the
//! default.

use serde::{Deserialize, Serialize};

use crate::strategy::{DefaultParams, FluidParams, PerceptualParams, ScalingStrategy};

/// Semantic UI element kinds used for strategy inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    Button,
    Text,
    Icon,
    Image,
    Container,
    Card,
    Dialog,
    Fab,
    Chip,
    ListItem,
    Badge,
    Divider,
    Spacing,
    Navigation,
    Input,
    Header,
    Toolbar,
    GameUi,
}

impl ElementType {
    /// All element types, for table-driven tests.
    pub const ALL: [ElementType; 18] = [
        ElementType::Button,
        ElementType::Text,
        ElementType::Icon,
        ElementType::Image,
        ElementType::Container,
        ElementType::Card,
        ElementType::Dialog,
        ElementType::Fab,
        ElementType::Chip,
        ElementType::ListItem,
        ElementType::Badge,
        ElementType::Divider,
        ElementType::Spacing,
        ElementType::Navigation,
        ElementType::Input,
        ElementType::Header,
        ElementType::Toolbar,
        ElementType::GameUi,
    ];
}

/// The recommended strategy for an element type.
///
/// Touch targets scale balanced so they stay tappable without ballooning
/// on tablets; typography is fluid within readable bounds; proportional
/// surfaces (images, containers, cards) track the viewport linearly;
/// dividers do not scale at all; game HUDs letterbox.
#[must_use]
pub fn infer_strategy(element: ElementType) -> ScalingStrategy {
    match element {
        ElementType::Button
        | ElementType::Chip
        | ElementType::Fab
        | ElementType::ListItem
        | ElementType::Input
        | ElementType::Navigation
        | ElementType::Toolbar
        | ElementType::Spacing => ScalingStrategy::Balanced(PerceptualParams::default()),

        ElementType::Text => ScalingStrategy::Fluid(FluidParams::new(12.0, 24.0)),
        ElementType::Header => ScalingStrategy::Fluid(FluidParams::new(18.0, 34.0)),

        ElementType::Icon | ElementType::Badge => {
            ScalingStrategy::Default(DefaultParams::default())
        }

        ElementType::Image
        | ElementType::Container
        | ElementType::Card
        | ElementType::Dialog => ScalingStrategy::Percentage,

        ElementType::Divider => ScalingStrategy::None,
        ElementType::GameUi => ScalingStrategy::Fit,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
