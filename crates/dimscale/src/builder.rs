//! The fluent dimension builder.
//!
//! A [`DimensionBuilder`] is a transient configuration object: chain
//! strategy selection, qualifier overrides, orientation, and clamps,
//! then call [`calculate`] with the current screen to get the value.
//! Builders are cheap and never retained past the compute call; the
//! engine they borrow from owns all shared state.
//!
//! Strategy precedence: an explicit strategy always wins, regardless of
//! call order; otherwise an element type picks one through inference;
//! otherwise the default strategy applies. `calculate` is idempotent and
//! never fails: numeric edge cases resolve through the calculator's
//! guards, not errors.
//!
//! [`calculate`]: DimensionBuilder::calculate

use web_time::Instant;

use dimscale_cache::DependencyKey;
use dimscale_calc::strategy::{AutosizeParams, FluidParams, PerceptualParams, PowerParams};
use dimscale_calc::{ElementType, ScalingStrategy, compute, infer_strategy};
use dimscale_core::device::UiMode;
use dimscale_core::orientation::{BaseOrientation, ScreenAxis};

use crate::config::{Dimens, ScreenContext};
use crate::qualifier::{DpQualifier, QualifierRule, resolve_override};

/// Fluent configuration for one dimension value.
#[derive(Debug, Clone)]
pub struct DimensionBuilder<'a> {
    engine: &'a Dimens,
    base: f64,
    strategy: Option<ScalingStrategy>,
    element: Option<ElementType>,
    rules: Vec<QualifierRule>,
    base_orientation: BaseOrientation,
    axis: ScreenAxis,
    min: Option<f64>,
    max: Option<f64>,
    use_cache: bool,
}

impl<'a> DimensionBuilder<'a> {
    pub(crate) fn new(engine: &'a Dimens, base: f64) -> Self {
        Self {
            engine,
            base,
            strategy: None,
            element: None,
            rules: Vec::new(),
            base_orientation: BaseOrientation::Auto,
            axis: ScreenAxis::Lowest,
            min: None,
            max: None,
            use_cache: true,
        }
    }

    // --- strategy selection ------------------------------------------------

    /// Set the strategy explicitly; the last call wins and overrides any
    /// element-type inference.
    #[must_use]
    pub fn strategy(mut self, strategy: ScalingStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Infer the strategy from a semantic element type, unless an
    /// explicit strategy is (or later gets) set.
    #[must_use]
    pub fn for_element(mut self, element: ElementType) -> Self {
        self.element = Some(element);
        self
    }

    #[must_use]
    pub fn balanced(self) -> Self {
        self.strategy(ScalingStrategy::Balanced(PerceptualParams::default()))
    }

    #[must_use]
    pub fn logarithmic(self) -> Self {
        self.strategy(ScalingStrategy::Logarithmic(PerceptualParams::default()))
    }

    #[must_use]
    pub fn power(self, exponent: f64) -> Self {
        self.strategy(ScalingStrategy::Power(PowerParams { exponent }))
    }

    #[must_use]
    pub fn fluid(self, min_value: f64, max_value: f64) -> Self {
        self.strategy(ScalingStrategy::Fluid(FluidParams::new(min_value, max_value)))
    }

    #[must_use]
    pub fn percentage(self) -> Self {
        self.strategy(ScalingStrategy::Percentage)
    }

    #[must_use]
    pub fn interpolated(self) -> Self {
        self.strategy(ScalingStrategy::Interpolated)
    }

    #[must_use]
    pub fn diagonal(self) -> Self {
        self.strategy(ScalingStrategy::Diagonal)
    }

    #[must_use]
    pub fn perimeter(self) -> Self {
        self.strategy(ScalingStrategy::Perimeter)
    }

    #[must_use]
    pub fn fit(self) -> Self {
        self.strategy(ScalingStrategy::Fit)
    }

    #[must_use]
    pub fn fill(self) -> Self {
        self.strategy(ScalingStrategy::Fill)
    }

    #[must_use]
    pub fn autosize(self, min_value: f64, max_value: f64) -> Self {
        self.strategy(ScalingStrategy::Autosize(AutosizeParams::new(
            min_value, max_value,
        )))
    }

    /// Snap to the largest preset that fits the screen.
    #[must_use]
    pub fn autosize_presets(self, presets: Vec<f64>) -> Self {
        self.strategy(ScalingStrategy::Autosize(AutosizeParams::presets(presets)))
    }

    /// Use the base value verbatim on every screen.
    #[must_use]
    pub fn none(self) -> Self {
        self.strategy(ScalingStrategy::None)
    }

    // --- qualifiers and context --------------------------------------------

    /// Override the base value when a screen measurement reaches
    /// `threshold` dp. Later rules do not shadow earlier ones; the
    /// ranked match picks the most specific applicable rule.
    #[must_use]
    pub fn screen(mut self, qualifier: DpQualifier, threshold: f64, value: f64) -> Self {
        self.rules.push(QualifierRule {
            ui_mode: None,
            qualifier,
            threshold,
            value,
        });
        self
    }

    /// Like [`screen`](Self::screen), restricted to one UI mode.
    /// Intersection rules outrank plain ones when the mode matches.
    #[must_use]
    pub fn ui_mode_screen(
        mut self,
        ui_mode: UiMode,
        qualifier: DpQualifier,
        threshold: f64,
        value: f64,
    ) -> Self {
        self.rules.push(QualifierRule {
            ui_mode: Some(ui_mode),
            qualifier,
            threshold,
            value,
        });
        self
    }

    /// Declare the orientation the base value was designed for. `Auto`
    /// (the default) never inverts axes.
    #[must_use]
    pub fn base_orientation(mut self, orientation: BaseOrientation) -> Self {
        self.base_orientation = orientation;
        self
    }

    /// Which screen dimension single-axis strategies read.
    #[must_use]
    pub fn axis(mut self, axis: ScreenAxis) -> Self {
        self.axis = axis;
        self
    }

    /// Floor for the computed value.
    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Ceiling for the computed value.
    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Per-instance memoization opt-out, independent of the engine
    /// toggle.
    #[must_use]
    pub fn cache(mut self, enabled: bool) -> Self {
        self.use_cache = enabled;
        self
    }

    // --- computation -------------------------------------------------------

    /// Compute the final value for the given screen. Idempotent: the
    /// same builder and context always produce the same result.
    #[must_use]
    pub fn calculate(&self, context: &ScreenContext) -> f64 {
        let strategy = self
            .strategy
            .clone()
            .or_else(|| self.element.map(infer_strategy))
            .unwrap_or_default();

        let base = resolve_override(
            &self.rules,
            &context.viewport,
            context.ui_mode,
            self.base_orientation,
        )
        .unwrap_or(self.base);

        let reference = self.engine.config().reference;
        let run = || {
            let value = compute(
                base,
                &strategy,
                &context.viewport,
                &reference,
                self.axis,
                self.base_orientation,
            );
            self.clamp(value)
        };

        if !self.use_cache {
            return run();
        }

        let fingerprint = strategy.fingerprint();
        let key = self.cache_key(base, fingerprint);
        let deps = [
            DependencyKey::of(&context.viewport),
            DependencyKey::raw("strategy", fingerprint),
            DependencyKey::of(&base),
        ];
        self.engine.cache().with(|cache| {
            cache.maybe_sweep(Instant::now());
            cache.remember(&key, &deps, run)
        })
    }

    fn clamp(&self, value: f64) -> f64 {
        let mut value = value;
        if let Some(min) = self.min {
            value = value.max(min);
        }
        if let Some(max) = self.max {
            value = value.min(max);
        }
        value
    }

    fn cache_key(&self, base: f64, fingerprint: u64) -> String {
        format!(
            "dim:{:x}:{:x}:{:?}:{:?}:{:x}:{:x}",
            base.to_bits(),
            fingerprint,
            self.axis,
            self.base_orientation,
            self.min.unwrap_or(f64::NEG_INFINITY).to_bits(),
            self.max.unwrap_or(f64::INFINITY).to_bits(),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
