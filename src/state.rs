//! Observable pricing state behind the slider
//!
//! `PricingStore` owns the slider position and plan, derives the event volume
//! and cost from them, and notifies subscribers after every action.

use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::curve::VolumeCurve;
use crate::error::AppError;
use crate::pricing::{CostCalculator, PricingPlan, Quote};

/// Event volume shown before the slider is first moved
pub const INITIAL_EVENT_NUMBER: u64 = 10_000;
/// Additional unit price shown before a self-hosted quote has been computed
pub const INITIAL_ADDITIONAL_UNIT_PRICE: f64 = 0.000225;

/// Everything the pricing widget renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingSnapshot {
    pub slider_value: f64,
    pub event_number: u64,
    pub pricing_option: PricingPlan,
    pub additional_unit_price: f64,
    pub final_cost: Quote,
}

type Listener = Box<dyn FnMut(&PricingSnapshot)>;

pub struct PricingStore {
    curve: VolumeCurve,
    calculator: CostCalculator,
    slider_value: f64,
    event_number: u64,
    pricing_option: PricingPlan,
    additional_unit_price: f64,
    listeners: Vec<Listener>,
}

impl Default for PricingStore {
    fn default() -> Self {
        Self::new(VolumeCurve::default(), CostCalculator::default())
    }
}

impl std::fmt::Debug for PricingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PricingStore")
            .field("slider_value", &self.slider_value)
            .field("event_number", &self.event_number)
            .field("pricing_option", &self.pricing_option)
            .field("additional_unit_price", &self.additional_unit_price)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl PricingStore {
    pub fn new(curve: VolumeCurve, calculator: CostCalculator) -> Self {
        Self {
            curve,
            calculator,
            slider_value: 0.0,
            event_number: INITIAL_EVENT_NUMBER,
            pricing_option: PricingPlan::Managed,
            additional_unit_price: INITIAL_ADDITIONAL_UNIT_PRICE,
            listeners: Vec::new(),
        }
    }

    /// Build a store from loaded configuration
    ///
    /// A non-zero `slider.initial_position` is applied as if the user had
    /// moved the slider there.
    pub fn from_config(cfg: &Config) -> Result<Self, AppError> {
        let curve = VolumeCurve::from_config(&cfg.slider)?;
        let calculator = CostCalculator::new(&cfg.pricing)?;
        let mut store = Self::new(curve, calculator);
        if cfg.slider.initial_position != 0.0 {
            store.set_slider_value(cfg.slider.initial_position);
        }
        Ok(store)
    }

    pub fn curve(&self) -> &VolumeCurve {
        &self.curve
    }

    pub fn calculator(&self) -> &CostCalculator {
        &self.calculator
    }

    /// Register a listener called with the new state after every action
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&PricingSnapshot) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    // Actions

    /// Slider moved; the raw reading is clamped onto the track
    pub fn set_slider_value(&mut self, value: f64) {
        let position = self.curve.clamp_position(value);
        self.slider_value = position;
        self.event_number = self.curve.event_number(position);
        debug!(
            position,
            events = self.event_number,
            "Slider value changed"
        );
        self.refresh_unit_price();
        self.notify();
    }

    pub fn set_pricing_option(&mut self, option: PricingPlan) {
        self.pricing_option = option;
        debug!(plan = %option, "Pricing option changed");
        self.refresh_unit_price();
        self.notify();
    }

    pub fn set_additional_unit_price(&mut self, value: f64) {
        self.additional_unit_price = value;
        self.notify();
    }

    // Selectors

    pub fn slider_value(&self) -> f64 {
        self.slider_value
    }

    pub fn event_number(&self) -> u64 {
        self.event_number
    }

    pub fn pricing_option(&self) -> PricingPlan {
        self.pricing_option
    }

    pub fn additional_unit_price(&self) -> f64 {
        self.additional_unit_price
    }

    pub fn final_cost(&self) -> Quote {
        self.calculator.quote(self.event_number, self.pricing_option)
    }

    pub fn snapshot(&self) -> PricingSnapshot {
        PricingSnapshot {
            slider_value: self.slider_value,
            event_number: self.event_number,
            pricing_option: self.pricing_option,
            additional_unit_price: self.additional_unit_price,
            final_cost: self.final_cost(),
        }
    }

    /// Publish the self-hosted band rate; managed quotes leave it untouched
    fn refresh_unit_price(&mut self) {
        if let Some(unit_price) = self.final_cost().unit_price {
            if unit_price != self.additional_unit_price {
                debug!(
                    from = self.additional_unit_price,
                    to = unit_price,
                    "Self-hosted tier changed"
                );
            }
            self.additional_unit_price = unit_price;
        }
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for listener in &mut self.listeners {
            listener(&snapshot);
        }
    }
}
