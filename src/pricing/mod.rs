pub mod calculator;
pub mod format;
pub mod models;

pub use calculator::CostCalculator;
pub use format::format_grouped;
pub use models::{BandCharge, PriceTier, PricingPlan, Quote};
