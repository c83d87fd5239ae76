use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;
use crate::pricing::format::format_grouped;

/// Billing mode selected next to the slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingPlan {
    /// Hosted by us; a free allowance then a flat per-event rate
    #[default]
    #[serde(alias = "cloud")]
    Managed,
    /// Customer-hosted; tiered per-event rates with a minimum charge
    SelfHosted,
}

impl PricingPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Managed => "managed",
            Self::SelfHosted => "self-hosted",
        }
    }
}

impl fmt::Display for PricingPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricingPlan {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "managed" | "cloud" => Ok(Self::Managed),
            "self-hosted" | "selfhosted" | "self_hosted" => Ok(Self::SelfHosted),
            other => Err(AppError::InvalidInput(format!(
                "unknown pricing plan '{}', expected 'managed' or 'self-hosted'",
                other
            ))),
        }
    }
}

/// One band of the self-hosted rate card
///
/// `up_to` is the exclusive upper bound of the band; `None` marks the last,
/// unbounded band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_to: Option<u64>,
    pub unit_price: f64,
}

impl PriceTier {
    pub fn bounded(up_to: u64, unit_price: f64) -> Self {
        Self {
            up_to: Some(up_to),
            unit_price,
        }
    }

    pub fn unbounded(unit_price: f64) -> Self {
        Self {
            up_to: None,
            unit_price,
        }
    }
}

/// Charge for the part of a volume that falls inside one band
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandCharge {
    pub from: u64,
    pub to: Option<u64>,
    pub unit_price: f64,
    pub events: u64,
    pub cost: f64,
}

/// Price shown for a given volume and plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub plan: PricingPlan,
    pub event_number: u64,
    /// Rounded to the nearest whole currency unit
    pub final_cost: u64,
    /// Rate of the band the volume falls in (self-hosted only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
}

impl Quote {
    /// Cost as rendered next to the slider
    ///
    /// Managed costs carry grouping separators, self-hosted costs are shown
    /// as a bare integer.
    pub fn display_cost(&self) -> String {
        match self.plan {
            PricingPlan::Managed => format_grouped(self.final_cost),
            PricingPlan::SelfHosted => self.final_cost.to_string(),
        }
    }
}
