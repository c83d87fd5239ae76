use crate::config::{ManagedPricingConfig, PricingConfig, SelfHostedPricingConfig};
use crate::error::AppError;
use crate::pricing::models::{BandCharge, PriceTier, PricingPlan, Quote};
use tracing::debug;

/// Calculator for the monthly cost of an event volume under either plan
#[derive(Debug, Clone)]
pub struct CostCalculator {
    managed: ManagedPricingConfig,
    self_hosted: SelfHostedPricingConfig,
}

impl Default for CostCalculator {
    fn default() -> Self {
        Self {
            managed: ManagedPricingConfig::default(),
            self_hosted: SelfHostedPricingConfig::default(),
        }
    }
}

impl CostCalculator {
    /// Create a calculator from a pricing config, rejecting malformed rate cards
    pub fn new(pricing: &PricingConfig) -> Result<Self, AppError> {
        pricing.validate()?;
        Ok(Self {
            managed: pricing.managed.clone(),
            self_hosted: pricing.self_hosted.clone(),
        })
    }

    pub fn tiers(&self) -> &[PriceTier] {
        &self.self_hosted.tiers
    }

    pub fn minimum_charge(&self) -> f64 {
        self.self_hosted.minimum_charge
    }

    pub fn managed_pricing(&self) -> &ManagedPricingConfig {
        &self.managed
    }

    /// Price an event volume under the given plan
    pub fn quote(&self, event_number: u64, plan: PricingPlan) -> Quote {
        let quote = match plan {
            PricingPlan::Managed => Quote {
                plan,
                event_number,
                final_cost: self.managed_cost(event_number),
                unit_price: None,
            },
            PricingPlan::SelfHosted => {
                let (final_cost, unit_price) = self.self_hosted_cost(event_number);
                Quote {
                    plan,
                    event_number,
                    final_cost,
                    unit_price: Some(unit_price),
                }
            }
        };

        debug!(
            plan = %quote.plan,
            events = quote.event_number,
            cost = quote.final_cost,
            "Computed quote"
        );
        quote
    }

    /// Managed cost: events past the free allowance at the flat rate
    pub fn managed_cost(&self, event_number: u64) -> u64 {
        let billable = event_number.saturating_sub(self.managed.free_events);
        (billable as f64 * self.managed.unit_price).round() as u64
    }

    /// Self-hosted cost and the rate of the band `event_number` falls in
    pub fn self_hosted_cost(&self, event_number: u64) -> (u64, f64) {
        let raw: f64 = self
            .breakdown(event_number)
            .iter()
            .map(|band| band.cost)
            .sum();

        let in_first_band = self.tiers()[0]
            .up_to
            .map_or(true, |bound| event_number < bound);
        let cost = if in_first_band {
            raw.max(self.self_hosted.minimum_charge)
        } else {
            raw
        };

        (cost.round() as u64, self.tier_for(event_number).unit_price)
    }

    /// Band an event volume falls in
    ///
    /// A volume exactly on a band's `up_to` belongs to the next band.
    pub fn tier_for(&self, event_number: u64) -> &PriceTier {
        let tiers = self.tiers();
        tiers
            .iter()
            .find(|tier| tier.up_to.map_or(true, |bound| event_number < bound))
            .unwrap_or(&tiers[tiers.len() - 1])
    }

    /// Per-band charges for the self-hosted plan, before the minimum charge
    ///
    /// Each crossed band is billed over its own width (10M..100M is 90M
    /// events), so the total has no step at a band boundary.
    pub fn breakdown(&self, event_number: u64) -> Vec<BandCharge> {
        let mut charges = Vec::new();
        let mut lower = 0u64;

        for tier in self.tiers() {
            if event_number <= lower {
                break;
            }

            let upper = tier.up_to.map_or(event_number, |bound| bound.min(event_number));
            let events = upper - lower;
            charges.push(BandCharge {
                from: lower,
                to: tier.up_to,
                unit_price: tier.unit_price,
                events,
                cost: events as f64 * tier.unit_price,
            });

            match tier.up_to {
                Some(bound) => lower = bound,
                None => break,
            }
        }

        charges
    }
}
