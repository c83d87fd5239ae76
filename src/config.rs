use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::curve::{VolumeCurve, DEFAULT_MAX_EVENTS, DEFAULT_MAX_POSITION, DEFAULT_MIN_EVENTS};
use crate::error::AppError;
use crate::pricing::PriceTier;

/// Environment variable prefix, e.g. `EVENT_PRICING__LOGGING__LEVEL=debug`
pub const ENV_PREFIX: &str = "EVENT_PRICING";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub slider: SliderConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Slider track and the volume range it spans
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SliderConfig {
    /// Events at position 0 (default: 10,000)
    #[serde(default = "default_min_events")]
    pub min_events: u64,

    /// Events at the far end of the track (default: 1,000,000,000)
    #[serde(default = "default_max_events")]
    pub max_events: u64,

    /// Highest slider position (default: 100)
    #[serde(default = "default_max_position")]
    pub max_position: f64,

    /// Position the slider starts at (default: 0)
    #[serde(default)]
    pub initial_position: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min_events: default_min_events(),
            max_events: default_max_events(),
            max_position: default_max_position(),
            initial_position: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub managed: ManagedPricingConfig,
    #[serde(default)]
    pub self_hosted: SelfHostedPricingConfig,
}

/// Managed plan: free allowance, then one flat rate
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ManagedPricingConfig {
    /// Events per month included at no charge (default: 1,000,000)
    #[serde(default = "default_free_events")]
    pub free_events: u64,

    /// Price per event beyond the allowance (default: 0.000225)
    #[serde(default = "default_managed_unit_price")]
    pub unit_price: f64,
}

impl Default for ManagedPricingConfig {
    fn default() -> Self {
        Self {
            free_events: default_free_events(),
            unit_price: default_managed_unit_price(),
        }
    }
}

/// Self-hosted plan: cumulative tiered rates with a minimum charge
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelfHostedPricingConfig {
    /// Floor applied while the volume is inside the first band (default: 2000)
    #[serde(default = "default_minimum_charge")]
    pub minimum_charge: f64,

    /// Bands in ascending order; only the last may omit `up_to`
    #[serde(default = "default_tiers")]
    pub tiers: Vec<PriceTier>,
}

impl Default for SelfHostedPricingConfig {
    fn default() -> Self {
        Self {
            minimum_charge: default_minimum_charge(),
            tiers: default_tiers(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset (default: "info")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "pretty" or "json" (default: "pretty")
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_min_events() -> u64 {
    DEFAULT_MIN_EVENTS
}

fn default_max_events() -> u64 {
    DEFAULT_MAX_EVENTS
}

fn default_max_position() -> f64 {
    DEFAULT_MAX_POSITION
}

fn default_free_events() -> u64 {
    1_000_000
}

fn default_managed_unit_price() -> f64 {
    0.000225
}

fn default_minimum_charge() -> f64 {
    2000.0
}

fn default_tiers() -> Vec<PriceTier> {
    vec![
        PriceTier::bounded(10_000_000, 0.000225),
        PriceTier::bounded(100_000_000, 0.000045),
        PriceTier::unbounded(0.000009),
    ]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

/// Load configuration from an optional TOML file, overlaid with
/// `EVENT_PRICING__*` environment variables
pub fn load_config(path: &Path) -> Result<Config, AppError> {
    let config = config::Config::builder()
        .add_source(
            config::File::from(path)
                .format(config::FileFormat::Toml)
                .required(false),
        )
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> Result<(), AppError> {
    let curve = VolumeCurve::from_config(&cfg.slider)?;

    let initial = cfg.slider.initial_position;
    if !initial.is_finite() || initial < 0.0 || initial > curve.max_position() {
        return Err(AppError::ConfigError(format!(
            "slider initial_position {} is outside 0..={}",
            initial,
            curve.max_position()
        )));
    }

    cfg.pricing.validate()?;
    validate_logging(&cfg.logging)?;

    Ok(())
}

impl PricingConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_rate(self.managed.unit_price, "managed unit_price")?;
        self.self_hosted.validate()
    }
}

impl SelfHostedPricingConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.tiers.is_empty() {
            return Err(AppError::ConfigError(
                "self-hosted pricing needs at least one tier".to_string(),
            ));
        }

        let last_index = self.tiers.len() - 1;
        let mut previous_bound = 0u64;
        for (idx, tier) in self.tiers.iter().enumerate() {
            validate_rate(tier.unit_price, &format!("self-hosted tier {} unit_price", idx + 1))?;

            match tier.up_to {
                Some(bound) if idx == last_index => {
                    return Err(AppError::ConfigError(format!(
                        "last self-hosted tier must be unbounded, found up_to = {}",
                        bound
                    )));
                }
                Some(bound) if bound <= previous_bound => {
                    return Err(AppError::ConfigError(format!(
                        "self-hosted tier {} up_to ({}) must be greater than {}",
                        idx + 1,
                        bound,
                        previous_bound
                    )));
                }
                Some(bound) => previous_bound = bound,
                None if idx != last_index => {
                    return Err(AppError::ConfigError(format!(
                        "only the last self-hosted tier may be unbounded (tier {})",
                        idx + 1
                    )));
                }
                None => {}
            }
        }

        if !self.minimum_charge.is_finite() || self.minimum_charge < 0.0 {
            return Err(AppError::ConfigError(format!(
                "self-hosted minimum_charge must be a non-negative number, got {}",
                self.minimum_charge
            )));
        }

        // The floor is lifted when the first band ends; a floor above the
        // band's full cost would make the price drop there.
        let first = &self.tiers[0];
        if let Some(bound) = first.up_to {
            let first_band_cost = bound as f64 * first.unit_price;
            if self.minimum_charge > first_band_cost {
                return Err(AppError::ConfigError(format!(
                    "self-hosted minimum_charge ({}) exceeds the full cost of the first tier ({})",
                    self.minimum_charge, first_band_cost
                )));
            }
        }

        Ok(())
    }
}

fn validate_rate(rate: f64, what: &str) -> Result<(), AppError> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(AppError::ConfigError(format!(
            "{} must be a non-negative number, got {}",
            what, rate
        )));
    }
    Ok(())
}

fn validate_logging(cfg: &LoggingConfig) -> Result<(), AppError> {
    match cfg.format.as_str() {
        "pretty" | "json" => {}
        other => {
            return Err(AppError::ConfigError(format!(
                "logging format must be 'pretty' or 'json', got '{}'",
                other
            )))
        }
    }

    match cfg.level.to_ascii_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => Ok(()),
        other => Err(AppError::ConfigError(format!(
            "logging level '{}' is not one of trace, debug, info, warn, error, off",
            other
        ))),
    }
}
