//! Slider position → event volume mapping
//!
//! The slider is logarithmic: every equal step along the track multiplies the
//! event volume by the same factor. With the default range (10K to 1B events
//! over positions 0..=100) each 20 positions is one order of magnitude, so the
//! self-hosted tier thresholds (10M, 100M) sit at positions 60 and 80.

use tracing::warn;

use crate::config::SliderConfig;
use crate::error::AppError;

/// Event volume at slider position 0
pub const DEFAULT_MIN_EVENTS: u64 = 10_000;
/// Event volume at the far end of the slider
pub const DEFAULT_MAX_EVENTS: u64 = 1_000_000_000;
/// Highest slider position
pub const DEFAULT_MAX_POSITION: f64 = 100.0;

/// Monotone logarithmic curve from slider position to event volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeCurve {
    min_events: f64,
    max_events: f64,
    max_position: f64,
}

impl Default for VolumeCurve {
    fn default() -> Self {
        Self {
            min_events: DEFAULT_MIN_EVENTS as f64,
            max_events: DEFAULT_MAX_EVENTS as f64,
            max_position: DEFAULT_MAX_POSITION,
        }
    }
}

impl VolumeCurve {
    /// Create a curve spanning `min_events..=max_events` over `0..=max_position`
    pub fn new(min_events: u64, max_events: u64, max_position: f64) -> Result<Self, AppError> {
        if min_events == 0 {
            return Err(AppError::ConfigError(
                "slider min_events must be greater than 0".to_string(),
            ));
        }
        if max_events <= min_events {
            return Err(AppError::ConfigError(format!(
                "slider max_events ({}) must be greater than min_events ({})",
                max_events, min_events
            )));
        }
        if !max_position.is_finite() || max_position <= 0.0 {
            return Err(AppError::ConfigError(format!(
                "slider max_position must be a positive finite number, got {}",
                max_position
            )));
        }

        Ok(Self {
            min_events: min_events as f64,
            max_events: max_events as f64,
            max_position,
        })
    }

    /// Build the curve described by the `[slider]` config section
    pub fn from_config(cfg: &SliderConfig) -> Result<Self, AppError> {
        Self::new(cfg.min_events, cfg.max_events, cfg.max_position)
    }

    pub fn max_position(&self) -> f64 {
        self.max_position
    }

    /// Bring a raw slider reading into `0..=max_position`
    ///
    /// NaN and negative readings map to 0, anything past the end (including
    /// +∞) maps to `max_position`.
    pub fn clamp_position(&self, value: f64) -> f64 {
        if value.is_nan() {
            warn!("Slider reported NaN, treating as position 0");
            return 0.0;
        }
        if value < 0.0 {
            warn!(value, "Slider position below range, clamping to 0");
            return 0.0;
        }
        if value > self.max_position {
            warn!(
                value,
                max = self.max_position,
                "Slider position above range, clamping to max"
            );
            return self.max_position;
        }
        value
    }

    /// Unrounded event volume at a slider position
    pub fn value_at(&self, position: f64) -> f64 {
        let position = self.clamp_position(position);
        let ratio = self.max_events / self.min_events;
        self.min_events * ratio.powf(position / self.max_position)
    }

    /// Event volume at a slider position, rounded to the nearest event
    pub fn event_number(&self, position: f64) -> u64 {
        self.value_at(position).round() as u64
    }

    /// Slider position whose volume is `events`
    ///
    /// Counts outside the curve's range land on the nearest end of the track.
    pub fn position_for(&self, events: u64) -> f64 {
        let events = (events as f64).clamp(self.min_events, self.max_events);
        let ratio = self.max_events / self.min_events;
        self.max_position * (events / self.min_events).ln() / ratio.ln()
    }
}

/// Event volume for a slider position on the default curve
pub fn slider_curve(value: f64) -> f64 {
    VolumeCurve::default().value_at(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let curve = VolumeCurve::default();
        assert_eq!(curve.event_number(0.0), 10_000);
        assert_eq!(curve.event_number(100.0), 1_000_000_000);
    }

    #[test]
    fn test_tier_thresholds_on_round_positions() {
        let curve = VolumeCurve::default();
        assert_eq!(curve.event_number(20.0), 100_000);
        assert_eq!(curve.event_number(40.0), 1_000_000);
        assert_eq!(curve.event_number(60.0), 10_000_000);
        assert_eq!(curve.event_number(80.0), 100_000_000);
    }

    #[test]
    fn test_curve_is_monotone() {
        let curve = VolumeCurve::default();
        let mut previous = curve.event_number(0.0);
        for step in 1..=1000 {
            let current = curve.event_number(step as f64 / 10.0);
            assert!(
                current >= previous,
                "curve decreased at position {}: {} < {}",
                step as f64 / 10.0,
                current,
                previous
            );
            previous = current;
        }
    }

    #[test]
    fn test_clamp_position() {
        let curve = VolumeCurve::default();
        assert_eq!(curve.clamp_position(f64::NAN), 0.0);
        assert_eq!(curve.clamp_position(-5.0), 0.0);
        assert_eq!(curve.clamp_position(f64::NEG_INFINITY), 0.0);
        assert_eq!(curve.clamp_position(f64::INFINITY), 100.0);
        assert_eq!(curve.clamp_position(250.0), 100.0);
        assert_eq!(curve.clamp_position(42.5), 42.5);
    }

    #[test]
    fn test_out_of_range_positions_hit_endpoints() {
        let curve = VolumeCurve::default();
        assert_eq!(curve.event_number(-1.0), 10_000);
        assert_eq!(curve.event_number(f64::NAN), 10_000);
        assert_eq!(curve.event_number(1_000.0), 1_000_000_000);
    }

    #[test]
    fn test_position_for_inverts_curve() {
        let curve = VolumeCurve::default();
        assert!((curve.position_for(10_000)).abs() < 1e-9);
        assert!((curve.position_for(1_000_000_000) - 100.0).abs() < 1e-9);
        assert!((curve.position_for(10_000_000) - 60.0).abs() < 1e-9);

        // Below and above the range
        assert_eq!(curve.position_for(0), 0.0);
        assert!((curve.position_for(u64::MAX) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_custom_curve() {
        let curve = VolumeCurve::new(1_000, 1_000_000, 30.0).unwrap();
        assert_eq!(curve.event_number(0.0), 1_000);
        assert_eq!(curve.event_number(10.0), 10_000);
        assert_eq!(curve.event_number(30.0), 1_000_000);
    }

    #[test]
    fn test_invalid_curve_parameters() {
        assert!(VolumeCurve::new(0, 100, 100.0).is_err());
        assert!(VolumeCurve::new(100, 100, 100.0).is_err());
        assert!(VolumeCurve::new(100, 1_000, 0.0).is_err());
        assert!(VolumeCurve::new(100, 1_000, f64::NAN).is_err());
    }

    #[test]
    fn test_slider_curve_uses_default_range() {
        assert_eq!(slider_curve(0.0).round() as u64, 10_000);
        assert_eq!(slider_curve(100.0).round() as u64, 1_000_000_000);
    }
}
