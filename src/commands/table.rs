use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use event_pricing::config::Config;
use event_pricing::curve::VolumeCurve;
use event_pricing::error::AppError;
use event_pricing::pricing::format::{format_grouped, format_rate};
use event_pricing::pricing::{CostCalculator, PricingPlan};
use tracing::info;

/// Most rows a single table may hold
const MAX_TABLE_ROWS: usize = 10_000;

/// Execute the table command
///
/// Walks the slider from 0 to its end in `step` increments and prices each
/// position under both plans.
pub fn execute(cfg: &Config, step: f64) -> Result<()> {
    let curve = VolumeCurve::from_config(&cfg.slider)?;
    let calculator = CostCalculator::new(&cfg.pricing)?;

    let positions = slider_positions(curve.max_position(), step)?;
    info!(rows = positions.len(), step, "Building price table");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("SLIDER").fg(Color::Cyan),
        Cell::new("EVENTS").fg(Color::Cyan),
        Cell::new("MANAGED").fg(Color::Cyan),
        Cell::new("SELF-HOSTED").fg(Color::Cyan),
        Cell::new("SELF-HOSTED RATE").fg(Color::Cyan),
    ]);

    for position in positions {
        let events = curve.event_number(position);
        let managed = calculator.quote(events, PricingPlan::Managed);
        let self_hosted = calculator.quote(events, PricingPlan::SelfHosted);
        let rate = self_hosted.unit_price.map(format_rate).unwrap_or_default();

        table.add_row(vec![
            Cell::new(format!("{:.1}", position)),
            Cell::new(format_grouped(events)),
            Cell::new(managed.display_cost()),
            Cell::new(self_hosted.display_cost()),
            Cell::new(rate),
        ]);
    }

    println!("{}", table);
    Ok(())
}

/// Positions `0, step, 2*step, ...` up to and always including `max`
///
/// Steps that would produce more than `MAX_TABLE_ROWS` rows are rejected.
fn slider_positions(max: f64, step: f64) -> Result<Vec<f64>, AppError> {
    let rows = (max / step).ceil();
    if !rows.is_finite() || rows >= MAX_TABLE_ROWS as f64 {
        return Err(AppError::InvalidInput(format!(
            "step {} over 0..={} gives more than {} rows",
            step, max, MAX_TABLE_ROWS
        )));
    }

    let mut positions: Vec<f64> = (0..rows as usize)
        .map(|index| index as f64 * step)
        .filter(|position| *position < max)
        .collect();
    positions.push(max);
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_positions_even_step() {
        assert_eq!(
            slider_positions(100.0, 25.0).unwrap(),
            vec![0.0, 25.0, 50.0, 75.0, 100.0]
        );
    }

    #[test]
    fn test_slider_positions_uneven_step_ends_at_max() {
        assert_eq!(slider_positions(100.0, 30.0).unwrap(), vec![0.0, 30.0, 60.0, 90.0, 100.0]);
    }

    #[test]
    fn test_slider_positions_step_past_end() {
        assert_eq!(slider_positions(100.0, 500.0).unwrap(), vec![0.0, 100.0]);
    }

    #[test]
    fn test_slider_positions_rejects_tiny_step() {
        let result = slider_positions(100.0, 1e-8);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("rows"));
    }

    #[test]
    fn test_slider_positions_at_row_limit() {
        // 100 / (1/64) = 6400 steps below the end, plus the end itself
        let positions = slider_positions(100.0, 0.015625).unwrap();
        assert_eq!(positions.len(), 6_401);
        assert_eq!(positions.last(), Some(&100.0));

        assert!(slider_positions(100.0, 0.009).is_err());
    }
}
