use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use event_pricing::config::Config;
use event_pricing::pricing::format::{format_grouped, format_rate};
use event_pricing::pricing::CostCalculator;

/// Execute the tiers command
///
/// Prints the self-hosted bands with the cost of each full band and the
/// running total at its upper bound, followed by the managed plan terms.
pub fn execute(cfg: &Config) -> Result<()> {
    let calculator = CostCalculator::new(&cfg.pricing)?;

    println!("{}", "Self-hosted rate card:".green().bold());
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("FROM").fg(Color::Cyan),
        Cell::new("TO").fg(Color::Cyan),
        Cell::new("UNIT PRICE").fg(Color::Cyan),
        Cell::new("BAND COST").fg(Color::Cyan),
        Cell::new("TOTAL AT END").fg(Color::Cyan),
    ]);

    let mut lower = 0u64;
    let mut running = 0.0;
    for tier in calculator.tiers() {
        let (to, band_cost, total) = match tier.up_to {
            Some(bound) => {
                let band_cost = (bound - lower) as f64 * tier.unit_price;
                running += band_cost;
                (
                    format_grouped(bound),
                    format_grouped(band_cost.round() as u64),
                    format_grouped(running.round() as u64),
                )
            }
            None => ("∞".to_string(), "-".to_string(), "-".to_string()),
        };

        table.add_row(vec![
            Cell::new(format_grouped(lower)),
            Cell::new(to),
            Cell::new(format_rate(tier.unit_price)),
            Cell::new(band_cost),
            Cell::new(total),
        ]);

        if let Some(bound) = tier.up_to {
            lower = bound;
        }
    }

    println!("{}", table);
    println!(
        "  Minimum charge within the first band: {}",
        format_grouped(calculator.minimum_charge().round() as u64)
    );
    println!();

    let managed = calculator.managed_pricing();
    println!("{}", "Managed:".green().bold());
    println!("  Free events: {}", format_grouped(managed.free_events));
    println!("  Then: {} per event", format_rate(managed.unit_price));

    Ok(())
}
