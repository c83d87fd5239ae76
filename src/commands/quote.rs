use anyhow::Result;
use colored::Colorize;
use event_pricing::config::Config;
use event_pricing::pricing::format::{format_grouped, format_rate};
use event_pricing::pricing::PricingPlan;
use event_pricing::state::PricingStore;
use serde::Serialize;
use tracing::info;

/// Quote as printed by `pricing quote --json`
#[derive(Debug, Serialize)]
struct QuoteReport {
    slider_value: f64,
    event_number: u64,
    plan: PricingPlan,
    final_cost: u64,
    display_cost: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit_price: Option<f64>,
}

/// Execute the quote command
pub fn execute(
    cfg: &Config,
    slider: Option<f64>,
    events: Option<u64>,
    plan: PricingPlan,
    json: bool,
) -> Result<()> {
    let mut store = PricingStore::from_config(cfg)?;
    let report = build_report(&mut store, slider, events, plan);

    info!(
        plan = %report.plan,
        events = report.event_number,
        cost = report.final_cost,
        "Quote ready"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Estimated monthly cost".green().bold());
    println!("  {:<16} {}", "Plan:", report.plan.to_string().cyan());
    println!(
        "  {:<16} {:.1} / {}",
        "Slider:",
        report.slider_value,
        store.curve().max_position()
    );
    println!("  {:<16} {}", "Events:", format_grouped(report.event_number));
    if let Some(rate) = report.unit_price {
        println!("  {:<16} {} per event", "Unit price:", format_rate(rate));
    }
    println!("  {:<16} {}", "Cost:", report.display_cost.bold());

    Ok(())
}

/// Price the request against the store
///
/// With `events` the volume is priced directly and placed on the slider
/// without moving it; otherwise the slider is moved to `slider` (or left at
/// its start).
fn build_report(
    store: &mut PricingStore,
    slider: Option<f64>,
    events: Option<u64>,
    plan: PricingPlan,
) -> QuoteReport {
    store.set_pricing_option(plan);

    match events {
        Some(events) => {
            let quote = store.calculator().quote(events, plan);
            QuoteReport {
                slider_value: store.curve().position_for(events),
                event_number: events,
                plan,
                final_cost: quote.final_cost,
                display_cost: quote.display_cost(),
                unit_price: quote.unit_price,
            }
        }
        None => {
            if let Some(value) = slider {
                store.set_slider_value(value);
            }
            let snapshot = store.snapshot();
            QuoteReport {
                slider_value: snapshot.slider_value,
                event_number: snapshot.event_number,
                plan,
                final_cost: snapshot.final_cost.final_cost,
                display_cost: snapshot.final_cost.display_cost(),
                unit_price: snapshot.final_cost.unit_price,
            }
        }
    }
}
