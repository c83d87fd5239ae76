/// Integration tests for the slider curve and both pricing plans
use event_pricing::{
    curve::{slider_curve, VolumeCurve},
    pricing::{CostCalculator, PricingPlan},
    state::PricingStore,
};

#[test]
fn test_curve_endpoints_and_monotonicity() {
    let curve = VolumeCurve::default();
    assert_eq!(curve.event_number(0.0), 10_000);
    assert_eq!(curve.event_number(curve.max_position()), 1_000_000_000);

    let mut previous = slider_curve(0.0);
    for step in 1..=400 {
        let current = slider_curve(step as f64 * 0.25);
        assert!(current >= previous);
        previous = current;
    }
}

#[test]
fn test_documented_costs() {
    let calculator = CostCalculator::default();

    assert_eq!(calculator.quote(0, PricingPlan::SelfHosted).final_cost, 2000);
    assert_eq!(
        calculator.quote(10_000_000, PricingPlan::SelfHosted).final_cost,
        (10_000_000f64 * 0.000225).round() as u64
    );
    assert_eq!(calculator.quote(0, PricingPlan::Managed).final_cost, 0);
    assert_eq!(
        calculator.quote(2_000_000, PricingPlan::Managed).final_cost,
        (1_000_000f64 * 0.000225).round() as u64
    );
}

#[test]
fn test_self_hosted_cost_never_drops_along_the_slider() {
    let curve = VolumeCurve::default();
    let calculator = CostCalculator::default();

    let mut previous = 0;
    for step in 0..=1000 {
        let events = curve.event_number(step as f64 / 10.0);
        let cost = calculator.quote(events, PricingPlan::SelfHosted).final_cost;
        assert!(
            cost >= previous,
            "self-hosted cost dropped to {} at {} events",
            cost,
            events
        );
        previous = cost;
    }
}

#[test]
fn test_managed_cost_never_drops_along_the_slider() {
    let curve = VolumeCurve::default();
    let calculator = CostCalculator::default();

    let mut previous = 0;
    for step in 0..=1000 {
        let events = curve.event_number(step as f64 / 10.0);
        let cost = calculator.quote(events, PricingPlan::Managed).final_cost;
        assert!(cost >= previous);
        previous = cost;
    }
}

#[test]
fn test_store_drives_full_widget_flow() {
    let mut store = PricingStore::default();

    store.set_slider_value(80.0);
    assert_eq!(store.event_number(), 100_000_000);
    assert_eq!(store.final_cost().display_cost(), "22,275");

    store.set_pricing_option(PricingPlan::SelfHosted);
    let quote = store.final_cost();
    assert_eq!(quote.final_cost, 6300);
    assert_eq!(quote.display_cost(), "6300");
    assert_eq!(store.additional_unit_price(), 0.000009);
}
