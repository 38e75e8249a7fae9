//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use rand::{Rng, SeedableRng, rngs::StdRng};

use load_scheduler::appliance::ApplianceDemand;
use load_scheduler::household::HouseholdGenerator;
use load_scheduler::sched::allocator::DEFAULT_MAX_POWER_KW;
use load_scheduler::tariff::{HOURS_PER_DAY, TariffCurve};

/// Tolerance for floating-point sums.
pub const EPS: f64 = 1e-9;

/// Default ceiling (3.5 kW).
pub const CEILING: f64 = DEFAULT_MAX_POWER_KW;

/// Flat tariff at `price` €/kWh.
pub fn flat_tariff(price: f64) -> TariffCurve {
    TariffCurve::flat(price).unwrap()
}

/// Random tariff with prices in [0.05, 0.30), reproducible per seed.
pub fn random_tariff(seed: u64) -> TariffCurve {
    let mut rng = StdRng::seed_from_u64(seed);
    let prices = (0..HOURS_PER_DAY)
        .map(|_| (rng.random_range(50..300) as f64) / 1000.0)
        .collect();
    TariffCurve::new(prices).unwrap()
}

/// Appliance record with positional fields.
pub fn appliance(
    name: &str,
    power_kw: f64,
    hours_needed: usize,
    earliest_hour: usize,
    latest_hour: usize,
    priority: u32,
) -> ApplianceDemand {
    ApplianceDemand::new(name, power_kw, hours_needed, earliest_hour, latest_hour, priority)
}

/// Seeded random household of `count` catalog appliances.
pub fn random_household(seed: u64, count: usize) -> Vec<ApplianceDemand> {
    HouseholdGenerator::new(seed).generate(count)
}

/// The order appliances are processed in: stable by ascending priority.
pub fn processing_order(appliances: &[ApplianceDemand]) -> Vec<&ApplianceDemand> {
    let mut order: Vec<&ApplianceDemand> = appliances.iter().collect();
    order.sort_by_key(|a| a.priority);
    order
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
