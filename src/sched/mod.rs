//! Scheduling engine: hour ranking, greedy allocation, and reporting.

/// Greedy priority-ordered allocator.
pub mod allocator;
/// Full-precision hourly ledger.
pub mod ledger;
/// Hour preference ranking.
pub mod ranking;
pub mod report;

use crate::appliance::ApplianceDemand;
use crate::tariff::TariffCurve;

use allocator::Allocator;
use report::ScheduleReport;

/// Runs a complete scheduling pass and returns its display report.
///
/// Each call builds its own [`ledger::Schedule`]; nothing is shared between
/// calls.
pub fn plan(
    appliances: &[ApplianceDemand],
    tariff: &TariffCurve,
    max_power_kw: f64,
) -> ScheduleReport {
    let allocator = Allocator::with_max_power(tariff, max_power_kw);
    let schedule = allocator.run(appliances);
    ScheduleReport::from_schedule(&schedule, max_power_kw)
}
