//! Greedy priority-ordered allocation of appliances to hours.

use tracing::{debug, trace};

use crate::appliance::ApplianceDemand;
use crate::tariff::{HOURS_PER_DAY, TariffCurve};

use super::ledger::{Placement, Schedule};
use super::ranking::rank_hours;

/// Shared power ceiling respected by normal placement (kW).
pub const DEFAULT_MAX_POWER_KW: f64 = 3.5;

/// Greedy allocator for one tariff and power ceiling.
///
/// Appliances are processed in ascending priority (stable, so equal
/// priorities keep input order). Each appliance walks its hour ranking twice
/// at most: first placing only where the ceiling holds, then, for must-run
/// appliances with hours still unmet, placing unconditionally.
///
/// # Examples
///
/// ```
/// use load_scheduler::appliance::ApplianceDemand;
/// use load_scheduler::sched::allocator::Allocator;
/// use load_scheduler::tariff::TariffCurve;
///
/// let tariff = TariffCurve::flat(0.10).expect("valid tariff");
/// let heater = ApplianceDemand::new("Heater", 1.0, 24, 0, 24, 2);
/// let schedule = Allocator::new(&tariff).run(&[heater]);
/// assert!((schedule.total_cost() - 2.40).abs() < 1e-9);
/// assert!(schedule.forced().is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Allocator<'a> {
    tariff: &'a TariffCurve,
    max_power_kw: f64,
}

impl<'a> Allocator<'a> {
    /// Creates an allocator with the default 3.5 kW ceiling.
    pub fn new(tariff: &'a TariffCurve) -> Self {
        Self::with_max_power(tariff, DEFAULT_MAX_POWER_KW)
    }

    /// Creates an allocator with a custom power ceiling.
    pub fn with_max_power(tariff: &'a TariffCurve, max_power_kw: f64) -> Self {
        Self {
            tariff,
            max_power_kw,
        }
    }

    /// Returns the power ceiling (kW).
    pub fn max_power_kw(&self) -> f64 {
        self.max_power_kw
    }

    /// Schedules every appliance into a fresh [`Schedule`].
    pub fn run(&self, appliances: &[ApplianceDemand]) -> Schedule {
        let mut order: Vec<&ApplianceDemand> = appliances.iter().collect();
        order.sort_by_key(|a| a.priority);

        let mut schedule = Schedule::new();
        for appliance in order {
            let placement = self.allocate(&mut schedule, appliance);
            schedule.push_placement(placement);
        }
        schedule
    }

    /// Places a single appliance into `schedule` and returns its placement.
    ///
    /// Marks the appliance as forced in `schedule` when the ceiling had to be
    /// overridden.
    pub fn allocate(&self, schedule: &mut Schedule, appliance: &ApplianceDemand) -> Placement {
        let ranked = rank_hours(appliance.earliest_hour, appliance.latest_hour, self.tariff);

        let mut hours = self.fill_within_ceiling(schedule, appliance, &ranked, appliance.hours_needed);
        let remaining = appliance.hours_needed - hours.len();

        let forced = remaining > 0 && appliance.is_must_run();
        if forced {
            debug!(
                appliance = %appliance.name,
                remaining,
                ceiling_kw = self.max_power_kw,
                "forcing must-run appliance past the power ceiling"
            );
            hours.extend(self.fill_forced(schedule, appliance, &ranked, remaining));
            schedule.mark_forced(&appliance.name);
        }

        Placement {
            name: appliance.name.clone(),
            hours_needed: appliance.hours_needed,
            hours,
            forced,
        }
    }

    /// Walks `ranked` and places the appliance in each hour that still has
    /// room under the ceiling, up to `wanted` hours.
    ///
    /// Returns the hours used, in placement order.
    pub fn fill_within_ceiling(
        &self,
        schedule: &mut Schedule,
        appliance: &ApplianceDemand,
        ranked: &[usize; HOURS_PER_DAY],
        wanted: usize,
    ) -> Vec<usize> {
        let mut placed = Vec::with_capacity(wanted);
        for &hour in ranked {
            if placed.len() == wanted {
                break;
            }
            if schedule.slot(hour).fits(appliance.power_kw, self.max_power_kw) {
                let cost = schedule.place(hour, &appliance.name, appliance.power_kw, self.tariff);
                trace!(appliance = %appliance.name, hour, cost, "placed");
                placed.push(hour);
            }
        }
        placed
    }

    /// Walks `ranked` from the start and places the appliance in successive
    /// hours regardless of load, until `wanted` hours are placed.
    ///
    /// Hours the appliance already occupies are not skipped. `wanted` never
    /// exceeds 24 for validated input, so one walk is enough.
    pub fn fill_forced(
        &self,
        schedule: &mut Schedule,
        appliance: &ApplianceDemand,
        ranked: &[usize; HOURS_PER_DAY],
        wanted: usize,
    ) -> Vec<usize> {
        let placed: Vec<usize> = ranked.iter().copied().take(wanted).collect();
        for &hour in &placed {
            let cost = schedule.place(hour, &appliance.name, appliance.power_kw, self.tariff);
            trace!(appliance = %appliance.name, hour, cost, "force-placed");
        }
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(price: f64) -> TariffCurve {
        TariffCurve::flat(price).unwrap()
    }

    #[test]
    fn zero_hours_is_a_noop() {
        let tariff = flat(0.1);
        let a = ApplianceDemand::new("Idle", 1.0, 0, 0, 24, 1);
        let schedule = Allocator::new(&tariff).run(&[a]);
        assert_eq!(schedule.total_cost(), 0.0);
        assert!(schedule.forced().is_empty());
        assert_eq!(schedule.placements()[0].hours.len(), 0);
    }

    #[test]
    fn priority_order_is_stable() {
        let tariff = flat(0.1);
        let appliances = vec![
            ApplianceDemand::new("B", 0.5, 1, 4, 5, 3),
            ApplianceDemand::new("A", 0.5, 1, 4, 5, 1),
            ApplianceDemand::new("C", 0.5, 1, 4, 5, 3),
        ];
        let schedule = Allocator::new(&tariff).run(&appliances);
        assert_eq!(schedule.slot(4).appliances, vec!["A", "B", "C"]);
        let names: Vec<&str> = schedule.placements().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn ceiling_phase_skips_full_hours() {
        let tariff = flat(0.1);
        let allocator = Allocator::new(&tariff);
        let mut schedule = Schedule::new();
        schedule.place(5, "Existing", 3.0, &tariff);

        let a = ApplianceDemand::new("Kettle", 1.0, 1, 5, 6, 2);
        let ranked = rank_hours(5, 6, &tariff);
        let hours = allocator.fill_within_ceiling(&mut schedule, &a, &ranked, 1);
        assert_eq!(hours, vec![4]);
    }

    #[test]
    fn forced_phase_ignores_ceiling_and_restarts_ranking() {
        let tariff = flat(0.1);
        let allocator = Allocator::new(&tariff);
        let mut schedule = Schedule::new();
        for h in 0..24 {
            schedule.place(h, "Base", 3.0, &tariff);
        }

        let a = ApplianceDemand::new("Pump", 1.0, 2, 10, 12, 1);
        let ranked = rank_hours(10, 12, &tariff);
        let hours = allocator.fill_forced(&mut schedule, &a, &ranked, 2);
        assert_eq!(hours, vec![10, 11]);
        assert!((schedule.slot(10).power_kw - 4.0).abs() < 1e-12);
        assert!(schedule.forced().is_empty(), "marking happens in allocate");
    }

    #[test]
    fn allocate_marks_forced_appliance() {
        let tariff = flat(0.1);
        let allocator = Allocator::new(&tariff);
        let mut schedule = Schedule::new();
        for h in 0..24 {
            schedule.place(h, "Base", 3.0, &tariff);
        }
        let a = ApplianceDemand::new("Pump", 1.0, 1, 10, 12, 1);
        let placement = allocator.allocate(&mut schedule, &a);
        assert!(placement.forced);
        assert_eq!(placement.hours, vec![10]);
        assert_eq!(schedule.forced(), &["Pump".to_string()]);
    }

    #[test]
    fn non_must_run_shortfall_is_dropped() {
        let tariff = flat(0.1);
        let a = ApplianceDemand::new("Water heater", 4.0, 3, 0, 24, 2);
        let schedule = Allocator::new(&tariff).run(&[a]);
        let p = &schedule.placements()[0];
        assert!(p.hours.is_empty());
        assert_eq!(p.shortfall(), 3);
        assert!(!p.forced);
        assert_eq!(schedule.total_cost(), 0.0);
    }

    #[test]
    fn forced_pass_can_revisit_an_hour_already_used() {
        // Every hour but 0 already carries 2.0 kW, so the stove fits only at
        // hour 0 and the forced pass lands there a second time.
        let tariff = flat(0.1);
        let allocator = Allocator::new(&tariff);
        let mut schedule = Schedule::new();
        for h in 1..24 {
            schedule.place(h, "Base", 2.0, &tariff);
        }
        let a = ApplianceDemand::new("Stove", 2.0, 2, 0, 2, 1);
        let placement = allocator.allocate(&mut schedule, &a);
        assert_eq!(placement.hours, vec![0, 0]);
        assert_eq!(schedule.slot(0).appliances, vec!["Stove", "Stove"]);
    }

    #[test]
    fn custom_ceiling_is_respected() {
        let tariff = flat(0.1);
        let appliances = vec![
            ApplianceDemand::new("A", 4.0, 1, 0, 24, 2),
            ApplianceDemand::new("B", 4.0, 1, 0, 24, 2),
        ];
        let schedule = Allocator::with_max_power(&tariff, 8.0).run(&appliances);
        assert_eq!(schedule.slot(0).appliances, vec!["A", "B"]);
    }
}
