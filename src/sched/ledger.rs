//! Full-precision per-hour accumulation of scheduled power and cost.

use serde::Serialize;

use crate::tariff::{HOURS_PER_DAY, TariffCurve};

/// Accumulated load for one hour of the day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HourSlot {
    /// Appliance names in the order they were placed.
    pub appliances: Vec<String>,
    /// Sum of the placed appliances' power (kW).
    pub power_kw: f64,
    /// Sum of `power × tariff` for the placed appliances (€).
    pub cost: f64,
}

impl HourSlot {
    /// Returns `true` if `extra_kw` can be added without exceeding `ceiling_kw`.
    pub fn fits(&self, extra_kw: f64, ceiling_kw: f64) -> bool {
        self.power_kw + extra_kw <= ceiling_kw
    }
}

/// Hours assigned to one appliance during a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    /// Appliance name.
    pub name: String,
    /// Hours requested.
    pub hours_needed: usize,
    /// Hours assigned, in placement order. May repeat an hour for a forced
    /// appliance that was already placed there.
    pub hours: Vec<usize>,
    /// Whether the ceiling was overridden for this appliance.
    pub forced: bool,
}

impl Placement {
    /// Requested hours that were not assigned.
    pub fn shortfall(&self) -> usize {
        self.hours_needed.saturating_sub(self.hours.len())
    }
}

/// The schedule for one run: 24 hour slots plus run-level bookkeeping.
///
/// Owned exclusively by a single allocation run and mutated through
/// [`Schedule::place`]; every cost is accumulated here at full precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    slots: [HourSlot; HOURS_PER_DAY],
    total_cost: f64,
    forced: Vec<String>,
    placements: Vec<Placement>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new()
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| HourSlot::default()),
            total_cost: 0.0,
            forced: Vec::new(),
            placements: Vec::new(),
        }
    }

    /// Adds an appliance to `hour` and returns the cost it contributes.
    pub fn place(&mut self, hour: usize, name: &str, power_kw: f64, tariff: &TariffCurve) -> f64 {
        let cost = power_kw * tariff[hour];
        let slot = &mut self.slots[hour];
        slot.appliances.push(name.to_string());
        slot.power_kw += power_kw;
        slot.cost += cost;
        self.total_cost += cost;
        cost
    }

    /// Records that `name` required the ceiling override.
    pub(crate) fn mark_forced(&mut self, name: &str) {
        self.forced.push(name.to_string());
    }

    pub(crate) fn push_placement(&mut self, placement: Placement) {
        self.placements.push(placement);
    }

    /// Returns the slot for `hour`.
    ///
    /// # Panics
    ///
    /// Panics if `hour >= 24`.
    pub fn slot(&self, hour: usize) -> &HourSlot {
        &self.slots[hour]
    }

    /// All 24 slots in hour order.
    pub fn slots(&self) -> &[HourSlot; HOURS_PER_DAY] {
        &self.slots
    }

    /// Running total cost (€).
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Names of forced appliances in processing order; may contain
    /// duplicates when several records share a name.
    pub fn forced(&self) -> &[String] {
        &self.forced
    }

    /// Per-appliance placements in processing order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Highest hourly load (kW).
    pub fn peak_power_kw(&self) -> f64 {
        self.slots.iter().map(|s| s.power_kw).fold(0.0, f64::max)
    }

    /// Hours whose load exceeds `ceiling_kw`.
    pub fn hours_over(&self, ceiling_kw: f64) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.power_kw > ceiling_kw)
            .map(|(h, _)| h)
            .collect()
    }
}
