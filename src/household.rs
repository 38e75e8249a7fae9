//! Seeded synthetic appliance lists drawn from the catalog.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::appliance::ApplianceDemand;
use crate::catalog;
use crate::tariff::HOURS_PER_DAY;

/// Generator of random but reproducible households.
///
/// # Examples
///
/// ```
/// use load_scheduler::household::HouseholdGenerator;
///
/// let a = HouseholdGenerator::new(7).generate(5);
/// let b = HouseholdGenerator::new(7).generate(5);
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct HouseholdGenerator {
    /// Largest run time drawn for one appliance (hours).
    pub max_hours_needed: usize,
    /// Highest priority level drawn.
    pub max_priority: u32,
    /// Chance of an appliance being must-run (0.0-1.0).
    pub must_run_share: f64,
    rng: StdRng,
}

impl HouseholdGenerator {
    /// Creates a generator with default draw ranges.
    pub fn new(seed: u64) -> Self {
        Self {
            max_hours_needed: 6,
            max_priority: 4,
            must_run_share: 0.2,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws one appliance.
    pub fn next_appliance(&mut self) -> ApplianceDemand {
        let (name, power_kw) = catalog::APPLIANCES[self.rng.random_range(0..catalog::APPLIANCES.len())];
        let hours_needed = self.rng.random_range(1..=self.max_hours_needed.clamp(1, HOURS_PER_DAY));
        let earliest_hour = self.rng.random_range(0..HOURS_PER_DAY);
        let latest_hour = self.rng.random_range(earliest_hour + 1..=HOURS_PER_DAY);
        let priority = if self.rng.random_bool(self.must_run_share.clamp(0.0, 1.0)) {
            1
        } else {
            self.rng.random_range(2..=self.max_priority.max(2))
        };
        ApplianceDemand::new(name, power_kw, hours_needed, earliest_hour, latest_hour, priority)
    }

    /// Draws `count` appliances.
    pub fn generate(&mut self, count: usize) -> Vec<ApplianceDemand> {
        (0..count).map(|_| self.next_appliance()).collect()
    }
}
