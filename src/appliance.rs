//! Appliance demand records and their boundary validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tariff::HOURS_PER_DAY;

/// Priority level that is guaranteed its full run time, even past the power
/// ceiling.
pub const MUST_RUN_PRIORITY: u32 = 1;

/// Earliest hour used when a record leaves it unspecified.
pub const DEFAULT_EARLIEST_HOUR: usize = 0;
/// Latest hour (exclusive) used when a record leaves it unspecified.
pub const DEFAULT_LATEST_HOUR: usize = 23;
/// Run time used when a record leaves it unspecified.
pub const DEFAULT_HOURS_NEEDED: usize = 2;
/// Priority used when a record leaves it unspecified.
pub const DEFAULT_PRIORITY: u32 = MUST_RUN_PRIORITY;

/// One appliance to be placed into the day.
///
/// The appliance draws `power_kw` for each of `hours_needed` distinct hours.
/// Hours inside `[earliest_hour, latest_hour)` are preferred; hours outside
/// are still usable but ranked by distance from the window and then price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplianceDemand {
    /// Display label; not required to be unique.
    pub name: String,
    /// Constant draw while running (kW).
    pub power_kw: f64,
    /// Number of hours the appliance must run.
    pub hours_needed: usize,
    /// First preferred hour (inclusive).
    pub earliest_hour: usize,
    /// End of the preferred window (exclusive).
    pub latest_hour: usize,
    /// Scheduling priority; lower runs first and `1` is must-run.
    pub priority: u32,
}

impl ApplianceDemand {
    /// Creates a demand record. No validation is performed; see
    /// [`ApplianceDemand::validate`].
    pub fn new(
        name: impl Into<String>,
        power_kw: f64,
        hours_needed: usize,
        earliest_hour: usize,
        latest_hour: usize,
        priority: u32,
    ) -> Self {
        Self {
            name: name.into(),
            power_kw,
            hours_needed,
            earliest_hour,
            latest_hour,
            priority,
        }
    }

    /// Returns `true` for the must-run priority level.
    pub fn is_must_run(&self) -> bool {
        self.priority == MUST_RUN_PRIORITY
    }

    /// Checks every field against the input contract and returns all
    /// violations found.
    ///
    /// Returns an empty vector if the record is valid.
    pub fn validate(&self) -> Vec<ApplianceError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(ApplianceError::EmptyName);
        }
        if !self.power_kw.is_finite() || self.power_kw <= 0.0 {
            errors.push(ApplianceError::NonPositivePower(self.power_kw));
        }
        if !(1..=HOURS_PER_DAY).contains(&self.hours_needed) {
            errors.push(ApplianceError::HoursNeededOutOfRange(self.hours_needed));
        }
        if self.earliest_hour >= HOURS_PER_DAY {
            errors.push(ApplianceError::EarliestHourOutOfRange(self.earliest_hour));
        }
        if !(1..=HOURS_PER_DAY).contains(&self.latest_hour) {
            errors.push(ApplianceError::LatestHourOutOfRange(self.latest_hour));
        }
        if self.priority == 0 {
            errors.push(ApplianceError::ZeroPriority);
        }

        errors
    }
}

impl fmt::Display for ApplianceDemand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.2} kW × {}h, window {:02}:00-{:02}:00, priority {})",
            self.name,
            self.power_kw,
            self.hours_needed,
            self.earliest_hour,
            self.latest_hour,
            self.priority
        )
    }
}

/// A field of an [`ApplianceDemand`] that violates the input contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApplianceError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("power must be > 0 kW, got {0}")]
    NonPositivePower(f64),
    #[error("operating hours must be in [1, {HOURS_PER_DAY}], got {0}")]
    HoursNeededOutOfRange(usize),
    #[error("earliest hour must be in [0, 23], got {0}")]
    EarliestHourOutOfRange(usize),
    #[error("latest hour must be in [1, {HOURS_PER_DAY}], got {0}")]
    LatestHourOutOfRange(usize),
    #[error("priority must be >= 1")]
    ZeroPriority,
}

impl ApplianceError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::NonPositivePower(_) => "power_kw",
            Self::HoursNeededOutOfRange(_) => "hours_needed",
            Self::EarliestHourOutOfRange(_) => "earliest_hour",
            Self::LatestHourOutOfRange(_) => "latest_hour",
            Self::ZeroPriority => "priority",
        }
    }
}
