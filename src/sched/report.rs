//! Presentation view of a finished schedule.

use std::fmt;

use serde::Serialize;

use super::ledger::Schedule;

/// Rounds `value` to `places` decimal places. Exact halves go to the even
/// neighbour, so `0.125` rounds to `0.12`.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round_ties_even() / scale
}

/// Formats an hour index as `HH:00`.
pub fn hour_label(hour: usize) -> String {
    format!("{hour:02}:00")
}

/// One displayed row of the hourly table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourRow {
    /// Hour index (0-23).
    pub hour: usize,
    /// Hour label, `HH:00`.
    pub label: String,
    /// Appliance names joined with `", "`.
    pub devices: String,
    /// Load rounded to 2 decimal places (kW).
    pub power_kw: f64,
    /// Cost rounded to 3 decimal places (€).
    pub cost: f64,
}

/// Hours one appliance was scheduled into.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplianceSummary {
    pub name: String,
    pub hours_needed: usize,
    pub hours: Vec<usize>,
    pub forced: bool,
}

/// Rounded, display-ready view of a [`Schedule`].
///
/// Built from the full-precision ledger and never fed back into it, so
/// rebuilding from the same schedule always yields the same report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleReport {
    /// 24 rows, one per hour.
    pub rows: Vec<HourRow>,
    /// Total daily cost rounded to 2 decimal places (€).
    pub total_cost: f64,
    /// Sorted, de-duplicated names of forced appliances.
    pub forced: Vec<String>,
    /// Per-appliance scheduled hours in processing order.
    pub summary: Vec<ApplianceSummary>,
    /// Power ceiling used for the run (kW).
    pub max_power_kw: f64,
    /// Highest hourly load, rounded to 2 decimal places (kW).
    pub peak_power_kw: f64,
    /// Hours whose load exceeds the ceiling.
    pub hours_over_ceiling: Vec<usize>,
}

impl ScheduleReport {
    /// Builds the presentation view of `schedule`.
    ///
    /// # Arguments
    ///
    /// * `schedule` - Finished schedule
    /// * `max_power_kw` - Ceiling used for the run, for violation reporting
    pub fn from_schedule(schedule: &Schedule, max_power_kw: f64) -> Self {
        let rows = schedule
            .slots()
            .iter()
            .enumerate()
            .map(|(hour, slot)| HourRow {
                hour,
                label: hour_label(hour),
                devices: slot.appliances.join(", "),
                power_kw: round_to(slot.power_kw, 2),
                cost: round_to(slot.cost, 3),
            })
            .collect();

        let mut forced = schedule.forced().to_vec();
        forced.sort();
        forced.dedup();

        let summary = schedule
            .placements()
            .iter()
            .map(|p| ApplianceSummary {
                name: p.name.clone(),
                hours_needed: p.hours_needed,
                hours: p.hours.clone(),
                forced: p.forced,
            })
            .collect();

        Self {
            rows,
            total_cost: round_to(schedule.total_cost(), 2),
            forced,
            summary,
            max_power_kw,
            peak_power_kw: round_to(schedule.peak_power_kw(), 2),
            hours_over_ceiling: schedule.hours_over(max_power_kw),
        }
    }

    /// Returns `true` when any appliance was forced past the ceiling.
    pub fn has_forced(&self) -> bool {
        !self.forced.is_empty()
    }

    /// User-facing warning naming the forced appliances, if any.
    pub fn forced_warning(&self) -> Option<String> {
        self.has_forced().then(|| {
            format!(
                "Some high-priority appliances were forced past the {:.2} kW power limit: {}",
                self.max_power_kw,
                self.forced.join(", ")
            )
        })
    }

    /// Per-appliance run summary, for display.
    pub fn summary_view(&self) -> SummaryView<'_> {
        SummaryView(self)
    }
}

impl fmt::Display for ScheduleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .rows
            .iter()
            .map(|r| r.devices.chars().count())
            .max()
            .unwrap_or(0)
            .max("Devices".len());

        writeln!(
            f,
            "{:<5} | {:<width$} | {:>10} | {:>8}",
            "Hour", "Devices", "Power (kW)", "Cost (€)"
        )?;
        writeln!(f, "{}", "-".repeat(5 + 3 + width + 3 + 10 + 3 + 8))?;
        for r in &self.rows {
            writeln!(
                f,
                "{:<5} | {:<width$} | {:>10.2} | {:>8.3}",
                r.label, r.devices, r.power_kw, r.cost
            )?;
        }
        writeln!(f)?;
        write!(f, "Total daily cost:      €{:.2}", self.total_cost)?;
        write!(
            f,
            "\nPeak load:             {:.2} kW (limit {:.2} kW)",
            self.peak_power_kw, self.max_power_kw
        )?;
        if let Some(warning) = self.forced_warning() {
            write!(f, "\nWarning: {warning}")?;
        }
        Ok(())
    }
}

/// Display adapter listing each appliance's scheduled hours.
pub struct SummaryView<'a>(&'a ScheduleReport);

impl fmt::Display for SummaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--- Run Summary ---")?;
        for s in &self.0.summary {
            let hours: Vec<String> = s.hours.iter().map(|&h| hour_label(h)).collect();
            write!(
                f,
                "\n{}: {}/{}h [{}]",
                s.name,
                s.hours.len(),
                s.hours_needed,
                hours.join(", ")
            )?;
            if s.forced {
                write!(f, " (forced)")?;
            }
        }
        Ok(())
    }
}
