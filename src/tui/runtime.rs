//! TUI application state: the active scenario and its computed schedule.

use crate::config::{Scenario, ScenarioConfig};
use crate::sched::plan;
use crate::sched::report::ScheduleReport;
use crate::tariff::{HOURS_PER_DAY, Provider};

/// TUI application state.
pub struct App {
    /// Inputs of the schedule on screen.
    scenario: Scenario,
    /// Schedule computed from `scenario`.
    pub report: ScheduleReport,
    /// Index into `Provider::ALL` when a built-in tariff is active.
    pub provider_idx: Option<usize>,
    /// Index into `ScenarioConfig::PRESETS` once a preset is loaded.
    pub preset_idx: Option<usize>,
    /// First table row shown.
    pub scroll: usize,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// Last error from a preset switch, shown in the footer.
    pub status: Option<String>,
}

impl App {
    /// Creates the app and computes the initial schedule.
    pub fn new(scenario: Scenario) -> Self {
        let provider_idx = Provider::from_name(&scenario.tariff_label)
            .and_then(|p| Provider::ALL.iter().position(|&q| q == p));
        let report = plan(&scenario.appliances, &scenario.tariff, scenario.max_power_kw);
        Self {
            scenario,
            report,
            provider_idx,
            preset_idx: None,
            scroll: 0,
            quit: false,
            status: None,
        }
    }

    /// Active scenario.
    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    fn recompute(&mut self) {
        let s = &self.scenario;
        self.report = plan(&s.appliances, &s.tariff, s.max_power_kw);
        tracing::debug!(
            tariff = %s.tariff_label,
            total_cost = self.report.total_cost,
            "schedule recomputed"
        );
    }

    /// Switches to the built-in provider at `idx` and reschedules.
    ///
    /// Out-of-range indices are ignored.
    pub fn select_provider(&mut self, idx: usize) {
        let Some(&provider) = Provider::ALL.get(idx) else {
            return;
        };
        self.scenario.tariff = provider.curve();
        self.scenario.tariff_label = provider.name().to_string();
        self.provider_idx = Some(idx);
        self.recompute();
    }

    /// Loads the next built-in preset, wrapping around.
    pub fn next_preset(&mut self) {
        let idx = self
            .preset_idx
            .map_or(0, |i| (i + 1) % ScenarioConfig::PRESETS.len());
        let name = ScenarioConfig::PRESETS[idx];
        let built = ScenarioConfig::from_preset(name)
            .map_err(|e| e.to_string())
            .and_then(|cfg| {
                cfg.build().map_err(|errs| {
                    errs.iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("; ")
                })
            });
        match built {
            Ok(scenario) => {
                *self = Self {
                    preset_idx: Some(idx),
                    ..Self::new(scenario)
                };
            }
            Err(e) => self.status = Some(e),
        }
    }

    /// Name of the loaded preset, if any.
    pub fn preset_name(&self) -> Option<&'static str> {
        self.preset_idx.map(|i| ScenarioConfig::PRESETS[i])
    }

    pub fn scroll_down(&mut self) {
        if self.scroll + 1 < HOURS_PER_DAY {
            self.scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evening_app() -> App {
        let scenario = ScenarioConfig::evening_peak().build().unwrap();
        App::new(scenario)
    }

    #[test]
    fn app_starts_with_computed_report() {
        let app = evening_app();
        assert_eq!(app.report.rows.len(), HOURS_PER_DAY);
        assert_eq!(app.provider_idx, Some(0));
        assert!(app.preset_name().is_none());
        assert!(app.report.total_cost > 0.0);
    }

    #[test]
    fn select_provider_recomputes() {
        let mut app = evening_app();
        let before = app.report.total_cost;
        app.select_provider(3);
        assert_eq!(app.provider_idx, Some(3));
        assert_eq!(app.scenario().tariff_label, "protergia");
        assert!(app.report.total_cost < before);

        app.select_provider(9);
        assert_eq!(app.provider_idx, Some(3));
    }

    #[test]
    fn next_preset_cycles_and_wraps() {
        let mut app = evening_app();
        app.scroll = 5;
        app.next_preset();
        assert_eq!(app.preset_name(), Some("evening_peak"));
        assert_eq!(app.scroll, 0);
        app.next_preset();
        assert_eq!(app.preset_name(), Some("night_saver"));
        app.next_preset();
        assert_eq!(app.preset_name(), Some("overloaded"));
        assert_eq!(app.scenario().tariff_label, "heron");
        assert!(app.report.has_forced());
        app.next_preset();
        assert_eq!(app.preset_name(), Some("evening_peak"));
    }

    #[test]
    fn scroll_stays_in_bounds() {
        let mut app = evening_app();
        app.scroll_up();
        assert_eq!(app.scroll, 0);
        for _ in 0..50 {
            app.scroll_down();
        }
        assert_eq!(app.scroll, HOURS_PER_DAY - 1);
    }
}
