//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::appliance::{
    ApplianceDemand, DEFAULT_EARLIEST_HOUR, DEFAULT_HOURS_NEEDED, DEFAULT_LATEST_HOUR,
    DEFAULT_PRIORITY,
};
use crate::catalog;
use crate::sched::allocator::DEFAULT_MAX_POWER_KW;
use crate::tariff::{Provider, TariffCurve};

/// Provider name that selects an explicit `prices` list.
pub const CUSTOM_PROVIDER: &str = "custom";

/// Top-level scenario configuration parsed from TOML.
///
/// All sections have defaults; a file may list only its appliances. Load
/// from TOML with [`ScenarioConfig::from_toml_file`] or pick a built-in
/// preset with [`ScenarioConfig::from_preset`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Allocation parameters.
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Tariff selection.
    #[serde(default)]
    pub tariff: TariffConfig,
    /// Appliances to schedule, in input order.
    #[serde(default, rename = "appliance")]
    pub appliances: Vec<ApplianceConfig>,
}

/// Allocation parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Shared power ceiling (kW, must be > 0).
    pub max_power_kw: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_power_kw: DEFAULT_MAX_POWER_KW,
        }
    }
}

/// Tariff selection: a named provider plan or explicit hourly prices.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffConfig {
    /// Provider name, or `"custom"` to use `prices`.
    pub provider: String,
    /// 24 hourly prices (€/kWh); only read for the custom provider.
    pub prices: Option<Vec<f64>>,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Dei.name().to_string(),
            prices: None,
        }
    }
}

/// One appliance record as written in TOML or CSV.
///
/// Column aliases match the appliance table export, so the same record
/// type reads both formats.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplianceConfig {
    #[serde(alias = "Device")]
    pub name: String,
    /// Running power (kW); falls back to the catalog when omitted.
    #[serde(default, alias = "Power (kW)")]
    pub power_kw: Option<f64>,
    #[serde(default = "default_hours_needed", alias = "Operating Hours")]
    pub hours_needed: usize,
    #[serde(default = "default_earliest_hour", alias = "Earliest Hour")]
    pub earliest_hour: usize,
    #[serde(default = "default_latest_hour", alias = "Latest Hour")]
    pub latest_hour: usize,
    #[serde(default = "default_priority", alias = "Priority")]
    pub priority: u32,
}

fn default_hours_needed() -> usize {
    DEFAULT_HOURS_NEEDED
}

fn default_earliest_hour() -> usize {
    DEFAULT_EARLIEST_HOUR
}

fn default_latest_hour() -> usize {
    DEFAULT_LATEST_HOUR
}

fn default_priority() -> u32 {
    DEFAULT_PRIORITY
}

impl ApplianceConfig {
    /// Record with defaults for everything but the name.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            power_kw: None,
            hours_needed: DEFAULT_HOURS_NEEDED,
            earliest_hour: DEFAULT_EARLIEST_HOUR,
            latest_hour: DEFAULT_LATEST_HOUR,
            priority: DEFAULT_PRIORITY,
        }
    }

    /// Converts to a demand record, filling a missing power rating from the
    /// catalog (or the catalog default for unknown names).
    pub fn to_demand(&self) -> ApplianceDemand {
        let name = self.name.trim();
        let power_kw = self.power_kw.unwrap_or_else(|| {
            catalog::typical_power_kw(name).unwrap_or(catalog::DEFAULT_POWER_KW)
        });
        ApplianceDemand::new(
            name,
            power_kw,
            self.hours_needed,
            self.earliest_hour,
            self.latest_hour,
            self.priority,
        )
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"appliance[2].power_kw"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validated inputs for one scheduling run.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub tariff: TariffCurve,
    /// Label of the tariff source, for display.
    pub tariff_label: String,
    pub max_power_kw: f64,
    pub appliances: Vec<ApplianceDemand>,
}

impl ScenarioConfig {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["evening_peak", "night_saver", "overloaded"];

    /// Typical household on the day/night plan with mixed priorities.
    pub fn evening_peak() -> Self {
        Self {
            scheduler: SchedulerConfig::default(),
            tariff: TariffConfig::default(),
            appliances: vec![
                appliance("Refrigerator", 24, 0, 24, 1),
                appliance("Electric stove", 2, 18, 21, 1),
                appliance("Washing machine", 2, 17, 22, 2),
                appliance("Dishwasher", 2, 20, 24, 2),
                appliance("Television", 4, 19, 23, 3),
                appliance("Air conditioner", 3, 14, 18, 2),
            ],
        }
    }

    /// Flexible loads that may shift into the cheap night hours.
    pub fn night_saver() -> Self {
        Self {
            scheduler: SchedulerConfig::default(),
            tariff: TariffConfig::default(),
            appliances: vec![
                appliance("Refrigerator", 24, 0, 24, 1),
                appliance("Clothes dryer", 2, 0, 8, 2),
                appliance("Washing machine", 2, 23, 24, 2),
                appliance("Dishwasher", 1, 0, 6, 3),
                appliance("Electric blanket", 6, 0, 6, 3),
                appliance("Laptop", 4, 9, 17, 4),
            ],
        }
    }

    /// More must-run load than the ceiling allows in the evening window.
    pub fn overloaded() -> Self {
        Self {
            scheduler: SchedulerConfig::default(),
            tariff: TariffConfig {
                provider: Provider::Heron.name().to_string(),
                prices: None,
            },
            appliances: vec![
                appliance("Electric water heater", 3, 6, 9, 2),
                appliance("Electric heater", 24, 0, 24, 1),
                appliance("Clothes dryer", 24, 0, 24, 1),
                appliance("Electric kettle", 2, 7, 8, 1),
                appliance("Vacuum cleaner", 1, 10, 12, 3),
            ],
        }
    }

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "evening_peak" => Ok(Self::evening_peak()),
            "night_saver" => Ok(Self::night_saver()),
            "overloaded" => Ok(Self::overloaded()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Resolves the configured tariff curve.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an unknown provider, a custom provider
    /// without prices, or an invalid price list.
    pub fn tariff_curve(&self) -> Result<TariffCurve, ConfigError> {
        let t = &self.tariff;
        if t.provider.eq_ignore_ascii_case(CUSTOM_PROVIDER) {
            let prices = t.prices.clone().ok_or_else(|| {
                ConfigError::new("tariff.prices", "required when tariff.provider = \"custom\"")
            })?;
            return TariffCurve::new(prices)
                .map_err(|e| ConfigError::new("tariff.prices", e.to_string()));
        }
        Provider::from_name(&t.provider)
            .map(Provider::curve)
            .ok_or_else(|| {
                ConfigError::new(
                    "tariff.provider",
                    format!(
                        "unknown provider \"{}\", available: {}, {CUSTOM_PROVIDER}",
                        t.provider,
                        Provider::NAMES.join(", ")
                    ),
                )
            })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let max = self.scheduler.max_power_kw;
        if !max.is_finite() || max <= 0.0 {
            errors.push(ConfigError::new("scheduler.max_power_kw", "must be > 0"));
        }

        if let Err(e) = self.tariff_curve() {
            errors.push(e);
        }
        if self.tariff.prices.is_some() && !self.tariff.provider.eq_ignore_ascii_case(CUSTOM_PROVIDER)
        {
            errors.push(ConfigError::new(
                "tariff.prices",
                "only allowed with tariff.provider = \"custom\"",
            ));
        }

        for (i, a) in self.appliances.iter().enumerate() {
            for e in a.to_demand().validate() {
                errors.push(ConfigError::new(
                    format!("appliance[{i}].{}", e.field()),
                    e.to_string(),
                ));
            }
        }

        errors
    }

    /// Validates the configuration and resolves it into run inputs.
    ///
    /// # Errors
    ///
    /// Returns every validation error if the configuration is invalid.
    pub fn build(&self) -> Result<Scenario, Vec<ConfigError>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        let tariff = self.tariff_curve().map_err(|e| vec![e])?;
        Ok(Scenario {
            tariff,
            tariff_label: self.tariff.provider.to_ascii_lowercase(),
            max_power_kw: self.scheduler.max_power_kw,
            appliances: self.appliances.iter().map(ApplianceConfig::to_demand).collect(),
        })
    }
}

/// Catalog-rated appliance record for the presets.
fn appliance(
    name: &str,
    hours_needed: usize,
    earliest_hour: usize,
    latest_hour: usize,
    priority: u32,
) -> ApplianceConfig {
    ApplianceConfig {
        hours_needed,
        earliest_hour,
        latest_hour,
        priority,
        ..ApplianceConfig::named(name)
    }
}
