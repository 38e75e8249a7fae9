//! Hourly tariff curves and the built-in provider price plans.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of hourly slots in a scheduling day.
pub const HOURS_PER_DAY: usize = 24;

/// Reasons a price vector cannot become a [`TariffCurve`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TariffError {
    /// The curve did not contain exactly one price per hour.
    #[error("tariff must have exactly {HOURS_PER_DAY} hourly prices, got {0}")]
    WrongLength(usize),
    /// A price was below zero.
    #[error("tariff price at hour {hour} is negative ({price})")]
    NegativePrice { hour: usize, price: f64 },
    /// A price was NaN or infinite.
    #[error("tariff price at hour {hour} is not a finite number")]
    NonFinitePrice { hour: usize },
}

/// Price per kWh for each hour of the day, indexed `0..24`.
///
/// Always holds exactly [`HOURS_PER_DAY`] non-negative finite prices; the
/// only way to build one is through [`TariffCurve::new`] or a [`Provider`].
///
/// # Examples
///
/// ```
/// use load_scheduler::tariff::TariffCurve;
///
/// let curve = TariffCurve::flat(0.10).expect("flat curve is valid");
/// assert_eq!(curve[13], 0.10);
/// assert!(TariffCurve::new(vec![0.1; 23]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TariffCurve {
    prices: [f64; HOURS_PER_DAY],
}

impl TariffCurve {
    /// Builds a curve from 24 hourly prices.
    ///
    /// # Errors
    ///
    /// Returns a [`TariffError`] if the vector is not 24 long or any price is
    /// negative or not finite.
    pub fn new(prices: Vec<f64>) -> Result<Self, TariffError> {
        let prices: [f64; HOURS_PER_DAY] = prices
            .try_into()
            .map_err(|v: Vec<f64>| TariffError::WrongLength(v.len()))?;

        for (hour, &price) in prices.iter().enumerate() {
            if !price.is_finite() {
                return Err(TariffError::NonFinitePrice { hour });
            }
            if price < 0.0 {
                return Err(TariffError::NegativePrice { hour, price });
            }
        }

        Ok(Self { prices })
    }

    /// Builds a curve with the same price in every hour.
    ///
    /// # Errors
    ///
    /// Returns a [`TariffError`] if `price` is negative or not finite.
    pub fn flat(price: f64) -> Result<Self, TariffError> {
        Self::new(vec![price; HOURS_PER_DAY])
    }

    /// Returns the price for `hour`.
    ///
    /// # Panics
    ///
    /// Panics if `hour >= 24`.
    pub fn price(&self, hour: usize) -> f64 {
        self.prices[hour]
    }

    /// Returns all 24 prices in hour order.
    pub fn prices(&self) -> &[f64; HOURS_PER_DAY] {
        &self.prices
    }

    /// Returns the lowest and highest hourly prices.
    pub fn bounds(&self) -> (f64, f64) {
        self.prices
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
                (lo.min(p), hi.max(p))
            })
    }
}

impl Index<usize> for TariffCurve {
    type Output = f64;

    fn index(&self, hour: usize) -> &f64 {
        &self.prices[hour]
    }
}

impl<'de> Deserialize<'de> for TariffCurve {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let prices = Vec::<f64>::deserialize(deserializer)?;
        Self::new(prices).map_err(serde::de::Error::custom)
    }
}

/// Retail electricity providers with a built-in price plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Day/night plan: cheaper from 23:00 to 08:00.
    Dei,
    /// Flat 0.095 €/kWh.
    Heron,
    /// Flat 0.099 €/kWh.
    Elpedison,
    /// Flat 0.094 €/kWh.
    Protergia,
}

/// Night-rate price for the day/night plan (€/kWh).
const DEI_NIGHT_PRICE: f64 = 0.126;
/// Day-rate price for the day/night plan (€/kWh).
const DEI_DAY_PRICE: f64 = 0.156;
/// First hour of the day rate.
const DEI_DAY_START: usize = 8;
/// First hour of the night rate.
const DEI_NIGHT_START: usize = 23;

impl Provider {
    /// All built-in providers, in menu order.
    pub const ALL: [Provider; 4] = [
        Provider::Dei,
        Provider::Heron,
        Provider::Elpedison,
        Provider::Protergia,
    ];

    /// Available provider names.
    pub const NAMES: &[&str] = &["dei", "heron", "elpedison", "protergia"];

    /// Looks a provider up by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Lower-case identifier used in config files and on the CLI.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dei => "dei",
            Self::Heron => "heron",
            Self::Elpedison => "elpedison",
            Self::Protergia => "protergia",
        }
    }

    /// Returns the provider's hourly price curve.
    pub fn curve(self) -> TariffCurve {
        let prices = std::array::from_fn(|h| match self {
            Self::Dei if h < DEI_DAY_START || h >= DEI_NIGHT_START => DEI_NIGHT_PRICE,
            Self::Dei => DEI_DAY_PRICE,
            Self::Heron => 0.095,
            Self::Elpedison => 0.099,
            Self::Protergia => 0.094,
        });
        TariffCurve { prices }
    }

    /// Short human-readable description of the plan.
    pub fn describe(self) -> String {
        match self {
            Self::Dei => format!(
                "Night 23:00-08:00 -> {DEI_NIGHT_PRICE} €/kWh, Day 08:00-23:00 -> {DEI_DAY_PRICE} €/kWh"
            ),
            other => format!("Flat tariff: {} €/kWh", other.curve().price(0)),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
