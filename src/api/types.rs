//! API request, response, and query types.

use serde::{Deserialize, Serialize};

use crate::config::{ApplianceConfig, ConfigError, TariffConfig};
use crate::tariff::{HOURS_PER_DAY, TariffCurve};

/// Body of `POST /schedule`.
///
/// Omitted `max_power_kw` and `tariff` fall back to the server's startup
/// values.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanRequest {
    /// Appliances to schedule, in input order.
    pub appliances: Vec<ApplianceConfig>,
    /// Power ceiling override (kW).
    #[serde(default)]
    pub max_power_kw: Option<f64>,
    /// Tariff override: a provider name or custom prices.
    #[serde(default)]
    pub tariff: Option<TariffConfig>,
}

/// Hourly tariff response.
#[derive(Debug, Serialize)]
pub struct TariffResponse {
    /// 24 hourly prices (€/kWh).
    pub prices: TariffCurve,
    /// Cheapest hourly price.
    pub min_price: f64,
    /// Most expensive hourly price.
    pub max_price: f64,
}

impl From<&TariffCurve> for TariffResponse {
    fn from(curve: &TariffCurve) -> Self {
        let (min_price, max_price) = curve.bounds();
        Self {
            prices: curve.clone(),
            min_price,
            max_price,
        }
    }
}

/// Optional range query parameters for the hours endpoint.
#[derive(Debug, Deserialize)]
pub struct HoursQuery {
    /// First hour (inclusive).
    pub from: Option<usize>,
    /// Last hour (inclusive).
    pub to: Option<usize>,
}

impl HoursQuery {
    /// Resolves the inclusive hour range, or describes why it is invalid.
    pub fn range(&self) -> Result<(usize, usize), String> {
        let from = self.from.unwrap_or(0);
        let to = self.to.unwrap_or(HOURS_PER_DAY - 1);
        if from > to {
            return Err(format!("`from` ({from}) must be <= `to` ({to})"));
        }
        if to >= HOURS_PER_DAY {
            return Err(format!("`to` ({to}) must be < {HOURS_PER_DAY}"));
        }
        Ok((from, to))
    }
}

/// One rejected input field.
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl From<ConfigError> for FieldError {
    fn from(e: ConfigError) -> Self {
        Self {
            field: e.field,
            message: e.message,
        }
    }
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Per-field validation failures, when applicable.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            fields: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_query_defaults_to_full_day() {
        let q = HoursQuery {
            from: None,
            to: None,
        };
        assert_eq!(q.range(), Ok((0, 23)));
    }

    #[test]
    fn hours_query_rejects_inverted_and_out_of_range() {
        let inverted = HoursQuery {
            from: Some(10),
            to: Some(5),
        };
        assert!(inverted.range().is_err());
        let too_far = HoursQuery {
            from: Some(0),
            to: Some(24),
        };
        assert!(too_far.range().is_err());
    }

    #[test]
    fn plan_request_parses_minimal_body() {
        let body = r#"{"appliances": [{"name": "Dishwasher", "hours_needed": 1}]}"#;
        let req: PlanRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.appliances.len(), 1);
        assert!(req.max_power_kw.is_none());
        assert!(req.tariff.is_none());
    }

    #[test]
    fn tariff_response_reports_bounds() {
        let curve = crate::tariff::Provider::Dei.curve();
        let resp = TariffResponse::from(&curve);
        assert_eq!(resp.min_price, 0.126);
        assert_eq!(resp.max_price, 0.156);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["prices"].as_array().map(Vec::len), Some(24));
    }
}
