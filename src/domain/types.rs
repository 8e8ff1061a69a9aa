//! Shared domain types.
//!
//! These mirror the wire shapes of the two upstream APIs closely enough to
//! deserialize straight off the response body, so the aggregation pass can
//! consume them without an intermediate conversion layer.

use serde::Deserialize;

/// Bucket width for an interval-data request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// One bucket covering the whole requested period.
    MonthTotal,
    /// One bucket per half hour.
    HalfHourly,
}

impl Granularity {
    /// Query-string value understood by the interval-data endpoint.
    pub fn wire_value(self) -> &'static str {
        match self {
            Granularity::MonthTotal => "year",
            Granularity::HalfHourly => "hh",
        }
    }
}

/// One consumption bucket from the interval-data endpoint.
///
/// `consumption` is a numeric string on the wire; parsing is deferred to the
/// aggregation pass so a bad value can be reported with its bucket index.
#[derive(Debug, Clone, Deserialize)]
pub struct IntervalRecord {
    pub consumption: String,
    pub consumption_units: String,
}

/// One half-hour window from the regional intensity endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct IntensityRecord {
    /// Window start (ISO8601, minute precision).
    pub from: String,
    /// Window end (ISO8601, minute precision).
    pub to: String,
    pub intensity: Intensity,
    pub generationmix: Vec<FuelShare>,
}

/// Intensity figures for one half-hour window.
#[derive(Debug, Clone, Deserialize)]
pub struct Intensity {
    /// Forecast carbon intensity in gCO2/kWh.
    pub forecast: f64,
}

/// One fuel's share of generation, as a percentage (0-100).
///
/// Used both on the wire (per half-hour window) and as the averaged output
/// of the monthly fuel-mix reduction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FuelShare {
    pub fuel: String,
    pub perc: f64,
}
