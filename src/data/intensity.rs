//! National Grid ESO regional carbon-intensity API integration.

use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::info;

use crate::domain::IntensityRecord;
use crate::error::AppError;

const BASE_URL: &str = "https://api.carbonintensity.org.uk";

/// Region id for London in the regional intensity API.
pub const LONDON_REGION_ID: u32 = 13;

/// Blocking client for the regional intensity endpoint (unauthenticated).
pub struct CarbonIntensityClient {
    client: Client,
}

impl CarbonIntensityClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Fetch half-hourly intensity and fuel-mix windows for a region over
    /// `[from, to)`.
    ///
    /// Numeric fields are typed, so a non-numeric value in the body fails
    /// JSON decoding and surfaces as an upstream error; no further domain
    /// validation happens here.
    pub fn fetch_regional(
        &self,
        region_id: u32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<IntensityRecord>, AppError> {
        let url = format!(
            "{BASE_URL}/regional/intensity/{}/{}/regionid/{region_id}",
            minute_utc(from),
            minute_utc(to),
        );

        let resp = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .map_err(|e| AppError::upstream(format!("regional intensity request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::upstream(format!(
                "regional intensity request failed with status {}.",
                resp.status()
            )));
        }

        let body: RegionalResponse = resp.json().map_err(|e| {
            AppError::upstream(format!("Failed to parse regional intensity response: {e}"))
        })?;

        let records = body.data.data;
        if let (Some(first), Some(last)) = (records.first(), records.last()) {
            info!(
                region_id,
                windows = records.len(),
                from = %first.from,
                to = %last.to,
                "fetched regional intensity"
            );
        }

        Ok(records)
    }
}

impl Default for CarbonIntensityClient {
    fn default() -> Self {
        Self::new()
    }
}

/// ISO8601 UTC truncated to minute precision, the timestamp form the
/// endpoint expects (`2023-01-01T00:00Z`).
fn minute_utc(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%MZ").to_string()
}

#[derive(Debug, Deserialize)]
struct RegionalResponse {
    data: RegionalData,
}

/// The endpoint nests the half-hour sequence one level below region metadata.
#[derive(Debug, Deserialize)]
struct RegionalData {
    data: Vec<IntensityRecord>,
}
