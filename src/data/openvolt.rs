//! OpenVolt interval-data API integration.

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::info;

use crate::domain::{Granularity, IntervalRecord};
use crate::error::AppError;

const BASE_URL: &str = "https://api.openvolt.com/v1";

/// Blocking client for the interval-data endpoint.
///
/// The API key is injected at construction so callers and tests are not tied
/// to process environment state.
pub struct OpenVoltClient {
    client: Client,
    api_key: String,
}

impl OpenVoltClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Build a client from `.env` / process environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("API_KEY")
            .map_err(|_| AppError::config("Missing API_KEY in environment (.env)."))?;
        Ok(Self::new(api_key))
    }

    /// Fetch consumption buckets for one meter over a date range.
    ///
    /// Range-inclusivity semantics are the endpoint's own; callers pass the
    /// calendar dates they want and the endpoint decides the bucket edges.
    pub fn fetch_interval(
        &self,
        meter_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        granularity: Granularity,
    ) -> Result<Vec<IntervalRecord>, AppError> {
        let resp = self
            .client
            .get(format!("{BASE_URL}/interval-data"))
            .header("accept", "application/json")
            .header("x-api-key", &self.api_key)
            .query(&[
                ("meter_id", meter_id),
                ("start_date", &start_date.to_string()),
                ("end_date", &end_date.to_string()),
                ("granularity", granularity.wire_value()),
            ])
            .send()
            .map_err(|e| AppError::upstream(format!("interval-data request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::upstream(format!(
                "interval-data request failed with status {}.",
                resp.status()
            )));
        }

        let body: IntervalResponse = resp.json().map_err(|e| {
            AppError::upstream(format!("Failed to parse interval-data response: {e}"))
        })?;

        info!(
            meter_id,
            granularity = granularity.wire_value(),
            buckets = body.data.len(),
            "fetched interval data"
        );

        Ok(body.data)
    }
}

#[derive(Debug, Deserialize)]
struct IntervalResponse {
    data: Vec<IntervalRecord>,
}
