//! The fixed-month report pipeline.
//!
//! Keeping the assembly step separate from the fetches means it can be
//! exercised in tests with injected results, without any network.

use chrono::{DateTime, TimeZone, Utc};
use tracing::info;

use crate::aggregate;
use crate::data::{CarbonIntensityClient, LONDON_REGION_ID, OpenVoltClient};
use crate::domain::{Granularity, IntensityRecord, IntervalRecord};
use crate::error::AppError;
use crate::report::{self, Challenge};

/// Meter under audit.
const METER_ID: &str = "6514167223e3d1424bf82742";

/// Report window: January 2023, UTC. The end instant is exclusive.
fn report_window() -> (DateTime<Utc>, DateTime<Utc>) {
    (
        Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2023, 2, 1, 0, 0, 0).unwrap(),
    )
}

/// Execute both computation blocks and assemble the report.
///
/// Fetches run sequentially; each block's error is logged during assembly
/// and the report still prints, so block failures are diagnostics, not
/// process failures.
pub fn run_report() -> Vec<Challenge> {
    let (from, to) = report_window();
    let start_date = from.date_naive();
    let end_date = to.date_naive();

    info!(meter_id = METER_ID, %start_date, %end_date, "running monthly report");

    let (month_total, half_hourly) = match OpenVoltClient::from_env() {
        Ok(client) => (
            client.fetch_interval(METER_ID, start_date, end_date, Granularity::MonthTotal),
            client.fetch_interval(METER_ID, start_date, end_date, Granularity::HalfHourly),
        ),
        // A missing credential fails both consumption fetches the same way.
        Err(err) => (Err(err.clone()), Err(err)),
    };

    let intensity = CarbonIntensityClient::new().fetch_regional(LONDON_REGION_ID, from, to);

    assemble_report(month_total, half_hourly, intensity)
}

/// Assemble the final report from pre-fetched inputs.
pub fn assemble_report(
    month_total: Result<Vec<IntervalRecord>, AppError>,
    half_hourly: Result<Vec<IntervalRecord>, AppError>,
    intensity: Result<Vec<IntensityRecord>, AppError>,
) -> Vec<Challenge> {
    let monthly_total = month_total.and_then(|records| aggregate::total_consumption(&records));

    let emissions = half_hourly.and_then(|consumption| {
        let intensity = intensity?;
        aggregate::join_and_reduce(&consumption, &intensity)
    });

    report::assemble(monthly_total, emissions)
}
