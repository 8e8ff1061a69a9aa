//! The half-hourly join-and-aggregate core.
//!
//! Everything here is a pure single-pass reduction over already-fetched
//! sequences:
//!
//! - `total_consumption` reads the whole-period bucket
//! - `join_and_reduce` walks the two half-hourly sequences in lockstep and
//!   accumulates CO2 mass plus a running fuel-mix average

use crate::domain::{FuelShare, IntensityRecord, IntervalRecord};
use crate::error::AppError;

/// Unit the interval-data endpoint is expected to report in.
const EXPECTED_UNIT: &str = "kWh";

/// Outputs of the half-hourly reduction.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyEmissions {
    /// Total CO2 mass for the period, rounded to the nearest kilogram.
    pub co2_kg: i64,
    /// Average fuel mix over the period, percentages rounded to 2 dp,
    /// fuels in first-seen order.
    pub fuel_mix: Vec<FuelShare>,
}

/// Whole-period consumption in kWh.
///
/// A month-granularity request yields exactly one bucket covering the whole
/// period, so this reads the first record. The unit check is likewise applied
/// to the first record only.
pub fn total_consumption(records: &[IntervalRecord]) -> Result<i64, AppError> {
    let first = records
        .first()
        .ok_or_else(|| AppError::data_shape("Empty interval-data response."))?;

    if first.consumption_units != EXPECTED_UNIT {
        return Err(AppError::data_shape(format!(
            "Unexpected consumption unit '{}' (expected {EXPECTED_UNIT}).",
            first.consumption_units
        )));
    }

    parse_kwh(&first.consumption, 0)
}

/// Join the two half-hourly sequences by index and reduce them to a CO2
/// total and an average fuel mix.
///
/// Bucket i of `consumption` and window i of `intensity` must describe the
/// same half hour; the caller guarantees this by requesting matching ranges
/// from both sources. Unequal lengths fail rather than truncate.
pub fn join_and_reduce(
    consumption: &[IntervalRecord],
    intensity: &[IntensityRecord],
) -> Result<MonthlyEmissions, AppError> {
    if consumption.len() != intensity.len() {
        return Err(AppError::data_shape(format!(
            "Misaligned half-hourly series: {} consumption buckets vs {} intensity windows.",
            consumption.len(),
            intensity.len()
        )));
    }
    if consumption.is_empty() {
        return Err(AppError::data_shape("No half-hourly buckets to aggregate."));
    }

    let n = consumption.len();
    let mut co2_kg = 0.0_f64;
    let mut mix = FuelMixAccumulator::new();

    for (i, (bucket, window)) in consumption.iter().zip(intensity).enumerate() {
        let kwh = parse_kwh(&bucket.consumption, i)?;

        // forecast is gCO2/kWh; dividing by 1000 gives kg per kWh.
        co2_kg += kwh as f64 * (window.intensity.forecast / 1000.0);

        for share in &window.generationmix {
            // Summing perc/N over all windows is the same average as summing
            // then dividing once at the end.
            mix.add(&share.fuel, share.perc / n as f64);
        }
    }

    Ok(MonthlyEmissions {
        co2_kg: co2_kg.round() as i64,
        fuel_mix: mix.into_rounded(),
    })
}

/// Running per-fuel percentage sums, keyed in first-seen order.
///
/// The fuel set is small (around ten entries), so a Vec scan keeps insertion
/// order for free without pulling in an ordered map.
#[derive(Debug, Default)]
struct FuelMixAccumulator {
    sums: Vec<(String, f64)>,
}

impl FuelMixAccumulator {
    fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, fuel: &str, value: f64) {
        match self.sums.iter_mut().find(|(name, _)| name == fuel) {
            Some((_, sum)) => *sum += value,
            None => self.sums.push((fuel.to_string(), value)),
        }
    }

    /// Finish the average: round each percentage to 2 dp.
    fn into_rounded(self) -> Vec<FuelShare> {
        self.sums
            .into_iter()
            .map(|(fuel, perc)| FuelShare {
                fuel,
                perc: (perc * 100.0).round() / 100.0,
            })
            .collect()
    }
}

/// Parse a consumption string as whole kWh.
///
/// A malformed value aborts the surrounding computation with the offending
/// bucket index rather than poisoning the running totals.
fn parse_kwh(raw: &str, bucket: usize) -> Result<i64, AppError> {
    raw.trim().parse::<i64>().map_err(|_| {
        AppError::data_shape(format!(
            "Could not parse consumption '{raw}' in bucket {bucket} as an integer."
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(consumption: &str) -> IntervalRecord {
        IntervalRecord {
            consumption: consumption.to_string(),
            consumption_units: "kWh".to_string(),
        }
    }

    fn window(forecast: f64, mix: &[(&str, f64)]) -> IntensityRecord {
        IntensityRecord {
            from: "2023-01-01T00:00Z".to_string(),
            to: "2023-01-01T00:30Z".to_string(),
            intensity: crate::domain::Intensity { forecast },
            generationmix: mix
                .iter()
                .map(|(fuel, perc)| FuelShare {
                    fuel: fuel.to_string(),
                    perc: *perc,
                })
                .collect(),
        }
    }

    #[test]
    fn total_consumption_reads_single_bucket() {
        let records = vec![interval("1234")];
        assert_eq!(total_consumption(&records).unwrap(), 1234);
    }

    #[test]
    fn total_consumption_rejects_wrong_unit() {
        let records = vec![IntervalRecord {
            consumption: "1234".to_string(),
            consumption_units: "MWh".to_string(),
        }];
        let err = total_consumption(&records).unwrap_err();
        assert!(matches!(err, AppError::DataShape(_)), "got {err:?}");
    }

    #[test]
    fn total_consumption_rejects_non_integer_value() {
        let records = vec![interval("12.5kWh")];
        let err = total_consumption(&records).unwrap_err();
        assert!(matches!(err, AppError::DataShape(_)), "got {err:?}");
    }

    #[test]
    fn total_consumption_rejects_empty_input() {
        let err = total_consumption(&[]).unwrap_err();
        assert!(matches!(err, AppError::DataShape(_)), "got {err:?}");
    }

    #[test]
    fn join_and_reduce_computes_co2_total() {
        // 100 kWh at 50 g/kWh + 200 kWh at 100 g/kWh
        // = 5 kg + 20 kg = 25 kg.
        let consumption = vec![interval("100"), interval("200")];
        let intensity = vec![window(50.0, &[]), window(100.0, &[])];

        let out = join_and_reduce(&consumption, &intensity).unwrap();
        assert_eq!(out.co2_kg, 25);
    }

    #[test]
    fn join_and_reduce_averages_fuel_mix() {
        let consumption = vec![interval("0"), interval("0")];
        let intensity = vec![
            window(0.0, &[("wind", 40.0)]),
            window(0.0, &[("wind", 60.0)]),
        ];

        let out = join_and_reduce(&consumption, &intensity).unwrap();
        assert_eq!(
            out.fuel_mix,
            vec![FuelShare {
                fuel: "wind".to_string(),
                perc: 50.0
            }]
        );
    }

    #[test]
    fn fuel_keys_preserve_first_seen_order() {
        // "solar" only appears from the second window; it must come after
        // the fuels introduced in the first, and a fuel missing from a
        // window simply contributes nothing for that window.
        let consumption = vec![interval("0"), interval("0")];
        let intensity = vec![
            window(0.0, &[("gas", 60.0), ("wind", 40.0)]),
            window(0.0, &[("wind", 40.0), ("solar", 30.0), ("gas", 30.0)]),
        ];

        let out = join_and_reduce(&consumption, &intensity).unwrap();
        let fuels: Vec<&str> = out.fuel_mix.iter().map(|s| s.fuel.as_str()).collect();
        assert_eq!(fuels, vec!["gas", "wind", "solar"]);
        assert_eq!(out.fuel_mix[0].perc, 45.0);
        assert_eq!(out.fuel_mix[1].perc, 40.0);
        assert_eq!(out.fuel_mix[2].perc, 15.0);
    }

    #[test]
    fn fuel_mix_rounds_to_two_decimal_places() {
        let consumption = vec![interval("0"); 3];
        let intensity = vec![
            window(0.0, &[("wind", 33.3)]),
            window(0.0, &[("wind", 33.3)]),
            window(0.0, &[("wind", 33.4)]),
        ];

        let out = join_and_reduce(&consumption, &intensity).unwrap();
        assert_eq!(out.fuel_mix[0].perc, 33.33);
    }

    #[test]
    fn co2_total_rounds_to_nearest_integer() {
        // 3 kWh at 512 g/kWh = 1.536 kg -> 2 kg.
        let consumption = vec![interval("3")];
        let intensity = vec![window(512.0, &[])];

        let out = join_and_reduce(&consumption, &intensity).unwrap();
        assert_eq!(out.co2_kg, 2);
    }

    #[test]
    fn join_and_reduce_is_idempotent() {
        let consumption = vec![interval("100"), interval("200")];
        let intensity = vec![
            window(50.0, &[("wind", 40.0)]),
            window(100.0, &[("wind", 60.0)]),
        ];

        let first = join_and_reduce(&consumption, &intensity).unwrap();
        let second = join_and_reduce(&consumption, &intensity).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn join_and_reduce_rejects_length_mismatch() {
        let consumption = vec![interval("100"), interval("200")];
        let intensity = vec![window(50.0, &[])];

        let err = join_and_reduce(&consumption, &intensity).unwrap_err();
        assert!(matches!(err, AppError::DataShape(_)), "got {err:?}");
    }

    #[test]
    fn join_and_reduce_rejects_empty_input() {
        let err = join_and_reduce(&[], &[]).unwrap_err();
        assert!(matches!(err, AppError::DataShape(_)), "got {err:?}");
    }

    #[test]
    fn join_and_reduce_rejects_malformed_bucket() {
        // A bad value in any bucket aborts the whole block instead of
        // skewing the totals.
        let consumption = vec![interval("100"), interval("oops")];
        let intensity = vec![window(50.0, &[]), window(100.0, &[])];

        let err = join_and_reduce(&consumption, &intensity).unwrap_err();
        assert!(matches!(err, AppError::DataShape(_)), "got {err:?}");
        assert!(err.to_string().contains("bucket 1"), "got {err}");
    }
}
