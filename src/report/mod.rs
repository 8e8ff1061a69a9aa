//! Report assembly: pairing each fixed question with its computed answer.
//!
//! The two computation blocks are modeled as plain `Result`s; a failed block
//! is logged here and its answers stay unset, so one block failing never
//! hides the other block's results.

use tracing::error;

use crate::aggregate::MonthlyEmissions;
use crate::domain::FuelShare;
use crate::error::AppError;

pub mod format;

/// The three fixed questions this run answers.
pub const QUESTION_CONSUMPTION: &str = "1. The monthly energy consumed by the building (kWh)";
pub const QUESTION_CO2: &str =
    "2. The monthly amount of CO2 (kgs) emitted by the electricity generated for the building";
pub const QUESTION_FUEL_MIX: &str =
    "3. The monthly % of fuel mix (wind/solar/nuclear/coal/etc) used to generate the electricity.";

/// A computed answer to one of the three questions.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Whole-period consumption in kWh.
    Kwh(i64),
    /// Whole-period emissions in kg CO2.
    Co2Kg(i64),
    /// Average fuel mix, percentages to 2 dp, fuels in first-seen order.
    FuelMix(Vec<FuelShare>),
}

/// One question with its answer, if the owning block succeeded.
#[derive(Debug, Clone)]
pub struct Challenge {
    pub question: &'static str,
    pub answer: Option<Answer>,
}

/// Assemble the report from the two computation blocks.
pub fn assemble(
    monthly_total: Result<i64, AppError>,
    emissions: Result<MonthlyEmissions, AppError>,
) -> Vec<Challenge> {
    let kwh = match monthly_total {
        Ok(v) => Some(v),
        Err(err) => {
            error!(%err, "monthly consumption total failed");
            None
        }
    };

    let (co2_kg, fuel_mix) = match emissions {
        Ok(e) => (Some(e.co2_kg), Some(e.fuel_mix)),
        Err(err) => {
            error!(%err, "CO2 / fuel-mix aggregation failed");
            (None, None)
        }
    };

    vec![
        Challenge {
            question: QUESTION_CONSUMPTION,
            answer: kwh.map(Answer::Kwh),
        },
        Challenge {
            question: QUESTION_CO2,
            answer: co2_kg.map(Answer::Co2Kg),
        },
        Challenge {
            question: QUESTION_FUEL_MIX,
            answer: fuel_mix.map(Answer::FuelMix),
        },
    ]
}
