//! Formatted terminal output for the three-question report.
//!
//! We keep formatting code in one place so:
//! - the aggregation code stays clean and testable
//! - output changes are localized

use crate::domain::FuelShare;
use crate::report::{Answer, Challenge};

/// Marker shown for a question whose computation failed.
const UNAVAILABLE: &str = "(unavailable - see log)";

/// Render the full report block.
pub fn format_report(challenges: &[Challenge]) -> String {
    let mut out = String::new();

    out.push_str("=== Building Energy & Carbon Report (January 2023) ===\n");
    for challenge in challenges {
        out.push('\n');
        out.push_str(challenge.question);
        out.push('\n');
        match &challenge.answer {
            Some(answer) => out.push_str(&format!("   {}\n", format_answer(answer))),
            None => out.push_str(&format!("   {UNAVAILABLE}\n")),
        }
    }

    out
}

fn format_answer(answer: &Answer) -> String {
    match answer {
        Answer::Kwh(v) => format!("{v} kWh"),
        Answer::Co2Kg(v) => format!("{v} kg CO2"),
        Answer::FuelMix(mix) => format_fuel_mix(mix),
    }
}

fn format_fuel_mix(mix: &[FuelShare]) -> String {
    if mix.is_empty() {
        return "(no generation data)".to_string();
    }
    let parts: Vec<String> = mix
        .iter()
        .map(|share| format!("{} {:.2}%", share.fuel, share.perc))
        .collect();
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::MonthlyEmissions;
    use crate::error::AppError;
    use crate::report::{QUESTION_CO2, QUESTION_CONSUMPTION, QUESTION_FUEL_MIX, assemble};

    #[test]
    fn report_contains_all_three_questions() {
        let emissions = MonthlyEmissions {
            co2_kg: 25,
            fuel_mix: vec![
                FuelShare {
                    fuel: "wind".to_string(),
                    perc: 50.0,
                },
                FuelShare {
                    fuel: "gas".to_string(),
                    perc: 50.0,
                },
            ],
        };
        let challenges = assemble(Ok(1234), Ok(emissions));

        let rendered = format_report(&challenges);
        assert!(rendered.contains(QUESTION_CONSUMPTION));
        assert!(rendered.contains(QUESTION_CO2));
        assert!(rendered.contains(QUESTION_FUEL_MIX));
        assert!(rendered.contains("1234 kWh"));
        assert!(rendered.contains("25 kg CO2"));
        assert!(rendered.contains("wind 50.00%, gas 50.00%"));
    }

    #[test]
    fn failed_block_renders_unavailable_marker() {
        let challenges = assemble(Ok(1234), Err(AppError::upstream("boom")));

        let rendered = format_report(&challenges);
        assert!(rendered.contains("1234 kWh"));
        assert_eq!(rendered.matches(UNAVAILABLE).count(), 2);
    }
}
