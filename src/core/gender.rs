use crate::core::{GenderEstimate, GenderPrediction, Result};
use crate::utils::error::CalcError;
use chrono::NaiveDate;

/// Shettles timing buckets, inclusive, checked in order:
/// 0..=1 days before ovulation leans boy, 2..=5 leans girl, anything else is outside the window.
pub fn classify(days_difference: i64) -> GenderEstimate {
    match days_difference {
        0..=1 => GenderEstimate::BoyLikely,
        2..=5 => GenderEstimate::GirlLikely,
        _ => GenderEstimate::OutOfWindow,
    }
}

/// Classifies `intercourse_date` against a previously computed ovulation date.
///
/// Refuses with `MissingOvulationDate` when no ovulation date is known; it never
/// falls back to a default.
pub fn predict_gender(
    ovulation_date: Option<NaiveDate>,
    intercourse_date: NaiveDate,
) -> Result<GenderPrediction> {
    let ovulation_date = ovulation_date.ok_or(CalcError::MissingOvulationDate)?;
    let days_difference = ovulation_date
        .signed_duration_since(intercourse_date)
        .num_days();
    let estimate = classify(days_difference);

    tracing::debug!(
        "Intercourse {} is {} day(s) before ovulation {}: {}",
        intercourse_date,
        days_difference,
        ovulation_date,
        estimate
    );

    Ok(GenderPrediction {
        estimate,
        ovulation_date,
        intercourse_date,
        days_difference,
        accuracy_percent: estimate.accuracy_percent(),
    })
}
