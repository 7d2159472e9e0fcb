use crate::core::{CycleParameters, CycleResult, Result};
use crate::utils::error::CalcError;
use chrono::{Days, NaiveDate};

/// Days before ovulation that open the fertile window.
const FERTILE_DAYS_BEFORE_OVULATION: u64 = 5;
/// The fertile window closes the day after ovulation.
const FERTILE_DAYS_AFTER_OVULATION: u64 = 1;
/// Length of the "safe days" window that follows the period.
const SAFE_DAYS_SPAN: u64 = 3;

/// Derives every cycle date from already validated parameters.
///
/// ```text
/// next_period     = start + cycle_length
/// ovulation_date  = start + floor(cycle_length / 2)
/// fertile window  = [ovulation - 5, ovulation + 1]
/// safe days       = [start + period_duration, start + period_duration + 3]
/// ```
///
/// The safe-days and fertile-window offsets are fixed heuristics and are kept as is.
pub fn calculate(params: &CycleParameters) -> Result<CycleResult> {
    let start = params.period_start();
    let cycle_length = u64::from(params.cycle_length());
    let period_duration = u64::from(params.period_duration());

    let next_period = add_days(start, cycle_length)?;
    // 整數除法：27 天週期取 13 天
    let ovulation_date = add_days(start, cycle_length / 2)?;
    let fertile_start = sub_days(ovulation_date, FERTILE_DAYS_BEFORE_OVULATION)?;
    let fertile_end = add_days(ovulation_date, FERTILE_DAYS_AFTER_OVULATION)?;
    let safe_days_start = add_days(start, period_duration)?;
    let safe_days_end = add_days(safe_days_start, SAFE_DAYS_SPAN)?;

    let result = CycleResult {
        next_period,
        safe_days_start,
        safe_days_end,
        fertile_start,
        fertile_end,
        ovulation_date,
    };

    tracing::debug!(
        "Cycle from {} (length {}, period {}): {:?}",
        start,
        params.cycle_length(),
        params.period_duration(),
        result
    );

    Ok(result)
}

/// Validates the raw inputs and computes the cycle. Out-of-range values are
/// rejected with [`CalcError::InvalidInput`], never clamped.
pub fn compute_cycle(
    period_start: NaiveDate,
    cycle_length: u32,
    period_duration: u32,
) -> Result<CycleResult> {
    let params = CycleParameters::new(period_start, cycle_length, period_duration)?;
    calculate(&params)
}

fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| out_of_calendar(date, days))
}

fn sub_days(date: NaiveDate, days: u64) -> Result<NaiveDate> {
    date.checked_sub_days(Days::new(days))
        .ok_or_else(|| out_of_calendar(date, days))
}

fn out_of_calendar(date: NaiveDate, days: u64) -> CalcError {
    CalcError::invalid_input(
        "period_start",
        date,
        format!("Shifting by {} days leaves the supported calendar range", days),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_reference_cycle() {
        let result = compute_cycle(date(2024, 1, 1), 28, 5).unwrap();

        assert_eq!(result.next_period, date(2024, 1, 29));
        assert_eq!(result.ovulation_date, date(2024, 1, 15));
        assert_eq!(result.fertile_start, date(2024, 1, 10));
        assert_eq!(result.fertile_end, date(2024, 1, 16));
        assert_eq!(result.safe_days_start, date(2024, 1, 6));
        assert_eq!(result.safe_days_end, date(2024, 1, 9));
    }

    #[test]
    fn test_odd_cycle_length_floors() {
        let start = date(2024, 1, 1);
        let result = compute_cycle(start, 27, 5).unwrap();
        assert_eq!((result.ovulation_date - start).num_days(), 13);
    }

    #[test]
    fn test_crosses_month_and_leap_day() {
        let result = compute_cycle(date(2024, 2, 20), 30, 10).unwrap();
        assert_eq!(result.next_period, date(2024, 3, 21));
        assert_eq!(result.ovulation_date, date(2024, 3, 6));
        assert_eq!(result.safe_days_start, date(2024, 3, 1));
    }

    #[test]
    fn test_rejects_out_of_range_without_clamping() {
        assert!(matches!(
            compute_cycle(date(2024, 1, 1), 46, 5),
            Err(CalcError::InvalidInput { .. })
        ));
        assert!(matches!(
            compute_cycle(date(2024, 1, 1), 28, 0),
            Err(CalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_end_of_calendar_is_an_error() {
        assert!(matches!(
            compute_cycle(NaiveDate::MAX, 28, 5),
            Err(CalcError::InvalidInput { .. })
        ));
    }
}
