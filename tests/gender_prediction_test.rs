use chrono::NaiveDate;
use fempredict::{predict_gender, CalcError, GenderEstimate};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_shettles_boundaries() {
    let ovulation = Some(date(2024, 3, 15));
    let cases = [
        (date(2024, 3, 16), -1, GenderEstimate::OutOfWindow),
        (date(2024, 3, 15), 0, GenderEstimate::BoyLikely),
        (date(2024, 3, 14), 1, GenderEstimate::BoyLikely),
        (date(2024, 3, 13), 2, GenderEstimate::GirlLikely),
        (date(2024, 3, 10), 5, GenderEstimate::GirlLikely),
        (date(2024, 3, 9), 6, GenderEstimate::OutOfWindow),
    ];

    for (intercourse, expected_days, expected) in cases {
        let prediction = predict_gender(ovulation, intercourse).unwrap();
        assert_eq!(prediction.days_difference, expected_days);
        assert_eq!(prediction.estimate, expected, "intercourse on {intercourse}");
    }
}

#[test]
fn test_accuracy_metadata() {
    let ovulation = Some(date(2024, 3, 15));

    let boy = predict_gender(ovulation, date(2024, 3, 14)).unwrap();
    assert_eq!(boy.accuracy_percent, Some(75));

    let girl = predict_gender(ovulation, date(2024, 3, 11)).unwrap();
    assert_eq!(girl.accuracy_percent, Some(80));

    let outside = predict_gender(ovulation, date(2024, 2, 1)).unwrap();
    assert_eq!(outside.accuracy_percent, None);
}

#[test]
fn test_window_spans_month_boundary() {
    let prediction = predict_gender(Some(date(2024, 3, 2)), date(2024, 2, 27)).unwrap();
    assert_eq!(prediction.days_difference, 4);
    assert_eq!(prediction.estimate, GenderEstimate::GirlLikely);
}

#[test]
fn test_missing_ovulation_date() {
    let err = predict_gender(None, date(2024, 3, 14)).unwrap_err();
    assert!(matches!(err, CalcError::MissingOvulationDate));
}
