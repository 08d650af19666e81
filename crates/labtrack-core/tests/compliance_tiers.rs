//! # Compliance Tier Tests (C0-C3)
//!
//! End-to-end checks of the evaluation pipeline through the public API.
//!
//! ## Tiers
//! - C0: Range Classification
//! - C1: Daily Evaluation and Submission
//! - C2: Aggregation and Reports
//! - C3: Presentation and Export

use chrono::NaiveDate;
use labtrack_core::{
    CompletenessPolicy, ComplianceBucket, DateRange, LabTrackError, MeasurementSample, Parameter,
    Readings,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn full_day(fridge: f64) -> Readings {
    Readings::new()
        .with(Parameter::Refrigerator, fridge)
        .with(Parameter::Freezer, -20.0)
        .with(Parameter::Ln2, 80.0)
        .with(Parameter::Room, 22.0)
        .with(Parameter::Humidity, 45.0)
}

// =============================================================================
// TIER C0: RANGE CLASSIFICATION
// =============================================================================

mod c0_range_classification {
    use super::*;
    use labtrack_core::{classify, parse_reading};

    /// C0.1: Every reference range is inclusive at both ends.
    #[test]
    fn ranges_inclusive() {
        for p in Parameter::ALL {
            let r = p.range();
            assert!(classify(Some(r.min), r), "{} min", p);
            assert!(classify(Some(r.max), r), "{} max", p);
        }
    }

    /// C0.2: Values just outside are rejected.
    #[test]
    fn just_outside_rejected() {
        let fridge = Parameter::Refrigerator.range();
        assert!(!classify(Some(1.99), fridge));
        assert!(!classify(Some(8.01), fridge));
        let freezer = Parameter::Freezer.range();
        assert!(!classify(Some(-30.5), freezer));
        assert!(!classify(Some(-14.9), freezer));
    }

    /// C0.3: Blank and garbage input are absent and therefore compliant.
    #[test]
    fn unparsable_input_is_absent() {
        assert_eq!(parse_reading(""), None);
        assert_eq!(parse_reading("  "), None);
        assert_eq!(parse_reading("cold"), None);
        assert_eq!(parse_reading("NaN"), None);
        assert_eq!(parse_reading(" 4.5 "), Some(4.5));
        assert!(classify(parse_reading("cold"), Parameter::Room.range()));
    }
}

// =============================================================================
// TIER C1: DAILY EVALUATION AND SUBMISSION
// =============================================================================

mod c1_daily_evaluation {
    use super::*;
    use labtrack_core::{SampleStore, evaluate};

    /// C1.1: Low LN2 fails only LN2.
    #[test]
    fn ln2_low_fails_only_ln2() {
        let readings = Readings::new()
            .with(Parameter::Refrigerator, 5.0)
            .with(Parameter::Freezer, -20.0)
            .with(Parameter::Ln2, 50.0);
        let eval = evaluate(&readings);

        assert!(!eval.is_compliant);
        for p in Parameter::ALL {
            assert_eq!(eval.compliance.get(p), p != Parameter::Ln2, "{}", p);
        }
    }

    /// C1.2: A stored non-compliant day always carries a corrective action.
    #[test]
    fn stored_failures_have_corrective_action() {
        let mut store = SampleStore::new(CompletenessPolicy::Strict);
        let bad = MeasurementSample::new(date(2024, 5, 1), full_day(10.0), "");
        assert_eq!(store.upsert(bad), Err(LabTrackError::CorrectiveActionRequired));

        let fixed = MeasurementSample::new(date(2024, 5, 1), full_day(10.0), "  Reset thermostat  ");
        store.upsert(fixed).expect("has corrective action");
        let stored = store.get(date(2024, 5, 1)).expect("stored");
        assert_eq!(stored.corrective_action, "Reset thermostat");
        assert!(!stored.is_compliant);
    }

    /// C1.3: The strict policy rejects a partial day; lenient stores it.
    #[test]
    fn completeness_policies() {
        let partial = MeasurementSample::new(
            date(2024, 5, 2),
            Readings::new().with(Parameter::Room, 22.0),
            "",
        );
        let mut strict = SampleStore::new(CompletenessPolicy::Strict);
        assert_eq!(
            strict.upsert(partial.clone()),
            Err(LabTrackError::MissingReading(Parameter::Refrigerator))
        );
        let mut lenient = SampleStore::new(CompletenessPolicy::Lenient);
        assert!(lenient.upsert(partial).is_ok());
    }
}

// =============================================================================
// TIER C2: AGGREGATION AND REPORTS
// =============================================================================

mod c2_aggregation {
    use super::*;
    use labtrack_core::{MonthlyReport, aggregate, breakdown_rows, aggregate_by_month};

    /// C2.1: No samples means no report.
    #[test]
    fn no_data_month() {
        let none: Vec<MeasurementSample> = Vec::new();
        let summary = aggregate(&none, &DateRange::month(2024, 5).expect("range"));
        assert_eq!(summary.total_days, 0);
        assert!(MonthlyReport::from_summary(&summary).is_none());
    }

    /// C2.2: Nine compliant days of ten is 90% and good.
    #[test]
    fn nine_of_ten_is_good() {
        let samples: Vec<_> = (1..=10)
            .map(|d| {
                let fridge = if d == 7 { 12.0 } else { 5.0 };
                MeasurementSample::new(date(2024, 5, d), full_day(fridge), "checked")
            })
            .collect();
        let summary = aggregate(&samples, &DateRange::month(2024, 5).expect("range"));
        let report = MonthlyReport::from_summary(&summary).expect("report");

        assert_eq!(report.overall.percent, 90);
        assert_eq!(report.overall.bucket, ComplianceBucket::Good);
        assert_eq!(report.parameters.len(), 5);
        assert_eq!(report.parameters[0].percent, 90);
        assert_eq!(report.parameters[1].percent, 100);
    }

    /// C2.3: Bucket boundaries.
    #[test]
    fn bucket_boundaries() {
        assert_eq!(ComplianceBucket::from_percent(89), ComplianceBucket::Warning);
        assert_eq!(ComplianceBucket::from_percent(90), ComplianceBucket::Good);
        assert_eq!(ComplianceBucket::from_percent(74), ComplianceBucket::Bad);
        assert_eq!(ComplianceBucket::from_percent(75), ComplianceBucket::Warning);
    }

    /// C2.4: The yearly table has a row per month, data or not.
    #[test]
    fn yearly_rows() {
        let samples = vec![
            MeasurementSample::new(date(2024, 2, 1), full_day(5.0), ""),
            MeasurementSample::new(date(2024, 11, 1), full_day(1.0), "Replaced seal"),
        ];
        let yearly = aggregate_by_month(&samples, &DateRange::year(2024).expect("range"));
        let rows = breakdown_rows(&yearly);

        assert_eq!(rows.len(), 12);
        assert_eq!(rows[1].overall, Some(100));
        assert_eq!(rows[10].overall, Some(0));
        assert!(rows.iter().filter(|r| r.overall.is_none()).count() == 10);
        assert_eq!(yearly.overall.percent(), Some(50));
    }
}

// =============================================================================
// TIER C3: PRESENTATION AND EXPORT
// =============================================================================

mod c3_presentation {
    use super::*;
    use labtrack_core::{CalendarGrid, DayStatus, MonthCursor, Transcript, samples_to_csv, transcript_to_text};
    use std::collections::BTreeMap;

    /// C3.1: Empty CSV export still explains itself.
    #[test]
    fn empty_csv_has_message() {
        let none: Vec<MeasurementSample> = Vec::new();
        let file = samples_to_csv(&none, &DateRange::year(2024).expect("range"));
        let body = String::from_utf8(file.bytes).expect("utf-8");
        assert!(body.contains("No temperature data recorded between 2024-01-01 and 2024-12-31"));
        assert_eq!(file.filename, "Temperature_Data_2024.csv");
    }

    /// C3.2: Empty transcript refuses to export.
    #[test]
    fn empty_transcript() {
        let at = date(2024, 5, 1).and_hms_opt(12, 0, 0).expect("time");
        let err = transcript_to_text(&Transcript::new(), at).expect_err("nothing to export");
        assert_eq!(err.to_string(), "No messages to export");
    }

    /// C3.3: Calendar shows failing dots on a non-compliant day.
    #[test]
    fn calendar_marks_failures() {
        let sample = MeasurementSample::new(date(2024, 5, 3), full_day(9.0), "Door ajar");
        let samples = BTreeMap::from([(sample.date, sample)]);
        let grid = CalendarGrid::build(
            MonthCursor::new(2024, 5).expect("cursor"),
            date(2024, 5, 3),
            &samples,
        )
        .expect("grid");

        let day = grid
            .current_days()
            .find(|c| c.day == 3)
            .expect("day 3");
        assert!(day.is_today);
        assert_eq!(
            day.status,
            DayStatus::NonCompliant {
                dots: vec![Parameter::Refrigerator]
            }
        );
    }
}
