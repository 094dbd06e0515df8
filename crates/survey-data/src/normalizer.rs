//! Record normalization: the age quality filter and cohort tagging.

use survey_core::models::{Cohort, NormalizedRecord, RawRecord};
use tracing::debug;

/// Normalize raw survey records into cohort-tagged records.
///
/// Rows whose age field is absent or not parseable as a number are dropped
/// silently — partial data quality is expected and never fatal. The output
/// preserves input order and contains exactly the surviving rows; no other
/// side effects occur.
pub fn normalize_records(records: &[RawRecord], age_field: &str) -> Vec<NormalizedRecord> {
    let normalized: Vec<NormalizedRecord> = records
        .iter()
        .filter_map(|record| {
            let age = record.number(age_field)?;
            Some(NormalizedRecord::new(record.clone(), Cohort::from_age(age)))
        })
        .collect();

    debug!(
        "Normalized {} of {} records ({} dropped by the age filter)",
        normalized.len(),
        records.len(),
        records.len() - normalized.len()
    );

    normalized
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use survey_core::models::FieldValue;

    fn record_with_age(value: FieldValue) -> RawRecord {
        let mut record = RawRecord::new();
        record.insert("Edad", value);
        record
    }

    #[test]
    fn test_ages_map_to_expected_cohorts() {
        let records = vec![
            record_with_age(FieldValue::Number(17.0)),
            record_with_age(FieldValue::Number(25.0)),
            record_with_age(FieldValue::Number(70.0)),
        ];
        let normalized = normalize_records(&records, "Edad");

        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized[0].cohort(), Cohort::Under18);
        assert_eq!(normalized[1].cohort(), Cohort::From18To30);
        assert_eq!(normalized[2].cohort(), Cohort::Over60);
    }

    #[test]
    fn test_non_numeric_age_is_dropped() {
        let records = vec![
            record_with_age(FieldValue::Text("abc".to_string())),
            record_with_age(FieldValue::Number(40.0)),
        ];
        let normalized = normalize_records(&records, "Edad");

        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].cohort(), Cohort::From31To45);
    }

    #[test]
    fn test_missing_age_is_dropped() {
        let records = vec![RawRecord::new(), record_with_age(FieldValue::Null)];
        assert!(normalize_records(&records, "Edad").is_empty());
    }

    #[test]
    fn test_age_zero_survives_the_filter() {
        let records = vec![record_with_age(FieldValue::Number(0.0))];
        let normalized = normalize_records(&records, "Edad");

        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].cohort(), Cohort::Under18);
    }

    #[test]
    fn test_order_is_preserved() {
        let records = vec![
            record_with_age(FieldValue::Number(50.0)),
            record_with_age(FieldValue::Text("bad".to_string())),
            record_with_age(FieldValue::Number(20.0)),
        ];
        let normalized = normalize_records(&records, "Edad");

        let cohorts: Vec<Cohort> = normalized.iter().map(|r| r.cohort()).collect();
        assert_eq!(cohorts, vec![Cohort::From46To60, Cohort::From18To30]);
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize_records(&[], "Edad").is_empty());
    }
}
