//! Per-cohort profile summarization.
//!
//! The "most common attribute" selection is a deterministic max-frequency
//! pick over the static label lists, not a learned classifier: for each
//! category kind the label with the highest presence count wins, with ties
//! broken by declared list position.

use serde::{Deserialize, Serialize};
use survey_core::categories::NOT_APPLICABLE;
use survey_core::formatting::round2;
use survey_core::models::Cohort;

use crate::aggregator::{CohortStatistics, LabelTally};

// ── LabelValue ────────────────────────────────────────────────────────────────

/// One (label, numeric value) pair in an exposed output list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelValue {
    pub label: String,
    pub value: f64,
}

// ── Profile ───────────────────────────────────────────────────────────────────

/// Summary of one cohort: top attributes and spending distribution.
///
/// This is an exposure surface, so means arrive rounded to two decimals.
/// The spending distribution keeps zero-valued entries; filtering to
/// positive-only is a presentation concern handled later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub cohort: Cohort,
    pub top_transport: String,
    pub top_transport_count: u32,
    pub top_activity: String,
    pub top_activity_count: u32,
    pub top_place: String,
    pub top_place_count: u32,
    pub mean_spending: f64,
    pub spending_distribution: Vec<LabelValue>,
}

impl Profile {
    /// Positive-only spending shares for proportional display.
    ///
    /// Values are the raw sub-category means relative to each other; they
    /// are deliberately not normalized to sum to 1 — the percentage
    /// conversion belongs to the display layer.
    pub fn spending_shares(&self) -> Vec<LabelValue> {
        self.spending_distribution
            .iter()
            .filter(|entry| entry.value > 0.0)
            .cloned()
            .collect()
    }
}

// ── ProfileSummarizer ─────────────────────────────────────────────────────────

/// Stateless helper that turns cohort statistics into a [`Profile`].
pub struct ProfileSummarizer;

impl ProfileSummarizer {
    pub fn summarize(stats: &CohortStatistics) -> Profile {
        let (top_transport, top_transport_count) = Self::top_label(&stats.transport);
        let (top_activity, top_activity_count) = Self::top_label(&stats.activity);
        let (top_place, top_place_count) = Self::top_label(&stats.place);

        Profile {
            cohort: stats.cohort,
            top_transport,
            top_transport_count,
            top_activity,
            top_activity_count,
            top_place,
            top_place_count,
            mean_spending: round2(stats.spending.mean_or_zero()),
            spending_distribution: stats
                .spending_categories
                .iter()
                .map(|(label, accumulator)| LabelValue {
                    label: label.clone(),
                    value: round2(accumulator.mean_or_zero()),
                })
                .collect(),
        }
    }

    /// Stable max over the tallies in declared order.
    ///
    /// A strictly-greater comparison keeps the first of tied labels. When
    /// every count is zero (or the list is empty) the "not applicable"
    /// sentinel is reported instead of a meaningless winner.
    fn top_label(tallies: &[LabelTally]) -> (String, u32) {
        let mut best: Option<&LabelTally> = None;
        for tally in tallies {
            if best.map_or(true, |b| tally.count > b.count) {
                best = Some(tally);
            }
        }

        match best {
            Some(tally) if tally.count > 0 => (tally.label.clone(), tally.count),
            _ => (NOT_APPLICABLE.to_string(), 0),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use survey_core::categories::CategoryConfig;
    use survey_core::models::{FieldValue, NormalizedRecord, RawRecord};

    use crate::aggregator::CohortAggregator;
    use crate::schema::CategoryIndex;

    fn tally(label: &str, count: u32) -> LabelTally {
        LabelTally {
            label: label.to_string(),
            count,
        }
    }

    // ── top_label ─────────────────────────────────────────────────────────────

    #[test]
    fn test_top_label_picks_maximum() {
        let tallies = vec![tally("Taxi", 2), tally("Bicicleta", 5), tally("Bus", 1)];
        assert_eq!(
            ProfileSummarizer::top_label(&tallies),
            ("Bicicleta".to_string(), 5)
        );
    }

    #[test]
    fn test_top_label_tie_breaks_by_declared_order() {
        let tallies = vec![tally("Taxi", 3), tally("Bicicleta", 3)];
        // Repeated selection must stay deterministic.
        for _ in 0..10 {
            assert_eq!(
                ProfileSummarizer::top_label(&tallies),
                ("Taxi".to_string(), 3)
            );
        }
    }

    #[test]
    fn test_top_label_all_zero_reports_sentinel() {
        let tallies = vec![tally("Taxi", 0), tally("Bicicleta", 0)];
        assert_eq!(
            ProfileSummarizer::top_label(&tallies),
            (NOT_APPLICABLE.to_string(), 0)
        );
    }

    #[test]
    fn test_top_label_empty_list_reports_sentinel() {
        assert_eq!(
            ProfileSummarizer::top_label(&[]),
            (NOT_APPLICABLE.to_string(), 0)
        );
    }

    // ── summarize ─────────────────────────────────────────────────────────────

    fn summarize_members(members: &[(&str, FieldValue, f64)]) -> Profile {
        // (truthy column, value, spending) triples for 18-30 members.
        let config = CategoryConfig {
            transport: vec!["Taxi".to_string(), "Bicicleta".to_string()],
            activity: vec!["Ecoturismo".to_string()],
            place: vec!["Parques".to_string()],
            spending_categories: vec!["Alojamiento".to_string(), "Compras".to_string()],
            ..CategoryConfig::default()
        };
        let headers: Vec<String> = ["Edad", "Valor COP", "Taxi", "Bicicleta", "Ecoturismo",
            "Parques", "Alojamiento", "Compras"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let index = CategoryIndex::build(&headers, &config);

        let records: Vec<NormalizedRecord> = members
            .iter()
            .map(|(column, value, spending)| {
                let mut record = RawRecord::new();
                record.insert("Edad", FieldValue::Number(25.0));
                record.insert("Valor COP", FieldValue::Number(*spending));
                record.insert(*column, value.clone());
                NormalizedRecord::new(record, Cohort::From18To30)
            })
            .collect();

        let stats = CohortAggregator::aggregate(&records, &index, &config);
        ProfileSummarizer::summarize(&stats[&Cohort::From18To30])
    }

    #[test]
    fn test_summarize_top_attributes_and_mean() {
        let profile = summarize_members(&[
            ("Taxi", FieldValue::Bool(true), 100.0),
            ("Taxi", FieldValue::Bool(true), 200.0),
            ("Bicicleta", FieldValue::Bool(true), 150.0),
        ]);

        assert_eq!(profile.cohort, Cohort::From18To30);
        assert_eq!(profile.top_transport, "Taxi");
        assert_eq!(profile.top_transport_count, 2);
        assert_eq!(profile.mean_spending, 150.0);
    }

    #[test]
    fn test_summarize_sentinel_for_kind_without_data() {
        let profile = summarize_members(&[("Taxi", FieldValue::Bool(true), 50.0)]);

        assert_eq!(profile.top_activity, NOT_APPLICABLE);
        assert_eq!(profile.top_activity_count, 0);
        assert_eq!(profile.top_place, NOT_APPLICABLE);
        assert_eq!(profile.top_place_count, 0);
    }

    #[test]
    fn test_summarize_distribution_keeps_zero_entries() {
        let profile = summarize_members(&[("Alojamiento", FieldValue::Number(80.0), 80.0)]);

        assert_eq!(profile.spending_distribution.len(), 2);
        assert_eq!(profile.spending_distribution[0].label, "Alojamiento");
        assert_eq!(profile.spending_distribution[0].value, 80.0);
        assert_eq!(profile.spending_distribution[1].label, "Compras");
        assert_eq!(profile.spending_distribution[1].value, 0.0);
    }

    #[test]
    fn test_spending_shares_filter_positive_only() {
        let profile = summarize_members(&[("Alojamiento", FieldValue::Number(80.0), 80.0)]);
        let shares = profile.spending_shares();

        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].label, "Alojamiento");
    }

    #[test]
    fn test_summarize_rounds_mean_at_exposure() {
        let profile = summarize_members(&[
            ("Taxi", FieldValue::Bool(true), 100.0),
            ("Taxi", FieldValue::Bool(true), 100.0),
            ("Taxi", FieldValue::Bool(true), 101.0),
        ]);
        // 301 / 3 = 100.333…
        assert_eq!(profile.mean_spending, 100.33);
    }

    #[test]
    fn test_presence_tally_used_not_member_count() {
        let profile = summarize_members(&[
            ("Taxi", FieldValue::Bool(true), 10.0),
            ("Ecoturismo", FieldValue::Bool(true), 20.0),
        ]);
        // Two members, but only one selected Ecoturismo.
        assert_eq!(profile.top_activity, "Ecoturismo");
        assert_eq!(profile.top_activity_count, 1);
    }
}
