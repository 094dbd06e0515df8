//! Schema-level category index.
//!
//! The source questionnaire stores one logical category under several
//! concretely-named columns (localized and variant headers), so a label like
//! `Taxi` may correspond to `Taxi_a` and `Taxi_b`. The index resolves every
//! label to its matching header set exactly once per dataset schema; per-row
//! presence checks then only touch the precomputed columns instead of
//! re-scanning all field names.

use survey_core::categories::{CategoryConfig, CategoryKind};
use survey_core::models::RawRecord;
use tracing::debug;

// ── LabelColumns ──────────────────────────────────────────────────────────────

/// One category label and the header columns that carry it.
#[derive(Debug, Clone)]
pub struct LabelColumns {
    /// The human-readable label from the static configuration.
    pub label: String,
    /// Headers containing the label as a case-sensitive substring.
    /// Empty when the schema has no matching column.
    pub columns: Vec<String>,
}

impl LabelColumns {
    /// Whether the record selected this label: true when at least one
    /// matching column holds a truthy value.
    ///
    /// A label with zero matching columns is never present — a schema
    /// mismatch is defined behavior, not an error.
    pub fn is_present(&self, record: &RawRecord) -> bool {
        self.columns.iter().any(|column| record.is_truthy(column))
    }
}

// ── CategoryIndex ─────────────────────────────────────────────────────────────

/// Label-to-columns resolution for every category kind, in declared order.
#[derive(Debug, Clone)]
pub struct CategoryIndex {
    transport: Vec<LabelColumns>,
    activity: Vec<LabelColumns>,
    place: Vec<LabelColumns>,
}

impl CategoryIndex {
    /// Build the index from the dataset's verbatim headers.
    pub fn build(headers: &[String], config: &CategoryConfig) -> Self {
        let index_for = |labels: &[String]| -> Vec<LabelColumns> {
            labels
                .iter()
                .map(|label| LabelColumns {
                    label: label.clone(),
                    columns: headers
                        .iter()
                        .filter(|header| header.contains(label.as_str()))
                        .cloned()
                        .collect(),
                })
                .collect()
        };

        let index = Self {
            transport: index_for(&config.transport),
            activity: index_for(&config.activity),
            place: index_for(&config.place),
        };

        let unmatched: usize = CategoryKind::ALL
            .iter()
            .flat_map(|kind| index.labels(*kind))
            .filter(|lc| lc.columns.is_empty())
            .count();
        if unmatched > 0 {
            debug!("{unmatched} category labels match no column in this schema");
        }

        index
    }

    /// The resolved labels for one category kind, in tie-break order.
    pub fn labels(&self, kind: CategoryKind) -> &[LabelColumns] {
        match kind {
            CategoryKind::Transport => &self.transport,
            CategoryKind::Activity => &self.activity,
            CategoryKind::Place => &self.place,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
