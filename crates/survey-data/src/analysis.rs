//! Main analysis pipeline for Tourist Insights.
//!
//! Orchestrates loading, normalization, aggregation, profile summarization
//! and output assembly, returning a [`SurveySnapshot`] ready for the
//! presentation layer.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::Utc;
use survey_core::categories::CategoryConfig;
use survey_core::error::Result;
use survey_core::models::{Cohort, SurveyDataset};

use crate::aggregator::CohortAggregator;
use crate::assembler::{OutputAssembler, SummaryTables};
use crate::normalizer::normalize_records;
use crate::profiles::{LabelValue, Profile, ProfileSummarizer};
use crate::reader;
use crate::schema::CategoryIndex;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the snapshot.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SnapshotMetadata {
    /// ISO-8601 timestamp when this snapshot was generated.
    pub generated_at: String,
    /// Number of raw records loaded from the dataset.
    pub records_loaded: usize,
    /// Number of records dropped by the age quality filter.
    pub records_dropped: usize,
    /// Number of cohorts with at least one member.
    pub cohorts: usize,
    /// Wall-clock seconds spent loading the CSV (0 for in-memory input).
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent on the aggregation pass.
    pub aggregation_time_seconds: f64,
}

/// The complete output of one pipeline run.
///
/// A snapshot is immutable once built; a new dataset load produces a fresh
/// snapshot that replaces the previous one wholesale.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SurveySnapshot {
    /// Flattened presentation tables.
    pub tables: SummaryTables,
    /// Per-cohort top-attribute profiles, keyed in ascending age order.
    pub profiles: BTreeMap<Cohort, Profile>,
    /// Metadata about this run.
    pub metadata: SnapshotMetadata,
}

impl SurveySnapshot {
    /// Positive-only spending-distribution list for one cohort, suitable
    /// for proportional visualization. Empty when the cohort is absent.
    pub fn spending_shares(&self, cohort: Cohort) -> Vec<LabelValue> {
        self.profiles
            .get(&cohort)
            .map(Profile::spending_shares)
            .unwrap_or_default()
    }
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the pipeline over an already-materialized dataset.
///
/// Pure function of (dataset, static category configuration); re-running on
/// unchanged input yields identical output collections.
pub fn analyze_records(dataset: &SurveyDataset, config: &CategoryConfig) -> SurveySnapshot {
    build_snapshot(dataset, config, 0.0)
}

/// Load a dataset from `data_path` (file or directory) and run the pipeline.
///
/// Load-level failures halt the run entirely — no partial statistics are
/// produced from an unreadable or unparseable dataset.
pub fn analyze_file(data_path: &Path, config: &CategoryConfig) -> Result<SurveySnapshot> {
    let file = reader::resolve_dataset_file(data_path)?;

    let load_start = std::time::Instant::now();
    let dataset = reader::load_survey_records(&file)?;
    let load_time = load_start.elapsed().as_secs_f64();

    Ok(build_snapshot(&dataset, config, load_time))
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn build_snapshot(
    dataset: &SurveyDataset,
    config: &CategoryConfig,
    load_time_seconds: f64,
) -> SurveySnapshot {
    let aggregation_start = std::time::Instant::now();

    let normalized = normalize_records(&dataset.records, &config.age_field);
    let index = CategoryIndex::build(&dataset.headers, config);
    let stats = CohortAggregator::aggregate(&normalized, &index, config);

    let profiles: BTreeMap<Cohort, Profile> = stats
        .iter()
        .map(|(cohort, cohort_stats)| (*cohort, ProfileSummarizer::summarize(cohort_stats)))
        .collect();
    let tables = OutputAssembler::assemble(&stats);

    let metadata = SnapshotMetadata {
        generated_at: Utc::now().to_rfc3339(),
        records_loaded: dataset.records.len(),
        records_dropped: dataset.records.len() - normalized.len(),
        cohorts: stats.len(),
        load_time_seconds,
        aggregation_time_seconds: aggregation_start.elapsed().as_secs_f64(),
    };

    SurveySnapshot {
        tables,
        profiles,
        metadata,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
