//! Cohort aggregation over normalized survey records.
//!
//! Groups records by age cohort and accumulates member counts, categorical
//! presence tallies and spending means. Everything is kept at full precision
//! here; rounding happens only when values leave the pipeline.

use std::collections::BTreeMap;

use survey_core::categories::{CategoryConfig, CategoryKind};
use survey_core::models::{Cohort, NormalizedRecord, RawRecord};
use tracing::debug;

use crate::schema::CategoryIndex;

// ── MeanAccumulator ───────────────────────────────────────────────────────────

/// Running sum and count for an arithmetic mean over valid values only.
///
/// Missing and non-numeric values are simply never added, so "no data" stays
/// distinguishable from "mean of zeros": [`MeanAccumulator::mean`] is `None`
/// when nothing valid was seen, and division by zero cannot occur.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanAccumulator {
    sum: f64,
    count: u32,
}

impl MeanAccumulator {
    /// Add one valid value to the running total.
    pub fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    /// Full-precision mean, or `None` when no valid values exist.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / f64::from(self.count))
    }

    /// Mean for display paths that want the zero sentinel.
    pub fn mean_or_zero(&self) -> f64 {
        self.mean().unwrap_or(0.0)
    }

    /// Number of valid values accumulated.
    pub fn count(&self) -> u32 {
        self.count
    }
}

// ── LabelTally ────────────────────────────────────────────────────────────────

/// Presence count for one category label within a cohort.
#[derive(Debug, Clone)]
pub struct LabelTally {
    pub label: String,
    pub count: u32,
}

// ── CohortStatistics ──────────────────────────────────────────────────────────

/// Aggregated statistics for one cohort's members.
///
/// Tallies are stored in declared label order so that downstream top-label
/// selection can break ties by position.
#[derive(Debug, Clone)]
pub struct CohortStatistics {
    pub cohort: Cohort,
    /// Number of member records.
    pub count: u32,
    /// Total-spending accumulator.
    pub spending: MeanAccumulator,
    /// Per spending sub-category accumulators, in declared field order.
    pub spending_categories: Vec<(String, MeanAccumulator)>,
    pub transport: Vec<LabelTally>,
    pub activity: Vec<LabelTally>,
    pub place: Vec<LabelTally>,
}

impl CohortStatistics {
    fn new(cohort: Cohort, index: &CategoryIndex, config: &CategoryConfig) -> Self {
        let zeroed = |kind: CategoryKind| -> Vec<LabelTally> {
            index
                .labels(kind)
                .iter()
                .map(|lc| LabelTally {
                    label: lc.label.clone(),
                    count: 0,
                })
                .collect()
        };

        Self {
            cohort,
            count: 0,
            spending: MeanAccumulator::default(),
            spending_categories: config
                .spending_categories
                .iter()
                .map(|field| (field.clone(), MeanAccumulator::default()))
                .collect(),
            transport: zeroed(CategoryKind::Transport),
            activity: zeroed(CategoryKind::Activity),
            place: zeroed(CategoryKind::Place),
        }
    }

    /// Accumulate one member record.
    fn add_record(&mut self, record: &RawRecord, index: &CategoryIndex, config: &CategoryConfig) {
        self.count += 1;

        if let Some(value) = record.number(&config.spending_field) {
            self.spending.add(value);
        }

        // Sub-categories are addressed by exact field name, not substring.
        for (field, accumulator) in &mut self.spending_categories {
            if let Some(value) = record.number(field) {
                accumulator.add(value);
            }
        }

        for kind in CategoryKind::ALL {
            let tallies = match kind {
                CategoryKind::Transport => &mut self.transport,
                CategoryKind::Activity => &mut self.activity,
                CategoryKind::Place => &mut self.place,
            };
            for (tally, label_columns) in tallies.iter_mut().zip(index.labels(kind)) {
                if label_columns.is_present(record) {
                    tally.count += 1;
                }
            }
        }
    }

    /// The presence tallies for one category kind, in declared order.
    pub fn tallies(&self, kind: CategoryKind) -> &[LabelTally] {
        match kind {
            CategoryKind::Transport => &self.transport,
            CategoryKind::Activity => &self.activity,
            CategoryKind::Place => &self.place,
        }
    }
}

// ── CohortAggregator ──────────────────────────────────────────────────────────

/// Stateless helper that groups normalized records by cohort.
pub struct CohortAggregator;

impl CohortAggregator {
    /// Aggregate records into per-cohort statistics.
    ///
    /// Only cohorts with at least one member appear in the result; empty
    /// cohorts are absent, never present with zeroed statistics. The
    /// `BTreeMap` keeps cohorts in ascending age order for deterministic
    /// downstream iteration.
    pub fn aggregate(
        records: &[NormalizedRecord],
        index: &CategoryIndex,
        config: &CategoryConfig,
    ) -> BTreeMap<Cohort, CohortStatistics> {
        let mut stats: BTreeMap<Cohort, CohortStatistics> = BTreeMap::new();

        for normalized in records {
            stats
                .entry(normalized.cohort())
                .or_insert_with(|| CohortStatistics::new(normalized.cohort(), index, config))
                .add_record(normalized.record(), index, config);
        }

        debug!(
            "Aggregated {} records into {} cohorts",
            records.len(),
            stats.len()
        );
        stats
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
