//! Output assembly: flattening cohort statistics into presentation tables.
//!
//! The assembler is the exposure boundary — means are rounded to two
//! decimals here and nowhere earlier. Outputs are plain ordered collections
//! with no embedded formatting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use survey_core::categories::CategoryKind;
use survey_core::formatting::round2;
use survey_core::models::Cohort;

use crate::aggregator::CohortStatistics;

// ── Row types ─────────────────────────────────────────────────────────────────

/// One cohort's respondent count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortCount {
    pub cohort: Cohort,
    pub count: u32,
}

/// One cohort's mean total spending (zero when no valid values exist).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortSpending {
    pub cohort: Cohort,
    pub avg_spending: f64,
}

/// One (cohort, label) presence count in a flattened category list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub cohort: Cohort,
    pub label: String,
    pub count: u32,
}

// ── SummaryTables ─────────────────────────────────────────────────────────────

/// The flat record lists consumed by presentation.
///
/// Transport rows keep zero counts so a cohort with uniformly zero transport
/// data still appears; activity and place rows drop them. The asymmetry is
/// part of the output contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryTables {
    pub cohort_counts: Vec<CohortCount>,
    pub spending_by_cohort: Vec<CohortSpending>,
    pub transport_by_cohort: Vec<CategoryCount>,
    pub activities_by_cohort: Vec<CategoryCount>,
    pub places_by_cohort: Vec<CategoryCount>,
}

// ── OutputAssembler ───────────────────────────────────────────────────────────

/// Stateless helper that shapes aggregated statistics into [`SummaryTables`].
pub struct OutputAssembler;

impl OutputAssembler {
    pub fn assemble(stats: &BTreeMap<Cohort, CohortStatistics>) -> SummaryTables {
        let mut tables = SummaryTables::default();

        for (cohort, cohort_stats) in stats {
            tables.cohort_counts.push(CohortCount {
                cohort: *cohort,
                count: cohort_stats.count,
            });
            tables.spending_by_cohort.push(CohortSpending {
                cohort: *cohort,
                avg_spending: round2(cohort_stats.spending.mean_or_zero()),
            });

            Self::extend_category_rows(
                &mut tables.transport_by_cohort,
                *cohort,
                cohort_stats,
                CategoryKind::Transport,
                false,
            );
            Self::extend_category_rows(
                &mut tables.activities_by_cohort,
                *cohort,
                cohort_stats,
                CategoryKind::Activity,
                true,
            );
            Self::extend_category_rows(
                &mut tables.places_by_cohort,
                *cohort,
                cohort_stats,
                CategoryKind::Place,
                true,
            );
        }

        tables
    }

    fn extend_category_rows(
        rows: &mut Vec<CategoryCount>,
        cohort: Cohort,
        stats: &CohortStatistics,
        kind: CategoryKind,
        drop_zero_counts: bool,
    ) {
        rows.extend(
            stats
                .tallies(kind)
                .iter()
                .filter(|tally| !drop_zero_counts || tally.count > 0)
                .map(|tally| CategoryCount {
                    cohort,
                    label: tally.label.clone(),
                    count: tally.count,
                }),
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
