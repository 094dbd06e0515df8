//! Plain-text rendering of the assembled survey tables.
//!
//! The pipeline hands over unformatted collections; everything
//! presentation-related (currency formatting, percentage conversion,
//! column alignment) happens here.

use survey_core::formatting::{format_cop, percentage};
use survey_core::models::Cohort;
use survey_data::analysis::SurveySnapshot;
use survey_data::assembler::CategoryCount;

/// Width of the label column in category tables.
const LABEL_WIDTH: usize = 36;

// ── Summary ───────────────────────────────────────────────────────────────────

/// Respondent counts and mean spending per cohort.
pub fn render_summary(snapshot: &SurveySnapshot) -> String {
    let mut out = String::new();

    out.push_str("Respondents by age group\n");
    for row in &snapshot.tables.cohort_counts {
        out.push_str(&format!("  {:<8} {:>6}\n", row.cohort, row.count));
    }

    out.push_str("\nAverage spending by age group\n");
    for row in &snapshot.tables.spending_by_cohort {
        out.push_str(&format!(
            "  {:<8} {:>18}\n",
            row.cohort,
            format_cop(row.avg_spending)
        ));
    }

    out.push_str(&format!(
        "\n{} records analyzed, {} dropped by the age filter\n",
        snapshot.metadata.records_loaded, snapshot.metadata.records_dropped
    ));

    out
}

// ── Category tables ───────────────────────────────────────────────────────────

/// One flattened (cohort, label, count) category table, optionally
/// restricted to a single cohort.
pub fn render_category_counts(
    heading: &str,
    rows: &[CategoryCount],
    cohort: Option<Cohort>,
) -> String {
    let mut out = String::new();
    out.push_str(heading);
    out.push('\n');

    let mut printed = 0usize;
    for row in rows {
        if cohort.is_some_and(|c| c != row.cohort) {
            continue;
        }
        out.push_str(&format!(
            "  {:<8} {:<width$} {:>6}\n",
            row.cohort,
            row.label,
            row.count,
            width = LABEL_WIDTH
        ));
        printed += 1;
    }

    if printed == 0 {
        out.push_str("  (no data)\n");
    }
    out
}

// ── Spending distribution ─────────────────────────────────────────────────────

/// Per-cohort spending distribution as share-of-total percentages.
///
/// Shares are computed within each cohort's positive entries, mirroring a
/// proportional chart: the raw means are related to each other, not to a
/// normalized total.
pub fn render_spending_shares(snapshot: &SurveySnapshot, cohort: Option<Cohort>) -> String {
    let mut out = String::new();

    for profile_cohort in snapshot.profiles.keys() {
        if cohort.is_some_and(|c| c != *profile_cohort) {
            continue;
        }
        let shares = snapshot.spending_shares(*profile_cohort);

        out.push_str(&format!("Spending distribution {}\n", profile_cohort));
        if shares.is_empty() {
            out.push_str("  (no data)\n\n");
            continue;
        }

        let total: f64 = shares.iter().map(|s| s.value).sum();
        for share in &shares {
            out.push_str(&format!(
                "  {:<width$} {:>18} {:>6.1}%\n",
                share.label,
                format_cop(share.value),
                percentage(share.value, total, 1),
                width = LABEL_WIDTH
            ));
        }
        out.push('\n');
    }

    if out.is_empty() {
        out.push_str("(no data)\n");
    }
    out
}

// ── Profiles ──────────────────────────────────────────────────────────────────

/// The per-cohort "most common attribute" profiles.
pub fn render_profiles(snapshot: &SurveySnapshot) -> String {
    let mut out = String::new();

    for (cohort, profile) in &snapshot.profiles {
        out.push_str(&format!("Age group {}\n", cohort));
        out.push_str(&format!(
            "  Top transport: {} ({})\n",
            profile.top_transport, profile.top_transport_count
        ));
        out.push_str(&format!(
            "  Top activity:  {} ({})\n",
            profile.top_activity, profile.top_activity_count
        ));
        out.push_str(&format!(
            "  Top place:     {} ({})\n",
            profile.top_place, profile.top_place_count
        ));
        out.push_str(&format!(
            "  Mean spending: {}\n\n",
            format_cop(profile.mean_spending)
        ));
    }

    if out.is_empty() {
        out.push_str("(no data)\n");
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
