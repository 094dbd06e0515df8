mod bootstrap;
mod render;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use survey_core::categories::CategoryConfig;
use survey_core::models::Cohort;
use survey_core::settings::Settings;
use survey_runtime::dataset_manager::DatasetManager;

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Tourist Insights v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("View: {}, Format: {}", settings.view, settings.format);

    let data_path = resolve_data_path(&settings)?;
    tracing::info!("Analyzing dataset at {}", data_path.display());

    let cohort: Option<Cohort> = match settings.cohort.as_deref() {
        Some(label) => Some(label.parse().map_err(|e: String| anyhow!(e))?),
        None => None,
    };

    let mut manager = DatasetManager::new(data_path, CategoryConfig::default());
    let snapshot = manager.get_data(false).ok_or_else(|| {
        anyhow!(
            "dataset load failed: {}",
            manager.last_error().unwrap_or("unknown error")
        )
    })?;

    let output = match settings.format.as_str() {
        "json" => render_json(&settings.view, &snapshot, cohort)?,
        _ => render_table(&settings.view, &snapshot, cohort),
    };
    println!("{output}");

    Ok(())
}

/// The dataset location: the `--data-path` flag wins, then the discovered
/// default directories.
fn resolve_data_path(settings: &Settings) -> Result<PathBuf> {
    if let Some(path) = &settings.data_path {
        return Ok(path.clone());
    }
    bootstrap::discover_data_path().context(
        "no survey data found; pass --data-path or place a CSV under ./data",
    )
}

fn render_table(
    view: &str,
    snapshot: &survey_data::analysis::SurveySnapshot,
    cohort: Option<Cohort>,
) -> String {
    match view {
        "transport" => render::render_category_counts(
            "Transport preferences",
            &snapshot.tables.transport_by_cohort,
            cohort,
        ),
        "activities" => render::render_category_counts(
            "Activities",
            &snapshot.tables.activities_by_cohort,
            cohort,
        ),
        "places" => render::render_category_counts(
            "Places visited",
            &snapshot.tables.places_by_cohort,
            cohort,
        ),
        "spending" => render::render_spending_shares(snapshot, cohort),
        "profiles" => render::render_profiles(snapshot),
        _ => render::render_summary(snapshot),
    }
}

fn render_json(
    view: &str,
    snapshot: &survey_data::analysis::SurveySnapshot,
    cohort: Option<Cohort>,
) -> Result<String> {
    let keep = |row_cohort: Cohort| cohort.is_none() || cohort == Some(row_cohort);

    let value = match view {
        "transport" => serde_json::to_value(
            snapshot
                .tables
                .transport_by_cohort
                .iter()
                .filter(|r| keep(r.cohort))
                .collect::<Vec<_>>(),
        )?,
        "activities" => serde_json::to_value(
            snapshot
                .tables
                .activities_by_cohort
                .iter()
                .filter(|r| keep(r.cohort))
                .collect::<Vec<_>>(),
        )?,
        "places" => serde_json::to_value(
            snapshot
                .tables
                .places_by_cohort
                .iter()
                .filter(|r| keep(r.cohort))
                .collect::<Vec<_>>(),
        )?,
        "spending" => {
            let shares: std::collections::BTreeMap<Cohort, _> = snapshot
                .profiles
                .keys()
                .filter(|c| keep(**c))
                .map(|c| (*c, snapshot.spending_shares(*c)))
                .collect();
            serde_json::to_value(shares)?
        }
        "profiles" => serde_json::to_value(&snapshot.profiles)?,
        _ => serde_json::to_value(snapshot)?,
    };

    Ok(serde_json::to_string_pretty(&value)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn snapshot_from_csv(lines: &[&str]) -> survey_data::analysis::SurveySnapshot {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("survey.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        survey_data::analysis::analyze_file(&path, &CategoryConfig::default()).unwrap()
    }

    #[test]
    fn test_render_table_dispatch() {
        let snapshot = snapshot_from_csv(&["Edad,Valor COP,Taxi", "25,100,true"]);

        assert!(render_table("summary", &snapshot, None).contains("Respondents"));
        assert!(render_table("transport", &snapshot, None).contains("Taxi"));
        assert!(render_table("profiles", &snapshot, None).contains("Top transport"));
    }

    #[test]
    fn test_render_json_summary_has_tables() {
        let snapshot = snapshot_from_csv(&["Edad,Valor COP,Taxi", "25,100,true"]);
        let json = render_json("summary", &snapshot, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["tables"]["cohort_counts"].is_array());
    }

    #[test]
    fn test_render_json_cohort_filter() {
        let snapshot = snapshot_from_csv(&[
            "Edad,Valor COP,Taxi",
            "25,100,true",
            "70,200,true",
        ]);
        let json = render_json("transport", &snapshot, Some(Cohort::Over60)).unwrap();
        let rows: serde_json::Value = serde_json::from_str(&json).unwrap();

        let cohorts: Vec<&str> = rows
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["cohort"].as_str().unwrap())
            .collect();
        assert!(!cohorts.is_empty());
        assert!(cohorts.iter().all(|c| *c == "60+"));
    }

    #[test]
    fn test_resolve_data_path_prefers_flag() {
        let settings = Settings::parse_from([
            "tourist-insights",
            "--data-path",
            "/tmp/some/survey.csv",
        ]);
        let path = resolve_data_path(&settings).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/some/survey.csv"));
    }
}
