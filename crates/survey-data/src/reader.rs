//! CSV file discovery and loading for Tourist Insights.
//!
//! Reads survey exports from disk and converts them into a fully-typed
//! [`SurveyDataset`] for downstream processing. Loading is the one place
//! where failure is fatal: an unreadable or unparseable dataset halts the
//! pipeline rather than producing partial statistics.

use std::path::{Path, PathBuf};

use survey_core::coercion::ValueCoercer;
use survey_core::error::{Result, SurveyError};
use survey_core::models::{FieldValue, RawRecord, SurveyDataset};
use tracing::{debug, warn};

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.csv` files recursively under `data_path`, sorted by path.
pub fn find_csv_files(data_path: &Path) -> Vec<PathBuf> {
    if !data_path.exists() {
        warn!("Data path does not exist: {}", data_path.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "csv")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Resolve `data_path` to a single dataset file.
///
/// A file path is returned as-is; a directory is searched recursively and
/// the first CSV (in sorted path order) wins.
pub fn resolve_dataset_file(data_path: &Path) -> Result<PathBuf> {
    if !data_path.exists() {
        return Err(SurveyError::DataPathNotFound(data_path.to_path_buf()));
    }
    if data_path.is_file() {
        return Ok(data_path.to_path_buf());
    }

    let files = find_csv_files(data_path);
    if files.len() > 1 {
        debug!(
            "{} CSV files under {}; using {}",
            files.len(),
            data_path.display(),
            files[0].display()
        );
    }
    files
        .into_iter()
        .next()
        .ok_or_else(|| SurveyError::NoDataFiles(data_path.to_path_buf()))
}

/// Load and parse one survey CSV into a [`SurveyDataset`].
///
/// * Header names are preserved verbatim — the category index matches
///   labels against the exact header text.
/// * Every cell is coerced to a [`FieldValue`] (dynamic typing).
/// * Fully-blank rows are skipped; rows shorter than the header are padded
///   with nulls.
///
/// Any read or parse failure aborts the load with a [`SurveyError`].
pub fn load_survey_records(path: &Path) -> Result<SurveyDataset> {
    let file = std::fs::File::open(path).map_err(|source| SurveyError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let coercer = ValueCoercer::new();
    let mut records: Vec<RawRecord> = Vec::new();
    let mut rows_skipped = 0u64;

    for row_result in csv_reader.records() {
        let row = row_result?;

        if row.iter().all(|cell| cell.trim().is_empty()) {
            rows_skipped += 1;
            continue;
        }

        let mut record = RawRecord::new();
        for (i, header) in headers.iter().enumerate() {
            let value = row
                .get(i)
                .map(|cell| coercer.coerce(cell))
                .unwrap_or(FieldValue::Null);
            record.insert(header.clone(), value);
        }
        records.push(record);
    }

    debug!(
        "Loaded {} records ({} blank rows skipped) from {}",
        records.len(),
        rows_skipped,
        path.display()
    );

    Ok(SurveyDataset { headers, records })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
