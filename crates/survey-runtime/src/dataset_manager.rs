//! Cached dataset manager for the analysis runtime.
//!
//! Wraps [`analyze_file`] behind a cache of the current [`SurveySnapshot`].
//! Callers use [`DatasetManager::get_data`] to obtain the snapshot; a reload
//! builds the replacement in full before swapping it in, so consumers never
//! observe partially-overwritten statistics — anyone holding the previous
//! `Arc` keeps a complete, consistent view, and a failed reload leaves the
//! previous snapshot in place.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use survey_core::categories::CategoryConfig;
use survey_data::analysis::{analyze_file, SurveySnapshot};

// ── DatasetManager ────────────────────────────────────────────────────────────

/// Snapshot cache around the full analysis pipeline.
///
/// # Example
/// ```no_run
/// use std::path::PathBuf;
/// use survey_core::categories::CategoryConfig;
/// use survey_runtime::dataset_manager::DatasetManager;
///
/// let mut mgr = DatasetManager::new(PathBuf::from("data"), CategoryConfig::default());
/// if let Some(snapshot) = mgr.get_data(false) {
///     println!("cohorts: {}", snapshot.metadata.cohorts);
/// }
/// ```
pub struct DatasetManager {
    /// Dataset file or directory to analyze.
    data_path: PathBuf,
    /// Static category configuration used for every run.
    config: CategoryConfig,
    /// The current snapshot, shared with consumers.
    cache: Option<Arc<SurveySnapshot>>,
    /// When the cache was last populated.
    cache_timestamp: Option<Instant>,
    /// Human-readable description of the last load error encountered.
    last_error: Option<String>,
}

impl DatasetManager {
    pub fn new(data_path: PathBuf, config: CategoryConfig) -> Self {
        Self {
            data_path,
            config,
            cache: None,
            cache_timestamp: None,
            last_error: None,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return the current snapshot, loading the dataset on first use.
    ///
    /// When `force_reload` is `true` the dataset is re-analyzed and the new
    /// snapshot supersedes the old one atomically. On load failure the
    /// previous snapshot (if any) is returned as a best-effort fallback and
    /// the error is recorded.
    pub fn get_data(&mut self, force_reload: bool) -> Option<Arc<SurveySnapshot>> {
        if !force_reload && self.cache.is_some() {
            tracing::debug!("returning cached survey snapshot");
            return self.cache.clone();
        }

        match analyze_file(&self.data_path, &self.config) {
            Ok(snapshot) => {
                tracing::debug!(
                    records = snapshot.metadata.records_loaded,
                    cohorts = snapshot.metadata.cohorts,
                    "survey snapshot replaced"
                );
                self.cache = Some(Arc::new(snapshot));
                self.cache_timestamp = Some(Instant::now());
                self.last_error = None;
                self.cache.clone()
            }
            Err(e) => {
                tracing::warn!(error = %e, "dataset load failed; keeping previous snapshot");
                self.last_error = Some(e.to_string());
                self.cache.clone()
            }
        }
    }

    /// Discard the current snapshot, forcing the next [`Self::get_data`]
    /// call to reload.
    pub fn invalidate_cache(&mut self) {
        self.cache = None;
        self.cache_timestamp = None;
        tracing::debug!("snapshot cache invalidated");
    }

    /// Age of the current snapshot, or `None` before the first load.
    pub fn cache_age(&self) -> Option<Duration> {
        self.cache_timestamp.map(|ts| ts.elapsed())
    }

    /// Human-readable description of the last load error, or `None`.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_survey(dir: &std::path::Path, lines: &[&str]) -> PathBuf {
        let path = dir.join("survey.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    fn manager_with_data(dir: &TempDir) -> DatasetManager {
        let path = write_survey(
            dir.path(),
            &["Edad,Valor COP", "25,100", "70,200"],
        );
        DatasetManager::new(path, CategoryConfig::default())
    }

    #[test]
    fn test_first_call_loads_snapshot() {
        let dir = TempDir::new().unwrap();
        let mut mgr = manager_with_data(&dir);

        assert!(mgr.cache_age().is_none());
        let snapshot = mgr.get_data(false).unwrap();
        assert_eq!(snapshot.metadata.records_loaded, 2);
        assert!(mgr.cache_age().is_some());
        assert!(mgr.last_error().is_none());
    }

    #[test]
    fn test_second_call_returns_cached_arc() {
        let dir = TempDir::new().unwrap();
        let mut mgr = manager_with_data(&dir);

        let first = mgr.get_data(false).unwrap();
        let second = mgr.get_data(false).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_force_reload_replaces_snapshot() {
        let dir = TempDir::new().unwrap();
        let mut mgr = manager_with_data(&dir);

        let first = mgr.get_data(false).unwrap();
        let second = mgr.get_data(true).unwrap();

        // A fresh snapshot object supersedes the old one...
        assert!(!Arc::ptr_eq(&first, &second));
        // ...while the old Arc still holds a complete, consistent view.
        assert_eq!(
            first.tables.cohort_counts.len(),
            second.tables.cohort_counts.len()
        );
    }

    #[test]
    fn test_reload_picks_up_new_dataset() {
        let dir = TempDir::new().unwrap();
        let path = write_survey(dir.path(), &["Edad,Valor COP", "25,100"]);
        let mut mgr = DatasetManager::new(path.clone(), CategoryConfig::default());

        let first = mgr.get_data(false).unwrap();
        assert_eq!(first.metadata.records_loaded, 1);

        // Overwrite the dataset and force a reload.
        write_survey(dir.path(), &["Edad,Valor COP", "25,100", "40,300", "70,50"]);
        let second = mgr.get_data(true).unwrap();
        assert_eq!(second.metadata.records_loaded, 3);
        // The previously handed-out snapshot is untouched.
        assert_eq!(first.metadata.records_loaded, 1);
    }

    #[test]
    fn test_failed_load_keeps_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = write_survey(dir.path(), &["Edad,Valor COP", "25,100"]);
        let mut mgr = DatasetManager::new(path.clone(), CategoryConfig::default());

        let first = mgr.get_data(false).unwrap();

        std::fs::remove_file(&path).unwrap();
        let fallback = mgr.get_data(true).unwrap();

        assert!(Arc::ptr_eq(&first, &fallback));
        assert!(mgr.last_error().is_some());
    }

    #[test]
    fn test_failed_first_load_returns_none() {
        let mut mgr = DatasetManager::new(
            PathBuf::from("/tmp/no-such-survey-dir-xyz"),
            CategoryConfig::default(),
        );
        assert!(mgr.get_data(false).is_none());
        assert!(mgr.last_error().is_some());
    }

    #[test]
    fn test_invalidate_cache() {
        let dir = TempDir::new().unwrap();
        let mut mgr = manager_with_data(&dir);

        mgr.get_data(false);
        assert!(mgr.cache_age().is_some());

        mgr.invalidate_cache();
        assert!(mgr.cache_age().is_none());

        // Next call reloads from disk.
        assert!(mgr.get_data(false).is_some());
    }
}
