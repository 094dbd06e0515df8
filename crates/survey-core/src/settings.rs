use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Age-cohort analytics for tourist survey datasets
#[derive(Parser, Debug, Clone)]
#[command(
    name = "tourist-insights",
    about = "Age-cohort analytics for tourist survey datasets",
    version
)]
pub struct Settings {
    /// Survey CSV file, or a directory to search for one
    #[arg(long)]
    pub data_path: Option<PathBuf>,

    /// Table to display
    #[arg(long, default_value = "summary", value_parser = [
        "summary", "transport", "activities", "places", "spending", "profiles",
    ])]
    pub view: String,

    /// Restrict the view to one age cohort
    #[arg(long, value_parser = ["<18", "18-30", "31-45", "46-60", "60+"])]
    pub cohort: Option<String>,

    /// Output format
    #[arg(long, default_value = "table", value_parser = ["table", "json"])]
    pub format: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
