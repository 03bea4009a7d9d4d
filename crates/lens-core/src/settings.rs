use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Catalog and viewership trend analysis for streaming datasets
#[derive(Parser, Debug, Clone)]
#[command(
    name = "streamlens",
    about = "Catalog and viewership trend analysis for streaming datasets",
    version
)]
pub struct Settings {
    /// Path to the catalog dataset (CSV with id/show_id, type, release_year, genres)
    #[arg(long)]
    pub content: Option<PathBuf>,

    /// Path to the viewership dataset (CSV with id/show_id, viewer_region,
    /// viewer_age_group, viewership_count)
    #[arg(long)]
    pub viewership: Option<PathBuf>,

    /// Directory searched for catalog.csv / viewership.csv when explicit
    /// paths are not given
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Chart width in terminal columns
    #[arg(long, default_value = "60", value_parser = clap::value_parser!(u16).range(20..=200))]
    pub chart_width: u16,

    /// Delay in milliseconds between successive region charts (0 = none)
    #[arg(long, default_value = "0")]
    pub region_delay_ms: u64,

    /// Print the first rows of the joined table before the charts
    #[arg(long)]
    pub preview: bool,

    /// Keep zero-count genre slices in region share charts
    #[arg(long)]
    pub keep_zero_slices: bool,

    /// Emit the aggregate views as JSON instead of rendering charts
    #[arg(long)]
    pub json: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,
}
