//! Top-level analysis pipeline.
//!
//! Orchestrates loading, key normalization, the join, schema validation and
//! the four aggregate views, returning an [`AnalysisReport`] ready for the
//! chart layer. Load and join failures abort the run; a single view's
//! failure is logged and leaves a hole in the report without touching its
//! siblings.

use std::path::Path;

use lens_core::error::{LensError, Result};
use lens_core::models::JoinedRecord;
use tracing::{info, warn};

use crate::aggregate::{
    self, GenrePopularity, RegionGenreDistribution, TypeByInterval, ViewershipByAgeRegion,
};
use crate::loader::load_table;
use crate::schema::JoinedTable;
use crate::table::{inner_join, normalize_join_key, JOIN_KEY};

/// How many joined rows the report keeps for the preview table.
pub const PREVIEW_ROWS: usize = 5;

// ── Public types ──────────────────────────────────────────────────────────────

/// Row counts and timings produced alongside the views.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ReportMetadata {
    /// Rows in the content table as loaded.
    pub content_rows: usize,
    /// Rows in the viewership table as loaded.
    pub viewership_rows: usize,
    /// Rows surviving the inner join.
    pub joined_rows: usize,
    /// Wall-clock seconds spent loading the two CSV files.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent joining, validating and aggregating.
    pub transform_time_seconds: f64,
}

/// The complete output of [`run_analysis`].
///
/// A `None` view means its aggregator failed (a missing column, typically)
/// and was skipped; the diagnostic has already been logged.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AnalysisReport {
    /// First joined rows, for the preview table.
    pub preview: Vec<JoinedRecord>,
    pub type_by_interval: Option<TypeByInterval>,
    pub genre_popularity: Option<GenrePopularity>,
    pub genre_by_region: Option<RegionGenreDistribution>,
    pub viewership_by_age_region: Option<ViewershipByAgeRegion>,
    pub metadata: ReportMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full analysis pipeline.
///
/// 1. Load both datasets (abort when either is unavailable).
/// 2. Normalize the join key name on both tables and inner-join them.
/// 3. Validate the joined schema into typed rows.
/// 4. Compute the four aggregate views, each isolated from the others.
pub fn run_analysis(content_path: &Path, viewership_path: &Path) -> Result<AnalysisReport> {
    // ── Step 1: Load ──────────────────────────────────────────────────────────
    let load_start = std::time::Instant::now();
    let Some(mut content) = load_table(content_path) else {
        return Err(LensError::SourceUnavailable("content".to_string()));
    };
    let Some(mut viewership) = load_table(viewership_path) else {
        return Err(LensError::SourceUnavailable("viewership".to_string()));
    };
    let load_time = load_start.elapsed().as_secs_f64();
    info!(
        "Loaded {} content rows and {} viewership rows",
        content.len(),
        viewership.len()
    );

    // ── Step 2: Normalize + join ──────────────────────────────────────────────
    let transform_start = std::time::Instant::now();
    normalize_join_key(&mut content);
    normalize_join_key(&mut viewership);
    let raw_joined = inner_join(&content, &viewership)?;
    info!("Inner join on '{}' kept {} rows", JOIN_KEY, raw_joined.len());

    // ── Step 3: Validate ──────────────────────────────────────────────────────
    let joined = JoinedTable::from_raw(&raw_joined)?;

    // ── Step 4: Aggregate views ───────────────────────────────────────────────
    let type_by_interval = run_view("content-type", aggregate::type_by_interval(&joined));
    let genre_popularity = run_view("genre-popularity", aggregate::genre_popularity(&joined));
    let genre_by_region = run_view("region-genre", aggregate::genre_by_region(&joined));
    let viewership_by_age_region = run_view(
        "age/region viewership",
        aggregate::viewership_by_age_region(&joined),
    );
    let transform_time = transform_start.elapsed().as_secs_f64();

    // ── Step 5: Build report ──────────────────────────────────────────────────
    let metadata = ReportMetadata {
        content_rows: content.len(),
        viewership_rows: viewership.len(),
        joined_rows: joined.len(),
        load_time_seconds: load_time,
        transform_time_seconds: transform_time,
    };

    Ok(AnalysisReport {
        preview: joined.rows.iter().take(PREVIEW_ROWS).cloned().collect(),
        type_by_interval,
        genre_popularity,
        genre_by_region,
        viewership_by_age_region,
        metadata,
    })
}

// ── Private helpers ───────────────────────────────────────────────────────────

/// Unwrap one view's result, logging and absorbing its failure so sibling
/// views still run.
fn run_view<T>(name: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(view) => Some(view),
        Err(e) => {
            warn!("Skipping the {} view: {}", name, e);
            None
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
