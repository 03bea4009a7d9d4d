use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a catalog entry is a film or an episodic title.
///
/// The raw datasets label rows `MOVIE` / `SHOW`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TitleType {
    Movie,
    Show,
}

impl TitleType {
    /// Parse the raw type label, case-insensitively.
    ///
    /// Returns `None` for anything other than `MOVIE` / `SHOW`; such rows
    /// are excluded from type-keyed views and counted by the aggregators.
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_uppercase().as_str() {
            "MOVIE" => Some(TitleType::Movie),
            "SHOW" => Some(TitleType::Show),
            _ => None,
        }
    }
}

impl fmt::Display for TitleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TitleType::Movie => write!(f, "MOVIE"),
            TitleType::Show => write!(f, "SHOW"),
        }
    }
}

/// One row of the validated joined table.
///
/// Fields other than the join key are optional: schema validation records
/// which columns exist, and each aggregate view enforces its own column
/// requirements. An empty cell in a present column also reads as `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinedRecord {
    /// Identifier shared by the catalog and viewership tables.
    pub show_id: String,
    /// Title text, when the catalog carries one.
    #[serde(default)]
    pub title: Option<String>,
    /// Movie / show label, when recognized.
    #[serde(default)]
    pub title_type: Option<TitleType>,
    /// Release year; `None` when the cell is absent or not an integer.
    #[serde(default)]
    pub release_year: Option<i32>,
    /// Raw genre-list literal text, parsed only at explosion time.
    #[serde(default)]
    pub genres: Option<String>,
    /// Viewer region label.
    #[serde(default)]
    pub viewer_region: Option<String>,
    /// Viewer age-group label.
    #[serde(default)]
    pub viewer_age_group: Option<String>,
    /// Viewership count; `None` when absent or not a non-negative integer.
    #[serde(default)]
    pub viewership_count: Option<u64>,
}

/// A [`JoinedRecord`] with its genre list replaced by a single label.
///
/// Produced transiently by category explosion; one record per
/// (source row × genre).
#[derive(Debug, Clone, Serialize)]
pub struct ExplodedRecord {
    pub show_id: String,
    pub title_type: Option<TitleType>,
    pub release_year: Option<i32>,
    /// Exactly one genre label from the source row's list.
    pub genre: String,
    pub viewer_region: Option<String>,
    pub viewer_age_group: Option<String>,
    pub viewership_count: Option<u64>,
}

impl ExplodedRecord {
    /// Build one exploded record from a source row and a single label.
    pub fn from_joined(record: &JoinedRecord, genre: String) -> Self {
        Self {
            show_id: record.show_id.clone(),
            title_type: record.title_type,
            release_year: record.release_year,
            genre,
            viewer_region: record.viewer_region.clone(),
            viewer_age_group: record.viewer_age_group.clone(),
            viewership_count: record.viewership_count,
        }
    }
}
