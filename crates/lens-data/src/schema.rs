//! Schema validation of the joined table.
//!
//! Converts the string-typed join output into typed [`JoinedRecord`]s once,
//! so the aggregators never probe raw cells. Column presence is recorded
//! here and checked per view; a present column with an unusable cell costs
//! that one value, not the row or the table.

use lens_core::error::{LensError, Result};
use lens_core::models::{JoinedRecord, TitleType};
use tracing::{debug, warn};

use crate::table::{RawTable, JOIN_KEY};

/// Column names consumed by the aggregate views.
pub const COL_TYPE: &str = "type";
pub const COL_RELEASE_YEAR: &str = "release_year";
pub const COL_GENRES: &str = "genres";
pub const COL_REGION: &str = "viewer_region";
pub const COL_AGE_GROUP: &str = "viewer_age_group";
pub const COL_VIEWERSHIP: &str = "viewership_count";

/// The validated joined table: typed rows plus the set of columns the raw
/// join carried, read-only input to every aggregator.
#[derive(Debug, Clone)]
pub struct JoinedTable {
    columns: Vec<String>,
    pub rows: Vec<JoinedRecord>,
}

impl JoinedTable {
    /// Validate and type a raw joined table.
    ///
    /// Requires the join key; everything else is optional and recorded in
    /// the column set. Cells that fail to type (a word where a year should
    /// be, a negative count) become `None` with a diagnostic.
    pub fn from_raw(raw: &RawTable) -> Result<JoinedTable> {
        let key = raw
            .column_index(JOIN_KEY)
            .ok_or_else(|| LensError::MissingColumn(JOIN_KEY.to_string()))?;

        let col_type = raw.column_index(COL_TYPE);
        let col_year = raw.column_index(COL_RELEASE_YEAR);
        let col_genres = raw.column_index(COL_GENRES);
        let col_region = raw.column_index(COL_REGION);
        let col_age = raw.column_index(COL_AGE_GROUP);
        let col_count = raw.column_index(COL_VIEWERSHIP);
        // The title column may have been suffix-disambiguated by the join.
        let col_title = raw
            .column_index("title")
            .or_else(|| raw.column_index("title_content"));

        let mut bad_years = 0usize;
        let mut bad_counts = 0usize;

        let mut rows = Vec::with_capacity(raw.len());
        for r in 0..raw.len() {
            let text = |col: Option<usize>| -> Option<String> {
                let cell = raw.cell(r, col?).trim();
                if cell.is_empty() {
                    None
                } else {
                    Some(cell.to_string())
                }
            };

            let release_year = match text(col_year) {
                Some(cell) => match cell.parse::<i32>() {
                    Ok(year) => Some(year),
                    Err(_) => {
                        debug!("Row {}: release_year {:?} is not an integer", r, cell);
                        bad_years += 1;
                        None
                    }
                },
                None => None,
            };

            let viewership_count = match text(col_count) {
                Some(cell) => match cell.parse::<u64>() {
                    Ok(count) => Some(count),
                    Err(_) => {
                        debug!(
                            "Row {}: viewership_count {:?} is not a non-negative integer",
                            r, cell
                        );
                        bad_counts += 1;
                        None
                    }
                },
                None => None,
            };

            rows.push(JoinedRecord {
                show_id: raw.cell(r, key).trim().to_string(),
                title: text(col_title),
                title_type: text(col_type).and_then(|cell| TitleType::parse_label(&cell)),
                release_year,
                genres: text(col_genres),
                viewer_region: text(col_region),
                viewer_age_group: text(col_age),
                viewership_count,
            });
        }

        if bad_years > 0 {
            warn!("{} rows carried a non-integer release_year", bad_years);
        }
        if bad_counts > 0 {
            warn!("{} rows carried an unusable viewership_count", bad_counts);
        }

        Ok(JoinedTable {
            columns: raw.headers().to_vec(),
            rows,
        })
    }

    /// Assemble a table directly from typed parts (aggregator tests).
    pub(crate) fn from_parts(columns: Vec<String>, rows: Vec<JoinedRecord>) -> JoinedTable {
        JoinedTable { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Fail with [`LensError::MissingColumn`] on the first absent column.
    pub fn require_columns(&self, names: &[&str]) -> Result<()> {
        for name in names {
            if !self.has_column(name) {
                return Err(LensError::MissingColumn(name.to_string()));
            }
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
