//! Category explosion of genre lists.
//!
//! Expands each joined row into one row per genre label, parsing the raw
//! list literal with the restricted parser. Rows whose literal is rejected
//! are excluded and counted, never coerced; rows with no genre text or an
//! empty list produce nothing and are counted separately.

use lens_core::genres::parse_genre_list;
use lens_core::models::{ExplodedRecord, JoinedRecord};
use serde::Serialize;
use tracing::{debug, warn};

/// Counters describing one explosion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExplosionStats {
    /// Rows fed into the explosion.
    pub source_rows: usize,
    /// Rows produced (one per source row x genre).
    pub exploded_rows: usize,
    /// Source rows whose genre literal the parser rejected.
    pub rejected_rows: usize,
    /// Source rows with no genre text or an empty list; dropped by policy.
    pub empty_rows: usize,
}

/// Explode each record's genre list into one [`ExplodedRecord`] per label.
///
/// All non-genre fields are carried unchanged. The output row count equals
/// the sum of accepted list lengths.
pub fn explode_genres(records: &[JoinedRecord]) -> (Vec<ExplodedRecord>, ExplosionStats) {
    let mut stats = ExplosionStats {
        source_rows: records.len(),
        ..ExplosionStats::default()
    };
    let mut out = Vec::new();

    for record in records {
        let Some(raw) = record.genres.as_deref() else {
            stats.empty_rows += 1;
            continue;
        };
        match parse_genre_list(raw) {
            Err(e) => {
                warn!(
                    "Excluding {}: genre field {:?} is not a list literal ({})",
                    record.show_id, raw, e
                );
                stats.rejected_rows += 1;
            }
            Ok(labels) if labels.is_empty() => {
                stats.empty_rows += 1;
            }
            Ok(labels) => {
                for label in labels {
                    out.push(ExplodedRecord::from_joined(record, label));
                    stats.exploded_rows += 1;
                }
            }
        }
    }

    debug!(
        "Exploded {} rows into {} ({} rejected, {} empty)",
        stats.source_rows, stats.exploded_rows, stats.rejected_rows, stats.empty_rows
    );

    (out, stats)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
