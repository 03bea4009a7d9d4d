//! CSV dataset loading.
//!
//! Loading is deliberately forgiving at the call site: a missing or
//! unreadable file yields `None` with a diagnostic, and the pipeline
//! decides whether that is fatal. One attempt per call, no retries.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::table::RawTable;

/// Load a delimited-text dataset into a [`RawTable`].
///
/// Returns `None` on any I/O or CSV failure, including row-level parse
/// errors after a good header: a half-read table would skew every
/// aggregate downstream, so it is treated as no data at all.
pub fn load_table(path: &Path) -> Option<RawTable> {
    let mut reader = match ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
    {
        Ok(r) => r,
        Err(e) => {
            warn!("Error loading dataset {}: {}", path.display(), e);
            return None;
        }
    };

    let headers = match reader.headers() {
        Ok(h) => h.iter().map(|s| s.trim().to_string()).collect(),
        Err(e) => {
            warn!("Error reading header of {}: {}", path.display(), e);
            return None;
        }
    };

    let mut table = RawTable::new(headers);
    for record in reader.records() {
        match record {
            Ok(row) => table.push_row(row.iter().map(|s| s.to_string()).collect()),
            Err(e) => {
                warn!("Error parsing row in {}: {}", path.display(), e);
                return None;
            }
        }
    }

    debug!(
        "Loaded {} rows x {} columns from {}",
        table.len(),
        table.headers().len(),
        path.display()
    );

    Some(table)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
