//! In-memory string-typed tables, join-key normalization and the inner join.
//!
//! Cells stay untyped here; typing happens during schema validation so that
//! a malformed cell costs one value, not the whole table.

use std::collections::{HashMap, HashSet};

use lens_core::error::{LensError, Result};
use tracing::debug;

/// Name of the join-key column after normalization.
pub const JOIN_KEY: &str = "show_id";

// ── RawTable ──────────────────────────────────────────────────────────────────

/// A header row plus string-typed body rows, as read from a CSV file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a body row. Rows shorter than the header are tolerated;
    /// [`RawTable::cell`] reads missing trailing cells as empty.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by exact header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell text at (row, column); empty string when the row is short.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Rename the first column named `from` to `to`. Returns whether a
    /// rename happened.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_index(from) {
            Some(idx) => {
                self.headers[idx] = to.to_string();
                true
            }
            None => false,
        }
    }
}

// ── Key normalization ─────────────────────────────────────────────────────────

/// Rename a column literally named `id` to `show_id` so both tables join on
/// the same key name. No-op when the column is absent.
pub fn normalize_join_key(table: &mut RawTable) {
    if table.rename_column("id", JOIN_KEY) {
        debug!("Renamed 'id' column to '{}'", JOIN_KEY);
    }
}

// ── Inner join ────────────────────────────────────────────────────────────────

/// Inner-join the catalog and viewership tables on [`JOIN_KEY`].
///
/// Output rows follow the content table's order; a content row matching
/// several viewership rows expands in the viewership table's first-match
/// order. Rows whose key exists in only one table are dropped; that is the
/// point of an inner join, not a defect.
///
/// Both column sets are preserved. A non-key name collision is
/// disambiguated with `_content` / `_viewership` suffixes.
///
/// Fails with [`LensError::MissingJoinKey`] when either side lacks the key.
pub fn inner_join(content: &RawTable, viewership: &RawTable) -> Result<RawTable> {
    let left_key = content
        .column_index(JOIN_KEY)
        .ok_or_else(|| LensError::MissingJoinKey {
            table: "content".to_string(),
        })?;
    let right_key = viewership
        .column_index(JOIN_KEY)
        .ok_or_else(|| LensError::MissingJoinKey {
            table: "viewership".to_string(),
        })?;

    // Build the output header: all content columns, then viewership columns
    // minus the key, suffixing both sides of any non-key collision.
    let left_names: HashSet<&str> = content.headers().iter().map(String::as_str).collect();
    let mut headers: Vec<String> = content.headers().to_vec();
    for (i, name) in viewership.headers().iter().enumerate() {
        if i == right_key {
            continue;
        }
        if name != JOIN_KEY && left_names.contains(name.as_str()) {
            if let Some(idx) = headers.iter().position(|h| h == name) {
                headers[idx] = format!("{}_content", name);
            }
            headers.push(format!("{}_viewership", name));
        } else {
            headers.push(name.clone());
        }
    }

    // Index viewership rows by key, preserving file order per key.
    let mut by_key: HashMap<&str, Vec<usize>> = HashMap::new();
    for row in 0..viewership.len() {
        let key = viewership.cell(row, right_key);
        if key.is_empty() {
            continue;
        }
        by_key.entry(key).or_default().push(row);
    }

    let mut joined = RawTable::new(headers);
    for left_row in 0..content.len() {
        let key = content.cell(left_row, left_key);
        if key.is_empty() {
            continue;
        }
        let Some(matches) = by_key.get(key) else {
            continue;
        };
        for &right_row in matches {
            let mut out: Vec<String> = (0..content.headers().len())
                .map(|c| content.cell(left_row, c).to_string())
                .collect();
            for c in 0..viewership.headers().len() {
                if c == right_key {
                    continue;
                }
                out.push(viewership.cell(right_row, c).to_string());
            }
            joined.push_row(out);
        }
    }

    debug!(
        "Joined {} content x {} viewership rows into {} rows",
        content.len(),
        viewership.len(),
        joined.len()
    );

    Ok(joined)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn content_table() -> RawTable {
        let mut t = RawTable::new(strings(&["show_id", "title", "type"]));
        t.push_row(strings(&["s1", "First", "MOVIE"]));
        t.push_row(strings(&["s2", "Second", "SHOW"]));
        t.push_row(strings(&["s3", "Third", "MOVIE"]));
        t
    }

    fn viewership_table() -> RawTable {
        let mut t = RawTable::new(strings(&["show_id", "viewer_region", "viewership_count"]));
        t.push_row(strings(&["s2", "US", "200"]));
        t.push_row(strings(&["s1", "EU", "100"]));
        t.push_row(strings(&["s9", "AS", "300"]));
        t
    }

    // ── RawTable ──────────────────────────────────────────────────────────────

    #[test]
    fn test_cell_pads_short_rows() {
        let mut t = RawTable::new(strings(&["a", "b", "c"]));
        t.push_row(strings(&["1"]));
        assert_eq!(t.cell(0, 0), "1");
        assert_eq!(t.cell(0, 2), "");
        assert_eq!(t.cell(5, 0), "");
    }

    #[test]
    fn test_rename_column() {
        let mut t = RawTable::new(strings(&["id", "title"]));
        assert!(t.rename_column("id", "show_id"));
        assert_eq!(t.headers(), &["show_id", "title"]);
        assert!(!t.rename_column("id", "show_id"));
    }

    // ── normalize_join_key ────────────────────────────────────────────────────

    #[test]
    fn test_normalize_renames_id() {
        let mut t = RawTable::new(strings(&["id", "title"]));
        normalize_join_key(&mut t);
        assert!(t.has_column("show_id"));
        assert!(!t.has_column("id"));
    }

    #[test]
    fn test_normalize_noop_without_id() {
        let mut t = RawTable::new(strings(&["show_id", "title"]));
        normalize_join_key(&mut t);
        assert_eq!(t.headers(), &["show_id", "title"]);
    }

    // ── inner_join ────────────────────────────────────────────────────────────

    #[test]
    fn test_join_keeps_only_shared_keys() {
        let joined = inner_join(&content_table(), &viewership_table()).unwrap();
        // s3 has no viewership row, s9 has no content row.
        assert_eq!(joined.len(), 2);
        let key = joined.column_index("show_id").unwrap();
        let ids: Vec<&str> = (0..joined.len()).map(|r| joined.cell(r, key)).collect();
        assert_eq!(ids, vec!["s1", "s2"]);
    }

    #[test]
    fn test_join_row_count_bounded_by_inputs() {
        let content = content_table();
        let viewership = viewership_table();
        let joined = inner_join(&content, &viewership).unwrap();
        assert!(joined.len() <= content.len().min(viewership.len()));
    }

    #[test]
    fn test_join_preserves_both_column_sets() {
        let joined = inner_join(&content_table(), &viewership_table()).unwrap();
        for name in ["show_id", "title", "type", "viewer_region", "viewership_count"] {
            assert!(joined.has_column(name), "missing column {name}");
        }
        // The key column appears exactly once.
        let key_count = joined.headers().iter().filter(|h| *h == "show_id").count();
        assert_eq!(key_count, 1);
    }

    #[test]
    fn test_join_carries_cell_values() {
        let joined = inner_join(&content_table(), &viewership_table()).unwrap();
        let region = joined.column_index("viewer_region").unwrap();
        let title = joined.column_index("title").unwrap();
        assert_eq!(joined.cell(0, title), "First");
        assert_eq!(joined.cell(0, region), "EU");
        assert_eq!(joined.cell(1, title), "Second");
        assert_eq!(joined.cell(1, region), "US");
    }

    #[test]
    fn test_join_duplicate_right_keys_expand_in_order() {
        let mut content = RawTable::new(strings(&["show_id", "title"]));
        content.push_row(strings(&["s1", "First"]));

        let mut viewership = RawTable::new(strings(&["show_id", "viewer_region"]));
        viewership.push_row(strings(&["s1", "US"]));
        viewership.push_row(strings(&["s1", "EU"]));

        let joined = inner_join(&content, &viewership).unwrap();
        assert_eq!(joined.len(), 2);
        let region = joined.column_index("viewer_region").unwrap();
        assert_eq!(joined.cell(0, region), "US");
        assert_eq!(joined.cell(1, region), "EU");
    }

    #[test]
    fn test_join_collision_gets_suffixes() {
        let mut content = RawTable::new(strings(&["show_id", "title"]));
        content.push_row(strings(&["s1", "Catalog title"]));

        let mut viewership = RawTable::new(strings(&["show_id", "title"]));
        viewership.push_row(strings(&["s1", "Viewer title"]));

        let joined = inner_join(&content, &viewership).unwrap();
        assert!(joined.has_column("title_content"));
        assert!(joined.has_column("title_viewership"));
        assert!(!joined.has_column("title"));
        let left = joined.column_index("title_content").unwrap();
        let right = joined.column_index("title_viewership").unwrap();
        assert_eq!(joined.cell(0, left), "Catalog title");
        assert_eq!(joined.cell(0, right), "Viewer title");
    }

    #[test]
    fn test_join_missing_key_left() {
        let content = RawTable::new(strings(&["title"]));
        let viewership = viewership_table();
        let err = inner_join(&content, &viewership).unwrap_err();
        assert!(matches!(
            err,
            LensError::MissingJoinKey { ref table } if table == "content"
        ));
    }

    #[test]
    fn test_join_missing_key_right() {
        let content = content_table();
        let viewership = RawTable::new(strings(&["viewer_region"]));
        let err = inner_join(&content, &viewership).unwrap_err();
        assert!(matches!(
            err,
            LensError::MissingJoinKey { ref table } if table == "viewership"
        ));
    }

    #[test]
    fn test_join_empty_keys_never_match() {
        let mut content = RawTable::new(strings(&["show_id", "title"]));
        content.push_row(strings(&["", "Blank"]));
        let mut viewership = RawTable::new(strings(&["show_id", "viewer_region"]));
        viewership.push_row(strings(&["", "US"]));

        let joined = inner_join(&content, &viewership).unwrap();
        assert!(joined.is_empty());
    }
}
