//! Plain-text preview of the first joined rows.

use lens_core::models::JoinedRecord;
use unicode_width::UnicodeWidthStr;

const HEADERS: [&str; 7] = [
    "show_id",
    "title",
    "type",
    "year",
    "region",
    "age_group",
    "viewership",
];

/// Render the joined-table preview as aligned text columns.
pub fn render_preview(rows: &[JoinedRecord]) -> Vec<String> {
    let cells: Vec<[String; 7]> = rows.iter().map(row_cells).collect();

    // Column widths: header or widest cell, whichever is larger.
    let mut widths: Vec<usize> = HEADERS.iter().map(|h| UnicodeWidthStr::width(*h)).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let mut lines = Vec::new();
    lines.push(format_row(
        &HEADERS.map(|h| h.to_string()),
        &widths,
    ));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &cells {
        lines.push(format_row(row, &widths));
    }
    lines
}

fn row_cells(record: &JoinedRecord) -> [String; 7] {
    let opt = |value: &Option<String>| value.clone().unwrap_or_default();
    [
        record.show_id.clone(),
        opt(&record.title),
        record
            .title_type
            .map(|t| t.to_string())
            .unwrap_or_default(),
        record
            .release_year
            .map(|y| y.to_string())
            .unwrap_or_default(),
        opt(&record.viewer_region),
        opt(&record.viewer_age_group),
        record
            .viewership_count
            .map(|c| c.to_string())
            .unwrap_or_default(),
    ]
}

fn format_row(cells: &[String; 7], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width - UnicodeWidthStr::width(cell.as_str());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
