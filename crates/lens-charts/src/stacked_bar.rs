//! Stacked horizontal bar charts rendered as plain text.

use lens_core::formatting::format_count;
use unicode_width::UnicodeWidthStr;

use crate::options::ChartOptions;

/// Glyphs cycled through for successive series segments.
const SERIES_GLYPHS: [char; 6] = ['\u{2588}', '\u{2593}', '\u{2592}', '\u{2591}', '\u{259A}', '\u{259E}'];

/// One series of the chart: a label plus one value per x position.
#[derive(Debug, Clone)]
pub struct Series {
    pub label: String,
    pub values: Vec<u64>,
}

/// A stacked horizontal bar chart: one bar per x label, one segment per
/// series, scaled so the largest stacked total spans the configured width.
#[derive(Debug, Clone)]
pub struct StackedBarChart {
    pub title: String,
    pub x_labels: Vec<String>,
    pub series: Vec<Series>,
}

impl StackedBarChart {
    /// Render the chart as text lines: title, one bar row per x label with
    /// its stacked total, then a glyph legend.
    pub fn render(&self, opts: &ChartOptions) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(self.title.clone());
        lines.push(String::new());

        let label_width = self
            .x_labels
            .iter()
            .map(|l| UnicodeWidthStr::width(l.as_str()))
            .max()
            .unwrap_or(0);

        let totals: Vec<u64> = (0..self.x_labels.len())
            .map(|i| {
                self.series
                    .iter()
                    .map(|s| s.values.get(i).copied().unwrap_or(0))
                    .sum()
            })
            .collect();
        let max_total = totals.iter().copied().max().unwrap_or(0);

        for (i, x_label) in self.x_labels.iter().enumerate() {
            let bar = self.bar_for(i, max_total, opts.width);
            let pad = label_width - UnicodeWidthStr::width(x_label.as_str());
            lines.push(format!(
                "{}{}  {:<bar_width$}  {}",
                x_label,
                " ".repeat(pad),
                bar,
                format_count(totals[i]),
                bar_width = opts.width,
            ));
        }

        lines.push(String::new());
        lines.push(self.legend());
        lines
    }

    /// Build the stacked bar for one x position.
    ///
    /// Segment widths come from rounding the cumulative sum, so the bar's
    /// total width never drifts from the scaled total.
    fn bar_for(&self, index: usize, max_total: u64, width: usize) -> String {
        let mut bar = String::new();
        if max_total == 0 {
            return bar;
        }
        let scale = width as f64 / max_total as f64;
        let mut cumulative = 0u64;
        let mut drawn = 0usize;
        for (series_idx, series) in self.series.iter().enumerate() {
            cumulative += series.values.get(index).copied().unwrap_or(0);
            let target = (cumulative as f64 * scale).round() as usize;
            let glyph = SERIES_GLYPHS[series_idx % SERIES_GLYPHS.len()];
            for _ in drawn..target {
                bar.push(glyph);
            }
            drawn = target;
        }
        bar
    }

    fn legend(&self) -> String {
        self.series
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{} {}", SERIES_GLYPHS[i % SERIES_GLYPHS.len()], s.label))
            .collect::<Vec<_>>()
            .join("  ")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
