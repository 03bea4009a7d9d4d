//! Proportional share charts, the terminal stand-in for pie charts.

use lens_core::formatting::{format_count, percentage};
use unicode_width::UnicodeWidthStr;

use crate::options::ChartOptions;

/// A titled set of labeled counts rendered as proportional bars with
/// percentages.
#[derive(Debug, Clone)]
pub struct ShareChart {
    pub title: String,
    pub slices: Vec<(String, u64)>,
}

impl ShareChart {
    /// Render the chart as text lines: title, then one bar per slice whose
    /// width is the slice's share of the configured width.
    ///
    /// Zero-count slices are dropped when `opts.trim_zero_slices` is set;
    /// they carry no share, only legend noise.
    pub fn render(&self, opts: &ChartOptions) -> Vec<String> {
        let total: u64 = self.slices.iter().map(|(_, count)| count).sum();

        let shown: Vec<&(String, u64)> = self
            .slices
            .iter()
            .filter(|(_, count)| !opts.trim_zero_slices || *count > 0)
            .collect();

        let label_width = shown
            .iter()
            .map(|(label, _)| UnicodeWidthStr::width(label.as_str()))
            .max()
            .unwrap_or(0);

        let mut lines = Vec::new();
        lines.push(self.title.clone());
        lines.push(String::new());
        for (label, count) in shown {
            let share = percentage(*count, total);
            let bar_len = if total == 0 {
                0
            } else {
                ((*count as f64 / total as f64) * opts.width as f64).round() as usize
            };
            let pad = label_width - UnicodeWidthStr::width(label.as_str());
            lines.push(format!(
                "{}{}  {:<bar_width$}  {:>5.1}% ({})",
                label,
                " ".repeat(pad),
                "\u{2588}".repeat(bar_len),
                share,
                format_count(*count),
                bar_width = opts.width,
            ));
        }
        lines
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
