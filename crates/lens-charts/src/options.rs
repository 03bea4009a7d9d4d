use std::time::Duration;

/// Configuration controlling chart appearance and pacing.
///
/// Passed into the renderer at construction; there is no process-wide
/// default to mutate.
#[derive(Debug, Clone)]
pub struct ChartOptions {
    /// Width of the bar portion in terminal columns (excluding labels).
    pub width: usize,
    /// Pause between successive region charts. Zero disables the pause;
    /// it only ever mattered for interactive renderers that need time to
    /// settle between figures.
    pub region_delay: Duration,
    /// Drop zero-count slices from region share charts.
    pub trim_zero_slices: bool,
    /// Render the joined-table preview before the charts.
    pub show_preview: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 60,
            region_delay: Duration::ZERO,
            trim_zero_slices: true,
            show_preview: false,
        }
    }
}
