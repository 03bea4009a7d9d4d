//! Maps an [`AnalysisReport`] onto the chart sequence.
//!
//! Views that came back empty get a logged notice rather than a blank
//! chart, and the per-region sequence honors the configured delay.

use std::io::{self, Write};
use std::thread;

use lens_core::intervals::interval_label;
use lens_data::aggregate::{
    GenrePopularity, RegionGenreDistribution, TypeByInterval, ViewershipByAgeRegion,
};
use lens_data::pipeline::AnalysisReport;
use tracing::info;

use crate::options::ChartOptions;
use crate::preview::render_preview;
use crate::share::ShareChart;
use crate::stacked_bar::{Series, StackedBarChart};

/// One-shot chart writer over any output stream.
pub struct Presenter<W: Write> {
    out: W,
    opts: ChartOptions,
}

impl<W: Write> Presenter<W> {
    /// Build a presenter with its options fixed for the run.
    pub fn new(out: W, opts: ChartOptions) -> Self {
        Self { out, opts }
    }

    /// Render every available view of the report, in pipeline order.
    pub fn present(&mut self, report: &AnalysisReport) -> io::Result<()> {
        if self.opts.show_preview {
            self.write_lines(&render_preview(&report.preview))?;
        }

        match &report.type_by_interval {
            Some(view) => self.write_lines(&type_chart(view).render(&self.opts))?,
            None => info!("Content-type view unavailable; chart skipped"),
        }

        match &report.genre_popularity {
            Some(view) => self.write_lines(&genre_chart(view).render(&self.opts))?,
            None => info!("Genre-popularity view unavailable; chart skipped"),
        }

        match &report.genre_by_region {
            Some(view) => self.present_regions(view)?,
            None => info!("Region-genre view unavailable; charts skipped"),
        }

        match &report.viewership_by_age_region {
            Some(view) => self.write_lines(&viewership_chart(view).render(&self.opts))?,
            None => info!("Viewership view unavailable; chart skipped"),
        }

        Ok(())
    }

    /// One share chart per region, paced by the configured delay.
    fn present_regions(&mut self, view: &RegionGenreDistribution) -> io::Result<()> {
        for skipped in &view.skipped_regions {
            info!("No genre data available for {}; skipping its chart", skipped);
        }
        let mut first = true;
        for region in &view.regions {
            if !first && !self.opts.region_delay.is_zero() {
                thread::sleep(self.opts.region_delay);
            }
            first = false;
            let chart = ShareChart {
                title: format!("Genre distribution in {}", region.region),
                slices: region
                    .slices
                    .iter()
                    .map(|s| (s.genre.clone(), s.count))
                    .collect(),
            };
            self.write_lines(&chart.render(&self.opts))?;
        }
        Ok(())
    }

    fn write_lines(&mut self, lines: &[String]) -> io::Result<()> {
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        writeln!(self.out)
    }
}

// ── View-to-chart mapping ─────────────────────────────────────────────────────

fn type_chart(view: &TypeByInterval) -> StackedBarChart {
    StackedBarChart {
        title: "Movies vs TV Shows over 5-year intervals".to_string(),
        x_labels: view.intervals.iter().map(|&i| interval_label(i)).collect(),
        series: vec![
            Series {
                label: "Movies".to_string(),
                values: view.movies.clone(),
            },
            Series {
                label: "TV Shows".to_string(),
                values: view.shows.clone(),
            },
        ],
    }
}

fn genre_chart(view: &GenrePopularity) -> StackedBarChart {
    StackedBarChart {
        title: "TV show genre popularity over 5-year intervals".to_string(),
        x_labels: view.intervals.iter().map(|&i| interval_label(i)).collect(),
        series: view
            .genres
            .iter()
            .zip(&view.counts)
            .map(|(genre, counts)| Series {
                label: genre.clone(),
                values: counts.clone(),
            })
            .collect(),
    }
}

fn viewership_chart(view: &ViewershipByAgeRegion) -> StackedBarChart {
    StackedBarChart {
        title: "Viewership by age group and region".to_string(),
        x_labels: view.age_groups.clone(),
        series: view
            .regions
            .iter()
            .enumerate()
            .map(|(r, region)| Series {
                label: region.clone(),
                // Never-observed combinations render as empty, like a zero.
                values: view
                    .totals
                    .iter()
                    .map(|row| row[r].unwrap_or(0))
                    .collect(),
            })
            .collect(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
