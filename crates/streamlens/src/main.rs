mod bootstrap;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use lens_charts::options::ChartOptions;
use lens_charts::presenter::Presenter;
use lens_core::settings::Settings;
use lens_data::pipeline::run_analysis;

fn main() -> Result<()> {
    let settings = Settings::parse();
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Streamlens v{} starting", env!("CARGO_PKG_VERSION"));

    let (content_path, viewership_path) = bootstrap::resolve_dataset_paths(&settings)?;
    tracing::info!(
        "Content dataset: {}; viewership dataset: {}",
        content_path.display(),
        viewership_path.display()
    );

    let report = match run_analysis(&content_path, &viewership_path) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Analysis failed: {}", e);
            return Err(e.into());
        }
    };

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let opts = ChartOptions {
        width: usize::from(settings.chart_width),
        region_delay: Duration::from_millis(settings.region_delay_ms),
        trim_zero_slices: !settings.keep_zero_slices,
        show_preview: settings.preview,
    };

    let stdout = std::io::stdout();
    let mut presenter = Presenter::new(stdout.lock(), opts);
    presenter.present(&report)?;

    Ok(())
}
