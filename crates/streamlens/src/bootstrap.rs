use std::path::PathBuf;

use lens_core::error::{LensError, Result};
use lens_core::settings::Settings;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default catalog file name looked up inside a data directory.
pub const CONTENT_FILE: &str = "catalog.csv";
/// Default viewership file name looked up inside a data directory.
pub const VIEWERSHIP_FILE: &str = "viewership.csv";

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Dataset-path resolution ────────────────────────────────────────────────────

/// Attempt to locate a data directory on the local system.
///
/// Checks the following paths in order and returns the first that exists:
/// 1. `./data/`
/// 2. `~/.local/share/streamlens/`
///
/// Returns `None` when neither path exists.
pub fn discover_data_dir() -> Option<PathBuf> {
    let mut candidates = vec![PathBuf::from("data")];
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".local").join("share").join("streamlens"));
    }
    candidates.into_iter().find(|p| p.is_dir())
}

/// Resolve the two dataset paths from settings.
///
/// Explicit `--content` / `--viewership` flags win; otherwise both default
/// file names are looked up under `--data-dir` or the discovered data
/// directory. Fails with a configuration error when nothing resolves.
pub fn resolve_dataset_paths(settings: &Settings) -> Result<(PathBuf, PathBuf)> {
    if let (Some(content), Some(viewership)) = (&settings.content, &settings.viewership) {
        return Ok((content.clone(), viewership.clone()));
    }

    let data_dir = settings
        .data_dir
        .clone()
        .or_else(discover_data_dir)
        .ok_or_else(|| {
            LensError::Config(
                "no dataset paths given and no data directory found; \
                 pass --content and --viewership, or --data-dir"
                    .to_string(),
            )
        })?;

    let content = settings
        .content
        .clone()
        .unwrap_or_else(|| data_dir.join(CONTENT_FILE));
    let viewership = settings
        .viewership
        .clone()
        .unwrap_or_else(|| data_dir.join(VIEWERSHIP_FILE));
    Ok((content, viewership))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
