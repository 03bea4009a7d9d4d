//! Chart layer for Streamlens.
//!
//! Renders the aggregate views as one-shot terminal charts: stacked
//! horizontal bars for the interval and viewership views, proportional
//! share bars for the per-region genre distributions, plus a small preview
//! table of the joined data. Everything writes to a caller-supplied stream
//! so tests can capture the output.

pub mod options;
pub mod presenter;
pub mod preview;
pub mod share;
pub mod stacked_bar;

pub use lens_core as core;
