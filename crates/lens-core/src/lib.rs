//! Core domain types and helpers for Streamlens.
//!
//! Holds the record and view models shared by the data and chart layers,
//! the error taxonomy, the restricted genre-literal parser, release-year
//! interval bucketing, count formatting and the CLI settings.

pub mod error;
pub mod formatting;
pub mod genres;
pub mod intervals;
pub mod models;
pub mod settings;
