//! Data layer for Streamlens.
//!
//! Responsible for loading the catalog and viewership CSV files, aligning
//! their join keys, joining them, validating the joined schema, exploding
//! genre lists and computing the four aggregate views.

pub mod aggregate;
pub mod explode;
pub mod loader;
pub mod pipeline;
pub mod schema;
pub mod table;

pub use lens_core as core;
