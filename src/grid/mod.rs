//! Grid geometry configuration
//!
//! Holds the primary dimensions of the tiled workload and the derived
//! widths the stride engine consumes.

pub mod config;

pub use config::GridConfig;
