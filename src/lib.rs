//! PHAST dispersion analyser
//!
//! Reads the "Time-varying Observer Dispersion Data" tables out of PHAST
//! Excel reports and finds, for every equipment item / scenario / weather
//! combination, the downwind distance at which the cloud reaches a given
//! centre-line temperature.
//!
//! # Features
//!
//! - Marker-driven sheet parsing: no fixed cell addresses
//! - Vapour or liquid centre-line temperature
//! - Linear, quadratic, cubic spline and nearest-neighbour interpolation
//! - Results exported to an Excel summary table
//!
//! # Example
//!
//! ```no_run
//! use phast_dispersion::config::AnalysisConfig;
//! use phast_dispersion::core::AnalysisPipeline;
//! use std::path::Path;
//!
//! let config = AnalysisConfig::default();
//! let pipeline = AnalysisPipeline::new(&config);
//! let outcome = pipeline.run(Path::new("reports"))?;
//!
//! for result in &outcome.results {
//!     println!("{} / {}: {:.1} m", result.subsection, result.weather, result.downwind_distance);
//! }
//! # Ok::<(), phast_dispersion::error::PhastError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod types;

// Re-export commonly used types
pub use error::{PhastError, PhastResult};
pub use types::{AnalysisResult, DispersionRecord, InterpolationMethod, TemperatureType};
