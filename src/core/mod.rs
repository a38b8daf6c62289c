//! Interpolation engine and the analysis pipeline built on it

pub mod interpolation;
pub mod pipeline;
pub mod spline;

pub use interpolation::{InterpolationEngine, InterpolationError};
pub use pipeline::{AnalysisOutcome, AnalysisPipeline, PipelineEvent};
pub use spline::{BSpline, SplineError};
