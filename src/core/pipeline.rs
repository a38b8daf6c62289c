//! Analysis pipeline: folder of reports → result rows
//!
//! Extraction failures and per-record interpolation failures are logged
//! and skipped. The only run-level failure is a folder that yields no
//! records at all.

use crate::config::AnalysisConfig;
use crate::core::interpolation::InterpolationEngine;
use crate::error::{PhastError, PhastResult};
use crate::excel::file_processor::FileProcessor;
use crate::types::{AnalysisResult, DispersionRecord, InterpolationMethod, TemperatureType};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Notification emitted while a run progresses
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    Status(String),
    /// Percentage of records processed, 0-100
    Progress(u8),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisOutcome {
    pub results: Vec<AnalysisResult>,
    pub records_found: usize,
    pub records_skipped: usize,
    /// Workbooks that could not be read
    pub failed_files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy)]
pub struct AnalysisPipeline {
    temperature_type: TemperatureType,
    temperature_of_interest: f64,
    method: InterpolationMethod,
    verbose: bool,
}

impl AnalysisPipeline {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            temperature_type: config.temperature_type,
            temperature_of_interest: config.temperature_of_interest,
            method: config.interpolation_method,
            verbose: config.verbose,
        }
    }

    pub fn run(&self, folder: &Path) -> PhastResult<AnalysisOutcome> {
        self.run_with_events(folder, |_| {})
    }

    pub fn run_with_events<F>(&self, folder: &Path, mut on_event: F) -> PhastResult<AnalysisOutcome>
    where
        F: FnMut(PipelineEvent),
    {
        on_event(PipelineEvent::Status("Initializing analysis...".to_string()));
        let processor = FileProcessor::new(self.temperature_type, self.verbose);

        on_event(PipelineEvent::Status("Processing Excel files...".to_string()));
        let scan = processor.scan_folder(folder);
        if scan.records.is_empty() {
            return Err(PhastError::NoData {
                folder: folder.to_path_buf(),
            });
        }

        on_event(PipelineEvent::Status(
            "Performing interpolation analysis...".to_string(),
        ));
        let mut outcome = self.analyze_records(&scan.records, on_event);
        outcome.failed_files = scan.failures.into_iter().map(|(path, _)| path).collect();
        Ok(outcome)
    }

    /// Interpolate every record in order, reporting progress after each one
    pub fn analyze_records<F>(&self, records: &[DispersionRecord], mut on_event: F) -> AnalysisOutcome
    where
        F: FnMut(PipelineEvent),
    {
        let total = records.len();
        let mut outcome = AnalysisOutcome {
            records_found: total,
            ..Default::default()
        };

        for (i, record) in records.iter().enumerate() {
            match self.analyze_record(record) {
                Some(result) => outcome.results.push(result),
                None => outcome.records_skipped += 1,
            }
            on_event(PipelineEvent::Progress(progress_percent(i + 1, total)));
        }

        outcome
    }

    fn analyze_record(&self, record: &DispersionRecord) -> Option<AnalysisResult> {
        let distance = InterpolationEngine::try_interpolate(
            &record.temperatures,
            &record.distances,
            self.temperature_of_interest,
            self.method,
        );

        match distance {
            Ok(downwind_distance) => Some(AnalysisResult {
                subsection: record.equipment_item.clone(),
                scenario: record.scenario.clone(),
                weather: record.weather.clone(),
                downwind_distance,
                interpolation_method: self.method,
                temperature_of_interest: self.temperature_of_interest,
            }),
            Err(e) => {
                warn!(
                    equipment_item = %record.equipment_item,
                    scenario = %record.scenario,
                    weather = %record.weather,
                    "record skipped: {}",
                    e
                );
                None
            }
        }
    }
}

fn progress_percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    (done.min(total) * 100 / total) as u8
}
