//! Analysis configuration
//!
//! Defaults match the analyser's stock settings. A YAML file may set any
//! subset of the fields; command-line flags override the file.
//!
//! ```yaml
//! input_folder: reports/
//! output_file: summary.xlsx
//! temperature_type: Vapour
//! temperature_of_interest: -15.0
//! interpolation_method: Cubic Spline
//! decimal_places: 2
//! ```

use crate::error::{PhastError, PhastResult};
use crate::types::{InterpolationMethod, TemperatureType};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const MIN_TEMPERATURE: f64 = -273.0;
pub const MAX_TEMPERATURE: f64 = 1000.0;
pub const MAX_DECIMAL_PLACES: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub input_folder: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub temperature_type: TemperatureType,
    /// Target temperature [degC]
    pub temperature_of_interest: f64,
    pub interpolation_method: InterpolationMethod,
    /// Diagnostic logging volume only
    pub verbose: bool,
    /// Rounding of exported distances
    pub decimal_places: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_folder: None,
            output_file: None,
            temperature_type: TemperatureType::Vapour,
            temperature_of_interest: -15.0,
            interpolation_method: InterpolationMethod::Linear,
            verbose: false,
            decimal_places: 2,
        }
    }
}

/// Values given on the command line; `None` keeps the configured value
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input_folder: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub temperature_type: Option<TemperatureType>,
    pub temperature_of_interest: Option<f64>,
    pub interpolation_method: Option<InterpolationMethod>,
    pub verbose: bool,
    pub decimal_places: Option<u32>,
}

impl AnalysisConfig {
    /// Load a YAML configuration file
    pub fn from_file(path: &Path) -> PhastResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> PhastResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(folder) = overrides.input_folder {
            self.input_folder = Some(folder);
        }
        if let Some(output) = overrides.output_file {
            self.output_file = Some(output);
        }
        if let Some(kind) = overrides.temperature_type {
            self.temperature_type = kind;
        }
        if let Some(temperature) = overrides.temperature_of_interest {
            self.temperature_of_interest = temperature;
        }
        if let Some(method) = overrides.interpolation_method {
            self.interpolation_method = method;
        }
        if let Some(places) = overrides.decimal_places {
            self.decimal_places = places;
        }
        self.verbose |= overrides.verbose;
    }

    /// Check ranges and paths; appends `.xlsx` to an output file without it
    pub fn validate(&mut self) -> PhastResult<()> {
        let folder = self
            .input_folder
            .as_ref()
            .ok_or_else(|| PhastError::Config("Please select an input folder".to_string()))?;
        if !folder.is_dir() {
            return Err(PhastError::Config(format!(
                "Input folder does not exist: {}",
                folder.display()
            )));
        }

        let t = self.temperature_of_interest;
        if !t.is_finite() || !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&t) {
            return Err(PhastError::Config(format!(
                "Temperature of interest must be between {} and {} degC, got {}",
                MIN_TEMPERATURE, MAX_TEMPERATURE, t
            )));
        }

        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(PhastError::Config(format!(
                "Decimal places must be between 0 and {}, got {}",
                MAX_DECIMAL_PLACES, self.decimal_places
            )));
        }

        if let Some(output) = &self.output_file {
            let has_extension = output
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
            if !has_extension {
                let mut name = output.as_os_str().to_os_string();
                name.push(".xlsx");
                self.output_file = Some(PathBuf::from(name));
            }
        }

        Ok(())
    }
}
