//! Results exporter: analysis results → "Analysis Results" worksheet

use crate::error::{PhastError, PhastResult};
use crate::types::AnalysisResult;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

pub const RESULTS_SHEET: &str = "Analysis Results";
const MAX_COLUMN_WIDTH: usize = 50;

/// Writes analysis results to an .xlsx workbook
pub struct ResultsExporter {
    decimal_places: u32,
}

impl ResultsExporter {
    pub fn new(decimal_places: u32) -> Self {
        Self { decimal_places }
    }

    /// Column headers for a run at `temperature_of_interest`
    pub fn headers(temperature_of_interest: f64) -> [String; 5] {
        [
            "Subsection".to_string(),
            "Scenario".to_string(),
            "Weather".to_string(),
            format!(
                "Downwind Distance at {}°C (m)",
                format_decimal(temperature_of_interest)
            ),
            "Interpolation Method".to_string(),
        ]
    }

    /// Distance as written to the workbook. Exact halves round to even
    /// (0.125 → 0.12), as in the reports' existing summaries.
    pub fn rounded(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.decimal_places as i32);
        (value * factor).round_ties_even() / factor
    }

    /// Export results to `output_path`
    pub fn export(&self, results: &[AnalysisResult], output_path: &Path) -> PhastResult<()> {
        let first = results
            .first()
            .ok_or_else(|| PhastError::Export("No results to export".to_string()))?;

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(RESULTS_SHEET)
            .map_err(|e| PhastError::Export(format!("Failed to set worksheet name: {}", e)))?;

        let headers = Self::headers(first.temperature_of_interest);
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();

        let bold = Format::new().set_bold();
        for (col, header) in headers.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, header, &bold)
                .map_err(|e| PhastError::Export(format!("Failed to write header: {}", e)))?;
        }

        for (idx, result) in results.iter().enumerate() {
            let row = idx as u32 + 1;
            let distance = self.rounded(result.downwind_distance);

            let texts = [
                result.subsection.as_str(),
                result.scenario.as_str(),
                result.weather.as_str(),
            ];
            for (col, text) in texts.iter().enumerate() {
                write_text(worksheet, row, col as u16, text)?;
                widths[col] = widths[col].max(text.chars().count());
            }

            worksheet
                .write_number(row, 3, distance)
                .map_err(|e| PhastError::Export(format!("Failed to write distance: {}", e)))?;
            widths[3] = widths[3].max(format_decimal(distance).chars().count());

            let method = result.interpolation_method.as_str();
            write_text(worksheet, row, 4, method)?;
            widths[4] = widths[4].max(method.chars().count());
        }

        for (col, width) in widths.iter().enumerate() {
            let adjusted = (width + 2).min(MAX_COLUMN_WIDTH);
            worksheet
                .set_column_width(col as u16, adjusted as f64)
                .map_err(|e| PhastError::Export(format!("Failed to set column width: {}", e)))?;
        }

        workbook
            .save(output_path)
            .map_err(|e| PhastError::Export(format!("Failed to save Excel file: {}", e)))?;

        Ok(())
    }
}

fn write_text(worksheet: &mut Worksheet, row: u32, col: u16, text: &str) -> PhastResult<()> {
    worksheet
        .write_string(row, col, text)
        .map_err(|e| PhastError::Export(format!("Failed to write cell: {}", e)))?;
    Ok(())
}

/// Decimal rendering that always shows a fractional part (-15 → "-15.0")
pub fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
