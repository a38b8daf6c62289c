//! Sheet parser: PHAST report worksheet → dispersion records
//!
//! Report layouts vary, so nothing is read from fixed cell addresses. The
//! parser walks every cell in row-major order, remembers the most recent
//! equipment/scenario/weather marker it has seen, and extracts a data block
//! whenever it meets the block title. Header and data rows are located
//! relative to the title row.

use crate::excel::grid::{CellGrid, CellValue};
use crate::types::{DispersionRecord, TemperatureType};
use thiserror::Error;
use tracing::{debug, error};

pub const EQUIPMENT_MARKER: &str = "Equipment Item:";
pub const SCENARIO_MARKER: &str = "Scenario (";
pub const WEATHER_MARKER: &str = "Weather:";
pub const BLOCK_TITLE: &str =
    "Time-varying Observer Dispersion Data (before along-wind-diffusion effects)";
pub const DISTANCE_HEADER: &str = "Downwind distance [m]";

/// Header row, relative to the block title row
pub const HEADER_ROW_OFFSET: usize = 2;
/// First data row, relative to the block title row
pub const DATA_ROW_OFFSET: usize = 3;
/// First-column value that keeps a data block going
const CONTINUATION_FLAG: f64 = 1.0;

/// Textual marker recognised in a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker<'a> {
    Equipment(&'a str),
    Scenario(&'a str),
    Weather(&'a str),
    BlockTitle,
}

impl<'a> Marker<'a> {
    fn classify(text: &'a str) -> Option<Self> {
        if text.starts_with(EQUIPMENT_MARKER) {
            Some(Marker::Equipment(label_after_colon(text)))
        } else if text.starts_with(SCENARIO_MARKER) {
            Some(Marker::Scenario(label_after_colon(text)))
        } else if text.starts_with(WEATHER_MARKER) {
            Some(Marker::Weather(label_after_colon(text)))
        } else if text == BLOCK_TITLE {
            Some(Marker::BlockTitle)
        } else {
            None
        }
    }
}

/// Text after the first colon, trimmed. No colon means no label.
fn label_after_colon(text: &str) -> &str {
    text.split_once(':')
        .map(|(_, label)| label.trim())
        .unwrap_or("")
}

/// Labels in force while scanning one sheet.
///
/// Created fresh for every sheet and never reset between blocks: a block
/// is tagged with whatever markers were seen last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserState {
    equipment_item: Option<String>,
    scenario: Option<String>,
    weather: Option<String>,
}

impl ParserState {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply(&mut self, marker: Marker<'_>) {
        match marker {
            Marker::Equipment(label) => self.equipment_item = Some(label.to_string()),
            Marker::Scenario(label) => self.scenario = Some(label.to_string()),
            Marker::Weather(label) => self.weather = Some(label.to_string()),
            Marker::BlockTitle => {}
        }
    }

    /// (equipment item, scenario, weather) once all three are known and non-empty
    pub fn labels(&self) -> Option<(&str, &str, &str)> {
        Some((
            known(&self.equipment_item)?,
            known(&self.scenario)?,
            known(&self.weather)?,
        ))
    }
}

fn known(label: &Option<String>) -> Option<&str> {
    label.as_deref().filter(|s| !s.is_empty())
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    #[error("header '{header}' not found in row {row}")]
    MissingHeader { header: &'static str, row: usize },
}

/// Samples collected from one data block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockSamples {
    pub distances: Vec<f64>,
    pub temperatures: Vec<f64>,
}

impl BlockSamples {
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty() || self.temperatures.is_empty()
    }
}

/// Extracts dispersion records from one worksheet at a time
#[derive(Debug, Clone, Copy)]
pub struct SheetParser {
    temperature_type: TemperatureType,
}

impl SheetParser {
    pub fn new(temperature_type: TemperatureType) -> Self {
        Self { temperature_type }
    }

    /// Parse an unnamed sheet
    pub fn parse<G: CellGrid + ?Sized>(&self, grid: &G) -> Vec<DispersionRecord> {
        self.parse_sheet("<sheet>", grid)
    }

    /// Parse one sheet; `sheet_name` is only used in log messages
    pub fn parse_sheet<G: CellGrid + ?Sized>(
        &self,
        sheet_name: &str,
        grid: &G,
    ) -> Vec<DispersionRecord> {
        let mut state = ParserState::new();
        let mut records = Vec::new();

        for row in 0..grid.row_count() {
            for col in 0..grid.column_count() {
                let Some(text) = grid.cell(row, col).as_text() else {
                    continue;
                };
                let Some(marker) = Marker::classify(text.trim()) else {
                    continue;
                };

                if marker != Marker::BlockTitle {
                    state.apply(marker);
                    continue;
                }

                let samples = match self.extract_block(grid, row) {
                    Ok(samples) => samples,
                    Err(e) => {
                        error!(sheet = sheet_name, "Error extracting dispersion data: {}", e);
                        continue;
                    }
                };

                if samples.is_empty() {
                    debug!(
                        sheet = sheet_name,
                        row = row + 1,
                        "data block has no valid rows"
                    );
                    continue;
                }

                match state.labels() {
                    Some((equipment_item, scenario, weather)) => {
                        records.push(DispersionRecord {
                            equipment_item: equipment_item.to_string(),
                            scenario: scenario.to_string(),
                            weather: weather.to_string(),
                            distances: samples.distances,
                            temperatures: samples.temperatures,
                        });
                    }
                    None => debug!(
                        sheet = sheet_name,
                        row = row + 1,
                        "data block skipped: equipment item, scenario or weather unknown"
                    ),
                }
            }
        }

        records
    }

    /// Read the data block whose title sits in `title_row`.
    ///
    /// A row continues the block only while its first column holds the
    /// continuation flag. Rows with a missing or non-numeric distance or
    /// temperature are skipped without ending the block.
    pub fn extract_block<G: CellGrid + ?Sized>(
        &self,
        grid: &G,
        title_row: usize,
    ) -> Result<BlockSamples, BlockError> {
        let header_row = title_row + HEADER_ROW_OFFSET;
        let distance_col = find_header(grid, header_row, DISTANCE_HEADER)?;
        let temperature_col = find_header(grid, header_row, self.temperature_type.column_header())?;

        let mut samples = BlockSamples::default();
        for row in (title_row + DATA_ROW_OFFSET)..grid.row_count() {
            if !is_continuation(grid.cell(row, 0)) {
                break;
            }

            let distance = grid.cell(row, distance_col).as_f64();
            let temperature = grid.cell(row, temperature_col).as_f64();
            if let (Some(distance), Some(temperature)) = (distance, temperature) {
                samples.distances.push(distance);
                samples.temperatures.push(temperature);
            }
        }

        Ok(samples)
    }
}

fn find_header<G: CellGrid + ?Sized>(
    grid: &G,
    row: usize,
    header: &'static str,
) -> Result<usize, BlockError> {
    (0..grid.column_count())
        .find(|&col| grid.cell(row, col).as_text() == Some(header))
        .ok_or(BlockError::MissingHeader {
            header,
            row: row + 1,
        })
}

fn is_continuation(cell: CellValue<'_>) -> bool {
    matches!(cell, CellValue::Number(n) if n == CONTINUATION_FLAG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::grid::Grid;

    #[test]
    fn test_classify_markers() {
        assert_eq!(
            Marker::classify("Equipment Item: Pump P-101"),
            Some(Marker::Equipment("Pump P-101"))
        );
        assert_eq!(
            Marker::classify("Scenario (Leak): 50mm leak"),
            Some(Marker::Scenario("50mm leak"))
        );
        assert_eq!(
            Marker::classify("Weather: Category 1.5/F"),
            Some(Marker::Weather("Category 1.5/F"))
        );
        assert_eq!(Marker::classify(BLOCK_TITLE), Some(Marker::BlockTitle));
        assert_eq!(Marker::classify("Scenario: no parenthesis"), None);
        assert_eq!(Marker::classify("Weather"), None);
    }

    #[test]
    fn test_label_keeps_text_after_first_colon_only() {
        assert_eq!(label_after_colon("Weather: 5/D: night"), "5/D: night");
        assert_eq!(label_after_colon("Scenario (Leak)"), "");
    }

    #[test]
    fn test_parser_state_requires_all_labels() {
        let mut state = ParserState::new();
        assert_eq!(state.labels(), None);

        state.apply(Marker::Equipment("E1"));
        state.apply(Marker::Scenario("S1"));
        assert_eq!(state.labels(), None);

        state.apply(Marker::Weather(""));
        assert_eq!(state.labels(), None, "empty label counts as unknown");

        state.apply(Marker::Weather("W1"));
        assert_eq!(state.labels(), Some(("E1", "S1", "W1")));
    }

    #[test]
    fn test_continuation_flag() {
        assert!(is_continuation(CellValue::Number(1.0)));
        assert!(!is_continuation(CellValue::Number(2.0)));
        assert!(!is_continuation(CellValue::Text("1")));
        assert!(!is_continuation(CellValue::Bool(true)));
        assert!(!is_continuation(CellValue::Empty));
    }

    #[test]
    fn test_extract_block_missing_header() {
        let mut grid = Grid::new();
        grid.set(0, 0, BLOCK_TITLE);
        grid.set(2, 1, DISTANCE_HEADER);

        let parser = SheetParser::new(TemperatureType::Vapour);
        assert_eq!(
            parser.extract_block(&grid, 0),
            Err(BlockError::MissingHeader {
                header: "C/Line vapour temperature [degC]",
                row: 3,
            })
        );
    }
}
