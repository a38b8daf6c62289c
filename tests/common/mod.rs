//! Synthetic PHAST report workbooks for integration tests

#![allow(dead_code)]

use phast_dispersion::excel::sheet_parser::{BLOCK_TITLE, DISTANCE_HEADER};
use rust_xlsxwriter::Workbook;
use std::path::Path;

pub const VAPOUR_HEADER: &str = "C/Line vapour temperature [degC]";
pub const LIQUID_HEADER: &str = "C/Line liquid temperature [degC]";

/// One data row: (continuation flag, distance, vapour temperature, liquid temperature)
pub type Row = (f64, f64, f64, f64);

pub struct Block {
    pub equipment: &'static str,
    pub scenario: &'static str,
    pub weather: &'static str,
    pub rows: Vec<Row>,
}

impl Block {
    pub fn new(equipment: &'static str, scenario: &'static str, weather: &'static str) -> Self {
        Self {
            equipment,
            scenario,
            weather,
            rows: default_rows(),
        }
    }
}

/// Cooling curve: 20 → -60 degC over 0 → 400 m, followed by a terminator row
pub fn default_rows() -> Vec<Row> {
    vec![
        (1.0, 0.0, 20.0, 15.0),
        (1.0, 100.0, -10.0, -20.0),
        (1.0, 200.0, -30.0, -45.0),
        (1.0, 300.0, -45.0, -60.0),
        (1.0, 400.0, -60.0, -70.0),
        (2.0, 500.0, -65.0, -75.0),
    ]
}

/// Write a report workbook: each sheet holds the given blocks one after another
pub fn write_report(path: &Path, sheets: &[(&str, Vec<Block>)]) {
    let mut workbook = Workbook::new();

    for (name, blocks) in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*name).unwrap();

        let mut row: u32 = 0;
        sheet.write_string(row, 0, "PHAST consequence report").unwrap();
        row += 2;

        for block in blocks {
            sheet
                .write_string(row, 0, format!("Equipment Item: {}", block.equipment))
                .unwrap();
            sheet
                .write_string(row + 1, 0, format!("Scenario (Leak): {}", block.scenario))
                .unwrap();
            sheet
                .write_string(row + 2, 0, format!("Weather: {}", block.weather))
                .unwrap();

            let title = row + 4;
            sheet.write_string(title, 0, BLOCK_TITLE).unwrap();
            sheet.write_string(title + 2, 0, "Observer").unwrap();
            sheet.write_string(title + 2, 1, "Time [s]").unwrap();
            sheet.write_string(title + 2, 2, DISTANCE_HEADER).unwrap();
            sheet.write_string(title + 2, 3, VAPOUR_HEADER).unwrap();
            sheet.write_string(title + 2, 4, LIQUID_HEADER).unwrap();

            let mut data_row = title + 3;
            for (flag, distance, vapour, liquid) in &block.rows {
                sheet.write_number(data_row, 0, *flag).unwrap();
                sheet.write_number(data_row, 1, 10.0).unwrap();
                sheet.write_number(data_row, 2, *distance).unwrap();
                sheet.write_number(data_row, 3, *vapour).unwrap();
                sheet.write_number(data_row, 4, *liquid).unwrap();
                data_row += 1;
            }

            row = data_row + 2;
        }
    }

    workbook.save(path).unwrap();
}
