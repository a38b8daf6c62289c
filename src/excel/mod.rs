//! Excel input and output
//!
//! - Import: PHAST report workbooks (.xlsx) → dispersion records
//! - Export: analysis results → results workbook (.xlsx)

pub mod exporter;
pub mod file_processor;
pub mod grid;
pub mod sheet_parser;

pub use exporter::ResultsExporter;
pub use file_processor::{FileProcessor, FolderScan};
pub use grid::{Cell, CellGrid, CellValue, Grid};
pub use sheet_parser::{BlockError, ParserState, SheetParser};
