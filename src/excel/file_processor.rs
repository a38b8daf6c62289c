//! File processor: every `.xlsx` workbook in a folder → dispersion records

use crate::error::{PhastError, PhastResult};
use crate::excel::sheet_parser::SheetParser;
use crate::types::{DispersionRecord, TemperatureType};
use calamine::{open_workbook, Reader, Xlsx};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

pub const WORKBOOK_EXTENSION: &str = "xlsx";

/// Outcome of scanning one folder
#[derive(Debug, Default)]
pub struct FolderScan {
    pub records: Vec<DispersionRecord>,
    /// Workbooks that were found, whether or not they could be read
    pub files_found: usize,
    /// Workbooks skipped because they could not be opened or read
    pub failures: Vec<(PathBuf, String)>,
}

/// Runs the sheet parser over every sheet of every workbook in a folder
#[derive(Debug, Clone, Copy)]
pub struct FileProcessor {
    parser: SheetParser,
    verbose: bool,
}

impl FileProcessor {
    pub fn new(temperature_type: TemperatureType, verbose: bool) -> Self {
        Self {
            parser: SheetParser::new(temperature_type),
            verbose,
        }
    }

    /// Workbooks directly inside `folder` (not recursive), in name order
    pub fn find_workbooks(folder: &Path) -> PhastResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(folder)? {
            let path = entry?.path();
            let is_workbook = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(WORKBOOK_EXTENSION));
            if is_workbook && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// All records found under `folder`. Unreadable workbooks are logged and
    /// skipped; an empty result is not an error here.
    pub fn process_files(&self, folder: &Path) -> Vec<DispersionRecord> {
        self.scan_folder(folder).records
    }

    /// Like [`FileProcessor::process_files`], also reporting which files failed
    pub fn scan_folder(&self, folder: &Path) -> FolderScan {
        let mut scan = FolderScan::default();

        let files = match Self::find_workbooks(folder) {
            Ok(files) => files,
            Err(e) => {
                error!("Error reading folder {}: {}", folder.display(), e);
                return scan;
            }
        };
        scan.files_found = files.len();

        for path in files {
            match self.process_file(&path) {
                Ok(records) => scan.records.extend(records),
                Err(e) => {
                    error!("Error processing {}: {}", path.display(), e);
                    scan.failures.push((path, e.to_string()));
                }
            }
        }

        scan
    }

    /// Records from every sheet of one workbook
    pub fn process_file(&self, path: &Path) -> PhastResult<Vec<DispersionRecord>> {
        if self.verbose {
            info!("Processing file: {}", path.display());
        } else {
            debug!("Processing file: {}", path.display());
        }

        let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| PhastError::Workbook {
            path: path.to_path_buf(),
            message: format!("Failed to open Excel file: {}", e),
        })?;

        let mut records = Vec::new();
        for sheet_name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| PhastError::Workbook {
                    path: path.to_path_buf(),
                    message: format!("Failed to read sheet '{}': {}", sheet_name, e),
                })?;
            let found = self.parser.parse_sheet(&sheet_name, &range);
            debug!(
                "{} record(s) in sheet '{}' of {}",
                found.len(),
                sheet_name,
                path.display()
            );
            records.extend(found);
        }

        Ok(records)
    }
}
