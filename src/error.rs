use std::path::PathBuf;
use thiserror::Error;

pub type PhastResult<T> = Result<T, PhastError>;

#[derive(Error, Debug)]
pub enum PhastError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Workbook error in {}: {}", path.display(), message)]
    Workbook { path: PathBuf, message: String },

    #[error("Export error: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No valid data found in Excel files under {}", folder.display())]
    NoData { folder: PathBuf },
}
