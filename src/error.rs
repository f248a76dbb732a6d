use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool validates its arguments, reads translations, or emits output.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a sheet does not follow the expected conventions.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when a translation file is not a JSON object at its root.
    #[error("{path}: translation file must contain a JSON object")]
    InvalidTree { path: PathBuf },

    /// Raised when no input file is given on the command line.
    #[error("No input files specified")]
    NoInputFiles,

    /// Raised when the output option is given more than once.
    #[error("There can be just one output file")]
    MultipleOutputs,

    /// Raised when several inputs are given and not all of them are JSON.
    #[error("One of the multiple path entries of the JSON file path is wrong: {0}")]
    InvalidJsonPaths(String),

    /// Raised when the workbook output path has an extension other than `.xlsx`.
    #[error("Wrong output file format (must be '.xlsx'): {0}")]
    WrongOutputFormat(PathBuf),

    /// Raised when a workbook is converted together with other inputs.
    #[error("Only one XLSX file can be converted.")]
    MultipleWorkbooks,

    /// Raised when the source extension is neither JSON nor XLSX.
    #[error("File type '{0}' is not supported. Either use JSON or XLSX file to convert.")]
    UnsupportedFormat(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when a worker of a concurrent batch panics.
    #[error("background task panicked while processing {0}")]
    TaskPanicked(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
