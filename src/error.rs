use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("Required column '{column}' missing from header")]
    MissingColumn { column: String },

    #[error("Invalid timestamp at row {row}: {year:04}-{month:02}-{day:02} hour {hour}")]
    InvalidTimestamp {
        row: usize,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
    },

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: String, end: String },

    #[error("Bin count {0} outside valid range [1, 100]")]
    InvalidBinCount(u32),

    #[error("Station '{0}' not found in dataset")]
    StationNotFound(String),

    #[error("Unknown measurement column: '{0}'")]
    UnknownColumn(String),

    #[error("Dataset contains no observations")]
    EmptyDataset,

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
