//! Error types for wind statistics computation

use thiserror::Error;

/// Result type alias for windrose operations
pub type Result<T> = std::result::Result<T, WindRoseError>;

/// Errors that can occur while loading data or computing wind statistics
#[derive(Error, Debug)]
pub enum WindRoseError {
    #[error("missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("column '{column}' must be numeric")]
    NonNumericColumn { column: String },

    #[error("bin count must be positive, got {bins}")]
    InvalidBins { bins: usize },

    #[error("negative wind speed {value} at row {row}")]
    NegativeSpeed { row: usize, value: f64 },

    #[error("column '{column}' has {actual} values, dataset has {expected} rows")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("File I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: config::ConfigError,
    },

    #[cfg(feature = "dataframe")]
    #[error("DataFrame error: {message}")]
    DataFrame { message: String },
}

#[cfg(feature = "dataframe")]
impl From<polars::prelude::PolarsError> for WindRoseError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        WindRoseError::DataFrame {
            message: err.to_string(),
        }
    }
}
