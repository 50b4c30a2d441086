use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Serialization error: {0}")]
    Serde(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}
