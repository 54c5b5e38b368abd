//! FILENAME: core/export/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XLSX write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("Invalid export configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Sheet too large: {0}")]
    OutOfBounds(String),
}
