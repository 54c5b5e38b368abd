//! FILENAME: core/pivot-engine/src/error.rs

use thiserror::Error;

/// Caller errors raised by the pivot indexes. None of these are recoverable
/// by the engine: each one means a key was referenced that was never added
/// (or was removed), or a cursor was driven out of protocol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PivotError {
    #[error("row with key [{0}] not found")]
    RowNotFound(String),

    #[error("subRow with key [{sub_row}] not found in row [{row}]")]
    SubRowNotFound { row: String, sub_row: String },

    #[error("column with key [{0}] not found")]
    ColumnNotFound(String),

    #[error("value for column [{0}] does not support duplication")]
    DuplicateUnsupported(String),

    #[error("remove() must follow a call to next() and may be called once per element")]
    IllegalIteratorState,
}

impl PivotError {
    pub(crate) fn sub_row_not_found(row: &str, sub_row: &str) -> Self {
        PivotError::SubRowNotFound {
            row: row.to_string(),
            sub_row: sub_row.to_string(),
        }
    }
}
