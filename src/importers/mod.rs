//! Row parsers behind the bulk uploads.
//!
//! Each parser turns the flattened rows of an uploaded file into validated
//! records plus per-row errors. Lookups against the database happen in the
//! services afterwards.

pub mod curriculum;
pub mod grade_sheet;
pub mod student;

use crate::models::ErrorCode;

/// Failure of a whole file, as opposed to a single bad row
#[derive(Debug, Clone, PartialEq)]
pub enum ImportParseError {
    MissingColumn(String),
    EmptyFile,
    TooManyRows { rows: usize, max: usize },
}

impl ImportParseError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingColumn(_) => ErrorCode::ImportFileMissingColumn,
            Self::EmptyFile | Self::TooManyRows { .. } => ErrorCode::ImportFileDataInvalid,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::MissingColumn(col) => format!("Missing required column: {col}"),
            Self::EmptyFile => "The file contains no data rows".to_string(),
            Self::TooManyRows { rows, max } => {
                format!("The file has {rows} rows; at most {max} can be imported at once")
            }
        }
    }
}

/// Uppercased cell text with inner whitespace collapsed, for literal header matching
pub(crate) fn header_text(cell: &str) -> String {
    cell.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// 1-based row number of a zero-based row index
pub(crate) fn row_number(index: usize) -> usize {
    index + 1
}
