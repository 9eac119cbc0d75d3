//! Bulk import results shared by the student, curriculum and grade sheet uploads.

use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[ts(export, export_to = "import.ts")]
pub struct ImportRowError {
    /// 1-based row number as shown by spreadsheet programs
    pub row: usize,
    pub field: Option<String>,
    pub message: String,
}

impl ImportRowError {
    pub fn new(row: usize, field: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            row,
            field: field.map(str::to_string),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "import.ts")]
pub struct ImportSummary {
    pub total: usize,
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
    pub errors: Vec<ImportRowError>,
}

impl ImportSummary {
    pub fn fail(&mut self, error: ImportRowError) {
        self.failed += 1;
        self.errors.push(error);
    }

    pub fn skip(&mut self, error: ImportRowError) {
        self.skipped += 1;
        self.errors.push(error);
    }
}
