use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "completion_exam.ts")]
pub struct RecordCompletionRequest {
    pub completion_value: String,
    /// Defaults to now
    pub exam_date: Option<chrono::DateTime<chrono::Utc>>,
    pub remarks: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "completion_exam.ts")]
pub struct CompletionExamListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub student_id: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct CompletionExamListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
}

impl From<CompletionExamListParams> for CompletionExamListQuery {
    fn from(params: CompletionExamListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            student_id: params.student_id,
        }
    }
}

/// Everything storage needs to write a completion atomically
#[derive(Debug, Clone)]
pub struct NewCompletionExam {
    pub grade_id: i64,
    pub original_value: String,
    pub completion_value: String,
    pub exam_date: chrono::DateTime<chrono::Utc>,
    pub remarks: Option<String>,
    pub processed_by: Option<i64>,
}
