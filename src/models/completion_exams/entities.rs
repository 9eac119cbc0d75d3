use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "completion_exam.ts")]
pub struct CompletionExam {
    pub id: i64,
    pub grade_id: i64,
    /// Value before completion, always `INC`
    pub original_value: String,
    pub completion_value: String,
    pub exam_date: chrono::DateTime<chrono::Utc>,
    pub remarks: Option<String>,
    pub processed_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "completion_exam.ts")]
pub struct CompletionExamDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub exam: CompletionExam,
    pub student_id: Option<i64>,
    pub student_school_id: Option<String>,
    pub student_name: Option<String>,
    pub subject_code: Option<String>,
}
