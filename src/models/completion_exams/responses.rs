use serde::Serialize;
use ts_rs::TS;

use super::entities::{CompletionExam, CompletionExamDetail};
use crate::models::common::PaginationInfo;
use crate::models::grades::entities::Grade;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "completion_exam.ts")]
pub struct CompletionExamListResponse {
    pub items: Vec<CompletionExamDetail>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "completion_exam.ts")]
pub struct CompletionRecordedResponse {
    pub exam: CompletionExam,
    pub grade: Grade,
}
