use serde::Serialize;
use ts_rs::TS;

use super::entities::GradeDetail;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeListResponse {
    pub items: Vec<GradeDetail>,
    pub pagination: PaginationInfo,
}

/// Why a grade cannot take a completion exam
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "grade.ts")]
pub enum CompletionIneligibility {
    NotIncomplete,
    AlreadyCompleted,
    WindowExpired,
}

impl CompletionIneligibility {
    pub fn message(&self) -> &'static str {
        match self {
            CompletionIneligibility::NotIncomplete => "Only INC grades can be completed",
            CompletionIneligibility::AlreadyCompleted => {
                "A completion exam is already recorded for this grade"
            }
            CompletionIneligibility::WindowExpired => "The completion period has expired",
        }
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct CompletionEligibility {
    pub eligible: bool,
    pub reason: Option<CompletionIneligibility>,
    pub deadline: chrono::DateTime<chrono::Utc>,
}
