use serde::Serialize;
use ts_rs::TS;

use crate::models::school_years::entities::SchoolYear;

#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct GradeDistribution {
    pub passed: i64,
    pub failed: i64,
    pub incomplete: i64,
    pub dropped: i64,
    pub withdrawn: i64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct ProgramHeadcount {
    pub program_id: i64,
    pub program_code: String,
    pub students: i64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct DashboardResponse {
    pub total_students: i64,
    pub total_subjects: i64,
    pub total_programs: i64,
    pub total_professors: i64,
    pub current_school_year: Option<SchoolYear>,
    pub grade_distribution: GradeDistribution,
    pub students_per_program: Vec<ProgramHeadcount>,
    /// INC grades still inside the completion window
    pub eligible_incomplete: i64,
}
