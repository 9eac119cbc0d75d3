use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::subjects::entities::Semester;

/// Remarks derived from a grade value
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "grade.ts")]
pub enum GradeRemark {
    Passed,
    Failed,
    Incomplete,
    Dropped,
    Withdrawn,
}

impl GradeRemark {
    pub fn label(&self) -> &'static str {
        match self {
            GradeRemark::Passed => "Passed",
            GradeRemark::Failed => "Failed",
            GradeRemark::Incomplete => "Incomplete",
            GradeRemark::Dropped => "Dropped",
            GradeRemark::Withdrawn => "Withdrawn",
        }
    }

    /// Stored grade values that produce this remark
    pub fn stored_values(&self) -> Vec<String> {
        match self {
            GradeRemark::Passed => crate::utils::grading::PASSING_GRADES
                .iter()
                .map(|g| crate::utils::grading::GradeValue::Numeric(*g).to_string())
                .collect(),
            GradeRemark::Failed => vec!["5.00".to_string()],
            GradeRemark::Incomplete => vec!["INC".to_string()],
            GradeRemark::Dropped => vec!["DRP".to_string()],
            GradeRemark::Withdrawn => vec!["W".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub professor_id: Option<i64>,
    pub school_year_id: i64,
    pub semester: Semester,
    /// Normalized value: `1.00`..`3.00`, `5.00`, `INC`, `DRP` or `W`
    pub value: String,
    pub remarks: Option<GradeRemark>,
    pub encoded_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Grade joined with the names a listing or printout needs
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub grade: Grade,
    pub student_school_id: Option<String>,
    pub student_name: Option<String>,
    /// `Last, First M.`
    pub student_sortable_name: Option<String>,
    pub subject_code: Option<String>,
    pub subject_title: Option<String>,
    pub units: Option<f64>,
    pub school_year_name: Option<String>,
    pub professor_name: Option<String>,
    pub completed: bool,
}
