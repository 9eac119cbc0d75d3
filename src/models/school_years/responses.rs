use serde::Serialize;
use ts_rs::TS;

use super::entities::SchoolYear;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "school_year.ts")]
pub struct SchoolYearListResponse {
    pub items: Vec<SchoolYear>,
}
