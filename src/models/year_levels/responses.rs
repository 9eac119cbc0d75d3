use serde::Serialize;
use ts_rs::TS;

use super::entities::YearLevel;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "year_level.ts")]
pub struct YearLevelListResponse {
    pub items: Vec<YearLevel>,
}
