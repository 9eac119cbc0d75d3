use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "year_level.ts")]
pub struct CreateYearLevelRequest {
    pub level: i32,
    /// Defaults to the ordinal name, e.g. `Fifth Year`
    pub name: Option<String>,
}
