use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Academic program, e.g. `BSIT`
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "program.ts")]
pub struct Program {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
