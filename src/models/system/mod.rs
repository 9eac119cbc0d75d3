use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct SystemInfoResponse {
    pub system_name: String,
    pub school_name: String,
    pub version: String,
    pub environment: String,
    pub uptime_seconds: i64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct BackupFile {
    pub file_name: String,
    pub size: u64,
    pub modified: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct BackupListResponse {
    pub items: Vec<BackupFile>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct RestoreRequest {
    pub file_name: String,
}
