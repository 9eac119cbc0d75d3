use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::ErrorCode;

/// Envelope returned by every JSON endpoint.
///
/// `code` is `0` on success and an [`ErrorCode`] otherwise; `data` is omitted
/// when there is nothing to return.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: DateTime<Utc>,
}

impl<T: TS> ApiResponse<T> {
    fn envelope(code: ErrorCode, data: Option<T>, message: String) -> Self {
        Self {
            code: code as i32,
            message,
            data,
            timestamp: Utc::now(),
        }
    }

    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self::envelope(ErrorCode::Success, Some(data), message.into())
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self::envelope(ErrorCode::Success, None, message.into())
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::envelope(code, None, message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_envelopes_omit_data() {
        let json = serde_json::to_value(ApiResponse::error_empty(
            ErrorCode::GradeNotFound,
            "Grade not found",
        ))
        .unwrap();
        assert_eq!(json["code"], ErrorCode::GradeNotFound as i32);
        assert_eq!(json["message"], "Grade not found");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn success_carries_data() {
        let json = serde_json::to_value(ApiResponse::success(3_i64, "Counted")).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"], 3);
    }
}
