//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;
use tradestats_core::TraderError;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "STORE_UNAVAILABLE",
///   "message": "database error: pool timed out",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "STORE_UNAVAILABLE", "DATA_ERROR")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 추가 에러 상세 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// 에러 발생 타임스탬프 (Unix timestamp, 선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    ///
    /// # Example
    ///
    /// ```
    /// use tradestats_api::error::ApiErrorResponse;
    ///
    /// let error = ApiErrorResponse::new("STORE_UNAVAILABLE", "database is down");
    /// assert!(error.timestamp.is_some());
    /// ```
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// 상세 정보 포함 에러 생성.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            details: Some(details),
            ..Self::new(code, message)
        }
    }

    /// 타임스탬프 없는 간단한 에러.
    pub fn simple(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: None,
        }
    }
}

/// 핸들러 반환 타입.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

/// 저장소 에러를 HTTP 응답으로 변환합니다.
///
/// 저장소에 접근할 수 없으면 503, 그 외(잘못 저장된 데이터 등)는 500입니다.
pub fn store_error(err: TraderError) -> (StatusCode, Json<ApiErrorResponse>) {
    error!(error = %err, "Store read failed");

    let (status, code) = if err.is_unavailable() {
        (StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE")
    } else if matches!(err, TraderError::Data(_)) {
        (StatusCode::INTERNAL_SERVER_ERROR, "DATA_ERROR")
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
    };

    (status, Json(ApiErrorResponse::new(code, err.to_string())))
}
