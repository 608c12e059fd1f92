//! 통계 시스템의 에러 타입.
//!
//! 이 모듈은 수집기, 저장소, API 전반에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum TraderError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 데이터 에러
    #[error("데이터 에러: {0}")]
    Data(String),

    /// 데이터베이스 에러
    #[error("데이터베이스 에러: {0}")]
    Database(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 외부 데이터 소스(터미널, 저장소) 사용 불가
    #[error("외부 데이터 소스 에러: {0}")]
    Upstream(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 작업을 위한 Result 타입.
pub type TraderResult<T> = Result<T, TraderError>;

impl TraderError {
    /// 재시도 가능한 에러인지 확인합니다.
    ///
    /// 재시도 자체는 이 계층에서 하지 않으며, 호출자가 다음 주기에 다시 시도할지 판단하는 데 사용합니다.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TraderError::Upstream(_) | TraderError::Database(_))
    }

    /// 외부 소스 장애 여부 (HTTP 503 대상).
    pub fn is_unavailable(&self) -> bool {
        matches!(self, TraderError::Upstream(_) | TraderError::Database(_))
    }
}

impl From<serde_json::Error> for TraderError {
    fn from(err: serde_json::Error) -> Self {
        TraderError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for TraderError {
    fn from(err: config::ConfigError) -> Self {
        TraderError::Config(err.to_string())
    }
}
