//! 에러 타입 정의.

use std::fmt;
use tradestats_core::TraderError;
use tradestats_data::DataError;

/// Collector 에러 타입
#[derive(Debug)]
pub enum CollectorError {
    /// 데이터베이스 에러
    Database(DataError),
    /// 설정 에러
    Config(String),
    /// 데이터 소스 에러 (터미널 내보내기 파일 누락, 형식 오류 등)
    DataSource(String),
    /// 일반 에러
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for CollectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Database(e) => write!(f, "Database error: {}", e),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::DataSource(msg) => write!(f, "Data source error: {}", msg),
            Self::Other(e) => write!(f, "Error: {}", e),
        }
    }
}

impl std::error::Error for CollectorError {}

impl From<DataError> for CollectorError {
    fn from(err: DataError) -> Self {
        Self::Database(err)
    }
}

impl From<TraderError> for CollectorError {
    fn from(err: TraderError) -> Self {
        match err {
            TraderError::Config(msg) => Self::Config(msg),
            TraderError::InvalidInput(_) | TraderError::Serialization(_) | TraderError::Data(_) => {
                Self::DataSource(err.to_string())
            }
            other => Self::Other(Box::new(other)),
        }
    }
}

impl From<std::io::Error> for CollectorError {
    fn from(err: std::io::Error) -> Self {
        Self::DataSource(err.to_string())
    }
}

impl From<serde_json::Error> for CollectorError {
    fn from(err: serde_json::Error) -> Self {
        Self::DataSource(format!("malformed export: {}", err))
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, CollectorError>;
