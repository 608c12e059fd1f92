//! 트레이딩 터미널 데이터 수집기.
//!
//! 이 crate는 API 서버와 독립적으로 실행되는 바이너리를 제공합니다:
//! - 터미널 내보내기 파일(JSON) 파싱
//! - 체결 → 청산 포지션 집계
//! - 보유 포지션/청산 포지션/계좌 스냅샷을 한 트랜잭션으로 저장

pub mod config;
pub mod error;
pub mod modules;
pub mod stats;

pub use config::CollectorConfig;
pub use error::{CollectorError, Result};
pub use stats::IngestStats;
