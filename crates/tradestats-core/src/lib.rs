//! # Tradestats Core
//!
//! 트레이딩 계좌 통계 서비스의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 체결(Deal) 및 집계된 청산 포지션
//! - 보유 포지션과 계좌 스냅샷
//! - 세션/요일 라벨
//! - 저장소 추상화 (`TradeStore`)
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
