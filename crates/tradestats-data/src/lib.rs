//! 데이터 저장.
//!
//! 이 crate는 다음을 제공합니다:
//! - PostgreSQL 연결 풀 및 마이그레이션
//! - 보유/청산 포지션, 계좌 스냅샷 repository
//! - `TradeStore` 구현체 (`PgTradeStore`)와 수집 주기 단위 트랜잭션 저장

pub mod error;
pub mod storage;
pub mod store;

pub use error::{DataError, Result};
pub use storage::account::{AccountRecord, AccountRepository};
pub use storage::positions::{
    ClosedPositionRecord, ClosedPositionRepository, OpenPositionRecord, OpenPositionRepository,
};
pub use storage::Database;
pub use store::{PgTradeStore, RefreshCycle, WriteSummary};
