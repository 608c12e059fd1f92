//! 애플리케이션 상태 관리.
//!
//! 모든 핸들러가 공유하는 상태를 정의합니다. 저장소는 `TradeStore` trait 객체로 보관하므로
//! 운영에서는 PostgreSQL 구현을, 테스트에서는 인메모리 구현을 주입합니다.

use std::sync::Arc;
use tradestats_core::{StatisticsConfig, TradeStore};

/// 핸들러 간 공유되는 애플리케이션 상태.
#[derive(Clone)]
pub struct AppState {
    /// 포지션/계좌 저장소
    pub store: Arc<dyn TradeStore>,

    /// 통계 리포트 설정 (자산 곡선 시작일, 초기 자본, 연도 목록)
    pub statistics: StatisticsConfig,

    /// 서버 시작 시간
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    pub fn new(store: Arc<dyn TradeStore>, statistics: StatisticsConfig) -> Self {
        Self {
            store,
            statistics,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use test_utils::{create_test_state, InMemoryTradeStore};

#[cfg(any(test, feature = "test-utils"))]
mod test_utils {
    use super::AppState;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tradestats_core::{
        AccountSnapshot, AggregatedPosition, OpenPosition, StatisticsConfig, StatisticsInput,
        TradeStore, TraderError, TraderResult,
    };

    /// 테스트용 인메모리 저장소.
    ///
    /// `unavailable()`로 만들면 모든 조회가 `TraderError::Database`로 실패합니다.
    #[derive(Debug, Clone, Default)]
    pub struct InMemoryTradeStore {
        pub open_positions: Vec<OpenPosition>,
        pub closed_positions: Vec<AggregatedPosition>,
        pub account_history: Vec<AccountSnapshot>,
        pub unavailable: bool,
    }

    impl InMemoryTradeStore {
        pub fn unavailable() -> Self {
            Self {
                unavailable: true,
                ..Self::default()
            }
        }

        fn check(&self) -> TraderResult<()> {
            if self.unavailable {
                Err(TraderError::Database("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl TradeStore for InMemoryTradeStore {
        async fn statistics_input(&self) -> TraderResult<StatisticsInput> {
            self.check()?;

            let mut closed_positions = self.closed_positions.clone();
            closed_positions.sort_by_key(|p| (p.time_close, p.position_id));
            let mut account_history = self.account_history.clone();
            account_history.sort_by_key(|a| a.time_last_update);

            Ok(StatisticsInput {
                open_count: self.open_positions.len() as u64,
                closed_positions,
                account_history,
            })
        }

        async fn open_positions(&self) -> TraderResult<Vec<OpenPosition>> {
            self.check()?;
            Ok(self.open_positions.clone())
        }

        async fn closed_positions(&self) -> TraderResult<Vec<AggregatedPosition>> {
            self.check()?;
            let mut positions = self.closed_positions.clone();
            positions.sort_by_key(|p| (p.time_close, p.position_id));
            Ok(positions)
        }

        async fn health_check(&self) -> TraderResult<()> {
            self.check()
        }
    }

    /// 빈 인메모리 저장소와 기본 통계 설정으로 상태를 만듭니다.
    pub fn create_test_state() -> AppState {
        AppState::new(
            Arc::new(InMemoryTradeStore::default()),
            StatisticsConfig::default(),
        )
    }
}
