//! 저장소 추상화.
//!
//! 통계 계산은 이 trait를 통해서만 원본 데이터를 읽습니다. 구현체는 한 번의 호출에서
//! 시점 일관성(point-in-time)이 보장된 스냅샷을 돌려줘야 합니다.

use async_trait::async_trait;

use super::{AccountSnapshot, AggregatedPosition, OpenPosition};
use crate::error::TraderResult;

/// 통계 리포트 1회 계산에 필요한 입력.
#[derive(Debug, Clone, Default)]
pub struct StatisticsInput {
    /// 보유 포지션 수
    pub open_count: u64,
    /// 집계된 청산 포지션 (`time_close` 순)
    pub closed_positions: Vec<AggregatedPosition>,
    /// 계좌 스냅샷 이력 (`time_last_update` 순)
    pub account_history: Vec<AccountSnapshot>,
}

/// 포지션/계좌 저장소 trait.
///
/// # 구현 예시
///
/// ```ignore
/// #[async_trait]
/// impl TradeStore for PgTradeStore {
///     async fn statistics_input(&self) -> TraderResult<StatisticsInput> {
///         // 하나의 트랜잭션 안에서 세 테이블을 읽음
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// 통계 계산용 입력을 시점 일관성 있게 조회합니다.
    ///
    /// # Errors
    ///
    /// - `TraderError::Database` / `TraderError::Upstream`: 저장소에 접근할 수 없음
    async fn statistics_input(&self) -> TraderResult<StatisticsInput>;

    /// 현재 보유 포지션 목록.
    async fn open_positions(&self) -> TraderResult<Vec<OpenPosition>>;

    /// 청산 포지션 목록 (`time_close` 오름차순).
    async fn closed_positions(&self) -> TraderResult<Vec<AggregatedPosition>>;

    /// 저장소 연결 상태 확인.
    async fn health_check(&self) -> TraderResult<()>;
}
