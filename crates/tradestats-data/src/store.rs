//! PostgreSQL 기반 `TradeStore` 구현.

use async_trait::async_trait;
use sqlx::PgConnection;
use tracing::{info, instrument};
use tradestats_core::{
    AccountSnapshot, AggregatedPosition, OpenPosition, StatisticsInput, TradeStore, TraderResult,
};

use crate::error::{DataError, Result};
use crate::storage::account::AccountRepository;
use crate::storage::positions::{ClosedPositionRepository, OpenPositionRepository};
use crate::storage::Database;

/// 한 번의 수집 주기에서 저장할 데이터.
#[derive(Debug, Clone)]
pub struct RefreshCycle {
    /// 현재 보유 포지션 (기존 데이터를 전체 교체)
    pub open_positions: Vec<OpenPosition>,
    /// 집계된 청산 포지션 (`position_id` 기준 upsert)
    pub closed_positions: Vec<AggregatedPosition>,
    /// 계좌 스냅샷 (`(login, time_last_update)` 기준 upsert)
    pub account: AccountSnapshot,
}

/// 저장 결과.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub open_positions: u64,
    pub closed_positions: u64,
    pub account_snapshots: u64,
}

/// PostgreSQL 저장소.
#[derive(Clone)]
pub struct PgTradeStore {
    db: Database,
}

impl PgTradeStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// 수집 주기 하나를 단일 트랜잭션으로 저장합니다.
    ///
    /// 실패하면 아무것도 반영되지 않으며, 이전 주기의 데이터가 그대로 남습니다.
    #[instrument(skip_all, fields(
        open = cycle.open_positions.len(),
        closed = cycle.closed_positions.len(),
    ))]
    pub async fn write_cycle(&self, cycle: &RefreshCycle) -> Result<WriteSummary> {
        let mut tx = self.db.pool().begin().await?;

        let open_positions =
            OpenPositionRepository::replace_all(&mut tx, &cycle.open_positions).await?;
        let closed_positions =
            ClosedPositionRepository::upsert_batch(&mut tx, &cycle.closed_positions).await?;
        let account_snapshots = AccountRepository::upsert(&mut tx, &cycle.account).await?;

        tx.commit().await?;

        let summary = WriteSummary {
            open_positions,
            closed_positions,
            account_snapshots,
        };
        info!(?summary, "Refresh cycle committed");
        Ok(summary)
    }

    async fn read_input(conn: &mut PgConnection) -> Result<StatisticsInput> {
        Ok(StatisticsInput {
            open_count: OpenPositionRepository::count(conn).await?,
            closed_positions: ClosedPositionRepository::list(conn).await?,
            account_history: AccountRepository::history(conn).await?,
        })
    }
}

#[async_trait]
impl TradeStore for PgTradeStore {
    async fn statistics_input(&self) -> TraderResult<StatisticsInput> {
        // 세 테이블을 같은 시점의 스냅샷으로 읽음
        let mut tx = self.db.pool().begin().await.map_err(DataError::from)?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(DataError::from)?;

        let input = Self::read_input(&mut tx).await?;
        tx.commit().await.map_err(DataError::from)?;

        Ok(input)
    }

    async fn open_positions(&self) -> TraderResult<Vec<OpenPosition>> {
        let mut conn = self.db.pool().acquire().await.map_err(DataError::from)?;
        Ok(OpenPositionRepository::list(&mut conn).await?)
    }

    async fn closed_positions(&self) -> TraderResult<Vec<AggregatedPosition>> {
        let mut conn = self.db.pool().acquire().await.map_err(DataError::from)?;
        Ok(ClosedPositionRepository::list(&mut conn).await?)
    }

    async fn health_check(&self) -> TraderResult<()> {
        Ok(self.db.health_check().await?)
    }
}
