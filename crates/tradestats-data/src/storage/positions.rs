//! 보유/청산 포지션 repository.

use crate::error::{DataError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgConnection};
use tracing::{debug, instrument};
use tradestats_core::{AggregatedPosition, OpenPosition, Session, TradingWeekday};

const BATCH_SIZE: usize = 500;

// =============================================================================
// Open Positions
// =============================================================================

/// `open_positions` 테이블 레코드.
#[derive(Debug, Clone, FromRow)]
pub struct OpenPositionRecord {
    pub position_id: i64,
    pub symbol: String,
    pub volume: Decimal,
    pub price_open: Decimal,
    pub sl: Decimal,
    pub tp: Decimal,
    pub swap: Decimal,
    pub profit: Decimal,
    pub time_open: DateTime<Utc>,
    pub time_last_update: DateTime<Utc>,
}

impl From<OpenPositionRecord> for OpenPosition {
    fn from(r: OpenPositionRecord) -> Self {
        OpenPosition {
            position_id: r.position_id,
            symbol: r.symbol,
            volume: r.volume,
            price_open: r.price_open,
            sl: r.sl,
            tp: r.tp,
            swap: r.swap,
            profit: r.profit,
            time_open: r.time_open,
            time_last_update: r.time_last_update,
        }
    }
}

/// 보유 포지션 repository.
///
/// 보유 포지션은 매 수집 주기마다 전체가 교체됩니다.
pub struct OpenPositionRepository;

impl OpenPositionRepository {
    /// 테이블을 비우고 주어진 포지션으로 채웁니다.
    ///
    /// 원자성을 위해 트랜잭션 안에서 호출해야 합니다.
    #[instrument(skip(conn, positions), fields(count = positions.len()))]
    pub async fn replace_all(conn: &mut PgConnection, positions: &[OpenPosition]) -> Result<u64> {
        sqlx::query("TRUNCATE TABLE open_positions")
            .execute(&mut *conn)
            .await?;

        let mut inserted = 0;

        // UNNEST 패턴으로 일괄 삽입
        for chunk in positions.chunks(BATCH_SIZE) {
            let ids: Vec<i64> = chunk.iter().map(|p| p.position_id).collect();
            let symbols: Vec<&str> = chunk.iter().map(|p| p.symbol.as_str()).collect();
            let volumes: Vec<Decimal> = chunk.iter().map(|p| p.volume).collect();
            let prices: Vec<Decimal> = chunk.iter().map(|p| p.price_open).collect();
            let sls: Vec<Decimal> = chunk.iter().map(|p| p.sl).collect();
            let tps: Vec<Decimal> = chunk.iter().map(|p| p.tp).collect();
            let swaps: Vec<Decimal> = chunk.iter().map(|p| p.swap).collect();
            let profits: Vec<Decimal> = chunk.iter().map(|p| p.profit).collect();
            let opened: Vec<DateTime<Utc>> = chunk.iter().map(|p| p.time_open).collect();
            let updated: Vec<DateTime<Utc>> = chunk.iter().map(|p| p.time_last_update).collect();

            let result = sqlx::query(
                r#"
                INSERT INTO open_positions
                    (position_id, symbol, volume, price_open, sl, tp, swap, profit, time_open, time_last_update)
                SELECT * FROM UNNEST(
                    $1::bigint[], $2::text[], $3::numeric[], $4::numeric[], $5::numeric[],
                    $6::numeric[], $7::numeric[], $8::numeric[], $9::timestamptz[], $10::timestamptz[]
                )
                ON CONFLICT (position_id) DO UPDATE SET
                    symbol = EXCLUDED.symbol,
                    volume = EXCLUDED.volume,
                    price_open = EXCLUDED.price_open,
                    sl = EXCLUDED.sl,
                    tp = EXCLUDED.tp,
                    swap = EXCLUDED.swap,
                    profit = EXCLUDED.profit,
                    time_open = EXCLUDED.time_open,
                    time_last_update = EXCLUDED.time_last_update
                "#,
            )
            .bind(&ids)
            .bind(&symbols)
            .bind(&volumes)
            .bind(&prices)
            .bind(&sls)
            .bind(&tps)
            .bind(&swaps)
            .bind(&profits)
            .bind(&opened)
            .bind(&updated)
            .execute(&mut *conn)
            .await
            .map_err(|e| DataError::InsertError(e.to_string()))?;

            inserted += result.rows_affected();
        }

        debug!(inserted, "Open positions replaced");
        Ok(inserted)
    }

    /// 보유 포지션 목록 (진입 시각 순).
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<OpenPosition>> {
        let records: Vec<OpenPositionRecord> = sqlx::query_as(
            r#"
            SELECT position_id, symbol, volume, price_open, sl, tp, swap, profit,
                   time_open, time_last_update
            FROM open_positions
            ORDER BY time_open, position_id
            "#,
        )
        .fetch_all(conn)
        .await?;

        Ok(records.into_iter().map(OpenPosition::from).collect())
    }

    /// 보유 포지션 수.
    pub async fn count(conn: &mut PgConnection) -> Result<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM open_positions")
            .fetch_one(conn)
            .await?;

        u64::try_from(count).map_err(|e| DataError::InvalidData(e.to_string()))
    }
}

// =============================================================================
// Closed Positions
// =============================================================================

/// `closed_positions` 테이블 레코드.
///
/// 요일/세션은 표시 라벨 문자열로 저장됩니다. 진입 체결이 없는 포지션의 세션은 `"Unknown"`.
#[derive(Debug, Clone, FromRow)]
pub struct ClosedPositionRecord {
    pub position_id: i64,
    pub symbol: String,
    pub volume: Decimal,
    pub open_price: Option<Decimal>,
    pub close_price: Decimal,
    pub profit: Decimal,
    pub swap: Decimal,
    pub fee: Decimal,
    pub time_open: Option<DateTime<Utc>>,
    pub time_close: DateTime<Utc>,
    pub weekday: Option<String>,
    pub session: String,
}

impl TryFrom<ClosedPositionRecord> for AggregatedPosition {
    type Error = DataError;

    fn try_from(r: ClosedPositionRecord) -> Result<Self> {
        let weekday = r
            .weekday
            .as_deref()
            .map(str::parse::<TradingWeekday>)
            .transpose()
            .map_err(|e| DataError::InvalidData(format!("position {}: {}", r.position_id, e)))?;

        let session = match r.session.as_str() {
            tradestats_core::UNKNOWN_SESSION_LABEL => None,
            label => Some(label.parse::<Session>().map_err(|e| {
                DataError::InvalidData(format!("position {}: {}", r.position_id, e))
            })?),
        };

        Ok(AggregatedPosition {
            position_id: r.position_id,
            symbol: r.symbol,
            volume: r.volume,
            open_price: r.open_price,
            close_price: r.close_price,
            profit: r.profit,
            swap: r.swap,
            fee: r.fee,
            time_open: r.time_open,
            time_close: r.time_close,
            weekday,
            session,
        })
    }
}

/// 청산 포지션 repository.
pub struct ClosedPositionRepository;

impl ClosedPositionRepository {
    /// `position_id` 기준으로 삽입하거나 갱신합니다.
    #[instrument(skip(conn, positions), fields(count = positions.len()))]
    pub async fn upsert_batch(
        conn: &mut PgConnection,
        positions: &[AggregatedPosition],
    ) -> Result<u64> {
        let mut upserted = 0;

        for chunk in positions.chunks(BATCH_SIZE) {
            let ids: Vec<i64> = chunk.iter().map(|p| p.position_id).collect();
            let symbols: Vec<&str> = chunk.iter().map(|p| p.symbol.as_str()).collect();
            let volumes: Vec<Decimal> = chunk.iter().map(|p| p.volume).collect();
            let open_prices: Vec<Option<Decimal>> = chunk.iter().map(|p| p.open_price).collect();
            let close_prices: Vec<Decimal> = chunk.iter().map(|p| p.close_price).collect();
            let profits: Vec<Decimal> = chunk.iter().map(|p| p.profit).collect();
            let swaps: Vec<Decimal> = chunk.iter().map(|p| p.swap).collect();
            let fees: Vec<Decimal> = chunk.iter().map(|p| p.fee).collect();
            let opened: Vec<Option<DateTime<Utc>>> = chunk.iter().map(|p| p.time_open).collect();
            let closed: Vec<DateTime<Utc>> = chunk.iter().map(|p| p.time_close).collect();
            let weekdays: Vec<Option<&str>> =
                chunk.iter().map(|p| p.weekday.map(|w| w.label())).collect();
            let sessions: Vec<&str> = chunk
                .iter()
                .map(|p| Session::label_or_unknown(p.session))
                .collect();

            let result = sqlx::query(
                r#"
                INSERT INTO closed_positions
                    (position_id, symbol, volume, open_price, close_price, profit, swap, fee,
                     time_open, time_close, weekday, session)
                SELECT * FROM UNNEST(
                    $1::bigint[], $2::text[], $3::numeric[], $4::numeric[], $5::numeric[],
                    $6::numeric[], $7::numeric[], $8::numeric[], $9::timestamptz[],
                    $10::timestamptz[], $11::text[], $12::text[]
                )
                ON CONFLICT (position_id) DO UPDATE SET
                    symbol = EXCLUDED.symbol,
                    volume = EXCLUDED.volume,
                    open_price = EXCLUDED.open_price,
                    close_price = EXCLUDED.close_price,
                    profit = EXCLUDED.profit,
                    swap = EXCLUDED.swap,
                    fee = EXCLUDED.fee,
                    time_open = EXCLUDED.time_open,
                    time_close = EXCLUDED.time_close,
                    weekday = EXCLUDED.weekday,
                    session = EXCLUDED.session
                "#,
            )
            .bind(&ids)
            .bind(&symbols)
            .bind(&volumes)
            .bind(&open_prices)
            .bind(&close_prices)
            .bind(&profits)
            .bind(&swaps)
            .bind(&fees)
            .bind(&opened)
            .bind(&closed)
            .bind(&weekdays)
            .bind(&sessions)
            .execute(&mut *conn)
            .await
            .map_err(|e| DataError::InsertError(e.to_string()))?;

            upserted += result.rows_affected();
        }

        debug!(upserted, "Closed positions upserted");
        Ok(upserted)
    }

    /// 청산 포지션 목록 (청산 시각 순).
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<AggregatedPosition>> {
        let records: Vec<ClosedPositionRecord> = sqlx::query_as(
            r#"
            SELECT position_id, symbol, volume, open_price, close_price, profit, swap, fee,
                   time_open, time_close, weekday, session
            FROM closed_positions
            ORDER BY time_close, position_id
            "#,
        )
        .fetch_all(conn)
        .await?;

        records.into_iter().map(AggregatedPosition::try_from).collect()
    }
}
