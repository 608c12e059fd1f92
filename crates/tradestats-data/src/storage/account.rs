//! 계좌 스냅샷 repository.

use crate::error::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgConnection};
use tracing::debug;
use tradestats_core::{AccountSnapshot, TradeMode};

/// `account` 테이블 레코드. `(account_login_number, time_last_update)`가 기본 키입니다.
#[derive(Debug, Clone, FromRow)]
pub struct AccountRecord {
    pub account_login_number: i64,
    pub trade_mode: i32,
    pub balance: Decimal,
    pub equity: Option<Decimal>,
    pub profit: Decimal,
    pub company: Option<String>,
    pub currency: String,
    pub time_last_update: DateTime<Utc>,
}

impl From<AccountRecord> for AccountSnapshot {
    fn from(r: AccountRecord) -> Self {
        AccountSnapshot {
            login: r.account_login_number,
            trade_mode: TradeMode::from_code(r.trade_mode),
            balance: r.balance,
            equity: r.equity,
            profit: r.profit,
            company: r.company,
            currency: r.currency,
            time_last_update: r.time_last_update,
        }
    }
}

/// 계좌 스냅샷 repository.
pub struct AccountRepository;

impl AccountRepository {
    /// 스냅샷을 삽입하거나 갱신합니다.
    pub async fn upsert(conn: &mut PgConnection, snapshot: &AccountSnapshot) -> Result<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO account
                (account_login_number, trade_mode, balance, equity, profit, company, currency, time_last_update)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (account_login_number, time_last_update) DO UPDATE SET
                trade_mode = EXCLUDED.trade_mode,
                balance = EXCLUDED.balance,
                equity = EXCLUDED.equity,
                profit = EXCLUDED.profit,
                company = EXCLUDED.company,
                currency = EXCLUDED.currency
            "#,
        )
        .bind(snapshot.login)
        .bind(snapshot.trade_mode.code())
        .bind(snapshot.balance)
        .bind(snapshot.equity)
        .bind(snapshot.profit)
        .bind(snapshot.company.as_deref())
        .bind(&snapshot.currency)
        .bind(snapshot.time_last_update)
        .execute(conn)
        .await?;

        debug!(
            login = snapshot.login,
            time_last_update = %snapshot.time_last_update,
            "Account snapshot upserted"
        );
        Ok(result.rows_affected())
    }

    /// 전체 스냅샷 이력 (시각 순).
    pub async fn history(conn: &mut PgConnection) -> Result<Vec<AccountSnapshot>> {
        let records: Vec<AccountRecord> = sqlx::query_as(
            r#"
            SELECT account_login_number, trade_mode, balance, equity, profit, company,
                   currency, time_last_update
            FROM account
            ORDER BY time_last_update
            "#,
        )
        .fetch_all(conn)
        .await?;

        Ok(records.into_iter().map(AccountSnapshot::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_record_keeps_unmapped_trade_mode() {
        let record = AccountRecord {
            account_login_number: 5044355516,
            trade_mode: 12,
            balance: dec!(100250.5),
            equity: None,
            profit: dec!(0),
            company: None,
            currency: "EUR".to_string(),
            time_last_update: Utc.with_ymd_and_hms(2025, 8, 12, 18, 30, 0).unwrap(),
        };

        let snapshot = AccountSnapshot::from(record);
        assert_eq!(snapshot.trade_mode, TradeMode::Other(12));
        assert_eq!(snapshot.trade_mode.code(), 12);
        assert_eq!(snapshot.equity, None);
        assert_eq!(snapshot.login, 5044355516);
    }
}
