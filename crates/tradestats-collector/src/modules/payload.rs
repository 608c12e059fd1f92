//! 터미널 내보내기 파일 형식.
//!
//! 한 갱신 주기의 계좌 정보, 보유 포지션, 체결 이력을 담은 JSON 문서입니다.
//! 시각 필드는 터미널 관례대로 Unix 초(UTC)입니다.
//!
//! ```json
//! {
//!   "account": { "login": 5044355516, "trade_mode": 0, "balance": 100000.0,
//!                "equity": 100120.5, "profit": 120.5, "company": "MetaQuotes Ltd.",
//!                "currency": "EUR" },
//!   "open_positions": [{ "identifier": 9, "symbol": "EURUSD", "volume": 0.1,
//!                        "price_open": 1.085, "sl": 0.0, "tp": 0.0, "swap": 0.0,
//!                        "profit": 12.0, "time": 1736154000 }],
//!   "deals": [{ "position_id": 9, "symbol": "EURUSD", "volume": 0.1, "price": 1.085,
//!               "swap": 0.0, "profit": 0.0, "fee": 0.0, "entry": 0, "time": 1736154000 }],
//!   "refreshed_at": 1736200000
//! }
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tradestats_core::{
    AccountSnapshot, Deal, DealEntry, OpenPosition, TradeMode, TraderError, TraderResult,
};

/// 내보내기 문서 전체.
#[derive(Debug, Clone, Deserialize)]
pub struct TerminalExport {
    pub account: AccountPayload,
    #[serde(default)]
    pub open_positions: Vec<OpenPositionPayload>,
    #[serde(default)]
    pub deals: Vec<DealPayload>,
    /// 갱신 시각. 없으면 수집기의 현재 시각을 사용합니다.
    #[serde(default)]
    pub refreshed_at: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountPayload {
    pub login: i64,
    pub trade_mode: i32,
    pub balance: Decimal,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub profit: Decimal,
    #[serde(default)]
    pub company: Option<String>,
    pub currency: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenPositionPayload {
    pub identifier: i64,
    pub symbol: String,
    pub volume: Decimal,
    pub price_open: Decimal,
    #[serde(default)]
    pub sl: Decimal,
    #[serde(default)]
    pub tp: Decimal,
    #[serde(default)]
    pub swap: Decimal,
    #[serde(default)]
    pub profit: Decimal,
    pub time: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DealPayload {
    pub position_id: i64,
    pub symbol: String,
    pub volume: Decimal,
    pub price: Decimal,
    #[serde(default)]
    pub swap: Decimal,
    #[serde(default)]
    pub profit: Decimal,
    #[serde(default)]
    pub fee: Decimal,
    pub entry: i32,
    pub time: i64,
}

/// 도메인 레코드로 변환된 한 주기의 데이터.
#[derive(Debug, Clone)]
pub struct ExportRecords {
    pub account: AccountSnapshot,
    pub open_positions: Vec<OpenPosition>,
    pub deals: Vec<Deal>,
}

fn utc_from_secs(secs: i64, field: &str) -> TraderResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| TraderError::InvalidInput(format!("{} out of range: {}", field, secs)))
}

impl TerminalExport {
    /// JSON 문자열을 파싱합니다.
    pub fn parse(json: &str) -> TraderResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 도메인 레코드로 변환합니다.
    ///
    /// 알 수 없는 체결 entry 코드나 범위를 벗어난 시각이 하나라도 있으면 전체가 거부됩니다.
    pub fn into_records(self, now: DateTime<Utc>) -> TraderResult<ExportRecords> {
        let time_last_update = match self.refreshed_at {
            Some(secs) => utc_from_secs(secs, "refreshed_at")?,
            None => now,
        };

        let account = AccountSnapshot {
            login: self.account.login,
            trade_mode: TradeMode::from_code(self.account.trade_mode),
            balance: self.account.balance,
            equity: self.account.equity,
            profit: self.account.profit,
            company: self.account.company,
            currency: self.account.currency,
            time_last_update,
        };

        let open_positions = self
            .open_positions
            .into_iter()
            .map(|p| {
                Ok(OpenPosition {
                    position_id: p.identifier,
                    symbol: p.symbol,
                    volume: p.volume,
                    price_open: p.price_open,
                    sl: p.sl,
                    tp: p.tp,
                    swap: p.swap,
                    profit: p.profit,
                    time_open: utc_from_secs(p.time, "open position time")?,
                    time_last_update,
                })
            })
            .collect::<TraderResult<Vec<_>>>()?;

        let deals = self
            .deals
            .into_iter()
            .map(|d| {
                Ok(Deal {
                    position_id: d.position_id,
                    symbol: d.symbol,
                    volume: d.volume,
                    price: d.price,
                    swap: d.swap,
                    profit: d.profit,
                    fee: d.fee,
                    entry: DealEntry::from_code(d.entry)?,
                    time: utc_from_secs(d.time, "deal time")?,
                })
            })
            .collect::<TraderResult<Vec<_>>>()?;

        Ok(ExportRecords {
            account,
            open_positions,
            deals,
        })
    }
}
