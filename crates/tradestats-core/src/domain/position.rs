//! 보유 포지션과 집계된 청산 포지션.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::calendar::{Session, TradingWeekday};

/// 현재 보유 중인 포지션 (매 갱신 주기마다 전체 교체).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenPosition {
    pub position_id: i64,
    pub symbol: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub volume: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_open: Decimal,
    /// 손절가 (0이면 미설정)
    #[serde(with = "rust_decimal::serde::float")]
    pub sl: Decimal,
    /// 익절가 (0이면 미설정)
    #[serde(with = "rust_decimal::serde::float")]
    pub tp: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub swap: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub profit: Decimal,
    pub time_open: DateTime<Utc>,
    pub time_last_update: DateTime<Utc>,
}

/// 같은 `position_id`를 공유하는 체결들을 하나로 합친 청산 포지션.
///
/// 진입 체결이 없는 경우 `time_open`/`open_price`/`weekday`/`session`은 모두 `None`이며,
/// 이를 사용하는 쪽에서 반드시 부재를 처리해야 합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedPosition {
    pub position_id: i64,
    pub symbol: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub volume: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub open_price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub close_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub profit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub swap: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub fee: Decimal,
    pub time_open: Option<DateTime<Utc>>,
    pub time_close: DateTime<Utc>,
    pub weekday: Option<TradingWeekday>,
    #[serde(
        serialize_with = "serialize_session",
        deserialize_with = "deserialize_session"
    )]
    pub session: Option<Session>,
}

impl AggregatedPosition {
    /// 수익 포지션 여부 (profit > 0, 0은 패배로 취급).
    pub fn is_win(&self) -> bool {
        self.profit > Decimal::ZERO
    }
}

fn serialize_session<S: Serializer>(
    session: &Option<Session>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(Session::label_or_unknown(*session))
}

fn deserialize_session<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Session>, D::Error> {
    let label = String::deserialize(deserializer)?;
    Ok(label.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn sample(profit: Decimal, session: Option<Session>) -> AggregatedPosition {
        AggregatedPosition {
            position_id: 42,
            symbol: "EURUSD".to_string(),
            volume: dec!(0.2),
            open_price: None,
            close_price: dec!(1.0850),
            profit,
            swap: dec!(0),
            fee: dec!(0),
            time_open: None,
            time_close: Utc.with_ymd_and_hms(2025, 1, 6, 14, 0, 0).unwrap(),
            weekday: None,
            session,
        }
    }

    #[test]
    fn test_zero_profit_is_not_a_win() {
        assert!(sample(dec!(0.01), None).is_win());
        assert!(!sample(dec!(0), None).is_win());
        assert!(!sample(dec!(-3), None).is_win());
    }

    #[test]
    fn test_missing_session_serializes_as_unknown() {
        let json = serde_json::to_value(sample(dec!(5), None)).unwrap();
        assert_eq!(json["session"], "Unknown");
        assert!(json["open_price"].is_null());
        assert_eq!(json["profit"], 5.0);

        let back: AggregatedPosition = serde_json::from_value(json).unwrap();
        assert_eq!(back.session, None);

        let json = serde_json::to_value(sample(dec!(5), Some(Session::Lunch))).unwrap();
        assert_eq!(json["session"], "Lunch");
    }
}
