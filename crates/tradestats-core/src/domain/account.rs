//! 계좌 스냅샷.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 계좌 거래 모드 (터미널 trade_mode 코드).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeMode {
    /// 0
    Demo,
    /// 1
    Live,
    /// 2
    StrategyTester,
    /// 3
    ContestMode,
    /// 매핑되지 않은 코드 (원본 코드 보존)
    Other(i32),
}

/// 매핑되지 않은 거래 모드의 표시값.
pub const UNKNOWN_TRADE_MODE_LABEL: &str = "Unknown";

impl TradeMode {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => TradeMode::Demo,
            1 => TradeMode::Live,
            2 => TradeMode::StrategyTester,
            3 => TradeMode::ContestMode,
            other => TradeMode::Other(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            TradeMode::Demo => 0,
            TradeMode::Live => 1,
            TradeMode::StrategyTester => 2,
            TradeMode::ContestMode => 3,
            TradeMode::Other(code) => *code,
        }
    }

    /// 대시보드 표시 라벨.
    pub fn label(&self) -> &'static str {
        match self {
            TradeMode::Demo => "Demo",
            TradeMode::Live => "Live",
            TradeMode::StrategyTester => "Strategy Tester",
            TradeMode::ContestMode => "Contest Mode",
            TradeMode::Other(_) => UNKNOWN_TRADE_MODE_LABEL,
        }
    }

    pub fn is_mapped(&self) -> bool {
        !matches!(self, TradeMode::Other(_))
    }
}

/// 특정 시각의 계좌 상태. `(login, time_last_update)`가 자연 키입니다.
///
/// 하루에 여러 스냅샷이 있을 수 있으며, 그날의 마지막 스냅샷이 그날의 값입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub login: i64,
    pub trade_mode: TradeMode,
    pub balance: Decimal,
    /// 터미널이 값을 주지 못한 경우 `None` (직전 값으로 대체됨)
    pub equity: Option<Decimal>,
    pub profit: Decimal,
    pub company: Option<String>,
    pub currency: String,
    pub time_last_update: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_mode_labels() {
        assert_eq!(TradeMode::from_code(0).label(), "Demo");
        assert_eq!(TradeMode::from_code(1).label(), "Live");
        assert_eq!(TradeMode::from_code(2).label(), "Strategy Tester");
        assert_eq!(TradeMode::from_code(3).label(), "Contest Mode");
        assert_eq!(TradeMode::from_code(9).label(), "Unknown");
        assert!(!TradeMode::from_code(-1).is_mapped());
    }

    #[test]
    fn test_trade_mode_code_preserved() {
        for code in [-1, 0, 1, 2, 3, 17] {
            assert_eq!(TradeMode::from_code(code).code(), code);
        }
    }
}
