//! 세션 및 요일 라벨.
//!
//! 집계 차원에서 사용하는 고정된 라벨 집합입니다. 표시 문자열은 저장소 컬럼과
//! 응답 JSON의 키로 그대로 사용됩니다.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 시간대(UTC 시각) 기준 트레이딩 세션.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Session {
    #[serde(rename = "Asia")]
    Asia,
    #[serde(rename = "London")]
    London,
    #[serde(rename = "Lunch")]
    Lunch,
    #[serde(rename = "New York")]
    NewYork,
    #[serde(rename = "London Close")]
    LondonClose,
    #[serde(rename = "Out of Session")]
    OutOfSession,
}

/// 진입 시각이 없는 포지션의 세션 표시값.
pub const UNKNOWN_SESSION_LABEL: &str = "Unknown";

impl Session {
    /// 표시 순서대로 나열한 전체 세션.
    pub const ALL: [Session; 6] = [
        Session::Asia,
        Session::London,
        Session::Lunch,
        Session::NewYork,
        Session::LondonClose,
        Session::OutOfSession,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Session::Asia => "Asia",
            Session::London => "London",
            Session::Lunch => "Lunch",
            Session::NewYork => "New York",
            Session::LondonClose => "London Close",
            Session::OutOfSession => "Out of Session",
        }
    }

    /// 선택적 세션을 저장/표시용 라벨로 변환합니다. `None`은 "Unknown".
    pub fn label_or_unknown(session: Option<Session>) -> &'static str {
        session.map_or(UNKNOWN_SESSION_LABEL, |s| s.label())
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Session {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Session::ALL
            .into_iter()
            .find(|session| session.label() == s)
            .ok_or_else(|| format!("Unknown session: {}", s))
    }
}

/// 시장이 열리는 요일 (월~금).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TradingWeekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl TradingWeekday {
    pub const ALL: [TradingWeekday; 5] = [
        TradingWeekday::Monday,
        TradingWeekday::Tuesday,
        TradingWeekday::Wednesday,
        TradingWeekday::Thursday,
        TradingWeekday::Friday,
    ];

    /// chrono 요일을 변환합니다. 주말은 `None`.
    pub fn from_weekday(weekday: Weekday) -> Option<Self> {
        match weekday {
            Weekday::Mon => Some(TradingWeekday::Monday),
            Weekday::Tue => Some(TradingWeekday::Tuesday),
            Weekday::Wed => Some(TradingWeekday::Wednesday),
            Weekday::Thu => Some(TradingWeekday::Thursday),
            Weekday::Fri => Some(TradingWeekday::Friday),
            Weekday::Sat | Weekday::Sun => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TradingWeekday::Monday => "Monday",
            TradingWeekday::Tuesday => "Tuesday",
            TradingWeekday::Wednesday => "Wednesday",
            TradingWeekday::Thursday => "Thursday",
            TradingWeekday::Friday => "Friday",
        }
    }
}

impl fmt::Display for TradingWeekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TradingWeekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TradingWeekday::ALL
            .into_iter()
            .find(|day| day.label() == s)
            .ok_or_else(|| format!("Unknown trading weekday: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_label_roundtrip() {
        for session in Session::ALL {
            assert_eq!(session.label().parse::<Session>().unwrap(), session);
        }
        assert!("Unknown".parse::<Session>().is_err());
        assert_eq!(Session::label_or_unknown(None), "Unknown");
    }

    #[test]
    fn test_session_serde_uses_labels() {
        let json = serde_json::to_string(&Session::NewYork).unwrap();
        assert_eq!(json, "\"New York\"");
    }

    #[test]
    fn test_weekend_has_no_trading_weekday() {
        assert_eq!(
            TradingWeekday::from_weekday(Weekday::Mon),
            Some(TradingWeekday::Monday)
        );
        assert_eq!(TradingWeekday::from_weekday(Weekday::Sat), None);
        assert_eq!(TradingWeekday::from_weekday(Weekday::Sun), None);
    }
}
