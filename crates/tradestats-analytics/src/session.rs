//! 트레이딩 세션 분류.

use chrono::{DateTime, Timelike, Utc};
use tradestats_core::Session;

/// 시(hour, 0~23)를 세션으로 분류합니다.
///
/// 구간은 모두 반닫힌 구간이며, 어느 구간에도 속하지 않는 시각
/// (0~2시, 6~8시, 18~24시)과 범위를 벗어난 값은 `OutOfSession`입니다.
pub fn classify_hour(hour: u32) -> Session {
    match hour {
        2..=5 => Session::Asia,
        8..=10 => Session::London,
        11..=12 => Session::Lunch,
        13..=15 => Session::NewYork,
        16..=17 => Session::LondonClose,
        _ => Session::OutOfSession,
    }
}

/// UTC 시각의 세션.
pub fn session_of(time: DateTime<Utc>) -> Session {
    classify_hour(time.hour())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_session_boundaries() {
        let expected = [
            (0, Session::OutOfSession),
            (1, Session::OutOfSession),
            (2, Session::Asia),
            (5, Session::Asia),
            (6, Session::OutOfSession),
            (7, Session::OutOfSession),
            (8, Session::London),
            (10, Session::London),
            (11, Session::Lunch),
            (12, Session::Lunch),
            (13, Session::NewYork),
            (15, Session::NewYork),
            (16, Session::LondonClose),
            (17, Session::LondonClose),
            (18, Session::OutOfSession),
            (23, Session::OutOfSession),
        ];

        for (hour, session) in expected {
            assert_eq!(classify_hour(hour), session, "hour {}", hour);
        }
    }

    #[test]
    fn test_every_hour_maps_to_a_known_session() {
        for hour in 0..24 {
            assert!(Session::ALL.contains(&classify_hour(hour)));
        }
    }

    #[test]
    fn test_session_of_uses_utc_hour() {
        let time = Utc.with_ymd_and_hms(2025, 1, 6, 14, 59, 59).unwrap();
        assert_eq!(session_of(time), Session::NewYork);

        let time = Utc.with_ymd_and_hms(2025, 1, 6, 16, 0, 0).unwrap();
        assert_eq!(session_of(time), Session::LondonClose);
    }
}
