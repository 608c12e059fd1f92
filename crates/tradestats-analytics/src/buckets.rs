//! 요일/세션/월/연도별 승률 집계.
//!
//! 각 차원(Dimension)은 고정된 라벨 집합(universe)을 가지며, 결과 테이블에는
//! 관측치가 없는 라벨도 0으로 채워 모두 포함됩니다.
//!
//! 포지션의 키가 universe 밖이거나 없으면 (예: `time_open`이 없는 포지션의 월/연도,
//! 주말 진입 포지션의 요일) 해당 차원 집계에서만 제외되고 `dropped`에 계수됩니다.

use chrono::{Datelike, Month};
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;
use std::collections::HashMap;
use std::hash::Hash;
use tradestats_core::{AggregatedPosition, Session, TradingWeekday};

/// 한 버킷의 집계 결과.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketStat {
    /// 포지션 수
    pub total_positions: u64,
    /// 수익 포지션 수 (profit > 0)
    pub wins: u64,
    /// 손익 합계
    #[serde(with = "rust_decimal::serde::float")]
    pub total_profit: Decimal,
    /// 승률 (%, 0~100). 포지션이 없으면 0.0
    pub winrate: f64,
}

impl BucketStat {
    fn from_tally(tally: Tally) -> Self {
        let winrate = if tally.total == 0 {
            0.0
        } else {
            tally.wins as f64 * 100.0 / tally.total as f64
        };

        Self {
            total_positions: tally.total,
            wins: tally.wins,
            total_profit: tally.profit,
            winrate,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    total: u64,
    wins: u64,
    profit: Decimal,
}

/// 버킷 키 (표시 라벨을 가진 값).
pub trait BucketKey: Copy + Eq + Hash {
    /// 응답에 쓰이는 표준 라벨.
    fn label(&self) -> Cow<'static, str>;
}

impl BucketKey for TradingWeekday {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(TradingWeekday::label(self))
    }
}

impl BucketKey for Session {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(Session::label(self))
    }
}

impl BucketKey for Month {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.name())
    }
}

/// 연도 버킷 키 (라벨은 4자리 숫자 문자열).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Year(pub i32);

impl BucketKey for Year {
    fn label(&self) -> Cow<'static, str> {
        Cow::Owned(format!("{:04}", self.0))
    }
}

/// 1월부터 12월까지.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// 집계 차원.
pub trait Dimension {
    type Key: BucketKey;

    /// 로그/경고에 쓰이는 차원 이름.
    const NAME: &'static str;

    /// 포지션의 버킷 키. 없으면 이 차원 집계에서 제외됩니다.
    fn key(position: &AggregatedPosition) -> Option<Self::Key>;
}

/// 진입 요일 (월~금).
pub struct ByWeekday;

impl Dimension for ByWeekday {
    type Key = TradingWeekday;
    const NAME: &'static str = "weekday";

    fn key(position: &AggregatedPosition) -> Option<TradingWeekday> {
        position.weekday
    }
}

/// 진입 세션.
pub struct BySession;

impl Dimension for BySession {
    type Key = Session;
    const NAME: &'static str = "session";

    fn key(position: &AggregatedPosition) -> Option<Session> {
        position.session
    }
}

/// 진입 월.
pub struct ByMonth;

impl Dimension for ByMonth {
    type Key = Month;
    const NAME: &'static str = "month";

    fn key(position: &AggregatedPosition) -> Option<Month> {
        let month0 = position.time_open?.month0() as usize;
        MONTHS.get(month0).copied()
    }
}

/// 진입 연도.
pub struct ByYear;

impl Dimension for ByYear {
    type Key = Year;
    const NAME: &'static str = "year";

    fn key(position: &AggregatedPosition) -> Option<Year> {
        position.time_open.map(|time| Year(time.year()))
    }
}

/// 한 차원의 집계 결과 (universe 순서 유지).
#[derive(Debug, Clone, PartialEq)]
pub struct BucketTable<K> {
    rows: Vec<(K, BucketStat)>,
    dropped: u64,
}

impl<K: BucketKey> BucketTable<K> {
    /// universe 순서대로의 (키, 통계) 목록.
    pub fn rows(&self) -> &[(K, BucketStat)] {
        &self.rows
    }

    pub fn get(&self, key: &K) -> Option<&BucketStat> {
        self.rows
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, stat)| stat)
    }

    /// 라벨로 조회합니다.
    pub fn get_label(&self, label: &str) -> Option<&BucketStat> {
        self.rows
            .iter()
            .find(|(key, _)| key.label() == label)
            .map(|(_, stat)| stat)
    }

    /// universe 밖이라 제외된 포지션 수.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// 모든 버킷의 포지션 수 합계.
    pub fn total_positions(&self) -> u64 {
        self.rows.iter().map(|(_, stat)| stat.total_positions).sum()
    }

    /// 모든 버킷의 손익 합계.
    pub fn total_profit(&self) -> Decimal {
        self.rows.iter().map(|(_, stat)| stat.total_profit).sum()
    }
}

/// `{라벨: BucketStat}` 객체로 직렬화 (universe 순서 유지).
impl<K: BucketKey> Serialize for BucketTable<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for (key, stat) in &self.rows {
            map.serialize_entry(key.label().as_ref(), stat)?;
        }
        map.end()
    }
}

/// 포지션을 차원 `D`로 집계합니다.
///
/// `universe`의 모든 키가 순서대로 결과에 포함됩니다.
pub fn aggregate_buckets<D: Dimension>(
    positions: &[AggregatedPosition],
    universe: &[D::Key],
) -> BucketTable<D::Key> {
    let (tallies, dropped) = positions.iter().fold(
        (HashMap::<D::Key, Tally>::new(), 0u64),
        |(mut tallies, dropped), position| match D::key(position) {
            Some(key) if universe.contains(&key) => {
                let tally = tallies.entry(key).or_default();
                tally.total += 1;
                if position.is_win() {
                    tally.wins += 1;
                }
                tally.profit += position.profit;
                (tallies, dropped)
            }
            _ => (tallies, dropped + 1),
        },
    );

    if dropped > 0 {
        tracing::debug!(
            dimension = D::NAME,
            dropped,
            "Positions without a bucket key were left out"
        );
    }

    let rows = universe
        .iter()
        .map(|key| {
            let tally = tallies.get(key).copied().unwrap_or_default();
            (*key, BucketStat::from_tally(tally))
        })
        .collect();

    BucketTable { rows, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn position(
        position_id: i64,
        profit: Decimal,
        time_open: Option<DateTime<Utc>>,
        weekday: Option<TradingWeekday>,
        session: Option<Session>,
    ) -> AggregatedPosition {
        AggregatedPosition {
            position_id,
            symbol: "EURUSD".to_string(),
            volume: dec!(1),
            open_price: time_open.map(|_| dec!(1.1)),
            close_price: dec!(1.2),
            profit,
            swap: dec!(0),
            fee: dec!(0),
            time_open,
            time_close: Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap(),
            weekday,
            session,
        }
    }

    fn opened(month: u32, year: i32, profit: Decimal) -> AggregatedPosition {
        let time = Utc.with_ymd_and_hms(year, month, 3, 9, 0, 0).unwrap();
        position(1, profit, Some(time), None, None)
    }

    #[test]
    fn test_weekday_buckets_cover_universe() {
        let positions = vec![
            position(1, dec!(50), None, Some(TradingWeekday::Monday), None),
            position(2, dec!(-20), None, Some(TradingWeekday::Monday), None),
            position(3, dec!(0), None, Some(TradingWeekday::Wednesday), None),
        ];

        let table = aggregate_buckets::<ByWeekday>(&positions, &TradingWeekday::ALL);
        assert_eq!(table.rows().len(), 5);

        let monday = table.get(&TradingWeekday::Monday).unwrap();
        assert_eq!(monday.total_positions, 2);
        assert_eq!(monday.wins, 1);
        assert_eq!(monday.total_profit, dec!(30));
        assert!((monday.winrate - 50.0).abs() < f64::EPSILON);

        // 0 손익은 승리가 아님
        let wednesday = table.get_label("Wednesday").unwrap();
        assert_eq!(wednesday.wins, 0);
        assert_eq!(wednesday.winrate, 0.0);

        let friday = table.get(&TradingWeekday::Friday).unwrap();
        assert_eq!(friday, &BucketStat::default());
    }

    #[test]
    fn test_missing_keys_are_counted_as_dropped() {
        let positions = vec![
            position(1, dec!(5), None, None, None),
            position(2, dec!(5), None, None, Some(Session::Asia)),
        ];

        let sessions = aggregate_buckets::<BySession>(&positions, &Session::ALL);
        assert_eq!(sessions.total_positions(), 1);
        assert_eq!(sessions.dropped(), 1);

        let months = aggregate_buckets::<ByMonth>(&positions, &MONTHS);
        assert_eq!(months.total_positions(), 0);
        assert_eq!(months.dropped(), 2);
    }

    #[test]
    fn test_month_and_year_use_open_time() {
        let positions = vec![
            opened(1, 2025, dec!(10)),
            opened(1, 2026, dec!(-4)),
            opened(12, 2025, dec!(7)),
            opened(6, 2024, dec!(100)),
        ];

        let months = aggregate_buckets::<ByMonth>(&positions, &MONTHS);
        assert_eq!(months.get(&Month::January).unwrap().total_positions, 2);
        assert_eq!(months.get_label("December").unwrap().wins, 1);
        assert_eq!(months.total_profit(), dec!(113));

        let years = [Year(2025), Year(2026), Year(2027)];
        let table = aggregate_buckets::<ByYear>(&positions, &years);
        assert_eq!(table.get_label("2025").unwrap().total_profit, dec!(17));
        assert_eq!(table.get(&Year(2026)).unwrap().wins, 0);
        assert_eq!(table.get(&Year(2027)).unwrap().total_positions, 0);
        // 2024년은 설정된 연도 목록 밖
        assert_eq!(table.dropped(), 1);
        assert_eq!(table.total_profit(), dec!(13));
    }

    #[test]
    fn test_table_serializes_as_ordered_object() {
        let positions = vec![position(
            1,
            dec!(12.5),
            None,
            None,
            Some(Session::NewYork),
        )];
        let table = aggregate_buckets::<BySession>(&positions, &Session::ALL);

        let json = serde_json::to_string(&table).unwrap();
        let labels: Vec<usize> = [
            "\"Asia\"",
            "\"London\"",
            "\"Lunch\"",
            "\"New York\"",
            "\"London Close\"",
            "\"Out of Session\"",
        ]
        .iter()
        .map(|label| json.find(label).unwrap())
        .collect();
        assert!(labels.windows(2).all(|pair| pair[0] < pair[1]));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["New York"]["total_positions"], 1);
        assert_eq!(value["New York"]["total_profit"], 12.5);
        assert_eq!(value["New York"]["winrate"], 100.0);
        assert_eq!(value["Lunch"]["winrate"], 0.0);
    }

    #[test]
    fn test_year_label_is_four_digits() {
        assert_eq!(Year(2025).label(), "2025");
        assert_eq!(Year(987).label(), "0987");
        assert_eq!(Month::March.label(), "March");
    }
}
