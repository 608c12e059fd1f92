//! 일별 자산 곡선(Equity Curve) 재구성.
//!
//! 불규칙하게 수집된 계좌 스냅샷을 시작일부터 종료일까지 하루도 빠짐없는
//! 일별 시계열로 변환합니다.
//!
//! # 규칙
//!
//! 1. 날짜별로 마지막 스냅샷의 자산 가치가 그날의 값입니다 (소수점 둘째 자리 반올림).
//!    자산 값이 비어 있는 스냅샷은 직전 값을 이어받습니다.
//! 2. 스냅샷이 없는 날은 가장 최근 값을 그대로 이어갑니다 (forward-fill, 보간/미래 참조 없음).
//!    시작일 이전 스냅샷이 있으면 그 마지막 값에서, 없으면 초기 자본에서 시작합니다.
//! 3. `equity_change`는 전일 대비 변화량이며 첫 포인트는 0입니다.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tradestats_core::AccountSnapshot;

/// 일별 자산 곡선 데이터 포인트.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEquityPoint {
    /// 날짜 (YYYY-MM-DD)
    pub date: NaiveDate,
    /// 그날의 자산 가치
    #[serde(with = "rust_decimal::serde::float")]
    pub equity: Decimal,
    /// 전일 대비 변화량
    #[serde(with = "rust_decimal::serde::float")]
    pub equity_change: Decimal,
}

/// 일별 연속 자산 곡선.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyEquityCurve {
    /// 초기 자본
    starting_capital: Decimal,

    /// 날짜순 데이터 포인트 (빈 날짜 없음)
    points: Vec<DailyEquityPoint>,
}

impl DailyEquityCurve {
    /// 스냅샷으로부터 `start`~`end`(양 끝 포함) 일별 곡선을 생성합니다.
    ///
    /// `start > end`이면 빈 곡선을 반환합니다. 스냅샷의 정렬 여부는 상관없습니다.
    pub fn build(
        snapshots: &[AccountSnapshot],
        start: NaiveDate,
        end: NaiveDate,
        starting_capital: Decimal,
    ) -> Self {
        let by_day = Self::equity_by_day(snapshots, starting_capital);

        // 시작일 이전 마지막 값 (없으면 초기 자본)
        let mut carried = by_day
            .range(..start)
            .next_back()
            .map(|(_, equity)| *equity)
            .unwrap_or(starting_capital);

        let mut points = Vec::new();
        let mut previous: Option<Decimal> = None;
        let mut current = start;

        while current <= end {
            if let Some(equity) = by_day.get(&current) {
                carried = *equity;
            }

            let equity_change = previous
                .map(|prev| (carried - prev).round_dp(2))
                .unwrap_or(Decimal::ZERO);

            points.push(DailyEquityPoint {
                date: current,
                equity: carried,
                equity_change,
            });
            previous = Some(carried);

            match current.succ_opt() {
                Some(next) => current = next,
                None => break,
            }
        }

        Self {
            starting_capital,
            points,
        }
    }

    /// 날짜별 마지막 스냅샷의 자산 가치.
    fn equity_by_day(
        snapshots: &[AccountSnapshot],
        starting_capital: Decimal,
    ) -> BTreeMap<NaiveDate, Decimal> {
        let mut ordered: Vec<&AccountSnapshot> = snapshots.iter().collect();
        ordered.sort_by_key(|s| s.time_last_update);

        let mut last_equity = starting_capital;
        let mut by_day = BTreeMap::new();

        for snapshot in ordered {
            last_equity = snapshot.equity.unwrap_or(last_equity).round_dp(2);
            by_day.insert(snapshot.time_last_update.date_naive(), last_equity);
        }

        by_day
    }

    /// 초기 자본을 반환합니다.
    pub fn starting_capital(&self) -> Decimal {
        self.starting_capital
    }

    /// 모든 데이터 포인트를 반환합니다.
    pub fn points(&self) -> &[DailyEquityPoint] {
        &self.points
    }

    /// 데이터 포인트를 소유권과 함께 반환합니다.
    pub fn into_points(self) -> Vec<DailyEquityPoint> {
        self.points
    }

    /// 마지막 날의 자산 가치 (비어 있으면 초기 자본).
    pub fn current_equity(&self) -> Decimal {
        self.points
            .last()
            .map(|p| p.equity)
            .unwrap_or(self.starting_capital)
    }

    /// 데이터 포인트 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 데이터가 비어있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
