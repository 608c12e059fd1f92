//! 대시보드 통계 리포트.
//!
//! 저장소에서 읽은 [`StatisticsInput`] 하나로 대시보드가 표시하는 모든 값을 계산합니다.

use chrono::{Datelike, Month, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use tradestats_core::{
    DataIntegrityWarning, Session, StatisticsConfig, StatisticsInput, TradingWeekday,
    UNKNOWN_TRADE_MODE_LABEL,
};

use crate::buckets::{
    aggregate_buckets, BucketTable, ByMonth, BySession, ByWeekday, ByYear, Year, MONTHS,
};
use crate::equity_curve::{DailyEquityCurve, DailyEquityPoint};

/// 통계 응답.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsReport {
    /// 보유 포지션 수
    pub open_count: u64,
    /// 청산 포지션 수
    pub closed_count: u64,
    /// 기준일부터 오늘까지의 일별 자산 곡선
    pub equity_series: Vec<DailyEquityPoint>,
    /// 요일별 (월~금)
    pub weekday_stats: BucketTable<TradingWeekday>,
    /// 세션별
    pub session_stats: BucketTable<Session>,
    /// 월별
    pub monthly_stats: BucketTable<Month>,
    /// 연도별 (설정된 연도만)
    pub yearly_stats: BucketTable<Year>,
    /// 최신 계좌 스냅샷의 거래 모드 라벨
    pub trade_mode: String,
    /// 연도별 손익 합계의 합
    #[serde(with = "rust_decimal::serde::float")]
    pub total_profit_all_years: Decimal,
    /// 데이터 무결성 경고
    pub warnings: Vec<DataIntegrityWarning>,
}

impl StatisticsReport {
    /// 리포트를 계산합니다. `today`가 자산 곡선의 마지막 날입니다.
    pub fn compute(input: &StatisticsInput, config: &StatisticsConfig, today: NaiveDate) -> Self {
        let positions = &input.closed_positions;

        let equity_series = DailyEquityCurve::build(
            &input.account_history,
            config.equity_anchor_date,
            today,
            config.starting_capital,
        )
        .into_points();

        let years: Vec<Year> = config.report_years.iter().copied().map(Year).collect();
        let yearly_stats = aggregate_buckets::<ByYear>(positions, &years);
        let total_profit_all_years = yearly_stats.total_profit();

        let mut warnings: Vec<DataIntegrityWarning> = positions
            .iter()
            .filter_map(|position| {
                let time_open = position.time_open?;
                TradingWeekday::from_weekday(time_open.weekday())
                    .is_none()
                    .then_some(DataIntegrityWarning::WeekendOpen {
                        position_id: position.position_id,
                        time_open,
                    })
            })
            .collect();

        let latest_account = input
            .account_history
            .iter()
            .max_by_key(|snapshot| snapshot.time_last_update);

        let trade_mode = match latest_account {
            Some(account) => {
                if !account.trade_mode.is_mapped() {
                    warn!(
                        code = account.trade_mode.code(),
                        "Unmapped account trade mode"
                    );
                    warnings.push(DataIntegrityWarning::UnmappedTradeMode {
                        code: account.trade_mode.code(),
                    });
                }
                account.trade_mode.label()
            }
            None => UNKNOWN_TRADE_MODE_LABEL,
        };

        let report = Self {
            open_count: input.open_count,
            closed_count: positions.len() as u64,
            equity_series,
            weekday_stats: aggregate_buckets::<ByWeekday>(positions, &TradingWeekday::ALL),
            session_stats: aggregate_buckets::<BySession>(positions, &Session::ALL),
            monthly_stats: aggregate_buckets::<ByMonth>(positions, &MONTHS),
            yearly_stats,
            trade_mode: trade_mode.to_string(),
            total_profit_all_years,
            warnings,
        };

        info!(
            open = report.open_count,
            closed = report.closed_count,
            equity_days = report.equity_series.len(),
            warnings = report.warnings.len(),
            "Statistics report computed"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::positions::aggregate_deals;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use tradestats_core::{AccountSnapshot, Deal, DealEntry, TradeMode};

    fn config() -> StatisticsConfig {
        StatisticsConfig {
            equity_anchor_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            starting_capital: dec!(100000),
            report_years: vec![2025, 2026, 2027],
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
    }

    fn monday_trade() -> Vec<Deal> {
        let deal = |entry, hour, price, profit| Deal {
            position_id: 1,
            symbol: "XAUUSD".to_string(),
            volume: dec!(0.5),
            price,
            swap: dec!(0),
            profit,
            fee: dec!(0),
            entry,
            time: Utc.with_ymd_and_hms(2025, 1, 6, hour, 0, 0).unwrap(),
        };
        vec![
            deal(DealEntry::In, 9, dec!(100), dec!(0)),
            deal(DealEntry::Out, 14, dec!(110), dec!(50)),
        ]
    }

    fn account(trade_mode: TradeMode, day: u32, equity: Decimal) -> AccountSnapshot {
        AccountSnapshot {
            login: 5044355516,
            trade_mode,
            balance: equity,
            equity: Some(equity),
            profit: dec!(0),
            company: Some("MetaQuotes Ltd.".to_string()),
            currency: "USD".to_string(),
            time_last_update: Utc.with_ymd_and_hms(2025, 1, day, 20, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_single_monday_trade() {
        let input = StatisticsInput {
            open_count: 2,
            closed_positions: aggregate_deals(&monday_trade()),
            account_history: vec![account(TradeMode::Demo, 6, dec!(100050))],
        };

        let report = StatisticsReport::compute(&input, &config(), today());

        assert_eq!(report.open_count, 2);
        assert_eq!(report.closed_count, 1);
        assert_eq!(report.trade_mode, "Demo");
        assert!(report.warnings.is_empty());

        let monday = report.weekday_stats.get(&TradingWeekday::Monday).unwrap();
        assert_eq!(monday.total_positions, 1);
        assert_eq!(monday.wins, 1);
        assert_eq!(monday.total_profit, dec!(50));
        assert_eq!(monday.winrate, 100.0);
        for weekday in &TradingWeekday::ALL[1..] {
            assert_eq!(report.weekday_stats.get(weekday).unwrap().total_positions, 0);
        }

        assert_eq!(
            report.session_stats.get(&Session::London).unwrap().total_positions,
            1
        );
        assert_eq!(
            report.monthly_stats.get(&Month::January).unwrap().total_profit,
            dec!(50)
        );
        assert_eq!(report.total_profit_all_years, dec!(50));

        assert_eq!(report.equity_series.len(), 10);
        assert_eq!(report.equity_series[4].equity, dec!(100000));
        assert_eq!(report.equity_series[5].equity, dec!(100050));
        assert_eq!(report.equity_series[5].equity_change, dec!(50));
    }

    #[test]
    fn test_empty_input_yields_zeroed_report() {
        let report = StatisticsReport::compute(&StatisticsInput::default(), &config(), today());

        assert_eq!(report.closed_count, 0);
        assert_eq!(report.trade_mode, "Unknown");
        assert_eq!(report.total_profit_all_years, dec!(0));
        assert_eq!(report.weekday_stats.rows().len(), 5);
        assert_eq!(report.session_stats.rows().len(), 6);
        assert_eq!(report.monthly_stats.rows().len(), 12);
        assert_eq!(report.yearly_stats.rows().len(), 3);
        assert!(report
            .equity_series
            .iter()
            .all(|p| p.equity == dec!(100000)));
    }

    #[test]
    fn test_latest_account_decides_trade_mode() {
        let input = StatisticsInput {
            account_history: vec![
                account(TradeMode::Live, 8, dec!(1)),
                account(TradeMode::Other(7), 9, dec!(1)),
                account(TradeMode::Demo, 3, dec!(1)),
            ],
            ..Default::default()
        };

        let report = StatisticsReport::compute(&input, &config(), today());
        assert_eq!(report.trade_mode, "Unknown");
        assert_eq!(
            report.warnings,
            vec![DataIntegrityWarning::UnmappedTradeMode { code: 7 }]
        );
    }

    #[test]
    fn test_weekend_open_is_reported() {
        let mut deals = monday_trade();
        // 2025-01-04은 토요일
        deals[0].time = Utc.with_ymd_and_hms(2025, 1, 4, 9, 0, 0).unwrap();

        let input = StatisticsInput {
            closed_positions: aggregate_deals(&deals),
            ..Default::default()
        };
        let report = StatisticsReport::compute(&input, &config(), today());

        assert_eq!(report.weekday_stats.total_positions(), 0);
        assert_eq!(report.weekday_stats.dropped(), 1);
        assert_eq!(report.session_stats.total_positions(), 1);
        assert!(matches!(
            report.warnings.as_slice(),
            [DataIntegrityWarning::WeekendOpen { position_id: 1, .. }]
        ));
    }

    #[test]
    fn test_report_json_shape() {
        let input = StatisticsInput {
            closed_positions: aggregate_deals(&monday_trade()),
            ..Default::default()
        };
        let report = StatisticsReport::compute(&input, &config(), today());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["closed_count"], 1);
        assert_eq!(json["weekday_stats"]["Monday"]["winrate"], 100.0);
        assert_eq!(json["weekday_stats"]["Friday"]["total_positions"], 0);
        assert_eq!(json["yearly_stats"]["2025"]["total_profit"], 50.0);
        assert_eq!(json["total_profit_all_years"], 50.0);
        assert_eq!(json["equity_series"][0]["date"], "2025-01-01");
        assert!(json["warnings"].as_array().unwrap().is_empty());
    }
}
