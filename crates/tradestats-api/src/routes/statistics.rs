//! 통계 리포트 endpoint.
//!
//! 요청마다 저장소에서 한 번의 시점 일관성 있는 스냅샷을 읽어 리포트를 새로 계산합니다.
//! 자산 곡선의 마지막 날은 현재 UTC 날짜입니다.

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tradestats_analytics::StatisticsReport;

use crate::error::{store_error, ApiResult};
use crate::metrics::{record_integrity_warnings, record_report_duration, set_position_counts};
use crate::state::AppState;

/// GET /api/v1/statistics
pub async fn get_statistics(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<StatisticsReport>> {
    let started = Instant::now();

    let input = state.store.statistics_input().await.map_err(store_error)?;
    let report = StatisticsReport::compute(&input, &state.statistics, Utc::now().date_naive());

    record_report_duration(started.elapsed().as_secs_f64());
    set_position_counts(report.open_count, report.closed_count);
    record_integrity_warnings(&report.warnings);

    Ok(Json(report))
}

/// 통계 라우터 생성.
pub fn statistics_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_statistics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::InMemoryTradeStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::{DateTime, Days, NaiveDate, TimeZone};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tower::ServiceExt;
    use tradestats_core::{
        AccountSnapshot, AggregatedPosition, Session, StatisticsConfig, TradeMode, TradingWeekday,
    };

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    fn config() -> StatisticsConfig {
        StatisticsConfig {
            equity_anchor_date: today() - Days::new(6),
            starting_capital: dec!(100000),
            report_years: vec![2025, 2026, 2027],
        }
    }

    fn position(
        position_id: i64,
        time_open: DateTime<Utc>,
        weekday: Option<TradingWeekday>,
        profit: Decimal,
    ) -> AggregatedPosition {
        AggregatedPosition {
            position_id,
            symbol: "XAUUSD".to_string(),
            volume: dec!(0.5),
            open_price: Some(dec!(100)),
            close_price: dec!(110),
            profit,
            swap: dec!(0),
            fee: dec!(0),
            time_open: Some(time_open),
            time_close: time_open + chrono::Duration::hours(5),
            weekday,
            session: Some(Session::London),
        }
    }

    fn snapshot(trade_mode: TradeMode, day: NaiveDate, equity: Decimal) -> AccountSnapshot {
        AccountSnapshot {
            login: 5044355516,
            trade_mode,
            balance: equity,
            equity: Some(equity),
            profit: dec!(0),
            company: None,
            currency: "USD".to_string(),
            time_last_update: day.and_hms_opt(20, 0, 0).unwrap().and_utc(),
        }
    }

    async fn get_report(store: InMemoryTradeStore) -> (StatusCode, serde_json::Value) {
        let state = Arc::new(AppState::new(Arc::new(store), config()));
        let app = Router::new()
            .nest("/api/v1/statistics", statistics_router())
            .with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/statistics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_statistics_payload_shape() {
        let monday = Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap();
        let store = InMemoryTradeStore {
            closed_positions: vec![
                position(1, monday, Some(TradingWeekday::Monday), dec!(50)),
                position(2, monday, Some(TradingWeekday::Monday), dec!(-20)),
            ],
            account_history: vec![snapshot(
                TradeMode::Live,
                today() - Days::new(3),
                dec!(100030),
            )],
            ..InMemoryTradeStore::default()
        };

        let (status, body) = get_report(store).await;
        assert_eq!(status, StatusCode::OK);

        assert_eq!(body["open_count"], 0);
        assert_eq!(body["closed_count"], 2);
        assert_eq!(body["trade_mode"], "Live");
        assert_eq!(body["total_profit_all_years"], 30.0);

        let series = body["equity_series"].as_array().unwrap();
        assert_eq!(series.len(), 7);
        assert_eq!(series[0]["equity"], 100000.0);
        assert_eq!(series[3]["equity"], 100030.0);
        assert_eq!(series[3]["equity_change"], 30.0);
        assert_eq!(series[6]["date"], today().format("%Y-%m-%d").to_string());

        let monday_stats = &body["weekday_stats"]["Monday"];
        assert_eq!(monday_stats["total_positions"], 2);
        assert_eq!(monday_stats["wins"], 1);
        assert_eq!(monday_stats["winrate"], 50.0);
        assert_eq!(body["weekday_stats"]["Friday"]["total_positions"], 0);
        assert_eq!(body["monthly_stats"]["January"]["total_profit"], 30.0);
        assert_eq!(body["yearly_stats"]["2025"]["total_positions"], 2);
        assert_eq!(body["session_stats"]["London"]["total_positions"], 2);
    }

    #[tokio::test]
    async fn test_empty_store_reports_flat_curve() {
        let (status, body) = get_report(InMemoryTradeStore::default()).await;
        assert_eq!(status, StatusCode::OK);

        assert_eq!(body["closed_count"], 0);
        assert_eq!(body["trade_mode"], "Unknown");
        assert!(body["equity_series"]
            .as_array()
            .unwrap()
            .iter()
            .all(|p| p["equity"] == 100000.0 && p["equity_change"] == 0.0));
        assert!(body["warnings"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_integrity_warnings_are_reported() {
        let saturday = Utc.with_ymd_and_hms(2025, 1, 4, 10, 0, 0).unwrap();
        let store = InMemoryTradeStore {
            closed_positions: vec![position(7, saturday, None, dec!(5))],
            account_history: vec![snapshot(TradeMode::Other(9), today(), dec!(100005))],
            ..InMemoryTradeStore::default()
        };

        let (status, body) = get_report(store).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["trade_mode"], "Unknown");

        let kinds: Vec<&str> = body["warnings"]
            .as_array()
            .unwrap()
            .iter()
            .map(|w| w["kind"].as_str().unwrap())
            .collect();
        assert_eq!(kinds, vec!["weekend_open", "unmapped_trade_mode"]);
    }

    #[tokio::test]
    async fn test_unavailable_store_returns_503() {
        let (status, body) = get_report(InMemoryTradeStore::unavailable()).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "STORE_UNAVAILABLE");
        assert!(body.get("equity_series").is_none());
    }
}
