//! 포지션 조회 endpoint.
//!
//! # 엔드포인트
//!
//! - `GET /api/v1/dashboard` - 보유 포지션과 청산 포지션 전체
//! - `GET /api/v1/positions/open` - 보유 포지션 목록
//! - `GET /api/v1/positions/closed` - 청산 포지션 목록 (`time_close` 순)

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tradestats_core::{AggregatedPosition, OpenPosition};

use crate::error::{store_error, ApiResult};
use crate::state::AppState;

// ==================== 응답 타입 ====================

/// 대시보드 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub open_positions: Vec<OpenPosition>,
    pub closed_positions: Vec<AggregatedPosition>,
}

/// 보유 포지션 목록 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenPositionsResponse {
    pub positions: Vec<OpenPosition>,
    pub total: usize,
}

/// 청산 포지션 목록 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClosedPositionsResponse {
    pub positions: Vec<AggregatedPosition>,
    pub total: usize,
}

// ==================== 핸들러 ====================

/// GET /api/v1/dashboard
pub async fn dashboard(State(state): State<Arc<AppState>>) -> ApiResult<Json<DashboardResponse>> {
    let (open_positions, closed_positions) = tokio::try_join!(
        state.store.open_positions(),
        state.store.closed_positions()
    )
    .map_err(store_error)?;

    Ok(Json(DashboardResponse {
        open_positions,
        closed_positions,
    }))
}

/// GET /api/v1/positions/open
pub async fn list_open_positions(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<OpenPositionsResponse>> {
    let positions = state.store.open_positions().await.map_err(store_error)?;

    Ok(Json(OpenPositionsResponse {
        total: positions.len(),
        positions,
    }))
}

/// GET /api/v1/positions/closed
pub async fn list_closed_positions(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ClosedPositionsResponse>> {
    let positions = state.store.closed_positions().await.map_err(store_error)?;

    Ok(Json(ClosedPositionsResponse {
        total: positions.len(),
        positions,
    }))
}

// ==================== 라우터 ====================

/// 대시보드 라우터 생성.
pub fn dashboard_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(dashboard))
}

/// 포지션 라우터 생성.
pub fn positions_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/open", get(list_open_positions))
        .route("/closed", get(list_closed_positions))
}
