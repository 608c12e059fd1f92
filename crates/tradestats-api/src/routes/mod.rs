//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/` - 대시보드로 리다이렉트
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 저장소 연결 확인 (readiness)
//! - `/api/v1/dashboard` - 보유/청산 포지션 전체
//! - `/api/v1/positions` - 보유/청산 포지션 목록
//! - `/api/v1/statistics` - 통계 리포트

pub mod health;
pub mod positions;
pub mod statistics;

pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};
pub use positions::{
    dashboard_router, positions_router, ClosedPositionsResponse, DashboardResponse,
    OpenPositionsResponse,
};
pub use statistics::statistics_router;

use axum::{response::Redirect, routing::get, Router};
use std::sync::Arc;

use crate::state::AppState;

/// API 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(|| async { Redirect::temporary("/api/v1/dashboard") }))
        .nest("/health", health_router())
        .nest("/api/v1/dashboard", dashboard_router())
        .nest("/api/v1/positions", positions_router())
        .nest("/api/v1/statistics", statistics_router())
}
