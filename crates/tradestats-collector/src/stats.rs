//! 수집 통계 구조체.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 한 수집 주기의 통계
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestStats {
    /// 내보내기 파일의 체결 수
    pub deals: usize,
    /// 저장된 보유 포지션 수
    pub open_positions: usize,
    /// 집계된 청산 포지션 수
    pub closed_positions: usize,
    /// 청산 체결이 없어 제외된 포지션 그룹 수
    pub skipped_groups: usize,
    /// 진입 체결이 없는 청산 포지션 수
    pub missing_open: usize,
    /// 데이터베이스에 반영된 행 수
    pub rows_written: u64,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl IngestStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            deals = self.deals,
            open_positions = self.open_positions,
            closed_positions = self.closed_positions,
            skipped_groups = self.skipped_groups,
            missing_open = self.missing_open,
            rows_written = self.rows_written,
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "수집 완료"
        );
    }
}
