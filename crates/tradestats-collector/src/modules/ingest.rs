//! 내보내기 파일 가져오기.
//!
//! 파일 읽기 → 도메인 변환 → 체결 집계 → 단일 트랜잭션 저장 순으로 처리합니다.
//! 어느 단계에서든 실패하면 해당 주기는 아무것도 쓰지 않습니다.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;
use tracing::{info, instrument};
use tradestats_analytics::aggregate_deals;
use tradestats_data::{PgTradeStore, RefreshCycle};

use super::payload::TerminalExport;
use crate::error::{CollectorError, Result};
use crate::stats::IngestStats;

/// 내보내기 파일을 읽고 파싱합니다.
pub async fn load_export(path: &Path) -> Result<TerminalExport> {
    let json = tokio::fs::read_to_string(path).await.map_err(|e| {
        CollectorError::DataSource(format!("cannot read {}: {}", path.display(), e))
    })?;

    Ok(TerminalExport::parse(&json)?)
}

/// 내보내기 문서를 저장할 주기 데이터로 변환합니다.
pub fn build_cycle(
    export: TerminalExport,
    now: DateTime<Utc>,
) -> Result<(RefreshCycle, IngestStats)> {
    let records = export.into_records(now)?;

    let closed_positions = aggregate_deals(&records.deals);
    let groups = records
        .deals
        .iter()
        .map(|deal| deal.position_id)
        .collect::<HashSet<_>>()
        .len();

    let stats = IngestStats {
        deals: records.deals.len(),
        open_positions: records.open_positions.len(),
        closed_positions: closed_positions.len(),
        skipped_groups: groups - closed_positions.len(),
        missing_open: closed_positions
            .iter()
            .filter(|p| p.time_open.is_none())
            .count(),
        ..IngestStats::new()
    };

    let cycle = RefreshCycle {
        open_positions: records.open_positions,
        closed_positions,
        account: records.account,
    };

    Ok((cycle, stats))
}

/// 파일 하나를 가져와 저장합니다.
#[instrument(skip(store, path), fields(path = %path.display()))]
pub async fn ingest_file(store: &PgTradeStore, path: &Path) -> Result<IngestStats> {
    let started = Instant::now();

    let export = load_export(path).await?;
    let (cycle, mut stats) = build_cycle(export, Utc::now())?;

    info!(
        deals = stats.deals,
        closed = stats.closed_positions,
        "Export parsed, writing refresh cycle"
    );

    let summary = store.write_cycle(&cycle).await?;
    stats.rows_written =
        summary.open_positions + summary.closed_positions + summary.account_snapshots;
    stats.elapsed = started.elapsed();

    Ok(stats)
}
