//! 데이터 무결성 경고.
//!
//! 기준 라벨 집합 밖으로 벗어난 값은 에러로 중단하지 않고 경고로 리포트에 실어 보냅니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 집계 중 발견된 데이터 무결성 문제.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataIntegrityWarning {
    /// 주말에 진입한 포지션 (요일 통계에서 제외됨)
    WeekendOpen {
        position_id: i64,
        time_open: DateTime<Utc>,
    },
    /// 알 수 없는 계좌 거래 모드 코드 ("Unknown"으로 표시됨)
    UnmappedTradeMode { code: i32 },
}

impl fmt::Display for DataIntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataIntegrityWarning::WeekendOpen {
                position_id,
                time_open,
            } => write!(
                f,
                "position {} opened on a weekend ({})",
                position_id,
                time_open.format("%Y-%m-%d %H:%M:%S")
            ),
            DataIntegrityWarning::UnmappedTradeMode { code } => {
                write!(f, "unmapped account trade mode code {}", code)
            }
        }
    }
}
