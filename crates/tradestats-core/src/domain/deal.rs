//! 체결(Deal) 레코드.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{TraderError, TraderResult};

/// 체결의 진입/청산 구분 (터미널 entry 코드).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealEntry {
    /// 0: 포지션 진입
    In,
    /// 1: 포지션 청산
    Out,
    /// 2: 반대 방향 전환 (청산 + 신규)
    InOut,
    /// 3: 반대 포지션으로 청산
    OutBy,
}

impl DealEntry {
    /// 터미널 코드에서 변환합니다.
    pub fn from_code(code: i32) -> TraderResult<Self> {
        match code {
            0 => Ok(DealEntry::In),
            1 => Ok(DealEntry::Out),
            2 => Ok(DealEntry::InOut),
            3 => Ok(DealEntry::OutBy),
            other => Err(TraderError::InvalidInput(format!(
                "unknown deal entry code: {}",
                other
            ))),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            DealEntry::In => 0,
            DealEntry::Out => 1,
            DealEntry::InOut => 2,
            DealEntry::OutBy => 3,
        }
    }

    /// 진입 체결 여부. `In`만 진입으로 취급합니다.
    pub fn is_opening(&self) -> bool {
        matches!(self, DealEntry::In)
    }
}

/// 단일 체결. 여러 체결이 같은 `position_id`를 공유할 수 있습니다 (부분 체결/부분 청산).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub position_id: i64,
    pub symbol: String,
    pub volume: Decimal,
    pub price: Decimal,
    pub swap: Decimal,
    pub profit: Decimal,
    pub fee: Decimal,
    pub entry: DealEntry,
    pub time: DateTime<Utc>,
}
