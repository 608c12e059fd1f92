//! 계좌 성과 통계 엔진.
//!
//! 원본 체결/스냅샷 데이터를 대시보드가 소비하는 통계로 변환합니다.
//!
//! # 모듈 구성
//!
//! - [`session`]: UTC 시각 → 트레이딩 세션 분류
//! - [`positions`]: 부분 체결 Deal → 청산 포지션 집계
//! - [`equity_curve`]: 스냅샷 → 일별 연속 자산 곡선 (forward-fill)
//! - [`buckets`]: 요일/세션/월/연도별 승률 집계
//! - [`report`]: 위 결과를 하나의 통계 응답으로 조합
//!
//! 모든 계산은 입력만으로 결정되는 순수 함수이며, 요청마다 처음부터 다시 계산합니다.

pub mod buckets;
pub mod equity_curve;
pub mod positions;
pub mod report;
pub mod session;

pub use buckets::{
    aggregate_buckets, BucketKey, BucketStat, BucketTable, ByMonth, BySession, ByWeekday, ByYear,
    Dimension, Year, MONTHS,
};
pub use equity_curve::{DailyEquityCurve, DailyEquityPoint};
pub use positions::aggregate_deals;
pub use report::StatisticsReport;
pub use session::{classify_hour, session_of};
