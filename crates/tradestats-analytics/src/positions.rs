//! 체결 → 청산 포지션 집계.
//!
//! 하나의 포지션은 여러 부분 체결/부분 청산 Deal로 구성될 수 있습니다.
//! 같은 `position_id`를 가진 Deal을 모아 하나의 [`AggregatedPosition`]으로 합칩니다.
//!
//! # 규칙
//!
//! - 진입(`DealEntry::In`) Deal 중 가장 이른 것이 진입 기준입니다. 같은 시각이면 입력 순서상 먼저 나온 Deal.
//! - 청산 가격은 가장 늦은 Deal의 가격입니다. 같은 시각이면 입력 순서상 나중에 나온 Deal.
//! - 청산 Deal이 하나도 없는 그룹(아직 보유 중인 포지션, 입출금 등)은 결과에서 제외합니다.
//! - 결과는 `position_id` 오름차순입니다.

use chrono::Datelike;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, warn};
use tradestats_core::{AggregatedPosition, Deal, TradingWeekday};

use crate::session::session_of;

/// Deal 목록을 청산 포지션 목록으로 집계합니다.
///
/// 같은 입력에 대해 항상 같은 결과를 반환합니다.
pub fn aggregate_deals(deals: &[Deal]) -> Vec<AggregatedPosition> {
    let groups = deals.iter().fold(
        BTreeMap::<i64, Vec<&Deal>>::new(),
        |mut groups, deal| {
            groups.entry(deal.position_id).or_default().push(deal);
            groups
        },
    );

    let total_groups = groups.len();
    let positions: Vec<AggregatedPosition> = groups
        .into_iter()
        .filter_map(|(position_id, group)| aggregate_group(position_id, &group))
        .collect();

    debug!(
        deals = deals.len(),
        groups = total_groups,
        closed = positions.len(),
        skipped = total_groups - positions.len(),
        "Deals aggregated into closed positions"
    );

    positions
}

fn aggregate_group(position_id: i64, group: &[&Deal]) -> Option<AggregatedPosition> {
    let time_close = group
        .iter()
        .filter(|deal| !deal.entry.is_opening())
        .map(|deal| deal.time)
        .max()?;

    let first = group.first()?;
    let last = group.iter().max_by_key(|deal| deal.time)?;
    let open = group
        .iter()
        .filter(|deal| deal.entry.is_opening())
        .min_by_key(|deal| deal.time);

    let sum = |field: fn(&Deal) -> Decimal| -> Decimal { group.iter().map(|d| field(d)).sum() };

    let time_open = open.map(|deal| deal.time);
    let weekday = time_open.and_then(|time| {
        let weekday = TradingWeekday::from_weekday(time.weekday());
        if weekday.is_none() {
            warn!(
                position_id,
                time_open = %time,
                "Position opened on a weekend; excluded from weekday statistics"
            );
        }
        weekday
    });

    Some(AggregatedPosition {
        position_id,
        symbol: first.symbol.clone(),
        volume: sum(|d| d.volume),
        open_price: open.map(|deal| deal.price),
        close_price: last.price,
        profit: sum(|d| d.profit),
        swap: sum(|d| d.swap),
        fee: sum(|d| d.fee),
        time_open,
        time_close,
        weekday,
        session: time_open.map(session_of),
    })
}
