//! 계좌 통계를 위한 도메인 모델.

mod account;
mod calendar;
mod deal;
mod integrity;
mod position;
mod store;

pub use account::*;
pub use calendar::*;
pub use deal::*;
pub use integrity::*;
pub use position::*;
pub use store::*;
