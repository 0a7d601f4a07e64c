//! 지지/저항 가격 레벨.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 레벨 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelKind {
    /// 지지선 (국소 저점 군집)
    Support,
    /// 저항선 (국소 고점 군집)
    Resistance,
}

/// 과거 반전이 군집된 가격 레벨.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    /// 레벨 가격 (군집 평균)
    pub price: Decimal,
    /// 레벨 종류
    pub kind: LevelKind,
    /// 이 레벨에서 가격이 반응한 횟수
    pub strength: usize,
}

impl PriceLevel {
    /// 기준 가격과의 절대 거리.
    pub fn distance_to(&self, price: Decimal) -> Decimal {
        (self.price - price).abs()
    }
}
