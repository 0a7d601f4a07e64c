//! 지지/저항 레벨 탐지.
//!
//! 대칭 윈도우 `[i - w, i + w]` 안에서 저가의 국소 최소값을 지지 후보로,
//! 고가의 국소 최대값을 저항 후보로 수집한 뒤, 상대 허용 오차 안에 있는
//! 후보들을 하나의 레벨로 묶습니다.
//!
//! - 레벨 가격 = 군집 평균
//! - 레벨 강도 = 군집에 포함된 터치 횟수
//! - 강도 내림차순, 동률이면 최신 종가에 가까운 순으로 상위 `k`개

use std::cmp::Reverse;

use analyst_core::{LevelKind, PriceLevel, PriceSeries};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// 레벨 탐지 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LevelParams {
    /// 국소 극값 판정 반경 `w` (윈도우 크기 = 2w + 1).
    pub window: usize,
    /// 종류별 최대 레벨 개수.
    pub top_k: usize,
    /// 군집 상대 허용 오차 (0.01 = 1%).
    pub tolerance: Decimal,
}

impl Default for LevelParams {
    fn default() -> Self {
        Self {
            window: 5,
            top_k: 3,
            tolerance: Decimal::new(1, 2),
        }
    }
}

/// 탐지된 지지/저항 레벨 (각각 강한 순).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedLevels {
    /// 지지선
    pub support: Vec<PriceLevel>,
    /// 저항선
    pub resistance: Vec<PriceLevel>,
}

impl DetectedLevels {
    /// 최신 종가에 가장 가까운 지지선.
    pub fn nearest_support(&self, price: Decimal) -> Option<&PriceLevel> {
        nearest(&self.support, price)
    }

    /// 최신 종가에 가장 가까운 저항선.
    pub fn nearest_resistance(&self, price: Decimal) -> Option<&PriceLevel> {
        nearest(&self.resistance, price)
    }
}

fn nearest(levels: &[PriceLevel], price: Decimal) -> Option<&PriceLevel> {
    levels.iter().min_by_key(|level| level.distance_to(price))
}

/// 지지/저항 레벨 탐지기.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelDetector {
    params: LevelParams,
}

impl LevelDetector {
    /// 새 탐지기를 생성합니다.
    pub fn new(params: LevelParams) -> Self {
        Self { params }
    }

    /// 시계열에서 지지/저항 레벨을 탐지합니다.
    ///
    /// 시계열이 `2w + 1`보다 짧으면 빈 목록을 반환합니다.
    pub fn detect(&self, series: &PriceSeries) -> DetectedLevels {
        let latest_close = series.latest().close();

        let support_candidates = local_extrema(&series.lows(), self.params.window, |c, o| c <= o);
        let resistance_candidates =
            local_extrema(&series.highs(), self.params.window, |c, o| c >= o);

        trace!(
            support = support_candidates.len(),
            resistance = resistance_candidates.len(),
            "Level candidates collected"
        );

        DetectedLevels {
            support: self.rank(
                cluster(support_candidates, self.params.tolerance, LevelKind::Support),
                latest_close,
            ),
            resistance: self.rank(
                cluster(
                    resistance_candidates,
                    self.params.tolerance,
                    LevelKind::Resistance,
                ),
                latest_close,
            ),
        }
    }

    fn rank(&self, mut levels: Vec<PriceLevel>, latest_close: Decimal) -> Vec<PriceLevel> {
        levels.sort_by_key(|level| (Reverse(level.strength), level.distance_to(latest_close)));
        levels.truncate(self.params.top_k);
        levels
    }
}

/// 윈도우 전체에서 `keep(current, other)`가 성립하는 위치의 값을 수집합니다.
fn local_extrema<F>(values: &[Decimal], window: usize, keep: F) -> Vec<Decimal>
where
    F: Fn(Decimal, Decimal) -> bool,
{
    if values.len() < 2 * window + 1 {
        return Vec::new();
    }

    (window..values.len() - window)
        .filter(|&i| {
            values[i - window..=i + window]
                .iter()
                .all(|&other| keep(values[i], other))
        })
        .map(|i| values[i])
        .collect()
}

/// 정렬된 후보를 군집 평균 대비 상대 허용 오차로 묶습니다.
fn cluster(mut candidates: Vec<Decimal>, tolerance: Decimal, kind: LevelKind) -> Vec<PriceLevel> {
    candidates.sort();

    let mut levels = Vec::new();
    let mut sum = Decimal::ZERO;
    let mut count = 0usize;

    for price in candidates {
        if count > 0 {
            let mean = sum / Decimal::from(count);
            if (price - mean).abs() > mean.abs() * tolerance {
                levels.push(PriceLevel {
                    price: mean,
                    kind,
                    strength: count,
                });
                sum = Decimal::ZERO;
                count = 0;
            }
        }
        sum += price;
        count += 1;
    }

    if count > 0 {
        levels.push(PriceLevel {
            price: sum / Decimal::from(count),
            kind,
            strength: count,
        });
    }

    levels
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyst_core::PriceBar;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn series_from_closes(closes: &[Decimal]) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                PriceBar::new(start + Duration::days(i as i64), c, c, c, c, dec!(1000)).unwrap()
            })
            .collect();
        PriceSeries::new("TEST", bars).unwrap()
    }

    #[test]
    fn test_cluster_groups_within_tolerance() {
        let levels = cluster(
            vec![dec!(100), dec!(100.5), dec!(110), dec!(99.8)],
            dec!(0.01),
            LevelKind::Support,
        );

        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].strength, 3);
        assert_eq!(levels[0].price, (dec!(99.8) + dec!(100) + dec!(100.5)) / dec!(3));
        assert_eq!(levels[1].price, dec!(110));
        assert_eq!(levels[1].strength, 1);
    }

    #[test]
    fn test_short_series_yields_no_levels() {
        let detector = LevelDetector::new(LevelParams {
            window: 5,
            ..LevelParams::default()
        });
        let series = series_from_closes(&[dec!(1); 10]);

        assert_eq!(detector.detect(&series), DetectedLevels::default());
    }

    #[test]
    fn test_detects_repeated_swings() {
        // 90 부근 저점 2회, 110 부근 고점 2회
        let closes = [
            dec!(100), dec!(95), dec!(90), dec!(95), dec!(100), dec!(105), dec!(110),
            dec!(105), dec!(100), dec!(95), dec!(90.5), dec!(95), dec!(100), dec!(105),
            dec!(110.5), dec!(105), dec!(100),
        ];
        let detector = LevelDetector::new(LevelParams {
            window: 2,
            top_k: 3,
            tolerance: dec!(0.01),
        });

        let levels = detector.detect(&series_from_closes(&closes));

        assert_eq!(levels.support.len(), 1);
        assert_eq!(levels.support[0].strength, 2);
        assert_eq!(levels.support[0].price, dec!(90.25));
        assert_eq!(levels.resistance.len(), 1);
        assert_eq!(levels.resistance[0].price, dec!(110.25));
        assert_eq!(levels.nearest_resistance(dec!(100)).unwrap().strength, 2);
    }

    #[test]
    fn test_rank_prefers_strength_then_proximity() {
        let detector = LevelDetector::new(LevelParams {
            top_k: 2,
            ..LevelParams::default()
        });
        let level = |price, strength| PriceLevel {
            price,
            kind: LevelKind::Resistance,
            strength,
        };

        let ranked = detector.rank(
            vec![level(dec!(120), 1), level(dec!(130), 3), level(dec!(105), 1)],
            dec!(100),
        );

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].price, dec!(130));
        assert_eq!(ranked[1].price, dec!(105));
    }
}
