//! 추세 분류기.
//!
//! 최근 `m`개 바에서 단기 SMA > 장기 SMA 이면서 MACD 히스토그램 > 0 인
//! 바가 과반이면 상승 추세, 반대 조건이 과반이면 하락 추세, 그 외에는 횡보로
//! 분류합니다.
//!
//! 강도는 두 성분의 평균입니다:
//! - 최신 |단기 - 장기| / 장기 괴리율을 5% 기준으로 정규화
//! - 윈도우 내 |히스토그램 기울기|(바당)를 최신 종가의 0.5% 기준으로 정규화

use analyst_core::{DecimalExt, IndicatorSet, PriceSeries, Trend};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// SMA 괴리율 정규화 기준 (5%).
const DIVERGENCE_SCALE: f64 = 0.05;

/// 히스토그램 기울기 정규화 기준 (종가의 0.5% / 바).
const SLOPE_SCALE: f64 = 0.005;

/// 추세 분류 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendAssessment {
    /// 추세 방향
    pub trend: Trend,
    /// 추세 강도 `[0, 1]`
    pub strength: f64,
}

impl TrendAssessment {
    /// 판단할 수 없는 경우의 결과 (횡보, 강도 0).
    pub fn undetermined() -> Self {
        Self {
            trend: Trend::Sideways,
            strength: 0.0,
        }
    }
}

/// 추세 분류기.
#[derive(Debug, Clone, Copy)]
pub struct TrendClassifier {
    window: usize,
}

impl Default for TrendClassifier {
    fn default() -> Self {
        Self { window: 5 }
    }
}

impl TrendClassifier {
    /// 최근 `window`개 바를 보는 분류기를 생성합니다.
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// 지표 집합으로 추세를 분류합니다.
    ///
    /// 윈도우를 채울 만큼 지표 값이 없으면 에러 대신 횡보(강도 0)를 반환합니다.
    pub fn classify(&self, indicators: &IndicatorSet, series: &PriceSeries) -> TrendAssessment {
        let m = self.window;
        let n = series.len();

        let (Some(short), Some(long)) = (indicators.short_sma(), indicators.long_sma()) else {
            return TrendAssessment::undetermined();
        };
        if m == 0 || n < m || short.period == long.period {
            return TrendAssessment::undetermined();
        }

        let macd = &indicators.macd;
        let mut up = 0usize;
        let mut down = 0usize;
        let mut hist_window = Vec::with_capacity(m);

        for bar in n - m..n {
            let hist = bar
                .checked_sub(macd.offset)
                .and_then(|i| macd.histogram.get(i).copied());
            let (Some(s), Some(l), Some(h)) = (short.at(bar), long.at(bar), hist) else {
                return TrendAssessment::undetermined();
            };

            if s > l && h > Decimal::ZERO {
                up += 1;
            } else if s < l && h < Decimal::ZERO {
                down += 1;
            }
            hist_window.push(h);
        }

        let trend = if up * 2 > m {
            Trend::Uptrend
        } else if down * 2 > m {
            Trend::Downtrend
        } else {
            Trend::Sideways
        };

        let latest_short = short.at(n - 1).map(|v| v.to_f64_lossy()).unwrap_or(0.0);
        let latest_long = long.at(n - 1).map(|v| v.to_f64_lossy()).unwrap_or(0.0);
        let close = series.latest().close().to_f64_lossy();

        let divergence = if latest_long > 0.0 {
            ((latest_short - latest_long).abs() / latest_long / DIVERGENCE_SCALE).min(1.0)
        } else {
            0.0
        };

        let slope = match (hist_window.first(), hist_window.last()) {
            (Some(first), Some(last)) if m > 1 && close > 0.0 => {
                let per_bar = (last.to_f64_lossy() - first.to_f64_lossy()).abs() / (m - 1) as f64;
                (per_bar / (close * SLOPE_SCALE)).min(1.0)
            }
            _ => 0.0,
        };

        let strength = ((divergence + slope) / 2.0).clamp(0.0, 1.0);

        trace!(up, down, divergence, slope, "Trend classified");

        TrendAssessment { trend, strength }
    }
}
