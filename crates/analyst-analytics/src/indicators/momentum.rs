//! 모멘텀 지표 (Momentum Indicators).
//!
//! 가격 모멘텀과 과매수/과매도 상태를 측정하는 지표를 제공합니다.
//! - RSI (Relative Strength Index)

use analyst_core::{LineKind, LineSeries};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// RSI 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RsiParams {
    /// RSI 기간 (기본: 14).
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl RsiParams {
    /// 계산에 필요한 최소 바 개수 (`period + 1`).
    pub fn required_bars(&self) -> usize {
        self.period + 1
    }
}

/// 모멘텀 지표 계산기.
#[derive(Debug, Default, Clone, Copy)]
pub struct MomentumCalculator;

impl MomentumCalculator {
    /// 새로운 모멘텀 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// RSI (Relative Strength Index) 계산.
    ///
    /// RSI = 100 - (100 / (1 + RS))
    /// RS = 평균 상승폭 / 평균 하락폭
    ///
    /// 평균은 Wilder 평활을 사용합니다. 첫 평균은 처음 `period`개 변화량의
    /// 단순 평균이고, 이후 `avg = (prev × (period - 1) + 현재) / period`입니다.
    ///
    /// - 평균 하락폭이 0이면 100
    /// - 평균 상승폭과 하락폭이 모두 0이면 (가격 변화 없음) 50
    pub fn rsi(&self, prices: &[Decimal], params: RsiParams) -> IndicatorResult<LineSeries> {
        let period = params.period;

        if period == 0 {
            return Err(IndicatorError::zero_period("rsi_period"));
        }

        if prices.len() < params.required_bars() {
            return Err(IndicatorError::insufficient(
                format!("RSI({})", period),
                params.required_bars(),
                prices.len(),
            ));
        }

        // 상승/하락 분리
        let (gains, losses): (Vec<Decimal>, Vec<Decimal>) = prices
            .windows(2)
            .map(|pair| {
                let delta = pair[1] - pair[0];
                if delta > Decimal::ZERO {
                    (delta, Decimal::ZERO)
                } else {
                    (Decimal::ZERO, delta.abs())
                }
            })
            .unzip();

        let period_decimal = Decimal::from(period);
        let mut avg_gain = gains[..period].iter().sum::<Decimal>() / period_decimal;
        let mut avg_loss = losses[..period].iter().sum::<Decimal>() / period_decimal;

        let mut values = Vec::with_capacity(prices.len() - period);
        values.push(rsi_value(avg_gain, avg_loss));

        let prev_weight = Decimal::from(period - 1);
        for (gain, loss) in gains[period..].iter().zip(&losses[period..]) {
            avg_gain = (avg_gain * prev_weight + *gain) / period_decimal;
            avg_loss = (avg_loss * prev_weight + *loss) / period_decimal;
            values.push(rsi_value(avg_gain, avg_loss));
        }

        Ok(LineSeries {
            kind: LineKind::Rsi,
            period,
            offset: period,
            values,
        })
    }
}

fn rsi_value(avg_gain: Decimal, avg_loss: Decimal) -> Decimal {
    if avg_loss.is_zero() {
        return if avg_gain.is_zero() { dec!(50) } else { dec!(100) };
    }

    let rs = avg_gain / avg_loss;
    let rsi = dec!(100) - dec!(100) / (Decimal::ONE + rs);
    rsi.clamp(Decimal::ZERO, dec!(100))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_prices() -> Vec<Decimal> {
        vec![
            dec!(44.34),
            dec!(44.09),
            dec!(44.15),
            dec!(43.61),
            dec!(44.33),
            dec!(44.83),
            dec!(45.10),
            dec!(45.42),
            dec!(45.84),
            dec!(46.08),
            dec!(45.89),
            dec!(46.03),
            dec!(45.61),
            dec!(46.28),
            dec!(46.28),
            dec!(46.00),
            dec!(46.03),
            dec!(46.41),
            dec!(46.22),
            dec!(45.64),
        ]
    }

    #[test]
    fn test_rsi_alignment_and_range() {
        let calc = MomentumCalculator::new();
        let prices = sample_prices();

        let rsi = calc.rsi(&prices, RsiParams::default()).unwrap();

        assert_eq!(rsi.offset, 14);
        assert_eq!(rsi.len(), prices.len() - 14);
        for value in &rsi.values {
            assert!(*value >= Decimal::ZERO && *value <= dec!(100));
        }
        // 상승 우위 구간
        assert!(rsi.values[0] > dec!(50));
    }

    #[test]
    fn test_rsi_degenerate_cases() {
        let calc = MomentumCalculator::new();

        let flat = vec![dec!(100); 20];
        let rsi = calc.rsi(&flat, RsiParams::default()).unwrap();
        assert!(rsi.values.iter().all(|v| *v == dec!(50)));

        let rising: Vec<Decimal> = (1..=20).map(Decimal::from).collect();
        let rsi = calc.rsi(&rising, RsiParams::default()).unwrap();
        assert!(rsi.values.iter().all(|v| *v == dec!(100)));

        let falling: Vec<Decimal> = (1..=20).rev().map(Decimal::from).collect();
        let rsi = calc.rsi(&falling, RsiParams::default()).unwrap();
        assert!(rsi.values.iter().all(|v| *v == Decimal::ZERO));
    }

    #[test]
    fn test_rsi_requires_period_plus_one() {
        let calc = MomentumCalculator::new();
        let prices = vec![dec!(1); 14];

        let err = calc.rsi(&prices, RsiParams::default()).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::InsufficientData {
                indicator: "RSI(14)".to_string(),
                required: 15,
                provided: 14,
            }
        );
    }
}
