//! 트레이딩 시그널 생성기.
//!
//! 최신 지표 값만 사용하며, 규칙은 선언 순서대로 평가되고 종류별로 최대 한 번
//! 발생합니다:
//! 1. RSI 과매수 / 과매도
//! 2. MACD 골든 크로스 / 데드 크로스
//! 3. 최근접 저항선 돌파 / 최근접 지지선 이탈

use analyst_core::{IndicatorSet, PriceSeries, SignalKind, TradingSignal};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::levels::DetectedLevels;

/// 시그널 임계값.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SignalThresholds {
    /// RSI 과매수 기준 (기본: 70)
    pub rsi_overbought: Decimal,
    /// RSI 과매도 기준 (기본: 30)
    pub rsi_oversold: Decimal,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            rsi_overbought: dec!(70),
            rsi_oversold: dec!(30),
        }
    }
}

/// 시그널 생성기.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalGenerator {
    thresholds: SignalThresholds,
}

impl SignalGenerator {
    /// 새 시그널 생성기를 생성합니다.
    pub fn new(thresholds: SignalThresholds) -> Self {
        Self { thresholds }
    }

    /// 지표와 탐지된 레벨로부터 시그널을 생성합니다.
    pub fn generate(
        &self,
        indicators: &IndicatorSet,
        series: &PriceSeries,
        levels: &DetectedLevels,
    ) -> Vec<TradingSignal> {
        let mut signals = Vec::new();

        if let Some(rsi) = indicators.rsi.latest() {
            if rsi > self.thresholds.rsi_overbought {
                push_unique(
                    &mut signals,
                    SignalKind::Overbought,
                    format!(
                        "RSI {}가 과매수 기준 {}을 넘었습니다",
                        rsi.round_dp(2),
                        self.thresholds.rsi_overbought
                    ),
                );
            } else if rsi < self.thresholds.rsi_oversold {
                push_unique(
                    &mut signals,
                    SignalKind::Oversold,
                    format!(
                        "RSI {}가 과매도 기준 {} 아래입니다",
                        rsi.round_dp(2),
                        self.thresholds.rsi_oversold
                    ),
                );
            }
        }

        if let (Some(prev), Some(latest)) = (indicators.macd.previous(), indicators.macd.latest())
        {
            if prev.macd <= prev.signal && latest.macd > latest.signal {
                push_unique(
                    &mut signals,
                    SignalKind::GoldenCross,
                    "MACD가 시그널 라인을 상향 돌파했습니다 (골든 크로스)",
                );
            } else if prev.macd >= prev.signal && latest.macd < latest.signal {
                push_unique(
                    &mut signals,
                    SignalKind::DeathCross,
                    "MACD가 시그널 라인을 하향 돌파했습니다 (데드 크로스)",
                );
            }
        }

        let close = series.latest().close();

        if let Some(resistance) = levels.nearest_resistance(close) {
            if close > resistance.price {
                push_unique(
                    &mut signals,
                    SignalKind::Breakout,
                    format!(
                        "종가 {}가 저항선 {}을 돌파했습니다",
                        close,
                        resistance.price.round_dp(2)
                    ),
                );
            }
        }

        if let Some(support) = levels.nearest_support(close) {
            if close < support.price {
                push_unique(
                    &mut signals,
                    SignalKind::Breakdown,
                    format!(
                        "종가 {}가 지지선 {} 아래로 이탈했습니다",
                        close,
                        support.price.round_dp(2)
                    ),
                );
            }
        }

        signals
    }
}

fn push_unique(signals: &mut Vec<TradingSignal>, kind: SignalKind, description: impl Into<String>) {
    if signals.iter().all(|s| s.kind != kind) {
        signals.push(TradingSignal::new(kind, description));
    }
}
