//! 추세 지표 (Trend Indicators).
//!
//! 이동평균 기반의 추세 지표들을 제공합니다.
//! - SMA (Simple Moving Average)
//! - EMA (Exponential Moving Average)
//! - MACD (Moving Average Convergence Divergence)

use analyst_core::{LineKind, LineSeries, MacdSeries};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// SMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for SmaParams {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// EMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for EmaParams {
    fn default() -> Self {
        Self { period: 12 }
    }
}

/// MACD 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdParams {
    /// 단기 EMA 기간 (기본: 12).
    pub fast_period: usize,
    /// 장기 EMA 기간 (기본: 26).
    pub slow_period: usize,
    /// 시그널 라인 기간 (기본: 9).
    pub signal_period: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

impl MacdParams {
    /// 계산에 필요한 최소 바 개수 (`slow + signal`).
    pub fn required_bars(&self) -> usize {
        self.slow_period + self.signal_period
    }

    fn name(&self) -> String {
        format!(
            "MACD({},{},{})",
            self.fast_period, self.slow_period, self.signal_period
        )
    }
}

/// 추세 지표 계산기.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrendIndicators;

impl TrendIndicators {
    /// 새로운 추세 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 단순 이동평균 (SMA) 계산.
    ///
    /// SMA = (P1 + P2 + ... + Pn) / n
    pub fn sma(&self, prices: &[Decimal], params: SmaParams) -> IndicatorResult<LineSeries> {
        let period = params.period;

        if period == 0 {
            return Err(IndicatorError::zero_period("sma_period"));
        }

        if prices.len() < period {
            return Err(IndicatorError::insufficient(
                format!("SMA({})", period),
                period,
                prices.len(),
            ));
        }

        let period_decimal = Decimal::from(period);
        let values = prices
            .windows(period)
            .map(|window| window.iter().sum::<Decimal>() / period_decimal)
            .collect();

        Ok(LineSeries {
            kind: LineKind::Sma,
            period,
            offset: period - 1,
            values,
        })
    }

    /// 지수 이동평균 (EMA) 계산.
    ///
    /// EMA = 이전 EMA + k × (현재가 - 이전 EMA)
    /// k = 2 / (period + 1)
    pub fn ema(&self, prices: &[Decimal], params: EmaParams) -> IndicatorResult<LineSeries> {
        let period = params.period;

        if period == 0 {
            return Err(IndicatorError::zero_period("ema_period"));
        }

        if prices.len() < period {
            return Err(IndicatorError::insufficient(
                format!("EMA({})", period),
                period,
                prices.len(),
            ));
        }

        Ok(LineSeries {
            kind: LineKind::Ema,
            period,
            offset: period - 1,
            values: ema_values(prices, period),
        })
    }

    /// MACD 계산.
    ///
    /// MACD 라인 = 단기 EMA - 장기 EMA
    /// 시그널 라인 = MACD 라인의 EMA
    /// 히스토그램 = MACD 라인 - 시그널 라인
    ///
    /// 세 시계열은 모두 바 인덱스 `slow + signal - 2`부터 정렬됩니다.
    pub fn macd(&self, prices: &[Decimal], params: MacdParams) -> IndicatorResult<MacdSeries> {
        let MacdParams {
            fast_period: fast,
            slow_period: slow,
            signal_period: signal,
        } = params;

        for (name, value) in [
            ("macd.fast", fast),
            ("macd.slow", slow),
            ("macd.signal", signal),
        ] {
            if value == 0 {
                return Err(IndicatorError::zero_period(name));
            }
        }

        if fast >= slow {
            return Err(IndicatorError::InvalidParameter {
                name: "macd.fast".to_string(),
                reason: format!(
                    "단기 기간({})은 장기 기간({})보다 작아야 합니다",
                    fast, slow
                ),
            });
        }

        let required = params.required_bars();
        if prices.len() < required {
            return Err(IndicatorError::insufficient(
                params.name(),
                required,
                prices.len(),
            ));
        }

        let fast_ema = ema_values(prices, fast);
        let slow_ema = ema_values(prices, slow);

        // 장기 EMA 시작 시점(slow - 1)에 단기 EMA를 맞춘다
        let skip = slow - fast;
        let macd_line: Vec<Decimal> = slow_ema
            .iter()
            .zip(&fast_ema[skip..])
            .map(|(slow_value, fast_value)| *fast_value - *slow_value)
            .collect();

        let signal_line = ema_values(&macd_line, signal);
        let macd: Vec<Decimal> = macd_line[signal - 1..].to_vec();
        let histogram = macd
            .iter()
            .zip(&signal_line)
            .map(|(m, s)| *m - *s)
            .collect();

        Ok(MacdSeries {
            fast_period: fast,
            slow_period: slow,
            signal_period: signal,
            offset: slow + signal - 2,
            macd,
            signal: signal_line,
            histogram,
        })
    }
}

/// 첫 `period`개 값의 SMA로 시작하는 EMA 값 (`len - period + 1`개).
///
/// 호출자가 `0 < period <= values.len()`을 보장해야 합니다.
pub(crate) fn ema_values(values: &[Decimal], period: usize) -> Vec<Decimal> {
    let multiplier = dec!(2) / Decimal::from(period + 1);

    let seed = values[..period].iter().sum::<Decimal>() / Decimal::from(period);
    let mut result = Vec::with_capacity(values.len() - period + 1);
    result.push(seed);

    let mut prev = seed;
    for value in &values[period..] {
        prev += multiplier * (*value - prev);
        result.push(prev);
    }

    result
}
