//! 기술적 지표 모듈.
//!
//! 종가 시계열에 대한 순수하고 결정적인 지표 계산을 제공합니다.
//!
//! # 지원 지표
//!
//! ## 추세 지표 (Trend Indicators)
//! - **SMA**: 단순 이동평균 (Simple Moving Average)
//! - **EMA**: 지수 이동평균 (Exponential Moving Average)
//! - **MACD**: 이동평균 수렴/확산 (Moving Average Convergence Divergence)
//!
//! ## 모멘텀 지표 (Momentum Indicators)
//! - **RSI**: 상대강도지수 (Relative Strength Index, Wilder 평활)
//!
//! 모든 결과는 가격 시계열의 접미에 정렬된 `LineSeries` / `MacdSeries`입니다.
//!
//! # 사용 예시
//!
//! ```ignore
//! use analyst_analytics::indicators::{IndicatorEngine, SmaParams, RsiParams};
//!
//! let engine = IndicatorEngine::new();
//!
//! // SMA 계산
//! let sma = engine.sma(&closes, SmaParams { period: 20 })?;
//!
//! // RSI 계산
//! let rsi = engine.rsi(&closes, RsiParams { period: 14 })?;
//! ```

pub mod momentum;
pub mod trend;

use analyst_core::{AnalysisConfig, AnalystError, IndicatorSet, LineSeries, MacdSeries};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

pub use momentum::{MomentumCalculator, RsiParams};
pub use trend::{EmaParams, MacdParams, SmaParams, TrendIndicators};

/// 지표 계산 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    /// 데이터 부족 오류
    #[error("데이터가 부족합니다 ({indicator}): 필요 {required}개, 제공 {provided}개")]
    InsufficientData {
        indicator: String,
        required: usize,
        provided: usize,
    },

    /// 잘못된 파라미터
    #[error("잘못된 파라미터 `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl IndicatorError {
    pub(crate) fn insufficient(indicator: String, required: usize, provided: usize) -> Self {
        Self::InsufficientData {
            indicator,
            required,
            provided,
        }
    }

    pub(crate) fn zero_period(name: &str) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: "기간은 0보다 커야 합니다".to_string(),
        }
    }
}

impl From<IndicatorError> for AnalystError {
    fn from(err: IndicatorError) -> Self {
        match err {
            IndicatorError::InsufficientData {
                indicator,
                required,
                provided,
            } => AnalystError::InsufficientData {
                indicator,
                required,
                provided,
            },
            IndicatorError::InvalidParameter { name, reason } => {
                AnalystError::InvalidParameter { name, reason }
            }
        }
    }
}

/// 지표 계산 결과 타입.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

/// 지표 집합 계산 시 평가 단위.
enum Job {
    Sma(usize),
    Rsi,
    Macd,
}

/// 통합 지표 엔진.
///
/// 모든 기술적 지표 계산을 위한 통합 인터페이스를 제공합니다.
#[derive(Debug, Default, Clone, Copy)]
pub struct IndicatorEngine {
    trend: TrendIndicators,
    momentum: MomentumCalculator,
}

impl IndicatorEngine {
    /// 새로운 지표 엔진 생성.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== 추세 지표 ====================

    /// 단순 이동평균 (SMA) 계산.
    ///
    /// # 반환
    /// 인덱스 `period - 1`부터 시작하는 `n - period + 1`개의 값
    pub fn sma(&self, prices: &[Decimal], params: SmaParams) -> IndicatorResult<LineSeries> {
        self.trend.sma(prices, params)
    }

    /// 지수 이동평균 (EMA) 계산.
    ///
    /// # 반환
    /// 첫 `period`개 SMA로 시작하는 `n - period + 1`개의 값
    pub fn ema(&self, prices: &[Decimal], params: EmaParams) -> IndicatorResult<LineSeries> {
        self.trend.ema(prices, params)
    }

    /// MACD (Moving Average Convergence Divergence) 계산.
    ///
    /// # 반환
    /// 같은 길이로 정렬된 MACD 라인, 시그널 라인, 히스토그램
    pub fn macd(&self, prices: &[Decimal], params: MacdParams) -> IndicatorResult<MacdSeries> {
        self.trend.macd(prices, params)
    }

    // ==================== 모멘텀 지표 ====================

    /// RSI (Relative Strength Index) 계산.
    ///
    /// # 반환
    /// 인덱스 `period`부터 시작하는 0-100 사이의 RSI 값들
    pub fn rsi(&self, prices: &[Decimal], params: RsiParams) -> IndicatorResult<LineSeries> {
        self.momentum.rsi(prices, params)
    }

    // ==================== 지표 집합 ====================

    /// 설정에 따라 SMA, RSI, MACD 전체를 계산합니다.
    ///
    /// 필요한 바 개수가 적은 지표부터 평가하므로, 데이터가 부족하면
    /// 충족되지 않은 가장 작은 요구량을 가진 지표가 오류에 담깁니다.
    pub fn compute_set(
        &self,
        prices: &[Decimal],
        config: &AnalysisConfig,
    ) -> IndicatorResult<IndicatorSet> {
        let mut periods = config.sma_periods.clone();
        periods.sort_unstable();
        periods.dedup();

        let macd_params = MacdParams {
            fast_period: config.macd.fast,
            slow_period: config.macd.slow,
            signal_period: config.macd.signal,
        };
        let rsi_params = RsiParams {
            period: config.rsi_period,
        };

        let mut jobs: Vec<(usize, Job)> = periods.iter().map(|&p| (p, Job::Sma(p))).collect();
        jobs.push((rsi_params.required_bars(), Job::Rsi));
        jobs.push((macd_params.required_bars(), Job::Macd));
        jobs.sort_by_key(|(required, _)| *required);

        let mut sma = Vec::with_capacity(periods.len());
        let mut rsi = None;
        let mut macd = None;

        for (_, job) in jobs {
            match job {
                Job::Sma(period) => sma.push(self.sma(prices, SmaParams { period })?),
                Job::Rsi => rsi = Some(self.rsi(prices, rsi_params)?),
                Job::Macd => macd = Some(self.macd(prices, macd_params)?),
            }
        }

        let (Some(rsi), Some(macd)) = (rsi, macd) else {
            return Err(IndicatorError::InvalidParameter {
                name: "indicators".to_string(),
                reason: "RSI와 MACD가 모두 계산되어야 합니다".to_string(),
            });
        };

        sma.sort_by_key(|s| s.period);

        debug!(
            bars = prices.len(),
            indicators = sma.len() + 2,
            "Indicator set computed"
        );

        Ok(IndicatorSet { sma, rsi, macd })
    }
}
