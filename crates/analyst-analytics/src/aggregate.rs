//! 종목 분석 집계.
//!
//! 지표 계산, 추세 분류, 레벨 탐지, 시그널 생성을 하나의 불변
//! `AnalysisResult`로 묶는 단일 진입점입니다.
//!
//! # 사용 예시
//!
//! ```ignore
//! use analyst_analytics::StockAnalysis;
//! use analyst_core::AnalysisConfig;
//!
//! let mut analysis = StockAnalysis::new(&series, AnalysisConfig::default());
//! let result = analysis.analyze()?;
//! println!("{} ({})", result.trend, result.recommendation);
//! ```

use analyst_core::{
    AnalysisConfig, AnalysisResult, AnalystError, AnalystResult, IndicatorSet, PriceSeries,
    Recommendation, Trend,
};
use rust_decimal::Decimal;
use tracing::debug;

use crate::indicators::IndicatorEngine;
use crate::levels::{LevelDetector, LevelParams};
use crate::signals::{SignalGenerator, SignalThresholds};
use crate::trend_classifier::TrendClassifier;

/// 빌린 가격 시계열에 대한 분석.
///
/// 지표 집합은 처음 필요할 때 한 번만 계산되고, `analyze()` 결과는 캐시되어
/// 같은 인스턴스에서 반복 호출하면 동일한 결과를 반환합니다.
#[derive(Debug)]
pub struct StockAnalysis<'a> {
    series: &'a PriceSeries,
    config: AnalysisConfig,
    engine: IndicatorEngine,
    indicators: Option<IndicatorSet>,
    result: Option<AnalysisResult>,
}

impl<'a> StockAnalysis<'a> {
    /// 새 분석을 생성합니다. 계산은 `indicators()` / `analyze()` 호출 시점에 수행됩니다.
    pub fn new(series: &'a PriceSeries, config: AnalysisConfig) -> Self {
        Self {
            series,
            config,
            engine: IndicatorEngine::new(),
            indicators: None,
            result: None,
        }
    }

    /// 분석 대상 시계열.
    pub fn series(&self) -> &'a PriceSeries {
        self.series
    }

    /// 분석 설정.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// 지표 집합을 반환합니다 (필요하면 계산).
    ///
    /// # Errors
    ///
    /// - `InvalidParameter`: 설정이 유효하지 않은 경우
    /// - `InsufficientData`: 바 개수가 지표 워밍업보다 적은 경우
    pub fn indicators(&mut self) -> AnalystResult<&IndicatorSet> {
        let set = match self.indicators.take() {
            Some(set) => set,
            None => self.compute_indicators()?,
        };
        Ok(self.indicators.insert(set))
    }

    /// 분석을 수행하고 결과를 반환합니다.
    ///
    /// 같은 인스턴스에서 다시 호출하면 캐시된 결과를 반환합니다.
    pub fn analyze(&mut self) -> AnalystResult<&AnalysisResult> {
        let result = match self.result.take() {
            Some(result) => result,
            None => {
                let indicators = match self.indicators.take() {
                    Some(set) => set,
                    None => self.compute_indicators()?,
                };
                let indicators = self.indicators.insert(indicators);
                let result = build_result(self.series, &self.config, indicators)?;

                debug!(
                    symbol = %self.series.symbol(),
                    trend = %result.trend,
                    strength = result.trend_strength,
                    signals = result.signals.len(),
                    recommendation = %result.recommendation,
                    "Analysis completed"
                );
                result
            }
        };
        Ok(self.result.insert(result))
    }

    fn compute_indicators(&self) -> AnalystResult<IndicatorSet> {
        let _span = analyst_core::analysis_span!(
            "compute_indicators",
            self.series.symbol(),
            self.series.len()
        )
        .entered();

        self.config.validate()?;
        debug!(min_bars = self.config.min_bars(), "Computing indicator set");
        Ok(self
            .engine
            .compute_set(&self.series.closes(), &self.config)?)
    }
}

fn build_result(
    series: &PriceSeries,
    config: &AnalysisConfig,
    indicators: &IndicatorSet,
) -> AnalystResult<AnalysisResult> {
    let assessment = TrendClassifier::new(config.trend_window).classify(indicators, series);

    let levels = LevelDetector::new(LevelParams {
        window: config.level_window,
        top_k: config.level_top_k,
        tolerance: to_decimal("level_tolerance", config.level_tolerance)?,
    })
    .detect(series);

    let signals = SignalGenerator::new(SignalThresholds {
        rsi_overbought: to_decimal("rsi_overbought", config.rsi_overbought)?,
        rsi_oversold: to_decimal("rsi_oversold", config.rsi_oversold)?,
    })
    .generate(indicators, series, &levels);

    let mut score: i32 = signals
        .iter()
        .map(|s| {
            if s.is_bullish() {
                1
            } else if s.is_bearish() {
                -1
            } else {
                0
            }
        })
        .sum();
    score += match assessment.trend {
        Trend::Uptrend => 1,
        Trend::Downtrend => -1,
        Trend::Sideways => 0,
    };

    Ok(AnalysisResult {
        trend: assessment.trend,
        trend_strength: assessment.strength,
        support_levels: levels.support,
        resistance_levels: levels.resistance,
        signals,
        recommendation: Recommendation::from_score(score),
    })
}

fn to_decimal(name: &str, value: f64) -> AnalystResult<Decimal> {
    Decimal::try_from(value).map_err(|e| AnalystError::invalid_parameter(name, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyst_core::PriceBar;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn flat_series(n: usize) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let bars = (0..n)
            .map(|i| {
                PriceBar::new(
                    start + Duration::days(i as i64),
                    dec!(100),
                    dec!(100),
                    dec!(100),
                    dec!(100),
                    dec!(1000),
                )
                .unwrap()
            })
            .collect();
        PriceSeries::new("FLAT", bars).unwrap()
    }

    #[test]
    fn test_analyze_is_cached() {
        let series = flat_series(40);
        let mut analysis = StockAnalysis::new(&series, AnalysisConfig::default());

        let first = analysis.analyze().unwrap().clone();
        let second = analysis.analyze().unwrap().clone();

        assert_eq!(first, second);
        assert_eq!(first.recommendation, Recommendation::Hold);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let series = flat_series(40);
        let config = AnalysisConfig {
            sma_periods: vec![20],
            ..AnalysisConfig::default()
        };

        let err = StockAnalysis::new(&series, config).analyze().unwrap_err();
        assert!(matches!(err, AnalystError::InvalidParameter { ref name, .. } if name == "sma_periods"));
    }

    #[test]
    fn test_indicators_before_analyze() {
        let series = flat_series(40);
        let mut analysis = StockAnalysis::new(&series, AnalysisConfig::default());

        let names = analysis.indicators().unwrap().names();
        assert_eq!(names, vec!["SMA(10)", "SMA(20)", "RSI(14)", "MACD(12,26,9)"]);

        assert!(analysis.analyze().is_ok());
    }
}
