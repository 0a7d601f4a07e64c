//! 분석 오케스트레이션 서비스.
//!
//! 시장 데이터 조회, 분석 집계, 내러티브 생성을 하나의 보고서로 묶습니다.
//!
//! # 실패 정책
//!
//! - 시장 데이터 조회 실패(`DataUnavailable`)와 분석 실패는 그대로 전파합니다.
//! - 내러티브 생성 실패와 제한 시간 초과는 경고 로그를 남기고 `narrative: None`으로
//!   보고서를 반환합니다.

use std::sync::Arc;
use std::time::Duration;

use analyst_core::{
    AnalysisConfig, AnalysisReport, AnalystError, AnalystResult, IndicatorSet,
    MarketDataProvider, NarrativeGenerator, PriceBar, PriceSeries,
};
use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::aggregate::StockAnalysis;

/// 종목 분석 서비스.
pub struct AnalysisService {
    market_data: Arc<dyn MarketDataProvider>,
    narrator: Option<Arc<dyn NarrativeGenerator>>,
    narrative_timeout: Option<Duration>,
    config: AnalysisConfig,
}

impl AnalysisService {
    /// 새 서비스 인스턴스 생성.
    ///
    /// # Arguments
    ///
    /// * `market_data` - 시장 데이터 제공자
    /// * `config` - 분석 설정
    pub fn new(market_data: Arc<dyn MarketDataProvider>, config: AnalysisConfig) -> Self {
        Self {
            market_data,
            narrator: None,
            narrative_timeout: None,
            config,
        }
    }

    /// 내러티브 생성기를 설정합니다.
    pub fn with_narrator(mut self, narrator: Arc<dyn NarrativeGenerator>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    /// 내러티브 생성 제한 시간을 설정합니다.
    ///
    /// 시간을 넘기면 내러티브 없이 보고서를 반환합니다.
    pub fn with_narrative_timeout(mut self, timeout: Duration) -> Self {
        self.narrative_timeout = Some(timeout);
        self
    }

    /// 분석 설정.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// 종목을 조회하고 분석 보고서를 생성합니다.
    #[instrument(skip(self))]
    pub async fn analyze_symbol(&self, symbol: &str) -> AnalystResult<AnalysisReport> {
        let series = self.market_data.get_series(symbol).await?;
        info!(bars = series.len(), "Price series fetched");

        self.analyze_series(&series).await
    }

    /// 이미 보유한 시계열로 분석 보고서를 생성합니다.
    #[instrument(skip(self, series), fields(symbol = %series.symbol()))]
    pub async fn analyze_series(&self, series: &PriceSeries) -> AnalystResult<AnalysisReport> {
        let mut analysis = StockAnalysis::new(series, self.config.clone());
        let result = analysis.analyze()?.clone();
        let indicators = analysis.indicators()?.clone();

        let narrative = match &self.narrator {
            Some(narrator) => match self.narrate(narrator.as_ref(), &indicators, series).await {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!(
                        narrator = narrator.name(),
                        error = %e,
                        "내러티브 생성 실패, 요약 없이 진행"
                    );
                    None
                }
            },
            None => None,
        };

        info!(
            trend = %result.trend,
            recommendation = %result.recommendation,
            signals = result.signals.len(),
            "Analysis report generated"
        );

        Ok(AnalysisReport {
            symbol: series.symbol().to_string(),
            snapshot: series.snapshot(),
            indicators,
            result,
            narrative,
            generated_at: Utc::now(),
        })
    }

    async fn narrate(
        &self,
        narrator: &dyn NarrativeGenerator,
        indicators: &IndicatorSet,
        series: &PriceSeries,
    ) -> AnalystResult<String> {
        let Some(limit) = self.narrative_timeout else {
            return narrator.generate(indicators, series).await;
        };

        tokio::time::timeout(limit, narrator.generate(indicators, series))
            .await
            .map_err(|_| {
                AnalystError::NarrativeUnavailable(format!(
                    "{} 시간 초과 ({}초)",
                    narrator.name(),
                    limit.as_secs()
                ))
            })?
    }

    /// 최신 가격 바를 조회합니다.
    #[instrument(skip(self))]
    pub async fn latest_quote(&self, symbol: &str) -> AnalystResult<PriceBar> {
        self.market_data.get_latest_price(symbol).await
    }
}
