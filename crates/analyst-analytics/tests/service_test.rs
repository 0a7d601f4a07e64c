//! 분석 서비스 통합 테스트
//!
//! 가짜 시장 데이터 제공자와 내러티브 생성기를 주입하여
//! 오류 전파와 내러티브 실패 시 요약 생략 정책을 검증합니다.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use analyst_analytics::AnalysisService;
use analyst_core::{
    AnalysisConfig, AnalystError, AnalystResult, IndicatorSet, MarketDataProvider,
    NarrativeGenerator, PriceBar, PriceSeries,
};
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

struct FakeMarketData {
    series: HashMap<String, PriceSeries>,
}

#[async_trait]
impl MarketDataProvider for FakeMarketData {
    async fn get_series(&self, symbol: &str) -> AnalystResult<PriceSeries> {
        self.series
            .get(symbol)
            .cloned()
            .ok_or_else(|| AnalystError::DataUnavailable(format!("{}: 데이터 없음", symbol)))
    }

    async fn get_latest_price(&self, symbol: &str) -> AnalystResult<PriceBar> {
        Ok(self.get_series(symbol).await?.latest().clone())
    }
}

struct FakeNarrator {
    fail: bool,
    calls: AtomicUsize,
}

impl FakeNarrator {
    fn new(fail: bool) -> Self {
        Self {
            fail,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl NarrativeGenerator for FakeNarrator {
    fn name(&self) -> &str {
        "fake"
    }

    async fn generate(
        &self,
        indicators: &IndicatorSet,
        series: &PriceSeries,
    ) -> AnalystResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AnalystError::NarrativeUnavailable("timeout".to_string()));
        }
        Ok(format!(
            "{}: {}개 지표",
            series.symbol(),
            indicators.names().len()
        ))
    }
}

/// 응답하지 않는 내러티브 생성기.
struct StalledNarrator;

#[async_trait]
impl NarrativeGenerator for StalledNarrator {
    fn name(&self) -> &str {
        "stalled"
    }

    async fn generate(
        &self,
        _indicators: &IndicatorSet,
        _series: &PriceSeries,
    ) -> AnalystResult<String> {
        tokio::time::sleep(std::time::Duration::from_secs(120)).await;
        Ok("늦은 요약".to_string())
    }
}

fn sample_series(symbol: &str, n: usize) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    let bars = (0..n)
        .map(|i| {
            let close = dec!(100) + Decimal::from(i as i64 % 9) - Decimal::from(i as i64 % 4);
            PriceBar::new(
                start + Duration::days(i as i64),
                close,
                close + dec!(1),
                close - dec!(1),
                close,
                dec!(5000),
            )
            .unwrap()
        })
        .collect();
    PriceSeries::new(symbol, bars).unwrap().with_name("테스트 종목")
}

fn market_data() -> Arc<dyn MarketDataProvider> {
    Arc::new(FakeMarketData {
        series: HashMap::from([
            ("AAPL".to_string(), sample_series("AAPL", 60)),
            ("TINY".to_string(), sample_series("TINY", 10)),
        ]),
    })
}

#[tokio::test]
async fn test_report_includes_narrative() {
    let narrator = Arc::new(FakeNarrator::new(false));
    let service = AnalysisService::new(market_data(), AnalysisConfig::default())
        .with_narrator(narrator.clone());

    let report = service.analyze_symbol("AAPL").await.unwrap();

    assert_eq!(report.symbol, "AAPL");
    assert_eq!(report.snapshot.name.as_deref(), Some("테스트 종목"));
    assert_eq!(report.narrative.as_deref(), Some("AAPL: 4개 지표"));
    assert_eq!(narrator.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_narrative_failure_degrades_to_none() {
    let narrator = Arc::new(FakeNarrator::new(true));
    let service = AnalysisService::new(market_data(), AnalysisConfig::default())
        .with_narrator(narrator.clone());

    let report = service.analyze_symbol("AAPL").await.unwrap();

    assert!(report.narrative.is_none());
    assert_eq!(narrator.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_slow_narrative_keeps_report() {
    let service = AnalysisService::new(market_data(), AnalysisConfig::default())
        .with_narrator(Arc::new(StalledNarrator))
        .with_narrative_timeout(std::time::Duration::from_secs(5));

    let report = service.analyze_symbol("AAPL").await.unwrap();

    assert_eq!(report.symbol, "AAPL");
    assert!(report.narrative.is_none());
}

#[tokio::test]
async fn test_data_unavailable_propagates() {
    let service = AnalysisService::new(market_data(), AnalysisConfig::default());

    let err = service.analyze_symbol("MISSING").await.unwrap_err();

    assert!(matches!(err, AnalystError::DataUnavailable(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_insufficient_data_skips_narrative() {
    let narrator = Arc::new(FakeNarrator::new(false));
    let service = AnalysisService::new(market_data(), AnalysisConfig::default())
        .with_narrator(narrator.clone());

    let err = service.analyze_symbol("TINY").await.unwrap_err();

    assert_eq!(err.required_bars(), Some(15));
    assert_eq!(narrator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_latest_quote_passthrough() {
    let service = AnalysisService::new(market_data(), AnalysisConfig::default());

    let bar = service.latest_quote("AAPL").await.unwrap();
    let expected = sample_series("AAPL", 60).latest().clone();

    assert_eq!(bar, expected);
}
