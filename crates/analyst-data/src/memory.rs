//! 인메모리 시장 데이터 제공자.
//!
//! 미리 적재한 시계열을 반환합니다. 테스트와 오프라인 실행에 사용합니다.

use std::collections::HashMap;

use analyst_core::{AnalystResult, MarketDataProvider, PriceBar, PriceSeries};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::DataError;

/// 인메모리 시장 데이터 제공자.
#[derive(Debug, Default)]
pub struct InMemoryMarketData {
    series: RwLock<HashMap<String, PriceSeries>>,
}

impl InMemoryMarketData {
    /// 빈 제공자를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 시계열 목록으로 제공자를 생성합니다 (심볼 기준).
    pub fn from_series(series: impl IntoIterator<Item = PriceSeries>) -> Self {
        let map = series
            .into_iter()
            .map(|s| (s.symbol().to_string(), s))
            .collect();
        Self {
            series: RwLock::new(map),
        }
    }

    /// 시계열을 추가하거나 교체합니다.
    pub async fn insert(&self, series: PriceSeries) {
        debug!(symbol = %series.symbol(), bars = series.len(), "시계열 적재");
        self.series
            .write()
            .await
            .insert(series.symbol().to_string(), series);
    }

    /// 적재된 심볼 목록 (정렬됨).
    pub async fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.series.read().await.keys().cloned().collect();
        symbols.sort();
        symbols
    }
}

#[async_trait]
impl MarketDataProvider for InMemoryMarketData {
    async fn get_series(&self, symbol: &str) -> AnalystResult<PriceSeries> {
        self.series
            .read()
            .await
            .get(symbol)
            .cloned()
            .ok_or_else(|| DataError::NotFound(symbol.to_string()).into())
    }

    async fn get_latest_price(&self, symbol: &str) -> AnalystResult<PriceBar> {
        self.series
            .read()
            .await
            .get(symbol)
            .map(|s| s.latest().clone())
            .ok_or_else(|| DataError::NotFound(symbol.to_string()).into())
    }
}
