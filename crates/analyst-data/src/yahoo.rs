//! Yahoo Finance 시장 데이터 제공자.
//!
//! 설정된 조회 범위(`history_range`)와 바 간격(`interval`)으로 시세를 조회하여
//! 검증된 `PriceSeries`로 변환합니다. 불변식을 위반하는 바는 경고 로그를 남기고
//! 건너뛰며, 타임스탬프 기준으로 정렬 후 중복을 제거합니다.

use std::time::Duration;

use analyst_core::{AnalystResult, MarketDataConfig, MarketDataProvider, PriceBar, PriceSeries};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

use crate::error::{DataError, Result};

/// Yahoo Finance 응답에서 추출한 원시 시세.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawQuote {
    /// Unix 타임스탬프 (초)
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl From<&yahoo_finance_api::Quote> for RawQuote {
    fn from(q: &yahoo_finance_api::Quote) -> Self {
        Self {
            timestamp: q.timestamp as i64,
            open: q.open,
            high: q.high,
            low: q.low,
            close: q.close,
            volume: q.volume,
        }
    }
}

impl RawQuote {
    /// 검증된 가격 바로 변환합니다.
    pub fn to_bar(&self) -> Result<PriceBar> {
        let timestamp = Utc
            .timestamp_opt(self.timestamp, 0)
            .single()
            .ok_or_else(|| {
                DataError::ParseError(format!("잘못된 타임스탬프: {}", self.timestamp))
            })?;

        let price = |name: &str, value: f64| {
            Decimal::from_f64_retain(value)
                .map(|d| d.round_dp(4))
                .ok_or_else(|| DataError::ParseError(format!("{} 변환 실패: {}", name, value)))
        };

        Ok(PriceBar::new(
            timestamp,
            price("open", self.open)?,
            price("high", self.high)?,
            price("low", self.low)?,
            price("close", self.close)?,
            Decimal::from(self.volume),
        )?)
    }
}

/// 원시 시세 목록을 정렬/중복 제거된 가격 바 목록으로 변환합니다.
///
/// 변환할 수 없는 시세는 경고 로그를 남기고 건너뜁니다.
pub fn bars_from_quotes(symbol: &str, quotes: &[RawQuote]) -> Vec<PriceBar> {
    let mut bars: Vec<PriceBar> = quotes
        .iter()
        .filter_map(|q| match q.to_bar() {
            Ok(bar) => Some(bar),
            Err(e) => {
                warn!(symbol, timestamp = q.timestamp, error = %e, "유효하지 않은 시세 건너뜀");
                None
            }
        })
        .collect();

    bars.sort_by_key(|b| b.timestamp());
    bars.dedup_by_key(|b| b.timestamp());
    bars
}

/// Yahoo Finance 시장 데이터 제공자.
pub struct YahooMarketData {
    connector: yahoo_finance_api::YahooConnector,
    config: MarketDataConfig,
}

impl YahooMarketData {
    /// 새 제공자를 생성합니다.
    pub fn new(config: MarketDataConfig) -> Result<Self> {
        let connector = yahoo_finance_api::YahooConnector::new()
            .map_err(|e| DataError::ConnectionError(format!("Yahoo Finance 연결 실패: {}", e)))?;
        Ok(Self { connector, config })
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.request_timeout_secs)
    }

    async fn fetch_quotes(
        &self,
        symbol: &str,
        interval: &str,
        range: &str,
    ) -> Result<Vec<RawQuote>> {
        debug!(symbol, interval, range, "Yahoo Finance API 호출");

        let response = tokio::time::timeout(
            self.timeout(),
            self.connector.get_quote_range(symbol, interval, range),
        )
        .await
        .map_err(|_| {
            DataError::Timeout(format!(
                "{} ({}초)",
                symbol, self.config.request_timeout_secs
            ))
        })?
        .map_err(|e| {
            DataError::FetchError(format!("Yahoo Finance API 오류 ({}): {}", symbol, e))
        })?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::ParseError(format!("Quote 파싱 오류 ({}): {}", symbol, e)))?;

        Ok(quotes.iter().map(RawQuote::from).collect())
    }

    /// 설정된 범위와 간격으로 가격 시계열을 조회합니다.
    pub async fn fetch_series(&self, symbol: &str) -> Result<PriceSeries> {
        let quotes = self
            .fetch_quotes(
                symbol,
                self.config.interval.as_str(),
                self.config.history_range.as_str(),
            )
            .await?;

        let bars = bars_from_quotes(symbol, &quotes);
        if bars.is_empty() {
            return Err(DataError::NotFound(format!("{}: 시세 데이터가 없습니다", symbol)));
        }

        Ok(PriceSeries::new(symbol, bars)?)
    }

    /// 최근 일봉 중 마지막 바를 조회합니다.
    pub async fn fetch_latest(&self, symbol: &str) -> Result<PriceBar> {
        let quotes = self.fetch_quotes(symbol, "1d", "5d").await?;

        bars_from_quotes(symbol, &quotes)
            .pop()
            .ok_or_else(|| DataError::NotFound(format!("{}: 최신 시세가 없습니다", symbol)))
    }
}

#[async_trait]
impl MarketDataProvider for YahooMarketData {
    #[instrument(skip(self))]
    async fn get_series(&self, symbol: &str) -> AnalystResult<PriceSeries> {
        Ok(self.fetch_series(symbol).await?)
    }

    #[instrument(skip(self))]
    async fn get_latest_price(&self, symbol: &str) -> AnalystResult<PriceBar> {
        Ok(self.fetch_latest(symbol).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quote(timestamp: i64, close: f64) -> RawQuote {
        RawQuote {
            timestamp,
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn test_quote_to_bar() {
        let bar = quote(1_704_153_600, 185.5).to_bar().unwrap();

        assert_eq!(bar.close(), dec!(185.5));
        assert_eq!(bar.high(), dec!(186.5));
        assert_eq!(bar.volume(), dec!(1000));
        assert_eq!(bar.timestamp().timestamp(), 1_704_153_600);
    }

    #[test]
    fn test_bars_are_sorted_and_deduplicated() {
        let quotes = vec![
            quote(1_704_326_400, 12.0),
            quote(1_704_153_600, 10.0),
            quote(1_704_240_000, 11.0),
            quote(1_704_240_000, 11.5),
        ];

        let bars = bars_from_quotes("TEST", &quotes);

        let closes: Vec<Decimal> = bars.iter().map(|b| b.close()).collect();
        assert_eq!(closes, vec![dec!(10), dec!(11), dec!(12)]);
    }

    #[test]
    fn test_invalid_quotes_are_skipped() {
        let mut broken = quote(1_704_240_000, 11.0);
        broken.high = 5.0; // 고가 < 종가
        let mut nan = quote(1_704_326_400, 12.0);
        nan.close = f64::NAN;

        let bars = bars_from_quotes("TEST", &[quote(1_704_153_600, 10.0), broken, nan]);

        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close(), dec!(10));
    }
}
