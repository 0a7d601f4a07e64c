//! 시장 데이터 타입 및 구조체.
//!
//! 이 모듈은 시장 데이터 관련 타입을 정의합니다:
//! - `PriceBar` - 검증된 OHLCV 바 (생성 후 불변)
//! - `PriceSeries` - 시간 오름차순으로 정렬된 가격 바 시계열
//! - `DateRange` - 시계열이 포함하는 기간
//! - `MarketSnapshot` - 최신 시세 요약

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AnalystError, AnalystResult};
use crate::types::{Price, Quantity};

/// 직렬화 경계에서 사용하는 검증 전 OHLCV 바.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawPriceBar {
    timestamp: DateTime<Utc>,
    open: Price,
    high: Price,
    low: Price,
    close: Price,
    volume: Quantity,
}

/// OHLCV 가격 바.
///
/// 생성 시점에 다음 불변식을 검증하며 이후에는 변경할 수 없습니다:
/// - `high >= max(open, close, low)`
/// - `low <= min(open, close, high)`
/// - `volume >= 0`
/// - `open > 0`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceBar", into = "RawPriceBar")]
pub struct PriceBar {
    timestamp: DateTime<Utc>,
    open: Price,
    high: Price,
    low: Price,
    close: Price,
    volume: Quantity,
}

impl PriceBar {
    /// 새 가격 바를 생성합니다.
    pub fn new(
        timestamp: DateTime<Utc>,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
        volume: Quantity,
    ) -> AnalystResult<Self> {
        if open <= Decimal::ZERO {
            return Err(AnalystError::InvalidBar(format!(
                "{}: 시가는 0보다 커야 합니다 (open={})",
                timestamp, open
            )));
        }
        if volume < Decimal::ZERO {
            return Err(AnalystError::InvalidBar(format!(
                "{}: 거래량은 음수일 수 없습니다 (volume={})",
                timestamp, volume
            )));
        }
        if high < open.max(close).max(low) {
            return Err(AnalystError::InvalidBar(format!(
                "{}: 고가가 시가/종가/저가보다 낮습니다 (high={}, open={}, close={}, low={})",
                timestamp, high, open, close, low
            )));
        }
        if low > open.min(close).min(high) {
            return Err(AnalystError::InvalidBar(format!(
                "{}: 저가가 시가/종가/고가보다 높습니다 (low={}, open={}, close={}, high={})",
                timestamp, low, open, close, high
            )));
        }

        Ok(Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// 바 시작 시각.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// 시가.
    pub fn open(&self) -> Price {
        self.open
    }

    /// 고가.
    pub fn high(&self) -> Price {
        self.high
    }

    /// 저가.
    pub fn low(&self) -> Price {
        self.low
    }

    /// 종가.
    pub fn close(&self) -> Price {
        self.close
    }

    /// 거래량.
    pub fn volume(&self) -> Quantity {
        self.volume
    }

    /// 시가 대비 종가 변동률(%)을 반환합니다.
    pub fn change_percent(&self) -> Decimal {
        (self.close - self.open) / self.open * Decimal::ONE_HUNDRED
    }
}

impl TryFrom<RawPriceBar> for PriceBar {
    type Error = AnalystError;

    fn try_from(raw: RawPriceBar) -> Result<Self, Self::Error> {
        PriceBar::new(raw.timestamp, raw.open, raw.high, raw.low, raw.close, raw.volume)
    }
}

impl From<PriceBar> for RawPriceBar {
    fn from(bar: PriceBar) -> Self {
        Self {
            timestamp: bar.timestamp,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }
}

/// 시계열이 포함하는 기간.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// 시작 시각
    pub start: DateTime<Utc>,
    /// 종료 시각
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// 기간의 일 수를 반환합니다.
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// 시작이 종료보다 앞서는지 확인합니다.
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }
}

/// 검증 전 시계열 (역직렬화용).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawPriceSeries {
    symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    bars: Vec<PriceBar>,
}

/// 시간 오름차순으로 정렬된 가격 바 시계열.
///
/// 최소 한 개의 바를 포함하며, 타임스탬프는 엄격하게 증가합니다 (중복 없음).
/// 분석 엔진은 시계열을 빌려서 읽기만 합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceSeries", into = "RawPriceSeries")]
pub struct PriceSeries {
    symbol: String,
    name: Option<String>,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// 새 시계열을 생성합니다.
    ///
    /// # 에러
    ///
    /// - 바가 비어 있는 경우
    /// - 타임스탬프가 엄격하게 증가하지 않는 경우
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> AnalystResult<Self> {
        let symbol = symbol.into();

        if bars.is_empty() {
            return Err(AnalystError::InvalidSeries(format!(
                "{}: 최소 한 개의 바가 필요합니다",
                symbol
            )));
        }

        if let Some(pair) = bars
            .windows(2)
            .find(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(AnalystError::InvalidSeries(format!(
                "{}: 타임스탬프가 엄격하게 증가해야 합니다 ({} → {})",
                symbol, pair[0].timestamp, pair[1].timestamp
            )));
        }

        Ok(Self {
            symbol,
            name: None,
            bars,
        })
    }

    /// 표시용 종목명을 설정합니다.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// 종목 심볼.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// 종목명 (없으면 None).
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// 모든 바.
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// 바 개수.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// 항상 false입니다 (시계열은 최소 한 개의 바를 가집니다).
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// 가장 최근 바.
    pub fn latest(&self) -> &PriceBar {
        // new()가 비어 있지 않음을 보장
        &self.bars[self.bars.len() - 1]
    }

    /// 직전 바 (바가 하나뿐이면 None).
    pub fn previous(&self) -> Option<&PriceBar> {
        self.bars.len().checked_sub(2).map(|i| &self.bars[i])
    }

    /// 최근 `n`개의 바.
    pub fn recent(&self, n: usize) -> &[PriceBar] {
        &self.bars[self.bars.len().saturating_sub(n)..]
    }

    /// 종가 목록.
    pub fn closes(&self) -> Vec<Price> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// 고가 목록.
    pub fn highs(&self) -> Vec<Price> {
        self.bars.iter().map(|b| b.high).collect()
    }

    /// 저가 목록.
    pub fn lows(&self) -> Vec<Price> {
        self.bars.iter().map(|b| b.low).collect()
    }

    /// 시계열이 포함하는 기간.
    pub fn date_range(&self) -> DateRange {
        DateRange {
            start: self.bars[0].timestamp,
            end: self.latest().timestamp,
        }
    }

    /// 최신 시세 요약을 생성합니다.
    pub fn snapshot(&self) -> MarketSnapshot {
        let latest = self.latest();
        let (change, change_percent) = match self.previous() {
            Some(prev) => {
                let change = latest.close - prev.close;
                (change, change / prev.close * Decimal::ONE_HUNDRED)
            }
            None => (Decimal::ZERO, Decimal::ZERO),
        };

        MarketSnapshot {
            symbol: self.symbol.clone(),
            name: self.name.clone(),
            timestamp: latest.timestamp,
            current_price: latest.close,
            change,
            change_percent,
            volume: latest.volume,
        }
    }
}

impl TryFrom<RawPriceSeries> for PriceSeries {
    type Error = AnalystError;

    fn try_from(raw: RawPriceSeries) -> Result<Self, Self::Error> {
        let series = PriceSeries::new(raw.symbol, raw.bars)?;
        Ok(match raw.name {
            Some(name) => series.with_name(name),
            None => series,
        })
    }
}

impl From<PriceSeries> for RawPriceSeries {
    fn from(series: PriceSeries) -> Self {
        Self {
            symbol: series.symbol,
            name: series.name,
            bars: series.bars,
        }
    }
}

/// 최신 시세 요약.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// 종목 심볼
    pub symbol: String,
    /// 종목명
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// 최신 바 시각
    pub timestamp: DateTime<Utc>,
    /// 현재가 (최신 종가)
    pub current_price: Price,
    /// 전일 대비 변동
    pub change: Decimal,
    /// 전일 대비 변동률(%)
    pub change_percent: Decimal,
    /// 최신 바 거래량
    pub volume: Quantity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(n)
    }

    fn bar(n: i64, close: Decimal) -> PriceBar {
        PriceBar::new(day(n), close, close + dec!(1), close - dec!(1), close, dec!(1000)).unwrap()
    }

    #[test]
    fn test_price_bar_invariants() {
        assert!(PriceBar::new(day(0), dec!(100), dec!(105), dec!(95), dec!(102), dec!(10)).is_ok());

        // 고가가 종가보다 낮음
        assert!(PriceBar::new(day(0), dec!(100), dec!(101), dec!(95), dec!(102), dec!(10)).is_err());
        // 저가가 시가보다 높음
        assert!(PriceBar::new(day(0), dec!(100), dec!(105), dec!(101), dec!(102), dec!(10)).is_err());
        // 음수 거래량
        assert!(PriceBar::new(day(0), dec!(100), dec!(105), dec!(95), dec!(102), dec!(-1)).is_err());
        // 시가 0
        assert!(PriceBar::new(day(0), dec!(0), dec!(105), dec!(0), dec!(102), dec!(10)).is_err());
    }

    #[test]
    fn test_change_percent() {
        let bar = PriceBar::new(day(0), dec!(100), dec!(112), dec!(99), dec!(110), dec!(5)).unwrap();
        assert_eq!(bar.change_percent(), dec!(10));
    }

    #[test]
    fn test_price_bar_deserialize_validates() {
        let invalid = r#"{"timestamp":"2024-01-01T00:00:00Z","open":"100","high":"99","low":"95","close":"98","volume":"1"}"#;
        assert!(serde_json::from_str::<PriceBar>(invalid).is_err());

        let valid = r#"{"timestamp":"2024-01-01T00:00:00Z","open":"100","high":"101","low":"95","close":"98","volume":"1"}"#;
        let bar: PriceBar = serde_json::from_str(valid).unwrap();
        assert_eq!(bar.close(), dec!(98));
    }

    #[test]
    fn test_series_rejects_empty_and_unordered() {
        assert!(PriceSeries::new("AAPL", vec![]).is_err());

        let unordered = vec![bar(1, dec!(100)), bar(0, dec!(101))];
        assert!(PriceSeries::new("AAPL", unordered).is_err());

        let duplicate = vec![bar(0, dec!(100)), bar(0, dec!(101))];
        assert!(PriceSeries::new("AAPL", duplicate).is_err());
    }

    #[test]
    fn test_series_accessors() {
        let series = PriceSeries::new(
            "AAPL",
            vec![bar(0, dec!(100)), bar(1, dec!(102)), bar(2, dec!(99))],
        )
        .unwrap()
        .with_name("Apple Inc.");

        assert_eq!(series.len(), 3);
        assert_eq!(series.name(), Some("Apple Inc."));
        assert_eq!(series.closes(), vec![dec!(100), dec!(102), dec!(99)]);
        assert_eq!(series.latest().close(), dec!(99));
        assert_eq!(series.previous().map(|b| b.close()), Some(dec!(102)));
        assert_eq!(series.recent(2).len(), 2);
        assert_eq!(series.recent(10).len(), 3);
        assert_eq!(series.date_range().duration_days(), 2);
        assert!(series.date_range().is_valid());
    }

    #[test]
    fn test_snapshot() {
        let series =
            PriceSeries::new("MSFT", vec![bar(0, dec!(200)), bar(1, dec!(210))]).unwrap();
        let snapshot = series.snapshot();

        assert_eq!(snapshot.current_price, dec!(210));
        assert_eq!(snapshot.change, dec!(10));
        assert_eq!(snapshot.change_percent, dec!(5));

        let single = PriceSeries::new("MSFT", vec![bar(0, dec!(200))]).unwrap();
        assert_eq!(single.snapshot().change, Decimal::ZERO);
        assert!(!single.date_range().is_valid());
    }
}
