//! 시장 데이터 제공자 trait.
//!
//! 분석 서비스는 이 trait을 통해서만 가격 데이터를 조회합니다.
//! 실제 구현(Yahoo Finance, 인메모리 등)은 `analyst-data` 크레이트에 있습니다.

use async_trait::async_trait;

use super::market_data::{PriceBar, PriceSeries};
use crate::error::AnalystResult;

/// 시장 데이터 제공자.
///
/// # 구현 예시
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use analyst_core::{AnalystResult, MarketDataProvider, PriceBar, PriceSeries};
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl MarketDataProvider for MyProvider {
///     async fn get_series(&self, symbol: &str) -> AnalystResult<PriceSeries> {
///         // 외부 API 호출 및 변환
///     }
///
///     async fn get_latest_price(&self, symbol: &str) -> AnalystResult<PriceBar> {
///         // ...
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// 종목의 과거 가격 시계열을 조회합니다.
    ///
    /// # Errors
    ///
    /// - `AnalystError::DataUnavailable`: 데이터 소스 조회 실패 또는 빈 응답
    async fn get_series(&self, symbol: &str) -> AnalystResult<PriceSeries>;

    /// 종목의 최신 가격 바를 조회합니다.
    async fn get_latest_price(&self, symbol: &str) -> AnalystResult<PriceBar>;
}
