//! 서술형 요약 생성기 trait.

use async_trait::async_trait;

use super::indicator_set::IndicatorSet;
use super::market_data::PriceSeries;
use crate::error::AnalystResult;

/// 지표와 가격 이력으로부터 사람이 읽을 수 있는 요약을 생성합니다.
///
/// 요약 생성은 부가 기능입니다. 실패하더라도 분석 결과에는 영향을 주지 않습니다.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// 생성기 이름 (로그 표시용).
    fn name(&self) -> &str;

    /// 요약 문자열을 생성합니다.
    ///
    /// # Errors
    ///
    /// - `AnalystError::NarrativeUnavailable`: 외부 서비스 호출 실패
    async fn generate(
        &self,
        indicators: &IndicatorSet,
        series: &PriceSeries,
    ) -> AnalystResult<String>;
}
