//! 종목 분석 명령.

use analyst_core::AnalysisReport;
use anyhow::Result;
use tracing::info;

use super::{with_timeout, AppContext};

/// 종목을 조회하고 분석 보고서를 생성합니다.
///
/// 시세 조회에는 제한 시간을 적용합니다. 내러티브 생성의 제한 시간은 서비스가
/// 관리하며, 초과해도 보고서는 내러티브 없이 반환됩니다.
pub async fn run_analysis(ctx: &AppContext, symbol: &str) -> Result<AnalysisReport> {
    let series = with_timeout(ctx.timeout, "시세 조회", ctx.market_data.get_series(symbol)).await?;
    info!(symbol, bars = series.len(), "Price series loaded");

    Ok(ctx.service.analyze_series(&series).await?)
}
