//! 최신 시세 조회 명령.

use analyst_core::PriceBar;
use anyhow::Result;

use super::{with_timeout, AppContext};

/// 종목의 최신 가격 바를 조회합니다.
pub async fn run_quote(ctx: &AppContext, symbol: &str) -> Result<PriceBar> {
    with_timeout(ctx.timeout, "시세 조회", ctx.service.latest_quote(symbol)).await
}
