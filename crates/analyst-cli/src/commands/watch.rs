//! 주기적 감시 명령.
//!
//! Ctrl-C가 들어올 때까지 일정 간격으로 분석을 반복합니다.
//! 개별 실행의 실패는 로그만 남기고 다음 주기로 넘어갑니다.
//! 종료 신호는 진행 중인 분석보다 우선합니다.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use super::analyze::run_analysis;
use super::AppContext;
use crate::output::OutputFormat;

/// 감시 설정.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// 종목 심볼
    pub symbol: String,
    /// 분석 간격
    pub every: Duration,
    /// 출력 형식
    pub format: OutputFormat,
}

/// Ctrl-C가 들어올 때까지 분석을 반복합니다.
pub async fn run_watch(ctx: &AppContext, config: WatchConfig) -> Result<()> {
    run_watch_until(ctx, config, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

/// `shutdown`이 완료될 때까지 분석을 반복합니다.
///
/// 진행 중인 분석도 종료 신호가 오면 즉시 중단합니다.
pub async fn run_watch_until<F>(ctx: &AppContext, config: WatchConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    info!(
        symbol = %config.symbol,
        interval_secs = config.every.as_secs(),
        "Watching symbol (Ctrl-C to stop)"
    );

    let mut ticker = interval(config.every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut shutdown => break,
        }

        tokio::select! {
            outcome = run_analysis(ctx, &config.symbol) => match outcome {
                Ok(report) => println!("{}", config.format.render_report(&report)?),
                Err(e) => error!(symbol = %config.symbol, error = %e, "Analysis failed"),
            },
            _ = &mut shutdown => break,
        }
    }

    info!("Shutdown signal received");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use analyst_core::{AnalystResult, AppConfig, MarketDataProvider, PriceBar, PriceSeries};
    use async_trait::async_trait;
    use tokio::time::Instant;

    /// 응답하지 않는 시장 데이터 제공자.
    struct StalledMarketData;

    #[async_trait]
    impl MarketDataProvider for StalledMarketData {
        async fn get_series(&self, _symbol: &str) -> AnalystResult<PriceSeries> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            unreachable!("stalled provider never returns")
        }

        async fn get_latest_price(&self, _symbol: &str) -> AnalystResult<PriceBar> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            unreachable!("stalled provider never returns")
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_interrupts_running_analysis() {
        let ctx = AppContext::from_parts(AppConfig::default(), Arc::new(StalledMarketData), None);
        let started = Instant::now();

        run_watch_until(
            &ctx,
            WatchConfig {
                symbol: "AAPL".to_string(),
                every: Duration::from_secs(60),
                format: OutputFormat::Text,
            },
            tokio::time::sleep(Duration::from_secs(1)),
        )
        .await
        .unwrap();

        // 시세 조회 제한 시간(30초)을 기다리지 않고 종료
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
