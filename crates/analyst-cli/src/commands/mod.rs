//! CLI 명령어 구현 모듈.

pub mod analyze;
pub mod quote;
pub mod watch;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use analyst_analytics::AnalysisService;
use analyst_core::{
    AnalystResult, AppConfig, MarketDataProvider, NarrativeConfig, NarrativeGenerator,
};
use analyst_data::YahooMarketData;
use analyst_narrative::{NarrativeError, OpenAiNarrator, TemplateNarrator};
use anyhow::Result;
use tracing::{info, warn};

/// 명령 실행에 필요한 협력자 묶음.
pub struct AppContext {
    /// 로드된 설정
    pub config: AppConfig,
    /// 시장 데이터 제공자
    pub market_data: Arc<dyn MarketDataProvider>,
    /// 분석 서비스
    pub service: AnalysisService,
    /// 시세 조회와 내러티브 생성 각각의 제한 시간
    pub timeout: Duration,
}

impl AppContext {
    /// Yahoo Finance 제공자와 설정된 내러티브 생성기로 컨텍스트를 조립합니다.
    pub fn new(config: AppConfig, with_narrative: bool) -> Result<Self> {
        let market_data: Arc<dyn MarketDataProvider> =
            Arc::new(YahooMarketData::new(config.market_data.clone())?);

        let narrator = if with_narrative {
            select_narrator(&config.narrative)
        } else {
            None
        };

        Ok(Self::from_parts(config, market_data, narrator))
    }

    /// 이미 만들어진 협력자로 컨텍스트를 조립합니다.
    pub fn from_parts(
        config: AppConfig,
        market_data: Arc<dyn MarketDataProvider>,
        narrator: Option<Arc<dyn NarrativeGenerator>>,
    ) -> Self {
        let timeout = Duration::from_secs(config.market_data.request_timeout_secs);
        let mut service = AnalysisService::new(market_data.clone(), config.analysis.clone());
        if let Some(narrator) = narrator {
            service = service
                .with_narrator(narrator)
                .with_narrative_timeout(timeout);
        }

        Self {
            timeout,
            config,
            market_data,
            service,
        }
    }
}

/// 설정에 맞는 내러티브 생성기를 선택합니다.
///
/// API 키가 없으면 템플릿 생성기로 대체합니다.
pub fn select_narrator(config: &NarrativeConfig) -> Option<Arc<dyn NarrativeGenerator>> {
    if !config.enabled {
        info!("Narrative generation disabled");
        return None;
    }

    match OpenAiNarrator::from_config(config) {
        Ok(narrator) => Some(Arc::new(narrator)),
        Err(NarrativeError::MissingApiKey(env)) => {
            warn!(env = %env, "API key not set, using template narrative");
            Some(Arc::new(TemplateNarrator::new()))
        }
        Err(e) => {
            warn!(error = %e, "Narrative generator unavailable");
            None
        }
    }
}

/// 제한 시간 안에 작업을 실행합니다.
pub async fn with_timeout<T, F>(duration: Duration, what: &str, fut: F) -> Result<T>
where
    F: Future<Output = AnalystResult<T>>,
{
    match tokio::time::timeout(duration, fut).await {
        Ok(result) => Ok(result?),
        Err(_) => anyhow::bail!("{} 시간 초과 ({}초)", what, duration.as_secs()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_narrative_selects_none() {
        let config = NarrativeConfig {
            enabled: false,
            ..NarrativeConfig::default()
        };
        assert!(select_narrator(&config).is_none());
    }

    #[test]
    fn test_missing_key_falls_back_to_template() {
        let config = NarrativeConfig {
            api_key_env: "ANALYST_CLI_TEST_MISSING_KEY".to_string(),
            ..NarrativeConfig::default()
        };
        let narrator = select_narrator(&config).unwrap();
        assert_eq!(narrator.name(), "template");
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_timeout_expires() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok::<_, analyst_core::AnalystError>(1)
        };

        let err = with_timeout(Duration::from_secs(1), "시세 조회", slow)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("시세 조회 시간 초과"));
    }
}
