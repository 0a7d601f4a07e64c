//! OpenAI Chat Completions 기반 내러티브 생성기.

use analyst_core::{AnalystResult, IndicatorSet, NarrativeConfig, NarrativeGenerator, PriceSeries};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::prompt::{PromptBuilder, SYSTEM_PROMPT};
use crate::types::{NarrativeError, NarrativeResult};

/// OpenAI 호출 설정.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API 키
    pub api_key: SecretString,
    /// API 기본 URL (예: https://api.openai.com/v1)
    pub base_url: String,
    /// 모델 이름
    pub model: String,
    /// 샘플링 온도
    pub temperature: f32,
}

impl OpenAiConfig {
    /// 새 설정을 생성합니다.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into().into()),
            base_url: base_url.into(),
            model: "gpt-4-turbo".to_string(),
            temperature: 0.2,
        }
    }

    /// 내러티브 설정과 환경 변수에서 설정을 생성합니다.
    ///
    /// API 키는 `NarrativeConfig::api_key_env`가 가리키는 환경 변수에서 읽습니다.
    pub fn from_env(config: &NarrativeConfig) -> NarrativeResult<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| NarrativeError::MissingApiKey(config.api_key_env.clone()))?;

        Ok(Self {
            api_key: SecretString::new(api_key.into()),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// OpenAI 내러티브 생성기.
pub struct OpenAiNarrator {
    config: OpenAiConfig,
    prompt: PromptBuilder,
    client: reqwest::Client,
}

impl OpenAiNarrator {
    /// 새 생성기를 생성합니다.
    pub fn new(config: OpenAiConfig, prompt: PromptBuilder) -> Self {
        Self {
            config,
            prompt,
            client: reqwest::Client::new(),
        }
    }

    /// 내러티브 설정과 환경 변수에서 생성기를 생성합니다.
    pub fn from_config(config: &NarrativeConfig) -> NarrativeResult<Self> {
        Ok(Self::new(
            OpenAiConfig::from_env(config)?,
            PromptBuilder::new(config.recent_bars, config.recent_values),
        ))
    }

    /// Chat Completions API를 호출합니다.
    async fn complete(&self, user_prompt: &str) -> NarrativeResult<String> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: self.config.temperature,
        };

        debug!(model = %self.config.model, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                warn!("OpenAI rate limited");
                return Err(NarrativeError::RateLimited);
            }

            error!("OpenAI request failed: {} - {}", status, body);
            return Err(NarrativeError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatResponse = serde_json::from_str(&response.text().await?)?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(NarrativeError::EmptyResponse)?;

        info!(chars = content.chars().count(), "Narrative generated");
        Ok(content)
    }
}

#[async_trait]
impl NarrativeGenerator for OpenAiNarrator {
    fn name(&self) -> &str {
        "openai"
    }

    #[instrument(skip(self, indicators, series), fields(symbol = %series.symbol()))]
    async fn generate(
        &self,
        indicators: &IndicatorSet,
        series: &PriceSeries,
    ) -> AnalystResult<String> {
        let prompt = self.prompt.user_prompt(indicators, series);
        Ok(self.complete(&prompt).await?)
    }
}
