//! OpenAI 내러티브 생성기 HTTP 테스트.
//!
//! mockito 서버로 Chat Completions 응답을 흉내냅니다.

use analyst_core::{
    AnalystError, IndicatorSet, LineKind, LineSeries, MacdSeries, NarrativeConfig,
    NarrativeGenerator, PriceBar, PriceSeries,
};
use analyst_narrative::{NarrativeError, OpenAiConfig, OpenAiNarrator, PromptBuilder};
use chrono::{Duration, TimeZone, Utc};
use mockito::Matcher;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn series() -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let bars = (0..5)
        .map(|i| {
            let c = dec!(50) + Decimal::from(i);
            PriceBar::new(start + Duration::days(i), c, c, c, c, dec!(100)).unwrap()
        })
        .collect();
    PriceSeries::new("MSFT", bars).unwrap()
}

fn indicators() -> IndicatorSet {
    IndicatorSet {
        sma: vec![LineSeries {
            kind: LineKind::Sma,
            period: 3,
            offset: 2,
            values: vec![dec!(51), dec!(52), dec!(53)],
        }],
        rsi: LineSeries {
            kind: LineKind::Rsi,
            period: 3,
            offset: 3,
            values: vec![dec!(100), dec!(100)],
        },
        macd: MacdSeries {
            fast_period: 2,
            slow_period: 3,
            signal_period: 2,
            offset: 3,
            macd: vec![dec!(0.5), dec!(0.5)],
            signal: vec![dec!(0.5), dec!(0.5)],
            histogram: vec![dec!(0), dec!(0)],
        },
    }
}

fn narrator(base_url: String) -> OpenAiNarrator {
    OpenAiNarrator::new(
        OpenAiConfig::new("test-key", base_url),
        PromptBuilder::default(),
    )
}

#[tokio::test]
async fn test_generate_returns_first_choice() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "model": "gpt-4-turbo",
            "messages": [{ "role": "system" }, { "role": "user" }]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"상승 추세입니다."}}]}"#)
        .create_async()
        .await;

    let text = narrator(server.url())
        .generate(&indicators(), &series())
        .await
        .unwrap();

    assert_eq!(text, "상승 추세입니다.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rate_limit_maps_to_narrative_unavailable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_body("slow down")
        .create_async()
        .await;

    let err = narrator(server.url())
        .generate(&indicators(), &series())
        .await
        .unwrap_err();

    assert!(matches!(err, AnalystError::NarrativeUnavailable(_)));
    assert!(err.to_string().contains("요청 한도 초과"));
}

#[tokio::test]
async fn test_server_error_keeps_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let err = narrator(server.url())
        .generate(&indicators(), &series())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("HTTP 500"));
}

#[tokio::test]
async fn test_empty_choices_is_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let err = narrator(server.url())
        .generate(&indicators(), &series())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("응답에 내용이 없습니다"));
}

#[test]
fn test_missing_api_key() {
    let config = NarrativeConfig {
        api_key_env: "ANALYST_TEST_KEY_THAT_DOES_NOT_EXIST".to_string(),
        ..NarrativeConfig::default()
    };

    let err = OpenAiConfig::from_env(&config).unwrap_err();
    assert!(matches!(err, NarrativeError::MissingApiKey(name) if name == "ANALYST_TEST_KEY_THAT_DOES_NOT_EXIST"));
}
