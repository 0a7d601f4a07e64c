//! 템플릿 기반 내러티브 생성기.
//!
//! 외부 서비스 없이 최신 지표 값으로 고정 형식의 요약을 만듭니다.
//! API 키가 없거나 오프라인으로 실행할 때 사용합니다.

use analyst_core::{AnalystResult, IndicatorSet, NarrativeGenerator, PriceSeries};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// 템플릿 내러티브 생성기.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNarrator;

impl TemplateNarrator {
    /// 새 생성기를 생성합니다.
    pub fn new() -> Self {
        Self
    }

    /// 요약 문자열을 생성합니다.
    pub fn render(&self, indicators: &IndicatorSet, series: &PriceSeries) -> String {
        let latest = series.latest();
        let mut lines = vec![format!(
            "{}{} 종가 {:.2} ({})",
            series.symbol(),
            series
                .name()
                .map(|name| format!(" ({})", name))
                .unwrap_or_default(),
            latest.close(),
            latest.timestamp().date_naive()
        )];

        let sma: Vec<String> = indicators
            .sma
            .iter()
            .filter_map(|s| s.latest().map(|v| format!("{} {:.2}", s.name(), v)))
            .collect();
        if !sma.is_empty() {
            lines.push(format!("이동평균: {}", sma.join(", ")));
        }

        if let Some(rsi) = indicators.rsi.latest() {
            lines.push(format!("{} {:.2} ({})", indicators.rsi.name(), rsi, rsi_zone(rsi)));
        }

        if let Some(point) = indicators.macd.latest() {
            let side = if point.histogram > Decimal::ZERO {
                "시그널 위"
            } else if point.histogram < Decimal::ZERO {
                "시그널 아래"
            } else {
                "시그널과 동일"
            };
            lines.push(format!(
                "MACD {:.4} / 시그널 {:.4} ({})",
                point.macd, point.signal, side
            ));
        }

        lines.join("\n")
    }
}

fn rsi_zone(rsi: Decimal) -> &'static str {
    if rsi > Decimal::from(70) {
        "과매수 구간"
    } else if rsi < Decimal::from(30) {
        "과매도 구간"
    } else {
        "중립 구간"
    }
}

#[async_trait]
impl NarrativeGenerator for TemplateNarrator {
    fn name(&self) -> &str {
        "template"
    }

    async fn generate(
        &self,
        indicators: &IndicatorSet,
        series: &PriceSeries,
    ) -> AnalystResult<String> {
        Ok(self.render(indicators, series))
    }
}
