//! LLM 프롬프트 빌더.
//!
//! 최근 가격 바와 지표 값의 꼬리 구간만 담아 토큰 사용량을 줄입니다.

use std::fmt::Write;

use analyst_core::{IndicatorSet, PriceSeries};
use rust_decimal::Decimal;

/// 시스템 프롬프트 (분석가 역할 정의).
pub const SYSTEM_PROMPT: &str = "당신은 기술적 분석과 기본적 분석에 능숙한 전문 주식 시장 애널리스트입니다.
한 종목의 기술적 지표 데이터와 가격 이력을 받게 됩니다. 다음 항목을 분석해 주세요:
1. 추세 분석: 단기, 중기, 장기 추세 판단
2. 지지선과 저항선 판단
3. 기술적 지표 해석
4. 매매 시그널 해석
5. 종합 의견

전문적이지만 이해하기 쉬운 표현을 사용하고, 각 분석 항목을 명확히 구분해 주세요.";

/// 사용자 프롬프트 빌더.
#[derive(Debug, Clone, Copy)]
pub struct PromptBuilder {
    recent_bars: usize,
    recent_values: usize,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            recent_bars: 30,
            recent_values: 10,
        }
    }
}

impl PromptBuilder {
    /// 포함할 최근 바 개수와 지표 값 개수로 빌더를 생성합니다.
    pub fn new(recent_bars: usize, recent_values: usize) -> Self {
        Self {
            recent_bars,
            recent_values,
        }
    }

    /// 사용자 프롬프트를 생성합니다.
    pub fn user_prompt(&self, indicators: &IndicatorSet, series: &PriceSeries) -> String {
        let mut prompt = String::new();

        // String에 대한 write!는 실패하지 않는다
        let _ = writeln!(prompt, "다음 종목 데이터를 분석해 주세요:");
        let _ = writeln!(prompt, "종목 코드: {}", series.symbol());
        let _ = writeln!(prompt, "종목명: {}", series.name().unwrap_or("-"));
        let _ = writeln!(prompt);
        let _ = writeln!(prompt, "최근 가격 데이터:");
        for bar in series.recent(self.recent_bars) {
            let _ = writeln!(
                prompt,
                "{}: 시:{:.2} 고:{:.2} 저:{:.2} 종:{:.2} 량:{}",
                bar.timestamp().date_naive(),
                bar.open(),
                bar.high(),
                bar.low(),
                bar.close(),
                bar.volume().normalize()
            );
        }

        let _ = writeln!(prompt);
        let _ = writeln!(prompt, "기술적 지표:");
        for sma in &indicators.sma {
            let _ = writeln!(
                prompt,
                "{}: {}",
                sma.name(),
                format_values(sma.tail(self.recent_values))
            );
        }
        let _ = writeln!(
            prompt,
            "{}: {}",
            indicators.rsi.name(),
            format_values(indicators.rsi.tail(self.recent_values))
        );
        let _ = writeln!(
            prompt,
            "MACD: {}",
            format_values(indicators.macd.macd_tail(self.recent_values))
        );
        let _ = writeln!(
            prompt,
            "MACD Signal: {}",
            format_values(indicators.macd.signal_tail(self.recent_values))
        );
        let _ = writeln!(prompt);
        let _ = write!(prompt, "전체 분석 보고서를 작성해 주세요.");

        prompt
    }
}

fn format_values(values: &[Decimal]) -> String {
    let items: Vec<String> = values.iter().map(|v| format!("{:.2}", v)).collect();
    format!("[{}]", items.join(", "))
}
