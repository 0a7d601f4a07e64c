//! 보고서 출력 형식.

use std::fmt::Write;

use analyst_core::{AnalysisReport, DecimalExt, PriceBar, PriceLevel};
use anyhow::Result;
use rust_decimal::Decimal;

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// 사람이 읽기 쉬운 텍스트
    #[default]
    Text,
    /// JSON
    Json,
}

impl OutputFormat {
    /// `--json` 플래그에서 형식을 결정합니다.
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }

    /// 분석 보고서를 출력 문자열로 변환합니다.
    pub fn render_report(&self, report: &AnalysisReport) -> Result<String> {
        match self {
            Self::Text => Ok(report_text(report)),
            Self::Json => Ok(serde_json::to_string_pretty(report)?),
        }
    }

    /// 최신 시세를 출력 문자열로 변환합니다.
    pub fn render_quote(&self, symbol: &str, bar: &PriceBar) -> Result<String> {
        match self {
            Self::Text => Ok(quote_text(symbol, bar)),
            Self::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "symbol": symbol,
                "bar": bar,
            }))?),
        }
    }
}

fn signed(value: Decimal) -> String {
    let value = value.round_display();
    if value.is_sign_negative() {
        format!("{:.2}", value)
    } else {
        format!("+{:.2}", value)
    }
}

fn level_price(level: Option<&PriceLevel>) -> String {
    level
        .map(|l| format!("{:.2}", l.price))
        .unwrap_or_else(|| "-".to_string())
}

fn level_lines(out: &mut String, title: &str, levels: &[PriceLevel]) {
    let _ = writeln!(out, "[{}]", title);
    if levels.is_empty() {
        let _ = writeln!(out, "- 없음");
    }
    for level in levels {
        let _ = writeln!(out, "- {:.2} (반응 {}회)", level.price, level.strength);
    }
}

fn report_text(report: &AnalysisReport) -> String {
    let snapshot = &report.snapshot;
    let result = &report.result;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "=== {}{} ===",
        report.symbol,
        snapshot
            .name
            .as_deref()
            .map(|name| format!(" ({})", name))
            .unwrap_or_default()
    );
    let _ = writeln!(
        out,
        "현재가: {:.2} ({}, {}%)",
        snapshot.current_price,
        signed(snapshot.change),
        signed(snapshot.change_percent)
    );
    let _ = writeln!(out, "기준일: {}", snapshot.timestamp.date_naive());
    let _ = writeln!(
        out,
        "추세: {} (강도 {:.2}, {})",
        result.trend.label(),
        result.trend_strength,
        result.strength_grade().label()
    );
    let _ = writeln!(out, "권고: {}", result.recommendation);
    let _ = writeln!(
        out,
        "주요 지지/저항: {} / {}",
        level_price(result.primary_support()),
        level_price(result.primary_resistance())
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "[지표]");
    for sma in &report.indicators.sma {
        if let Some(value) = sma.latest() {
            let _ = writeln!(out, "{}: {:.2}", sma.name(), value);
        }
    }
    if let Some(rsi) = report.indicators.rsi.latest() {
        let _ = writeln!(out, "{}: {:.2}", report.indicators.rsi.name(), rsi);
    }
    if let Some(point) = report.indicators.macd.latest() {
        let _ = writeln!(
            out,
            "{}: {:.4} / 시그널 {:.4} / 히스토그램 {:.4}",
            report.indicators.macd.name(),
            point.macd,
            point.signal,
            point.histogram
        );
    }
    let _ = writeln!(out);

    level_lines(&mut out, "지지선", &result.support_levels);
    level_lines(&mut out, "저항선", &result.resistance_levels);
    let _ = writeln!(out);

    let _ = writeln!(out, "[시그널]");
    if result.signals.is_empty() {
        let _ = writeln!(out, "- 없음");
    }
    for signal in &result.signals {
        let _ = writeln!(out, "- {}", signal);
    }

    if let Some(narrative) = &report.narrative {
        let _ = writeln!(out);
        let _ = writeln!(out, "[요약]");
        let _ = writeln!(out, "{}", narrative);
    }

    out.trim_end().to_string()
}

fn quote_text(symbol: &str, bar: &PriceBar) -> String {
    format!(
        "{} {} 시:{:.2} 고:{:.2} 저:{:.2} 종:{:.2} 량:{} ({}%)",
        symbol,
        bar.timestamp().date_naive(),
        bar.open(),
        bar.high(),
        bar.low(),
        bar.close(),
        bar.volume().normalize(),
        signed(bar.change_percent())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyst_core::{
        AnalysisResult, IndicatorSet, LevelKind, LineKind, LineSeries, MacdSeries, PriceSeries,
        Recommendation, SignalKind, TradingSignal, Trend,
    };
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn bar(day: i64, open: Decimal, close: Decimal) -> PriceBar {
        let start = Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap();
        PriceBar::new(
            start + Duration::days(day),
            open,
            open.max(close) + dec!(1),
            open.min(close) - dec!(1),
            close,
            dec!(2500),
        )
        .unwrap()
    }

    fn report(narrative: Option<&str>) -> AnalysisReport {
        let series = PriceSeries::new(
            "NVDA",
            vec![bar(0, dec!(100), dec!(100)), bar(1, dec!(100), dec!(98))],
        )
        .unwrap()
        .with_name("NVIDIA");

        AnalysisReport {
            symbol: "NVDA".to_string(),
            snapshot: series.snapshot(),
            indicators: IndicatorSet {
                sma: vec![LineSeries {
                    kind: LineKind::Sma,
                    period: 2,
                    offset: 1,
                    values: vec![dec!(99)],
                }],
                rsi: LineSeries {
                    kind: LineKind::Rsi,
                    period: 1,
                    offset: 1,
                    values: vec![dec!(0)],
                },
                macd: MacdSeries {
                    fast_period: 1,
                    slow_period: 2,
                    signal_period: 1,
                    offset: 1,
                    macd: vec![dec!(-0.5)],
                    signal: vec![dec!(-0.5)],
                    histogram: vec![dec!(0)],
                },
            },
            result: AnalysisResult {
                trend: Trend::Downtrend,
                trend_strength: 0.45,
                support_levels: vec![],
                resistance_levels: vec![PriceLevel {
                    price: dec!(101),
                    kind: LevelKind::Resistance,
                    strength: 2,
                }],
                signals: vec![TradingSignal::new(SignalKind::Oversold, "RSI 과매도")],
                recommendation: Recommendation::Hold,
            },
            narrative: narrative.map(str::to_string),
            generated_at: Utc.with_ymd_and_hms(2024, 6, 5, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_text_report() {
        let text = OutputFormat::Text.render_report(&report(Some("요약 문장"))).unwrap();

        assert!(text.starts_with("=== NVDA (NVIDIA) ==="));
        assert!(text.contains("현재가: 98.00 (-2.00, -2.00%)"));
        assert!(text.contains("추세: 하락 추세 (강도 0.45, 보통)"));
        assert!(text.contains("권고: HOLD"));
        assert!(text.contains("주요 지지/저항: - / 101.00"));
        assert!(text.contains("[지지선]\n- 없음"));
        assert!(text.contains("- 101.00 (반응 2회)"));
        assert!(text.contains("- [oversold/bullish] RSI 과매도"));
        assert!(text.ends_with("[요약]\n요약 문장"));
    }

    #[test]
    fn test_text_report_without_narrative() {
        let text = OutputFormat::Text.render_report(&report(None)).unwrap();
        assert!(!text.contains("[요약]"));
    }

    #[test]
    fn test_json_report() {
        let json = OutputFormat::Json.render_report(&report(None)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["symbol"], "NVDA");
        assert_eq!(value["result"]["trend"], "downtrend");
        assert_eq!(value["result"]["recommendation"], "HOLD");
        assert!(value.get("narrative").is_none());
    }

    #[test]
    fn test_quote_text() {
        let text = OutputFormat::Text
            .render_quote("NVDA", &bar(1, dec!(100), dec!(98)))
            .unwrap();
        assert_eq!(
            text,
            "NVDA 2024-06-04 시:100.00 고:101.00 저:97.00 종:98.00 량:2500 (-2.00%)"
        );
    }
}
