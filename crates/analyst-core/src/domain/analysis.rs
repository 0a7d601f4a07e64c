//! 분석 결과 타입.
//!
//! - `Trend` / `StrengthGrade` - 추세 분류와 강도 등급
//! - `Recommendation` - 매수/매도/보유 권고
//! - `AnalysisResult` - 한 번의 분석에서 도출된 추세, 레벨, 시그널
//! - `AnalysisReport` - 서비스가 반환하는 최종 보고서

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::indicator_set::IndicatorSet;
use super::level::PriceLevel;
use super::market_data::MarketSnapshot;
use super::signal::TradingSignal;

/// 추세 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// 상승 추세
    Uptrend,
    /// 하락 추세
    Downtrend,
    /// 횡보
    Sideways,
}

impl Trend {
    /// 한국어 표시 이름.
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Uptrend => "상승 추세",
            Trend::Downtrend => "하락 추세",
            Trend::Sideways => "횡보",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Uptrend => write!(f, "uptrend"),
            Trend::Downtrend => write!(f, "downtrend"),
            Trend::Sideways => write!(f, "sideways"),
        }
    }
}

/// 추세 강도 등급.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthGrade {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl StrengthGrade {
    /// `[0, 1]` 범위의 강도 값을 등급으로 변환합니다.
    pub fn from_strength(strength: f64) -> Self {
        if strength >= 0.8 {
            StrengthGrade::VeryStrong
        } else if strength >= 0.6 {
            StrengthGrade::Strong
        } else if strength >= 0.4 {
            StrengthGrade::Moderate
        } else if strength >= 0.2 {
            StrengthGrade::Weak
        } else {
            StrengthGrade::VeryWeak
        }
    }

    /// 한국어 표시 이름.
    pub fn label(&self) -> &'static str {
        match self {
            StrengthGrade::VeryStrong => "매우 강함",
            StrengthGrade::Strong => "강함",
            StrengthGrade::Moderate => "보통",
            StrengthGrade::Weak => "약함",
            StrengthGrade::VeryWeak => "매우 약함",
        }
    }
}

/// 매매 권고.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
}

impl Recommendation {
    /// 투표 점수로부터 권고를 결정합니다 (양수 BUY, 음수 SELL, 0 HOLD).
    pub fn from_score(score: i32) -> Self {
        match score.signum() {
            1 => Recommendation::Buy,
            -1 => Recommendation::Sell,
            _ => Recommendation::Hold,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Buy => write!(f, "BUY"),
            Recommendation::Sell => write!(f, "SELL"),
            Recommendation::Hold => write!(f, "HOLD"),
        }
    }
}

/// 한 번의 분석 결과.
///
/// 레벨 목록은 강도 내림차순이며, 시그널은 종류별로 최대 한 개입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// 추세 분류
    pub trend: Trend,
    /// 추세 강도 `[0, 1]`
    #[serde(rename = "strength")]
    pub trend_strength: f64,
    /// 지지선 (강한 순)
    pub support_levels: Vec<PriceLevel>,
    /// 저항선 (강한 순)
    pub resistance_levels: Vec<PriceLevel>,
    /// 트레이딩 시그널
    pub signals: Vec<TradingSignal>,
    /// 매매 권고
    pub recommendation: Recommendation,
}

impl AnalysisResult {
    /// 추세 강도 등급.
    pub fn strength_grade(&self) -> StrengthGrade {
        StrengthGrade::from_strength(self.trend_strength)
    }

    /// 가장 강한 지지선.
    pub fn primary_support(&self) -> Option<&PriceLevel> {
        self.support_levels.first()
    }

    /// 가장 강한 저항선.
    pub fn primary_resistance(&self) -> Option<&PriceLevel> {
        self.resistance_levels.first()
    }
}

/// 종목 분석 보고서.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// 종목 심볼
    pub symbol: String,
    /// 최신 시세 요약
    pub snapshot: MarketSnapshot,
    /// 계산된 지표
    pub indicators: IndicatorSet,
    /// 분석 결과
    pub result: AnalysisResult,
    /// 서술형 요약 (생성 실패 또는 비활성화 시 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
    /// 보고서 생성 시각
    pub generated_at: DateTime<Utc>,
}
