//! 지표 상태에서 도출된 트레이딩 시그널.
//!
//! 이 모듈은 분석 결과에 포함되는 시그널 관련 타입을 정의합니다:
//! - `SignalKind` - 시그널 종류 (과매수, 골든 크로스, 돌파 등)
//! - `SignalDirection` - 시그널 방향 (강세/약세/중립)
//! - `TradingSignal` - 사람이 읽을 수 있는 시그널 이벤트

use serde::{Deserialize, Serialize};
use std::fmt;

/// 시그널 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// RSI 과매수
    Overbought,
    /// RSI 과매도
    Oversold,
    /// MACD가 시그널 라인을 상향 돌파
    GoldenCross,
    /// MACD가 시그널 라인을 하향 돌파
    DeathCross,
    /// 종가가 가장 가까운 저항선 위에서 마감
    Breakout,
    /// 종가가 가장 가까운 지지선 아래에서 마감
    Breakdown,
}

impl SignalKind {
    /// 이 종류의 시그널이 갖는 방향.
    pub fn direction(&self) -> SignalDirection {
        match self {
            SignalKind::Oversold | SignalKind::GoldenCross | SignalKind::Breakout => {
                SignalDirection::Bullish
            }
            SignalKind::Overbought | SignalKind::DeathCross | SignalKind::Breakdown => {
                SignalDirection::Bearish
            }
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalKind::Overbought => write!(f, "overbought"),
            SignalKind::Oversold => write!(f, "oversold"),
            SignalKind::GoldenCross => write!(f, "golden_cross"),
            SignalKind::DeathCross => write!(f, "death_cross"),
            SignalKind::Breakout => write!(f, "breakout"),
            SignalKind::Breakdown => write!(f, "breakdown"),
        }
    }
}

/// 시그널 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalDirection {
    /// 강세
    Bullish,
    /// 약세
    Bearish,
    /// 중립
    Neutral,
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalDirection::Bullish => write!(f, "bullish"),
            SignalDirection::Bearish => write!(f, "bearish"),
            SignalDirection::Neutral => write!(f, "neutral"),
        }
    }
}

/// 지표 교차나 임계값 돌파에서 도출된 이산 이벤트.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingSignal {
    /// 시그널 종류
    pub kind: SignalKind,
    /// 시그널 방향
    pub direction: SignalDirection,
    /// 사람이 읽을 수 있는 설명
    pub description: String,
}

impl TradingSignal {
    /// 종류에 맞는 방향으로 새 시그널을 생성합니다.
    pub fn new(kind: SignalKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            direction: kind.direction(),
            description: description.into(),
        }
    }

    /// 강세 시그널인지 확인합니다.
    pub fn is_bullish(&self) -> bool {
        self.direction == SignalDirection::Bullish
    }

    /// 약세 시그널인지 확인합니다.
    pub fn is_bearish(&self) -> bool {
        self.direction == SignalDirection::Bearish
    }
}

impl fmt::Display for TradingSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}/{}] {}", self.kind, self.direction, self.description)
    }
}
