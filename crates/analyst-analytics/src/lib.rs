//! 기술적 분석 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 기술적 지표 (SMA, EMA, RSI, MACD)
//! - 지지/저항 레벨 탐지
//! - 추세 분류 및 트레이딩 시그널 생성
//! - 분석 집계 (`StockAnalysis`) 및 오케스트레이션 서비스 (`AnalysisService`)

pub mod aggregate;
pub mod indicators;
pub mod levels;
pub mod service;
pub mod signals;
pub mod trend_classifier;

// Indicators 모듈 re-exports
pub use indicators::{
    EmaParams, IndicatorEngine, IndicatorError, IndicatorResult, MacdParams, MomentumCalculator,
    RsiParams, SmaParams, TrendIndicators,
};

pub use aggregate::StockAnalysis;
pub use levels::{DetectedLevels, LevelDetector, LevelParams};
pub use service::AnalysisService;
pub use signals::{SignalGenerator, SignalThresholds};
pub use trend_classifier::{TrendAssessment, TrendClassifier};
