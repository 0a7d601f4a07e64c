//! # Analyst Core
//!
//! 기술적 분석 엔진의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 분석 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - OHLCV 가격 바 및 가격 시계열
//! - 지표 집합 (SMA, RSI, MACD)
//! - 지지/저항 레벨, 트레이딩 시그널, 분석 결과
//! - 시장 데이터 / 내러티브 생성 협력자 trait
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
