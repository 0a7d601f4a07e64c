//! 분석 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 설정/로깅/협력자 조립 (`commands::AppContext`)
//! - 종목 분석, 시세 조회, 주기적 감시 명령
//! - 텍스트/JSON 보고서 출력

pub mod commands;
pub mod output;
