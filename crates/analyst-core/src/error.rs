//! 분석 시스템의 에러 타입.
//!
//! 엔진 에러(잘못된 파라미터, 데이터 부족)와 외부 협력자 에러
//! (시장 데이터, 내러티브 생성)를 하나의 분류 체계로 정의합니다.

use thiserror::Error;

/// 핵심 분석 에러.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalystError {
    /// 잘못된 설정 파라미터 (예: 0 이하의 기간, fast >= slow)
    #[error("잘못된 파라미터 `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// 지표 워밍업에 필요한 길이보다 시계열이 짧음
    #[error("데이터 부족 ({indicator}): 필요 {required}개, 제공 {provided}개")]
    InsufficientData {
        indicator: String,
        required: usize,
        provided: usize,
    },

    /// 가격 바 불변식 위반
    #[error("잘못된 가격 바: {0}")]
    InvalidBar(String),

    /// 가격 시계열 불변식 위반
    #[error("잘못된 가격 시계열: {0}")]
    InvalidSeries(String),

    /// 시장 데이터 제공자 실패
    #[error("시장 데이터를 사용할 수 없음: {0}")]
    DataUnavailable(String),

    /// 내러티브 생성기 실패
    #[error("내러티브를 사용할 수 없음: {0}")]
    NarrativeUnavailable(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),
}

/// 분석 작업을 위한 Result 타입.
pub type AnalystResult<T> = Result<T, AnalystError>;

impl AnalystError {
    /// 파라미터 에러를 생성합니다.
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalystError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// 외부 협력자 호출을 다시 시도할 수 있는 에러인지 확인합니다.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AnalystError::DataUnavailable(_) | AnalystError::NarrativeUnavailable(_)
        )
    }

    /// 더 긴 시계열로 다시 요청하면 해결되는 에러인지 확인합니다.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AnalystError::InsufficientData { .. })
    }

    /// 데이터 부족 에러라면 필요한 최소 바 개수를 반환합니다.
    pub fn required_bars(&self) -> Option<usize> {
        match self {
            AnalystError::InsufficientData { required, .. } => Some(*required),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AnalystError {
    fn from(err: serde_json::Error) -> Self {
        AnalystError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for AnalystError {
    fn from(err: config::ConfigError) -> Self {
        AnalystError::Config(err.to_string())
    }
}
