//! 내러티브 생성 에러 타입.

use analyst_core::AnalystError;

/// 내러티브 생성 결과 타입.
pub type NarrativeResult<T> = Result<T, NarrativeError>;

/// 내러티브 생성 에러.
#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    #[error("API 키가 설정되지 않았습니다: 환경 변수 {0}")]
    MissingApiKey(String),

    #[error("API 호출 실패: HTTP {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("요청 한도 초과")]
    RateLimited,

    #[error("응답에 내용이 없습니다")]
    EmptyResponse,

    #[error("네트워크 에러: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("직렬화 에러: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<NarrativeError> for AnalystError {
    fn from(err: NarrativeError) -> Self {
        AnalystError::NarrativeUnavailable(err.to_string())
    }
}
