//! 데이터 모듈 오류 타입.

use analyst_core::AnalystError;
use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 데이터 소스 연결 오류
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// 데이터 가져오기 오류 (외부 소스)
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// 파싱 오류
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 종목 데이터를 찾을 수 없음
    #[error("Not found: {0}")]
    NotFound(String),

    /// 잘못된 데이터 형식
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// 타임아웃 오류
    #[error("Operation timeout: {0}")]
    Timeout(String),
}

impl From<AnalystError> for DataError {
    fn from(err: AnalystError) -> Self {
        DataError::InvalidData(err.to_string())
    }
}

impl From<DataError> for AnalystError {
    fn from(err: DataError) -> Self {
        AnalystError::DataUnavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_error_maps_to_data_unavailable() {
        let err: AnalystError = DataError::NotFound("AAPL".to_string()).into();
        assert_eq!(err, AnalystError::DataUnavailable("Not found: AAPL".to_string()));
        assert!(err.is_retryable());
    }
}
