//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 데이터 파일 또는 시계열을 찾을 수 없음
    #[error("Data not found: {0}")]
    NotFound(String),

    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(String),

    /// 직렬화/역직렬화 오류
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// 잘못된 데이터 형식
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// 설정 오류 (API 키 누락 등)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// 외부 소스 요청 실패
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// 외부 API가 오류 상태 코드를 반환
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// 타임아웃 오류
    #[error("Operation timeout: {0}")]
    Timeout(String),

    /// 파싱 오류
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl DataError {
    /// 재시도로 복구될 수 있는 오류인지 확인.
    pub fn is_transient(&self) -> bool {
        match self {
            DataError::Timeout(_) | DataError::FetchError(_) => true,
            DataError::ApiError { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => DataError::NotFound(err.to_string()),
            _ => DataError::Io(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::SerializationError(err.to_string())
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            DataError::Io(err.to_string())
        } else {
            DataError::SerializationError(err.to_string())
        }
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DataError::Timeout(err.to_string())
        } else if err.is_decode() {
            DataError::ParseError(err.to_string())
        } else {
            DataError::FetchError(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors() {
        assert!(DataError::Timeout("30s".to_string()).is_transient());
        assert!(DataError::ApiError {
            status: 503,
            message: "unavailable".to_string()
        }
        .is_transient());
        assert!(!DataError::ApiError {
            status: 400,
            message: "bad api key".to_string()
        }
        .is_transient());
        assert!(!DataError::NotFound("x".to_string()).is_transient());
    }

    #[test]
    fn test_io_not_found_maps_to_not_found() {
        let err: DataError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, DataError::NotFound(_)));
    }
}
