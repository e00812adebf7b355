//! MacroPulse 공통 에러 타입.
//!
//! 도메인 계층의 에러는 각 크레이트(`DataError`, `MlError`)가 따로 정의하며,
//! 여기에는 설정 로드 에러만 둡니다.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum MacroError {
    /// 설정 에러 (파일 파싱, 환경 변수 타입 불일치)
    #[error("설정 에러: {0}")]
    Config(String),
}

/// MacroPulse 작업을 위한 Result 타입.
pub type MacroResult<T> = Result<T, MacroError>;

impl From<config::ConfigError> for MacroError {
    fn from(err: config::ConfigError) -> Self {
        MacroError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_conversion() {
        let err: MacroError = config::ConfigError::NotFound("server.port".to_string()).into();
        assert!(matches!(err, MacroError::Config(_)));
        assert!(err.to_string().starts_with("설정 에러: "));
    }
}
