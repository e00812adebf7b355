//! 에러 타입 정의.

use thiserror::Error;

use macro_analytics::MlError;
use macro_core::MacroError;
use macro_data::DataError;

/// Collector 에러 타입
#[derive(Debug, Error)]
pub enum CollectorError {
    /// 설정 에러
    #[error("Configuration error: {0}")]
    Config(String),

    /// 데이터 소스 또는 CSV 에러
    #[error(transparent)]
    Data(#[from] DataError),

    /// 모델 학습/예측 에러
    #[error(transparent)]
    Model(#[from] MlError),

    /// 결과 출력 에러
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl From<MacroError> for CollectorError {
    fn from(err: MacroError) -> Self {
        match err {
            MacroError::Config(msg) => Self::Config(msg),
        }
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, CollectorError>;
