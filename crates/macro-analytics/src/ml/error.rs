//! ML 모듈 에러 타입.

use thiserror::Error;

/// 모델 학습/예측에서 발생할 수 있는 에러.
#[derive(Debug, Error)]
pub enum MlError {
    /// 유효하지 않은 입력 데이터 (빈 행렬, 행 길이 불일치 등)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 학습을 위한 데이터 부족
    #[error("Insufficient data: need {required} samples, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// 정규방정식 행렬이 특이(singular)
    #[error("Singular system: {0}")]
    Singular(String),

    /// 학습 전에 예측 호출
    #[error("Model not fitted: {0}")]
    NotFitted(String),

    /// feature 생성 에러
    #[error("Feature extraction error: {0}")]
    FeatureExtraction(String),
}

/// ML 작업을 위한 Result 타입.
pub type MlResult<T> = Result<T, MlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MlError::InsufficientData {
            required: 4,
            actual: 2,
        };
        assert_eq!(err.to_string(), "Insufficient data: need 4 samples, got 2");

        let err = MlError::NotFitted("random_forest".to_string());
        assert_eq!(err.to_string(), "Model not fitted: random_forest");
    }
}
