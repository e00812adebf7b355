//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.
//!
//! | 코드 | HTTP 상태 | 원인 |
//! |------|-----------|------|
//! | `DATA_NOT_FOUND` | 404 | 데이터 파일 없음, 유효한 관측값 없음 |
//! | `INSUFFICIENT_DATA` | 422 | 학습 행 부족, 특이 행렬 |
//! | `INVALID_INPUT` | 400 | 요청 본문 파싱 실패, 잘못된 입력값 |
//! | `FETCH_FAILED` | 502 | FRED 호출 실패, 갱신 중 시계열 누락 |
//! | `INTERNAL_ERROR` | 500 | 그 외 |

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use macro_analytics::MlError;
use macro_data::DataError;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "DATA_NOT_FOUND",
///   "message": "data/historical_inflation.csv 파일이 없습니다. 먼저 데이터를 수집하세요",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "DATA_NOT_FOUND", "INVALID_INPUT")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 추가 에러 상세 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// 에러 발생 타임스탬프 (Unix timestamp, 선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// 상세 정보 포함 에러 생성.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            details: Some(details),
            ..Self::new(code, message)
        }
    }
}

/// API 핸들러 에러 타입.
pub type ApiError = (StatusCode, Json<ApiErrorResponse>);

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, ApiError>;

/// 상태 코드와 응답 본문으로 에러 생성. 5xx는 error, 4xx는 warn으로 기록.
pub fn api_error(status: StatusCode, body: ApiErrorResponse) -> ApiError {
    if status.is_server_error() {
        error!(code = %body.code, status = status.as_u16(), "{}", body.message);
    } else {
        warn!(code = %body.code, status = status.as_u16(), "{}", body.message);
    }
    (status, Json(body))
}

/// 400 INVALID_INPUT.
pub fn invalid_input(message: impl Into<String>) -> ApiError {
    api_error(
        StatusCode::BAD_REQUEST,
        ApiErrorResponse::new("INVALID_INPUT", message),
    )
}

/// 500 INTERNAL_ERROR.
pub fn internal_error(message: impl Into<String>) -> ApiError {
    api_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        ApiErrorResponse::new("INTERNAL_ERROR", message),
    )
}

/// 데이터 계층 에러 변환.
pub fn data_error(err: DataError) -> ApiError {
    let message = err.to_string();
    match err {
        DataError::NotFound(_) => api_error(
            StatusCode::NOT_FOUND,
            ApiErrorResponse::new("DATA_NOT_FOUND", message),
        ),
        DataError::ApiError { status, .. } => api_error(
            StatusCode::BAD_GATEWAY,
            ApiErrorResponse::with_details(
                "FETCH_FAILED",
                message,
                serde_json::json!({ "upstream_status": status }),
            ),
        ),
        DataError::FetchError(_) | DataError::Timeout(_) => api_error(
            StatusCode::BAD_GATEWAY,
            ApiErrorResponse::new("FETCH_FAILED", message),
        ),
        _ => api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorResponse::new("INTERNAL_ERROR", message),
        ),
    }
}

/// 외부 수집 에러 변환 (POST /api/refresh).
///
/// 로컬 파일 쓰기 실패를 제외하면 모두 upstream 문제이므로 502로 응답합니다.
/// Provider가 시계열을 돌려주지 않은 경우(`NotFound`)도 포함됩니다.
pub fn fetch_error(err: DataError) -> ApiError {
    match err {
        DataError::Io(_) | DataError::SerializationError(_) => data_error(err),
        _ => {
            let mut details = serde_json::json!({ "transient": err.is_transient() });
            if let DataError::ApiError { status, .. } = &err {
                details["upstream_status"] = serde_json::json!(status);
            }
            api_error(
                StatusCode::BAD_GATEWAY,
                ApiErrorResponse::with_details("FETCH_FAILED", err.to_string(), details),
            )
        }
    }
}

/// 모델 에러 변환.
pub fn ml_error(err: MlError) -> ApiError {
    let message = err.to_string();
    match err {
        MlError::InsufficientData { required, actual } => api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            ApiErrorResponse::with_details(
                "INSUFFICIENT_DATA",
                message,
                serde_json::json!({ "required": required, "actual": actual }),
            ),
        ),
        MlError::Singular(_) => api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            ApiErrorResponse::new("INSUFFICIENT_DATA", message),
        ),
        MlError::InvalidInput(_) => api_error(
            StatusCode::BAD_REQUEST,
            ApiErrorResponse::new("INVALID_INPUT", message),
        ),
        MlError::NotFitted(_) | MlError::FeatureExtraction(_) => api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorResponse::new("INTERNAL_ERROR", message),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_response_new() {
        let error = ApiErrorResponse::new("TEST_ERROR", "Test message");
        assert_eq!(error.code, "TEST_ERROR");
        assert_eq!(error.message, "Test message");
        assert!(error.timestamp.is_some());
        assert!(error.details.is_none());

        let json = serde_json::to_string(&error).unwrap();
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_data_error_mapping() {
        let (status, Json(body)) = data_error(DataError::NotFound("missing".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "DATA_NOT_FOUND");

        let (status, Json(body)) = data_error(DataError::ApiError {
            status: 400,
            message: "Bad Request.  The value for variable api_key is not registered.".into(),
        });
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.code, "FETCH_FAILED");
        assert_eq!(body.details.unwrap()["upstream_status"], 400);

        let (status, _) = data_error(DataError::Io("disk".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_fetch_error_mapping() {
        let (status, Json(body)) = fetch_error(DataError::NotFound("T10Y2Y".into()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.code, "FETCH_FAILED");
        assert_eq!(body.details.unwrap()["transient"], false);

        let (status, Json(body)) = fetch_error(DataError::ApiError {
            status: 503,
            message: "unavailable".into(),
        });
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let details = body.details.unwrap();
        assert_eq!(details["upstream_status"], 503);
        assert_eq!(details["transient"], true);

        // 로컬 저장 실패는 내부 에러
        let (status, Json(body)) = fetch_error(DataError::Io("disk full".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "INTERNAL_ERROR");
    }

    #[test]
    fn test_ml_error_mapping() {
        let (status, Json(body)) = ml_error(MlError::InsufficientData {
            required: 5,
            actual: 2,
        });
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.code, "INSUFFICIENT_DATA");
        assert_eq!(body.details.unwrap()["required"], 5);

        let (status, Json(body)) = ml_error(MlError::InvalidInput("NaN".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "INVALID_INPUT");
    }
}
