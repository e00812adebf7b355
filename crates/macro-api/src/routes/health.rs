//! 헬스 체크 endpoint.
//!
//! `/health`는 프로세스 생존 여부만, `/health/ready`는 예측에 필요한
//! CSV 파일과 FRED 설정, 모델 캐시 상태까지 보고합니다.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use macro_analytics::ModelStatus;
use macro_core::SeriesId;

use crate::state::AppState;

/// 구성 요소 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Up,
    Down,
    NotConfigured,
}

/// 데이터 파일 하나의 상태.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataFileReport {
    pub status: Availability,
    /// 확인한 파일 경로
    pub path: String,
}

impl DataFileReport {
    fn inspect(state: &AppState, id: SeriesId) -> Self {
        let path = state.store.series_path(id);
        let status = if path.is_file() {
            Availability::Up
        } else {
            Availability::Down
        };
        Self {
            status,
            path: path.display().to_string(),
        }
    }

    fn is_missing(&self) -> bool {
        self.status == Availability::Down
    }
}

/// 준비 상태 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessReport {
    /// "healthy" 또는 "degraded" (파일 누락)
    pub status: String,
    pub version: String,
    pub uptime_secs: i64,
    pub checked_at: DateTime<Utc>,
    pub components: Components,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Components {
    pub inflation_data: DataFileReport,
    pub unemployment_data: DataFileReport,
    pub yield_curve_data: DataFileReport,
    /// FRED API 키 설정 여부
    pub fred: Availability,
    pub models: ModelStatus,
}

/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

/// GET /health/ready
///
/// 인플레이션 파일이 없으면 예측을 할 수 없으므로 503을 반환합니다.
/// 실업률이나 금리차 파일 누락은 degraded로만 표시합니다.
pub async fn health_ready(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ReadinessReport>) {
    let components = Components {
        inflation_data: DataFileReport::inspect(&state, SeriesId::Cpi),
        unemployment_data: DataFileReport::inspect(&state, SeriesId::Unemployment),
        yield_curve_data: DataFileReport::inspect(&state, SeriesId::YieldSpread),
        fred: if state.has_provider() {
            Availability::Up
        } else {
            Availability::NotConfigured
        },
        models: state.forecaster.read().await.status(),
    };

    let degraded = components.inflation_data.is_missing()
        || components.unemployment_data.is_missing()
        || components.yield_curve_data.is_missing();
    let code = if components.inflation_data.is_missing() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    let report = ReadinessReport {
        status: if degraded { "degraded" } else { "healthy" }.to_string(),
        version: state.version.clone(),
        uptime_secs: state.uptime_secs(),
        checked_at: Utc::now(),
        components,
    };

    (code, Json(report))
}

pub fn health_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(health_check))
        .route("/ready", get(health_ready))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{app, cleanup, sample_inflation, seeded_state, send};
    use crate::state::create_test_state;
    use axum::http::Method;

    #[tokio::test]
    async fn test_liveness() {
        let (status, _) = send(app(create_test_state()), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_with_all_files() {
        let state = seeded_state();
        let (status, body) = send(app(state.clone()), Method::GET, "/health/ready", None).await;

        assert_eq!(status, StatusCode::OK);
        let report: ReadinessReport = serde_json::from_value(body).unwrap();
        assert_eq!(report.status, "healthy");
        assert!(!report.version.is_empty());
        assert_eq!(report.components.inflation_data.status, Availability::Up);
        assert_eq!(report.components.fred, Availability::NotConfigured);
        assert!(!report.components.models.forecast_cached);

        cleanup(&state);
    }

    #[tokio::test]
    async fn test_ready_without_inflation() {
        let (status, body) = send(app(create_test_state()), Method::GET, "/health/ready", None).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["components"]["inflation_data"]["status"], "down");
    }

    #[tokio::test]
    async fn test_ready_degraded_when_secondary_file_missing() {
        let state = create_test_state();
        state.store.save_inflation(&sample_inflation(6)).unwrap();

        let (status, body) = send(app(state.clone()), Method::GET, "/health/ready", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["components"]["yield_curve_data"]["status"], "down");
        assert_eq!(body["components"]["fred"], "not_configured");

        cleanup(&state);
    }
}
