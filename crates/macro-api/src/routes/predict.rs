//! 예측 endpoint.
//!
//! - `GET /api/predict` - Random Forest 다음 달 인플레이션 예측
//! - `POST /api/predict` - 필립스 곡선 기반 인플레이션 추정
//!
//! 학습은 CPU 작업이므로 `spawn_blocking`에서 실행하며,
//! 모델 캐시 쓰기 잠금을 작업과 함께 넘깁니다.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use macro_analytics::{InflationForecast, PhillipsPrediction};

use crate::error::{data_error, internal_error, invalid_input, ml_error, ApiResult};
use crate::metrics::{record_forecast, record_model_duration};
use crate::routes::phillips::load_phillips_points;
use crate::state::AppState;

/// 필립스 곡선 예측 요청.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhillipsRequest {
    /// 실업률 (%)
    pub unemployment_rate: f64,
}

/// GET /api/predict
pub async fn get_forecast(State(state): State<Arc<AppState>>) -> ApiResult<Json<InflationForecast>> {
    let records = state.store.load_inflation().map_err(data_error)?;

    let started = Instant::now();
    let mut service = state.forecaster.clone().write_owned().await;
    let forecast = tokio::task::spawn_blocking(move || service.forecast_inflation(&records))
        .await
        .map_err(|e| internal_error(format!("예측 작업 실패: {}", e)))?
        .map_err(ml_error)?;

    record_model_duration("random_forest", started.elapsed().as_secs_f64());
    record_forecast(forecast.direction.as_str());

    Ok(Json(forecast))
}

/// POST /api/predict
pub async fn predict_phillips(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PhillipsRequest>, JsonRejection>,
) -> ApiResult<Json<PhillipsPrediction>> {
    let Json(request) = payload.map_err(|e| invalid_input(e.body_text()))?;
    let points = load_phillips_points(&state)?;

    let started = Instant::now();
    let mut service = state.forecaster.clone().write_owned().await;
    let prediction = tokio::task::spawn_blocking(move || {
        let model = service.phillips_model(&points)?;
        service.predict_phillips(&model, request.unemployment_rate)
    })
    .await
    .map_err(|e| internal_error(format!("예측 작업 실패: {}", e)))?
    .map_err(ml_error)?;

    record_model_duration("phillips_polynomial", started.elapsed().as_secs_f64());

    Ok(Json(prediction))
}

pub fn predict_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_forecast).post(predict_phillips))
}
