//! 필립스 곡선 산점도 endpoint.

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use macro_analytics::ml::pair_phillips;
use macro_core::{PhillipsPoint, SeriesId};

use crate::error::{data_error, ApiResult};
use crate::state::AppState;

/// 산점도 한 점.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhillipsCurvePoint {
    pub unemployment: f64,
    pub inflation: f64,
}

impl From<&PhillipsPoint> for PhillipsCurvePoint {
    fn from(point: &PhillipsPoint) -> Self {
        Self {
            unemployment: point.unemployment,
            inflation: point.inflation,
        }
    }
}

/// 저장된 실업률과 인플레이션을 날짜로 결합한 데이터셋.
pub(crate) fn load_phillips_points(state: &AppState) -> ApiResult<Vec<PhillipsPoint>> {
    let inflation = state.store.load_inflation().map_err(data_error)?;
    let unemployment = state
        .store
        .load_series(SeriesId::Unemployment)
        .map_err(data_error)?;
    Ok(pair_phillips(&unemployment, &inflation))
}

/// GET /api/phillips-curve
pub async fn get_phillips_curve(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<PhillipsCurvePoint>>> {
    let points = load_phillips_points(&state)?;
    Ok(Json(points.iter().map(PhillipsCurvePoint::from).collect()))
}

pub fn phillips_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_phillips_curve))
}
