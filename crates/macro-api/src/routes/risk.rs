//! 경기침체 위험도 endpoint.

use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;
use tracing::debug;

use macro_core::{RiskAssessment, SeriesId};
use macro_data::DataError;

use crate::error::{data_error, ApiResult};
use crate::metrics::set_yield_spread;
use crate::state::AppState;

/// 최신 장단기 금리차(T10Y2Y)로 위험도 평가.
///
/// 결측이 아닌 마지막 관측값을 사용합니다.
/// GET /api/risk
pub async fn get_risk(State(state): State<Arc<AppState>>) -> ApiResult<Json<RiskAssessment>> {
    let series = state
        .store
        .load_series(SeriesId::YieldSpread)
        .map_err(data_error)?;

    let latest = series
        .latest_valid()
        .and_then(|obs| obs.value.map(|value| (obs.date, value)));
    let Some((as_of, spread)) = latest else {
        return Err(data_error(DataError::NotFound(
            "유효한 장단기 금리차 관측값이 없습니다".to_string(),
        )));
    };

    set_yield_spread(spread);
    let assessment = RiskAssessment::evaluate(spread, as_of);
    debug!(spread, risk = %assessment.risk, "경기침체 위험도 평가");

    Ok(Json(assessment))
}

pub fn risk_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_risk))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{app, cleanup, sample_spread, seeded_state, send};
    use crate::state::create_test_state;
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn test_risk_uses_latest_valid_spread() {
        // 마지막 값은 결측, 그 이전 값 -0.2로 평가
        let state = seeded_state();
        let (status, body) = send(app(state.clone()), Method::GET, "/api/risk", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["yield_spread"], -0.2);
        assert_eq!(body["level"], "High Risk (Inverted Curve)");
        assert_eq!(body["color"], "red");
        assert_eq!(body["as_of"], "2024-01-03");

        cleanup(&state);
    }

    #[tokio::test]
    async fn test_risk_levels() {
        for (spread, color) in [(0.3, "yellow"), (1.1, "green")] {
            let state = create_test_state();
            state.store.save_series(&sample_spread(&[Some(spread)])).unwrap();

            let (status, body) = send(app(state.clone()), Method::GET, "/api/risk", None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["color"], color);

            cleanup(&state);
        }
    }

    #[tokio::test]
    async fn test_risk_without_valid_values() {
        let state = create_test_state();
        state.store.save_series(&sample_spread(&[None, None])).unwrap();

        let (status, body) = send(app(state.clone()), Method::GET, "/api/risk", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "DATA_NOT_FOUND");

        cleanup(&state);
    }
}
