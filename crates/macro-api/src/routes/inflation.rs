//! 인플레이션 이력 endpoint.

use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use macro_core::InflationRecord;

use crate::error::{data_error, ApiResult};
use crate::state::AppState;

/// 저장된 월간 인플레이션 레코드 전체.
///
/// 결측값은 `null`로 그대로 내보냅니다.
/// GET /api/inflation
pub async fn get_inflation(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<InflationRecord>>> {
    let records = state.store.load_inflation().map_err(data_error)?;
    Ok(Json(records))
}

pub fn inflation_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_inflation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{app, cleanup, month, sample_inflation, send};
    use crate::state::create_test_state;
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn test_inflation_records_keep_nulls() {
        let state = create_test_state();
        let mut records = sample_inflation(3);
        records[1].inflation_yoy_pct = None;
        state.store.save_inflation(&records).unwrap();

        let (status, body) = send(app(state.clone()), Method::GET, "/api/inflation", None).await;

        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["date"], month(0).to_string());
        assert!(rows[1]["inflation_yoy_pct"].is_null());
        assert!(rows[1]["cpi_value"].is_number());

        cleanup(&state);
    }

    #[tokio::test]
    async fn test_inflation_missing_file() {
        let (status, body) = send(app(create_test_state()), Method::GET, "/api/inflation", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "DATA_NOT_FOUND");
    }
}
