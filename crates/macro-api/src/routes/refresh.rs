//! 데이터 갱신 endpoint.
//!
//! FRED에서 세 시계열을 다시 받아 CSV를 덮어쓰고 모델 캐시를 비웁니다.
//! 모델은 다음 예측 요청에서 새 데이터로 학습됩니다.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use macro_data::{FetchSummary, MacroFetcher};

use crate::error::{fetch_error, ApiResult};
use crate::metrics::record_refresh;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// FRED 재수집 수행 여부 (Provider 미설정 시 false)
    pub fetched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<FetchSummary>,
    pub models_cleared: bool,
}

/// POST /api/refresh
///
/// 동시에 들어온 갱신 요청은 순서대로 처리됩니다.
/// 수집이 실패하면 기존 CSV와 캐시는 유지되고 502를 반환합니다.
pub async fn refresh_data(State(state): State<Arc<AppState>>) -> ApiResult<Json<RefreshResponse>> {
    let _guard = state.refresh_lock.lock().await;

    let summary = match &state.provider {
        Some(provider) => {
            let fetcher = MacroFetcher::new(Arc::clone(provider));
            match fetcher.run(&state.store).await {
                Ok(summary) => {
                    record_refresh("success");
                    Some(summary)
                }
                Err(e) => {
                    record_refresh("failure");
                    return Err(fetch_error(e));
                }
            }
        }
        None => {
            info!("FRED Provider 미설정, 모델 캐시만 초기화");
            record_refresh("skipped");
            None
        }
    };

    state.forecaster.write().await.invalidate();

    Ok(Json(RefreshResponse {
        fetched: summary.is_some(),
        summary,
        models_cleared: true,
    }))
}

pub fn refresh_router() -> Router<Arc<AppState>> {
    Router::new().route("/", post(refresh_data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{app, cleanup, month, sample_spread, send};
    use crate::state::{create_test_state, AppState};
    use axum::http::{Method, StatusCode};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use macro_core::{Observation, SeriesId, TimeSeries};
    use macro_data::{EconomicDataProvider, StaticProvider};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn monthly(id: SeriesId, values: impl Iterator<Item = f64>) -> TimeSeries {
        let observations = values
            .enumerate()
            .map(|(i, v)| Observation::new(month(i), Some(v)))
            .collect();
        TimeSeries::new(id, observations)
    }

    fn full_provider() -> StaticProvider {
        StaticProvider::new()
            .with_series(monthly(SeriesId::Cpi, (0..36).map(|i| 170.0 * 1.002f64.powi(i))))
            .with_series(monthly(SeriesId::Unemployment, (0..36).map(|i| 4.0 + (i % 5) as f64 * 0.1)))
            .with_series(sample_spread(&[Some(0.4), Some(0.1), Some(-0.3)]))
    }

    fn state_with(provider: Arc<dyn EconomicDataProvider>) -> AppState {
        let base = create_test_state();
        AppState::with_provider((*base.config).clone(), Some(provider))
    }

    fn state_with_provider() -> AppState {
        state_with(Arc::new(full_provider()))
    }

    /// 동시에 진행 중인 조회 수를 기록하는 Provider.
    #[derive(Default)]
    struct CountingProvider {
        inner: StaticProvider,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EconomicDataProvider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }

        async fn fetch_series(&self, id: SeriesId, start: NaiveDate) -> macro_data::Result<TimeSeries> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.inner.fetch_series(id, start).await
        }
    }

    #[tokio::test]
    async fn test_refresh_fetches_and_clears_models() {
        let state = state_with_provider();
        let (status, body) = send(app(state.clone()), Method::POST, "/api/refresh", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fetched"], true);
        assert_eq!(body["models_cleared"], true);
        assert_eq!(body["summary"]["inflation_rows"], 24);
        assert_eq!(body["summary"]["yield_curve_rows"], 3);
        assert_eq!(body["summary"]["latest_yield_spread"], -0.3);

        assert!(state.store.has_inflation());
        let (status, _) = send(app(state.clone()), Method::GET, "/api/predict", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(state.forecaster.read().await.status().forecast_cached);

        let (status, _) = send(app(state.clone()), Method::POST, "/api/refresh", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!state.forecaster.read().await.status().forecast_cached);

        cleanup(&state);
    }

    #[tokio::test]
    async fn test_refresh_without_provider() {
        let state = create_test_state();
        let (status, body) = send(app(state), Method::POST, "/api/refresh", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fetched"], false);
        assert!(body.get("summary").is_none());
    }

    #[tokio::test]
    async fn test_refresh_missing_upstream_series_is_bad_gateway() {
        // CPI만 등록된 Provider → 금리차 조회 실패
        let state = state_with(Arc::new(
            StaticProvider::new().with_series(monthly(SeriesId::Cpi, (0..13).map(|i| 100.0 + i as f64))),
        ));

        let (status, body) = send(app(state.clone()), Method::POST, "/api/refresh", None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "FETCH_FAILED");
        // 조회가 끝나기 전에는 아무 파일도 쓰지 않음
        assert!(!state.store.has_inflation());

        cleanup(&state);
    }

    #[tokio::test]
    async fn test_concurrent_refreshes_are_serialized() {
        let provider = Arc::new(CountingProvider {
            inner: full_provider(),
            ..Default::default()
        });
        let state = state_with(provider.clone());

        let (first, second) = tokio::join!(
            send(app(state.clone()), Method::POST, "/api/refresh", None),
            send(app(state.clone()), Method::POST, "/api/refresh", None),
        );
        assert_eq!(first.0, StatusCode::OK);
        assert_eq!(second.0, StatusCode::OK);

        assert_eq!(provider.calls.load(Ordering::SeqCst), 6);
        assert_eq!(provider.max_in_flight.load(Ordering::SeqCst), 1);
        assert_eq!(provider.in_flight.load(Ordering::SeqCst), 0);

        cleanup(&state);
    }
}
