//! MacroPulse API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.
//! 대시보드용 인플레이션 이력, 예측, 필립스 곡선, 경기침체 위험도를 제공합니다.
//!
//! 설정 파일 경로는 `MACROPULSE_CONFIG` 환경변수로 지정하며,
//! 없으면 `config/default.toml`을 (있을 경우) 읽습니다.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{http::StatusCode, middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use macro_api::metrics::setup_metrics_recorder;
use macro_api::middleware::metrics_layer;
use macro_api::routes::create_api_router;
use macro_api::state::AppState;
use macro_core::{init_logging, AppConfig, CorsConfig, LogConfig, SeriesId};

/// 설정 파일 경로 환경변수.
const CONFIG_PATH_ENV: &str = "MACROPULSE_CONFIG";

fn load_config() -> anyhow::Result<AppConfig> {
    let config = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => AppConfig::load(&path).with_context(|| format!("설정 파일 로드 실패: {}", path))?,
        Err(_) => AppConfig::load_default().context("기본 설정 로드 실패")?,
    };
    Ok(config)
}

/// CORS 레이어 생성.
///
/// `cors.origins`가 비어 있으면 모든 origin을 허용합니다 (개발 모드).
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .origins
        .iter()
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        if !config.origins.is_empty() {
            warn!("cors.origins is set but contains no valid origins, allowing any");
        } else {
            warn!("cors.origins not set, allowing any origin (development mode)");
        }
        AllowOrigin::any()
    } else {
        info!("CORS configured with {} allowed origins", origins.len());
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// /metrics 엔드포인트 핸들러.
async fn metrics_handler(
    axum::extract::State(handle): axum::extract::State<PrometheusHandle>,
) -> String {
    handle.render()
}

/// 전체 라우터 생성.
fn create_router(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);
    let cors = cors_layer(&state.config.cors);

    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    Router::new()
        .merge(metrics_router)
        .merge(create_api_router().with_state(state))
        // 메트릭 미들웨어 (모든 요청에 적용)
        .layer(middleware::from_fn(metrics_layer))
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(cors)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let config = load_config()?;

    init_logging(LogConfig::from(&config.logging))
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    info!("Starting MacroPulse API server...");

    let metrics_handle = setup_metrics_recorder().context("Prometheus 레코더 설치 실패")?;
    info!("Prometheus metrics recorder initialized");

    let addr = config.server.bind_addr();
    let state = Arc::new(AppState::new(config));

    info!(
        version = %state.version,
        data_dir = %state.store.dir().display(),
        has_fred = state.has_provider(),
        has_inflation = state.store.has_inflation(),
        has_unemployment = state.store.has_series(SeriesId::Unemployment),
        has_yield_curve = state.store.has_series(SeriesId::YieldSpread),
        "Application state initialized"
    );
    if !state.store.has_inflation() {
        warn!("인플레이션 데이터가 없습니다. `macro-collector fetch` 또는 POST /api/refresh로 수집하세요");
    }

    let app = create_router(state, metrics_handle);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("{} 바인딩 실패", addr))?;
    info!(%addr, "API server listening");
    info!("Metrics available at http://{}/metrics", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
/// 시그널 핸들러 설치에 실패하면 해당 시그널은 무시합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
