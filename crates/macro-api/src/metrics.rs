//! Prometheus 메트릭 설정 및 유틸리티.
//!
//! HTTP 요청 메트릭과 모델/수집 메트릭을 기록하고 `/metrics` 엔드포인트로 노출합니다.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

/// 매칭되지 않은 경로의 라벨 값.
pub const UNMATCHED_PATH: &str = "<unmatched>";

/// Prometheus 메트릭 레코더를 설치하고 핸들을 반환합니다.
///
/// 레코더가 이미 설치되어 있으면 에러를 반환합니다.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
        )?
        .set_buckets_for_metric(
            Matcher::Full("model_training_duration_seconds".to_string()),
            &[0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0],
        )?
        .install_recorder()
}

// ============================================================================
// HTTP 메트릭
// ============================================================================

/// HTTP 요청 카운터 증가.
pub fn record_http_request(method: &str, path: &str) {
    counter!("http_requests_total", "method" => method.to_string(), "path" => path.to_string())
        .increment(1);
}

/// HTTP 응답 카운터 증가.
pub fn record_http_response(method: &str, path: &str, status: u16) {
    counter!(
        "http_responses_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// HTTP 요청 지속 시간 기록.
pub fn record_http_duration(method: &str, path: &str, duration_secs: f64) {
    histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_secs);
}

// ============================================================================
// 도메인 메트릭
// ============================================================================

/// 모델 학습 시간 기록.
///
/// 캐시 적중 여부와 관계없이 요청 처리에 걸린 시간을 기록합니다.
pub fn record_model_duration(model: &str, duration_secs: f64) {
    histogram!("model_training_duration_seconds", "model" => model.to_string())
        .record(duration_secs);
}

/// 예측 방향 카운터 증가.
pub fn record_forecast(direction: &str) {
    counter!("inflation_forecasts_total", "direction" => direction.to_string()).increment(1);
}

/// 최신 금리차 게이지 설정.
pub fn set_yield_spread(value: f64) {
    gauge!("yield_spread_latest").set(value);
}

/// 데이터 갱신 결과 카운터 증가.
pub fn record_refresh(outcome: &str) {
    counter!("data_refresh_total", "outcome" => outcome.to_string()).increment(1);
}
