//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/` - 서비스 상태 메시지
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 데이터 파일/모델 캐시 상태 (readiness)
//! - `/api/inflation` - 월간 인플레이션 이력
//! - `/api/predict` - 다음 달 인플레이션 예측 (GET), 필립스 곡선 예측 (POST)
//! - `/api/phillips-curve` - 실업률/인플레이션 산점도
//! - `/api/risk` - 장단기 금리차 기반 경기침체 위험도
//! - `/api/refresh` - FRED 재수집 및 모델 캐시 초기화

pub mod health;
pub mod inflation;
pub mod phillips;
pub mod predict;
pub mod refresh;
pub mod risk;
pub mod root;

pub use health::{health_router, Availability, DataFileReport, ReadinessReport};
pub use inflation::inflation_router;
pub use phillips::{phillips_router, PhillipsCurvePoint};
pub use predict::{predict_router, PhillipsRequest};
pub use refresh::{refresh_router, RefreshResponse};
pub use risk::risk_router;
pub use root::{root_router, RootResponse, STATUS_MESSAGE};

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(root_router())
        .nest("/health", health_router())
        .nest("/api/inflation", inflation_router())
        .nest("/api/predict", predict_router())
        .nest("/api/phillips-curve", phillips_router())
        .nest("/api/risk", risk_router())
        .nest("/api/refresh", refresh_router())
}
