//! 루트 endpoint.

use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

/// 서비스 활성 메시지.
pub const STATUS_MESSAGE: &str = "MacroPulse AI Backend is active 🟢";

#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub status: String,
}

/// GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        status: STATUS_MESSAGE.to_string(),
    })
}

pub fn root_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{app, send};
    use crate::state::create_test_state;
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn test_root_status_message() {
        let (status, body) = send(app(create_test_state()), Method::GET, "/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "status": "MacroPulse AI Backend is active 🟢" }));
    }
}
