//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 Arc로 래핑되어 여러 요청 간에 공유됩니다.
//! 학습된 모델 캐시는 `RwLock` 뒤의 `ForecastService`가 보관합니다.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::warn;

use macro_analytics::ForecastService;
use macro_core::AppConfig;
use macro_data::{CsvStore, EconomicDataProvider, FredClient};

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 전체 설정
    pub config: Arc<AppConfig>,

    /// CSV 데이터 저장소
    pub store: CsvStore,

    /// 데이터 Provider (FRED). API 키가 없으면 `None`이며 갱신 요청은 캐시만 초기화합니다.
    pub provider: Option<Arc<dyn EconomicDataProvider>>,

    /// 예측 서비스 - 모델 학습 및 캐시
    pub forecaster: Arc<RwLock<ForecastService>>,

    /// 데이터 갱신 직렬화용 잠금
    pub refresh_lock: Arc<Mutex<()>>,

    /// API 버전
    pub version: String,

    /// 서버 시작 시각
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// 설정에서 상태 생성.
    ///
    /// FRED API 키가 없으면 Provider 없이 시작합니다.
    pub fn new(config: AppConfig) -> Self {
        let provider: Option<Arc<dyn EconomicDataProvider>> = match FredClient::new(&config.fred) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                warn!(error = %e, "FRED Provider 비활성화, 저장된 CSV만 사용합니다");
                None
            }
        };
        Self::with_provider(config, provider)
    }

    /// Provider를 직접 지정하여 상태 생성.
    pub fn with_provider(config: AppConfig, provider: Option<Arc<dyn EconomicDataProvider>>) -> Self {
        let store = CsvStore::new(config.data.dir.clone());
        let forecaster = ForecastService::new(config.model.clone());

        Self {
            config: Arc::new(config),
            store,
            provider,
            forecaster: Arc::new(RwLock::new(forecaster)),
            refresh_lock: Arc::new(Mutex::new(())),
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: Utc::now(),
        }
    }

    /// Provider 설정 여부.
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// 서버 업타임(초) 반환.
    pub fn uptime_secs(&self) -> i64 {
        Utc::now().signed_duration_since(self.started_at).num_seconds()
    }
}

/// 테스트용 상태 생성.
///
/// 고유한 임시 데이터 디렉토리를 사용하며 Provider는 없습니다.
#[cfg(test)]
pub fn create_test_state() -> AppState {
    let mut config = AppConfig::default();
    config.data.dir = std::env::temp_dir().join(format!(
        "macro-api-test-{}-{}",
        std::process::id(),
        TEST_DIR_SEQ.fetch_add(1, std::sync::atomic::Ordering::Relaxed)
    ));
    config.model.n_estimators = 20;
    AppState::with_provider(config, None)
}

#[cfg(test)]
static TEST_DIR_SEQ: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);
