//! 설정 로드.
//!
//! 서버와 같은 [`AppConfig`]를 사용합니다. 파일 경로는 `--config` 인자,
//! `MACROPULSE_CONFIG` 환경변수, 기본 경로 순으로 결정됩니다.

use std::path::{Path, PathBuf};

use macro_core::AppConfig;
use macro_data::{CsvStore, FredClient};

use crate::Result;

/// 설정 파일 경로 환경변수.
pub const CONFIG_PATH_ENV: &str = "MACROPULSE_CONFIG";

/// Collector 전체 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// 공용 애플리케이션 설정
    pub app: AppConfig,
    /// 설정을 읽은 파일 (기본 경로 사용 시 None)
    pub source: Option<PathBuf>,
}

impl CollectorConfig {
    /// 설정 로드.
    ///
    /// 명시된 파일이 없으면 에러를 반환합니다.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let source = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from));

        let app = match &source {
            Some(file) => AppConfig::load(file)?,
            None => AppConfig::load_default()?,
        };

        Ok(Self { app, source })
    }

    /// 이미 만들어진 설정으로 생성.
    pub fn from_app(app: AppConfig) -> Self {
        Self { app, source: None }
    }

    /// CSV 저장소.
    pub fn store(&self) -> CsvStore {
        CsvStore::new(self.app.data.dir.clone())
    }

    /// 로그 필터 결정.
    ///
    /// `--log-level`이 주어지면 수집기 크레이트들에 그 레벨을 적용하고,
    /// 없으면 설정의 `logging.level`을 사용합니다. 설정 필터에
    /// `macro_collector` 지시어가 없으면 info로 추가합니다.
    pub fn log_filter(&self, cli_level: Option<&str>) -> String {
        match cli_level {
            Some(level) => format!(
                "macro_collector={0},macro_data={0},macro_analytics={0}",
                level
            ),
            None => {
                let configured = self.app.logging.level.trim();
                if configured.contains("macro_collector") {
                    configured.to_string()
                } else if configured.is_empty() {
                    "macro_collector=info".to_string()
                } else {
                    format!("macro_collector=info,{}", configured)
                }
            }
        }
    }

    /// FRED 클라이언트.
    ///
    /// API 키가 없으면 설정 에러.
    pub fn fred_client(&self) -> Result<FredClient> {
        Ok(FredClient::new(&self.app.fred)?)
    }
}
