//! 설정 관리.
//!
//! 설정 우선순위 (낮음 → 높음):
//! 1. 구조체 기본값
//! 2. TOML 파일 (`config/default.toml`, 선택)
//! 3. `MACRO_` 접두사 환경 변수 (예: `MACRO_SERVER__PORT=9000`)
//! 4. 원본 배포 호환용 단축 변수: `FRED_API_KEY`, `PORT`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::MacroResult;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// FRED API 설정
    #[serde(default)]
    pub fred: FredConfig,
    /// CSV 데이터 저장 설정
    #[serde(default)]
    pub data: DataConfig,
    /// 모델 하이퍼파라미터
    #[serde(default)]
    pub model: ModelConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingSettings,
    /// CORS 설정
    #[serde(default)]
    pub cors: CorsConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// `host:port` 형식의 바인딩 주소.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// FRED (Federal Reserve Economic Data) API 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FredConfig {
    /// API 키 (없으면 수집 기능 비활성화)
    pub api_key: Option<String>,
    /// REST API 기본 URL
    pub base_url: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for FredConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.stlouisfed.org/fred".to_string(),
            timeout_secs: 30,
        }
    }
}

/// CSV 데이터 저장 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    /// CSV 파일 디렉토리
    pub dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
        }
    }
}

/// 모델 하이퍼파라미터.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Random Forest 트리 개수
    pub n_estimators: usize,
    /// 부트스트랩 샘플링 시드
    pub random_state: u64,
    /// 트리 최대 깊이 (None이면 제한 없음)
    pub max_depth: Option<usize>,
    /// 노드 분할에 필요한 최소 샘플 수
    pub min_samples_split: usize,
    /// 리프 노드 최소 샘플 수
    pub min_samples_leaf: usize,
    /// 인플레이션 lag feature 개수
    pub lags: usize,
    /// 필립스 곡선 다항식 차수
    pub phillips_degree: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            random_state: 42,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            lags: 3,
            phillips_degree: 2,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// 로그 레벨 필터
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "macro_api=info,macro_data=info,macro_analytics=info,tower_http=debug"
                .to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// CORS 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// 허용 origin 목록 (비어 있으면 모든 origin 허용)
    pub origins: Vec<String>,
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 에러를 반환합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> MacroResult<Self> {
        Self::build(Some(config::File::from(path.as_ref()).required(true)))
    }

    /// 기본 경로의 파일(있는 경우)과 환경 변수에서 설정을 로드합니다.
    pub fn load_default() -> MacroResult<Self> {
        Self::build(Some(
            config::File::with_name(DEFAULT_CONFIG_PATH).required(false),
        ))
    }

    /// 환경 변수만으로 설정을 로드합니다.
    pub fn from_env() -> MacroResult<Self> {
        Self::build(None)
    }

    fn build(
        file: Option<config::File<config::FileSourceFile, config::FileFormat>>,
    ) -> MacroResult<Self> {
        let mut builder = config::Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(file);
        }

        let builder = builder.add_source(
            config::Environment::with_prefix("MACRO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: AppConfig = builder.build()?.try_deserialize()?;
        config.apply_legacy_env();
        Ok(config)
    }

    /// 단축 환경 변수 적용 (`FRED_API_KEY`, `PORT`).
    fn apply_legacy_env(&mut self) {
        if self.fred.api_key.is_none() {
            self.fred.api_key = std::env::var("FRED_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty());
        }

        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }
}
