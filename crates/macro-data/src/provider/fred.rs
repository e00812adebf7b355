//! FRED (Federal Reserve Economic Data) API 클라이언트.
//!
//! `series/observations` 엔드포인트로 월간/일간 관측값을 조회합니다.
//!
//! # 응답 형식
//!
//! ```json
//! {
//!   "observations": [
//!     { "realtime_start": "2024-06-01", "realtime_end": "2024-06-01",
//!       "date": "2000-01-01", "value": "169.300" },
//!     { "date": "2000-01-04", "value": "." }
//!   ]
//! }
//! ```
//!
//! 값은 문자열이며 결측은 `"."`입니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use macro_data::provider::{EconomicDataProvider, FredClient};
//! use macro_core::SeriesId;
//!
//! let client = FredClient::new(&config.fred)?;
//! let cpi = client.fetch_series(SeriesId::Cpi, SeriesId::Cpi.default_start()).await?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use macro_core::{FredConfig, Observation, SeriesId, TimeSeries};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::EconomicDataProvider;
use crate::error::{DataError, Result};

/// FRED REST 클라이언트.
#[derive(Clone)]
pub struct FredClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    #[serde(default)]
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct FredErrorBody {
    #[serde(default)]
    error_message: Option<String>,
}

impl FredClient {
    /// 설정으로부터 클라이언트 생성.
    ///
    /// # Errors
    /// API 키가 없으면 `DataError::ConfigError`.
    pub fn new(config: &FredConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                DataError::ConfigError(
                    "FRED API 키가 설정되지 않았습니다 (FRED_API_KEY)".to_string(),
                )
            })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DataError::ConfigError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// API 키와 기본 URL로 직접 생성 (테스트용).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn observations_url(&self) -> String {
        format!("{}/series/observations", self.base_url)
    }
}

/// FRED 값 문자열 파싱. `"."` 및 숫자가 아닌 값은 결측.
fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_observations(id: SeriesId, raw: Vec<RawObservation>) -> Result<TimeSeries> {
    let mut observations = Vec::with_capacity(raw.len());
    for obs in raw {
        let date = NaiveDate::parse_from_str(&obs.date, "%Y-%m-%d").map_err(|e| {
            DataError::ParseError(format!("{} 날짜 파싱 실패 ({}): {}", id, obs.date, e))
        })?;
        observations.push(Observation::new(date, parse_value(&obs.value)));
    }
    Ok(TimeSeries::new(id, observations))
}

#[async_trait]
impl EconomicDataProvider for FredClient {
    fn name(&self) -> &str {
        "fred"
    }

    async fn fetch_series(&self, id: SeriesId, start: NaiveDate) -> Result<TimeSeries> {
        info!(series = %id, start = %start, "FRED 시계열 조회");

        let start_str = start.format("%Y-%m-%d").to_string();
        let response = self
            .client
            .get(self.observations_url())
            .query(&[
                ("series_id", id.fred_code()),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
                ("observation_start", start_str.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<FredErrorBody>(&body)
                .ok()
                .and_then(|b| b.error_message)
                .unwrap_or(body);
            warn!(series = %id, status = status.as_u16(), %message, "FRED API 오류 응답");
            return Err(DataError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body: ObservationsResponse = response.json().await?;
        let series = parse_observations(id, body.observations)?;

        if series.is_empty() {
            return Err(DataError::NotFound(format!(
                "{} 관측값 없음 (시작일 {})",
                id, start
            )));
        }

        debug!(
            series = %id,
            count = series.len(),
            missing = series.missing_count(),
            "FRED 관측값 수신"
        );
        Ok(series)
    }
}
