//! 데이터 Provider 모듈.
//!
//! 외부 경제 데이터 소스에서 시계열을 가져오는 Provider들을 정의합니다.
//!
//! ## FRED
//! - `FredClient`: St. Louis Fed FRED API 클라이언트 (API 키 필요)
//! - CPI(CPIAUCSL), 실업률(UNRATE), 장단기 금리차(T10Y2Y)
//!
//! ## 고정 데이터
//! - `StaticProvider`: 메모리에 준비된 시계열을 반환 (오프라인 실행/테스트)

pub mod fred;
pub mod fixture;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use macro_core::{SeriesId, TimeSeries};

use crate::error::Result;

pub use fixture::StaticProvider;
pub use fred::FredClient;

/// 경제 시계열 Provider 트레잇.
#[async_trait]
pub trait EconomicDataProvider: Send + Sync {
    /// Provider 이름 (로그용).
    fn name(&self) -> &str;

    /// `start` 이후 관측값을 날짜 오름차순으로 조회.
    async fn fetch_series(&self, id: SeriesId, start: NaiveDate) -> Result<TimeSeries>;
}

#[async_trait]
impl<T: EconomicDataProvider + ?Sized> EconomicDataProvider for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch_series(&self, id: SeriesId, start: NaiveDate) -> Result<TimeSeries> {
        (**self).fetch_series(id, start).await
    }
}
