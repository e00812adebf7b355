//! 거시경제 데이터 수집 워크플로우.
//!
//! Provider에서 세 시계열을 받아 CSV 저장소에 기록합니다.
//!
//! 1. CPI → 전년 동월 대비 인플레이션 계산 → 결측 제거 → `historical_inflation.csv`
//! 2. T10Y2Y → 전체 이력 → `yield_curve.csv`
//! 3. UNRATE → 전체 이력 → `unemployment.csv`
//!
//! 조회를 모두 마친 뒤에 저장하므로 실패한 수집은 기존 파일을 건드리지 않습니다.

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use macro_core::{SeriesId, TimeSeries};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::provider::EconomicDataProvider;
use crate::storage::CsvStore;
use crate::transform::{drop_incomplete, yoy_inflation};

/// 일시적 오류(타임아웃, 5xx, 429)에 대한 최대 시도 횟수.
pub const MAX_FETCH_ATTEMPTS: u32 = 3;

/// 재시도 간 기본 대기 시간 (시도마다 두 배).
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// 수집 결과 요약.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchSummary {
    /// 저장된 인플레이션 행 수 (결측 제거 후)
    pub inflation_rows: usize,
    /// 저장된 금리차 행 수
    pub yield_curve_rows: usize,
    /// 저장된 실업률 행 수
    pub unemployment_rows: usize,
    /// 최신 금리차 값
    pub latest_yield_spread: Option<f64>,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl FetchSummary {
    /// 요약 로그 출력.
    pub fn log_summary(&self) {
        info!(
            inflation_rows = self.inflation_rows,
            yield_curve_rows = self.yield_curve_rows,
            unemployment_rows = self.unemployment_rows,
            latest_yield_spread = ?self.latest_yield_spread,
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "거시경제 데이터 수집 완료"
        );
    }
}

/// Provider → CSV 수집기.
pub struct MacroFetcher<P> {
    provider: P,
}

impl<P: EconomicDataProvider> MacroFetcher<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// 전체 수집 실행.
    ///
    /// 세 시계열을 모두 받은 뒤에 파일을 씁니다. 하나라도 실패하면
    /// 기존 파일은 그대로 남습니다.
    pub async fn run(&self, store: &CsvStore) -> Result<FetchSummary> {
        let started = Instant::now();
        info!(provider = self.provider.name(), dir = %store.dir().display(), "거시경제 데이터 수집 시작");

        let cpi = self.fetch(SeriesId::Cpi).await?;
        let spread = self.fetch(SeriesId::YieldSpread).await?;
        let unemployment = self.fetch(SeriesId::Unemployment).await?;

        let inflation = drop_incomplete(yoy_inflation(&cpi));

        let mut summary = FetchSummary {
            latest_yield_spread: spread.latest_valid().and_then(|o| o.value),
            ..Default::default()
        };
        summary.inflation_rows = store.save_inflation(&inflation)?;
        summary.yield_curve_rows = store.save_series(&spread)?;
        summary.unemployment_rows = store.save_series(&unemployment)?;

        summary.elapsed = started.elapsed();
        summary.log_summary();
        Ok(summary)
    }

    /// 기본 시작일부터 조회. 일시적 오류는 지수 백오프로 재시도.
    async fn fetch(&self, id: SeriesId) -> Result<TimeSeries> {
        self.fetch_from(id, id.default_start()).await
    }

    async fn fetch_from(&self, id: SeriesId, start: NaiveDate) -> Result<TimeSeries> {
        let mut attempt = 1;
        loop {
            match self.provider.fetch_series(id, start).await {
                Ok(series) => return Ok(series),
                Err(e) if e.is_transient() && attempt < MAX_FETCH_ATTEMPTS => {
                    let delay = RETRY_BASE_DELAY * 2u32.pow(attempt - 1);
                    warn!(series = %id, attempt, error = %e, delay_ms = delay.as_millis() as u64, "일시적 오류, 재시도");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
