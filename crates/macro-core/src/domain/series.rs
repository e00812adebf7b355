//! FRED 시계열 식별자와 관측값.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 수집 대상 FRED 시계열.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesId {
    /// 소비자물가지수 (CPI-U, 계절조정, 월간)
    Cpi,
    /// 실업률 (월간, %)
    Unemployment,
    /// 10년물 - 2년물 국채 금리차 (일간, %p)
    YieldSpread,
}

impl SeriesId {
    /// 모든 수집 대상 시계열.
    pub const ALL: [SeriesId; 3] = [SeriesId::Cpi, SeriesId::Unemployment, SeriesId::YieldSpread];

    /// FRED series_id 코드.
    pub fn fred_code(self) -> &'static str {
        match self {
            Self::Cpi => "CPIAUCSL",
            Self::Unemployment => "UNRATE",
            Self::YieldSpread => "T10Y2Y",
        }
    }

    /// 기본 관측 시작일.
    ///
    /// 금리차는 대시보드 카드용이라 최근 구간만 수집합니다.
    pub fn default_start(self) -> NaiveDate {
        let (y, m, d) = match self {
            Self::Cpi | Self::Unemployment => (2000, 1, 1),
            Self::YieldSpread => (2020, 1, 1),
        };
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    }

    /// FRED 코드로부터 변환.
    pub fn from_fred_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.fred_code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fred_code())
    }
}

/// 단일 관측값.
///
/// 결측값은 `None` (FRED는 `"."`으로 표기).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

impl Observation {
    pub fn new(date: NaiveDate, value: Option<f64>) -> Self {
        Self { date, value }
    }
}

/// 날짜 오름차순 시계열.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub id: SeriesId,
    pub observations: Vec<Observation>,
}

impl TimeSeries {
    /// 관측값을 날짜순으로 정렬하여 시계열 생성.
    pub fn new(id: SeriesId, mut observations: Vec<Observation>) -> Self {
        observations.sort_by_key(|o| o.date);
        Self { id, observations }
    }

    /// 관측값 개수.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// 값 열 (결측 포함).
    pub fn values(&self) -> Vec<Option<f64>> {
        self.observations.iter().map(|o| o.value).collect()
    }

    /// 날짜 열.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.observations.iter().map(|o| o.date).collect()
    }

    /// 결측이 아닌 가장 최근 관측값.
    pub fn latest_valid(&self) -> Option<Observation> {
        self.observations
            .iter()
            .rev()
            .find(|o| o.value.is_some())
            .copied()
    }

    /// 결측값 개수.
    pub fn missing_count(&self) -> usize {
        self.observations.iter().filter(|o| o.value.is_none()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fred_codes() {
        assert_eq!(SeriesId::Cpi.fred_code(), "CPIAUCSL");
        assert_eq!(SeriesId::Unemployment.fred_code(), "UNRATE");
        assert_eq!(SeriesId::YieldSpread.fred_code(), "T10Y2Y");
        assert_eq!(SeriesId::from_fred_code("t10y2y"), Some(SeriesId::YieldSpread));
        assert_eq!(SeriesId::from_fred_code("GDP"), None);
    }

    #[test]
    fn test_default_start() {
        assert_eq!(SeriesId::Cpi.default_start(), date(2000, 1, 1));
        assert_eq!(SeriesId::YieldSpread.default_start(), date(2020, 1, 1));
    }

    #[test]
    fn test_time_series_sorted_and_latest_valid() {
        let series = TimeSeries::new(
            SeriesId::YieldSpread,
            vec![
                Observation::new(date(2024, 1, 3), None),
                Observation::new(date(2024, 1, 1), Some(-0.4)),
                Observation::new(date(2024, 1, 2), Some(-0.3)),
            ],
        );

        assert_eq!(series.dates()[0], date(2024, 1, 1));
        assert_eq!(series.missing_count(), 1);

        // 마지막 관측은 결측이므로 그 이전 값
        let latest = series.latest_valid().unwrap();
        assert_eq!(latest.date, date(2024, 1, 2));
        assert_eq!(latest.value, Some(-0.3));
    }
}
