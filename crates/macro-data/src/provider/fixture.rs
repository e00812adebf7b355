//! 메모리 기반 고정 시계열 Provider.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use macro_core::{SeriesId, TimeSeries};

use super::EconomicDataProvider;
use crate::error::{DataError, Result};

/// 미리 등록된 시계열을 반환하는 Provider.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    series: HashMap<SeriesId, TimeSeries>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// 시계열 등록 (빌더).
    #[must_use]
    pub fn with_series(mut self, series: TimeSeries) -> Self {
        self.series.insert(series.id, series);
        self
    }
}

#[async_trait]
impl EconomicDataProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_series(&self, id: SeriesId, start: NaiveDate) -> Result<TimeSeries> {
        let series = self
            .series
            .get(&id)
            .ok_or_else(|| DataError::NotFound(format!("{} 시계열 미등록", id)))?;

        let observations = series
            .observations
            .iter()
            .filter(|o| o.date >= start)
            .copied()
            .collect();
        Ok(TimeSeries::new(id, observations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macro_core::Observation;

    #[tokio::test]
    async fn test_static_provider_filters_by_start() {
        let d = |m| NaiveDate::from_ymd_opt(2020, m, 1).unwrap();
        let provider = StaticProvider::new().with_series(TimeSeries::new(
            SeriesId::Unemployment,
            vec![
                Observation::new(d(1), Some(3.5)),
                Observation::new(d(2), Some(3.6)),
                Observation::new(d(3), Some(4.4)),
            ],
        ));

        let series = provider.fetch_series(SeriesId::Unemployment, d(2)).await.unwrap();
        assert_eq!(series.len(), 2);

        let err = provider.fetch_series(SeriesId::Cpi, d(1)).await.unwrap_err();
        assert!(matches!(err, DataError::NotFound(_)));
    }
}
