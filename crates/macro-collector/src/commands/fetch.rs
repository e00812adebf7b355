//! FRED → CSV 수집 명령.

use macro_data::{EconomicDataProvider, FetchSummary, MacroFetcher};
use tracing::info;

use crate::{CollectorConfig, Result};

/// 세 시계열을 수집해 데이터 디렉토리에 저장.
pub async fn fetch_data<P: EconomicDataProvider>(
    config: &CollectorConfig,
    provider: P,
) -> Result<FetchSummary> {
    let store = config.store();
    info!(dir = %store.dir().display(), "데이터 수집 시작");

    let summary = MacroFetcher::new(provider).run(&store).await?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{cleanup, monthly, temp_config};
    use chrono::NaiveDate;
    use macro_core::{Observation, SeriesId, TimeSeries};
    use macro_data::StaticProvider;

    #[tokio::test]
    async fn test_fetch_writes_store() {
        let config = temp_config();
        let spread = TimeSeries::new(
            SeriesId::YieldSpread,
            vec![
                Observation::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), Some(-0.4)),
                Observation::new(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(), None),
            ],
        );
        let provider = StaticProvider::new()
            .with_series(monthly(SeriesId::Cpi, (0..30).map(|i| 150.0 + i as f64)))
            .with_series(monthly(SeriesId::Unemployment, (0..30).map(|i| 5.0 + (i % 3) as f64 * 0.1)))
            .with_series(spread);

        let summary = fetch_data(&config, provider).await.unwrap();
        assert_eq!(summary.inflation_rows, 18);
        assert_eq!(summary.unemployment_rows, 30);
        assert_eq!(summary.yield_curve_rows, 2);
        assert_eq!(summary.latest_yield_spread, Some(-0.4));

        let store = config.store();
        assert!(store.has_inflation());
        assert!(store.has_series(SeriesId::YieldSpread));

        cleanup(&config);
    }

    #[tokio::test]
    async fn test_fetch_propagates_provider_error() {
        let config = temp_config();
        let provider = StaticProvider::new();

        let err = fetch_data(&config, provider).await.unwrap_err();
        assert!(matches!(err, crate::CollectorError::Data(macro_data::DataError::NotFound(_))));
        assert!(!config.store().has_inflation());

        cleanup(&config);
    }
}
