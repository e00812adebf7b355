//! 다음 달 인플레이션 예측 명령.

use macro_analytics::{ForecastService, InflationForecast};

use crate::{CollectorConfig, Result};

/// 저장된 인플레이션 CSV로 Random Forest를 학습하고 다음 달을 예측.
pub fn run_forecast(config: &CollectorConfig) -> Result<InflationForecast> {
    let records = config.store().load_inflation()?;
    let mut service = ForecastService::new(config.app.model.clone());
    Ok(service.forecast_inflation(&records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{cleanup, inflation, month, temp_config};
    use macro_analytics::{MlError, PredictionDirection};

    #[test]
    fn test_forecast_from_store() {
        let config = temp_config();
        config.store().save_inflation(&inflation(40)).unwrap();

        let forecast = run_forecast(&config).unwrap();
        assert_eq!(forecast.as_of, month(39));
        assert_eq!(forecast.trained_samples, 37);
        assert_eq!(
            forecast.direction,
            PredictionDirection::compare(forecast.predicted_next_inflation, forecast.last_actual_inflation)
        );

        // 같은 시드 → 같은 결과
        let again = run_forecast(&config).unwrap();
        assert_eq!(again.predicted_next_inflation, forecast.predicted_next_inflation);

        cleanup(&config);
    }

    #[test]
    fn test_forecast_needs_enough_rows() {
        let config = temp_config();
        config.store().save_inflation(&inflation(4)).unwrap();

        let err = run_forecast(&config).unwrap_err();
        assert!(matches!(err, crate::CollectorError::Model(MlError::InsufficientData { .. })));

        cleanup(&config);
    }

    #[test]
    fn test_forecast_without_data_file() {
        let config = temp_config();
        assert!(matches!(run_forecast(&config), Err(crate::CollectorError::Data(_))));
    }
}
