//! CLI 하위 명령 구현.
//!
//! 각 명령은 결과 구조체를 반환하고, 출력은 `main`에서 JSON으로 처리합니다.

pub mod fetch;
pub mod forecast;
pub mod phillips;

pub use fetch::fetch_data;
pub use forecast::run_forecast;
pub use phillips::run_phillips;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;
    use macro_core::{AppConfig, InflationRecord, Observation, SeriesId, TimeSeries};

    use crate::CollectorConfig;

    pub fn month(i: usize) -> NaiveDate {
        NaiveDate::from_ymd_opt(2001 + (i / 12) as i32, (i % 12) as u32 + 1, 1).unwrap()
    }

    pub fn temp_config() -> CollectorConfig {
        let mut app = AppConfig::default();
        app.data.dir = std::env::temp_dir().join(format!("macro-collector-{}", uuid::Uuid::new_v4()));
        app.model.n_estimators = 15;
        CollectorConfig::from_app(app)
    }

    pub fn inflation(n: usize) -> Vec<InflationRecord> {
        (0..n)
            .map(|i| InflationRecord {
                date: month(i),
                cpi_value: Some(180.0 + i as f64),
                inflation_yoy_pct: Some(2.5 + (i as f64 / 4.0).cos()),
            })
            .collect()
    }

    pub fn monthly(id: SeriesId, values: impl Iterator<Item = f64>) -> TimeSeries {
        let observations = values
            .enumerate()
            .map(|(i, v)| Observation::new(month(i), Some(v)))
            .collect();
        TimeSeries::new(id, observations)
    }

    pub fn cleanup(config: &CollectorConfig) {
        std::fs::remove_dir_all(&config.app.data.dir).ok();
    }
}
