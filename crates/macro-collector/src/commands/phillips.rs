//! 필립스 곡선 추정 명령.

use macro_analytics::ml::pair_phillips;
use macro_analytics::{ForecastService, PhillipsPrediction};
use macro_core::SeriesId;
use tracing::debug;

use crate::{CollectorConfig, Result};

/// 실업률-인플레이션 다항 회귀를 학습하고 주어진 실업률에서 예측.
pub fn run_phillips(config: &CollectorConfig, unemployment_rate: f64) -> Result<PhillipsPrediction> {
    let store = config.store();
    let inflation = store.load_inflation()?;
    let unemployment = store.load_series(SeriesId::Unemployment)?;

    let points = pair_phillips(&unemployment, &inflation);
    debug!(points = points.len(), "필립스 곡선 데이터셋");

    let service = ForecastService::new(config.app.model.clone());
    let model = service.fit_phillips(&points)?;
    Ok(service.predict_phillips(&model, unemployment_rate)?)
}
