//! 예측 서비스.
//!
//! 저장된 인플레이션/실업률 데이터로 모델을 학습하고 결과를 캐시합니다.
//! 캐시 키는 데이터셋 지문(행 수, 마지막 날짜, 마지막 값)이므로
//! 데이터 파일이 갱신되면 다음 호출에서 자동으로 재학습됩니다.
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! let mut service = ForecastService::new(config.model.clone());
//! let forecast = service.forecast_inflation(&store.load_inflation()?)?;
//! println!("{} → {:?}", forecast.predicted_next_inflation, forecast.direction);
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use macro_core::{InflationRecord, ModelConfig, PhillipsPoint};

use crate::ml::error::{MlError, MlResult};
use crate::ml::features::{latest_lag_input, LagDataset};
use crate::ml::forest::{ForestParams, RandomForestRegressor};
use crate::ml::polynomial::PolynomialRegression;
use crate::ml::types::{PredictionDirection, Regressor};

/// 학습에 필요한 최소 lag 행 수.
pub const MIN_TRAINING_SAMPLES: usize = 2;

/// 다음 기간 인플레이션 예측 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InflationForecast {
    /// 모델 이름
    pub model: String,
    /// 가장 최근 실제 인플레이션 (%)
    pub last_actual_inflation: f64,
    /// 다음 달 예측 인플레이션 (%)
    pub predicted_next_inflation: f64,
    pub direction: PredictionDirection,
    /// 학습에 사용된 행 수
    pub trained_samples: usize,
    /// 최근 실제값의 관측 월
    pub as_of: NaiveDate,
    pub features: Vec<String>,
}

/// 필립스 곡선 예측 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhillipsPrediction {
    pub unemployment_rate: f64,
    pub predicted_inflation: f64,
    pub model: String,
    pub r_squared: Option<f64>,
    pub samples: usize,
}

/// 데이터셋 지문.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DatasetFingerprint {
    rows: usize,
    last_date: Option<NaiveDate>,
    last_value_bits: u64,
}

impl DatasetFingerprint {
    fn of_inflation(records: &[InflationRecord]) -> Self {
        let last = records.iter().max_by_key(|r| r.date);
        Self {
            rows: records.len(),
            last_date: last.map(|r| r.date),
            last_value_bits: last
                .and_then(|r| r.inflation_yoy_pct)
                .map_or(0, f64::to_bits),
        }
    }

    fn of_phillips(points: &[PhillipsPoint]) -> Self {
        let last = points.iter().max_by_key(|p| p.date);
        Self {
            rows: points.len(),
            last_date: last.map(|p| p.date),
            last_value_bits: last.map_or(0, |p| p.unemployment.to_bits() ^ p.inflation.to_bits()),
        }
    }
}

/// 학습된 필립스 곡선 모델.
#[derive(Debug, Clone)]
pub struct PhillipsModel {
    regression: PolynomialRegression,
    samples: usize,
    fingerprint: DatasetFingerprint,
}

impl PhillipsModel {
    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn coefficients(&self) -> &[f64] {
        self.regression.coefficients()
    }

    pub fn r_squared(&self) -> Option<f64> {
        self.regression.r_squared()
    }

    /// 실업률 → 인플레이션 예측.
    pub fn predict(&self, unemployment_rate: f64) -> MlResult<PhillipsPrediction> {
        let predicted_inflation = self.regression.predict_value(unemployment_rate)?;
        Ok(PhillipsPrediction {
            unemployment_rate,
            predicted_inflation,
            model: self.regression.model_name().to_string(),
            r_squared: self.regression.r_squared(),
            samples: self.samples,
        })
    }
}

/// 모델 캐시 상태.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelStatus {
    pub forecast_cached: bool,
    pub phillips_cached: bool,
    pub last_trained_at: Option<DateTime<Utc>>,
}

/// 학습/예측 서비스.
pub struct ForecastService {
    config: ModelConfig,
    forecast_cache: Option<(DatasetFingerprint, InflationForecast)>,
    phillips_cache: Option<PhillipsModel>,
    last_trained_at: Option<DateTime<Utc>>,
}

impl ForecastService {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            forecast_cache: None,
            phillips_cache: None,
            last_trained_at: None,
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// 다음 달 인플레이션 예측 (Random Forest).
    ///
    /// lag 1..k를 feature로 학습한 뒤 가장 최근 값과 그 이전 k-1개 값을
    /// 입력으로 예측합니다. 같은 데이터셋이면 캐시된 결과를 반환합니다.
    pub fn forecast_inflation(&mut self, records: &[InflationRecord]) -> MlResult<InflationForecast> {
        let fingerprint = DatasetFingerprint::of_inflation(records);
        if let Some((cached, forecast)) = &self.forecast_cache {
            if *cached == fingerprint {
                debug!("캐시된 인플레이션 예측 사용");
                return Ok(forecast.clone());
            }
        }

        let forecast = self.train_forecast(records)?;
        self.forecast_cache = Some((fingerprint, forecast.clone()));
        self.last_trained_at = Some(Utc::now());
        Ok(forecast)
    }

    fn train_forecast(&self, records: &[InflationRecord]) -> MlResult<InflationForecast> {
        let lags = self.config.lags;

        let mut sorted = records.to_vec();
        sorted.sort_by_key(|r| r.date);
        // 끝쪽 결측은 예측 입력에서 제외
        while sorted.last().is_some_and(|r| r.inflation_yoy_pct.is_none()) {
            sorted.pop();
        }
        let (as_of, last_actual) = match sorted.last() {
            Some(InflationRecord {
                date,
                inflation_yoy_pct: Some(value),
                ..
            }) => (*date, *value),
            _ => {
                return Err(MlError::InsufficientData {
                    required: lags + MIN_TRAINING_SAMPLES,
                    actual: 0,
                })
            }
        };

        let values: Vec<Option<f64>> = sorted.iter().map(|r| r.inflation_yoy_pct).collect();
        let dataset = LagDataset::build(&values, lags)?;
        if dataset.len() < MIN_TRAINING_SAMPLES {
            return Err(MlError::InsufficientData {
                required: lags + MIN_TRAINING_SAMPLES,
                actual: values.len(),
            });
        }

        let mut forest = RandomForestRegressor::new(ForestParams::from(&self.config));
        forest.fit(&dataset.features, &dataset.targets)?;

        let input = latest_lag_input(&values, lags)?;
        let predicted = forest.predict(&input)?;
        let direction = PredictionDirection::compare(predicted, last_actual);

        info!(
            samples = dataset.len(),
            last_actual = last_actual,
            predicted = predicted,
            direction = ?direction,
            "인플레이션 예측 모델 학습"
        );

        Ok(InflationForecast {
            model: forest.model_name().to_string(),
            last_actual_inflation: last_actual,
            predicted_next_inflation: predicted,
            direction,
            trained_samples: dataset.len(),
            as_of,
            features: dataset.feature_names,
        })
    }

    /// 필립스 곡선 학습 (캐시 미사용).
    pub fn fit_phillips(&self, points: &[PhillipsPoint]) -> MlResult<PhillipsModel> {
        let xs: Vec<f64> = points.iter().map(|p| p.unemployment).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.inflation).collect();

        let mut regression = PolynomialRegression::new(self.config.phillips_degree);
        regression.fit_points(&xs, &ys)?;

        info!(
            samples = points.len(),
            degree = regression.degree(),
            r_squared = ?regression.r_squared(),
            "필립스 곡선 학습"
        );

        Ok(PhillipsModel {
            regression,
            samples: points.len(),
            fingerprint: DatasetFingerprint::of_phillips(points),
        })
    }

    /// 캐시된 필립스 곡선 모델. 데이터셋이 바뀌었으면 재학습.
    pub fn phillips_model(&mut self, points: &[PhillipsPoint]) -> MlResult<PhillipsModel> {
        let fingerprint = DatasetFingerprint::of_phillips(points);
        if let Some(model) = &self.phillips_cache {
            if model.fingerprint == fingerprint {
                return Ok(model.clone());
            }
        }

        let model = self.fit_phillips(points)?;
        self.phillips_cache = Some(model.clone());
        self.last_trained_at = Some(Utc::now());
        Ok(model)
    }

    /// 학습된 모델로 실업률에 대한 인플레이션 예측.
    pub fn predict_phillips(
        &self,
        model: &PhillipsModel,
        unemployment_rate: f64,
    ) -> MlResult<PhillipsPrediction> {
        model.predict(unemployment_rate)
    }

    /// 모든 캐시 제거.
    pub fn invalidate(&mut self) {
        self.forecast_cache = None;
        self.phillips_cache = None;
        info!("모델 캐시 초기화");
    }

    pub fn status(&self) -> ModelStatus {
        ModelStatus {
            forecast_cached: self.forecast_cache.is_some(),
            phillips_cached: self.phillips_cache.is_some(),
            last_trained_at: self.last_trained_at,
        }
    }
}
