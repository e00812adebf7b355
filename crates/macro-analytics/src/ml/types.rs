//! ML 모듈의 공통 타입.

use serde::{Deserialize, Serialize};

use crate::ml::error::{MlError, MlResult};

/// 다음 기간 예측 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredictionDirection {
    /// 예측값이 최근 실제값보다 큼
    Up,
    /// 예측값이 최근 실제값 이하
    Down,
}

impl PredictionDirection {
    /// 예측값과 최근 실제값 비교. 같으면 `Down`.
    pub fn compare(predicted: f64, last_actual: f64) -> Self {
        if predicted > last_actual {
            PredictionDirection::Up
        } else {
            PredictionDirection::Down
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionDirection::Up => "UP",
            PredictionDirection::Down => "DOWN",
        }
    }
}

/// 회귀 모델 공통 인터페이스.
///
/// 입력은 행 단위 feature 벡터입니다.
pub trait Regressor: Send + Sync {
    /// 모델 학습.
    fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> MlResult<()>;

    /// 단일 행 예측.
    fn predict(&self, features: &[f64]) -> MlResult<f64>;

    /// 모델 이름 (응답/로그용).
    fn model_name(&self) -> &str;

    /// 결정계수 R².
    ///
    /// 타깃 분산이 0이면 예측이 완전히 일치할 때만 1.0, 아니면 0.0.
    fn score(&self, features: &[Vec<f64>], targets: &[f64]) -> MlResult<f64> {
        validate_training_set(features, targets)?;

        let n = targets.len() as f64;
        let mean = targets.iter().sum::<f64>() / n;
        let mut ss_res = 0.0;
        let mut ss_tot = 0.0;
        for (row, &y) in features.iter().zip(targets) {
            let pred = self.predict(row)?;
            ss_res += (y - pred).powi(2);
            ss_tot += (y - mean).powi(2);
        }

        if ss_tot == 0.0 {
            return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
        }
        Ok(1.0 - ss_res / ss_tot)
    }
}

/// 학습 데이터 형태 검증. 성공 시 feature 개수 반환.
pub(crate) fn validate_training_set(features: &[Vec<f64>], targets: &[f64]) -> MlResult<usize> {
    if features.is_empty() {
        return Err(MlError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    if features.len() != targets.len() {
        return Err(MlError::InvalidInput(format!(
            "feature 행 수({})와 타깃 수({})가 다릅니다",
            features.len(),
            targets.len()
        )));
    }

    let width = features[0].len();
    if width == 0 {
        return Err(MlError::InvalidInput("feature가 비어 있습니다".to_string()));
    }
    if let Some(pos) = features.iter().position(|row| row.len() != width) {
        return Err(MlError::InvalidInput(format!(
            "행 {}의 feature 수가 {}개가 아닙니다",
            pos, width
        )));
    }
    if features.iter().flatten().chain(targets).any(|v| !v.is_finite()) {
        return Err(MlError::InvalidInput("NaN/Inf 값이 포함되어 있습니다".to_string()));
    }
    Ok(width)
}
