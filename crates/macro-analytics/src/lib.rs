//! 거시경제 분석 및 예측.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 인플레이션 lag feature 및 필립스 곡선 데이터셋 생성
//! - Random Forest 회귀 (다음 달 인플레이션)
//! - 다항 회귀 (실업률 → 인플레이션)
//! - 모델 캐시를 포함한 예측 서비스
//!
//! # Re-exports
//!
//! - [`ml`]: feature 생성, 회귀 모델, 예측 서비스

pub mod ml;

pub use ml::{
    ForecastService, InflationForecast, MlError, MlResult, ModelStatus, PhillipsModel,
    PhillipsPrediction, PredictionDirection, RandomForestRegressor, Regressor,
};
