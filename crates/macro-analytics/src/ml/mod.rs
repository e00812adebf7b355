//! 머신러닝 기반 거시경제 예측.
//!
//! - **Feature Engineering**: 전년 동월 대비 변동률, lag feature, 필립스 곡선 페어링
//! - **Random Forest**: lag 1..k로 다음 달 인플레이션 예측
//! - **다항 회귀**: 실업률로 인플레이션 추정
//! - **통합 서비스**: ForecastService가 학습 결과를 캐시
//!
//! # 아키텍처
//!
//! ```text
//! historical_inflation.csv      unemployment.csv
//!        │                             │
//!        ▼                             ▼
//! ┌─────────────────┐        ┌──────────────────┐
//! │   LagDataset    │        │  pair_phillips   │
//! │ (lag_1..lag_k)  │        │ (날짜 내부 조인)  │
//! └────────┬────────┘        └────────┬─────────┘
//!          │                          │
//!          ▼                          ▼
//! ┌─────────────────┐        ┌──────────────────┐
//! │  Random Forest  │        │ Polynomial (d=2) │
//! └────────┬────────┘        └────────┬─────────┘
//!          │                          │
//!          └────────────┬─────────────┘
//!                       ▼
//!              ┌─────────────────┐
//!              │ ForecastService │ ← 데이터셋 지문으로 캐시
//!              └─────────────────┘
//! ```
//!
//! # 예제
//!
//! ```ignore
//! use macro_analytics::ml::ForecastService;
//!
//! let mut service = ForecastService::new(config.model.clone());
//! let forecast = service.forecast_inflation(&records)?;
//! println!("다음 달: {:.2}% ({:?})", forecast.predicted_next_inflation, forecast.direction);
//!
//! let model = service.phillips_model(&points)?;
//! let prediction = service.predict_phillips(&model, 4.5)?;
//! ```

pub mod error;
pub mod features;
pub mod forest;
pub mod polynomial;
pub mod service;
pub mod types;

// 자주 사용되는 타입 재내보내기
pub use error::{MlError, MlResult};
pub use features::{latest_lag_input, pair_phillips, shift, LagDataset};
pub use forest::{ForestParams, RandomForestRegressor, RegressionTree, TreeParams};
pub use polynomial::PolynomialRegression;
pub use types::{PredictionDirection, Regressor};

// 서비스 타입 재내보내기
pub use service::{
    ForecastService, InflationForecast, ModelStatus, PhillipsModel, PhillipsPrediction,
    MIN_TRAINING_SAMPLES,
};
