//! MacroPulse 수집기 및 오프라인 예측 CLI.
//!
//! 이 crate는 API 서버와 독립적으로 실행되는 바이너리를 제공합니다:
//! - FRED 시계열 수집 → CSV 저장
//! - 저장된 CSV로 다음 달 인플레이션 예측
//! - 필립스 곡선 기반 인플레이션 추정

pub mod commands;
pub mod config;
pub mod error;

pub use config::CollectorConfig;
pub use error::{CollectorError, Result};
