//! # Macro Core
//!
//! MacroPulse의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - FRED 시계열 식별자 및 관측값
//! - 인플레이션/필립스 곡선 레코드
//! - 장단기 금리차 기반 경기침체 위험도
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
