//! RecessionRisk - 장단기 금리차 기반 경기침체 위험도.
//!
//! 10년물 - 2년물 국채 금리차(T10Y2Y)의 최신 값으로 위험도를 판정합니다.
//! 대시보드의 "Recession Risk" 카드가 사용합니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 금리차가 이 값 미만이면 수익률 곡선 역전으로 간주 (%p).
pub const INVERSION_THRESHOLD: f64 = 0.0;

/// 금리차가 이 값 미만이면 곡선 평탄화로 간주 (%p).
pub const FLATTENING_THRESHOLD: f64 = 0.5;

/// 경기침체 위험도 수준.
///
/// # 상태 설명
///
/// - **High**: 금리차 < 0 (장단기 금리 역전)
/// - **Moderate**: 0 <= 금리차 < 0.5 (평탄화)
/// - **Low**: 금리차 >= 0.5 (정상 곡선)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecessionRisk {
    /// 장단기 금리 역전
    High,
    /// 곡선 평탄화
    Moderate,
    /// 정상
    #[default]
    Low,
}

impl RecessionRisk {
    /// 금리차로부터 위험도 판정.
    pub fn from_spread(spread: f64) -> Self {
        if spread < INVERSION_THRESHOLD {
            Self::High
        } else if spread < FLATTENING_THRESHOLD {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// 카드에 표시할 레이블.
    pub fn level(self) -> &'static str {
        match self {
            Self::High => "High Risk (Inverted Curve)",
            Self::Moderate => "Moderate Risk (Flattening)",
            Self::Low => "Low Risk (Normal Curve)",
        }
    }

    /// 컬러 코드 (프론트엔드 `"red" | "yellow" | "green"`).
    pub fn color(self) -> &'static str {
        match self {
            Self::High => "red",
            Self::Moderate => "yellow",
            Self::Low => "green",
        }
    }

    /// 위험 우선순위 (높을수록 위험).
    pub fn priority(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Moderate => 2,
            Self::Low => 1,
        }
    }
}

impl fmt::Display for RecessionRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::High => "HIGH",
            Self::Moderate => "MODERATE",
            Self::Low => "LOW",
        };
        write!(f, "{}", s)
    }
}

/// 위험도 평가 결과 (`GET /api/risk` 응답).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// 최신 10Y-2Y 금리차 (%p)
    pub yield_spread: f64,
    /// 표시 레이블
    pub level: String,
    /// UI 컬러
    pub color: String,
    /// 위험도
    pub risk: RecessionRisk,
    /// 금리차 관측일
    pub as_of: NaiveDate,
}

impl RiskAssessment {
    /// 최신 금리차로 평가.
    pub fn evaluate(yield_spread: f64, as_of: NaiveDate) -> Self {
        let risk = RecessionRisk::from_spread(yield_spread);
        Self {
            yield_spread,
            level: risk.level().to_string(),
            color: risk.color().to_string(),
            risk,
            as_of,
        }
    }
}
