//! 인플레이션 및 필립스 곡선 레코드.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 월간 인플레이션 레코드 (`historical_inflation.csv` 한 행).
///
/// 프론트엔드 차트가 그대로 사용하므로 필드명은 CSV 헤더와 같습니다.
/// 결측값은 JSON `null`로 직렬화됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflationRecord {
    /// 관측 월 (매월 1일)
    pub date: NaiveDate,
    /// CPI 지수값
    pub cpi_value: Option<f64>,
    /// 전년 동월 대비 상승률 (%)
    pub inflation_yoy_pct: Option<f64>,
}

impl InflationRecord {
    /// CPI와 상승률이 모두 존재하는지 확인.
    pub fn is_complete(&self) -> bool {
        self.cpi_value.is_some() && self.inflation_yoy_pct.is_some()
    }
}

/// 필립스 곡선 산점도의 한 점.
///
/// 같은 월의 실업률과 인플레이션을 짝지은 값입니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhillipsPoint {
    pub date: NaiveDate,
    /// 실업률 (%)
    pub unemployment: f64,
    /// 전년 동월 대비 인플레이션 (%)
    pub inflation: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inflation_record_serializes_null() {
        let record = InflationRecord {
            date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            cpi_value: Some(169.3),
            inflation_yoy_pct: None,
        };

        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["date"], "2000-01-01");
        assert_eq!(json["cpi_value"], 169.3);
        assert!(json["inflation_yoy_pct"].is_null());
        assert!(!record.is_complete());
    }
}
