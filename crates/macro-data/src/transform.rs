//! 시계열 변환: 변동률 계산.

use macro_core::{InflationRecord, TimeSeries};

/// 전년 동월 비교에 사용하는 기간 수 (월간 시계열).
pub const YOY_PERIODS: usize = 12;

/// `periods` 간격 변동률 (`v[t] / v[t-periods] - 1`).
///
/// 다음 경우 `None`:
/// - `t < periods`
/// - 현재 또는 기준 값이 결측
/// - 기준 값이 0
pub fn pct_change(values: &[Option<f64>], periods: usize) -> Vec<Option<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(t, current)| {
            if periods == 0 || t < periods {
                return None;
            }
            match (current, values[t - periods]) {
                (Some(cur), Some(base)) if base != 0.0 => Some(cur / base - 1.0),
                _ => None,
            }
        })
        .collect()
}

/// CPI 시계열에서 전년 동월 대비 인플레이션(%) 레코드 생성.
///
/// 처음 12개월은 `inflation_yoy_pct`가 `None`입니다.
pub fn yoy_inflation(cpi: &TimeSeries) -> Vec<InflationRecord> {
    let values = cpi.values();
    let changes = pct_change(&values, YOY_PERIODS);

    cpi.observations
        .iter()
        .zip(changes)
        .map(|(obs, change)| InflationRecord {
            date: obs.date,
            cpi_value: obs.value,
            inflation_yoy_pct: change.map(|c| c * 100.0),
        })
        .collect()
}

/// 결측 필드가 있는 레코드 제거.
pub fn drop_incomplete(records: Vec<InflationRecord>) -> Vec<InflationRecord> {
    records.into_iter().filter(|r| r.is_complete()).collect()
}
