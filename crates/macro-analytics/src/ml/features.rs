//! 인플레이션 예측용 feature 생성.
//!
//! 월간 인플레이션 시계열에서 시차(lag) feature를 만들고,
//! 실업률과 인플레이션을 날짜 기준으로 결합해 필립스 곡선 데이터셋을 만듭니다.
//!
//! 변동률 계산(`pct_change`, `yoy_inflation`)은 수집 단계에서도 쓰이므로
//! `macro_data::transform`에 있으며 여기서 재노출합니다.

use std::collections::HashMap;

use chrono::NaiveDate;
use macro_core::{InflationRecord, PhillipsPoint, TimeSeries};

use crate::ml::error::{MlError, MlResult};

pub use macro_data::transform::{drop_incomplete, pct_change, yoy_inflation, YOY_PERIODS};

/// `n`만큼 뒤로 민 시계열. 앞쪽 `n`개는 `None`.
pub fn shift(values: &[Option<f64>], n: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|t| if t < n { None } else { values[t - n] })
        .collect()
}

/// lag feature 이름 (`lag_1`, `lag_2`, ...).
pub fn lag_feature_names(lags: usize) -> Vec<String> {
    (1..=lags).map(|i| format!("lag_{}", i)).collect()
}

/// 시차 회귀 데이터셋.
///
/// 행 `t`의 feature는 `[v[t-1], v[t-2], ..., v[t-lags]]`, 타깃은 `v[t]`.
/// 결측이 하나라도 있는 행은 제외됩니다.
#[derive(Debug, Clone, PartialEq)]
pub struct LagDataset {
    pub features: Vec<Vec<f64>>,
    pub targets: Vec<f64>,
    pub feature_names: Vec<String>,
}

impl LagDataset {
    pub fn build(values: &[Option<f64>], lags: usize) -> MlResult<Self> {
        if lags == 0 {
            return Err(MlError::FeatureExtraction(
                "lag 수는 1 이상이어야 합니다".to_string(),
            ));
        }

        let shifted: Vec<Vec<Option<f64>>> = (1..=lags).map(|k| shift(values, k)).collect();

        let mut features = Vec::new();
        let mut targets = Vec::new();
        for (t, target) in values.iter().enumerate() {
            let Some(target) = target else { continue };
            let row: Option<Vec<f64>> = shifted.iter().map(|column| column[t]).collect();
            if let Some(row) = row {
                features.push(row);
                targets.push(*target);
            }
        }

        Ok(Self {
            features,
            targets,
            feature_names: lag_feature_names(lags),
        })
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// 다음 기간 예측 입력.
///
/// 가장 최근 값과 그 이전 `lags - 1`개 값: `[v[n-1], v[n-2], ..., v[n-lags]]`.
/// 마지막 관측이 다음 기간의 `lag_1`이 되는 구조입니다.
pub fn latest_lag_input(values: &[Option<f64>], lags: usize) -> MlResult<Vec<f64>> {
    if lags == 0 {
        return Err(MlError::FeatureExtraction(
            "lag 수는 1 이상이어야 합니다".to_string(),
        ));
    }
    if values.len() < lags {
        return Err(MlError::InsufficientData {
            required: lags,
            actual: values.len(),
        });
    }

    // 최근 구간의 결측은 데이터 부족으로 취급 (actual = 끊기기 전까지의 연속 관측 수)
    let recent: Vec<f64> = values.iter().rev().take(lags).map_while(|v| *v).collect();
    if recent.len() < lags {
        return Err(MlError::InsufficientData {
            required: lags,
            actual: recent.len(),
        });
    }
    Ok(recent)
}

/// 실업률과 인플레이션을 날짜로 내부 조인.
///
/// 어느 한쪽이라도 결측이면 제외. 결과는 날짜순입니다.
pub fn pair_phillips(unemployment: &TimeSeries, inflation: &[InflationRecord]) -> Vec<PhillipsPoint> {
    let by_date: HashMap<NaiveDate, f64> = inflation
        .iter()
        .filter_map(|r| r.inflation_yoy_pct.map(|v| (r.date, v)))
        .collect();

    let mut points: Vec<PhillipsPoint> = unemployment
        .observations
        .iter()
        .filter_map(|obs| {
            let rate = obs.value?;
            let inflation = *by_date.get(&obs.date)?;
            Some(PhillipsPoint {
                date: obs.date,
                unemployment: rate,
                inflation,
            })
        })
        .collect();

    points.sort_by_key(|p| p.date);
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use macro_core::{Observation, SeriesId};
    use proptest::prelude::*;

    fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn test_shift() {
        let values = vec![Some(1.0), Some(2.0), None, Some(4.0)];
        assert_eq!(shift(&values, 1), vec![None, Some(1.0), Some(2.0), None]);
        assert_eq!(shift(&values, 0), values);
        assert!(shift(&values, 10).iter().all(Option::is_none));
    }

    #[test]
    fn test_lag_dataset_drops_missing_rows() {
        let values = vec![Some(1.0), Some(2.0), Some(3.0), None, Some(5.0), Some(6.0), Some(7.0)];
        let ds = LagDataset::build(&values, 2).unwrap();

        // t=2: [2,1]→3 / t=3 타깃 결측 / t=4,5 lag 결측 / t=6: [6,5]→7
        assert_eq!(ds.features, vec![vec![2.0, 1.0], vec![6.0, 5.0]]);
        assert_eq!(ds.targets, vec![3.0, 7.0]);
        assert_eq!(ds.feature_names, vec!["lag_1", "lag_2"]);

        assert!(LagDataset::build(&values, 0).is_err());
    }

    #[test]
    fn test_latest_lag_input() {
        let values = vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        assert_eq!(latest_lag_input(&values, 3).unwrap(), vec![4.0, 3.0, 2.0]);

        assert!(matches!(
            latest_lag_input(&values[..2], 3),
            Err(MlError::InsufficientData { required: 3, actual: 2 })
        ));
        // 최근 구간의 결측은 데이터 부족
        assert!(matches!(
            latest_lag_input(&[Some(1.0), None], 2),
            Err(MlError::InsufficientData { required: 2, actual: 0 })
        ));
        let gapped = vec![Some(1.0), Some(2.0), None, Some(4.0)];
        assert!(matches!(
            latest_lag_input(&gapped, 3),
            Err(MlError::InsufficientData { required: 3, actual: 1 })
        ));
        // lag 구간 밖의 결측은 무관
        assert_eq!(latest_lag_input(&gapped, 1).unwrap(), vec![4.0]);
    }

    #[test]
    fn test_pair_phillips_inner_join() {
        let unemployment = TimeSeries::new(
            SeriesId::Unemployment,
            vec![
                Observation::new(date(2020, 1), Some(3.5)),
                Observation::new(date(2020, 2), None),
                Observation::new(date(2020, 3), Some(4.4)),
                Observation::new(date(2020, 4), Some(14.8)),
            ],
        );
        let inflation = vec![
            InflationRecord {
                date: date(2020, 4),
                cpi_value: Some(256.0),
                inflation_yoy_pct: Some(0.3),
            },
            InflationRecord {
                date: date(2020, 1),
                cpi_value: Some(258.0),
                inflation_yoy_pct: Some(2.5),
            },
            InflationRecord {
                date: date(2020, 2),
                cpi_value: Some(258.6),
                inflation_yoy_pct: Some(2.3),
            },
        ];

        let points = pair_phillips(&unemployment, &inflation);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, date(2020, 1));
        assert_eq!(points[0].unemployment, 3.5);
        assert_eq!(points[0].inflation, 2.5);
        assert_eq!(points[1].unemployment, 14.8);
    }

    proptest! {
        #[test]
        fn prop_lag_rows_follow_source(
            values in prop::collection::vec(-5.0f64..15.0, 0..60),
            lags in 1usize..6,
        ) {
            let series: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
            let ds = LagDataset::build(&series, lags).unwrap();

            prop_assert_eq!(ds.len(), values.len().saturating_sub(lags));
            for (row_idx, row) in ds.features.iter().enumerate() {
                let t = row_idx + lags;
                prop_assert_eq!(ds.targets[row_idx], values[t]);
                for (j, lag_value) in row.iter().enumerate() {
                    prop_assert_eq!(*lag_value, values[t - 1 - j]);
                }
            }
        }

        #[test]
        fn prop_shift_preserves_length(
            values in prop::collection::vec(prop::option::of(-100.0f64..100.0), 0..40),
            n in 0usize..50,
        ) {
            let shifted = shift(&values, n);
            prop_assert_eq!(shifted.len(), values.len());
            prop_assert!(shifted.iter().take(n).all(Option::is_none));
        }
    }
}
