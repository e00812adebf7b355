//! 다항 회귀 (필립스 곡선).
//!
//! `y = c0 + c1·x + c2·x² + ...`를 최소제곱으로 적합합니다.
//! 정규방정식 `(XᵀX)c = Xᵀy`를 부분 피벗 가우스 소거로 풉니다.

use crate::ml::error::{MlError, MlResult};
use crate::ml::types::{validate_training_set, Regressor};

/// 피벗 절대값이 이보다 작으면 특이 행렬로 판단 (대각 최대값 대비).
const SINGULAR_EPSILON: f64 = 1e-12;

/// 단변량 다항 회귀.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialRegression {
    degree: usize,
    /// 낮은 차수부터 (`c0`, `c1`, ...)
    coefficients: Vec<f64>,
    r_squared: Option<f64>,
    name: String,
}

impl PolynomialRegression {
    pub fn new(degree: usize) -> Self {
        Self {
            degree,
            coefficients: Vec::new(),
            r_squared: None,
            name: format!("Polynomial Regression (degree {})", degree),
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn is_fitted(&self) -> bool {
        !self.coefficients.is_empty()
    }

    /// 적합된 계수. 학습 전에는 빈 슬라이스.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// 학습 데이터에 대한 결정계수.
    pub fn r_squared(&self) -> Option<f64> {
        self.r_squared
    }

    /// `(x, y)` 쌍으로 학습.
    pub fn fit_points(&mut self, xs: &[f64], ys: &[f64]) -> MlResult<()> {
        if xs.len() != ys.len() {
            return Err(MlError::InvalidInput(format!(
                "x 개수({})와 y 개수({})가 다릅니다",
                xs.len(),
                ys.len()
            )));
        }
        if xs.iter().chain(ys).any(|v| !v.is_finite()) {
            return Err(MlError::InvalidInput("NaN/Inf 값이 포함되어 있습니다".to_string()));
        }

        let mut distinct: Vec<f64> = xs.to_vec();
        distinct.sort_by(f64::total_cmp);
        distinct.dedup();
        if distinct.len() <= self.degree {
            return Err(MlError::InsufficientData {
                required: self.degree + 1,
                actual: distinct.len(),
            });
        }

        let terms = self.degree + 1;
        let mut xtx = vec![vec![0.0; terms]; terms];
        let mut xty = vec![0.0; terms];
        for (&x, &y) in xs.iter().zip(ys) {
            let powers: Vec<f64> = (0..terms).map(|p| x.powi(p as i32)).collect();
            for i in 0..terms {
                xty[i] += powers[i] * y;
                for j in 0..terms {
                    xtx[i][j] += powers[i] * powers[j];
                }
            }
        }

        self.coefficients = solve_linear_system(xtx, xty)?;
        self.r_squared = Some(self.compute_r_squared(xs, ys));
        Ok(())
    }

    /// 단일 x 예측.
    pub fn predict_value(&self, x: f64) -> MlResult<f64> {
        if !self.is_fitted() {
            return Err(MlError::NotFitted(self.name.clone()));
        }
        if !x.is_finite() {
            return Err(MlError::InvalidInput(format!("유효하지 않은 입력: {}", x)));
        }
        // Horner
        Ok(self.coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c))
    }

    fn compute_r_squared(&self, xs: &[f64], ys: &[f64]) -> f64 {
        let mean = ys.iter().sum::<f64>() / ys.len() as f64;
        let mut ss_res = 0.0;
        let mut ss_tot = 0.0;
        for (&x, &y) in xs.iter().zip(ys) {
            let pred = self.coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c);
            ss_res += (y - pred).powi(2);
            ss_tot += (y - mean).powi(2);
        }
        if ss_tot == 0.0 {
            1.0
        } else {
            1.0 - ss_res / ss_tot
        }
    }
}

impl Regressor for PolynomialRegression {
    /// 첫 번째 feature만 사용합니다.
    fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> MlResult<()> {
        validate_training_set(features, targets)?;
        let xs: Vec<f64> = features.iter().map(|row| row[0]).collect();
        self.fit_points(&xs, targets)
    }

    fn predict(&self, features: &[f64]) -> MlResult<f64> {
        match features {
            [x] => self.predict_value(*x),
            _ => Err(MlError::InvalidInput(format!(
                "feature 1개가 필요하지만 {}개가 주어졌습니다",
                features.len()
            ))),
        }
    }

    fn model_name(&self) -> &str {
        &self.name
    }
}

/// 부분 피벗 가우스 소거로 `A·x = b` 풀이.
fn solve_linear_system(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> MlResult<Vec<f64>> {
    let n = b.len();
    let scale = (0..n).map(|i| a[i][i].abs()).fold(0.0, f64::max).max(1.0);

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot_row][col].abs() < SINGULAR_EPSILON * scale {
            return Err(MlError::Singular(format!("{}번째 열 피벗이 0에 가깝습니다", col)));
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    // 후진 대입
    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovers_exact_quadratic() {
        // y = 5 - 1.2x + 0.05x²
        let xs: Vec<f64> = (3..=12).map(|v| v as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 5.0 - 1.2 * x + 0.05 * x * x).collect();

        let mut model = PolynomialRegression::new(2);
        model.fit_points(&xs, &ys).unwrap();

        let c = model.coefficients();
        assert_eq!(c.len(), 3);
        assert!((c[0] - 5.0).abs() < 1e-6);
        assert!((c[1] + 1.2).abs() < 1e-6);
        assert!((c[2] - 0.05).abs() < 1e-6);
        assert!((model.r_squared().unwrap() - 1.0).abs() < 1e-9);
        assert!((model.predict_value(4.0).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_noisy_linear_fit() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [2.1, 3.9, 6.2, 7.8, 10.1];
        let mut model = PolynomialRegression::new(1);
        model.fit_points(&xs, &ys).unwrap();

        let c = model.coefficients();
        assert!((c[1] - 1.99).abs() < 0.05);
        let r2 = model.r_squared().unwrap();
        assert!(r2 > 0.99 && r2 < 1.0);
    }

    #[test]
    fn test_requires_distinct_points() {
        let mut model = PolynomialRegression::new(2);
        let err = model.fit_points(&[4.0, 4.0, 5.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, MlError::InsufficientData { required: 3, actual: 2 }));

        assert!(model.fit_points(&[1.0], &[1.0, 2.0]).is_err());
        assert!(matches!(model.predict_value(1.0), Err(MlError::NotFitted(_))));
    }

    #[test]
    fn test_regressor_interface() {
        let features: Vec<Vec<f64>> = (0..6).map(|i| vec![i as f64]).collect();
        let targets: Vec<f64> = (0..6).map(|i| 3.0 + 2.0 * i as f64).collect();

        let mut model = PolynomialRegression::new(1);
        model.fit(&features, &targets).unwrap();
        assert_eq!(model.model_name(), "Polynomial Regression (degree 1)");
        assert!((model.predict(&[10.0]).unwrap() - 23.0).abs() < 1e-9);
        assert!(model.predict(&[1.0, 2.0]).is_err());
        assert!((model.score(&features, &targets).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_solver_detects_singular() {
        let a = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
        assert!(matches!(
            solve_linear_system(a, vec![1.0, 2.0]),
            Err(MlError::Singular(_))
        ));

        let a = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        assert_eq!(solve_linear_system(a, vec![3.0, 4.0]).unwrap(), vec![4.0, 3.0]);
    }
}
