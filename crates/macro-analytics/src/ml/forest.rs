//! Random Forest 회귀.
//!
//! 부트스트랩 샘플로 학습한 CART 회귀 트리들의 평균으로 예측합니다.
//!
//! # 분할 기준
//!
//! 각 노드에서 모든 feature에 대해 정렬된 서로 다른 값 사이의 중간점을
//! 후보 임계값으로 두고, 좌/우 SSE 합이 가장 작은 분할을 선택합니다.
//! `x <= threshold`가 왼쪽입니다.
//!
//! # 재현성
//!
//! 부트스트랩 인덱스는 `random_state`로 시드한 `StdRng` 하나에서
//! 트리 순서대로 뽑으므로 같은 설정과 데이터면 항상 같은 모델이 됩니다.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use macro_core::ModelConfig;

use crate::ml::error::{MlError, MlResult};
use crate::ml::types::{validate_training_set, Regressor};

/// 트리 하이퍼파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    /// 최대 깊이 (`None`이면 제한 없음)
    pub max_depth: Option<usize>,
    /// 분할을 시도할 최소 샘플 수
    pub min_samples_split: usize,
    /// 리프의 최소 샘플 수
    pub min_samples_leaf: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    sse: f64,
}

/// CART 회귀 트리.
///
/// 노드는 `Vec` 아레나에 저장되며 루트는 인덱스 0입니다.
#[derive(Debug, Clone)]
pub struct RegressionTree {
    params: TreeParams,
    nodes: Vec<Node>,
    n_features: usize,
}

impl RegressionTree {
    pub fn new(params: TreeParams) -> Self {
        Self {
            params,
            nodes: Vec::new(),
            n_features: 0,
        }
    }

    pub fn is_fitted(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// 노드 수.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// 트리 깊이 (리프만 있으면 0).
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], idx: usize) -> usize {
            match &nodes[idx] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            walk(&self.nodes, 0)
        }
    }

    /// 주어진 행 인덱스(중복 허용)로 학습.
    fn fit_indices(&mut self, features: &[Vec<f64>], targets: &[f64], mut indices: Vec<usize>) {
        self.nodes.clear();
        self.n_features = features.first().map_or(0, Vec::len);
        self.build(features, targets, &mut indices, 0);
    }

    fn build(&mut self, x: &[Vec<f64>], y: &[f64], indices: &mut [usize], depth: usize) -> usize {
        let node_idx = self.nodes.len();
        let mean = indices.iter().map(|&i| y[i]).sum::<f64>() / indices.len() as f64;
        self.nodes.push(Node::Leaf { value: mean });

        let depth_reached = self.params.max_depth.is_some_and(|max| depth >= max);
        let pure = indices.iter().all(|&i| y[i] == y[indices[0]]);
        if depth_reached || pure || indices.len() < self.params.min_samples_split.max(2) {
            return node_idx;
        }

        let Some(best) = self.best_split(x, y, indices) else {
            return node_idx;
        };

        // 왼쪽(<= threshold)을 앞으로 모음
        let mut boundary = 0;
        for k in 0..indices.len() {
            if x[indices[k]][best.feature] <= best.threshold {
                indices.swap(boundary, k);
                boundary += 1;
            }
        }
        let (left_idx, right_idx) = indices.split_at_mut(boundary);

        let left = self.build(x, y, left_idx, depth + 1);
        let right = self.build(x, y, right_idx, depth + 1);
        self.nodes[node_idx] = Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left,
            right,
        };
        node_idx
    }

    fn best_split(&self, x: &[Vec<f64>], y: &[f64], indices: &[usize]) -> Option<SplitCandidate> {
        let n = indices.len();
        let min_leaf = self.params.min_samples_leaf.max(1);
        if n < 2 * min_leaf {
            return None;
        }

        let total_sum: f64 = indices.iter().map(|&i| y[i]).sum();
        let total_sq: f64 = indices.iter().map(|&i| y[i] * y[i]).sum();

        let mut best: Option<SplitCandidate> = None;
        let mut order = indices.to_vec();

        for feature in 0..self.n_features {
            order.sort_by(|&a, &b| x[a][feature].total_cmp(&x[b][feature]));

            let mut left_sum = 0.0;
            let mut left_sq = 0.0;
            for k in 1..n {
                let prev = order[k - 1];
                left_sum += y[prev];
                left_sq += y[prev] * y[prev];

                if k < min_leaf || n - k < min_leaf {
                    continue;
                }
                let lo = x[prev][feature];
                let hi = x[order[k]][feature];
                if lo == hi {
                    continue;
                }

                let left_n = k as f64;
                let right_n = (n - k) as f64;
                let right_sum = total_sum - left_sum;
                let right_sq = total_sq - left_sq;
                let sse = (left_sq - left_sum * left_sum / left_n)
                    + (right_sq - right_sum * right_sum / right_n);

                if best.as_ref().map_or(true, |b| sse < b.sse) {
                    let mut threshold = lo + (hi - lo) / 2.0;
                    // 인접한 부동소수점에서 중간점이 hi로 반올림되는 경우
                    if threshold >= hi {
                        threshold = lo;
                    }
                    best = Some(SplitCandidate {
                        feature,
                        threshold,
                        sse,
                    });
                }
            }
        }

        best
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

impl Regressor for RegressionTree {
    fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> MlResult<()> {
        validate_training_set(features, targets)?;
        self.fit_indices(features, targets, (0..targets.len()).collect());
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> MlResult<f64> {
        if !self.is_fitted() {
            return Err(MlError::NotFitted(self.model_name().to_string()));
        }
        check_width(features, self.n_features)?;
        Ok(self.predict_row(features))
    }

    fn model_name(&self) -> &str {
        "Decision Tree Regressor"
    }
}

/// Random Forest 설정.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub random_state: u64,
    #[serde(flatten)]
    pub tree: TreeParams,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            random_state: 42,
            tree: TreeParams::default(),
        }
    }
}

impl From<&ModelConfig> for ForestParams {
    fn from(config: &ModelConfig) -> Self {
        Self {
            n_estimators: config.n_estimators,
            random_state: config.random_state,
            tree: TreeParams {
                max_depth: config.max_depth,
                min_samples_split: config.min_samples_split,
                min_samples_leaf: config.min_samples_leaf,
            },
        }
    }
}

/// 부트스트랩 집계 회귀 트리 앙상블.
#[derive(Debug, Clone)]
pub struct RandomForestRegressor {
    params: ForestParams,
    trees: Vec<RegressionTree>,
    n_features: usize,
}

impl RandomForestRegressor {
    pub fn new(params: ForestParams) -> Self {
        Self {
            params,
            trees: Vec::new(),
            n_features: 0,
        }
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    /// 학습된 트리 목록.
    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }
}

impl Regressor for RandomForestRegressor {
    fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> MlResult<()> {
        let n_features = validate_training_set(features, targets)?;
        if self.params.n_estimators == 0 {
            return Err(MlError::InvalidInput(
                "n_estimators는 1 이상이어야 합니다".to_string(),
            ));
        }

        let n = targets.len();
        let mut rng = StdRng::seed_from_u64(self.params.random_state);

        self.trees = (0..self.params.n_estimators)
            .map(|_| {
                let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                let mut tree = RegressionTree::new(self.params.tree);
                tree.fit_indices(features, targets, sample);
                tree
            })
            .collect();
        self.n_features = n_features;

        debug!(
            trees = self.trees.len(),
            samples = n,
            features = n_features,
            "Random Forest 학습 완료"
        );
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> MlResult<f64> {
        if !self.is_fitted() {
            return Err(MlError::NotFitted(self.model_name().to_string()));
        }
        check_width(features, self.n_features)?;

        let sum: f64 = self.trees.iter().map(|t| t.predict_row(features)).sum();
        Ok(sum / self.trees.len() as f64)
    }

    fn model_name(&self) -> &str {
        "Random Forest Regressor"
    }
}

fn check_width(features: &[f64], expected: usize) -> MlResult<()> {
    if features.len() != expected {
        return Err(MlError::InvalidInput(format!(
            "feature {}개가 필요하지만 {}개가 주어졌습니다",
            expected,
            features.len()
        )));
    }
    if features.iter().any(|v| !v.is_finite()) {
        return Err(MlError::InvalidInput("NaN/Inf 값이 포함되어 있습니다".to_string()));
    }
    Ok(())
}
