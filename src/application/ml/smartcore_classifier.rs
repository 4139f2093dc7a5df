use crate::domain::errors::PredictionError;
use crate::domain::ml::{ClassProbabilities, ForestConfig};
use crate::domain::ports::OutcomeClassifier;
use crate::domain::roulette::{OUTCOME_COUNT, Outcome};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_classifier::{
    DecisionTreeClassifier, DecisionTreeClassifierParameters,
};
use tracing::debug;

type Tree = DecisionTreeClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>>;

enum TreeModel {
    Fitted(Tree),
    /// Bootstrap sample held a single class; smartcore refuses to fit those
    Constant(i32),
}

struct ForestMember {
    /// Feature columns this tree was trained on, ascending
    columns: Vec<usize>,
    model: TreeModel,
}

impl ForestMember {
    fn vote(&self, features: &[f64]) -> Result<i32, PredictionError> {
        let tree = match &self.model {
            TreeModel::Constant(class) => return Ok(*class),
            TreeModel::Fitted(tree) => tree,
        };

        let row: Vec<f64> = self.columns.iter().map(|&c| features[c]).collect();
        let input = DenseMatrix::from_2d_vec(&vec![row]).map_err(|e| {
            PredictionError::InferenceFailure {
                reason: format!("Matrix creation failed: {}", e),
            }
        })?;
        let predictions = tree
            .predict(&input)
            .map_err(|e| PredictionError::InferenceFailure {
                reason: format!("Prediction failed: {}", e),
            })?;
        predictions
            .first()
            .copied()
            .ok_or_else(|| PredictionError::InferenceFailure {
                reason: "No prediction returned".to_string(),
            })
    }
}

/// Random forest over smartcore decision trees.
///
/// Each tree sees a bootstrap resample of the rows and a random subset of the
/// columns, both drawn from an RNG seeded by `ForestConfig::seed`, so two fits
/// on the same data give the same forest. Class probabilities are the share
/// of trees voting for each class.
pub struct SmartCoreForest {
    config: ForestConfig,
    members: Vec<ForestMember>,
    feature_len: usize,
}

impl SmartCoreForest {
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            members: Vec::new(),
            feature_len: 0,
        }
    }

    pub fn is_fitted(&self) -> bool {
        !self.members.is_empty()
    }

    fn tree_parameters(&self) -> DecisionTreeClassifierParameters {
        DecisionTreeClassifierParameters::default()
            .with_max_depth(self.config.max_depth)
            .with_min_samples_split(self.config.min_samples_split)
    }

    fn columns_per_tree(&self, n_features: usize) -> usize {
        let wanted = (n_features as f64 * self.config.feature_fraction).ceil() as usize;
        wanted.clamp(1, n_features)
    }

    fn fit_member(
        &self,
        features: &[Vec<f64>],
        targets: &[Outcome],
        rng: &mut StdRng,
    ) -> Result<ForestMember, PredictionError> {
        let n_rows = features.len();
        let n_features = self.feature_len;

        let rows: Vec<usize> = (0..n_rows).map(|_| rng.random_range(0..n_rows)).collect();
        let mut columns = index::sample(rng, n_features, self.columns_per_tree(n_features)).into_vec();
        columns.sort_unstable();

        let labels: Vec<i32> = rows.iter().map(|&r| targets[r].number() as i32).collect();
        if labels.iter().all(|&l| l == labels[0]) {
            return Ok(ForestMember {
                columns,
                model: TreeModel::Constant(labels[0]),
            });
        }

        let x: Vec<Vec<f64>> = rows
            .iter()
            .map(|&r| columns.iter().map(|&c| features[r][c]).collect())
            .collect();
        let x_matrix = DenseMatrix::from_2d_vec(&x).map_err(|e| PredictionError::TrainingFailure {
            reason: format!("Matrix error: {}", e),
        })?;
        let tree = Tree::fit(&x_matrix, &labels, self.tree_parameters()).map_err(|e| {
            PredictionError::TrainingFailure {
                reason: format!("Training error: {}", e),
            }
        })?;

        Ok(ForestMember {
            columns,
            model: TreeModel::Fitted(tree),
        })
    }
}

impl OutcomeClassifier for SmartCoreForest {
    fn fit(&mut self, features: &[Vec<f64>], targets: &[Outcome]) -> Result<(), PredictionError> {
        self.members.clear();

        if features.is_empty() {
            return Err(PredictionError::TrainingFailure {
                reason: "No training examples".to_string(),
            });
        }
        if features.len() != targets.len() {
            return Err(PredictionError::TrainingFailure {
                reason: format!(
                    "{} feature rows but {} targets",
                    features.len(),
                    targets.len()
                ),
            });
        }

        let n_features = features[0].len();
        if n_features == 0 {
            return Err(PredictionError::TrainingFailure {
                reason: "Feature vectors are empty".to_string(),
            });
        }
        if let Some(row) = features.iter().find(|row| row.len() != n_features) {
            return Err(PredictionError::FeatureContractViolation {
                expected: n_features,
                actual: row.len(),
            });
        }
        self.feature_len = n_features;

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut members = Vec::with_capacity(self.config.n_trees);
        for _ in 0..self.config.n_trees {
            members.push(self.fit_member(features, targets, &mut rng)?);
        }

        let constant = members
            .iter()
            .filter(|m| matches!(m.model, TreeModel::Constant(_)))
            .count();
        debug!(
            "Fitted {} trees on {} examples x {} features ({} constant)",
            members.len(),
            features.len(),
            n_features,
            constant
        );

        self.members = members;
        Ok(())
    }

    fn predict_proba(&self, features: &[f64]) -> Result<ClassProbabilities, PredictionError> {
        if !self.is_fitted() {
            return Err(PredictionError::InferenceFailure {
                reason: "Model has not been fitted".to_string(),
            });
        }
        if features.len() != self.feature_len {
            return Err(PredictionError::FeatureContractViolation {
                expected: self.feature_len,
                actual: features.len(),
            });
        }

        let mut votes = [0u32; OUTCOME_COUNT];
        for member in &self.members {
            let class = member.vote(features)?;
            let outcome = Outcome::new(class as i64).map_err(|e| PredictionError::InferenceFailure {
                reason: e.to_string(),
            })?;
            votes[outcome.index()] += 1;
        }

        Ok(ClassProbabilities::from_votes(&votes, self.members.len() as u32))
    }

    fn name(&self) -> &str {
        "SmartCore Random Forest"
    }
}
