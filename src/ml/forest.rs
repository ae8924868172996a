// ============================================================
// Layer 5 — Random Forest
// ============================================================
// Bagging over linfa-trees decision trees.
//
// Training:
//   for each of n_trees:
//     draw n row indices with replacement (bootstrap bag)
//     fit a Gini decision tree on the bagged rows
//
// Prediction:
//   every tree votes for a class; the probability of a class
//   is the fraction of trees that voted for it. The predicted
//   class is the one with the highest probability, with ties
//   going to class 0.
//
// All randomness comes from one StdRng seeded from the config,
// and linfa's tree fitting is deterministic, so the same rows
// and the same seed always give the same forest.
//
// The whole struct is serde-serialisable (linfa-trees "serde"
// feature) so it can be written to the model artifact as is.

use anyhow::{anyhow, ensure, Result};
use linfa::prelude::*;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{arr2, Array1, Array2, Axis};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::domain::reading::{ClassProbabilities, DowntimeLabel, MachineReading};
use crate::domain::traits::DowntimeClassifier;

/// Hyperparameters for a forest fit.
#[derive(Debug, Clone, PartialEq)]
pub struct ForestConfig {
    /// Number of trees in the ensemble
    pub n_trees: usize,

    /// Depth limit per tree; None grows until leaves are pure
    pub max_depth: Option<usize>,

    /// Seed for the bootstrap sampler
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self { n_trees: 100, max_depth: None, seed: 42 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    trees:      Vec<DecisionTree<f64, usize>>,
    n_features: usize,
}

impl RandomForest {
    /// Fit a forest on `records` (one row per sample) and class
    /// indices `targets`.
    pub fn fit(
        records: &Array2<f64>,
        targets: &Array1<usize>,
        cfg:     &ForestConfig,
    ) -> Result<Self> {
        ensure!(cfg.n_trees > 0, "a forest needs at least one tree");
        ensure!(records.nrows() > 0, "cannot fit a forest on zero rows");
        ensure!(
            records.nrows() == targets.len(),
            "{} feature rows but {} targets",
            records.nrows(),
            targets.len()
        );

        let n_rows  = records.nrows();
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let mut trees = Vec::with_capacity(cfg.n_trees);

        for _ in 0..cfg.n_trees {
            let bag: Vec<usize> = (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect();
            let bagged = Dataset::new(
                records.select(Axis(0), &bag),
                targets.select(Axis(0), &bag),
            );

            let tree = DecisionTree::<f64, usize>::params()
                .split_quality(SplitQuality::Gini)
                .max_depth(cfg.max_depth)
                .fit(&bagged)
                .map_err(|e| anyhow!("decision tree fit failed: {e}"))?;
            trees.push(tree);
        }

        tracing::debug!(
            "Fitted forest: {} trees on {} rows x {} features",
            trees.len(),
            n_rows,
            records.ncols()
        );

        Ok(Self { trees, n_features: records.ncols() })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Vote shares per row, shape [n_rows, CLASS_COUNT]. Each row sums to 1.
    pub fn predict_proba_batch(&self, records: &Array2<f64>) -> Array2<f64> {
        let mut votes = Array2::<f64>::zeros((records.nrows(), DowntimeLabel::CLASS_COUNT));

        for tree in &self.trees {
            let predicted: Array1<usize> = tree.predict(records);
            for (row, &class) in predicted.iter().enumerate() {
                if class < DowntimeLabel::CLASS_COUNT {
                    votes[[row, class]] += 1.0;
                }
            }
        }

        votes / self.trees.len() as f64
    }

    /// Most likely class index per row.
    pub fn predict_batch(&self, records: &Array2<f64>) -> Array1<usize> {
        self.predict_proba_batch(records)
            .axis_iter(Axis(0))
            .map(|p| usize::from(p[1] > p[0]))
            .collect()
    }
}

impl DowntimeClassifier for RandomForest {
    fn class_probabilities(&self, reading: &MachineReading) -> ClassProbabilities {
        let proba = self.predict_proba_batch(&arr2(&[reading.features()]));
        ClassProbabilities {
            no:  proba[[0, 0]],
            yes: proba[[0, 1]],
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    /// Downtime whenever temperature is above 80, regardless of run time
    fn threshold_data(n: usize) -> (Array2<f64>, Array1<usize>) {
        let mut records = Array2::<f64>::zeros((n, 2));
        let mut targets = Array1::<usize>::zeros(n);
        for i in 0..n {
            let temperature = 60.0 + (i % 40) as f64;
            records[[i, 0]] = temperature;
            records[[i, 1]] = 100.0 + ((i * 7) % 100) as f64;
            targets[i] = usize::from(temperature > 80.0);
        }
        (records, targets)
    }

    fn small_config() -> ForestConfig {
        ForestConfig { n_trees: 15, ..ForestConfig::default() }
    }

    #[test]
    fn test_learns_a_clear_threshold() {
        let (x, y) = threshold_data(120);
        let forest = RandomForest::fit(&x, &y, &small_config()).unwrap();

        assert_eq!(forest.n_trees(), 15);
        assert_eq!(forest.n_features(), 2);
        assert_eq!(
            forest.class_probabilities(&MachineReading::new(95.0, 150.0)).label(),
            DowntimeLabel::Yes
        );
        assert_eq!(
            forest.class_probabilities(&MachineReading::new(62.0, 150.0)).label(),
            DowntimeLabel::No
        );
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let (x, y) = threshold_data(80);
        let forest = RandomForest::fit(&x, &y, &small_config()).unwrap();

        for row in forest.predict_proba_batch(&x).axis_iter(Axis(0)) {
            assert!((row.sum() - 1.0).abs() < 1e-9);
            assert!(row.iter().all(|p| (0.0..=1.0).contains(p)));
        }
    }

    #[test]
    fn test_same_seed_same_votes() {
        let (x, y) = threshold_data(60);
        let a = RandomForest::fit(&x, &y, &small_config()).unwrap();
        let b = RandomForest::fit(&x, &y, &small_config()).unwrap();
        assert_eq!(a.predict_proba_batch(&x), b.predict_proba_batch(&x));
    }

    #[test]
    fn test_single_class_data_is_certain() {
        let x = arr2(&[[70.0, 100.0], [71.0, 110.0], [72.0, 120.0]]);
        let y = Array1::from(vec![0usize, 0, 0]);
        let forest = RandomForest::fit(&x, &y, &small_config()).unwrap();

        let p = forest.class_probabilities(&MachineReading::new(90.0, 200.0));
        assert_eq!(p.no, 1.0);
        assert_eq!(p.yes, 0.0);
    }

    #[test]
    fn test_rejects_bad_shapes() {
        let x = arr2(&[[1.0, 2.0]]);
        let y = Array1::from(vec![0usize, 1]);
        assert!(RandomForest::fit(&x, &y, &small_config()).is_err());

        let cfg = ForestConfig { n_trees: 0, ..ForestConfig::default() };
        let y = Array1::from(vec![0usize]);
        assert!(RandomForest::fit(&x, &y, &cfg).is_err());
    }
}
