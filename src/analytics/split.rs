use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::dataset::PredictionDataset;

pub const TEST_FRACTION: f64 = 0.2;

/// Fixed so the held-out score is reproducible for a given history.
pub const SPLIT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit {
    pub train: PredictionDataset,
    pub test: PredictionDataset,
}

/// Number of held-out samples: `ceil(fraction * n)`, keeping at least one
/// sample on each side when `n >= 2`.
pub fn test_size(n: usize, fraction: f64) -> usize {
    let wanted = (fraction * n as f64).ceil() as usize;
    wanted.clamp(1, n.saturating_sub(1).max(1))
}

/// Shuffles sample indices with a seeded PRNG; the first `test_size` shuffled
/// indices are held out and the rest train the model.
pub fn train_test_split(dataset: &PredictionDataset, fraction: f64, seed: u64) -> TrainTestSplit {
    let n = dataset.len();
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = test_size(n, fraction).min(n);
    let (test_idx, train_idx) = indices.split_at(n_test);

    TrainTestSplit {
        train: dataset.select(train_idx),
        test: dataset.select(test_idx),
    }
}
