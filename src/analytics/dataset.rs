use crate::error::{AppError, AppResult};
use crate::models::entry::MoodEntry;

/// Below this many entries a fitted model is not considered reliable.
pub const MIN_PREDICTION_ENTRIES: usize = 15;

pub type Features = [f64; 3];

/// Lag-1 supervised samples: the features of day `i` paired with the mood of
/// day `i + 1`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PredictionDataset {
    pub features: Vec<Features>,
    pub targets: Vec<f64>,
}

impl PredictionDataset {
    /// Builds the dataset from a newest-first history.
    pub fn from_history(entries: &[MoodEntry]) -> AppResult<Self> {
        if entries.len() < MIN_PREDICTION_ENTRIES {
            return Err(AppError::InsufficientData {
                have: entries.len(),
                need: MIN_PREDICTION_ENTRIES,
            });
        }

        let chronological: Vec<&MoodEntry> = entries.iter().rev().collect();
        let (features, targets) = chronological
            .windows(2)
            .map(|pair| (pair[0].features(), f64::from(pair[1].mood)))
            .unzip();

        Ok(Self { features, targets })
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// The samples at `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            features: indices.iter().map(|&i| self.features[i]).collect(),
            targets: indices.iter().map(|&i| self.targets[i]).collect(),
        }
    }
}
