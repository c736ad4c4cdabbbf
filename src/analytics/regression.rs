use crate::error::{AppError, AppResult};

use super::dataset::Features;

const N_FEATURES: usize = 3;

/// Eigenvalues of XᵀX at or below this fraction of the largest are treated
/// as zero when inverting.
const RANK_TOLERANCE: f64 = 1e-10;

const JACOBI_MAX_SWEEPS: usize = 64;

type Matrix3 = [[f64; N_FEATURES]; N_FEATURES];

/// Ordinary least squares fit `y ≈ intercept + coefficients · x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Features,
}

impl LinearModel {
    /// Fits by centring the data and solving the normal equations with a
    /// pseudo-inverse of the centred XᵀX. With a full-rank design this is the
    /// closed-form OLS solution; when a feature is constant or collinear it is
    /// the minimum-norm least-squares solution instead of a failure.
    pub fn fit(x: &[Features], y: &[f64]) -> AppResult<Self> {
        if x.is_empty() {
            return Err(AppError::Internal(anyhow::anyhow!(
                "Cannot perform regression on empty data"
            )));
        }
        if x.len() != y.len() {
            return Err(AppError::Internal(anyhow::anyhow!(
                "x and y must have the same number of rows: x has {}, y has {}",
                x.len(),
                y.len()
            )));
        }

        let n = x.len() as f64;
        let mut x_mean = [0.0; N_FEATURES];
        for row in x {
            for (m, v) in x_mean.iter_mut().zip(row) {
                *m += v / n;
            }
        }
        let y_mean = y.iter().sum::<f64>() / n;

        // Centred X'X and X'y
        let mut xtx: Matrix3 = [[0.0; N_FEATURES]; N_FEATURES];
        let mut xty = [0.0; N_FEATURES];
        for (row, &target) in x.iter().zip(y) {
            let centred: Features = std::array::from_fn(|j| row[j] - x_mean[j]);
            let yc = target - y_mean;
            for i in 0..N_FEATURES {
                xty[i] += centred[i] * yc;
                for j in 0..N_FEATURES {
                    xtx[i][j] += centred[i] * centred[j];
                }
            }
        }

        let coefficients = mat_vec(&pseudo_inverse(xtx), &xty);
        let intercept = y_mean - dot(&coefficients, &x_mean);

        Ok(Self {
            intercept,
            coefficients,
        })
    }

    pub fn predict(&self, features: &Features) -> f64 {
        self.intercept + dot(&self.coefficients, features)
    }

    /// R² of this model's predictions on `(x, y)`.
    pub fn score(&self, x: &[Features], y: &[f64]) -> f64 {
        let predicted: Vec<f64> = x.iter().map(|row| self.predict(row)).collect();
        r2_score(y, &predicted)
    }
}

/// Coefficient of determination `1 - SS_res / SS_tot`, with `SS_tot` taken
/// against the mean of `y_true`. Constant `y_true` scores `0.0`.
pub fn r2_score(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }

    let mean = y_true.iter().sum::<f64>() / y_true.len() as f64;
    let ss_tot: f64 = y_true.iter().map(|y| (y - mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return 0.0;
    }

    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(y, p)| (y - p).powi(2))
        .sum();
    1.0 - ss_res / ss_tot
}

fn dot(a: &Features, b: &Features) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn mat_vec(a: &Matrix3, v: &Features) -> Features {
    std::array::from_fn(|i| dot(&a[i], v))
}

/// Moore-Penrose inverse of a symmetric positive semi-definite matrix.
fn pseudo_inverse(a: Matrix3) -> Matrix3 {
    let (eigenvalues, eigenvectors) = symmetric_eigen(a);
    let largest = eigenvalues.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let cutoff = largest * RANK_TOLERANCE;

    let mut inv: Matrix3 = [[0.0; N_FEATURES]; N_FEATURES];
    for (k, &lambda) in eigenvalues.iter().enumerate() {
        if lambda <= cutoff {
            continue;
        }
        for i in 0..N_FEATURES {
            for j in 0..N_FEATURES {
                inv[i][j] += eigenvectors[i][k] * eigenvectors[j][k] / lambda;
            }
        }
    }
    inv
}

/// Cyclic Jacobi eigen-decomposition. Returns the eigenvalues and a matrix
/// whose columns are the matching unit eigenvectors.
fn symmetric_eigen(mut a: Matrix3) -> (Features, Matrix3) {
    let mut v: Matrix3 = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

    for _ in 0..JACOBI_MAX_SWEEPS {
        let off_diagonal = a[0][1].powi(2) + a[0][2].powi(2) + a[1][2].powi(2);
        let diagonal = a[0][0].powi(2) + a[1][1].powi(2) + a[2][2].powi(2);
        if off_diagonal <= f64::EPSILON * f64::EPSILON * diagonal {
            break;
        }

        for p in 0..N_FEATURES - 1 {
            for q in p + 1..N_FEATURES {
                if a[p][q] == 0.0 {
                    continue;
                }
                let theta = (a[q][q] - a[p][p]) / (2.0 * a[p][q]);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..N_FEATURES {
                    let (akp, akq) = (a[k][p], a[k][q]);
                    a[k][p] = c * akp - s * akq;
                    a[k][q] = s * akp + c * akq;
                }
                for k in 0..N_FEATURES {
                    let (apk, aqk) = (a[p][k], a[q][k]);
                    a[p][k] = c * apk - s * aqk;
                    a[q][k] = s * apk + c * aqk;
                }
                for row in v.iter_mut() {
                    let (vkp, vkq) = (row[p], row[q]);
                    row[p] = c * vkp - s * vkq;
                    row[q] = s * vkp + c * vkq;
                }
            }
        }
    }

    ([a[0][0], a[1][1], a[2][2]], v)
}
