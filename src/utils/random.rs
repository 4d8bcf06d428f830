//! Random operand generation for demos, tests and benchmarks

use rand::distributions::uniform::SampleUniform;
use rand::Rng;

use crate::error::{Result, SparseError};
use crate::matrix::{DenseMatrix, Element};

/// Fills an `n_rows × n_cols` matrix with uniform values in `[0, upper)`
pub fn random_dense<T, R>(n_rows: usize, n_cols: usize, upper: T, rng: &mut R) -> Result<DenseMatrix<T>>
where
    T: Element + SampleUniform,
    R: Rng,
{
    if upper <= T::zero() {
        return Err(SparseError::InvalidParameter(format!(
            "upper bound must be positive, got {}",
            upper
        )));
    }

    let mut dense = DenseMatrix::zeros(n_rows, n_cols);
    for i in 0..n_rows {
        for j in 0..n_cols {
            dense.set(i, j, rng.gen_range(T::zero()..upper));
        }
    }
    Ok(dense)
}

/// Fills a matrix whose entries are nonzero with probability `density`
///
/// Nonzero entries are uniform in `[1, upper)`.
pub fn random_sparse_dense<T, R>(
    n_rows: usize,
    n_cols: usize,
    density: f64,
    upper: T,
    rng: &mut R,
) -> Result<DenseMatrix<T>>
where
    T: Element + SampleUniform,
    R: Rng,
{
    if !(0.0..=1.0).contains(&density) {
        return Err(SparseError::InvalidParameter(format!(
            "density must be within [0, 1], got {}",
            density
        )));
    }
    if upper <= T::one() {
        return Err(SparseError::InvalidParameter(format!(
            "upper bound must exceed 1, got {}",
            upper
        )));
    }

    let mut dense = DenseMatrix::zeros(n_rows, n_cols);
    for i in 0..n_rows {
        for j in 0..n_cols {
            if rng.gen_bool(density) {
                dense.set(i, j, rng.gen_range(T::one()..upper));
            }
        }
    }
    Ok(dense)
}
