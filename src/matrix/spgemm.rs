//! Sparse general matrix-matrix multiplication (SpGEMM): CSR × CCS → CSR
//!
//! The left operand is walked row by row and the right operand column by
//! column, so both are read in their natural, strictly increasing index order.
//! Each output entry is a sparse dot product found by merge-joining the row's
//! column indices against the column's row indices.

use tracing::{debug, trace, warn};

use crate::error::{Result, SparseError};
use crate::matrix::{CsrBuilder, Element, MultiplyConfig, SparseMatrixCCS, SparseMatrixCSR};

/// Computes `x * y` with the default [`MultiplyConfig`]
///
/// # Examples
///
/// ```
/// use sparsemul::{multiply, DenseMatrix, SparseMatrixCCS, SparseMatrixCSR};
///
/// let x = DenseMatrix::from_rows(vec![vec![2, 0], vec![0, 3]]).unwrap();
/// let y = DenseMatrix::from_rows(vec![vec![1, 4], vec![0, 5]]).unwrap();
///
/// let z = multiply(
///     &SparseMatrixCSR::from_dense(&x).unwrap(),
///     &SparseMatrixCCS::from_dense(&y).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(z.nnz(), 3);
/// assert_eq!(z.to_string(), "2 8\n0 15\n");
/// ```
pub fn multiply<T: Element>(
    x: &SparseMatrixCSR<T>,
    y: &SparseMatrixCCS<T>,
) -> Result<SparseMatrixCSR<T>> {
    sparse_multiply(x, y, &MultiplyConfig::default())
}

/// Computes `x * y` for a CSR left operand and a CCS right operand
///
/// # Arguments
///
/// * `x` - Left input matrix in CSR format
/// * `y` - Right input matrix in CCS format
/// * `config` - Operand validation and workspace bound
///
/// # Returns
///
/// The result matrix Z = X×Y in CSR format, holding no explicit zeros and with
/// strictly increasing column indices in every row.
///
/// # Errors
///
/// - `IncompatibleDimensions` if `x.n_cols() != y.n_rows()`, checked first
/// - any invariant error from `validate` when `config.validate_operands` is set
/// - `ArithmeticOverflow` if a product or partial sum does not fit `T`. Sums
///   are checked in increasing `k` order, so `[100 100 -100]·[1 1 1]ᵀ` fails
///   for `i8` although the final value is 100
/// - `WorkspaceLimitExceeded` if the result exceeds `config.max_result_nonzeros`
/// - `Allocation` if the result buffers cannot grow
///
/// # Panics
///
/// With `config.validate_operands` off, operands whose pointer arrays do not
/// fit their index buffers panic on slicing. Other broken invariants give
/// wrong results instead of an error.
pub fn sparse_multiply<T: Element>(
    x: &SparseMatrixCSR<T>,
    y: &SparseMatrixCCS<T>,
    config: &MultiplyConfig,
) -> Result<SparseMatrixCSR<T>> {
    if x.n_cols() != y.n_rows() {
        return Err(SparseError::incompatible(x.shape(), y.shape()));
    }

    if config.validate_operands {
        x.validate()?;
        y.validate()?;
    }

    let z_rows = x.n_rows();
    let z_cols = y.n_cols();

    debug!(
        x_rows = x.n_rows(),
        x_cols = x.n_cols(),
        x_nnz = x.nnz(),
        y_cols = y.n_cols(),
        y_nnz = y.nnz(),
        "starting sparse multiply"
    );

    let mut z = CsrBuilder::new(z_rows, z_cols)?.with_limit(config.max_result_nonzeros);

    for row in 0..z_rows {
        let (x_cols, x_vals) = x.row(row);

        // An empty row matches nothing, no need to visit the columns
        if !x_cols.is_empty() {
            for col in 0..z_cols {
                let (y_rows, y_vals) = y.col(col);
                let dot = sparse_dot(x_cols, x_vals, y_rows, y_vals)
                    .ok_or(SparseError::ArithmeticOverflow { row, col })?;

                z.push(col, dot).map_err(|e| {
                    if let SparseError::WorkspaceLimitExceeded { limit } = e {
                        warn!(limit, row, col, "sparse multiply exceeded its workspace limit");
                    }
                    e
                })?;
            }
        }

        trace!(row, nnz = z.nnz(), "finished result row");
        z.finish_row()?;
    }

    let z = z.build();
    debug!(z_nnz = z.nnz(), "finished sparse multiply");

    Ok(z)
}

/// Merge-join dot product of one CSR row and one CCS column.
///
/// The column cursor only moves forward: row entries arrive in increasing
/// index order, so a position skipped for one `k` is never needed for a later
/// one. Once the column is exhausted the rest of the row cannot match.
///
/// Returns None as soon as a product or a partial sum overflows, before the
/// remaining terms are seen.
fn sparse_dot<T: Element>(
    x_cols: &[usize],
    x_vals: &[T],
    y_rows: &[usize],
    y_vals: &[T],
) -> Option<T> {
    let mut dot = T::zero();
    let mut cursor = 0;

    for (&k, x_val) in x_cols.iter().zip(x_vals) {
        while cursor < y_rows.len() && y_rows[cursor] < k {
            cursor += 1;
        }

        if cursor >= y_rows.len() {
            break;
        }

        if y_rows[cursor] == k {
            let product = x_val.checked_mul(&y_vals[cursor])?;
            dot = dot.checked_add(&product)?;
        }
    }

    Some(dot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_dot_merge_join() {
        // x row: cols 0, 3, 5 ; y col: rows 1, 3, 5, 7
        let dot = sparse_dot(&[0, 3, 5], &[2, 4, 6], &[1, 3, 5, 7], &[10, 20, 30, 40]);
        assert_eq!(dot, Some(4 * 20 + 6 * 30));
    }

    #[test]
    fn test_sparse_dot_stops_when_column_exhausted() {
        let dot = sparse_dot(&[0, 8, 9], &[1, 1, 1], &[0, 2], &[5, 5]);
        assert_eq!(dot, Some(5));
    }

    #[test]
    fn test_sparse_dot_empty_slices() {
        assert_eq!(sparse_dot::<i32>(&[], &[], &[0], &[1]), Some(0));
        assert_eq!(sparse_dot::<i32>(&[0], &[1], &[], &[]), Some(0));
    }

    #[test]
    fn test_sparse_dot_overflow() {
        assert_eq!(sparse_dot(&[0], &[i16::MAX], &[0], &[2]), None);
        assert_eq!(sparse_dot(&[0, 1], &[i16::MAX, 1], &[0, 1], &[1, 1]), None);
    }

    #[test]
    fn test_two_by_two_product() {
        // X = [2 0; 0 3] (CSR), Y = [1 4; 0 5] (CCS)
        let x = SparseMatrixCSR::new(2, 2, vec![0, 1, 2], vec![0, 1], vec![2, 3]).unwrap();
        let y = SparseMatrixCCS::new(2, 2, vec![0, 1, 3], vec![0, 0, 1], vec![1, 4, 5]).unwrap();

        let z = multiply(&x, &y).unwrap();

        assert_eq!(z.shape(), (2, 2));
        assert_eq!(z.row_ptr(), &[0, 2, 3]);
        assert_eq!(z.col_idx(), &[0, 1, 1]);
        assert_eq!(z.values(), &[2, 8, 15]);
    }

    #[test]
    fn test_cancellation_is_not_stored() {
        // [1 1] * [1; -1] = [0]
        let x = SparseMatrixCSR::new(1, 2, vec![0, 2], vec![0, 1], vec![1, 1]).unwrap();
        let y = SparseMatrixCCS::new(2, 1, vec![0, 2], vec![0, 1], vec![1, -1]).unwrap();

        let z = multiply(&x, &y).unwrap();
        assert_eq!(z.nnz(), 0);
        assert_eq!(z.row_ptr(), &[0, 0]);
    }

    #[test]
    fn test_incompatible_checked_before_validation() {
        // Pointer ends past nnz and the stored value is an explicit zero.
        let mut x = SparseMatrixCSR::<i32>::with_capacity(1, 2, 3).unwrap();
        x.row_ptr_mut().copy_from_slice(&[0, 2, 3]);
        assert!(x.validate().is_err());
        let y = SparseMatrixCCS::<i32>::zeros(2, 2).unwrap();

        assert_eq!(
            multiply(&x, &y).unwrap_err(),
            SparseError::incompatible((2, 3), (2, 2))
        );
    }

    #[test]
    fn test_invalid_operand_rejected() {
        let mut x = SparseMatrixCSR::<i32>::with_capacity(2, 1, 3).unwrap();
        x.values_mut().copy_from_slice(&[1, 1]);
        x.col_idx_mut().copy_from_slice(&[2, 0]);
        x.row_ptr_mut().copy_from_slice(&[0, 2]);
        let y = SparseMatrixCCS::<i32>::identity(3).unwrap();

        assert_eq!(
            multiply(&x, &y).unwrap_err(),
            SparseError::IndexNotIncreasing { slice: 0, position: 1 }
        );
    }

    #[test]
    fn test_workspace_limit() {
        let x = SparseMatrixCSR::<i32>::identity(3).unwrap();
        let y = SparseMatrixCCS::<i32>::identity(3).unwrap();

        let config = MultiplyConfig::default().with_result_limit(2);
        assert_eq!(
            sparse_multiply(&x, &y, &config).unwrap_err(),
            SparseError::WorkspaceLimitExceeded { limit: 2 }
        );

        let config = MultiplyConfig::default().with_result_limit(3);
        assert_eq!(sparse_multiply(&x, &y, &config).unwrap().nnz(), 3);
    }

    #[test]
    fn test_overflow_in_partial_sum() {
        // 100 + 100 overflows i8 before -100 brings the total back to 100.
        let x = SparseMatrixCSR::new(1, 3, vec![0, 3], vec![0, 1, 2], vec![100i8, 100, -100]).unwrap();
        let y = SparseMatrixCCS::new(3, 1, vec![0, 3], vec![0, 1, 2], vec![1i8, 1, 1]).unwrap();

        assert_eq!(
            multiply(&x, &y).unwrap_err(),
            SparseError::ArithmeticOverflow { row: 0, col: 0 }
        );
    }

    #[test]
    fn test_overflow_reports_position() {
        let x = SparseMatrixCSR::new(2, 1, vec![0, 0, 1], vec![0], vec![i8::MAX]).unwrap();
        let y = SparseMatrixCCS::new(1, 2, vec![0, 1, 2], vec![0, 0], vec![1i8, 2]).unwrap();

        assert_eq!(
            multiply(&x, &y).unwrap_err(),
            SparseError::ArithmeticOverflow { row: 1, col: 1 }
        );
    }
}
