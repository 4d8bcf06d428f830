//! Utilities for converting between our matrix formats and sprs

use sprs::CsMat;

use crate::error::Result;
use crate::matrix::{CcsBuilder, CsrBuilder, Element, SparseMatrixCCS, SparseMatrixCSR};

/// Converts our CSR matrix format to sprs CsMat format
pub fn to_sprs_csr<T: Element>(matrix: &SparseMatrixCSR<T>) -> CsMat<T> {
    CsMat::new(
        matrix.shape(),
        matrix.row_ptr().to_vec(),
        matrix.col_idx().to_vec(),
        matrix.values().to_vec(),
    )
}

/// Converts our CCS matrix format to sprs CsMat format (as CSC)
pub fn to_sprs_ccs<T: Element>(matrix: &SparseMatrixCCS<T>) -> CsMat<T> {
    CsMat::new_csc(
        matrix.shape(),
        matrix.col_ptr().to_vec(),
        matrix.row_idx().to_vec(),
        matrix.values().to_vec(),
    )
}

/// Converts a sprs CsMat to our SparseMatrixCSR format
///
/// sprs may store explicit zeros (for instance after cancellation in a
/// product); those are dropped. A CSC input is converted to CSR first.
pub fn from_sprs_csr<T: Element>(matrix: CsMat<T>) -> Result<SparseMatrixCSR<T>> {
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let (n_rows, n_cols) = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    let mut builder = CsrBuilder::new(n_rows, n_cols)?;
    for bounds in indptr.windows(2) {
        for pos in bounds[0]..bounds[1] {
            builder.push(indices[pos], data[pos])?;
        }
        builder.finish_row()?;
    }

    Ok(builder.build())
}

/// Converts a sprs CsMat to our SparseMatrixCCS format, dropping explicit zeros
pub fn from_sprs_ccs<T: Element>(matrix: CsMat<T>) -> Result<SparseMatrixCCS<T>> {
    let matrix = if matrix.is_csc() {
        matrix
    } else {
        matrix.to_csc()
    };

    let (n_rows, n_cols) = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    let mut builder = CcsBuilder::new(n_rows, n_cols)?;
    for bounds in indptr.windows(2) {
        for pos in bounds[0]..bounds[1] {
            builder.push(indices[pos], data[pos])?;
        }
        builder.finish_col()?;
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SparseError;

    fn sample_csr() -> SparseMatrixCSR<i64> {
        SparseMatrixCSR::new(3, 3, vec![0, 2, 3, 5], vec![0, 1, 1, 0, 2], vec![1, 2, 3, 4, 5])
            .unwrap()
    }

    #[test]
    fn test_csr_roundtrip() {
        let original = sample_csr();
        let roundtrip = from_sprs_csr(to_sprs_csr(&original)).unwrap();
        assert_eq!(roundtrip, original);
    }

    #[test]
    fn test_ccs_roundtrip() {
        let original =
            SparseMatrixCCS::new(3, 3, vec![0, 2, 4, 5], vec![0, 2, 0, 1, 2], vec![1i64, 4, 2, 3, 5])
                .unwrap();
        let roundtrip = from_sprs_ccs(to_sprs_ccs(&original)).unwrap();
        assert_eq!(roundtrip, original);
    }

    #[test]
    fn test_csr_to_ccs_via_sprs() {
        let csr = sample_csr();
        let ccs = from_sprs_ccs(to_sprs_csr(&csr)).unwrap();

        assert_eq!(ccs, csr.to_ccs().unwrap());
    }

    #[test]
    fn test_explicit_zeros_dropped() {
        let with_zero = CsMat::new((2, 2), vec![0, 2, 3], vec![0, 1, 1], vec![1i32, 0, 3]);
        let csr = from_sprs_csr(with_zero).unwrap();

        assert_eq!(csr.nnz(), 2);
        assert_eq!(csr.row_ptr(), &[0, 1, 2]);
    }

    #[test]
    fn test_empty_shape_rejected() {
        let empty: CsMat<i32> = CsMat::zero((0, 3));
        assert_eq!(
            from_sprs_csr(empty).unwrap_err(),
            SparseError::InvalidShape { n_rows: 0, n_cols: 3 }
        );
    }
}
