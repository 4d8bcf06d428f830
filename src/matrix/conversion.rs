//! Conversion functions between matrix formats

use crate::error::{try_filled, Result};
use crate::matrix::{CcsBuilder, CsrBuilder, DenseMatrix, Element, SparseMatrixCCS, SparseMatrixCSR};
use crate::utils::counts_to_pointers;

impl<T: Element> SparseMatrixCSR<T> {
    /// Compresses a dense matrix row by row, dropping zeros
    pub fn from_dense(dense: &DenseMatrix<T>) -> Result<Self> {
        let (n_rows, n_cols) = dense.shape();
        let mut builder = CsrBuilder::new(n_rows, n_cols)?;

        for row in dense.as_array().rows() {
            for (j, &val) in row.iter().enumerate() {
                builder.push(j, val)?;
            }
            builder.finish_row()?;
        }

        Ok(builder.build())
    }

    /// Expands this matrix into dense form
    pub fn to_dense(&self) -> DenseMatrix<T> {
        let mut dense = DenseMatrix::zeros(self.n_rows(), self.n_cols());
        for i in 0..self.n_rows() {
            for (j, &val) in self.row_iter(i) {
                dense.set(i, j, val);
            }
        }
        dense
    }

    /// Converts this CSR matrix to CCS format
    pub fn to_ccs(&self) -> Result<SparseMatrixCCS<T>> {
        let (n_rows, n_cols) = self.shape();

        // Count non-zeros per column
        let mut col_counts = vec![0; n_cols];
        for &col in self.col_idx() {
            col_counts[col] += 1;
        }
        let col_ptr = counts_to_pointers(&col_counts);

        let nnz = self.nnz();
        let mut row_idx = try_filled(nnz, 0)?;
        let mut values = try_filled(nnz, T::zero())?;

        // Rows are visited in order, so each column receives ascending row indices
        let mut next = col_ptr[..n_cols].to_vec();
        for i in 0..n_rows {
            for (j, &val) in self.row_iter(i) {
                let pos = next[j];
                row_idx[pos] = i;
                values[pos] = val;
                next[j] += 1;
            }
        }

        Ok(SparseMatrixCCS::from_raw_parts(n_rows, n_cols, col_ptr, row_idx, values))
    }
}

impl<T: Element> SparseMatrixCCS<T> {
    /// Compresses a dense matrix column by column, dropping zeros
    pub fn from_dense(dense: &DenseMatrix<T>) -> Result<Self> {
        let (n_rows, n_cols) = dense.shape();
        let mut builder = CcsBuilder::new(n_rows, n_cols)?;

        for col in dense.as_array().columns() {
            for (i, &val) in col.iter().enumerate() {
                builder.push(i, val)?;
            }
            builder.finish_col()?;
        }

        Ok(builder.build())
    }

    pub fn to_dense(&self) -> DenseMatrix<T> {
        let mut dense = DenseMatrix::zeros(self.n_rows(), self.n_cols());
        for j in 0..self.n_cols() {
            for (i, &val) in self.col_iter(j) {
                dense.set(i, j, val);
            }
        }
        dense
    }

    /// Converts this CCS matrix to CSR format
    pub fn to_csr(&self) -> Result<SparseMatrixCSR<T>> {
        let (n_rows, n_cols) = self.shape();

        // Count non-zeros per row
        let mut row_counts = vec![0; n_rows];
        for &row in self.row_idx() {
            row_counts[row] += 1;
        }
        let row_ptr = counts_to_pointers(&row_counts);

        let nnz = self.nnz();
        let mut col_idx = try_filled(nnz, 0)?;
        let mut values = try_filled(nnz, T::zero())?;

        let mut next = row_ptr[..n_rows].to_vec();
        for j in 0..n_cols {
            for (i, &val) in self.col_iter(j) {
                let pos = next[i];
                col_idx[pos] = j;
                values[pos] = val;
                next[i] += 1;
            }
        }

        Ok(SparseMatrixCSR::from_raw_parts(n_rows, n_cols, row_ptr, col_idx, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dense() -> DenseMatrix<i32> {
        //    [1 2 0]
        //    [0 3 0]
        //    [4 0 5]
        DenseMatrix::from_rows(vec![vec![1, 2, 0], vec![0, 3, 0], vec![4, 0, 5]]).unwrap()
    }

    #[test]
    fn test_csr_to_ccs_conversion() {
        let csr = SparseMatrixCSR::from_dense(&sample_dense()).unwrap();
        let ccs = csr.to_ccs().unwrap();

        assert_eq!(ccs.shape(), (3, 3));
        assert_eq!(ccs.nnz(), 5);
        assert_eq!(ccs.col_ptr(), &[0, 2, 4, 5]);

        let col0: Vec<_> = ccs.col_iter(0).collect();
        assert_eq!(col0, vec![(0, &1), (2, &4)]);

        let col1: Vec<_> = ccs.col_iter(1).collect();
        assert_eq!(col1, vec![(0, &2), (1, &3)]);

        let col2: Vec<_> = ccs.col_iter(2).collect();
        assert_eq!(col2, vec![(2, &5)]);
        assert!(ccs.validate().is_ok());
    }

    #[test]
    fn test_ccs_to_csr_conversion() {
        let ccs = SparseMatrixCCS::new(3, 3, vec![0, 2, 4, 5], vec![0, 2, 0, 1, 2], vec![1, 4, 2, 3, 5])
            .unwrap();
        let csr = ccs.to_csr().unwrap();

        assert_eq!(csr.row_ptr(), &[0, 2, 3, 5]);
        assert_eq!(csr.col_idx(), &[0, 1, 1, 0, 2]);
        assert_eq!(csr.values(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_dense_compression_drops_zeros() {
        let dense = sample_dense();
        let csr = SparseMatrixCSR::from_dense(&dense).unwrap();
        let ccs = SparseMatrixCCS::from_dense(&dense).unwrap();

        assert_eq!(csr.nnz(), dense.count_nonzeros());
        assert_eq!(ccs.nnz(), dense.count_nonzeros());
        assert_eq!(csr.to_dense(), dense);
        assert_eq!(ccs.to_dense(), dense);
    }

    #[test]
    fn test_rectangular_with_empty_column() {
        // [0 7 0 0]
        // [0 0 0 9]
        let dense = DenseMatrix::from_rows(vec![vec![0, 7, 0, 0], vec![0, 0, 0, 9]]).unwrap();
        let ccs = SparseMatrixCCS::from_dense(&dense).unwrap();

        assert_eq!(ccs.col_ptr(), &[0, 0, 1, 1, 2]);
        assert_eq!(ccs.to_csr().unwrap(), SparseMatrixCSR::from_dense(&dense).unwrap());
    }
}
