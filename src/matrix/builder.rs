//! Growable accumulators that finalize into compressed matrices
//!
//! Entries are appended one row (CSR) or column (CCS) at a time, in increasing
//! index order. Nothing needs to be known about the nonzero count up front;
//! `build` trims the buffers to the exact size.

use crate::error::{pointer_len, Result, SparseError};
use crate::matrix::csr::check_shape;
use crate::matrix::{Element, SparseMatrixCCS, SparseMatrixCSR};

/// Shared state of both builders. `major` runs are rows for CSR and columns
/// for CCS.
#[derive(Debug, Clone)]
struct CompressedBuilder<T> {
    n_major: usize,
    n_minor: usize,
    major_name: &'static str,
    ptr: Vec<usize>,
    idx: Vec<usize>,
    values: Vec<T>,
    limit: Option<usize>,
}

impl<T: Element> CompressedBuilder<T> {
    fn new(n_major: usize, n_minor: usize, major_name: &'static str) -> Result<Self> {
        let ptr_len = pointer_len(n_major)?;
        let mut ptr = Vec::new();
        ptr.try_reserve_exact(ptr_len)
            .map_err(|e| SparseError::allocation(ptr_len, e))?;
        ptr.push(0);

        Ok(Self {
            n_major,
            n_minor,
            major_name,
            ptr,
            idx: Vec::new(),
            values: Vec::new(),
            limit: None,
        })
    }

    fn current(&self) -> usize {
        self.ptr.len() - 1
    }

    fn ensure_open(&self) -> Result<()> {
        if self.current() >= self.n_major {
            return Err(SparseError::InvalidParameter(format!(
                "all {} {} are already finished",
                self.n_major, self.major_name
            )));
        }
        Ok(())
    }

    fn push(&mut self, index: usize, value: T) -> Result<()> {
        self.ensure_open()?;

        if index >= self.n_minor {
            return Err(SparseError::IndexOutOfBounds {
                index,
                bound: self.n_minor,
            });
        }

        let run_start = self.ptr[self.current()];
        if self.idx.len() > run_start && self.idx[self.idx.len() - 1] >= index {
            return Err(SparseError::IndexNotIncreasing {
                slice: self.current(),
                position: self.idx.len(),
            });
        }

        // Zero is absence, not a value.
        if value.is_zero() {
            return Ok(());
        }

        if let Some(limit) = self.limit {
            if self.idx.len() >= limit {
                return Err(SparseError::WorkspaceLimitExceeded { limit });
            }
        }

        let requested = self.idx.len() + 1;
        self.idx
            .try_reserve(1)
            .map_err(|e| SparseError::allocation(requested, e))?;
        self.values
            .try_reserve(1)
            .map_err(|e| SparseError::allocation(requested, e))?;

        self.idx.push(index);
        self.values.push(value);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.ptr.push(self.idx.len());
        Ok(())
    }

    fn into_parts(mut self) -> (Vec<usize>, Vec<usize>, Vec<T>) {
        while self.current() < self.n_major {
            self.ptr.push(self.idx.len());
        }
        self.idx.shrink_to_fit();
        self.values.shrink_to_fit();

        (self.ptr, self.idx, self.values)
    }
}

/// Row-by-row accumulator for [`SparseMatrixCSR`]
///
/// ```
/// use sparsemul::CsrBuilder;
///
/// let mut builder = CsrBuilder::<i32>::new(2, 3).unwrap();
/// builder.push(0, 4).unwrap();
/// builder.push(2, 1).unwrap();
/// builder.finish_row().unwrap();
/// builder.push(1, 0).unwrap(); // zeros are skipped
///
/// let matrix = builder.build();
/// assert_eq!(matrix.nnz(), 2);
/// assert_eq!(matrix.row_ptr(), &[0, 2, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct CsrBuilder<T> {
    n_rows: usize,
    n_cols: usize,
    inner: CompressedBuilder<T>,
}

impl<T: Element> CsrBuilder<T> {
    pub fn new(n_rows: usize, n_cols: usize) -> Result<Self> {
        check_shape(n_rows, n_cols)?;

        Ok(Self {
            n_rows,
            n_cols,
            inner: CompressedBuilder::new(n_rows, n_cols, "rows")?,
        })
    }

    /// Make `push` fail with `WorkspaceLimitExceeded` past `limit` stored entries
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.inner.limit = limit;
        self
    }

    /// Appends `value` at column `col` of the current row
    pub fn push(&mut self, col: usize, value: T) -> Result<()> {
        self.inner.push(col, value)
    }

    /// Closes the current row and moves to the next one
    pub fn finish_row(&mut self) -> Result<()> {
        self.inner.finish()
    }

    /// Index of the row currently being filled
    pub fn current_row(&self) -> usize {
        self.inner.current()
    }

    pub fn nnz(&self) -> usize {
        self.inner.idx.len()
    }

    /// Closes any remaining rows and returns the finished matrix
    pub fn build(self) -> SparseMatrixCSR<T> {
        let (row_ptr, col_idx, values) = self.inner.into_parts();
        SparseMatrixCSR::from_raw_parts(self.n_rows, self.n_cols, row_ptr, col_idx, values)
    }
}

/// Column-by-column accumulator for [`SparseMatrixCCS`]
#[derive(Debug, Clone)]
pub struct CcsBuilder<T> {
    n_rows: usize,
    n_cols: usize,
    inner: CompressedBuilder<T>,
}

impl<T: Element> CcsBuilder<T> {
    pub fn new(n_rows: usize, n_cols: usize) -> Result<Self> {
        check_shape(n_rows, n_cols)?;

        Ok(Self {
            n_rows,
            n_cols,
            inner: CompressedBuilder::new(n_cols, n_rows, "columns")?,
        })
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.inner.limit = limit;
        self
    }

    /// Appends `value` at row `row` of the current column
    pub fn push(&mut self, row: usize, value: T) -> Result<()> {
        self.inner.push(row, value)
    }

    pub fn finish_col(&mut self) -> Result<()> {
        self.inner.finish()
    }

    pub fn current_col(&self) -> usize {
        self.inner.current()
    }

    pub fn nnz(&self) -> usize {
        self.inner.idx.len()
    }

    pub fn build(self) -> SparseMatrixCCS<T> {
        let (col_ptr, row_idx, values) = self.inner.into_parts();
        SparseMatrixCCS::from_raw_parts(self.n_rows, self.n_cols, col_ptr, row_idx, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_trailing_empty_rows() {
        let mut builder = CsrBuilder::<i64>::new(4, 4).unwrap();
        builder.push(1, 3).unwrap();
        builder.finish_row().unwrap();
        builder.push(0, -2).unwrap();
        builder.push(3, 8).unwrap();

        let matrix = builder.build();
        assert_eq!(matrix.row_ptr(), &[0, 1, 3, 3, 3]);
        assert_eq!(matrix.col_idx(), &[1, 0, 3]);
        assert_eq!(matrix.values(), &[3, -2, 8]);
        assert!(matrix.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_increasing_index() {
        let mut builder = CsrBuilder::<i32>::new(1, 5).unwrap();
        builder.push(2, 1).unwrap();
        assert_eq!(
            builder.push(2, 1),
            Err(SparseError::IndexNotIncreasing { slice: 0, position: 1 })
        );
        assert_eq!(
            builder.push(1, 1),
            Err(SparseError::IndexNotIncreasing { slice: 0, position: 1 })
        );
    }

    #[test]
    fn test_index_order_resets_per_row() {
        let mut builder = CsrBuilder::<i32>::new(2, 5).unwrap();
        builder.push(4, 1).unwrap();
        builder.finish_row().unwrap();
        assert!(builder.push(0, 1).is_ok());
    }

    #[test]
    fn test_rejects_out_of_bounds_index() {
        let mut builder = CcsBuilder::<i32>::new(3, 2).unwrap();
        assert_eq!(
            builder.push(3, 1),
            Err(SparseError::IndexOutOfBounds { index: 3, bound: 3 })
        );
    }

    #[test]
    fn test_rejects_push_after_last_row() {
        let mut builder = CsrBuilder::<i32>::new(1, 2).unwrap();
        builder.finish_row().unwrap();
        assert!(matches!(builder.push(0, 1), Err(SparseError::InvalidParameter(_))));
        assert!(matches!(builder.finish_row(), Err(SparseError::InvalidParameter(_))));
    }

    #[test]
    fn test_limit() {
        let mut builder = CsrBuilder::<i32>::new(1, 4).unwrap().with_limit(Some(2));
        builder.push(0, 1).unwrap();
        builder.push(1, 0).unwrap(); // skipped zero does not count
        builder.push(2, 1).unwrap();
        assert_eq!(
            builder.push(3, 1),
            Err(SparseError::WorkspaceLimitExceeded { limit: 2 })
        );
    }

    #[test]
    fn test_major_dimension_without_room_for_pointer() {
        assert!(matches!(
            CsrBuilder::<i32>::new(usize::MAX, 1),
            Err(SparseError::Allocation { .. })
        ));
        assert!(matches!(
            CcsBuilder::<i32>::new(1, usize::MAX),
            Err(SparseError::Allocation { .. })
        ));
    }

    #[test]
    fn test_ccs_builder() {
        let mut builder = CcsBuilder::<i32>::new(3, 2).unwrap();
        builder.push(0, 1).unwrap();
        builder.push(2, 4).unwrap();
        builder.finish_col().unwrap();
        assert_eq!(builder.current_col(), 1);
        builder.push(1, 3).unwrap();

        let matrix = builder.build();
        assert_eq!(matrix.col_ptr(), &[0, 2, 3]);
        assert_eq!(matrix.row_idx(), &[0, 2, 1]);
        assert_eq!(matrix.get(2, 0), 4);
    }
}
