//! Compressed Column Storage (CCS) matrix format implementation

use std::fmt;

use crate::error::{pointer_len, try_filled, Result};
use crate::matrix::csr::check_shape;
use crate::matrix::{validate_compressed, Element};

/// A sparse matrix in Compressed Column Storage (CCS) format
///
/// The CCS format stores a sparse matrix using three arrays:
/// - col_ptr: Array of size n_cols + 1 containing offsets into row_idx and values
/// - row_idx: Array of size nnz containing row indices of non-zero elements
/// - values: Array of size nnz containing the non-zero values
///
/// Within a column the row indices are strictly increasing and no stored value
/// is zero. This is the right operand format of the sparse multiply engine.
#[derive(Clone, PartialEq, Eq)]
pub struct SparseMatrixCCS<T> {
    n_rows: usize,
    n_cols: usize,

    /// col_ptr[j] is the index in row_idx and values where column j starts,
    /// col_ptr[n_cols] is equal to nnz
    col_ptr: Vec<usize>,
    row_idx: Vec<usize>,
    values: Vec<T>,
}

impl<T: Element> SparseMatrixCCS<T> {
    /// Creates a new CCS matrix from caller supplied buffers
    ///
    /// # Errors
    ///
    /// Fails if a dimension is zero or the buffers break any CCS invariant:
    /// - col_ptr.len() must be n_cols + 1, start at 0, end at nnz and never decrease
    /// - row_idx.len() must equal values.len()
    /// - row indices must be below n_rows and strictly increasing per column
    /// - no value may be zero
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        check_shape(n_rows, n_cols)?;
        validate_compressed(n_cols, n_rows, &col_ptr, &row_idx, &values)?;

        Ok(Self {
            n_rows,
            n_cols,
            col_ptr,
            row_idx,
            values,
        })
    }

    /// Allocates a zero-filled matrix with room for exactly `nnz` entries.
    ///
    /// The caller fills the buffers and keeps the invariants; see
    /// [`validate`](Self::validate).
    pub fn with_capacity(nnz: usize, n_rows: usize, n_cols: usize) -> Result<Self> {
        check_shape(n_rows, n_cols)?;

        Ok(Self {
            n_rows,
            n_cols,
            col_ptr: try_filled(pointer_len(n_cols)?, 0)?,
            row_idx: try_filled(nnz, 0)?,
            values: try_filled(nnz, T::zero())?,
        })
    }

    pub(crate) fn from_raw_parts(
        n_rows: usize,
        n_cols: usize,
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        debug_assert!(validate_compressed(n_cols, n_rows, &col_ptr, &row_idx, &values).is_ok());

        Self {
            n_rows,
            n_cols,
            col_ptr,
            row_idx,
            values,
        }
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize) -> Result<Self> {
        Self::with_capacity(0, n_rows, n_cols)
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Result<Self> {
        let mut matrix = Self::with_capacity(n, n, n)?;

        for (j, ptr) in matrix.col_ptr.iter_mut().enumerate() {
            *ptr = j;
        }
        for (j, row) in matrix.row_idx.iter_mut().enumerate() {
            *row = j;
        }
        matrix.values.fill(T::one());

        Ok(matrix)
    }

    /// Checks every CCS invariant of the current contents.
    pub fn validate(&self) -> Result<()> {
        validate_compressed(self.n_cols, self.n_rows, &self.col_ptr, &self.row_idx, &self.values)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn col_ptr(&self) -> &[usize] {
        &self.col_ptr
    }

    pub fn row_idx(&self) -> &[usize] {
        &self.row_idx
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn col_ptr_mut(&mut self) -> &mut [usize] {
        &mut self.col_ptr
    }

    pub fn row_idx_mut(&mut self) -> &mut [usize] {
        &mut self.row_idx
    }

    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Returns the row indices and values stored in column j
    ///
    /// # Panics
    ///
    /// Panics if `j >= n_cols`.
    pub fn col(&self, j: usize) -> (&[usize], &[T]) {
        assert!(j < self.n_cols, "Column index {} out of bounds (n_cols = {})", j, self.n_cols);

        let start = self.col_ptr[j];
        let end = self.col_ptr[j + 1];

        (&self.row_idx[start..end], &self.values[start..end])
    }

    /// Returns an iterator over the non-zero elements in column j
    ///
    /// Each item is a tuple (row_idx, value) representing a non-zero element
    pub fn col_iter(&self, j: usize) -> impl Iterator<Item = (usize, &T)> {
        let (rows, values) = self.col(j);
        rows.iter().copied().zip(values)
    }

    /// Returns the element at (i, j), zero when nothing is stored there
    ///
    /// # Panics
    ///
    /// Panics if `i >= n_rows` or `j >= n_cols`.
    pub fn get(&self, i: usize, j: usize) -> T {
        assert!(i < self.n_rows, "Row index {} out of bounds (n_rows = {})", i, self.n_rows);

        let (rows, values) = self.col(j);
        match rows.binary_search(&i) {
            Ok(pos) => values[pos],
            Err(_) => T::zero(),
        }
    }

    /// Decomposes the matrix into `(col_ptr, row_idx, values)`
    pub fn into_raw_parts(self) -> (Vec<usize>, Vec<usize>, Vec<T>) {
        (self.col_ptr, self.row_idx, self.values)
    }
}

impl<T: Element> fmt::Display for SparseMatrixCCS<T> {
    /// Prints the dense rendering, one row per line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // One cursor per column, advanced as rows are emitted top to bottom.
        let mut cursors: Vec<usize> = self.col_ptr[..self.n_cols].to_vec();

        for i in 0..self.n_rows {
            for j in 0..self.n_cols {
                if j > 0 {
                    write!(f, " ")?;
                }
                let pos = cursors[j];
                if pos < self.col_ptr[j + 1] && self.row_idx[pos] == i {
                    write!(f, "{}", self.values[pos])?;
                    cursors[j] += 1;
                } else {
                    write!(f, "{}", T::zero())?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T: Element> fmt::Debug for SparseMatrixCCS<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrixCCS {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        let max_cols_to_print = 5.min(self.n_cols);

        writeln!(f, "  content sample:")?;
        for j in 0..max_cols_to_print {
            write!(f, "    col {}: ", j)?;
            let start = self.col_ptr[j];
            let end = self.col_ptr[j + 1];

            if start == end {
                writeln!(f, "(empty)")?;
                continue;
            }

            let max_elements = 5.min(end - start);
            for k in start..(start + max_elements) {
                write!(f, "({}, {:?}) ", self.row_idx[k], self.values[k])?;
            }
            if end - start > max_elements {
                write!(f, "... ({} more)", end - start - max_elements)?;
            }
            writeln!(f)?;
        }

        if self.n_cols > max_cols_to_print {
            writeln!(f, "    ... ({} more columns)", self.n_cols - max_cols_to_print)?;
        }

        write!(f, "}}")
    }
}
