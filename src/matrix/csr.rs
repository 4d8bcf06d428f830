//! Compressed Sparse Row (CSR) matrix format implementation

use std::fmt;

use crate::error::{pointer_len, try_filled, Result, SparseError};
use crate::matrix::{validate_compressed, Element};

/// A sparse matrix in Compressed Sparse Row (CSR) format
///
/// The CSR format stores a sparse matrix using three arrays:
/// - row_ptr: Array of size n_rows + 1 containing offsets into col_idx and values
/// - col_idx: Array of size nnz containing column indices of non-zero elements
/// - values: Array of size nnz containing the non-zero values
///
/// Within a row the column indices are strictly increasing and no stored value
/// is zero. This is the left operand and the result format of the sparse
/// multiply engine.
#[derive(Clone, PartialEq, Eq)]
pub struct SparseMatrixCSR<T> {
    n_rows: usize,
    n_cols: usize,

    /// row_ptr[i] is the index in col_idx and values where row i starts,
    /// row_ptr[n_rows] is equal to nnz
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<T>,
}

impl<T: Element> SparseMatrixCSR<T> {
    /// Creates a new CSR matrix from caller supplied buffers
    ///
    /// # Arguments
    ///
    /// * `n_rows` - Number of rows
    /// * `n_cols` - Number of columns
    /// * `row_ptr` - Row pointers
    /// * `col_idx` - Column indices
    /// * `values` - Non-zero values
    ///
    /// # Errors
    ///
    /// Fails if a dimension is zero or the buffers break any CSR invariant:
    /// - row_ptr.len() must be n_rows + 1, start at 0, end at nnz and never decrease
    /// - col_idx.len() must equal values.len()
    /// - column indices must be below n_cols and strictly increasing per row
    /// - no value may be zero
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        check_shape(n_rows, n_cols)?;
        validate_compressed(n_rows, n_cols, &row_ptr, &col_idx, &values)?;

        Ok(Self {
            n_rows,
            n_cols,
            row_ptr,
            col_idx,
            values,
        })
    }

    /// Allocates a zero-filled matrix with room for exactly `nnz` entries.
    ///
    /// Nothing is validated: the caller fills the buffers through
    /// [`values_mut`](Self::values_mut), [`col_idx_mut`](Self::col_idx_mut) and
    /// [`row_ptr_mut`](Self::row_ptr_mut) and is responsible for the invariants
    /// (see [`validate`](Self::validate)).
    pub fn with_capacity(nnz: usize, n_rows: usize, n_cols: usize) -> Result<Self> {
        check_shape(n_rows, n_cols)?;

        Ok(Self {
            n_rows,
            n_cols,
            row_ptr: try_filled(pointer_len(n_rows)?, 0)?,
            col_idx: try_filled(nnz, 0)?,
            values: try_filled(nnz, T::zero())?,
        })
    }

    /// Assembles a matrix from buffers already known to be canonical.
    pub(crate) fn from_raw_parts(
        n_rows: usize,
        n_cols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        debug_assert!(validate_compressed(n_rows, n_cols, &row_ptr, &col_idx, &values).is_ok());

        Self {
            n_rows,
            n_cols,
            row_ptr,
            col_idx,
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

        for (i, ptr) in matrix.row_ptr.iter_mut().enumerate() {
            *ptr = i;
        }
        for (i, col) in matrix.col_idx.iter_mut().enumerate() {
            *col = i;
        }
        matrix.values.fill(T::one());

        Ok(matrix)
    }

    /// Checks every CSR invariant of the current contents.
    pub fn validate(&self) -> Result<()> {
        validate_compressed(self.n_rows, self.n_cols, &self.row_ptr, &self.col_idx, &self.values)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Returns `(n_rows, n_cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn row_ptr(&self) -> &[usize] {
        &self.row_ptr
    }

    pub fn col_idx(&self) -> &[usize] {
        &self.col_idx
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn row_ptr_mut(&mut self) -> &mut [usize] {
        &mut self.row_ptr
    }

    pub fn col_idx_mut(&mut self) -> &mut [usize] {
        &mut self.col_idx
    }

    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Returns the column indices and values stored in row i
    ///
    /// # Panics
    ///
    /// Panics if `i >= n_rows`.
    pub fn row(&self, i: usize) -> (&[usize], &[T]) {
        assert!(i < self.n_rows, "Row index {} out of bounds (n_rows = {})", i, self.n_rows);

        let start = self.row_ptr[i];
        let end = self.row_ptr[i + 1];

        (&self.col_idx[start..end], &self.values[start..end])
    }

    /// Returns an iterator over the non-zero elements in row i
    ///
    /// Each item is a tuple (col_idx, value) representing a non-zero element
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, &T)> {
        let (cols, values) = self.row(i);
        cols.iter().copied().zip(values)
    }

    /// Returns the element at (i, j), zero when nothing is stored there
    ///
    /// # Panics
    ///
    /// Panics if `i >= n_rows` or `j >= n_cols`.
    pub fn get(&self, i: usize, j: usize) -> T {
        assert!(j < self.n_cols, "Column index {} out of bounds (n_cols = {})", j, self.n_cols);

        let (cols, values) = self.row(i);
        match cols.binary_search(&j) {
            Ok(pos) => values[pos],
            Err(_) => T::zero(),
        }
    }

    /// Decomposes the matrix into `(row_ptr, col_idx, values)`
    pub fn into_raw_parts(self) -> (Vec<usize>, Vec<usize>, Vec<T>) {
        (self.row_ptr, self.col_idx, self.values)
    }
}

pub(crate) fn check_shape(n_rows: usize, n_cols: usize) -> Result<()> {
    if n_rows == 0 || n_cols == 0 {
        return Err(SparseError::InvalidShape { n_rows, n_cols });
    }
    Ok(())
}

impl<T: Element> fmt::Display for SparseMatrixCSR<T> {
    /// Prints the dense rendering, one row per line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.n_rows {
            let mut entries = self.row_iter(i).peekable();

            for j in 0..self.n_cols {
                if j > 0 {
                    write!(f, " ")?;
                }
                match entries.next_if(|&(col, _)| col == j) {
                    Some((_, val)) => write!(f, "{}", val)?,
                    None => write!(f, "{}", T::zero())?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T: Element> fmt::Debug for SparseMatrixCSR<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrixCSR {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        // Print a sample of the matrix content
        let max_rows_to_print = 5.min(self.n_rows);

        writeln!(f, "  content sample:")?;
        for i in 0..max_rows_to_print {
            write!(f, "    row {}: ", i)?;
            let start = self.row_ptr[i];
            let end = self.row_ptr[i + 1];

            if start == end {
                writeln!(f, "(empty)")?;
                continue;
            }

            let max_elements = 5.min(end - start);
            for j in start..(start + max_elements) {
                write!(f, "({}, {:?}) ", self.col_idx[j], self.values[j])?;
            }
            if end - start > max_elements {
                write!(f, "... ({} more)", end - start - max_elements)?;
            }
            writeln!(f)?;
        }

        if self.n_rows > max_rows_to_print {
            writeln!(f, "    ... ({} more rows)", self.n_rows - max_rows_to_print)?;
        }

        write!(f, "}}")
    }
}
