//! Dense row-major matrices and the naive triple-loop product
//!
//! This is the reference the sparse engine is checked against; it exploits
//! no sparsity at all.

use std::fmt;

use ndarray::Array2;

use crate::error::{Result, SparseError};
use crate::matrix::Element;

/// A dense row-major matrix
#[derive(Clone, PartialEq, Eq)]
pub struct DenseMatrix<T> {
    data: Array2<T>,
}

impl<T: Element> DenseMatrix<T> {
    /// Creates an all-zero matrix
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            data: Array2::from_elem((n_rows, n_cols), T::zero()),
        }
    }

    /// Wraps an existing standard-layout array
    pub fn from_array(data: Array2<T>) -> Self {
        Self { data }
    }

    /// Builds a matrix from row vectors
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` when the rows have different lengths and
    /// `InvalidShape` when there are no rows or no columns.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if n_rows == 0 || n_cols == 0 {
            return Err(SparseError::InvalidShape { n_rows, n_cols });
        }

        let mut flat = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(SparseError::LengthMismatch {
                    indices: n_cols,
                    values: row.len(),
                });
            }
            flat.extend(row);
        }

        let data = Array2::from_shape_vec((n_rows, n_cols), flat)
            .map_err(|e| SparseError::InvalidParameter(e.to_string()))?;
        Ok(Self { data })
    }

    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn as_array(&self) -> &Array2<T> {
        &self.data
    }

    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    /// Returns the element at (i, j)
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the matrix.
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[[i, j]]
    }

    /// # Panics
    ///
    /// Panics if the position is outside the matrix.
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        self.data[[i, j]] = value;
    }

    /// Number of entries that are not zero
    pub fn count_nonzeros(&self) -> usize {
        self.data.iter().filter(|v| !v.is_zero()).count()
    }

    /// Computes `self * other` with the textbook triple loop
    ///
    /// # Errors
    ///
    /// `IncompatibleDimensions` if `self.n_cols() != other.n_rows()`,
    /// `ArithmeticOverflow` if a product or partial sum does not fit `T`.
    /// Entries are accumulated in increasing `k` order and each step is
    /// checked, so an entry can fail even when its final value fits.
    pub fn multiply(&self, other: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        if self.n_cols() != other.n_rows() {
            return Err(SparseError::incompatible(self.shape(), other.shape()));
        }

        let z_rows = self.n_rows();
        let z_cols = other.n_cols();
        let inner = self.n_cols();
        let mut z = Array2::from_elem((z_rows, z_cols), T::zero());

        for i in 0..z_rows {
            for j in 0..z_cols {
                let mut dot = T::zero();
                for k in 0..inner {
                    dot = self.data[[i, k]]
                        .checked_mul(&other.data[[k, j]])
                        .and_then(|p| dot.checked_add(&p))
                        .ok_or(SparseError::ArithmeticOverflow { row: i, col: j })?;
                }
                z[[i, j]] = dot;
            }
        }

        Ok(DenseMatrix { data: z })
    }
}

impl<T: Element> fmt::Display for DenseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.rows() {
            for (j, val) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T: Element> fmt::Debug for DenseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DenseMatrix")
            .field("shape", &self.shape())
            .field("data", &self.data)
            .finish()
    }
}
