//! Error types for matrix construction and multiplication

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors reported by matrix constructors, builders and the multiply engines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SparseError {
    /// Inner dimensions of the operands do not agree.
    #[error(
        "Matrix sizes are incompatible for multiplication: {left_rows}×{left_cols} by {right_rows}×{right_cols}"
    )]
    IncompatibleDimensions {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    /// The allocator could not provide the requested buffer.
    #[error("Allocation of {requested} elements failed")]
    Allocation {
        /// Number of elements that were requested
        requested: usize,
    },

    /// A matrix dimension was zero.
    #[error("Invalid shape {n_rows}×{n_cols}: dimensions must be positive")]
    InvalidShape { n_rows: usize, n_cols: usize },

    /// The pointer array has the wrong length for the matrix dimension.
    #[error("Invalid pointer array: length {actual} (expected {expected})")]
    InvalidPointerLength { expected: usize, actual: usize },

    /// Index and value arrays have different lengths.
    #[error("Length mismatch: {indices} indices but {values} values")]
    LengthMismatch { indices: usize, values: usize },

    /// The first pointer entry is not zero.
    #[error("Pointer array must start at 0, found {found}")]
    PointerStart { found: usize },

    /// The last pointer entry does not equal the number of stored entries.
    #[error("Pointer array must end at {expected}, found {found}")]
    PointerEnd { expected: usize, found: usize },

    /// The pointer array decreases at the given position.
    #[error("Pointer array decreases at position {position}")]
    PointerNotMonotonic { position: usize },

    /// A stored index is not below the matching dimension.
    #[error("Index {index} out of bounds (bound = {bound})")]
    IndexOutOfBounds { index: usize, bound: usize },

    /// Indices inside one row (CSR) or column (CCS) are not strictly increasing.
    #[error("Indices in slice {slice} are not strictly increasing at entry {position}")]
    IndexNotIncreasing { slice: usize, position: usize },

    /// A stored value is zero.
    #[error("Explicit zero stored at entry {position}")]
    ExplicitZero { position: usize },

    /// A product or running partial sum for an output entry does not fit the
    /// element type, even if the finished dot product would.
    #[error("Arithmetic overflow computing entry ({row}, {col})")]
    ArithmeticOverflow { row: usize, col: usize },

    /// The staged result grew past the configured bound.
    #[error("Workspace limit of {limit} nonzeros exceeded")]
    WorkspaceLimitExceeded { limit: usize },

    /// A caller supplied parameter is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl SparseError {
    /// Create an IncompatibleDimensions error from two shapes.
    pub fn incompatible(left: (usize, usize), right: (usize, usize)) -> Self {
        Self::IncompatibleDimensions {
            left_rows: left.0,
            left_cols: left.1,
            right_rows: right.0,
            right_cols: right.1,
        }
    }

    /// Map an allocator failure for `requested` elements.
    pub(crate) fn allocation(requested: usize, _source: TryReserveError) -> Self {
        Self::Allocation { requested }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SparseError>;

/// Length of the pointer array for `n` rows or columns.
pub(crate) fn pointer_len(n: usize) -> Result<usize> {
    n.checked_add(1)
        .ok_or(SparseError::Allocation { requested: usize::MAX })
}

/// Allocate a vector of exactly `len` copies of `fill`, reporting allocator failure.
pub(crate) fn try_filled<T: Clone>(len: usize, fill: T) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|e| SparseError::allocation(len, e))?;
    buf.resize(len, fill);
    Ok(buf)
}
