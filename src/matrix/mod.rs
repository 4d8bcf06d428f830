// Matrix data structures and operations

pub mod builder;
pub mod ccs;
pub mod config;
pub mod conversion;
pub mod csr;
pub mod dense;
pub mod spgemm;

use std::fmt::{Debug, Display};

use num_traits::PrimInt;

pub use builder::{CcsBuilder, CsrBuilder};
pub use ccs::SparseMatrixCCS;
pub use config::MultiplyConfig;
pub use csr::SparseMatrixCSR;
pub use dense::DenseMatrix;
pub use spgemm::{multiply, sparse_multiply};

/// Integer element type stored in every matrix of this crate.
///
/// Products are accumulated with checked arithmetic, so any primitive integer
/// works; overflow is reported instead of wrapping.
pub trait Element: PrimInt + Default + Debug + Display {}

impl<T> Element for T where T: PrimInt + Default + Debug + Display {}

/// Checks the shared invariants of a compressed layout.
///
/// `ptr` slices `idx`/`values` into `n_major` runs; every index must be below
/// `n_minor` and strictly increasing inside its run, and no value may be zero.
pub(crate) fn validate_compressed<T: Element>(
    n_major: usize,
    n_minor: usize,
    ptr: &[usize],
    idx: &[usize],
    values: &[T],
) -> crate::Result<()> {
    use crate::SparseError;

    if ptr.len().checked_sub(1) != Some(n_major) {
        return Err(SparseError::InvalidPointerLength {
            expected: n_major.saturating_add(1),
            actual: ptr.len(),
        });
    }
    if idx.len() != values.len() {
        return Err(SparseError::LengthMismatch {
            indices: idx.len(),
            values: values.len(),
        });
    }
    if ptr[0] != 0 {
        return Err(SparseError::PointerStart { found: ptr[0] });
    }
    if ptr[n_major] != idx.len() {
        return Err(SparseError::PointerEnd {
            expected: idx.len(),
            found: ptr[n_major],
        });
    }

    for major in 0..n_major {
        let (start, end) = (ptr[major], ptr[major + 1]);
        if start > end {
            return Err(SparseError::PointerNotMonotonic { position: major + 1 });
        }
        // A later run can still end past nnz when an intermediate one decreases.
        if end > idx.len() {
            return Err(SparseError::PointerEnd {
                expected: idx.len(),
                found: end,
            });
        }

        for pos in start..end {
            if idx[pos] >= n_minor {
                return Err(SparseError::IndexOutOfBounds {
                    index: idx[pos],
                    bound: n_minor,
                });
            }
            if pos > start && idx[pos] <= idx[pos - 1] {
                return Err(SparseError::IndexNotIncreasing {
                    slice: major,
                    position: pos,
                });
            }
            if values[pos].is_zero() {
                return Err(SparseError::ExplicitZero { position: pos });
            }
        }
    }

    Ok(())
}
