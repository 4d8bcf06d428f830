//! # sparsemul: integer sparse matrix multiplication
//!
//! Computes Z = X·Y for integer matrices stored either densely or in
//! compressed sparse form.
//!
//! ## Overview
//!
//! - [`SparseMatrixCSR`]: compressed rows, fast row slicing (left operand and result)
//! - [`SparseMatrixCCS`]: compressed columns, fast column slicing (right operand)
//! - [`sparse_multiply`]: the CSR × CCS engine; every output entry is a
//!   merge-join of one row against one column, with the result size
//!   discovered on the fly
//! - [`DenseMatrix`]: the naive triple-loop reference
//!
//! Pairing a CSR left operand with a CCS right operand lets both be scanned in
//! increasing index order, which is what makes the merge-join possible.
//!
//! ## Usage
//!
//! ```
//! use sparsemul::{multiply, SparseMatrixCCS, SparseMatrixCSR};
//!
//! // X = [2 0; 0 3], Y = [1 4; 0 5]
//! let x = SparseMatrixCSR::new(2, 2, vec![0, 1, 2], vec![0, 1], vec![2, 3]).unwrap();
//! let y = SparseMatrixCCS::new(2, 2, vec![0, 1, 3], vec![0, 0, 1], vec![1, 4, 5]).unwrap();
//!
//! let z = multiply(&x, &y).unwrap();
//! assert_eq!(z.values(), &[2, 8, 15]);
//! assert_eq!(z.col_idx(), &[0, 1, 1]);
//! ```
//!
//! All failures are reported as [`SparseError`]; nothing in the library
//! terminates the process.

pub mod error;
pub mod matrix;
pub mod utils;

// Re-export primary components
pub use error::{Result, SparseError};
pub use matrix::{multiply, sparse_multiply};
pub use matrix::{CcsBuilder, CsrBuilder, DenseMatrix, Element, MultiplyConfig};
pub use matrix::{SparseMatrixCCS, SparseMatrixCSR};
pub use utils::formats::{from_sprs_ccs, from_sprs_csr, to_sprs_ccs, to_sprs_csr};
pub use utils::random::{random_dense, random_sparse_dense};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
