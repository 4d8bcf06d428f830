//! Configuration for the sparse multiply engine

/// Configuration for [`sparse_multiply`](crate::sparse_multiply)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiplyConfig {
    /// Run the full invariant check on both operands before multiplying.
    ///
    /// The merge-join stops scanning a row as soon as the column cursor is
    /// exhausted, which is only correct when indices are strictly increasing.
    /// Matrices built through the checked constructors already satisfy this;
    /// buffers filled by hand through `with_capacity` may not.
    pub validate_operands: bool,

    /// Upper bound on the number of nonzeros staged for the result.
    /// If None, the workspace grows as needed
    pub max_result_nonzeros: Option<usize>,
}

impl Default for MultiplyConfig {
    fn default() -> Self {
        Self {
            validate_operands: true,
            max_result_nonzeros: None,
        }
    }
}

impl MultiplyConfig {
    /// Create a config that trusts its operands and never bounds the workspace
    ///
    /// # Panics
    ///
    /// A multiply run with this config panics on operands whose pointer
    /// arrays reach past their index buffers.
    pub fn unchecked() -> Self {
        Self {
            validate_operands: false,
            max_result_nonzeros: None,
        }
    }

    pub fn with_validation(mut self, validate_operands: bool) -> Self {
        self.validate_operands = validate_operands;
        self
    }

    /// Bound the staged result to at most `limit` nonzeros
    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.max_result_nonzeros = Some(limit);
        self
    }
}
