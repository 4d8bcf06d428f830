//! Utility functions and helpers

pub mod formats;
pub mod random;

/// Turns per-slice entry counts into the pointer array of a compressed matrix.
///
/// The output starts at 0 and has one element more than `counts`.
pub fn counts_to_pointers(counts: &[usize]) -> Vec<usize> {
    std::iter::once(0)
        .chain(counts.iter().scan(0, |total, &count| {
            *total += count;
            Some(*total)
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_to_pointers_with_empty_slices() {
        // Rows of length 2, 0, 3 and 0.
        assert_eq!(counts_to_pointers(&[2, 0, 3, 0]), vec![0, 2, 2, 5, 5]);
    }

    #[test]
    fn test_counts_to_pointers_no_slices() {
        assert_eq!(counts_to_pointers(&[]), vec![0]);
    }
}
