use thiserror::Error;

/// Errors returned by [`SGTreeSet::try_from_sorted`](crate::SGTreeSet::try_from_sorted).
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum BuildError {
    /// The element at `index` does not order strictly after its predecessor.
    #[error("input is not strictly ascending at index {index}")]
    NotStrictlyAscending {
        /// Zero-based position of the first offending element.
        index: usize,
    },
}
