//! Error types for the segmented deque.
//!
//! Every fallible operation on [`SegmentedDeque`](super::SegmentedDeque)
//! reports failure through [`DequeError`]. None of these errors leave the
//! deque in a modified state: the caller can inspect the error and keep
//! using the container.

use std::collections::TryReserveError;

use thiserror::Error;

/// Represents errors that can occur when operating on a segmented deque.
///
/// # Examples
///
/// ```rust
/// use segdeque::segmented::{DequeError, SegmentedDeque};
///
/// let mut deque: SegmentedDeque<i32> = SegmentedDeque::new();
/// assert_eq!(
///     deque.pop_front(),
///     Err(DequeError::EmptyContainer { operation: "pop_front" })
/// );
/// assert_eq!(
///     deque.at(3).unwrap_err().to_string(),
///     "index 3 is out of range for a deque of length 0"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DequeError {
    /// An element was requested from, or removed from, an empty deque.
    #[error("{operation}: the deque is empty")]
    EmptyContainer {
        /// The name of the operation that was attempted.
        operation: &'static str,
    },

    /// A bounds-checked access used an index outside `[0, len)`.
    #[error("index {index} is out of range for a deque of length {len}")]
    OutOfRange {
        /// The requested index.
        index: usize,
        /// The length of the deque at the time of the access.
        len: usize,
    },

    /// A block or a new directory could not be allocated.
    #[error("block or directory allocation failed: {0}")]
    AllocationFailure(#[from] TryReserveError),

    /// Growing the directory would overflow `usize`.
    #[error("directory cannot grow past {directory_size} entries without overflowing")]
    CapacityOverflow {
        /// The directory size at the time of the failed growth.
        directory_size: usize,
    },
}

impl DequeError {
    pub(crate) const fn empty(operation: &'static str) -> Self {
        Self::EmptyContainer { operation }
    }
}
