//! Segmented (chunked) sequence containers.
//!
//! This module provides a double-ended queue stored in two levels:
//!
//! - [`SegmentedDeque`]: the container, with amortized O(1) pushes and pops
//!   at both ends and O(1) indexing
//! - [`DequeError`]: the errors its fallible operations report
//! - [`recentered_layout`]: the directory growth arithmetic, exposed so it can
//!   be checked on its own
//!
//! # Layout
//!
//! Elements live in fixed-size blocks of `BLOCK_SIZE` slots. A directory
//! holds the blocks in order; two cursors mark the first live slot and the
//! slot one past the last. Neither pushing nor growing the directory ever
//! moves a live element: only block ownership moves between directories.
//!
//! # Examples
//!
//! ## Both ends
//!
//! ```rust
//! use segdeque::segmented::SegmentedDeque;
//!
//! let mut deque: SegmentedDeque<i32> = SegmentedDeque::new();
//! for value in 1..=20 {
//!     deque.push_back(value);
//! }
//! assert_eq!(deque[7], 8);  // last slot of the first block
//! assert_eq!(deque[8], 9);  // first slot of the next one
//!
//! for value in 0..5 {
//!     deque.push_front(-value);
//! }
//! assert_eq!(deque.front(), Ok(&-4));
//! assert_eq!(deque.len(), 25);
//! ```
//!
//! ## Errors instead of panics
//!
//! ```rust
//! use segdeque::segmented::{DequeError, SegmentedDeque};
//!
//! let mut deque: SegmentedDeque<i32> = SegmentedDeque::new();
//! assert!(matches!(deque.pop_back(), Err(DequeError::EmptyContainer { .. })));
//!
//! deque.try_push_back(1)?;
//! assert_eq!(deque.at(0), Ok(&1));
//! assert_eq!(deque.at(1), Err(DequeError::OutOfRange { index: 1, len: 1 }));
//! # Ok::<(), DequeError>(())
//! ```
//!
//! ## Custom block size
//!
//! ```rust
//! use segdeque::segmented::SegmentedDeque;
//!
//! let deque: SegmentedDeque<u64, 64> = (0..1000).collect();
//! assert_eq!(deque.block_size(), 64);
//! assert_eq!(deque[999], 999);
//! ```

mod block;
mod cursor;
mod deque;
mod directory;
mod error;
mod iter;
mod layout;

pub use deque::DEFAULT_BLOCK_SIZE;
pub use deque::DEFAULT_DIRECTORY_SIZE;
pub use deque::SegmentedDeque;
pub use error::DequeError;
pub use iter::IntoIter;
pub use iter::Iter;
pub use iter::IterMut;
pub use layout::DirectoryLayout;
pub use layout::recentered_layout;
