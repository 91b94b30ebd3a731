//! # segdeque
//!
//! A segmented double-ended queue for Rust.
//!
//! ## Overview
//!
//! [`SegmentedDeque`](segmented::SegmentedDeque) stores its elements in
//! fixed-size blocks referenced from a directory. Compared with a flat ring
//! buffer it never moves existing elements when it grows, and compared with
//! a linked list it keeps elements contiguous within a block and indexes in
//! O(1):
//!
//! - **Both ends**: amortized O(1) `push_front`, `push_back`, `pop_front`,
//!   `pop_back`
//! - **Random access**: O(1) `get`, `at` and `[]`
//! - **Stable growth**: growing the directory moves block ownership, never
//!   elements
//! - **Block reuse**: blocks emptied by pops are retained for later pushes
//!
//! ## Feature Flags
//!
//! - `segmented`: The segmented deque (enabled by default)
//! - `serde`: `Serialize`/`Deserialize` as a sequence
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use segdeque::prelude::*;
//!
//! let mut deque: SegmentedDeque<i32> = SegmentedDeque::new();
//! deque.push_back(2);
//! deque.push_front(1);
//! assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use segdeque::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "segmented")]
    pub use crate::segmented::*;
}

#[cfg(feature = "segmented")]
pub mod segmented;
