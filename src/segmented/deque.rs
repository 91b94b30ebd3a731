//! Segmented double-ended queue.
//!
//! This module provides [`SegmentedDeque`], a double-ended queue stored as a
//! directory of fixed-size blocks.
//!
//! # Overview
//!
//! The deque keeps two cursors, `front` and `back`, that delimit the live
//! elements as the half-open range `[front, back)` walked slot by slot
//! through the blocks in directory order:
//!
//! ```text
//!  directory: [ -  | B0 | B1 | B2 |  -  |  -  ]
//!                    |              |
//!             front (B0, 5)    back (B2, 3)
//!
//!  B0: [ . . . . . x x x ]   B1: [ x x x x x x x x ]   B2: [ x x x . . . . . ]
//! ```
//!
//! - Pushes and pops only move a cursor inside its block; once every
//!   `BLOCK_SIZE` operations a cursor crosses into a neighbouring block.
//! - When a cursor needs an entry past the end of the directory, the
//!   directory is replaced by a larger one with the live run at its centre.
//!   Blocks are moved, never copied, and live values never move.
//! - Random access maps a logical index to a (block, slot) pair with one
//!   division, so indexing is O(1).
//! - Blocks vacated by pops are kept and reused by later pushes on the same
//!   side. [`SegmentedDeque::shrink_to_fit`] releases them.
//!
//! # Examples
//!
//! ```rust
//! use segdeque::segmented::SegmentedDeque;
//!
//! let mut deque: SegmentedDeque<i32> = (1..=20).collect();
//! deque.push_front(0);
//!
//! assert_eq!(deque.len(), 21);
//! assert_eq!(deque[0], 0);
//! assert_eq!(deque[8], 8);
//! assert_eq!(deque.pop_back(), Ok(20));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut};

use tracing::{debug, warn};

use super::cursor::Cursor;
use super::directory::Directory;
use super::error::DequeError;
use super::iter::{IntoIter, Iter, IterMut};

/// Number of slots per block when no block size is given.
pub const DEFAULT_BLOCK_SIZE: usize = 8;

/// Number of directory entries allocated by [`SegmentedDeque::new`].
pub const DEFAULT_DIRECTORY_SIZE: usize = 16;

/// A double-ended queue stored as a directory of fixed-size blocks.
///
/// `BLOCK_SIZE` is the number of slots per block and must be non-zero.
///
/// # Time Complexity
///
/// | Operation      | Complexity     |
/// |----------------|----------------|
/// | `push_back`    | O(1) amortized |
/// | `push_front`   | O(1) amortized |
/// | `pop_back`     | O(1)           |
/// | `pop_front`    | O(1)           |
/// | `front`/`back` | O(1)           |
/// | `get`/`at`/`[]`| O(1)           |
/// | `len`          | O(1)           |
/// | `is_empty`     | O(1)           |
/// | `clear`        | O(n)           |
///
/// # Examples
///
/// ```rust
/// use segdeque::segmented::SegmentedDeque;
///
/// let mut deque: SegmentedDeque<&str, 4> = SegmentedDeque::new();
/// deque.push_back("b");
/// deque.push_front("a");
///
/// assert_eq!(deque.front(), Ok(&"a"));
/// assert_eq!(deque.back(), Ok(&"b"));
/// assert_eq!(deque.len(), 2);
/// ```
pub struct SegmentedDeque<T, const BLOCK_SIZE: usize = DEFAULT_BLOCK_SIZE> {
    directory: Directory<T, BLOCK_SIZE>,
    front: Cursor<BLOCK_SIZE>,
    back: Cursor<BLOCK_SIZE>,
}

impl<T, const BLOCK_SIZE: usize> SegmentedDeque<T, BLOCK_SIZE> {
    const BLOCK_SIZE_IS_NON_ZERO: () = assert!(BLOCK_SIZE > 0, "BLOCK_SIZE must be non-zero");

    /// Creates an empty deque with a directory of
    /// [`DEFAULT_DIRECTORY_SIZE`] entries.
    ///
    /// # Panics
    ///
    /// Panics if the initial directory or block cannot be allocated.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_directory_size(DEFAULT_DIRECTORY_SIZE)
    }

    /// Creates an empty deque whose directory starts with `size` entries
    /// (at least one).
    ///
    /// A larger directory postpones the first recentering when the deque is
    /// known to grow large.
    ///
    /// # Panics
    ///
    /// Panics if the initial directory or block cannot be allocated. Use
    /// [`SegmentedDeque::try_with_directory_size`] to handle that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use segdeque::segmented::SegmentedDeque;
    ///
    /// let deque: SegmentedDeque<u8> = SegmentedDeque::with_directory_size(64);
    /// assert_eq!(deque.directory_len(), 64);
    /// assert_eq!(deque.allocated_blocks(), 1);
    /// ```
    #[must_use]
    pub fn with_directory_size(size: usize) -> Self {
        match Self::try_with_directory_size(size) {
            Ok(deque) => deque,
            Err(error) => panic!("failed to allocate a segmented deque: {error}"),
        }
    }

    /// Fallible form of [`SegmentedDeque::with_directory_size`].
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::AllocationFailure`] if the directory or the
    /// initial block cannot be allocated.
    pub fn try_with_directory_size(size: usize) -> Result<Self, DequeError> {
        let () = Self::BLOCK_SIZE_IS_NON_ZERO;

        let size = size.max(1);
        let middle = size / 2;
        let mut directory = Directory::try_with_size(size)?;
        directory.ensure_block(middle)?;

        let start = Cursor::new(middle, BLOCK_SIZE / 2);
        Ok(Self {
            directory,
            front: start,
            back: start,
        })
    }

    /// Returns the number of elements in the deque.
    ///
    /// The count is derived from the two cursors, so it always agrees with
    /// them.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        let (front, back) = (self.front, self.back);
        if front.slot() == back.slot() {
            back.offset() - front.offset()
        } else {
            let enclosed_blocks = back.slot() - front.slot() - 1;
            (BLOCK_SIZE - front.offset()) + BLOCK_SIZE * enclosed_blocks + back.offset()
        }
    }

    /// Returns `true` if the deque contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.front == self.back
    }

    /// Number of slots per block.
    #[inline]
    #[must_use]
    pub const fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    /// Number of directory entries, allocated or not.
    #[inline]
    #[must_use]
    pub fn directory_len(&self) -> usize {
        self.directory.len()
    }

    /// Number of blocks currently allocated, live or retained.
    #[must_use]
    pub fn allocated_blocks(&self) -> usize {
        self.directory.allocated_count()
    }

    /// Number of allocated blocks outside the live run, kept for reuse.
    #[must_use]
    pub fn retained_blocks(&self) -> usize {
        self.allocated_blocks() - self.live_blocks()
    }

    const fn live_blocks(&self) -> usize {
        self.back.slot() - self.front.slot() + 1
    }

    // =========================================================================
    // Push
    // =========================================================================

    /// Appends an element to the back of the deque.
    ///
    /// # Panics
    ///
    /// Panics if a new block or directory cannot be allocated. Use
    /// [`SegmentedDeque::try_push_back`] to handle that case.
    pub fn push_back(&mut self, element: T) {
        if let Err(error) = self.try_push_back(element) {
            panic!("push_back failed: {error}");
        }
    }

    /// Prepends an element to the front of the deque.
    ///
    /// # Panics
    ///
    /// Panics if a new block or directory cannot be allocated. Use
    /// [`SegmentedDeque::try_push_front`] to handle that case.
    pub fn push_front(&mut self, element: T) {
        if let Err(error) = self.try_push_front(element) {
            panic!("push_front failed: {error}");
        }
    }

    /// Appends an element to the back of the deque, reporting allocation
    /// failure instead of panicking.
    ///
    /// Any block or directory the push needs is allocated before the element
    /// is written, so on error the deque is unchanged and the element is
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::AllocationFailure`] or
    /// [`DequeError::CapacityOverflow`] if the deque cannot grow.
    pub fn try_push_back(&mut self, element: T) -> Result<(), DequeError> {
        if self.back.is_at_last_slot() {
            self.prepare_next_back_block()
                .inspect_err(|error| warn!(%error, "push_back could not grow the deque"))?;
        }

        self.write(self.back, element);
        self.back.step_forward();
        if self.back.is_at_block_end() {
            self.back.advance_to_block(self.back.slot() + 1);
        }
        Ok(())
    }

    /// Prepends an element to the front of the deque, reporting allocation
    /// failure instead of panicking.
    ///
    /// Any block or directory the push needs is allocated before the front
    /// cursor moves, so on error the deque is unchanged and the element is
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::AllocationFailure`] or
    /// [`DequeError::CapacityOverflow`] if the deque cannot grow.
    pub fn try_push_front(&mut self, element: T) -> Result<(), DequeError> {
        if self.front.is_at_block_start() {
            self.prepare_previous_front_block()
                .inspect_err(|error| warn!(%error, "push_front could not grow the deque"))?;
            self.front.retreat_to_block_end(self.front.slot() - 1);
        }

        self.front.step_backward();
        self.write(self.front, element);
        Ok(())
    }

    fn prepare_next_back_block(&mut self) -> Result<(), DequeError> {
        if self.back.slot() + 1 == self.directory.len() {
            self.recenter()?;
        }
        self.directory.ensure_block(self.back.slot() + 1)
    }

    fn prepare_previous_front_block(&mut self) -> Result<(), DequeError> {
        if self.front.slot() == 0 {
            self.recenter()?;
        }
        self.directory.ensure_block(self.front.slot() - 1)
    }

    fn recenter(&mut self) -> Result<(), DequeError> {
        let first = self.front.slot();
        let layout = self.directory.recenter(first, self.back.slot())?;
        self.front.relocate(first, layout.start);
        self.back.relocate(first, layout.start);
        Ok(())
    }

    fn write(&mut self, position: Cursor<BLOCK_SIZE>, element: T) {
        let block = self.directory.block_mut(position.slot());
        debug_assert!(
            block.is_some(),
            "no block allocated at directory slot {}",
            position.slot()
        );
        if let Some(block) = block {
            let previous = block.fill(position.offset(), element);
            debug_assert!(
                previous.is_none(),
                "slot {} of block {} was already occupied",
                position.offset(),
                position.slot()
            );
        }
    }

    fn take(&mut self, position: Cursor<BLOCK_SIZE>) -> Option<T> {
        self.directory
            .block_mut(position.slot())
            .and_then(|block| block.take(position.offset()))
    }

    // =========================================================================
    // Pop
    // =========================================================================

    /// Removes and returns the last element.
    ///
    /// A block emptied by the pop stays allocated for later pushes.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::EmptyContainer`] if the deque is empty; the
    /// deque is left untouched.
    pub fn pop_back(&mut self) -> Result<T, DequeError> {
        if self.is_empty() {
            return Err(DequeError::empty("pop_back"));
        }

        if self.back.is_at_block_start() {
            self.back.retreat_to_block_end(self.back.slot() - 1);
        }
        self.back.step_backward();
        let element = self.take(self.back);
        debug_assert!(element.is_some(), "live slot {:?} was vacant", self.back);
        element.ok_or(DequeError::empty("pop_back"))
    }

    /// Removes and returns the first element.
    ///
    /// A block emptied by the pop stays allocated for later pushes.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::EmptyContainer`] if the deque is empty; the
    /// deque is left untouched.
    pub fn pop_front(&mut self) -> Result<T, DequeError> {
        if self.is_empty() {
            return Err(DequeError::empty("pop_front"));
        }

        let element = self.take(self.front);
        debug_assert!(element.is_some(), "live slot {:?} was vacant", self.front);
        self.front.step_forward();
        if self.front.is_at_block_end() {
            self.front.advance_to_block(self.front.slot() + 1);
        }
        element.ok_or(DequeError::empty("pop_front"))
    }

    /// Removes every element, keeping the allocated blocks.
    pub fn clear(&mut self) {
        while self.pop_front().is_ok() {}
    }

    /// Releases every retained block outside the live run.
    ///
    /// The directory itself keeps its size.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use segdeque::segmented::SegmentedDeque;
    ///
    /// let mut deque: SegmentedDeque<i32, 4> = (0..40).collect();
    /// while deque.len() > 2 {
    ///     deque.pop_front().unwrap();
    /// }
    /// assert!(deque.retained_blocks() > 0);
    ///
    /// deque.shrink_to_fit();
    /// assert_eq!(deque.retained_blocks(), 0);
    /// assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![38, 39]);
    /// ```
    pub fn shrink_to_fit(&mut self) {
        let released = self
            .directory
            .release_outside(self.front.slot(), self.back.slot());
        debug!(released, "released retained blocks");
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Returns a reference to the first element.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::EmptyContainer`] if the deque is empty.
    pub fn front(&self) -> Result<&T, DequeError> {
        self.get(0).ok_or(DequeError::empty("front"))
    }

    /// Returns a mutable reference to the first element.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::EmptyContainer`] if the deque is empty.
    pub fn front_mut(&mut self) -> Result<&mut T, DequeError> {
        self.get_mut(0).ok_or(DequeError::empty("front_mut"))
    }

    /// Returns a reference to the last element.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::EmptyContainer`] if the deque is empty.
    pub fn back(&self) -> Result<&T, DequeError> {
        self.len()
            .checked_sub(1)
            .and_then(|index| self.get(index))
            .ok_or(DequeError::empty("back"))
    }

    /// Returns a mutable reference to the last element.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::EmptyContainer`] if the deque is empty.
    pub fn back_mut(&mut self) -> Result<&mut T, DequeError> {
        match self.len().checked_sub(1) {
            Some(index) => self.get_mut(index).ok_or(DequeError::empty("back_mut")),
            None => Err(DequeError::empty("back_mut")),
        }
    }

    /// Returns the element at `index`, or `None` if `index >= len()`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len() {
            return None;
        }
        let position = self.front.offset_by(index);
        self.directory
            .block(position.slot())
            .and_then(|block| block.get(position.offset()))
    }

    /// Returns a mutable reference to the element at `index`, or `None` if
    /// `index >= len()`.
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len() {
            return None;
        }
        let position = self.front.offset_by(index);
        self.directory
            .block_mut(position.slot())
            .and_then(|block| block.get_mut(position.offset()))
    }

    /// Bounds-checked access to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::OutOfRange`] if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T, DequeError> {
        let len = self.len();
        self.get(index).ok_or(DequeError::OutOfRange { index, len })
    }

    /// Bounds-checked mutable access to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::OutOfRange`] if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, DequeError> {
        let len = self.len();
        self.get_mut(index).ok_or(DequeError::OutOfRange { index, len })
    }

    // =========================================================================
    // Iteration
    // =========================================================================

    /// Returns a front-to-back iterator over references to the elements.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, BLOCK_SIZE> {
        Iter::new(self, 0, self.len())
    }

    /// Returns a front-to-back iterator over mutable references to the
    /// elements.
    pub fn iter_mut(&mut self) -> IterMut<'_, T, BLOCK_SIZE> {
        let remaining = self.len();
        let (first, last) = (self.front.slot(), self.back.slot());
        let run = self.directory.run_mut(first, last);
        IterMut::new(run, remaining)
    }

    #[cfg(test)]
    fn assert_vacant_outside_live_range(&self) {
        for slot in 0..self.directory.len() {
            let Some(block) = self.directory.block(slot) else {
                continue;
            };
            let front = (self.front.slot(), self.front.offset());
            let back = (self.back.slot(), self.back.offset());
            let live = (0..BLOCK_SIZE)
                .filter(|&offset| front <= (slot, offset) && (slot, offset) < back)
                .count();
            assert_eq!(block.occupied(), live, "block at slot {slot}");
        }
    }
}

impl<T, const BLOCK_SIZE: usize> Default for SegmentedDeque<T, BLOCK_SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const BLOCK_SIZE: usize> Clone for SegmentedDeque<T, BLOCK_SIZE> {
    fn clone(&self) -> Self {
        Self {
            directory: self.directory.clone(),
            front: self.front,
            back: self.back,
        }
    }
}

impl<T, const BLOCK_SIZE: usize> Index<usize> for SegmentedDeque<T, BLOCK_SIZE> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        let len = self.len();
        self.get(index)
            .unwrap_or_else(|| panic!("index out of range: the len is {len} but the index is {index}"))
    }
}

impl<T, const BLOCK_SIZE: usize> IndexMut<usize> for SegmentedDeque<T, BLOCK_SIZE> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let len = self.len();
        self.get_mut(index)
            .unwrap_or_else(|| panic!("index out of range: the len is {len} but the index is {index}"))
    }
}

impl<T: PartialEq, const BLOCK_SIZE: usize> PartialEq for SegmentedDeque<T, BLOCK_SIZE> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq, const BLOCK_SIZE: usize> Eq for SegmentedDeque<T, BLOCK_SIZE> {}

impl<T: PartialOrd, const BLOCK_SIZE: usize> PartialOrd for SegmentedDeque<T, BLOCK_SIZE> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, const BLOCK_SIZE: usize> Ord for SegmentedDeque<T, BLOCK_SIZE> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, const BLOCK_SIZE: usize> Hash for SegmentedDeque<T, BLOCK_SIZE> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug, const BLOCK_SIZE: usize> fmt::Debug for SegmentedDeque<T, BLOCK_SIZE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, const BLOCK_SIZE: usize> FromIterator<T> for SegmentedDeque<T, BLOCK_SIZE> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<T, const BLOCK_SIZE: usize> Extend<T> for SegmentedDeque<T, BLOCK_SIZE> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.push_back(element);
        }
    }
}

impl<'a, T: Copy + 'a, const BLOCK_SIZE: usize> Extend<&'a T> for SegmentedDeque<T, BLOCK_SIZE> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, const BLOCK_SIZE: usize> From<Vec<T>> for SegmentedDeque<T, BLOCK_SIZE> {
    fn from(elements: Vec<T>) -> Self {
        elements.into_iter().collect()
    }
}

impl<T, const BLOCK_SIZE: usize, const LENGTH: usize> From<[T; LENGTH]>
    for SegmentedDeque<T, BLOCK_SIZE>
{
    fn from(elements: [T; LENGTH]) -> Self {
        elements.into_iter().collect()
    }
}

impl<T, const BLOCK_SIZE: usize> IntoIterator for SegmentedDeque<T, BLOCK_SIZE> {
    type Item = T;
    type IntoIter = IntoIter<T, BLOCK_SIZE>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T, const BLOCK_SIZE: usize> IntoIterator for &'a SegmentedDeque<T, BLOCK_SIZE> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, BLOCK_SIZE>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const BLOCK_SIZE: usize> IntoIterator for &'a mut SegmentedDeque<T, BLOCK_SIZE> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, BLOCK_SIZE>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize, const BLOCK_SIZE: usize> serde::Serialize for SegmentedDeque<T, BLOCK_SIZE> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct SegmentedDequeVisitor<T, const BLOCK_SIZE: usize> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<T, const BLOCK_SIZE: usize> SegmentedDequeVisitor<T, BLOCK_SIZE> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T, const BLOCK_SIZE: usize> serde::de::Visitor<'de> for SegmentedDequeVisitor<T, BLOCK_SIZE>
where
    T: serde::Deserialize<'de>,
{
    type Value = SegmentedDeque<T, BLOCK_SIZE>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut deque = SegmentedDeque::new();
        while let Some(element) = seq.next_element()? {
            deque
                .try_push_back(element)
                .map_err(<A::Error as serde::de::Error>::custom)?;
        }
        Ok(deque)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, const BLOCK_SIZE: usize> serde::Deserialize<'de> for SegmentedDeque<T, BLOCK_SIZE>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(SegmentedDequeVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    mod construction {
        use super::*;

        #[rstest]
        fn test_new_is_empty() {
            let deque: SegmentedDeque<i32> = SegmentedDeque::new();
            assert!(deque.is_empty());
            assert_eq!(deque.len(), 0);
            assert_eq!(deque.directory_len(), DEFAULT_DIRECTORY_SIZE);
            assert_eq!(deque.allocated_blocks(), 1);
            assert_eq!(deque.retained_blocks(), 0);
        }

        #[rstest]
        fn test_new_starts_in_the_middle() {
            let deque: SegmentedDeque<i32> = SegmentedDeque::new();
            assert_eq!(deque.front, Cursor::new(8, 4));
            assert_eq!(deque.back, Cursor::new(8, 4));
        }

        #[rstest]
        fn test_default_matches_new() {
            let deque: SegmentedDeque<i32> = SegmentedDeque::default();
            assert!(deque.is_empty());
            assert_eq!(deque.directory_len(), DEFAULT_DIRECTORY_SIZE);
        }

        #[rstest]
        #[case(0, 1)]
        #[case(1, 1)]
        #[case(3, 3)]
        #[case(64, 64)]
        fn test_with_directory_size(#[case] requested: usize, #[case] expected: usize) {
            let deque: SegmentedDeque<i32> = SegmentedDeque::with_directory_size(requested);
            assert_eq!(deque.directory_len(), expected);
            assert_eq!(deque.allocated_blocks(), 1);
        }

        #[rstest]
        fn test_block_size() {
            let deque: SegmentedDeque<i32, 3> = SegmentedDeque::new();
            assert_eq!(deque.block_size(), 3);
        }
    }

    mod push_and_pop {
        use super::*;

        #[rstest]
        fn test_push_back_crosses_one_block_boundary() {
            let mut deque: SegmentedDeque<usize> = SegmentedDeque::new();
            for value in 0..=DEFAULT_BLOCK_SIZE {
                deque.push_back(value);
            }
            assert_eq!(deque.back.slot() - deque.front.slot(), 1);
            for index in 0..=DEFAULT_BLOCK_SIZE {
                assert_eq!(deque[index], index);
            }
            deque.assert_vacant_outside_live_range();
        }

        #[rstest]
        fn test_back_cursor_moves_to_next_block_eagerly() {
            let mut deque: SegmentedDeque<i32> = SegmentedDeque::new();
            for value in 0..4 {
                deque.push_back(value);
            }
            assert_eq!(deque.back, Cursor::new(9, 0));
            assert_eq!(deque.allocated_blocks(), 2);
        }

        #[rstest]
        fn test_push_front_steps_back_before_writing() {
            let mut deque: SegmentedDeque<i32> = SegmentedDeque::new();
            for value in 0..4 {
                deque.push_front(value);
            }
            assert_eq!(deque.front, Cursor::new(8, 0));
            assert_eq!(deque.allocated_blocks(), 1);

            deque.push_front(4);
            assert_eq!(deque.front, Cursor::new(7, 7));
            assert_eq!(deque.allocated_blocks(), 2);
            deque.assert_vacant_outside_live_range();
        }

        #[rstest]
        fn test_pop_back_retains_block() {
            let mut deque: SegmentedDeque<i32> = (0..12).collect();
            let allocated = deque.allocated_blocks();
            while deque.len() > 1 {
                deque.pop_back().unwrap();
            }
            assert_eq!(deque.allocated_blocks(), allocated);
            assert!(deque.retained_blocks() > 0);
            deque.assert_vacant_outside_live_range();
        }

        #[rstest]
        fn test_pop_front_retains_block() {
            let mut deque: SegmentedDeque<i32> = (0..12).collect();
            let allocated = deque.allocated_blocks();
            while !deque.is_empty() {
                deque.pop_front().unwrap();
            }
            assert_eq!(deque.allocated_blocks(), allocated);
            assert_eq!(deque.front, deque.back);
        }

        #[rstest]
        #[case(1)]
        #[case(2)]
        #[case(3)]
        fn test_single_slot_blocks_track_model(#[case] directory_size: usize) {
            use std::collections::VecDeque;

            let mut deque: SegmentedDeque<usize, 1> =
                SegmentedDeque::with_directory_size(directory_size);
            let mut model = VecDeque::new();
            let mut seed = 12_345_usize;
            for step in 0..2000_usize {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                match (seed >> 16) % 7 {
                    0 | 1 => {
                        deque.push_back(step);
                        model.push_back(step);
                    }
                    2 | 3 => {
                        deque.push_front(step);
                        model.push_front(step);
                    }
                    4 => assert_eq!(deque.pop_back().ok(), model.pop_back()),
                    5 => assert_eq!(deque.pop_front().ok(), model.pop_front()),
                    _ => deque.shrink_to_fit(),
                }
                assert_eq!(deque.len(), model.len());
                assert_eq!(deque.front().ok(), model.front());
                assert_eq!(deque.back().ok(), model.back());
            }
            assert!(deque.iter().eq(model.iter()));
            deque.assert_vacant_outside_live_range();
        }

        #[rstest]
        fn test_try_push_front_through_recentering_keeps_contents() {
            let mut deque: SegmentedDeque<i32, 2> = SegmentedDeque::with_directory_size(1);
            for value in 0..40 {
                deque.try_push_front(value).unwrap();
                assert_eq!(deque.front(), Ok(&value));
                assert_eq!(deque.back(), Ok(&0));
            }
            assert!(deque.iter().copied().eq((0..40).rev()));
            deque.assert_vacant_outside_live_range();
        }

        #[rstest]
        fn test_retained_block_is_reused() {
            let mut deque: SegmentedDeque<i32> = SegmentedDeque::new();
            for _ in 0..5 {
                for value in 0..20 {
                    deque.push_front(value);
                }
                while deque.pop_front().is_ok() {}
            }
            assert_eq!(deque.allocated_blocks(), 3);
            assert_eq!(deque.directory_len(), DEFAULT_DIRECTORY_SIZE);
        }

        #[rstest]
        fn test_pop_empty_does_not_move_cursors() {
            let mut deque: SegmentedDeque<i32> = SegmentedDeque::new();
            let (front, back) = (deque.front, deque.back);
            assert_eq!(deque.pop_back(), Err(DequeError::empty("pop_back")));
            assert_eq!(deque.pop_front(), Err(DequeError::empty("pop_front")));
            assert_eq!((deque.front, deque.back), (front, back));
            deque.push_back(1);
            assert_eq!(deque.pop_front(), Ok(1));
        }

        #[rstest]
        fn test_single_slot_blocks() {
            let mut deque: SegmentedDeque<i32, 1> = SegmentedDeque::with_directory_size(2);
            for value in 0..10 {
                deque.push_back(value);
                deque.push_front(-value);
            }
            assert_eq!(deque.len(), 20);
            assert_eq!(deque.front(), Ok(&-9));
            assert_eq!(deque.back(), Ok(&9));
            assert_eq!(deque.pop_back(), Ok(9));
            assert_eq!(deque.pop_front(), Ok(-9));
            deque.assert_vacant_outside_live_range();
        }

        #[rstest]
        fn test_clear_keeps_blocks() {
            let mut deque: SegmentedDeque<String> = (0..30).map(|value| value.to_string()).collect();
            let allocated = deque.allocated_blocks();
            deque.clear();
            assert!(deque.is_empty());
            assert_eq!(deque.allocated_blocks(), allocated);
            deque.assert_vacant_outside_live_range();
        }
    }

    mod recentering {
        use super::*;

        #[rstest]
        fn test_push_back_recenters_when_directory_is_exhausted() {
            let mut deque: SegmentedDeque<usize> = SegmentedDeque::new();
            // Entries 8..=15 hold 4 + 7 * 8 = 60 slots; filling the last one
            // needs entry 16, which does not exist yet.
            for value in 0..59 {
                deque.push_back(value);
            }
            assert_eq!(deque.directory_len(), DEFAULT_DIRECTORY_SIZE);
            assert_eq!(deque.back, Cursor::new(15, 7));

            deque.push_back(59);
            assert_eq!(deque.directory_len(), 34);
            assert_eq!(deque.front, Cursor::new(13, 4));
            assert_eq!(deque.back, Cursor::new(21, 0));
            assert!((0..60).all(|index| deque[index] == index));
            deque.assert_vacant_outside_live_range();
        }

        #[rstest]
        fn test_push_front_recenters_when_directory_is_exhausted() {
            let mut deque: SegmentedDeque<usize> = SegmentedDeque::new();
            // Entries 0..=8 hold 4 + 8 * 8 = 68 slots in front of the start.
            for value in 0..68 {
                deque.push_front(value);
            }
            assert_eq!(deque.directory_len(), DEFAULT_DIRECTORY_SIZE);
            assert_eq!(deque.front, Cursor::new(0, 0));

            deque.push_front(68);
            assert_eq!(deque.directory_len(), 34);
            assert_eq!(deque.len(), 69);
            assert!((0..69).all(|index| deque[index] == 68 - index));
            deque.assert_vacant_outside_live_range();
        }

        #[rstest]
        fn test_recentering_releases_retained_blocks() {
            let mut deque: SegmentedDeque<i32> = SegmentedDeque::new();
            for value in 0..20 {
                deque.push_front(value);
            }
            while deque.len() > 1 {
                deque.pop_front().unwrap();
            }
            assert!(deque.retained_blocks() > 0);

            for value in 0..80 {
                deque.push_back(value);
            }
            assert!(deque.directory_len() > DEFAULT_DIRECTORY_SIZE);
            assert_eq!(deque.retained_blocks(), 0);
        }
    }

    mod access {
        use super::*;

        #[rstest]
        fn test_front_and_back_on_empty() {
            let mut deque: SegmentedDeque<i32> = SegmentedDeque::new();
            assert_eq!(deque.front(), Err(DequeError::empty("front")));
            assert_eq!(deque.back(), Err(DequeError::empty("back")));
            assert_eq!(deque.front_mut(), Err(DequeError::empty("front_mut")));
            assert_eq!(deque.back_mut(), Err(DequeError::empty("back_mut")));
        }

        #[rstest]
        fn test_front_mut_and_back_mut() {
            let mut deque: SegmentedDeque<i32> = (1..=10).collect();
            *deque.front_mut().unwrap() = 100;
            *deque.back_mut().unwrap() = 200;
            assert_eq!(deque.front(), Ok(&100));
            assert_eq!(deque.back(), Ok(&200));
        }

        #[rstest]
        fn test_get_out_of_range() {
            let deque: SegmentedDeque<i32> = (0..10).collect();
            assert_eq!(deque.get(9), Some(&9));
            assert_eq!(deque.get(10), None);
            assert_eq!(deque.get(usize::MAX), None);
        }

        #[rstest]
        fn test_at_reports_out_of_range() {
            let mut deque: SegmentedDeque<i32> = (0..3).collect();
            assert_eq!(deque.at(2), Ok(&2));
            assert_eq!(deque.at(3), Err(DequeError::OutOfRange { index: 3, len: 3 }));
            assert_eq!(
                deque.at_mut(7),
                Err(DequeError::OutOfRange { index: 7, len: 3 })
            );
            *deque.at_mut(0).unwrap() = 9;
            assert_eq!(deque[0], 9);
        }

        #[rstest]
        #[should_panic(expected = "index out of range: the len is 2 but the index is 2")]
        fn test_index_out_of_range_panics() {
            let deque: SegmentedDeque<i32> = (0..2).collect();
            let _element = deque[2];
        }

        #[rstest]
        fn test_index_mut() {
            let mut deque: SegmentedDeque<i32> = (0..20).collect();
            deque[19] = 200;
            assert_eq!(deque[19], 200);
            assert_eq!(deque.back(), Ok(&200));
        }
    }

    mod shrinking {
        use super::*;

        #[rstest]
        fn test_shrink_to_fit_releases_only_retained_blocks() {
            let mut deque: SegmentedDeque<i32, 4> = (0..40).collect();
            for _ in 0..30 {
                deque.pop_front().unwrap();
            }
            let live = deque.allocated_blocks() - deque.retained_blocks();
            deque.shrink_to_fit();
            assert_eq!(deque.allocated_blocks(), live);
            assert_eq!(deque.retained_blocks(), 0);
            assert_eq!(deque.iter().copied().collect::<Vec<_>>(), (30..40).collect::<Vec<_>>());
        }

        #[rstest]
        fn test_push_after_shrink_reallocates() {
            let mut deque: SegmentedDeque<i32, 2> = (0..10).collect();
            while deque.len() > 1 {
                deque.pop_back().unwrap();
            }
            deque.shrink_to_fit();
            for value in 1..10 {
                deque.push_back(value);
            }
            assert_eq!(deque.iter().copied().collect::<Vec<_>>(), (0..10).collect::<Vec<_>>());
            deque.assert_vacant_outside_live_range();
        }
    }

    mod traits {
        use super::*;
        use std::collections::hash_map::DefaultHasher;

        fn hash_of<T: Hash>(value: &T) -> u64 {
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            hasher.finish()
        }

        #[rstest]
        fn test_clone_is_deep() {
            let mut original: SegmentedDeque<Vec<i32>> = (0..10).map(|value| vec![value]).collect();
            let copy = original.clone();
            original[0].push(99);
            original.pop_back().unwrap();
            assert_eq!(copy.len(), 10);
            assert_eq!(copy[0], vec![0]);
            assert_eq!(original[0], vec![0, 99]);
        }

        #[rstest]
        fn test_equality_ignores_layout() {
            let pushed_back: SegmentedDeque<i32> = (0..20).collect();
            let mut pushed_front: SegmentedDeque<i32> = SegmentedDeque::new();
            for value in (0..20).rev() {
                pushed_front.push_front(value);
            }
            assert_eq!(pushed_back, pushed_front);
            assert_eq!(hash_of(&pushed_back), hash_of(&pushed_front));
        }

        #[rstest]
        fn test_inequality() {
            let left: SegmentedDeque<i32> = (0..5).collect();
            let right: SegmentedDeque<i32> = (0..6).collect();
            assert_ne!(left, right);
            assert!(left < right);
            assert_eq!(left.cmp(&left.clone()), Ordering::Equal);
        }

        #[rstest]
        fn test_debug_is_a_list() {
            let deque: SegmentedDeque<i32> = (1..=3).collect();
            assert_eq!(format!("{deque:?}"), "[1, 2, 3]");
        }

        #[rstest]
        fn test_from_vec_and_array() {
            let from_vec: SegmentedDeque<i32> = SegmentedDeque::from(vec![1, 2, 3]);
            let from_array: SegmentedDeque<i32> = SegmentedDeque::from([1, 2, 3]);
            assert_eq!(from_vec, from_array);
        }

        #[rstest]
        fn test_extend_by_reference() {
            let mut deque: SegmentedDeque<i32> = SegmentedDeque::new();
            deque.extend(&[1, 2, 3]);
            deque.extend(vec![4, 5]);
            assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        }
    }
}
