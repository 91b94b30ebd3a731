//! The directory ("map") level of the two-level layout.

use tracing::debug;

use super::block::Block;
use super::error::DequeError;
use super::layout::{DirectoryLayout, recentered_layout};

/// An ordered array of entries, each vacant or owning one [`Block`].
///
/// Entries outside the live run may hold blocks retained from earlier pops;
/// they are reused by later pushes instead of being reallocated.
#[derive(Clone)]
pub(crate) struct Directory<T, const BLOCK_SIZE: usize> {
    entries: Vec<Option<Block<T, BLOCK_SIZE>>>,
}

impl<T, const BLOCK_SIZE: usize> Directory<T, BLOCK_SIZE> {
    /// Allocates a directory of `size` vacant entries.
    pub(crate) fn try_with_size(size: usize) -> Result<Self, DequeError> {
        let mut entries = Vec::new();
        entries.try_reserve_exact(size)?;
        entries.extend(std::iter::repeat_with(|| None).take(size));
        Ok(Self { entries })
    }

    /// Number of entries, allocated or not.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub(crate) fn block(&self, slot: usize) -> Option<&Block<T, BLOCK_SIZE>> {
        self.entries.get(slot).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn block_mut(&mut self, slot: usize) -> Option<&mut Block<T, BLOCK_SIZE>> {
        self.entries.get_mut(slot).and_then(Option::as_mut)
    }

    #[inline]
    pub(crate) fn is_allocated(&self, slot: usize) -> bool {
        self.block(slot).is_some()
    }

    /// Makes sure the entry at `slot` holds a block, allocating one if it is
    /// vacant. A retained block is reused as is.
    pub(crate) fn ensure_block(&mut self, slot: usize) -> Result<(), DequeError> {
        if !self.is_allocated(slot) {
            self.entries[slot] = Some(Block::try_allocate()?);
        }
        Ok(())
    }

    /// Number of entries that currently hold a block.
    pub(crate) fn allocated_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_some()).count()
    }

    /// The entries from `first` to `last` inclusive.
    pub(crate) fn run_mut(&mut self, first: usize, last: usize) -> &mut [Option<Block<T, BLOCK_SIZE>>] {
        &mut self.entries[first..=last]
    }

    /// Replaces this directory with a larger one holding the blocks of the
    /// run `first..=last` at its centre, and returns the new layout.
    ///
    /// The new directory is fully allocated before any block moves, so on
    /// error this directory is left exactly as it was. Blocks outside the run
    /// are released together with the old directory.
    pub(crate) fn recenter(&mut self, first: usize, last: usize) -> Result<DirectoryLayout, DequeError> {
        let live_blocks = last - first + 1;
        let old_size = self.len();
        let layout = recentered_layout(old_size, live_blocks).ok_or(DequeError::CapacityOverflow {
            directory_size: old_size,
        })?;
        let mut replacement = Self::try_with_size(layout.size)?;

        for (index, slot) in (first..=last).enumerate() {
            replacement.entries[layout.start + index] = self.entries[slot].take();
        }
        let released = self.allocated_count();
        *self = replacement;

        debug!(
            old_size,
            new_size = layout.size,
            live_blocks,
            released,
            "recentered directory"
        );
        Ok(layout)
    }

    /// Releases every block outside `first..=last` and returns how many were
    /// released.
    pub(crate) fn release_outside(&mut self, first: usize, last: usize) -> usize {
        let mut released = 0;
        for (slot, entry) in self.entries.iter_mut().enumerate() {
            if (slot < first || slot > last) && entry.take().is_some() {
                released += 1;
            }
        }
        released
    }
}
