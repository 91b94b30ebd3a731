//! Fixed-capacity storage blocks.

use std::collections::TryReserveError;

use tracing::trace;

/// A contiguous array of exactly `BLOCK_SIZE` slots.
///
/// A slot is either vacant or holds one value. Values are written only when
/// pushed and taken out when popped, so nothing is ever constructed just to
/// be overwritten. A block never resizes and knows nothing about its
/// neighbours; the directory that owns it decides where it sits.
#[derive(Clone)]
pub(crate) struct Block<T, const BLOCK_SIZE: usize> {
    slots: Box<[Option<T>]>,
}

impl<T, const BLOCK_SIZE: usize> Block<T, BLOCK_SIZE> {
    /// Allocates a block with every slot vacant.
    pub(crate) fn try_allocate() -> Result<Self, TryReserveError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(BLOCK_SIZE)?;
        slots.extend(std::iter::repeat_with(|| None).take(BLOCK_SIZE));
        trace!(block_size = BLOCK_SIZE, "allocated block");
        Ok(Self {
            slots: slots.into_boxed_slice(),
        })
    }

    #[inline]
    pub(crate) fn get(&self, offset: usize) -> Option<&T> {
        self.slots.get(offset).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, offset: usize) -> Option<&mut T> {
        self.slots.get_mut(offset).and_then(Option::as_mut)
    }

    /// Writes `value` into the slot at `offset`, returning whatever it held.
    #[inline]
    pub(crate) fn fill(&mut self, offset: usize, value: T) -> Option<T> {
        self.slots[offset].replace(value)
    }

    /// Moves the value out of the slot at `offset`, leaving it vacant.
    #[inline]
    pub(crate) fn take(&mut self, offset: usize) -> Option<T> {
        self.slots.get_mut(offset).and_then(Option::take)
    }

    #[inline]
    pub(crate) fn slots_mut(&mut self) -> &mut [Option<T>] {
        &mut self.slots
    }

    #[cfg(test)]
    pub(crate) fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}
