//! Logical positions inside the two-level layout.

/// A position in the deque: a directory entry plus an offset inside the
/// block held by that entry.
///
/// The block bounds are implied by `BLOCK_SIZE`: the first slot is offset
/// `0` and the one-past-last slot is offset `BLOCK_SIZE`. A cursor does not
/// own or borrow its block; it is resolved through the directory on every
/// access, so moving blocks between directories never invalidates it.
///
/// Outside of a push or pop in progress, offsets are kept in
/// `0..BLOCK_SIZE`, which makes equality of cursors equality of positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Cursor<const BLOCK_SIZE: usize> {
    slot: usize,
    offset: usize,
}

impl<const BLOCK_SIZE: usize> Cursor<BLOCK_SIZE> {
    pub(crate) const fn new(slot: usize, offset: usize) -> Self {
        Self { slot, offset }
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        self.slot
    }

    #[inline]
    pub(crate) const fn offset(self) -> usize {
        self.offset
    }

    #[inline]
    pub(crate) const fn is_at_block_start(self) -> bool {
        self.offset == 0
    }

    #[inline]
    pub(crate) const fn is_at_block_end(self) -> bool {
        self.offset == BLOCK_SIZE
    }

    /// Whether writing at this position fills the last slot of its block.
    #[inline]
    pub(crate) const fn is_at_last_slot(self) -> bool {
        self.offset + 1 == BLOCK_SIZE
    }

    /// Rebinds the cursor to the first slot of the block at `slot`.
    #[inline]
    pub(crate) const fn advance_to_block(&mut self, slot: usize) {
        self.slot = slot;
        self.offset = 0;
    }

    /// Rebinds the cursor to the one-past-last slot of the block at `slot`.
    #[inline]
    pub(crate) const fn retreat_to_block_end(&mut self, slot: usize) {
        self.slot = slot;
        self.offset = BLOCK_SIZE;
    }

    #[inline]
    pub(crate) const fn step_forward(&mut self) {
        self.offset += 1;
    }

    #[inline]
    pub(crate) const fn step_backward(&mut self) {
        self.offset -= 1;
    }

    /// Moves the cursor along with a directory run that moved from entry
    /// `from` to entry `to`. The in-block offset is untouched.
    #[inline]
    pub(crate) const fn relocate(&mut self, from: usize, to: usize) {
        self.slot = self.slot - from + to;
    }

    /// Resolves the position `distance` slots after this cursor.
    #[inline]
    pub(crate) const fn offset_by(self, distance: usize) -> Self {
        let total = self.offset + distance;
        Self {
            slot: self.slot + total / BLOCK_SIZE,
            offset: total % BLOCK_SIZE,
        }
    }
}
