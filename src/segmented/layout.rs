//! Directory growth arithmetic.
//!
//! When a push needs a directory entry past either end of the directory, the
//! directory is replaced by a larger one and the run of live blocks is moved
//! to its middle. The sizes involved are computed here, separately from the
//! container, so the arithmetic can be checked on its own.

/// The shape of a recentred directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirectoryLayout {
    /// Number of entries in the new directory.
    pub size: usize,
    /// Entry at which the first live block is placed.
    pub start: usize,
}

impl DirectoryLayout {
    /// One past the entry holding the last live block.
    #[inline]
    #[must_use]
    pub const fn end(&self, live_blocks: usize) -> usize {
        self.start + live_blocks
    }
}

/// Computes the layout of the directory that replaces an exhausted one.
///
/// The new size is `directory_size + max(directory_size, live_blocks) + 2`,
/// so repeated growth on one side is geometric, and the live run is centred
/// with at least one vacant entry on each side. Returns `None` if the new
/// size overflows `usize`.
///
/// # Examples
///
/// ```rust
/// use segdeque::segmented::{recentered_layout, DirectoryLayout};
///
/// // A 16-entry directory whose live run spans 9 blocks.
/// let layout = recentered_layout(16, 9).unwrap();
/// assert_eq!(layout, DirectoryLayout { size: 34, start: 12 });
/// ```
#[must_use]
pub const fn recentered_layout(directory_size: usize, live_blocks: usize) -> Option<DirectoryLayout> {
    let growth = if directory_size > live_blocks {
        directory_size
    } else {
        live_blocks
    };
    let Some(size) = directory_size.checked_add(growth) else {
        return None;
    };
    let Some(size) = size.checked_add(2) else {
        return None;
    };
    Some(DirectoryLayout {
        size,
        start: (size - live_blocks) / 2,
    })
}
