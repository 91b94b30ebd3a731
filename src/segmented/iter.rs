//! Iterators over a [`SegmentedDeque`].

use std::iter::FusedIterator;

use super::block::Block;
use super::deque::SegmentedDeque;

/// Front-to-back iterator over references to the elements of a
/// [`SegmentedDeque`].
///
/// Each step is a random access through the directory, so both ends of the
/// iterator cost O(1).
pub struct Iter<'a, T, const BLOCK_SIZE: usize> {
    deque: &'a SegmentedDeque<T, BLOCK_SIZE>,
    front_index: usize,
    back_index: usize,
}

impl<'a, T, const BLOCK_SIZE: usize> Iter<'a, T, BLOCK_SIZE> {
    pub(crate) const fn new(
        deque: &'a SegmentedDeque<T, BLOCK_SIZE>,
        front_index: usize,
        back_index: usize,
    ) -> Self {
        Self {
            deque,
            front_index,
            back_index,
        }
    }
}

impl<T, const BLOCK_SIZE: usize> Clone for Iter<'_, T, BLOCK_SIZE> {
    fn clone(&self) -> Self {
        Self {
            deque: self.deque,
            front_index: self.front_index,
            back_index: self.back_index,
        }
    }
}

impl<'a, T, const BLOCK_SIZE: usize> Iterator for Iter<'a, T, BLOCK_SIZE> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front_index >= self.back_index {
            return None;
        }

        let result = self.deque.get(self.front_index);
        self.front_index += 1;
        result
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back_index - self.front_index;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front_index = self.front_index.saturating_add(n).min(self.back_index);
        self.next()
    }
}

impl<T, const BLOCK_SIZE: usize> DoubleEndedIterator for Iter<'_, T, BLOCK_SIZE> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front_index >= self.back_index {
            return None;
        }

        self.back_index -= 1;
        self.deque.get(self.back_index)
    }
}

impl<T, const BLOCK_SIZE: usize> ExactSizeIterator for Iter<'_, T, BLOCK_SIZE> {}

impl<T, const BLOCK_SIZE: usize> FusedIterator for Iter<'_, T, BLOCK_SIZE> {}

/// Front-to-back iterator over mutable references to the elements of a
/// [`SegmentedDeque`].
///
/// Walks the slots of the live run of blocks. Slots outside the live range
/// are always vacant, so they are skipped without consulting the cursors.
pub struct IterMut<'a, T, const BLOCK_SIZE: usize> {
    blocks: std::slice::IterMut<'a, Option<Block<T, BLOCK_SIZE>>>,
    front: std::slice::IterMut<'a, Option<T>>,
    back: std::slice::IterMut<'a, Option<T>>,
    remaining: usize,
}

impl<'a, T, const BLOCK_SIZE: usize> IterMut<'a, T, BLOCK_SIZE> {
    pub(crate) fn new(run: &'a mut [Option<Block<T, BLOCK_SIZE>>], remaining: usize) -> Self {
        Self {
            blocks: run.iter_mut(),
            front: Default::default(),
            back: Default::default(),
            remaining,
        }
    }
}

fn slots_of<'a, T, const BLOCK_SIZE: usize>(
    entry: &'a mut Option<Block<T, BLOCK_SIZE>>,
) -> std::slice::IterMut<'a, Option<T>> {
    entry
        .as_mut()
        .map_or_else(Default::default, |block| block.slots_mut().iter_mut())
}

impl<'a, T, const BLOCK_SIZE: usize> Iterator for IterMut<'a, T, BLOCK_SIZE> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        loop {
            if let Some(slot) = self.front.next() {
                if let Some(element) = slot.as_mut() {
                    self.remaining -= 1;
                    return Some(element);
                }
                continue;
            }
            match self.blocks.next() {
                Some(entry) => self.front = slots_of(entry),
                None => break,
            }
        }

        // The remaining elements all sit in the block already taken by `back`.
        let element = self.back.find_map(Option::as_mut)?;
        self.remaining -= 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, const BLOCK_SIZE: usize> DoubleEndedIterator for IterMut<'_, T, BLOCK_SIZE> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        loop {
            if let Some(slot) = self.back.next_back() {
                if let Some(element) = slot.as_mut() {
                    self.remaining -= 1;
                    return Some(element);
                }
                continue;
            }
            match self.blocks.next_back() {
                Some(entry) => self.back = slots_of(entry),
                None => break,
            }
        }

        let element = self.front.by_ref().rev().find_map(Option::as_mut)?;
        self.remaining -= 1;
        Some(element)
    }
}

impl<T, const BLOCK_SIZE: usize> ExactSizeIterator for IterMut<'_, T, BLOCK_SIZE> {}

impl<T, const BLOCK_SIZE: usize> FusedIterator for IterMut<'_, T, BLOCK_SIZE> {}

/// Owning front-to-back iterator over the elements of a [`SegmentedDeque`].
pub struct IntoIter<T, const BLOCK_SIZE: usize> {
    deque: SegmentedDeque<T, BLOCK_SIZE>,
}

impl<T, const BLOCK_SIZE: usize> IntoIter<T, BLOCK_SIZE> {
    pub(crate) const fn new(deque: SegmentedDeque<T, BLOCK_SIZE>) -> Self {
        Self { deque }
    }
}

impl<T, const BLOCK_SIZE: usize> Iterator for IntoIter<T, BLOCK_SIZE> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.deque.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.deque.len();
        (remaining, Some(remaining))
    }
}

impl<T, const BLOCK_SIZE: usize> DoubleEndedIterator for IntoIter<T, BLOCK_SIZE> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.deque.pop_back().ok()
    }
}

impl<T, const BLOCK_SIZE: usize> ExactSizeIterator for IntoIter<T, BLOCK_SIZE> {}

impl<T, const BLOCK_SIZE: usize> FusedIterator for IntoIter<T, BLOCK_SIZE> {}
