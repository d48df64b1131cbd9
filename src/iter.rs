use crate::history_buffer::{next_index, prev_index, HistoryBuffer};

use log::trace;

use std::iter::FusedIterator;

/// Iterator over the entries from the cursor toward the oldest one, created by
/// [`HistoryBuffer::peek_range`]. A clone continues from the same point independently.
#[derive(Debug)]
pub struct PeekRange<'a, T> {
    entries: &'a [Option<T>],
    index: usize,
    remaining: usize,
}

impl<'a, T> PeekRange<'a, T> {
    pub(crate) fn new(entries: &'a [Option<T>], index: usize, remaining: usize) -> Self {
        Self { entries, index, remaining }
    }
}

impl<T> Clone for PeekRange<'_, T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries,
            index: self.index,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for PeekRange<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let index = self.index;
        self.index = prev_index(index, self.entries.len());
        self.remaining -= 1;
        self.entries[index].as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for PeekRange<'_, T> {}
impl<T> FusedIterator for PeekRange<'_, T> {}

/// Iterator that pops entries from the cursor toward the oldest one, created by
/// [`HistoryBuffer::pop_range`].
///
/// Every call to `next` performs one [`HistoryBuffer::pop`], nothing is removed ahead of time.
#[derive(Debug)]
pub struct PopRange<'a, T> {
    buffer: &'a mut HistoryBuffer<T>,
}

impl<'a, T> PopRange<'a, T> {
    pub(crate) fn new(buffer: &'a mut HistoryBuffer<T>) -> Self {
        Self { buffer }
    }

    fn remaining(&self) -> usize {
        self.buffer.position().map_or(0, |position| position + 1)
    }
}

impl<T> Iterator for PopRange<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.pop().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for PopRange<'_, T> {}
impl<T> FusedIterator for PopRange<'_, T> {}

impl<T> Drop for PopRange<'_, T> {
    fn drop(&mut self) {
        let remaining = self.remaining();
        if remaining > 0 {
            trace!("Pop range dropped with {} entries left in the history buffer.", remaining);
        }
    }
}

/// Iterator over every live entry from the oldest to the newest, created by [`HistoryBuffer::iter`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    entries: &'a [Option<T>],
    front: usize,
    back: usize,
    len: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(entries: &'a [Option<T>], tail: usize, len: usize) -> Self {
        let capacity = entries.len();
        let back = (tail + capacity + len - 1) % capacity;
        Self { entries, front: tail, back, len }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries,
            front: self.front,
            back: self.back,
            len: self.len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let index = self.front;
        self.front = next_index(index, self.entries.len());
        self.len -= 1;
        self.entries[index].as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let index = self.back;
        self.back = prev_index(index, self.entries.len());
        self.len -= 1;
        self.entries[index].as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}
