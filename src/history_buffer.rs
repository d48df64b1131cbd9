use crate::config::HistoryConfig;
use crate::error::HistoryError;
use crate::iter::{Iter, PeekRange, PopRange};

use log::{debug, trace};

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursors {
    /// Slot of the most recently pushed entry.
    head: usize,
    /// Slot of the oldest retained entry.
    tail: usize,
    /// Slot of the current entry, always in the circular span `tail..=head`.
    position: usize,
}

/// Fixed-capacity ring of history entries with a movable cursor.
///
/// New entries are always written after the head. When the buffer is full the oldest
/// entry is evicted. The cursor can be moved anywhere between the oldest and the newest
/// entry, [`peek`](Self::peek) and [`pop`](Self::pop) operate on the entry under the cursor.
#[derive(Clone)]
pub struct HistoryBuffer<T> {
    entries: Box<[Option<T>]>,
    // None when the buffer is empty
    cursors: Option<Cursors>,
}

#[inline]
pub(crate) fn next_index(index: usize, capacity: usize) -> usize {
    (index + 1) % capacity
}

#[inline]
pub(crate) fn prev_index(index: usize, capacity: usize) -> usize {
    (index + capacity - 1) % capacity
}

// Forward distance from `from` to `to` going around the ring.
#[inline]
fn distance(from: usize, to: usize, capacity: usize) -> usize {
    (to + capacity - from) % capacity
}

impl<T> HistoryBuffer<T> {
    /// Creates an empty buffer that keeps at most `capacity` entries.
    ///
    /// Returns [`HistoryError::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, HistoryError> {
        if capacity == 0 {
            return Err(HistoryError::InvalidCapacity);
        }

        Ok(Self::allocate(capacity))
    }

    /// Creates an empty buffer sized by [`HistoryConfig::capacity`].
    pub fn from_config(config: &HistoryConfig) -> Result<Self, HistoryError> {
        Self::new(config.capacity)
    }

    fn allocate(capacity: usize) -> Self {
        debug!("Created history buffer with capacity {}.", capacity);
        Self {
            entries: (0..capacity).map(|_| None).collect(),
            cursors: None,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Number of live entries, between the oldest and the newest inclusive.
    pub fn len(&self) -> usize {
        match self.cursors {
            None => 0,
            Some(c) => distance(c.tail, c.head, self.capacity()) + 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cursors.is_none()
    }

    /// Whether the next push evicts the oldest entry.
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Offset of the cursor counted from the oldest entry, or `None` when empty.
    pub fn position(&self) -> Option<usize> {
        self.cursors.map(|c| distance(c.tail, c.position, self.capacity()))
    }

    /// Moves the cursor to `position`, counted from the oldest entry.
    ///
    /// Fails with [`HistoryError::PositionOutOfRange`] unless `position < len`,
    /// which includes every call on an empty buffer.
    pub fn set_position(&mut self, position: usize) -> Result<(), HistoryError> {
        let len = self.len();
        if position >= len {
            return Err(HistoryError::PositionOutOfRange { position, len });
        }

        let capacity = self.capacity();
        if let Some(c) = self.cursors.as_mut() {
            c.position = (c.tail + position) % capacity;
        }
        Ok(())
    }

    /// Forgets every entry. Slots are not dropped until they get overwritten.
    pub fn clear(&mut self) {
        if self.cursors.take().is_some() {
            debug!("Cleared history buffer with capacity {}.", self.capacity());
        }
    }

    /// Writes `value` after the current head and moves the cursor onto it.
    ///
    /// Entries between the cursor and the old head are kept, they stay reachable through
    /// [`set_position`](Self::set_position). If the buffer is full the oldest entry is evicted.
    pub fn push(&mut self, value: T) {
        let capacity = self.capacity();
        match self.cursors {
            None => {
                self.entries[0] = Some(value);
                self.cursors = Some(Cursors { head: 0, tail: 0, position: 0 });
            }
            Some(ref mut c) => {
                let head = next_index(c.head, capacity);
                if head == c.tail {
                    c.tail = next_index(c.tail, capacity);
                    trace!("History buffer full, evicted oldest entry at slot {}.", head);
                }
                c.head = head;
                c.position = head;
                self.entries[head] = Some(value);
            }
        }
    }

    /// Returns the entry under the cursor.
    pub fn peek(&self) -> Result<&T, HistoryError> {
        let c = self.cursors.ok_or(HistoryError::Empty)?;
        self.entries[c.position].as_ref().ok_or(HistoryError::Empty)
    }

    /// Returns the entry under the cursor mutably.
    pub fn peek_mut(&mut self) -> Result<&mut T, HistoryError> {
        let c = self.cursors.ok_or(HistoryError::Empty)?;
        self.entries[c.position].as_mut().ok_or(HistoryError::Empty)
    }

    /// Removes and returns the entry under the cursor.
    ///
    /// The head collapses to the slot just before the cursor and the cursor follows it,
    /// so entries newer than the cursor are discarded together with the popped one.
    /// The length only shrinks by one when the cursor is at the newest entry, otherwise it
    /// becomes the cursor's offset. Popping the oldest entry empties the buffer.
    pub fn pop(&mut self) -> Result<T, HistoryError> {
        let mut c = self.cursors.ok_or(HistoryError::Empty)?;
        let value = self.entries[c.position].take().ok_or(HistoryError::Empty)?;

        if c.position == c.tail {
            self.cursors = None;
        } else {
            let head = prev_index(c.position, self.capacity());
            c.head = head;
            c.position = head;
            self.cursors = Some(c);
        }

        Ok(value)
    }

    /// Returns the entry `offset` steps older than the cursor, `offset` 0 being the cursor itself.
    pub fn get(&self, offset: usize) -> Option<&T> {
        let position = self.position()?;
        if offset > position {
            return None;
        }

        let c = self.cursors?;
        let index = (c.position + self.capacity() - offset) % self.capacity();
        self.entries[index].as_ref()
    }

    /// Whether [`undo`](Self::undo) can move the cursor.
    pub fn can_undo(&self) -> bool {
        self.cursors.map_or(false, |c| c.position != c.tail)
    }

    /// Whether [`redo`](Self::redo) can move the cursor.
    pub fn can_redo(&self) -> bool {
        self.cursors.map_or(false, |c| c.position != c.head)
    }

    /// Moves the cursor one step toward the oldest entry and returns the new current entry.
    /// Returns `None` and leaves the cursor untouched when it is already at the oldest entry.
    pub fn undo(&mut self) -> Option<&T> {
        let capacity = self.capacity();
        let c = self.cursors.as_mut()?;
        if c.position == c.tail {
            return None;
        }

        c.position = prev_index(c.position, capacity);
        self.entries[c.position].as_ref()
    }

    /// Moves the cursor one step toward the newest entry and returns the new current entry.
    /// Returns `None` and leaves the cursor untouched when it is already at the newest entry.
    pub fn redo(&mut self) -> Option<&T> {
        let capacity = self.capacity();
        let c = self.cursors.as_mut()?;
        if c.position == c.head {
            return None;
        }

        c.position = next_index(c.position, capacity);
        self.entries[c.position].as_ref()
    }

    /// Lazily walks from the cursor toward the oldest entry without removing anything.
    pub fn peek_range(&self) -> PeekRange<'_, T> {
        match self.cursors {
            None => PeekRange::new(&self.entries, 0, 0),
            Some(c) => {
                let remaining = distance(c.tail, c.position, self.capacity()) + 1;
                PeekRange::new(&self.entries, c.position, remaining)
            }
        }
    }

    /// Lazily pops from the cursor toward the oldest entry.
    ///
    /// Each step is one [`pop`](Self::pop), performed only when the entry is yielded.
    /// With the cursor at the newest entry, consuming N items removes exactly N entries.
    /// With the cursor further back, the first step also discards every entry newer than
    /// the cursor. Dropping the iterator early keeps the buffer as popped so far.
    pub fn pop_range(&mut self) -> PopRange<'_, T> {
        PopRange::new(self)
    }

    /// Iterates every live entry from the oldest to the newest, regardless of the cursor.
    pub fn iter(&self) -> Iter<'_, T> {
        match self.cursors {
            None => Iter::new(&self.entries, 0, 0),
            Some(c) => Iter::new(&self.entries, c.tail, self.len()),
        }
    }
}

impl<T> Default for HistoryBuffer<T> {
    fn default() -> Self {
        Self::allocate(HistoryConfig::default().capacity)
    }
}

impl<'a, T> IntoIterator for &'a HistoryBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for HistoryBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryBuffer")
            .field("capacity", &self.capacity())
            .field("position", &self.position())
            .field("entries", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(capacity: usize, values: &[u32]) -> HistoryBuffer<u32> {
        let mut buffer = HistoryBuffer::new(capacity).unwrap();
        for &value in values {
            buffer.push(value);
        }
        buffer
    }

    #[test]
    fn new_buffer_is_empty() {
        for capacity in 1..5 {
            let buffer: HistoryBuffer<u32> = HistoryBuffer::new(capacity).unwrap();
            assert_eq!(buffer.capacity(), capacity);
            assert_eq!(buffer.len(), 0);
            assert_eq!(buffer.position(), None);
            assert!(buffer.is_empty());
        }
    }

    #[test]
    fn zero_capacity() {
        let result: Result<HistoryBuffer<u32>, _> = HistoryBuffer::new(0);
        assert_eq!(result.unwrap_err(), HistoryError::InvalidCapacity);

        let result: Result<HistoryBuffer<u32>, _> = HistoryBuffer::from_config(&HistoryConfig::with_capacity(0));
        assert_eq!(result.unwrap_err(), HistoryError::InvalidCapacity);
    }

    #[test]
    fn default_uses_config_capacity() {
        let buffer: HistoryBuffer<u32> = HistoryBuffer::default();
        assert_eq!(buffer.capacity(), HistoryConfig::default().capacity);
    }

    #[test]
    fn push_and_peek() {
        let mut buffer = HistoryBuffer::new(2).unwrap();
        buffer.push(1);
        assert_eq!(buffer.peek(), Ok(&1));
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.position(), Some(0));

        buffer.push(2);
        assert_eq!(buffer.peek(), Ok(&2));
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.position(), Some(1));
        assert!(buffer.is_full());
    }

    #[test]
    fn push_over_capacity_evicts_oldest() {
        let buffer = filled(3, &[1, 2, 3, 4, 5]);
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!(buffer.peek_range().copied().collect::<Vec<_>>(), vec![5, 4, 3]);
    }

    #[test]
    fn capacity_one() {
        let mut buffer = filled(1, &[1, 2, 3]);
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.position(), Some(0));
        assert_eq!(buffer.peek(), Ok(&3));
        assert!(!buffer.can_undo());
        assert!(!buffer.can_redo());

        assert_eq!(buffer.pop(), Ok(3));
        assert!(buffer.is_empty());
        assert_eq!(buffer.pop(), Err(HistoryError::Empty));

        buffer.push(4);
        assert_eq!(buffer.peek(), Ok(&4));
    }

    #[test]
    fn empty_peek_and_pop() {
        let mut buffer: HistoryBuffer<u32> = HistoryBuffer::new(4).unwrap();
        assert_eq!(buffer.peek(), Err(HistoryError::Empty));
        assert_eq!(buffer.peek_mut(), Err(HistoryError::Empty));
        assert_eq!(buffer.pop(), Err(HistoryError::Empty));
        assert_eq!(buffer.len(), 0);
    }

    #[test]
    fn set_position() {
        let mut buffer = filled(4, &[1, 2, 3]);
        buffer.set_position(0).unwrap();
        assert_eq!(buffer.peek(), Ok(&1));
        assert_eq!(buffer.position(), Some(0));

        buffer.set_position(2).unwrap();
        assert_eq!(buffer.peek(), Ok(&3));

        assert_eq!(buffer.set_position(3), Err(HistoryError::PositionOutOfRange { position: 3, len: 3 }));
        assert_eq!(buffer.position(), Some(2));
    }

    #[test]
    fn set_position_on_empty_buffer() {
        let mut buffer: HistoryBuffer<u32> = HistoryBuffer::new(4).unwrap();
        assert_eq!(buffer.set_position(0), Err(HistoryError::PositionOutOfRange { position: 0, len: 0 }));
        assert_eq!(buffer.position(), None);
    }

    #[test]
    fn set_position_after_wrap() {
        let mut buffer = filled(3, &[1, 2, 3, 4, 5, 6, 7]);
        for (position, expected) in [5, 6, 7].iter().enumerate() {
            buffer.set_position(position).unwrap();
            assert_eq!(buffer.peek(), Ok(expected));
        }
    }

    #[test]
    fn pop_collapses_head_to_cursor() {
        let mut buffer = filled(5, &[1, 2, 3, 4]);
        buffer.set_position(1).unwrap();

        assert_eq!(buffer.pop(), Ok(2));
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.position(), Some(0));
        assert_eq!(buffer.peek(), Ok(&1));
        assert!(!buffer.can_redo());
    }

    #[test]
    fn pop_at_tail_empties() {
        let mut buffer = filled(5, &[1, 2, 3]);
        buffer.set_position(0).unwrap();
        assert_eq!(buffer.pop(), Ok(1));
        assert!(buffer.is_empty());
        assert_eq!(buffer.position(), None);
    }

    #[test]
    fn push_keeps_entries_after_cursor() {
        let mut buffer = filled(5, &[1, 2, 3]);
        buffer.set_position(0).unwrap();
        buffer.push(4);

        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.position(), Some(3));
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn clear() {
        let mut buffer = filled(3, &[1, 2, 3, 4]);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.position(), None);
        assert_eq!(buffer.peek_range().count(), 0);

        buffer.push(5);
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.peek(), Ok(&5));
    }

    #[test]
    fn get_relative_to_cursor() {
        let mut buffer = filled(4, &[1, 2, 3, 4, 5]);
        assert_eq!(buffer.get(0), Some(&5));
        assert_eq!(buffer.get(3), Some(&2));
        assert_eq!(buffer.get(4), None);

        buffer.set_position(1).unwrap();
        assert_eq!(buffer.get(0), Some(&3));
        assert_eq!(buffer.get(1), Some(&2));
        assert_eq!(buffer.get(2), None);
    }

    #[test]
    fn undo_redo() {
        let mut buffer = filled(3, &[1, 2, 3, 4]);
        assert!(!buffer.can_redo());
        assert_eq!(buffer.redo(), None);

        assert_eq!(buffer.undo(), Some(&3));
        assert_eq!(buffer.undo(), Some(&2));
        assert_eq!(buffer.undo(), None);
        assert_eq!(buffer.position(), Some(0));

        assert_eq!(buffer.redo(), Some(&3));
        assert!(buffer.can_undo());
        assert!(buffer.can_redo());
    }

    #[test]
    fn peek_mut() {
        let mut buffer = filled(2, &[1, 2]);
        *buffer.peek_mut().unwrap() += 10;
        assert_eq!(buffer.peek(), Ok(&12));
    }

    #[test]
    fn debug_lists_live_entries() {
        let buffer = filled(2, &[1, 2, 3]);
        assert_eq!(
            format!("{:?}", buffer),
            "HistoryBuffer { capacity: 2, position: Some(1), entries: [2, 3] }"
        );
    }
}
