use crate::{errors::Result, linked_queue::LinkedQueue};
use parking_lot::RwLock;
use std::fmt;

/// A thread-safe FIFO queue guarded by a single reader-writer lock.
///
/// Mutations, including moving the range cursor, take the writer lock;
/// lookups take the reader lock. Each call is atomic on its own. Use
/// [`with_write`](Self::with_write) when several steps, such as a whole
/// scan-and-cut pass, must run without interleaving.
pub struct Queue<T> {
    inner: RwLock<LinkedQueue<T>>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Queue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::from(LinkedQueue::new())
    }

    /// Create an empty queue with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from(LinkedQueue::with_capacity(capacity))
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Is the queue empty?
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Append a value at the tail: O(1).
    pub fn enqueue(&self, value: T) {
        self.inner.write().enqueue(value);
    }

    /// Append every value under one write lock.
    ///
    /// Unlike [`Extend`], this works through a shared reference.
    pub fn enqueue_all<I: IntoIterator<Item = T>>(&self, values: I) {
        self.inner.write().extend(values);
    }

    /// Remove and return the head value: O(1).
    pub fn dequeue(&self) -> Result<T> {
        self.inner.write().dequeue()
    }

    /// Remove and return the value at `index`: O(n).
    pub fn get(&self, index: usize) -> Result<T> {
        self.inner.write().get(index)
    }

    /// Run `f` on the value at `index` under the read lock.
    pub fn peek_with<R>(&self, index: usize, f: impl FnOnce(&T) -> R) -> Result<R> {
        self.inner.read().peek_at(index).map(f)
    }

    /// Move the range cursor back before the head.
    pub fn reset_range(&self) {
        self.inner.write().reset_range();
    }

    /// Remove the element under the range cursor, if any.
    pub fn cut_range_item(&self) -> Option<T> {
        self.inner.write().cut_range_item()
    }

    /// Run `f` against the unlocked queue while holding the write lock.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut LinkedQueue<T>) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Consume the lock and return the unsynchronized queue.
    pub fn into_inner(self) -> LinkedQueue<T> {
        self.inner.into_inner()
    }
}

impl<T: Clone> Queue<T> {
    /// Clone of the head value: O(1).
    pub fn peek(&self) -> Result<T> {
        self.inner.read().peek().cloned()
    }

    /// Clone of the value at `index`: O(n).
    pub fn peek_at(&self, index: usize) -> Result<T> {
        self.inner.read().peek_at(index).cloned()
    }

    /// Advance the range cursor; see [`LinkedQueue::next_in_range`].
    ///
    /// Values that are not `Clone` can walk the cursor through
    /// [`with_write`](Self::with_write).
    pub fn next_in_range(&self) -> Option<T> {
        self.inner.write().next_in_range().cloned()
    }

    /// Snapshot of the values from head to tail.
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.read().iter().cloned().collect()
    }
}

impl<T> From<LinkedQueue<T>> for Queue<T> {
    fn from(queue: LinkedQueue<T>) -> Self {
        Self {
            inner: RwLock::new(queue),
        }
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<LinkedQueue<T>>())
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.inner.get_mut().extend(iter);
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner.read(), f)
    }
}

impl<T: fmt::Display> fmt::Display for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner.read(), f)
    }
}
