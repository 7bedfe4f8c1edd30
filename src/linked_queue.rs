use crate::{
    errors::{QueueError, Result},
    handle::NodeId,
    node::Node,
};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

/// A doubly-linked FIFO queue whose nodes live in an arena keyed by stable ids.
///
/// Besides head/tail access it keeps an independent range cursor, used by
/// [`next_in_range`](Self::next_in_range) and
/// [`cut_range_item`](Self::cut_range_item) to scan the queue and drop
/// elements on the way. The cursor never influences FIFO order.
///
/// This type does no locking; [`Queue`](crate::Queue) wraps it in a lock.
pub struct LinkedQueue<T> {
    nodes: HashMap<NodeId, Node<T>>,
    next_id: usize,
    first: Option<NodeId>,
    last: Option<NodeId>,
    current: Option<NodeId>,
}

/// Iterator over values from head to tail.
pub struct Iter<'a, T> {
    next: Option<NodeId>,
    remaining: usize,
    queue: &'a LinkedQueue<T>,
}

impl<T> Default for LinkedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinkedQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty queue whose arena can hold `capacity` nodes without
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: HashMap::with_capacity(capacity),
            next_id: 0,
            first: None,
            last: None,
            current: None,
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Is the queue empty?
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a value at the tail: O(1).
    pub fn enqueue(&mut self, value: T) {
        let id = NodeId(self.next_id);
        self.next_id += 1;

        match self.last {
            Some(last) => self.set_next(last, Some(id)),
            None => self.first = Some(id),
        }
        self.nodes.insert(id, Node::new(value, self.last));
        self.last = Some(id);
    }

    /// Remove and return the head value: O(1).
    pub fn dequeue(&mut self) -> Result<T> {
        self.first
            .and_then(|id| self.unlink(id))
            .ok_or_else(|| self.out_of_bounds(0))
    }

    /// Remove and return the value at `index`, counted from the head: O(n).
    ///
    /// `get(0)` is the same as [`dequeue`](Self::dequeue). Removing the last
    /// element moves the tail to its predecessor.
    pub fn get(&mut self, index: usize) -> Result<T> {
        match self.locate(index).and_then(|id| self.unlink(id)) {
            Some(value) => {
                trace!(index, len = self.len(), "removed element by index");
                Ok(value)
            }
            None => Err(self.out_of_bounds(index)),
        }
    }

    /// Borrow the head value without removing it: O(1).
    pub fn peek(&self) -> Result<&T> {
        self.peek_at(0)
    }

    /// Borrow the value at `index` without removing it: O(n).
    pub fn peek_at(&self, index: usize) -> Result<&T> {
        self.locate(index)
            .and_then(|id| self.nodes.get(&id))
            .map(|node| &node.value)
            .ok_or_else(|| self.out_of_bounds(index))
    }

    /// Move the range cursor back before the head: O(1).
    pub fn reset_range(&mut self) {
        trace!("range cursor reset");
        self.current = None;
    }

    /// Advance the range cursor and return the value under it.
    ///
    /// An unset cursor moves to the head. `None` means the range is exhausted
    /// (or the queue is empty); the cursor is unset again, so the next call
    /// starts over from the head.
    pub fn next_in_range(&mut self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.current = match self.current {
            None => self.first,
            Some(id) => self.nodes.get(&id).and_then(|node| node.next),
        };
        let id = self.current?;
        self.nodes.get(&id).map(|node| &node.value)
    }

    /// Remove the element under the range cursor: O(1).
    ///
    /// The cursor steps back to the removed node's predecessor, so the next
    /// [`next_in_range`](Self::next_in_range) yields the element that followed
    /// the removed one. Returns `None` and changes nothing when the cursor is
    /// unset.
    pub fn cut_range_item(&mut self) -> Option<T> {
        let id = self.current?;
        let value = self.unlink(id)?;
        trace!(node = id.0, len = self.len(), "cut range item");
        Some(value)
    }

    /// Iterate values from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.first,
            remaining: self.len(),
            queue: self,
        }
    }

    fn out_of_bounds(&self, index: usize) -> QueueError {
        let len = self.len();
        debug!(index, len, "rejected out-of-bounds access");
        QueueError::OutOfBounds { index, len }
    }

    /// Find the node at `index`, walking from whichever end is closer.
    fn locate(&self, index: usize) -> Option<NodeId> {
        let len = self.len();
        if index >= len {
            return None;
        }
        if index <= len / 2 {
            let mut cur = self.first;
            for _ in 0..index {
                cur = self.nodes.get(&cur?)?.next;
            }
            cur
        } else {
            let mut cur = self.last;
            for _ in index + 1..len {
                cur = self.nodes.get(&cur?)?.prev;
            }
            cur
        }
    }

    /// Detach `id` from the chain, fixing head, tail and cursor.
    fn unlink(&mut self, id: NodeId) -> Option<T> {
        let node = self.nodes.remove(&id)?;

        match node.prev {
            Some(prev) => self.set_next(prev, node.next),
            None => self.first = node.next,
        }
        match node.next {
            Some(next) => self.set_prev(next, node.prev),
            None => self.last = node.prev,
        }
        if self.current == Some(id) {
            self.current = node.prev;
        }

        Some(node.value)
    }

    fn set_next(&mut self, id: NodeId, next: Option<NodeId>) {
        let node = self.nodes.get_mut(&id);
        debug_assert!(node.is_some(), "dangling link to {id:?}");
        if let Some(node) = node {
            node.next = next;
        }
    }

    fn set_prev(&mut self, id: NodeId, prev: Option<NodeId>) {
        let node = self.nodes.get_mut(&id);
        debug_assert!(node.is_some(), "dangling link to {id:?}");
        if let Some(node) = node {
            node.prev = prev;
        }
    }

    /// Walk the chain both ways and check it against the arena.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        match self.len() {
            0 => {
                assert_eq!(self.first, None);
                assert_eq!(self.last, None);
            }
            1 => assert_eq!(self.first, self.last),
            _ => {}
        }

        let mut seen = 0;
        let mut prev = None;
        let mut cur = self.first;
        while let Some(id) = cur {
            let node = &self.nodes[&id];
            assert_eq!(node.prev, prev, "back link of {id:?}");
            seen += 1;
            prev = cur;
            cur = node.next;
        }
        assert_eq!(prev, self.last, "forward walk must end at the tail");
        assert_eq!(seen, self.len(), "every node must be reachable");

        if let Some(id) = self.current {
            assert!(self.nodes.contains_key(&id), "cursor must be live");
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.nodes.get(&self.next?)?;
        self.next = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a LinkedQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Extend<T> for LinkedQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.enqueue(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut queue = Self::with_capacity(iter.size_hint().0);
        queue.extend(iter);
        queue
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders as `[a b c]`.
impl<T: fmt::Display> fmt::Display for LinkedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}
