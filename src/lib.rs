//! A thread-safe doubly-linked FIFO queue.
//!
//! [`Queue`] wraps a [`LinkedQueue`] in a single reader-writer lock. Besides
//! enqueue and dequeue it offers removal and lookup by position, and a range
//! cursor that can drop the element it currently points at while scanning.

mod errors;
mod handle;
mod linked_queue;
mod node;
mod queue;

pub use errors::{QueueError, Result};
pub use linked_queue::{Iter, LinkedQueue};
pub use queue::Queue;
