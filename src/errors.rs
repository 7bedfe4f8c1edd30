use thiserror::Error;

/// Errors that can occur when operating on the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The requested position does not hold an element.
    #[error("index {index} out of bounds for queue of length {len}")]
    OutOfBounds { index: usize, len: usize },
}

/// Result of a queue lookup or removal.
pub type Result<T> = std::result::Result<T, QueueError>;
