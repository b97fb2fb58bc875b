use thiserror::Error;

pub type QueueResult<T, E = QueueError> = Result<T, E>;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Queue is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    #[error("Queue is empty")]
    EmptyQueue,

    #[error("Capacity {requested} cannot hold the {count} queued elements")]
    CapacityTooSmall { requested: usize, count: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),
}
