pub mod codec;
pub mod config;
pub mod error;
pub mod queue;
pub mod storage;

pub use error::{QueueError, QueueResult};
pub use queue::RingQueue;
